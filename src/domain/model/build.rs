use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model, Relationships};
use crate::domain::filter::FilterKey;

/// An uploaded build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: BuildAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingState {
    Processing,
    Failed,
    Invalid,
    Valid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAttributes {
    pub version: String,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub min_os_version: Option<String>,
    #[serde(default)]
    pub processing_state: Option<ProcessingState>,
    #[serde(default)]
    pub uses_non_exempt_encryption: Option<bool>,
    #[serde(default)]
    pub uploaded_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl Model for Build {
    const NAME: &'static str = "Build";
}

impl IdentifiableModel for Build {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.attributes.version.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFilterKey {
    App,
    Expired,
    Id,
    PreReleaseVersion,
    /// Possible values: PROCESSING, FAILED, INVALID, VALID
    ProcessingState,
    Version,
    UsesNonExemptEncryption,
    PreReleaseVersionVersion,
    BetaGroups,
    /// Possible values: WAITING_FOR_REVIEW, IN_REVIEW, REJECTED, APPROVED
    BetaReviewState,
    AppStoreVersion,
    PreReleaseVersionPlatform,
}

impl FilterKey for BuildFilterKey {
    fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Expired => "expired",
            Self::Id => "id",
            Self::PreReleaseVersion => "preReleaseVersion",
            Self::ProcessingState => "processingState",
            Self::Version => "version",
            Self::UsesNonExemptEncryption => "usesNonExemptEncryption",
            Self::PreReleaseVersionVersion => "preReleaseVersion.version",
            Self::BetaGroups => "betaGroups",
            Self::BetaReviewState => "betaAppReviewSubmission.betaReviewState",
            Self::AppStoreVersion => "appStoreVersion",
            Self::PreReleaseVersionPlatform => "preReleaseVersion.platform",
        }
    }
}
