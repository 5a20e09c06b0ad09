use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model};

/// Review and release state of an app store version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStoreVersionState {
    DeveloperRemovedFromSale,
    DeveloperRejected,
    InReview,
    InvalidBinary,
    MetadataRejected,
    PendingAppleRelease,
    PendingContract,
    PendingDeveloperRelease,
    PrepareForSubmission,
    PreorderReadyForSale,
    ProcessingForAppStore,
    ReadyForSale,
    Rejected,
    RemovedFromSale,
    WaitingForExportCompliance,
    WaitingForReview,
    ReplacedWithNewVersion,
    #[serde(other)]
    Unknown,
}

impl AppStoreVersionState {
    /// States in which app metadata such as age ratings may still change
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            Self::DeveloperRejected
                | Self::Rejected
                | Self::WaitingForReview
                | Self::PrepareForSubmission
                | Self::WaitingForExportCompliance
                | Self::InvalidBinary
                | Self::MetadataRejected
                | Self::PendingDeveloperRelease
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppStoreVersion {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: AppStoreVersionAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersionAttributes {
    pub platform: String,
    pub version_string: String,
    pub app_store_state: AppStoreVersionState,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

impl Model for AppStoreVersion {
    const NAME: &'static str = "AppStoreVersion";
}

impl IdentifiableModel for AppStoreVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.attributes.version_string.clone()
    }
}
