use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{AgeRatingDeclaration, AppStoreVersionState, IdentifiableModel, Model};

/// App level metadata that is versioned separately from the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: AppInfoAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfoAttributes {
    pub state: AppStoreVersionState,
}

impl AppInfo {
    pub fn is_editable(&self) -> bool {
        self.attributes.state.is_editable()
    }
}

impl Model for AppInfo {
    const NAME: &'static str = "AppInfo";
}

impl IdentifiableModel for AppInfo {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.id.clone()
    }
}

/// Related resources that can be side-loaded with `include=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppInfoInclude {
    AgeRatingDeclaration,
    AppInfoLocalizations,
    PrimaryCategory,
    SecondaryCategory,
}

impl AppInfoInclude {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgeRatingDeclaration => "ageRatingDeclaration",
            Self::AppInfoLocalizations => "appInfoLocalizations",
            Self::PrimaryCategory => "primaryCategory",
            Self::SecondaryCategory => "secondaryCategory",
        }
    }
}

/// A side-loaded resource of an app info document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IncludedResource {
    AgeRatingDeclaration(AgeRatingDeclaration),
    Other(Value),
}

impl<'de> Deserialize<'de> for IncludedResource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let is_age_rating = value.get("type").and_then(Value::as_str)
            == Some(AgeRatingDeclaration::resource_type().as_str());

        if is_age_rating {
            serde_json::from_value(value)
                .map(Self::AgeRatingDeclaration)
                .map_err(serde::de::Error::custom)
        } else {
            Ok(Self::Other(value))
        }
    }
}

/// App infos of one app together with their side-loaded resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfoResponse {
    pub data: Vec<AppInfo>,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

impl AppInfoResponse {
    /// Included age rating declarations
    pub fn age_rating_declarations(&self) -> impl Iterator<Item = &AgeRatingDeclaration> {
        self.included.iter().filter_map(|resource| match resource {
            IncludedResource::AgeRatingDeclaration(declaration) => Some(declaration),
            IncludedResource::Other(_) => None,
        })
    }
}

impl Model for AppInfoResponse {
    const NAME: &'static str = "AppInfo";
}
