use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model, Relationships};
use crate::domain::filter::FilterKey;

/// An app registered in App Store Connect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: AppAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    pub name: String,
    pub bundle_id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub primary_locale: Option<String>,
}

impl Model for App {
    const NAME: &'static str = "App";
}

impl IdentifiableModel for App {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.attributes.name.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFilterKey {
    BundleId,
    Id,
    Name,
    Sku,
    AppStoreVersions,
    /// Possible values: IOS, MAC_OS, TV_OS
    AppStoreVersionsPlatform,
    /// Possible values: see `AppStoreVersionState`
    AppStoreVersionsAppStoreState,
}

impl FilterKey for AppFilterKey {
    fn as_str(&self) -> &'static str {
        match self {
            Self::BundleId => "bundleId",
            Self::Id => "id",
            Self::Name => "name",
            Self::Sku => "sku",
            Self::AppStoreVersions => "appStoreVersions",
            Self::AppStoreVersionsPlatform => "appStoreVersions.platform",
            Self::AppStoreVersionsAppStoreState => "appStoreVersions.appStoreState",
        }
    }
}
