use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model, Relationships};
use crate::domain::filter::FilterKey;

/// A registered bundle identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleId {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: BundleIdAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "IOS")]
    Ios,
    #[serde(rename = "MAC_OS")]
    MacOs,
    #[serde(rename = "UNIVERSAL")]
    Universal,
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IOS" => Ok(Self::Ios),
            "MAC_OS" | "MACOS" => Ok(Self::MacOs),
            "UNIVERSAL" => Ok(Self::Universal),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleIdAttributes {
    pub identifier: String,
    pub name: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_id: Option<String>,
}

impl Model for BundleId {
    const NAME: &'static str = "BundleId";
}

impl IdentifiableModel for BundleId {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.attributes.name.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleIdFilterKey {
    Id,
    Identifier,
    Name,
    /// Possible values: see `Platform`
    Platform,
    SeedId,
}

impl FilterKey for BundleIdFilterKey {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Identifier => "identifier",
            Self::Name => "name",
            Self::Platform => "platform",
            Self::SeedId => "seedId",
        }
    }
}
