use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model, Relationships};
use crate::domain::filter::FilterKey;

/// A TestFlight beta group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaGroup {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: BetaGroupAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaGroupAttributes {
    pub name: String,
    #[serde(default)]
    pub is_internal_group: Option<bool>,
    #[serde(default)]
    pub public_link_enabled: Option<bool>,
    #[serde(default)]
    pub public_link: Option<String>,
}

impl Model for BetaGroup {
    const NAME: &'static str = "BetaGroup";
}

impl IdentifiableModel for BetaGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.attributes.name.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaGroupFilterKey {
    Apps,
    Builds,
    Id,
    IsInternalGroup,
    Name,
    PublicLinkEnabled,
    PublicLink,
}

impl FilterKey for BetaGroupFilterKey {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Apps => "apps",
            Self::Builds => "builds",
            Self::Id => "id",
            Self::IsInternalGroup => "isInternalGroup",
            Self::Name => "name",
            Self::PublicLinkEnabled => "publicLinkEnabled",
            Self::PublicLink => "publicLink",
        }
    }
}
