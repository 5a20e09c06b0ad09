use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model, Relationships};
use crate::domain::filter::FilterKey;

/// A TestFlight beta tester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaTester {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: BetaTesterAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteType {
    Email,
    PublicLink,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaTesterAttributes {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub invite_type: Option<InviteType>,
}

impl Model for BetaTester {
    const NAME: &'static str = "BetaTester";
}

impl IdentifiableModel for BetaTester {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        [&self.attributes.first_name, &self.attributes.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaTesterFilterKey {
    Apps,
    BetaGroups,
    Builds,
    Email,
    FirstName,
    /// Possible values: EMAIL, PUBLIC_LINK
    InviteType,
    LastName,
}

impl FilterKey for BetaTesterFilterKey {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Apps => "apps",
            Self::BetaGroups => "betaGroups",
            Self::Builds => "builds",
            Self::Email => "email",
            Self::FirstName => "firstName",
            Self::InviteType => "inviteType",
            Self::LastName => "lastName",
        }
    }
}
