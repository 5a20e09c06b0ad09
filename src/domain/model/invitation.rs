use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model};

/// Result of inviting a beta tester to an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaTesterInvitationResponse {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl Model for BetaTesterInvitationResponse {
    const NAME: &'static str = "BetaTesterInvitation";
}

impl IdentifiableModel for BetaTesterInvitationResponse {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.id.clone()
    }
}
