use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IdentifiableModel, Model};

/// Age rating questionnaire answers of an app info
///
/// The questionnaire changes often, so attributes are kept as a JSON object.
/// Its id matches the id of the app info it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRatingDeclaration {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl AgeRatingDeclaration {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

impl Model for AgeRatingDeclaration {
    const NAME: &'static str = "AgeRatingDeclaration";
}

impl IdentifiableModel for AgeRatingDeclaration {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.id.clone()
    }
}
