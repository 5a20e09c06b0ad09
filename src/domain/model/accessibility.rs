use serde::{Deserialize, Serialize};

use super::{IdentifiableModel, Model};
use crate::domain::filter::FilterKey;

/// Accessibility support an app declares for one device family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityDeclaration {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: AccessibilityDeclarationAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceFamily {
    #[serde(rename = "IPHONE")]
    IPhone,
    #[serde(rename = "IPAD")]
    IPad,
    #[serde(rename = "APPLE_TV")]
    AppleTv,
    #[serde(rename = "APPLE_WATCH")]
    AppleWatch,
    #[serde(rename = "MAC")]
    Mac,
    #[serde(rename = "VISION")]
    Vision,
}

impl DeviceFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IPhone => "IPHONE",
            Self::IPad => "IPAD",
            Self::AppleTv => "APPLE_TV",
            Self::AppleWatch => "APPLE_WATCH",
            Self::Mac => "MAC",
            Self::Vision => "VISION",
        }
    }
}

impl std::str::FromStr for DeviceFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IPHONE" => Ok(Self::IPhone),
            "IPAD" => Ok(Self::IPad),
            "APPLE_TV" => Ok(Self::AppleTv),
            "APPLE_WATCH" => Ok(Self::AppleWatch),
            "MAC" => Ok(Self::Mac),
            "VISION" => Ok(Self::Vision),
            other => Err(format!("unknown device family '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessibilityDeclarationState {
    Draft,
    Published,
    Replaced,
}

impl AccessibilityDeclarationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Replaced => "REPLACED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityDeclarationAttributes {
    pub device_family: DeviceFamily,
    pub state: AccessibilityDeclarationState,
    #[serde(default)]
    pub supports_audio_descriptions: bool,
    #[serde(default)]
    pub supports_captions: bool,
    #[serde(default)]
    pub supports_dark_interface: bool,
    #[serde(default)]
    pub supports_differentiate_without_color_alone: bool,
    #[serde(default)]
    pub supports_larger_text: bool,
    #[serde(default)]
    pub supports_reduced_motion: bool,
    #[serde(default)]
    pub supports_sufficient_contrast: bool,
    #[serde(default)]
    pub supports_voice_control: bool,
    #[serde(default)]
    pub supports_voiceover: bool,
}

impl Model for AccessibilityDeclaration {
    const NAME: &'static str = "AccessibilityDeclaration";
}

impl IdentifiableModel for AccessibilityDeclaration {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityDeclarationFilterKey {
    /// Possible values: see `DeviceFamily`
    DeviceFamily,
    /// Possible values: see `AccessibilityDeclarationState`
    State,
}

impl FilterKey for AccessibilityDeclarationFilterKey {
    fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceFamily => "deviceFamily",
            Self::State => "state",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_declaration() {
        let json = r#"{
            "type": "accessibilityDeclarations",
            "id": "d1",
            "attributes": {
                "deviceFamily": "APPLE_WATCH",
                "state": "DRAFT",
                "supportsCaptions": true
            }
        }"#;

        let declaration: AccessibilityDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(declaration.attributes.device_family, DeviceFamily::AppleWatch);
        assert_eq!(
            declaration.attributes.state,
            AccessibilityDeclarationState::Draft
        );
        assert!(declaration.attributes.supports_captions);
        assert!(!declaration.attributes.supports_voiceover);
    }

    #[test]
    fn test_device_family_round_trips_through_str() {
        let family: DeviceFamily = "apple_tv".parse().unwrap();
        assert_eq!(family.as_str(), "APPLE_TV");
        assert!("toaster".parse::<DeviceFamily>().is_err());
    }
}
