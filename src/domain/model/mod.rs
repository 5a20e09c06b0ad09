//! App Store Connect resource models
//!
//! Only the fields the client layer needs are typed; everything is decoded
//! leniently so new server-side attributes do not break decoding.

mod accessibility;
mod age_rating;
mod app;
mod app_info;
mod app_store_version;
mod beta_group;
mod beta_tester;
mod build;
mod bundle_id;
mod invitation;
mod page;

pub use accessibility::{
    AccessibilityDeclaration, AccessibilityDeclarationAttributes, AccessibilityDeclarationFilterKey,
    AccessibilityDeclarationState, DeviceFamily,
};
pub use age_rating::AgeRatingDeclaration;
pub use app::{App, AppAttributes, AppFilterKey};
pub use app_info::{AppInfo, AppInfoAttributes, AppInfoInclude, AppInfoResponse, IncludedResource};
pub use app_store_version::{AppStoreVersion, AppStoreVersionAttributes, AppStoreVersionState};
pub use beta_group::{BetaGroup, BetaGroupAttributes, BetaGroupFilterKey};
pub use beta_tester::{BetaTester, BetaTesterAttributes, BetaTesterFilterKey, InviteType};
pub use build::{Build, BuildAttributes, BuildFilterKey, ProcessingState};
pub use bundle_id::{BundleId, BundleIdAttributes, BundleIdFilterKey, Platform};
pub use invitation::BetaTesterInvitationResponse;
pub use page::{DataWrapper, PageLinks, PageableModel, Paging, PagingInformation};

use std::collections::HashMap;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Version segment every API path starts with
pub const API_VERSION: &str = "v1";

/// Capability set a type needs to be listed, created, updated or deleted
/// through the generic endpoints
pub trait Model: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Singular type name, e.g. `BetaTester`
    const NAME: &'static str;

    /// JSON:API resource type, e.g. `betaTesters`
    fn resource_type() -> String {
        resource_collection(Self::NAME)
    }

    /// Collection path, e.g. `/v1/betaTesters`
    fn collection_path() -> String {
        format!("/{}/{}", API_VERSION, Self::resource_type())
    }
}

/// A model with a server-assigned identifier
pub trait IdentifiableModel: Model {
    fn id(&self) -> &str;

    /// Human readable name used in logs and CLI output
    fn name(&self) -> String;
}

/// Turn a singular model name into its collection name:
/// first letter lowercased, then pluralized with a trailing `s`
pub fn resource_collection(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_lowercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Relationship links of a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default)]
    pub links: Option<RelationLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationLinks {
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub related: Option<String>,
}

/// Relationships keyed by name, e.g. `betaGroups`
pub type Relationships = HashMap<String, Relation>;

/// Body of a successful request that returns no content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse {}
