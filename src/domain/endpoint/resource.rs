//! Resource-specific endpoints

use serde_json::{json, Map, Value};

use super::decode::DecodeRule;
use super::document::{resource_document, to_many, to_one};
use super::request::{list_query, page_limit, RequestSpec};
use super::Endpoint;
use crate::domain::filter::Filter;
use crate::domain::model::{
    AccessibilityDeclaration, AgeRatingDeclaration, App, AppInfoInclude, BetaGroup, BetaTester,
    Build, BundleId, BundleIdAttributes, DeviceFamily, Model, API_VERSION,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEndpoint {
    ListAppStoreVersions {
        app_id: String,
        filters: Vec<Filter>,
        limit: Option<u32>,
    },
    ListAllBetaGroupsForTester {
        tester_id: String,
        filters: Vec<Filter>,
        limit: Option<u32>,
    },
    ListAccessibilityDeclarations {
        app_id: String,
        filters: Vec<Filter>,
        limit: Option<u32>,
    },
    CreateAccessibilityDeclaration {
        app_id: String,
        device_family: DeviceFamily,
        attributes: Map<String, Value>,
    },
    UpdateAccessibilityDeclaration {
        id: String,
        attributes: Map<String, Value>,
    },
    DeleteAccessibilityDeclaration {
        id: String,
    },
    PublishAccessibilityDeclaration {
        id: String,
    },
    ListAppInfos {
        app_id: String,
        include: Vec<AppInfoInclude>,
        limit: Option<u32>,
    },
    GetAgeRatingDeclaration {
        app_info_id: String,
    },
    UpdateAgeRatingDeclaration {
        id: String,
        attributes: Map<String, Value>,
    },
    InviteBetaTester {
        tester_id: String,
        app_id: String,
    },
    AddBetaTester {
        email: String,
        first_name: String,
        last_name: String,
        group_id: String,
    },
    RegisterBundleId {
        attributes: BundleIdAttributes,
    },
    ExpireBuild {
        build_id: String,
    },
}

fn item_path<M: Model>(id: &str) -> String {
    format!("{}/{}", M::collection_path(), id)
}

fn path(segments: &[&str]) -> String {
    let mut path = format!("/{}", API_VERSION);
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

impl Endpoint for ResourceEndpoint {
    fn describe(&self) -> RequestSpec {
        match self {
            Self::ListAppStoreVersions {
                app_id,
                filters,
                limit,
            } => RequestSpec::get(path(&["apps", app_id.as_str(), "appStoreVersions"]))
                .with_query(list_query(filters, *limit)),

            Self::ListAllBetaGroupsForTester {
                tester_id,
                filters,
                limit,
            } => RequestSpec::get(path(&["betaTesters", tester_id.as_str(), "betaGroups"]))
                .with_query(list_query(filters, *limit)),

            Self::ListAccessibilityDeclarations {
                app_id,
                filters,
                limit,
            } => RequestSpec::get(path(&["apps", app_id.as_str(), "accessibilityDeclarations"]))
                .with_query(list_query(filters, *limit)),

            Self::CreateAccessibilityDeclaration {
                app_id,
                device_family,
                attributes,
            } => {
                let mut attributes = attributes.clone();
                attributes.insert("deviceFamily".to_string(), json!(device_family.as_str()));

                let mut relationships = Map::new();
                relationships.insert("app".to_string(), to_one(&App::resource_type(), app_id));

                RequestSpec::post(AccessibilityDeclaration::collection_path()).with_body(
                    resource_document(
                        &AccessibilityDeclaration::resource_type(),
                        None,
                        Some(attributes),
                        Some(relationships),
                    ),
                )
            }

            Self::UpdateAccessibilityDeclaration { id, attributes } => {
                RequestSpec::patch(item_path::<AccessibilityDeclaration>(id))
                    .with_body(resource_document(
                        &AccessibilityDeclaration::resource_type(),
                        Some(id.as_str()),
                        Some(attributes.clone()),
                        None,
                    ))
            }

            Self::DeleteAccessibilityDeclaration { id } => {
                RequestSpec::delete(item_path::<AccessibilityDeclaration>(id))
            }

            Self::PublishAccessibilityDeclaration { id } => {
                let mut attributes = Map::new();
                attributes.insert("publish".to_string(), json!(true));

                RequestSpec::patch(item_path::<AccessibilityDeclaration>(id))
                    .with_body(resource_document(
                        &AccessibilityDeclaration::resource_type(),
                        Some(id.as_str()),
                        Some(attributes),
                        None,
                    ))
            }

            Self::ListAppInfos {
                app_id,
                include,
                limit,
            } => {
                let mut query = Vec::new();
                if !include.is_empty() {
                    let names: Vec<&str> = include.iter().map(AppInfoInclude::as_str).collect();
                    query.push(("include".to_string(), names.join(",")));
                }
                query.push(("limit".to_string(), page_limit(*limit).to_string()));

                RequestSpec::get(path(&["apps", app_id.as_str(), "appInfos"])).with_query(query)
            }

            Self::GetAgeRatingDeclaration { app_info_id } => {
                RequestSpec::get(path(&["appInfos", app_info_id.as_str(), "ageRatingDeclaration"]))
            }

            Self::UpdateAgeRatingDeclaration { id, attributes } => {
                RequestSpec::patch(item_path::<AgeRatingDeclaration>(id))
                    .with_body(resource_document(
                        &AgeRatingDeclaration::resource_type(),
                        Some(id.as_str()),
                        Some(attributes.clone()),
                        None,
                    ))
            }

            Self::InviteBetaTester { tester_id, app_id } => {
                let mut relationships = Map::new();
                relationships.insert("app".to_string(), to_one(&App::resource_type(), app_id));
                relationships.insert(
                    "betaTester".to_string(),
                    to_one(&BetaTester::resource_type(), tester_id),
                );

                RequestSpec::post(path(&["betaTesterInvitations"])).with_body(resource_document(
                    "betaTesterInvitations",
                    None,
                    None,
                    Some(relationships),
                ))
            }

            Self::AddBetaTester {
                email,
                first_name,
                last_name,
                group_id,
            } => {
                let mut attributes = Map::new();
                attributes.insert("email".to_string(), json!(email));
                attributes.insert("firstName".to_string(), json!(first_name));
                attributes.insert("lastName".to_string(), json!(last_name));

                let mut relationships = Map::new();
                relationships.insert(
                    "betaGroups".to_string(),
                    to_many(&BetaGroup::resource_type(), [group_id.as_str()]),
                );

                RequestSpec::post(BetaTester::collection_path()).with_body(resource_document(
                    &BetaTester::resource_type(),
                    None,
                    Some(attributes),
                    Some(relationships),
                ))
            }

            Self::RegisterBundleId { attributes } => {
                let mut map = Map::new();
                map.insert("identifier".to_string(), json!(attributes.identifier));
                map.insert("name".to_string(), json!(attributes.name));
                map.insert("platform".to_string(), json!(attributes.platform));
                if let Some(seed_id) = &attributes.seed_id {
                    map.insert("seedId".to_string(), json!(seed_id));
                }

                RequestSpec::post(BundleId::collection_path()).with_body(resource_document(
                    &BundleId::resource_type(),
                    None,
                    Some(map),
                    None,
                ))
            }

            Self::ExpireBuild { build_id } => {
                let mut attributes = Map::new();
                attributes.insert("expired".to_string(), json!(true));

                RequestSpec::patch(item_path::<Build>(build_id)).with_body(
                    resource_document(&Build::resource_type(), Some(build_id.as_str()), Some(attributes), None),
                )
            }
        }
    }

    fn decode_rule(&self) -> DecodeRule {
        match self {
            // Deletion answers 204 without a document
            Self::DeleteAccessibilityDeclaration { .. } => DecodeRule::Direct,
            // Side-loaded resources live next to `data`
            Self::ListAppInfos { .. } => DecodeRule::Direct,
            _ => DecodeRule::Enveloped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint::HttpMethod;
    use crate::domain::model::Platform;

    #[test]
    fn test_list_app_store_versions() {
        let spec = ResourceEndpoint::ListAppStoreVersions {
            app_id: "123".to_string(),
            filters: vec![],
            limit: Some(5),
        }
        .describe();

        assert_eq!(spec.method, HttpMethod::Get);
        assert_eq!(spec.path, "/v1/apps/123/appStoreVersions");
        assert_eq!(spec.query, vec![("limit".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_list_beta_groups_for_tester() {
        let spec = ResourceEndpoint::ListAllBetaGroupsForTester {
            tester_id: "t1".to_string(),
            filters: vec![Filter::raw("name", "QA")],
            limit: None,
        }
        .describe();

        assert_eq!(spec.path, "/v1/betaTesters/t1/betaGroups");
        assert_eq!(spec.query.len(), 2);
    }

    #[test]
    fn test_add_beta_tester_body() {
        let endpoint = ResourceEndpoint::AddBetaTester {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            group_id: "g1".to_string(),
        };
        let spec = endpoint.describe();

        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.path, "/v1/betaTesters");
        assert_eq!(
            spec.body,
            Some(json!({
                "data": {
                    "type": "betaTesters",
                    "attributes": {
                        "email": "jane@example.com",
                        "firstName": "Jane",
                        "lastName": "Doe"
                    },
                    "relationships": {
                        "betaGroups": { "data": [{ "type": "betaGroups", "id": "g1" }] }
                    }
                }
            }))
        );
        assert_eq!(endpoint.decode_rule(), DecodeRule::Enveloped);
    }

    #[test]
    fn test_invite_beta_tester_body() {
        let spec = ResourceEndpoint::InviteBetaTester {
            tester_id: "t1".to_string(),
            app_id: "a1".to_string(),
        }
        .describe();

        assert_eq!(spec.path, "/v1/betaTesterInvitations");
        assert_eq!(
            spec.body,
            Some(json!({
                "data": {
                    "type": "betaTesterInvitations",
                    "relationships": {
                        "app": { "data": { "type": "apps", "id": "a1" } },
                        "betaTester": { "data": { "type": "betaTesters", "id": "t1" } }
                    }
                }
            }))
        );
    }

    #[test]
    fn test_register_bundle_id_omits_absent_seed() {
        let spec = ResourceEndpoint::RegisterBundleId {
            attributes: BundleIdAttributes {
                identifier: "com.example.app".to_string(),
                name: "Example".to_string(),
                platform: Platform::Universal,
                seed_id: None,
            },
        }
        .describe();

        assert_eq!(
            spec.body,
            Some(json!({
                "data": {
                    "type": "bundleIds",
                    "attributes": {
                        "identifier": "com.example.app",
                        "name": "Example",
                        "platform": "UNIVERSAL"
                    }
                }
            }))
        );
    }

    #[test]
    fn test_expire_build_body() {
        let spec = ResourceEndpoint::ExpireBuild {
            build_id: "b1".to_string(),
        }
        .describe();

        assert_eq!(spec.method, HttpMethod::Patch);
        assert_eq!(spec.path, "/v1/builds/b1");
        assert_eq!(
            spec.body,
            Some(json!({ "data": { "type": "builds", "id": "b1", "attributes": { "expired": true } } }))
        );
    }

    #[test]
    fn test_create_accessibility_declaration_adds_device_family() {
        let mut attributes = Map::new();
        attributes.insert("supportsCaptions".to_string(), json!(true));

        let spec = ResourceEndpoint::CreateAccessibilityDeclaration {
            app_id: "a1".to_string(),
            device_family: DeviceFamily::IPad,
            attributes,
        }
        .describe();

        assert_eq!(spec.path, "/v1/accessibilityDeclarations");
        let body = spec.body.unwrap();
        assert_eq!(body["data"]["attributes"]["deviceFamily"], "IPAD");
        assert_eq!(body["data"]["attributes"]["supportsCaptions"], true);
        assert_eq!(body["data"]["relationships"]["app"]["data"]["id"], "a1");
    }

    #[test]
    fn test_publish_and_delete_accessibility_declaration() {
        let publish = ResourceEndpoint::PublishAccessibilityDeclaration {
            id: "d1".to_string(),
        }
        .describe();
        assert_eq!(publish.method, HttpMethod::Patch);
        assert_eq!(publish.path, "/v1/accessibilityDeclarations/d1");
        assert_eq!(publish.body.unwrap()["data"]["attributes"]["publish"], true);

        let delete = ResourceEndpoint::DeleteAccessibilityDeclaration {
            id: "d1".to_string(),
        };
        assert_eq!(delete.describe().method, HttpMethod::Delete);
        assert_eq!(delete.decode_rule(), DecodeRule::Direct);
    }

    #[test]
    fn test_list_app_infos_with_include() {
        let endpoint = ResourceEndpoint::ListAppInfos {
            app_id: "a1".to_string(),
            include: vec![AppInfoInclude::AgeRatingDeclaration],
            limit: None,
        };
        let spec = endpoint.describe();

        assert_eq!(spec.path, "/v1/apps/a1/appInfos");
        assert_eq!(
            spec.query,
            vec![
                ("include".to_string(), "ageRatingDeclaration".to_string()),
                ("limit".to_string(), "200".to_string()),
            ]
        );
        assert_eq!(endpoint.decode_rule(), DecodeRule::Direct);
    }

    #[test]
    fn test_age_rating_endpoints() {
        let get = ResourceEndpoint::GetAgeRatingDeclaration {
            app_info_id: "i1".to_string(),
        }
        .describe();
        assert_eq!(get.path, "/v1/appInfos/i1/ageRatingDeclaration");
        assert!(get.query.is_empty());

        let mut attributes = Map::new();
        attributes.insert("gambling".to_string(), json!(false));
        let update = ResourceEndpoint::UpdateAgeRatingDeclaration {
            id: "i1".to_string(),
            attributes,
        }
        .describe();
        assert_eq!(update.path, "/v1/ageRatingDeclarations/i1");
        assert_eq!(update.body.unwrap()["data"]["type"], "ageRatingDeclarations");
    }
}
