//! App Store Connect service
//!
//! Generic list/create/update/delete for any model plus the composite
//! operations that resolve their targets first and then fan out.

use std::collections::{BTreeMap, HashSet};

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{ApiClient, BatchExecutor, PagedLoader};
use crate::domain::endpoint::document::{attributes_of, parse_parameters};
use crate::domain::endpoint::{GenericEndpoint, ResourceEndpoint};
use crate::domain::filter::Filter;
use crate::domain::model::{
    AccessibilityDeclaration, AccessibilityDeclarationFilterKey, AccessibilityDeclarationState,
    AgeRatingDeclaration, App, AppInfoInclude, AppInfoResponse, AppStoreVersion, BetaGroup,
    BetaGroupFilterKey, BetaTester, BetaTesterFilterKey, BetaTesterInvitationResponse, Build,
    BuildFilterKey, BundleId, BundleIdAttributes, BundleIdFilterKey, DeviceFamily, EmptyResponse,
    IdentifiableModel, Model, PageableModel, Platform,
};
use crate::domain::AscError;

/// High level App Store Connect operations
#[derive(Debug, Clone)]
pub struct AscService {
    client: ApiClient,
    batch: BatchExecutor,
}

impl AscService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            batch: BatchExecutor::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn batch(&self) -> &BatchExecutor {
        &self.batch
    }

    // Generic operations

    /// Every model matching `filters`; with a `limit`, only the first page
    pub async fn list<M: Model>(
        &self,
        filters: Vec<Filter>,
        limit: Option<u32>,
    ) -> Result<Vec<M>, AscError> {
        PagedLoader::<M>::new(self.client.clone(), filters, limit)
            .load_all()
            .await
    }

    /// The page after `previous`, or the first page when there is none
    pub async fn list_page<M: Model>(
        &self,
        previous: Option<&PageableModel<M>>,
        filters: Vec<Filter>,
        limit: Option<u32>,
    ) -> Result<PageableModel<M>, AscError> {
        let endpoint = match previous.and_then(|page| page.next_url()) {
            Some(next) => GenericEndpoint::<M>::url(next),
            None => GenericEndpoint::<M>::list(filters, limit),
        };
        self.client.request(&endpoint).await
    }

    pub async fn delete<M: IdentifiableModel>(&self, model: &M) -> Result<EmptyResponse, AscError> {
        info!("Deleting {} '{}' ({})", M::NAME, model.name(), model.id());
        self.client
            .request(&GenericEndpoint::<M>::delete(model.id()))
            .await
    }

    pub async fn create<M: Model>(
        &self,
        attributes: Map<String, Value>,
        relationships: Option<Map<String, Value>>,
    ) -> Result<M, AscError> {
        self.client
            .request(&GenericEndpoint::<M>::create(attributes, relationships))
            .await
    }

    pub async fn update<M: Model>(
        &self,
        id: &str,
        attributes: Map<String, Value>,
    ) -> Result<M, AscError> {
        self.client
            .request(&GenericEndpoint::<M>::update(id, attributes))
            .await
    }

    /// Single resource-specific request; failures are wrapped as `RequestFailed`
    async fn resource<T>(&self, endpoint: ResourceEndpoint) -> Result<T, AscError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.client
            .request(&endpoint)
            .await
            .map_err(AscError::request_failed)
    }

    // Apps

    /// App store versions per app; every app when `app_ids` is empty
    pub async fn list_app_store_versions(
        &self,
        app_ids: &[String],
        filters: Vec<Filter>,
        limit: Option<u32>,
    ) -> Result<Vec<(App, Vec<AppStoreVersion>)>, AscError> {
        let apps: Vec<App> = self.list(vec![], None).await?;

        let targets: Vec<App> = if app_ids.is_empty() {
            apps
        } else {
            app_ids
                .iter()
                .map(|id| {
                    apps.iter()
                        .find(|app| &app.id == id)
                        .cloned()
                        .ok_or_else(|| AscError::not_found("app", id.as_str()))
                })
                .collect::<Result<_, _>>()?
        };

        let requests = targets.iter().map(|app| {
            (
                app.id.clone(),
                ResourceEndpoint::ListAppStoreVersions {
                    app_id: app.id.clone(),
                    filters: filters.clone(),
                    limit,
                },
            )
        });

        let mut versions: BTreeMap<String, Vec<AppStoreVersion>> = self
            .batch
            .execute_all(requests)
            .await
            .into_successes("list app store versions")?;

        Ok(targets
            .into_iter()
            .map(|app| {
                let app_versions = versions.remove(&app.id).unwrap_or_default();
                (app, app_versions)
            })
            .collect())
    }

    // Beta testers

    /// Beta groups of every given tester, concatenated
    pub async fn list_beta_groups_for_testers(
        &self,
        testers: &[BetaTester],
        filters: Vec<Filter>,
        limit: Option<u32>,
    ) -> Result<Vec<BetaGroup>, AscError> {
        let requests = testers.iter().map(|tester| {
            (
                tester.id.clone(),
                ResourceEndpoint::ListAllBetaGroupsForTester {
                    tester_id: tester.id.clone(),
                    filters: filters.clone(),
                    limit,
                },
            )
        });

        let groups: Vec<Vec<BetaGroup>> = self
            .batch
            .execute("list beta groups for testers", requests)
            .await?;

        Ok(groups.into_iter().flatten().collect())
    }

    /// Invite the tester with `email` to each app; every app when `app_ids` is empty
    pub async fn invite_beta_tester(
        &self,
        email: &str,
        app_ids: &[String],
    ) -> Result<Vec<BetaTesterInvitationResponse>, AscError> {
        let target_ids: Vec<String> = if app_ids.is_empty() {
            let apps: Vec<App> = self.list(vec![], None).await?;
            apps.into_iter().map(|app| app.id).collect()
        } else {
            app_ids.to_vec()
        };

        if target_ids.is_empty() {
            return Err(AscError::no_data_provided("app_ids"));
        }

        let testers: Vec<BetaTester> = self
            .list(vec![Filter::new(BetaTesterFilterKey::Email, email)], None)
            .await?;
        let tester = testers
            .into_iter()
            .next()
            .ok_or_else(|| AscError::not_found("beta tester", email))?;

        info!(
            "Inviting tester '{}' ({}) to {} apps",
            tester.name(),
            tester.id,
            target_ids.len()
        );

        let requests = target_ids.into_iter().map(|app_id| {
            (
                app_id.clone(),
                ResourceEndpoint::InviteBetaTester {
                    tester_id: tester.id.clone(),
                    app_id,
                },
            )
        });

        self.batch.execute("invite beta tester", requests).await
    }

    /// Create the tester in every beta group whose name is in `group_names`
    pub async fn add_beta_tester(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        group_names: &[String],
    ) -> Result<Vec<BetaTester>, AscError> {
        let names = group_names.join(",");
        let groups: Vec<BetaGroup> = self
            .list(vec![Filter::new(BetaGroupFilterKey::Name, names.as_str())], None)
            .await?;

        if groups.is_empty() {
            return Err(AscError::not_found("beta group", names));
        }

        info!("Adding tester '{}' to {} beta groups", email, groups.len());

        let requests = groups.iter().map(|group| {
            (
                group.id.clone(),
                ResourceEndpoint::AddBetaTester {
                    email: email.to_string(),
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    group_id: group.id.clone(),
                },
            )
        });

        self.batch.execute("add beta tester", requests).await
    }

    /// Delete every tester matched by any of `filters`.
    ///
    /// Each filter is resolved on its own. Testers that belong to no
    /// existing beta group are left alone.
    pub async fn delete_beta_testers(&self, filters: &[Filter]) -> Result<Vec<BetaTester>, AscError> {
        let valid_groups: HashSet<String> = self
            .list::<BetaGroup>(vec![], None)
            .await?
            .into_iter()
            .map(|group| group.id)
            .collect();

        let mut deleted = Vec::new();

        for filter in filters {
            debug!("Resolving beta testers for filter {}", filter);

            let testers: Vec<BetaTester> = self.list(vec![filter.clone()], None).await?;
            if testers.is_empty() {
                debug!("No beta testers match {}", filter);
                continue;
            }

            let has_valid_group = self
                .list_beta_groups_for_testers(&testers, vec![], None)
                .await?
                .iter()
                .any(|group| valid_groups.contains(&group.id));
            if !has_valid_group {
                debug!("Beta testers for {} are in no existing group, skipping", filter);
                continue;
            }

            let requests = testers.iter().map(|tester| {
                (
                    tester.id.clone(),
                    GenericEndpoint::<BetaTester>::delete(tester.id.as_str()),
                )
            });
            let _: Vec<EmptyResponse> = self.batch.execute("delete beta testers", requests).await?;

            info!("Deleted {} beta testers for {}", testers.len(), filter);
            deleted.extend(testers);
        }

        Ok(deleted)
    }

    // Bundle ids

    pub async fn register_bundle_id(
        &self,
        identifier: &str,
        name: &str,
        platform: Platform,
        seed_id: Option<String>,
    ) -> Result<BundleId, AscError> {
        info!("Registering bundle id '{}'", identifier);
        self.resource(ResourceEndpoint::RegisterBundleId {
            attributes: BundleIdAttributes {
                identifier: identifier.to_string(),
                name: name.to_string(),
                platform,
                seed_id,
            },
        })
        .await
    }

    /// Delete the bundle id registered for `identifier`
    pub async fn delete_bundle_id(&self, identifier: &str) -> Result<BundleId, AscError> {
        let bundle_ids: Vec<BundleId> = self
            .list(
                vec![Filter::new(BundleIdFilterKey::Identifier, identifier)],
                None,
            )
            .await?;

        let bundle_id = bundle_ids
            .into_iter()
            .next()
            .ok_or_else(|| AscError::not_found("bundle id", identifier))?;

        self.delete(&bundle_id).await?;
        Ok(bundle_id)
    }

    // Builds

    /// Expire the given builds; every non-expired build when `ids` is empty
    pub async fn expire_builds(&self, ids: &[String]) -> Result<Vec<Build>, AscError> {
        let filter = if ids.is_empty() {
            Filter::new(BuildFilterKey::Expired, "false")
        } else {
            Filter::new(BuildFilterKey::Id, ids.join(","))
        };

        let builds: Vec<Build> = self.list(vec![filter], None).await?;
        if builds.is_empty() {
            let key = if ids.is_empty() {
                "expired=false".to_string()
            } else {
                ids.join(",")
            };
            return Err(AscError::not_found("builds", key));
        }

        info!("Expiring {} builds", builds.len());

        let requests = builds.iter().map(|build| {
            (
                build.id.clone(),
                ResourceEndpoint::ExpireBuild {
                    build_id: build.id.clone(),
                },
            )
        });

        self.batch.execute("expire builds", requests).await
    }

    // Accessibility declarations

    pub async fn list_accessibility_declarations(
        &self,
        app_id: &str,
        filters: Vec<Filter>,
        limit: Option<u32>,
    ) -> Result<Vec<AccessibilityDeclaration>, AscError> {
        self.resource(ResourceEndpoint::ListAccessibilityDeclarations {
            app_id: app_id.to_string(),
            filters,
            limit,
        })
        .await
    }

    /// Create a declaration from a JSON object of attributes
    pub async fn create_accessibility_declaration(
        &self,
        app_id: &str,
        device_family: DeviceFamily,
        parameters: &str,
    ) -> Result<AccessibilityDeclaration, AscError> {
        let attributes = parse_parameters(parameters)?;
        self.resource(ResourceEndpoint::CreateAccessibilityDeclaration {
            app_id: app_id.to_string(),
            device_family,
            attributes,
        })
        .await
    }

    pub async fn update_accessibility_declaration(
        &self,
        id: &str,
        parameters: &str,
    ) -> Result<AccessibilityDeclaration, AscError> {
        let attributes = parse_parameters(parameters)?;
        self.resource(ResourceEndpoint::UpdateAccessibilityDeclaration {
            id: id.to_string(),
            attributes,
        })
        .await
    }

    pub async fn delete_accessibility_declaration(
        &self,
        id: &str,
    ) -> Result<EmptyResponse, AscError> {
        self.resource(ResourceEndpoint::DeleteAccessibilityDeclaration { id: id.to_string() })
            .await
    }

    pub async fn publish_accessibility_declaration(
        &self,
        id: &str,
    ) -> Result<AccessibilityDeclaration, AscError> {
        self.resource(ResourceEndpoint::PublishAccessibilityDeclaration { id: id.to_string() })
            .await
    }

    /// Apply `parameters` to every draft declaration of the app and publish
    /// it, or create and publish a new one when there is no draft
    pub async fn extended_publish_accessibility_declaration(
        &self,
        app_id: &str,
        device_family: DeviceFamily,
        parameters: &str,
    ) -> Result<Vec<AccessibilityDeclaration>, AscError> {
        let attributes = parse_parameters(parameters)?;
        if attributes.contains_key("publish") {
            return Err(AscError::invalid_input(
                "'publish' is set automatically and must not be part of the parameters",
            ));
        }
        if attributes.is_empty() {
            return Err(AscError::invalid_input(
                "Parameters must not be empty when publishing an accessibility declaration",
            ));
        }

        let drafts = self
            .list_accessibility_declarations(
                app_id,
                vec![Filter::new(
                    AccessibilityDeclarationFilterKey::State,
                    AccessibilityDeclarationState::Draft.as_str(),
                )],
                None,
            )
            .await?;

        if drafts.is_empty() {
            info!("No draft declaration for app {}, creating one", app_id);
            let created = self
                .create_accessibility_declaration(app_id, device_family, parameters)
                .await?;
            let published = self.publish_accessibility_declaration(&created.id).await?;
            return Ok(vec![published]);
        }

        let mut published = Vec::new();
        let mut errors = Vec::new();

        for draft in drafts {
            let outcome = async {
                let updated = self
                    .update_accessibility_declaration(&draft.id, parameters)
                    .await?;
                self.publish_accessibility_declaration(&updated.id).await
            }
            .await;

            match outcome {
                Ok(declaration) => published.push(declaration),
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(AscError::RequestFailedMultiple(errors));
        }

        Ok(published)
    }

    // App infos and age ratings

    pub async fn list_app_infos(
        &self,
        app_id: &str,
        include: Vec<AppInfoInclude>,
        limit: Option<u32>,
    ) -> Result<AppInfoResponse, AscError> {
        self.resource(ResourceEndpoint::ListAppInfos {
            app_id: app_id.to_string(),
            include,
            limit,
        })
        .await
    }

    pub async fn get_age_rating_declaration(
        &self,
        app_info_id: &str,
    ) -> Result<AgeRatingDeclaration, AscError> {
        self.resource(ResourceEndpoint::GetAgeRatingDeclaration {
            app_info_id: app_info_id.to_string(),
        })
        .await
    }

    /// Age rating declaration of every app info of the app
    pub async fn list_age_rating_declarations(
        &self,
        app_id: &str,
    ) -> Result<Vec<AgeRatingDeclaration>, AscError> {
        let app_infos = self.list_app_infos(app_id, vec![], None).await?;

        try_join_all(
            app_infos
                .data
                .iter()
                .map(|app_info| self.get_age_rating_declaration(&app_info.id)),
        )
        .await
    }

    /// Apply `parameters` to the age rating declarations of every editable
    /// app info of the app
    pub async fn update_age_ratings(
        &self,
        app_id: &str,
        parameters: &str,
    ) -> Result<Vec<AgeRatingDeclaration>, AscError> {
        let attributes = parse_parameters(parameters)?;

        let app_infos = self
            .list_app_infos(app_id, vec![AppInfoInclude::AgeRatingDeclaration], None)
            .await?;

        let editable: HashSet<&str> = app_infos
            .data
            .iter()
            .filter(|info| info.is_editable())
            .map(|info| info.id.as_str())
            .collect();

        if editable.is_empty() {
            let states: Vec<String> = app_infos
                .data
                .iter()
                .map(|info| format!("{:?}", info.attributes.state))
                .collect();
            return Err(AscError::invalid_input(format!(
                "No editable app infos found for '{}'. Available app info states: [{}]",
                app_id,
                states.join(", ")
            )));
        }

        // A declaration shares its id with the app info it belongs to
        let declarations: Vec<&AgeRatingDeclaration> = app_infos
            .age_rating_declarations()
            .filter(|declaration| editable.contains(declaration.id.as_str()))
            .collect();

        if declarations.is_empty() {
            return Err(AscError::invalid_input(format!(
                "Editable app infos of '{}' have no age rating declaration",
                app_id
            )));
        }

        info!("Updating {} age rating declarations", declarations.len());

        let requests = declarations.iter().map(|declaration| {
            (
                declaration.id.clone(),
                ResourceEndpoint::UpdateAgeRatingDeclaration {
                    id: declaration.id.clone(),
                    attributes: attributes.clone(),
                },
            )
        });

        self.batch.execute("update age ratings", requests).await
    }

    /// Update any model from a serializable attribute value
    pub async fn update_with<M: Model, A: serde::Serialize>(
        &self,
        id: &str,
        attributes: &A,
    ) -> Result<M, AscError> {
        self.update(id, attributes_of(attributes)?).await
    }
}
