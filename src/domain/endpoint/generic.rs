//! Endpoints that work for any model

use std::marker::PhantomData;

use serde_json::{Map, Value};

use super::decode::DecodeRule;
use super::document::resource_document;
use super::request::{list_query, RequestSpec};
use super::Endpoint;
use crate::domain::filter::Filter;
use crate::domain::model::Model;

/// The request shapes shared by every model
#[derive(Debug, Clone, PartialEq)]
pub enum GenericOperation {
    /// GET of a server-provided absolute URL
    Url(String),
    List {
        filters: Vec<Filter>,
        limit: Option<u32>,
    },
    Delete {
        id: String,
    },
    Create {
        attributes: Map<String, Value>,
        relationships: Option<Map<String, Value>>,
    },
    Update {
        id: String,
        attributes: Map<String, Value>,
    },
}

/// A generic endpoint bound to the model `M` it addresses
#[derive(Debug, Clone)]
pub struct GenericEndpoint<M> {
    operation: GenericOperation,
    model: PhantomData<fn() -> M>,
}

impl<M: Model> GenericEndpoint<M> {
    fn with(operation: GenericOperation) -> Self {
        Self {
            operation,
            model: PhantomData,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::with(GenericOperation::Url(url.into()))
    }

    pub fn list(filters: Vec<Filter>, limit: Option<u32>) -> Self {
        Self::with(GenericOperation::List { filters, limit })
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Self::with(GenericOperation::Delete { id: id.into() })
    }

    pub fn create(
        attributes: Map<String, Value>,
        relationships: Option<Map<String, Value>>,
    ) -> Self {
        Self::with(GenericOperation::Create {
            attributes,
            relationships,
        })
    }

    pub fn update(id: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self::with(GenericOperation::Update {
            id: id.into(),
            attributes,
        })
    }

    pub fn operation(&self) -> &GenericOperation {
        &self.operation
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", M::collection_path(), id)
    }
}

impl<M: Model> Endpoint for GenericEndpoint<M> {
    fn describe(&self) -> RequestSpec {
        match &self.operation {
            GenericOperation::Url(url) => RequestSpec::absolute(url.clone()),
            GenericOperation::List { filters, limit } => {
                RequestSpec::get(M::collection_path()).with_query(list_query(filters, *limit))
            }
            GenericOperation::Delete { id } => RequestSpec::delete(Self::item_path(id)),
            GenericOperation::Create {
                attributes,
                relationships,
            } => RequestSpec::post(M::collection_path()).with_body(resource_document(
                &M::resource_type(),
                None,
                Some(attributes.clone()),
                relationships.clone(),
            )),
            GenericOperation::Update { id, attributes } => RequestSpec::patch(Self::item_path(id))
                .with_body(resource_document(
                    &M::resource_type(),
                    Some(id.as_str()),
                    Some(attributes.clone()),
                    None,
                )),
        }
    }

    fn decode_rule(&self) -> DecodeRule {
        match self.operation {
            GenericOperation::Url(_)
            | GenericOperation::List { .. }
            | GenericOperation::Delete { .. } => DecodeRule::DirectThenEnveloped,
            GenericOperation::Create { .. } | GenericOperation::Update { .. } => {
                DecodeRule::Enveloped
            }
        }
    }
}
