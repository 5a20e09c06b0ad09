//! Concurrent fan-out of independent requests

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::ApiClient;
use crate::domain::batch::BatchResult;
use crate::domain::endpoint::Endpoint;
use crate::domain::AscError;

/// Runs one task per request and gathers their outcomes by id
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    client: ApiClient,
}

impl BatchExecutor {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Run every request concurrently; outcomes in completion order.
    ///
    /// A later request with an id already seen replaces the earlier one.
    async fn run<E, T>(
        &self,
        requests: impl IntoIterator<Item = (String, E)>,
    ) -> Vec<(String, Result<T, AscError>)>
    where
        E: Endpoint + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let requests: BTreeMap<String, E> = requests.into_iter().collect();
        let mut pending: Vec<String> = requests.keys().cloned().collect();
        let mut join_set = JoinSet::new();

        debug!("Starting batch of {} requests", requests.len());

        for (id, endpoint) in requests {
            let client = self.client.clone();
            join_set.spawn(async move {
                let outcome = client.request::<E, T>(&endpoint).await;
                (id, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, outcome)) => {
                    pending.retain(|p| p != &id);
                    outcomes.push((id, outcome));
                }
                Err(e) => warn!("Batch task did not complete: {}", e),
            }
        }

        // Tasks that panicked never reported back
        for id in pending {
            outcomes.push((id, Err(AscError::transport("Request task aborted"))));
        }

        outcomes
    }

    /// Run every request and expose both successes and failures
    pub async fn execute_all<E, T>(
        &self,
        requests: impl IntoIterator<Item = (String, E)>,
    ) -> BatchResult<T>
    where
        E: Endpoint + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let mut result = BatchResult::new();
        for (id, outcome) in self.run(requests).await {
            result.record(id, outcome);
        }
        result
    }

    /// All-or-nothing batch. Successes come back in completion order; any
    /// failure discards them and reports every failed id under `operation`.
    pub async fn execute<E, T>(
        &self,
        operation: &str,
        requests: impl IntoIterator<Item = (String, E)>,
    ) -> Result<Vec<T>, AscError>
    where
        E: Endpoint + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let mut successes = Vec::new();
        let mut failures = BTreeMap::new();

        for (id, outcome) in self.run(requests).await {
            match outcome {
                Ok(value) => successes.push(value),
                Err(error) => {
                    failures.insert(id, error);
                }
            }
        }

        if failures.is_empty() {
            return Ok(successes);
        }

        warn!(
            "{}: {} of {} requests failed",
            operation,
            failures.len(),
            failures.len() + successes.len()
        );
        Err(AscError::RequestFailedPartially {
            operation: operation.to_string(),
            failures,
        })
    }
}
