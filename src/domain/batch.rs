//! Outcome of a batch of independent requests

use std::collections::BTreeMap;

use super::AscError;

/// Per-id outcome of a batch. Every input id lands in exactly one map.
#[derive(Debug)]
pub struct BatchResult<T> {
    pub successes: BTreeMap<String, T>,
    pub failures: BTreeMap<String, AscError>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            successes: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }
}

impl<T> BatchResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: String, outcome: Result<T, AscError>) {
        match outcome {
            Ok(value) => {
                self.successes.insert(id, value);
            }
            Err(error) => {
                self.failures.insert(id, error);
            }
        }
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successes keyed by id, or every failure reported under `operation`
    pub fn into_successes(
        self,
        operation: impl Into<String>,
    ) -> Result<BTreeMap<String, T>, AscError> {
        if self.failures.is_empty() {
            Ok(self.successes)
        } else {
            Err(AscError::RequestFailedPartially {
                operation: operation.into(),
                failures: self.failures,
            })
        }
    }
}
