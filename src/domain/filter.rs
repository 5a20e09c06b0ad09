//! Query filters
//!
//! A filter is a single `filter[<key>]=<value>` predicate. Several filters
//! on one request combine as logical AND.

use std::fmt;

/// A model-specific filter key, erased to its wire name for transport
pub trait FilterKey {
    /// The key as it appears inside `filter[...]`
    fn as_str(&self) -> &'static str;
}

/// A single key/value query predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    key: String,
    value: String,
}

impl Filter {
    /// Create a filter from a typed model key
    pub fn new(key: impl FilterKey, value: impl Into<String>) -> Self {
        Self {
            key: key.as_str().to_string(),
            value: value.into(),
        }
    }

    /// Create a filter from an untyped key, e.g. one given on the command line
    pub fn raw(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The query parameter name, `filter[<key>]`
    pub fn query_name(&self) -> String {
        format!("filter[{}]", self.key)
    }

    /// The `(name, value)` pair this filter contributes to a query string
    pub fn query_item(&self) -> (String, String) {
        (self.query_name(), self.value.clone())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    /// Parse `key=value`; the value may itself contain `=`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok(Self::raw(key.trim(), value.trim()))
            }
            _ => Err(format!("expected 'key=value', got '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum TestKey {
        Email,
    }

    impl FilterKey for TestKey {
        fn as_str(&self) -> &'static str {
            match self {
                Self::Email => "email",
            }
        }
    }

    #[test]
    fn test_typed_key_is_erased_to_string() {
        let filter = Filter::new(TestKey::Email, "a@b.com");
        assert_eq!(filter.key(), "email");
        assert_eq!(filter.value(), "a@b.com");
    }

    #[test]
    fn test_query_item() {
        let filter = Filter::raw("appStoreVersions.platform", "IOS");
        assert_eq!(
            filter.query_item(),
            (
                "filter[appStoreVersions.platform]".to_string(),
                "IOS".to_string()
            )
        );
    }

    #[test]
    fn test_parse_from_str() {
        let filter: Filter = "email=john=doe@example.com".parse().unwrap();
        assert_eq!(filter.key(), "email");
        assert_eq!(filter.value(), "john=doe@example.com");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!("email".parse::<Filter>().is_err());
        assert!("=value".parse::<Filter>().is_err());
    }
}
