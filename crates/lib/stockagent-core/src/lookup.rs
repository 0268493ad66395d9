use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PortfolioError;
use crate::loader::PortfolioLoader;

pub const DEFAULT_ACCESS_KEY: &str = "user123";
pub const DEFAULT_SOURCE: &str = "https://jsonbin.io/689589fcf7e7a370d1f70914";

/// Values used when a caller omits the access key or source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupDefaults {
    pub access_key: String,
    pub source: String,
}

impl Default for LookupDefaults {
    fn default() -> Self {
        Self {
            access_key: DEFAULT_ACCESS_KEY.to_string(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl LookupDefaults {
    #[must_use]
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Loads a portfolio document and returns the record for one access key.
#[derive(Debug, Clone)]
pub struct PortfolioLookup {
    loader: PortfolioLoader,
    defaults: LookupDefaults,
}

impl PortfolioLookup {
    #[must_use]
    pub const fn new(loader: PortfolioLoader, defaults: LookupDefaults) -> Self {
        Self { loader, defaults }
    }

    /// Fetches `source` and returns the value stored under `access_key`.
    ///
    /// An omitted or empty access key and an omitted source fall back to the
    /// configured defaults. Any other value, whitespace included, is used as given.
    ///
    /// # Errors
    /// Propagates loader failures and returns `KeyNotFound` when the key is
    /// absent from the document.
    pub async fn lookup(
        &self,
        access_key: Option<&str>,
        source: Option<&str>,
    ) -> Result<Value, PortfolioError> {
        let access_key = access_key
            .filter(|key| !key.is_empty())
            .unwrap_or(self.defaults.access_key.as_str());
        let source = source.unwrap_or(self.defaults.source.as_str());
        debug!(access_key, source, "portfolio lookup");
        let document = self.loader.load(source).await?;
        select_record(document, access_key)
    }
}

/// Removes and returns the record stored under `access_key`, unchanged.
///
/// # Errors
/// Returns `PortfolioError::KeyNotFound` naming the key when it is absent.
pub fn select_record(
    mut document: Map<String, Value>,
    access_key: &str,
) -> Result<Value, PortfolioError> {
    document
        .remove(access_key)
        .ok_or_else(|| PortfolioError::KeyNotFound {
            key: access_key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "u1": {"x": 1},
            "u2": [1, 2, 3],
            "u3": null
        }) else {
            unreachable!("literal is an object")
        };
        map
    }

    #[test]
    fn select_record_returns_value_unchanged() {
        let record = select_record(store(), "u1").expect("u1 exists");
        assert_eq!(record, json!({"x": 1}));
    }

    #[test]
    fn select_record_keeps_null_records() {
        let record = select_record(store(), "u3").expect("u3 exists");
        assert_eq!(record, Value::Null);
    }

    #[test]
    fn select_record_names_missing_key() {
        let err = select_record(store(), "missing").expect_err("missing is absent");
        assert!(matches!(err, PortfolioError::KeyNotFound { ref key } if key == "missing"));
    }

    #[test]
    fn every_top_level_key_selects_its_own_value() {
        let original = store();
        for (key, value) in &original {
            let record = select_record(original.clone(), key).expect("key exists");
            assert_eq!(&record, value);
        }
    }

    #[test]
    fn defaults_use_builtin_constants() {
        let defaults = LookupDefaults::default();
        assert_eq!(defaults.access_key, DEFAULT_ACCESS_KEY);
        assert_eq!(defaults.source, DEFAULT_SOURCE);
    }
}
