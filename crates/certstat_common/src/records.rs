//! Dataset row types
//!
//! Field names follow the validator's output schema so result files can be
//! consumed without renaming.

use serde::{Deserialize, Deserializer, Serialize};

/// One certificate chain submitted to the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRecord {
    pub id: i64,

    /// PEM certificates, leaf first
    #[serde(default, deserialize_with = "null_as_default")]
    pub chain: Vec<String>,
}

/// Outcome of validating a chain against one root store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootStoreResult {
    /// Empty when the root store accepted the chain
    #[serde(default, deserialize_with = "null_as_default")]
    pub root_store_error: String,

    #[serde(default)]
    pub is_valid: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub valid_chains: String,
}

impl RootStoreResult {
    pub fn accepted() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            root_store_error: error.into(),
            ..Default::default()
        }
    }
}

/// One row of a validator result dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub generic_error: String,

    /// (root store name, result) pairs in validator order
    #[serde(default, deserialize_with = "null_as_default")]
    pub root_stores: Vec<(String, RootStoreResult)>,

    #[serde(default)]
    pub leaf_cert_index: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub all_valid_leaves_index: Vec<i32>,
}

impl ValidationResult {
    /// Root store error strings in validator order
    pub fn store_errors(&self) -> impl Iterator<Item = &str> {
        self.root_stores
            .iter()
            .map(|(_, result)| result.root_store_error.as_str())
    }

    /// At least one store was evaluated and none reported an error
    pub fn all_stores_accepted(&self) -> bool {
        !self.root_stores.is_empty() && self.store_errors().all(str::is_empty)
    }

    pub fn nr_valid_leaves(&self) -> usize {
        self.all_valid_leaves_index.len()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_result() {
        let line = r#"{"id":7,"generic_error":"","root_stores":[["apple",{"root_store_error":"","is_valid":true,"valid_chains":"[]"}],["microsoft",{"root_store_error":"x509: unhandled critical extension","is_valid":false,"valid_chains":""}]],"leaf_cert_index":0,"all_valid_leaves_index":[0]}"#;
        let result: ValidationResult = serde_json::from_str(line).unwrap();

        assert_eq!(result.id, 7);
        assert_eq!(result.root_stores.len(), 2);
        assert_eq!(result.root_stores[0].0, "apple");
        assert_eq!(
            result.store_errors().collect::<Vec<_>>(),
            vec!["", "x509: unhandled critical extension"]
        );
        assert_eq!(result.nr_valid_leaves(), 1);
    }

    #[test]
    fn test_nulls_become_empty() {
        let line = r#"{"id":3,"root_stores":null,"all_valid_leaves_index":null}"#;
        let result: ValidationResult = serde_json::from_str(line).unwrap();

        assert!(result.root_stores.is_empty());
        assert!(result.all_valid_leaves_index.is_empty());
        assert_eq!(result.leaf_cert_index, 0);
        assert!(!result.all_stores_accepted());
    }

    #[test]
    fn test_all_stores_accepted() {
        let mut result = ValidationResult {
            id: 1,
            root_stores: vec![
                ("a".into(), RootStoreResult::accepted()),
                ("b".into(), RootStoreResult::accepted()),
            ],
            ..Default::default()
        };
        assert!(result.all_stores_accepted());

        result
            .root_stores
            .push(("c".into(), RootStoreResult::rejected("x509: boom")));
        assert!(!result.all_stores_accepted());
    }

    #[test]
    fn test_chain_record_without_chain() {
        let record: ChainRecord = serde_json::from_str(r#"{"id":12}"#).unwrap();
        assert_eq!(record.id, 12);
        assert!(record.chain.is_empty());
    }
}
