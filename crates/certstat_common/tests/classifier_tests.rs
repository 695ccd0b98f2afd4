//! Classification of validator result rows as read from a dataset.

use certstat_common::dataset::load_results;
use certstat_common::{classify_errors, CertstatError, ErrorCategory, ValidationResult};
use std::io::Write;
use tempfile::NamedTempFile;

const UNKNOWN_AUTHORITY: &str = "x509: certificate signed by unknown authority";
const EXPIRED: &str = "x509: certificate has expired or is not yet valid: current time 2024-07-09T00:00:00Z is after 2024-01-01T00:00:00Z";
const INVALID_SIGNATURE: &str = "x509: certificate signed by unknown authority (possibly because of \"x509: invalid signature: parent certificate cannot sign this kind of certificate\" while trying to verify candidate authority certificate \"Root\")";

fn row(id: i64, errors: &[&str]) -> String {
    let stores: Vec<serde_json::Value> = errors
        .iter()
        .enumerate()
        .map(|(i, e)| serde_json::json!([format!("store{}", i), {"root_store_error": e}]))
        .collect();
    serde_json::json!({
        "id": id,
        "root_stores": stores,
        "leaf_cert_index": 0,
        "all_valid_leaves_index": [],
    })
    .to_string()
}

fn dataset(rows: &[String]) -> Vec<ValidationResult> {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    load_results(file.path()).unwrap()
}

#[test]
fn test_dataset_rows_classify() {
    let results = dataset(&[
        row(1, &[]),
        row(2, &["", ""]),
        row(3, &["", EXPIRED, ""]),
        row(4, &[INVALID_SIGNATURE]),
        row(5, &[UNKNOWN_AUTHORITY, EXPIRED]),
    ]);

    let categories: Vec<_> = results
        .iter()
        .map(|r| r.error_category().unwrap())
        .collect();

    assert_eq!(
        categories,
        vec![
            ErrorCategory::NoValidLeaf,
            ErrorCategory::ValidChain,
            ErrorCategory::ExpiredOrNotYetValid,
            ErrorCategory::InvalidSignature,
            ErrorCategory::SignedByUnknownAuthority,
        ]
    );
}

#[test]
fn test_null_root_stores_is_no_valid_leaf() {
    let results = dataset(&[r#"{"id":9,"root_stores":null}"#.to_string()]);
    assert_eq!(
        results[0].error_category().unwrap(),
        ErrorCategory::NoValidLeaf
    );
}

#[test]
fn test_store_order_is_preserved() {
    let results = dataset(&[row(1, &[EXPIRED, UNKNOWN_AUTHORITY]), row(2, &[UNKNOWN_AUTHORITY, EXPIRED])]);
    assert_eq!(
        results[0].error_category().unwrap(),
        ErrorCategory::ExpiredOrNotYetValid
    );
    assert_eq!(
        results[1].error_category().unwrap(),
        ErrorCategory::SignedByUnknownAuthority
    );
}

#[test]
fn test_valid_chain_iff_all_stores_accepted() {
    let results = dataset(&[
        row(1, &[]),
        row(2, &[""]),
        row(3, &["", "", ""]),
        row(4, &["", UNKNOWN_AUTHORITY]),
    ]);

    for result in &results {
        let category = result.error_category().unwrap();
        assert_eq!(category.is_valid(), result.all_stores_accepted(), "id {}", result.id);
    }
}

#[test]
fn test_unknown_format_fails_loudly() {
    let err = classify_errors(["", "x509: certificate is valid for a.example, not b.example"])
        .unwrap_err();
    assert!(matches!(err, CertstatError::UnmappedError(_)));
    assert!(err.to_string().contains("not b.example"));
}
