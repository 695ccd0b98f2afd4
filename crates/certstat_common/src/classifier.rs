//! Error classifier
//!
//! Collapses a chain's per-root-store error strings into one ErrorCategory.
//!
//! Root stores are not evaluated in a stable priority order, so the first
//! non-empty error in list order is reported. That error is cut down to its
//! first three `:` separated segments and looked up in PREFIX_RULES; on a miss
//! the lookup is retried with two segments. A miss on both is an error: the
//! validator produced a message format the table does not know about.

use crate::categories::ErrorCategory;
use crate::error::{CertstatError, Result};
use crate::records::{RootStoreResult, ValidationResult};
use tracing::debug;

/// Normalized error prefix -> category, exact case-sensitive match
pub const PREFIX_RULES: &[(&str, ErrorCategory)] = &[
    (
        "x509: certificate signed by unknown authority",
        ErrorCategory::SignedByUnknownAuthority,
    ),
    (
        "x509: certificate signed by unknown authority - With possible explanation",
        ErrorCategory::SignedByUnknownAuthority,
    ),
    (
        "x509: certificate has expired or is not yet valid",
        ErrorCategory::ExpiredOrNotYetValid,
    ),
    (
        "x509: certificate is not authorized to sign other certificates",
        ErrorCategory::NotAuthorizedToSign,
    ),
    (
        "x509: too many intermediates for path length constraint",
        ErrorCategory::TooManyIntermediates,
    ),
    (
        "x509: unhandled critical extension",
        ErrorCategory::UnhandledCriticalExtension,
    ),
    (
        "x509: certificate signed by unknown authority (possibly because of \"x509: invalid signature",
        ErrorCategory::InvalidSignature,
    ),
    (
        "x509: certificate signed by unknown authority (possibly because of \"x509",
        ErrorCategory::SignedByUnknownAuthority,
    ),
    ("", ErrorCategory::ValidChain),
];

/// Segment depths tried in order
const LOOKUP_DEPTHS: [usize; 2] = [3, 2];

/// Classify a chain from its (root store, result) pairs
pub fn classify(root_stores: &[(String, RootStoreResult)]) -> Result<ErrorCategory> {
    classify_errors(
        root_stores
            .iter()
            .map(|(_, result)| result.root_store_error.as_str()),
    )
}

/// Classify a chain from its root store error strings, in validator order
pub fn classify_errors<'a, I>(errors: I) -> Result<ErrorCategory>
where
    I: IntoIterator<Item = &'a str>,
{
    let errors: Vec<&str> = errors.into_iter().collect();

    if errors.is_empty() {
        return Ok(ErrorCategory::NoValidLeaf);
    }

    let Some(first_error) = errors.iter().copied().find(|e| !e.is_empty()) else {
        return Ok(ErrorCategory::ValidChain);
    };

    for depth in LOOKUP_DEPTHS {
        let prefix = normalize(first_error, depth);
        if let Some(category) = lookup(&prefix) {
            debug!(depth, prefix = %prefix, category = %category, "Classified error");
            return Ok(category);
        }
    }

    Err(CertstatError::UnmappedError(first_error.to_string()))
}

/// First `depth` colon-separated segments of `error`, rejoined with `:`
pub fn normalize(error: &str, depth: usize) -> String {
    error.split(':').take(depth).collect::<Vec<_>>().join(":")
}

fn lookup(prefix: &str) -> Option<ErrorCategory> {
    PREFIX_RULES
        .iter()
        .find(|(rule, _)| *rule == prefix)
        .map(|(_, category)| *category)
}

impl ValidationResult {
    pub fn error_category(&self) -> Result<ErrorCategory> {
        classify(&self.root_stores)
    }
}
