//! Error categories for chain validation outcomes
//!
//! The closed set of short labels a chain's root store results collapse into.
//! "Self-signed" and "Other errors" are kept for manual classification and are
//! never produced by the classifier.

use std::cmp::Ordering;
use std::fmt;

/// Ordered by label, so grouped tables list categories alphabetically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    SignedByUnknownAuthority,
    ExpiredOrNotYetValid,
    NotAuthorizedToSign,
    TooManyIntermediates,
    UnhandledCriticalExtension,
    OtherErrors,
    SelfSigned,
    ValidChain,
    InvalidSignature,
    NoValidLeaf,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 10] = [
        ErrorCategory::SignedByUnknownAuthority,
        ErrorCategory::ExpiredOrNotYetValid,
        ErrorCategory::NotAuthorizedToSign,
        ErrorCategory::TooManyIntermediates,
        ErrorCategory::UnhandledCriticalExtension,
        ErrorCategory::OtherErrors,
        ErrorCategory::SelfSigned,
        ErrorCategory::ValidChain,
        ErrorCategory::InvalidSignature,
        ErrorCategory::NoValidLeaf,
    ];

    /// Human-readable label used in report tables
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::SignedByUnknownAuthority => "Signed by unknown authority",
            ErrorCategory::ExpiredOrNotYetValid => "Expired/Not yet valid",
            ErrorCategory::NotAuthorizedToSign => "Not authorized to sign other certificates",
            ErrorCategory::TooManyIntermediates => "Too many intermediate certificates",
            ErrorCategory::UnhandledCriticalExtension => "Unhandled critical extension",
            ErrorCategory::OtherErrors => "Other errors",
            ErrorCategory::SelfSigned => "Self-signed",
            ErrorCategory::ValidChain => "Valid chain",
            ErrorCategory::InvalidSignature => "Invalid signature",
            ErrorCategory::NoValidLeaf => "No valid leaf certificate",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ErrorCategory::ValidChain)
    }
}

impl Ord for ErrorCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl PartialOrd for ErrorCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
