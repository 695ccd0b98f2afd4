//! BasicConstraints inspection for a single certificate in a chain
//!
//! Reports whether the certificate carries a BasicConstraints extension at
//! all. Unparseable certificates and missing or malformed extensions count
//! as "no flag". `CaFlag` keeps the distinction for callers that need it.

use crate::error::{CertstatError, Result};
use crate::records::ChainRecord;
use tracing::debug;
use x509_parser::parse_x509_certificate;

/// What was found when looking for BasicConstraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaFlag {
    /// Extension present, with its cA value
    Present { ca: bool },
    /// Certificate parsed but has no (usable) BasicConstraints extension
    Absent,
    /// PEM or DER decoding failed
    Unparseable,
}

impl CaFlag {
    pub fn is_set(&self) -> bool {
        matches!(self, CaFlag::Present { .. })
    }
}

/// Inspect one PEM-encoded certificate
pub fn inspect_basic_constraints(pem: &str) -> CaFlag {
    let der = match rustls_pemfile::certs(&mut pem.as_bytes()).next() {
        Some(Ok(der)) => der,
        Some(Err(e)) => {
            debug!(error = %e, "PEM decoding failed");
            return CaFlag::Unparseable;
        }
        None => return CaFlag::Unparseable,
    };

    let cert = match parse_x509_certificate(der.as_ref()) {
        Ok((_, cert)) => cert,
        Err(e) => {
            debug!(error = %e, "X.509 parsing failed");
            return CaFlag::Unparseable;
        }
    };

    match cert.basic_constraints() {
        Ok(Some(ext)) => CaFlag::Present { ca: ext.value.ca },
        Ok(None) => CaFlag::Absent,
        // duplicate or malformed extension
        Err(e) => {
            debug!(error = %e, "BasicConstraints unreadable");
            CaFlag::Absent
        }
    }
}

/// Whether the certificate at `index` of the chain exposes BasicConstraints
pub fn has_isca_flag(record: &ChainRecord, index: usize) -> Result<bool> {
    let pem = record
        .chain
        .get(index)
        .ok_or(CertstatError::ChainIndexOutOfRange {
            id: record.id,
            index,
            len: record.chain.len(),
        })?;

    Ok(inspect_basic_constraints(pem).is_set())
}
