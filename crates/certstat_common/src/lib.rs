//! certstat common - data model and analysis primitives
//!
//! Classifies certificate-chain validator results into short error
//! categories and provides the loaders and count tables the reports share.

pub mod ca_flag;
pub mod categories;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod records;
pub mod table;
pub mod validator_log;

pub use ca_flag::{has_isca_flag, inspect_basic_constraints, CaFlag};
pub use categories::ErrorCategory;
pub use classifier::{classify, classify_errors};
pub use config::{CertstatConfig, ColorMode, DatasetConfig};
pub use dataset::{load_chains, load_results, IdFilter, IntermediateIndex};
pub use error::{CertstatError, Result};
pub use records::{ChainRecord, RootStoreResult, ValidationResult};
pub use table::{percentage, CountTable};
