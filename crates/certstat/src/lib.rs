//! certstat library - exposes report routines for integration tests

pub mod logging;
pub mod output;
pub mod reports;
