//! Classify error strings given on the command line

use crate::output::Printer;
use anyhow::Result;
use certstat_common::{classify_errors, ErrorCategory};
use std::io::Write;

/// Errors are taken in root store order; empty strings mean "accepted"
pub fn run<W: Write>(errors: &[String], out: &mut Printer<W>) -> Result<ErrorCategory> {
    let category = classify_errors(errors.iter().map(String::as_str))?;
    out.line(category)?;
    Ok(category)
}
