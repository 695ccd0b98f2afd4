//! Report routines
//!
//! Each report loads its own inputs, prints to a Printer and returns its
//! figures. Reports share no state.

pub mod classify;
pub mod errors;
pub mod extract_ids;
pub mod leaves_chosen;
pub mod leaves_in_chains;
pub mod valid_leaves;

use crate::output::Printer;
use anyhow::Result;
use certstat_common::DatasetConfig;
use std::io::Write;

/// Run every dataset report with the configured paths
pub fn run_all<W: Write>(datasets: &DatasetConfig, out: &mut Printer<W>) -> Result<()> {
    leaves_chosen::run(&datasets.old_output_path(), &datasets.new_output_path(), out)?;
    errors::run(
        &datasets.ldap_ids_path(),
        &datasets.old_output_path(),
        &datasets.new_output_path(),
        out,
    )?;
    valid_leaves::run(&datasets.ldap_ids_path(), &datasets.new_output_path(), out)?;
    leaves_in_chains::run(
        &datasets.input_path(),
        &datasets.output_path(),
        &datasets.intermediate_ids_path(),
        out,
    )?;
    Ok(())
}
