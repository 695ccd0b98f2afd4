//! Build the intermediate index file from the validator's debug log

use crate::output::Printer;
use anyhow::{Context, Result};
use certstat_common::validator_log::{extract_intermediates, write_index_csv, IntermediateEntry};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn run<W: Write>(log_path: &Path, csv_path: &Path, out: &mut Printer<W>) -> Result<Vec<IntermediateEntry>> {
    let log = File::open(log_path)
        .with_context(|| format!("Failed to open validator log {}", log_path.display()))?;
    let entries = extract_intermediates(BufReader::new(log))
        .with_context(|| format!("Failed to read validator log {}", log_path.display()))?;

    if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let csv = File::create(csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;
    write_index_csv(&entries, BufWriter::new(csv))
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    let chains = entries.iter().map(|e| e.chain_id).collect::<BTreeSet<_>>().len();
    info!(entries = entries.len(), chains, path = %csv_path.display(), "Wrote intermediate index");
    out.line(format!(
        "{} intermediate certificates in {} chains written to {}",
        entries.len(),
        chains,
        csv_path.display()
    ))?;
    Ok(entries)
}
