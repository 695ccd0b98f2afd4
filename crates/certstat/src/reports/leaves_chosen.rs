//! Which chain position each validator version picked as the leaf

use crate::output::Printer;
use anyhow::{Context, Result};
use certstat_common::{load_results, CountTable, ValidationResult};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LeavesChosenReport {
    pub old: CountTable<i32>,
    pub new: CountTable<i32>,
}

/// `leaf_cert_index` counts, most frequent first
pub fn leaf_index_counts(results: &[ValidationResult]) -> CountTable<i32> {
    CountTable::from_keys(results.iter().map(|r| r.leaf_cert_index)).sorted_by_count_desc()
}

impl LeavesChosenReport {
    pub fn analyze(old: &[ValidationResult], new: &[ValidationResult]) -> Self {
        Self {
            old: leaf_index_counts(old),
            new: leaf_index_counts(new),
        }
    }

    pub fn print<W: Write>(&self, out: &mut Printer<W>) -> std::io::Result<()> {
        out.section("old method to assign leaf certificate index")?;
        out.table(&self.old, "leaf_cert_index")?;
        out.section("new method to assign leaf certificate index")?;
        out.table(&self.new, "leaf_cert_index")
    }
}

pub fn run<W: Write>(
    old_path: &Path,
    new_path: &Path,
    out: &mut Printer<W>,
) -> Result<LeavesChosenReport> {
    let old = load_results(old_path)
        .with_context(|| format!("Failed to load results from {}", old_path.display()))?;
    let new = load_results(new_path)
        .with_context(|| format!("Failed to load results from {}", new_path.display()))?;

    let report = LeavesChosenReport::analyze(&old, &new);
    report.print(out)?;
    Ok(report)
}
