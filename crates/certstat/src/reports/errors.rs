//! Error category breakdown, old vs new leaf selection
//!
//! Percentages are relative to the filtered subset of each dataset.

use crate::output::Printer;
use anyhow::{Context, Result};
use certstat_common::{load_results, CertstatError, CountTable, ErrorCategory, IdFilter, ValidationResult};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Category counts for one result dataset
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    /// Rows left after filtering
    pub rows: usize,
    pub table: CountTable<ErrorCategory>,
}

impl CategoryBreakdown {
    pub fn analyze(results: &[ValidationResult], filter: &IdFilter) -> Result<Self, CertstatError> {
        let selected = filter.select(results);
        let categories = selected
            .iter()
            .map(|result| result.error_category())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows: selected.len(),
            table: CountTable::from_keys(categories)
                .sorted_by_count_desc()
                .with_percentages(selected.len(), 2),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ErrorsReport {
    pub old: CategoryBreakdown,
    pub new: CategoryBreakdown,
}

impl ErrorsReport {
    pub fn analyze(
        filter: &IdFilter,
        old: &[ValidationResult],
        new: &[ValidationResult],
    ) -> Result<Self, CertstatError> {
        Ok(Self {
            old: CategoryBreakdown::analyze(old, filter)?,
            new: CategoryBreakdown::analyze(new, filter)?,
        })
    }

    pub fn print<W: Write>(&self, out: &mut Printer<W>) -> std::io::Result<()> {
        out.section("old method to assign leaf certificate index")?;
        out.table(&self.old.table, "error")?;
        out.section("new method to assign leaf certificate index")?;
        out.table(&self.new.table, "error")
    }
}

pub fn run<W: Write>(
    ids_path: &Path,
    old_path: &Path,
    new_path: &Path,
    out: &mut Printer<W>,
) -> Result<ErrorsReport> {
    let filter = IdFilter::load(ids_path)
        .with_context(|| format!("Failed to load id filter {}", ids_path.display()))?;
    if filter.is_empty() {
        warn!(path = %ids_path.display(), "No chain ids listed; every count will be zero");
    }
    let old = load_results(old_path)
        .with_context(|| format!("Failed to load results from {}", old_path.display()))?;
    let new = load_results(new_path)
        .with_context(|| format!("Failed to load results from {}", new_path.display()))?;

    let report = ErrorsReport::analyze(&filter, &old, &new)?;
    info!(old_rows = report.old.rows, new_rows = report.new.rows, "Error breakdown complete");
    report.print(out)?;
    Ok(report)
}
