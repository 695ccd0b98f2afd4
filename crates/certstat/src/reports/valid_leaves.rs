//! Valid leaves vs valid chains
//!
//! Three independently derived counts of valid chains must agree:
//! chains classified "Valid chain", chains with no root store error, and
//! chains reporting at least one valid leaf index. The first pair disagreeing
//! aborts the report; the third is reported with the offending rows in both
//! directions.

use crate::output::Printer;
use anyhow::{Context, Result};
use certstat_common::{
    load_results, CertstatError, CountTable, ErrorCategory, IdFilter, ValidationResult,
};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Chain whose category and valid leaf indices disagree: "Valid chain"
/// without a valid leaf, or valid leaves under an error category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRow {
    pub id: i64,
    pub leaf_cert_index: i32,
    pub nr_valid_leaves: usize,
    pub category: ErrorCategory,
}

#[derive(Debug, Clone)]
pub struct ValidLeavesReport {
    pub rows: usize,
    /// Chains per number of valid leaves, most frequent first
    pub leaves: CountTable<usize>,
    pub valid_chains: u64,
    pub accepted: u64,
    pub valid_by_nr_leaves: u64,
    /// Sorted by id
    pub mismatches: Vec<MismatchRow>,
}

impl ValidLeavesReport {
    pub fn analyze(results: &[ValidationResult], filter: &IdFilter) -> Result<Self, CertstatError> {
        let selected = filter.select(results);

        let leaves = CountTable::from_keys(selected.iter().map(|r| r.nr_valid_leaves()))
            .sorted_by_count_desc();
        let valid_by_nr_leaves = leaves.count_where(|nr| *nr != 0);

        let categories = selected
            .iter()
            .map(|result| result.error_category())
            .collect::<Result<Vec<_>, _>>()?;
        let valid_chains = categories.iter().filter(|c| c.is_valid()).count() as u64;
        let accepted = selected.iter().filter(|r| r.all_stores_accepted()).count() as u64;

        if valid_chains != accepted {
            return Err(CertstatError::ConsistencyViolation {
                valid_chains,
                accepted,
            });
        }

        let mut mismatches: Vec<MismatchRow> = selected
            .iter()
            .zip(&categories)
            .filter(|(result, category)| (result.nr_valid_leaves() == 0) == category.is_valid())
            .map(|(result, category)| MismatchRow {
                id: result.id,
                leaf_cert_index: result.leaf_cert_index,
                nr_valid_leaves: result.nr_valid_leaves(),
                category: *category,
            })
            .collect();
        mismatches.sort_by_key(|row| row.id);

        Ok(Self {
            rows: selected.len(),
            leaves,
            valid_chains,
            accepted,
            valid_by_nr_leaves,
            mismatches,
        })
    }

    pub fn is_consistent(&self) -> bool {
        self.valid_chains == self.valid_by_nr_leaves
    }

    pub fn print<W: Write>(&self, out: &mut Printer<W>) -> std::io::Result<()> {
        out.section("new method all leaves that are valid")?;
        out.table(&self.leaves, "nr_valid_leaves")?;

        if self.is_consistent() {
            return out.line(format!(
                "valid_chains={} == valid_by_nr_leaves={}",
                self.valid_chains, self.valid_by_nr_leaves
            ));
        }

        out.warning(format!(
            "valid_chains={} != valid_by_nr_leaves={}",
            self.valid_chains, self.valid_by_nr_leaves
        ))?;
        out.line(format!(
            "{:>10}  {:>15}  {:>15}  {}",
            "id", "leaf_cert_index", "nr_valid_leaves", "error"
        ))?;
        for row in &self.mismatches {
            out.line(format!(
                "{:>10}  {:>15}  {:>15}  {}",
                row.id, row.leaf_cert_index, row.nr_valid_leaves, row.category
            ))?;
        }
        Ok(())
    }
}

pub fn run<W: Write>(ids_path: &Path, new_path: &Path, out: &mut Printer<W>) -> Result<ValidLeavesReport> {
    let filter = IdFilter::load(ids_path)
        .with_context(|| format!("Failed to load id filter {}", ids_path.display()))?;
    if filter.is_empty() {
        warn!(path = %ids_path.display(), "No chain ids listed; every count will be zero");
    }
    let results = load_results(new_path)
        .with_context(|| format!("Failed to load results from {}", new_path.display()))?;

    let report = ValidLeavesReport::analyze(&results, &filter)?;
    if report.is_consistent() {
        info!(valid_chains = report.valid_chains, "Valid chain counts agree");
    } else {
        warn!(
            valid_chains = report.valid_chains,
            valid_by_nr_leaves = report.valid_by_nr_leaves,
            mismatches = report.mismatches.len(),
            "Valid chain counts disagree"
        );
    }
    report.print(out)?;
    Ok(report)
}
