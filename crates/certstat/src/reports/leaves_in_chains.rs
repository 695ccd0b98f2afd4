//! Chains containing an intermediate without the CA flag
//!
//! Restricts both datasets to the chains listed in the intermediate index,
//! breaks their validation outcome down by error category and checks whether
//! the listed intermediate actually carries BasicConstraints. The valid and
//! invalid shares are taken over the whole result dataset, the isCA share
//! over the whole chain dataset.

use crate::output::Printer;
use anyhow::{Context, Result};
use certstat_common::{
    has_isca_flag, load_chains, load_results, percentage, CertstatError, ChainRecord,
    CountTable, ErrorCategory, IntermediateIndex, ValidationResult,
};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct LeavesInChainsReport {
    pub total_chains: usize,
    pub total_results: usize,
    /// Distinct chains in the intermediate index
    pub flagged_chains: usize,
    pub filtered_results: usize,
    pub filtered_chains: usize,
    pub errors: CountTable<ErrorCategory>,
    pub isca: CountTable<bool>,
}

impl LeavesInChainsReport {
    pub fn analyze(
        chains: &[ChainRecord],
        results: &[ValidationResult],
        index: &IntermediateIndex,
    ) -> Result<Self, CertstatError> {
        let ids = index.ids();
        let filtered_results = ids.select(results);
        let filtered_chains = ids.select(chains);

        let categories = filtered_results
            .iter()
            .map(|result| result.error_category())
            .collect::<Result<Vec<_>, _>>()?;

        let flags = filtered_chains
            .iter()
            .map(|record| has_isca_flag(record, index.index_of(record.id)?))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            total_chains: chains.len(),
            total_results: results.len(),
            flagged_chains: ids.len(),
            filtered_results: filtered_results.len(),
            filtered_chains: filtered_chains.len(),
            errors: CountTable::from_keys(categories),
            isca: CountTable::from_keys(flags),
        })
    }

    pub fn valid(&self) -> u64 {
        self.errors.count(&ErrorCategory::ValidChain)
    }

    pub fn invalid(&self) -> u64 {
        self.errors.count_where(|category| !category.is_valid())
    }

    pub fn without_isca(&self) -> u64 {
        self.isca.count(&false)
    }

    pub fn print<W: Write>(&self, out: &mut Printer<W>) -> std::io::Result<()> {
        out.section("Intermediate certificates without isCA")?;
        out.stat(
            percentage(self.flagged_chains as u64, self.total_chains, 1),
            1,
            "% of the certificates have at least one intermediate certificates without isCA",
        )?;
        out.line(format!("filtered results: {}", self.filtered_results))?;
        out.line(format!("filtered chains: {}", self.filtered_chains))?;

        out.table(&self.errors, "error")?;
        out.stat(
            percentage(self.valid(), self.total_results, 1),
            1,
            "% are valid chains that contain at least one intermediate without isCA flag or the flag is set to false",
        )?;
        out.stat(
            percentage(self.invalid(), self.total_results, 1),
            1,
            "% are invalid chains that contain at least one intermediate without isCA flag or the flag is set to false",
        )?;

        out.table(&self.isca, "has_isca")?;
        out.stat(
            percentage(self.without_isca(), self.total_chains, 1),
            1,
            "% of the chains has at least one intermediate cert without the isCA extension, and hence reported as isCa=False",
        )
    }
}

pub fn run<W: Write>(
    chains_path: &Path,
    results_path: &Path,
    index_path: &Path,
    out: &mut Printer<W>,
) -> Result<LeavesInChainsReport> {
    let chains = load_chains(chains_path)
        .with_context(|| format!("Failed to load chains from {}", chains_path.display()))?;
    let results = load_results(results_path)
        .with_context(|| format!("Failed to load results from {}", results_path.display()))?;
    let index = IntermediateIndex::load(index_path)
        .with_context(|| format!("Failed to load intermediate index {}", index_path.display()))?;
    if index.is_empty() {
        warn!(path = %index_path.display(), "No chain ids listed; every count will be zero");
    }

    let report = LeavesInChainsReport::analyze(&chains, &results, &index)?;
    info!(
        flagged = report.flagged_chains,
        valid = report.valid(),
        invalid = report.invalid(),
        "Leaves-in-chains analysis complete"
    );
    report.print(out)?;
    Ok(report)
}
