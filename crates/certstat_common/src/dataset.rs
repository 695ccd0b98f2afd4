//! Dataset loading
//!
//! Chain and result datasets are JSON Lines files, one row per line.
//! Identifier lists are CSV files read with the `csv` crate.

use crate::error::{CertstatError, Result};
use crate::records::{ChainRecord, ValidationResult};
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Rows keyed by chain identifier
pub trait ChainId {
    fn chain_id(&self) -> i64;
}

impl ChainId for ChainRecord {
    fn chain_id(&self) -> i64 {
        self.id
    }
}

impl ChainId for ValidationResult {
    fn chain_id(&self) -> i64 {
        self.id
    }
}

/// Read every non-blank line of a JSON Lines file
pub fn load_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .map_err(|e| CertstatError::parse(path, idx + 1, e.to_string()))?;
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Loaded JSON Lines file");
    Ok(rows)
}

pub fn load_chains(path: &Path) -> Result<Vec<ChainRecord>> {
    let chains = load_jsonl(path)?;
    info!(path = %path.display(), chains = chains.len(), "Loaded chain dataset");
    Ok(chains)
}

pub fn load_results(path: &Path) -> Result<Vec<ValidationResult>> {
    let results = load_jsonl(path)?;
    info!(path = %path.display(), results = results.len(), "Loaded result dataset");
    Ok(results)
}

/// Set of chain identifiers restricting a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdFilter {
    ids: BTreeSet<i64>,
}

impl IdFilter {
    /// Load the `id` column of a CSV file with a header row
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv_reader(path, true)?;

        let column = reader
            .headers()?
            .iter()
            .position(|name| name.trim_start_matches('\u{feff}') == "id")
            .ok_or_else(|| CertstatError::parse(path, 1, "no 'id' column in header"))?;

        let mut ids = BTreeSet::new();
        for record in reader.records() {
            let record = record?;
            let line = record_line(&record);
            let field = record.get(column).ok_or_else(|| {
                CertstatError::parse(path, line, format!("missing column {}", column + 1))
            })?;
            ids.insert(parse_id(path, line, field)?);
        }

        info!(path = %path.display(), ids = ids.len(), "Loaded id filter");
        Ok(Self { ids })
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Rows whose identifier is in the set, in input order
    pub fn select<'a, T: ChainId>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.contains(row.chain_id())).collect()
    }
}

impl FromIterator<i64> for IdFilter {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Chain id -> position of an intermediate certificate missing the CA flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateIndex {
    entries: HashMap<i64, usize>,
}

impl IntermediateIndex {
    /// Load `id,index` rows; a leading header row is skipped.
    /// A chain listed more than once keeps its last index.
    pub fn load(path: &Path) -> Result<Self> {
        let mut entries = HashMap::new();

        let mut reader = csv_reader(path, false)?;

        for (pos, record) in reader.records().enumerate() {
            let record = record?;
            let line = record_line(&record);
            if pos == 0 && parse_id(path, line, record.get(0).unwrap_or_default()).is_err() {
                continue;
            }
            let (Some(id), Some(index)) = (record.get(0), record.get(1)) else {
                return Err(CertstatError::parse(path, line, "expected id,index"));
            };
            let id = parse_id(path, line, id)?;
            let index = index.parse::<usize>().map_err(|e| {
                CertstatError::parse(path, line, format!("invalid index {:?}: {}", index, e))
            })?;
            entries.insert(id, index);
        }

        info!(path = %path.display(), chains = entries.len(), "Loaded intermediate index");
        Ok(Self { entries })
    }

    pub fn index_of(&self, id: i64) -> Result<usize> {
        self.entries
            .get(&id)
            .copied()
            .ok_or(CertstatError::MissingIntermediateIndex(id))
    }

    /// Distinct chain identifiers
    pub fn ids(&self) -> IdFilter {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

impl FromIterator<(i64, usize)> for IntermediateIndex {
    fn from_iter<I: IntoIterator<Item = (i64, usize)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Trimming, flexible-width CSV reader; blank lines are skipped
fn csv_reader(path: &Path, has_headers: bool) -> Result<csv::Reader<File>> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(File::open(path)?))
}

fn record_line(record: &csv::StringRecord) -> usize {
    record.position().map_or(0, |pos| pos.line() as usize)
}

fn parse_id(path: &Path, line: usize, field: &str) -> Result<i64> {
    field
        .trim_start_matches('\u{feff}')
        .parse::<i64>()
        .map_err(|e| CertstatError::parse(path, line, format!("invalid id {:?}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_id_filter_reads_id_column() {
        let file = write_temp("name,id\nfoo,3\nbar,1\n\nbaz,3\n");
        let filter = IdFilter::load(file.path()).unwrap();

        assert_eq!(filter.len(), 2);
        assert!(filter.contains(1));
        assert!(filter.contains(3));
        assert!(!filter.contains(2));
    }

    #[test]
    fn test_id_filter_quoted_field() {
        let file = write_temp("name,id\n\"Example, Inc\",7\n\"Other\",\"8\"\n");
        let filter = IdFilter::load(file.path()).unwrap();

        assert_eq!(filter.len(), 2);
        assert!(filter.contains(7));
        assert!(filter.contains(8));
    }

    #[test]
    fn test_id_filter_byte_order_mark() {
        let file = write_temp("\u{feff}id\n7\n");
        let filter = IdFilter::load(file.path()).unwrap();
        assert!(filter.contains(7));
    }

    #[test]
    fn test_intermediate_index_byte_order_mark_header() {
        let file = write_temp("\u{feff}id,index\n10,1\n");
        let index = IntermediateIndex::load(file.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.index_of(10).unwrap(), 1);
    }

    #[test]
    fn test_header_only_files_are_empty() {
        let ids = write_temp("id\n");
        assert!(IdFilter::load(ids.path()).unwrap().is_empty());

        let index = write_temp("id,index\n");
        assert!(IntermediateIndex::load(index.path()).unwrap().is_empty());
    }

    #[test]
    fn test_id_filter_requires_id_column() {
        let file = write_temp("chain,index\n1,2\n");
        let err = IdFilter::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("no 'id' column"));
    }

    #[test]
    fn test_id_filter_rejects_bad_id() {
        let file = write_temp("id\n12\nabc\n");
        let err = IdFilter::load(file.path()).unwrap_err();
        match err {
            CertstatError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_intermediate_index_with_and_without_header() {
        let with_header = write_temp("id,index\n10,1\n11,2\n10,3\n");
        let index = IntermediateIndex::load(with_header.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.index_of(10).unwrap(), 3);
        assert_eq!(index.index_of(11).unwrap(), 2);

        let bare = write_temp("10,1\n11,2\n");
        let index = IntermediateIndex::load(bare.path()).unwrap();
        assert_eq!(index.index_of(10).unwrap(), 1);
    }

    #[test]
    fn test_intermediate_index_missing_id() {
        let index: IntermediateIndex = [(1, 1)].into_iter().collect();
        assert!(matches!(
            index.index_of(2),
            Err(CertstatError::MissingIntermediateIndex(2))
        ));
    }

    #[test]
    fn test_load_jsonl_reports_line() {
        let file = write_temp("{\"id\":1,\"chain\":[]}\n\n{\"id\":\n");
        let err = load_chains(file.path()).unwrap_err();
        match err {
            CertstatError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_select_keeps_input_order() {
        let rows: Vec<ChainRecord> = [5, 1, 9, 1]
            .into_iter()
            .map(|id| ChainRecord { id, chain: vec![] })
            .collect();
        let filter: IdFilter = [1, 9].into_iter().collect();

        let ids: Vec<i64> = filter.select(&rows).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 9, 1]);
    }
}
