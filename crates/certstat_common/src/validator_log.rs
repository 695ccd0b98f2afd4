//! Intermediate certificate ids from the validator's JSON debug log
//!
//! While building the intermediate pool, the validator logs one debug record
//! per intermediate certificate without the CA flag:
//!
//! ```text
//! {"level":"debug","chainId":17,"index":2,"isCA":false,"subject.CN":"...","message":"Intermediate certificate did not set the flag"}
//! ```
//!
//! Extracting `chainId,index` from those records produces the intermediate
//! index file used by the leaves-in-chains report.

use crate::error::Result;
use serde::Deserialize;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Message marker for intermediate certificate records
pub const INTERMEDIATE_MARKER: &str = "Intermediate";

#[derive(Debug, Deserialize)]
struct LogRecord {
    #[serde(default)]
    message: String,
    #[serde(rename = "chainId")]
    chain_id: Option<i64>,
    index: Option<usize>,
}

/// One intermediate certificate flagged by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntermediateEntry {
    pub chain_id: i64,
    pub index: usize,
}

/// Collect intermediate entries from a JSON Lines log, in log order.
/// Lines that are not JSON objects are skipped.
pub fn extract_intermediates<R: BufRead>(reader: R) -> Result<Vec<IntermediateEntry>> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: LogRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                debug!(line = idx + 1, error = %e, "Skipping non-JSON log line");
                skipped += 1;
                continue;
            }
        };

        if !record.message.contains(INTERMEDIATE_MARKER) {
            continue;
        }

        match (record.chain_id, record.index) {
            (Some(chain_id), Some(index)) => entries.push(IntermediateEntry { chain_id, index }),
            _ => {
                warn!(line = idx + 1, "Intermediate record without chainId/index");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "Some log lines were skipped");
    }
    Ok(entries)
}

/// Write entries as `id,index` CSV with a header row
pub fn write_index_csv<W: Write>(entries: &[IntermediateEntry], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["id", "index"])?;
    for entry in entries {
        writer.write_record([entry.chain_id.to_string(), entry.index.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = r#"{"level":"info","message":"Inputs"}
{"level":"debug","chainId":17,"index":2,"isCA":false,"subject.CN":"Example Intermediate","message":"Intermediate certificate did not set the flag"}
not json at all
{"level":"debug","chainId":18,"message":"Intermediate certificate did not set the flag"}

{"level":"debug","chainId":20,"index":1,"isCA":false,"message":"Intermediate certificate did not set the flag"}
{"level":"debug","id":21,"message":"Invalid certificate chain"}
"#;

    #[test]
    fn test_extract_intermediates() {
        let entries = extract_intermediates(LOG.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                IntermediateEntry { chain_id: 17, index: 2 },
                IntermediateEntry { chain_id: 20, index: 1 },
            ]
        );
    }

    #[test]
    fn test_write_index_csv() {
        let entries = vec![
            IntermediateEntry { chain_id: 17, index: 2 },
            IntermediateEntry { chain_id: 20, index: 1 },
        ];
        let mut out = Vec::new();
        write_index_csv(&entries, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,index\n17,2\n20,1\n");
    }
}
