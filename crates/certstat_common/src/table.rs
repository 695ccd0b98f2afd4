//! Grouped count tables
//!
//! The group-by-and-count step every report shares, plus fixed-width
//! rendering for the terminal.

use std::collections::BTreeMap;
use std::fmt::{Display, Write};

#[derive(Debug, Clone, PartialEq)]
pub struct CountRow<K> {
    pub key: K,
    pub count: u64,
    /// Share of the table's denominator, if one was attached
    pub percentage: Option<f64>,
}

/// Row counts per distinct key
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable<K> {
    rows: Vec<CountRow<K>>,
    decimals: usize,
}

impl<K: Ord + Clone> CountTable<K> {
    /// Group keys and count them; rows come out sorted by key
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut counts: BTreeMap<K, u64> = BTreeMap::new();
        for key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }

        Self {
            rows: counts
                .into_iter()
                .map(|(key, count)| CountRow {
                    key,
                    count,
                    percentage: None,
                })
                .collect(),
            decimals: 0,
        }
    }

    /// Order rows by count, largest first; equal counts keep key order
    pub fn sorted_by_count_desc(mut self) -> Self {
        self.rows.sort_by(|a, b| b.count.cmp(&a.count));
        self
    }

    /// Attach a percentage column relative to `denominator`
    pub fn with_percentages(mut self, denominator: usize, decimals: u32) -> Self {
        for row in &mut self.rows {
            row.percentage = Some(percentage(row.count, denominator, decimals));
        }
        self.decimals = decimals as usize;
        self
    }

    pub fn rows(&self) -> &[CountRow<K>] {
        &self.rows
    }

    /// Count for `key`, zero when the group is absent
    pub fn count(&self, key: &K) -> u64 {
        self.rows
            .iter()
            .find(|row| &row.key == key)
            .map_or(0, |row| row.count)
    }

    pub fn count_where<F: Fn(&K) -> bool>(&self, predicate: F) -> u64 {
        self.rows
            .iter()
            .filter(|row| predicate(&row.key))
            .map(|row| row.count)
            .sum()
    }

}

impl<K: Display> CountTable<K> {
    /// Render as an aligned text table with a header row
    pub fn render(&self, key_header: &str) -> String {
        let keys: Vec<String> = self.rows.iter().map(|row| row.key.to_string()).collect();
        let key_width = keys
            .iter()
            .map(String::len)
            .chain(std::iter::once(key_header.len()))
            .max()
            .unwrap_or(0);
        let show_pct = self.rows.iter().any(|row| row.percentage.is_some());
        let decimals = self.decimals;

        let mut out = String::new();
        let _ = write!(out, "{:<key_width$}  {:>8}", key_header, "count");
        if show_pct {
            let _ = write!(out, "  {:>10}", "percentage");
        }
        out.push('\n');

        for (row, key) in self.rows.iter().zip(&keys) {
            let _ = write!(out, "{:<key_width$}  {:>8}", key, row.count);
            if let Some(pct) = row.percentage {
                let _ = write!(out, "  {:>10.decimals$}", pct);
            }
            out.push('\n');
        }
        out
    }
}

/// `part / whole * 100` rounded half-to-even to `decimals` places; zero for an empty whole
pub fn percentage(part: u64, whole: usize, decimals: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, decimals)
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys_groups_and_sorts_by_key() {
        let table = CountTable::from_keys(["b", "a", "b", "c", "b", "a"]);
        let keys: Vec<_> = table.rows().iter().map(|r| (r.key, r.count)).collect();
        assert_eq!(keys, vec![("a", 2), ("b", 3), ("c", 1)]);
    }

    #[test]
    fn test_sorted_by_count_desc_is_stable() {
        let table = CountTable::from_keys([3, 1, 2, 2, 1, 4]).sorted_by_count_desc();
        let keys: Vec<_> = table.rows().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_count_and_count_where() {
        let table = CountTable::from_keys([0usize, 0, 1, 2, 2, 2]);
        assert_eq!(table.count(&2), 3);
        assert_eq!(table.count(&7), 0);
        assert_eq!(table.count_where(|k| *k != 0), 4);
    }

    #[test]
    fn test_percentages() {
        let table = CountTable::from_keys([true, true, false]).with_percentages(3, 2);
        let pcts: Vec<_> = table.rows().iter().map(|r| r.percentage.unwrap()).collect();
        assert_eq!(pcts, vec![33.33, 66.67]);
    }

    #[test]
    fn test_percentage_rounding_and_empty_whole() {
        assert_eq!(percentage(1, 3, 1), 33.3);
        assert_eq!(percentage(2, 3, 1), 66.7);
        assert_eq!(percentage(5, 0, 1), 0.0);
        assert_eq!(round_to(12.345, 0), 12.0);
    }

    #[test]
    fn test_percentage_rounds_half_to_even() {
        assert_eq!(percentage(1, 16, 1), 6.2);
        assert_eq!(percentage(3, 16, 1), 18.8);
        assert_eq!(percentage(1, 32, 2), 3.12);
        assert_eq!(percentage(1, 8, 0), 12.0);
        assert_eq!(percentage(3, 8, 0), 38.0);
    }

    #[test]
    fn test_render_aligns_columns() {
        let table = CountTable::from_keys(["Valid chain", "Valid chain", "Self-signed"]);
        let rendered = table.render("error");
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("error"));
        assert!(lines[1].starts_with("Self-signed"));
        assert!(lines[2].ends_with(" 2"));
        assert_eq!(lines[1].len(), lines[2].len());
    }
}
