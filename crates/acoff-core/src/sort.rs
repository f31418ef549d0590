//! Ordering rows by a date column.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use acoff_model::RawValue;

use crate::datetime::unix_timestamp;

/// Row-like values that expose string cells by column name.
pub trait FieldLookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl FieldLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: std::hash::BuildHasher> FieldLookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl FieldLookup for BTreeMap<String, RawValue> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RawValue::as_text)
    }
}

/// Keyed rows sort by their value; the key travels along.
impl<K, T: FieldLookup> FieldLookup for (K, T) {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.1.lookup(key)
    }
}

/// Stable sort by the date in `date_key`, oldest first.
///
/// Missing or unrecognized dates sort before every real date. Rows with
/// the same date are ordered by `fallback_key` when both rows carry it and
/// otherwise keep their input order. `descending` reverses the comparison.
pub fn sort_by_date_field<T: FieldLookup>(
    items: &mut [T],
    date_key: &str,
    fallback_key: &str,
    descending: bool,
) {
    items.sort_by(|a, b| {
        let ordering = compare_rows(a, b, date_key, fallback_key);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare_rows<T: FieldLookup>(a: &T, b: &T, date_key: &str, fallback_key: &str) -> Ordering {
    let date_a = a.lookup(date_key).and_then(|value| unix_timestamp(value).ok());
    let date_b = b.lookup(date_key).and_then(|value| unix_timestamp(value).ok());
    match date_a.cmp(&date_b) {
        Ordering::Equal => match (a.lookup(fallback_key), b.lookup(fallback_key)) {
            (Some(left), Some(right)) => left.cmp(right),
            _ => Ordering::Equal,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, seq: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("date".to_string(), date.to_string()),
            ("seq".to_string(), seq.to_string()),
        ])
    }

    fn seqs(rows: &[BTreeMap<String, String>]) -> Vec<&str> {
        rows.iter().map(|row| row["seq"].as_str()).collect()
    }

    #[test]
    fn sorts_ascending_with_fallback() {
        let mut rows = vec![
            row("2024-03-05", "b"),
            row("2023-12-31", "z"),
            row("2024-03-05", "a"),
        ];
        sort_by_date_field(&mut rows, "date", "seq", false);
        assert_eq!(seqs(&rows), vec!["z", "a", "b"]);
    }

    #[test]
    fn descending_reverses() {
        let mut rows = vec![row("2023-01-01", "1"), row("2024-01-01", "2")];
        sort_by_date_field(&mut rows, "date", "seq", true);
        assert_eq!(seqs(&rows), vec!["2", "1"]);
    }

    #[test]
    fn unparseable_dates_sort_first() {
        let mut rows = vec![row("2024-01-01", "dated"), row("someday", "undated")];
        sort_by_date_field(&mut rows, "date", "missing", false);
        assert_eq!(seqs(&rows), vec!["undated", "dated"]);
    }

    #[test]
    fn keyed_rows_keep_their_keys() {
        let mut rows = vec![
            ("late", row("2024-06-01", "1")),
            ("early", row("2024-01-01", "2")),
        ];
        sort_by_date_field(&mut rows, "date", "seq", false);
        let keys: Vec<_> = rows.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec!["early", "late"]);
    }
}
