//! Persistent weight-entry log.
//!
//! Entries live in a JSON array on disk, one entry per calendar date;
//! logging a date twice replaces the earlier measurement. CSV import
//! skips rows it cannot use and reports counts instead of aborting,
//! matching the analyzer's drop-don't-fail treatment of bad entries.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Writer};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::WeightEntry;
use crate::rounding::round_to_tenth;
use crate::trend::{parse_entry_date, MAX_VALID_WEIGHT_KG, MIN_VALID_WEIGHT_KG};

/// Weight log bound to its file location.
#[derive(Debug, Clone)]
pub struct WeightStore {
    path: PathBuf,
    entries: Vec<WeightEntry>,
}

/// Counts reported by a CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: usize,
    pub replaced: usize,
    pub skipped: usize,
}

impl WeightStore {
    /// Opens the store at `path`; a missing file is an empty log.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|err| StoreError::Parse {
                    path: path.clone(),
                    reason: err.to_string(),
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(entries = entries.len(), path = %path.display(), "Loaded weight store");
        Ok(WeightStore { path, entries })
    }

    /// Writes the log back to its file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| crate::error::KcalError::Internal(err.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a measurement, replacing any entry already on that date.
    ///
    /// The weight is checked against the plausible range and rounded to
    /// one decimal before storage, so the log only ever contains values
    /// the analyzer will accept. Returns the stored entry.
    pub fn add_entry(&mut self, date: NaiveDate, weight: f64) -> Result<WeightEntry> {
        let stored = WeightEntry::new(
            date.format("%Y-%m-%d").to_string(),
            validated_weight(weight)?,
        );
        self.upsert(stored.clone());
        Ok(stored)
    }

    /// Imports `date,weight` rows from a headered CSV file.
    ///
    /// Unusable rows are skipped with a warning rather than failing the
    /// whole import.
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportOutcome> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())
            .map_err(StoreError::Csv)?;

        let mut outcome = ImportOutcome::default();
        for (index, result) in reader.records().enumerate() {
            let line = index + 2; // header occupies line 1
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!(line, error = %err, "Skipping unreadable CSV row");
                    outcome.skipped += 1;
                    continue;
                }
            };

            let entry = match entry_from_row(&record) {
                Ok(entry) => entry,
                Err(reason) => {
                    warn!(line, reason, "Skipping invalid CSV row");
                    outcome.skipped += 1;
                    continue;
                }
            };

            if self.upsert(entry) {
                outcome.replaced += 1;
            } else {
                outcome.added += 1;
            }
        }

        info!(
            added = outcome.added,
            replaced = outcome.replaced,
            skipped = outcome.skipped,
            "CSV import finished"
        );
        Ok(outcome)
    }

    /// Exports the log as a headered `date,weight` CSV file. Returns the
    /// number of rows written.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let mut writer = Writer::from_path(path.as_ref()).map_err(StoreError::Csv)?;
        writer
            .write_record(["date", "weight"])
            .map_err(StoreError::Csv)?;
        for entry in &self.entries {
            writer
                .write_record([entry.date.as_str(), &format!("{:.1}", entry.weight)])
                .map_err(StoreError::Csv)?;
        }
        writer.flush()?;
        Ok(self.entries.len())
    }

    /// Inserts or replaces by date; true when an entry was replaced.
    fn upsert(&mut self, entry: WeightEntry) -> bool {
        let replaced = match self.entries.iter_mut().find(|existing| existing.date == entry.date) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        };
        self.entries.sort_by(|a, b| a.date.cmp(&b.date));
        replaced
    }
}

fn validated_weight(weight: f64) -> Result<f64> {
    if !weight.is_finite() || weight < MIN_VALID_WEIGHT_KG || weight > MAX_VALID_WEIGHT_KG {
        return Err(StoreError::InvalidEntry {
            reason: format!(
                "weight {} outside {}..{} kg",
                weight, MIN_VALID_WEIGHT_KG, MAX_VALID_WEIGHT_KG
            ),
        }
        .into());
    }
    Ok(round_to_tenth(weight))
}

fn entry_from_row(record: &csv::StringRecord) -> std::result::Result<WeightEntry, String> {
    let date = record
        .get(0)
        .map(str::trim)
        .filter(|date| parse_entry_date(date).is_some())
        .ok_or_else(|| "bad date".to_string())?;
    let weight: f64 = record
        .get(1)
        .map(str::trim)
        .and_then(|weight| weight.parse().ok())
        .ok_or_else(|| "bad weight".to_string())?;
    if !weight.is_finite() || weight < MIN_VALID_WEIGHT_KG || weight > MAX_VALID_WEIGHT_KG {
        return Err(format!("weight {} out of range", weight));
    }
    Ok(WeightEntry::new(date, round_to_tenth(weight)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = WeightStore::load(dir.path().join("weights.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.json");

        let mut store = WeightStore::load(&path).unwrap();
        store.add_entry(date("2024-03-01"), 82.44).unwrap();
        store.add_entry(date("2024-02-28"), 82.9).unwrap();
        store.save().unwrap();

        let reloaded = WeightStore::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        // Sorted by date, weights rounded to one decimal
        assert_eq!(reloaded.entries()[0].date, "2024-02-28");
        assert_eq!(reloaded.entries()[1].weight, 82.4);
    }

    #[test]
    fn test_duplicate_date_replaces() {
        let dir = tempdir().unwrap();
        let mut store = WeightStore::load(dir.path().join("weights.json")).unwrap();
        store.add_entry(date("2024-03-01"), 82.0).unwrap();
        store.add_entry(date("2024-03-01"), 81.6).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].weight, 81.6);
    }

    #[test]
    fn test_add_rejects_out_of_range_weight() {
        let dir = tempdir().unwrap();
        let mut store = WeightStore::load(dir.path().join("weights.json")).unwrap();
        assert!(store.add_entry(date("2024-03-01"), 500.0).is_err());
        assert!(store.add_entry(date("2024-03-01"), f64::NAN).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_store_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.json");
        fs::write(&path, "{not json").unwrap();
        let err = WeightStore::load(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::KcalError::Store(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("export.csv");

        let mut store = WeightStore::load(dir.path().join("weights.json")).unwrap();
        store.add_entry(date("2024-03-01"), 82.0).unwrap();
        store.add_entry(date("2024-03-02"), 81.7).unwrap();
        assert_eq!(store.export_csv(&csv_path).unwrap(), 2);

        let mut imported = WeightStore::load(dir.path().join("other.json")).unwrap();
        let outcome = imported.import_csv(&csv_path).unwrap();
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(imported.entries(), store.entries());
    }

    #[test]
    fn test_import_skips_bad_rows_and_replaces_duplicates() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("import.csv");
        fs::write(
            &csv_path,
            "date,weight\n2024-03-01,82.0\nnot-a-date,81.0\n2024-03-02,9999\n2024-03-01,81.5\n",
        )
        .unwrap();

        let mut store = WeightStore::load(dir.path().join("weights.json")).unwrap();
        let outcome = store.import_csv(&csv_path).unwrap();

        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.replaced, 1);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].weight, 81.5);
    }
}
