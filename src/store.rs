use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::funnel::recompute_ytd;
use crate::models::{Booking, FunnelMonth, LeadSource, ServiceType};

// ---------------------------------------------------------------------------
// JSON-file store — the persistence side of the import pipeline
// ---------------------------------------------------------------------------

/// Flat-file records in the data directory, one JSON file per collection.
/// This layer owns what the import core refuses to touch: the filesystem
/// and any state that outlives a single run.
pub struct Store {
    dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLogEntry {
    pub filename: String,
    pub checksum: String,
    pub kind: String,
    pub rows: usize,
}

impl Store {
    pub fn open(dir: &Path) -> Store {
        Store {
            dir: dir.to_path_buf(),
        }
    }

    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    // -- catalogs ----------------------------------------------------------

    pub fn load_service_types(&self) -> Vec<ServiceType> {
        self.read("service_types.json")
    }

    pub fn save_service_types(&self, items: &[ServiceType]) -> Result<()> {
        self.write("service_types.json", &items)
    }

    pub fn load_lead_sources(&self) -> Vec<LeadSource> {
        self.read("lead_sources.json")
    }

    pub fn save_lead_sources(&self, items: &[LeadSource]) -> Result<()> {
        self.write("lead_sources.json", &items)
    }

    // -- bookings ----------------------------------------------------------

    pub fn load_bookings(&self) -> Vec<Booking> {
        self.read("bookings.json")
    }

    pub fn append_bookings(&self, new: &[Booking]) -> Result<()> {
        let mut all = self.load_bookings();
        all.extend(new.iter().cloned());
        self.write("bookings.json", &all)
    }

    /// Next numeric suffix for booking ids, one past the highest stored.
    pub fn next_booking_seq(&self) -> u64 {
        self.load_bookings()
            .iter()
            .filter_map(|b| b.id.strip_prefix("bkg-").and_then(|n| n.parse::<u64>().ok()))
            .max()
            .map(|n| n + 1)
            .unwrap_or(1)
    }

    // -- funnel ------------------------------------------------------------

    pub fn load_funnel(&self) -> Vec<FunnelMonth> {
        self.read("funnel.json")
    }

    /// Fold a freshly imported series into the stored one: months present
    /// in the new series replace their stored counterparts, other months
    /// are kept, and the YTD columns are recomputed over the merged result.
    pub fn merge_funnel(&self, series: &[FunnelMonth]) -> Result<()> {
        let mut by_month: BTreeMap<(i32, u32), FunnelMonth> = self
            .load_funnel()
            .into_iter()
            .map(|m| ((m.year, m.month), m))
            .collect();
        for m in series {
            by_month.insert((m.year, m.month), m.clone());
        }
        let mut merged: Vec<FunnelMonth> = by_month.into_values().collect();
        recompute_ytd(&mut merged);
        self.write("funnel.json", &merged)
    }

    // -- alias table -------------------------------------------------------

    /// Column-alias configuration. A partial `aliases.json` in the data
    /// directory overrides individual fields; everything else keeps the
    /// built-in defaults.
    pub fn load_alias_table(&self) -> crate::columns::AliasTable {
        self.read("aliases.json")
    }

    // -- import log --------------------------------------------------------

    pub fn import_log(&self) -> Vec<ImportLogEntry> {
        self.read("imports.json")
    }

    pub fn already_imported(&self, checksum: &str) -> bool {
        self.import_log().iter().any(|e| e.checksum == checksum)
    }

    pub fn record_import(&self, entry: ImportLogEntry) -> Result<()> {
        let mut log = self.import_log();
        log.push(entry);
        self.write("imports.json", &log)
    }

    // -- plumbing ----------------------------------------------------------

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.dir.join(name);
        if !path.exists() {
            return T::default();
        }
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.dir.join(name), format!("{json}\n"))?;
        Ok(())
    }
}

pub fn file_checksum(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        store.init().unwrap();
        (dir, store)
    }

    fn month(year: i32, month_no: u32, inquiries: u32, booked_cents: i64) -> FunnelMonth {
        FunnelMonth {
            year,
            month: month_no,
            inquiries,
            closes: 0,
            booked_cents,
            inquiries_ytd: 0,
            booked_ytd_cents: 0,
        }
    }

    #[test]
    fn test_catalogs_roundtrip() {
        let (_dir, store) = test_store();
        assert!(store.load_lead_sources().is_empty());
        let sources = vec![LeadSource {
            id: "src-1".to_string(),
            name: "Instagram".to_string(),
            description: String::new(),
            is_custom: true,
        }];
        store.save_lead_sources(&sources).unwrap();
        let loaded = store.load_lead_sources();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Instagram");
    }

    #[test]
    fn test_next_booking_seq() {
        let (_dir, store) = test_store();
        assert_eq!(store.next_booking_seq(), 1);
        let bookings = vec![
            Booking {
                id: "bkg-3".to_string(),
                project_name: "A".to_string(),
                service_type_id: "svc-1".to_string(),
                lead_source_id: "src-1".to_string(),
                date_inquired: None,
                date_booked: None,
                project_date: None,
                booked_revenue_cents: 0,
                status: crate::models::BookingStatus::Inquiry,
                notes: None,
                owner: String::new(),
            },
        ];
        store.append_bookings(&bookings).unwrap();
        assert_eq!(store.next_booking_seq(), 4);
    }

    #[test]
    fn test_merge_funnel_replaces_months_and_recomputes_ytd() {
        let (_dir, store) = test_store();
        store
            .merge_funnel(&[month(2025, 1, 2, 100), month(2025, 2, 3, 200)])
            .unwrap();
        // Re-import revises January and adds March.
        store
            .merge_funnel(&[month(2025, 1, 5, 500), month(2025, 3, 1, 50)])
            .unwrap();

        let merged = store.load_funnel();
        let keys: Vec<(i32, u32)> = merged.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, vec![(2025, 1), (2025, 2), (2025, 3)]);
        assert_eq!(merged[0].inquiries, 5);
        assert_eq!(merged[1].inquiries, 3);
        assert_eq!(merged[2].inquiries_ytd, 5 + 3 + 1);
        assert_eq!(merged[2].booked_ytd_cents, 500 + 200 + 50);
    }

    #[test]
    fn test_import_log_checksum_guard() {
        let (dir, store) = test_store();
        let file = dir.path().join("report.csv");
        std::fs::write(&file, "Project Name,Lead Created Date\n").unwrap();
        let checksum = file_checksum(&file).unwrap();

        assert!(!store.already_imported(&checksum));
        store
            .record_import(ImportLogEntry {
                filename: "report.csv".to_string(),
                checksum: checksum.clone(),
                kind: "funnel".to_string(),
                rows: 0,
            })
            .unwrap();
        assert!(store.already_imported(&checksum));
    }

    #[test]
    fn test_alias_override_merges_with_defaults() {
        let (dir, store) = test_store();
        std::fs::write(
            dir.path().join("aliases.json"),
            r#"{"project_name": ["gig name"]}"#,
        )
        .unwrap();
        let table = store.load_alias_table();
        assert_eq!(table.project_name, vec!["gig name"]);
        assert!(!table.date_inquired.is_empty());
    }

    #[test]
    fn test_unreadable_collection_defaults_to_empty() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join("bookings.json"), "not json").unwrap();
        assert!(store.load_bookings().is_empty());
    }
}
