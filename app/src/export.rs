//! CSV and JSON export of scan results.

use std::path::Path;

use acl::PermissionEntry;
use serde_json::json;
use utils::error::{Error, Result};

/// Fixed CSV column names, written even when a scan produced no entries.
const CSV_HEADER: [&str; 6] = [
    "Path",
    "Identity",
    "Permission",
    "Access Type",
    "Inherited",
    "Scan Time",
];

/// Write entries to a CSV file with the fixed column headers.
pub fn export_csv<P: AsRef<Path>>(path: P, entries: &[PermissionEntry]) -> Result<()> {
    // Headers are written explicitly so an empty scan still produces them.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())
        .map_err(|e| Error::with_source("Failed to create CSV file", Box::new(e)))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| Error::with_source("Failed to write CSV header", Box::new(e)))?;
    for entry in entries {
        writer
            .serialize(entry.to_record())
            .map_err(|e| Error::with_source("Failed to write CSV record", Box::new(e)))?;
    }
    writer
        .flush()
        .map_err(|e| Error::with_source("Failed to flush CSV file", Box::new(e)))?;

    log::info!(
        "Exported {} entries to {}",
        entries.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Read entries back from a CSV file produced by [`export_csv`].
pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PermissionEntry>> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| Error::with_source("Failed to open CSV file", Box::new(e)))?;

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let record: acl::PermissionRecord =
            record.map_err(|e| Error::with_source("Failed to parse CSV record", Box::new(e)))?;
        entries.push(PermissionEntry::from_record(&record));
    }

    log::info!(
        "Imported {} entries from {}",
        entries.len(),
        path.as_ref().display()
    );
    Ok(entries)
}

/// Write entries to a JSON file wrapped in a scan_info envelope.
pub fn export_json<P: AsRef<Path>>(path: P, entries: &[PermissionEntry], pretty: bool) -> Result<()> {
    let records: Vec<_> = entries.iter().map(PermissionEntry::to_record).collect();

    let document = json!({
        "scan_info": {
            "scan_date": chrono::Local::now().to_rfc3339(),
            "total_entries": records.len(),
        },
        "permissions": records,
    });

    let body = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(|e| Error::with_source("Failed to serialize JSON export", Box::new(e)))?;

    std::fs::write(path.as_ref(), body)
        .map_err(|e| Error::with_source("Failed to write JSON file", Box::new(e)))?;

    log::info!(
        "Exported {} entries to {}",
        entries.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use acl::AccessType;

    fn sample_entries() -> Vec<PermissionEntry> {
        vec![
            PermissionEntry::new(
                "C:\\shares\\finance",
                "DOMAIN\\Finance-RO",
                "Read, List",
                AccessType::Allow,
                true,
            ),
            PermissionEntry::new(
                "C:\\shares\\finance",
                "Everyone",
                "Read, Write, Change, Delete, List",
                AccessType::Deny,
                false,
            ),
        ]
    }

    #[test]
    fn csv_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions.csv");
        let entries = sample_entries();

        export_csv(&path, &entries).unwrap();
        let imported = import_csv(&path).unwrap();

        assert_eq!(imported.len(), entries.len());
        for (before, after) in entries.iter().zip(&imported) {
            assert_eq!(before.key(), after.key());
        }
    }

    #[test]
    fn csv_has_expected_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions.csv");

        export_csv(&path, &sample_entries()).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        let header = body.lines().next().unwrap();
        assert_eq!(
            header,
            "Path,Identity,Permission,Access Type,Inherited,Scan Time"
        );
    }

    #[test]
    fn json_envelope_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions.json");
        let entries = sample_entries();

        export_json(&path, &entries, true).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        let document: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(document["scan_info"]["total_entries"], 2);
        assert!(document["scan_info"]["scan_date"].is_string());
        let permissions = document["permissions"].as_array().unwrap();
        assert_eq!(permissions.len(), 2);
        assert_eq!(permissions[0]["Identity"], "DOMAIN\\Finance-RO");
        assert_eq!(permissions[1]["Access Type"], "Deny");
    }

    #[test]
    fn empty_export_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("empty.csv");
        let json_path = dir.path().join("empty.json");

        export_csv(&csv_path, &[]).unwrap();
        export_json(&json_path, &[], false).unwrap();

        // Even a zero-entry export carries the fixed header row.
        let body = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(
            body.lines().next().unwrap(),
            "Path,Identity,Permission,Access Type,Inherited,Scan Time"
        );
        assert!(import_csv(&csv_path).unwrap().is_empty());
        let document: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(document["scan_info"]["total_entries"], 0);
    }
}
