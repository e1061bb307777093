use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::parser::ParsedAce;

/// Timestamp format used by the CSV/JSON exports. Lossy to the second.
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether an ACE grants or denies its permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
    Allow,
    Deny,
}

impl Default for AccessType {
    fn default() -> Self {
        AccessType::Allow
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessType::Allow => write!(f, "Allow"),
            AccessType::Deny => write!(f, "Deny"),
        }
    }
}

impl FromStr for AccessType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(AccessType::Allow),
            "deny" => Ok(AccessType::Deny),
            _ => Err(()),
        }
    }
}

/// One ACL record for one (path, identity) access-control-entry pair.
///
/// Records are immutable after creation; a new scan produces a new list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// Directory the entry was scanned from, OS-native separators.
    pub path: String,
    /// User, local group or domain group, possibly with a domain prefix.
    pub identity: String,
    /// Normalized comma-joined subset of Read/Write/Change/Delete/List.
    /// Never empty for a stored record.
    pub permission: String,
    pub access_type: AccessType,
    /// True when the ACE was inherited from a parent container.
    pub inherited: bool,
    /// Wall-clock time of the scan.
    pub timestamp: DateTime<Local>,
}

impl PermissionEntry {
    pub fn new(
        path: &str,
        identity: &str,
        permission: &str,
        access_type: AccessType,
        inherited: bool,
    ) -> Self {
        Self {
            path: path.to_string(),
            identity: identity.to_string(),
            permission: permission.to_string(),
            access_type,
            inherited,
            timestamp: Local::now(),
        }
    }

    /// Build an entry from a parsed icacls line.
    pub fn from_ace(path: &str, ace: ParsedAce) -> Self {
        Self {
            path: path.to_string(),
            identity: ace.identity,
            permission: ace.permission,
            access_type: ace.access_type,
            inherited: ace.inherited,
            timestamp: Local::now(),
        }
    }

    /// Export view with the fixed column names.
    pub fn to_record(&self) -> PermissionRecord {
        PermissionRecord {
            path: self.path.clone(),
            identity: self.identity.clone(),
            permission: self.permission.clone(),
            access_type: self.access_type.to_string(),
            inherited: self.inherited,
            scan_time: self.timestamp.format(SCAN_TIME_FORMAT).to_string(),
        }
    }

    /// Rebuild an entry from an export record. The timestamp loses
    /// sub-second precision; an unparsable one falls back to now.
    pub fn from_record(record: &PermissionRecord) -> Self {
        let timestamp = NaiveDateTime::parse_from_str(&record.scan_time, SCAN_TIME_FORMAT)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .unwrap_or_else(Local::now);

        Self {
            path: record.path.clone(),
            identity: record.identity.clone(),
            permission: record.permission.clone(),
            access_type: record.access_type.parse().unwrap_or_default(),
            inherited: record.inherited,
            timestamp,
        }
    }

    /// The comparable part of an entry, everything except the timestamp.
    pub fn key(&self) -> (&str, &str, &str, AccessType, bool) {
        (
            &self.path,
            &self.identity,
            &self.permission,
            self.access_type,
            self.inherited,
        )
    }
}

/// Serde view of an entry with the fixed export column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Identity")]
    pub identity: String,
    #[serde(rename = "Permission")]
    pub permission: String,
    #[serde(rename = "Access Type")]
    pub access_type: String,
    #[serde(rename = "Inherited")]
    pub inherited: bool,
    #[serde(rename = "Scan Time")]
    pub scan_time: String,
}
