use std::collections::HashSet;
use std::fmt;

use acl::{is_ad_group, AccessType, PermissionEntry};

use crate::scan::ScanParams;

/// Aggregated statistics over one permission scan.
#[derive(Debug, Clone, Default)]
pub struct PermissionStats {
    pub total_entries: usize,
    pub directories_scanned: usize,
    pub ad_group_entries: usize,
    pub inherited_entries: usize,
    pub explicit_entries: usize,
    pub deny_entries: usize,

    paths: HashSet<String>,
    identities: HashSet<String>,

    // Display metadata
    pub command: String,
    pub job_id: String,
    pub log_path: String,
    pub total_time: String,
}

impl PermissionStats {
    /// Fold one entry into the statistics.
    pub fn update(&mut self, entry: &PermissionEntry) {
        self.total_entries += 1;
        self.paths.insert(entry.path.clone());
        self.identities.insert(entry.identity.clone());

        if is_ad_group(&entry.identity) {
            self.ad_group_entries += 1;
        }
        if entry.inherited {
            self.inherited_entries += 1;
        } else {
            self.explicit_entries += 1;
        }
        if entry.access_type == AccessType::Deny {
            self.deny_entries += 1;
        }
    }

    pub fn record_directory(&mut self) {
        self.directories_scanned += 1;
    }

    pub fn unique_paths(&self) -> usize {
        self.paths.len()
    }

    pub fn unique_identities(&self) -> usize {
        self.identities.len()
    }

    /// Reconstruct the full command string from the scan parameters.
    pub fn build_command(params: &ScanParams) -> String {
        let mut command_parts = vec![String::from("permscan scan")];

        for path in &params.paths {
            command_parts.push(format!("\"{}\"", path));
        }
        if let Some(id) = &params.id {
            command_parts.push(format!("--id \"{}\"", id));
        }
        if params.include_subfolders {
            command_parts.push(String::from("--recursive"));
        }

        command_parts.join(" ")
    }

    /// Log file path (relative to the current execution directory).
    pub fn build_log_path() -> String {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        current_dir
            .join("logs")
            .join("permscan.log")
            .to_string_lossy()
            .to_string()
    }
}

impl fmt::Display for PermissionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=================================================================="
        )?;
        writeln!(
            f,
            "                     Permission Scan Statistics                     "
        )?;
        writeln!(
            f,
            " =================================================================="
        )?;
        writeln!(f)?;
        writeln!(f, "   Command    :    {}", self.command)?;
        writeln!(f, "   Total time :    {}", self.total_time)?;
        writeln!(f, "   Job ID     :    {}", self.job_id)?;
        writeln!(f, "   Log Path   :    {}", self.log_path)?;
        writeln!(f)?;
        writeln!(
            f,
            " -------------------------- Entry Count --------------------------"
        )?;
        writeln!(
            f,
            "   Entries:                                     {}",
            self.total_entries
        )?;
        writeln!(
            f,
            "   Directories scanned:                         {}",
            self.directories_scanned
        )?;
        writeln!(
            f,
            "   Unique paths:                                {}",
            self.unique_paths()
        )?;
        writeln!(
            f,
            "   Unique identities:                           {}",
            self.unique_identities()
        )?;
        writeln!(
            f,
            " -------------------------- Access Type --------------------------"
        )?;
        writeln!(
            f,
            "   Allow:                                       {}",
            self.total_entries - self.deny_entries
        )?;
        writeln!(
            f,
            "   Deny:                                        {}",
            self.deny_entries
        )?;
        writeln!(
            f,
            " -------------------------- Inheritance --------------------------"
        )?;
        writeln!(
            f,
            "   Inherited:                                   {}",
            self.inherited_entries
        )?;
        writeln!(
            f,
            "   Explicit:                                    {}",
            self.explicit_entries
        )?;
        writeln!(
            f,
            " -------------------------- Identities ---------------------------"
        )?;
        writeln!(
            f,
            "   AD group entries:                            {}",
            self.ad_group_entries
        )?;
        writeln!(
            f,
            " ================================================================="
        )
    }
}
