use std::path::PathBuf;

use acl::AclCapabilities;
use app::export;
use app::scan::{filter_entries, scan, ScanParams};
use utils::app_config::AppConfig;

#[allow(clippy::too_many_arguments)]
pub async fn scan_cmd(
    id: Option<String>,
    paths: Vec<String>,
    recursive: bool,
    filter: Option<String>,
    ad_only: bool,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    capabilities: AclCapabilities,
) -> utils::error::Result<()> {
    let config = AppConfig::fetch()?;

    let params = ScanParams {
        id,
        paths,
        // The flag turns recursion on; the config can keep it on by default.
        include_subfolders: recursive || config.scan.include_subfolders,
    };

    let report = scan(params, capabilities).await?;
    log::info!(
        "Scan finished: {} entries across {} directories",
        report.stats.total_entries,
        report.stats.directories_scanned
    );

    let entries = if filter.is_some() || ad_only {
        filter_entries(&report.entries, filter.as_deref(), ad_only)
    } else {
        report.entries
    };

    if let Some(path) = csv {
        export::export_csv(&path, &entries)?;
        println!("CSV written to {}", path.display());
    }
    if let Some(path) = json {
        export::export_json(&path, &entries, config.export.pretty_json)?;
        println!("JSON written to {}", path.display());
    }

    println!("Scan completed successfully!");
    Ok(())
}

pub async fn probe_cmd(caps: AclCapabilities) -> utils::error::Result<()> {
    println!("icacls:     {}", if caps.icacls { "found" } else { "not found" });
    println!("powershell: {}", if caps.powershell { "found" } else { "not found" });

    if !caps.any() {
        println!("No ACL backend available; scans will produce no entries");
    }

    Ok(())
}
