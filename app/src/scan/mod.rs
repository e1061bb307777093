use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use acl::{AclCapabilities, AclScanner, PermissionEntry};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use utils::app_config::AppConfig;
use utils::error::Result;

use crate::consumer::{ConsumerConfig, ConsumerManager, PermissionStats};

mod driver;
mod filter;

#[cfg(test)]
mod tests;

pub use driver::{collect_directories, directory_stream};
pub use filter::filter_entries;

/// Scan parameters coming in from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanParams {
    /// Scan ID, used for tracking
    pub id: Option<String>,

    /// Directories to scan
    pub paths: Vec<String>,

    /// Scan every nested subdirectory, not just the roots
    pub include_subfolders: bool,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            id: None,
            paths: vec![String::from(".")],
            include_subfolders: false,
        }
    }
}

/// Metadata handed to consumers at scan start.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub params: ScanParams,
    pub job_id: String,
}

/// Message types flowing from the driver to the consumers.
#[derive(Debug, Clone)]
pub enum ScanMessage {
    /// One parsed permission entry
    Entry(PermissionEntry),
    /// Coarse progress, one message per directory ("Scanning: <path>")
    Progress(String),
    /// Scan metadata, sent once before the first entry
    Config(ScanContext),
    Complete,
}

/// Everything a finished scan produced.
#[derive(Debug)]
pub struct ScanReport {
    pub entries: Vec<PermissionEntry>,
    pub stats: PermissionStats,
}

/// Main scan entry point.
///
/// Wires the directory driver to the consumer layer, accumulates every
/// entry, and returns the full report. The ACL backend capabilities are
/// probed once at startup and handed in by the caller. Ctrl-C stops the
/// scan between directories; an in-flight external command runs to
/// completion.
pub async fn scan(params: ScanParams, capabilities: AclCapabilities) -> Result<ScanReport> {
    log::info!("Starting scan with params: {:?}", params);

    let app_config = AppConfig::fetch()?;
    let job_id = params.id.clone().unwrap_or_else(|| String::from("unknown"));

    let context = ScanContext {
        params: params.clone(),
        job_id,
    };

    // Consumer layer: console always, log consumer per config.
    let mut consumer_manager = ConsumerManager::with_config(&ConsumerConfig {
        enable_log_consumer: app_config.scan.log_consumer,
        channel_capacity: app_config.scan.channel_capacity,
    });
    let consumer_handles = consumer_manager.start_consumers().await?;
    let broadcaster = consumer_manager.get_broadcaster();

    if let Err(e) = broadcaster.send(ScanMessage::Config(context)) {
        log::error!("Failed to broadcast scan context: {}", e);
    }

    // Stop flag, set by Ctrl-C and checked between directories.
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupt received; stopping after the current directory");
                stop.store(true, Ordering::SeqCst);
            }
        });
    }

    let scanner = AclScanner::new(capabilities);
    if !capabilities.any() {
        log::warn!("Neither icacls nor powershell found on PATH; scan may produce no entries");
    }

    let (tx, mut rx) = mpsc::channel::<ScanMessage>(app_config.scan.channel_capacity);

    let driver_params = params.clone();
    let driver_handle =
        tokio::spawn(async move { driver::run(driver_params, scanner, stop, tx).await });

    // Only the counting side of the stats lives on the report; the display
    // metadata (command line, timings) belongs to the console consumer.
    let mut entries: Vec<PermissionEntry> = Vec::new();
    let mut stats = PermissionStats::default();

    loop {
        match rx.recv().await {
            Some(message) => {
                match &message {
                    ScanMessage::Entry(entry) => {
                        stats.update(entry);
                        entries.push(entry.clone());
                    }
                    ScanMessage::Progress(_) => stats.record_directory(),
                    _ => {}
                }

                let complete = matches!(message, ScanMessage::Complete);
                if let Err(e) = broadcaster.send(message) {
                    log::error!("Failed to broadcast scan message: {}", e);
                }
                if complete {
                    break;
                }
            }
            None => {
                log::warn!("Channel closed unexpectedly");
                let _ = broadcaster.send(ScanMessage::Complete);
                break;
            }
        }
    }

    driver_handle
        .await
        .map_err(|e| utils::error::Error::with_source("Scan driver task failed", Box::new(e)))??;

    for handle in consumer_handles {
        let _ = handle.await;
    }
    consumer_manager.shutdown().await?;

    // Aggregated warning when the whole scan came back empty.
    if entries.is_empty() {
        log::warn!(
            "Scan produced zero permission entries across {} directories",
            stats.directories_scanned
        );
    }

    Ok(ScanReport { entries, stats })
}
