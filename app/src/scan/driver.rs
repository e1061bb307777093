//! Directory scan driver.
//!
//! Enumerates target directories (each root, plus all nested
//! subdirectories when requested) and invokes the ACL scanner once per
//! directory. Failures are per-directory: an inaccessible subtree or a
//! failing command is logged and skipped, never aborting the scan.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use acl::AclScanner;
use tokio::sync::mpsc;
use utils::error::Result;
use walkdir::WalkDir;

use crate::scan::{ScanMessage, ScanParams};

async fn send(tx: &mpsc::Sender<ScanMessage>, message: ScanMessage) -> Result<()> {
    tx.send(message)
        .await
        .map_err(|e| utils::error::Error::with_source("Failed to send scan message", Box::new(e)))
}

/// Walk the configured roots and stream ACL entries into the queue.
///
/// The stop flag is checked between directories only; an in-flight
/// external command is never interrupted.
pub async fn run(
    params: ScanParams,
    scanner: AclScanner,
    stop: Arc<AtomicBool>,
    tx: mpsc::Sender<ScanMessage>,
) -> Result<()> {
    'roots: for root in &params.paths {
        let normalized = acl::normalize_path(root);

        if !Path::new(&normalized).exists() {
            log::error!("Path not found: {}", normalized);
            continue;
        }

        let mut directories = directory_stream(normalized, params.include_subfolders).await;

        while let Some(directory) = directories.recv().await {
            if stop.load(Ordering::SeqCst) {
                log::warn!("Scan stopped before {}", directory);
                break 'roots;
            }

            send(&tx, ScanMessage::Progress(format!("Scanning: {}", directory))).await?;

            match scanner.folder_acl(&directory).await {
                Ok(dir_entries) => {
                    log::debug!(
                        "Found {} permission entries in {}",
                        dir_entries.len(),
                        directory
                    );
                    for entry in dir_entries {
                        send(&tx, ScanMessage::Entry(entry)).await?;
                    }
                }
                Err(err) => {
                    // Both backends failed; the directory contributes
                    // zero records and the scan continues.
                    log::warn!("Skipping {}: {}", directory, err);
                }
            }
        }
    }

    send(&tx, ScanMessage::Complete).await?;
    Ok(())
}

/// Stream the root directory plus, optionally, every nested subdirectory.
///
/// The walk runs on a blocking task as a producer; inaccessible subtrees
/// are logged and skipped.
pub async fn directory_stream(root: String, include_subfolders: bool) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(1000);

    tokio::task::spawn_blocking(move || {
        if !include_subfolders {
            let _ = tx.blocking_send(root);
            return;
        }

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .max_open(100);

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => {
                    let path = acl::normalize_path(&entry.path().to_string_lossy());
                    if tx.blocking_send(path).is_err() {
                        // Receiver dropped, stop producing.
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Skipping inaccessible subtree: {}", err);
                }
            }
        }
    });

    rx
}

/// Collect the directory stream into a list. Convenience for callers and
/// tests that do not need streaming.
pub async fn collect_directories(root: &str, include_subfolders: bool) -> Vec<String> {
    let mut rx = directory_stream(root.to_string(), include_subfolders).await;
    let mut directories = Vec::new();

    while let Some(directory) = rx.recv().await {
        directories.push(directory);
    }

    directories
}
