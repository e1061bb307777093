use std::time::Instant;

use tokio::sync::broadcast;
use utils::error::Result;

use crate::consumer::stats::PermissionStats;
use crate::consumer::Consumer;
use crate::scan::ScanMessage;

/// Console consumer: prints progress and the final statistics table.
pub struct ConsoleConsumer;

#[async_trait::async_trait]
impl Consumer for ConsoleConsumer {
    async fn start(
        &mut self,
        mut receiver: broadcast::Receiver<ScanMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>> {
        let handle = tokio::spawn(async move {
            let start_time = Instant::now();
            let mut stats = PermissionStats::default();
            let mut last_progress_time = Instant::now();
            let mut config_received = false;

            println!(
                "permscan {}; NTFS folder permission audit\n",
                env!("CARGO_PKG_VERSION")
            );

            loop {
                match receiver.recv().await {
                    Ok(ScanMessage::Entry(entry)) => {
                        stats.update(&entry);
                        log::debug!("[ConsoleConsumer] Processed: {:?}", entry);
                    }
                    Ok(ScanMessage::Progress(message)) => {
                        stats.record_directory();
                        log::info!("[ConsoleConsumer] {}", message);

                        // Progress line every 10 seconds at most.
                        if last_progress_time.elapsed().as_secs() >= 10 {
                            let now = chrono::Local::now();
                            println!(
                                "[{}] Scan progress: {} entries from {} directories",
                                now.format("%Y-%m-%d %H:%M:%S"),
                                stats.total_entries,
                                stats.directories_scanned
                            );
                            last_progress_time = Instant::now();
                        }
                    }
                    Ok(ScanMessage::Config(context)) => {
                        stats.command = PermissionStats::build_command(&context.params);
                        stats.job_id = context.job_id.clone();
                        stats.log_path = PermissionStats::build_log_path();
                        config_received = true;
                        log::info!("[ConsoleConsumer] Received scan context");
                    }
                    Ok(ScanMessage::Complete) => {
                        log::info!("[ConsoleConsumer] Scan completed");

                        let duration = start_time.elapsed();
                        stats.total_time = format!("{:.2}s", duration.as_secs_f64());

                        if !config_received {
                            stats.command = String::from("permscan scan");
                            stats.job_id = String::from("unknown");
                            stats.log_path = PermissionStats::build_log_path();
                        }

                        println!("\n{}", stats);
                        break;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        log::warn!("[ConsoleConsumer] Channel closed");
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        log::warn!("[ConsoleConsumer] Channel lagged, skipping messages");
                        continue;
                    }
                }
            }
            Ok(())
        });

        Ok(handle)
    }

    fn name(&self) -> &'static str {
        "console_consumer"
    }
}
