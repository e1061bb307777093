use tokio::sync::broadcast;
use utils::error::Result;

use crate::consumer::Consumer;
use crate::scan::ScanMessage;

/// Log consumer: writes every scan message to the structured log.
pub struct LogConsumer;

#[async_trait::async_trait]
impl Consumer for LogConsumer {
    async fn start(
        &mut self,
        mut receiver: broadcast::Receiver<ScanMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>> {
        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(ScanMessage::Entry(entry)) => {
                        ::log::info!(
                            "[LogConsumer] {} {} {} ({}, inherited={})",
                            entry.path,
                            entry.identity,
                            entry.permission,
                            entry.access_type,
                            entry.inherited
                        );
                    }
                    Ok(ScanMessage::Progress(message)) => {
                        ::log::info!("[LogConsumer] {}", message);
                    }
                    Ok(ScanMessage::Config(context)) => {
                        ::log::info!("[LogConsumer] Scan context: job {}", context.job_id);
                    }
                    Ok(ScanMessage::Complete) => {
                        ::log::info!("[LogConsumer] Scan completed");
                        break;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        ::log::warn!("[LogConsumer] Channel closed");
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        ::log::warn!("[LogConsumer] Channel lagged, skipping messages");
                        continue;
                    }
                }
            }
            Ok(())
        });

        Ok(handle)
    }

    fn name(&self) -> &'static str {
        "log_consumer"
    }
}
