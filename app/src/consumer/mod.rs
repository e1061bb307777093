use tokio::sync::broadcast;
use utils::error::Result;

use crate::scan::ScanMessage;

pub mod config;
pub mod console;
pub mod log;
pub mod manager;
pub mod stats;

pub use config::ConsumerConfig;
pub use console::ConsoleConsumer;
pub use log::LogConsumer;
pub use manager::ConsumerManager;
pub use stats::PermissionStats;

/// Consumer trait: each consumer subscribes to the scan broadcast and
/// processes messages in its own task.
#[async_trait::async_trait]
pub trait Consumer: Send + Sync {
    /// Start the consumer, returning its task handle.
    async fn start(
        &mut self,
        receiver: broadcast::Receiver<ScanMessage>,
    ) -> Result<tokio::task::JoinHandle<Result<()>>>;

    /// Consumer name
    fn name(&self) -> &'static str;
}
