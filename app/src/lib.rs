pub mod consumer;
pub mod export;
pub mod scan;

/// Prelude with the most commonly used types.
pub mod prelude {
    pub use crate::consumer::config::ConsumerConfig;
    pub use crate::consumer::ConsoleConsumer;
    pub use crate::consumer::Consumer;
    pub use crate::consumer::ConsumerManager;
    pub use crate::consumer::LogConsumer;
    pub use crate::consumer::PermissionStats;
    pub use crate::scan::{ScanMessage, ScanParams, ScanReport};
}
