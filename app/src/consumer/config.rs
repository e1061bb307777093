use serde::{Deserialize, Serialize};

/// Consumer layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Enable the per-entry log consumer
    pub enable_log_consumer: bool,
    /// Broadcast channel capacity
    pub channel_capacity: usize,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            enable_log_consumer: false,
            channel_capacity: 10000,
        }
    }
}

impl ConsumerConfig {
    /// Configuration with every consumer enabled.
    pub fn all_enabled() -> Self {
        Self {
            enable_log_consumer: true,
            ..Default::default()
        }
    }
}
