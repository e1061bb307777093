use tokio::sync::broadcast;
use utils::error::Result;

use crate::consumer::config::ConsumerConfig;
use crate::consumer::{ConsoleConsumer, Consumer, LogConsumer};
use crate::scan::ScanMessage;

/// Manages the set of consumers fed by one scan.
pub struct ConsumerManager {
    /// Broadcast sender
    broadcaster: broadcast::Sender<ScanMessage>,
    /// Registered consumers
    consumers: Vec<Box<dyn Consumer>>,
}

impl ConsumerManager {
    /// Create a manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&ConsumerConfig::default())
    }

    /// Create a manager from an explicit configuration.
    pub fn with_config(config: &ConsumerConfig) -> Self {
        let (broadcaster, _) = broadcast::channel(config.channel_capacity);
        let mut manager = Self {
            broadcaster,
            consumers: Vec::new(),
        };

        if config.enable_log_consumer {
            manager.add_consumer(Box::new(LogConsumer));
        }
        // The console consumer is always present.
        manager.add_consumer(Box::new(ConsoleConsumer));

        manager
    }

    pub fn add_consumer(&mut self, consumer: Box<dyn Consumer>) {
        self.consumers.push(consumer);
    }

    /// Start every registered consumer.
    pub async fn start_consumers(&mut self) -> Result<Vec<tokio::task::JoinHandle<Result<()>>>> {
        let mut handles = Vec::new();

        for consumer in &mut self.consumers {
            let receiver = self.broadcaster.subscribe();
            let consumer_handle = consumer.start(receiver).await?;
            handles.push(consumer_handle);
        }

        Ok(handles)
    }

    pub fn get_broadcaster(&self) -> broadcast::Sender<ScanMessage> {
        self.broadcaster.clone()
    }

    pub fn get_consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Broadcast one message to all consumers.
    pub fn broadcast(&self, message: ScanMessage) -> Result<()> {
        self.broadcaster.send(message).map_err(|e| {
            utils::error::Error::with_source("Failed to broadcast message", Box::new(e))
        })?;
        Ok(())
    }

    /// Shut the consumer layer down.
    pub async fn shutdown(&self) -> Result<()> {
        // Send completion; errors are ignored, nobody may be listening.
        let _ = self.broadcaster.send(ScanMessage::Complete);
        Ok(())
    }
}

impl Default for ConsumerManager {
    fn default() -> Self {
        Self::new()
    }
}
