use acl::{AccessType, PermissionEntry};
use app::consumer::config::ConsumerConfig;
use app::consumer::ConsumerManager;
use app::scan::ScanMessage;
use utils::error::Result;

#[tokio::test]
async fn test_consumer_manager_creation() -> Result<()> {
    // Default configuration: console consumer only.
    let manager = ConsumerManager::new();
    assert_eq!(manager.get_consumer_count(), 1);

    // Everything enabled: console plus log consumer.
    let config = ConsumerConfig::all_enabled();
    let manager = ConsumerManager::with_config(&config);
    assert_eq!(manager.get_consumer_count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_scan_with_consumers() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut consumer_manager = ConsumerManager::new();
    let handles = consumer_manager.start_consumers().await?;
    let broadcaster = consumer_manager.get_broadcaster();

    let entry = PermissionEntry::new(
        "/srv/shares",
        "DOMAIN\\Auditors",
        "Read, List",
        AccessType::Allow,
        true,
    );
    broadcaster
        .send(ScanMessage::Entry(entry))
        .expect("broadcast entry");
    broadcaster
        .send(ScanMessage::Progress(String::from("Scanning: /srv/shares")))
        .expect("broadcast progress");
    broadcaster
        .send(ScanMessage::Complete)
        .expect("broadcast completion");

    // Every consumer exits cleanly on Complete.
    for handle in handles {
        handle.await.expect("consumer task")?;
    }

    consumer_manager.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_custom_config() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = ConsumerConfig {
        enable_log_consumer: false,
        channel_capacity: 100,
    };
    let manager = ConsumerManager::with_config(&config);
    assert_eq!(manager.get_consumer_count(), 1);

    let config = ConsumerConfig::all_enabled();
    let manager = ConsumerManager::with_config(&config);
    assert_eq!(manager.get_consumer_count(), 2);

    Ok(())
}
