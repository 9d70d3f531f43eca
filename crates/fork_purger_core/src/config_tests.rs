use super::*;

#[test]
fn test_purge_config_default() {
    let config = PurgeConfig::default();

    assert_eq!(config.concurrency, 5);
    assert_eq!(config.queue_capacity, 100);
    assert_eq!(config.page_size, 100);
    assert!(config.validate().is_ok());
}

#[test]
fn test_purge_config_deserialize_partial() {
    let config: PurgeConfig =
        serde_json::from_str(r#"{"concurrency": 2}"#).expect("Failed to deserialize config");

    assert_eq!(config.concurrency, 2);
    assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn test_purge_config_rejects_zero_concurrency() {
    let config = PurgeConfig {
        concurrency: 0,
        ..Default::default()
    };

    let result = config.validate();

    match result {
        Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("concurrency")),
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_purge_config_rejects_zero_queue_capacity() {
    let config = PurgeConfig {
        queue_capacity: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_purge_config_rejects_page_size_out_of_range() {
    for page_size in [0u8, 101, 255] {
        let config = PurgeConfig {
            page_size,
            ..Default::default()
        };

        assert!(
            matches!(config.validate(), Err(Error::InvalidConfiguration(_))),
            "page_size {page_size} should be rejected"
        );
    }
}
