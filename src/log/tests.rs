use super::*;

#[tokio::test]
async fn test_log_info_warn_error() {
    let log = Log::mock();
    log.info("test", "info");
    log.warn("test", "warn");
    log.error("test", "error");

    let messages = log.get_messages().await.unwrap();
    let levels: Vec<_> = messages.iter().map(|m| m.level).collect();
    assert_eq!(levels, [LogLevel::Info, LogLevel::Warning, LogLevel::Error]);
    assert!(messages.iter().all(|m| m.scope == "test"));
}

#[tokio::test]
async fn test_log_warn_on_error() {
    let log = Log::mock();
    let ok: Result<u32, &str> = Ok(42);
    let err: Result<u32, &str> = Err("fail");
    assert_eq!(log.warn_on_error("test", ok), Ok(42));
    assert!(log.warn_on_error("test", err).is_err());

    let messages = log.get_messages().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, LogLevel::Warning);
    assert_eq!(messages[0].message, "fail");
}

#[tokio::test]
async fn test_log_error_on_error() {
    let log = Log::mock();
    let err: Result<u32, &str> = Err("fail");
    assert!(log.error_on_error("test", err).is_err());

    let messages = log.get_messages().await.unwrap();
    assert_eq!(messages[0].level, LogLevel::Error);
}

#[tokio::test]
async fn test_log_flush_and_collect_garbage_on_mock() {
    let log = Log::mock();
    log.collect_garbage().await;
    log.flush().await.unwrap();
}

#[tokio::test]
async fn test_actual_log_has_no_recorded_messages() {
    let fs = crate::fs::Fs::mock();
    let log = Log::spawn(
        fs,
        LogLevel::Warning,
        0,
        crate::ArcPath::from("/tmp/cinedeck/logs"),
    )
    .await
    .unwrap();
    log.info("test", "written to file only");
    assert!(log.get_messages().await.is_none());
}
