use taskdeck::{Error, ErrorKind};

#[test]
fn kinds_classify_for_ui_routing() {
    let validation = Error::Validation("title must not be empty".to_string());
    assert_eq!(validation.kind(), ErrorKind::Validation);

    let missing = Error::TaskNotFound("task_abc".to_string());
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let missing_notice = Error::NotificationNotFound("notification_abc".to_string());
    assert_eq!(missing_notice.kind(), ErrorKind::NotFound);

    let no_session = Error::NoActiveSession;
    assert_eq!(no_session.kind(), ErrorKind::NoSession);

    let persistence = Error::Persistence("disk full".to_string());
    assert_eq!(persistence.kind(), ErrorKind::Persistence);
}

#[test]
fn io_and_serde_failures_surface_as_persistence() {
    let io = Error::Io(std::io::Error::other("boom"));
    assert_eq!(io.kind(), ErrorKind::Persistence);

    let json = Error::Json(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
    assert_eq!(json.kind(), ErrorKind::Persistence);
}

#[test]
fn messages_name_the_target() {
    let err = Error::TaskNotFound("task_123".to_string());
    assert!(err.to_string().contains("task_123"));
}
