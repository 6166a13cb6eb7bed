use cpubench::error::{is_fatal_for_run, user_friendly_message};
use cpubench::BenchError;

#[test]
fn test_user_friendly_message_and_fallback() {
    let msg = user_friendly_message(&BenchError::VerificationFailed("x".into()));
    assert!(msg.contains("wrong results"));

    let msg = user_friendly_message(&BenchError::ConfigError("Matrix size too large".into()));
    assert!(msg.contains("Matrix size too large"));

    let msg = user_friendly_message(&BenchError::DimensionMismatch("2x3 by 2x2".into()));
    assert_eq!(msg, "Dimension mismatch: 2x3 by 2x2");
}

#[test]
fn test_run_versus_category_errors() {
    let io = BenchError::IoError(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
    assert!(is_fatal_for_run(&io));
    assert!(is_fatal_for_run(&BenchError::VerificationFailed("x".into())));
    assert!(is_fatal_for_run(&BenchError::ConfigError("x".into())));

    assert!(!is_fatal_for_run(&BenchError::InvalidArgument("x".into())));
    assert!(!is_fatal_for_run(&BenchError::DimensionMismatch("x".into())));
    assert!(!is_fatal_for_run(&BenchError::InsufficientSamples("x".into())));
}

#[test]
fn test_error_conversions() {
    let err: BenchError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
    assert!(matches!(err, BenchError::PersistenceError(_)));

    let err: BenchError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
    assert!(matches!(err, BenchError::ConfigError(_)));

    let err: BenchError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().starts_with("I/O error"));
}
