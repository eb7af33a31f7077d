/*!
 * Tests for error types and conversions
 */

use std::io;
use citeclean::errors::{AppError, ClipboardError};

#[test]
fn test_app_error_display_withEachVariant_shouldDescribeProblem() {
    assert_eq!(
        AppError::InvalidExtension("notes.txt".to_string()).to_string(),
        "Only HTML files are allowed: notes.txt"
    );
    assert_eq!(AppError::EmptyInput.to_string(), "Input is empty, nothing to clean");
    assert_eq!(AppError::Config("bad".to_string()).to_string(), "Configuration error: bad");
    assert_eq!(AppError::Server("bind".to_string()).to_string(), "Server error: bind");
}

#[test]
fn test_from_io_error_withNotFound_shouldBecomeFileError() {
    let err: AppError = io::Error::new(io::ErrorKind::NotFound, "missing").into();

    assert!(matches!(err, AppError::File(ref msg) if msg.contains("missing")));
}

#[test]
fn test_from_utf8_error_withInvalidBytes_shouldBecomeEncodingError() {
    let utf8_err = String::from_utf8(vec![0xff, 0xfe, 0x3c]).unwrap_err();

    let err: AppError = utf8_err.into();

    assert!(matches!(err, AppError::InvalidEncoding(_)));
    assert!(err.to_string().starts_with("Input is not valid UTF-8"));
}

#[test]
fn test_from_clipboard_error_withUnavailable_shouldWrapMessage() {
    let err: AppError = ClipboardError::Unavailable("tried pbcopy".to_string()).into();

    assert!(matches!(err, AppError::Clipboard(_)));
    assert_eq!(err.to_string(), "Clipboard error: Clipboard unavailable: tried pbcopy");
}

#[test]
fn test_from_anyhow_error_withMessage_shouldBecomeUnknown() {
    let err: AppError = anyhow::anyhow!("something odd").into();

    assert_eq!(err.to_string(), "Unknown error: something odd");
}
