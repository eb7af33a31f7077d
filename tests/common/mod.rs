/*!
 * Common test utilities for the citeclean test suite
 */

use std::cell::RefCell;
use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use citeclean::clipboard::ClipboardSink;
use citeclean::errors::ClipboardError;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small HTML document with one of each marker kind
pub fn create_test_html(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"<html>
<body>
    <p>This is a test [cite: 123].</p>
    <div>[cite_start]</div>
    <span>[cite: 456, 789]</span>
</body>
</html>
"#;
    create_test_file(dir, filename, content)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Route log output through the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Clipboard double that records what was copied
#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: RefCell<Option<String>>,
}

impl ClipboardSink for MemoryClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard double that always fails, like a headless machine
pub struct UnavailableClipboard;

impl ClipboardSink for UnavailableClipboard {
    fn copy_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no clipboard in tests".to_string()))
    }
}
