/*!
 * System clipboard capability.
 *
 * Copying is delegated to whichever platform helper is installed, tried in
 * order until one succeeds. Callers depend on the `ClipboardSink` trait so
 * the cleaned text can be routed elsewhere in tests.
 */

use std::io::Write;
use std::process::{Command, Stdio};

use log::debug;

use crate::errors::ClipboardError;

/// Something that can receive text as if copied to the clipboard
pub trait ClipboardSink {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard helper programs with their arguments, in preference order
const HELPERS: [(&str, &[&str]); 5] = [
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Clipboard backed by the operating system's copy helpers
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    fn try_helper(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        Ok(child.wait()?.success())
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut tried = Vec::with_capacity(HELPERS.len());

        for (program, args) in HELPERS {
            match Self::try_helper(program, args, text) {
                Ok(true) => {
                    debug!("Copied {} bytes to clipboard with {}", text.len(), program);
                    return Ok(());
                }
                Ok(false) => tried.push(format!("{} (failed)", program)),
                Err(_) => tried.push(format!("{} (not found)", program)),
            }
        }

        Err(ClipboardError::Unavailable(format!("tried {}", tried.join(", "))))
    }
}
