//! Clipboard integration for copying the booking summary
//!
//! Uses arboard for cross-platform clipboard access. `AppCore` only sees the
//! `ClipboardSink` trait so it can run headless.

use anyhow::{Context, Result};
use arboard::Clipboard;

pub trait ClipboardSink: Send {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. Opened per copy; holding it open keeps an X11
/// connection alive for the whole session.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        copy(text)
    }
}

/// Copy text to system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to clipboard")?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy_summary() {
        let mut sink = SystemClipboard;
        sink.copy("Draft booking\nTotal: $0.00").expect("Copy failed");

        let pasted = Clipboard::new().unwrap().get_text().unwrap();
        assert_eq!(pasted, "Draft booking\nTotal: $0.00");
    }

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_empty_copy() {
        // Should not fail on empty string
        assert!(copy("").is_ok());
    }
}
