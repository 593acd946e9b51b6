use crate::error::{OutlineError, Result};
use arboard::Clipboard;

/// Read plain text from the system clipboard.
pub fn read_text() -> Result<String> {
    Clipboard::new()
        .and_then(|mut clipboard| clipboard.get_text())
        .map_err(|e| OutlineError::Clipboard(e.to_string()))
}
