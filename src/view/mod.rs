/// View subsystem - Terminal rendering of the edit form
///
/// This module draws the numbered text, header and status line, and places
/// the terminal cursor once the text has been committed to the screen.

pub mod renderer;

// Re-export public interface
pub use renderer::{RenderParams, View};
