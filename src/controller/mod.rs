/// Controller subsystem - Handles all user input for an editing session
///
/// This module translates terminal events into session operations and owns
/// the event loop that keeps text, screen and cursor in step.

pub mod editor;
pub mod key_handler;

// Re-export public interface
pub use editor::EditorController;
pub use key_handler::{Action, KeyHandler};
