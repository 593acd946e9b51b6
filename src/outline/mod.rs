/// Outline subsystem - Numbered-line text engine
///
/// This module holds the pure string transformations behind the numbered
/// note editor: the line model, the numbering projection, and the edit
/// operations that keep numbering consistent while the user types.

pub mod bullet;
pub mod edit_ops;
pub mod line_model;
pub mod numbering;
pub mod table;

// Re-export public interface
pub use bullet::{Bullet, parse_bullet};
pub use edit_ops::{
    EditOutcome, PasteOptions, Selection, continue_on_enter, ingest_paste, renumber,
    renumber_after_backspace,
};
pub use line_model::{LogicalLine, OutlineText, normalize_input};
pub use numbering::{DisplayLine, display_lines, format_display, normalize, render};
