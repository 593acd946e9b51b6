//! Numbered-outline note editing.
//!
//! The [`outline`] engine keeps a free-form multi-line note numbered while
//! it is edited: Enter opens the next bullet, deletions renumber what
//! follows, and pasted spreadsheet rows arrive as aligned, numbered lines.
//! Notes are stored without their numbering; [`outline::render`] and
//! [`outline::normalize`] convert between the two forms.
//!
//! [`session::EditSession`] wraps the engine into an editing session, and
//! the `controller`/`view` modules host that session in a terminal.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod outline;
pub mod session;
pub mod view;

pub use error::{OutlineError, Result};
pub use outline::{OutlineText, PasteOptions, Selection};
pub use session::{EditSession, Key, KeyInput};
