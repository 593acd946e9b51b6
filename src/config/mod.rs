/// Configuration subsystem - Editor settings and preferences
///
/// This module handles loading configuration from .outlinerc files,
/// providing the paste layout and display settings for the editor.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
