//! rs2html - Render Rust source trees as printable HTML
//!
//! Discovers Rust-related files under a directory, highlights them and
//! writes a single self-contained HTML page styled for the chosen theme.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod highlight;
pub mod output;

// Re-export main types
pub use config::Config;
pub use discovery::{DiscoveredFile, Discoverer, FileKind, FilePattern, LanguageId, Lookup, PatternRegistry};
pub use error::{Error, Result};
pub use highlight::{Brightness, Highlighter, SyntectBackend, ThemeCatalog, DEFAULT_THEME};
pub use output::PageAssembler;
