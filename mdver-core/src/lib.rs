//! mdver core - versioned markdown documents, outline, diff and search
//!
//! This crate contains the text-processing logic of mdver, independent of any
//! presentation layer:
//! - Document and version list model
//! - Heading slugs and TOC extraction
//! - Line diff between adjacent versions
//! - Literal case-insensitive search and highlight spans
//! - Viewing session tying the above together
//! - Plain-text markdown rendering with heading anchors
//! - Configuration management

pub mod config;
pub mod diff;
pub mod doc;
pub mod render;
pub mod search;
pub mod session;
pub mod slug;
pub mod toc;
pub mod version;

// Re-export commonly used types
pub use config::Config;
pub use diff::{diff_lines, DiffKind, DiffLine};
pub use doc::Document;
pub use search::{Direction, SearchMatcher, SearchStatus, Span};
pub use session::Session;
pub use slug::slugify;
pub use toc::{extract_headings, Heading};
pub use version::{VersionError, VersionList};
