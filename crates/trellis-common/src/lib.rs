//! Common utilities for the Trellis rendering core.
//!
//! This crate provides shared infrastructure used by all rendering
//! components:
//! - **HTML Escaping** - the escaping primitive applied to text and
//!   attribute values before they reach the page
//! - **Warning Channel** - deduplicated colored advisories for render
//!   conditions that are deliberately tolerated rather than fatal

pub mod escape;
pub mod warning;

pub use escape::escape_html;
pub use warning::{clear_warnings, warn_once};
