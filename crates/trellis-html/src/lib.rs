//! HTML output sink and grid-template parsing for the Trellis rendering
//! core.
//!
//! # Scope
//!
//! This crate implements:
//! - **Grid Template Parser** ([`HtmlGrid`]) - a subset of the CSS
//!   `grid-template` shorthand
//!   ([§ 7.4 grid-template-areas](https://www.w3.org/TR/css-grid-1/#grid-template-areas-property)):
//!   quoted area rows with optional track sizes, unquoted area rows, a
//!   trailing `/` columns list, and `.` null cells
//! - **Output Sink** ([`HtmlWriter`]) - the writing vocabulary the
//!   rendering pipeline uses: tagged elements with ordered attributes,
//!   auto-escaped text, raw passthrough for sanitized markup, CSS property
//!   blocks, and the grid placement primitives
//!
//! # Not Implemented
//!
//! - `repeat()`, `minmax()` validation inside track sizes (sizes are
//!   carried through as opaque tokens)
//! - Implicit tracks and auto-placement (every area is named explicitly)

pub mod grid;
pub mod writer;

pub use grid::{GridParseError, GridRow, HtmlGrid};
pub use writer::{Attributes, HtmlWriter};
