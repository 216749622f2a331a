//! Rendering core for the Trellis content-management tool.
//!
//! # Architecture
//!
//! ```text
//! ContentStream → Grid → areas → Slot → value resolver → HtmlWriter
//!                                  ↓            ↓
//!                          LayoutContext   rich-text resolver
//! ```
//!
//! A grid fetches items from an external stream and places each into a
//! named area of its best-fit layout. Slots resolve individual values -
//! objects, mappings, sequences, rich text - into either the page sink
//! (direct mode) or an enclosing layout's area buffers (area-buffered
//! mode). The referential-text resolver handles rich text with embedded
//! object references and marker-bounded slicing.
//!
//! # The restoration invariant
//!
//! Renders nest arbitrarily deep. Every temporary override of ambient
//! state - the grid-area name, per-reference attributes, context tags,
//! field-access capture - is restored on all exit paths, including errors.
//! This is the central correctness invariant of the pipeline; see
//! [`context::RenderContext`].
//!
//! # Editing overlay
//!
//! With field instrumentation enabled, buffered slot bodies annotate their
//! output with hidden markers identifying the source object and field of
//! each displayed value; see [`markers`].

pub mod config;
pub mod context;
pub mod error;
pub mod grid;
pub mod layout;
pub mod markers;
pub mod referential;
pub mod slot;

pub use config::{CssClass, CssClassGroup, RichTextStyles};
pub use context::{GRID_AREA_ATTRIBUTE, ObjectRenderer, RenderContext};
pub use error::RenderError;
pub use grid::{Grid, GridContext, GridLayout, GridStyle, StyleRenderer};
pub use layout::{AreaKey, LayoutContext};
pub use markers::{
    FIELD_ACCESS_BEGIN, FIELD_ACCESS_END, field_access_marker, rewrite_field_markers,
};
pub use slot::{BodyScope, Slot, TextSlice};
