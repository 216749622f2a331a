//! The tagged content value variant.

use crate::item::ContentItem;
use crate::rich_text::ReferentialText;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Discriminant of a [`Value`], used in diagnostics and generated class
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    /// [`Value::Mapping`]
    Mapping,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Area`]
    Area,
    /// [`Value::Section`]
    Section,
    /// [`Value::RichText`]
    RichText,
    /// [`Value::Scalar`]
    Scalar,
    /// [`Value::Object`]
    Object,
}

/// A content value as seen by the rendering pipeline.
///
/// One resolver branch exists per variant; there is no runtime type
/// inspection anywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Entries render in insertion order; keys route values to areas
    /// upstream and are discarded on output.
    Mapping(IndexMap<String, Value>),

    /// Items render in order, keyed by 0-based position upstream.
    Sequence(Vec<Value>),

    /// A named page area that unwraps to its contents when rendered.
    Area(PageArea),

    /// A named layout section that renders as itself through the generic
    /// object renderer.
    Section(Section),

    /// Rich text interleaving literal markup with object references.
    RichText(ReferentialText),

    /// A literal string, HTML-escaped on output.
    Scalar(String),

    /// An opaque content object delegated to the generic object renderer.
    Object(ContentItem),
}

impl Value {
    /// The variant discriminant.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Mapping(_) => ValueKind::Mapping,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Area(_) => ValueKind::Area,
            Self::Section(_) => ValueKind::Section,
            Self::RichText(_) => ValueKind::RichText,
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Whether a slot should treat this value as absent and fall back to
    /// its body: a whitespace-only scalar, an empty collection, or empty
    /// rich text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Scalar(text) => text.trim().is_empty(),
            Self::Mapping(entries) => entries.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::RichText(text) => text.is_empty(),
            Self::Area(_) | Self::Section(_) | Self::Object(_) => false,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_owned())
    }
}

impl From<ReferentialText> for Value {
    fn from(text: ReferentialText) -> Self {
        Self::RichText(text)
    }
}

/// A named page area: a slot of a page template whose contents render in
/// its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageArea {
    /// Internal name, used as the area key when the area is dispatched.
    pub internal_name: String,
    /// The wrapped contents.
    pub contents: Box<Value>,
}

impl PageArea {
    /// Create a page area.
    #[must_use]
    pub fn new(internal_name: impl Into<String>, contents: Value) -> Self {
        Self {
            internal_name: internal_name.into(),
            contents: Box::new(contents),
        }
    }
}

/// A layout section: a named slot backed by one content object.
///
/// Unlike a [`PageArea`], a section does not unwrap; the backing object
/// renders through the generic object renderer under the section's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Internal name, used as the area key when the section is dispatched.
    pub internal_name: String,
    /// The content object backing the section.
    pub item: ContentItem,
}

impl Section {
    /// Create a section.
    #[must_use]
    pub fn new(internal_name: impl Into<String>, item: ContentItem) -> Self {
        Self {
            internal_name: internal_name.into(),
            item,
        }
    }
}
