//! Referential rich text: literal markup interleaved with object
//! references.
//!
//! Stored rich text is materialized into a flat segment list at render
//! time. Literal segments carry already-sanitized markup. Reference
//! segments either embed a renderable object (with optional per-embed
//! attribute overrides) or anchor a zero-width [`Marker`] that exists only
//! so slices can be computed against it.

use crate::item::ContentItem;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rich text composed of literal string segments and references.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferentialText {
    segments: Vec<Segment>,
}

impl ReferentialText {
    /// Create rich text from its segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether there are no segments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One rich-text segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Already-sanitized literal markup, written verbatim (after the
    /// empty-paragraph filter).
    Text(String),

    /// A reference to a marker or an embedded object.
    Reference(Reference),
}

impl Segment {
    /// Shorthand for a literal segment.
    #[must_use]
    pub fn text(markup: impl Into<String>) -> Self {
        Self::Text(markup.into())
    }
}

/// An object reference carried inside rich text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// What the reference points at.
    pub target: ReferenceTarget,

    /// Per-embed attribute overrides, pushed into the ambient attribute
    /// scope for the duration of this reference's render and restored
    /// afterward. Keys starting with `_` are reserved and never exported.
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl Reference {
    /// A reference embedding a renderable object.
    #[must_use]
    pub fn to_object(item: ContentItem) -> Self {
        Self {
            target: ReferenceTarget::Object(Box::new(item)),
            attributes: IndexMap::new(),
        }
    }

    /// A reference anchoring a zero-width slicing marker.
    #[must_use]
    pub fn to_marker(internal_name: impl Into<String>) -> Self {
        Self {
            target: ReferenceTarget::Marker(Marker {
                internal_name: internal_name.into(),
            }),
            attributes: IndexMap::new(),
        }
    }

    /// Attach an attribute override, keeping insertion order.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Target of a rich-text reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReferenceTarget {
    /// A zero-width named anchor used only to compute slice boundaries;
    /// never rendered.
    Marker(Marker),

    /// An embedded renderable object.
    Object(Box<ContentItem>),

    /// A dangling reference whose object no longer resolves; renders
    /// nothing.
    Unresolved,
}

/// A zero-width named anchor inside rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// The name slice lookups match against.
    pub internal_name: String,
}
