//! Opaque externally-typed content objects.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted content type (e.g. `article`, `promo`).
///
/// Style lookups compare types by equality; the rendering core attaches no
/// further meaning to the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentType(String);

impl ContentType {
    /// Create a type identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The type name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentType {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// An externally-typed content object.
///
/// The rendering core reads only the declared type and the string
/// identifier (for style lookup and editing markers); fields are a bag of
/// [`Value`]s the host's renderers interpret. Field reads during a slot
/// body go through the body scope so the editing overlay can observe them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    id: String,
    content_type: ContentType,
    #[serde(default)]
    fields: IndexMap<String, Value>,
}

impl ContentItem {
    /// Create an item with no fields.
    #[must_use]
    pub fn new(id: impl Into<String>, content_type: impl Into<ContentType>) -> Self {
        Self {
            id: id.into(),
            content_type: content_type.into(),
            fields: IndexMap::new(),
        }
    }

    /// Attach a field, keeping insertion order.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.fields.insert(name.into(), value.into());
        self
    }

    /// The item's string identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The item's declared content type.
    #[must_use]
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Read a field without observation. Rendering code inside a slot body
    /// should read through the body scope instead so editing
    /// instrumentation sees the access.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}
