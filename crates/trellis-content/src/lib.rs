//! Content graph model for the Trellis rendering core.
//!
//! # Design
//!
//! The rendering pipeline never inspects concrete host types at runtime.
//! Everything it can be asked to render is one of the tagged [`Value`]
//! variants, with exactly one resolver branch per variant. Objects the
//! pipeline cannot interpret stay opaque ([`ContentItem`]) and are handed
//! to the host's generic object renderer.
//!
//! Persisted shapes ([`Value`], [`ContentItem`], [`ReferentialText`] and
//! friends) derive serde so hosts can materialize them from storage; no
//! additional wire format lives here.

pub mod item;
pub mod rich_text;
pub mod stream;
pub mod value;

pub use item::{ContentItem, ContentType};
pub use rich_text::{Marker, Reference, ReferenceTarget, ReferentialText, Segment};
pub use stream::{ContentStream, StreamError, VecStream};
pub use value::{PageArea, Section, Value, ValueKind};
