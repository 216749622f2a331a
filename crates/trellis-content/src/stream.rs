//! Paginated content providers.

use crate::item::ContentItem;
use thiserror::Error;

/// Failure while fetching from a content stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content stream failed at offset {offset}: {message}")]
pub struct StreamError {
    /// Offset of the failed fetch.
    pub offset: usize,
    /// Provider-supplied description.
    pub message: String,
}

/// Ordered, paginated provider of content items.
///
/// Streams are owned externally (a query, a curated list); the grid
/// compositor only reads from them. Fetch order is render order.
pub trait ContentStream {
    /// Fetch up to `limit` items starting at `offset`, in stable order.
    ///
    /// # Errors
    /// Returns a [`StreamError`] when the underlying provider fails.
    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<ContentItem>, StreamError>;
}

/// In-memory stream backed by a vector, for hosts with precomputed lists
/// and for tests.
#[derive(Debug, Clone, Default)]
pub struct VecStream {
    items: Vec<ContentItem>,
}

impl VecStream {
    /// Create a stream over the given items.
    #[must_use]
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

impl ContentStream for VecStream {
    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<ContentItem>, StreamError> {
        Ok(self
            .items
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
