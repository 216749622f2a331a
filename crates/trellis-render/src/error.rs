//! Error taxonomy for the rendering pipeline.

use std::fmt;
use thiserror::Error;
use trellis_content::{ContentItem, ContentType, StreamError};
use trellis_html::GridParseError;

/// A rendering failure.
///
/// A single item failure aborts the entire enclosing render; there is no
/// partial-output suppression or retry at this layer, so editors notice
/// broken content instead of silently losing a slot.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A grid layout template failed validation. Validation runs eagerly at
    /// save time, so this never reaches a live render.
    #[error("invalid grid template: {0}")]
    Template(#[from] GridParseError),

    /// A grid reached validation or rendering with no layouts configured.
    #[error("grid {id} has no layouts")]
    NoLayouts {
        /// The grid's identifier.
        id: String,
    },

    /// The content stream could not supply items.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// A style or object renderer failed mid-item.
    #[error("failed to render {content_type} object {id}: {message}")]
    Resolution {
        /// Declared type of the failing item.
        content_type: ContentType,
        /// Identifier of the failing item.
        id: String,
        /// Renderer-supplied description.
        message: String,
    },

    /// The output sink rejected a write.
    #[error("output write failed")]
    Write(#[from] fmt::Error),
}

impl RenderError {
    /// Resolution failure for `item`, for collaborator implementations.
    #[must_use]
    pub fn resolution(item: &ContentItem, message: impl Into<String>) -> Self {
        Self::Resolution {
            content_type: item.content_type().clone(),
            id: item.id().to_owned(),
            message: message.into(),
        }
    }
}
