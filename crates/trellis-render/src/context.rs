//! Request-scoped rendering context.
//!
//! Renders nest arbitrarily deep, and siblings must never observe a leaked
//! override. Every piece of ambient state a nested render can shadow (the
//! grid-area name, per-reference attributes, the context-tag stack) is
//! therefore mutated only through scoped helpers that restore the previous
//! state on every exit path, including `Err` returns.

use crate::config::RichTextStyles;
use crate::error::RenderError;
use indexmap::IndexMap;
use trellis_content::{ContentItem, Value};
use trellis_html::HtmlWriter;

/// Name of the ambient attribute carrying the grid-area name a buffered
/// slot is rendering into.
pub const GRID_AREA_ATTRIBUTE: &str = "gridArea";

/// The generic external object renderer.
///
/// The pipeline delegates every opaque object to this collaborator - the
/// host's page-filter equivalent, which knows how to look up and run the
/// object's own renderer.
pub trait ObjectRenderer {
    /// Render one opaque item to the sink.
    ///
    /// # Errors
    /// Returns a resolution error for an item the host cannot render; the
    /// failure aborts the enclosing render.
    fn render(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        item: &ContentItem,
    ) -> Result<(), RenderError>;
}

/// Request-scoped state threaded through every render call.
pub struct RenderContext<'e> {
    objects: &'e dyn ObjectRenderer,
    rich_text: RichTextStyles,
    instrument_fields: bool,
    attributes: IndexMap<String, Value>,
    contexts: Vec<String>,
}

impl<'e> RenderContext<'e> {
    /// Create a context over the host's generic object renderer.
    #[must_use]
    pub fn new(objects: &'e dyn ObjectRenderer) -> Self {
        Self {
            objects,
            rich_text: RichTextStyles::default(),
            instrument_fields: false,
            attributes: IndexMap::new(),
            contexts: Vec::new(),
        }
    }

    /// Attach the host's rich-text styling settings.
    #[must_use]
    pub fn with_rich_text_styles(mut self, styles: RichTextStyles) -> Self {
        self.rich_text = styles;
        self
    }

    /// Enable or disable field-access instrumentation (the editing-overlay
    /// mode, triggered by a request parameter such as `_fields=true`).
    #[must_use]
    pub fn with_field_instrumentation(mut self, enabled: bool) -> Self {
        self.instrument_fields = enabled;
        self
    }

    /// The generic object renderer.
    #[must_use]
    pub fn objects(&self) -> &'e dyn ObjectRenderer {
        self.objects
    }

    /// Whether field-access instrumentation is enabled.
    #[must_use]
    pub fn instrument_fields(&self) -> bool {
        self.instrument_fields
    }

    /// The rich-text styling settings.
    #[must_use]
    pub fn rich_text_styles(&self) -> &RichTextStyles {
        &self.rich_text
    }

    /// Read an ambient attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The full ambient attribute map, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Run `f` with `name` set to `value`, restoring the previous state on
    /// every exit path (the prior value reappears, or the entry vanishes if
    /// it did not exist before) - even when `f` fails.
    ///
    /// # Errors
    /// Whatever `f` returns.
    pub fn with_attribute<T>(
        &mut self,
        name: &str,
        value: Value,
        f: impl FnOnce(&mut Self) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        let previous = self.attributes.insert(name.to_owned(), value);
        let result = f(self);

        match previous {
            Some(old) => {
                let _ = self.attributes.insert(name.to_owned(), old);
            }
            None => {
                let _ = self.attributes.shift_remove(name);
            }
        }

        result
    }

    /// Run `f` with every entry of `overrides` set, restoring the previous
    /// values unconditionally afterward - even when `f` fails.
    ///
    /// # Errors
    /// Whatever `f` returns.
    pub fn with_attributes<T>(
        &mut self,
        overrides: &IndexMap<String, Value>,
        f: impl FnOnce(&mut Self) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        let mut previous: Vec<(String, Option<Value>)> = Vec::with_capacity(overrides.len());

        for (name, value) in overrides {
            previous.push((
                name.clone(),
                self.attributes.insert(name.clone(), value.clone()),
            ));
        }

        let result = f(self);

        for (name, old) in previous.into_iter().rev() {
            match old {
                Some(value) => {
                    let _ = self.attributes.insert(name, value);
                }
                None => {
                    let _ = self.attributes.shift_remove(&name);
                }
            }
        }

        result
    }

    /// The innermost context tag, if any.
    #[must_use]
    pub fn current_context(&self) -> Option<&str> {
        self.contexts.last().map(String::as_str)
    }

    /// Run `f` with `tag` pushed onto the context stack, popping it
    /// unconditionally afterward - even when `f` fails.
    ///
    /// # Errors
    /// Whatever `f` returns.
    pub fn with_context<T>(
        &mut self,
        tag: &str,
        f: impl FnOnce(&mut Self) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        self.contexts.push(tag.to_owned());
        let result = f(self);
        let _ = self.contexts.pop();
        result
    }
}
