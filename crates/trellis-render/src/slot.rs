//! Content-slot rendering.
//!
//! A slot renders one value into one or more named areas. Two modes exist,
//! chosen by whether the slot was constructed with an enclosing
//! [`LayoutContext`]:
//!
//! - *Direct*: output streams straight to the page sink, wrapped in a
//!   container element when dynamic attributes were supplied.
//! - *Area-buffered*: output renders into a string buffer that is stored
//!   into the layout's area mapping under the slot's area name; the layout
//!   places the buffers into its grid after its own body has run.
//!
//! When the slot's value is absent or blank, its body closure evaluates
//! instead - the tag-body fallback. Buffered bodies optionally carry
//! field-access instrumentation for the inline-editing overlay.

use crate::context::{GRID_AREA_ATTRIBUTE, RenderContext};
use crate::error::RenderError;
use crate::layout::{AreaKey, LayoutContext};
use crate::markers::{field_access_marker, rewrite_field_markers};
use crate::referential;
use trellis_common::warn_once;
use trellis_content::{ContentItem, Value};
use trellis_html::{Attributes, HtmlWriter};

/// Slice window applied when a slot renders referential text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSlice {
    /// Marker name opening the window; blank or absent means the start of
    /// the text.
    pub begin_marker: Option<String>,

    /// 0-based occurrence of the begin marker to match.
    pub begin_offset: usize,

    /// Marker name closing the window; blank or absent means the end of
    /// the text.
    pub end_marker: Option<String>,

    /// 0-based occurrence of the end marker to match.
    pub end_offset: usize,
}

/// Scope handed to a slot body while it evaluates.
///
/// Bundles the active writer with the render context so field reads can be
/// observed for editing instrumentation. Capture state lives only as long
/// as the scope, so instrumentation can never leak into sibling renders -
/// teardown is structural, not a finally-block convention.
pub struct BodyScope<'s, 'e, 'w> {
    ctx: &'s mut RenderContext<'e>,
    out: &'s mut HtmlWriter<'w>,
    capture: bool,
}

impl<'e, 'w> BodyScope<'_, 'e, 'w> {
    /// The active render context.
    pub fn context(&mut self) -> &mut RenderContext<'e> {
        &mut *self.ctx
    }

    /// The active writer.
    pub fn writer(&mut self) -> &mut HtmlWriter<'w> {
        &mut *self.out
    }

    /// Read a field from `item`, recording the access when instrumentation
    /// is active. The invisible marker lands in the buffered body ahead of
    /// whatever the caller writes for the field's value.
    pub fn field<'i>(&mut self, item: &'i ContentItem, name: &str) -> Option<&'i Value> {
        if self.capture {
            // Writing into the body buffer cannot fail.
            let _ = self.out.raw(&field_access_marker(item.id(), name));
        }

        item.field(name)
    }

    /// Render a nested value through the shared resolver, under the same
    /// rules as a value-bearing slot in direct mode.
    ///
    /// # Errors
    /// Propagates nested render failures.
    pub fn value(&mut self, value: &Value) -> Result<(), RenderError> {
        write_value(self.ctx, self.out, &TextSlice::default(), value)
    }
}

/// A content slot.
///
/// Configure with the builder methods, then call [`Slot::render`] (or
/// [`Slot::render_value`]) exactly once.
#[derive(Default)]
pub struct Slot<'l> {
    area: Option<String>,
    attributes: Attributes,
    slice: TextSlice,
    layout: Option<&'l mut LayoutContext>,
}

impl<'l> Slot<'l> {
    /// Create a slot with no area, attributes, slice window, or enclosing
    /// layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit area name used for scalar dispatch and buffered
    /// body output.
    #[must_use]
    pub fn area(mut self, name: impl Into<String>) -> Self {
        self.area = Some(name.into());
        self
    }

    /// Append a dynamic attribute for the slot's wrapper element, keeping
    /// insertion order.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the rich-text slice window.
    #[must_use]
    pub fn slice(mut self, slice: TextSlice) -> Self {
        self.slice = slice;
        self
    }

    /// Thread the nearest enclosing layout context, switching the slot into
    /// area-buffered mode. Pass the layout only when no other slot sits
    /// between it and this one (the nearest-ancestor rule).
    #[must_use]
    pub fn in_layout(mut self, layout: &'l mut LayoutContext) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Render `value`, falling back to the `body` closure when the value is
    /// absent or blank.
    ///
    /// A present value dispatches by variant: mappings fan out under their
    /// keys, sequences under their positions, page areas and sections under
    /// their internal names, and everything else under the slot's
    /// configured area.
    ///
    /// # Errors
    /// Propagates the first failure; ambient state is restored regardless.
    pub fn render<F>(
        mut self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        value: Option<&Value>,
        body: F,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(&mut BodyScope<'_, '_, '_>) -> Result<(), RenderError>,
    {
        match value {
            Some(present) if !present.is_blank() => self.dispatch(ctx, out, present),
            _ => self.render_body(ctx, out, body),
        }
    }

    /// Render a value-bearing slot with no body fallback.
    ///
    /// # Errors
    /// Propagates the first failure; ambient state is restored regardless.
    pub fn render_value(
        self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        value: &Value,
    ) -> Result<(), RenderError> {
        self.render(ctx, out, Some(value), |_| Ok(()))
    }

    fn dispatch(
        &mut self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        value: &Value,
    ) -> Result<(), RenderError> {
        match value {
            Value::Mapping(entries) => {
                for (key, entry) in entries {
                    self.write_area(ctx, out, AreaKey::Name(key.clone()), entry)?;
                }
                Ok(())
            }
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.write_area(ctx, out, AreaKey::Index(index), item)?;
                }
                Ok(())
            }
            Value::Area(area) => {
                let key = AreaKey::Name(area.internal_name.clone());
                self.write_area(ctx, out, key, &area.contents)
            }
            Value::Section(section) => {
                let key = AreaKey::Name(section.internal_name.clone());
                self.write_area(ctx, out, key, value)
            }
            Value::RichText(_) | Value::Scalar(_) | Value::Object(_) => {
                let key = AreaKey::Name(self.area.clone().unwrap_or_default());
                self.write_area(ctx, out, key, value)
            }
        }
    }

    /// Route one value under one area key, honoring the buffered-vs-direct
    /// split. In buffered mode the layout's translated grid-area name is
    /// visible to nested renders as the ambient `gridArea` attribute for
    /// exactly the duration of this area.
    fn write_area(
        &mut self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        key: AreaKey,
        value: &Value,
    ) -> Result<(), RenderError> {
        if let Some(layout) = self.layout.as_deref_mut() {
            if key.is_blank() {
                return Ok(());
            }

            let grid_area = layout.area_name(&key);
            let attributes = &self.attributes;
            let slice = &self.slice;
            let mut buffer = String::new();

            ctx.with_attribute(GRID_AREA_ATTRIBUTE, Value::Scalar(grid_area), |ctx| {
                let mut writer = HtmlWriter::new(&mut buffer);
                write_value_with_attributes(ctx, &mut writer, attributes, slice, value)
            })?;

            let _ = layout.areas_mut().insert(key.to_string(), buffer);
            Ok(())
        } else {
            write_value_with_attributes(ctx, out, &self.attributes, &self.slice, value)
        }
    }

    fn render_body<F>(
        &mut self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        body: F,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(&mut BodyScope<'_, '_, '_>) -> Result<(), RenderError>,
    {
        if let Some(layout) = self.layout.as_deref_mut() {
            // Area-buffered: evaluate into a string, then hand the result
            // to the layout.
            let capture = ctx.instrument_fields();
            let mut buffer = String::new();

            {
                let mut writer = HtmlWriter::new(&mut buffer);
                let mut scope = BodyScope {
                    ctx: &mut *ctx,
                    out: &mut writer,
                    capture,
                };
                body(&mut scope)?;
            }

            let mut rendered = if capture {
                rewrite_field_markers(&buffer)
            } else {
                buffer
            };

            match self.area.as_deref().filter(|name| !name.trim().is_empty()) {
                Some(area) => {
                    if !self.attributes.is_empty() {
                        let mut wrapped = String::new();
                        let mut writer = HtmlWriter::new(&mut wrapped);
                        writer.start_with("div", &self.attributes)?;
                        writer.raw(&rendered)?;
                        writer.end()?;
                        rendered = wrapped;
                    }

                    let _ = layout.areas_mut().insert(area.to_owned(), rendered);
                }
                None => {
                    warn_once("slot", "buffered slot body without an area name was dropped");
                }
            }

            Ok(())
        } else {
            // Direct: stream to the page, wrapped when attributes are
            // present. Instrumentation applies only to buffered bodies.
            if !self.attributes.is_empty() {
                out.start_with("div", &self.attributes)?;
            }

            let mut scope = BodyScope {
                ctx: &mut *ctx,
                out: &mut *out,
                capture: false,
            };
            body(&mut scope)?;

            if !self.attributes.is_empty() {
                out.end()?;
            }

            Ok(())
        }
    }
}

fn write_value_with_attributes(
    ctx: &mut RenderContext<'_>,
    out: &mut HtmlWriter<'_>,
    attributes: &Attributes,
    slice: &TextSlice,
    value: &Value,
) -> Result<(), RenderError> {
    if attributes.is_empty() {
        write_value(ctx, out, slice, value)
    } else {
        out.start_with("div", attributes)?;
        write_value(ctx, out, slice, value)?;
        out.end()?;
        Ok(())
    }
}

/// The recursive value resolver shared by value-bearing slots, buffered
/// bodies, and nested renders. One branch per variant.
pub(crate) fn write_value(
    ctx: &mut RenderContext<'_>,
    out: &mut HtmlWriter<'_>,
    slice: &TextSlice,
    value: &Value,
) -> Result<(), RenderError> {
    match value {
        Value::RichText(text) => referential::resolve(ctx, out, text, slice),
        Value::Mapping(entries) => {
            for entry in entries.values() {
                write_value(ctx, out, slice, entry)?;
            }
            Ok(())
        }
        Value::Sequence(items) => {
            for item in items {
                write_value(ctx, out, slice, item)?;
            }
            Ok(())
        }
        Value::Area(area) => write_value(ctx, out, slice, &area.contents),
        Value::Scalar(text) => {
            out.text(text)?;
            Ok(())
        }
        Value::Section(section) => {
            let objects = ctx.objects();
            objects.render(ctx, out, &section.item)
        }
        Value::Object(item) => {
            let objects = ctx.objects();
            objects.render(ctx, out, item)
        }
    }
}
