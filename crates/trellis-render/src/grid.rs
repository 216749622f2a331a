//! Grid composition.
//!
//! A grid content object pairs an external content stream with one or more
//! responsive layout templates, positional context assignments, and
//! per-type style overrides. Rendering emits every layout's CSS (each
//! scoped by its own prefix selector, so the right one activates per
//! breakpoint client-side) but structures the markup around the layout
//! with the most areas, which also bounds how many items are fetched.

use crate::context::RenderContext;
use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use trellis_common::warn_once;
use trellis_content::{ContentItem, ContentStream, ContentType};
use trellis_html::{HtmlGrid, HtmlWriter};

/// One responsive layout: a grid template plus an optional CSS scoping
/// prefix (typically a breakpoint class on a page ancestor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Grid template source, parsed eagerly at save time.
    pub template: String,
    /// Optional selector prefix scoping this layout's CSS.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl GridLayout {
    /// Create a layout without a prefix.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            prefix: None,
        }
    }

    /// Attach a scoping prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Maps positional content indices to a named rendering context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridContext {
    /// Context tag applied to the mapped positions.
    pub context: String,
    /// 0-based content positions this tag covers.
    pub areas: BTreeSet<usize>,
}

impl GridContext {
    /// Create a context assignment.
    #[must_use]
    pub fn new(context: impl Into<String>, areas: impl IntoIterator<Item = usize>) -> Self {
        Self {
            context: context.into(),
            areas: areas.into_iter().collect(),
        }
    }
}

/// Custom CSS and HTML writer attached to a grid style.
pub trait StyleRenderer {
    /// Write the style's CSS rules, inside the per-item style element.
    ///
    /// # Errors
    /// Propagates sink failures; a failure aborts the whole grid render.
    fn write_css(&self, out: &mut HtmlWriter<'_>) -> Result<(), RenderError>;

    /// Write the item's HTML.
    ///
    /// # Errors
    /// Propagates sink and resolution failures; a failure aborts the whole
    /// grid render.
    fn write_html(&self, out: &mut HtmlWriter<'_>, item: &ContentItem) -> Result<(), RenderError>;
}

/// Per-type style override. The first list entry whose type matches and
/// whose context is blank or equal to the item's resolved context wins;
/// list order is significant.
pub struct GridStyle {
    /// Content type this style applies to.
    pub content_type: ContentType,
    /// Optional context restriction; blank matches any context.
    pub context: Option<String>,
    /// The style's CSS and HTML writer.
    pub style: Box<dyn StyleRenderer>,
}

impl GridStyle {
    /// Create a style override for a content type.
    #[must_use]
    pub fn new(content_type: impl Into<ContentType>, style: Box<dyn StyleRenderer>) -> Self {
        Self {
            content_type: content_type.into(),
            context: None,
            style,
        }
    }

    /// Restrict the style to a rendering context.
    #[must_use]
    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Debug for GridStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridStyle")
            .field("content_type", &self.content_type)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// A grid content object.
///
/// Layouts, contexts, and styles are the persisted records mutated by the
/// admin editor; [`Grid::validate`] runs before save so a malformed
/// template never reaches a live render.
pub struct Grid<'c> {
    id: String,
    contents: &'c dyn ContentStream,
    layouts: Vec<GridLayout>,
    default_context: Option<String>,
    contexts: Vec<GridContext>,
    styles: Vec<GridStyle>,
}

impl<'c> Grid<'c> {
    /// Create a grid over an external content stream.
    #[must_use]
    pub fn new(id: impl Into<String>, contents: &'c dyn ContentStream) -> Self {
        Self {
            id: id.into(),
            contents,
            layouts: Vec::new(),
            default_context: None,
            contexts: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Append a layout.
    #[must_use]
    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layouts.push(layout);
        self
    }

    /// Set the context applied to positions no [`GridContext`] covers.
    #[must_use]
    pub fn with_default_context(mut self, context: impl Into<String>) -> Self {
        self.default_context = Some(context.into());
        self
    }

    /// Append a positional context assignment.
    #[must_use]
    pub fn with_context(mut self, context: GridContext) -> Self {
        self.contexts.push(context);
        self
    }

    /// Append a style override.
    #[must_use]
    pub fn with_style(mut self, style: GridStyle) -> Self {
        self.styles.push(style);
        self
    }

    /// Save-time validation: the grid must have at least one layout, and
    /// every layout template must parse.
    ///
    /// # Errors
    /// The first malformed template, or [`RenderError::NoLayouts`].
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.layouts.is_empty() {
            return Err(RenderError::NoLayouts {
                id: self.id.clone(),
            });
        }

        for layout in &self.layouts {
            let _ = HtmlGrid::parse(&layout.template)?;
        }

        Ok(())
    }

    /// Render the grid.
    ///
    /// Emits one `<style>` element with the baseline grid CSS and every
    /// layout's scoped grid CSS, fetches as many items as the largest
    /// layout has areas (ties broken by first-seen order), and places the
    /// i-th item into the i-th area of that layout, each rendered under its
    /// resolved context through its style override or the generic object
    /// renderer.
    ///
    /// # Errors
    /// Propagates template, stream, sink, and renderer failures; any item
    /// failure aborts the whole grid render.
    pub fn render(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
    ) -> Result<(), RenderError> {
        let css_class = format!("_gl-{}", self.id);
        let mut bounding: Option<HtmlGrid> = None;

        out.start("style", &[("type", "text/css")])?;
        out.write_common_grid_css()?;

        for layout in &self.layouts {
            let grid = HtmlGrid::parse(&layout.template)?;

            let selector = match layout.prefix.as_deref().filter(|p| !p.trim().is_empty()) {
                Some(prefix) => format!("{prefix} .{css_class}"),
                None => format!(".{css_class}"),
            };
            out.write_grid_css(&selector, &grid)?;

            if bounding
                .as_ref()
                .is_none_or(|largest| largest.area_count() < grid.area_count())
            {
                bounding = Some(grid);
            }
        }

        out.end()?;

        let Some(bounding) = bounding else {
            return Err(RenderError::NoLayouts {
                id: self.id.clone(),
            });
        };

        let mut context_by_position: HashMap<usize, &str> = HashMap::new();
        for assignment in &self.contexts {
            for &position in &assignment.areas {
                let _ = context_by_position.insert(position, assignment.context.as_str());
            }
        }

        let max_size = bounding.area_count();
        let items = self.contents.fetch(0, max_size)?;

        if items.len() < max_size {
            warn_once(
                "grid",
                &format!("grid {} filled {} of {} areas", self.id, items.len(), max_size),
            );
        }

        out.start("div", &[("class", &css_class)])?;
        out.write_grid(&bounding, |out, index| match items.get(index) {
            Some(item) => {
                let context = match context_by_position.get(&index) {
                    Some(tag) => Some(*tag),
                    None => self.default_context.as_deref(),
                };
                self.render_item(ctx, out, item, context)
            }
            None => Ok(()),
        })?;
        out.end()?;

        Ok(())
    }

    /// Render one item under its resolved context. The context tag is
    /// pushed for exactly the duration of the item and popped
    /// unconditionally.
    fn render_item(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        item: &ContentItem,
        context: Option<&str>,
    ) -> Result<(), RenderError> {
        match context.filter(|tag| !tag.trim().is_empty()) {
            Some(tag) => ctx.with_context(tag, |ctx| self.write_item(ctx, out, item, Some(tag))),
            None => self.write_item(ctx, out, item, None),
        }
    }

    fn write_item(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        item: &ContentItem,
        context: Option<&str>,
    ) -> Result<(), RenderError> {
        let style = self.styles.iter().find(|candidate| {
            candidate.content_type == *item.content_type()
                && candidate
                    .context
                    .as_deref()
                    .filter(|tag| !tag.trim().is_empty())
                    .is_none_or(|tag| Some(tag) == context)
        });

        match style {
            Some(style) => {
                out.start("style", &[("type", "text/css")])?;
                // Editing affordance: overlay targets ease in and out.
                out.css(
                    "._ga, [data-name]",
                    &[
                        ("-webkit-transition", "all 0.4s ease"),
                        ("transition", "all 0.4s ease"),
                    ],
                )?;
                style.style.write_css(out)?;
                out.end()?;

                style.style.write_html(out, item)
            }
            None => {
                let objects = ctx.objects();
                objects.render(ctx, out, item)
            }
        }
    }
}

impl fmt::Debug for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("layouts", &self.layouts)
            .field("default_context", &self.default_context)
            .field("contexts", &self.contexts)
            .field("styles", &self.styles)
            .finish_non_exhaustive()
    }
}
