//! Layout area buffering.

use indexmap::IndexMap;
use std::fmt;
use trellis_html::HtmlGrid;

/// The key a dispatched value is routed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaKey {
    /// An explicit area name (from a mapping key, a page area, a section,
    /// or the slot's configured area).
    Name(String),

    /// A 0-based position from a sequence dispatch.
    Index(usize),
}

impl AreaKey {
    /// Blank keys are dropped by buffered slots instead of overwriting an
    /// unnamed layout area.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Name(name) if name.trim().is_empty())
    }
}

impl fmt::Display for AreaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The areas mapping a parent layout exposes to nested slot renderers.
///
/// Slots that sit directly inside a layout buffer their output here
/// instead of streaming to the page; the layout consumes the mapping after
/// its own body has run and places each buffer into its grid.
#[derive(Debug, Default)]
pub struct LayoutContext {
    grid: Option<HtmlGrid>,
    areas: IndexMap<String, String>,
}

impl LayoutContext {
    /// Create a layout context without a grid (named keys only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout context over the layout's parsed grid, enabling
    /// positional key translation.
    #[must_use]
    pub fn with_grid(grid: HtmlGrid) -> Self {
        Self {
            grid: Some(grid),
            areas: IndexMap::new(),
        }
    }

    /// The buffered areas in insertion order.
    #[must_use]
    pub fn areas(&self) -> &IndexMap<String, String> {
        &self.areas
    }

    /// Mutable access for nested slots writing their buffers.
    pub fn areas_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.areas
    }

    /// Translate a raw area key into the grid-area name nested content
    /// should occupy: positional keys map through the layout's grid (the
    /// decimal index when out of range or without a grid); named keys map
    /// to themselves.
    #[must_use]
    pub fn area_name(&self, key: &AreaKey) -> String {
        match key {
            AreaKey::Name(name) => name.clone(),
            AreaKey::Index(index) => self
                .grid
                .as_ref()
                .and_then(|grid| grid.area_names().get(*index))
                .cloned()
                .unwrap_or_else(|| index.to_string()),
        }
    }

    /// Consume the context, yielding the buffered area mapping.
    #[must_use]
    pub fn into_areas(self) -> IndexMap<String, String> {
        self.areas
    }
}
