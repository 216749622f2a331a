//! The HTML output sink.
//!
//! [`HtmlWriter`] wraps any [`fmt::Write`] target - the page response body
//! or an in-memory buffer for layout-buffered areas - and exposes the small
//! vocabulary the rendering pipeline needs. Text written with
//! [`HtmlWriter::text`] is escaped; markup that is already sanitized goes
//! through [`HtmlWriter::raw`] untouched.

use crate::grid::HtmlGrid;
use indexmap::IndexMap;
use std::fmt::{self, Write};
use trellis_common::{escape_html, warn_once};

/// Insertion-ordered HTML attribute map (name → value).
///
/// Slot attributes keep the order authors declared them in, and that order
/// survives into the emitted markup.
pub type Attributes = IndexMap<String, String>;

/// An HTML writing sink over any [`fmt::Write`] target.
///
/// Elements opened with [`HtmlWriter::start`] are tracked on an internal
/// stack so [`HtmlWriter::end`] closes the innermost open element.
pub struct HtmlWriter<'w> {
    out: &'w mut dyn Write,
    open: Vec<String>,
}

impl<'w> HtmlWriter<'w> {
    /// Create a writer over the given target.
    pub fn new(out: &'w mut (dyn Write + 'w)) -> Self {
        Self {
            out,
            open: Vec::new(),
        }
    }

    /// Open an element with the given attributes.
    ///
    /// Attribute values are escaped; names are written as-is.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn start(&mut self, tag: &str, attributes: &[(&str, &str)]) -> fmt::Result {
        self.out.write_char('<')?;
        self.out.write_str(tag)?;

        for (name, value) in attributes {
            self.attribute(name, value)?;
        }

        self.out.write_char('>')?;
        self.open.push(tag.to_owned());
        Ok(())
    }

    /// Open an element with an ordered attribute map.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn start_with(&mut self, tag: &str, attributes: &Attributes) -> fmt::Result {
        self.out.write_char('<')?;
        self.out.write_str(tag)?;

        for (name, value) in attributes {
            self.attribute(name, value)?;
        }

        self.out.write_char('>')?;
        self.open.push(tag.to_owned());
        Ok(())
    }

    fn attribute(&mut self, name: &str, value: &str) -> fmt::Result {
        write!(self.out, " {name}=\"{}\"", escape_html(value))
    }

    /// Close the innermost open element. A call without a matching
    /// [`HtmlWriter::start`] is ignored with an advisory.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn end(&mut self) -> fmt::Result {
        match self.open.pop() {
            Some(tag) => write!(self.out, "</{tag}>"),
            None => {
                warn_once("html", "end() without a matching start() was ignored");
                Ok(())
            }
        }
    }

    /// Write text, escaping it for HTML context.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn text(&mut self, text: &str) -> fmt::Result {
        self.out.write_str(&escape_html(text))
    }

    /// Write already-sanitized markup verbatim.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn raw(&mut self, markup: &str) -> fmt::Result {
        self.out.write_str(markup)
    }

    /// Write one CSS rule: a selector and its property block. Values are
    /// written raw.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn css(&mut self, selector: &str, properties: &[(&str, &str)]) -> fmt::Result {
        self.out.write_str(selector)?;
        self.out.write_char('{')?;

        for (name, value) in properties {
            write!(self.out, "{name}:{value};")?;
        }

        self.out.write_str("}\n")
    }

    /// Baseline CSS shared by every grid instance, emitted once per grid
    /// inside its instance stylesheet.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn write_common_grid_css(&mut self) -> fmt::Result {
        self.css(
            "._ga",
            &[
                ("min-width", "0"),
                ("min-height", "0"),
                ("position", "relative"),
            ],
        )
    }

    /// Grid CSS for one parsed layout, scoped by `selector`: the container
    /// rule (template areas plus row/column tracks) and one `grid-area`
    /// rule per named area.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn write_grid_css(&mut self, selector: &str, grid: &HtmlGrid) -> fmt::Result {
        self.out.write_str(selector)?;
        self.out.write_str("{display:grid;grid-template-areas:")?;

        for (index, row) in grid.rows().iter().enumerate() {
            if index > 0 {
                self.out.write_char(' ')?;
            }
            self.out.write_char('"')?;
            for (column, cell) in row.cells.iter().enumerate() {
                if column > 0 {
                    self.out.write_char(' ')?;
                }
                self.out.write_str(cell.as_deref().unwrap_or("."))?;
            }
            self.out.write_char('"')?;
        }
        self.out.write_char(';')?;

        if grid.rows().iter().any(|row| row.size.is_some()) {
            self.out.write_str("grid-template-rows:")?;
            for (index, row) in grid.rows().iter().enumerate() {
                if index > 0 {
                    self.out.write_char(' ')?;
                }
                self.out.write_str(row.size.as_deref().unwrap_or("auto"))?;
            }
            self.out.write_char(';')?;
        }

        if !grid.columns().is_empty() {
            self.out.write_str("grid-template-columns:")?;
            for (index, column) in grid.columns().iter().enumerate() {
                if index > 0 {
                    self.out.write_char(' ')?;
                }
                self.out.write_str(column)?;
            }
            self.out.write_char(';')?;
        }

        self.out.write_str("}\n")?;

        for area in grid.area_names() {
            writeln!(self.out, "{selector} > ._ga-{area}{{grid-area:{area};}}")?;
        }

        Ok(())
    }

    /// Place items into the areas of `grid`: one wrapper element per named
    /// area, in area order, with the `index`-th item rendered inside the
    /// `index`-th wrapper. Area order equals DOM order; no re-ordering
    /// happens here.
    ///
    /// # Errors
    /// Propagates sink failures and whatever `item` returns.
    pub fn write_grid<E, F>(&mut self, grid: &HtmlGrid, mut item: F) -> Result<(), E>
    where
        E: From<fmt::Error>,
        F: FnMut(&mut Self, usize) -> Result<(), E>,
    {
        for (index, area) in grid.area_names().iter().enumerate() {
            let class = format!("_ga _ga-{area}");
            self.start("div", &[("class", &class)])?;
            item(self, index)?;
            self.end()?;
        }

        Ok(())
    }
}
