//! CSS grid-template parsing.
//!
//! [§ 7.4 grid-template-areas](https://www.w3.org/TR/css-grid-1/#grid-template-areas-property)
//!
//! Layout records store their grid as a textual template. Two spellings are
//! accepted:
//!
//! ```text
//! "hero   hero" 2fr
//! "rail   main" 1fr
//! / 1fr 3fr
//! ```
//!
//! or the bare form without track sizes:
//!
//! ```text
//! hero hero
//! rail main
//! ```
//!
//! Parsing is eager: persisted layouts are validated at save time, so a
//! malformed template never reaches rendering.

use thiserror::Error;

/// Errors produced while parsing a grid template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    /// The template contains no rows (or only empty ones).
    #[error("grid template has no rows")]
    Empty,

    /// A quoted row is missing its closing quote.
    #[error("row {row} is missing a closing quote")]
    UnterminatedRow {
        /// 1-based row number.
        row: usize,
    },

    /// A row has a different cell count than the first row.
    ///
    /// "All strings must have the same number of columns, or else the
    /// declaration is invalid."
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// 1-based row number.
        row: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of this row.
        found: usize,
    },

    /// A named area's cells do not cover a single rectangle.
    ///
    /// "Non-rectangular or disconnected regions" make the declaration
    /// invalid.
    #[error("area '{area}' does not form a rectangle")]
    NonRectangular {
        /// The offending area name.
        area: String,
    },

    /// A cell token is not a valid area name.
    #[error("'{name}' is not a valid area name")]
    InvalidAreaName {
        /// The offending token.
        name: String,
    },

    /// The `/` columns line has the wrong number of track sizes.
    #[error("columns line has {found} track sizes, expected {expected}")]
    ColumnCountMismatch {
        /// Cell count of each row.
        expected: usize,
        /// Track sizes found after `/`.
        found: usize,
    },

    /// Input that is neither a row, a track size, nor a columns line.
    #[error("unexpected input near row {row}")]
    Unexpected {
        /// 1-based row number where parsing stopped.
        row: usize,
    },
}

/// One parsed template row: cells in column order plus an optional row
/// track size. `None` cells are the `.` null cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Area name per column, `None` for a null cell.
    pub cells: Vec<Option<String>>,
    /// Row track size, when the template spelled one.
    pub size: Option<String>,
}

/// A parsed grid template: rows, column track sizes, and the named areas in
/// first-appearance order.
///
/// Area order is load-bearing: the grid markup primitive places the i-th
/// content item into the i-th area, and positional area keys resolve
/// through the same ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlGrid {
    rows: Vec<GridRow>,
    columns: Vec<String>,
    areas: Vec<String>,
}

impl HtmlGrid {
    /// Parse a grid template.
    ///
    /// # Errors
    ///
    /// Returns a [`GridParseError`] when the template is empty, a row is
    /// ragged or unterminated, a named area is not rectangular, a cell
    /// token is not a valid name, or the columns line does not match the
    /// row width.
    pub fn parse(template: &str) -> Result<Self, GridParseError> {
        let (rows, columns) = if template.contains('"') {
            parse_quoted(template)?
        } else {
            parse_bare(template)?
        };

        let width = rows.first().map_or(0, |row| row.cells.len());

        if width == 0 {
            return Err(GridParseError::Empty);
        }

        for (index, row) in rows.iter().enumerate() {
            if row.cells.len() != width {
                return Err(GridParseError::RaggedRow {
                    row: index + 1,
                    expected: width,
                    found: row.cells.len(),
                });
            }
        }

        if !columns.is_empty() && columns.len() != width {
            return Err(GridParseError::ColumnCountMismatch {
                expected: width,
                found: columns.len(),
            });
        }

        let areas = collect_areas(&rows)?;

        Ok(Self {
            rows,
            columns,
            areas,
        })
    }

    /// Number of distinct named areas.
    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Named areas in first-appearance (row-major) order.
    #[must_use]
    pub fn area_names(&self) -> &[String] {
        &self.areas
    }

    /// Parsed rows in template order.
    #[must_use]
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Column track sizes from the `/` line, empty when none was given.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Parse the quoted spelling: `"a b" size ... / cols`.
fn parse_quoted(template: &str) -> Result<(Vec<GridRow>, Vec<String>), GridParseError> {
    let mut rows: Vec<GridRow> = Vec::new();
    let mut columns = Vec::new();
    let mut rest = template.trim_start();

    while !rest.is_empty() {
        if let Some(after_quote) = rest.strip_prefix('"') {
            let row = rows.len() + 1;
            let Some(close) = after_quote.find('"') else {
                return Err(GridParseError::UnterminatedRow { row });
            };

            let cells = parse_cells(&after_quote[..close])?;
            rest = after_quote[close + 1..].trim_start();

            // Whatever sits between this row and the next (or the columns
            // line) is the row's track size.
            let size_end = rest.find(['"', '/']).unwrap_or(rest.len());
            let size = rest[..size_end].trim();
            rows.push(GridRow {
                cells,
                size: (!size.is_empty()).then(|| size.to_owned()),
            });
            rest = rest[size_end..].trim_start();
        } else if let Some(after_slash) = rest.strip_prefix('/') {
            columns = after_slash
                .split_whitespace()
                .map(str::to_owned)
                .collect();
            rest = "";
        } else {
            return Err(GridParseError::Unexpected {
                row: rows.len() + 1,
            });
        }
    }

    Ok((rows, columns))
}

/// Parse the bare spelling: one row of cells per line, optionally a final
/// `/ cols` line.
fn parse_bare(template: &str) -> Result<(Vec<GridRow>, Vec<String>), GridParseError> {
    let mut rows: Vec<GridRow> = Vec::new();
    let mut columns = Vec::new();

    for line in template.lines() {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if !columns.is_empty() {
            // Rows after the columns line.
            return Err(GridParseError::Unexpected {
                row: rows.len() + 1,
            });
        }

        if let Some(after_slash) = line.strip_prefix('/') {
            columns = after_slash
                .split_whitespace()
                .map(str::to_owned)
                .collect();
        } else {
            rows.push(GridRow {
                cells: parse_cells(line)?,
                size: None,
            });
        }
    }

    Ok((rows, columns))
}

/// Split one row into cells, mapping `.` to the null cell.
fn parse_cells(row: &str) -> Result<Vec<Option<String>>, GridParseError> {
    row.split_whitespace()
        .map(|token| {
            if token == "." {
                Ok(None)
            } else if is_area_name(token) {
                Ok(Some(token.to_owned()))
            } else {
                Err(GridParseError::InvalidAreaName {
                    name: token.to_owned(),
                })
            }
        })
        .collect()
}

/// Area names follow custom-ident rules, restricted to the ASCII subset the
/// admin editor produces.
fn is_area_name(token: &str) -> bool {
    let mut chars = token.chars();

    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Collect named areas in first-appearance order, verifying each covers a
/// rectangle.
fn collect_areas(rows: &[GridRow]) -> Result<Vec<String>, GridParseError> {
    let mut areas: Vec<String> = Vec::new();

    for row in rows {
        for cell in row.cells.iter().flatten() {
            if !areas.contains(cell) {
                areas.push(cell.clone());
            }
        }
    }

    for area in &areas {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        let mut count = 0usize;

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                if cell.as_deref() == Some(area.as_str()) {
                    count += 1;
                    bounds = Some(match bounds {
                        None => (r, r, c, c),
                        Some((top, bottom, left, right)) => {
                            (top.min(r), bottom.max(r), left.min(c), right.max(c))
                        }
                    });
                }
            }
        }

        if let Some((top, bottom, left, right)) = bounds
            && count != (bottom - top + 1) * (right - left + 1)
        {
            return Err(GridParseError::NonRectangular { area: area.clone() });
        }
    }

    Ok(areas)
}
