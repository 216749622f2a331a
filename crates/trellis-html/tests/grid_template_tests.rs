//! Integration tests for grid-template parsing.

use trellis_html::{GridParseError, HtmlGrid};

#[test]
fn test_quoted_template_with_tracks() {
    let grid = HtmlGrid::parse("\"hero hero\" 2fr \"rail main\" 1fr / 1fr 3fr")
        .expect("template should parse");

    assert_eq!(grid.area_count(), 3);
    assert_eq!(grid.area_names(), ["hero", "rail", "main"]);
    assert_eq!(grid.columns(), ["1fr", "3fr"]);
    assert_eq!(grid.rows()[0].size.as_deref(), Some("2fr"));
    assert_eq!(grid.rows()[1].size.as_deref(), Some("1fr"));
}

#[test]
fn test_bare_template_lines() {
    let grid = HtmlGrid::parse("hero hero\nrail main\n/ 1fr 2fr").expect("template should parse");

    assert_eq!(grid.area_count(), 3);
    assert_eq!(grid.area_names(), ["hero", "rail", "main"]);
    assert_eq!(grid.columns(), ["1fr", "2fr"]);
    assert_eq!(grid.rows()[0].size, None);
}

#[test]
fn test_null_cells_are_not_areas() {
    let grid = HtmlGrid::parse("\"a . b\" \"a . b\"").expect("template should parse");

    assert_eq!(grid.area_names(), ["a", "b"]);
    assert_eq!(grid.rows()[0].cells[1], None);
}

#[test]
fn test_spanning_area_counts_once() {
    let grid = HtmlGrid::parse("\"a a\" \"a a\"").expect("template should parse");

    assert_eq!(grid.area_count(), 1);
    assert_eq!(grid.area_names(), ["a"]);
}

#[test]
fn test_area_order_is_first_appearance() {
    let grid = HtmlGrid::parse("\"z y\" \"x y\"").expect("template should parse");

    assert_eq!(grid.area_names(), ["z", "y", "x"]);
}

#[test]
fn test_empty_template_rejected() {
    assert_eq!(HtmlGrid::parse(""), Err(GridParseError::Empty));
    assert_eq!(HtmlGrid::parse("   \n  "), Err(GridParseError::Empty));
    assert_eq!(HtmlGrid::parse("\"\""), Err(GridParseError::Empty));
}

#[test]
fn test_ragged_rows_rejected() {
    let result = HtmlGrid::parse("\"a b\" \"c\"");

    assert_eq!(
        result,
        Err(GridParseError::RaggedRow {
            row: 2,
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn test_unterminated_row_rejected() {
    let result = HtmlGrid::parse("\"a b");

    assert_eq!(result, Err(GridParseError::UnterminatedRow { row: 1 }));
}

#[test]
fn test_non_rectangular_area_rejected() {
    let result = HtmlGrid::parse("\"a a\" \"b a\"");

    assert_eq!(
        result,
        Err(GridParseError::NonRectangular {
            area: "a".to_owned(),
        })
    );
}

#[test]
fn test_column_count_mismatch_rejected() {
    let result = HtmlGrid::parse("\"a b\" / 1fr 1fr 1fr");

    assert_eq!(
        result,
        Err(GridParseError::ColumnCountMismatch {
            expected: 2,
            found: 3,
        })
    );
}

#[test]
fn test_invalid_area_name_rejected() {
    let result = HtmlGrid::parse("\"2col main\"");

    assert_eq!(
        result,
        Err(GridParseError::InvalidAreaName {
            name: "2col".to_owned(),
        })
    );
}

#[test]
fn test_rows_after_columns_line_rejected() {
    let result = HtmlGrid::parse("a b\n/ 1fr 1fr\nc d");

    assert!(matches!(result, Err(GridParseError::Unexpected { .. })));
}
