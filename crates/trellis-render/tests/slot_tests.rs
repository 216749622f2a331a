//! Integration tests for content-slot rendering.

use indexmap::IndexMap;
use trellis_content::{ContentItem, PageArea, Section, Value};
use trellis_html::{HtmlGrid, HtmlWriter};
use trellis_render::{
    FIELD_ACCESS_BEGIN, GRID_AREA_ATTRIBUTE, LayoutContext, ObjectRenderer, RenderContext,
    RenderError, Slot,
};

/// Generic renderer that writes a compact `[type:id]` tag.
struct TagRenderer;

impl ObjectRenderer for TagRenderer {
    fn render(
        &self,
        _ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        item: &ContentItem,
    ) -> Result<(), RenderError> {
        out.raw(&format!("[{}:{}]", item.content_type(), item.id()))?;
        Ok(())
    }
}

/// Generic renderer that echoes the ambient grid-area attribute.
struct GridAreaEcho;

impl ObjectRenderer for GridAreaEcho {
    fn render(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        item: &ContentItem,
    ) -> Result<(), RenderError> {
        let area = match ctx.attribute(GRID_AREA_ATTRIBUTE) {
            Some(Value::Scalar(name)) => name.clone(),
            _ => "-".to_owned(),
        };
        out.raw(&format!("[{}@{area}]", item.id()))?;
        Ok(())
    }
}

/// Generic renderer that always fails.
struct FailingRenderer;

impl ObjectRenderer for FailingRenderer {
    fn render(
        &self,
        _ctx: &mut RenderContext<'_>,
        _out: &mut HtmlWriter<'_>,
        item: &ContentItem,
    ) -> Result<(), RenderError> {
        Err(RenderError::resolution(item, "no renderer registered"))
    }
}

#[test]
fn test_scalar_value_is_escaped() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render_value(&mut ctx, &mut out, &Value::from("a < b"))
            .expect("render should succeed");
    }

    assert_eq!(page, "a &lt; b");
}

#[test]
fn test_sequence_renders_in_input_order() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();
    let value = Value::Sequence(vec![
        Value::from("one"),
        Value::Object(ContentItem::new("a1", "article")),
    ]);

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render_value(&mut ctx, &mut out, &value)
            .expect("render should succeed");
    }

    assert_eq!(page, "one[article:a1]");
}

#[test]
fn test_mapping_discards_keys_in_direct_mode() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    let mut entries = IndexMap::new();
    let _ = entries.insert("first".to_owned(), Value::from("x"));
    let _ = entries.insert("second".to_owned(), Value::from("y"));

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render_value(&mut ctx, &mut out, &Value::Mapping(entries))
            .expect("render should succeed");
    }

    assert_eq!(page, "xy");
}

#[test]
fn test_value_present_skips_body() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render(&mut ctx, &mut out, Some(&Value::from("shown")), |_| {
                unreachable!("body must not run when a value is present")
            })
            .expect("render should succeed");
    }

    assert_eq!(page, "shown");
}

#[test]
fn test_blank_value_falls_back_to_body() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render(&mut ctx, &mut out, Some(&Value::from("   ")), |scope| {
                scope.writer().text("fallback")?;
                Ok(())
            })
            .expect("render should succeed");
    }

    assert_eq!(page, "fallback");
}

#[test]
fn test_attributes_wrap_direct_value() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .attribute("class", "promo")
            .attribute("data-slot", "x")
            .render_value(&mut ctx, &mut out, &Value::from("hi"))
            .expect("render should succeed");
    }

    assert_eq!(page, "<div class=\"promo\" data-slot=\"x\">hi</div>");
}

#[test]
fn test_attributes_wrap_direct_body() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .attribute("class", "promo")
            .render(&mut ctx, &mut out, None, |scope| {
                scope.writer().text("body")?;
                Ok(())
            })
            .expect("render should succeed");
    }

    assert_eq!(page, "<div class=\"promo\">body</div>");
}

#[test]
fn test_body_can_render_nested_values() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render(&mut ctx, &mut out, None, |scope| {
                assert!(!scope.context().instrument_fields());
                scope.value(&Value::Object(ContentItem::new("a1", "article")))
            })
            .expect("render should succeed");
    }

    assert_eq!(page, "[article:a1]");
}

#[test]
fn test_buffered_sequence_uses_positions_and_grid_names() {
    let renderer = GridAreaEcho;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout =
        LayoutContext::with_grid(HtmlGrid::parse("\"main rail\"").expect("template should parse"));
    let mut page = String::new();
    let value = Value::Sequence(vec![
        Value::Object(ContentItem::new("a1", "article")),
        Value::Object(ContentItem::new("a2", "article")),
    ]);

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render_value(&mut ctx, &mut out, &value)
            .expect("render should succeed");
    }

    // Everything buffered; nothing reaches the page directly.
    assert!(page.is_empty());
    assert_eq!(layout.areas().get("0").map(String::as_str), Some("[a1@main]"));
    assert_eq!(layout.areas().get("1").map(String::as_str), Some("[a2@rail]"));

    // The ambient grid-area override did not leak past the render.
    assert_eq!(ctx.attribute(GRID_AREA_ATTRIBUTE), None);
}

#[test]
fn test_buffered_mapping_uses_keys() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout = LayoutContext::new();
    let mut page = String::new();

    let mut entries = IndexMap::new();
    let _ = entries.insert("rail".to_owned(), Value::from("sidebar text"));

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render_value(&mut ctx, &mut out, &Value::Mapping(entries))
            .expect("render should succeed");
    }

    let areas = layout.into_areas();
    assert_eq!(areas.get("rail").map(String::as_str), Some("sidebar text"));
}

#[test]
fn test_page_area_unwraps_to_contents() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout = LayoutContext::new();
    let mut page = String::new();
    let value = Value::Area(PageArea::new("main", Value::from("inside")));

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render_value(&mut ctx, &mut out, &value)
            .expect("render should succeed");
    }

    assert_eq!(layout.areas().get("main").map(String::as_str), Some("inside"));
}

#[test]
fn test_section_renders_as_itself() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout = LayoutContext::new();
    let mut page = String::new();
    let value = Value::Section(Section::new("aside", ContentItem::new("s1", "sidebar")));

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render_value(&mut ctx, &mut out, &value)
            .expect("render should succeed");
    }

    assert_eq!(layout.areas().get("aside").map(String::as_str), Some("[sidebar:s1]"));
}

#[test]
fn test_scalar_without_area_is_dropped_in_buffered_mode() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout = LayoutContext::new();
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render_value(&mut ctx, &mut out, &Value::from("orphan"))
            .expect("render should succeed");
    }

    assert!(page.is_empty());
    assert!(layout.areas().is_empty());
}

#[test]
fn test_buffered_body_stored_under_area_with_wrapper() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout = LayoutContext::new();
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .area("main")
            .attribute("class", "x")
            .in_layout(&mut layout)
            .render(&mut ctx, &mut out, None, |scope| {
                scope.writer().text("body")?;
                Ok(())
            })
            .expect("render should succeed");
    }

    assert!(page.is_empty());
    assert_eq!(
        layout.areas().get("main").map(String::as_str),
        Some("<div class=\"x\">body</div>")
    );
}

#[test]
fn test_buffered_body_without_area_is_dropped() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let mut layout = LayoutContext::new();
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render(&mut ctx, &mut out, None, |scope| {
                scope.writer().text("lost")?;
                Ok(())
            })
            .expect("render should succeed");
    }

    assert!(layout.areas().is_empty());
}

#[test]
fn test_ambient_state_restored_when_nested_render_fails() {
    let renderer = FailingRenderer;
    let mut ctx = RenderContext::new(&renderer);
    let before = ctx.attributes().clone();
    let mut layout =
        LayoutContext::with_grid(HtmlGrid::parse("\"main\"").expect("template should parse"));
    let mut page = String::new();

    let mut entries = IndexMap::new();
    let _ = entries.insert(
        "main".to_owned(),
        Value::Object(ContentItem::new("a1", "article")),
    );

    let result = {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .in_layout(&mut layout)
            .render_value(&mut ctx, &mut out, &Value::Mapping(entries))
    };

    assert!(matches!(result, Err(RenderError::Resolution { .. })));
    assert_eq!(ctx.attributes(), &before);
    assert!(layout.areas().is_empty());
}

#[test]
fn test_field_instrumentation_round_trip() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer).with_field_instrumentation(true);
    let mut layout = LayoutContext::new();
    let mut page = String::new();
    let item = ContentItem::new("a1", "article").with_field("headline", "Hello");

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .area("main")
            .in_layout(&mut layout)
            .render(&mut ctx, &mut out, None, |scope| {
                if let Some(Value::Scalar(text)) = scope.field(&item, "headline") {
                    scope.writer().text(text)?;
                }
                Ok(())
            })
            .expect("render should succeed");
    }

    assert_eq!(
        layout.areas().get("main").map(String::as_str),
        Some("<span style=\"display: none;\" data-name=\"a1/headline\"></span>Hello")
    );
}

#[test]
fn test_unterminated_marker_in_body_is_preserved() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer).with_field_instrumentation(true);
    let mut layout = LayoutContext::new();
    let mut page = String::new();

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .area("main")
            .in_layout(&mut layout)
            .render(&mut ctx, &mut out, None, |scope| {
                scope.writer().raw(FIELD_ACCESS_BEGIN)?;
                scope.writer().raw("stray")?;
                Ok(())
            })
            .expect("render should succeed");
    }

    let expected = format!("{FIELD_ACCESS_BEGIN}stray");
    assert_eq!(layout.areas().get("main"), Some(&expected));
}

#[test]
fn test_no_instrumentation_in_direct_mode() {
    let renderer = TagRenderer;
    let mut ctx = RenderContext::new(&renderer).with_field_instrumentation(true);
    let mut page = String::new();
    let item = ContentItem::new("a1", "article").with_field("headline", "Hello");

    {
        let mut out = HtmlWriter::new(&mut page);
        Slot::new()
            .render(&mut ctx, &mut out, None, |scope| {
                if let Some(Value::Scalar(text)) = scope.field(&item, "headline") {
                    scope.writer().text(text)?;
                }
                Ok(())
            })
            .expect("render should succeed");
    }

    assert_eq!(page, "Hello");
}
