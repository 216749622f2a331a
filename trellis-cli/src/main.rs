//! Trellis CLI
//!
//! Renders a JSON content document (a grid configuration plus its items)
//! to HTML on stdout, for previewing layouts outside a host application.
//! See `demos/page.json` for the document shape.

use anyhow::{Context as _, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use trellis_common::clear_warnings;
use trellis_content::{ContentItem, Value, VecStream};
use trellis_html::HtmlWriter;
use trellis_render::{
    Grid, GridContext, GridLayout, ObjectRenderer, RenderContext, RenderError, RichTextStyles,
    Slot,
};

#[derive(Parser)]
#[command(name = "trellis", about = "Render a JSON content document to HTML")]
struct Args {
    /// Path to the JSON content document.
    document: PathBuf,

    /// Enable field-access instrumentation (the editing-overlay mode).
    #[arg(long)]
    fields: bool,
}

/// Top-level document shape.
#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    rich_text: RichTextStyles,
    grid: GridDocument,
    #[serde(default)]
    items: Vec<ContentItem>,
}

/// Persisted grid records, minus the style overrides (behavior, not data).
#[derive(Deserialize)]
struct GridDocument {
    id: String,
    layouts: Vec<GridLayout>,
    #[serde(default)]
    default_context: Option<String>,
    #[serde(default)]
    contexts: Vec<GridContext>,
}

/// Minimal generic object renderer: a wrapper element per item, scalar
/// fields as paragraphs, everything else through the shared resolver.
struct BasicRenderer;

impl ObjectRenderer for BasicRenderer {
    fn render(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut HtmlWriter<'_>,
        item: &ContentItem,
    ) -> Result<(), RenderError> {
        let class = format!("content content-{}", item.content_type());
        let context = ctx.current_context().map(str::to_owned);

        let mut attributes = vec![("class", class.as_str()), ("data-id", item.id())];
        if let Some(context) = context.as_deref() {
            attributes.push(("data-context", context));
        }
        out.start("div", &attributes)?;

        for (name, value) in item.fields() {
            match value {
                Value::Scalar(text) => {
                    let field_class = format!("field-{name}");
                    out.start("p", &[("class", &field_class)])?;
                    out.text(text)?;
                    out.end()?;
                }
                nested => {
                    let field_class = format!("field-{name} value-{}", nested.kind());
                    out.start("div", &[("class", &field_class)])?;
                    Slot::new().render_value(ctx, out, nested)?;
                    out.end()?;
                }
            }
        }

        out.end()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let document: Document =
        serde_json::from_str(&source).context("failed to parse the content document")?;

    clear_warnings();

    let stream = VecStream::new(document.items);
    let mut grid = Grid::new(document.grid.id, &stream);
    for layout in document.grid.layouts {
        grid = grid.with_layout(layout);
    }
    if let Some(context) = document.grid.default_context {
        grid = grid.with_default_context(context);
    }
    for context in document.grid.contexts {
        grid = grid.with_context(context);
    }

    grid.validate().context("grid failed validation")?;

    let renderer = BasicRenderer;
    let mut ctx = RenderContext::new(&renderer)
        .with_rich_text_styles(document.rich_text)
        .with_field_instrumentation(args.fields);

    let mut html = String::new();
    {
        let mut out = HtmlWriter::new(&mut html);
        grid.render(&mut ctx, &mut out)
            .context("grid failed to render")?;
    }

    println!("{html}");
    Ok(())
}
