//! Referential rich-text resolution.
//!
//! Rich text is a mixed sequence of literal markup and references. The
//! resolver walks the sequence (or a marker-bounded slice of it), writing
//! literals through the empty-paragraph filter and delegating embedded
//! objects to the generic object renderer under their per-embed attribute
//! overrides.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::slot::TextSlice;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;
use trellis_content::{Reference, ReferenceTarget, ReferentialText, Segment, Value};
use trellis_html::HtmlWriter;

/// Paragraph elements whose only content is a non-breaking space - the
/// residue rich-text editors leave behind.
fn empty_paragraph_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)\s*<p[^>]*>\s*&nbsp;\s*</p>\s*").expect("pattern is valid")
    })
}

/// Resolve referential text into the writer, honoring the slice window.
///
/// The rich-text stylesheet is emitted once per invocation, ahead of the
/// segments. Literal segments are already-sanitized markup and are written
/// verbatim after the empty-paragraph filter. Marker and dangling
/// references render nothing. Object references render through the generic
/// object renderer, with their non-reserved attributes pushed into the
/// ambient scope for that one render and restored unconditionally
/// afterward - even when the embedded render fails.
///
/// # Errors
/// Propagates sink failures and embedded render failures.
pub fn resolve(
    ctx: &mut RenderContext<'_>,
    out: &mut HtmlWriter<'_>,
    text: &ReferentialText,
    slice: &TextSlice,
) -> Result<(), RenderError> {
    let selected = select(text.segments(), slice);

    ctx.rich_text_styles().write_css(out)?;

    for segment in selected {
        match segment {
            Segment::Text(markup) => {
                out.raw(&empty_paragraph_pattern().replace_all(markup, ""))?;
            }
            Segment::Reference(reference) => render_reference(ctx, out, reference)?,
        }
    }

    Ok(())
}

/// Compute the half-open segment range `[begin, end)` selected by the
/// slice. A failed marker lookup, or a begin at-or-after the end, selects
/// nothing - an empty render, not an error.
fn select<'t>(segments: &'t [Segment], slice: &TextSlice) -> &'t [Segment] {
    let begin_name = requested(slice.begin_marker.as_deref());
    let end_name = requested(slice.end_marker.as_deref());

    if segments.is_empty() || (begin_name.is_none() && end_name.is_none()) {
        return segments;
    }

    let begin = match begin_name {
        Some(name) => match find_marker(segments, name, slice.begin_offset) {
            Some(index) => index,
            None => return &[],
        },
        None => 0,
    };

    let end = match end_name {
        Some(name) => match find_marker(segments, name, slice.end_offset) {
            Some(index) => index,
            None => return &[],
        },
        None => segments.len(),
    };

    if begin >= end { &[] } else { &segments[begin..end] }
}

/// Blank marker names mean "no marker requested".
fn requested(marker: Option<&str>) -> Option<&str> {
    marker.filter(|name| !name.trim().is_empty())
}

/// Index of the `(offset + 1)`-th marker named `name`, scanning left to
/// right.
fn find_marker(segments: &[Segment], name: &str, offset: usize) -> Option<usize> {
    let mut seen = 0usize;

    for (index, segment) in segments.iter().enumerate() {
        if let Segment::Reference(reference) = segment
            && let ReferenceTarget::Marker(marker) = &reference.target
            && marker.internal_name == name
        {
            if seen == offset {
                return Some(index);
            }
            seen += 1;
        }
    }

    None
}

fn render_reference(
    ctx: &mut RenderContext<'_>,
    out: &mut HtmlWriter<'_>,
    reference: &Reference,
) -> Result<(), RenderError> {
    let ReferenceTarget::Object(item) = &reference.target else {
        // Markers are zero-width; dangling references render nothing.
        return Ok(());
    };

    let overrides: IndexMap<String, Value> = reference
        .attributes
        .iter()
        .filter(|(name, _)| !name.starts_with('_'))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    ctx.with_attributes(&overrides, |ctx| {
        let objects = ctx.objects();
        objects.render(ctx, out, item)
    })
}
