//! Invisible field-access markers for the inline-editing overlay.
//!
//! While a buffered slot body evaluates with instrumentation enabled,
//! every field read appends a complete marker: the BEGIN sentinel, the
//! escaped object id, a slash, the escaped field name, and the END
//! sentinel. The sentinels are private-use-area characters chosen to be
//! extremely unlikely to collide with real content. After evaluation,
//! [`rewrite_field_markers`] turns each complete pair into a hidden element
//! the editing overlay can locate.
//!
//! An unterminated BEGIN passes through as literal text. That is a
//! deliberate lenient policy - content is never lost to a stray sentinel,
//! at the cost of leaking sentinel characters when real content happens to
//! contain them.

use trellis_common::{escape_html, warn_once};

/// Opening sentinel of a field-access marker.
pub const FIELD_ACCESS_BEGIN: &str = "\u{e014}\u{e027}\u{e041}";

/// Closing sentinel of a field-access marker.
pub const FIELD_ACCESS_END: &str = "\u{e068}\u{e077}\u{e063}";

/// Encode one field access as an invisible marker.
#[must_use]
pub fn field_access_marker(id: &str, field: &str) -> String {
    format!(
        "{FIELD_ACCESS_BEGIN}{}/{}{FIELD_ACCESS_END}",
        escape_html(id),
        escape_html(field)
    )
}

/// Rewrite every complete marker pair in `body` into a hidden marker
/// element carrying the `id/field` payload in `data-name`. An unterminated
/// BEGIN is preserved verbatim.
#[must_use]
pub fn rewrite_field_markers(body: &str) -> String {
    let mut rewritten = String::with_capacity(body.len());
    let mut end_at = 0usize;

    while let Some(found) = body[end_at..].find(FIELD_ACCESS_BEGIN) {
        let begin_at = end_at + found;
        rewritten.push_str(&body[end_at..begin_at]);

        let payload_start = begin_at + FIELD_ACCESS_BEGIN.len();

        match body[payload_start..].find(FIELD_ACCESS_END) {
            Some(offset) => {
                let payload_end = payload_start + offset;
                rewritten.push_str("<span style=\"display: none;\" data-name=\"");
                rewritten.push_str(&body[payload_start..payload_end]);
                rewritten.push_str("\"></span>");
                end_at = payload_end + FIELD_ACCESS_END.len();
            }
            None => {
                warn_once(
                    "markers",
                    "unterminated field-access marker passed through as text",
                );
                rewritten.push_str(FIELD_ACCESS_BEGIN);
                end_at = payload_start;
            }
        }
    }

    rewritten.push_str(&body[end_at..]);
    rewritten
}
