//! Rich-text presentation settings supplied by the host tool.
//!
//! The admin tool lets site owners define a default text-overlay style and
//! named CSS classes that rich-text authors can apply. Embedded rich text
//! depends on those rules, so the resolver emits them ahead of its
//! segments, once per resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use trellis_html::HtmlWriter;

/// One named CSS class available to rich-text authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssClass {
    /// Internal name, combined with the group name into the selector.
    pub internal_name: String,
    /// The class's property block, written raw.
    pub css: String,
}

/// A group of author-facing CSS classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssClassGroup {
    /// Internal name, combined with each class name into the selector.
    pub internal_name: String,
    /// Classes in this group.
    #[serde(default)]
    pub css_classes: Vec<CssClass>,
}

/// Rich-text styling settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextStyles {
    /// Raw CSS applied to text overlays, written first.
    #[serde(default)]
    pub default_text_overlay_css: Option<String>,
    /// Author-facing class groups, emitted as `.rte-<group>-<class>` rules.
    #[serde(default)]
    pub class_groups: Vec<CssClassGroup>,
}

impl RichTextStyles {
    /// Whether there is nothing to emit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_text_overlay_css.is_none() && self.class_groups.is_empty()
    }

    /// Write the `<style>` element carrying the overlay CSS and the
    /// class-group rules. Writes nothing when the settings are empty.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    pub fn write_css(&self, out: &mut HtmlWriter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        out.start("style", &[("type", "text/css")])?;

        if let Some(css) = &self.default_text_overlay_css {
            out.raw(css)?;
        }

        for group in &self.class_groups {
            for class in &group.css_classes {
                out.raw(&format!(
                    ".rte-{}-{}{{{}}}",
                    group.internal_name, class.internal_name, class.css
                ))?;
            }
        }

        out.end()
    }
}
