//! Regex based HTML styling engine
//!
//! Decides which spans a range of HTML source gets. Rules are applied in
//! order over the requested range only: tags, attribute values, comments,
//! entity references.

use regex::Regex;
use tracing::{trace, warn};

use crate::buffer::EditableBuffer;
use crate::config::Config;
use crate::locator::HighlightRange;
use crate::style::{SpanStyle, Typeface};

/// Applies fresh highlight spans over a range
pub trait StyleEngine {
    fn apply(&self, buffer: &mut dyn EditableBuffer, range: HighlightRange);
}

/// A pattern and the spans each match receives
pub struct StyleRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Capture group to style (0 = whole match)
    pub group: usize,
    /// Styles applied to each match
    pub styles: Vec<SpanStyle>,
}

impl StyleRule {
    /// Create a new rule styling the whole match
    pub fn new(name: &str, pattern: &str, styles: Vec<SpanStyle>) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name: name.to_string(),
            pattern: regex,
            group: 0,
            styles,
        })
    }

    /// Builder: style only the given capture group
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    /// Byte ranges of all matches within `text`
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// The HTML styling engine
pub struct HtmlStyler {
    rules: Vec<StyleRule>,
}

impl HtmlStyler {
    /// Build the rule set for a configuration
    pub fn new(config: &Config) -> Self {
        let mut rules = Vec::new();
        let reduced = SpanStyle::RelativeSize {
            percent: config.reduced_size,
        };

        if let Some(rule) = StyleRule::new(
            "tag",
            r"(?i)</?[a-z][^<>]*>",
            vec![SpanStyle::Foreground(config.tag_color)],
        ) {
            rules.push(rule);
        }

        if config.attributes {
            if let Some(rule) = StyleRule::new(
                "attribute",
                r#"=\s*("[^"<>]*"|'[^'<>]*')"#,
                vec![SpanStyle::Foreground(config.attribute_color)],
            ) {
                rules.push(rule.with_group(1));
            }
        }

        if config.comments {
            if let Some(rule) = StyleRule::new(
                "comment",
                r"(?s)<!--.*?-->",
                vec![
                    SpanStyle::Foreground(config.attribute_color),
                    SpanStyle::Typeface(Typeface::Italic),
                    reduced,
                ],
            ) {
                rules.push(rule);
            }
        }

        if config.entities {
            if let Some(rule) = StyleRule::new(
                "entity",
                r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);",
                vec![
                    SpanStyle::Foreground(config.tag_color),
                    SpanStyle::Typeface(Typeface::Bold),
                    reduced,
                ],
            ) {
                rules.push(rule);
            }
        }

        Self { rules }
    }

    /// Names of the active rules, in application order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl Default for HtmlStyler {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl StyleEngine for HtmlStyler {
    fn apply(&self, buffer: &mut dyn EditableBuffer, range: HighlightRange) {
        let Some(text) = buffer.substring(range.start, range.end) else {
            warn!(?range, "cannot style range outside buffer");
            return;
        };

        // Collect first: the buffer is borrowed by `text` while matching
        let mut pending = Vec::new();
        for rule in &self.rules {
            for (start, end) in rule.find_all(text) {
                trace!(rule = %rule.name, start = range.start + start, end = range.start + end, "match");
                for style in &rule.styles {
                    pending.push((range.start + start, range.start + end, *style));
                }
            }
        }

        for (start, end, style) in pending {
            buffer.add_span(start, end, style);
        }
    }
}
