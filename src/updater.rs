//! Span replacement over a highlight range

use tracing::debug;

use crate::buffer::EditableBuffer;
use crate::locator::HighlightRange;
use crate::style::SpanKind;
use crate::styler::StyleEngine;

/// Clears stale highlight spans and asks the style engine for fresh ones
pub struct SpanUpdater<E> {
    engine: E,
}

impl<E: StyleEngine> SpanUpdater<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Restyle `range`. Highlight spans overlapping it are removed before
    /// the engine runs, so spans of one kind never stack up.
    pub fn update_range(&self, buffer: &mut dyn EditableBuffer, range: HighlightRange) {
        let cleared = clear_spans(buffer, range);
        self.engine.apply(buffer, range);
        debug!(start = range.start, end = range.end, cleared, "restyled range");
    }
}

/// Remove highlight spans overlapping `range`; returns how many were removed
pub fn clear_spans(buffer: &mut dyn EditableBuffer, range: HighlightRange) -> usize {
    let stale = buffer.spans_overlapping(range.start, range.end, &SpanKind::HIGHLIGHT);
    for id in &stale {
        buffer.remove_span(*id);
    }
    stale.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SpannedBuffer;
    use crate::style::{Color, SpanStyle};
    use crate::styler::HtmlStyler;

    fn span_set(buffer: &SpannedBuffer) -> Vec<(usize, usize, SpanStyle)> {
        let mut spans: Vec<_> = buffer.spans().iter().map(|s| (s.start, s.end, s.style)).collect();
        spans.sort_by_key(|s| (s.0, s.1, format!("{:?}", s.2)));
        spans
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut buffer = SpannedBuffer::from("<p class=\"x\">a &amp; b</p>");
        let updater = SpanUpdater::new(HtmlStyler::default());
        let range = HighlightRange::full(&buffer);

        updater.update_range(&mut buffer, range);
        let first = span_set(&buffer);
        assert!(!first.is_empty());

        updater.update_range(&mut buffer, range);
        assert_eq!(span_set(&buffer), first);
    }

    #[test]
    fn test_update_replaces_stale_spans() {
        let mut buffer = SpannedBuffer::from("<b>");
        buffer.add_span(0, 3, SpanStyle::Foreground(Color::Red));
        buffer.add_span(1, 2, SpanStyle::RelativeSize { percent: 50 });

        let updater = SpanUpdater::new(HtmlStyler::default());
        let range = HighlightRange::full(&buffer);
        updater.update_range(&mut buffer, range);

        let tag_color = crate::config::Config::default().tag_color;
        assert_eq!(span_set(&buffer), vec![(0, 3, SpanStyle::Foreground(tag_color))]);
    }

    #[test]
    fn test_clear_keeps_other_kinds_and_ranges() {
        let mut buffer = SpannedBuffer::from("<a> <b>");
        buffer.add_span(0, 3, SpanStyle::Foreground(Color::Blue));
        buffer.add_span(4, 7, SpanStyle::Foreground(Color::Blue));
        buffer.add_span(0, 7, SpanStyle::Background(Color::White));

        let removed = clear_spans(&mut buffer, HighlightRange { start: 4, end: 7 });
        assert_eq!(removed, 1);
        assert_eq!(
            span_set(&buffer),
            vec![
                (0, 3, SpanStyle::Foreground(Color::Blue)),
                (0, 7, SpanStyle::Background(Color::White)),
            ]
        );
    }
}
