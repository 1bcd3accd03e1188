//! Editable text buffer with style spans
//!
//! [`EditableBuffer`] is the contract the highlighter consumes: read-only
//! scans plus span mutation. [`SpannedBuffer`] is the in-crate host that
//! implements it and fires edit notifications at a [`TextWatcher`].

use tracing::trace;

use crate::error::{Error, Result};
use crate::style::{Span, SpanId, SpanKind, SpanStyle};
use crate::watcher::TextWatcher;

/// Text plus spans, addressed by absolute byte offsets
pub trait EditableBuffer {
    /// Full text of the buffer
    fn as_str(&self) -> &str;

    /// All spans currently attached to the buffer
    fn spans(&self) -> &[Span];

    /// Ids of spans of the given kinds that overlap `[start, end)`
    fn spans_overlapping(&self, start: usize, end: usize, kinds: &[SpanKind]) -> Vec<SpanId>;

    /// Detach a span. Unknown ids are ignored.
    fn remove_span(&mut self, id: SpanId);

    /// Attach a span over `[start, end)`
    fn add_span(&mut self, start: usize, end: usize, style: SpanStyle) -> SpanId;

    /// Length in bytes
    fn len(&self) -> usize {
        self.as_str().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text in `[start, end)`, `None` when out of range or not on char boundaries
    fn substring(&self, start: usize, end: usize) -> Option<&str> {
        if start > end {
            return None;
        }
        self.as_str().get(start..end)
    }

    /// First occurrence of `needle` at or after `from`
    fn index_of(&self, needle: char, from: usize) -> Option<usize> {
        let text = self.as_str();
        if from > text.len() {
            return None;
        }
        let mut from = from;
        while !text.is_char_boundary(from) {
            from += 1;
        }
        text[from..].find(needle).map(|idx| from + idx)
    }

    /// Last occurrence of `needle` starting at or before `from`.
    ///
    /// A `from` past the end searches the whole text.
    fn last_index_of(&self, needle: char, from: usize) -> Option<usize> {
        let text = self.as_str();
        let mut end = from.saturating_add(needle.len_utf8()).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].rfind(needle)
    }
}

/// A string buffer owning its spans
#[derive(Debug, Default)]
pub struct SpannedBuffer {
    text: String,
    spans: Vec<Span>,
    next_id: u64,
}

impl SpannedBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a buffer from a file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from(content))
    }

    /// Replace `removed` bytes at `start` with `inserted`, notifying `watcher`
    /// before the change, after the change, and once the change is complete.
    pub fn edit<W: TextWatcher>(
        &mut self,
        watcher: &mut W,
        start: usize,
        removed: usize,
        inserted: &str,
    ) -> Result<()> {
        let len = self.text.len();
        let end = start.saturating_add(removed);
        if end > len || !self.text.is_char_boundary(start) || !self.text.is_char_boundary(end) {
            return Err(Error::InvalidRange { start, end, len });
        }

        let mut session = watcher.before_text_changed(&self.text, start, removed, inserted.len());

        self.text.replace_range(start..end, inserted);
        self.shift_spans(start, removed, inserted.len());
        trace!(start, removed, inserted = inserted.len(), "buffer edited");

        watcher.on_text_changed(&mut session, &self.text, start, removed, inserted.len());
        watcher.after_text_changed(session, self);
        Ok(())
    }

    /// Move span boundaries to follow a replacement of `removed` bytes by
    /// `inserted` bytes at `start`. Offsets inside the removed text collapse
    /// to `start`; spans left empty are dropped.
    fn shift_spans(&mut self, start: usize, removed: usize, inserted: usize) {
        let removed_end = start + removed;
        let map = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= removed_end {
                pos - removed + inserted
            } else {
                start
            }
        };

        for span in &mut self.spans {
            span.start = map(span.start);
            span.end = map(span.end);
        }
        self.spans.retain(|span| !span.is_empty());
    }
}

impl From<String> for SpannedBuffer {
    fn from(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }
}

impl From<&str> for SpannedBuffer {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl EditableBuffer for SpannedBuffer {
    fn as_str(&self) -> &str {
        &self.text
    }

    fn spans(&self) -> &[Span] {
        &self.spans
    }

    fn spans_overlapping(&self, start: usize, end: usize, kinds: &[SpanKind]) -> Vec<SpanId> {
        self.spans
            .iter()
            .filter(|span| kinds.contains(&span.style.kind()) && span.overlaps(start, end))
            .map(|span| span.id)
            .collect()
    }

    fn remove_span(&mut self, id: SpanId) {
        self.spans.retain(|span| span.id != id);
    }

    fn add_span(&mut self, start: usize, end: usize, style: SpanStyle) -> SpanId {
        let id = SpanId(self.next_id);
        self.next_id += 1;
        self.spans.push(Span {
            id,
            start,
            end,
            style,
        });
        id
    }
}
