//! Edit delta capture
//!
//! A [`ChangeRecorder`] lives for exactly one edit. The pre-edit hook
//! creates it, the post-edit hook updates it, and the completion hook
//! consumes it, so a record can never leak into the next edit.
//!
//! Only the net-new or net-removed tail of a replacement is kept: the
//! common prefix of old and new text cannot have changed the markup
//! structure. When removed and inserted lengths are equal nothing is
//! recorded and the edit is not restyled.

use tracing::trace;

/// The fragment of text relevant to restyling, with its absolute position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub start: usize,
    /// Never empty
    pub delta: String,
}

/// Per-edit capture session
#[derive(Debug, Default)]
pub struct ChangeRecorder {
    record: Option<ChangeRecord>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-edit hook. `text` is the buffer before the edit; `removed` bytes at
    /// `start` are about to be replaced by `inserted` bytes.
    ///
    /// Records the removed tail when the edit shrinks the text.
    pub fn before_change(&mut self, text: &str, start: usize, removed: usize, inserted: usize) {
        let end = start.saturating_add(removed);
        if end == 0 || end > text.len() || inserted >= removed {
            return;
        }
        self.capture(text, start, start + inserted, end);
    }

    /// Post-edit hook. `text` is the buffer after the edit; `removed` bytes at
    /// `start` were replaced by `inserted` bytes.
    ///
    /// Records the inserted tail when the edit grows the text.
    pub fn after_change(&mut self, text: &str, start: usize, removed: usize, inserted: usize) {
        let end = start.saturating_add(inserted);
        if end > text.len() || inserted <= removed {
            return;
        }
        self.capture(text, start, start + removed, end);
    }

    fn capture(&mut self, text: &str, start: usize, from: usize, to: usize) {
        match text.get(from..to) {
            Some(delta) if !delta.is_empty() => {
                trace!(start, delta, "captured change");
                self.record = Some(ChangeRecord {
                    start,
                    delta: delta.to_string(),
                });
            }
            _ => {}
        }
    }

    /// End the session, yielding the record to act on
    pub fn finish(self) -> Option<ChangeRecord> {
        self.record
    }
}
