//! Edit notifications and restyle dispatch
//!
//! The host buffer calls the three [`TextWatcher`] hooks around every edit.
//! Per-edit state travels in the session value returned by the first hook,
//! so the host cannot interleave two edits' records.

use tracing::debug;

use crate::buffer::EditableBuffer;
use crate::config::Config;
use crate::locator::{self, HighlightRange};
use crate::recorder::ChangeRecorder;
use crate::styler::{HtmlStyler, StyleEngine};
use crate::updater::SpanUpdater;

/// Receiver of edit notifications
pub trait TextWatcher {
    /// State carried from the first hook to the last
    type Session;

    /// `count` bytes at `start` of `text` are about to be replaced by
    /// `after` bytes
    fn before_text_changed(
        &mut self,
        text: &str,
        start: usize,
        count: usize,
        after: usize,
    ) -> Self::Session;

    /// `before` bytes at `start` were replaced by `count` bytes, giving `text`
    fn on_text_changed(
        &mut self,
        session: &mut Self::Session,
        text: &str,
        start: usize,
        before: usize,
        count: usize,
    );

    /// The edit is complete; spans of `buffer` may be changed
    fn after_text_changed(&mut self, session: Self::Session, buffer: &mut dyn EditableBuffer);
}

/// Keeps HTML highlighting current as the buffer is edited
pub struct HtmlStyleWatcher<E = HtmlStyler> {
    updater: SpanUpdater<E>,
}

impl HtmlStyleWatcher<HtmlStyler> {
    pub fn new(config: &Config) -> Self {
        Self::with_engine(HtmlStyler::new(config))
    }
}

impl<E: StyleEngine> HtmlStyleWatcher<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            updater: SpanUpdater::new(engine),
        }
    }

    /// Style the whole buffer, e.g. after loading it
    pub fn highlight_all(&self, buffer: &mut dyn EditableBuffer) {
        let range = HighlightRange::full(buffer);
        self.updater.update_range(buffer, range);
    }
}

impl<E: StyleEngine> TextWatcher for HtmlStyleWatcher<E> {
    type Session = ChangeRecorder;

    fn before_text_changed(
        &mut self,
        text: &str,
        start: usize,
        count: usize,
        after: usize,
    ) -> ChangeRecorder {
        let mut recorder = ChangeRecorder::new();
        recorder.before_change(text, start, count, after);
        recorder
    }

    fn on_text_changed(
        &mut self,
        recorder: &mut ChangeRecorder,
        text: &str,
        start: usize,
        before: usize,
        count: usize,
    ) {
        recorder.after_change(text, start, before, count);
    }

    fn after_text_changed(&mut self, recorder: ChangeRecorder, buffer: &mut dyn EditableBuffer) {
        let Some(record) = recorder.finish() else {
            debug!("no change record, skipping restyle");
            return;
        };

        if let Some(range) = locator::locate(buffer, &record) {
            self.updater.update_range(buffer, range);
        }
    }
}
