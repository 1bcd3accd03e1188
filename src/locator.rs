//! Restyle range computation
//!
//! Given the delta of one edit, find the smallest region of the buffer
//! whose markup structure may have changed. Four edit shapes are handled:
//! an opening symbol changed, a closing symbol changed, or the edit sits
//! inside a tag or an entity without touching a delimiter.
//!
//! Not finding a matching delimiter is a normal outcome and yields `None`.

use tracing::{debug, warn};

use crate::buffer::EditableBuffer;
use crate::recorder::ChangeRecord;
use crate::symbol::{Occurrence, SymbolPair, SymbolScan};

/// A `[start, end)` byte range to clear and restyle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    /// Create a range, checking `start <= end <= len`
    pub fn new(start: usize, end: usize, len: usize) -> Option<Self> {
        if start <= end && end <= len {
            Some(Self { start, end })
        } else {
            warn!(start, end, len, "discarding out of bounds highlight range");
            None
        }
    }

    /// The whole buffer
    pub fn full(buffer: &dyn EditableBuffer) -> Self {
        Self {
            start: 0,
            end: buffer.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How an edit relates to the markup around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditShape {
    /// The delta holds the opening symbol of `pair`
    OpeningChanged(SymbolPair, Occurrence),
    /// The delta holds the closing symbol of `pair`
    ClosingChanged(SymbolPair, Occurrence),
    /// The delta holds no delimiter
    Interior,
}

impl EditShape {
    pub fn classify(delta: &str) -> Self {
        match SymbolScan::of(delta).dominant() {
            Some((symbol, occurrence)) if symbol.is_opening() => {
                EditShape::OpeningChanged(symbol.pair(), occurrence)
            }
            Some((symbol, occurrence)) => EditShape::ClosingChanged(symbol.pair(), occurrence),
            None => EditShape::Interior,
        }
    }
}

/// Compute the range to restyle for `record`, if any
pub fn locate(buffer: &dyn EditableBuffer, record: &ChangeRecord) -> Option<HighlightRange> {
    let shape = EditShape::classify(&record.delta);
    let range = match shape {
        EditShape::OpeningChanged(pair, occurrence) => {
            for_opening_symbol(buffer, record, pair, occurrence)
        }
        EditShape::ClosingChanged(pair, occurrence) => {
            for_closing_symbol(buffer, record, pair, occurrence)
        }
        EditShape::Interior => within_symbols(buffer, record.start, SymbolPair::TAG)
            .or_else(|| within_symbols(buffer, record.start, SymbolPair::ENTITY)),
    };
    debug!(?shape, start = record.start, ?range, "located restyle range");
    range
}

/// From the first opening symbol in the delta through the closing symbol
/// that follows the last one. Unterminated markup is left alone.
///
/// Pasting `<b><` in front of `/b>` styles from the first `<` to the end
/// of `/b>`.
pub fn for_opening_symbol(
    buffer: &dyn EditableBuffer,
    record: &ChangeRecord,
    pair: SymbolPair,
    occurrence: Occurrence,
) -> Option<HighlightRange> {
    let closing = buffer.index_of(pair.closing, record.start + occurrence.last)?;
    HighlightRange::new(record.start + occurrence.first, closing + 1, buffer.len())
}

/// From the opening symbol before the delta's first closing symbol through
/// the next closing symbol after the delta, or to the end of the buffer
/// when there is none.
pub fn for_closing_symbol(
    buffer: &dyn EditableBuffer,
    record: &ChangeRecord,
    pair: SymbolPair,
    occurrence: Occurrence,
) -> Option<HighlightRange> {
    let len = buffer.len();
    let first_closing = record.start + occurrence.first;
    let next_closing = buffer.index_of(pair.closing, record.start + record.delta.len());

    let opening = first_closing
        .checked_sub(1)
        .and_then(|from| buffer.last_index_of(pair.opening, from))?;

    let end = match next_closing {
        Some(pos) if pos < len => pos + 1,
        _ => len,
    };
    HighlightRange::new(opening, end, len)
}

/// The enclosing `pair` around `start`, if the edit is inside one
pub fn within_symbols(
    buffer: &dyn EditableBuffer,
    start: usize,
    pair: SymbolPair,
) -> Option<HighlightRange> {
    let opening = buffer.last_index_of(pair.opening, start)?;
    let closing = buffer.index_of(pair.closing, opening)?;
    if closing < start {
        return None;
    }
    HighlightRange::new(opening, closing + 1, buffer.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SpannedBuffer;

    fn locate_in(text: &str, start: usize, delta: &str) -> Option<(usize, usize)> {
        let buffer = SpannedBuffer::from(text);
        let record = ChangeRecord {
            start,
            delta: delta.to_string(),
        };
        locate(&buffer, &record).map(|r| (r.start, r.end))
    }

    #[test]
    fn test_classify() {
        assert!(matches!(
            EditShape::classify("x>y<"),
            EditShape::OpeningChanged(SymbolPair::TAG, Occurrence { first: 3, last: 3 })
        ));
        assert!(matches!(
            EditShape::classify("&amp>"),
            EditShape::ClosingChanged(SymbolPair::TAG, _)
        ));
        assert!(matches!(
            EditShape::classify("nbsp;"),
            EditShape::ClosingChanged(SymbolPair::ENTITY, _)
        ));
        assert_eq!(EditShape::classify("href"), EditShape::Interior);
    }

    #[test]
    fn test_typed_opening_symbol() {
        // "<" typed at the start of "abc>def"
        assert_eq!(locate_in("<abc>def", 0, "<"), Some((0, 5)));
    }

    #[test]
    fn test_pasted_opening_symbols() {
        // "<b><" pasted in front of "/b>"
        assert_eq!(locate_in("<b></b>", 0, "<b><"), Some((0, 7)));
    }

    #[test]
    fn test_unterminated_opening_symbol() {
        assert_eq!(locate_in("text <b", 5, "<"), None);
    }

    #[test]
    fn test_deleted_only_opening_symbol() {
        // "a<b" lost its "<"
        assert_eq!(locate_in("ab", 1, "<"), None);
    }

    #[test]
    fn test_typed_closing_symbol_at_end() {
        assert_eq!(locate_in("<div>", 4, ">"), Some((0, 5)));
        assert_eq!(locate_in("<b>", 2, ">"), Some((0, 3)));
    }

    #[test]
    fn test_typed_closing_symbol_extends_to_next_closing() {
        assert_eq!(locate_in("<b> x</b>", 2, ">"), Some((0, 9)));
    }

    #[test]
    fn test_typed_closing_symbol_runs_to_end_without_next_closing() {
        assert_eq!(locate_in("<b> tail", 2, ">"), Some((0, 8)));
        assert_eq!(locate_in("x &lt; more", 5, ";"), Some((2, 11)));
    }

    #[test]
    fn test_opening_symbol_accepts_closing_at_offset_zero() {
        // "<" deleted from the front of "<><b>"
        assert_eq!(locate_in("><b>", 0, "<"), Some((0, 1)));
    }

    #[test]
    fn test_closing_symbol_without_opening() {
        assert_eq!(locate_in("ab>", 2, ">"), None);
        assert_eq!(locate_in(">", 0, ">"), None);
    }

    #[test]
    fn test_typed_entity_symbols() {
        assert_eq!(locate_in("&amp;", 4, ";"), Some((0, 5)));
        assert_eq!(locate_in("a &amp; b", 2, "&"), Some((2, 7)));
        assert_eq!(locate_in("a & b", 2, "&"), None);
    }

    #[test]
    fn test_interior_edit_in_tag() {
        // "r" typed into "<a hef>"
        assert_eq!(locate_in("<a href>", 5, "r"), Some((0, 8)));
    }

    #[test]
    fn test_interior_edit_in_entity() {
        assert_eq!(locate_in("x &amp; y", 4, "m"), Some((2, 7)));
    }

    #[test]
    fn test_interior_edit_prefers_tag() {
        // Inside both a tag and an entity-like run: the tag wins
        assert_eq!(locate_in("<a title=\"&x\">", 11, "x"), Some((0, 14)));
    }

    #[test]
    fn test_interior_edit_outside_markup() {
        assert_eq!(locate_in("<a>text", 4, "e"), None);
        assert_eq!(locate_in("plain", 2, "a"), None);
    }

    #[test]
    fn test_highlight_range_bounds() {
        assert_eq!(HighlightRange::new(2, 2, 2), Some(HighlightRange { start: 2, end: 2 }));
        assert_eq!(HighlightRange::new(3, 2, 5), None);
        assert_eq!(HighlightRange::new(0, 6, 5), None);
        let range = HighlightRange::new(1, 4, 4).unwrap();
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
    }
}
