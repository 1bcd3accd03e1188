//! Span styles for highlighted markup
//!
//! A span attaches one [`SpanStyle`] to a byte range of the buffer.
//! The highlighting core only cares about the [`SpanKind`] of a span,
//! the styling engine decides the concrete values.

use crate::error::{Error, Result};

/// Text colors (ANSI 16-color palette plus true color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from `#rrggbb` or a palette name (`"bright-blue"`, `"red"`)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(|| Error::InvalidColor(s.to_string()));
        }

        let color = match s.to_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return Err(Error::InvalidColor(s.to_string())),
        };
        Ok(color)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }
}

/// Font typeface variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typeface {
    Bold,
    Italic,
}

/// Style carried by a single span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Text color
    Foreground(Color),
    /// Bold or italic weight
    Typeface(Typeface),
    /// Text size relative to the surrounding text, in percent
    RelativeSize { percent: u16 },
    /// Background fill (selections, search matches)
    Background(Color),
}

impl SpanStyle {
    /// The kind of this style, ignoring its value
    pub fn kind(&self) -> SpanKind {
        match self {
            SpanStyle::Foreground(_) => SpanKind::Foreground,
            SpanStyle::Typeface(_) => SpanKind::Typeface,
            SpanStyle::RelativeSize { .. } => SpanKind::RelativeSize,
            SpanStyle::Background(_) => SpanKind::Background,
        }
    }
}

/// Span categories, used to filter which spans an operation touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Foreground,
    Typeface,
    RelativeSize,
    Background,
}

impl SpanKind {
    /// Kinds produced by markup highlighting. Background spans belong to
    /// selection and search and are left alone on restyle.
    pub const HIGHLIGHT: [SpanKind; 3] =
        [SpanKind::Foreground, SpanKind::Typeface, SpanKind::RelativeSize];
}

/// Handle of a span stored in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanId(pub u64);

/// A styled byte range of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub id: SpanId,
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    pub style: SpanStyle,
}

impl Span {
    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Check if this span intersects `[start, end)`.
    ///
    /// Spans that only touch the range at one end do not overlap it, unless
    /// the span or the range is empty.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if self.start > end || self.end < start {
            return false;
        }
        self.start == self.end || start == end || (self.start != end && self.end != start)
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Color::parse("#005082").unwrap(), Color::Rgb(0, 0x50, 0x82));
        assert_eq!(Color::parse(" #9E9E9E ").unwrap(), Color::Rgb(158, 158, 158));
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zz0000").is_err());
    }

    #[test]
    fn test_parse_named_color() {
        assert_eq!(Color::parse("blue").unwrap(), Color::Blue);
        assert_eq!(Color::parse("Bright_Blue").unwrap(), Color::BrightBlue);
        assert_eq!(Color::parse("grey").unwrap(), Color::BrightBlack);
        assert!(Color::parse("octarine").is_err());
    }

    #[test]
    fn test_span_kind() {
        assert_eq!(SpanStyle::Foreground(Color::Red).kind(), SpanKind::Foreground);
        assert_eq!(SpanStyle::Typeface(Typeface::Bold).kind(), SpanKind::Typeface);
        assert_eq!(SpanStyle::RelativeSize { percent: 75 }.kind(), SpanKind::RelativeSize);
        assert!(!SpanKind::HIGHLIGHT.contains(&SpanStyle::Background(Color::Blue).kind()));
    }

    #[test]
    fn test_span_overlaps() {
        let span = Span {
            id: SpanId(0),
            start: 5,
            end: 10,
            style: SpanStyle::Foreground(Color::Red),
        };
        assert!(span.overlaps(0, 6));
        assert!(span.overlaps(7, 8));
        assert!(span.overlaps(7, 7));
        assert!(!span.overlaps(0, 5));
        assert!(!span.overlaps(10, 12));
        assert!(!span.overlaps(11, 20));
        assert!(!span.overlaps(0, 4));
        assert!(span.contains(5));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
    }
}
