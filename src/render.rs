//! Terminal output of a highlighted buffer using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::buffer::EditableBuffer;
use crate::error::Result;
use crate::style::{Color, Span, SpanStyle, Typeface};

/// Combined effect of all spans covering a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    /// Reduced size text, shown dim on a terminal
    pub dim: bool,
}

impl CellStyle {
    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&mut self, style: SpanStyle) {
        match style {
            SpanStyle::Foreground(color) => self.fg = color,
            SpanStyle::Background(color) => self.bg = color,
            SpanStyle::Typeface(Typeface::Bold) => self.bold = true,
            SpanStyle::Typeface(Typeface::Italic) => self.italic = true,
            SpanStyle::RelativeSize { percent } => self.dim = percent < 100,
        }
    }
}

/// Split `[0, len)` into runs of uniform style. Later spans win on conflict.
pub fn segments(len: usize, spans: &[Span]) -> Vec<(usize, usize, CellStyle)> {
    let mut cuts: Vec<usize> = spans
        .iter()
        .flat_map(|s| [s.start.min(len), s.end.min(len)])
        .chain([0, len])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut runs: Vec<(usize, usize, CellStyle)> = Vec::new();
    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let mut cell = CellStyle::default();
        for span in spans.iter().filter(|s| s.start <= start && s.end >= end) {
            cell.apply(span.style);
        }
        match runs.last_mut() {
            Some(last) if last.2 == cell && last.1 == start => last.1 = end,
            _ => runs.push((start, end, cell)),
        }
    }
    runs
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

/// Write the buffer text with its spans as terminal styling
pub fn render<W: Write>(out: &mut W, buffer: &dyn EditableBuffer) -> Result<()> {
    let text = buffer.as_str();
    for (start, end, cell) in segments(text.len(), buffer.spans()) {
        // Span ends always sit on char boundaries, but stay safe
        let Some(run) = text.get(start..end) else {
            continue;
        };
        if cell.is_default() {
            queue!(out, Print(run))?;
            continue;
        }

        queue!(
            out,
            SetForegroundColor(term_color(cell.fg)),
            SetBackgroundColor(term_color(cell.bg))
        )?;
        if cell.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if cell.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if cell.dim {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        queue!(out, Print(run), SetAttribute(Attribute::Reset))?;
    }
    out.flush()?;
    Ok(())
}

/// Write one line per span: range, style and covered text
pub fn render_spans<W: Write>(out: &mut W, buffer: &dyn EditableBuffer) -> Result<()> {
    let mut spans: Vec<&Span> = buffer.spans().iter().collect();
    spans.sort_by_key(|s| (s.start, s.end, s.id));
    for span in spans {
        let text = buffer.substring(span.start, span.end).unwrap_or("");
        writeln!(out, "{}..{}\t{:?}\t{:?}", span.start, span.end, span.style, text)?;
    }
    Ok(())
}
