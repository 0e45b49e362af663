//! Terminal rendering of highlighted lines
//!
//! Resolves style ids through a [`Theme`] and writes ANSI sequences with
//! crossterm. Any `Write` works as the target, which keeps this testable.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{self, Attribute, Print, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthChar;

use crate::syntax::{flatten_spans, Color, Span, Style, StyleId, Theme};

fn to_crossterm(color: Color) -> style::Color {
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

/// Writes highlighted lines to a terminal
pub struct Renderer<'a> {
    theme: &'a Theme,
    /// Width of the line-number gutter; 0 disables it
    gutter: usize,
    tab_width: usize,
    /// Maximum display columns of text (0 = unlimited)
    width: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            gutter: 0,
            tab_width: 8,
            width: 0,
        }
    }

    /// Show line numbers wide enough for `line_count` lines
    pub fn with_line_numbers(mut self, line_count: usize) -> Self {
        self.gutter = line_count.max(1).to_string().len();
        self
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Render one line (without its newline) followed by `\n`
    ///
    /// `line_idx` is zero-based; spans may overlap and are layered in order.
    pub fn render_line<W: Write>(
        &self,
        out: &mut W,
        line_idx: usize,
        text: &str,
        spans: &[Span],
    ) -> io::Result<()> {
        if self.gutter > 0 {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(format!("{:>width$} ", line_idx + 1, width = self.gutter)),
                SetAttribute(Attribute::Reset)
            )?;
        }

        for (style, chunk) in self.runs(text, spans) {
            self.write_run(out, style, &chunk)?;
        }
        queue!(out, Print("\n"))?;
        Ok(())
    }

    /// Split the display form of a line into same-style runs
    fn runs(&self, text: &str, spans: &[Span]) -> Vec<(Option<StyleId>, String)> {
        let flat = flatten_spans(spans);
        let mut flat = flat.iter().peekable();
        let mut runs: Vec<(Option<StyleId>, String)> = Vec::new();
        let mut col = 0;

        for (pos, ch) in text.chars().enumerate() {
            while flat.next_if(|span| span.end() <= pos).is_some() {}
            let style = flat.peek().filter(|span| span.contains(pos)).map(|span| span.style);

            let (display, ch_width) = if ch == '\t' {
                let stop = self.tab_width - col % self.tab_width;
                (" ".repeat(stop), stop)
            } else {
                (ch.to_string(), UnicodeWidthChar::width(ch).unwrap_or(1))
            };
            if self.width > 0 && col + ch_width > self.width {
                break;
            }
            col += ch_width;

            match runs.last_mut() {
                Some((last, chunk)) if *last == style => chunk.push_str(&display),
                _ => runs.push((style, display)),
            }
        }
        runs
    }

    fn write_run<W: Write>(&self, out: &mut W, id: Option<StyleId>, chunk: &str) -> io::Result<()> {
        let style: Style = id.map(|id| self.theme.resolve(id)).unwrap_or_default();
        if style.is_default() {
            queue!(out, Print(chunk))?;
            return Ok(());
        }

        if style.fg != Color::Default {
            queue!(out, SetForegroundColor(to_crossterm(style.fg)))?;
        }
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        queue!(out, Print(chunk), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}
