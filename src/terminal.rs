//! Terminal rendering of span trees using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{flatten, Color, Span, Style, Theme};

/// Map a palette color to crossterm's
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
    }
}

/// Apply a style on top of reset attributes
fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
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
    Ok(())
}

/// Expand tabs to the next multiple of `tab_width`, tracking display column
fn expand_tabs(text: &str, column: &mut usize, tab_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => {
                let spaces = tab_width - (*column % tab_width);
                out.extend(std::iter::repeat(' ').take(spaces));
                *column += spaces;
            }
            '\n' => {
                out.push(ch);
                *column = 0;
            }
            _ => {
                out.push(ch);
                *column += UnicodeWidthChar::width(ch).unwrap_or(0);
            }
        }
    }
    out
}

/// Write highlighted text with ANSI styling
///
/// Styles are reset before every newline so a colored run never bleeds
/// into the next line of a pager.
pub fn render<W: Write>(
    out: &mut W,
    text: &str,
    spans: &[Span],
    theme: &Theme,
    tab_width: usize,
) -> Result<()> {
    let tab_width = tab_width.max(1);
    let mut column = 0;
    for run in flatten(spans) {
        let style = theme.style(run.category);
        let expanded = expand_tabs(&text[run.start..run.end], &mut column, tab_width);
        let mut lines = expanded.split('\n').peekable();
        while let Some(line) = lines.next() {
            if !line.is_empty() {
                if style.is_default() {
                    queue!(out, Print(line))?;
                } else {
                    apply_style(out, &style)?;
                    queue!(out, Print(line), SetAttribute(Attribute::Reset))?;
                }
            }
            if lines.peek().is_some() {
                queue!(out, Print('\n'))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Write text unstyled, with tabs expanded
pub fn render_plain<W: Write>(out: &mut W, text: &str, tab_width: usize) -> Result<()> {
    let mut column = 0;
    let expanded = expand_tabs(text, &mut column, tab_width.max(1));
    queue!(out, Print(expanded))?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Category, SyntaxManager};

    fn render_to_string(text: &str, theme: &Theme) -> String {
        let manager = SyntaxManager::new().unwrap();
        let spans = manager.highlight("clm", text).unwrap();
        let mut out = Vec::new();
        render(&mut out, text, &spans, theme, 4).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn test_expand_tabs() {
        let mut column = 0;
        assert_eq!(expand_tabs("a\tb", &mut column, 4), "a   b");
        assert_eq!(column, 5);
        assert_eq!(expand_tabs("\t", &mut column, 4), "   ");
        assert_eq!(column, 8);
        assert_eq!(expand_tabs("\n\t", &mut column, 4), "\n    ");
        assert_eq!(column, 4);
    }

    #[test]
    fn test_expand_tabs_wide_chars() {
        let mut column = 0;
        assert_eq!(expand_tabs("日\tx", &mut column, 4), "日  x");
    }

    #[test]
    fn test_render_preserves_text() {
        let text = "flag[1] = \"hi\" // note\n\tvar[2] += 0x1F\n";
        let rendered = render_to_string(text, &Theme::default());
        assert_eq!(strip_ansi(&rendered), text.replace('\t', "    "));
        assert!(rendered.contains('\x1b'));
    }

    #[test]
    fn test_render_plain_theme_has_no_escapes() {
        let mut theme = Theme::default();
        for category in Category::ALL {
            theme.set(category, Style::default());
        }
        let text = "flag[1] = 2";
        assert_eq!(render_to_string(text, &theme), text);
    }

    #[test]
    fn test_reset_before_newline() {
        let text = "// one\ntwo";
        let rendered = render_to_string(text, &Theme::default());
        let reset = "\x1b[0m";
        let newline = rendered.find('\n').unwrap();
        assert!(rendered[..newline].ends_with(reset));
    }

    #[test]
    fn test_render_plain() {
        let mut out = Vec::new();
        render_plain(&mut out, "a\tb", 8).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a       b");
    }
}
