mod highlighter;

use fltk::enums::{Color, Font};
use fltk::text::StyleTableEntry;
use syntect::highlighting::{Color as SyntectColor, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use highlighter::{push_plain, style_text};

use crate::app::domain::settings::SyntaxTheme;
use crate::app::domain::source::Pane;

/// Style char for text in the theme's own foreground.
pub const PLAIN_STYLE: char = 'A';
/// FLTK reads style chars 'A' through 'Z'.
const MAX_STYLES: usize = 26;

type Rgb = (u8, u8, u8);

/// Style chars shared by all three panes under one theme. 'A' is the theme's
/// foreground; every other colour gets the next letter the first time a pane
/// uses it. Past 'Z' colours fold into the last letter.
struct StyleTable {
    plain: Option<Rgb>,
    colors: Vec<Rgb>,
    font: Font,
    font_size: i32,
}

impl StyleTable {
    fn for_theme(theme: Option<&Theme>, font: Font, font_size: i32) -> Self {
        let plain = theme
            .and_then(|t| t.settings.foreground)
            .map(|fg| (fg.r, fg.g, fg.b));
        Self {
            plain,
            colors: Vec::with_capacity(MAX_STYLES - 1),
            font,
            font_size,
        }
    }

    fn style_char(&mut self, color: SyntectColor) -> char {
        let rgb = (color.r, color.g, color.b);
        if self.plain == Some(rgb) {
            return PLAIN_STYLE;
        }
        let slot = match self.colors.iter().position(|c| *c == rgb) {
            Some(slot) => slot,
            None if self.colors.len() < MAX_STYLES - 1 => {
                self.colors.push(rgb);
                self.colors.len() - 1
            }
            None => MAX_STYLES - 2,
        };
        (PLAIN_STYLE as u8 + 1 + slot as u8) as char
    }

    fn entry(&self, color: Color) -> StyleTableEntry {
        StyleTableEntry {
            color,
            font: self.font,
            size: self.font_size,
        }
    }

    fn entries(&self) -> Vec<StyleTableEntry> {
        let plain = self
            .plain
            .map(|(r, g, b)| Color::from_rgb(r, g, b))
            .unwrap_or(Color::Foreground);
        std::iter::once(self.entry(plain))
            .chain(
                self.colors
                    .iter()
                    .map(|&(r, g, b)| self.entry(Color::from_rgb(r, g, b))),
            )
            .collect()
    }
}

/// Colours the three editor panes. Each call restyles the whole text; the
/// panes are small and only restyle once an edit has settled.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    table: StyleTable,
}

impl SyntaxHighlighter {
    pub fn new(theme: SyntaxTheme, font: Font, font_size: i32) -> Self {
        let theme_set = ThemeSet::load_defaults();
        let theme_name = theme.theme_key().to_string();
        let table =
            StyleTable::for_theme(current_theme(&theme_set, &theme_name), font, font_size);
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set,
            theme_name,
            table,
        }
    }

    /// Style string for a pane, one char per byte of `text`.
    pub fn highlight(&mut self, pane: Pane, text: &str) -> String {
        let syntax = self.syntax_set.find_syntax_by_name(pane.syntax_name());
        let theme = current_theme(&self.theme_set, &self.theme_name);
        match (syntax, theme) {
            (Some(syntax), Some(theme)) => {
                style_text(text, syntax, &self.syntax_set, theme, &mut self.table)
            }
            _ => {
                tracing::debug!("No syntax or theme for {}; styling plain", pane.label());
                let mut plain = String::with_capacity(text.len());
                push_plain(&mut plain, text.len());
                plain
            }
        }
    }

    /// Switch themes. Style chars handed out so far no longer apply.
    pub fn set_theme(&mut self, theme: SyntaxTheme) {
        self.theme_name = theme.theme_key().to_string();
        let (font, size) = (self.table.font, self.table.font_size);
        let theme = current_theme(&self.theme_set, &self.theme_name);
        self.table = StyleTable::for_theme(theme, font, size);
    }

    /// Table for FLTK's `set_highlight_data`. Grows as new colours appear.
    pub fn style_table(&self) -> Vec<StyleTableEntry> {
        self.table.entries()
    }
}

fn current_theme<'a>(set: &'a ThemeSet, name: &str) -> Option<&'a Theme> {
    set.themes.get(name).or_else(|| set.themes.values().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> SyntaxHighlighter {
        SyntaxHighlighter::new(SyntaxTheme::Base16OceanDark, Font::Courier, 14)
    }

    #[test]
    fn test_style_string_matches_byte_length() {
        let mut h = highlighter();
        for (pane, text) in [
            (Pane::Html, "<p class=\"é\">hi</p>\n<b>x</b>"),
            (Pane::Css, "body { color: red; }\n"),
            (Pane::Js, "const s = 'ü';\nconsole.log(s)"),
        ] {
            assert_eq!(h.highlight(pane, text).len(), text.len());
        }
    }

    #[test]
    fn test_code_uses_more_than_one_style() {
        let mut h = highlighter();
        let styles = h.highlight(Pane::Js, "function f() { return 42; }");
        let first = styles.chars().next().unwrap();
        assert!(styles.chars().any(|c| c != first));
        assert!(h.style_table().len() > 1);
    }

    #[test]
    fn test_set_theme_resets_table() {
        let mut h = highlighter();
        h.highlight(Pane::Css, "a { color: blue; }");
        h.set_theme(SyntaxTheme::InspiredGitHub);
        assert_eq!(h.style_table().len(), 1);
    }

    fn color(r: u8, g: u8, b: u8) -> SyntectColor {
        SyntectColor { r, g, b, a: 0xFF }
    }

    #[test]
    fn test_theme_foreground_is_plain_style() {
        let h = highlighter();
        let theme = current_theme(&h.theme_set, &h.theme_name);
        let fg = theme.and_then(|t| t.settings.foreground).unwrap();
        let mut table = StyleTable::for_theme(theme, Font::Courier, 14);
        assert_eq!(table.style_char(fg), PLAIN_STYLE);
        assert_eq!(table.entries()[0].color, Color::from_rgb(fg.r, fg.g, fg.b));
    }

    #[test]
    fn test_colors_reuse_letters_and_fold_past_z() {
        let mut table = StyleTable::for_theme(None, Font::Courier, 14);
        assert_eq!(table.style_char(color(1, 2, 3)), 'B');
        assert_eq!(table.style_char(color(4, 5, 6)), 'C');
        assert_eq!(table.style_char(color(1, 2, 3)), 'B');

        for i in 0..40 {
            table.style_char(color(100, i, 0));
        }
        assert_eq!(table.entries().len(), MAX_STYLES);
        assert_eq!(table.style_char(color(200, 200, 200)), 'Z');
        assert_eq!(table.entries()[0].color, Color::Foreground);
    }

    #[test]
    fn test_empty_text() {
        let mut h = highlighter();
        assert!(h.highlight(Pane::Html, "").is_empty());
    }
}
