use syntect::highlighting::{HighlightIterator, HighlightState, Highlighter, Theme};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::{PLAIN_STYLE, StyleTable};

/// Style string for `text`: one style char per byte, as FLTK expects.
pub(super) fn style_text(
    text: &str,
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
    theme: &Theme,
    table: &mut StyleTable,
) -> String {
    let highlighter = Highlighter::new(theme);
    let mut parse_state = ParseState::new(syntax);
    let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
    let mut styles = String::with_capacity(text.len());

    for line in LinesWithEndings::from(text) {
        let ops = match parse_state.parse_line(line, syntax_set) {
            Ok(ops) => ops,
            Err(e) => {
                tracing::debug!("syntect gave up on a line: {}", e);
                // Keep the buffers aligned; the rest renders plain
                push_plain(&mut styles, text.len() - styles.len());
                return styles;
            }
        };
        let pieces = HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter);
        for (style, piece) in pieces {
            let ch = table.style_char(style.foreground);
            styles.extend(std::iter::repeat_n(ch, piece.len()));
        }
    }

    styles
}

pub(super) fn push_plain(styles: &mut String, len: usize) {
    styles.extend(std::iter::repeat_n(PLAIN_STYLE, len));
}
