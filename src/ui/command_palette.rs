use fltk::{
    app::{self, Sender},
    browser::HoldBrowser,
    enums::{CallbackTrigger, Event, FrameType, Key},
    input::Input,
    prelude::*,
    window::Window,
};

use super::theme::ThemeColors;
use crate::app::controllers::palette::PaletteState;
use crate::app::domain::messages::Message;

const WIDTH: i32 = 560;
const HEIGHT: i32 = 400;
const INPUT_HEIGHT: i32 = 36;

/// Floating search box and grouped result list for the command palette.
///
/// The widget only reports keys and clicks as messages; what to show comes
/// from a [`PaletteState`] through [`CommandPaletteView::render`].
pub struct CommandPaletteView {
    win: Window,
    input: Input,
    list: HoldBrowser,
    /// Filtered index for each list line; `None` for headers and notices.
    rows: Vec<Option<usize>>,
}

impl CommandPaletteView {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut win = Window::default().with_size(WIDTH, HEIGHT);
        win.set_border(false);
        win.make_modal(true);

        let mut input = Input::new(8, 8, WIDTH - 16, INPUT_HEIGHT, None);
        input.set_text_size(15);
        input.set_tooltip("Search commands...");
        input.set_trigger(CallbackTrigger::Changed);
        input.emit(*sender, Message::PaletteSearchChanged);

        let s = *sender;
        input.handle(move |_, ev| {
            if ev != Event::KeyDown {
                return false;
            }
            let key = app::event_key();
            if app::is_event_command() && key == Key::from_char('k') {
                s.send(Message::ToggleCommandPalette);
                return true;
            }
            let msg = match key {
                Key::Down => Message::PaletteNext,
                Key::Up => Message::PalettePrevious,
                Key::Enter | Key::KPEnter => Message::PaletteActivateSelected,
                Key::Escape => Message::ClosePalette,
                _ => return false,
            };
            s.send(msg);
            true
        });

        let list_y = 8 + INPUT_HEIGHT + 8;
        let mut list = HoldBrowser::new(8, list_y, WIDTH - 16, HEIGHT - list_y - 8, None);
        list.set_text_size(14);
        list.set_frame(FrameType::FlatBox);
        let s = *sender;
        list.set_callback(move |b| {
            // Keyboard moves the selection through the input; only clicks activate
            if app::event() == Event::Released {
                s.send(Message::PaletteRowClicked(b.value()));
            }
        });

        win.end();

        let s = *sender;
        win.set_callback(move |_| {
            s.send(Message::ClosePalette);
        });
        // The modal grab routes clicks anywhere in the app here; one outside
        // the palette dismisses it like a backdrop
        let s = *sender;
        win.handle(move |w, ev| {
            if ev == Event::Push && is_outside(app::event_x(), app::event_y(), w.w(), w.h()) {
                s.send(Message::ClosePalette);
                return true;
            }
            false
        });

        Self {
            win,
            input,
            list,
            rows: Vec::new(),
        }
    }

    /// Show near the top of `parent`, with an empty search.
    pub fn show(&mut self, parent: &Window) {
        let x = parent.x() + (parent.w() - WIDTH) / 2;
        let y = parent.y() + 80;
        self.win.set_pos(x.max(0), y.max(0));
        self.input.set_value("");
        self.win.show();
        let _ = self.input.take_focus();
    }

    pub fn hide(&mut self) {
        self.win.hide();
    }

    pub fn search(&self) -> String {
        self.input.value()
    }

    /// Filtered index behind a 1-based list line, if that line is a command.
    pub fn row_index(&self, line: i32) -> Option<usize> {
        let line = usize::try_from(line).ok()?.checked_sub(1)?;
        self.rows.get(line).copied().flatten()
    }

    pub fn render(&mut self, state: &PaletteState) {
        self.list.clear();
        self.rows.clear();

        let groups = state.grouped();
        if groups.is_empty() {
            self.list.add("@c@i@.No commands found.");
            self.rows.push(None);
        }
        for group in groups {
            self.list.add(&format!("@s@b@.{}", group.category.to_uppercase()));
            self.rows.push(None);
            for (index, entry) in group.entries {
                self.list
                    .add(&format!("@.  {}   {}", entry.icon.glyph(), entry.name));
                self.rows.push(Some(index));
                if index == state.selected() {
                    let line = self.rows.len() as i32;
                    self.list.select(line);
                    self.list.middle_line(line);
                }
            }
        }
        self.list.redraw();
    }

    pub fn apply_theme(&mut self, colors: &ThemeColors) {
        self.win.set_color(colors.panel);
        self.input.set_color(colors.panel);
        self.input.set_text_color(colors.text);
        self.input.set_cursor_color(colors.text);
        self.list.set_color(colors.panel);
        self.list.set_text_color(colors.text);
        self.list.set_selection_color(colors.accent);
        self.win.redraw();
    }
}

/// Whether a point in window coordinates falls outside a `w` by `h` window.
fn is_outside(x: i32, y: i32, w: i32, h: i32) -> bool {
    x < 0 || y < 0 || x >= w || y >= h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_outside_palette_bounds() {
        assert!(!is_outside(0, 0, WIDTH, HEIGHT));
        assert!(!is_outside(WIDTH - 1, HEIGHT - 1, WIDTH, HEIGHT));
        assert!(is_outside(-1, 10, WIDTH, HEIGHT));
        assert!(is_outside(10, HEIGHT, WIDTH, HEIGHT));
        assert!(is_outside(WIDTH, 0, WIDTH, HEIGHT));
    }
}
