use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
};

use super::theme::ThemeColors;
use crate::app::domain::messages::Message;

pub const HEADER_HEIGHT: i32 = 44;

/// Title bar with the project actions and the theme switch.
pub struct Header {
    pub group: Flex,
    title: Frame,
    actions: Vec<Button>,
    theme_btn: Button,
}

impl Header {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Row);
        group.set_margins(10, 6, 10, 6);
        group.set_spacing(6);

        let mut title = Frame::default().with_label("🦀 FerrisFiddle");
        title.set_label_size(16);
        title.set_align(Align::Left | Align::Inside);
        group.fixed(&title, 180);

        Frame::default();

        let mut actions = Vec::new();
        for (label, tooltip, width, msg) in [
            ("Commands", "Open the command palette (Ctrl+K)", 90, Message::ToggleCommandPalette),
            ("New Project", "Start with empty editors", 100, Message::NewProject),
            ("Save as HTML", "Save a single index.html", 110, Message::SaveHtml),
            (
                "Download ZIP",
                "Save index.html, style.css and script.js as project.zip",
                110,
                Message::DownloadZip,
            ),
        ] {
            let mut btn = Button::default().with_label(label);
            btn.set_frame(FrameType::FlatBox);
            btn.set_label_size(12);
            btn.set_tooltip(tooltip);
            btn.clear_visible_focus();
            btn.emit(*sender, msg);
            group.fixed(&btn, width);
            actions.push(btn);
        }

        let mut theme_btn = Button::default();
        theme_btn.set_frame(FrameType::FlatBox);
        theme_btn.set_tooltip("Toggle theme");
        theme_btn.clear_visible_focus();
        theme_btn.emit(*sender, Message::ToggleTheme);
        group.fixed(&theme_btn, 36);

        group.end();

        Self {
            group,
            title,
            actions,
            theme_btn,
        }
    }

    pub fn apply_theme(&mut self, colors: &ThemeColors, is_dark: bool) {
        self.group.set_frame(FrameType::FlatBox);
        self.group.set_color(colors.panel);
        self.title.set_label_color(colors.text);
        for btn in &mut self.actions {
            btn.set_color(colors.window);
            btn.set_label_color(colors.text);
        }
        self.theme_btn.set_color(colors.window);
        self.theme_btn.set_label_color(colors.text);
        self.theme_btn.set_label(if is_dark { "☀" } else { "☾" });
        self.group.redraw();
    }
}
