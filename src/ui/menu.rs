use fltk::{
    app::Sender,
    enums::{Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::device::DeviceKind;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;
use crate::app::domain::source::Pane;

pub const DARK_MODE_ITEM: &str = "View/Dark Mode";
pub const LINE_NUMBERS_ITEM: &str = "View/Line Numbers";
pub const WORD_WRAP_ITEM: &str = "View/Word Wrap";
pub const HIGHLIGHTING_ITEM: &str = "View/Syntax Highlighting";
pub const FULLSCREEN_ITEM: &str = "Preview/Fullscreen";

pub fn device_item(kind: DeviceKind) -> String {
    format!("Preview/Device/{}", kind.preset().name)
}

fn toggle_flag(on: bool) -> MenuFlag {
    if on { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle }
}

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings, dark_mode: bool) {
    let s = sender;

    // File
    menu.add("File/New Project", Shortcut::Command | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::NewProject) });
    menu.add("File/Save as HTML...", Shortcut::Command | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SaveHtml) });
    menu.add("File/Download as ZIP...", Shortcut::Command | Shortcut::Shift | 's', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::DownloadZip) });
    menu.add("File/Quit", Shortcut::Command | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // Editor
    for (i, pane) in Pane::ALL.into_iter().enumerate() {
        let key = char::from(b'1' + i as u8);
        menu.add(&format!("Editor/{}", pane.label()), Shortcut::Command | key, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SwitchPane(pane)) });
    }
    menu.add("Editor/Clear Active Editor", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ClearActivePane) });

    // View
    menu.add("View/Command Palette...", Shortcut::Command | 'k', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ToggleCommandPalette) });
    menu.add(DARK_MODE_ITEM, Shortcut::None, toggle_flag(dark_mode), { let s = *s; move |_| s.send(Message::ToggleTheme) });
    menu.add(LINE_NUMBERS_ITEM, Shortcut::None, toggle_flag(settings.line_numbers_enabled), { let s = *s; move |_| s.send(Message::ToggleLineNumbers) });
    menu.add(WORD_WRAP_ITEM, Shortcut::None, toggle_flag(settings.word_wrap_enabled), { let s = *s; move |_| s.send(Message::ToggleWordWrap) });
    menu.add(HIGHLIGHTING_ITEM, Shortcut::None, toggle_flag(settings.highlighting_enabled), { let s = *s; move |_| s.send(Message::ToggleHighlighting) });

    // Preview
    menu.add("Preview/Refresh", Shortcut::None | Key::F5, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RefreshPreview) });
    menu.add(FULLSCREEN_ITEM, Shortcut::None | Key::F11, toggle_flag(false), { let s = *s; move |_| s.send(Message::ToggleFullscreen) });
    for kind in DeviceKind::ALL {
        let flag = if kind == settings.default_device { MenuFlag::Radio | MenuFlag::Value } else { MenuFlag::Radio };
        menu.add(&device_item(kind), Shortcut::None, flag, { let s = *s; move |_| s.send(Message::SetDevice(kind)) });
    }
    menu.add("Preview/Open in Browser", Shortcut::Command | 'b', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenInBrowser) });
}

/// Set a toggle or radio item's check mark.
pub fn set_menu_checkbox(menu: &MenuBar, path: &str, checked: bool) {
    let idx = menu.find_index(path);
    if idx < 0 {
        return;
    }
    if let Some(mut item) = menu.at(idx) {
        if checked && item.is_radio() {
            item.setonly();
        } else if checked {
            item.set();
        } else {
            item.clear();
        }
    }
}
