use fltk::{
    enums::{Color, Font},
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

use crate::app::domain::settings::FontChoice;

/// Colours shared by every panel for one mode.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub window: Color,
    pub panel: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub editor_bg: Color,
    pub editor_text: Color,
    pub selection: Color,
    pub gutter_bg: Color,
    pub gutter_fg: Color,
    pub divider: Color,
}

pub fn theme_colors(is_dark: bool) -> ThemeColors {
    if is_dark {
        ThemeColors {
            window: Color::from_rgb(15, 23, 42),
            panel: Color::from_rgb(30, 41, 59),
            text: Color::from_rgb(226, 232, 240),
            muted: Color::from_rgb(148, 163, 184),
            accent: Color::from_rgb(59, 130, 246),
            editor_bg: Color::from_rgb(30, 30, 30),
            editor_text: Color::from_rgb(220, 220, 220),
            selection: Color::from_rgb(70, 70, 100),
            gutter_bg: Color::from_rgb(40, 40, 40),
            gutter_fg: Color::from_rgb(150, 150, 150),
            divider: Color::from_rgb(30, 41, 59),
        }
    } else {
        ThemeColors {
            window: Color::from_rgb(241, 245, 249),
            panel: Color::White,
            text: Color::from_rgb(30, 41, 59),
            muted: Color::from_rgb(100, 116, 139),
            accent: Color::from_rgb(59, 130, 246),
            editor_bg: Color::White,
            editor_text: Color::Black,
            selection: Color::from_rgb(173, 216, 230),
            gutter_bg: Color::from_rgb(240, 240, 240),
            gutter_fg: Color::from_rgb(100, 100, 100),
            divider: Color::from_rgb(226, 232, 240),
        }
    }
}

pub fn font_for(choice: FontChoice) -> Font {
    match choice {
        FontChoice::ScreenBold => Font::ScreenBold,
        FontChoice::Courier => Font::Courier,
        FontChoice::HelveticaMono => Font::Screen,
    }
}

pub fn apply_window_theme(window: &mut Window, menu: &mut MenuBar, colors: &ThemeColors) {
    window.set_color(colors.window);
    window.set_label_color(colors.text);
    menu.set_color(colors.panel);
    menu.set_text_color(colors.text);
    menu.set_selection_color(colors.accent);
    window.redraw();
    menu.redraw();
}

pub fn apply_editor_theme(editor: &mut TextEditor, colors: &ThemeColors) {
    editor.set_color(colors.editor_bg);
    editor.set_text_color(colors.editor_text);
    editor.set_cursor_color(colors.editor_text);
    editor.set_selection_color(colors.selection);
    editor.set_linenumber_bgcolor(colors.gutter_bg);
    editor.set_linenumber_fgcolor(colors.gutter_fg);
    editor.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    let on: i32 = if is_dark { 1 } else { 0 };
    // 20 is DWMWA_USE_IMMERSIVE_DARK_MODE; 19 is the same flag on older Windows 10
    for attribute in [20, 19] {
        unsafe {
            let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
