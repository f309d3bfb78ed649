use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
    text::{StyleTableEntry, TextBuffer, TextEditor, WrapMode},
};

use super::theme::{ThemeColors, apply_editor_theme};
use crate::app::domain::messages::Message;
use crate::app::domain::source::{Pane, SourceSet};

pub const TAB_ROW_HEIGHT: i32 = 34;

/// Copy a buffer's text out through the C API and free the C copy.
/// `TextBuffer::text()` never frees the string FLTK hands back.
pub fn read_buffer(buf: &TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf` is a live buffer; FLTK returns a malloc'd NUL-terminated
    // string (or null) that we copy and then release with the matching free.
    unsafe {
        let ptr = Fl_Text_Buffer_text(buf.as_ptr() as *mut std::ffi::c_void);
        if ptr.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        text
    }
}

fn plain_styles(len: usize) -> String {
    "A".repeat(len)
}

/// Tab row plus one editor that swaps between the three pane buffers.
pub struct EditorPanel {
    pub group: Flex,
    tabs: [Button; 3],
    clear_btn: Button,
    editor: TextEditor,
    buffers: [TextBuffer; 3],
    styles: [TextBuffer; 3],
    show_linenumbers: bool,
    colors: Option<ThemeColors>,
}

impl EditorPanel {
    pub fn new(sender: &Sender<Message>, sources: &SourceSet) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Column);
        group.set_spacing(0);

        let mut tab_row = Flex::default();
        tab_row.set_type(FlexType::Row);
        tab_row.set_margins(6, 4, 6, 4);
        tab_row.set_spacing(4);
        let tabs = Pane::ALL.map(|pane| {
            let mut btn = Button::default().with_label(pane.label());
            btn.set_frame(FrameType::FlatBox);
            btn.set_label_size(13);
            btn.clear_visible_focus();
            btn.emit(*sender, Message::SwitchPane(pane));
            tab_row.fixed(&btn, 56);
            btn
        });
        Frame::default();
        let mut clear_btn = Button::default().with_label("Clear");
        clear_btn.set_frame(FrameType::FlatBox);
        clear_btn.set_label_size(12);
        clear_btn.set_tooltip("Clear the code in this editor");
        clear_btn.clear_visible_focus();
        clear_btn.emit(*sender, Message::ClearActivePane);
        tab_row.fixed(&clear_btn, 60);
        tab_row.end();
        group.fixed(&tab_row, TAB_ROW_HEIGHT);

        let mut editor = TextEditor::default();
        editor.set_text_font(Font::Courier);
        editor.set_linenumber_width(40);
        editor.set_linenumber_align(Align::Right);

        group.end();

        let buffers = Pane::ALL.map(|_| TextBuffer::default());
        let styles = Pane::ALL.map(|_| TextBuffer::default());
        for pane in Pane::ALL {
            let mut buffer = buffers[pane.index()].clone();
            let mut style_buf = styles[pane.index()].clone();
            let text = sources.get(pane);
            buffer.set_text(text);
            style_buf.set_text(&plain_styles(text.len()));

            let s = *sender;
            buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
                if inserted > 0 || deleted > 0 {
                    if deleted > 0 {
                        style_buf.remove(pos, pos + deleted);
                    }
                    if inserted > 0 {
                        style_buf.insert(pos, &plain_styles(inserted as usize));
                    }
                    s.send(Message::SourceEdited(pane));
                }
            });
        }

        Self {
            group,
            tabs,
            clear_btn,
            editor,
            buffers,
            styles,
            show_linenumbers: true,
            colors: None,
        }
    }

    pub fn show_pane(&mut self, pane: Pane, table: &[StyleTableEntry]) {
        self.editor.set_buffer(self.buffers[pane.index()].clone());
        self.editor
            .set_highlight_data(self.styles[pane.index()].clone(), table.to_vec());
        self.update_linenumber_width();
        self.paint_tabs(pane);
        self.editor.redraw();
    }

    pub fn text(&self, pane: Pane) -> String {
        read_buffer(&self.buffers[pane.index()])
    }

    /// Replace a pane's text. The modify callback reports it like any edit.
    pub fn set_text(&mut self, pane: Pane, text: &str) {
        self.buffers[pane.index()].set_text(text);
    }

    /// Install fresh styles for a pane. Ignored if the text moved on since.
    pub fn set_styles(
        &mut self,
        pane: Pane,
        styles: &str,
        table: &[StyleTableEntry],
        active: bool,
    ) {
        let buffer = &self.buffers[pane.index()];
        if styles.len() != buffer.length() as usize {
            return;
        }
        self.styles[pane.index()].set_text(styles);
        if active {
            self.editor
                .set_highlight_data(self.styles[pane.index()].clone(), table.to_vec());
            self.editor.redraw();
        }
    }

    pub fn clear_styles(&mut self) {
        for pane in Pane::ALL {
            let len = self.buffers[pane.index()].length() as usize;
            self.styles[pane.index()].set_text(&plain_styles(len));
        }
        self.editor.redraw();
    }

    pub fn set_line_numbers(&mut self, enabled: bool) {
        self.show_linenumbers = enabled;
        self.update_linenumber_width();
        self.editor.redraw();
    }

    fn update_linenumber_width(&mut self) {
        if !self.show_linenumbers {
            self.editor.set_linenumber_width(0);
            return;
        }
        let lines = self
            .editor
            .buffer()
            .map(|b| b.count_lines(0, b.length()))
            .unwrap_or(0);
        let digits = ((lines + 1) as f64).log10().floor() as i32 + 1;
        self.editor.set_linenumber_width((digits * 8 + 16).max(40));
    }

    pub fn set_word_wrap(&mut self, enabled: bool) {
        let mode = if enabled { WrapMode::AtBounds } else { WrapMode::None };
        self.editor.wrap_mode(mode, 0);
        self.editor.redraw();
    }

    pub fn set_font(&mut self, font: Font, size: i32) {
        self.editor.set_text_font(font);
        self.editor.set_text_size(size);
        self.editor.redraw();
    }

    pub fn focus(&mut self) {
        let _ = self.editor.take_focus();
    }

    pub fn apply_theme(&mut self, colors: &ThemeColors, active: Pane) {
        self.colors = Some(*colors);
        self.group.set_color(colors.panel);
        self.group.set_frame(FrameType::FlatBox);
        self.clear_btn.set_color(colors.panel);
        self.clear_btn.set_label_color(colors.muted);
        apply_editor_theme(&mut self.editor, colors);
        self.paint_tabs(active);
        self.group.redraw();
    }

    fn paint_tabs(&mut self, active: Pane) {
        let Some(colors) = self.colors else {
            return;
        };
        for pane in Pane::ALL {
            let btn = &mut self.tabs[pane.index()];
            if pane == active {
                btn.set_color(colors.accent);
                btn.set_label_color(Color::White);
            } else {
                btn.set_color(colors.panel);
                btn.set_label_color(colors.muted);
            }
            btn.redraw();
        }
    }
}
