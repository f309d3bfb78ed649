use fltk::{
    app::{self, Sender},
    draw,
    enums::{Cursor, Event, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::command_palette::CommandPaletteView;
use super::editor_panel::EditorPanel;
use super::header::{HEADER_HEIGHT, Header};
use super::preview_panel::PreviewPanel;
use crate::app::domain::messages::Message;
use crate::app::domain::source::SourceSet;

pub const DIVIDER_WIDTH: i32 = 6;
const WINDOW_WIDTH: i32 = 1280;
const WINDOW_HEIGHT: i32 = 800;
pub const INITIAL_EDITOR_WIDTH: i32 = WINDOW_WIDTH / 2;

pub struct MainWidgets {
    pub wind: Window,
    pub root: Flex,
    pub menu: MenuBar,
    pub header: Header,
    pub body: Flex,
    pub editor_panel: EditorPanel,
    pub divider: Frame,
    pub preview_panel: PreviewPanel,
    pub palette: CommandPaletteView,
}

pub fn build_main_window(sender: &Sender<Message>, sources: &SourceSet) -> MainWidgets {
    let mut wind = Window::new(100, 100, WINDOW_WIDTH, WINDOW_HEIGHT, "🦀 FerrisFiddle");
    wind.set_xclass("FerrisFiddle");
    wind.size_range(640, 400, 0, 0);

    let mut root = Flex::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT, None);
    root.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    root.fixed(&menu, 30);

    let header = Header::new(sender);
    root.fixed(&header.group, HEADER_HEIGHT);

    let mut body = Flex::default();
    body.set_type(FlexType::Row);
    body.set_spacing(0);

    let editor_panel = EditorPanel::new(sender, sources);
    body.fixed(&editor_panel.group, INITIAL_EDITOR_WIDTH);

    let divider = build_divider(sender);
    body.fixed(&divider, DIVIDER_WIDTH);

    let preview_panel = PreviewPanel::new(sender);

    body.end();
    root.end();
    wind.resizable(&root);
    wind.end();

    // Close button goes through the same quit path as the menu
    let s = *sender;
    wind.set_callback(move |_| {
        if app::event() == Event::Close {
            s.send(Message::WindowClose);
        }
    });

    let palette = CommandPaletteView::new(sender);

    MainWidgets {
        wind,
        root,
        menu,
        header,
        body,
        editor_panel,
        divider,
        preview_panel,
        palette,
    }
}

/// The draggable strip between the editors and the preview. FLTK keeps sending
/// drag and release to the pushed widget even when the pointer leaves it.
fn build_divider(sender: &Sender<Message>) -> Frame {
    let mut divider = Frame::default();
    divider.set_frame(FrameType::FlatBox);
    let s = *sender;
    divider.handle(move |_, ev| match ev {
        Event::Enter => {
            draw::set_cursor(Cursor::WE);
            true
        }
        Event::Leave => {
            draw::set_cursor(Cursor::Default);
            true
        }
        Event::Push => {
            s.send(Message::ResizeStart);
            true
        }
        Event::Drag => {
            s.send(Message::ResizeMove(app::event_x()));
            true
        }
        Event::Released => {
            draw::set_cursor(Cursor::Default);
            s.send(Message::ResizeEnd);
            true
        }
        _ => false,
    });
    divider
}
