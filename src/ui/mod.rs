pub mod command_palette;
pub mod dialogs;
pub mod editor_panel;
pub mod file_dialogs;
pub mod header;
pub mod main_window;
pub mod menu;
pub mod preview_panel;
pub mod theme;
