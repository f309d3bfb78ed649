//! Controllers layer - state behind each part of the window.
//!
//! - Editor panes and the active pane
//! - Preview document, device and fullscreen
//! - Command palette
//! - Divider drag

pub mod editor;
pub mod palette;
pub mod preview;
pub mod resize;
