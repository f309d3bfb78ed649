//! Domain layer - core data structures and types.
//!
//! - Panes and their source texts
//! - Device presets for the preview viewport
//! - Application settings
//! - Message types for the event system

pub mod device;
pub mod messages;
pub mod settings;
pub mod source;

pub use device::{DEVICES, DeviceKind, DevicePreset, Dimension};
pub use messages::Message;
pub use settings::{AppSettings, FontChoice, SyntaxTheme, ThemeMode};
pub use source::{Pane, SourceSet};
