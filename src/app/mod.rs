//! Application layer.
//!
//! # Structure
//!
//! - `domain/` - Core data (panes and sources, devices, settings, messages)
//! - `services/` - Debounce, compose, export, session, syntax highlighting
//! - `controllers/` - Editor, preview, command palette, panel resize
//! - `infrastructure/` - Errors, platform detection, render surfaces, timers
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::palette::{CommandContext, CommandEntry, CommandRegistry, PaletteState};
pub use controllers::preview::{PreviewController, PreviewFrame};
pub use domain::{AppSettings, DeviceKind, Message, Pane, SourceSet, ThemeMode};
pub use infrastructure::error::{AppError, Result};
pub use services::compose::{ComposePipeline, compose_preview};
pub use services::export::{ExportError, export_archive, export_html};
