// Hide the console window on Windows release builds
#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

use fltk::{app, prelude::*};
use tracing_subscriber::EnvFilter;

use ferris_fiddle::app::domain::{AppSettings, Message, Pane, SourceSet};
use ferris_fiddle::app::infrastructure::platform::resolve_dark_mode;
use ferris_fiddle::app::services::session;
use ferris_fiddle::app::state::AppState;
use ferris_fiddle::ui::main_window::build_main_window;
use ferris_fiddle::ui::menu::build_menu;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ferris_fiddle=info,FerrisFiddle=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_tracing();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let dark_mode = resolve_dark_mode(settings.theme_mode);

    let restored = if settings.session_restore {
        session::load_session()
    } else {
        None
    };
    let (sources, active) = match restored {
        Some(data) => (data.sources, data.active),
        None => (SourceSet::sample(), Pane::Html),
    };

    let mut widgets = build_main_window(&sender, &sources);
    build_menu(&mut widgets.menu, &sender, &settings, dark_mode);
    widgets.wind.show();

    let mut state = AppState::new(widgets, sender, settings, dark_mode, sources, active);
    state.start();
    tracing::info!("FerrisFiddle {} ready", env!("CARGO_PKG_VERSION"));

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            // Project
            Message::NewProject => state.new_project(),
            Message::SaveHtml => state.save_html(),
            Message::DownloadZip => state.download_zip(),
            Message::Quit | Message::WindowClose => {
                if state.quit() {
                    app.quit();
                }
            }

            // Editor
            Message::SwitchPane(pane) => state.switch_pane(pane),
            Message::ClearPane(pane) => state.clear_pane(pane),
            Message::ClearActivePane => state.clear_active_pane(),
            Message::SourceEdited(pane) => state.source_edited(pane),

            // Pipeline
            Message::SourceSettled(pane, ticket) => state.source_settled(pane, ticket),
            Message::ComposeDue(ticket) => state.compose_due(ticket),
            Message::RefreshDue(ticket) => state.refresh_due(ticket),

            // Preview
            Message::RefreshPreview => state.refresh_preview(),
            Message::ToggleFullscreen => state.toggle_fullscreen(),
            Message::SetDevice(kind) => state.set_device(kind),
            Message::OpenInBrowser => state.open_in_browser(),

            // Appearance
            Message::ToggleTheme => state.toggle_theme(),
            Message::SetDarkMode(dark) => state.set_dark_mode(dark),
            Message::ToggleLineNumbers => state.toggle_line_numbers(),
            Message::ToggleWordWrap => state.toggle_word_wrap(),
            Message::ToggleHighlighting => state.toggle_highlighting(),

            // Command palette
            Message::ToggleCommandPalette => state.toggle_palette(),
            Message::ClosePalette => state.close_palette(),
            Message::PaletteSearchChanged => state.palette_search_changed(),
            Message::PaletteNext => state.palette_next(),
            Message::PalettePrevious => state.palette_previous(),
            Message::PaletteActivateSelected => state.palette_activate_selected(),
            Message::PaletteRowClicked(line) => state.palette_row_clicked(line),

            // Panel resize
            Message::ResizeStart => state.resize_start(),
            Message::ResizeMove(x) => state.resize_move(x),
            Message::ResizeEnd => state.resize_end(),
        }
    }
}
