use std::fs;
use std::path::Path;
use std::time::Duration;

use fltk::{app::Sender, prelude::*};

use super::controllers::editor::EditorSurface;
use super::controllers::palette::{CommandContext, CommandRegistry, PaletteState};
use super::controllers::preview::PreviewController;
use super::controllers::resize::PanelResizer;
use super::domain::device::DeviceKind;
use super::domain::messages::Message;
use super::domain::settings::{AppSettings, ThemeMode};
use super::domain::source::{Pane, SourceSet};
use super::infrastructure::surface::{BrowserSurface, RenderSurface};
use super::infrastructure::timer::send_after;
use super::services::compose::{ComposePipeline, Settled, compose_sources};
use super::services::debounce::Ticket;
use super::services::export::{self, ArchiveWriter, Artifact, ExportError};
use super::services::session::{self, SessionData};
use super::services::syntax::SyntaxHighlighter;
use crate::ui::dialogs::{alert, confirm};
use crate::ui::file_dialogs::native_save_dialog;
use crate::ui::main_window::{DIVIDER_WIDTH, INITIAL_EDITOR_WIDTH, MainWidgets};
use crate::ui::menu::{
    DARK_MODE_ITEM, FULLSCREEN_ITEM, HIGHLIGHTING_ITEM, LINE_NUMBERS_ITEM, WORD_WRAP_ITEM,
    device_item, set_menu_checkbox,
};
use crate::ui::theme::{apply_window_theme, font_for, theme_colors};
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// Owns every piece of application state and the widgets that show it.
/// `main` feeds it one `Message` at a time.
pub struct AppState {
    pub widgets: MainWidgets,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub dark_mode: bool,
    pub show_linenumbers: bool,
    pub word_wrap: bool,
    pub highlighting_enabled: bool,
    editor: EditorSurface,
    pipeline: ComposePipeline,
    preview: PreviewController,
    browser: BrowserSurface,
    /// Set once the user opened the preview in the browser; later publishes rewrite it.
    browser_live: bool,
    palette: PaletteState,
    resizer: PanelResizer,
    highlighter: SyntaxHighlighter,
    archiver: Option<Box<dyn ArchiveWriter>>,
    last_save_directory: Option<String>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: AppSettings,
        dark_mode: bool,
        sources: SourceSet,
        active: Pane,
    ) -> Self {
        let pipeline =
            ComposePipeline::new(&sources, settings.settle_delay(), settings.compose_delay());
        let font = font_for(settings.font);
        let highlighter = SyntaxHighlighter::new(
            settings.current_syntax_theme(dark_mode),
            font,
            settings.font_size as i32,
        );
        let ctx = CommandContext { dark_mode, fullscreen: false };
        let resizer = PanelResizer::new(INITIAL_EDITOR_WIDTH);

        Self {
            show_linenumbers: settings.line_numbers_enabled,
            word_wrap: settings.word_wrap_enabled,
            highlighting_enabled: settings.highlighting_enabled,
            editor: EditorSurface::new(sources, active),
            pipeline,
            preview: PreviewController::new(settings.default_device),
            browser: BrowserSurface::new(),
            browser_live: false,
            palette: PaletteState::new(CommandRegistry::build(&ctx).into_entries()),
            resizer,
            highlighter,
            archiver: export::default_archive_writer(),
            last_save_directory: None,
            widgets,
            sender,
            settings,
            dark_mode,
        }
    }

    /// Apply settings to the widgets, show the active pane and schedule the first compose.
    pub fn start(&mut self) {
        let font = font_for(self.settings.font);
        let size = self.settings.font_size as i32;
        self.widgets.editor_panel.set_font(font, size);
        self.widgets.editor_panel.set_line_numbers(self.show_linenumbers);
        self.widgets.editor_panel.set_word_wrap(self.word_wrap);
        self.apply_theme();
        self.show_active_pane();

        let ticket = self.pipeline.request_compose();
        self.schedule(self.pipeline.compose_delay(), Message::ComposeDue(ticket));
        tracing::info!(
            "Started with settle {:?} and compose {:?}",
            self.pipeline.settle_delay(),
            self.pipeline.compose_delay()
        );
    }

    fn schedule(&self, delay: Duration, msg: Message) {
        send_after(self.sender, delay, msg);
    }

    // --- Pipeline ---

    pub fn source_edited(&mut self, pane: Pane) {
        let text = self.widgets.editor_panel.text(pane);
        self.editor.replace(pane, text.clone());
        let ticket = self.pipeline.edit(pane, text);
        self.schedule(self.pipeline.settle_delay(), Message::SourceSettled(pane, ticket));
    }

    pub fn source_settled(&mut self, pane: Pane, ticket: Ticket) {
        match self.pipeline.settle(pane, ticket) {
            Settled::Stale => return,
            Settled::Unchanged => {}
            Settled::Changed(compose) => {
                tracing::debug!("{} settled", pane.label());
                self.schedule(self.pipeline.compose_delay(), Message::ComposeDue(compose));
            }
        }
        self.highlight_pane(pane);
    }

    pub fn compose_due(&mut self, ticket: Ticket) {
        let Some(document) = self.pipeline.compose_due(ticket) else {
            return;
        };
        // A pending refresh already holds text at least as new as the settled values
        if self.preview.is_refreshing() {
            return;
        }
        self.preview.publish(document);
        self.present();
    }

    /// Compose from the live editors, ignoring anything still settling. The
    /// preview goes blank first and gets the new document on the next loop turn.
    pub fn refresh_preview(&mut self) {
        let document = compose_sources(self.editor.sources());
        self.pipeline.cancel_compose();
        let ticket = self.preview.begin_refresh(document);
        self.present();
        self.schedule(Duration::ZERO, Message::RefreshDue(ticket));
    }

    pub fn refresh_due(&mut self, ticket: Ticket) {
        if self.preview.complete_refresh(ticket) {
            self.present();
        }
    }

    fn present(&mut self) {
        let frame = self.preview.frame();
        if let Err(e) = self.widgets.preview_panel.present(&frame) {
            tracing::warn!("Preview panel: {}", e);
        }
        if self.browser_live
            && let Err(e) = self.browser.present(&frame)
        {
            tracing::warn!("Browser preview: {}", e);
        }
    }

    pub fn open_in_browser(&mut self) {
        let frame = self.preview.frame();
        match self.browser.show(&frame) {
            Ok(()) => self.browser_live = true,
            Err(e) => {
                tracing::error!("Could not open preview in browser: {}", e);
                alert(&e.to_string());
            }
        }
    }

    // --- Editor ---

    fn show_active_pane(&mut self) {
        let table = self.highlighter.style_table();
        self.widgets.editor_panel.show_pane(self.editor.active(), &table);
    }

    pub fn switch_pane(&mut self, pane: Pane) {
        self.editor.set_active(pane);
        self.show_active_pane();
        self.widgets.editor_panel.focus();
    }

    pub fn clear_pane(&mut self, pane: Pane) {
        if self.editor.clear(pane, confirm) {
            // The buffer's modify callback feeds this into the pipeline
            self.widgets.editor_panel.set_text(pane, "");
        }
    }

    pub fn clear_active_pane(&mut self) {
        self.clear_pane(self.editor.active());
    }

    pub fn new_project(&mut self) {
        if self.editor.new_project(confirm) {
            for pane in Pane::ALL {
                self.widgets.editor_panel.set_text(pane, "");
            }
            tracing::info!("Started a new project");
        }
    }

    // --- Export ---

    pub fn save_html(&mut self) {
        let artifact = export::export_html(self.editor.sources());
        self.save_artifact(&artifact);
    }

    pub fn download_zip(&mut self) {
        match export::export_archive(self.editor.sources(), self.archiver.as_deref()) {
            Ok(artifact) => self.save_artifact(&artifact),
            Err(e @ ExportError::ArchiverUnavailable) => {
                tracing::warn!("ZIP export requested without an archive backend");
                alert(e.user_message());
            }
            Err(e) => {
                tracing::error!("Failed to generate ZIP file: {}", e);
                alert(e.user_message());
            }
        }
    }

    fn save_artifact(&mut self, artifact: &Artifact) {
        let last_dir = self.last_save_directory.as_deref();
        let Some(path) = native_save_dialog(artifact.file_name, last_dir) else {
            return;
        };
        if let Some(parent) = Path::new(&path).parent() {
            self.last_save_directory = Some(parent.to_string_lossy().to_string());
        }
        match fs::write(&path, &artifact.bytes) {
            Ok(()) => tracing::info!(
                "Saved {} ({}, {} bytes)",
                path,
                artifact.mime,
                artifact.bytes.len()
            ),
            Err(e) => {
                tracing::error!("Failed to write {}: {}", path, e);
                alert(&format!("Error saving file: {}", e));
            }
        }
    }

    // --- Preview controls ---

    pub fn set_device(&mut self, kind: DeviceKind) {
        if self.preview.set_device(kind) {
            set_menu_checkbox(&self.widgets.menu, &device_item(kind), true);
            self.present();
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        let fullscreen = self.preview.toggle_fullscreen();
        self.resizer.release();
        let w = &mut self.widgets;
        if fullscreen {
            w.editor_panel.group.hide();
            w.divider.hide();
            w.header.group.hide();
        } else {
            w.editor_panel.group.show();
            w.divider.show();
            w.header.group.show();
        }
        relayout(&mut w.root);
        if !fullscreen {
            let width = self.resizer.fit(w.body.w() - DIVIDER_WIDTH);
            w.body.fixed(&w.editor_panel.group, width);
        }
        relayout(&mut w.body);
        set_menu_checkbox(&w.menu, FULLSCREEN_ITEM, fullscreen);
        self.present();
        self.rebuild_commands();
    }

    // --- Appearance ---

    pub fn toggle_theme(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        if self.dark_mode == dark {
            return;
        }
        self.dark_mode = dark;
        self.settings.theme_mode = if dark { ThemeMode::Dark } else { ThemeMode::Light };
        self.save_settings();
        self.apply_theme();
        self.rebuild_commands();
    }

    fn apply_theme(&mut self) {
        let colors = theme_colors(self.dark_mode);
        let w = &mut self.widgets;
        apply_window_theme(&mut w.wind, &mut w.menu, &colors);
        w.header.apply_theme(&colors, self.dark_mode);
        w.editor_panel.apply_theme(&colors, self.editor.active());
        w.preview_panel.apply_theme(&colors);
        w.palette.apply_theme(&colors);
        w.divider.set_color(colors.divider);
        w.divider.redraw();
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&w.wind, self.dark_mode);
        set_menu_checkbox(&w.menu, DARK_MODE_ITEM, self.dark_mode);

        self.highlighter
            .set_theme(self.settings.current_syntax_theme(self.dark_mode));
        self.rehighlight_all();
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_linenumbers = !self.show_linenumbers;
        self.widgets.editor_panel.set_line_numbers(self.show_linenumbers);
        self.settings.line_numbers_enabled = self.show_linenumbers;
        self.save_settings();
        set_menu_checkbox(&self.widgets.menu, LINE_NUMBERS_ITEM, self.show_linenumbers);
    }

    pub fn toggle_word_wrap(&mut self) {
        self.word_wrap = !self.word_wrap;
        self.widgets.editor_panel.set_word_wrap(self.word_wrap);
        self.settings.word_wrap_enabled = self.word_wrap;
        self.save_settings();
        set_menu_checkbox(&self.widgets.menu, WORD_WRAP_ITEM, self.word_wrap);
    }

    pub fn toggle_highlighting(&mut self) {
        self.highlighting_enabled = !self.highlighting_enabled;
        self.settings.highlighting_enabled = self.highlighting_enabled;
        self.save_settings();
        set_menu_checkbox(&self.widgets.menu, HIGHLIGHTING_ITEM, self.highlighting_enabled);
        self.rehighlight_all();
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    // --- Syntax highlighting ---

    fn highlight_pane(&mut self, pane: Pane) {
        if !self.highlighting_enabled {
            return;
        }
        let styles = self.highlighter.highlight(pane, self.editor.text(pane));
        let table = self.highlighter.style_table();
        let active = pane == self.editor.active();
        self.widgets.editor_panel.set_styles(pane, &styles, &table, active);
    }

    fn rehighlight_all(&mut self) {
        if self.highlighting_enabled {
            for pane in Pane::ALL {
                self.highlight_pane(pane);
            }
        } else {
            self.widgets.editor_panel.clear_styles();
        }
        self.show_active_pane();
    }

    // --- Command palette ---

    fn rebuild_commands(&mut self) {
        let ctx = CommandContext {
            dark_mode: self.dark_mode,
            fullscreen: self.preview.is_fullscreen(),
        };
        self.palette
            .set_commands(CommandRegistry::build(&ctx).into_entries());
        if self.palette.is_open() {
            self.widgets.palette.render(&self.palette);
        }
    }

    pub fn toggle_palette(&mut self) {
        if self.palette.toggle() {
            self.widgets.palette.show(&self.widgets.wind);
            self.widgets.palette.render(&self.palette);
        } else {
            self.widgets.palette.hide();
        }
    }

    pub fn close_palette(&mut self) {
        self.palette.close();
        self.widgets.palette.hide();
    }

    pub fn palette_search_changed(&mut self) {
        let search = self.widgets.palette.search();
        self.palette.set_search(&search);
        self.widgets.palette.render(&self.palette);
    }

    pub fn palette_next(&mut self) {
        self.palette.select_next();
        self.widgets.palette.render(&self.palette);
    }

    pub fn palette_previous(&mut self) {
        self.palette.select_previous();
        self.widgets.palette.render(&self.palette);
    }

    pub fn palette_activate_selected(&mut self) {
        let action = self.palette.activate_selected();
        self.run_palette_action(action);
    }

    pub fn palette_row_clicked(&mut self, line: i32) {
        let Some(index) = self.widgets.palette.row_index(line) else {
            return;
        };
        let action = self.palette.activate(index);
        self.run_palette_action(action);
    }

    fn run_palette_action(&mut self, action: Option<Message>) {
        if let Some(msg) = action {
            self.widgets.palette.hide();
            self.sender.send(msg);
        }
    }

    // --- Panel resize ---

    pub fn resize_start(&mut self) {
        if self.preview.is_fullscreen() {
            return;
        }
        let body = &self.widgets.body;
        self.resizer.press(body.x(), body.w() - DIVIDER_WIDTH);
    }

    pub fn resize_move(&mut self, pointer_x: i32) {
        if let Some(width) = self.resizer.drag(pointer_x) {
            let w = &mut self.widgets;
            w.body.fixed(&w.editor_panel.group, width);
            relayout(&mut w.body);
            let frame = self.preview.frame();
            w.preview_panel.relayout(&frame);
        }
    }

    pub fn resize_end(&mut self) {
        if self.resizer.is_resizing() {
            self.resizer.release();
            tracing::debug!("Editor width {}", self.resizer.width());
        }
    }

    // --- Quit ---

    /// Persist what needs persisting. Returns true when the app may exit.
    pub fn quit(&mut self) -> bool {
        self.close_palette();
        if self.settings.session_restore {
            let data = SessionData {
                active: self.editor.active(),
                sources: self.editor.sources().clone(),
            };
            if let Err(e) = session::save_session(&data) {
                tracing::warn!("Failed to save session: {}", e);
            }
        }
        self.browser.cleanup();
        true
    }
}

/// Make a flex lay its children out again after a fixed size or visibility change.
fn relayout(flex: &mut fltk::group::Flex) {
    let (x, y, w, h) = (flex.x(), flex.y(), flex.w(), flex.h());
    flex.resize(x, y, w, h);
    flex.redraw();
}
