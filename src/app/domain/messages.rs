use crate::app::domain::device::DeviceKind;
use crate::app::domain::source::Pane;
use crate::app::services::debounce::Ticket;

/// All messages that can be sent through the FLTK channel.
/// Widgets, menu items, palette entries and timers send one of these;
/// the dispatch loop in main hands them to `AppState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    // Project
    NewProject,
    SaveHtml,
    DownloadZip,
    Quit,
    WindowClose,

    // Editor
    SwitchPane(Pane),
    ClearPane(Pane),
    ClearActivePane,
    SourceEdited(Pane),

    // Preview pipeline (timer driven)
    SourceSettled(Pane, Ticket),
    ComposeDue(Ticket),
    RefreshDue(Ticket),

    // Preview
    RefreshPreview,
    ToggleFullscreen,
    SetDevice(DeviceKind),
    OpenInBrowser,

    // Appearance
    ToggleTheme,
    SetDarkMode(bool),
    ToggleLineNumbers,
    ToggleWordWrap,
    ToggleHighlighting,

    // Command palette
    ToggleCommandPalette,
    ClosePalette,
    PaletteSearchChanged,
    PaletteNext,
    PalettePrevious,
    PaletteActivateSelected,
    /// A row of the result list was clicked (1-based browser line).
    PaletteRowClicked(i32),

    // Panel resize
    ResizeStart,
    ResizeMove(i32),
    ResizeEnd,
}
