//! Command palette: the registry of named actions and the palette's
//! search and selection state.

use crate::app::domain::device::DeviceKind;
use crate::app::domain::messages::Message;
use crate::app::domain::source::Pane;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Sun,
    Moon,
    Code,
    Braces,
    FileJson,
    Trash,
    Refresh,
    Maximize,
    Minimize,
    Desktop,
    Tablet,
    Mobile,
    FilePlus,
    Save,
    Download,
}

impl Icon {
    /// Short text glyph drawn in front of the command name.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Sun => "☀",
            Icon::Moon => "☾",
            Icon::Code => "</>",
            Icon::Braces => "{ }",
            Icon::FileJson => "JS",
            Icon::Trash => "✕",
            Icon::Refresh => "↻",
            Icon::Maximize => "⤢",
            Icon::Minimize => "⤡",
            Icon::Desktop => "▭",
            Icon::Tablet => "▯",
            Icon::Mobile => "▮",
            Icon::FilePlus => "+",
            Icon::Save => "⎙",
            Icon::Download => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub keywords: Vec<&'static str>,
    pub action: Message,
    pub icon: Icon,
}

impl CommandEntry {
    pub fn new(
        id: &'static str,
        name: &'static str,
        category: &'static str,
        action: Message,
        icon: Icon,
    ) -> Self {
        Self {
            id,
            name,
            category,
            keywords: Vec::new(),
            action,
            icon,
        }
    }

    pub fn with_keywords(mut self, keywords: &[&'static str]) -> Self {
        self.keywords = keywords.to_vec();
        self
    }

    /// Case-insensitive substring match on name, category or the joined keywords.
    /// `needle` must already be lower-case.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.keywords.join(" ").to_lowercase().contains(needle)
    }
}

/// The bits of app state that change which commands exist or how they look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandContext {
    pub dark_mode: bool,
    pub fullscreen: bool,
}

/// Ordered command list. Rebuilt from a [`CommandContext`] whenever that changes.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn build(ctx: &CommandContext) -> Self {
        let mut registry = Self::default();

        let theme_icon = if ctx.dark_mode { Icon::Sun } else { Icon::Moon };
        registry
            .push(
                CommandEntry::new(
                    "toggle-theme",
                    "Toggle Theme",
                    "Appearance",
                    Message::ToggleTheme,
                    theme_icon,
                )
                .with_keywords(&["color", "scheme"]),
            )
            .push_if(
                !ctx.dark_mode,
                CommandEntry::new(
                    "dark-mode",
                    "Switch to Dark Mode",
                    "Appearance",
                    Message::SetDarkMode(true),
                    Icon::Moon,
                ),
            )
            .push_if(
                ctx.dark_mode,
                CommandEntry::new(
                    "light-mode",
                    "Switch to Light Mode",
                    "Appearance",
                    Message::SetDarkMode(false),
                    Icon::Sun,
                ),
            );

        let editors = [
            (Pane::Html, "switch-html", "Switch to HTML Editor", Icon::Code),
            (Pane::Css, "switch-css", "Switch to CSS Editor", Icon::Braces),
            (Pane::Js, "switch-js", "Switch to JS Editor", Icon::FileJson),
        ];
        for (pane, id, name, icon) in editors {
            registry.push(
                CommandEntry::new(id, name, "Editor", Message::SwitchPane(pane), icon)
                    .with_keywords(&["tab", "pane"]),
            );
        }
        let clears = [
            (Pane::Html, "clear-html", "Clear HTML Code"),
            (Pane::Css, "clear-css", "Clear CSS Code"),
            (Pane::Js, "clear-js", "Clear JS Code"),
        ];
        for (pane, id, name) in clears {
            registry.push(
                CommandEntry::new(id, name, "Editor", Message::ClearPane(pane), Icon::Trash)
                    .with_keywords(&["delete", "empty"]),
            );
        }

        let fullscreen_icon = if ctx.fullscreen { Icon::Minimize } else { Icon::Maximize };
        registry
            .push(
                CommandEntry::new(
                    "refresh-preview",
                    "Refresh Preview",
                    "Preview",
                    Message::RefreshPreview,
                    Icon::Refresh,
                )
                .with_keywords(&["reload", "run"]),
            )
            .push(
                CommandEntry::new(
                    "toggle-fullscreen",
                    "Toggle Fullscreen",
                    "Preview",
                    Message::ToggleFullscreen,
                    fullscreen_icon,
                )
                .with_keywords(&["maximize", "expand"]),
            );

        let devices = [
            (DeviceKind::Desktop, "view-desktop", "Switch to Desktop View", None),
            (DeviceKind::Tablet, "view-tablet", "Switch to Tablet View", Some("ipad")),
            (DeviceKind::Mobile, "view-mobile", "Switch to Mobile View", Some("phone")),
        ];
        for (kind, id, name, extra) in devices {
            let icon = match kind {
                DeviceKind::Desktop => Icon::Desktop,
                DeviceKind::Tablet => Icon::Tablet,
                DeviceKind::Mobile => Icon::Mobile,
            };
            let mut keywords = vec!["device", "responsive"];
            keywords.extend(extra);
            registry.push(
                CommandEntry::new(id, name, "Preview", Message::SetDevice(kind), icon)
                    .with_keywords(&keywords),
            );
        }

        registry
            .push(
                CommandEntry::new(
                    "new-project",
                    "New Project",
                    "Project",
                    Message::NewProject,
                    Icon::FilePlus,
                )
                .with_keywords(&["reset"]),
            )
            .push(
                CommandEntry::new(
                    "save-html",
                    "Save as HTML",
                    "Project",
                    Message::SaveHtml,
                    Icon::Save,
                )
                .with_keywords(&["export", "file"]),
            )
            .push(
                CommandEntry::new(
                    "download-zip",
                    "Download as ZIP",
                    "Project",
                    Message::DownloadZip,
                    Icon::Download,
                )
                .with_keywords(&["export", "archive"]),
            );

        registry
    }

    pub fn push(&mut self, entry: CommandEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn push_if(&mut self, include: bool, entry: CommandEntry) -> &mut Self {
        if include {
            self.entries.push(entry);
        }
        self
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CommandEntry> {
        self.entries
    }
}

/// Entries matching `search`, in registry order. Empty search matches everything.
pub fn filter<'a>(entries: &'a [CommandEntry], search: &str) -> Vec<&'a CommandEntry> {
    let needle = search.to_lowercase();
    entries.iter().filter(|entry| entry.matches(&needle)).collect()
}

/// One category header and its entries, each paired with its index in the
/// filtered list.
#[derive(Debug)]
pub struct CommandGroup<'a> {
    pub category: &'static str,
    pub entries: Vec<(usize, &'a CommandEntry)>,
}

#[derive(Debug, Default)]
pub struct PaletteState {
    open: bool,
    search: String,
    selected: usize,
    commands: Vec<CommandEntry>,
}

impl PaletteState {
    pub fn new(commands: Vec<CommandEntry>) -> Self {
        Self {
            commands,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening always starts from an empty search.
    pub fn open(&mut self) {
        self.open = true;
        self.set_search("");
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open();
        }
        self.open
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.selected = 0;
    }

    pub fn set_commands(&mut self, commands: Vec<CommandEntry>) {
        self.commands = commands;
        self.selected = 0;
    }

    pub fn filtered(&self) -> Vec<&CommandEntry> {
        filter(&self.commands, &self.search)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn selected_entry(&self) -> Option<&CommandEntry> {
        self.filtered().get(self.selected).copied()
    }

    /// Action of the entry at `index` in the filtered list. Closes the palette
    /// when there is one.
    pub fn activate(&mut self, index: usize) -> Option<Message> {
        let action = self.filtered().get(index).map(|entry| entry.action)?;
        self.close();
        Some(action)
    }

    pub fn activate_selected(&mut self) -> Option<Message> {
        let id = self.selected_entry()?.id;
        tracing::debug!("Palette runs {}", id);
        self.activate(self.selected)
    }

    /// Filtered entries grouped by category, groups in first-appearance order.
    pub fn grouped(&self) -> Vec<CommandGroup<'_>> {
        let mut groups: Vec<CommandGroup<'_>> = Vec::new();
        for (index, entry) in self.filtered().into_iter().enumerate() {
            match groups.iter_mut().find(|g| g.category == entry.category) {
                Some(group) => group.entries.push((index, entry)),
                None => groups.push(CommandGroup {
                    category: entry.category,
                    entries: vec![(index, entry)],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[&CommandEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.id).collect()
    }

    fn light() -> Vec<CommandEntry> {
        let ctx = CommandContext { dark_mode: false, fullscreen: false };
        CommandRegistry::build(&ctx).into_entries()
    }

    #[test]
    fn test_registry_order_light() {
        let entries = light();
        let all: Vec<&CommandEntry> = entries.iter().collect();
        assert_eq!(
            ids(&all),
            vec![
                "toggle-theme", "dark-mode", "switch-html", "switch-css", "switch-js",
                "clear-html", "clear-css", "clear-js", "refresh-preview", "toggle-fullscreen",
                "view-desktop", "view-tablet", "view-mobile", "new-project", "save-html",
                "download-zip",
            ]
        );
    }

    #[test]
    fn test_exactly_one_mode_entry() {
        for dark_mode in [false, true] {
            let registry = CommandRegistry::build(&CommandContext { dark_mode, fullscreen: false });
            let modes: Vec<&str> = registry
                .entries()
                .iter()
                .map(|e| e.id)
                .filter(|id| *id == "dark-mode" || *id == "light-mode")
                .collect();
            assert_eq!(modes, vec![if dark_mode { "light-mode" } else { "dark-mode" }]);
        }
    }

    #[test]
    fn test_icons_follow_state() {
        let ctx = CommandContext { dark_mode: true, fullscreen: true };
        let registry = CommandRegistry::build(&ctx);
        let icon = |id: &str| registry.entries().iter().find(|e| e.id == id).map(|e| e.icon);
        assert_eq!(icon("toggle-theme"), Some(Icon::Sun));
        assert_eq!(icon("toggle-fullscreen"), Some(Icon::Minimize));
    }

    #[test]
    fn test_device_entries_share_keywords() {
        let entries = light();
        let tablet = entries.iter().find(|e| e.id == "view-tablet").unwrap();
        assert_eq!(tablet.icon, Icon::Tablet);
        assert_eq!(tablet.keywords, vec!["device", "responsive", "ipad"]);
        assert_eq!(ids(&filter(&entries, "responsive")).len(), 3);
    }

    #[test]
    fn test_dark_search_in_light_mode() {
        let entries = light();
        let names: Vec<&str> = filter(&entries, "dark").iter().map(|e| e.name).collect();
        assert!(names.contains(&"Switch to Dark Mode"));
        assert!(!names.contains(&"Switch to Light Mode"));
    }

    #[test]
    fn test_filter_is_case_insensitive_on_name_category_keywords() {
        let entries = light();
        assert_eq!(ids(&filter(&entries, "REFRESH")), vec!["refresh-preview"]);
        assert_eq!(
            ids(&filter(&entries, "project")),
            vec!["new-project", "save-html", "download-zip"]
        );
        assert_eq!(ids(&filter(&entries, "Phone")), vec!["view-mobile"]);
        assert!(filter(&entries, "zzz").is_empty());
    }

    #[test]
    fn test_keywords_match_across_join() {
        let entry = CommandEntry::new("x", "X", "Misc", Message::Quit, Icon::Code)
            .with_keywords(&["alpha", "beta"]);
        assert_eq!(filter(std::slice::from_ref(&entry), "ha be").len(), 1);
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let entries = light();
        let all: Vec<&CommandEntry> = entries.iter().collect();
        assert_eq!(filter(&entries, ""), all);
    }

    #[test]
    fn test_selection_wraps() {
        let mut palette = PaletteState::new(light());
        palette.set_search("device");
        assert_eq!(palette.filtered().len(), 3);

        palette.select_previous();
        assert_eq!(palette.selected(), 2);
        palette.select_next();
        assert_eq!(palette.selected(), 0);
        palette.select_next();
        palette.select_next();
        palette.select_next();
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_selection_resets_on_search_and_commands() {
        let mut palette = PaletteState::new(light());
        palette.select_next();
        palette.select_next();
        palette.set_search("e");
        assert_eq!(palette.selected(), 0);

        palette.select_next();
        palette.set_commands(light());
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut palette = PaletteState::new(light());
        palette.set_search("nothing matches this");
        palette.select_next();
        palette.select_previous();
        assert_eq!(palette.selected(), 0);
        assert_eq!(palette.selected_entry(), None);
        assert_eq!(palette.activate_selected(), None);
    }

    #[test]
    fn test_activate_returns_action_and_closes() {
        let mut palette = PaletteState::new(light());
        palette.open();
        palette.set_search("tablet");
        assert_eq!(palette.activate_selected(), Some(Message::SetDevice(DeviceKind::Tablet)));
        assert!(!palette.is_open());
    }

    #[test]
    fn test_open_clears_search() {
        let mut palette = PaletteState::new(light());
        palette.set_search("zip");
        assert!(palette.toggle());
        assert_eq!(palette.search(), "");
        assert!(!palette.toggle());
    }

    #[test]
    fn test_grouped_keeps_filtered_indices() {
        let mut palette = PaletteState::new(light());
        palette.set_search("switch");
        let groups = palette.grouped();
        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Appearance", "Editor", "Preview"]);

        let flat: Vec<usize> = groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|(i, _)| *i))
            .collect();
        assert_eq!(flat, (0..palette.filtered().len()).collect::<Vec<_>>());
    }
}
