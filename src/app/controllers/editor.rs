use crate::app::domain::source::{Pane, SourceSet};

pub const NEW_PROJECT_PROMPT: &str =
    "Start a new project? This clears the HTML, CSS and JS editors. This action cannot be undone.";

pub fn clear_prompt(pane: Pane) -> String {
    format!(
        "Are you sure you want to clear the code in the {} editor? This action cannot be undone.",
        pane.label()
    )
}

/// The live text of the three panes and which one is showing.
///
/// Every change replaces a pane's whole text. Destructive changes take a
/// `confirm` callback that receives the prompt and returns the user's answer.
pub struct EditorSurface {
    sources: SourceSet,
    active: Pane,
}

impl EditorSurface {
    pub fn new(sources: SourceSet, active: Pane) -> Self {
        Self { sources, active }
    }

    pub fn active(&self) -> Pane {
        self.active
    }

    /// Returns true if the active pane changed.
    pub fn set_active(&mut self, pane: Pane) -> bool {
        let changed = self.active != pane;
        self.active = pane;
        changed
    }

    pub fn replace(&mut self, pane: Pane, text: String) {
        self.sources.set(pane, text);
    }

    pub fn text(&self, pane: Pane) -> &str {
        self.sources.get(pane)
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Empty one pane after confirmation. Returns false if declined.
    pub fn clear(&mut self, pane: Pane, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(&clear_prompt(pane)) {
            return false;
        }
        self.sources.set(pane, String::new());
        true
    }

    /// Empty all three panes at once after confirmation.
    pub fn new_project(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(NEW_PROJECT_PROMPT) {
            return false;
        }
        self.sources = SourceSet::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> EditorSurface {
        let sources = SourceSet::new("<p>hi</p>", "p{color:red}", "console.log(1)");
        EditorSurface::new(sources, Pane::Html)
    }

    #[test]
    fn test_declined_clear_leaves_html_untouched() {
        let mut editor = surface();
        let mut asked = String::new();
        let cleared = editor.clear(Pane::Html, |prompt| {
            asked = prompt.to_string();
            false
        });
        assert!(!cleared);
        assert_eq!(editor.text(Pane::Html), "<p>hi</p>");
        assert!(asked.contains("HTML editor"));
    }

    #[test]
    fn test_confirmed_clear_empties_only_target() {
        let mut editor = surface();
        assert!(editor.clear(Pane::Css, |_| true));
        assert_eq!(editor.text(Pane::Css), "");
        assert_eq!(editor.text(Pane::Html), "<p>hi</p>");
        assert_eq!(editor.text(Pane::Js), "console.log(1)");
    }

    #[test]
    fn test_new_project_empties_all_panes() {
        let mut editor = surface();
        assert!(!editor.new_project(|_| false));
        assert!(!editor.sources().is_empty());

        assert!(editor.new_project(|prompt| prompt == NEW_PROJECT_PROMPT));
        assert!(editor.sources().is_empty());
    }

    #[test]
    fn test_set_active_reports_change() {
        let mut editor = surface();
        assert!(!editor.set_active(Pane::Html));
        assert!(editor.set_active(Pane::Js));
        assert_eq!(editor.active(), Pane::Js);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut editor = surface();
        editor.replace(Pane::Js, "alert(2)".to_string());
        assert_eq!(editor.text(Pane::Js), "alert(2)");
    }
}
