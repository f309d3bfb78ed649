use fltk::dialog;

/// Yes/no question for destructive actions. Anything but "Yes" declines.
pub fn confirm(prompt: &str) -> bool {
    matches!(dialog::choice2_default(prompt, "Cancel", "Yes", ""), Some(1))
}

pub fn alert(message: &str) {
    dialog::alert_default(message);
}
