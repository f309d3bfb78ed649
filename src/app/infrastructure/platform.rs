use crate::app::domain::settings::ThemeMode;

/// Whether the UI should be dark for the configured mode.
pub fn resolve_dark_mode(mode: ThemeMode) -> bool {
    match mode {
        ThemeMode::Dark => true,
        ThemeMode::Light => false,
        ThemeMode::SystemDefault => system_prefers_dark(),
    }
}

/// Best-effort read of the desktop's colour preference. Light when unknown.
pub fn system_prefers_dark() -> bool {
    #[cfg(target_os = "windows")]
    {
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        let personalize = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize");
        if let Ok(key) = personalize
            && let Ok(light) = key.get_value::<u32, _>("AppsUseLightTheme")
        {
            return light == 0;
        }
    }

    #[cfg(target_os = "linux")]
    {
        let checks: [(&str, &str); 2] = [("color-scheme", "prefer-dark"), ("gtk-theme", "dark")];
        for (key, needle) in checks {
            let args = ["get", "org.gnome.desktop.interface", key];
            if let Some(value) = command_output("gsettings", &args)
                && value.to_lowercase().contains(needle)
            {
                return true;
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(style) = command_output("defaults", &["read", "-g", "AppleInterfaceStyle"]) {
            return style.to_lowercase().contains("dark");
        }
    }

    false
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        tracing::debug!("{} {:?} exited with {}", program, args, output.status);
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes_ignore_system() {
        assert!(resolve_dark_mode(ThemeMode::Dark));
        assert!(!resolve_dark_mode(ThemeMode::Light));
    }
}
