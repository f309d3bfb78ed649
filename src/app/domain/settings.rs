use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::domain::device::DeviceKind;
use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FontChoice {
    ScreenBold,
    Courier,
    HelveticaMono,
}

/// Syntax highlighting themes bundled with syntect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyntaxTheme {
    #[default]
    Base16OceanDark,
    Base16OceanLight,
    Base16MochaDark,
    SolarizedDark,
    SolarizedLight,
    InspiredGitHub,
}

impl SyntaxTheme {
    /// Key of this theme in syntect's default `ThemeSet`.
    pub fn theme_key(&self) -> &'static str {
        match self {
            Self::Base16OceanDark => "base16-ocean.dark",
            Self::Base16OceanLight => "base16-ocean.light",
            Self::Base16MochaDark => "base16-mocha.dark",
            Self::SolarizedDark => "Solarized (dark)",
            Self::SolarizedLight => "Solarized (light)",
            Self::InspiredGitHub => "InspiredGitHub",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    #[serde(default = "default_word_wrap")]
    pub word_wrap_enabled: bool,

    #[serde(default = "default_highlighting")]
    pub highlighting_enabled: bool,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font")]
    pub font: FontChoice,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Quiet period after the last keystroke before a pane's text counts as settled.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Extra wait after any pane settles, so panes settling together compose once.
    #[serde(default = "default_compose_delay_ms")]
    pub compose_delay_ms: u64,

    #[serde(default)]
    pub default_device: DeviceKind,

    #[serde(default = "default_syntax_theme_light")]
    pub syntax_theme_light: SyntaxTheme,

    #[serde(default = "default_syntax_theme_dark")]
    pub syntax_theme_dark: SyntaxTheme,

    /// Restore the three editors from the last run.
    #[serde(default)]
    pub session_restore: bool,
}

fn default_line_numbers() -> bool {
    true
}

fn default_word_wrap() -> bool {
    false
}

fn default_highlighting() -> bool {
    true
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Dark
}

fn default_font() -> FontChoice {
    FontChoice::Courier
}

fn default_font_size() -> u32 {
    14
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_compose_delay_ms() -> u64 {
    250
}

fn default_syntax_theme_light() -> SyntaxTheme {
    SyntaxTheme::InspiredGitHub
}

fn default_syntax_theme_dark() -> SyntaxTheme {
    SyntaxTheme::Base16OceanDark
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            line_numbers_enabled: default_line_numbers(),
            word_wrap_enabled: default_word_wrap(),
            highlighting_enabled: default_highlighting(),
            theme_mode: default_theme_mode(),
            font: default_font(),
            font_size: default_font_size(),
            settle_delay_ms: default_settle_delay_ms(),
            compose_delay_ms: default_compose_delay_ms(),
            default_device: DeviceKind::default(),
            syntax_theme_light: default_syntax_theme_light(),
            syntax_theme_dark: default_syntax_theme_dark(),
            session_restore: false,
        }
    }
}

impl AppSettings {
    pub fn current_syntax_theme(&self, is_dark: bool) -> SyntaxTheme {
        if is_dark {
            self.syntax_theme_dark
        } else {
            self.syntax_theme_light
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn compose_delay(&self) -> Duration {
        Duration::from_millis(self.compose_delay_ms)
    }

    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse settings at {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                let default = Self::default();
                if let Err(e) = default.save_to(path) {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("ferrisfiddle");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.settle_delay(), Duration::from_millis(500));
        assert_eq!(settings.compose_delay(), Duration::from_millis(250));
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.default_device, DeviceKind::Desktop);
        assert!(settings.line_numbers_enabled);
        assert!(!settings.session_restore);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"settle_delay_ms": 800, "default_device": "Tablet"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.settle_delay_ms, 800);
        assert_eq!(settings.default_device, DeviceKind::Tablet);
        assert_eq!(settings.compose_delay_ms, 250);
        assert_eq!(settings.font_size, 14);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            theme_mode: ThemeMode::Light,
            session_restore: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_syntax_theme_by_mode() {
        let settings = AppSettings::default();
        assert_eq!(settings.current_syntax_theme(true), SyntaxTheme::Base16OceanDark);
        assert_eq!(settings.current_syntax_theme(false), SyntaxTheme::InspiredGitHub);
    }
}
