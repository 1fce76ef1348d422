use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::milestone::{DEFAULT_INITIAL_NODES, DEFAULT_PAGE_SIZE};
use crate::profile::SavePolicy;
use crate::utils::{self, RunMode};

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    /// Nodes rendered on the milestone path before any scrolling
    #[serde(default = "default_milestone_initial_nodes")]
    pub milestone_initial_nodes: usize,
    /// Nodes appended each time the path is scrolled to its end
    #[serde(default = "default_milestone_page_size")]
    pub milestone_page_size: usize,
    /// Pin the journey day instead of counting from the first launch
    #[serde(default)]
    pub current_day_override: Option<u32>,
    #[serde(default)]
    pub profile_save_policy: SavePolicy,
    #[serde(default = "default_status_timeout_secs")]
    pub status_timeout_secs: u64,
    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_tab_left")]
    pub tab_left: String,
    #[serde(default = "default_tab_right")]
    pub tab_right: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_toggle")]
    pub toggle: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_complete_day")]
    pub complete_day: String,
    #[serde(default = "default_prev_day")]
    pub prev_day: String,
    #[serde(default = "default_next_day")]
    pub next_day: String,
    #[serde(default = "default_jump_today")]
    pub jump_today: String,
    #[serde(default = "default_volume_up")]
    pub volume_up: String,
    #[serde(default = "default_volume_down")]
    pub volume_down: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_tab_bg")]
    pub tab_bg: String,
    #[serde(default = "default_unlocked")]
    pub unlocked: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            milestone_initial_nodes: default_milestone_initial_nodes(),
            milestone_page_size: default_milestone_page_size(),
            current_day_override: None,
            profile_save_policy: SavePolicy::default(),
            status_timeout_secs: default_status_timeout_secs(),
            log_filter: default_log_filter(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            tab_left: default_tab_left(),
            tab_right: default_tab_right(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            new: default_new(),
            delete: default_delete(),
            select: default_select(),
            toggle: default_toggle(),
            help: default_help(),
            complete_day: default_complete_day(),
            prev_day: default_prev_day(),
            next_day: default_next_day(),
            jump_today: default_jump_today(),
            volume_up: default_volume_up(),
            volume_down: default_volume_down(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            tab_bg: default_tab_bg(),
            unlocked: default_unlocked(),
        }
    }
}

impl Theme {
    fn preset(fg: &str, bg: &str, highlight_bg: &str, highlight_fg: &str, unlocked: &str) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
            highlight_bg: highlight_bg.to_string(),
            highlight_fg: highlight_fg.to_string(),
            tab_bg: default_tab_bg(),
            unlocked: unlocked.to_string(),
        }
    }

    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();
        themes.insert("default".to_string(), Theme::default());
        themes.insert(
            "meadow".to_string(),
            Theme::preset("#2F4F2F", "#F4FBEF", "#6C63FF", "white", "green"),
        );
        themes.insert(
            "sunset".to_string(),
            Theme::preset("#4A3000", "#FFE9A8", "#2F6FDB", "white", "#FF8C00"),
        );
        themes.insert(
            "midnight".to_string(),
            Theme::preset("white", "black", "magenta", "black", "lightcyan"),
        );
        themes
    }
}

// Default value functions
fn default_database_path() -> String {
    // This is a fallback - actual mode will be determined at load time
    if let Some(data_dir) = utils::get_data_dir(RunMode::Prod) {
        data_dir.join("zenpets.db").to_string_lossy().to_string()
    } else {
        "~/.local/share/zenpets/zenpets.db".to_string()
    }
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_tab_left() -> String {
    "Left".to_string()
}

fn default_tab_right() -> String {
    "Right".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_select() -> String {
    "Enter".to_string()
}

fn default_toggle() -> String {
    "Space".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_complete_day() -> String {
    "c".to_string()
}

fn default_prev_day() -> String {
    "[".to_string()
}

fn default_next_day() -> String {
    "]".to_string()
}

fn default_jump_today() -> String {
    "t".to_string()
}

fn default_volume_up() -> String {
    "+".to_string()
}

fn default_volume_down() -> String {
    "-".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "#6C63FF".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_tab_bg() -> String {
    "gray".to_string()
}

fn default_unlocked() -> String {
    "yellow".to_string()
}

fn default_milestone_initial_nodes() -> usize {
    DEFAULT_INITIAL_NODES
}

fn default_milestone_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_status_timeout_secs() -> u64 {
    3
}

fn default_log_filter() -> String {
    "zenpets=info".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
}

impl Config {
    /// Load configuration from the mode's config directory, or create the default if missing.
    /// The database path always follows the mode so dev runs never touch prod data.
    pub fn load_with_mode(mode: RunMode) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(mode)?;
        let mut config = Self::load_or_create(&config_path)?;
        config.database_path = Self::default_database_path_for_mode(mode);
        Ok(config)
    }

    /// Load configuration from an explicit file, creating it with defaults if missing.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::load_or_create(path)
    }

    fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents =
                fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.save_to_path(path)?;
            tracing::info!(path = %path.display(), "wrote default config");
            Ok(config)
        }
    }

    /// Save configuration to an explicit file
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(mode: RunMode) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(mode).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get default database path for a specific mode
    fn default_database_path_for_mode(mode: RunMode) -> String {
        if let Some(data_dir) = utils::get_data_dir(mode) {
            data_dir.join("zenpets.db").to_string_lossy().to_string()
        } else {
            match mode {
                RunMode::Dev => "~/.local/share/zenpets-dev/zenpets.db".to_string(),
                RunMode::Prod => "~/.local/share/zenpets/zenpets.db".to_string(),
            }
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Get the currently active theme, falling back to the default preset
    pub fn get_active_theme(&self) -> Theme {
        self.themes
            .get(&self.current_theme)
            .cloned()
            .or_else(|| Theme::get_preset_themes().remove(&self.current_theme))
            .unwrap_or_default()
    }

    /// Set the active theme by name
    pub fn set_theme(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.themes.contains_key(name) && !Theme::get_preset_themes().contains_key(name) {
            return Err(ConfigError::ThemeNotFound(name.to_string()));
        }
        self.current_theme = name.to_string();
        Ok(())
    }

    /// Get all available theme names (presets + user-defined), sorted
    pub fn get_available_themes(&self) -> Vec<String> {
        let mut themes: Vec<String> = Theme::get_preset_themes().into_keys().collect();
        for name in self.themes.keys() {
            if !themes.contains(name) {
                themes.push(name.clone());
            }
        }
        themes.sort();
        themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.milestone_initial_nodes, 30);
        assert_eq!(config.milestone_page_size, 20);
        assert_eq!(config.profile_save_policy, SavePolicy::Immediate);
        assert_eq!(config.key_bindings.quit, "q");
        assert_eq!(config.current_day_override, None);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: Config = toml::from_str(
            r#"
            current_day_override = 5
            profile_save_policy = "on_commit"

            [key_bindings]
            quit = "Ctrl+q"
            "#,
        )
        .unwrap();
        assert_eq!(config.current_day_override, Some(5));
        assert_eq!(config.profile_save_policy, SavePolicy::OnCommit);
        assert_eq!(config.key_bindings.quit, "Ctrl+q");
        assert_eq!(config.key_bindings.delete, "d");
    }

    #[test]
    fn load_from_missing_path_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.config_version, Some(CURRENT_CONFIG_VERSION));

        let reread = Config::load_from_path(&path).unwrap();
        assert_eq!(reread.log_filter, config.log_filter);
    }

    #[test]
    fn theme_selection_falls_back_to_presets() {
        let mut config = Config::default();
        assert!(config.set_theme("meadow").is_ok());
        assert_eq!(config.get_active_theme().bg, "#F4FBEF");
        assert!(matches!(config.set_theme("neon"), Err(ConfigError::ThemeNotFound(_))));

        config.current_theme = "vanished".to_string();
        assert_eq!(config.get_active_theme(), Theme::default());
        assert!(config.get_available_themes().contains(&"midnight".to_string()));
    }
}
