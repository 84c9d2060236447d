use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: i32,
    #[serde(default = "default_true")]
    pub show_photo_list: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    #[serde(default = "default_true")]
    pub click_to_place: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_auto_margin")]
    pub auto_margin_px: f32,
    /// Pin color for manually placed photos.
    #[serde(default = "default_manual_color")]
    pub manual_color: String,
    /// Pin color for GPS-derived placements.
    #[serde(default = "default_gps_color")]
    pub gps_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub recent_projects: Vec<String>,
}

// Default value functions
fn default_theme() -> String {
    "dark".to_string()
}

fn default_sidebar_width() -> i32 {
    260
}

fn default_true() -> bool {
    true
}

fn default_min_zoom() -> f32 {
    0.25
}

fn default_max_zoom() -> f32 {
    4.0
}

fn default_zoom_step() -> f32 {
    0.25
}

fn default_auto_margin() -> f32 {
    50.0
}

fn default_manual_color() -> String {
    "#e53935".to_string()
}

fn default_gps_color() -> String {
    "#1e88e5".to_string()
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            sidebar_width: default_sidebar_width(),
            show_photo_list: true,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            click_to_place: true,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            auto_margin_px: default_auto_margin(),
            manual_color: default_manual_color(),
            gps_color: default_gps_color(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> PathBuf {
    let config_dir = directories::ProjectDirs::from("", "", "planpin")
        .expect("Failed to determine config directory")
        .config_dir()
        .to_path_buf();
    config_dir.join("config.toml")
}

/// Load configuration from file, or return default if file doesn't exist
pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &PathBuf) -> AppConfig {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {e}. Using defaults.");
                    AppConfig::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {e}. Using defaults.");
                AppConfig::default()
            }
        }
    } else {
        AppConfig::default()
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let path = config_path();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {e}"))?;
    }

    let toml = toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {e}"))?;

    std::fs::write(&path, toml).map_err(|e| format!("Failed to write config file: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_parses_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.viewer.zoom_step, 0.25);
        assert_eq!(config.placement.auto_margin_px, 50.0);
        assert!(config.viewer.click_to_place);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[viewer]\nmax_zoom = 8.0\n").unwrap();
        assert_eq!(config.viewer.max_zoom, 8.0);
        assert_eq!(config.viewer.min_zoom, 0.25);
        assert_eq!(config.appearance.sidebar_width, 260);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.placement.manual_color, config.placement.manual_color);
    }
}
