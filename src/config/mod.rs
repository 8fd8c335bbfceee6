use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration (stored in ~/.config/taskboard/)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalConfig {
    /// Where the board is stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log file settings
    #[serde(default)]
    pub log: LogConfig,

    /// UI theme/colors
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Storage location override
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Store file path; defaults to `<data_dir>/store.json`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset (e.g. "info", "taskboard=debug")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of plain text
    #[serde(default)]
    pub json: bool,

    /// Log directory; defaults to `<data_dir>/logs`
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Theme configuration with hex colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Border color for the selected column and card (hex, e.g. "#FFFF00")
    #[serde(default = "default_color_selected")]
    pub color_selected: String,

    /// Border color for normal/unselected elements
    #[serde(default = "default_color_normal")]
    pub color_normal: String,

    /// Color for hints and inactive elements
    #[serde(default = "default_color_dimmed")]
    pub color_dimmed: String,

    /// Task text color
    #[serde(default = "default_color_text")]
    pub color_text: String,

    /// Column header color when not selected
    #[serde(default = "default_color_column_header")]
    pub color_column_header: String,

    /// Border color for the card being dragged
    #[serde(default = "default_color_dragging")]
    pub color_dragging: String,

    /// Color for the delete affordance
    #[serde(default = "default_color_delete")]
    pub color_delete: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_selected: default_color_selected(),
            color_normal: default_color_normal(),
            color_dimmed: default_color_dimmed(),
            color_text: default_color_text(),
            color_column_header: default_color_column_header(),
            color_dragging: default_color_dragging(),
            color_delete: default_color_delete(),
        }
    }
}

fn default_color_selected() -> String {
    "#ead49a".to_string() // Yellow
}

fn default_color_normal() -> String {
    "#5cfff7".to_string() // Cyan
}

fn default_color_dimmed() -> String {
    "#9C9991".to_string() // Dark Gray
}

fn default_color_text() -> String {
    "#f2ece6".to_string() // Light Rose
}

fn default_color_column_header() -> String {
    "#a0d2fa".to_string() // Light Blue Gray
}

fn default_color_dragging() -> String {
    "#c792ea".to_string() // Lavender
}

fn default_color_delete() -> String {
    "#ff6b6b".to_string() // Red
}

impl ThemeConfig {
    /// Parse a hex color string to RGB tuple
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl GlobalConfig {
    /// Load global config from default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&content).context("Failed to parse global config")
        } else {
            Ok(Self::default())
        }
    }

    /// Save global config to default location
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the path to the global config file
    /// Always uses ~/.config/taskboard/ on all platforms
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join("taskboard").join("config.toml"))
    }

    /// Get the path to the global data directory
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "taskboard")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the store file: CLI override, then config, then the data directory
    pub fn store_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join("store.json"))
    }

    /// Resolve the log directory: config, then `<data_dir>/logs`
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("logs")),
        }
    }
}
