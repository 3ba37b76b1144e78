use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub pager: PagerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Qualitative animation speed, mapped to a duration multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedLevel {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedLevel {
    /// Duration multiplier for this level (smaller = faster)
    pub fn ratio(self) -> f64 {
        match self {
            SpeedLevel::Slow => 1.6,
            SpeedLevel::Normal => 1.0,
            SpeedLevel::Fast => 0.6,
        }
    }
}

impl std::str::FromStr for SpeedLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(SpeedLevel::Slow),
            "normal" => Ok(SpeedLevel::Normal),
            "fast" => Ok(SpeedLevel::Fast),
            other => Err(crate::Error::Config(format!(
                "unknown speed '{}' (expected slow, normal or fast)",
                other
            ))),
        }
    }
}

/// Tunables of the per-axis scroll animator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Delay between two animation ticks in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Animation duration at normal speed for a full-size request
    #[serde(default = "default_base_duration")]
    pub base_duration_ms: u64,
    /// Ticks after which a same-direction request gets boosted
    #[serde(default = "default_accelerate_threshold")]
    pub accelerate_threshold: u32,
    /// Multiplier applied to boosted requests
    #[serde(default = "default_accelerator")]
    pub accelerator: f64,
    /// Request magnitude that uses the whole tick budget
    #[serde(default = "default_reference_distance")]
    pub reference_distance: f64,
    /// Screen height used to derive the platform scale factor
    #[serde(default = "default_screen_height")]
    pub screen_height: f64,
    /// Screen height at which the scale factor is 1.0
    #[serde(default = "default_reference_screen_height")]
    pub reference_screen_height: f64,
    /// Animation speed
    #[serde(default)]
    pub speed: SpeedLevel,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            base_duration_ms: default_base_duration(),
            accelerate_threshold: default_accelerate_threshold(),
            accelerator: default_accelerator(),
            reference_distance: default_reference_distance(),
            screen_height: default_screen_height(),
            reference_screen_height: default_reference_screen_height(),
            speed: SpeedLevel::default(),
        }
    }
}

/// Wheel routing options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Handle wheel events at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Animate mouse-wheel scrolling (otherwise scroll directly)
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Shift + wheel scrolls horizontally
    #[serde(default = "default_true")]
    pub shift_horizontal: bool,
    /// Alt + wheel scrolls by a full page
    #[serde(default = "default_true")]
    pub alt_page: bool,
    /// Multiplier applied to animated wheel distances
    #[serde(default = "default_distance_ratio")]
    pub distance_ratio: f64,
    /// Fixed distance of one horizontal tilt-wheel notch
    #[serde(default = "default_tilt_step")]
    pub tilt_step: f64,
    /// Handle horizontal tilt-wheel notches
    #[serde(default = "default_true")]
    pub tilt_enabled: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            smooth_enabled: default_true(),
            shift_horizontal: default_true(),
            alt_page: default_true(),
            distance_ratio: default_distance_ratio(),
            tilt_step: default_tilt_step(),
            tilt_enabled: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Idle redraw interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Wheel units per text row
    #[serde(default = "default_units_per_line")]
    pub units_per_line: f64,
    /// Wheel units per text column
    #[serde(default = "default_units_per_column")]
    pub units_per_column: f64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            units_per_line: default_units_per_line(),
            units_per_column: default_units_per_column(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_interval() -> u64 {
    16 // ~60fps
}

fn default_base_duration() -> u64 {
    560 // 35 ticks
}

fn default_accelerate_threshold() -> u32 {
    2
}

fn default_accelerator() -> f64 {
    2.0
}

fn default_reference_distance() -> f64 {
    720.0
}

fn default_screen_height() -> f64 {
    720.0
}

fn default_reference_screen_height() -> f64 {
    720.0
}

fn default_distance_ratio() -> f64 {
    1.1
}

fn default_tilt_step() -> f64 {
    20.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_units_per_line() -> f64 {
    40.0
}

fn default_units_per_column() -> f64 {
    10.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Serialize configuration to pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/smoothscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("smoothscroll")
            .join("config.toml")
    }
}
