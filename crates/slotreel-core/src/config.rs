use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::EasingCurve;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub style: StyleConfig,
    /// Payout overrides; the built-in table is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paytable: Option<PaytableConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cash restored when the balance runs out
    #[serde(default = "default_cash")]
    pub default_cash: u64,
    /// Credits taken per spin
    #[serde(default = "default_bet")]
    pub bet: u64,
    /// Number of symbols per reel, painted 0..symbols
    #[serde(default = "default_symbols")]
    pub symbols: u32,
    /// Fixed RNG seed for reproducible sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_cash: default_cash(),
            bet: default_bet(),
            symbols: default_symbols(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Symbols painted on every reel
    pub fn values(&self) -> Vec<u32> {
        (0..self.symbols).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Spin duration of the first reel in milliseconds
    #[serde(default = "default_reel_duration")]
    pub reel_duration_ms: u64,
    /// Each following reel adds this share of the previous reel's extra time
    #[serde(default = "default_reel_step_factor")]
    pub reel_step_factor: f64,
    /// Balance fade out/in duration in milliseconds
    #[serde(default = "default_balance_fade")]
    pub balance_fade_ms: u64,
    /// Easing of the reel spin
    #[serde(default = "default_reel_easing")]
    pub reel_easing: EasingCurve,
    /// Frame rate while animations run
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reel_duration_ms: default_reel_duration(),
            reel_step_factor: default_reel_step_factor(),
            balance_fade_ms: default_balance_fade(),
            reel_easing: default_reel_easing(),
            animation_fps: default_animation_fps(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl TimingConfig {
    pub fn balance_fade(&self) -> Duration {
        Duration::from_millis(self.balance_fade_ms)
    }

    /// Cumulative stop times of the reels: each reel spins longer than the
    /// one before, by a shrinking step
    pub fn reel_durations<const N: usize>(&self) -> [Duration; N] {
        let mut durations = [Duration::ZERO; N];
        let mut total = 0.0;
        let mut step = self.reel_duration_ms as f64;
        for duration in durations.iter_mut() {
            total += step;
            step *= self.reel_step_factor;
            *duration = Duration::from_millis(total.round().max(0.0) as u64);
        }
        durations
    }
}

/// Reel label styling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Outline/glow color (name or hex)
    #[serde(default = "default_red")]
    pub glow: String,
    /// Fill color of settled labels (name or hex)
    #[serde(default = "default_red")]
    pub fill: String,
    #[serde(default = "default_glow_blur")]
    pub glow_blur: f64,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            glow: default_red(),
            fill: default_red(),
            glow_blur: default_glow_blur(),
            line_width: default_line_width(),
        }
    }
}

/// Payout multipliers per match weight, keyed by symbol
///
/// TOML keys are strings, e.g. `weight2 = { "7" = 1000 }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaytableConfig {
    #[serde(default)]
    pub weight1: BTreeMap<String, u64>,
    #[serde(default)]
    pub weight2: BTreeMap<String, u64>,
    #[serde(default)]
    pub weight3: BTreeMap<String, u64>,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slotreel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cash() -> u64 {
    100
}

fn default_bet() -> u64 {
    10
}

fn default_symbols() -> u32 {
    8 // 0..=7, 7 is the jackpot symbol
}

fn default_reel_duration() -> u64 {
    1500
}

fn default_reel_step_factor() -> f64 {
    0.9
}

fn default_balance_fade() -> u64 {
    800
}

fn default_reel_easing() -> EasingCurve {
    EasingCurve::EaseOut
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_red() -> String {
    "red".to_string()
}

fn default_glow_blur() -> f64 {
    15.0
}

fn default_line_width() -> f64 {
    5.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, defaults when the file is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self =
                toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slotreel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slotreel")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("slotreel.log")
    }
}
