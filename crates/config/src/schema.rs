use cpustat_core::{CpuStatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Widest bar accepted; no terminal is this many columns across.
pub const MAX_BAR_WIDTH: u16 = 1024;

/// Root configuration structure parsed from `cpustat.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sampling and chart geometry.
    pub general: GeneralConfig,
    /// Where CPU counters are read from.
    pub source: SourceConfig,
    /// Title, border and per-category colors.
    pub theme: ThemeConfig,
    /// Log output.
    pub log: LogConfig,
}

impl Config {
    /// Reject values the refresh loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.general.interval.is_zero() {
            return Err(CpuStatError::Config("interval must be greater than zero".into()));
        }
        if self.general.bar_width == 0 {
            return Err(CpuStatError::Config("bar_width must be at least 1".into()));
        }
        if self.general.bar_width > MAX_BAR_WIDTH {
            return Err(CpuStatError::Config(format!(
                "bar_width must be at most {MAX_BAR_WIDTH}"
            )));
        }
        Ok(())
    }
}

/// Sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Time between two samples, e.g. `"5s"` or `"500ms"`.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Show all seven categories instead of Work / Steal / Idle.
    pub detailed: bool,
    /// Width of one bar in terminal columns (bars are separated by one column).
    pub bar_width: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval:  Duration::from_secs(5),
            detailed:  false,
            bar_width: 3,
        }
    }
}

/// Counter source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path of the kernel statistics file.
    pub proc_stat: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            proc_stat: PathBuf::from("/proc/stat"),
        }
    }
}

/// Chart styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Replaces the generated `CPU Usage (...)` legend title.
    pub title: Option<String>,
    /// Draw a border around the chart.
    pub border: bool,
    /// Per-category color overrides keyed by category (`"work"`, `"idle"`, …).
    /// Values are terminal color names (`"green"`) or hex (`"#a6e3a1"`).
    pub colors: HashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title:  None,
            border: true,
            colors: HashMap::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}
