pub mod schema;

pub use schema::{Config, GeneralConfig, LogConfig, SourceConfig, ThemeConfig};

use cpustat_core::{CpuStatError, Result};
use std::path::{Path, PathBuf};

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    File,
    /// The file was missing and `Config::default()` was used.
    Defaults,
}

/// Load configuration from a TOML file.  Returns `Config::default()` if
/// the file doesn't exist so the chart always has sensible defaults.
///
/// Nothing is logged here: loading happens before the subscriber exists.
/// Pass the returned [`Origin`] to [`report`] once logging is up.
pub fn load(path: impl AsRef<Path>) -> Result<(Config, Origin)> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok((Config::default(), Origin::Defaults));
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| CpuStatError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: Config =
        toml::from_str(&raw).map_err(|e| CpuStatError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok((config, Origin::File))
}

/// Log where the configuration came from.
pub fn report(path: &Path, origin: Origin) {
    match origin {
        Origin::File => tracing::info!("Loaded config from '{}'", path.display()),
        Origin::Defaults => tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        ),
    }
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cpustat").join("cpustat.toml")
}
