//! TOML-based configuration persistence.
//!
//! Reads and writes [`DInputConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\DInput\config.toml`
//! - Linux:    `~/.config/dinput/config.toml`
//! - macOS:    `~/Library/Application Support/DInput/config.toml`
//!
//! Example file:
//!
//! ```toml
//! [safety]
//! fail_safe = true
//! fail_safe_points = [[0, 0]]
//! require_on_screen = false
//!
//! [timing]
//! pause_ms = 10
//! minimum_sleep_ms = 50
//! minimum_duration_ms = 100
//!
//! [mouse]
//! primary_button_swapped = false
//! virtual_resolution = false
//! disable_mouse_acceleration = false
//!
//! [keyboard]
//! auto_shift = true
//!
//! [logging]
//! log_level = "info"
//! ```
//!
//! Every section and every field is optional; absent values take the same
//! defaults as [`Settings::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use dinput_core::Settings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DInputConfig {
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub mouse: MouseConfig,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fail-safe and bounds checking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyConfig {
    #[serde(default = "default_true")]
    pub fail_safe: bool,
    /// Pixel positions as `[x, y]` pairs.
    #[serde(default = "default_fail_safe_points")]
    pub fail_safe_points: Vec<[i32; 2]>,
    #[serde(default)]
    pub require_on_screen: bool,
}

/// Delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_minimum_sleep_ms")]
    pub minimum_sleep_ms: u64,
    #[serde(default = "default_minimum_duration_ms")]
    pub minimum_duration_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MouseConfig {
    #[serde(default)]
    pub primary_button_swapped: bool,
    #[serde(default)]
    pub virtual_resolution: bool,
    #[serde(default)]
    pub disable_mouse_acceleration: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyboardConfig {
    #[serde(default = "default_true")]
    pub auto_shift: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_fail_safe_points() -> Vec<[i32; 2]> {
    vec![[0, 0]]
}
fn default_pause_ms() -> u64 {
    10
}
fn default_minimum_sleep_ms() -> u64 {
    50
}
fn default_minimum_duration_ms() -> u64 {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            fail_safe: default_true(),
            fail_safe_points: default_fail_safe_points(),
            require_on_screen: false,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pause_ms: default_pause_ms(),
            minimum_sleep_ms: default_minimum_sleep_ms(),
            minimum_duration_ms: default_minimum_duration_ms(),
        }
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            auto_shift: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// ── Settings mapping ──────────────────────────────────────────────────────────

impl DInputConfig {
    /// Builds the runtime settings described by this file.
    pub fn to_settings(&self) -> Settings {
        Settings {
            fail_safe: self.safety.fail_safe,
            fail_safe_points: self
                .safety
                .fail_safe_points
                .iter()
                .map(|[x, y]| (*x, *y))
                .collect(),
            pause: Duration::from_millis(self.timing.pause_ms),
            minimum_sleep: Duration::from_millis(self.timing.minimum_sleep_ms),
            minimum_duration: Duration::from_millis(self.timing.minimum_duration_ms),
            primary_button_swapped: self.mouse.primary_button_swapped,
            virtual_resolution: self.mouse.virtual_resolution,
            require_on_screen: self.safety.require_on_screen,
            auto_shift: self.keyboard.auto_shift,
            disable_mouse_acceleration: self.mouse.disable_mouse_acceleration,
        }
    }

    /// Describes `settings` as a config file with the given log level.
    pub fn from_settings(settings: &Settings, log_level: impl Into<String>) -> Self {
        Self {
            safety: SafetyConfig {
                fail_safe: settings.fail_safe,
                fail_safe_points: settings
                    .fail_safe_points
                    .iter()
                    .map(|&(x, y)| [x, y])
                    .collect(),
                require_on_screen: settings.require_on_screen,
            },
            timing: TimingConfig {
                pause_ms: settings.pause.as_millis() as u64,
                minimum_sleep_ms: settings.minimum_sleep.as_millis() as u64,
                minimum_duration_ms: settings.minimum_duration.as_millis() as u64,
            },
            mouse: MouseConfig {
                primary_button_swapped: settings.primary_button_swapped,
                virtual_resolution: settings.virtual_resolution,
                disable_mouse_acceleration: settings.disable_mouse_acceleration,
            },
            keyboard: KeyboardConfig {
                auto_shift: settings.auto_shift,
            },
            logging: LoggingConfig {
                log_level: log_level.into(),
            },
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the default location.
///
/// Returns [`DInputConfig::default`] if the file does not exist yet.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<DInputConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config from `path`, with the same missing-file rule as
/// [`load_config`].
pub fn load_config_from(path: &Path) -> Result<DInputConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DInputConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to the default location.
pub fn save_config(config: &DInputConfig) -> Result<PathBuf, ConfigError> {
    let path = config_file_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &DInputConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the `DInput` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("DInput"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("dinput"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("DInput")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("dinput_test_{}_{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_default_config_maps_to_default_settings() {
        // Arrange / Act
        let settings = DInputConfig::default().to_settings();

        // Assert
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_survive_config_mapping() {
        // Arrange
        let settings = Settings {
            fail_safe_points: vec![(0, 0), (1919, 1079)],
            pause: Duration::from_millis(25),
            primary_button_swapped: true,
            auto_shift: false,
            ..Settings::default()
        };

        // Act
        let restored = DInputConfig::from_settings(&settings, "debug").to_settings();

        // Assert
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: DInputConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, DInputConfig::default());
        assert_eq!(cfg.logging.log_level, "info");
    }

    #[test]
    fn test_partial_section_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
[timing]
pause_ms = 0

[safety]
fail_safe_points = [[0, 0], [2559, 0]]
"#;

        // Act
        let cfg: DInputConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.timing.pause_ms, 0);
        assert_eq!(cfg.timing.minimum_sleep_ms, 50);
        assert!(cfg.safety.fail_safe);
        assert_eq!(
            cfg.to_settings().fail_safe_points,
            vec![(0, 0), (2559, 0)]
        );
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");
        assert_eq!(load_config_from(&path).unwrap(), DInputConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        // Arrange
        let path = temp_path("round_trip");
        let mut cfg = DInputConfig::default();
        cfg.timing.minimum_sleep_ms = 5;
        cfg.mouse.virtual_resolution = true;
        cfg.logging.log_level = "trace".to_string();

        // Act
        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
    }
}
