//! External configuration loader.
//!
//! Reads `lavarun.toml` from the executable's directory (or CWD).
//! Falls back to the built-in constants if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "lavarun.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub level: LevelConfig,
    pub coin: CoinConfig,
    pub fireball: FireballConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelConfig {
    pub finish_delay: f64, // counted down by the driver once status is set
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoinConfig {
    pub spring_speed: f64,
    pub spring_dist: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FireballConfig {
    pub horizontal_speed: f64,
    pub vertical_speed: f64,
    pub rain_speed: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig { finish_delay: default_finish_delay() }
    }
}

impl Default for CoinConfig {
    fn default() -> Self {
        CoinConfig {
            spring_speed: default_spring_speed(),
            spring_dist: default_spring_dist(),
        }
    }
}

impl Default for FireballConfig {
    fn default() -> Self {
        FireballConfig {
            horizontal_speed: default_horizontal_speed(),
            vertical_speed: default_vertical_speed(),
            rain_speed: default_rain_speed(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    level: TomlLevel,
    #[serde(default)]
    coin: TomlCoin,
    #[serde(default)]
    fireball: TomlFireball,
}

#[derive(Deserialize, Debug)]
struct TomlLevel {
    #[serde(default = "default_finish_delay")]
    finish_delay: f64,
}

#[derive(Deserialize, Debug)]
struct TomlCoin {
    #[serde(default = "default_spring_speed")]
    spring_speed: f64,
    #[serde(default = "default_spring_dist")]
    spring_dist: f64,
}

#[derive(Deserialize, Debug)]
struct TomlFireball {
    #[serde(default = "default_horizontal_speed")]
    horizontal_speed: f64,
    #[serde(default = "default_vertical_speed")]
    vertical_speed: f64,
    #[serde(default = "default_rain_speed")]
    rain_speed: f64,
}

// ── Defaults ──

fn default_finish_delay() -> f64 { 1.0 }
fn default_spring_speed() -> f64 { 8.0 }
fn default_spring_dist() -> f64 { 0.07 }
fn default_horizontal_speed() -> f64 { 2.0 }
fn default_vertical_speed() -> f64 { 2.0 }
fn default_rain_speed() -> f64 { 3.0 }

impl Default for TomlLevel {
    fn default() -> Self {
        TomlLevel { finish_delay: default_finish_delay() }
    }
}

impl Default for TomlCoin {
    fn default() -> Self {
        TomlCoin {
            spring_speed: default_spring_speed(),
            spring_dist: default_spring_dist(),
        }
    }
}

impl Default for TomlFireball {
    fn default() -> Self {
        TomlFireball {
            horizontal_speed: default_horizontal_speed(),
            vertical_speed: default_vertical_speed(),
            rain_speed: default_rain_speed(),
        }
    }
}

impl From<TomlConfig> for EngineConfig {
    fn from(t: TomlConfig) -> Self {
        EngineConfig {
            level: LevelConfig { finish_delay: t.level.finish_delay },
            coin: CoinConfig {
                spring_speed: t.coin.spring_speed,
                spring_dist: t.coin.spring_dist,
            },
            fireball: FireballConfig {
                horizontal_speed: t.fireball.horizontal_speed,
                vertical_speed: t.fireball.vertical_speed,
                rain_speed: t.fireball.rain_speed,
            },
        }
    }
}

// ── Loading ──

impl EngineConfig {
    /// Parse a TOML document. Missing tables and keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: TomlConfig = toml::from_str(text)?;
        Ok(cfg.into())
    }

    /// Read and parse one specific file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load config from `lavarun.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        Self::load_from(&candidate_dirs())
    }

    /// Use the first `lavarun.toml` found in `search_dirs`.
    /// A file that fails to parse yields the defaults.
    pub fn load_from(search_dirs: &[PathBuf]) -> Self {
        for dir in search_dirs {
            let path = dir.join(CONFIG_FILE);
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(cfg) => {
                    log::debug!("loaded config from {}", path.display());
                    return cfg;
                }
                Err(e @ ConfigError::Parse(_)) => {
                    log::warn!("{e}; using default settings");
                    return Self::default();
                }
                Err(e) => log::warn!("{e}"),
            }
        }
        Self::default()
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
