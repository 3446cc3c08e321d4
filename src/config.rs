//! Runtime settings.
//!
//! Everything has a built-in default, so the program runs without any file present. A
//! `spinquads.json` in the working directory overrides individual keys.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "spinquads.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub clear_color: [f32; 4],
    /// Image for the left quad, then the right one.
    pub textures: [PathBuf; 2],
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Textures test".to_string(),
            width: 600,
            height: 600,
            vsync: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            textures: [
                PathBuf::from("default_wood.png"),
                PathBuf::from("default_sand.png"),
            ],
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a config from JSON text. Missing keys keep their defaults.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads the config at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// The configured log level as a filter.
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_window() {
        let config = Config::default();
        assert_eq!(config.title, "Textures test");
        assert_eq!((config.width, config.height), (600, 600));
        assert!(config.vsync);
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
        assert_eq!(config.textures[0], Path::new("default_wood.png"));
        assert_eq!(config.textures[1], Path::new("default_sand.png"));
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn partial_json_overrides_only_given_keys() {
        let config = Config::from_json(
            r#"{ "width": 800, "textures": ["a.png", "b.jpg"], "log_level": "debug" }"#,
            Path::new("test.json"),
        )
        .unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.title, "Textures test");
        assert_eq!(config.textures[1], Path::new("b.jpg"));
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Debug);
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = Config::from_json("{ width: }", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse broken.json"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Config::from_json(r#"{ "fullscreen": true }"#, Path::new("x.json"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn wrong_texture_count_is_rejected() {
        let result = Config::from_json(r#"{ "textures": ["only.png"] }"#, Path::new("x.json"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join(format!(
            "spinquads-{}-missing-config.json",
            std::process::id()
        ));
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn bad_log_level_is_reported() {
        let config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::LogLevel(level)) if level == "loud"
        ));
    }
}
