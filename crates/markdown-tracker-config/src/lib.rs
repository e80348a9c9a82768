use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the tracked markdown files.
    pub data_path: PathBuf,
    /// Directory names skipped while scanning, on top of hidden directories.
    /// `None` keeps the scanner's built-in list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_dirs: Option<Vec<String>>,
}

impl Config {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            excluded_dirs: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.data_path = Self::expand_path(&config.data_path).unwrap_or(config.data_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `~/.config/markdown-tracker/config.toml`, tilde expanded.
    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-tracker");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and `$VARS`; `None` when a variable is undefined.
    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-tracker/config.toml"));
    }

    #[test]
    fn test_excluded_dirs_absent_when_missing() {
        let config: Config = toml::from_str(r#"data_path = "/srv/trackers""#).unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/trackers"));
        assert_eq!(config.excluded_dirs, None);
        assert!(!toml::to_string(&config).unwrap().contains("excluded_dirs"));
    }

    #[test]
    fn test_excluded_dirs_can_be_replaced() {
        let config: Config = toml::from_str(
            r#"
data_path = "/srv/trackers"
excluded_dirs = ["archive"]
"#,
        )
        .unwrap();

        assert_eq!(config.excluded_dirs, Some(vec!["archive".to_string()]));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/trackers")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("trackers"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("TRACKER_TEST_ROOT", "/test/env/path");
        }

        let expanded = Config::expand_path(Path::new("$TRACKER_TEST_ROOT/games"));

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/games")));

        unsafe {
            env::remove_var("TRACKER_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_path_with_undefined_var() {
        let expanded = Config::expand_path(Path::new("$TRACKER_SURELY_UNDEFINED_VAR/x"));
        assert_eq!(expanded, None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let result = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "data_path = [not toml").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut config = Config::new(PathBuf::from("/tmp/trackers"));
        config.excluded_dirs = Some(vec!["archive".to_string()]);

        config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, config);
    }
}
