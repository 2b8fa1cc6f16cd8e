use crate::cli::Cli;
use crate::history::DEFAULT_CAPACITY;
use crate::menu::DEFAULT_DISPLAY_WIDTH;
use crate::persistence::HistoryFile;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Lower bound for both polling intervals.
const MIN_INTERVAL_MS: u64 = 50;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    path: Option<String>,
    #[serde(skip)]
    parse_error: Option<String>,
    /// Number of history entries kept.
    pub capacity: usize,
    /// Longest accepted entry in characters. Unlimited when unset.
    pub max_entry_chars: Option<usize>,
    /// How often the clipboard is sampled.
    pub poll_interval_ms: u64,
    /// How often the menu is rebuilt from history.
    pub menu_refresh_interval_ms: u64,
    /// Maximum label width in the menu.
    pub display_width: usize,
    /// History file. Defaults to ~/.multiclip.json.
    pub history_file: Option<PathBuf>,
    /// Log file. Defaults to the user cache directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            parse_error: None,
            capacity: DEFAULT_CAPACITY,
            max_entry_chars: None,
            poll_interval_ms: 500,
            menu_refresh_interval_ms: 2000,
            display_width: DEFAULT_DISPLAY_WIDTH,
            history_file: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the specified path, the default config dir (~/.config/multiclip/) or a local .multiclip.toml.
    pub fn load(path: &Option<String>) -> Self {
        let config_path = if let Some(p) = path {
            PathBuf::from(p)
        } else {
            Self::default_config_dir()
        };
        Self::load_from_path(&config_path)
    }

    fn load_from_path(config_path: &PathBuf) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(config_path) {
            Ok(content) => {
                let mut config = Self::parse(&content);
                config.path = config_path.to_str().map(|s| s.to_string());
                config
            }
            Err(e) => Self {
                parse_error: Some(format!("Failed to read {:?}: {}", config_path, e)),
                ..Self::default()
            },
        }
    }

    /// Parses TOML content, falling back to defaults when it is malformed.
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| Self {
            parse_error: Some(e.to_string()),
            ..Self::default()
        })
    }

    /// Get the path of the configuration file if it was loaded from a file.
    pub fn get_path(&self) -> Option<&String> {
        self.path.as_ref()
    }

    /// Error met while loading the configuration file, if any.
    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    fn default_config_dir() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("multiclip").join("config.toml");
            if config_path.exists() {
                return config_path;
            }
        }
        // Fallback to local .multiclip.toml (might not exist)
        PathBuf::from(".multiclip.toml")
    }

    /// Applies command line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(capacity) = cli.capacity {
            self.capacity = capacity;
        }
        if let Some(history_file) = &cli.history_file {
            self.history_file = Some(history_file.clone());
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = Some(log_file.clone());
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.max(1)
    }

    pub fn display_width(&self) -> usize {
        self.display_width.max(4)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_INTERVAL_MS))
    }

    pub fn menu_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.menu_refresh_interval_ms.max(MIN_INTERVAL_MS))
    }

    pub fn history_file_path(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(HistoryFile::default_path)
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("multiclip").join("multiclip.log"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.capacity(), 5);
        assert_eq!(config.max_entry_chars, None);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.menu_refresh_interval(), Duration::from_secs(2));
        assert_eq!(config.display_width(), 50);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            capacity = 10
            max_entry_chars = 200
            poll_interval_ms = 250
            menu_refresh_interval_ms = 1000
            display_width = 30
            history_file = "/tmp/clips.json"
            log_file = "/tmp/multiclip.log"
            "#,
        );
        assert_eq!(config.parse_error(), None);
        assert_eq!(config.capacity(), 10);
        assert_eq!(config.max_entry_chars, Some(200));
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.menu_refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.display_width(), 30);
        assert_eq!(config.history_file_path(), Some(PathBuf::from("/tmp/clips.json")));
        assert_eq!(config.log_file_path(), Some(PathBuf::from("/tmp/multiclip.log")));
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = Config::parse("capacity = 8");
        assert_eq!(config.capacity(), 8);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let config = Config::parse("capacity = \"many\"");
        assert!(config.parse_error().is_some());
        assert_eq!(config.capacity(), 5);
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let config = Config::parse("capacity = 0\npoll_interval_ms = 0\ndisplay_width = 0");
        assert_eq!(config.capacity(), 1);
        assert_eq!(config.poll_interval(), Duration::from_millis(MIN_INTERVAL_MS));
        assert_eq!(config.display_width(), 4);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capacity = 3").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::load(&Some(path.clone()));
        assert_eq!(config.capacity(), 3);
        assert_eq!(config.get_path(), Some(&path));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(&Some("/nonexistent/multiclip/config.toml".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = Config::parse("capacity = 3\nhistory_file = \"/tmp/a.json\"");
        let cli = Cli {
            capacity: Some(7),
            history_file: Some(PathBuf::from("/tmp/b.json")),
            ..Default::default()
        };

        config.apply_cli(&cli);
        assert_eq!(config.capacity(), 7);
        assert_eq!(config.history_file_path(), Some(PathBuf::from("/tmp/b.json")));
    }
}
