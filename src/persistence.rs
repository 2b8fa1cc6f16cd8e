use color_eyre::{Result, eyre::WrapErr};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used for the history file in the home directory.
const HISTORY_FILE_NAME: &str = ".multiclip.json";

/// JSON file holding the history snapshot as an ordered array of strings.
///
/// Every save rewrites the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.multiclip.json`, or `None` when the home directory is unknown.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved entries, most recent first.
    ///
    /// A missing, unreadable or malformed file yields an empty history.
    pub fn load(&self) -> Vec<String> {
        if !self.path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    info!("Failed to deserialize history file {:?}: {}", self.path, e);
                    Vec::new()
                }
            },
            Err(e) => {
                info!("Failed to read history file {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    /// Replaces the file content with `entries`.
    ///
    /// Written to a sibling temporary file first and renamed into place, so a
    /// reader never sees a partial snapshot.
    pub fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).wrap_err_with(|| format!("Failed to write {:?}", tmp_path))?;
        fs::rename(&tmp_path, &self.path)
            .wrap_err_with(|| format!("Failed to replace {:?}", self.path))?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("absent.json"));
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(HistoryFile::new(&path).load().is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"clips": ["a"]}"#).unwrap();
        assert!(HistoryFile::new(&path).load().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("history.json"));
        let saved = entries(&["third", "second", "first\nwith newline"]);

        file.save(&saved).unwrap();
        assert_eq!(file.load(), saved);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("history.json"));

        file.save(&entries(&["a", "b", "c"])).unwrap();
        file.save(&entries(&["d"])).unwrap();
        assert_eq!(file.load(), entries(&["d"]));
        assert!(!file.tmp_path().exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("nested").join("dir").join("history.json"));

        file.save(&entries(&["a"])).unwrap();
        assert_eq!(file.load(), entries(&["a"]));
    }

    #[test]
    fn test_file_format_is_string_array() {
        let dir = tempfile::tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("history.json"));
        file.save(&entries(&["a", "b"])).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!(["a", "b"]));
    }
}
