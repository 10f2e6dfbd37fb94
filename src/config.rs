use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Position of an album on screen, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    Left,
    Middle,
    Right,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 3] = [ColumnKey::Left, ColumnKey::Middle, ColumnKey::Right];

    /// Key of this column in the configuration file.
    pub fn key(self) -> &'static str {
        match self {
            ColumnKey::Left => "album_left",
            ColumnKey::Middle => "album_middle",
            ColumnKey::Right => "album_right",
        }
    }

    fn default_source(self) -> AlbumSource {
        let (name, dir) = match self {
            ColumnKey::Left => ("Left Album", "left"),
            ColumnKey::Middle => ("Middle Album", "middle"),
            ColumnKey::Right => ("Right Album", "right"),
        };
        AlbumSource {
            name: name.to_string(),
            path: Path::new("assets").join(dir),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSource {
    pub name: String,
    pub path: PathBuf,
}

/// Album for each column, as stored in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumConfig {
    pub album_left: AlbumSource,
    pub album_middle: AlbumSource,
    pub album_right: AlbumSource,
}

// What the file actually contains; absent keys are filled from the defaults
#[derive(Debug, Default, Deserialize)]
struct PartialAlbumConfig {
    album_left: Option<AlbumSource>,
    album_middle: Option<AlbumSource>,
    album_right: Option<AlbumSource>,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            album_left: ColumnKey::Left.default_source(),
            album_middle: ColumnKey::Middle.default_source(),
            album_right: ColumnKey::Right.default_source(),
        }
    }
}

impl PartialAlbumConfig {
    fn is_complete(&self) -> bool {
        self.album_left.is_some() && self.album_middle.is_some() && self.album_right.is_some()
    }

    fn merge_defaults(self) -> AlbumConfig {
        AlbumConfig {
            album_left: self.album_left.unwrap_or_else(|| ColumnKey::Left.default_source()),
            album_middle: self.album_middle.unwrap_or_else(|| ColumnKey::Middle.default_source()),
            album_right: self.album_right.unwrap_or_else(|| ColumnKey::Right.default_source()),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,          // Complete file, used as is
    Merged,        // File with missing albums filled in
    Defaults,      // No usable file
}

impl AlbumConfig {
    pub fn album(&self, column: ColumnKey) -> &AlbumSource {
        match column {
            ColumnKey::Left => &self.album_left,
            ColumnKey::Middle => &self.album_middle,
            ColumnKey::Right => &self.album_right,
        }
    }

    /// Albums in screen order.
    pub fn albums(&self) -> impl Iterator<Item = (ColumnKey, &AlbumSource)> {
        ColumnKey::ALL.into_iter().map(move |column| (column, self.album(column)))
    }

    /// Read the configuration at `path` without touching the file.
    pub fn read(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let partial: PartialAlbumConfig = serde_json::from_str(&json)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        let source = if partial.is_complete() { ConfigSource::File } else { ConfigSource::Merged };
        Ok((partial.merge_defaults(), source))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| write_error(io::Error::other(e)))?;
        fs::write(path, json).map_err(write_error)
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or malformed.
    ///
    /// A missing file, a malformed one, or one lacking some albums is
    /// rewritten with the configuration actually used. A file that exists but
    /// cannot be read is left alone.
    pub fn load_or_init(path: &Path) -> (Self, ConfigSource) {
        let (config, source, persist) = match Self::read(path) {
            Ok((config, ConfigSource::File)) => (config, ConfigSource::File, false),
            Ok((config, source)) => {
                info!(path = %path.display(), "filling missing albums with defaults");
                (config, source, true)
            }
            Err(ConfigError::Read { source: e, .. }) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no configuration file, writing defaults");
                (Self::default(), ConfigSource::Defaults, true)
            }
            Err(e @ ConfigError::Parse { .. }) => {
                warn!(error = %e, "malformed configuration, replacing with defaults");
                (Self::default(), ConfigSource::Defaults, true)
            }
            Err(e) => {
                warn!(error = %e, "configuration unreadable, using defaults");
                (Self::default(), ConfigSource::Defaults, false)
            }
        };

        if persist {
            if let Err(e) = config.save(path) {
                warn!(error = %e, "could not save configuration");
            }
        }

        (config, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_path(dir: &TempDir) -> PathBuf {
        dir.path().join("config.json")
    }

    fn saved(path: &Path) -> AlbumConfig {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_point_at_local_assets() {
        let config = AlbumConfig::default();
        assert_eq!(config.album_left.name, "Left Album");
        assert_eq!(config.album_middle.path, Path::new("assets").join("middle"));
        assert_eq!(config.album_right.path, Path::new("assets").join("right"));

        let keys: Vec<&str> = config.albums().map(|(column, _)| column.key()).collect();
        assert_eq!(keys, ["album_left", "album_middle", "album_right"]);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);

        let (config, source) = AlbumConfig::load_or_init(&path);
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config, AlbumConfig::default());
        assert_eq!(saved(&path), AlbumConfig::default());
    }

    #[test]
    fn test_complete_file_is_used_untouched() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        let json = r#"{
            "album_left": {"name": "Beach", "path": "/photos/beach"},
            "album_middle": {"name": "City", "path": "/photos/city"},
            "album_right": {"name": "Snow", "path": "/photos/snow"}
        }"#;
        fs::write(&path, json).unwrap();

        let (config, source) = AlbumConfig::load_or_init(&path);
        assert_eq!(source, ConfigSource::File);
        assert_eq!(config.album_middle.name, "City");
        assert_eq!(config.album(ColumnKey::Right).path, Path::new("/photos/snow"));
        assert_eq!(fs::read_to_string(&path).unwrap(), json);
    }

    #[test]
    fn test_missing_keys_are_merged_and_saved() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::write(&path, r#"{"album_middle": {"name": "City", "path": "/photos/city"}}"#).unwrap();

        let (config, source) = AlbumConfig::load_or_init(&path);
        assert_eq!(source, ConfigSource::Merged);
        assert_eq!(config.album_middle.name, "City");
        assert_eq!(config.album_left, ColumnKey::Left.default_source());
        assert_eq!(saved(&path), config);
    }

    #[test]
    fn test_malformed_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::write(&path, "{ not json").unwrap();

        let (config, source) = AlbumConfig::load_or_init(&path);
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config, AlbumConfig::default());
        assert_eq!(saved(&path), AlbumConfig::default());
    }

    #[test]
    fn test_wrong_shape_counts_as_malformed() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::write(&path, r#"{"album_left": {"name": "No path"}}"#).unwrap();

        assert!(matches!(AlbumConfig::read(&path), Err(ConfigError::Parse { .. })));
        let (config, _) = AlbumConfig::load_or_init(&path);
        assert_eq!(config, AlbumConfig::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kiosk").join("config.json");
        AlbumConfig::default().save(&path).unwrap();
        assert_eq!(saved(&path), AlbumConfig::default());
    }

    #[test]
    fn test_unreadable_file_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        fs::create_dir(&path).unwrap();

        assert_eq!(AlbumConfig::load_or_init(&path), (AlbumConfig::default(), ConfigSource::Defaults));
        assert!(path.is_dir());
    }
}
