use crate::error::{Result, SyncError};
use crate::exclude::ExcludeRule;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "buildsync.json";

fn default_pattern() -> String {
    "*".to_string()
}

/// Project settings, stored as JSON next to the project
///
/// Relative paths are resolved against the directory holding the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Build output directory
    pub source: PathBuf,
    /// Directory the outputs are copied into
    pub destination: PathBuf,
    /// Glob stem combined with each tracked extension
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// File name prefixes to skip; a trailing `$` means exact name
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Folders whose file names are excluded by exact name
    #[serde(default)]
    pub exclude_folders: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("bin/Release"),
            destination: PathBuf::from("Assets/Plugins"),
            pattern: default_pattern(),
            excludes: Vec::new(),
            exclude_folders: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SyncError::SettingsNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Loading settings from {}", path.display());

        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| SyncError::SettingsParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write settings as pretty JSON, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(std::io::Error::from)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Directory that relative paths are resolved against
    pub fn project_root(settings_path: &Path) -> PathBuf {
        match settings_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.source)
    }

    pub fn destination_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.destination)
    }

    /// Check everything the sync needs before it touches the filesystem
    pub fn validate(&self, root: &Path) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(SyncError::Config("'source' must not be empty".into()));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(SyncError::Config("'destination' must not be empty".into()));
        }

        let source = self.source_dir(root);
        if !source.is_dir() {
            return Err(SyncError::Config(format!(
                "Source directory does not exist: {}",
                source.display()
            )));
        }

        let destination = self.destination_dir(root);
        if destination.is_file() {
            return Err(SyncError::Config(format!(
                "Destination is a file, not a directory: {}",
                destination.display()
            )));
        }

        if self.pattern.is_empty() {
            return Err(SyncError::Config("'pattern' must not be empty".into()));
        }
        if self.pattern.contains(['/', '\\']) {
            return Err(SyncError::Config(format!(
                "'pattern' must match file names only, got '{}'",
                self.pattern
            )));
        }
        glob::Pattern::new(&self.pattern).map_err(|e| SyncError::InvalidPattern {
            pattern: self.pattern.clone(),
            message: e.msg.to_string(),
        })?;

        for entry in &self.excludes {
            ExcludeRule::parse(entry)?;
        }

        Ok(())
    }
}
