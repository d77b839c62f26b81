use crate::error::{Result, SyncError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Trailing marker that turns an exclude entry into an exact-match rule
pub const EXACT_SENTINEL: char = '$';

/// Sidecar extension ignored when listing exclude folders
const META_EXTENSION: &str = "meta";

/// A single exclude rule
///
/// Rules are extension-agnostic: an exact rule stores only the file stem and
/// gains the current extension when it is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeRule {
    /// Excludes any file name starting with the pattern
    Prefix(String),
    /// Excludes exactly `<stem>.<ext>`
    Exact(String),
}

impl ExcludeRule {
    /// Parse a raw exclude entry (`Foo` or `Foo$`)
    pub fn parse(entry: &str) -> Result<Self> {
        if entry.is_empty() {
            return Err(SyncError::Config("Exclude entries must not be empty".into()));
        }
        if entry.contains(['/', '\\']) {
            return Err(SyncError::Config(format!(
                "Exclude entry '{}' must be a file name, not a path",
                entry
            )));
        }

        match entry.strip_suffix(EXACT_SENTINEL) {
            Some("") => Err(SyncError::Config(format!(
                "Exclude entry '{}' has no name before the exact-match marker",
                entry
            ))),
            Some(stem) => Ok(Self::Exact(stem.to_string())),
            None => Ok(Self::Prefix(entry.to_string())),
        }
    }

    /// Check whether a file name (with extension) is excluded while syncing `extension`
    pub fn matches(&self, file_name: &str, extension: &str) -> bool {
        match self {
            Self::Prefix(prefix) => file_name.starts_with(prefix.as_str()),
            Self::Exact(stem) => {
                // "<stem>.<extension>" without allocating
                file_name.len() == stem.len() + 1 + extension.len()
                    && file_name.starts_with(stem.as_str())
                    && file_name[stem.len()..].starts_with('.')
                    && file_name.ends_with(extension)
            }
        }
    }
}

/// Ordered set of exclude rules; a file is excluded if any rule matches
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    rules: Vec<ExcludeRule>,
}

impl ExcludeSet {
    /// Parse every raw entry; fails on the first invalid one
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let rules = entries
            .iter()
            .map(|entry| ExcludeRule::parse(entry.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_excluded(&self, file_name: &str, extension: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(file_name, extension))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Expand `exclude_folders` into exact-match entries and merge them with `excludes`
///
/// Every direct-child file of an existing folder (except `.meta` sidecars)
/// contributes `<stem>$`. Missing folders are skipped. With no folders the
/// excludes are returned unchanged. Order is first occurrence, duplicates dropped.
pub fn resolve(excludes: &[String], exclude_folders: &[PathBuf], base_dir: &Path) -> Result<Vec<String>> {
    if exclude_folders.is_empty() {
        return Ok(excludes.to_vec());
    }

    let mut from_folders = Vec::new();
    for folder in exclude_folders {
        let dir = base_dir.join(folder);
        if !dir.is_dir() {
            tracing::debug!("Exclude folder {} does not exist, skipping", dir.display());
            continue;
        }
        from_folders.extend(folder_excludes(&dir)?);
    }
    let from_folders = dedup(from_folders);

    tracing::debug!(
        "Resolved {} exact excludes from {} folder(s)",
        from_folders.len(),
        exclude_folders.len()
    );

    Ok(dedup(excludes.iter().cloned().chain(from_folders)))
}

/// List `<stem>$` for each non-sidecar file directly inside `dir`
fn folder_excludes(dir: &Path) -> Result<Vec<String>> {
    let read_dir_err = |source| SyncError::ReadDirError {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if !entry.file_type().map_err(read_dir_err)?.is_file() {
            continue;
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::InvalidPath { path: path.clone() })?;
        // `.meta` alone counts as a sidecar too, unlike Path::extension
        if file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == META_EXTENSION)
        {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SyncError::InvalidPath { path: path.clone() })?;
        names.push(format!("{}{}", stem, EXACT_SENTINEL));
    }

    // read_dir order is platform dependent
    names.sort();
    Ok(names)
}

fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
