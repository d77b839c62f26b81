use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};

/// A file found directly inside a scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub file_name: String,
}

/// Non-recursive glob scanner over a single directory
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Files in the root matching `{stem}.{extension}`, sorted by name
    pub fn scan(&self, stem: &str, extension: &str) -> Result<Vec<Candidate>> {
        let file_pattern = format!("{}.{}", stem, extension);
        if file_pattern.contains(['/', '\\']) {
            return Err(SyncError::InvalidPattern {
                pattern: file_pattern,
                message: "pattern must not contain path separators".into(),
            });
        }

        // A missing root simply has no files
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let root_str = self
            .root
            .to_str()
            .ok_or_else(|| SyncError::InvalidPath { path: self.root.clone() })?;
        let full_pattern = format!("{}/{}", glob::Pattern::escape(root_str), file_pattern);

        let paths = glob::glob(&full_pattern).map_err(|e| SyncError::InvalidPattern {
            pattern: file_pattern.clone(),
            message: e.msg.to_string(),
        })?;

        let mut candidates = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| SyncError::ReadDirError {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;

            if !path.is_file() {
                continue;
            }

            let file_name = file_name_of(&path)?;
            candidates.push(Candidate { path, file_name });
        }

        candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(candidates)
    }
}

/// Key identifying the file a path resolves to
///
/// Two names for one file (case-folding filesystems, hard links) share a key.
#[cfg(unix)]
pub type FileId = (u64, u64);
#[cfg(not(unix))]
pub type FileId = PathBuf;

/// Identity of the file at `path`, or `None` if it does not exist
#[cfg(unix)]
pub fn file_identity(path: &Path) -> Option<FileId> {
    use std::os::unix::fs::MetadataExt;

    std::fs::metadata(path).ok().map(|m| (m.dev(), m.ino()))
}

#[cfg(not(unix))]
pub fn file_identity(path: &Path) -> Option<FileId> {
    // canonicalize reports the on-disk spelling of the name
    std::fs::canonicalize(path).ok()
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| SyncError::InvalidPath { path: path.to_path_buf() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.file_name.as_str()).collect()
    }

    #[test]
    fn test_scan_matches_extension() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("B.dll"), "b").unwrap();
        fs::write(root.join("A.dll"), "a").unwrap();
        fs::write(root.join("A.pdb"), "a").unwrap();
        fs::write(root.join("A.dll.config"), "a").unwrap();

        let scanner = Scanner::new(root);
        assert_eq!(names(&scanner.scan("*", "dll").unwrap()), vec!["A.dll", "B.dll"]);
        assert_eq!(names(&scanner.scan("*", "pdb").unwrap()), vec!["A.pdb"]);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/Nested.dll"), "n").unwrap();
        fs::create_dir(root.join("Dir.dll")).unwrap();
        fs::write(root.join("Top.dll"), "t").unwrap();

        let candidates = Scanner::new(root).scan("*", "dll").unwrap();
        assert_eq!(names(&candidates), vec!["Top.dll"]);
    }

    #[test]
    fn test_scan_with_stem_pattern() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("Game.Core.dll"), "c").unwrap();
        fs::write(root.join("Game.UI.dll"), "u").unwrap();
        fs::write(root.join("Tools.dll"), "t").unwrap();

        let candidates = Scanner::new(root).scan("Game.*", "dll").unwrap();
        assert_eq!(names(&candidates), vec!["Game.Core.dll", "Game.UI.dll"]);
    }

    #[test]
    fn test_scan_root_with_glob_characters() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bin[x64]");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("A.dll"), "a").unwrap();

        let candidates = Scanner::new(&root).scan("*", "dll").unwrap();
        assert_eq!(names(&candidates), vec!["A.dll"]);
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let candidates = Scanner::new(temp.path().join("missing")).scan("*", "dll").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_file_identity() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("A.dll"), "a").unwrap();
        fs::write(root.join("B.dll"), "a").unwrap();

        let a = file_identity(&root.join("A.dll")).unwrap();
        assert_eq!(file_identity(&root.join("./A.dll")), Some(a.clone()));
        assert_ne!(file_identity(&root.join("B.dll")), Some(a));
        assert!(file_identity(&root.join("missing.dll")).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_file_identity_shared_by_hard_links() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("A.dll"), "a").unwrap();
        fs::hard_link(root.join("A.dll"), root.join("a.dll")).unwrap();

        assert_eq!(
            file_identity(&root.join("A.dll")),
            file_identity(&root.join("a.dll"))
        );
    }

    #[test]
    fn test_scan_rejects_separator_in_pattern() {
        let temp = TempDir::new().unwrap();
        let result = Scanner::new(temp.path()).scan("sub/*", "dll");
        assert!(matches!(result, Err(SyncError::InvalidPattern { .. })));
    }

    #[test]
    fn test_scan_rejects_invalid_glob() {
        let temp = TempDir::new().unwrap();
        let result = Scanner::new(temp.path()).scan("[invalid", "dll");
        assert!(matches!(result, Err(SyncError::InvalidPattern { .. })));
    }
}
