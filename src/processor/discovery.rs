//! DLY file discovery.
//!
//! Two modes, matching the original tooling: a literal station name that
//! resolves to a single .dly path (appending the extension when absent),
//! or a regular expression matched against every .dly file name in the
//! directory, in sorted order.

use std::path::{Path, PathBuf};

use glob::glob;
use regex::Regex;
use tracing::debug;

use crate::error::{DlyError, Result};

/// File discovery component for DLY station files
#[derive(Debug)]
pub struct FileDiscovery {
    dly_dir: PathBuf,
}

impl FileDiscovery {
    pub fn new(dly_dir: PathBuf) -> Self {
        Self { dly_dir }
    }

    pub fn dly_dir(&self) -> &Path {
        &self.dly_dir
    }

    /// Resolve a literal station name to its .dly path
    pub fn resolve_single(&self, name: &str) -> PathBuf {
        let mut path = self.dly_dir.join(name);
        if path.extension().is_none_or(|ext| ext != "dly") {
            path.as_mut_os_string().push(".dly");
        }
        path
    }

    /// All .dly files whose file name matches `pattern`, sorted
    pub fn discover_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        if !self.dly_dir.is_dir() {
            return Err(DlyError::DirectoryNotFound {
                path: self.dly_dir.clone(),
            });
        }

        let regex = Regex::new(pattern).map_err(|e| DlyError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let glob_pattern = self.dly_dir.join("*.dly");
        let mut files: Vec<PathBuf> = glob(&glob_pattern.to_string_lossy())
            .map_err(|e| DlyError::InvalidPattern {
                pattern: glob_pattern.display().to_string(),
                reason: e.to_string(),
            })?
            .filter_map(|entry| entry.ok())
            .filter(|path| {
                path.file_name()
                    .map(|name| regex.is_match(&name.to_string_lossy()))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        debug!(
            "found {} matching .dly files in {}",
            files.len(),
            self.dly_dir.display()
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("USC00000001.dly"), "").unwrap();
        fs::write(temp_dir.path().join("USC00000002.dly"), "").unwrap();
        fs::write(temp_dir.path().join("USW00012345.dly"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        temp_dir
    }

    #[test]
    fn test_resolve_single_appends_extension() {
        let discovery = FileDiscovery::new(PathBuf::from("/data"));
        assert_eq!(
            discovery.resolve_single("USC00000001"),
            PathBuf::from("/data/USC00000001.dly")
        );
        assert_eq!(
            discovery.resolve_single("USC00000001.dly"),
            PathBuf::from("/data/USC00000001.dly")
        );
    }

    #[test]
    fn test_discover_matching_filters_and_sorts() {
        let temp_dir = create_test_dir();
        let discovery = FileDiscovery::new(temp_dir.path().to_path_buf());

        let files = discovery.discover_matching("^USC").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("USC00000001.dly"));
        assert!(files[1].ends_with("USC00000002.dly"));

        let all = discovery.discover_matching("").unwrap();
        assert_eq!(all.len(), 3); // notes.txt is never considered
    }

    #[test]
    fn test_discover_matching_no_matches() {
        let temp_dir = create_test_dir();
        let discovery = FileDiscovery::new(temp_dir.path().to_path_buf());

        let files = discovery.discover_matching("^ZZZ").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_missing_directory() {
        let discovery = FileDiscovery::new(PathBuf::from("/nonexistent/dly"));
        let result = discovery.discover_matching(".*");
        assert!(matches!(result, Err(DlyError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_discover_invalid_regex() {
        let temp_dir = create_test_dir();
        let discovery = FileDiscovery::new(temp_dir.path().to_path_buf());

        let result = discovery.discover_matching("[unclosed");
        assert!(matches!(result, Err(DlyError::InvalidPattern { .. })));
    }
}
