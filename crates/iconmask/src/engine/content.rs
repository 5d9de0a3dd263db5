//! Recursive discovery of consumer source files.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use super::candidates::extend_candidates;
use crate::{Error, Result};

/// Source files scanned for utility candidates.
///
/// Paths may be files (always scanned) or directories (walked recursively,
/// keeping files whose extension is listed). Hidden entries are skipped.
/// Symlinks are followed; a directory reached twice is walked once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSources {
    /// Files or directories to scan.
    pub paths: Vec<PathBuf>,
    /// Extensions to keep when walking directories (without the dot).
    /// Empty keeps every file.
    pub extensions: Vec<String>,
}

impl ContentSources {
    /// Sources from a list of paths, keeping every file.
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            extensions: Vec::new(),
        }
    }

    /// Restrict directory walks to these extensions.
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// List every matching file, sorted and deduplicated.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();
        let mut visited = HashSet::new();

        for root in &self.paths {
            let metadata = fs::metadata(root).map_err(|e| Error::io(root, e))?;
            if metadata.is_file() {
                files.insert(root.clone());
                continue;
            }

            let mut queue = VecDeque::new();
            queue.push_back(root.clone());

            while let Some(dir) = queue.pop_front() {
                let canonical = dir.canonicalize().map_err(|e| Error::io(&dir, e))?;
                if !visited.insert(canonical) {
                    continue;
                }

                let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;
                for entry in entries {
                    let entry = entry.map_err(|e| Error::io(&dir, e))?;
                    let path = entry.path();
                    if is_hidden(&path) {
                        continue;
                    }

                    let mut file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
                    if file_type.is_symlink() {
                        match fs::metadata(&path) {
                            Ok(target) => file_type = target.file_type(),
                            Err(e) => {
                                tracing::debug!("Skipping broken link {}: {}", path.display(), e);
                                continue;
                            }
                        }
                    }

                    if file_type.is_dir() {
                        queue.push_back(path);
                    } else if file_type.is_file() && self.accepts(&path) {
                        files.insert(path);
                    }
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Read every file and collect its candidates.
    ///
    /// Files that are not valid UTF-8 are read lossily.
    pub fn scan(&self) -> Result<BTreeSet<String>> {
        let mut candidates = BTreeSet::new();
        let files = self.files()?;

        for path in &files {
            let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
            extend_candidates(&mut candidates, &String::from_utf8_lossy(&bytes));
        }

        tracing::debug!(
            "Scanned {} content files, {} candidates",
            files.len(),
            candidates.len()
        );
        Ok(candidates)
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
