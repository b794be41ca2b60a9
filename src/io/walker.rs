use crate::errors::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const JAVA_EXTENSION: &str = "java";

/// Collects the Java sources below a root, honoring `.gitignore`.
pub struct SourceWalker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl SourceWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Java files under the root, sorted by path.
    ///
    /// A root that is itself a file is returned as is.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let is_java = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(JAVA_EXTENSION));
        if !is_java {
            return false;
        }

        let path_str = path.to_string_lossy();
        !self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }
}

pub fn find_java_files(root: &Path) -> Result<Vec<PathBuf>> {
    SourceWalker::new(root.to_path_buf()).walk()
}
