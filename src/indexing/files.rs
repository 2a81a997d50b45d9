//! File collection utilities
//!
//! Recursively collects Java sources from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::parser::is_java_path;

/// Collect all Java files under a directory.
///
/// # Arguments
///
/// * `dir` - The root directory to search
/// * `max_depth` - Maximum recursion depth (0 = only root directory)
///
/// # Returns
///
/// A vector of paths to Java files, sorted by path.
pub fn collect_files(dir: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_files_recursive(dir, max_depth, 0, &mut files);
    files.sort();
    files
}

/// Recursively collect files with depth tracking.
pub fn collect_files_recursive(
    dir: &Path,
    max_depth: usize,
    current_depth: usize,
    files: &mut Vec<PathBuf>,
) {
    if current_depth > max_depth {
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if should_skip_path(&path) {
            continue;
        }

        if path.is_dir() {
            collect_files_recursive(&path, max_depth, current_depth + 1, files);
        } else if path.is_file() && is_java_path(&path) {
            files.push(path);
        }
    }
}

/// Expand CLI path arguments: directories are searched, files pass through
///
/// Explicit file arguments are kept even without a `.java` extension so the
/// analyzer can report them as unsupported.
pub fn expand_paths(paths: &[PathBuf], max_depth: usize) -> Vec<PathBuf> {
    let mut expanded = Vec::new();
    for path in paths {
        if path.is_dir() {
            expanded.extend(collect_files(path, max_depth));
        } else {
            expanded.push(path.clone());
        }
    }
    expanded
}

/// Check if a path should be skipped during file collection.
///
/// Skips:
/// - Hidden files/directories (starting with '.')
/// - Build output and dependency directories: target, build, out, node_modules, etc.
pub fn should_skip_path(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        name.starts_with('.')
            || name == "target"
            || name == "build"
            || name == "out"
            || name == "bin"
            || name == "node_modules"
            || name == "generated-sources"
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "class A {}").unwrap();
    }

    #[test]
    fn test_should_skip_hidden() {
        assert!(should_skip_path(Path::new(".git")));
        assert!(should_skip_path(Path::new(".idea")));
    }

    #[test]
    fn test_should_skip_build_output() {
        assert!(should_skip_path(Path::new("target")));
        assert!(should_skip_path(Path::new("build")));
    }

    #[test]
    fn test_should_not_skip_src() {
        assert!(!should_skip_path(Path::new("src")));
        assert!(!should_skip_path(Path::new("main")));
    }

    #[test]
    fn test_collect_only_java() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("src/main/java/com/acme/B.java"));
        touch(&dir.path().join("src/main/java/com/acme/A.java"));
        touch(&dir.path().join("src/main/resources/app.properties"));
        touch(&dir.path().join("target/classes/Gen.java"));
        touch(&dir.path().join(".hidden/H.java"));

        let files = collect_files(dir.path(), 10);
        let names: Vec<&str> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["A.java", "B.java"]);
    }

    #[test]
    fn test_depth_limit() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Top.java"));
        touch(&dir.path().join("a/b/Deep.java"));

        assert_eq!(collect_files(dir.path(), 0).len(), 1);
        assert_eq!(collect_files(dir.path(), 2).len(), 2);
    }

    #[test]
    fn test_expand_keeps_explicit_files() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("pkg/A.java"));
        let readme = dir.path().join("README.md");
        touch(&readme);

        let expanded = expand_paths(&[dir.path().join("pkg"), readme.clone()], 10);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[1], readme);
    }

    #[test]
    fn test_collect_missing_dir() {
        assert!(collect_files(Path::new("/nonexistent/riskmeta"), 10).is_empty());
    }
}
