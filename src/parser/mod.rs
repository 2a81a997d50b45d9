//! Source unit acquisition
//!
//! The analyzer never reads text itself: it asks a [`SourceProvider`] for a
//! [`SourceUnit`]. The default provider, [`JavaFileLoader`], reads a file from
//! disk and lowers its tree-sitter parse into the unit model.

pub mod java;

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AnalyzerError, Result};
use crate::unit::SourceUnit;

pub use java::parse_java;

/// File extensions handled by the Java front end
pub const JAVA_EXTENSIONS: &[&str] = &["java"];

/// Anything that can turn a path into a parsed source unit
pub trait SourceProvider: Sync {
    fn load(&self, path: &Path) -> Result<SourceUnit>;
}

impl<F> SourceProvider for F
where
    F: Fn(&Path) -> Result<SourceUnit> + Sync,
{
    fn load(&self, path: &Path) -> Result<SourceUnit> {
        self(path)
    }
}

/// Reads `.java` files from disk and parses them with tree-sitter
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaFileLoader;

impl SourceProvider for JavaFileLoader {
    fn load(&self, path: &Path) -> Result<SourceUnit> {
        let display = path.display().to_string();

        if !path.exists() {
            return Err(AnalyzerError::UnreadableSource {
                path: display,
                source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
            });
        }

        if !is_java_path(path) {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("none")
                .to_string();
            return Err(AnalyzerError::UnsupportedLanguage {
                path: display,
                extension,
            });
        }

        let source = fs::read_to_string(path).map_err(|source| AnalyzerError::UnreadableSource {
            path: display.clone(),
            source,
        })?;

        parse_java(&display, &source)
    }
}

/// Check whether a path carries a Java source extension
pub fn is_java_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            JAVA_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}
