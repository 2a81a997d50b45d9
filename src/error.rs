//! Error types for the risk metadata analyzer
//!
//! Every per-file failure maps onto one of three kinds: the source could not
//! be read, it contains no class or interface, or the parser flagged a
//! structural error. Batch analysis treats all three as non-fatal.

use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors raised while loading or analyzing a source unit
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The underlying file or its content is unavailable
    #[error("cannot read source '{path}': {source}")]
    UnreadableSource {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The unit parsed but holds no class or interface declaration
    #[error("no class or interface declaration found in '{path}'")]
    NoPrimaryType { path: String },

    /// The parser reported a structural error
    #[error("malformed source unit '{path}': {message}")]
    MalformedUnit { path: String, message: String },

    #[error("unsupported file extension '{extension}' for '{path}'")]
    UnsupportedLanguage { path: String, extension: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("serialization failed: {message}")]
    Serialization { message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AnalyzerError {
    /// Short machine-friendly label for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnreadableSource { .. } => "unreadable_source",
            Self::NoPrimaryType { .. } => "no_primary_type",
            Self::MalformedUnit { .. } => "malformed_unit",
            Self::UnsupportedLanguage { .. } => "unsupported_language",
            Self::Config { .. } => "config",
            Self::Serialization { .. } => "serialization",
            Self::Io(_) => "io",
        }
    }

    /// Numeric process status for this error
    ///
    /// 1 is left for batches where some files failed.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::UnreadableSource { .. } | Self::Io(_) => 3,
            Self::NoPrimaryType { .. }
            | Self::MalformedUnit { .. }
            | Self::UnsupportedLanguage { .. } => 4,
            Self::Serialization { .. } => 5,
        }
    }

    /// Process exit code used by the binary
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = AnalyzerError::NoPrimaryType {
            path: "src/Foo.java".to_string(),
        };
        assert!(err.to_string().contains("src/Foo.java"));
        assert_eq!(err.kind(), "no_primary_type");

        let err = AnalyzerError::UnreadableSource {
            path: "missing.java".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.java"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_unsupported_language_names_the_file() {
        let err = AnalyzerError::UnsupportedLanguage {
            path: "docs/notes.txt".to_string(),
            extension: "txt".to_string(),
        };
        assert!(err.to_string().contains("docs/notes.txt"));
        assert!(err.to_string().contains("txt"));
    }

    #[test]
    fn test_exit_codes_are_distinct_from_partial_failure() {
        let serialization = AnalyzerError::Serialization {
            message: "bad float".to_string(),
        };
        assert_eq!(serialization.exit_status(), 5);
        assert_ne!(serialization.exit_status(), 1);

        let config = AnalyzerError::Config {
            message: "bad key".to_string(),
        };
        assert_eq!(config.exit_status(), 2);
    }

    #[test]
    fn test_io_conversion() {
        let err: AnalyzerError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert_eq!(err.kind(), "io");
    }
}
