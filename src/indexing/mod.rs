//! Source file discovery
//!
//! Expands path arguments into the Java files under them, skipping hidden
//! and build directories.
//!
//! # Example
//!
//! ```ignore
//! use riskmeta::indexing::collect_files;
//!
//! let files = collect_files(&repo_dir, 10);
//! println!("Found {} Java files", files.len());
//! ```

mod files;

pub use files::{collect_files, collect_files_recursive, expand_paths, should_skip_path};
