//! Analysis orchestration
//!
//! Drives one file through the complexity, business and dependency passes and
//! the risk scorer, and drives batches of files with per-file isolation: a
//! failing file is logged and skipped, never aborting the batch.
//!
//! # Example
//!
//! ```ignore
//! use riskmeta::Analyzer;
//!
//! let analyzer = Analyzer::default();
//! let report = analyzer.analyze_batch(&paths, "https://git.example/repo", "main");
//! println!("{} analyzed, {} failed", report.results.len(), report.failures.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::business::analyze_business;
use crate::complexity::analyze_complexity;
use crate::config::AnalyzerConfig;
use crate::dependency::DependencyInspector;
use crate::error::{AnalyzerError, Result};
use crate::metadata::FileMetadata;
use crate::parser::{JavaFileLoader, SourceProvider};
use crate::risk::assess;
use crate::unit::SourceUnit;

/// Batch worker stack size (8MB for deeply nested syntax trees)
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// A file that could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub path: String,
    /// Error kind label, see [`AnalyzerError::kind`]
    pub kind: String,
    pub reason: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Successful results, in input order
    pub results: Vec<FileMetadata>,
    pub failures: Vec<BatchFailure>,
    /// Paths never started because the batch was cancelled
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

enum FileOutcome {
    Done(Box<FileMetadata>),
    Failed(BatchFailure),
    Skipped(String),
}

/// Orchestrates single-file and batch analysis
pub struct Analyzer<P = JavaFileLoader> {
    provider: P,
    inspector: DependencyInspector,
    jobs: Option<usize>,
    cancel: Arc<AtomicBool>,
}

impl Default for Analyzer<JavaFileLoader> {
    fn default() -> Self {
        Self::new(JavaFileLoader)
    }
}

impl Analyzer<JavaFileLoader> {
    /// Analyzer reading Java files from disk, configured from `config`
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(JavaFileLoader).with_config(config)
    }
}

impl<P: SourceProvider> Analyzer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            inspector: DependencyInspector::new(),
            jobs: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_config(mut self, config: &AnalyzerConfig) -> Self {
        self.inspector =
            DependencyInspector::new().with_extra_prefixes(config.extra_platform_prefixes.clone());
        self.jobs = config.jobs;
        self
    }

    /// Bound the batch worker count; `None` uses one worker per core
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|n| *n > 0);
        self
    }

    /// Flag that stops a running batch from starting new files
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    // ========================================================================
    // Single file
    // ========================================================================

    /// Analyze an already parsed unit
    pub fn analyze_one(
        &self,
        unit: &SourceUnit,
        repo_url: &str,
        branch: &str,
        file_path: &str,
    ) -> Result<FileMetadata> {
        let primary = unit
            .primary_type()
            .ok_or_else(|| AnalyzerError::NoPrimaryType {
                path: file_path.to_string(),
            })?;

        let (code, business) = rayon::join(|| analyze_complexity(unit), || analyze_business(unit));
        let deps = self.inspector.inspect(&unit.imports);
        let assessment = assess(&code, &business, &deps, unit.line_count);

        debug!(
            file = file_path,
            class = %primary.name,
            cyclomatic = code.cyclomatic_complexity,
            cognitive = code.cognitive_complexity,
            risk = assessment.score,
            "analyzed file"
        );

        Ok(FileMetadata {
            repository_url: repo_url.to_string(),
            branch: branch.to_string(),
            file_path: file_path.to_string(),
            class_name: primary.name.clone(),
            package_name: unit.package_name().to_string(),
            line_count: unit.line_count,
            code_complexity: code,
            business_complexity: business,
            dependency_impact: deps,
            risk_score: assessment.score,
            recommendations: assessment.recommendations,
            analyzed_at: Utc::now(),
        })
    }

    /// Load a file through the provider and analyze it
    pub fn analyze_file(&self, path: &Path, repo_url: &str, branch: &str) -> Result<FileMetadata> {
        let unit = self.provider.load(path)?;
        self.analyze_one(&unit, repo_url, branch, &path.display().to_string())
    }

    // ========================================================================
    // Batches
    // ========================================================================

    /// Analyze many files; failures are logged and left out of the result
    ///
    /// The result may be shorter than `paths`.
    pub fn analyze_many(
        &self,
        paths: &[PathBuf],
        repo_url: &str,
        branch: &str,
    ) -> Vec<FileMetadata> {
        self.analyze_batch(paths, repo_url, branch).results
    }

    /// Analyze many files, keeping track of what failed or was skipped
    pub fn analyze_batch(&self, paths: &[PathBuf], repo_url: &str, branch: &str) -> BatchReport {
        let run = || -> Vec<FileOutcome> {
            paths
                .par_iter()
                .map(|path| self.analyze_isolated(path, repo_url, branch))
                .collect()
        };

        let mut builder = rayon::ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE);
        if let Some(jobs) = self.jobs {
            builder = builder.num_threads(jobs);
        }
        let outcomes = match builder.build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!(error = %e, "failed to build worker pool, using the global pool");
                run()
            }
        };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Done(metadata) => report.results.push(*metadata),
                FileOutcome::Failed(failure) => report.failures.push(failure),
                FileOutcome::Skipped(path) => report.skipped.push(path),
            }
        }

        info!(
            analyzed = report.results.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            "batch complete"
        );
        report
    }

    fn analyze_isolated(&self, path: &Path, repo_url: &str, branch: &str) -> FileOutcome {
        let shown = path.display().to_string();
        if self.cancel.load(Ordering::SeqCst) {
            return FileOutcome::Skipped(shown);
        }

        match self.analyze_file(path, repo_url, branch) {
            Ok(metadata) => FileOutcome::Done(Box::new(metadata)),
            Err(e) => {
                warn!(file = %shown, kind = e.kind(), error = %e, "failed to analyze file");
                FileOutcome::Failed(BatchFailure {
                    path: shown,
                    kind: e.kind().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
