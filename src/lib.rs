//! riskmeta: source complexity and risk metadata for Java files
//!
//! Parses Java sources with tree-sitter into a [`SourceUnit`], then derives
//! per-file metadata: cyclomatic and cognitive complexity, business
//! criticality signals, import fan-out, a composite risk score and
//! prioritized recommendations.
//!
//! # Example
//!
//! ```ignore
//! use riskmeta::{parse_java, Analyzer};
//!
//! let source = r#"
//! @Service
//! public class PaymentService {
//!     public boolean validatePayment(Payment p) {
//!         if (p == null) throw new IllegalArgumentException();
//!         return true;
//!     }
//! }
//! "#;
//!
//! let unit = parse_java("PaymentService.java", source)?;
//! let metadata = Analyzer::default().analyze_one(
//!     &unit,
//!     "https://git.example/shop",
//!     "main",
//!     "PaymentService.java",
//! )?;
//! println!("risk {:.2}", metadata.risk_score);
//! ```

pub mod analyzer;
pub mod business;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod dependency;
pub mod error;
pub mod indexing;
pub mod metadata;
pub mod parser;
pub mod report;
pub mod risk;
pub mod toon;
pub mod unit;

// Re-export commonly used types
pub use analyzer::{Analyzer, BatchFailure, BatchReport};
pub use business::analyze_business;
pub use cli::{Cli, OutputFormat};
pub use complexity::{analyze_complexity, method_complexity};
pub use config::AnalyzerConfig;
pub use dependency::DependencyInspector;
pub use error::{AnalyzerError, Result};
pub use metadata::{
    BusinessComplexity, CodeComplexity, DependencyImpact, FileMetadata, MethodComplexity,
    Priority, Recommendation,
};
pub use parser::{parse_java, JavaFileLoader, SourceProvider};
pub use report::{format_batch_compact, format_batch_report, format_file_report};
pub use risk::{assess, RiskAssessment};
pub use toon::{encode_toon, encode_toon_batch};
pub use unit::SourceUnit;
