//! Analysis result records
//!
//! These are the records handed to persistence and reporting collaborators.
//! Field names serialize in camelCase to match the stored document shape.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the analyzer derives from one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub repository_url: String,
    pub branch: String,
    pub file_path: String,
    pub class_name: String,
    pub package_name: String,
    pub line_count: usize,
    pub code_complexity: CodeComplexity,
    pub business_complexity: BusinessComplexity,
    pub dependency_impact: DependencyImpact,
    pub risk_score: f64,
    pub recommendations: Vec<Recommendation>,
    pub analyzed_at: DateTime<Utc>,
}

/// File-wide complexity figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeComplexity {
    /// Branch count + 1 over the whole file
    pub cyclomatic_complexity: u32,
    /// Sum of per-method cognitive complexity
    pub cognitive_complexity: u32,
    pub total_methods: u32,
    /// Mean method span in lines, 0 without methods
    pub average_method_length: f64,
    pub max_nesting_depth: u32,
    /// Methods over the complexity thresholds, in declaration order
    pub complex_methods: Vec<MethodComplexity>,
}

/// Snapshot of one method's complexity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodComplexity {
    pub name: String,
    pub cyclomatic_complexity: u32,
    pub cognitive_complexity: u32,
    pub line_count: usize,
}

/// Business-criticality signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessComplexity {
    /// Heuristic score in `[0, 10]`
    pub business_criticality: f64,
    pub has_business_annotations: bool,
    pub business_method_count: u32,
    pub validation_complexity: u32,
    pub transaction_handling: bool,
    pub exception_handling: bool,
    pub business_methods: Vec<String>,
}

/// Import-based coupling of one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyImpact {
    pub outgoing_dependencies: BTreeSet<String>,
    /// Always empty: single-file analysis has no project-wide index
    pub incoming_dependencies: BTreeSet<String>,
    pub fan_out: u32,
    pub fan_in: u32,
    /// `fan_out / (fan_out + fan_in)`, 0 when both are 0
    pub instability: f64,
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Review,
    /// Nothing to fix
    Ok,
}

impl Priority {
    /// Prefix used when rendering a recommendation
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::High => Some("HIGH PRIORITY"),
            Self::Medium => Some("MEDIUM PRIORITY"),
            Self::Review => Some("REVIEW"),
            Self::Ok => None,
        }
    }
}

/// A generated recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
}

impl Recommendation {
    pub fn new(priority: Priority, message: impl Into<String>) -> Self {
        Self {
            priority,
            message: message.into(),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.priority.prefix() {
            Some(prefix) => write!(f, "{}: {}", prefix, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_display() {
        let rec = Recommendation::new(Priority::High, "Do the thing");
        assert_eq!(rec.to_string(), "HIGH PRIORITY: Do the thing");

        let rec = Recommendation::new(Priority::Review, "Look again");
        assert_eq!(rec.to_string(), "REVIEW: Look again");

        let rec = Recommendation::new(Priority::Ok, "All good");
        assert_eq!(rec.to_string(), "All good");
    }

    #[test]
    fn test_camel_case_fields() {
        let value = serde_json::to_value(DependencyImpact::default()).unwrap();
        assert!(value.get("fanOut").is_some());
        assert!(value.get("incomingDependencies").is_some());

        let value = serde_json::to_value(CodeComplexity::default()).unwrap();
        assert!(value.get("maxNestingDepth").is_some());
    }
}
