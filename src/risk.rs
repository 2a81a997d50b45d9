//! Risk scoring and recommendations
//!
//! The score is additive and capped at 100:
//! ```text
//! complexity = cyclomatic * 0.3 + cognitive * 0.2 + (lines > 500 ? 0.2 : 0.1)
//! business   = min(criticality, 10) * 0.25
//! dependency = fan_out > 10 ? 0.15 : 0.05
//! risk       = min(complexity + business + dependency, 100)
//! ```
//! Typical scores land in single digits; the scale is kept as-is for
//! compatibility with stored records.

use serde::{Deserialize, Serialize};

use crate::business::MAX_CRITICALITY;
use crate::metadata::{
    BusinessComplexity, CodeComplexity, DependencyImpact, Priority, Recommendation,
};

pub const MAX_RISK: f64 = 100.0;

const LARGE_FILE_LINES: usize = 500;
const HIGH_FAN_OUT: u32 = 10;
const HIGH_CYCLOMATIC: u32 = 20;
const HIGH_COGNITIVE: u32 = 25;
const CRITICAL_BUSINESS: f64 = 7.0;
const DEEP_NESTING: u32 = 4;

/// Score plus the recommendations derived from the same inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub recommendations: Vec<Recommendation>,
}

/// Combine the three analyses and the file length into a risk assessment
pub fn assess(
    code: &CodeComplexity,
    business: &BusinessComplexity,
    deps: &DependencyImpact,
    line_count: usize,
) -> RiskAssessment {
    RiskAssessment {
        score: risk_score(code, business, deps, line_count),
        recommendations: recommendations(code, business, line_count),
    }
}

pub fn risk_score(
    code: &CodeComplexity,
    business: &BusinessComplexity,
    deps: &DependencyImpact,
    line_count: usize,
) -> f64 {
    let size_score = if line_count > LARGE_FILE_LINES { 0.2 } else { 0.1 };
    let complexity_score = code.cyclomatic_complexity as f64 * 0.3
        + code.cognitive_complexity as f64 * 0.2
        + size_score;

    let business_score = business.business_criticality.min(MAX_CRITICALITY) * 0.25;
    let dependency_score = if deps.fan_out > HIGH_FAN_OUT { 0.15 } else { 0.05 };

    (complexity_score + business_score + dependency_score).min(MAX_RISK)
}

/// Rules are checked in a fixed order; each one that holds is appended
pub fn recommendations(
    code: &CodeComplexity,
    business: &BusinessComplexity,
    line_count: usize,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if code.cyclomatic_complexity > HIGH_CYCLOMATIC {
        recs.push(Recommendation::new(
            Priority::High,
            "Reduce cyclomatic complexity through method extraction",
        ));
    }

    if code.cognitive_complexity > HIGH_COGNITIVE {
        recs.push(Recommendation::new(
            Priority::High,
            "Simplify complex logic to improve readability",
        ));
    }

    if line_count > LARGE_FILE_LINES {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Consider breaking down large class into smaller components",
        ));
    }

    if business.has_business_annotations && business.business_method_count == 0 {
        recs.push(Recommendation::new(
            Priority::Review,
            "Business class with no business methods detected",
        ));
    }

    if !business.exception_handling && business.business_criticality > CRITICAL_BUSINESS {
        recs.push(Recommendation::new(
            Priority::High,
            "Add proper exception handling for business-critical class",
        ));
    }

    if code.max_nesting_depth > DEEP_NESTING {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Reduce nesting depth through guard clauses",
        ));
    }

    if recs.is_empty() {
        recs.push(Recommendation::new(
            Priority::Ok,
            "Code quality looks good! Consider adding comprehensive unit tests.",
        ));
    }

    recs
}

// ============================================================================
// Rating bands
// ============================================================================

/// Qualitative band for a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

pub fn cyclomatic_rating(value: u32) -> Rating {
    match value {
        0..=10 => Rating::Low,
        11..=20 => Rating::Medium,
        21..=50 => Rating::High,
        _ => Rating::VeryHigh,
    }
}

pub fn cognitive_rating(value: u32) -> Rating {
    match value {
        0..=15 => Rating::Low,
        16..=25 => Rating::Medium,
        26..=50 => Rating::High,
        _ => Rating::VeryHigh,
    }
}

/// Risk band; the top band reads "Critical" in reports
pub fn risk_rating(score: f64) -> Rating {
    if score <= 20.0 {
        Rating::Low
    } else if score <= 40.0 {
        Rating::Medium
    } else if score <= 70.0 {
        Rating::High
    } else {
        Rating::VeryHigh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(cyclomatic: u32, cognitive: u32, nesting: u32) -> CodeComplexity {
        CodeComplexity {
            cyclomatic_complexity: cyclomatic,
            cognitive_complexity: cognitive,
            max_nesting_depth: nesting,
            ..Default::default()
        }
    }

    fn deps(fan_out: u32) -> DependencyImpact {
        DependencyImpact {
            fan_out,
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_file_score() {
        let score = risk_score(&code(1, 0, 0), &BusinessComplexity::default(), &deps(0), 10);
        assert!((score - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_large_file_and_fan_out_weights() {
        let business = BusinessComplexity {
            business_criticality: 4.0,
            ..Default::default()
        };
        let score = risk_score(&code(10, 5, 0), &business, &deps(11), 501);
        // 3.0 + 1.0 + 0.2 + 1.0 + 0.15
        assert!((score - 5.35).abs() < 1e-9);
    }

    #[test]
    fn test_only_positive_message_when_clean() {
        let recs = recommendations(&code(1, 0, 0), &BusinessComplexity::default(), 10);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Ok);
        assert!(recs[0].message.starts_with("Code quality looks good"));
    }

    #[test]
    fn test_rules_fire_in_order() {
        let business = BusinessComplexity {
            business_criticality: 8.0,
            has_business_annotations: true,
            business_method_count: 0,
            exception_handling: false,
            ..Default::default()
        };
        let recs = recommendations(&code(21, 26, 5), &business, 501);
        let rendered: Vec<String> = recs.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "HIGH PRIORITY: Reduce cyclomatic complexity through method extraction",
                "HIGH PRIORITY: Simplify complex logic to improve readability",
                "MEDIUM PRIORITY: Consider breaking down large class into smaller components",
                "REVIEW: Business class with no business methods detected",
                "HIGH PRIORITY: Add proper exception handling for business-critical class",
                "MEDIUM PRIORITY: Reduce nesting depth through guard clauses",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let business = BusinessComplexity {
            business_criticality: 7.0,
            ..Default::default()
        };
        let recs = recommendations(&code(20, 25, 4), &business, 500);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Ok);
    }

    #[test]
    fn test_exception_handling_silences_rule() {
        let business = BusinessComplexity {
            business_criticality: 9.0,
            exception_handling: true,
            ..Default::default()
        };
        let recs = recommendations(&code(1, 0, 0), &business, 10);
        assert_eq!(recs[0].priority, Priority::Ok);
    }

    #[test]
    fn test_ratings() {
        assert_eq!(cyclomatic_rating(10), Rating::Low);
        assert_eq!(cyclomatic_rating(11), Rating::Medium);
        assert_eq!(cyclomatic_rating(50), Rating::High);
        assert_eq!(cyclomatic_rating(51), Rating::VeryHigh);
        assert_eq!(cognitive_rating(15), Rating::Low);
        assert_eq!(cognitive_rating(26), Rating::High);
        assert_eq!(risk_rating(0.45), Rating::Low);
        assert_eq!(risk_rating(40.0), Rating::Medium);
        assert_eq!(risk_rating(70.1), Rating::VeryHigh);
    }

    proptest! {
        #[test]
        fn score_stays_in_bounds(
            cyclomatic in 1u32..100_000,
            cognitive in 0u32..100_000,
            criticality in 0.0..10.0f64,
            fan_out in 0u32..500,
            lines in 0usize..1_000_000,
        ) {
            let business = BusinessComplexity {
                business_criticality: criticality,
                ..Default::default()
            };
            let score =
                risk_score(&code(cyclomatic, cognitive, 0), &business, &deps(fan_out), lines);
            prop_assert!(score >= 0.0);
            prop_assert!(score <= MAX_RISK);
        }

        #[test]
        fn always_at_least_one_recommendation(
            cyclomatic in 1u32..100,
            cognitive in 0u32..100,
            nesting in 0u32..10,
            lines in 0usize..2_000,
        ) {
            let recs = recommendations(
                &code(cyclomatic, cognitive, nesting),
                &BusinessComplexity::default(),
                lines,
            );
            prop_assert!(!recs.is_empty());
            let positive = recs.iter().filter(|r| r.priority == Priority::Ok).count();
            prop_assert!(positive == 0 || recs.len() == 1);
        }
    }
}
