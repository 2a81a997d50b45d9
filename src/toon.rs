//! TOON (Token-Oriented Object Notation) encoder using rtoon library
//!
//! Records are flattened into a `serde_json` object first so field order is
//! stable and empty sections are dropped, then handed to rtoon.

use rtoon::encode_default;
use serde_json::{json, Map, Value};

use crate::analyzer::BatchReport;
use crate::metadata::FileMetadata;

/// Encode one file's metadata as TOON
pub fn encode_toon(md: &FileMetadata) -> String {
    let value = Value::Object(metadata_object(md));
    encode_default(&value).unwrap_or_else(|e| format!("TOON encoding error: {}", e))
}

/// Encode a batch, one block per file separated by `---`, failures last
pub fn encode_toon_batch(batch: &BatchReport) -> String {
    let mut output = String::new();

    for md in &batch.results {
        output.push_str(&encode_toon(md));
        output.push_str("\n---\n");
    }

    if !batch.failures.is_empty() {
        let failures: Vec<Value> = batch
            .failures
            .iter()
            .map(|f| json!({ "path": f.path, "kind": f.kind, "reason": f.reason }))
            .collect();
        let value = json!({ "_type": "failures", "failures": failures });
        output.push_str(
            &encode_default(&value).unwrap_or_else(|e| format!("TOON encoding error: {}", e)),
        );
        output.push('\n');
    }

    output
}

fn metadata_object(md: &FileMetadata) -> Map<String, Value> {
    let mut obj = Map::new();
    let code = &md.code_complexity;
    let business = &md.business_complexity;
    let deps = &md.dependency_impact;

    obj.insert("file".to_string(), json!(md.file_path));
    obj.insert("class".to_string(), json!(md.class_name));
    obj.insert("package".to_string(), json!(md.package_name));
    obj.insert("repo".to_string(), json!(md.repository_url));
    obj.insert("branch".to_string(), json!(md.branch));
    obj.insert("lines".to_string(), json!(md.line_count));
    obj.insert("risk".to_string(), json!(round2(md.risk_score)));

    obj.insert("cyclomatic".to_string(), json!(code.cyclomatic_complexity));
    obj.insert("cognitive".to_string(), json!(code.cognitive_complexity));
    obj.insert("methods".to_string(), json!(code.total_methods));
    obj.insert(
        "avg_method_lines".to_string(),
        json!(round2(code.average_method_length)),
    );
    obj.insert("max_nesting".to_string(), json!(code.max_nesting_depth));

    // Uniform rows, encoded as a table
    if !code.complex_methods.is_empty() {
        let rows: Vec<Value> = code
            .complex_methods
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "cyclomatic": m.cyclomatic_complexity,
                    "cognitive": m.cognitive_complexity,
                    "lines": m.line_count
                })
            })
            .collect();
        obj.insert("complex_methods".to_string(), Value::Array(rows));
    }

    obj.insert(
        "criticality".to_string(),
        json!(round2(business.business_criticality)),
    );
    if business.has_business_annotations {
        obj.insert("business_annotated".to_string(), json!(true));
    }
    if !business.business_methods.is_empty() {
        obj.insert(
            "business_methods".to_string(),
            json!(business.business_methods),
        );
    }
    if business.validation_complexity > 0 {
        obj.insert(
            "validation".to_string(),
            json!(business.validation_complexity),
        );
    }
    obj.insert(
        "transactions".to_string(),
        json!(business.transaction_handling),
    );
    obj.insert(
        "exceptions".to_string(),
        json!(business.exception_handling),
    );

    obj.insert("fan_out".to_string(), json!(deps.fan_out));
    if !deps.outgoing_dependencies.is_empty() {
        obj.insert("depends_on".to_string(), json!(deps.outgoing_dependencies));
    }

    let recs: Vec<String> = md.recommendations.iter().map(|r| r.to_string()).collect();
    obj.insert("recommendations".to_string(), json!(recs));
    obj.insert("analyzed_at".to_string(), json!(md.analyzed_at.to_rfc3339()));

    obj
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::BatchFailure;
    use crate::metadata::{
        BusinessComplexity, CodeComplexity, DependencyImpact, Priority, Recommendation,
    };
    use chrono::Utc;

    fn sample() -> FileMetadata {
        FileMetadata {
            repository_url: "https://git.example/shop".to_string(),
            branch: "main".to_string(),
            file_path: "src/Util.java".to_string(),
            class_name: "Util".to_string(),
            package_name: "default".to_string(),
            line_count: 10,
            code_complexity: CodeComplexity {
                cyclomatic_complexity: 1,
                ..Default::default()
            },
            business_complexity: BusinessComplexity::default(),
            dependency_impact: DependencyImpact::default(),
            risk_score: 0.450000001,
            recommendations: vec![Recommendation::new(Priority::Ok, "Code quality looks good!")],
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_encode_contains_key_fields() {
        let out = encode_toon(&sample());
        assert!(out.contains("Util"));
        assert!(out.contains("0.45"));
        assert!(!out.contains("TOON encoding error"));
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let obj = metadata_object(&sample());
        assert!(obj.get("complex_methods").is_none());
        assert!(obj.get("depends_on").is_none());
        assert!(obj.get("business_methods").is_none());
        assert_eq!(obj.get("risk"), Some(&json!(0.45)));
    }

    #[test]
    fn test_batch_appends_failures() {
        let batch = BatchReport {
            results: vec![sample()],
            failures: vec![BatchFailure {
                path: "Empty.java".to_string(),
                kind: "no_primary_type".to_string(),
                reason: "no class".to_string(),
            }],
            skipped: Vec::new(),
        };
        let out = encode_toon_batch(&batch);
        assert!(out.contains("---"));
        assert!(out.contains("Empty.java"));
    }
}
