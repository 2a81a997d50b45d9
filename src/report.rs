//! Human-readable text report

use crate::analyzer::BatchReport;
use crate::metadata::FileMetadata;
use crate::risk::{cognitive_rating, cyclomatic_rating, risk_rating, Rating};

const RULE: &str = "═══════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────\n";

fn risk_label(score: f64) -> &'static str {
    match risk_rating(score) {
        Rating::VeryHigh => "Critical",
        other => other.label(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Format one file's metadata as a boxed report
pub fn format_file_report(md: &FileMetadata) -> String {
    let mut report = String::new();
    let code = &md.code_complexity;
    let business = &md.business_complexity;
    let deps = &md.dependency_impact;

    report.push_str(RULE);
    report.push_str(&format!("  {}.{}\n", md.package_name, md.class_name));
    report.push_str(RULE);
    report.push_str(&format!("File:              {}\n", md.file_path));
    report.push_str(&format!("Repository:        {} ({})\n", md.repository_url, md.branch));
    report.push_str(&format!("Lines:             {:>6}\n", md.line_count));
    report.push_str(&format!(
        "Risk score:        {:>6.2}  [{}]\n",
        md.risk_score,
        risk_label(md.risk_score)
    ));

    report.push('\n');
    report.push_str(THIN_RULE);
    report.push_str("Complexity\n");
    report.push_str(&format!(
        "  Cyclomatic:      {:>6}  [{}]\n",
        code.cyclomatic_complexity,
        cyclomatic_rating(code.cyclomatic_complexity).label()
    ));
    report.push_str(&format!(
        "  Cognitive:       {:>6}  [{}]\n",
        code.cognitive_complexity,
        cognitive_rating(code.cognitive_complexity).label()
    ));
    report.push_str(&format!("  Methods:         {:>6}\n", code.total_methods));
    report.push_str(&format!(
        "  Avg method len:  {:>6.1}\n",
        code.average_method_length
    ));
    report.push_str(&format!("  Max nesting:     {:>6}\n", code.max_nesting_depth));
    for m in &code.complex_methods {
        report.push_str(&format!(
            "    ! {} (cyclomatic {}, cognitive {}, {} lines)\n",
            m.name, m.cyclomatic_complexity, m.cognitive_complexity, m.line_count
        ));
    }

    report.push('\n');
    report.push_str(THIN_RULE);
    report.push_str("Business\n");
    report.push_str(&format!(
        "  Criticality:     {:>6.1}\n",
        business.business_criticality
    ));
    report.push_str(&format!(
        "  Business methods:{:>6}\n",
        business.business_method_count
    ));
    report.push_str(&format!(
        "  Annotated:       {:>6}\n",
        yes_no(business.has_business_annotations)
    ));
    report.push_str(&format!(
        "  Validation:      {:>6}\n",
        business.validation_complexity
    ));
    report.push_str(&format!(
        "  Transactions:    {:>6}\n",
        yes_no(business.transaction_handling)
    ));
    report.push_str(&format!(
        "  Exceptions:      {:>6}\n",
        yes_no(business.exception_handling)
    ));
    if !business.business_methods.is_empty() {
        report.push_str(&format!(
            "  Methods:         {}\n",
            business.business_methods.join(", ")
        ));
    }

    report.push('\n');
    report.push_str(THIN_RULE);
    report.push_str(&format!(
        "Dependencies       fan-out {}, instability {:.2}\n",
        deps.fan_out, deps.instability
    ));
    for dep in &deps.outgoing_dependencies {
        report.push_str(&format!("  -> {}\n", dep));
    }
    report.push_str(&format!(
        "  Fan-in:          {:>6}  (requires project-wide analysis)\n",
        deps.fan_in
    ));

    report.push('\n');
    report.push_str(THIN_RULE);
    report.push_str("Recommendations\n");
    for rec in &md.recommendations {
        report.push_str(&format!("  * {}\n", rec));
    }

    report
}

/// Format a batch: every file report, then the failures and a summary line
pub fn format_batch_report(batch: &BatchReport) -> String {
    let mut report = String::new();

    for md in &batch.results {
        report.push_str(&format_file_report(md));
        report.push('\n');
    }

    if !batch.failures.is_empty() {
        report.push_str(THIN_RULE);
        report.push_str("Failed\n");
        for failure in &batch.failures {
            report.push_str(&format!(
                "  {} ({}): {}\n",
                failure.path, failure.kind, failure.reason
            ));
        }
        report.push('\n');
    }

    report.push_str(&format_batch_compact(batch));
    report.push('\n');
    report
}

/// One-line batch summary
pub fn format_batch_compact(batch: &BatchReport) -> String {
    let mut line = format!(
        "{} analyzed, {} failed",
        batch.results.len(),
        batch.failures.len()
    );
    if !batch.skipped.is_empty() {
        line.push_str(&format!(", {} skipped", batch.skipped.len()));
    }
    line
}
