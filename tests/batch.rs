//! Batch analysis over files on disk

mod common;

use std::path::PathBuf;

use common::TestRepo;
use riskmeta::indexing::expand_paths;
use riskmeta::{Analyzer, AnalyzerConfig};

fn sample_repo() -> TestRepo {
    TestRepo::new()
        .with_file("src/com/acme/A.java", "package com.acme;\nclass A { void a() {} }\n")
        .with_file("src/com/acme/B.java", "package com.acme;\nclass B { void b() {} }\n")
        .with_file("src/com/acme/Broken.java", "class Broken { void x( { }\n")
        .with_file("src/com/acme/Level.java", "enum Level { LOW, HIGH }\n")
        .with_file("build/generated/G.java", "class G {}\n")
}

#[test]
fn test_batch_isolates_failures() {
    let repo = sample_repo();
    let paths = expand_paths(&[repo.root().to_path_buf()], 10);
    assert_eq!(paths.len(), 4);

    let report = Analyzer::default().analyze_batch(&paths, "r", "main");
    let names: Vec<&str> = report.results.iter().map(|m| m.class_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    let mut kinds: Vec<&str> = report.failures.iter().map(|f| f.kind.as_str()).collect();
    kinds.sort();
    assert_eq!(kinds, vec!["malformed_unit", "no_primary_type"]);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_missing_and_unsupported_files_fail_softly() {
    let repo = TestRepo::new().with_file("notes.txt", "hello");
    let paths = vec![
        repo.root().join("notes.txt"),
        PathBuf::from("/nonexistent/Missing.java"),
    ];

    let config = AnalyzerConfig {
        jobs: Some(1),
        ..Default::default()
    };
    let report = Analyzer::from_config(&config).analyze_batch(&paths, "r", "main");
    assert!(report.results.is_empty());
    assert_eq!(report.failures[0].kind, "unsupported_language");
    assert!(report.failures[0].reason.contains("notes.txt"));
    assert_eq!(report.failures[1].kind, "unreadable_source");
}

#[test]
fn test_analyze_many_returns_successes() {
    let repo = sample_repo();
    let paths = expand_paths(&[repo.root().join("src")], 10);
    let results = Analyzer::default().analyze_many(&paths, "r", "main");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|m| m.package_name == "com.acme"));
}

#[test]
fn test_cancellation_flag_skips_pending_files() {
    let repo = sample_repo();
    let paths = expand_paths(&[repo.root().to_path_buf()], 10);

    let analyzer = Analyzer::default();
    analyzer
        .cancellation_flag()
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let report = analyzer.analyze_batch(&paths, "r", "main");
    assert_eq!(report.skipped.len(), paths.len());
    assert!(report.results.is_empty());
}

#[test]
fn test_deeply_nested_file_fails_alone() {
    let terms = vec!["\"a\""; 5000].join(" + ");
    let repo = TestRepo::new()
        .with_file("Big.java", &format!("class Big {{ String s() {{ return {}; }} }}\n", terms))
        .with_file("Ok.java", "class Ok { int one() { return 1; } }\n");
    let paths = vec![repo.root().join("Big.java"), repo.root().join("Ok.java")];

    let config = AnalyzerConfig {
        jobs: Some(2),
        ..Default::default()
    };
    let report = Analyzer::from_config(&config).analyze_batch(&paths, "r", "main");
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].class_name, "Ok");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, "malformed_unit");
    assert!(report.failures[0].reason.contains("Big.java"));
}
