//! Integration tests for report rendering

use codebug_core::report::{
    BugDensityChartData, CriticalBug, LanguageChartData, ScanReport, ScanSummary,
    SeverityChartData, TopFilesChartData,
};
use codebug_core::{render_html_report, render_json, render_text};
use std::io::Write;

fn sample_report() -> ScanReport {
    ScanReport {
        summary: ScanSummary {
            repository: "acme/widgets".to_string(),
            total_files: 120,
            analyzed_files: 100,
            total_bugs: 40,
            overall_bug_density: 0.40,
            timestamp: "2024-03-01T12:00:00".to_string(),
        },
        severity: SeverityChartData {
            labels: vec![
                "critical".to_string(),
                "high".to_string(),
                "medium".to_string(),
                "low".to_string(),
            ],
            values: vec![4, 10, 16, 10],
            colors: vec![],
        },
        top_files: TopFilesChartData {
            labels: vec!["src/core.py".to_string(), "src/api.js".to_string()],
            values: vec![12, 7],
        },
        languages: LanguageChartData {
            labels: vec![
                "Python".to_string(),
                "JavaScript".to_string(),
                "Go".to_string(),
                "Rust".to_string(),
            ],
            file_counts: vec![50, 30, 15, 5],
            bug_counts: vec![20, 12, 6, 2],
        },
        bug_density: BugDensityChartData {
            labels: vec![
                "Python".to_string(),
                "JavaScript".to_string(),
                "Go".to_string(),
                "Rust".to_string(),
            ],
            file_counts: vec![50, 30, 15, 5],
            bug_counts: vec![20, 12, 6, 2],
            bug_densities: vec![0.4, 0.4, 0.4, 0.4],
        },
        critical_bugs: vec![CriticalBug {
            file_path: "src/core.py".to_string(),
            line_number: 7,
            bug_type: "sql_injection".to_string(),
            description: "Unsanitized input in query".to_string(),
            code_snippet: "6  query = build()\n7: run(query + user_input)\n8  return".to_string(),
        }],
    }
}

#[test]
fn test_load_report_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = sample_report().to_json().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let loaded = ScanReport::load(file.path()).unwrap();
    assert_eq!(loaded.summary.repository, "acme/widgets");
    assert_eq!(loaded.languages.labels.len(), 4);
    assert_eq!(loaded.critical_bugs.len(), 1);
}

#[test]
fn test_load_rejects_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not json").unwrap();

    let err = ScanReport::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn test_grouped_chart_series_match_label_count() {
    // Four labels with equal-length counts must yield exactly two series
    // of four points each
    let json = render_json(&sample_report());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let datasets = value["language-chart"]["data"]["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 2);
    for dataset in datasets {
        assert_eq!(dataset["data"].as_array().unwrap().len(), 4);
    }
}

#[test]
fn test_html_report_is_self_contained_page() {
    let html = render_html_report(&sample_report());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</html>"));
    assert!(html.contains("<style>"));
    assert!(html.contains("function initialize()"));
    // All four charts instantiated
    assert_eq!(html.matches("new Chart(").count(), 4);
}

#[test]
fn test_html_report_highlights_finding_line() {
    let html = render_html_report(&sample_report());
    assert!(html.contains("<div class=\"highlighted-line\">"));
    // `return` on the context line is keyword-wrapped
    assert!(html.contains("<span class=\"keyword\">return</span>"));
}

#[test]
fn test_rendering_is_deterministic() {
    let report = sample_report();
    assert_eq!(render_html_report(&report), render_html_report(&report));
    assert_eq!(render_json(&report), render_json(&report));
    assert_eq!(render_text(&report), render_text(&report));
}

#[test]
fn test_text_report_lists_languages() {
    let text = render_text(&sample_report());
    assert!(text.contains("LANGUAGE"));
    assert!(text.contains("Python"));
    assert!(text.contains("0.40"));
    assert!(text.contains("src/core.py"));
}
