//! Report data model and text/JSON output
//!
//! Global invariants enforced:
//! - Chart inputs are parallel positional sequences: index i across the
//!   sequences of one input describes a single datum
//! - Sequence lengths are the caller's responsibility and are not validated
//! - Identical input yields byte-for-byte identical output

use crate::charts::{
    bug_density_chart, language_chart, severity_chart, slice_percent, top_files_chart,
    BUG_DENSITY_SURFACE, LANGUAGE_SURFACE, SEVERITY_SURFACE, TOP_FILES_SURFACE,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bug severity levels, most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }

    /// Default slice color for the severity pie
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Critical => "#f72585",
            Severity::High => "#b5179e",
            Severity::Medium => "#7209b7",
            Severity::Low => "#4361ee",
            Severity::Info => "#4cc9f0",
        }
    }

    /// Parse a chart label back into a severity (case-insensitive)
    pub fn from_label(label: &str) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|s| label.eq_ignore_ascii_case(s.as_str()))
    }
}

/// Input for the severity pie chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Slice colors; when empty (or mismatched in length), per-severity
    /// defaults are derived from the labels instead
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

impl SeverityChartData {
    /// Color for each slice, falling back to the per-severity defaults
    pub fn slice_colors(&self) -> Vec<String> {
        if self.colors.len() == self.labels.len() && !self.colors.is_empty() {
            return self.colors.clone();
        }
        self.labels
            .iter()
            .map(|label| {
                Severity::from_label(label)
                    .map(|s| s.color())
                    .unwrap_or(Severity::Info.color())
                    .to_string()
            })
            .collect()
    }
}

/// Input for the top affected files bar chart.
/// Values are assumed pre-sorted descending by the caller; this layer
/// does not sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopFilesChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Input for the per-language grouped bar chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageChartData {
    pub labels: Vec<String>,
    pub file_counts: Vec<u64>,
    pub bug_counts: Vec<u64>,
}

/// Input for the bug density bubble chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugDensityChartData {
    pub labels: Vec<String>,
    pub file_counts: Vec<u64>,
    pub bug_counts: Vec<u64>,
    /// Bugs-per-file ratio per language, precomputed upstream
    pub bug_densities: Vec<f64>,
}

/// Scan-level summary figures shown in the report header cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub repository: String,
    pub total_files: u64,
    pub analyzed_files: u64,
    pub total_bugs: u64,
    pub overall_bug_density: f64,
    /// ISO 8601 timestamp of the scan, passed through verbatim
    pub timestamp: String,
}

/// A critical finding listed with its code excerpt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalBug {
    pub file_path: String,
    pub line_number: u32,
    pub bug_type: String,
    pub description: String,
    /// Excerpt with `N: ` on the finding line and `N  ` on context lines;
    /// the highlighter's line flag keys off exactly that prefix shape
    #[serde(default)]
    pub code_snippet: String,
}

/// Everything needed to render one results page, precomputed upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub severity: SeverityChartData,
    pub top_files: TopFilesChartData,
    pub languages: LanguageChartData,
    pub bug_density: BugDensityChartData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub critical_bugs: Vec<CriticalBug>,
}

impl ScanReport {
    /// Parse a report from its JSON representation
    pub fn from_json(json: &str) -> anyhow::Result<ScanReport> {
        serde_json::from_str(json).context("failed to parse scan report JSON")
    }

    /// Load a report from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<ScanReport> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report file: {}", path.display()))?;
        ScanReport::from_json(&json)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scan report")
    }
}

/// Render the four chart configurations as a JSON object keyed by surface id
pub fn render_json(report: &ScanReport) -> String {
    let mut configs = serde_json::Map::new();
    for (surface, config) in [
        (SEVERITY_SURFACE, severity_chart(&report.severity)),
        (TOP_FILES_SURFACE, top_files_chart(&report.top_files)),
        (LANGUAGE_SURFACE, language_chart(&report.languages)),
        (BUG_DENSITY_SURFACE, bug_density_chart(&report.bug_density)),
    ] {
        let value = serde_json::to_value(&config).unwrap_or(serde_json::Value::Null);
        configs.insert(surface.id().to_string(), value);
    }
    serde_json::to_string_pretty(&configs).unwrap_or_else(|_| "{}".to_string())
}

/// Render a report as fixed-width text output
pub fn render_text(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Repository: {}\nScanned:    {}\nFiles:      {} analyzed of {}\nBugs:       {} ({:.2} bugs/file)\n\n",
        report.summary.repository,
        report.summary.timestamp,
        report.summary.analyzed_files,
        report.summary.total_files,
        report.summary.total_bugs,
        report.summary.overall_bug_density,
    ));

    let total: u64 = report.severity.values.iter().sum();
    output.push_str(&format!("{:<12} {:<8} {}\n", "SEVERITY", "COUNT", "SHARE"));
    for (label, value) in report.severity.labels.iter().zip(&report.severity.values) {
        let share = if total > 0 {
            format!("{}%", slice_percent(*value, total))
        } else {
            "-".to_string()
        };
        output.push_str(&format!("{:<12} {:<8} {}\n", label, value, share));
    }

    output.push('\n');
    output.push_str(&format!("{:<12} {:<8} {:<8} {}\n", "LANGUAGE", "FILES", "BUGS", "DENSITY"));
    for (i, label) in report.bug_density.labels.iter().enumerate() {
        output.push_str(&format!(
            "{:<12} {:<8} {:<8} {:.2}\n",
            label,
            report.bug_density.file_counts.get(i).copied().unwrap_or(0),
            report.bug_density.bug_counts.get(i).copied().unwrap_or(0),
            report.bug_density.bug_densities.get(i).copied().unwrap_or(0.0),
        ));
    }

    if !report.top_files.labels.is_empty() {
        output.push('\n');
        output.push_str(&format!("{:<40} {}\n", "FILE", "BUGS"));
        for (label, value) in report.top_files.labels.iter().zip(&report.top_files.values) {
            output.push_str(&format!("{:<40} {}\n", truncate_or_pad(label, 40), value));
        }
    }

    output
}

/// Truncate or pad string to fixed width, never splitting a character
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        let mut end = width.saturating_sub(3);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ScanReport {
        ScanReport {
            summary: ScanSummary {
                repository: "example/repo".to_string(),
                total_files: 50,
                analyzed_files: 42,
                total_bugs: 17,
                overall_bug_density: 0.40,
                timestamp: "2024-03-01T12:00:00".to_string(),
            },
            severity: SeverityChartData {
                labels: vec!["critical".to_string(), "high".to_string(), "low".to_string()],
                values: vec![3, 6, 8],
                colors: vec![],
            },
            top_files: TopFilesChartData {
                labels: vec!["src/app.py".to_string(), "src/util.py".to_string()],
                values: vec![9, 4],
            },
            languages: LanguageChartData {
                labels: vec!["Python".to_string(), "JavaScript".to_string()],
                file_counts: vec![30, 12],
                bug_counts: vec![11, 6],
            },
            bug_density: BugDensityChartData {
                labels: vec!["Python".to_string(), "JavaScript".to_string()],
                file_counts: vec![30, 12],
                bug_counts: vec![11, 6],
                bug_densities: vec![0.37, 0.5],
            },
            critical_bugs: vec![],
        }
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        let parsed = ScanReport::from_json(&json).unwrap();
        assert_eq!(parsed.summary.total_bugs, 17);
        assert_eq!(parsed.severity.labels.len(), 3);
        assert!(parsed.critical_bugs.is_empty());
    }

    #[test]
    fn test_default_severity_colors_follow_labels() {
        let report = sample_report();
        let colors = report.severity.slice_colors();
        assert_eq!(
            colors,
            vec!["#f72585".to_string(), "#b5179e".to_string(), "#4361ee".to_string()]
        );
    }

    #[test]
    fn test_caller_colors_win_when_lengths_match() {
        let mut data = sample_report().severity;
        data.colors = vec!["#111".to_string(), "#222".to_string(), "#333".to_string()];
        assert_eq!(data.slice_colors()[0], "#111");
    }

    #[test]
    fn test_unknown_label_falls_back_to_info_color() {
        let data = SeverityChartData {
            labels: vec!["mystery".to_string()],
            values: vec![1],
            colors: vec![],
        };
        assert_eq!(data.slice_colors(), vec![Severity::Info.color().to_string()]);
    }

    #[test]
    fn test_render_json_keys_are_surface_ids() {
        let json = render_json(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(obj.contains_key("severity-chart"));
        assert!(obj.contains_key("top-files-chart"));
        assert!(obj.contains_key("language-chart"));
        assert!(obj.contains_key("bug-density-chart"));
    }

    #[test]
    fn test_render_text_includes_severity_shares() {
        let text = render_text(&sample_report());
        // 3 of 17 => round(17.6) = 18%
        assert!(text.contains("critical"));
        assert!(text.contains("18%"));
        assert!(text.contains("example/repo"));
    }

    #[test]
    fn test_truncate_never_splits_a_character() {
        let path = "é".repeat(25);
        // 50 bytes, width 40: the cut lands mid-character and must back up
        assert_eq!(truncate_or_pad(&path, 40), format!("{}...", "é".repeat(18)));

        let mut report = sample_report();
        report.top_files.labels = vec![path];
        report.top_files.values = vec![3];
        let text = render_text(&report);
        assert!(text.contains("..."));
    }

    #[test]
    fn test_render_text_zero_total_shows_dash() {
        let mut report = sample_report();
        report.severity.values = vec![0, 0, 0];
        let text = render_text(&report);
        assert!(text.contains('-'));
        assert!(!text.contains("NaN"));
    }
}
