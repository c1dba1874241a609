//! HTML results page generation
//!
//! Generates a self-contained results page with embedded CSS and
//! JavaScript: summary cards, the four chart surfaces, a per-language
//! table, and highlighted code excerpts for critical findings. The only
//! external fetch is the charting library itself.

use crate::charts::{
    bug_density_chart, init_script, language_chart, severity_chart, top_files_chart, ChartConfig,
    Surface, BUG_DENSITY_SURFACE, LANGUAGE_SURFACE, SEVERITY_SURFACE, TOP_FILES_SURFACE,
};
use crate::highlight::highlight_snippet;
use crate::report::{CriticalBug, ScanReport, ScanSummary};

const CHART_LIBRARY_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Render a scan report as a complete HTML page
pub fn render_html_report(report: &ScanReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CodeBug Report - {repo}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        {summary}
        {charts}
        {languages}
        {critical}
        {footer}
    </div>
    <script src="{cdn}"></script>
    <script>{js}</script>
    <script>{chart_script}</script>
</body>
</html>"#,
        repo = html_escape(&report.summary.repository),
        css = inline_css(),
        cdn = CHART_LIBRARY_CDN,
        js = inline_javascript(),
        header = render_header(&report.summary),
        summary = render_summary(&report.summary),
        charts = render_charts_section(),
        languages = render_language_table(report),
        critical = render_critical_bugs(&report.critical_bugs),
        footer = render_footer(),
        chart_script = render_charts_script(report),
    )
}

/// Render header section
fn render_header(summary: &ScanSummary) -> String {
    format!(
        r#"<header>
    <h1>CodeBug Report</h1>
    <div class="meta">
        <span>Repository: <strong>{repo}</strong></span> •
        <span>Scanned: {timestamp}</span>
    </div>
</header>"#,
        repo = html_escape(&summary.repository),
        timestamp = html_escape(&summary.timestamp),
    )
}

/// Render summary cards
fn render_summary(summary: &ScanSummary) -> String {
    format!(
        r#"<div class="summary">
    <div class="summary-card" data-tooltip="Files discovered in the repository">
        <h3>Total Files</h3>
        <div class="value">{total_files}</div>
    </div>
    <div class="summary-card" data-tooltip="Files the analyzers could process">
        <h3>Analyzed Files</h3>
        <div class="value">{analyzed}</div>
    </div>
    <div class="summary-card" data-tooltip="Findings across all severities">
        <h3>Total Bugs</h3>
        <div class="value bugs">{bugs}</div>
    </div>
    <div class="summary-card" data-tooltip="Bugs per analyzed file">
        <h3>Bug Density</h3>
        <div class="value">{density:.2}</div>
    </div>
</div>"#,
        total_files = summary.total_files,
        analyzed = summary.analyzed_files,
        bugs = summary.total_bugs,
        density = summary.overall_bug_density,
    )
}

/// Render the four chart surfaces. Ids are the well-known surface ids the
/// generated init script binds to.
fn render_charts_section() -> String {
    let card = |surface: Surface, heading: &str| {
        format!(
            r#"        <div class="chart-card">
            <h3>{heading}</h3>
            <canvas id="{id}" height="260"></canvas>
        </div>"#,
            heading = heading,
            id = surface.id(),
        )
    };

    format!(
        r#"<section class="section charts-section">
    <h2>Charts</h2>
    <div class="charts-grid">
{severity}
{top_files}
{languages}
{density}
    </div>
</section>"#,
        severity = card(SEVERITY_SURFACE, "Severity"),
        top_files = card(TOP_FILES_SURFACE, "Top Affected Files"),
        languages = card(LANGUAGE_SURFACE, "Languages"),
        density = card(BUG_DENSITY_SURFACE, "Bug Density"),
    )
}

/// Render the per-language table from the density input, which carries
/// file counts, bug counts, and densities for every language
fn render_language_table(report: &ScanReport) -> String {
    let data = &report.bug_density;
    if data.labels.is_empty() {
        return String::new();
    }

    let rows: String = data
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            format!(
                "<tr>\n<td>{label}</td>\n<td>{files}</td>\n<td>{bugs}</td>\n<td>{density:.2}</td>\n</tr>",
                label = html_escape(label),
                files = data.file_counts.get(i).copied().unwrap_or(0),
                bugs = data.bug_counts.get(i).copied().unwrap_or(0),
                density = data.bug_densities.get(i).copied().unwrap_or(0.0),
            )
        })
        .collect();

    format!(
        r#"<section class="section">
    <h2>Languages</h2>
    <table>
        <thead>
            <tr>
                <th>Language</th>
                <th>Files</th>
                <th>Bugs</th>
                <th title="Bugs per file">Density</th>
            </tr>
        </thead>
        <tbody>
            {rows}
        </tbody>
    </table>
</section>"#,
        rows = rows,
    )
}

/// Render critical findings with their highlighted code excerpts.
/// Returns empty string when there are none.
fn render_critical_bugs(bugs: &[CriticalBug]) -> String {
    if bugs.is_empty() {
        return String::new();
    }

    let cards: String = bugs
        .iter()
        .map(|bug| {
            let snippet = if bug.code_snippet.is_empty() {
                String::new()
            } else {
                format!(
                    "<pre><code>{}</code></pre>",
                    highlight_snippet(&bug.code_snippet)
                )
            };
            format!(
                r#"<div class="bug-card">
        <div class="bug-head">
            <span class="bug-type">{bug_type}</span>
            <span class="bug-location monospace">{file}:{line}</span>
        </div>
        <p>{description}</p>
        {snippet}
    </div>"#,
                bug_type = html_escape(&bug.bug_type),
                file = html_escape(&bug.file_path),
                line = bug.line_number,
                description = html_escape(&bug.description),
                snippet = snippet,
            )
        })
        .collect();

    format!(
        r#"<section class="section critical-section">
    <h2>Critical Bugs ({count})</h2>
    {cards}
</section>"#,
        count = bugs.len(),
        cards = cards,
    )
}

/// Render footer section
fn render_footer() -> String {
    r#"<footer>
    <p>Generated by CodeBug</p>
</footer>"#
        .to_string()
}

/// Build the script that instantiates the four charts on their surfaces
fn render_charts_script(report: &ScanReport) -> String {
    let configs: [(Surface, ChartConfig); 4] = [
        (SEVERITY_SURFACE, severity_chart(&report.severity)),
        (TOP_FILES_SURFACE, top_files_chart(&report.top_files)),
        (LANGUAGE_SURFACE, language_chart(&report.languages)),
        (BUG_DENSITY_SURFACE, bug_density_chart(&report.bug_density)),
    ];

    let mut script = String::new();
    for (surface, config) in &configs {
        script.push_str(&init_script(*surface, config));
        script.push('\n');
    }
    script
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
/* Reset & Base */
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #f1f3f5;
    background: #14151f;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 2rem;
}

/* Header */
header {
    margin-bottom: 2rem;
    padding-bottom: 1rem;
    border-bottom: 2px solid #2b2d42;
}

header h1 {
    font-size: 2rem;
    font-weight: 700;
    margin-bottom: 0.5rem;
}

header .meta {
    color: #9aa0b5;
    font-size: 0.875rem;
}

/* Summary cards */
.summary {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 1rem;
    margin-bottom: 2rem;
}

.summary-card {
    background: #1d1e2c;
    padding: 1rem;
    border-radius: 0.5rem;
    border-left: 4px solid #3a86ff;
}

.summary-card h3 {
    font-size: 0.875rem;
    font-weight: 600;
    color: #9aa0b5;
    margin-bottom: 0.5rem;
}

.summary-card .value {
    font-size: 1.5rem;
    font-weight: 700;
}

.summary-card .value.bugs {
    color: #f72585;
}

/* Sections */
.section {
    margin-bottom: 2rem;
}

.section h2 {
    font-size: 1.5rem;
    font-weight: 700;
    margin-bottom: 1rem;
}

/* Charts */
.charts-grid {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 1rem;
}

@media (max-width: 768px) {
    .charts-grid {
        grid-template-columns: 1fr;
    }
}

.chart-card {
    background: #1d1e2c;
    border-radius: 0.5rem;
    padding: 1rem;
}

.chart-card h3 {
    font-size: 0.875rem;
    font-weight: 600;
    color: #9aa0b5;
    margin-bottom: 0.5rem;
}

.chart-card canvas {
    width: 100%;
}

/* Table */
table {
    width: 100%;
    border-collapse: collapse;
    background: #1d1e2c;
    border-radius: 0.5rem;
    overflow: hidden;
}

th {
    padding: 0.75rem;
    text-align: left;
    font-weight: 600;
    font-size: 0.875rem;
    color: #9aa0b5;
    border-bottom: 2px solid #2b2d42;
}

td {
    padding: 0.75rem;
    border-bottom: 1px solid #2b2d42;
    font-size: 0.875rem;
}

tr:last-child td {
    border-bottom: none;
}

/* Critical bug cards */
.critical-section h2 {
    color: #f72585;
}

.bug-card {
    background: #1d1e2c;
    border-left: 4px solid #f72585;
    border-radius: 0.5rem;
    padding: 1rem;
    margin-bottom: 1rem;
}

.bug-head {
    display: flex;
    justify-content: space-between;
    margin-bottom: 0.5rem;
}

.bug-type {
    font-weight: 600;
    color: #f72585;
}

.bug-location {
    color: #9aa0b5;
}

.monospace {
    font-family: 'Monaco', 'Courier New', monospace;
    font-size: 0.875rem;
}

/* Code excerpts */
pre {
    background: #14151f;
    border: 1px solid #2b2d42;
    border-radius: 0.375rem;
    padding: 0.75rem;
    overflow-x: auto;
    margin-top: 0.75rem;
}

code {
    font-family: 'Monaco', 'Courier New', monospace;
    font-size: 0.8125rem;
    white-space: pre;
}

code .keyword {
    color: #f72585;
}

code .string {
    color: #4cc9f0;
}

code .number {
    color: #4895ef;
}

code .comment {
    color: #6c757d;
    font-style: italic;
}

.highlighted-line {
    background: rgba(247, 37, 133, 0.15);
}

/* Tooltips */
.tooltip-bubble {
    position: absolute;
    background: #2b2d42;
    color: #f1f3f5;
    font-size: 0.75rem;
    padding: 0.25rem 0.5rem;
    border-radius: 0.25rem;
    pointer-events: none;
    z-index: 10;
}

/* Form loading indicator */
.spinner {
    display: inline-block;
    width: 0.9em;
    height: 0.9em;
    border: 2px solid rgba(255, 255, 255, 0.35);
    border-top-color: #fff;
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
    vertical-align: text-bottom;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}

/* Footer */
footer {
    margin-top: 3rem;
    padding-top: 1rem;
    border-top: 1px solid #2b2d42;
    text-align: center;
    color: #9aa0b5;
    font-size: 0.875rem;
}
"#
}

/// Inline JavaScript: the page bootstrap. `initialize` runs once when the
/// page becomes interactive: tooltip wiring for opted-in elements and the
/// analysis form loading state. Each concern is independent; a missing
/// element is a no-op.
fn inline_javascript() -> &'static str {
    r#"
(function() {
    function activateTooltips() {
        document.querySelectorAll('[data-tooltip]').forEach(function(el) {
            el.addEventListener('mouseenter', function() {
                var tip = document.createElement('div');
                tip.className = 'tooltip-bubble';
                tip.textContent = el.getAttribute('data-tooltip');
                document.body.appendChild(tip);
                var rect = el.getBoundingClientRect();
                tip.style.left = (rect.left + window.scrollX) + 'px';
                tip.style.top = (rect.bottom + window.scrollY + 4) + 'px';
                el._tip = tip;
            });
            el.addEventListener('mouseleave', function() {
                if (el._tip) { el._tip.remove(); el._tip = null; }
            });
        });
    }

    function lockFormOnSubmit() {
        var form = document.getElementById('analysis-form');
        if (!form) return;
        form.addEventListener('submit', function() {
            var button = form.querySelector('button[type="submit"]');
            if (button) {
                button.disabled = true;
                button.innerHTML = '<span class="spinner" role="status" aria-hidden="true"></span> Analyzing...';
            }
        });
    }

    function initialize() {
        activateTooltips();
        lockFormOnSubmit();
    }

    document.addEventListener('DOMContentLoaded', initialize);
})();
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
