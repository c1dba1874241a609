//! Chart configuration builders
//!
//! Each builder maps one precomputed chart input onto the charting
//! library's `{type, data, options}` constructor object. Builders are pure
//! string/value construction: they do not sort, validate, or touch the
//! page. Binding a configuration to a drawing surface happens in
//! [`init_script`]; instantiating the same surface twice is delegated to
//! the charting library and is undefined here.

use crate::report::{
    BugDensityChartData, LanguageChartData, SeverityChartData, TopFilesChartData,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// A drawing target in the results page, identified by a stable element id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface(&'static str);

impl Surface {
    pub const fn new(id: &'static str) -> Surface {
        Surface(id)
    }

    pub fn id(&self) -> &'static str {
        self.0
    }
}

pub const SEVERITY_SURFACE: Surface = Surface::new("severity-chart");
pub const TOP_FILES_SURFACE: Surface = Surface::new("top-files-chart");
pub const LANGUAGE_SURFACE: Surface = Surface::new("language-chart");
pub const BUG_DENSITY_SURFACE: Surface = Surface::new("bug-density-chart");

/// Fixed bubble palette, assigned cyclically by label index
pub const BUBBLE_PALETTE: [&str; 10] = [
    "#f72585", "#b5179e", "#7209b7", "#560bad", "#480ca8", "#3a0ca3", "#3f37c9", "#4361ee",
    "#4895ef", "#4cc9f0",
];

const FILES_BAR_COLOR: &str = "#4cc9f0";
const FILES_BAR_BORDER: &str = "#3a86ff";
const BUGS_BAR_COLOR: &str = "#f72585";
const BUGS_BAR_BORDER: &str = "#b5179e";
const TOP_FILES_BAR_COLOR: &str = "#3a86ff";
const TOP_FILES_BAR_BORDER: &str = "#1e56a0";

/// Tooltip label callback for the severity pie: `label: value (pct%)`,
/// where pct is round(100 * value / total) computed per slice. A zero
/// total divides to infinity (NaN for 0/0) and displays as-is; no
/// validation happens here.
const SEVERITY_TOOLTIP: &str = "function(context) { \
const label = context.label || ''; \
const value = context.raw || 0; \
const total = context.dataset.data.reduce((a, b) => a + b, 0); \
const percentage = Math.round((value / total) * 100); \
return label + ': ' + value + ' (' + percentage + '%)'; }";

/// Tooltip label callback for density bubbles: reports files, bugs, and
/// the density recovered from the radius (r / 10, two decimals)
const DENSITY_TOOLTIP: &str = "function(context) { \
const label = context.dataset.label || ''; \
const x = context.raw.x; \
const y = context.raw.y; \
const r = context.raw.r / 10; \
return [label + ':', 'Files: ' + x, 'Bugs: ' + y, 'Density: ' + r.toFixed(2) + ' bugs/file']; }";

/// A fully built chart configuration, ready to hand to the charting
/// library constructor
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Value,
    pub options: Value,
    /// Tooltip label callback spliced into the options at init time;
    /// function values cannot ride along in the serialized object
    #[serde(skip)]
    pub tooltip_label: Option<&'static str>,
}

impl ChartConfig {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl fmt::Display for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Percentage shown for one pie slice: `round(100 * value / total)`.
/// Slices round independently, so the displayed percentages need not sum
/// to exactly 100. A zero total yields infinity (NaN only for 0/0),
/// matching the tooltip math.
pub fn slice_percent(value: u64, total: u64) -> f64 {
    (100.0 * value as f64 / total as f64).round()
}

/// Bubble radius for a density value: linear scale with a floor and a
/// ceiling so very low and very high densities stay visually distinct
pub fn bubble_radius(density: f64) -> f64 {
    (density * 10.0).clamp(5.0, 20.0)
}

/// Axis options shared by the cartesian charts
fn axis(begin_at_zero: bool) -> Value {
    let mut axis = json!({
        "ticks": { "color": "#fff" },
        "grid": { "color": "rgba(255, 255, 255, 0.1)" },
    });
    if begin_at_zero {
        axis["beginAtZero"] = json!(true);
    }
    axis
}

fn title(text: &str) -> Value {
    json!({ "display": true, "text": text, "color": "#fff" })
}

/// Build the severity distribution pie chart
pub fn severity_chart(data: &SeverityChartData) -> ChartConfig {
    ChartConfig {
        kind: "pie",
        data: json!({
            "labels": &data.labels,
            "datasets": [{
                "data": &data.values,
                "backgroundColor": data.slice_colors(),
                "borderWidth": 1,
            }],
        }),
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "right",
                    "labels": { "color": "#fff" },
                },
                "title": title("Bug Severity Distribution"),
            },
        }),
        tooltip_label: Some(SEVERITY_TOOLTIP),
    }
}

/// Build the horizontal ranked bar chart of most affected files.
/// Values are rendered in the order supplied; the caller sorts.
pub fn top_files_chart(data: &TopFilesChartData) -> ChartConfig {
    ChartConfig {
        kind: "bar",
        data: json!({
            "labels": &data.labels,
            "datasets": [{
                "label": "Number of Bugs",
                "data": &data.values,
                "backgroundColor": TOP_FILES_BAR_COLOR,
                "borderColor": TOP_FILES_BAR_BORDER,
                "borderWidth": 1,
            }],
        }),
        options: json!({
            "indexAxis": "y",
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "title": title("Top Affected Files"),
            },
            "scales": {
                "x": axis(true),
                "y": axis(false),
            },
        }),
        tooltip_label: None,
    }
}

/// Build the two-series grouped bar chart of per-language file and bug
/// counts, paired positionally per language
pub fn language_chart(data: &LanguageChartData) -> ChartConfig {
    ChartConfig {
        kind: "bar",
        data: json!({
            "labels": &data.labels,
            "datasets": [
                {
                    "label": "Number of Files",
                    "data": &data.file_counts,
                    "backgroundColor": FILES_BAR_COLOR,
                    "borderColor": FILES_BAR_BORDER,
                    "borderWidth": 1,
                },
                {
                    "label": "Number of Bugs",
                    "data": &data.bug_counts,
                    "backgroundColor": BUGS_BAR_COLOR,
                    "borderColor": BUGS_BAR_BORDER,
                    "borderWidth": 1,
                },
            ],
        }),
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": title("Language Distribution"),
                "legend": { "labels": { "color": "#fff" } },
            },
            "scales": {
                "x": axis(false),
                "y": axis(true),
            },
        }),
        tooltip_label: None,
    }
}

/// Build the bug density bubble chart: one single-point dataset per
/// language, x = file count, y = bug count, radius from the density
pub fn bug_density_chart(data: &BugDensityChartData) -> ChartConfig {
    let datasets: Vec<Value> = data
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            json!({
                "label": label,
                "backgroundColor": BUBBLE_PALETTE[i % BUBBLE_PALETTE.len()],
                "borderColor": "#ffffff",
                "data": [{
                    "x": data.file_counts.get(i).copied().unwrap_or(0),
                    "y": data.bug_counts.get(i).copied().unwrap_or(0),
                    "r": bubble_radius(data.bug_densities.get(i).copied().unwrap_or(0.0)),
                }],
            })
        })
        .collect();

    ChartConfig {
        kind: "bubble",
        data: json!({ "datasets": datasets }),
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "title": title("Bug Density by Language"),
            },
            "scales": {
                "x": axis_with_title("Number of Files"),
                "y": axis_with_title("Number of Bugs"),
            },
        }),
        tooltip_label: Some(DENSITY_TOOLTIP),
    }
}

fn axis_with_title(text: &str) -> Value {
    let mut axis = axis(false);
    axis["title"] = title(text);
    axis
}

/// Render the statement that instantiates a chart on its drawing surface.
/// The surface is looked up once; a missing element is a silent no-op.
pub fn init_script(surface: Surface, config: &ChartConfig) -> String {
    let mut script = String::new();
    script.push_str("(function() {\n");
    script.push_str(&format!(
        "    const el = document.getElementById('{}');\n    if (!el) return;\n",
        surface.id()
    ));
    // A literal "<" in a label must not be able to close the surrounding
    // script block; "<" is the same character to the JSON parser.
    let json = config.to_json().replace('<', "\\u003c");
    script.push_str(&format!("    const cfg = {};\n", json));
    if let Some(callback) = config.tooltip_label {
        script.push_str(&format!(
            "    cfg.options.plugins.tooltip = {{ callbacks: {{ label: {} }} }};\n",
            callback
        ));
    }
    script.push_str("    new Chart(el.getContext('2d'), cfg);\n})();");
    script
}
