//! CodeBug core library - results page rendering for precomputed bug analysis statistics

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Rendering is pure string building over caller-supplied data
// - Statistics are consumed as supplied; nothing here aggregates or sorts
// - Parallel sequence lengths are the caller's responsibility
// - No randomness, clocks, threads, or async
// - Identical input yields byte-for-byte identical output

pub mod charts;
pub mod highlight;
pub mod html;
pub mod report;

pub use charts::{
    bug_density_chart, init_script, language_chart, severity_chart, top_files_chart, ChartConfig,
    Surface,
};
pub use highlight::highlight_snippet;
pub use html::render_html_report;
pub use report::{render_json, render_text, ScanReport};
