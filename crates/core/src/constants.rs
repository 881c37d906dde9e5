//! Constants used throughout the report core crate.
//!
//! File names the detection pipeline writes next to `result.json`, and the defaults used when a
//! setting is not configured.

/// Findings document produced by the detection pipeline.
pub const DEFAULT_FINDINGS_FILENAME: &str = "result.json";

/// Output file written next to the findings when no output path is configured.
pub const DEFAULT_REPORT_FILENAME: &str = "report.html";

/// Overview photograph written by the pipeline alongside the crops.
pub const DEFAULT_OVERVIEW_FILENAME: &str = "原始照片_overview.png";
