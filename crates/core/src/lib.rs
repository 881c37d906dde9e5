//! # Oral Report Core
//!
//! Core logic for turning a detection pipeline's `result.json` into a single self-contained
//! HTML oral-health report.
//!
//! - [`chart`]: the deterministic 32-tooth SVG chart
//! - [`summary`], [`causes`]: narrative sections derived from the findings
//! - [`document`]: full page assembly with inline images
//! - [`ReportService`]: reads inputs from disk and writes the finished report
//!
//! Rendering functions are pure. Only [`ReportService`] touches the filesystem.

pub mod catalogue;
pub mod causes;
pub mod chart;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod html;
pub mod summary;

pub use chart::{ProblemSet, ToothChart};
pub use config::CoreConfig;
pub use document::{ReportAssets, ReportContext, ReportDocument};
pub use error::{ReportError, ReportResult};
pub use summary::ReportSummary;

use chrono::NaiveDate;
use findings::{Findings, FindingsData};
use oral_files::AssetService;
use std::fs;
use std::path::PathBuf;

/// Outcome of a successful [`ReportService::generate`] call.
#[derive(Debug)]
pub struct GeneratedReport {
    pub output_path: PathBuf,
    pub summary: ReportSummary,
}

/// Report generation bound to one [`CoreConfig`].
#[derive(Clone, Debug)]
pub struct ReportService {
    cfg: CoreConfig,
}

impl ReportService {
    pub fn new(cfg: CoreConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Reads and parses the configured findings file.
    pub fn load_findings(&self) -> ReportResult<FindingsData> {
        let json_text =
            fs::read_to_string(self.cfg.findings_path()).map_err(ReportError::FileRead)?;
        let data = Findings::parse(&json_text, self.cfg.parse_mode())?;
        tracing::debug!(
            "loaded {} entries from {}",
            data.teeth.len(),
            self.cfg.findings_path().display()
        );
        Ok(data)
    }

    /// SVG tooth chart for the configured findings.
    pub fn render_chart(&self) -> ReportResult<String> {
        Ok(ToothChart::render(&self.load_findings()?))
    }

    pub fn summary(&self) -> ReportResult<ReportSummary> {
        Ok(ReportSummary::from_findings(&self.load_findings()?))
    }

    /// Builds the full report and writes it to the configured output path.
    ///
    /// Images that cannot be loaded are left out of the page with a warning. The findings file
    /// and the output file are the only hard failures.
    pub fn generate(&self, generated_on: Option<NaiveDate>) -> ReportResult<GeneratedReport> {
        let findings = self.load_findings()?;
        let assets = self.load_assets(&findings)?;

        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on,
        });

        let output_path = self.cfg.output_path().to_path_buf();
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ReportError::FileWrite)?;
        }
        fs::write(&output_path, html).map_err(ReportError::FileWrite)?;

        let summary = ReportSummary::from_findings(&findings);
        tracing::info!(
            "report written to {} ({} problem teeth, {} lesions)",
            output_path.display(),
            summary.problem_teeth,
            summary.lesions
        );

        Ok(GeneratedReport {
            output_path,
            summary,
        })
    }

    fn load_assets(&self, findings: &FindingsData) -> ReportResult<ReportAssets> {
        let service = AssetService::new(self.cfg.assets_dir())?;

        let mut assets = ReportAssets {
            cover_logo: self.cfg.cover_logo().and_then(|p| service.try_load(p)),
            header_logo: self.cfg.header_logo().and_then(|p| service.try_load(p)),
            overview: self.cfg.overview_image().and_then(|p| service.try_load(p)),
            ..Default::default()
        };

        for (index, tooth) in findings.teeth.iter().enumerate() {
            let Some(crop_path) = &tooth.square_crop_path else {
                continue;
            };
            if let Some(crop) = service.try_load_crop(crop_path.as_str()) {
                assets.crops.insert(index, crop);
            }
        }

        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findings::ParseMode;
    use std::path::Path;
    use tempfile::TempDir;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn write_findings(dir: &Path, json: &str) {
        fs::write(dir.join("result.json"), json).expect("Failed to write result.json");
    }

    fn service_for(dir: &Path, mode: ParseMode) -> ReportService {
        ReportService::new(CoreConfig::new(dir.to_path_buf(), mode).unwrap())
    }

    #[test]
    fn generate_writes_report_with_images() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_findings(
            temp_dir.path(),
            r#"{"diseased_teeth": [
                {"tooth_fdi": "8", "diseases": [{"label": "general_caries", "confidence": 0.9}],
                 "square_crop_path": "/elsewhere/crops/tooth_8.png"},
                {"tooth_fdi": "30", "diseases": [{"label": "tooth abrasion", "confidence": 0.5}],
                 "square_crop_path": "/elsewhere/crops/tooth_30.png"}
            ]}"#,
        );
        fs::write(temp_dir.path().join("tooth_8.png"), PNG_HEADER).unwrap();
        fs::write(temp_dir.path().join(constants::DEFAULT_OVERVIEW_FILENAME), PNG_HEADER).unwrap();
        fs::write(temp_dir.path().join("logo.png"), PNG_HEADER).unwrap();

        let cfg = CoreConfig::new(temp_dir.path().to_path_buf(), ParseMode::Lenient)
            .unwrap()
            .with_cover_logo(Some(temp_dir.path().join("logo.png")));
        let report = ReportService::new(cfg)
            .generate(NaiveDate::from_ymd_opt(2026, 10, 19))
            .unwrap();

        assert_eq!(
            report.output_path,
            temp_dir.path().canonicalize().unwrap().join("report.html")
        );
        assert_eq!(report.summary.problem_teeth, 2);
        assert_eq!(report.summary.lesions, 2);

        let html = fs::read_to_string(&report.output_path).unwrap();
        assert!(html.contains("<img class=\"logo-large\""));
        assert!(html.contains("alt=\"整体视图\""));
        // tooth_30.png is missing, so only one gallery cell
        assert_eq!(html.matches("class=\"cell\"").count(), 1);
        assert!(html.contains("<strong>8号牙</strong>"));
        assert_eq!(html.matches("class=\"tooth-problem\"").count(), 2);
        assert!(html.contains("报告日期：2026-10-19"));
    }

    #[test]
    fn relative_data_dir_finds_default_images() {
        let data_dir = TempDir::new_in(".").expect("Failed to create temp dir");
        let logos = TempDir::new_in(".").expect("Failed to create temp dir");
        write_findings(
            data_dir.path(),
            r#"{"diseased_teeth": [{"tooth_fdi": "8", "diseases": [{"label": "general_caries"}],
                "square_crop_path": "/elsewhere/tooth_8.png"}]}"#,
        );
        fs::write(data_dir.path().join(constants::DEFAULT_OVERVIEW_FILENAME), PNG_HEADER).unwrap();
        fs::write(data_dir.path().join("tooth_8.png"), PNG_HEADER).unwrap();
        fs::write(logos.path().join("header.png"), PNG_HEADER).unwrap();

        let relative_dir = PathBuf::from(data_dir.path().file_name().unwrap());
        let relative_logo = PathBuf::from(logos.path().file_name().unwrap()).join("header.png");
        assert!(relative_dir.is_relative() && relative_logo.is_relative());

        let cfg = CoreConfig::new(relative_dir, ParseMode::Lenient)
            .unwrap()
            .with_header_logo(Some(relative_logo));
        let report = ReportService::new(cfg).generate(None).unwrap();

        assert_eq!(
            report.output_path,
            data_dir.path().canonicalize().unwrap().join("report.html")
        );
        let html = fs::read_to_string(&report.output_path).unwrap();
        assert!(html.contains("alt=\"整体视图\""));
        assert!(html.contains("<img class=\"logo\""));
        assert_eq!(html.matches("class=\"cell\"").count(), 1);
    }

    #[test]
    fn generate_creates_output_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_findings(temp_dir.path(), r#"{"diseased_teeth": []}"#);
        let output = temp_dir.path().join("out").join("nested").join("report.html");

        let cfg = CoreConfig::new(temp_dir.path().to_path_buf(), ParseMode::Lenient)
            .unwrap()
            .with_output_path(output.clone());
        let report = ReportService::new(cfg).generate(None).unwrap();

        assert_eq!(report.output_path, output);
        assert!(output.is_file());
        assert_eq!(report.summary.problem_teeth, 0);
    }

    #[test]
    fn generate_is_deterministic_without_date() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_findings(
            temp_dir.path(),
            r#"{"diseased_teeth": [{"tooth_fdi": "3", "diseases": [{"label": "twisted tooth"}]}]}"#,
        );
        let service = service_for(temp_dir.path(), ParseMode::Lenient);

        let first = service.generate(None).unwrap();
        let first_html = fs::read_to_string(&first.output_path).unwrap();
        let second = service.generate(None).unwrap();
        let second_html = fs::read_to_string(&second.output_path).unwrap();

        assert_eq!(first_html, second_html);
    }

    #[test]
    fn missing_findings_file_is_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = service_for(temp_dir.path(), ParseMode::Lenient)
            .generate(None)
            .unwrap_err();
        assert!(matches!(err, ReportError::FileRead(_)));
        assert!(!temp_dir.path().join("report.html").exists());
    }

    #[test]
    fn malformed_findings_are_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_findings(temp_dir.path(), "{ not json");
        let err = service_for(temp_dir.path(), ParseMode::Lenient)
            .load_findings()
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Findings(findings::FindingsError::InvalidJson(_))
        ));
    }

    #[test]
    fn strict_mode_rejects_out_of_range_ids() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_findings(
            temp_dir.path(),
            r#"{"diseased_teeth": [{"tooth_fdi": "40", "diseases": []}]}"#,
        );

        assert!(service_for(temp_dir.path(), ParseMode::Lenient)
            .load_findings()
            .is_ok());
        let err = service_for(temp_dir.path(), ParseMode::Strict)
            .load_findings()
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Findings(findings::FindingsError::InvalidFinding { index: 0, .. })
        ));
    }

    #[test]
    fn render_chart_and_summary() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_findings(
            temp_dir.path(),
            r#"{"diseased_teeth": [
                {"tooth_fdi": "8", "diseases": [{"label": "general_caries", "confidence": 0.9}]},
                {"tooth_fdi": "8", "diseases": [{"label": "tooth abrasion", "confidence": 0.4}]}
            ]}"#,
        );
        let service = service_for(temp_dir.path(), ParseMode::Lenient);

        let svg = service.render_chart().unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("class=\"tooth-problem\"").count(), 1);

        let summary = service.summary().unwrap();
        assert_eq!(summary.problem_teeth, 1);
        assert_eq!(summary.lesions, 2);
        assert_eq!(summary.distribution.len(), 2);
    }
}
