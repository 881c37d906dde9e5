use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oral_core::{CoreConfig, ReportService};
use findings::ParseMode;

/// One-shot report generation driven by the environment
///
/// Loads `.env` if present, builds the report for the configured data directory and exits.
///
/// # Environment Variables
/// - `REPORT_DATA_DIR`: Directory holding `result.json` and the pipeline images (default: ".")
/// - `REPORT_OUTPUT`: Output HTML file (default: `<REPORT_DATA_DIR>/report.html`)
/// - `REPORT_COVER_LOGO`: Cover page logo (optional)
/// - `REPORT_HEADER_LOGO`: Report page header logo (optional)
/// - `REPORT_OVERVIEW`: Overview photograph (default: `<REPORT_DATA_DIR>/原始照片_overview.png`)
/// - `REPORT_STRICT`: `1` or `true` to reject malformed findings instead of skipping them
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oral_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = PathBuf::from(std::env::var("REPORT_DATA_DIR").unwrap_or_else(|_| ".".into()));
    let mode = if env_flag("REPORT_STRICT") {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let mut cfg = CoreConfig::new(data_dir, mode)?
        .with_cover_logo(env_path("REPORT_COVER_LOGO"))
        .with_header_logo(env_path("REPORT_HEADER_LOGO"));
    if let Some(output) = env_path("REPORT_OUTPUT") {
        cfg = cfg.with_output_path(output);
    }
    if let Some(overview) = env_path("REPORT_OVERVIEW") {
        cfg = cfg.with_overview_image(Some(overview));
    }

    let today = chrono::Local::now().date_naive();
    let report = ReportService::new(cfg).generate(Some(today))?;

    tracing::info!(
        "done: {} ({} problem teeth, {} lesions)",
        report.output_path.display(),
        report.summary.problem_teeth,
        report.summary.lesions
    );
    Ok(())
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
