use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use findings::ParseMode;
use oral_core::{CoreConfig, ReportService};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "oral-report")]
#[command(about = "Oral health HTML report generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Input settings shared by every command.
#[derive(Args)]
struct InputArgs {
    /// Directory holding result.json and the pipeline's images
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Findings file (defaults to <data-dir>/result.json)
    #[arg(long)]
    findings: Option<PathBuf>,
    /// Reject findings with missing or out-of-range tooth ids and missing labels
    #[arg(long)]
    strict: bool,
}

impl InputArgs {
    fn config(&self) -> Result<CoreConfig, Box<dyn std::error::Error>> {
        let mode = if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        let mut cfg = CoreConfig::new(self.data_dir.clone(), mode)?;
        if let Some(findings) = &self.findings {
            cfg = cfg.with_findings_path(findings.clone());
        }
        Ok(cfg)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full HTML report
    Generate {
        #[command(flatten)]
        input: InputArgs,
        /// Output file (defaults to <data-dir>/report.html)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Cover page logo
        #[arg(long)]
        cover_logo: Option<PathBuf>,
        /// Report page header logo
        #[arg(long)]
        header_logo: Option<PathBuf>,
        /// Overview photograph (defaults to <data-dir>/原始照片_overview.png)
        #[arg(long, conflicts_with = "no_overview")]
        overview: Option<PathBuf>,
        /// Leave the overview photograph out
        #[arg(long)]
        no_overview: bool,
        /// Report date printed in the footer (YYYY-MM-DD)
        #[arg(long, conflicts_with = "today")]
        date: Option<NaiveDate>,
        /// Print today's date in the footer
        #[arg(long)]
        today: bool,
    },
    /// Print the SVG tooth chart
    Chart {
        #[command(flatten)]
        input: InputArgs,
        /// Write the SVG to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print report statistics
    Summary {
        #[command(flatten)]
        input: InputArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oral_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            input,
            output,
            cover_logo,
            header_logo,
            overview,
            no_overview,
            date,
            today,
        }) => {
            let mut cfg = input
                .config()?
                .with_cover_logo(cover_logo)
                .with_header_logo(header_logo);
            if let Some(output) = output {
                cfg = cfg.with_output_path(output);
            }
            if no_overview {
                cfg = cfg.with_overview_image(None);
            } else if overview.is_some() {
                cfg = cfg.with_overview_image(overview);
            }

            let generated_on = if today {
                Some(chrono::Local::now().date_naive())
            } else {
                date
            };

            let report = ReportService::new(cfg).generate(generated_on)?;
            println!(
                "Wrote report to {} ({} problem teeth, {} lesions)",
                report.output_path.display(),
                report.summary.problem_teeth,
                report.summary.lesions
            );
        }
        Some(Commands::Chart { input, output }) => {
            let svg = ReportService::new(input.config()?).render_chart()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, svg)?;
                    println!("Wrote chart to {}", path.display());
                }
                None => println!("{}", svg),
            }
        }
        Some(Commands::Summary { input, json }) => {
            let summary = ReportService::new(input.config()?).summary()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Problem teeth: {}", summary.problem_teeth);
                println!("Lesions: {}", summary.lesions);
                for entry in &summary.distribution {
                    println!(
                        "  {}: {} (mean confidence {:.2})",
                        entry.kind, entry.count, entry.mean_confidence
                    );
                }
            }
        }
        None => {
            println!("Use 'oral-report --help' for commands");
        }
    }

    Ok(())
}
