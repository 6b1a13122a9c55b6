use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pbix_lineage::core::{CorpusAnalyzer, ExtractionConfig};
use pbix_lineage::formatters::ExportFormat;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pbix-lineage",
    version,
    author = "pbix-lineage developers",
    about = "Extract data-source lineage from Power Query expressions in .pbix files"
)]
struct Cli {
    /// Folder to scan recursively for report files
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Export format
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,

    /// Directory for the export file (defaults to the input folder)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Container file extension to look for
    #[arg(short, long, value_name = "EXT", default_value = "pbix")]
    extension: String,

    /// Separator between file names in the summary sheet
    #[arg(short, long, value_name = "SEP", default_value = "; ")]
    delimiter: String,

    /// Process report files in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Xlsx,
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => ExportFormat::Xlsx,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        format,
        output_dir,
        extension,
        delimiter,
        parallel,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let config = ExtractionConfig::default()
        .with_extension(&extension)
        .with_summary_delimiter(&delimiter)
        .with_parallel(parallel)
        .with_format(format.into())
        .with_output_dir(output_dir);

    let analyzer = CorpusAnalyzer::new(config);
    let report = analyzer.analyze(&input)?;
    let output = analyzer.export(&report, &input)?;

    println!(
        "Done! {} detail rows, {} unique objects",
        report.detailed.len(),
        report.summary.len()
    );
    println!("Report created at: {}", output.display());
    println!("Total execution time: {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}
