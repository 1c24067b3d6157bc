//! docdiff CLI - document change detection tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};

use docdiff::render::{describe, to_json, to_text};
use docdiff::{
    compare_files_with, Category, ChangeDetector, ChangeReport, ChangeType, ComparisonResult,
    DetectOptions, JsonFormat, Segmentation, Severity,
};

#[derive(Parser)]
#[command(name = "docdiff")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Detect changes between two versions of a document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two documents and write the change report
    #[command(alias = "diff")]
    Compare {
        /// Original document
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// Revised document
        #[arg(value_name = "REVISED")]
        revised: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output a plain text listing instead of JSON
        #[arg(long, conflicts_with = "compact")]
        text: bool,

        #[command(flatten)]
        detect: DetectArgs,
    },

    /// Show per-category change counts
    Summary {
        /// Original document
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// Revised document
        #[arg(value_name = "REVISED")]
        revised: PathBuf,

        /// List every change, not just the counts
        #[arg(short, long)]
        verbose: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        detect: DetectArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct DetectArgs {
    /// Ignore letter case in text comparison
    #[arg(long, env = "DOCDIFF_IGNORE_CASE")]
    ignore_case: bool,

    /// Ignore whitespace differences in text comparison
    #[arg(long, env = "DOCDIFF_IGNORE_WHITESPACE")]
    ignore_whitespace: bool,

    /// Align page text by lines instead of sentences
    #[arg(long)]
    lines: bool,

    /// Image similarity below which images are reported as changed
    #[arg(long, value_name = "0..1", default_value_t = docdiff::detector::DEFAULT_IMAGE_THRESHOLD)]
    image_threshold: f64,
}

impl DetectArgs {
    fn options(&self) -> DetectOptions {
        let segmentation = if self.lines {
            Segmentation::Lines
        } else {
            Segmentation::Sentences
        };
        DetectOptions::new()
            .with_ignore_case(self.ignore_case)
            .with_ignore_whitespace(self.ignore_whitespace)
            .with_segmentation(segmentation)
            .with_image_threshold(self.image_threshold)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            original,
            revised,
            output,
            compact,
            text,
            detect,
        } => cmd_compare(
            &original,
            &revised,
            output.as_deref(),
            compact,
            text,
            &detect,
        ),
        Commands::Summary {
            original,
            revised,
            verbose,
            json,
            detect,
        } => cmd_summary(&original, &revised, verbose, json, &detect),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(
    original: &Path,
    revised: &Path,
    detect: &DetectArgs,
) -> Result<ComparisonResult, Box<dyn std::error::Error>> {
    let detector = ChangeDetector::with_options(detect.options());
    log::info!(
        "comparing {} against {}",
        original.display(),
        revised.display()
    );
    Ok(compare_files_with(&detector, original, revised)?)
}

fn cmd_compare(
    original: &Path,
    revised: &Path,
    output: Option<&Path>,
    compact: bool,
    text: bool,
    detect: &DetectArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(original, revised, detect)?;

    let content = if text {
        to_text(&result.report)
    } else {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        to_json(&result, format)?
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    eprintln!();
    print_counts(&result.report);

    Ok(())
}

fn cmd_summary(
    original: &Path,
    revised: &Path,
    verbose: bool,
    json: bool,
    detect: &DetectArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(original, revised, detect)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.report.summary)?);
        return Ok(());
    }

    println!("{}", "Comparison".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Original".bold(), result.metadata.original_file);
    println!("{}: {}", "Revised".bold(), result.metadata.revised_file);
    println!("{}: {}", "Type".bold(), result.metadata.document_type);
    println!();

    print_counts(&result.report);

    if verbose {
        for category in Category::ALL {
            let records = result.report.records(category);
            if records.is_empty() {
                continue;
            }
            println!();
            println!("{}", category.label().cyan().bold());
            for record in records {
                println!(
                    "  {} {}",
                    change_marker(record.change_type()),
                    describe(record)
                );
            }
        }
    }

    Ok(())
}

fn print_counts(report: &ChangeReport) {
    let summary = &report.summary;
    eprintln!("{}", "Changes".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    for category in Category::ALL {
        let count = summary.count(category);
        let value = if count == 0 {
            count.to_string().dimmed()
        } else {
            count.to_string().normal()
        };
        eprintln!("  {:<12} {}", category.label(), value);
    }
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!(
        "  {:<12} {} ({})",
        "Total".bold(),
        summary.total_changes.to_string().bold(),
        severity_label(summary.severity)
    );

    if !report.diagnostics.is_empty() {
        eprintln!();
        for diagnostic in &report.diagnostics {
            eprintln!(
                "{} {}: {}",
                "Warning".yellow(),
                diagnostic.element,
                diagnostic.reason
            );
        }
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::Low => label.green(),
        Severity::Medium => label.yellow(),
        Severity::High => label.red().bold(),
    }
}

fn change_marker(change_type: ChangeType) -> ColoredString {
    match change_type {
        ChangeType::Added => "+".green().bold(),
        ChangeType::Deleted => "-".red().bold(),
        ChangeType::Modified => "~".yellow().bold(),
    }
}

fn cmd_version() {
    println!("{} {}", "docdiff".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document change detection tool");
    println!();
    println!("License: MIT");
}
