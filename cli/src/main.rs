//! shipsheet CLI - PDF shipping report to Excel converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use shipsheet::{
    extract_file_with_options, to_json, Converter, ExtractOptions, JsonFormat, ProgressEvent,
    SheetKind, Warning,
};

#[derive(Parser)]
#[command(name = "shipsheet")]
#[command(version)]
#[command(about = "Convert PDF shipping reports to Excel workbooks", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a report PDF to an Excel workbook
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (named after the report next to the input if not specified)
        #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Output directory
        #[arg(long, value_name = "DIR", env = "SHIPSHEET_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Fail on the first unreadable page
        #[arg(long)]
        strict: bool,
    },

    /// Dump extracted records as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show report information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            output_dir,
            strict,
        }) => cmd_convert(&input, output.as_deref(), output_dir.as_deref(), strict),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, None, cli.output.as_deref(), false)
            } else {
                println!("{}", "Usage: shipsheet <FILE> [OUTPUT]".yellow());
                println!("       shipsheet --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut converter = Converter::new();
    if !strict {
        // Keep going past pages whose text cannot be read
        converter = converter.lenient();
    }
    if let Some(dir) = output_dir {
        converter = converter.with_output_dir(dir);
    }
    if let Some(path) = output {
        converter = converter.with_output_file(path);
    }
    log::debug!(
        "Output target: {:?}, strict: {}",
        converter.options().output,
        strict
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    println!("{} {}", "Reading PDF:".cyan(), input.display());

    let mut on_event = |event: &ProgressEvent| match event {
        ProgressEvent::DocumentOpened { page_count } => {
            pb.set_length(u64::from(*page_count));
            pb.set_message("Reading pages...");
        }
        ProgressEvent::PageRead { current, .. } => pb.set_position(u64::from(*current)),
        ProgressEvent::ReportDetected { .. } => {
            pb.finish_and_clear();
            println!("{}", event);
        }
        ProgressEvent::ServiceTypesFound { .. } => println!("{}", event),
        ProgressEvent::SectionParsed { records, .. } => {
            if *records > 0 {
                println!("  {} {}", "├─".dimmed(), event);
            }
        }
        ProgressEvent::RecordSkipped { .. } => println!("  {} {}", "!".yellow(), event),
        ProgressEvent::WorkbookWritten { .. } => {}
    };

    let result = converter.convert_with_progress(input, &mut on_event);
    pb.finish_and_clear();
    let report = result?;
    log::info!(
        "Converted {} into {}",
        input.display(),
        report.output_path.display()
    );

    for warning in &report.warnings {
        if *warning == Warning::EmptyInput {
            println!("{} {}", "Warning:".yellow().bold(), warning);
        }
    }

    println!(
        "\n{} {} packages, {} sheets",
        "Done!".green().bold(),
        report.package_count,
        report.sheets.len()
    );
    println!("Output: {}", report.output_path.display());

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = extract_file_with_options(input, ExtractOptions::new().lenient())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&result, format)?;
    log::debug!("Serialized {} bytes of JSON", json.len());

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let version = shipsheet::detect::detect_pdf_path(input)?;
    let result = extract_file_with_options(input, ExtractOptions::new().lenient())?;

    println!("{}", "Report Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), version);
    println!("{}: {}", "Pages".bold(), result.page_count);
    println!("{}: {}", "Title".bold(), result.report.title);
    if let Some(ref range) = result.report.date_range {
        println!("{}: {}", "Date range".bold(), range);
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for kind in SheetKind::ALL {
        println!("{}: {}", kind.title().bold(), result.records(kind).len());
    }
    println!("{}: {}", "Skipped lines".bold(), result.skipped.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "shipsheet".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF shipping report to Excel converter");
    println!();
    println!("License: MIT");
}
