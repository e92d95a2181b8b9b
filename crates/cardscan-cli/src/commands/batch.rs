//! Batch command - scan multiple card images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use cardscan_core::{HeuristicContactExtractor, LocalUploadStore, ScanResponse, UploadStore};

use super::config::load_config;
use super::output::{format_response, OutputFormat};
use super::scan::{is_image, load_engine, scan_image};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching card images
    #[arg(required = true)]
    input: String,

    /// Output directory for per-card results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each card
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a contacts CSV with one row per card
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Store each image in the upload directory
    #[arg(long)]
    store: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of scanning a single card.
struct CardResult {
    path: PathBuf,
    response: Option<ScanResponse>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_pattern(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} cards to scan",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let engine = load_engine(args.model_dir.as_deref(), &config)?;
    let store = args
        .store
        .then(|| LocalUploadStore::from_config(&config.storage));
    let extractor = HeuristicContactExtractor::new();

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cards")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let card_start = Instant::now();
        let result = scan_image(
            &path,
            &engine,
            store.as_ref().map(|s| s as &dyn UploadStore),
            &extractor,
        );
        let processing_time_ms = card_start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => results.push(CardResult {
                path,
                response: Some(response),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    results.push(CardResult {
                        path,
                        response: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    anyhow::bail!("Scanning failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(response) = &result.response {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("card");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_response(response, args.format, true)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("contacts.csv"))
            .unwrap_or_else(|| PathBuf::from("contacts.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();

    eprintln!();
    eprintln!(
        "{} Scanned {} cards in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    if failed > 0 {
        eprintln!("{} {} cards failed", style("✗").red(), failed);
        for result in results.iter().filter(|r| r.error.is_some()) {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}

/// Expand a glob pattern to the image files it matches.
fn expand_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image(p))
        .collect();
    Ok(files)
}

fn write_summary(path: &Path, results: &[CardResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "name",
        "email",
        "phone",
        "company",
        "file_url",
        "status",
        "error",
        "processing_time_ms",
    ])?;

    for result in results {
        let file = result.path.display().to_string();
        let time = result.processing_time_ms.to_string();

        match &result.response {
            Some(response) => {
                let record = &response.extracted_data;
                wtr.write_record([
                    file.as_str(),
                    record.name.as_str(),
                    record.email.as_str(),
                    record.phone.as_str(),
                    record.company.as_str(),
                    response.file_url.as_deref().unwrap_or(""),
                    "success",
                    "",
                    time.as_str(),
                ])?;
            }
            None => {
                wtr.write_record([
                    file.as_str(),
                    "",
                    "",
                    "",
                    "",
                    "",
                    "error",
                    result.error.as_deref().unwrap_or(""),
                    time.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
