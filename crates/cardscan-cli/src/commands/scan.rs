//! Scan command - extract contact data from a single business card image.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardscan_core::models::config::CardscanConfig;
use cardscan_core::error::OcrError;
use cardscan_core::{
    ContactExtractor, HeuristicContactExtractor, LocalUploadStore, PureOcrEngine, ScanResponse,
    TokenSource, UploadStore,
};

use super::config::load_config;
use super::output::{emit, format_response, OutputFormat};

/// Image extensions accepted for scanning.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "webp"];

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Card image file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Store the image in the upload directory and report its URL
    #[arg(long)]
    store: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    ensure_image(&args.input)?;

    info!("Scanning card: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading OCR models...");
    pb.set_position(10);
    let engine = load_engine(args.model_dir.as_deref(), &config)?;

    let store = args
        .store
        .then(|| LocalUploadStore::from_config(&config.storage));
    let extractor = HeuristicContactExtractor::new();

    pb.set_message("Scanning card...");
    pb.set_position(30);
    let response = scan_image(
        &args.input,
        &engine,
        store.as_ref().map(|s| s as &dyn UploadStore),
        &extractor,
    )?;

    pb.finish_and_clear();

    if let Some(url) = &response.file_url {
        eprintln!("{} Uploaded to {}", style("✓").green(), url);
    }

    let output = format_response(&response, args.format, args.pretty)?;
    emit(&output, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// True when `path` has a supported image extension.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Fail unless `path` has a supported image extension.
pub fn ensure_image(path: &Path) -> anyhow::Result<()> {
    if !is_image(path) {
        anyhow::bail!(
            "Unsupported file format: {}",
            path.extension().and_then(|e| e.to_str()).unwrap_or("")
        );
    }
    Ok(())
}

/// Load the OCR engine from `model_dir`, or the configured model directory.
pub fn load_engine(
    model_dir: Option<&Path>,
    config: &CardscanConfig,
) -> anyhow::Result<PureOcrEngine> {
    let model_dir = model_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.models.model_dir.clone());

    debug!("Using models from {}", model_dir.display());
    PureOcrEngine::from_dir(&model_dir, &config.models, config.ocr.clone()).map_err(|e| match e {
        OcrError::ModelsMissing { .. } => anyhow::anyhow!(
            "{}\n\nPlace PaddleOCR ONNX models there or pass --model-dir.",
            e
        ),
        _ => anyhow::anyhow!("Failed to load OCR models: {}", e),
    })
}

/// Store (optionally), recognize, and extract one card image.
pub fn scan_image(
    path: &Path,
    engine: &dyn TokenSource,
    store: Option<&dyn UploadStore>,
    extractor: &dyn ContactExtractor,
) -> anyhow::Result<ScanResponse> {
    let bytes = fs::read(path)?;

    let file_url = match store {
        Some(store) => {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;
            Some(store.put(file_name, &bytes)?.url)
        }
        None => None,
    };

    let image = image::load_from_memory(&bytes)?;

    let ocr_result = engine
        .recognize(&image)
        .map_err(|e| anyhow::anyhow!("OCR failed: {}", e))?;

    debug!(
        "OCR recognized {} tokens in {}ms",
        ocr_result.tokens.len(),
        ocr_result.processing_time_ms
    );

    if ocr_result.is_blank() {
        anyhow::bail!("No text detected in image");
    }

    let extraction = extractor.extract_from_ocr(&ocr_result);

    Ok(ScanResponse::success(extraction, file_url))
}
