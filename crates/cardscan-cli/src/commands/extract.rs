//! Extract command - run contact extraction on an already-recognized token stream.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use cardscan_core::{ContactExtractor, HeuristicContactExtractor, ScanResponse, Token};

use super::output::{emit, format_response, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// JSON file with an array of tokens ("-" for stdin)
    #[arg(required = true)]
    tokens: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail when the token stream contains no text
    #[arg(long)]
    strict: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let content = if args.tokens == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.tokens)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.tokens, e))?
    };

    let tokens: Vec<Token> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid token JSON: {}", e))?;

    info!("Loaded {} tokens", tokens.len());

    let extractor = HeuristicContactExtractor::new();
    let extraction = if args.strict {
        extractor.extract_strict(&tokens)?
    } else {
        extractor.extract(&tokens)
    };

    let response = ScanResponse::success(extraction, None);
    let output = format_response(&response, args.format, args.pretty)?;
    emit(&output, args.output.as_deref())?;

    Ok(())
}
