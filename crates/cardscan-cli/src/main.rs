//! CLI application for business card scanning.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, mail, scan};

/// Business card scanner - Extract contact details from card images
#[derive(Parser)]
#[command(name = "cardscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a single card image
    Scan(scan::ScanArgs),

    /// Scan multiple card images
    Batch(batch::BatchArgs),

    /// Extract contact fields from a token JSON file
    Extract(extract::ExtractArgs),

    /// Print a follow-up email for a contact
    Compose(mail::MessageArgs),

    /// Send a follow-up email to a contact
    Send(mail::MessageArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Scan(args) => scan::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args).await,
        Commands::Compose(args) => mail::compose(args, config_path).await,
        Commands::Send(args) => mail::send(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
