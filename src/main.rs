//! Print Ad Finder CLI - find a brand's print ad images from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use print_ad_finder::engines::{BingImages, GoogleImages};
use print_ad_finder::{
    AdFinder, Credentials, FinderConfig, FinderPlan, ProviderConfig, MAX_IMAGE_CAP, MIN_IMAGE_CAP,
};

/// Print Ad Finder - search API first, scraped image search as fallback
#[derive(Parser)]
#[command(name = "print-ad-finder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find print ad images for a brand
    Find(FindArgs),

    /// List the image providers
    Providers,
}

#[derive(Parser)]
struct FindArgs {
    /// Brand name, e.g. "Himalaya Herbals Personal Care"
    brand: String,

    /// Google Custom Search API key (optional)
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Google Custom Search Engine id (optional)
    #[arg(long, env = "GOOGLE_CSE_ID")]
    google_cse_id: Option<String>,

    /// ScrapingBee API key for the Bing fallback (optional)
    #[arg(long, env = "SCRAPINGBEE_API_KEY", hide_env_values = true)]
    scrapingbee_api_key: Option<String>,

    /// Maximum number of images to return
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(MIN_IMAGE_CAP as i64..=MAX_IMAGE_CAP as i64))]
    max_images: Option<u16>,

    /// JSON configuration file with endpoints and timeouts
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// One URL per line
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so compact and JSON output stay clean.
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Find(args) => run_find(args).await,
        Commands::Providers => list_providers(),
    }
}

fn list_providers() -> Result<()> {
    let defaults = FinderConfig::default();
    let providers: [(ProviderConfig, &str); 2] = [
        (
            GoogleImages::default_config(defaults.primary_timeout),
            "needs --google-api-key and --google-cse-id",
        ),
        (
            BingImages::default_config(defaults.direct_timeout),
            "fallback, routed through ScrapingBee when --scrapingbee-api-key is set",
        ),
    ];

    println!("Image providers, in the order they are tried:\n");
    for (config, note) in &providers {
        println!("  {:<8} - {}", config.shortcut, config.name);
        println!("             {}", note);
    }
    println!();
    println!("Usage: print-ad-finder find \"Acme Co\" --max-images 20");
    Ok(())
}

async fn run_find(args: FindArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => FinderConfig::from_file(path)?,
        None => FinderConfig::default(),
    };
    if let Some(max_images) = args.max_images {
        config.max_images = usize::from(max_images);
    }
    config.validate()?;

    let brand = args.brand.trim();
    if brand.is_empty() {
        anyhow::bail!("Please enter a brand name");
    }

    let credentials = Credentials::from_raw(
        args.google_api_key.as_deref(),
        args.google_cse_id.as_deref(),
        args.scrapingbee_api_key.as_deref(),
    );
    let finder = AdFinder::from_config(&credentials, &config)?;

    if matches!(args.format, OutputFormat::Text) {
        let route = match finder.plan() {
            FinderPlan::PrimaryThenFallback => "Google first, then Bing",
            FinderPlan::FallbackOnly => "Bing",
        };
        eprintln!("Searching for print ads of \"{}\" ({})...", brand, route);
    }

    let urls = finder.find_ads(brand, config.max_images).await?;

    match args.format {
        OutputFormat::Text => {
            if urls.is_empty() {
                println!("No print-ad images found. Possible reasons:");
                println!("  - Google quota exceeded or invalid credentials (and no ScrapingBee key provided),");
                println!("  - Bing blocked the request, or");
                println!("  - the brand keywords did not match any page URLs.");
                println!("Try increasing --max-images or checking your keys.");
            } else {
                println!("Retrieved {} images:\n", urls.len());
                for (i, url) in urls.iter().enumerate() {
                    println!("{}. {}", i + 1, url);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&urls)?);
        }
        OutputFormat::Compact => {
            for url in &urls {
                println!("{}", url);
            }
        }
    }

    Ok(())
}
