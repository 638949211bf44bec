//! `kyc`: command-line entry point for the KYC wizard and its collaborators.

mod session;
mod upload;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use kyc_services::{
    market::{format_grouped, format_usd},
    BankLookupService, BiometricScanner, CoinGeckoClient, DocumentIntake, HttpSubmissionTransport,
    LogOnlyTransport, MarketDataSource, RazorpayIfscClient, ServicesConfig, SimulatedBiometric,
    SystemClock,
};
use kyc_utils::LogFormat;

#[derive(Parser)]
#[command(name = "kyc", about = "KYC verification wizard tools")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "KYC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Base URL of the IFSC lookup API.
    #[arg(long, env = "KYC_IFSC_URL")]
    ifsc_url: Option<String>,

    /// Base URL of the market-data API.
    #[arg(long, env = "KYC_MARKET_URL")]
    market_url: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Wizard sessions.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Validate and look up an IFSC code.
    Ifsc {
        code: String,
    },
    /// Fetch the configured coin's market snapshot.
    Market,
    /// Simulated fingerprint capture.
    Biometric {
        #[command(subcommand)]
        action: BiometricAction,
    },
    /// Document upload screening.
    Upload {
        #[command(subcommand)]
        action: UploadAction,
    },
    /// Configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand)]
enum SessionAction {
    /// Replay a JSON array of signals and print the final state.
    Run { script: PathBuf },
}

#[derive(clap::Subcommand)]
enum BiometricAction {
    /// Run one scan with the configured success probability.
    Scan,
}

#[derive(clap::Subcommand)]
enum UploadAction {
    /// Screen local files as document uploads, in order.
    ///
    /// Files are offered back to back, so the rate limit accepts at most one
    /// per configured interval.
    Check {
        /// `SLOT=PATH`, with SLOT one of aadhar_front, aadhar_back, pan_card.
        #[arg(required = true)]
        files: Vec<upload::SlotFile>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
}

fn effective_config(cli: &Cli) -> anyhow::Result<ServicesConfig> {
    let mut config = match &cli.config {
        Some(path) => ServicesConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServicesConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(url) = &cli.ifsc_url {
        config.ifsc_base_url = url.clone();
    }
    if let Some(url) = &cli.market_url {
        config.market_base_url = url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    kyc_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let timeout = Duration::from_secs(config.http_timeout_secs);

    match cli.command {
        Command::Session { action } => match action {
            SessionAction::Run { script } => {
                let json = std::fs::read_to_string(&script)
                    .with_context(|| format!("reading {}", script.display()))?;
                let signals = session::parse_script(&json)?;
                tracing::info!(signals = signals.len(), "replaying session");

                let report = match &config.submission_url {
                    Some(url) => {
                        let transport = HttpSubmissionTransport::new(url).with_timeout(timeout);
                        session::replay(signals, &transport).await?
                    }
                    None => session::replay(signals, &LogOnlyTransport).await?,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        },
        Command::Ifsc { code } => {
            let client = RazorpayIfscClient::with_url(&config.ifsc_base_url).with_timeout(timeout);
            let details = client.lookup(&code.trim().to_uppercase()).await?;
            println!("Bank: {}", details.bank);
            println!("Branch: {}", details.branch);
            println!("Address: {}", details.address);
        }
        Command::Market => {
            let client = CoinGeckoClient::with_url(&config.market_base_url, &config.market_coin)
                .with_timeout(timeout);
            let snap = client.snapshot().await?;
            println!("Price: ${:.2}", snap.price_usd);
            println!("Price Change (24h): {:.2}%", snap.price_change_pct_24h);
            println!("Market Cap: {}", format_grouped(snap.market_cap_usd));
            println!("Volume: {}", format_grouped(snap.volume_usd));
            println!("Circulating Supply: {}", format_grouped(snap.circulating_supply));
            println!("Market Cap Change (24h): {}", format_usd(snap.market_cap_change_24h));
            if let Some(change) = snap.volume_change_24h {
                println!("Volume Change (24h): {}", format_usd(change));
            }
            println!("Sparkline points: {}", snap.sparkline_7d.len());
        }
        Command::Biometric { action } => match action {
            BiometricAction::Scan => {
                let scanner =
                    SimulatedBiometric::with_thread_entropy(config.biometric_success_probability)?;
                println!("Scanning fingerprint...");
                let outcome = scanner.scan().await;
                println!("{outcome}");
            }
        },
        Command::Upload { action } => match action {
            UploadAction::Check { files } => {
                let mut intake = DocumentIntake::new(
                    SystemClock,
                    config.max_upload_bytes,
                    config.upload_min_interval_ms,
                );
                let reports = upload::check_files(&mut intake, &files)?;
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        },
        Command::Config { action } => match action {
            ConfigAction::Show => print!("{}", config.to_toml_string()?),
        },
    }

    Ok(())
}
