//! `namecheck`: check whether a username is free on several platforms.
//!
//! Lookups go through a running `namecheck-web` relay.

mod render;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use namecheck_core::{
    AvailabilityChecker, CheckOutcome, DEFAULT_LOOKUP_TIMEOUT_SECS, Platform, ProxyClient,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "namecheck", version)]
#[command(about = "Check username availability on TikTok, Twitch, Spotify, SoundCloud and Telegram")]
struct Cli {
    /// Username to check
    username: String,

    /// Base URL of the lookup relay
    #[arg(long, env = "NAMECHECK_PROXY", default_value = "http://127.0.0.1:3000")]
    proxy: String,

    /// Platform to check (repeatable); defaults to tiktok, twitch, spotify, soundcloud
    #[arg(short, long = "platform", value_name = "KEY")]
    platforms: Vec<Platform>,

    /// Per-lookup timeout in seconds (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_LOOKUP_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout is reserved for results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .without_time()
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("namecheck error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut checker = AvailabilityChecker::new(Arc::new(ProxyClient::new(cli.proxy.as_str())))
        .with_lookup_timeout(Duration::from_secs(cli.timeout));
    if !cli.platforms.is_empty() {
        checker = checker.with_platforms(cli.platforms);
    }

    let username = cli.username.trim();
    if !username.is_empty() && !cli.json {
        println!("{}", render::render_loading(username, checker.platforms()));
    }

    tracing::debug!(proxy = %cli.proxy, "starting check");
    let report = match checker.check(&cli.username).await {
        CheckOutcome::Skipped => {
            eprintln!("Please enter a username.");
            return Ok(ExitCode::SUCCESS);
        }
        CheckOutcome::InProgress => anyhow::bail!("another check is already running"),
        CheckOutcome::Completed(report) | CheckOutcome::Superseded(report) => report,
    };

    if cli.json {
        println!("{}", render::render_json(&report)?);
    } else {
        println!("{}", render::render_table(&report));
    }
    Ok(ExitCode::SUCCESS)
}
