//! urltrim CLI - shortens the URLs in log lines before they are logged.

mod logging;

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use urltrim_core::{Config, UrlShortener};

/// Line logged when neither an argument nor piped input is given.
const DEMO_URL: &str = "https://www.amazon.in/Samsung-Smartphone-Titanium-Whitesilver-Included/dp/B0DSKL9MQ8/ref=sr_1_1_sspa?nsdOptOutParam=true&sr=8-1-spons&sp_csd=d2lkZ2V0TmFtZT1zcF9hdGY";

/// urltrim - shorten URLs in log messages
#[derive(Parser)]
#[command(name = "urltrim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log line to shorten (reads stdin if piped, logs a sample line otherwise)
    message: Option<String>,

    /// Path to a custom config file (overrides default search locations)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Maximum displayed URL length (overrides config)
    #[arg(short = 'm', long, value_parser = parse_max_length)]
    max_length: Option<usize>,

    /// Write shortened lines to stdout instead of the log
    #[arg(long)]
    print: bool,
}

fn parse_max_length(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(max_length) = args.max_length {
        config.max_length = max_length;
    }

    // Guard must outlive every log call below.
    let _guard = logging::init_tracing(&config.logging)?;

    let shortener = UrlShortener::from_config(&config);
    tracing::debug!(max_length = shortener.max_length(), "Shortener ready");

    let lines = get_lines(&args).context("Failed to read input")?;

    let mut stdout = io::stdout().lock();
    for line in &lines {
        let shortened = shortener.apply_to_message(line);
        if args.print {
            writeln!(stdout, "{}", shortened).context("Failed to write to stdout")?;
        } else {
            tracing::info!("{}", shortened);
        }
    }

    Ok(())
}

/// Sample log line carrying one long URL.
fn demo_message() -> String {
    format!("Scraped URL: {}", DEMO_URL)
}

/// Retrieves the lines to shorten.
///
/// Priority: positional argument > piped stdin > demo line (if TTY)
fn get_lines(args: &Args) -> io::Result<Vec<String>> {
    if let Some(msg) = &args.message {
        return Ok(vec![msg.clone()]);
    }

    if io::stdin().is_terminal() {
        return Ok(vec![demo_message()]);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(split_lines(&buffer))
}

fn split_lines(input: &str) -> Vec<String> {
    input.lines().map(str::to_string).collect()
}
