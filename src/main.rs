//! Replays recorded hand landmark streams through the gesture classifier.

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture::{
    config::{Config, EXAMPLE_CONFIG},
    replay::{replay, ReplayOptions},
};
use log::info;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded landmark stream (JSON Lines); reads stdin when omitted
    #[arg(short, long)]
    input: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Print every frame instead of only gesture changes
    #[arg(short, long)]
    all_frames: bool,

    /// Abort on the first malformed line
    #[arg(long)]
    strict: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Config::from_file(path).with_context(|| format!("Failed to load config {path}"))?
        }
        None => Config::default(),
    };
    let mut classifier = config.classifier().context("Invalid configuration")?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let options = ReplayOptions {
        strict: args.strict,
        all_frames: args.all_frames,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = replay(reader, &mut classifier, &options, |update| {
        serde_json::to_writer(&mut out, update)?;
        writeln!(out)?;
        Ok(())
    })?;

    info!(
        "Processed {} frames, {} gesture changes, {} skipped lines",
        summary.frames, summary.events, summary.skipped
    );

    Ok(())
}
