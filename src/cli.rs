//! Command-line front end for replaying reaction recordings.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

use crate::config::BurstConfig;
use crate::replay::{ReplayOutcome, load_entries, replay};

#[derive(Parser, Debug)]
#[command(name = "call-reactions")]
#[command(about = "Replay recorded call reactions and report the bursts they trigger")]
pub struct Args {
    /// JSON array of reactions to replay
    pub input: PathBuf,

    /// JSON burst configuration; defaults apply to omitted fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<BurstConfig> {
    let Some(path) = path else {
        return Ok(BurstConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    BurstConfig::from_json_str(&json).with_context(|| format!("loading config {}", path.display()))
}

pub fn run(args: &Args) -> anyhow::Result<ReplayOutcome> {
    let config = load_config(args.config.as_deref())?;
    info!("Using {:?}", config);

    let entries = load_entries(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    Ok(replay(&entries, config)?)
}
