#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays one scripted arcade session headlessly.

mod client;
mod config;
mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use quarantine_arcade_core::{HighScoreEntry, SettlementAction};
use quarantine_arcade_host::{ArcadeHost, InMemoryHighScores, SettlementOutcome};

use crate::{client::DryRunQuarantineClient, config::ArcadeConfig};

/// Plays a scripted arcade session and settles the queued batch.
#[derive(Debug, Parser)]
#[command(name = "quarantine-arcade", version)]
struct Cli {
    /// TOML file with `[session]` and `[script]` tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the number of scripted eliminations.
    #[arg(long)]
    eliminations: Option<u32>,
    /// Settlement option to commit once the session ends.
    #[arg(long, value_enum, default_value_t = Choice::Quarantine)]
    choice: Choice,
    /// Seeds the high-score store with a previous best elimination count.
    #[arg(long)]
    seed_high_score: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Choice {
    Quarantine,
    Discard,
    Replay,
    Exit,
}

impl Choice {
    const fn action(self) -> SettlementAction {
        match self {
            Self::Quarantine => SettlementAction::QuarantineAll,
            Self::Discard => SettlementAction::DiscardQueue,
            Self::Replay => SettlementAction::Replay,
            Self::Exit => SettlementAction::ExitToLobby,
        }
    }
}

/// Entry point for the quarantine arcade command-line interface.
fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ArcadeConfig::load(path)?,
        None => ArcadeConfig::default(),
    };
    if let Some(eliminations) = cli.eliminations {
        config.script.eliminations = eliminations;
    }

    let session_config = config.session_config()?;
    let scores = match cli.seed_high_score {
        Some(total_eliminations) => InMemoryHighScores::with_best(HighScoreEntry {
            total_eliminations,
            highest_combo: 0,
            elapsed_active: session_config.session_length(),
        }),
        None => InMemoryHighScores::new(),
    };

    let mut host = ArcadeHost::new(session_config, DryRunQuarantineClient::default(), scores);
    script::run_until_settlement(&mut host, &config.script)?;

    let settlement = host
        .settlement()
        .context("session finished without opening a settlement")?;
    for line in settlement.view().lines() {
        println!("{line}");
    }
    println!();

    let outcome = script::settle(&mut host, cli.choice.action())?;
    println!("{}", describe(&outcome));
    Ok(())
}

fn describe(outcome: &SettlementOutcome) -> String {
    match outcome {
        SettlementOutcome::Pending => "No option committed.".to_owned(),
        SettlementOutcome::Quarantined { receipt } => format!(
            "Quarantined {} identities ({} rejected).",
            receipt.accepted,
            receipt.rejected.len()
        ),
        SettlementOutcome::QuarantineFailed { records, error } => {
            format!("Quarantine of {} identities failed: {error}", records.len())
        }
        SettlementOutcome::Discarded { count } => format!("Discarded {count} queued identities."),
        SettlementOutcome::Replaying => "Replaying: countdown started.".to_owned(),
        SettlementOutcome::ExitedToLobby => "Returned to lobby.".to_owned(),
    }
}
