//! Scripted player that drives the host through one session.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use quarantine_arcade_core::{
    AccountId, HighScoreStore, HostRunState, Identity, IdentityId, QuarantineClient,
    SessionEvent, SettlementAction,
};
use quarantine_arcade_host::{ArcadeHost, SettlementOutcome};

use crate::config::ScriptSection;

const MAX_TICKS: u64 = 10_000_000;
const SCRIPTED_ACCOUNTS: u32 = 3;

/// Starts a session and ticks the host until its settlement menu opens.
pub(crate) fn run_until_settlement<Q, S>(
    host: &mut ArcadeHost<Q, S>,
    script: &ScriptSection,
) -> Result<()>
where
    Q: QuarantineClient,
    S: HighScoreStore,
{
    let tick = script.tick()?;
    let interval = script.elimination_interval();
    let pause = script.pause_window()?;

    let mut clock = Duration::ZERO;
    let mut since_last = Duration::ZERO;
    let mut recorded = 0;

    host.start();
    for _ in 0..MAX_TICKS {
        let paused = pause.is_some_and(|(start, end)| clock >= start && clock < end);
        let run_state = if paused {
            HostRunState::Paused
        } else {
            HostRunState::Running
        };
        clock += tick;

        if run_state.is_interactive() && host.session().is_active() {
            since_last += tick;
            if recorded < script.eliminations && since_last >= interval {
                since_last = Duration::ZERO;
                host.record_elimination(scripted_identity(recorded));
                recorded += 1;
                if script
                    .powerup_every
                    .is_some_and(|every| every > 0 && recorded % every == 0)
                {
                    host.record_powerup();
                }
            }
        }

        for event in host.tick(tick, run_state) {
            match event {
                SessionEvent::CountdownFinished => info!("session started"),
                SessionEvent::ComboExpired { combo } => debug!("combo x{combo} expired"),
                SessionEvent::SessionEnded { .. } => info!("time's up"),
            }
        }

        if host.settlement().is_some() {
            return Ok(());
        }
    }

    bail!("session did not end within {MAX_TICKS} ticks")
}

/// Navigates to the option committing `action` and confirms it.
pub(crate) fn settle<Q, S>(
    host: &mut ArcadeHost<Q, S>,
    action: SettlementAction,
) -> Result<SettlementOutcome>
where
    Q: QuarantineClient,
    S: HighScoreStore,
{
    let settlement = host.settlement().context("no settlement is open")?;
    let index = settlement
        .menu()
        .options()
        .iter()
        .position(|option| option.action() == action)
        .with_context(|| format!("{action:?} is not offered for this batch"))?;

    for _ in 0..=index {
        host.navigate(1);
    }
    Ok(host.confirm())
}

fn scripted_identity(index: u32) -> Identity {
    Identity::new(
        IdentityId::new(format!("identity-{index}")),
        format!("Subject {index}"),
        AccountId::new(format!("acct-{}", index % SCRIPTED_ACCOUNTS)),
    )
}
