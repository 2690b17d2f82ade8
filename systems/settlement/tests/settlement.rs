use std::time::Duration;

use quarantine_arcade_core::{
    AccountId, ArcadeSnapshot, Identity, IdentityId, SessionEvent, SettlementAction,
};
use quarantine_arcade_system_session::{ArcadeSession, Config};
use quarantine_arcade_system_settlement::{Settlement, SettlementMenu, SettlementOption};

fn snapshot_with_queue(queue_size: usize) -> ArcadeSnapshot {
    ArcadeSnapshot::capture(
        queue_size as u32,
        queue_size as u32,
        0,
        Duration::from_secs(60),
        queue_size,
    )
}

fn labels(menu: &SettlementMenu) -> Vec<&'static str> {
    menu.options().iter().map(|option| option.label()).collect()
}

fn ended_session(eliminations: &[&str]) -> ArcadeSnapshot {
    let mut session = ArcadeSession::new(Config::default());
    let mut events = Vec::new();
    session.start_session();
    for _ in 0..30 {
        session.advance(Duration::from_millis(100), true, &mut events);
    }
    for id in eliminations {
        session.record_elimination(Identity::new(
            IdentityId::new(*id),
            *id,
            AccountId::new("acct"),
        ));
    }
    for _ in 0..60 {
        session.advance(Duration::from_secs(1), true, &mut events);
    }

    match events.pop() {
        Some(SessionEvent::SessionEnded { snapshot }) => snapshot,
        other => panic!("expected session end, got {other:?}"),
    }
}

#[test]
fn queued_batch_offers_quarantine_discard_replay() {
    let menu = SettlementMenu::for_queue_size(2);
    assert_eq!(labels(&menu), ["Quarantine All", "Discard Queue", "Replay"]);
}

#[test]
fn empty_batch_never_offers_quarantine() {
    let menu = SettlementMenu::for_queue_size(0);
    assert_eq!(labels(&menu), ["Replay", "Exit to Lobby"]);
    assert!(!menu.options().contains(&SettlementOption::QuarantineAll));
}

#[test]
fn confirm_before_navigation_keeps_menu_open() {
    let mut settlement = Settlement::new(snapshot_with_queue(2), false);

    assert_eq!(settlement.confirm(), SettlementAction::None);
    assert_eq!(settlement.confirm(), SettlementAction::None);
    assert!(settlement.menu().is_open());
    assert_eq!(settlement.menu().selected_index(), None);
}

#[test]
fn first_navigation_lands_on_first_option_in_either_direction() {
    for direction in [1, -1] {
        let mut menu = SettlementMenu::for_queue_size(2);
        menu.navigate(direction);
        assert_eq!(menu.selected_index(), Some(0), "direction {direction}");
    }
}

#[test]
fn navigation_wraps_in_both_directions() {
    let mut menu = SettlementMenu::for_queue_size(2);
    menu.navigate(-1);
    menu.navigate(-1);
    assert_eq!(menu.selected_index(), Some(2));

    menu.navigate(1);
    assert_eq!(menu.selected_index(), Some(0));
}

#[test]
fn confirm_commits_once_and_closes() {
    let mut menu = SettlementMenu::for_queue_size(2);
    menu.navigate(1);
    menu.navigate(1);

    assert_eq!(menu.confirm(), SettlementAction::DiscardQueue);
    assert!(!menu.is_open());
    assert_eq!(menu.confirm(), SettlementAction::None);
}

#[test]
fn every_option_maps_to_its_action() {
    let mut menu = SettlementMenu::for_queue_size(0);
    menu.navigate(1);
    menu.navigate(1);
    assert_eq!(menu.confirm(), SettlementAction::ExitToLobby);

    let mut menu = SettlementMenu::for_queue_size(3);
    menu.navigate(-1);
    menu.navigate(-1);
    assert_eq!(menu.confirm(), SettlementAction::Replay);
}

#[test]
fn full_session_settles_with_quarantine_all() {
    let snapshot = ended_session(&["A", "B"]);
    assert_eq!(snapshot.total_eliminations, 2);
    assert_eq!(snapshot.queue_size, 2);

    let mut settlement = Settlement::new(snapshot, false);
    assert_eq!(
        labels(settlement.menu()),
        ["Quarantine All", "Discard Queue", "Replay"]
    );
    assert_eq!(settlement.confirm(), SettlementAction::None);
    assert!(settlement.menu().is_open());

    settlement.navigate(1);
    assert_eq!(settlement.confirm(), SettlementAction::QuarantineAll);
}

#[test]
fn empty_session_settles_with_replay_or_exit() {
    let snapshot = ended_session(&[]);
    let settlement = Settlement::new(snapshot, false);
    assert_eq!(labels(settlement.menu()), ["Replay", "Exit to Lobby"]);
}

#[test]
fn view_reflects_selection_and_high_score() {
    let mut settlement = Settlement::new(snapshot_with_queue(2), true);

    let view = settlement.view();
    assert_eq!(view.title, "Time's Up!");
    assert_eq!(view.high_score_banner, Some("NEW HIGH SCORE!"));
    assert!(view.options.iter().all(|line| !line.selected));
    assert!(view.hint.is_some());
    assert!(view.stats.contains(&"Eliminations: 2".to_owned()));
    assert!(view.stats.contains(&"Queued for quarantine: 2".to_owned()));

    settlement.navigate(1);
    let view = settlement.view();
    assert!(view.hint.is_none());
    assert_eq!(
        view.lines()
            .into_iter()
            .filter(|line| line.starts_with("> "))
            .collect::<Vec<_>>(),
        ["> Quarantine All"]
    );
}

#[test]
fn view_without_high_score_omits_banner() {
    let settlement = Settlement::new(snapshot_with_queue(0), false);
    let view = settlement.view();

    assert!(view.high_score_banner.is_none());
    assert!(view.stats.contains(&"No identities queued".to_owned()));
    assert!(!view.lines().iter().any(|line| line.contains("HIGH SCORE")));
}
