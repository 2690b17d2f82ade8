#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! End-of-session settlement menu.
//!
//! The menu opens with nothing selected. The player has to navigate at least
//! once before a confirm can commit anything, so a confirm press carried over
//! from the session cannot quarantine or discard real identities by accident.

mod view;

use log::debug;
use quarantine_arcade_core::{ArcadeSnapshot, SettlementAction};

pub use view::{OptionLine, ResultsView};

/// Entries that may appear in the settlement menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettlementOption {
    /// Submit every queued record.
    QuarantineAll,
    /// Drop every queued record.
    DiscardQueue,
    /// Play another session.
    Replay,
    /// Leave the arcade.
    ExitToLobby,
}

impl SettlementOption {
    /// Label rendered for the option.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::QuarantineAll => "Quarantine All",
            Self::DiscardQueue => "Discard Queue",
            Self::Replay => "Replay",
            Self::ExitToLobby => "Exit to Lobby",
        }
    }

    /// Action committed when the option is confirmed.
    #[must_use]
    pub const fn action(self) -> SettlementAction {
        match self {
            Self::QuarantineAll => SettlementAction::QuarantineAll,
            Self::DiscardQueue => SettlementAction::DiscardQueue,
            Self::Replay => SettlementAction::Replay,
            Self::ExitToLobby => SettlementAction::ExitToLobby,
        }
    }
}

const QUEUED_OPTIONS: [SettlementOption; 3] = [
    SettlementOption::QuarantineAll,
    SettlementOption::DiscardQueue,
    SettlementOption::Replay,
];

const EMPTY_OPTIONS: [SettlementOption; 2] =
    [SettlementOption::Replay, SettlementOption::ExitToLobby];

/// Option list plus the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementMenu {
    options: Vec<SettlementOption>,
    selected: Option<usize>,
    open: bool,
}

impl SettlementMenu {
    /// Builds the menu offered for a batch of the given size.
    #[must_use]
    pub fn for_queue_size(queue_size: usize) -> Self {
        let options = if queue_size > 0 {
            QUEUED_OPTIONS.to_vec()
        } else {
            EMPTY_OPTIONS.to_vec()
        };

        Self {
            options,
            selected: None,
            open: true,
        }
    }

    /// Options in display order.
    #[must_use]
    pub fn options(&self) -> &[SettlementOption] {
        &self.options
    }

    /// Index of the highlighted option, or `None` before the first navigation.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Reports whether the menu still accepts input.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Moves the selection by `direction`, wrapping at both ends.
    ///
    /// The first navigation always lands on the first option regardless of
    /// direction.
    pub fn navigate(&mut self, direction: i32) {
        if !self.open || self.options.is_empty() {
            return;
        }

        let next = match self.selected {
            None => 0,
            Some(current) => {
                let len = self.options.len() as i64;
                (current as i64 + i64::from(direction)).rem_euclid(len) as usize
            }
        };
        self.selected = Some(next);
    }

    /// Commits the highlighted option and closes the menu.
    ///
    /// Returns [`SettlementAction::None`] and leaves the menu untouched when
    /// nothing is selected or the menu already closed.
    pub fn confirm(&mut self) -> SettlementAction {
        if !self.open {
            return SettlementAction::None;
        }

        let Some(option) = self.selected.and_then(|index| self.options.get(index).copied()) else {
            debug!("settlement confirm ignored: nothing selected");
            return SettlementAction::None;
        };

        self.open = false;
        debug!("settlement committed {:?}", option);
        option.action()
    }
}

/// Settlement controller built from the frozen session snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Settlement {
    snapshot: ArcadeSnapshot,
    menu: SettlementMenu,
    is_new_high_score: bool,
}

impl Settlement {
    /// Creates the controller, deriving the menu from the snapshot's queue size.
    #[must_use]
    pub fn new(snapshot: ArcadeSnapshot, is_new_high_score: bool) -> Self {
        let menu = SettlementMenu::for_queue_size(snapshot.queue_size);
        Self {
            snapshot,
            menu,
            is_new_high_score,
        }
    }

    /// Statistics the menu was built from.
    #[must_use]
    pub fn snapshot(&self) -> &ArcadeSnapshot {
        &self.snapshot
    }

    /// Menu state.
    #[must_use]
    pub fn menu(&self) -> &SettlementMenu {
        &self.menu
    }

    /// Whether the session set a new historical best.
    #[must_use]
    pub const fn is_new_high_score(&self) -> bool {
        self.is_new_high_score
    }

    /// Moves the menu selection. See [`SettlementMenu::navigate`].
    pub fn navigate(&mut self, direction: i32) {
        self.menu.navigate(direction);
    }

    /// Commits the highlighted option. See [`SettlementMenu::confirm`].
    pub fn confirm(&mut self) -> SettlementAction {
        self.menu.confirm()
    }

    /// Derives the results screen for the current state.
    #[must_use]
    pub fn view(&self) -> ResultsView {
        ResultsView::project(&self.snapshot, &self.menu, self.is_new_high_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_after_close_is_ignored() {
        let mut menu = SettlementMenu::for_queue_size(0);
        menu.navigate(1);
        assert_eq!(menu.confirm(), SettlementAction::Replay);

        menu.navigate(1);
        assert_eq!(menu.selected_index(), Some(0));
        assert_eq!(menu.confirm(), SettlementAction::None);
    }

    #[test]
    fn large_steps_wrap_modulo_option_count() {
        let mut menu = SettlementMenu::for_queue_size(4);
        menu.navigate(1);
        menu.navigate(-7);
        assert_eq!(menu.selected_index(), Some(2));
    }
}
