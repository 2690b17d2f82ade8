//! Stateless results-screen projection.

use quarantine_arcade_core::ArcadeSnapshot;

use crate::SettlementMenu;

const TITLE: &str = "Time's Up!";
const HIGH_SCORE_BANNER: &str = "NEW HIGH SCORE!";
const SELECTION_HINT: &str = "Use up/down to choose an option";
const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

/// One rendered menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionLine {
    /// Label shown for the option.
    pub label: &'static str,
    /// Whether the option is highlighted.
    pub selected: bool,
}

/// Everything the host needs to draw the results screen.
///
/// Carries no state of its own and can be recomputed at any time.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsView {
    /// Heading of the screen.
    pub title: &'static str,
    /// Banner shown when the session set a new best.
    pub high_score_banner: Option<&'static str>,
    /// Session statistics, one per line.
    pub stats: Vec<String>,
    /// Menu entries in display order.
    pub options: Vec<OptionLine>,
    /// Prompt shown while nothing is selected.
    pub hint: Option<&'static str>,
}

impl ResultsView {
    /// Projects the snapshot, menu and high-score flag into display lines.
    #[must_use]
    pub fn project(
        snapshot: &ArcadeSnapshot,
        menu: &SettlementMenu,
        is_new_high_score: bool,
    ) -> Self {
        let queued = if snapshot.queue_size > 0 {
            format!("Queued for quarantine: {}", snapshot.queue_size)
        } else {
            "No identities queued".to_owned()
        };

        let stats = vec![
            format!("Eliminations: {}", snapshot.total_eliminations),
            format!("Highest combo: x{}", snapshot.highest_combo),
            format!("Powerups: {}", snapshot.powerups_collected),
            format!("Eliminations/sec: {:.2}", snapshot.eliminations_per_second),
            queued,
        ];

        let options = menu
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| OptionLine {
                label: option.label(),
                selected: menu.selected_index() == Some(index),
            })
            .collect();

        Self {
            title: TITLE,
            high_score_banner: is_new_high_score.then_some(HIGH_SCORE_BANNER),
            stats,
            options,
            hint: menu.selected_index().is_none().then_some(SELECTION_HINT),
        }
    }

    /// Flattens the view into plain text lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.to_owned()];
        lines.extend(self.high_score_banner.map(str::to_owned));
        lines.extend(self.stats.iter().cloned());
        lines.push(String::new());
        for option in &self.options {
            let marker = if option.selected {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            lines.push(format!("{marker}{}", option.label));
        }
        lines.extend(self.hint.map(str::to_owned));
        lines
    }
}
