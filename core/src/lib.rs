#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use player::*;
pub use scoreboard::*;
pub use session::*;
pub use solvers::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod player;
mod scoreboard;
mod session;
mod solvers;
mod types;

/// Tuning for a round: grid shape, how many cells are lit at once, and the clocks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub lit_cells: CellCount,
    pub countdown_secs: Seconds,
    pub round_secs: Seconds,
    pub combo_step: u32,
    pub leaderboard_depth: usize,
    pub max_name_len: usize,
}

impl GameConfig {
    pub const fn classic() -> Self {
        Self {
            size: (3, 3),
            lit_cells: 3,
            countdown_secs: 3,
            round_secs: 15,
            combo_step: 3,
            leaderboard_depth: 3,
            max_name_len: 10,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Visual cue for the multiplier, shown briefly by the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiplierSignal {
    Increase,
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    CountedDown(Seconds),
    RoundStarted,
    TimeCounted(Seconds),
    RoundEnded(Score),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Hit {
        gained: Score,
        signal: Option<MultiplierSignal>,
    },
    Miss,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        true
    }

    pub const fn signal(self) -> Option<MultiplierSignal> {
        match self {
            Self::Hit { signal, .. } => signal,
            Self::Miss => Some(MultiplierSignal::Reset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_config_is_three_by_three_with_three_lit() {
        let config = GameConfig::default();
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.lit_cells, 3);
        assert_eq!((config.countdown_secs, config.round_secs), (3, 15));
    }

    #[test]
    fn miss_always_signals_reset() {
        assert_eq!(ClickOutcome::Miss.signal(), Some(MultiplierSignal::Reset));
        let hit = ClickOutcome::Hit {
            gained: 1,
            signal: None,
        };
        assert_eq!(hit.signal(), None);
    }
}
