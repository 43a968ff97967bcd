use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Countdown,
    Playing,
    Ended,
}

impl EngineState {
    /// Countdown or playing, the phases driven by a timer.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Countdown | Self::Playing)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended)
    }

    pub const fn timer_phase(self) -> Option<TimerPhase> {
        match self {
            Self::Countdown => Some(TimerPhase::Countdown),
            Self::Playing => Some(TimerPhase::Play),
            Self::Idle | Self::Ended => None,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerPhase {
    Countdown,
    Play,
}

/// Names the single timer currently allowed to drive [`PlayEngine::tick_lease`].
///
/// The epoch changes on every phase transition, so a timer created for an earlier phase can never tick a later one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerLease {
    pub phase: TimerPhase,
    pub epoch: u32,
}

#[derive(Clone, Debug)]
pub struct PlayEngine<P = RandomCellPicker> {
    config: GameConfig,
    picker: P,
    grid: LitGrid,
    state: EngineState,
    countdown_remaining: Seconds,
    time_remaining: Seconds,
    score: Saturating<Score>,
    consecutive_hits: Saturating<u32>,
    multiplier: u32,
    signal: Option<MultiplierSignal>,
    timer_epoch: u32,
}

impl PlayEngine<RandomCellPicker> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomCellPicker::new(seed))
    }
}

impl<P: CellPicker> PlayEngine<P> {
    pub fn new(config: GameConfig, picker: P) -> Self {
        Self {
            grid: LitGrid::new(config.size),
            state: Default::default(),
            countdown_remaining: config.countdown_secs,
            time_remaining: config.round_secs,
            score: Saturating(0),
            consecutive_hits: Saturating(0),
            multiplier: 1,
            signal: None,
            timer_epoch: 0,
            config,
            picker,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn grid(&self) -> &LitGrid {
        &self.grid
    }

    pub fn countdown_remaining(&self) -> Seconds {
        self.countdown_remaining
    }

    pub fn time_remaining(&self) -> Seconds {
        self.time_remaining
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits.0
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Most recent multiplier change, until the presentation layer clears it.
    pub fn signal(&self) -> Option<MultiplierSignal> {
        self.signal
    }

    pub fn is_lit(&self, index: CellIndex) -> bool {
        self.grid.is_lit(index)
    }

    pub fn lit_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.grid.lit_cells()
    }

    pub fn timer_lease(&self) -> Option<TimerLease> {
        self.state.timer_phase().map(|phase| TimerLease {
            phase,
            epoch: self.timer_epoch,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state.is_running() {
            return Err(GameError::RoundInProgress);
        }

        self.reset_round();
        self.enter(EngineState::Countdown);
        if self.countdown_remaining == 0 {
            self.begin_round();
        }
        Ok(())
    }

    pub fn tick(&mut self) -> TickOutcome {
        use EngineState::*;

        match self.state {
            Idle | Ended => TickOutcome::NoChange,
            Countdown => {
                self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
                if self.countdown_remaining == 0 {
                    self.begin_round();
                    TickOutcome::RoundStarted
                } else {
                    TickOutcome::CountedDown(self.countdown_remaining)
                }
            }
            Playing => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.end_round();
                    TickOutcome::RoundEnded(self.score.0)
                } else {
                    TickOutcome::TimeCounted(self.time_remaining)
                }
            }
        }
    }

    /// Like [`Self::tick`], but ignored unless `lease` is the current one.
    pub fn tick_lease(&mut self, lease: TimerLease) -> TickOutcome {
        if self.timer_lease() != Some(lease) {
            log::trace!("stale timer tick: {:?}", lease);
            return TickOutcome::NoChange;
        }
        self.tick()
    }

    pub fn click(&mut self, index: CellIndex) -> Result<ClickOutcome> {
        self.check_playing()?;
        let index = self.grid.validate_index(index)?;

        Ok(if self.grid.is_lit(index) {
            self.hit(index)
        } else {
            self.miss()
        })
    }

    pub fn register_miss(&mut self) -> Result<ClickOutcome> {
        self.check_playing()?;
        Ok(self.miss())
    }

    pub fn clear_signal(&mut self) -> bool {
        self.signal.take().is_some()
    }

    /// Drops any round in progress and returns to idle.
    pub fn reset(&mut self) {
        self.reset_round();
        self.enter(EngineState::Idle);
    }

    fn hit(&mut self, index: CellIndex) -> ClickOutcome {
        self.consecutive_hits += 1;
        let multiplier = multiplier_for(self.consecutive_hits.0, self.config.combo_step);
        let signal = (multiplier > self.multiplier).then_some(MultiplierSignal::Increase);
        self.multiplier = multiplier;
        self.score += multiplier;
        if signal.is_some() {
            self.signal = signal;
        }

        self.grid.darken(index);
        let mut excluded: CellList = self.grid.lit_cells().collect();
        excluded.push(index);
        match self
            .picker
            .pick_excluding(self.grid.total_cells(), &excluded)
        {
            Some(next) => {
                self.grid.light(next);
            }
            None => log::warn!("No replacement for cell {}, lit count drops", index),
        }

        log::trace!(
            "hit {}: +{} (combo {}, score {})",
            index,
            multiplier,
            self.consecutive_hits.0,
            self.score.0
        );
        ClickOutcome::Hit {
            gained: multiplier,
            signal,
        }
    }

    fn miss(&mut self) -> ClickOutcome {
        log::trace!("miss after combo {}", self.consecutive_hits.0);
        self.consecutive_hits = Saturating(0);
        self.multiplier = 1;
        self.signal = Some(MultiplierSignal::Reset);
        ClickOutcome::Miss
    }

    fn begin_round(&mut self) {
        self.enter(EngineState::Playing);
        self.time_remaining = self.config.round_secs;
        self.grid.clear();

        let lit = self
            .picker
            .pick_distinct(self.grid.total_cells(), self.config.lit_cells);
        for &index in &lit {
            self.grid.light(index);
        }
        if self.grid.lit_count() != self.config.lit_cells {
            log::warn!(
                "Lit cell count mismatch, actual: {}, requested: {}",
                self.grid.lit_count(),
                self.config.lit_cells
            );
        }
    }

    fn end_round(&mut self) {
        self.enter(EngineState::Ended);
        self.grid.clear();
        log::debug!("round ended with score {}", self.score.0);
    }

    fn reset_round(&mut self) {
        self.grid.clear();
        self.countdown_remaining = self.config.countdown_secs;
        self.time_remaining = self.config.round_secs;
        self.score = Saturating(0);
        self.consecutive_hits = Saturating(0);
        self.multiplier = 1;
        self.signal = None;
    }

    fn enter(&mut self, state: EngineState) {
        if self.state == state {
            return;
        }

        log::debug!("engine state: {:?} -> {:?}", self.state, state);
        self.state = state;
        self.timer_epoch = self.timer_epoch.wrapping_add(1);
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }
}
