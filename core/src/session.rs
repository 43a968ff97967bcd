use crate::*;

/// Everything one page of the game owns: the engine, the player, and the boards.
#[derive(Clone, Debug)]
pub struct GameSession<P = RandomCellPicker> {
    engine: PlayEngine<P>,
    profile: PlayerProfile,
    round_identity: Option<Identity>,
    leaderboard: Leaderboard,
    solvers: SolverLog,
}

impl GameSession<RandomCellPicker> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomCellPicker::new(seed))
    }
}

impl<P: CellPicker> GameSession<P> {
    pub fn new(config: GameConfig, picker: P) -> Self {
        Self {
            engine: PlayEngine::new(config, picker),
            profile: Default::default(),
            round_identity: None,
            leaderboard: Leaderboard::with_depth(config.leaderboard_depth),
            solvers: Default::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &PlayEngine<P> {
        &self.engine
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// Identity the current or last round is credited to.
    pub fn round_identity(&self) -> Option<&Identity> {
        self.round_identity.as_ref()
    }

    pub fn scores(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn leaderboard(&self, role: Role) -> impl Iterator<Item = &ScoreEntry> + '_ {
        self.leaderboard.top(role)
    }

    pub fn solvers(&self) -> &SolverLog {
        &self.solvers
    }

    pub fn timer_lease(&self) -> Option<TimerLease> {
        self.engine.timer_lease()
    }

    pub fn set_player_name(&mut self, raw: &str) -> Result<&PlayerName> {
        self.check_between_rounds()?;
        let max_len = self.config().max_name_len;
        Ok(self.profile.set_name(raw, max_len))
    }

    pub fn set_role(&mut self, role: Role) -> Result<()> {
        self.check_between_rounds()?;
        self.profile.set_role(role);
        Ok(())
    }

    pub fn confirm_ready(&mut self) -> Result<&Identity> {
        self.profile.confirm_ready()
    }

    pub fn start(&mut self) -> Result<()> {
        let identity = self.profile.identity().cloned().ok_or(GameError::NotReady)?;
        self.engine.start()?;
        log::info!("round started for {} as {}", identity.name, identity.role.label());
        self.round_identity = Some(identity);
        Ok(())
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();
        self.settle(outcome)
    }

    pub fn tick_lease(&mut self, lease: TimerLease) -> TickOutcome {
        let outcome = self.engine.tick_lease(lease);
        self.settle(outcome)
    }

    pub fn click(&mut self, index: CellIndex) -> Result<ClickOutcome> {
        self.engine.click(index)
    }

    pub fn register_miss(&mut self) -> Result<ClickOutcome> {
        self.engine.register_miss()
    }

    pub fn clear_signal(&mut self) -> bool {
        self.engine.clear_signal()
    }

    pub fn record_solver_discovery(&mut self, name: &str) -> bool {
        let max_len = self.config().max_name_len;
        self.solvers
            .record(PlayerName::sanitize_with_limit(name, max_len))
    }

    /// Hidden title button: logs the ready player as a solver. Returns whether they are new to the log.
    pub fn discover(&mut self) -> Result<bool> {
        let identity = self.profile.identity().ok_or(GameError::NotReady)?;
        Ok(self.solvers.record(identity.name.clone()))
    }

    /// Back to a freshly constructed session, keeping only the config and picker.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.profile = Default::default();
        self.round_identity = None;
        self.leaderboard.clear();
        self.solvers.clear();
    }

    fn settle(&mut self, outcome: TickOutcome) -> TickOutcome {
        if let TickOutcome::RoundEnded(score) = outcome {
            match &self.round_identity {
                Some(identity) => self.leaderboard.fold(ScoreEntry::new(identity, score)),
                None => log::warn!("Round ended without an identity, score {} dropped", score),
            }
        }
        outcome
    }

    fn check_between_rounds(&self) -> Result<()> {
        if self.engine.state().is_running() {
            Err(GameError::RoundInProgress)
        } else {
            Ok(())
        }
    }
}
