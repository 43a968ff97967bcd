//! End-to-end rounds driven through `GameSession`, the way the web view drives it.

use divinity_core::*;

fn ready(name: &str, role: Role, seed: u64) -> GameSession {
    let mut session = GameSession::with_seed(GameConfig::classic(), seed);
    session.set_player_name(name).unwrap();
    session.set_role(role).unwrap();
    session.confirm_ready().unwrap();
    session
}

fn run_countdown(session: &mut GameSession) {
    session.start().unwrap();
    while session.state() == EngineState::Countdown {
        session.tick();
    }
    assert_eq!(session.state(), EngineState::Playing);
}

fn hit(session: &mut GameSession) -> ClickOutcome {
    let lit = session.engine().lit_cells().next().unwrap();
    session.click(lit).unwrap()
}

fn run_out_clock(session: &mut GameSession) -> Score {
    loop {
        if let TickOutcome::RoundEnded(score) = session.tick() {
            return score;
        }
        assert!(session.state().is_playing());
    }
}

/// Plays a full round scoring exactly `hits` single-multiplier points, missing before every third hit.
fn play_round(session: &mut GameSession, hits: u32) -> Score {
    run_countdown(session);
    for n in 0..hits {
        if n % 2 == 0 {
            session.register_miss().unwrap();
        }
        hit(session);
    }
    run_out_clock(session)
}

#[test]
fn combo_example_from_a_fresh_round() {
    let mut session = ready("Ada", Role::Goddess, 2024);
    run_countdown(&mut session);

    let lit: Vec<CellIndex> = session.engine().lit_cells().collect();
    assert_eq!(lit.len(), 3);
    assert!(lit.iter().all(|&index| index < 9));

    let gained: Vec<Score> = (0..3)
        .map(|_| match hit(&mut session) {
            ClickOutcome::Hit { gained, .. } => gained,
            ClickOutcome::Miss => panic!("lit cell counted as a miss"),
        })
        .collect();
    assert_eq!(gained, [1, 1, 2]);
    assert_eq!(session.engine().score(), 4);
    assert_eq!(session.engine().multiplier(), 2);

    assert_eq!(session.register_miss().unwrap(), ClickOutcome::Miss);
    assert_eq!(session.engine().multiplier(), 1);
    assert_eq!(session.engine().consecutive_hits(), 0);
}

#[test]
fn best_score_per_identity_is_kept() {
    let mut session = ready("Ada", Role::Goddess, 7);

    assert_eq!(play_round(&mut session, 10), 10);
    assert_eq!(play_round(&mut session, 7), 7);

    let board: Vec<(String, Score)> = session
        .leaderboard(Role::Goddess)
        .map(|entry| (entry.name.to_string(), entry.score))
        .collect();
    assert_eq!(board, [("Ada".to_string(), 10)]);
}

#[test]
fn roles_rank_independently_and_cap_at_three() {
    let mut session = GameSession::with_seed(GameConfig::classic(), 11);
    let rounds = [
        ("Ana", Role::Servant, 3),
        ("Bea", Role::Servant, 8),
        ("Cy", Role::Goddess, 1),
        ("Dee", Role::Servant, 5),
        ("Eve", Role::Servant, 6),
    ];
    for (name, role, hits) in rounds {
        session.set_player_name(name).unwrap();
        session.set_role(role).unwrap();
        session.confirm_ready().unwrap();
        play_round(&mut session, hits);
    }

    let servants: Vec<(&str, Score)> = session
        .leaderboard(Role::Servant)
        .map(|entry| (entry.name.as_str(), entry.score))
        .collect();
    assert_eq!(servants, [("Bea", 8), ("Eve", 6), ("Dee", 5)]);

    let goddesses: Vec<&str> = session
        .leaderboard(Role::Goddess)
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(goddesses, ["Cy"]);
}

#[test]
fn changing_name_between_rounds_needs_ready_again() {
    let mut session = ready("Ada", Role::Servant, 3);
    play_round(&mut session, 2);

    assert_eq!(session.set_player_name("Bob!!").unwrap().as_str(), "Bob");
    assert_eq!(session.start(), Err(GameError::NotReady));

    session.confirm_ready().unwrap();
    play_round(&mut session, 4);

    let names: Vec<&str> = session
        .leaderboard(Role::Servant)
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, ["Bob", "Ada"]);
}

#[test]
fn name_input_is_corrected_not_rejected() {
    let mut session = GameSession::with_seed(GameConfig::classic(), 0);

    for raw in ["", "x", "Ada Lovelace 1815", "!!!", "ÆØÅabc", "aaaaaaaaaaaaaaaaaaaa"] {
        let name = session.set_player_name(raw).unwrap();
        assert!(name.len() <= 10);
        assert!(name.as_str().chars().all(|c| c.is_ascii_alphabetic()));
    }
    assert_eq!(
        session.set_player_name("Ada Lovelace 1815").unwrap().as_str(),
        "AdaLovelac"
    );
}

#[test]
fn solver_discovery_is_idempotent() {
    let mut session = GameSession::with_seed(GameConfig::classic(), 0);

    assert!(session.record_solver_discovery("Ada"));
    assert!(!session.record_solver_discovery("Ada"));

    let solvers: Vec<&str> = session.solvers().iter().map(PlayerName::as_str).collect();
    assert_eq!(solvers, ["Ada"]);
}

#[test]
fn clicks_between_rounds_are_ignored() {
    let mut session = ready("Ada", Role::Goddess, 5);
    assert_eq!(session.click(0), Err(GameError::NotPlaying));

    play_round(&mut session, 1);
    assert_eq!(session.register_miss(), Err(GameError::NotPlaying));
    assert_eq!(session.tick(), TickOutcome::NoChange);
    assert_eq!(session.engine().score(), 1);
}

#[test]
fn one_lease_per_phase_across_restarts() {
    let mut session = ready("Ada", Role::Goddess, 9);
    let mut seen = Vec::new();

    for _ in 0..2 {
        session.start().unwrap();
        while let Some(lease) = session.timer_lease() {
            if seen.last() != Some(&lease) {
                assert!(!seen.contains(&lease), "lease {lease:?} reused");
                seen.push(lease);
            }
            session.tick_lease(lease);
        }
    }

    let phases: Vec<TimerPhase> = seen.iter().map(|lease| lease.phase).collect();
    assert_eq!(
        phases,
        [
            TimerPhase::Countdown,
            TimerPhase::Play,
            TimerPhase::Countdown,
            TimerPhase::Play
        ]
    );
}
