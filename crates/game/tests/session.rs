use game::{
    Autopilot, GameConfig, GameEvent, GameOverReason, GamePhase, PlayerInput, SaveRecord,
    SaveStore, Session,
};

const DT: f32 = 1.0 / 60.0;

/// Config where nothing but the coins matters.
fn calm_config() -> GameConfig {
    GameConfig {
        fuel_drain_per_second: 0.0,
        enemy_contact_damage: 0.0,
        ..GameConfig::default()
    }
}

/// Fly the autopilot until the phase leaves `Playing` or time runs out.
fn fly(session: &mut Session, max_seconds: f32) -> Vec<GameEvent> {
    let pilot = Autopilot::default();
    let mut events = Vec::new();
    let steps = (max_seconds / DT) as usize;
    for _ in 0..steps {
        let input = pilot.decide(session);
        session.tick(&input, DT);
        events.extend(session.drain_events());
        if !session.phase().is_playing() {
            break;
        }
    }
    events
}

#[test]
fn collecting_every_coin_completes_level_one() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    let mut session = Session::new(calm_config(), SaveRecord::default(), 2024).with_store(store.clone(), 0);
    session.start();
    assert_eq!(session.params().coins_needed, 15);

    let events = fly(&mut session, 600.0);
    assert_eq!(session.phase(), GamePhase::LevelComplete);
    assert_eq!(session.coins_collected(), 15);

    let collected = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
        .count();
    assert_eq!(collected, 15);
    let completions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
        .count();
    assert_eq!(completions, 1);

    // Further ticks do nothing until the next level is requested
    for _ in 0..120 {
        session.tick(&PlayerInput::default(), DT);
    }
    assert!(session.drain_events().is_empty());

    let saved = store.try_load(0).unwrap().unwrap();
    assert_eq!(saved.high_score, session.score());
    assert_eq!(saved.high_level, 1);
    assert_eq!(saved.total_coins, 15);
    assert!(saved.achievements.iter().any(|a| a == "first_coin"));
}

#[test]
fn high_score_keeps_previous_best() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    let previous = SaveRecord {
        high_score: 1_000_000,
        high_level: 7,
        total_coins: 40,
        ..SaveRecord::default()
    };
    let mut session = Session::new(calm_config(), previous, 99).with_store(store.clone(), 3);
    session.start();
    fly(&mut session, 600.0);
    assert_eq!(session.phase(), GamePhase::LevelComplete);
    assert!(session.score() < 1_000_000);

    let saved = store.try_load(3).unwrap().unwrap();
    assert_eq!(saved.high_score, 1_000_000);
    assert_eq!(saved.high_level, 7);
    assert_eq!(saved.total_coins, 55);
}

#[test]
fn next_level_raises_the_bar() {
    let mut session = Session::new(calm_config(), SaveRecord::default(), 5);
    session.start();
    fly(&mut session, 600.0);
    assert_eq!(session.phase(), GamePhase::LevelComplete);
    let score = session.score();

    session.next_level();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.level(), 2);
    assert_eq!(session.params().coins_needed, 20);
    assert_eq!(session.coins_collected(), 0);
    assert_eq!(session.score(), score);
    assert_eq!(session.player().fuel.level(), 100.0);
}

#[test]
fn running_dry_ends_the_game_once() {
    let config = GameConfig {
        fuel_drain_per_second: 50.0,
        enemy_contact_damage: 0.0,
        ..GameConfig::default()
    };
    let mut session = Session::new(config, SaveRecord::default(), 8);
    session.start();

    let mut game_overs = Vec::new();
    for _ in 0..600 {
        session.tick(&PlayerInput::default(), DT);
        let fuel = session.player().fuel.level();
        assert!((0.0..=100.0).contains(&fuel));
        for event in session.drain_events() {
            if let GameEvent::GameOver { reason, .. } = event {
                game_overs.push(reason);
            }
        }
    }

    assert_eq!(game_overs, vec![GameOverReason::OutOfFuel]);
    assert_eq!(session.phase(), GamePhase::GameOver(GameOverReason::OutOfFuel));
    assert_eq!(session.save().game_stats.deaths, 1);
}

#[test]
fn enemies_never_exceed_level_cap() {
    let config = GameConfig {
        fuel_drain_per_second: 0.0,
        enemy_contact_damage: 0.0,
        ..GameConfig::default()
    };
    let mut session = Session::new(config, SaveRecord::default(), 31);
    session.start();
    let cap = session.params().max_enemies;
    for _ in 0..(60 * 120) {
        session.tick(&PlayerInput::default(), DT);
        assert!(session.enemy_count() <= cap);
    }
    assert_eq!(session.enemy_count(), cap);
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let config = GameConfig {
        fuel_drain_per_second: 100.0,
        ..GameConfig::default()
    };
    let mut session = Session::new(config, SaveRecord::default(), 4);
    session.start();
    for _ in 0..120 {
        session.tick(&PlayerInput::default(), DT);
    }
    assert!(session.phase().is_game_over());

    session.restart();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.level(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.save().game_stats.games_played, 2);
}
