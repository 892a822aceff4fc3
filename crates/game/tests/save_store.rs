use game::achievements::AchievementId;
use game::save::SAVE_VERSION;
use game::{SaveError, SaveRecord, SaveStore};

#[test]
fn round_trip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path().join("nested").join("saves"));

    let mut record = SaveRecord {
        high_score: 4321,
        high_level: 6,
        total_coins: 250,
        ..SaveRecord::default()
    };
    record.unlock_achievement(AchievementId::FirstCoin);
    record.unlock_achievement(AchievementId::CoinHoarder);
    record.settings.master_volume = 0.25;
    record.settings.screen_shake = false;
    record.game_stats.games_played = 12;
    record.game_stats.play_time_seconds = 901.5;

    store.save(1, &record).unwrap();
    assert_eq!(store.try_load(1).unwrap(), Some(record));
}

#[test]
fn missing_slot_is_none_and_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    assert!(store.try_load(4).unwrap().is_none());
    assert_eq!(store.load(4), SaveRecord::default());
}

#[test]
fn corrupt_slot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    std::fs::write(store.slot_path(0), "{ definitely not json").unwrap();
    assert!(matches!(store.try_load(0), Err(SaveError::Parse(_))));
    assert_eq!(store.load(0), SaveRecord::default());
}

#[test]
fn future_version_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    std::fs::write(store.slot_path(0), r#"{"version": 7, "high_score": 5}"#).unwrap();
    assert!(matches!(
        store.try_load(0),
        Err(SaveError::UnsupportedVersion { found: 7, .. })
    ));
    assert_eq!(store.load(0).high_score, 0);
}

#[test]
fn malformed_version_is_not_mistaken_for_legacy() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    std::fs::write(store.slot_path(0), r#"{"version": -1, "high_score": 500}"#).unwrap();
    assert!(matches!(store.try_load(0), Err(SaveError::InvalidVersion(_))));
}

#[test]
fn legacy_file_migrates_and_rewrites_as_current() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    std::fs::write(
        store.slot_path(2),
        r#"{"highScore": 800, "highLevel": 3, "totalCoins": 61, "achievements": ["first_coin"]}"#,
    )
    .unwrap();

    let record = store.load(2);
    assert_eq!(record.version, SAVE_VERSION);
    assert_eq!(record.high_score, 800);
    assert!(record.has_achievement(AchievementId::FirstCoin));

    store.save(2, &record).unwrap();
    let raw = std::fs::read_to_string(store.slot_path(2)).unwrap();
    assert!(raw.contains("\"version\": 2"));
    assert!(raw.contains("\"high_score\": 800"));
}

#[test]
fn slots_are_listed_and_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    for slot in [3, 0, 11] {
        store.save(slot, &SaveRecord::default()).unwrap();
    }
    std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
    assert_eq!(store.slots(), vec![0, 3, 11]);

    assert!(store.delete(3).unwrap());
    assert!(!store.delete(3).unwrap());
    assert_eq!(store.slots(), vec![0, 11]);
}

#[test]
fn last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path());
    let mut record = SaveRecord::default();
    record.record_score(10);
    store.save(0, &record).unwrap();
    record.record_score(20);
    store.save(0, &record).unwrap();
    assert_eq!(store.load(0).high_score, 20);
    assert_eq!(store.slots(), vec![0]);
}
