//! Infinite Galaxy headless runner: plays sessions with the autopilot at a
//! fixed 60 Hz step, with sound when a device is available.

use anyhow::{Context, Result};
use audio::AudioSystem;
use clap::Parser;
use engine_core::Time;
use game::{Autopilot, GameConfig, GameEvent, GamePhase, SaveStore, Session};
use std::path::PathBuf;
use std::time::Duration;

/// Rows and columns of the text view.
const ASCII_COLS: usize = 80;
const ASCII_ROWS: usize = 24;
/// Frames between text views.
const ASCII_EVERY: u64 = 120;

#[derive(Parser, Debug)]
#[command(name = "galaxy", version, about = "Infinite Galaxy: collect coins, mind the fuel")]
struct Args {
    /// RNG seed (defaults to the config seed, then the clock).
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation frames to run.
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// Save slot.
    #[arg(long)]
    slot: Option<u32>,
    /// Directory holding save slots.
    #[arg(long)]
    save_dir: Option<PathBuf>,
    /// Pace the loop against the wall clock instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Disable sound.
    #[arg(long)]
    mute: bool,
    /// Stop after completing this many levels.
    #[arg(long, default_value_t = 3)]
    levels: u32,
    /// Print a coarse text view every couple of seconds.
    #[arg(long)]
    ascii: bool,
    /// Config file (defaults to ./config.ron).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective config to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!("╔══════════════════════════════════════════╗");
    println!("║             INFINITE GALAXY              ║");
    println!("╠══════════════════════════════════════════╣");
    println!("║  Collect every coin before fuel runs out ║");
    println!("║  Coins refuel the tank; enemies hurt     ║");
    println!("║  The bomb clears the sky, then recharges ║");
    println!("╚══════════════════════════════════════════╝");

    let config_path = args.config.clone().unwrap_or_else(GameConfig::default_path);
    let config = GameConfig::load_from(&config_path);
    if args.write_config {
        config
            .save_to(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    let slot = args.slot.unwrap_or(config.save_slot);
    let store = SaveStore::new(args.save_dir.clone().unwrap_or_else(|| config.save_dir.clone()));
    let record = store.load(slot);
    log::info!("Seed {seed}, save slot {slot} in {:?}", store.dir());

    let mut audio = if args.mute || !config.audio_enabled || !record.settings.sfx_enabled {
        log::info!("Sound disabled");
        None
    } else {
        AudioSystem::try_new()
    };
    if let Some(audio) = audio.as_mut() {
        audio.set_master_volume(record.settings.master_volume as f64);
        if let Err(e) = audio.preload() {
            log::warn!("Could not prepare sounds: {e:#}");
        }
    }

    let mut session = Session::new(config, record, seed).with_store(store, slot);
    let pilot = Autopilot::default();
    let mut time = Time::new();
    let dt = time.fixed_timestep_seconds();
    let mut levels_done = 0;
    session.start();

    for _ in 0..args.frames {
        if args.realtime {
            std::thread::sleep(time.fixed_timestep());
            time.update();
        } else {
            time.advance(time.fixed_timestep());
        }

        while time.should_fixed_update() {
            let input = pilot.decide(&session);
            session.tick(&input, dt);
        }

        for event in session.drain_events() {
            report(&event);
            if let (Some(audio), Some(effect)) = (audio.as_mut(), event.sound()) {
                let pan = event.position().map_or(0.5, |p| session.camera().pan_of(p));
                if let Err(e) = audio.play_effect(effect, pan) {
                    log::debug!("Sound failed: {e:#}");
                }
            }
        }
        if let Some(audio) = audio.as_mut() {
            audio.cleanup();
        }

        if args.ascii && time.frame_count() % ASCII_EVERY == 0 {
            println!("{}", session.scene().ascii(ASCII_COLS, ASCII_ROWS));
            if session.save().settings.show_fps {
                println!("FPS {:.0}", time.fps());
            }
        }

        match session.phase() {
            GamePhase::LevelComplete => {
                levels_done += 1;
                if levels_done >= args.levels {
                    break;
                }
                session.next_level();
            }
            GamePhase::GameOver(_) => break,
            _ => {}
        }
    }

    session.persist().context("writing final save")?;
    if let Some(audio) = audio.as_mut() {
        // Let the last cue ring out
        if args.realtime {
            std::thread::sleep(Duration::from_millis(500));
        }
        audio.stop_all();
    }

    let save = session.save();
    println!();
    println!("Run finished after {:.1}s of play", session.elapsed());
    println!("  Phase:        {:?}", session.phase());
    println!("  Level:        {}", session.level());
    println!("  Score:        {}", session.score());
    println!("  High score:   {}", save.high_score);
    println!("  Best level:   {}", save.high_level);
    println!("  Total coins:  {}", save.total_coins);
    println!("  Achievements: {}", save.achievements.join(", "));
    Ok(())
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::LevelStarted { level, sector } => log::info!("Entering {sector} (level {level})"),
        GameEvent::CoinCollected { kind, value, .. } => log::debug!("+{value} ({})", kind.name()),
        GameEvent::CoinHit { hits, required, .. } => log::debug!("Coin hit {hits}/{required}"),
        GameEvent::LevelComplete { level, score, bonus } => {
            log::info!("Level {level} cleared, score {score} (bonus {bonus})")
        }
        GameEvent::GameOver { reason, score } => log::info!("{} - final score {score}", reason.describe()),
        GameEvent::EnemySpawned { behavior, .. } => log::debug!("Enemy ({}) inbound", behavior.name()),
        GameEvent::BombUsed { cleared } => log::info!("Bomb cleared {cleared} enemies"),
        GameEvent::BombNotReady { remaining } => log::debug!("Bomb not ready ({remaining:.1}s)"),
        GameEvent::PlayerHit { health, .. } => log::info!("Hit! Hull at {health:.0}"),
        GameEvent::FuelLow { fuel } => log::warn!("Fuel low ({fuel:.0})"),
        GameEvent::AchievementUnlocked(id) => log::info!("Achievement: {} - {}", id.title(), id.description()),
        GameEvent::ObjectiveComplete { objective, bonus } => log::info!("Objective {objective:?} +{bonus}"),
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
