//! Death Riddle -- headless entry point.
//!
//! Starts a new game, steps through the opening of the story and then drives
//! the platformer at a fixed timestep from a replay file. A short real-time
//! phase follows on the frame timer. With no window attached, the run is
//! reported through the log.

use std::path::Path;
use std::thread;
use std::time::Duration;

use dr_core::input::Key;

use dr_game::config::{load_config_from_path, GameConfig};
use dr_game::game::{Game, PlayEvent};
use dr_game::replay::{load_replay_from_path, ReplaySequence};
use dr_game::session::GameEvent;
use dr_game::sprites::SpriteLibrary;

const CONFIG_PATH: &str = "assets/config/game.json";
const REPLAY_PATH: &str = "assets/replays/demo.json";
const SPRITE_ROOT: &str = "assets/sprites";
const SPRITE_MANIFEST_PATH: &str = "assets/sprites/sprites.json";
const LEVEL_DIR: &str = "assets/levels";
const FALLBACK_TICKS: u32 = 600;
const LIVE_SECONDS: u32 = 2;

fn load_config() -> GameConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        log::warn!("Config file '{}' not found, using defaults.", path.display());
        return GameConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            log::error!("{err}; using defaults");
            GameConfig::default()
        }
    }
}

fn load_replay() -> ReplaySequence {
    let path = Path::new(REPLAY_PATH);
    if !path.exists() {
        log::warn!("Replay '{}' not found, walking right instead.", path.display());
        return ReplaySequence::walk_right(FALLBACK_TICKS);
    }
    match load_replay_from_path(path) {
        Ok(replay) => replay,
        Err(err) => {
            log::error!("{err}; walking right instead");
            ReplaySequence::walk_right(FALLBACK_TICKS)
        }
    }
}

fn load_sprites() -> Option<SpriteLibrary> {
    if !Path::new(SPRITE_ROOT).is_dir() {
        log::warn!("Sprite directory '{SPRITE_ROOT}' not found, drawing placeholders.");
        return None;
    }
    let manifest = Path::new(SPRITE_MANIFEST_PATH);
    if !manifest.exists() {
        return Some(SpriteLibrary::builtin());
    }
    match SpriteLibrary::with_manifest(manifest) {
        Ok(library) => Some(library),
        Err(err) => {
            log::error!("{err}; using built-in strips");
            Some(SpriteLibrary::builtin())
        }
    }
}

fn report_play_events(game: &mut Game) {
    for event in game.drain_events() {
        match event {
            PlayEvent::LevelLoaded { number, name } => log::info!("Level {number}: {name}"),
            other => log::debug!("{other:?}"),
        }
    }
}

/// Walk left on the wall-clock timer, the way a windowed build would tick.
fn run_live(game: &mut Game) {
    let interval = Duration::from_millis(game.time().interval_ms());
    let frames = LIVE_SECONDS * game.session().config().session.target_fps;
    game.key_down(Key::A);
    for _ in 0..frames {
        thread::sleep(interval);
        game.frame();
        report_play_events(game);
        report_session(game);
    }
    game.key_up(Key::A);

    let time = game.time();
    log::info!(
        "Live phase: {} frames, {:.1} fps ({:.2} ms/frame), {} clamped",
        time.frame_count,
        time.smoothed_fps,
        time.smoothed_frame_time_ms,
        time.clamped_frames
    );
}

fn report_session(game: &mut Game) {
    for event in game.session_mut().drain_events() {
        match event {
            GameEvent::Narrative(text) => log::info!("Story: {text}"),
            GameEvent::GameMasterSpeaks(line) => log::info!("Game Master: {line}"),
            GameEvent::RiddlePresented(prompt) => log::info!("Riddle: {}", prompt.question),
            GameEvent::RiddleResult { correct, feedback } => {
                log::info!("Riddle {}: {feedback}", if correct { "solved" } else { "failed" })
            }
            GameEvent::GameOver(ending) => log::info!("Ending: {}", ending.description()),
            other => log::debug!("{other:?}"),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Death Riddle starting...");

    let mut game = match Game::new(load_config()) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Failed to start: {err}");
            std::process::exit(1);
        }
    };
    if let Some(library) = load_sprites() {
        game = game.with_sprites(library, Path::new(SPRITE_ROOT));
    }
    if Path::new(LEVEL_DIR).is_dir() {
        game = game.with_level_dir(Path::new(LEVEL_DIR));
    }

    game.session_mut().start_new_game();
    game.session_mut().process_choice(0);
    report_session(&mut game);

    if let Err(err) = game.start_platformer() {
        log::error!("Failed to enter level 1: {err}");
        std::process::exit(1);
    }

    let replay = load_replay();
    log::info!(
        "Running {} ticks ({:.1}s simulated)",
        replay.intents().len(),
        replay.duration()
    );
    for intent in replay.intents() {
        game.step(intent, replay.fixed_dt);
        report_play_events(&mut game);
        report_session(&mut game);
    }
    run_live(&mut game);

    let frame = game.snapshot();
    let hud = frame.hud;
    log::info!(
        "Finished on '{}' in {:?}: health {}/{}, score {}, lives {}, coins {}, hints {}",
        frame.level_name,
        frame.state,
        hud.health,
        hud.max_health,
        hud.score,
        hud.lives,
        hud.coins,
        hud.hints
    );
    if let Some(prompt) = frame.riddle {
        log::info!("A riddle is still waiting: {}", prompt.question);
    }
}
