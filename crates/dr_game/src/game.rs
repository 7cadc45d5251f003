//! Frame driver: runs the platformer on top of a [`Session`].
//!
//! One tick runs in a fixed order:
//!
//!   1. respawn countdown
//!   2. input -> movement intent
//!   3. gravity and integration
//!   4. tile collision resolution
//!   5. tile effects (coins, key, spikes, checkpoints, goal)
//!   6. enemy contact, which may open a riddle and end the tick early
//!   7. enemy patrol and removal of finished corpses
//!   8. player death bookkeeping
//!
//! Nothing ticks while paused, while a riddle is open, or while the retry or
//! victory screen is up.

use dr_core::input::{InputState, Key, MoveIntent};
use dr_core::time::TimeState;
use glam::Vec2;
use std::path::{Path, PathBuf};

use crate::collision::{first_enemy_contact, resolve_tiles, tile_contacts};
use crate::config::GameConfig;
use crate::enemy::EnemyKind;
use crate::level::{load_level_from_path, Level, LevelEvent, TileType};
use crate::levels::{build_level, LEVEL_COUNT};
use crate::player::{MovementMode, PlayerEvent, PLAYER_SIZE};
use crate::session::{RiddleOutcome, RiddleSource, Session, SessionState};
use crate::snapshot::RenderFrame;
use crate::sprites::SpriteLibrary;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayEvent {
    LevelLoaded { number: u32, name: String },
    LevelComplete { number: u32, score: i32 },
    CoinCollected { remaining: i32 },
    CheckpointActivated { position: Vec2 },
    KeyFound,
    GoalLocked,
    EnemyDefeated { kind: EnemyKind, position: Vec2 },
    PlayerDied { lives_left: i32 },
    PlayerRespawned,
    RetryScreen { highest_score: i32 },
    Victory { score: i32 },
    Paused(bool),
}

pub struct Game {
    session: Session,
    level: Level,
    input: InputState,
    time: TimeState,
    sprites: Option<(SpriteLibrary, PathBuf)>,
    level_dir: Option<PathBuf>,
    has_key: bool,
    touching_locked_goal: bool,
    jump_held: bool,
    respawn_in: Option<f32>,
    show_retry: bool,
    show_victory: bool,
    highest_score: i32,
    events: Vec<PlayEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, String> {
        let level = build_level(1, &config.combat)?;
        let time = TimeState::new(config.session.target_fps, config.session.max_dt as f64);
        Ok(Self {
            session: Session::new(config),
            level,
            input: InputState::new(),
            time,
            sprites: None,
            level_dir: None,
            has_key: false,
            touching_locked_goal: false,
            jump_held: false,
            respawn_in: None,
            show_retry: false,
            show_victory: false,
            highest_score: 0,
            events: Vec::new(),
        })
    }

    /// Animate the player and every enemy from strips under `root`.
    pub fn with_sprites(mut self, library: SpriteLibrary, root: &Path) -> Self {
        let animations = library.player_animations(root);
        self.session.player_mut().set_animations(animations);
        self.sprites = Some((library, root.to_path_buf()));
        self.attach_enemy_sprites();
        self
    }

    /// JSON files named `level_<n>.json` in `dir` replace the built-in layouts.
    pub fn with_level_dir(mut self, dir: &Path) -> Self {
        self.level_dir = Some(dir.to_path_buf());
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn is_retry_screen(&self) -> bool {
        self.show_retry
    }

    pub fn is_victory_screen(&self) -> bool {
        self.show_victory
    }

    pub fn highest_score(&self) -> i32 {
        self.highest_score
    }

    pub fn time(&self) -> &TimeState {
        &self.time
    }

    pub fn drain_events(&mut self) -> Vec<PlayEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RenderFrame {
        RenderFrame::capture(self)
    }

    /// Enter platformer play on level 1, keeping the player's statistics.
    pub fn start_platformer(&mut self) -> Result<(), String> {
        self.show_retry = false;
        self.show_victory = false;
        self.respawn_in = None;
        self.load_level(1)?;
        self.session.continue_game();
        self.resume();
        Ok(())
    }

    /// Start over from level 1 with a fresh player.
    pub fn retry(&mut self) -> Result<(), String> {
        self.session.player_mut().reset();
        log::info!("Retrying from level 1");
        self.start_platformer()
    }

    pub fn return_to_menu(&mut self) {
        self.show_retry = false;
        self.show_victory = false;
        self.respawn_in = None;
        self.input.clear();
        self.session.end_game();
    }

    pub fn load_level(&mut self, number: u32) -> Result<(), String> {
        let level = match self.level_file(number) {
            Some(path) => load_level_from_path(&path, &self.session.config().combat)?,
            None => build_level(number, &self.session.config().combat)?,
        };
        self.play_level(level);
        Ok(())
    }

    /// Swap in an already built level and put the player at its spawn.
    pub fn play_level(&mut self, level: Level) {
        self.level = level;
        self.has_key = false;
        self.touching_locked_goal = false;
        self.jump_held = false;
        self.attach_enemy_sprites();

        let spawn = self.level.spawn_point;
        let mode = self.level.mode;
        let player = self.session.player_mut();
        player.set_mode(mode);
        player.teleport(spawn);
        player.set_grounded(false);

        log::info!("Loaded level {}: {}", self.level.number, self.level.name);
        self.events.push(PlayEvent::LevelLoaded {
            number: self.level.number,
            name: self.level.name.clone(),
        });
    }

    fn level_file(&self, number: u32) -> Option<PathBuf> {
        let path = self.level_dir.as_ref()?.join(format!("level_{number}.json"));
        path.is_file().then_some(path)
    }

    fn attach_enemy_sprites(&mut self) {
        let Some((library, root)) = &self.sprites else {
            return;
        };
        for enemy in self.level.enemies_mut() {
            enemy.set_animations(library.enemy_animations(enemy.kind(), root));
        }
    }

    // --- input ---

    /// The retry and victory screens only listen for their own keys.
    pub fn key_down(&mut self, key: Key) {
        if self.show_victory || self.show_retry {
            let restart = if self.show_victory { Key::Space } else { Key::R };
            if key == restart {
                if let Err(e) = self.retry() {
                    log::error!("Failed to restart: {e}");
                }
            } else if key == Key::Escape {
                self.return_to_menu();
            }
            return;
        }

        self.input.key_down(key);
        if matches!(key, Key::P | Key::Escape) {
            if self.session.is_paused() {
                self.resume();
            } else {
                self.pause();
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Suspend ticking. Held keys and horizontal motion do not survive a pause.
    pub fn pause(&mut self) {
        self.session.pause();
        self.input.clear();
        self.session.player_mut().velocity.x = 0.0;
        self.events.push(PlayEvent::Paused(true));
    }

    pub fn resume(&mut self) {
        self.session.resume();
        self.input.clear();
        self.time.resync();
        self.events.push(PlayEvent::Paused(false));
    }

    // --- riddles ---

    pub fn answer_riddle(&mut self, answer: &str) -> Option<RiddleOutcome> {
        let outcome = self.session.submit_answer(answer)?;
        if let RiddleSource::Enemy(index) = outcome.source {
            if let Some(enemy) = self.level.enemies_mut().get_mut(index) {
                if outcome.correct {
                    enemy.die();
                } else {
                    enemy.take_damage();
                }
            }
            self.collect_level_events();
            self.after_prompt();
        }
        self.handle_player_events();
        Some(outcome)
    }

    pub fn cancel_riddle(&mut self) -> bool {
        if self.session.cancel_riddle().is_none() {
            return false;
        }
        self.after_prompt();
        true
    }

    pub fn request_hint(&mut self) -> Option<String> {
        let hint = self.session.request_hint();
        self.handle_player_events();
        hint
    }

    /// Play resumes with no carried-over input and no time spike.
    fn after_prompt(&mut self) {
        self.input.clear();
        self.jump_held = false;
        self.session.player_mut().velocity.x = 0.0;
        self.time.resync();
    }

    // --- simulation ---

    fn is_running(&self) -> bool {
        self.session.state() == SessionState::Playing
            && !self.session.is_paused()
            && !self.show_retry
            && !self.show_victory
    }

    /// One timer callback: measure wall time, tick with the held keys.
    pub fn frame(&mut self) {
        if !self.is_running() {
            self.input.end_frame();
            return;
        }
        let dt = self.time.begin_frame();
        let intent = self.input.move_intent();
        self.step(intent, dt);
        self.input.end_frame();
    }

    /// Advance the simulation by `dt` seconds with the given intent.
    pub fn step(&mut self, intent: MoveIntent, dt: f32) {
        if !self.is_running() {
            return;
        }

        self.tick_respawn(dt);
        self.apply_intent(intent, dt);

        let player = self.session.player_mut();
        player.apply_gravity(dt);
        player.update(dt);

        self.resolve_collisions();

        if !self.session.player().is_dead() && self.apply_tile_effects() {
            return;
        }
        if !self.session.player().is_dead() && self.check_enemy_contact() {
            return;
        }

        // Corpses keep animating so the death clip can finish.
        for enemy in self.level.enemies_mut() {
            enemy.update(dt);
        }
        self.level.remove_finished_enemies();

        self.collect_level_events();
        self.handle_player_events();
    }

    fn apply_intent(&mut self, intent: MoveIntent, dt: f32) {
        let player = self.session.player_mut();
        match player.mode() {
            MovementMode::TopDown => {
                let direction = Vec2::new(intent.horizontal() as f32, intent.vertical() as f32);
                player.walk(direction);
            }
            MovementMode::Platformer => {
                match intent.horizontal() {
                    -1 => player.move_left(dt),
                    1 => player.move_right(dt),
                    _ => player.stop_horizontal(),
                }
                // Holding jump re-jumps on landing but never spends the air jump.
                if intent.jump && (!self.jump_held || player.is_grounded()) {
                    player.jump();
                }
            }
        }
        self.jump_held = intent.jump;
    }

    fn resolve_collisions(&mut self) {
        let player = self.session.player_mut();
        let result = resolve_tiles(
            &self.level,
            player.position,
            player.velocity,
            PLAYER_SIZE,
            player.mode(),
        );
        player.position = result.position;
        player.velocity = result.velocity;
        if player.mode() == MovementMode::Platformer {
            player.set_grounded(result.grounded);
        }
    }

    /// Returns true when the level changed and the rest of the tick is stale.
    fn apply_tile_effects(&mut self) -> bool {
        let combat = self.session.config().combat;
        let body = self.session.player().bounding_box();
        let mut touching_locked_goal = false;

        for (pos, kind) in tile_contacts(&self.level, &body) {
            match kind {
                TileType::Coin => {
                    if self.level.collect_coin(pos) {
                        self.session.player_mut().collect_coin(combat.coin_score);
                    }
                }
                TileType::Key => {
                    if self.level.take_key(pos) {
                        self.has_key = true;
                        self.session.player_mut().add_score(combat.key_score);
                        log::info!("Key found on level {}", self.level.number);
                        self.events.push(PlayEvent::KeyFound);
                    }
                }
                TileType::Spike => {
                    let before = self.session.player().health();
                    let spawn = self.level.spawn_point;
                    let player = self.session.player_mut();
                    player.take_damage(combat.spike_damage);
                    player.teleport(spawn);
                    self.session.notice_health_change(before);
                    // Remaining contacts belong to the old position.
                    break;
                }
                TileType::Checkpoint => {
                    self.level.activate_checkpoint(pos);
                }
                TileType::Goal => {
                    if self.level.goal_requires_key && !self.has_key {
                        touching_locked_goal = true;
                    } else {
                        self.complete_level();
                        return true;
                    }
                }
                // Enemies carry the riddles now; trigger tiles are inert.
                TileType::RiddleTrigger => {}
                _ => {}
            }
        }

        if touching_locked_goal && !self.touching_locked_goal {
            self.events.push(PlayEvent::GoalLocked);
        }
        self.touching_locked_goal = touching_locked_goal;
        false
    }

    /// Returns true when a riddle opened.
    fn check_enemy_contact(&mut self) -> bool {
        let body = self.session.player().bounding_box();
        let Some(index) = first_enemy_contact(&self.level, &body) else {
            return false;
        };
        let Some(enemy) = self.level.enemies_mut().get_mut(index) else {
            return false;
        };
        enemy.mark_riddle_triggered();
        let Some(riddle) = enemy.riddle_id() else {
            return false;
        };
        if !self.session.open_enemy_riddle(index, riddle) {
            return false;
        }
        self.input.clear();
        self.jump_held = false;
        self.session.player_mut().velocity.x = 0.0;
        true
    }

    fn complete_level(&mut self) {
        // Flush before the level is swapped out.
        self.collect_level_events();
        self.level.set_complete(true);
        let number = self.level.number;
        let score = self.session.player().score();
        log::info!("Level {number} complete, score {score}");
        self.events.push(PlayEvent::LevelComplete { number, score });

        if number < LEVEL_COUNT {
            self.input.clear();
            self.session.player_mut().velocity.x = 0.0;
            if let Err(e) = self.load_level(number + 1) {
                log::error!("Failed to load level {}: {e}", number + 1);
                self.return_to_menu();
                return;
            }
            self.time.resync();
        } else {
            self.highest_score = self.highest_score.max(score);
            self.show_victory = true;
            self.input.clear();
            log::info!("All levels cleared with score {score}");
            self.events.push(PlayEvent::Victory { score });
        }
    }

    fn tick_respawn(&mut self, dt: f32) {
        let Some(remaining) = self.respawn_in.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.respawn_in = None;
            let spawn = self.level.spawn_point;
            self.session.player_mut().respawn(spawn);
        }
    }

    fn collect_level_events(&mut self) {
        for event in self.level.drain_events() {
            self.events.push(match event {
                LevelEvent::CoinCollected { remaining } => PlayEvent::CoinCollected { remaining },
                LevelEvent::CheckpointActivated { position } => {
                    PlayEvent::CheckpointActivated { position }
                }
                LevelEvent::EnemyDefeated { kind, position } => {
                    PlayEvent::EnemyDefeated { kind, position }
                }
            });
        }
    }

    fn handle_player_events(&mut self) {
        for event in self.session.player_mut().drain_events() {
            match event {
                PlayerEvent::Died { lives_left } => {
                    self.events.push(PlayEvent::PlayerDied { lives_left });
                    if lives_left > 0 {
                        self.respawn_in = Some(self.session.config().session.respawn_delay);
                    } else {
                        self.enter_retry_screen();
                    }
                }
                PlayerEvent::Respawned => self.events.push(PlayEvent::PlayerRespawned),
            }
        }
    }

    fn enter_retry_screen(&mut self) {
        let score = self.session.player().score();
        self.highest_score = self.highest_score.max(score);
        self.respawn_in = None;
        self.show_retry = true;
        self.input.clear();
        self.session.player_mut().velocity.x = 0.0;
        self.session.set_state(SessionState::GameOver);
        log::info!("Out of lives, highest score {}", self.highest_score);
        self.events.push(PlayEvent::RetryScreen {
            highest_score: self.highest_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{Enemy, EnemyKind};
    use crate::player::PlayerState;
    use crate::replay::ReplaySequence;

    const DT: f32 = 1.0 / 60.0;

    fn playing() -> Game {
        let mut game = Game::new(GameConfig::default()).expect("game");
        game.session_mut().start_new_game();
        game.start_platformer().expect("level 1");
        game.drain_events();
        game
    }

    fn idle(game: &mut Game, ticks: usize) {
        for _ in 0..ticks {
            game.step(MoveIntent::default(), DT);
        }
    }

    /// Floor on row 4, spawn standing on it at column 1.
    fn flat_level(rows: &[&str]) -> Level {
        let mut level = Level::from_rows(1, rows).expect("map");
        level.spawn_point = Vec2::new(32.0, 96.0);
        level
    }

    #[test]
    fn player_settles_on_level_one_floor() {
        let mut game = playing();
        idle(&mut game, 120);
        let player = game.session().player();
        assert!(player.is_grounded());
        assert_eq!(player.position.y, 544.0 - 32.0);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn spike_at_low_health_kills_and_respawns_later() {
        let mut game = playing();
        game.play_level(flat_level(&[
            "........",
            "........",
            "........",
            "...^....",
            "########",
        ]));
        let before = game.session().player().health();
        game.session_mut().player_mut().take_damage(80);
        game.session_mut().notice_health_change(before);
        game.session_mut().player_mut().set_grounded(true);
        game.session_mut().player_mut().position = Vec2::new(96.0, 96.0);
        game.session_mut().player_mut().drain_events();
        game.drain_events();

        game.step(MoveIntent::default(), DT);
        let player = game.session().player();
        assert_eq!(player.health(), 0);
        assert!(player.is_dead());
        assert_eq!(player.position, Vec2::new(32.0, 96.0));
        assert!(game
            .drain_events()
            .contains(&PlayEvent::PlayerDied { lives_left: 2 }));

        // Respawn waits for the delay in simulated time.
        idle(&mut game, 30);
        assert!(game.session().player().is_dead());
        idle(&mut game, 40);
        assert!(!game.session().player().is_dead());
        assert_eq!(game.session().player().health(), 100);
    }

    #[test]
    fn last_life_lost_shows_retry_screen() {
        let mut game = playing();
        game.session_mut().player_mut().add_score(700);
        for life in 0..3 {
            if life > 0 {
                game.respawn_in = None;
                game.session_mut().player_mut().respawn(Vec2::new(64.0, 500.0));
            }
            game.session_mut().player_mut().take_damage(100);
            game.handle_player_events();
        }
        assert!(game.is_retry_screen());
        assert_eq!(game.session().state(), SessionState::GameOver);
        assert_eq!(game.highest_score(), 700);

        // Movement keys are ignored on the retry screen; R restarts.
        game.key_down(Key::D);
        assert!(!game.input.is_held(Key::D));
        game.key_down(Key::R);
        assert!(!game.is_retry_screen());
        assert_eq!(game.session().state(), SessionState::Playing);
        assert_eq!(game.session().player().lives(), 3);
        assert_eq!(game.session().player().score(), 0);
    }

    #[test]
    fn coins_are_collected_once() {
        let mut game = playing();
        game.play_level(flat_level(&[
            "........",
            "........",
            "........",
            "..o.....",
            "########",
        ]));
        game.session_mut().player_mut().position = Vec2::new(60.0, 96.0);
        idle(&mut game, 5);
        assert_eq!(game.session().player().coins(), 1);
        assert_eq!(game.session().player().score(), 100);
        assert_eq!(game.level().coins_remaining(), 0);
        let coin_events = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlayEvent::CoinCollected { .. }))
            .count();
        assert_eq!(coin_events, 1);
    }

    #[test]
    fn goal_advances_to_next_level() {
        let mut game = playing();
        game.play_level(flat_level(&[
            "........",
            "........",
            "........",
            "..G.....",
            "########",
        ]));
        game.session_mut().player_mut().position = Vec2::new(60.0, 96.0);
        game.step(MoveIntent::default(), DT);
        assert_eq!(game.level().number, 2);
        let events = game.drain_events();
        assert!(events.contains(&PlayEvent::LevelComplete { number: 1, score: 0 }));
        assert!(matches!(events.last(), Some(PlayEvent::LevelLoaded { number: 2, .. })));
    }

    #[test]
    fn maze_goal_needs_the_key() {
        let mut game = playing();
        game.load_level(6).expect("maze");
        assert_eq!(game.session().player().mode(), MovementMode::TopDown);
        game.drain_events();

        // Goal at (27, 17), key at (15, 10).
        game.session_mut().player_mut().position = Vec2::new(27.0 * 32.0, 17.0 * 32.0);
        game.step(MoveIntent::default(), DT);
        game.step(MoveIntent::default(), DT);
        assert_eq!(game.level().number, 6);
        let locked = game
            .drain_events()
            .into_iter()
            .filter(|e| *e == PlayEvent::GoalLocked)
            .count();
        assert_eq!(locked, 1);

        game.session_mut().player_mut().position = Vec2::new(15.0 * 32.0, 10.0 * 32.0);
        game.step(MoveIntent::default(), DT);
        assert!(game.has_key());
        assert_eq!(game.session().player().score(), 1000);

        game.session_mut().player_mut().position = Vec2::new(27.0 * 32.0, 17.0 * 32.0);
        game.step(MoveIntent::default(), DT);
        assert!(game.is_victory_screen());
        assert_eq!(game.highest_score(), 1000);
    }

    #[test]
    fn enemy_contact_opens_riddle_and_answer_kills_enemy() {
        let mut game = playing();
        let mut level = flat_level(&[
            "........",
            "........",
            "........",
            "........",
            "########",
        ]);
        level.add_enemy(Enemy::new(EnemyKind::PinkMonster, Vec2::new(64.0, 96.0), Some(0)));
        game.play_level(level);
        game.session_mut().player_mut().position = Vec2::new(50.0, 96.0);

        game.step(MoveIntent::default(), DT);
        assert_eq!(game.session().state(), SessionState::RiddleActive);
        let prompt = game.snapshot().riddle.expect("prompt");
        assert_eq!(prompt.source, RiddleSource::Enemy(0));

        // Ticks are suspended while the prompt is open.
        let x = game.level().enemies()[0].position.x;
        idle(&mut game, 10);
        assert_eq!(game.level().enemies()[0].position.x, x);

        let outcome = game.answer_riddle("Keyboard").expect("outcome");
        assert!(outcome.correct);
        assert!(game.level().enemies()[0].is_dead());
        assert_eq!(game.session().player().score(), 500);
        assert_eq!(game.session().state(), SessionState::Playing);
        let defeated = |events: Vec<PlayEvent>| {
            events
                .into_iter()
                .filter(|e| matches!(e, PlayEvent::EnemyDefeated { .. }))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            defeated(game.drain_events()),
            vec![PlayEvent::EnemyDefeated {
                kind: EnemyKind::PinkMonster,
                position: Vec2::new(64.0, 96.0),
            }]
        );

        // No clip for the death animation, so the corpse goes next tick.
        game.step(MoveIntent::default(), DT);
        assert!(game.level().enemies().is_empty());
        assert!(defeated(game.drain_events()).is_empty());
    }

    #[test]
    fn wrong_enemy_answer_hurts_both() {
        let mut game = playing();
        let mut level = flat_level(&["........", "........", "........", "........", "########"]);
        level.add_enemy(Enemy::new(EnemyKind::OwletMonster, Vec2::new(64.0, 96.0), Some(1)));
        game.play_level(level);
        game.session_mut().player_mut().position = Vec2::new(50.0, 96.0);
        game.step(MoveIntent::default(), DT);

        let outcome = game.answer_riddle("nope").expect("outcome");
        assert!(!outcome.correct);
        assert_eq!(game.session().player().health(), 75);
        assert_eq!(
            game.level().enemies()[0].state(),
            crate::enemy::EnemyState::Hurt
        );
        // Triggered enemies do not reopen the prompt.
        game.step(MoveIntent::default(), DT);
        assert_eq!(game.session().state(), SessionState::Playing);
    }

    #[test]
    fn pause_clears_keys_and_motion() {
        let mut game = playing();
        game.key_down(Key::D);
        game.session_mut().player_mut().velocity.x = 120.0;
        game.key_down(Key::P);
        assert!(game.session().is_paused());
        assert!(!game.input.is_held(Key::D));
        assert_eq!(game.session().player().velocity.x, 0.0);

        let before = game.session().player().position;
        game.step(MoveIntent { right: true, ..MoveIntent::default() }, DT);
        assert_eq!(game.session().player().position, before);

        game.key_down(Key::P);
        assert!(!game.session().is_paused());
    }

    #[test]
    fn frame_ticks_held_keys_on_the_wall_clock() {
        let mut game = playing();
        let start = game.session().player().position.x;
        game.key_down(Key::D);
        for _ in 0..5 {
            std::thread::sleep(std::time::Duration::from_millis(2));
            game.frame();
        }
        assert_eq!(game.time().frame_count, 5);
        assert!(game.time().total_time > 0.0);
        assert!(game.session().player().position.x > start);

        game.key_down(Key::P);
        game.frame();
        assert_eq!(game.time().frame_count, 5);
    }

    #[test]
    fn holding_jump_does_not_spend_double_jump() {
        let mut game = playing();
        idle(&mut game, 120);
        let jump = MoveIntent { jump: true, ..MoveIntent::default() };
        for _ in 0..10 {
            game.step(jump, DT);
        }
        assert!(game.session().player().has_double_jump());
        game.step(MoveIntent::default(), DT);
        game.step(jump, DT);
        assert!(!game.session().player().has_double_jump());
    }

    #[test]
    fn same_replay_same_outcome() {
        let replay = ReplaySequence::walk_right(180);
        let run = || {
            let mut game = playing();
            for intent in replay.intents() {
                game.step(intent, replay.fixed_dt);
            }
            let player = game.session().player();
            (player.position, player.velocity, player.score(), player.health())
        };
        assert_eq!(run(), run());
    }
}
