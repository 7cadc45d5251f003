//! The player: a physics body plus the run's vital statistics.
//!
//! One aggregate serves both the platformer and the riddle dialogue, so health
//! lost to a spike and health lost to a wrong answer come out of the same pool.

use dr_core::animation::{AnimationKey, AnimationSet};
use dr_core::geometry::Rect;
use glam::Vec2;

use crate::config::PlayerPhysics;

pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// |vx| above this counts as running.
const RUN_THRESHOLD: f32 = 1.0;
/// Friction snaps |vx| below this to zero.
const STOP_EPSILON: f32 = 0.1;
const HURT_TIME: f32 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovementMode {
    #[default]
    Platformer,
    /// Four-directional walking, no gravity and no grounded state.
    TopDown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlayerState {
    #[default]
    Idle,
    RunningLeft,
    RunningRight,
    Jumping,
    Falling,
    Hurt,
    Dead,
}

pub const PLAYER_STATE_COUNT: usize = 7;

impl PlayerState {
    pub const ALL: [PlayerState; PLAYER_STATE_COUNT] = [
        PlayerState::Idle,
        PlayerState::RunningLeft,
        PlayerState::RunningRight,
        PlayerState::Jumping,
        PlayerState::Falling,
        PlayerState::Hurt,
        PlayerState::Dead,
    ];
}

impl AnimationKey for PlayerState {
    fn slot(self) -> usize {
        self as usize
    }
}

pub type PlayerAnimations = AnimationSet<PlayerState, PLAYER_STATE_COUNT>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Died { lives_left: i32 },
    Respawned,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    spawn_point: Vec2,
    state: PlayerState,
    grounded: bool,
    can_jump: bool,
    facing_right: bool,
    has_double_jump: bool,
    double_jump_cooldown: f32,
    hurt_timer: f32,
    mode: MovementMode,

    health: i32,
    max_health: i32,
    lives: i32,
    score: i32,
    coins: i32,
    riddles_solved: i32,
    failed_attempts: i32,
    pub name: String,

    physics: PlayerPhysics,
    animations: PlayerAnimations,
    events: Vec<PlayerEvent>,
}

impl Player {
    pub fn new(physics: PlayerPhysics) -> Self {
        Self {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
            spawn_point: Vec2::new(100.0, 100.0),
            state: PlayerState::Idle,
            grounded: false,
            can_jump: true,
            facing_right: true,
            has_double_jump: true,
            double_jump_cooldown: 0.0,
            hurt_timer: 0.0,
            mode: MovementMode::Platformer,
            health: physics.max_health,
            max_health: physics.max_health,
            lives: physics.starting_lives,
            score: 0,
            coins: 0,
            riddles_solved: 0,
            failed_attempts: 0,
            name: "Player".to_string(),
            physics,
            animations: PlayerAnimations::new(),
            events: Vec::new(),
        }
    }

    pub fn with_animations(mut self, animations: PlayerAnimations) -> Self {
        self.set_animations(animations);
        self
    }

    pub fn set_animations(&mut self, animations: PlayerAnimations) {
        self.animations = animations;
        self.animations.restart(self.state);
    }

    /// Back to a fresh run: full health, starting lives, zeroed tallies.
    pub fn reset(&mut self) {
        let animations = std::mem::take(&mut self.animations);
        let name = std::mem::take(&mut self.name);
        *self = Player::new(self.physics).with_animations(animations);
        self.name = name;
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::at(self.position, PLAYER_SIZE)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MovementMode) {
        self.mode = mode;
        if mode == MovementMode::TopDown {
            self.grounded = false;
            self.velocity = Vec2::ZERO;
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_double_jump(&self) -> bool {
        self.has_double_jump
    }

    pub fn double_jump_cooldown(&self) -> f32 {
        self.double_jump_cooldown
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn coins(&self) -> i32 {
        self.coins
    }

    pub fn riddles_solved(&self) -> i32 {
        self.riddles_solved
    }

    pub fn failed_attempts(&self) -> i32 {
        self.failed_attempts
    }

    pub fn animations(&self) -> &PlayerAnimations {
        &self.animations
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.animations.restart(state);
        }
    }

    fn can_steer(&self) -> bool {
        !matches!(self.state, PlayerState::Dead | PlayerState::Hurt)
    }

    pub fn move_left(&mut self, dt: f32) {
        if self.is_dead() {
            return;
        }
        self.velocity.x = (self.velocity.x - self.physics.accel_x * dt).max(-self.physics.max_speed_x);
        self.facing_right = false;
        if self.can_steer() && self.grounded {
            self.set_state(PlayerState::RunningLeft);
        }
    }

    pub fn move_right(&mut self, dt: f32) {
        if self.is_dead() {
            return;
        }
        self.velocity.x = (self.velocity.x + self.physics.accel_x * dt).min(self.physics.max_speed_x);
        self.facing_right = true;
        if self.can_steer() && self.grounded {
            self.set_state(PlayerState::RunningRight);
        }
    }

    /// Friction toward zero while no direction is held.
    pub fn stop_horizontal(&mut self) {
        self.velocity.x *= self.physics.friction;
        if self.velocity.x.abs() < STOP_EPSILON {
            self.velocity.x = 0.0;
        }
        if self.grounded && self.can_steer() && self.velocity.x.abs() < RUN_THRESHOLD {
            self.set_state(PlayerState::Idle);
        }
    }

    /// Top-down walking: constant speed along `direction`, no inertia.
    pub fn walk(&mut self, direction: Vec2) {
        if self.is_dead() {
            return;
        }
        self.velocity = direction * self.physics.top_down_speed;
        if direction.x < 0.0 {
            self.facing_right = false;
        } else if direction.x > 0.0 {
            self.facing_right = true;
        }
    }

    /// Ground jump, or the single air jump when it is off cooldown. Returns
    /// whether an impulse was applied.
    pub fn jump(&mut self) -> bool {
        if self.mode == MovementMode::TopDown || !self.can_steer() {
            return false;
        }
        if self.grounded && self.can_jump {
            self.grounded = false;
            self.can_jump = false;
        } else if !self.grounded && self.has_double_jump && self.double_jump_cooldown <= 0.0 {
            self.has_double_jump = false;
            self.double_jump_cooldown = self.physics.double_jump_cooldown;
        } else {
            return false;
        }
        self.velocity.y = self.physics.jump_velocity;
        if self.state == PlayerState::Jumping {
            self.animations.restart(PlayerState::Jumping);
        } else {
            self.set_state(PlayerState::Jumping);
        }
        true
    }

    pub fn apply_gravity(&mut self, dt: f32) {
        if self.grounded || self.is_dead() || self.mode == MovementMode::TopDown {
            return;
        }
        self.velocity.y = (self.velocity.y + self.physics.gravity * dt).min(self.physics.max_speed_y);
    }

    /// Integrate one tick: cooldowns, position, bounds and state selection.
    pub fn update(&mut self, dt: f32) {
        self.animations.update(self.state, dt);

        if self.double_jump_cooldown > 0.0 {
            self.double_jump_cooldown = (self.double_jump_cooldown - dt).max(0.0);
        }

        if self.is_dead() {
            return;
        }

        if self.hurt_timer > 0.0 {
            self.hurt_timer -= dt;
            if self.hurt_timer <= 0.0 {
                self.hurt_timer = 0.0;
                self.set_state(PlayerState::Idle);
            }
        }

        let mut next = self.position + self.velocity * dt;
        if next.x < 0.0 {
            next.x = 0.0;
            self.velocity.x = 0.0;
        }
        self.position = next;

        if self.position.y > self.physics.fall_death_y {
            log::info!("Player fell out of the world at y={:.1}", self.position.y);
            self.take_damage(self.health);
            return;
        }

        let max_y = self.physics.max_speed_y;
        self.velocity.y = self.velocity.y.clamp(-max_y, max_y);

        if self.state == PlayerState::Hurt {
            return;
        }
        let next_state = match self.mode {
            MovementMode::TopDown => {
                directional_state(self.velocity.x, self.velocity.length(), self.facing_right)
            }
            MovementMode::Platformer if !self.grounded => {
                if self.velocity.y < 0.0 {
                    PlayerState::Jumping
                } else if self.velocity.y > 0.0 {
                    PlayerState::Falling
                } else {
                    self.state
                }
            }
            MovementMode::Platformer => {
                directional_state(self.velocity.x, self.velocity.x.abs(), self.facing_right)
            }
        };
        self.set_state(next_state);
    }

    /// Landing zeroes the fall and restores both jumps.
    pub fn set_grounded(&mut self, grounded: bool) {
        let was_grounded = self.grounded;
        self.grounded = grounded;
        if grounded && !was_grounded {
            self.velocity.y = 0.0;
            self.can_jump = true;
            self.has_double_jump = true;
        }
    }

    /// Health floors at zero; reaching zero kills. Ignored once dead.
    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 || self.is_dead() {
            return;
        }
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.die();
        } else if self.state != PlayerState::Hurt {
            self.hurt_timer = HURT_TIME;
            self.set_state(PlayerState::Hurt);
        }
    }

    /// Capped at this player's `max_health`.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 || self.is_dead() {
            return;
        }
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn die(&mut self) {
        if self.is_dead() {
            return;
        }
        self.health = 0;
        self.velocity = Vec2::ZERO;
        self.hurt_timer = 0.0;
        self.lives -= 1;
        self.set_state(PlayerState::Dead);
        log::info!("Player died, {} lives left", self.lives);
        self.events.push(PlayerEvent::Died {
            lives_left: self.lives,
        });
    }

    pub fn respawn(&mut self, spawn: Vec2) {
        self.spawn_point = spawn;
        self.position = spawn;
        self.velocity = Vec2::ZERO;
        self.health = self.max_health;
        self.grounded = false;
        self.hurt_timer = 0.0;
        self.set_state(PlayerState::Idle);
        log::debug!("Player respawned at ({:.0}, {:.0})", spawn.x, spawn.y);
        self.events.push(PlayerEvent::Respawned);
    }

    /// Move without touching health or state, e.g. after spike contact.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }

    pub fn add_score(&mut self, points: i32) {
        self.score = (self.score + points).max(0);
    }

    pub fn collect_coin(&mut self, points: i32) {
        self.coins += 1;
        self.add_score(points);
    }

    pub fn record_riddle_solved(&mut self) {
        self.riddles_solved += 1;
    }

    pub fn record_failed_attempt(&mut self) {
        self.failed_attempts += 1;
    }

    /// Overwrite the persisted statistics. Health is clamped to `[0, max_health]`.
    pub fn restore_stats(&mut self, health: i32, score: i32, riddles_solved: i32, failed_attempts: i32, name: &str) {
        self.health = health.clamp(0, self.max_health);
        self.score = score.max(0);
        self.riddles_solved = riddles_solved.max(0);
        self.failed_attempts = failed_attempts.max(0);
        self.name = name.to_string();
        if self.health > 0 && matches!(self.state, PlayerState::Dead | PlayerState::Hurt) {
            self.velocity = Vec2::ZERO;
            self.hurt_timer = 0.0;
            self.set_state(PlayerState::Idle);
        }
    }
}

/// Vertical-only movement keeps the current facing.
fn directional_state(vx: f32, speed: f32, facing_right: bool) -> PlayerState {
    if speed <= RUN_THRESHOLD {
        PlayerState::Idle
    } else if vx < 0.0 || (vx == 0.0 && !facing_right) {
        PlayerState::RunningLeft
    } else {
        PlayerState::RunningRight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dr_core::animation::AnimationClip;

    fn grounded_player() -> Player {
        let mut player = Player::new(PlayerPhysics::default());
        player.position = Vec2::new(64.0, 500.0);
        player.set_grounded(true);
        player
    }

    #[test]
    fn acceleration_is_gradual_and_capped() {
        let mut player = grounded_player();
        player.move_right(1.0 / 60.0);
        assert!((player.velocity.x - 20.0).abs() < 1e-3);
        for _ in 0..60 {
            player.move_right(1.0 / 60.0);
        }
        assert_eq!(player.velocity.x, 200.0);
        assert_eq!(player.state(), PlayerState::RunningRight);
    }

    #[test]
    fn friction_snaps_to_zero() {
        let mut player = grounded_player();
        player.velocity.x = 50.0;
        for _ in 0..200 {
            player.stop_horizontal();
        }
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn double_jump_once_before_landing() {
        let mut player = grounded_player();
        assert!(player.jump());
        assert_eq!(player.velocity.y, -350.0);
        assert!(!player.is_grounded());

        player.velocity.y = -100.0;
        assert!(player.jump());
        assert_eq!(player.velocity.y, -350.0);
        assert!(!player.has_double_jump());
        assert!((player.double_jump_cooldown() - 3.0).abs() < 1e-6);

        player.velocity.y = 50.0;
        assert!(!player.jump());
        assert_eq!(player.velocity.y, 50.0);
    }

    #[test]
    fn landing_restores_jumps_but_not_cooldown() {
        let mut player = grounded_player();
        player.jump();
        player.jump();
        player.set_grounded(true);
        assert!(player.has_double_jump());
        assert!(player.jump());
        // Airborne again, cooldown still running.
        assert!(!player.jump());
        player.update(3.0);
        assert_eq!(player.double_jump_cooldown(), 0.0);
        assert!(player.jump());
    }

    #[test]
    fn gravity_accumulates_and_clamps() {
        let mut player = Player::new(PlayerPhysics::default());
        player.apply_gravity(0.1);
        assert!((player.velocity.y - 80.0).abs() < 1e-4);
        for _ in 0..100 {
            player.apply_gravity(0.1);
        }
        assert_eq!(player.velocity.y, 500.0);
    }

    #[test]
    fn ascent_speed_is_clamped_in_update() {
        let mut player = Player::new(PlayerPhysics::default());
        player.velocity.y = -900.0;
        player.update(0.0);
        assert_eq!(player.velocity.y, -500.0);
        assert_eq!(player.state(), PlayerState::Jumping);
    }

    #[test]
    fn state_priority_airborne_then_grounded() {
        let mut player = Player::new(PlayerPhysics::default());
        player.velocity.y = 10.0;
        player.update(0.0);
        assert_eq!(player.state(), PlayerState::Falling);

        player.set_grounded(true);
        player.velocity.x = -5.0;
        player.update(0.0);
        assert_eq!(player.state(), PlayerState::RunningLeft);

        player.velocity.x = 0.5;
        player.update(0.0);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn left_edge_clamps_position_and_velocity() {
        let mut player = grounded_player();
        player.position.x = 1.0;
        player.velocity.x = -200.0;
        player.update(0.1);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn falling_out_of_world_kills() {
        let mut player = Player::new(PlayerPhysics::default());
        player.position.y = 799.0;
        player.velocity.y = 100.0;
        player.update(0.1);
        assert!(player.is_dead());
        assert_eq!(player.health(), 0);
        assert_eq!(player.lives(), 2);
        assert_eq!(player.drain_events(), vec![PlayerEvent::Died { lives_left: 2 }]);
    }

    #[test]
    fn dead_player_ignores_physics_and_damage() {
        let mut player = grounded_player();
        player.take_damage(100);
        assert_eq!(player.lives(), 2);
        let before = player.position;
        player.velocity = Vec2::new(100.0, 100.0);
        player.update(0.1);
        assert_eq!(player.position, before);
        player.take_damage(10);
        assert_eq!(player.lives(), 2);
        assert!(!player.jump());
    }

    #[test]
    fn non_lethal_damage_hurts_briefly() {
        let mut player = grounded_player();
        player.take_damage(25);
        assert_eq!(player.health(), 75);
        assert_eq!(player.state(), PlayerState::Hurt);
        assert!(!player.jump());
        player.update(0.5);
        assert_ne!(player.state(), PlayerState::Hurt);
    }

    #[test]
    fn heal_caps_at_max_health() {
        let mut player = grounded_player();
        player.take_damage(10);
        player.heal(50);
        assert_eq!(player.health(), player.max_health());
    }

    #[test]
    fn respawn_restores_health_and_position() {
        let mut player = grounded_player();
        player.take_damage(100);
        player.respawn(Vec2::new(64.0, 500.0));
        assert_eq!(player.health(), 100);
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.position, Vec2::new(64.0, 500.0));
        assert!(!player.is_grounded());
        assert_eq!(player.lives(), 2);
    }

    #[test]
    fn restoring_live_stats_revives_a_dead_player() {
        let mut player = grounded_player();
        player.take_damage(100);
        assert!(player.is_dead());
        player.restore_stats(60, 10, 1, 2, "Ada");
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.velocity, Vec2::ZERO);
        player.take_damage(10);
        assert_eq!(player.health(), 50);
        assert_eq!(player.state(), PlayerState::Hurt);
    }

    #[test]
    fn coins_add_score() {
        let mut player = grounded_player();
        player.collect_coin(100);
        player.collect_coin(100);
        assert_eq!(player.coins(), 2);
        assert_eq!(player.score(), 200);
    }

    #[test]
    fn top_down_walk_has_no_gravity_or_jump() {
        let mut player = Player::new(PlayerPhysics::default());
        player.set_mode(MovementMode::TopDown);
        player.apply_gravity(1.0);
        assert_eq!(player.velocity.y, 0.0);
        assert!(!player.jump());

        player.walk(Vec2::new(0.0, 1.0));
        player.update(0.1);
        assert_eq!(player.velocity, Vec2::new(0.0, 150.0));
        assert_eq!(player.state(), PlayerState::RunningRight);

        player.walk(Vec2::ZERO);
        player.update(0.1);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn state_change_restarts_its_clip() {
        let mut clip = AnimationClip::new("run.png", 32, 32, 6);
        clip.set_looping(true);
        let mut set = PlayerAnimations::new();
        set.insert(PlayerState::RunningRight, clip.clone());
        set.insert(PlayerState::RunningLeft, clip);

        let mut player = grounded_player().with_animations(set);
        player.velocity.x = 100.0;
        player.update(0.25);
        player.update(0.25);
        let right = player.animations().get(PlayerState::RunningRight).map(|c| c.frame_index);
        assert_eq!(right, Some(2));

        player.velocity.x = -100.0;
        player.update(0.0);
        let left = player.animations().get(PlayerState::RunningLeft).map(|c| c.frame_index);
        assert_eq!(left, Some(0));
        // The right-running cursor is untouched by the left restart.
        let right = player.animations().get(PlayerState::RunningRight).map(|c| c.frame_index);
        assert_eq!(right, Some(2));
    }

    #[test]
    fn reset_keeps_name_and_restores_lives() {
        let mut player = grounded_player();
        player.name = "Ada".to_string();
        player.take_damage(100);
        player.add_score(300);
        player.reset();
        assert_eq!(player.lives(), 3);
        assert_eq!(player.score(), 0);
        assert_eq!(player.health(), 100);
        assert_eq!(player.name, "Ada");
    }
}
