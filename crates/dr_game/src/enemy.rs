//! Patrolling enemies that challenge the player with a riddle on contact.

use dr_core::animation::{AnimationKey, AnimationSet};
use dr_core::geometry::Rect;
use glam::Vec2;

pub const ENEMY_SIZE: Vec2 = Vec2::new(32.0, 32.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    PinkMonster,
    OwletMonster,
}

impl EnemyKind {
    pub fn sprite_prefix(self) -> &'static str {
        match self {
            EnemyKind::PinkMonster => "Pink_Monster_",
            EnemyKind::OwletMonster => "Owlet_Monster_",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnemyState {
    #[default]
    Idle,
    Walking,
    Hurt,
    Dead,
}

pub const ENEMY_STATE_COUNT: usize = 4;

impl EnemyState {
    pub const ALL: [EnemyState; ENEMY_STATE_COUNT] = [
        EnemyState::Idle,
        EnemyState::Walking,
        EnemyState::Hurt,
        EnemyState::Dead,
    ];
}

impl AnimationKey for EnemyState {
    fn slot(self) -> usize {
        self as usize
    }
}

pub type EnemyAnimations = AnimationSet<EnemyState, ENEMY_STATE_COUNT>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyEvent {
    Defeated { kind: EnemyKind, position: Vec2 },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    kind: EnemyKind,
    pub position: Vec2,
    start_position: Vec2,
    state: EnemyState,
    facing_right: bool,
    riddle_id: Option<usize>,
    riddle_triggered: bool,
    patrol_distance: f32,
    move_speed: f32,
    animations: EnemyAnimations,
    events: Vec<EnemyEvent>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vec2, riddle_id: Option<usize>) -> Self {
        Self {
            kind,
            position,
            start_position: position,
            state: EnemyState::Idle,
            facing_right: false,
            riddle_id,
            riddle_triggered: false,
            patrol_distance: 64.0,
            move_speed: 30.0,
            animations: EnemyAnimations::new(),
            events: Vec::new(),
        }
    }

    pub fn with_patrol(mut self, distance: f32, speed: f32) -> Self {
        self.patrol_distance = distance;
        self.move_speed = speed;
        self
    }

    pub fn with_animations(mut self, animations: EnemyAnimations) -> Self {
        self.set_animations(animations);
        self
    }

    pub fn set_animations(&mut self, animations: EnemyAnimations) {
        self.animations = animations;
        self.animations.restart(self.state);
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn riddle_id(&self) -> Option<usize> {
        self.riddle_id
    }

    pub fn is_riddle_triggered(&self) -> bool {
        self.riddle_triggered
    }

    pub fn mark_riddle_triggered(&mut self) {
        self.riddle_triggered = true;
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::at(self.position, ENEMY_SIZE)
    }

    pub fn animations(&self) -> &EnemyAnimations {
        &self.animations
    }

    pub fn drain_events(&mut self) -> Vec<EnemyEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_state(&mut self, state: EnemyState) {
        if self.state != state {
            self.state = state;
            self.animations.restart(state);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.animations.update(self.state, dt);
        match self.state {
            EnemyState::Dead | EnemyState::Hurt => {}
            EnemyState::Idle | EnemyState::Walking => self.patrol(dt),
        }
    }

    /// Walk back and forth around the spawn point, turning once past the
    /// patrol distance.
    fn patrol(&mut self, dt: f32) {
        self.set_state(EnemyState::Walking);
        let offset = self.position.x - self.start_position.x;
        if self.facing_right {
            self.position.x += self.move_speed * dt;
            if offset > self.patrol_distance {
                self.facing_right = false;
            }
        } else {
            self.position.x -= self.move_speed * dt;
            if offset < -self.patrol_distance {
                self.facing_right = true;
            }
        }
    }

    /// A hit always lands in HURT; there is no hit-point model.
    pub fn take_damage(&mut self) {
        if matches!(self.state, EnemyState::Idle | EnemyState::Walking) {
            self.set_state(EnemyState::Hurt);
        }
    }

    pub fn die(&mut self) {
        if self.is_dead() {
            return;
        }
        self.set_state(EnemyState::Dead);
        log::debug!("{:?} enemy defeated at ({:.0}, {:.0})", self.kind, self.position.x, self.position.y);
        self.events.push(EnemyEvent::Defeated {
            kind: self.kind,
            position: self.position,
        });
    }

    /// True once a dead enemy may be removed. Without a death clip there is
    /// nothing to wait for.
    pub fn death_animation_finished(&self) -> bool {
        if !self.is_dead() {
            return false;
        }
        self.animations
            .get(EnemyState::Dead)
            .map_or(true, |clip| clip.finished)
    }
}
