//! Read-only view of one frame, for whatever front end draws it.
//!
//! Nothing here refers back into the simulation; a renderer can hold a
//! [`RenderFrame`] across a tick without borrowing the [`Game`].

use dr_core::animation::{AnimationClip, FrameRect};
use dr_core::geometry::Rect;
use std::path::PathBuf;

use crate::enemy::{EnemyKind, EnemyState};
use crate::game::Game;
use crate::game_master::Mood;
use crate::level::{GridPos, TileType};
use crate::player::{MovementMode, PlayerState};
use crate::session::{RiddlePrompt, SessionState};

/// Which part of which strip to draw. `None` means draw a placeholder box.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteView {
    pub rect: Rect,
    pub strip: Option<PathBuf>,
    pub frame: Option<FrameRect>,
    /// Strips face right; mirror when false.
    pub facing_right: bool,
}

impl SpriteView {
    fn new(rect: Rect, clip: Option<&AnimationClip>, facing_right: bool) -> Self {
        Self {
            rect,
            strip: clip.map(|c| c.strip.clone()),
            frame: clip.map(AnimationClip::current_frame),
            facing_right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub grid: GridPos,
    pub kind: TileType,
    pub rect: Rect,
    /// Coins and keys that were picked up; front ends skip these.
    pub collected: bool,
    /// Checkpoints draw differently once touched.
    pub activated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub sprite: SpriteView,
    pub state: PlayerState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    pub sprite: SpriteView,
    pub kind: EnemyKind,
    pub state: EnemyState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub score: i32,
    pub lives: i32,
    pub coins: i32,
    pub coins_remaining: i32,
    pub hints: i32,
    pub has_key: bool,
    pub paused: bool,
    pub riddle_active: bool,
    pub show_retry: bool,
    pub show_victory: bool,
    pub highest_score: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub state: SessionState,
    pub level_number: u32,
    pub level_name: String,
    pub mode: MovementMode,
    pub world_size: (f32, f32),
    /// Every non-empty tile.
    pub tiles: Vec<TileView>,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub hud: Hud,
    pub riddle: Option<RiddlePrompt>,
    pub dialogue: String,
    pub mood: Mood,
}

impl RenderFrame {
    pub fn capture(game: &Game) -> Self {
        let session = game.session();
        let level = game.level();
        let player = session.player();

        let tiles = level
            .tiles()
            .filter(|t| t.kind != TileType::Empty)
            .map(|t| TileView {
                grid: t.grid,
                kind: t.kind,
                rect: t.bounding_box(),
                collected: t.collected,
                activated: t.activated,
            })
            .collect();

        let enemies = level
            .enemies()
            .iter()
            .map(|e| EnemyView {
                sprite: SpriteView::new(
                    e.bounding_box(),
                    e.animations().get(e.state()),
                    e.is_facing_right(),
                ),
                kind: e.kind(),
                state: e.state(),
            })
            .collect();

        let size = level.pixel_size();
        Self {
            state: session.state(),
            level_number: level.number,
            level_name: level.name.clone(),
            mode: level.mode,
            world_size: (size.x, size.y),
            tiles,
            player: PlayerView {
                sprite: SpriteView::new(
                    player.bounding_box(),
                    player.animations().get(player.state()),
                    player.is_facing_right(),
                ),
                state: player.state(),
            },
            enemies,
            hud: Hud {
                health: player.health(),
                max_health: player.max_health(),
                score: player.score(),
                lives: player.lives(),
                coins: player.coins(),
                coins_remaining: level.coins_remaining(),
                hints: session.hints_remaining(),
                has_key: game.has_key(),
                paused: session.is_paused(),
                riddle_active: session.state() == SessionState::RiddleActive,
                show_retry: game.is_retry_screen(),
                show_victory: game.is_victory_screen(),
                highest_score: game.highest_score(),
            },
            riddle: session.riddle_prompt(),
            dialogue: session.game_master().dialogue().to_string(),
            mood: session.game_master().mood(),
        }
    }

    /// Health as a fraction for the HUD bar.
    pub fn health_fraction(&self) -> f32 {
        if self.hud.max_health <= 0 {
            return 0.0;
        }
        (self.hud.health as f32 / self.hud.max_health as f32).clamp(0.0, 1.0)
    }
}
