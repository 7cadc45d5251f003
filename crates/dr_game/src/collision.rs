//! Body-versus-tile collision and tile/enemy contact queries.
//!
//! Resolution is per tile along the axis of least penetration. Each nearby solid
//! tile is tested against the body's *current* box, so a correction made for one
//! tile is seen by the next. Platformer mode only resolves vertically in the
//! direction of travel: landing needs a falling body and a ceiling hit needs a
//! rising one. Top-down mode resolves all four sides the same way.

use dr_core::geometry::Rect;
use glam::Vec2;

use crate::level::{GridPos, Level, TileType};
use crate::player::MovementMode;

/// Broad-phase growth on each side of the body, in pixels.
pub const BROAD_PHASE_MARGIN: f32 = 10.0;
/// Depth of the strip under the body that counts as standing on something.
const REST_PROBE_DEPTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactState {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionResult {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Platformer only. Always false in top-down mode.
    pub grounded: bool,
    pub contacts: ContactState,
}

/// Push a moving box out of every solid tile it overlaps.
pub fn resolve_tiles(
    level: &Level,
    position: Vec2,
    velocity: Vec2,
    size: Vec2,
    mode: MovementMode,
) -> CollisionResult {
    let mut pos = position;
    let mut vel = velocity;
    let mut contacts = ContactState::default();
    let mut landed = false;

    let broad = Rect::at(pos, size).adjusted(
        -BROAD_PHASE_MARGIN,
        -BROAD_PHASE_MARGIN,
        BROAD_PHASE_MARGIN,
        BROAD_PHASE_MARGIN,
    );
    let solids: Vec<Rect> = level
        .tiles_in_area(&broad)
        .into_iter()
        .filter(|t| t.kind.is_solid())
        .map(|t| t.bounding_box())
        .collect();

    for tile in &solids {
        let body = Rect::at(pos, size);
        if !body.intersects(tile) {
            continue;
        }

        let from_left = body.right() - tile.left();
        let from_right = tile.right() - body.left();
        let from_top = body.bottom() - tile.top();
        let from_bottom = tile.bottom() - body.top();
        let min = from_left.min(from_right).min(from_top).min(from_bottom);

        let vertical_ok = |down: bool| match mode {
            MovementMode::TopDown => true,
            MovementMode::Platformer if down => vel.y > 0.0,
            MovementMode::Platformer => vel.y < 0.0,
        };

        if min == from_top && vertical_ok(true) {
            pos.y = tile.top() - size.y;
            vel.y = 0.0;
            contacts.down = true;
            landed = true;
        } else if min == from_bottom && vertical_ok(false) {
            pos.y = tile.bottom();
            vel.y = 0.0;
            contacts.up = true;
        } else if min == from_left {
            pos.x = tile.left() - size.x;
            vel.x = 0.0;
            contacts.right = true;
        } else if min == from_right {
            pos.x = tile.right();
            vel.x = 0.0;
            contacts.left = true;
        }
    }

    let grounded = match mode {
        MovementMode::TopDown => false,
        MovementMode::Platformer => landed || (vel.y >= 0.0 && resting_on(&solids, pos, size)),
    };

    CollisionResult {
        position: pos,
        velocity: vel,
        grounded,
        contacts,
    }
}

/// A solid directly under the box's bottom edge keeps a stationary body
/// grounded across ticks where gravity was skipped.
fn resting_on(solids: &[Rect], pos: Vec2, size: Vec2) -> bool {
    let probe = Rect::new(pos.x, pos.y + size.y, size.x, REST_PROBE_DEPTH);
    solids.iter().any(|tile| probe.intersects(tile))
}

/// Non-solid, non-empty tiles the body truly overlaps, in grid order.
pub fn tile_contacts(level: &Level, body: &Rect) -> Vec<(GridPos, TileType)> {
    level
        .tiles_in_area(body)
        .into_iter()
        .filter(|t| t.kind != TileType::Empty && !t.kind.is_solid())
        .filter(|t| t.bounding_box().intersects(body))
        .map(|t| (t.grid, t.kind))
        .collect()
}

/// Index of the first live enemy touching `body` whose riddle has not fired yet.
pub fn first_enemy_contact(level: &Level, body: &Rect) -> Option<usize> {
    level.enemies().iter().position(|enemy| {
        !enemy.is_dead() && !enemy.is_riddle_triggered() && enemy.bounding_box().intersects(body)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{Enemy, EnemyKind};

    const SIZE: Vec2 = Vec2::new(32.0, 32.0);

    fn floor_level() -> Level {
        // Floor on row 3 (y = 96..128), a wall at column 4 rows 1-2, ceiling at (1,0).
        Level::from_rows(1, &[".#......", "....#...", "....#...", "########"]).expect("map")
    }

    #[test]
    fn falling_body_lands_on_tile_top() {
        let level = floor_level();
        let result = resolve_tiles(
            &level,
            Vec2::new(64.0, 70.0),
            Vec2::new(0.0, 300.0),
            SIZE,
            MovementMode::Platformer,
        );
        assert_eq!(result.position.y, 96.0 - 32.0);
        assert_eq!(result.velocity.y, 0.0);
        assert!(result.grounded);
        assert!(result.contacts.down);
    }

    #[test]
    fn rising_body_is_not_snapped_onto_floor() {
        let level = floor_level();
        let result = resolve_tiles(
            &level,
            Vec2::new(64.0, 70.0),
            Vec2::new(0.0, -100.0),
            SIZE,
            MovementMode::Platformer,
        );
        assert_eq!(result.position.y, 70.0);
        assert!(!result.grounded);
    }

    #[test]
    fn ceiling_hit_stops_ascent() {
        let level = floor_level();
        let result = resolve_tiles(
            &level,
            Vec2::new(32.0, 28.0),
            Vec2::new(0.0, -300.0),
            SIZE,
            MovementMode::Platformer,
        );
        assert_eq!(result.position.y, 32.0);
        assert_eq!(result.velocity.y, 0.0);
        assert!(result.contacts.up);
        assert!(!result.grounded);
    }

    #[test]
    fn wall_pushes_back_horizontally() {
        let level = floor_level();
        let result = resolve_tiles(
            &level,
            Vec2::new(100.0, 50.0),
            Vec2::new(150.0, 0.0),
            SIZE,
            MovementMode::Platformer,
        );
        assert_eq!(result.position.x, 128.0 - 32.0);
        assert_eq!(result.velocity.x, 0.0);
        assert!(result.contacts.right);
    }

    #[test]
    fn resting_body_stays_grounded() {
        let level = floor_level();
        let result = resolve_tiles(
            &level,
            Vec2::new(64.0, 64.0),
            Vec2::ZERO,
            SIZE,
            MovementMode::Platformer,
        );
        assert!(result.grounded);
        assert_eq!(result.position, Vec2::new(64.0, 64.0));
    }

    #[test]
    fn top_down_resolves_without_grounding() {
        let level = floor_level();
        // Rising, yet the shallow side still wins; platformer mode would skip it.
        let result = resolve_tiles(
            &level,
            Vec2::new(64.0, 70.0),
            Vec2::new(0.0, -150.0),
            SIZE,
            MovementMode::TopDown,
        );
        assert_eq!(result.position.y, 64.0);
        assert!(!result.grounded);
    }

    #[test]
    fn tile_contacts_ignore_solids_and_edges() {
        let level = Level::from_rows(1, &["o^..", "####"]).expect("map");
        let body = Rect::new(16.0, 0.0, 32.0, 32.0);
        let contacts = tile_contacts(&level, &body);
        assert_eq!(
            contacts,
            vec![
                (GridPos { x: 0, y: 0 }, TileType::Coin),
                (GridPos { x: 1, y: 0 }, TileType::Spike)
            ]
        );
        let touching = Rect::new(64.0, 0.0, 32.0, 32.0);
        assert!(tile_contacts(&level, &touching).is_empty());
    }

    #[test]
    fn enemy_contact_skips_dead_and_triggered() {
        let mut level = Level::from_rows(1, &["....", "####"]).expect("map");
        let mut dead = Enemy::new(EnemyKind::PinkMonster, Vec2::new(0.0, 0.0), Some(0));
        dead.die();
        let mut used = Enemy::new(EnemyKind::PinkMonster, Vec2::new(8.0, 0.0), Some(1));
        used.mark_riddle_triggered();
        level.add_enemy(dead);
        level.add_enemy(used);
        level.add_enemy(Enemy::new(EnemyKind::OwletMonster, Vec2::new(16.0, 0.0), Some(2)));

        let body = Rect::new(10.0, 0.0, 32.0, 32.0);
        assert_eq!(first_enemy_contact(&level, &body), Some(2));
        assert_eq!(first_enemy_contact(&level, &Rect::new(96.0, 0.0, 32.0, 32.0)), None);
    }
}
