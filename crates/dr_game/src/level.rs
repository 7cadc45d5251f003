//! Tile grid, level metadata and the enemies a level owns.
//!
//! Levels are authored as character maps, one character per tile. The same
//! parser serves the built-in layouts and JSON level files on disk.

use dr_core::geometry::Rect;
use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::CombatRules;
use crate::enemy::{Enemy, EnemyEvent, EnemyKind};
use crate::player::MovementMode;
use crate::riddle::riddle_pool;

pub const TILE_SIZE: i32 = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    #[default]
    Empty,
    Solid,
    Spike,
    Coin,
    Checkpoint,
    RiddleTrigger,
    Goal,
    MovingPlatform,
    Breakable,
    Key,
}

impl TileType {
    pub fn from_char(c: char) -> Option<TileType> {
        Some(match c {
            '.' | ' ' => TileType::Empty,
            '#' => TileType::Solid,
            '^' => TileType::Spike,
            'o' => TileType::Coin,
            'c' => TileType::Checkpoint,
            '?' => TileType::RiddleTrigger,
            'G' => TileType::Goal,
            '=' => TileType::MovingPlatform,
            '%' => TileType::Breakable,
            'k' => TileType::Key,
            _ => return None,
        })
    }

    /// Tiles the collision resolver pushes bodies out of.
    pub fn is_solid(self) -> bool {
        matches!(self, TileType::Solid | TileType::MovingPlatform)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tile {
    pub kind: TileType,
    pub grid: GridPos,
    pub collected: bool,
    pub activated: bool,
    pub riddle_id: Option<usize>,
}

impl Tile {
    pub fn bounding_box(&self) -> Rect {
        let size = TILE_SIZE as f32;
        Rect::new(self.grid.x as f32 * size, self.grid.y as f32 * size, size, size)
    }
}

/// Placement of one enemy in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub cell_x: i32,
    pub cell_y: i32,
    pub riddle_id: Option<usize>,
}

impl EnemySpawn {
    pub fn spawn(&self, combat: &CombatRules) -> Enemy {
        let position = Vec2::new(
            (self.cell_x * TILE_SIZE) as f32,
            (self.cell_y * TILE_SIZE) as f32,
        );
        Enemy::new(self.kind, position, self.riddle_id)
            .with_patrol(combat.enemy_patrol_distance, combat.enemy_speed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelEvent {
    CoinCollected { remaining: i32 },
    CheckpointActivated { position: Vec2 },
    EnemyDefeated { kind: EnemyKind, position: Vec2 },
}

#[derive(Debug, Clone)]
pub struct Level {
    pub number: u32,
    pub name: String,
    pub description: String,
    pub spawn_point: Vec2,
    pub mode: MovementMode,
    pub goal_requires_key: bool,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    enemies: Vec<Enemy>,
    total_coins: i32,
    coins_collected: i32,
    complete: bool,
    events: Vec<LevelEvent>,
}

impl Level {
    /// An all-empty grid.
    pub fn new(number: u32, width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile {
                    grid: GridPos { x, y },
                    ..Tile::default()
                });
            }
        }
        Self {
            number,
            name: format!("Level {number}"),
            description: String::new(),
            spawn_point: Vec2::new(64.0, 500.0),
            mode: MovementMode::Platformer,
            goal_requires_key: false,
            width,
            height,
            tiles,
            enemies: Vec::new(),
            total_coins: 0,
            coins_collected: 0,
            complete: false,
            events: Vec::new(),
        }
    }

    /// Build a grid from a character map. Every row must have the same length.
    pub fn from_rows<S: AsRef<str>>(number: u32, rows: &[S]) -> Result<Self, String> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 || height == 0 {
            return Err("Level map is empty".to_string());
        }

        let mut level = Level::new(number, width as i32, height as i32);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(format!(
                    "Level map row {y} has {} tiles, expected {width}",
                    row.chars().count()
                ));
            }
            for (x, c) in row.chars().enumerate() {
                let kind = TileType::from_char(c)
                    .ok_or_else(|| format!("Level map has unknown tile '{c}' at ({x}, {y})"))?;
                if kind != TileType::Empty {
                    level.set_tile(x as i32, y as i32, kind, None);
                }
            }
        }
        Ok(level)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new((self.width * TILE_SIZE) as f32, (self.height * TILE_SIZE) as f32)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).and_then(|i| self.tiles.get(i))
    }

    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let i = self.index(x, y)?;
        self.tiles.get_mut(i)
    }

    /// Pixel coordinates truncate toward zero, so small negative offsets still
    /// land in column or row 0.
    pub fn tile_at_pixel(&self, px: f32, py: f32) -> Option<&Tile> {
        let (x, y) = pixel_to_grid(px, py);
        self.tile_at(x, y)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Every in-bounds tile whose cell falls in the grid range spanned by
    /// `area`, both ends inclusive. Out-of-range cells are skipped.
    pub fn tiles_in_area(&self, area: &Rect) -> Vec<&Tile> {
        let (x0, y0) = pixel_to_grid(area.left(), area.top());
        let (x1, y1) = pixel_to_grid(area.right(), area.bottom());
        let mut result = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Some(tile) = self.tile_at(x, y) {
                    result.push(tile);
                }
            }
        }
        result
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_some_and(|t| t.kind.is_solid())
    }

    /// First non-empty tile that truly overlaps `area`.
    pub fn check_collision(&self, area: &Rect) -> Option<TileType> {
        self.tiles_in_area(area)
            .into_iter()
            .find(|t| t.kind != TileType::Empty && t.bounding_box().intersects(area))
            .map(|t| t.kind)
    }

    /// Ignored outside the grid.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileType, riddle_id: Option<usize>) {
        let Some(tile) = self.tile_at_mut(x, y) else {
            return;
        };
        let was_coin = tile.kind == TileType::Coin;
        tile.kind = kind;
        tile.riddle_id = riddle_id;
        tile.collected = false;
        tile.activated = false;
        match (was_coin, kind == TileType::Coin) {
            (false, true) => self.total_coins += 1,
            (true, false) => self.total_coins -= 1,
            _ => {}
        }
    }

    /// Returns true only for the first collection of a coin tile.
    pub fn collect_coin(&mut self, pos: GridPos) -> bool {
        let Some(tile) = self.tile_at_mut(pos.x, pos.y) else {
            return false;
        };
        if tile.kind != TileType::Coin || tile.collected {
            return false;
        }
        tile.collected = true;
        self.coins_collected += 1;
        let remaining = self.coins_remaining();
        self.events.push(LevelEvent::CoinCollected { remaining });
        true
    }

    /// Returns true only for the first activation of a checkpoint tile.
    pub fn activate_checkpoint(&mut self, pos: GridPos) -> bool {
        let Some(tile) = self.tile_at_mut(pos.x, pos.y) else {
            return false;
        };
        if tile.kind != TileType::Checkpoint || tile.activated {
            return false;
        }
        tile.activated = true;
        let position = Vec2::new((pos.x * TILE_SIZE) as f32, (pos.y * TILE_SIZE) as f32);
        log::info!("Checkpoint activated at ({}, {})", pos.x, pos.y);
        self.events.push(LevelEvent::CheckpointActivated { position });
        true
    }

    /// Marks a key tile as taken. Returns true on first pickup.
    pub fn take_key(&mut self, pos: GridPos) -> bool {
        let Some(tile) = self.tile_at_mut(pos.x, pos.y) else {
            return false;
        };
        if tile.kind != TileType::Key || tile.collected {
            return false;
        }
        tile.collected = true;
        true
    }

    pub fn total_coins(&self) -> i32 {
        self.total_coins
    }

    pub fn coins_remaining(&self) -> i32 {
        self.total_coins - self.coins_collected
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Drop dead enemies whose death animation has played out. Their death
    /// notices stay queued on the level.
    pub fn remove_finished_enemies(&mut self) -> usize {
        self.gather_enemy_events();
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.death_animation_finished());
        let removed = before - self.enemies.len();
        if removed > 0 {
            log::debug!("Removed {removed} defeated enemies");
        }
        removed
    }

    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        self.gather_enemy_events();
        std::mem::take(&mut self.events)
    }

    fn gather_enemy_events(&mut self) {
        for enemy in &mut self.enemies {
            for event in enemy.drain_events() {
                let EnemyEvent::Defeated { kind, position } = event;
                self.events.push(LevelEvent::EnemyDefeated { kind, position });
            }
        }
    }
}

fn pixel_to_grid(px: f32, py: f32) -> (i32, i32) {
    ((px / TILE_SIZE as f32) as i32, (py / TILE_SIZE as f32) as i32)
}

// --- JSON level files ---

#[derive(Debug, Deserialize)]
struct LevelFile {
    version: String,
    #[serde(default = "default_level_number")]
    number: u32,
    name: String,
    #[serde(default)]
    description: String,
    width: i32,
    height: i32,
    spawn: SpawnPoint,
    rows: Vec<String>,
    #[serde(default)]
    enemies: Vec<EnemyEntry>,
    #[serde(default)]
    riddle_triggers: Vec<TriggerEntry>,
    #[serde(default)]
    top_down: bool,
    #[serde(default)]
    requires_key: bool,
}

#[derive(Debug, Deserialize)]
struct SpawnPoint {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum EnemyKindEntry {
    PinkMonster,
    OwletMonster,
}

#[derive(Debug, Deserialize)]
struct EnemyEntry {
    kind: EnemyKindEntry,
    x: i32,
    y: i32,
    #[serde(default)]
    riddle_id: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TriggerEntry {
    x: i32,
    y: i32,
    riddle_id: usize,
}

const fn default_level_number() -> u32 {
    1
}

/// Load a level from a JSON file. Enemies use the default patrol unless
/// `combat` overrides it.
pub fn load_level_from_path(path: &Path, combat: &CombatRules) -> Result<Level, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    validate_level_file(&file)?;

    let mut level = Level::from_rows(file.number, &file.rows)
        .map_err(|e| format!("Level validation failed: {e}"))?;
    level.name = file.name;
    level.description = file.description;
    level.spawn_point = Vec2::new(file.spawn.x, file.spawn.y);
    level.goal_requires_key = file.requires_key;
    if file.top_down {
        level.mode = MovementMode::TopDown;
    }
    for trigger in &file.riddle_triggers {
        level.set_tile(trigger.x, trigger.y, TileType::RiddleTrigger, Some(trigger.riddle_id));
    }
    for entry in &file.enemies {
        let kind = match entry.kind {
            EnemyKindEntry::PinkMonster => EnemyKind::PinkMonster,
            EnemyKindEntry::OwletMonster => EnemyKind::OwletMonster,
        };
        let spawn = EnemySpawn {
            kind,
            cell_x: entry.x,
            cell_y: entry.y,
            riddle_id: entry.riddle_id,
        };
        level.add_enemy(spawn.spawn(combat));
    }
    log::info!("Loaded level '{}' from {}", level.name, path.display());
    Ok(level)
}

fn validate_level_file(file: &LevelFile) -> Result<(), String> {
    if file.version != "0.1" {
        return Err(format!(
            "Level validation failed: unsupported version '{}'",
            file.version
        ));
    }
    if file.width <= 0 || file.height <= 0 {
        return Err("Level validation failed: width and height must be > 0".to_string());
    }
    if file.rows.len() != file.height as usize {
        return Err(format!(
            "Level validation failed: expected {} rows, found {}",
            file.height,
            file.rows.len()
        ));
    }
    if let Some((y, row)) = file
        .rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.chars().count() != file.width as usize)
    {
        return Err(format!(
            "Level validation failed: row {y} has {} tiles, expected {}",
            row.chars().count(),
            file.width
        ));
    }

    let riddle_count = riddle_pool().len();
    let in_bounds = |x: i32, y: i32| x >= 0 && x < file.width && y >= 0 && y < file.height;
    for enemy in &file.enemies {
        if !in_bounds(enemy.x, enemy.y) {
            return Err(format!(
                "Level validation failed: enemy out of bounds ({}, {})",
                enemy.x, enemy.y
            ));
        }
        if let Some(id) = enemy.riddle_id {
            if id >= riddle_count {
                return Err(format!("Level validation failed: unknown riddle id {id}"));
            }
        }
    }
    for trigger in &file.riddle_triggers {
        if !in_bounds(trigger.x, trigger.y) {
            return Err(format!(
                "Level validation failed: riddle trigger out of bounds ({}, {})",
                trigger.x, trigger.y
            ));
        }
        if trigger.riddle_id >= riddle_count {
            return Err(format!(
                "Level validation failed: unknown riddle id {}",
                trigger.riddle_id
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "dr_level_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn small_level() -> Level {
        Level::from_rows(1, &["....", ".o.c", "#^#k", "####"]).expect("valid map")
    }

    #[test]
    fn from_rows_places_tiles_and_counts_coins() {
        let level = small_level();
        assert_eq!((level.width(), level.height()), (4, 4));
        assert_eq!(level.tile_at(1, 1).map(|t| t.kind), Some(TileType::Coin));
        assert_eq!(level.tile_at(1, 2).map(|t| t.kind), Some(TileType::Spike));
        assert!(level.is_solid(0, 3));
        assert!(!level.is_solid(1, 2));
        assert_eq!(level.total_coins(), 1);
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let level = small_level();
        assert!(level.tile_at(-1, 0).is_none());
        assert!(level.tile_at(4, 0).is_none());
        assert!(!level.is_solid(0, 99));
        // -5px truncates to column 0.
        assert_eq!(level.tile_at_pixel(-5.0, 100.0).map(|t| t.grid), Some(GridPos { x: 0, y: 3 }));
    }

    #[test]
    fn tiles_in_area_is_inclusive_and_clipped() {
        let level = small_level();
        let area = Rect::new(-10.0, -10.0, 50.0, 50.0);
        let tiles = level.tiles_in_area(&area);
        // -10 truncates to cell 0, so this spans columns and rows 0..=1.
        assert_eq!(tiles.len(), 4);

        let edge = Rect::new(32.0, 32.0, 32.0, 32.0);
        assert_eq!(level.tiles_in_area(&edge).len(), 4);
    }

    #[test]
    fn check_collision_reports_first_real_overlap() {
        let level = small_level();
        assert_eq!(
            level.check_collision(&Rect::new(40.0, 40.0, 10.0, 10.0)),
            Some(TileType::Coin)
        );
        // Touching the coin's edge only.
        assert_eq!(level.check_collision(&Rect::new(0.0, 0.0, 32.0, 32.0)), None);
    }

    #[test]
    fn coin_collection_is_idempotent() {
        let mut level = small_level();
        let coin = GridPos { x: 1, y: 1 };
        assert!(level.collect_coin(coin));
        assert!(!level.collect_coin(coin));
        assert_eq!(level.coins_remaining(), 0);
        assert_eq!(level.drain_events(), vec![LevelEvent::CoinCollected { remaining: 0 }]);
        assert!(!level.collect_coin(GridPos { x: 0, y: 3 }));
        assert!(!level.collect_coin(GridPos { x: 40, y: 3 }));
    }

    #[test]
    fn checkpoint_activates_once() {
        let mut level = small_level();
        let cp = GridPos { x: 3, y: 1 };
        assert!(level.activate_checkpoint(cp));
        assert!(!level.activate_checkpoint(cp));
        assert_eq!(
            level.drain_events(),
            vec![LevelEvent::CheckpointActivated {
                position: Vec2::new(96.0, 32.0)
            }]
        );
    }

    #[test]
    fn set_tile_tracks_coin_totals() {
        let mut level = small_level();
        level.set_tile(0, 0, TileType::Coin, None);
        assert_eq!(level.total_coins(), 2);
        level.set_tile(1, 1, TileType::Empty, None);
        assert_eq!(level.total_coins(), 1);
        level.set_tile(99, 99, TileType::Coin, None);
        assert_eq!(level.total_coins(), 1);
    }

    #[test]
    fn from_rows_rejects_ragged_and_unknown() {
        assert!(Level::from_rows(1, &["..", "..."]).is_err());
        let err = Level::from_rows(1, &["..X"]).expect_err("unknown char");
        assert!(err.contains("unknown tile"));
        assert!(Level::from_rows::<&str>(1, &[]).is_err());
    }

    #[test]
    fn load_level_from_json() {
        let path = temp_file_path("valid");
        fs::write(
            &path,
            r######"{
              "version": "0.1",
              "number": 7,
              "name": "Test Grounds",
              "width": 5,
              "height": 3,
              "spawn": { "x": 32, "y": 0 },
              "rows": [".....", "..o.G", "#####"],
              "enemies": [{ "kind": "owlet_monster", "x": 3, "y": 1, "riddle_id": 2 }],
              "riddle_triggers": [{ "x": 0, "y": 1, "riddle_id": 4 }]
            }"######,
        )
        .expect("write temp file");

        let level = load_level_from_path(&path, &CombatRules::default()).expect("valid level");
        assert_eq!(level.number, 7);
        assert_eq!(level.name, "Test Grounds");
        assert_eq!(level.enemies().len(), 1);
        assert_eq!(level.enemies()[0].riddle_id(), Some(2));
        assert_eq!(level.enemies()[0].position, Vec2::new(96.0, 32.0));
        assert_eq!(level.tile_at(0, 1).and_then(|t| t.riddle_id), Some(4));
        assert_eq!(level.mode, MovementMode::Platformer);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_level_rejects_unknown_riddle() {
        let path = temp_file_path("riddle");
        fs::write(
            &path,
            r#"{
              "version": "0.1", "name": "x", "width": 2, "height": 1,
              "spawn": { "x": 0, "y": 0 }, "rows": [".."],
              "enemies": [{ "kind": "pink_monster", "x": 0, "y": 0, "riddle_id": 9 }]
            }"#,
        )
        .expect("write temp file");
        let err = load_level_from_path(&path, &CombatRules::default()).expect_err("bad riddle id");
        assert!(err.contains("unknown riddle id 9"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_level_rejects_row_mismatch() {
        let path = temp_file_path("rows");
        fs::write(
            &path,
            r#"{
              "version": "0.1", "name": "x", "width": 3, "height": 2,
              "spawn": { "x": 0, "y": 0 }, "rows": ["...", ".."]
            }"#,
        )
        .expect("write temp file");
        let err = load_level_from_path(&path, &CombatRules::default()).expect_err("ragged");
        assert!(err.contains("row 1"));
        let _ = fs::remove_file(path);
    }
}
