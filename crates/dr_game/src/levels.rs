//! The six built-in levels.
//!
//! Levels 1-5 are side-scrolling platformer stages. Level 6 is a top-down maze
//! whose goal stays locked until the key is picked up.

use glam::Vec2;

use crate::config::CombatRules;
use crate::enemy::EnemyKind;
use crate::level::{EnemySpawn, Level, TILE_SIZE};
use crate::player::MovementMode;

pub const LEVEL_COUNT: u32 = 6;

struct LevelLayout {
    name: &'static str,
    description: &'static str,
    rows: &'static [&'static str],
    spawn: Vec2,
    enemies: &'static [EnemySpawn],
    mode: MovementMode,
    goal_requires_key: bool,
}

const PLATFORM_SPAWN: Vec2 = Vec2::new(64.0, 500.0);
/// Two cells in from the maze corner, nudged off the walls.
const MAZE_SPAWN: Vec2 = Vec2::new((2 * TILE_SIZE + 8) as f32, (2 * TILE_SIZE + 8) as f32);

const fn enemy(kind: EnemyKind, cell_x: i32, cell_y: i32, riddle_id: usize) -> EnemySpawn {
    EnemySpawn {
        kind,
        cell_x,
        cell_y,
        riddle_id: Some(riddle_id),
    }
}

const LEVEL_1_ENEMIES: [EnemySpawn; 1] = [enemy(EnemyKind::PinkMonster, 21, 11, 0)];
const LEVEL_2_ENEMIES: [EnemySpawn; 1] = [enemy(EnemyKind::OwletMonster, 18, 14, 1)];
const LEVEL_3_ENEMIES: [EnemySpawn; 1] = [enemy(EnemyKind::PinkMonster, 21, 11, 2)];
const LEVEL_4_ENEMIES: [EnemySpawn; 1] = [enemy(EnemyKind::OwletMonster, 25, 12, 3)];
const LEVEL_5_ENEMIES: [EnemySpawn; 1] = [enemy(EnemyKind::PinkMonster, 19, 12, 4)];

fn layout(number: u32) -> LevelLayout {
    match number {
        2 => LevelLayout {
            name: "Level 2: The Cipher Challenge",
            description: "Navigate platforms and solve the ROT13 riddle!",
            rows: &LEVEL_2_ROWS,
            spawn: PLATFORM_SPAWN,
            enemies: &LEVEL_2_ENEMIES,
            mode: MovementMode::Platformer,
            goal_requires_key: false,
        },
        3 => LevelLayout {
            name: "Level 3: Logic Leap",
            description: "Test your jumping skills and logical thinking!",
            rows: &LEVEL_3_ROWS,
            spawn: PLATFORM_SPAWN,
            enemies: &LEVEL_3_ENEMIES,
            mode: MovementMode::Platformer,
            goal_requires_key: false,
        },
        4 => LevelLayout {
            name: "Level 4: Binary Bridge",
            description: "Cross the binary bridge and decode the message!",
            rows: &LEVEL_4_ROWS,
            spawn: PLATFORM_SPAWN,
            enemies: &LEVEL_4_ENEMIES,
            mode: MovementMode::Platformer,
            goal_requires_key: false,
        },
        5 => LevelLayout {
            name: "Level 5: The Final Test",
            description: "Solve the ultimate riddle and escape from the Game Master!",
            rows: &LEVEL_5_ROWS,
            spawn: PLATFORM_SPAWN,
            enemies: &LEVEL_5_ENEMIES,
            mode: MovementMode::Platformer,
            goal_requires_key: false,
        },
        6 => LevelLayout {
            name: "Level 6: The Labyrinth",
            description: "Navigate the maze and find the key to escape!",
            rows: &LEVEL_6_ROWS,
            spawn: MAZE_SPAWN,
            enemies: &[],
            mode: MovementMode::TopDown,
            goal_requires_key: true,
        },
        _ => LevelLayout {
            name: "Level 1: The Awakening",
            description: "Learn the basics. Move with arrow keys, collect coins, reach the goal!",
            rows: &LEVEL_1_ROWS,
            spawn: PLATFORM_SPAWN,
            enemies: &LEVEL_1_ENEMIES,
            mode: MovementMode::Platformer,
            goal_requires_key: false,
        },
    }
}

/// Build level `number`. Numbers outside 1..=6 fall back to level 1.
pub fn build_level(number: u32, combat: &CombatRules) -> Result<Level, String> {
    let number = if (1..=LEVEL_COUNT).contains(&number) { number } else { 1 };
    let layout = layout(number);
    let mut level = Level::from_rows(number, layout.rows)?;
    level.name = layout.name.to_string();
    level.description = layout.description.to_string();
    level.spawn_point = layout.spawn;
    level.mode = layout.mode;
    level.goal_requires_key = layout.goal_requires_key;
    for spawn in layout.enemies {
        level.add_enemy(spawn.spawn(combat));
    }
    Ok(level)
}

const LEVEL_1_ROWS: [&str; 20] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    ".......................o......",
    "..................#######.....",
    ".................##...........",
    "................##..........G.",
    "......o........##........#####",
    ".....o.o......##..............",
    "#####...#######...............",
    "##############################",
    "##############################",
];

const LEVEL_2_ROWS: [&str; 20] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "............###..o............",
    "........o.......####........G.",
    ".......###..........##########",
    "..............................",
    "######..........^^^^..........",
    "##############################",
];

const LEVEL_3_ROWS: [&str; 20] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "............................G.",
    ".....................c....####",
    "..............................",
    "....................###.......",
    "..............................",
    "...............###............",
    "..............................",
    "..........###.................",
    "..............................",
    "########......................",
    "..............................",
];

const LEVEL_4_ROWS: [&str; 20] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    ".......................####...",
    "...............#.#.#.#......G.",
    "............................#.",
    ".......#.#.#.#................",
    "######........................",
    "######........................",
    "######^^^^^^^^^^^^^^^^^^......",
];

const LEVEL_5_ROWS: [&str; 20] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..........ooo.................",
    ".........#####................",
    "................######........",
    "................######......G.",
    "..........^.^...........######",
    ".........#####................",
    "########......................",
    "..............................",
    "##############################",
];

const LEVEL_6_ROWS: [&str; 20] = [
    "..............................",
    ".############################.",
    ".#..........................#.",
    ".#..o....###..........###...#.",
    ".#.####........####.........#.",
    ".#....#....#......#.....#...#.",
    ".#....#....#.o....#.....#...#.",
    ".#.........#............#...#.",
    ".#..........................#.",
    ".#.......###......###.......#.",
    ".#.####........k........###.#.",
    ".#....#.o..#......#..o..#...#.",
    ".#....#....#......#.....#...#.",
    ".#....#....#......#.........#.",
    ".#....#.....................#.",
    ".#....#..###......###.......#.",
    ".#.###.....#...o..#.........#.",
    ".#.........#......#........G#.",
    ".############################.",
    "..............................",
];
