//! Which strip each entity state animates with.
//!
//! Strips are named `<entity>_<action>`, e.g. `player_run` or `owlet_monster_walk`.
//! States that share an action (running left and right, jumping and falling)
//! each get their own clip built from the same strip.

use dr_core::animation::{load_strip_manifest, AnimationClip, StripSpec};
use std::collections::HashMap;
use std::path::Path;

use crate::enemy::{EnemyAnimations, EnemyKind, EnemyState};
use crate::player::{PlayerAnimations, PlayerState};

const FRAME_SIZE: u32 = 32;

const PLAYER_ACTIONS: [(PlayerState, &str); 7] = [
    (PlayerState::Idle, "idle"),
    (PlayerState::RunningLeft, "run"),
    (PlayerState::RunningRight, "run"),
    (PlayerState::Jumping, "jump"),
    (PlayerState::Falling, "jump"),
    (PlayerState::Hurt, "hurt"),
    (PlayerState::Dead, "death"),
];

const ENEMY_ACTIONS: [(EnemyState, &str); 4] = [
    (EnemyState::Idle, "idle"),
    (EnemyState::Walking, "walk"),
    (EnemyState::Hurt, "hurt"),
    (EnemyState::Dead, "death"),
];

#[derive(Debug, Clone)]
pub struct SpriteLibrary {
    strips: HashMap<String, StripSpec>,
}

impl SpriteLibrary {
    /// The stock Tiny Monsters strips shipped under `assets/sprites`.
    pub fn builtin() -> Self {
        let mut strips = HashMap::new();
        let mut add = |name: &str, file: String, frames: usize, fps: f32, looping: bool| {
            strips.insert(
                name.to_string(),
                StripSpec {
                    file,
                    frame_width: FRAME_SIZE,
                    frame_height: FRAME_SIZE,
                    frame_count: frames,
                    fps,
                    looping,
                    autoplay: looping,
                },
            );
        };

        add("player_idle", "Dude_Monster_Idle_4.png".into(), 4, 10.0, true);
        add("player_run", "Dude_Monster_Run_6.png".into(), 6, 18.0, true);
        add("player_jump", "Dude_Monster_Jump_8.png".into(), 8, 20.0, false);
        add("player_hurt", "Dude_Monster_Hurt_4.png".into(), 4, 15.0, false);
        add("player_death", "Dude_Monster_Death_8.png".into(), 8, 12.0, false);

        for kind in [EnemyKind::PinkMonster, EnemyKind::OwletMonster] {
            let entity = enemy_entity(kind);
            let prefix = kind.sprite_prefix();
            add(&format!("{entity}_idle"), format!("{prefix}Idle_4.png"), 4, 8.0, true);
            add(&format!("{entity}_walk"), format!("{prefix}Walk_6.png"), 6, 12.0, true);
            add(&format!("{entity}_hurt"), format!("{prefix}Hurt_4.png"), 4, 12.0, false);
            add(&format!("{entity}_death"), format!("{prefix}Death_8.png"), 8, 12.0, false);
        }

        Self { strips }
    }

    /// Built-in strips overridden by whatever the manifest names.
    pub fn with_manifest(path: &Path) -> Result<Self, String> {
        let manifest = load_strip_manifest(path)?;
        let mut library = Self::builtin();
        log::info!(
            "Sprite manifest '{}' overrides {} strips",
            manifest.manifest_id,
            manifest.strips.len()
        );
        library.strips.extend(manifest.strips);
        Ok(library)
    }

    pub fn strip(&self, name: &str) -> Option<&StripSpec> {
        self.strips.get(name)
    }

    pub fn player_animations(&self, root: &Path) -> PlayerAnimations {
        let mut set = PlayerAnimations::new();
        for (state, action) in PLAYER_ACTIONS {
            if let Some(clip) = self.load(&format!("player_{action}"), root) {
                set.insert(state, clip);
            }
        }
        set
    }

    pub fn enemy_animations(&self, kind: EnemyKind, root: &Path) -> EnemyAnimations {
        let entity = enemy_entity(kind);
        let mut set = EnemyAnimations::new();
        for (state, action) in ENEMY_ACTIONS {
            if let Some(clip) = self.load(&format!("{entity}_{action}"), root) {
                set.insert(state, clip);
            }
        }
        set
    }

    fn load(&self, name: &str, root: &Path) -> Option<AnimationClip> {
        let Some(spec) = self.strips.get(name) else {
            log::warn!("No strip named '{name}', using placeholder");
            return None;
        };
        match spec.load(root) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("{e}; using placeholder for '{name}'");
                None
            }
        }
    }
}

impl Default for SpriteLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn enemy_entity(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::PinkMonster => "pink_monster",
        EnemyKind::OwletMonster => "owlet_monster",
    }
}
