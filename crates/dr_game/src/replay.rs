//! Scripted input for headless runs.
//!
//! A replay is a list of held-key frames, each repeated some number of fixed
//! ticks. Feeding the same replay to two fresh games yields identical runs.

use dr_core::input::MoveIntent;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// Hold right for `ticks` ticks at 60 Hz.
    pub fn walk_right(ticks: u32) -> Self {
        Self {
            fixed_dt: default_dt(),
            frames: vec![ReplayFrame {
                right: true,
                repeat: ticks,
                ..ReplayFrame::default()
            }],
        }
    }

    /// One intent per tick. A zero repeat still counts once.
    pub fn intents(&self) -> Vec<MoveIntent> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let intent = MoveIntent {
                left: frame.left,
                right: frame.right,
                up: frame.up,
                down: frame.down,
                jump: frame.jump,
            };
            for _ in 0..frame.repeat.max(1) {
                out.push(intent);
            }
        }
        out
    }

    pub fn duration(&self) -> f32 {
        let ticks: u32 = self.frames.iter().map(|f| f.repeat.max(1)).sum();
        ticks as f32 * self.fixed_dt
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}
