//! Save slots: one pretty-printed JSON document per named slot.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::Session;
use crate::story::NodeId;

const SAVE_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayer {
    pub health: i32,
    pub score: i32,
    pub riddles_solved: i32,
    pub failed_attempts: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedStory {
    pub current_node_id: NodeId,
    #[serde(default)]
    pub visited_nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub player: SavedPlayer,
    pub story: SavedStory,
    pub hints_remaining: i32,
    pub timestamp: DateTime<Utc>,
}

impl SaveData {
    pub fn capture(session: &Session) -> Self {
        let player = session.player();
        let story = session.story();
        Self {
            player: SavedPlayer {
                health: player.health(),
                score: player.score(),
                riddles_solved: player.riddles_solved(),
                failed_attempts: player.failed_attempts(),
                name: player.name.clone(),
            },
            story: SavedStory {
                current_node_id: story.current_node_id(),
                visited_nodes: story.visited().to_vec(),
            },
            hints_remaining: session.hints_remaining(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    /// Saves under the platform data directory, e.g.
    /// `~/.local/share/deathriddle/saves` on Linux.
    pub fn new() -> Result<Self, String> {
        let dirs = ProjectDirs::from("", "", "DeathRiddle")
            .ok_or_else(|| "Could not resolve a data directory for saves".to_string())?;
        Self::with_dir(&dirs.data_dir().join("saves"))
    }

    pub fn with_dir(dir: &Path) -> Result<Self, String> {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create save directory {}: {e}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SAVE_EXTENSION}"))
    }

    /// Written to a temp file first and renamed over the slot, so a failed
    /// write never leaves a truncated save behind.
    pub fn save_game(&self, session: &Session, name: &str) -> Result<(), String> {
        let result = self.write_slot(&SaveData::capture(session), name);
        match &result {
            Ok(()) => log::info!("Saved game to slot '{name}'"),
            Err(e) => log::error!("{e}"),
        }
        result
    }

    fn write_slot(&self, data: &SaveData, name: &str) -> Result<(), String> {
        validate_slot_name(name)?;
        let path = self.save_path(name);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| format!("Failed to serialize save '{name}': {e}"))?;
        fs::write(&tmp, bytes).map_err(|e| format!("Failed to write {}: {e}", tmp.display()))?;
        if path.exists() {
            let _ = fs::remove_file(&path);
        }
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            format!("Failed to replace {}: {e}", path.display())
        })
    }

    /// The whole document is read and checked before the session changes.
    pub fn load_game(&self, session: &mut Session, name: &str) -> Result<(), String> {
        let result = self.read_slot(session, name).and_then(|data| {
            session.restore_story(data.story.current_node_id, &data.story.visited_nodes)?;
            let p = &data.player;
            session.player_mut().restore_stats(
                p.health,
                p.score,
                p.riddles_solved,
                p.failed_attempts,
                &p.name,
            );
            session.set_hints_remaining(data.hints_remaining);
            Ok(data.timestamp)
        });
        match result {
            Ok(saved_at) => {
                log::info!("Loaded slot '{name}' saved at {}", saved_at.to_rfc3339());
                Ok(())
            }
            Err(e) => {
                log::error!("{e}");
                Err(e)
            }
        }
    }

    fn read_slot(&self, session: &Session, name: &str) -> Result<SaveData, String> {
        validate_slot_name(name)?;
        let path = self.save_path(name);
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let data: SaveData = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse save JSON {}: {e}", path.display()))?;
        validate_save(&data, session)?;
        Ok(data)
    }

    /// Slot names in the save directory, sorted.
    pub fn list_saves(&self) -> Result<Vec<String>, String> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| format!("Failed to read {}: {e}", self.dir.display()))?;
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == SAVE_EXTENSION))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn delete_save(&self, name: &str) -> Result<(), String> {
        validate_slot_name(name)?;
        let path = self.save_path(name);
        fs::remove_file(&path).map_err(|e| {
            let message = format!("Failed to delete {}: {e}", path.display());
            log::error!("{message}");
            message
        })
    }
}

fn validate_slot_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Save validation failed: slot name is empty".to_string());
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(format!("Save validation failed: invalid slot name '{name}'"));
    }
    Ok(())
}

fn validate_save(data: &SaveData, session: &Session) -> Result<(), String> {
    if data.player.health <= 0 {
        return Err("Save validation failed: player health must be > 0".to_string());
    }
    if data.hints_remaining < 0 {
        return Err("Save validation failed: hintsRemaining must be >= 0".to_string());
    }
    if session.story().node(data.story.current_node_id).is_none() {
        return Err(format!(
            "Save validation failed: story node {} does not exist",
            data.story.current_node_id
        ));
    }
    Ok(())
}
