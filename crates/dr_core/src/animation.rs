//! Sprite-strip animation clips and state-indexed clip sets.
//!
//! A clip cycles through frames laid out horizontally in a single strip image.
//! Playback time is accumulated in integer microseconds (`u64`), so a run of
//! small deltas lands on exactly the same frame as one large delta of the same
//! total length -- no floating-point drift across frame boundaries.
//!
//! Strip manifests are JSON files that describe strips by name; see
//! [`load_strip_manifest`].

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

const DEFAULT_FPS: f32 = 10.0;

/// Source region of one frame inside its strip, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One strip of frames plus its own playback cursor.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub strip: PathBuf,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
    pub frame_time_us: u64,
    pub looping: bool,
    pub frame_index: usize,
    pub elapsed_us: u64,
    pub playing: bool,
    pub finished: bool,
}

impl AnimationClip {
    /// A stopped, looping clip at the default 10 fps.
    pub fn new(strip: impl Into<PathBuf>, frame_width: u32, frame_height: u32, frame_count: usize) -> Self {
        Self {
            strip: strip.into(),
            frame_width,
            frame_height,
            frame_count,
            frame_time_us: fps_to_frame_time_us(DEFAULT_FPS),
            looping: true,
            frame_index: 0,
            elapsed_us: 0,
            playing: false,
            finished: false,
        }
    }

    /// Build a clip for a strip on disk. Fails when the strip file is missing so
    /// the caller can leave that animation slot empty.
    pub fn load_strip(
        path: &Path,
        frame_width: u32,
        frame_height: u32,
        frame_count: usize,
    ) -> Result<Self, String> {
        if frame_width == 0 || frame_height == 0 || frame_count == 0 {
            return Err(format!(
                "Invalid strip geometry for {}: {}x{} x{} frames",
                path.display(),
                frame_width,
                frame_height,
                frame_count
            ));
        }
        let meta = fs::metadata(path)
            .map_err(|e| format!("Failed to read sprite strip {}: {e}", path.display()))?;
        if !meta.is_file() {
            return Err(format!("Sprite strip {} is not a file", path.display()));
        }
        Ok(Self::new(path, frame_width, frame_height, frame_count))
    }

    /// Non-positive rates are ignored.
    pub fn set_frame_rate(&mut self, fps: f32) {
        if fps > 0.0 {
            self.frame_time_us = fps_to_frame_time_us(fps);
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn play(&mut self) {
        self.playing = true;
        self.finished = false;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.elapsed_us = 0;
        self.finished = false;
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.update_us(secs_to_us(dt));
    }

    /// Advance by `dt_us` microseconds. Several frames may be consumed in one call.
    pub fn update_us(&mut self, dt_us: u64) {
        if !self.playing || self.finished || self.frame_count == 0 {
            return;
        }

        self.elapsed_us += dt_us;
        while self.elapsed_us >= self.frame_time_us {
            self.elapsed_us -= self.frame_time_us;
            self.frame_index += 1;

            if self.frame_index >= self.frame_count {
                if self.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = self.frame_count - 1;
                    self.elapsed_us = 0;
                    self.finished = true;
                    self.playing = false;
                    break;
                }
            }
        }
    }

    pub fn current_frame(&self) -> FrameRect {
        FrameRect {
            x: self.frame_index as u32 * self.frame_width,
            y: 0,
            width: self.frame_width,
            height: self.frame_height,
        }
    }
}

/// Maps a state enum onto a slot of an [`AnimationSet`].
pub trait AnimationKey: Copy {
    fn slot(self) -> usize;
}

/// One optional clip per state, stored in a fixed array indexed by the state.
///
/// Every slot owns its clip outright, so restarting one state's clip never
/// disturbs the cursor of another state that happens to use the same strip.
#[derive(Debug, Clone)]
pub struct AnimationSet<K, const N: usize> {
    clips: [Option<AnimationClip>; N],
    _key: PhantomData<K>,
}

impl<K: AnimationKey, const N: usize> AnimationSet<K, N> {
    pub fn new() -> Self {
        Self {
            clips: std::array::from_fn(|_| None),
            _key: PhantomData,
        }
    }

    pub fn insert(&mut self, key: K, clip: AnimationClip) {
        if let Some(slot) = self.clips.get_mut(key.slot()) {
            *slot = Some(clip);
        }
    }

    pub fn get(&self, key: K) -> Option<&AnimationClip> {
        self.clips.get(key.slot()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut AnimationClip> {
        self.clips.get_mut(key.slot()).and_then(Option::as_mut)
    }

    /// Rewind the clip for `key` and start it playing.
    pub fn restart(&mut self, key: K) {
        if let Some(clip) = self.get_mut(key) {
            clip.reset();
            clip.play();
        }
    }

    pub fn update(&mut self, key: K, dt: f32) {
        if let Some(clip) = self.get_mut(key) {
            clip.update(dt);
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.clips.iter().filter(|c| c.is_some()).count()
    }
}

impl<K: AnimationKey, const N: usize> Default for AnimationSet<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Description of one sprite strip, as authored in a manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct StripSpec {
    pub file: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: usize,
    pub fps: f32,
    pub looping: bool,
    pub autoplay: bool,
}

impl StripSpec {
    /// Resolve the strip under `root` and build a configured clip.
    pub fn load(&self, root: &Path) -> Result<AnimationClip, String> {
        let mut clip = AnimationClip::load_strip(
            &root.join(&self.file),
            self.frame_width,
            self.frame_height,
            self.frame_count,
        )?;
        clip.set_frame_rate(self.fps);
        clip.set_looping(self.looping);
        if self.autoplay {
            clip.play();
        }
        Ok(clip)
    }
}

/// Named strips loaded from a manifest file.
#[derive(Debug, Clone)]
pub struct StripManifest {
    pub version: String,
    pub manifest_id: String,
    pub strips: HashMap<String, StripSpec>,
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct StripManifestJson {
    version: String,
    manifest_id: String,
    strips: HashMap<String, StripSpecJson>,
}

#[derive(Debug, Deserialize)]
struct StripSpecJson {
    file: String,
    frame_width: u32,
    frame_height: u32,
    frame_count: usize,
    #[serde(default = "default_fps")]
    fps: f32,
    #[serde(default = "default_looping")]
    looping: bool,
    #[serde(default)]
    autoplay: bool,
}

/// Load a strip manifest from disk.
pub fn load_strip_manifest(path: &Path) -> Result<StripManifest, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read strip manifest {}: {e}", path.display()))?;
    let json: StripManifestJson = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse strip manifest {}: {e}", path.display()))?;
    validate_manifest_json(&json)?;

    let strips = json
        .strips
        .into_iter()
        .map(|(name, s)| {
            (
                name,
                StripSpec {
                    file: s.file,
                    frame_width: s.frame_width,
                    frame_height: s.frame_height,
                    frame_count: s.frame_count,
                    fps: s.fps,
                    looping: s.looping,
                    autoplay: s.autoplay,
                },
            )
        })
        .collect();

    Ok(StripManifest {
        version: json.version,
        manifest_id: json.manifest_id,
        strips,
    })
}

fn validate_manifest_json(json: &StripManifestJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Strip manifest validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.manifest_id.is_empty() {
        return Err("Strip manifest validation failed: manifest_id is empty".to_string());
    }
    for (name, strip) in &json.strips {
        if strip.file.is_empty() {
            return Err(format!(
                "Strip manifest validation failed: strip '{}' has empty file",
                name
            ));
        }
        if strip.frame_count == 0 {
            return Err(format!(
                "Strip manifest validation failed: strip '{}' has no frames",
                name
            ));
        }
        if strip.frame_width == 0 || strip.frame_height == 0 {
            return Err(format!(
                "Strip manifest validation failed: strip '{}' has zero frame size",
                name
            ));
        }
        if strip.fps <= 0.0 {
            return Err(format!(
                "Strip manifest validation failed: strip '{}' has non-positive fps",
                name
            ));
        }
    }
    Ok(())
}

fn fps_to_frame_time_us(fps: f32) -> u64 {
    ((1_000_000.0 / fps as f64).round() as u64).max(1)
}

fn secs_to_us(dt: f32) -> u64 {
    (dt.max(0.0) as f64 * 1_000_000.0).round() as u64
}

const fn default_fps() -> f32 {
    DEFAULT_FPS
}

const fn default_looping() -> bool {
    true
}
