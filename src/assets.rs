//! Sound asset storage
//!
//! Three named WAV files are expected. Any of them may be missing or broken;
//! the matching channel then stays silent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::audio::AudioAsset;

/// Effect played when the snake eats
pub const EAT_SOUND: &str = "eat.wav";
/// Effect played when the run ends
pub const GAME_OVER_SOUND: &str = "gameover.wav";
/// Looping background track
pub const MUSIC_TRACK: &str = "music.wav";

/// Source of raw asset bytes
pub trait AssetStore {
    /// Bytes of the asset called `name`, or `None` if it is absent or empty
    fn load_bytes(&self, name: &str) -> Option<Vec<u8>>;
}

/// Assets read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for DirAssetStore {
    fn load_bytes(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => {
                log::warn!("Asset {} is empty", path.display());
                None
            }
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("Failed to read asset {}: {e}", path.display());
                None
            }
        }
    }
}

/// Assets held in memory (embedded data, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }

    pub fn with(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl AssetStore for MemoryAssetStore {
    fn load_bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.entries.get(name).filter(|b| !b.is_empty()).cloned()
    }
}

/// Load and decode `name`, logging and returning `None` on any failure
pub fn load_asset(store: &dyn AssetStore, name: &str) -> Option<AudioAsset> {
    let bytes = store.load_bytes(name)?;
    match AudioAsset::parse(bytes) {
        Ok(asset) => {
            log::info!(
                "Loaded {name}: {} ch, {} Hz, {} bit, {:.2}s",
                asset.format().channels,
                asset.format().sample_rate,
                asset.format().bits_per_sample,
                asset.duration_secs()
            );
            Some(asset)
        }
        Err(e) => {
            log::warn!("Failed to decode {name} - silent: {e}");
            None
        }
    }
}
