//! Error types
//!
//! None of these are fatal to a running session: asset and device failures
//! degrade to silence, settings failures fall back to defaults.

use glam::IVec2;

/// Failure to decode a RIFF/WAVE container
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetParseError {
    /// Input is shorter than the minimal RIFF/WAVE header
    #[error("input is {len} bytes, shorter than the {min}-byte minimum header")]
    TooShort { len: usize, min: usize },

    /// Container or form tag is not RIFF/WAVE
    #[error("missing RIFF/WAVE magic")]
    BadMagic,

    /// A data chunk appeared before any format chunk
    #[error("data chunk precedes the format chunk")]
    MissingFormatChunk,

    /// The chunk list ended without a data chunk
    #[error("no data chunk found")]
    MissingDataChunk,

    /// Format chunk declares zero channels
    #[error("format chunk declares zero channels")]
    ZeroChannels,

    /// Format chunk payload is too small to hold a PCM description
    #[error("format chunk is {len} bytes, expected at least 16")]
    FormatChunkTooShort { len: usize },

    /// A chunk's declared length runs past the end of the input
    #[error("chunk '{tag}' at offset {offset} declares {declared} bytes, overrunning the input")]
    ChunkOverrun {
        tag: String,
        offset: usize,
        declared: usize,
    },
}

/// Failure reported by the platform audio device
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioDeviceError {
    /// No output device is available
    #[error("audio device unavailable: {0}")]
    Unavailable(String),

    /// A device operation failed
    #[error("audio device {op} failed: {reason}")]
    Operation { op: &'static str, reason: String },
}

/// Invalid explicit grid scenario
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("grid sides must be at least 2 cells, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32 },

    #[error("snake must have at least one segment")]
    EmptySnake,

    #[error("cell {0} lies outside the grid")]
    OutOfBounds(IVec2),

    #[error("snake occupies cell {0} more than once")]
    DuplicateSegment(IVec2),

    #[error("food at {0} overlaps the snake")]
    FoodOnSnake(IVec2),
}

/// Failure to load or validate settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
