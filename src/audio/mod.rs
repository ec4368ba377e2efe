//! Audio system
//!
//! WAV assets are decoded once at startup and played verbatim through a
//! platform device owned by the presentation layer.

pub mod device;
pub mod voice;
pub mod wav;

pub use device::{AudioDevice, ChannelHandle, LoggingAudioDevice, NullAudioDevice};
pub use voice::{Channel, Sound, VoiceController};
pub use wav::{AudioAsset, MIN_HEADER_LEN, PcmFormat, WavLayout, parse_layout};
