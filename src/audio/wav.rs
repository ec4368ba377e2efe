//! RIFF/WAVE decoding
//!
//! Extracts the PCM description and the sample byte range from a WAV file.
//! Samples are never copied, resampled or transcoded: the device plays the
//! original bytes as-is.

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AssetParseError;

/// Smallest valid container: RIFF header (12) + fmt chunk (8 + 16) + data chunk header (8)
pub const MIN_HEADER_LEN: usize = 44;

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";
const DATA_TAG: &[u8; 4] = b"data";

/// Offset of the first chunk after the RIFF/WAVE preamble
const FIRST_CHUNK_OFFSET: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const FMT_MIN_LEN: usize = 16;

/// PCM format as declared by the `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PcmFormat {
    /// 1 = integer PCM, 3 = float, 0xFFFE = extensible
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per frame (all channels)
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Format tag for plain integer PCM
    pub const PCM: u16 = 1;

    /// Integer PCM with derived byte rate and block alignment
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let block_align = channels.saturating_mul(bits_per_sample.div_ceil(8));
        Self {
            format_tag: Self::PCM,
            channels,
            sample_rate,
            byte_rate: sample_rate.saturating_mul(block_align as u32),
            block_align,
            bits_per_sample,
        }
    }

    /// Playback length of `data_len` bytes in seconds
    pub fn duration_secs(&self, data_len: usize) -> f32 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        data_len as f32 / self.byte_rate as f32
    }
}

/// Where the pieces of a WAV file live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavLayout {
    pub format: PcmFormat,
    /// Byte range of the `data` chunk payload within the input
    pub data: Range<usize>,
}

#[inline]
fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn parse_format(body: &[u8]) -> Result<PcmFormat, AssetParseError> {
    if body.len() < FMT_MIN_LEN {
        return Err(AssetParseError::FormatChunkTooShort { len: body.len() });
    }

    // Extension bytes past the first 16 are ignored
    let format = PcmFormat {
        format_tag: read_u16(body, 0),
        channels: read_u16(body, 2),
        sample_rate: read_u32(body, 4),
        byte_rate: read_u32(body, 8),
        block_align: read_u16(body, 12),
        bits_per_sample: read_u16(body, 14),
    };

    if format.channels == 0 {
        return Err(AssetParseError::ZeroChannels);
    }
    Ok(format)
}

/// Locate the format and sample data of a WAV file without copying it
pub fn parse_layout(bytes: &[u8]) -> Result<WavLayout, AssetParseError> {
    if bytes.len() < MIN_HEADER_LEN {
        return Err(AssetParseError::TooShort {
            len: bytes.len(),
            min: MIN_HEADER_LEN,
        });
    }
    if &bytes[0..4] != RIFF_TAG || &bytes[8..12] != WAVE_TAG {
        return Err(AssetParseError::BadMagic);
    }

    let mut format = None;
    let mut pos = FIRST_CHUNK_OFFSET;

    while pos + CHUNK_HEADER_LEN <= bytes.len() {
        let tag = &bytes[pos..pos + 4];
        let declared = read_u32(bytes, pos + 4) as usize;
        let body = pos + CHUNK_HEADER_LEN;
        let end = body
            .checked_add(declared)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| AssetParseError::ChunkOverrun {
                tag: String::from_utf8_lossy(tag).into_owned(),
                offset: pos,
                declared,
            })?;

        if tag == FMT_TAG {
            format = Some(parse_format(&bytes[body..end])?);
        } else if tag == DATA_TAG {
            let format = format.ok_or(AssetParseError::MissingFormatChunk)?;
            return Ok(WavLayout {
                format,
                data: body..end,
            });
        }

        // Payloads are padded to an even length
        pos = end + (declared & 1);
    }

    Err(AssetParseError::MissingDataChunk)
}

/// A decoded sound: the original file bytes plus where its samples are
#[derive(Debug, Clone)]
pub struct AudioAsset {
    bytes: Arc<[u8]>,
    format: PcmFormat,
    data: Range<usize>,
}

impl AudioAsset {
    /// Parse a WAV file, keeping the buffer so samples can be borrowed from it
    pub fn parse(bytes: Vec<u8>) -> Result<Self, AssetParseError> {
        let layout = parse_layout(&bytes)?;
        Ok(Self {
            bytes: bytes.into(),
            format: layout.format,
            data: layout.data,
        })
    }

    pub fn format(&self) -> &PcmFormat {
        &self.format
    }

    /// Raw PCM sample bytes, a view into the original file
    pub fn samples(&self) -> &[u8] {
        &self.bytes[self.data.clone()]
    }

    /// The complete original file
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte range of the samples within [`AudioAsset::bytes`]
    pub fn data_range(&self) -> Range<usize> {
        self.data.clone()
    }

    /// True if there is nothing to play
    pub fn is_silent(&self) -> bool {
        self.data.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.format.duration_secs(self.data.len())
    }
}
