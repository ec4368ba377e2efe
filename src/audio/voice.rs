//! Voice controller
//!
//! Owns one device source voice per logical channel. Every trigger stops and
//! flushes the channel before submitting, so a channel never holds more than
//! one buffer and a stale buffer can never race a new one.
//!
//! Device failures are logged and swallowed: the game keeps running silently.

use std::collections::HashMap;

use crate::audio::device::{AudioDevice, ChannelHandle};
use crate::audio::wav::{AudioAsset, PcmFormat};
use crate::error::AudioDeviceError;

/// Logical output slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Background track, loops
    Music,
    /// One-shot effects, each cuts off the previous
    Effect,
}

/// Named one-shot effects sharing the effect channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Snake ate food
    Eat,
    /// Run ended
    GameOver,
}

#[derive(Debug, Default)]
struct Voice {
    handle: Option<ChannelHandle>,
    format: Option<PcmFormat>,
    asset: Option<AudioAsset>,
    /// A buffer was submitted and has not been stopped since
    active: bool,
}

/// Per-channel playback state on top of an [`AudioDevice`]
#[derive(Debug)]
pub struct VoiceController<D: AudioDevice> {
    device: D,
    music: Voice,
    effect: Voice,
    sounds: HashMap<Sound, AudioAsset>,
    music_enabled: bool,
}

/// Stop, flush, submit, start: the only way a buffer reaches the device
fn restart_voice<D: AudioDevice>(
    device: &mut D,
    handle: ChannelHandle,
    samples: &[u8],
    looped: bool,
) -> Result<(), AudioDeviceError> {
    device.stop(handle)?;
    device.flush(handle)?;
    device.submit(handle, samples, looped)?;
    device.start(handle)
}

fn halt_voice<D: AudioDevice>(device: &mut D, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
    device.stop(handle)?;
    device.flush(handle)
}

impl<D: AudioDevice> VoiceController<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            music: Voice::default(),
            effect: Voice::default(),
            sounds: HashMap::new(),
            music_enabled: true,
        }
    }

    fn voice(&self, channel: Channel) -> &Voice {
        match channel {
            Channel::Music => &self.music,
            Channel::Effect => &self.effect,
        }
    }

    fn voice_and_device(&mut self, channel: Channel) -> (&mut Voice, &mut D) {
        match channel {
            Channel::Music => (&mut self.music, &mut self.device),
            Channel::Effect => (&mut self.effect, &mut self.device),
        }
    }

    /// Create the device voice on first use; later assets must share its format
    fn ensure_handle(&mut self, channel: Channel, format: &PcmFormat) -> Option<ChannelHandle> {
        let (voice, device) = self.voice_and_device(channel);
        if let Some(handle) = voice.handle {
            if voice.format.as_ref() != Some(format) {
                log::warn!(
                    "{channel:?} asset format {format:?} differs from voice format {:?}",
                    voice.format
                );
            }
            return Some(handle);
        }

        match device.create_channel(format) {
            Ok(handle) => {
                voice.handle = Some(handle);
                voice.format = Some(*format);
                Some(handle)
            }
            Err(e) => {
                log::warn!("Failed to create {channel:?} voice - channel silent: {e}");
                None
            }
        }
    }

    /// Bind the asset `trigger` plays on `channel`.
    ///
    /// `None` (a failed load) leaves the channel silent; every call on it
    /// stays a safe no-op.
    pub fn bind(&mut self, channel: Channel, asset: Option<AudioAsset>) {
        let Some(asset) = asset else {
            self.stop(channel);
            self.voice_and_device(channel).0.asset = None;
            log::info!("{channel:?} channel has no asset - running silent");
            return;
        };

        if self.ensure_handle(channel, asset.format()).is_some() {
            self.voice_and_device(channel).0.asset = Some(asset);
        }
    }

    /// Bind a named effect. The first bound effect also becomes the channel's default.
    pub fn bind_effect(&mut self, sound: Sound, asset: Option<AudioAsset>) {
        let Some(asset) = asset else {
            self.sounds.remove(&sound);
            log::info!("{sound:?} effect has no asset - running silent");
            return;
        };

        if self.ensure_handle(Channel::Effect, asset.format()).is_none() {
            return;
        }
        if self.effect.asset.is_none() {
            self.effect.asset = Some(asset.clone());
        }
        self.sounds.insert(sound, asset);
    }

    /// Restart `channel` from the beginning of its bound asset.
    ///
    /// No-op when the channel is unbound, muted, or its asset holds no samples.
    pub fn trigger(&mut self, channel: Channel, looped: bool) {
        if channel == Channel::Music && !self.music_enabled {
            return;
        }

        let (voice, device) = self.voice_and_device(channel);
        let (Some(handle), Some(asset)) = (voice.handle, voice.asset.as_ref()) else {
            return;
        };
        if asset.is_silent() {
            return;
        }

        match restart_voice(device, handle, asset.samples(), looped) {
            Ok(()) => voice.active = true,
            Err(e) => {
                voice.active = false;
                log::warn!("{channel:?} playback failed: {e}");
            }
        }
    }

    /// Play a named effect, cutting off whatever the effect channel was playing
    pub fn play_effect(&mut self, sound: Sound) {
        let Some(asset) = self.sounds.get(&sound) else {
            log::trace!("{sound:?} not bound, skipping");
            return;
        };
        self.effect.asset = Some(asset.clone());
        self.trigger(Channel::Effect, false);
    }

    /// Stop and flush `channel`, leaving it idle
    pub fn stop(&mut self, channel: Channel) {
        let (voice, device) = self.voice_and_device(channel);
        let Some(handle) = voice.handle else {
            return;
        };
        voice.active = false;
        if let Err(e) = halt_voice(device, handle) {
            log::warn!("{channel:?} stop failed: {e}");
        }
    }

    /// Mute or unmute music. Unmuting restarts the looping track from the top.
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if enabled {
            self.trigger(Channel::Music, true);
        } else {
            self.stop(Channel::Music);
        }
    }

    /// Unmute without starting playback; the next music trigger plays the track
    pub fn arm_music(&mut self) {
        self.music_enabled = true;
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// True if `channel` has a device voice and something to play
    pub fn is_bound(&self, channel: Channel) -> bool {
        let voice = self.voice(channel);
        voice.handle.is_some() && voice.asset.is_some()
    }

    /// True if a buffer has been submitted on `channel` and not stopped since
    pub fn is_active(&self, channel: Channel) -> bool {
        self.voice(channel).active
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
