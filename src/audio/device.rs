//! Platform audio device seam
//!
//! The presentation layer owns the real output device and renders submitted
//! buffers on its own thread. The core only talks to it through this trait.

use crate::audio::wav::PcmFormat;
use crate::error::AudioDeviceError;

/// Opaque handle to one device-side source voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelHandle(pub u32);

/// Output device operations the voice controller relies on
pub trait AudioDevice {
    /// Create a source voice that plays buffers of `format`
    fn create_channel(&mut self, format: &PcmFormat) -> Result<ChannelHandle, AudioDeviceError>;

    /// Queue `samples` for playback, looping forever if `looped`
    fn submit(
        &mut self,
        handle: ChannelHandle,
        samples: &[u8],
        looped: bool,
    ) -> Result<(), AudioDeviceError>;

    fn start(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError>;

    fn stop(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError>;

    /// Drop every queued buffer
    fn flush(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError>;
}

/// Device that accepts everything and plays nothing
#[derive(Debug, Default)]
pub struct NullAudioDevice {
    next_handle: u32,
}

impl AudioDevice for NullAudioDevice {
    fn create_channel(&mut self, _format: &PcmFormat) -> Result<ChannelHandle, AudioDeviceError> {
        self.next_handle += 1;
        Ok(ChannelHandle(self.next_handle))
    }

    fn submit(&mut self, _: ChannelHandle, _: &[u8], _: bool) -> Result<(), AudioDeviceError> {
        Ok(())
    }

    fn start(&mut self, _: ChannelHandle) -> Result<(), AudioDeviceError> {
        Ok(())
    }

    fn stop(&mut self, _: ChannelHandle) -> Result<(), AudioDeviceError> {
        Ok(())
    }

    fn flush(&mut self, _: ChannelHandle) -> Result<(), AudioDeviceError> {
        Ok(())
    }
}

/// Silent device that logs every call at debug level (headless runs)
#[derive(Debug, Default)]
pub struct LoggingAudioDevice {
    next_handle: u32,
    submitted_bytes: u64,
}

impl LoggingAudioDevice {
    /// Total sample bytes submitted so far
    pub fn submitted_bytes(&self) -> u64 {
        self.submitted_bytes
    }
}

impl AudioDevice for LoggingAudioDevice {
    fn create_channel(&mut self, format: &PcmFormat) -> Result<ChannelHandle, AudioDeviceError> {
        self.next_handle += 1;
        log::debug!(
            "audio: channel {} created ({} ch, {} Hz, {} bit)",
            self.next_handle,
            format.channels,
            format.sample_rate,
            format.bits_per_sample
        );
        Ok(ChannelHandle(self.next_handle))
    }

    fn submit(
        &mut self,
        handle: ChannelHandle,
        samples: &[u8],
        looped: bool,
    ) -> Result<(), AudioDeviceError> {
        self.submitted_bytes += samples.len() as u64;
        log::debug!(
            "audio: channel {} submit {} bytes{}",
            handle.0,
            samples.len(),
            if looped { " (looping)" } else { "" }
        );
        Ok(())
    }

    fn start(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
        log::debug!("audio: channel {} start", handle.0);
        Ok(())
    }

    fn stop(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
        log::debug!("audio: channel {} stop", handle.0);
        Ok(())
    }

    fn flush(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
        log::debug!("audio: channel {} flush", handle.0);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One observed device call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum DeviceCall {
        Create(ChannelHandle, PcmFormat),
        Submit {
            handle: ChannelHandle,
            len: usize,
            looped: bool,
        },
        Start(ChannelHandle),
        Stop(ChannelHandle),
        Flush(ChannelHandle),
    }

    /// Device that records every call and can be told to fail
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAudioDevice {
        pub calls: Vec<DeviceCall>,
        pub fail_create: bool,
        pub fail_submit: bool,
        next_handle: u32,
    }

    impl RecordingAudioDevice {
        pub fn submits(&self) -> Vec<(ChannelHandle, usize, bool)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DeviceCall::Submit {
                        handle,
                        len,
                        looped,
                    } => Some((*handle, *len, *looped)),
                    _ => None,
                })
                .collect()
        }

        pub fn clear(&mut self) {
            self.calls.clear();
        }
    }

    impl AudioDevice for RecordingAudioDevice {
        fn create_channel(
            &mut self,
            format: &PcmFormat,
        ) -> Result<ChannelHandle, AudioDeviceError> {
            if self.fail_create {
                return Err(AudioDeviceError::Unavailable("no output device".into()));
            }
            self.next_handle += 1;
            let handle = ChannelHandle(self.next_handle);
            self.calls.push(DeviceCall::Create(handle, *format));
            Ok(handle)
        }

        fn submit(
            &mut self,
            handle: ChannelHandle,
            samples: &[u8],
            looped: bool,
        ) -> Result<(), AudioDeviceError> {
            if self.fail_submit {
                return Err(AudioDeviceError::Operation {
                    op: "submit",
                    reason: "buffer rejected".into(),
                });
            }
            self.calls.push(DeviceCall::Submit {
                handle,
                len: samples.len(),
                looped,
            });
            Ok(())
        }

        fn start(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
            self.calls.push(DeviceCall::Start(handle));
            Ok(())
        }

        fn stop(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
            self.calls.push(DeviceCall::Stop(handle));
            Ok(())
        }

        fn flush(&mut self, handle: ChannelHandle) -> Result<(), AudioDeviceError> {
            self.calls.push(DeviceCall::Flush(handle));
            Ok(())
        }
    }
}
