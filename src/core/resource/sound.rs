//=========================================================================
// Sound
//=========================================================================
//
// Fully decoded one-shot audio, plus the WAV decoding shared with Music.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::{Cursor, Read};
use std::path::Path;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{Resource, ResourceError};
use crate::core::audio::SoundId;
use crate::core::Context;

//=== Decoded PCM =========================================================

/// Interleaved samples normalized to `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Pcm {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl Pcm {
    pub fn read_file(path: &Path) -> Result<Self, ResourceError> {
        let bytes = std::fs::read(path).map_err(|e| ResourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::decode(&bytes)
    }

    /// Decodes WAV bytes. Integer samples are scaled by their bit depth.
    pub fn decode(bytes: &[u8]) -> Result<Self, ResourceError> {
        let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(decode_error)?;
        Self::from_reader(reader)
    }

    fn from_reader<R: Read>(mut reader: hound::WavReader<R>) -> Result<Self, ResourceError> {
        let spec = reader.spec();

        let samples: Result<Vec<f32>, _> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect(),
            hound::SampleFormat::Int => {
                let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 / max_value))
                    .collect()
            }
        };

        Ok(Self {
            samples: samples.map_err(decode_error)?,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }
}

fn decode_error(e: hound::Error) -> ResourceError {
    ResourceError::Decode(format!("WAV: {}", e))
}

//=== Sound ===============================================================

/// A short sound held entirely in memory.
#[derive(Debug, Default)]
pub struct Sound {
    id: Option<SoundId>,
}

impl Sound {
    //--- Loading ----------------------------------------------------------

    /// Decodes a WAV file and creates its voice.
    pub fn load(path: impl AsRef<Path>, ctx: &mut Context) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let pcm = Pcm::read_file(path)?;
        let sound = Self::from_pcm(pcm, ctx)?;
        debug!(target: "resource", "Sound {} loaded from {}", sound.raw_id(), path.display());
        Ok(sound)
    }

    /// Decodes in-memory WAV bytes.
    pub fn load_from_memory(bytes: &[u8], ctx: &mut Context) -> Result<Self, ResourceError> {
        Self::from_pcm(Pcm::decode(bytes)?, ctx)
    }

    /// Wraps interleaved samples in `[-1, 1]`.
    pub fn from_samples(
        samples: Vec<f32>,
        channels: u16,
        sample_rate: u32,
        ctx: &mut Context,
    ) -> Result<Self, ResourceError> {
        Self::from_pcm(Pcm { samples, channels, sample_rate }, ctx)
    }

    fn from_pcm(pcm: Pcm, ctx: &mut Context) -> Result<Self, ResourceError> {
        let id = ctx
            .audio
            .create_voice(pcm.samples, pcm.channels, pcm.sample_rate, false)?;
        Ok(Self { id: Some(id) })
    }

    //--- Playback ---------------------------------------------------------

    pub fn play(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.play(self.loaded()?)
    }

    pub fn stop(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.stop(self.loaded()?)
    }

    pub fn pause(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.pause(self.loaded()?)
    }

    pub fn resume(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.resume(self.loaded()?)
    }

    pub fn is_playing(&self, ctx: &Context) -> bool {
        self.id.is_some_and(|id| ctx.audio.is_playing(id))
    }

    //--- Parameters -------------------------------------------------------

    pub fn set_volume(&self, volume: f32, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.set_volume(self.loaded()?, volume)
    }

    pub fn set_pitch(&self, pitch: f32, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.set_pitch(self.loaded()?, pitch)
    }

    pub fn set_pan(&self, pan: f32, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.set_pan(self.loaded()?, pan)
    }

    pub fn id(&self) -> Option<SoundId> {
        self.id
    }

    fn loaded(&self) -> Result<SoundId, ResourceError> {
        self.id.ok_or(ResourceError::NotReady("Sound"))
    }

    fn raw_id(&self) -> u32 {
        self.id.map_or(0, |id| id.raw())
    }
}

impl Resource for Sound {
    fn is_ready(&self) -> bool {
        self.id.is_some()
    }

    fn unload(&mut self, ctx: &mut Context) -> Result<(), ResourceError> {
        let id = self.id.take().ok_or(ResourceError::NotReady("Sound"))?;
        ctx.audio.release_voice(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
