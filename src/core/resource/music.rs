//=========================================================================
// Music
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::sound::Pcm;
use super::{Resource, ResourceError};
use crate::core::audio::SoundId;
use crate::core::Context;

//=== Music ===============================================================

/// Long-running background audio, looping by default.
///
/// The runtime advances every voice once per frame, so `update_stream`
/// only exists for code written against frame-pumped streams.
#[derive(Debug, Default)]
pub struct Music {
    id: Option<SoundId>,
}

impl Music {
    //--- Loading ----------------------------------------------------------

    pub fn load_stream(path: impl AsRef<Path>, ctx: &mut Context) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let music = Self::from_pcm(Pcm::read_file(path)?, ctx)?;
        debug!(target: "resource", "Music stream opened from {}", path.display());
        Ok(music)
    }

    pub fn load_stream_from_memory(bytes: &[u8], ctx: &mut Context) -> Result<Self, ResourceError> {
        Self::from_pcm(Pcm::decode(bytes)?, ctx)
    }

    fn from_pcm(pcm: Pcm, ctx: &mut Context) -> Result<Self, ResourceError> {
        let id = ctx
            .audio
            .create_voice(pcm.samples, pcm.channels, pcm.sample_rate, true)?;
        Ok(Self { id: Some(id) })
    }

    //--- Stream Control ---------------------------------------------------

    pub fn play_stream(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.play(self.loaded()?)
    }

    /// No-op; kept for frame-pumped call sites.
    pub fn update_stream(&self, _ctx: &mut Context) -> Result<(), ResourceError> {
        let id = self.loaded()?;
        trace!(target: "audio", "update_stream({}) ignored", id.raw());
        Ok(())
    }

    pub fn stop_stream(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.stop(self.loaded()?)
    }

    pub fn pause_stream(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.pause(self.loaded()?)
    }

    pub fn resume_stream(&self, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.resume(self.loaded()?)
    }

    /// Jumps to `seconds`, clamped to the stream length.
    pub fn seek_stream(&self, seconds: f32, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.seek(self.loaded()?, seconds)
    }

    pub fn set_looping(&self, looping: bool, ctx: &mut Context) -> Result<(), ResourceError> {
        ctx.audio.set_looping(self.loaded()?, looping)
    }

    //--- Queries & Parameters ---------------------------------------------

    pub fn is_playing(&self, ctx: &Context) -> bool {
        self.id.is_some_and(|id| ctx.audio.is_playing(id))
    }

    pub fn time_length(&self, ctx: &Context) -> Result<f32, ResourceError> {
        ctx.audio.time_length(self.loaded()?)
    }

    pub fn time_played(&self, ctx: &Context) -> Result<f32, ResourceError> {
        ctx.audio.time_played(self.loaded()?)
    }

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
        self.id.ok_or(ResourceError::NotReady("Music"))
    }
}

impl Resource for Music {
    fn is_ready(&self) -> bool {
        self.id.is_some()
    }

    fn unload(&mut self, ctx: &mut Context) -> Result<(), ResourceError> {
        let id = self.id.take().ok_or(ResourceError::NotReady("Music"))?;
        ctx.audio.release_voice(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
