//=========================================================================
// Audio
//=========================================================================
//
// Sound handle table with per-voice playback state.
//
// Architecture:
//   Audio
//     ├─ voices: HashMap<SoundId, Voice>   (decoded samples + cursor)
//     └─ master_volume
//
// The runtime calls `advance(delta)` once per frame; playing voices move
// their cursor by `delta * pitch` seconds. One-shot voices stop at the
// end of their samples, looping voices wrap around.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::resource::ResourceError;

//=== Handles & State =====================================================

/// Handle to a voice stored in [`Audio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(u32);

impl SoundId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Decoded samples and playback parameters of one sound.
#[derive(Debug, Clone)]
pub struct Voice {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
    looping: bool,
    state: PlaybackState,
    cursor: f32,
    volume: f32,
    pitch: f32,
    pan: f32,
}

impl Voice {
    /// Length in seconds.
    pub fn length(&self) -> f32 {
        let frames = self.samples.len() / self.channels as usize;
        frames as f32 / self.sample_rate as f32
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    fn advance(&mut self, delta: f32) {
        if self.state != PlaybackState::Playing {
            return;
        }

        let length = self.length();
        self.cursor += delta * self.pitch;

        if self.cursor >= length {
            if self.looping && length > 0.0 {
                self.cursor %= length;
            } else {
                self.state = PlaybackState::Stopped;
                self.cursor = 0.0;
            }
        }
    }
}

//=== Audio ===============================================================

/// Voice table and mixer parameters.
pub struct Audio {
    voices: HashMap<SoundId, Voice>,
    next_voice: u32,
    master_volume: f32,
}

impl Audio {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            voices: HashMap::new(),
            next_voice: 1,
            master_volume: 1.0,
        }
    }

    //--- Voice Table ------------------------------------------------------

    /// Stores interleaved `f32` samples and returns the new voice's handle.
    ///
    /// # Errors
    ///
    /// [`ResourceError::Decode`] if `channels` or `sample_rate` is zero.
    pub fn create_voice(
        &mut self,
        samples: Vec<f32>,
        channels: u16,
        sample_rate: u32,
        looping: bool,
    ) -> Result<SoundId, ResourceError> {
        if channels == 0 || sample_rate == 0 {
            return Err(ResourceError::Decode(format!(
                "invalid stream format ({} channels @ {} Hz)",
                channels, sample_rate
            )));
        }

        let id = SoundId(self.next_voice);
        self.next_voice += 1;

        self.voices.insert(
            id,
            Voice {
                samples,
                channels,
                sample_rate,
                looping,
                state: PlaybackState::Stopped,
                cursor: 0.0,
                volume: 1.0,
                pitch: 1.0,
                pan: 0.5,
            },
        );

        debug!(target: "audio", "Voice {} created ({} ch @ {} Hz)", id.0, channels, sample_rate);
        Ok(id)
    }

    /// Frees a voice. The handle is dead afterwards.
    pub fn release_voice(&mut self, id: SoundId) -> Result<(), ResourceError> {
        match self.voices.remove(&id) {
            Some(_) => {
                debug!(target: "audio", "Voice {} released", id.0);
                Ok(())
            }
            None => Err(invalid(id)),
        }
    }

    pub fn voice(&self, id: SoundId) -> Option<&Voice> {
        self.voices.get(&id)
    }

    /// Number of live voices.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    //--- Playback ---------------------------------------------------------

    /// Starts playback from the beginning.
    pub fn play(&mut self, id: SoundId) -> Result<(), ResourceError> {
        let voice = self.voice_mut(id)?;
        voice.state = PlaybackState::Playing;
        voice.cursor = 0.0;
        Ok(())
    }

    pub fn stop(&mut self, id: SoundId) -> Result<(), ResourceError> {
        let voice = self.voice_mut(id)?;
        voice.state = PlaybackState::Stopped;
        voice.cursor = 0.0;
        Ok(())
    }

    /// Pauses a playing voice; other states are left alone.
    pub fn pause(&mut self, id: SoundId) -> Result<(), ResourceError> {
        let voice = self.voice_mut(id)?;
        if voice.state == PlaybackState::Playing {
            voice.state = PlaybackState::Paused;
        }
        Ok(())
    }

    /// Resumes a paused voice; other states are left alone.
    pub fn resume(&mut self, id: SoundId) -> Result<(), ResourceError> {
        let voice = self.voice_mut(id)?;
        if voice.state == PlaybackState::Paused {
            voice.state = PlaybackState::Playing;
        }
        Ok(())
    }

    /// Moves the cursor to `seconds`, clamped to the voice length.
    pub fn seek(&mut self, id: SoundId, seconds: f32) -> Result<(), ResourceError> {
        let voice = self.voice_mut(id)?;
        voice.cursor = seconds.clamp(0.0, voice.length());
        Ok(())
    }

    /// Volume in `[0, 1]`.
    pub fn set_volume(&mut self, id: SoundId, volume: f32) -> Result<(), ResourceError> {
        self.voice_mut(id)?.volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    /// Playback rate multiplier, 1.0 is base level. Negative is clamped to 0.
    pub fn set_pitch(&mut self, id: SoundId, pitch: f32) -> Result<(), ResourceError> {
        self.voice_mut(id)?.pitch = pitch.max(0.0);
        Ok(())
    }

    /// Stereo pan in `[0, 1]`, 0.5 is centre.
    pub fn set_pan(&mut self, id: SoundId, pan: f32) -> Result<(), ResourceError> {
        self.voice_mut(id)?.pan = pan.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn set_looping(&mut self, id: SoundId, looping: bool) -> Result<(), ResourceError> {
        self.voice_mut(id)?.looping = looping;
        Ok(())
    }

    pub fn is_playing(&self, id: SoundId) -> bool {
        self.voices
            .get(&id)
            .is_some_and(|v| v.state == PlaybackState::Playing)
    }

    /// Seconds played since the start (or last wrap).
    pub fn time_played(&self, id: SoundId) -> Result<f32, ResourceError> {
        self.voices.get(&id).map(|v| v.cursor).ok_or_else(|| invalid(id))
    }

    pub fn time_length(&self, id: SoundId) -> Result<f32, ResourceError> {
        self.voices.get(&id).map(Voice::length).ok_or_else(|| invalid(id))
    }

    //--- Mixer ------------------------------------------------------------

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Advances every playing voice by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        for voice in self.voices.values_mut() {
            voice.advance(delta);
        }
        trace!(target: "audio", "Advanced {} voices by {:.4}s", self.voices.len(), delta);
    }

    fn voice_mut(&mut self, id: SoundId) -> Result<&mut Voice, ResourceError> {
        self.voices.get_mut(&id).ok_or_else(|| invalid(id))
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(id: SoundId) -> ResourceError {
    ResourceError::InvalidHandle(format!("sound {}", id.0))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// One second of mono silence at 100 Hz.
    fn one_second(audio: &mut Audio, looping: bool) -> SoundId {
        audio.create_voice(vec![0.0; 100], 1, 100, looping).unwrap()
    }

    #[test]
    fn create_rejects_zero_channels() {
        let mut audio = Audio::new();
        assert!(matches!(
            audio.create_voice(vec![], 0, 44_100, false),
            Err(ResourceError::Decode(_))
        ));
    }

    #[test]
    fn voice_length_accounts_for_channels() {
        let mut audio = Audio::new();
        let id = audio.create_voice(vec![0.0; 200], 2, 100, false).unwrap();
        assert_eq!(audio.time_length(id).unwrap(), 1.0);
    }

    #[test]
    fn one_shot_stops_at_end() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, false);

        audio.play(id).unwrap();
        audio.advance(0.5);
        assert!(audio.is_playing(id));
        assert_eq!(audio.time_played(id).unwrap(), 0.5);

        audio.advance(0.6);
        assert!(!audio.is_playing(id));
        assert_eq!(audio.time_played(id).unwrap(), 0.0);
    }

    #[test]
    fn looping_voice_wraps() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, true);

        audio.play(id).unwrap();
        audio.advance(1.25);

        assert!(audio.is_playing(id));
        assert!((audio.time_played(id).unwrap() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn pitch_scales_cursor_speed() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, false);

        audio.set_pitch(id, 2.0).unwrap();
        audio.play(id).unwrap();
        audio.advance(0.25);

        assert_eq!(audio.time_played(id).unwrap(), 0.5);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, false);

        audio.play(id).unwrap();
        audio.advance(0.25);
        audio.pause(id).unwrap();
        audio.advance(0.5);
        assert_eq!(audio.time_played(id).unwrap(), 0.25);
        assert_eq!(audio.voice(id).unwrap().state(), PlaybackState::Paused);

        audio.resume(id).unwrap();
        audio.advance(0.25);
        assert_eq!(audio.time_played(id).unwrap(), 0.5);
    }

    #[test]
    fn resume_does_not_start_stopped_voice() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, false);
        audio.resume(id).unwrap();
        assert!(!audio.is_playing(id));
    }

    #[test]
    fn parameters_are_clamped() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, false);

        audio.set_volume(id, 3.0).unwrap();
        audio.set_pan(id, -1.0).unwrap();
        audio.seek(id, 10.0).unwrap();
        audio.set_master_volume(-0.5);

        let voice = audio.voice(id).unwrap();
        assert_eq!(voice.volume(), 1.0);
        assert_eq!(voice.pan(), 0.0);
        assert_eq!(audio.time_played(id).unwrap(), 1.0);
        assert_eq!(audio.master_volume(), 0.0);
    }

    #[test]
    fn released_voice_is_invalid() {
        let mut audio = Audio::new();
        let id = one_second(&mut audio, false);

        audio.release_voice(id).unwrap();
        assert_eq!(audio.voice_count(), 0);
        assert!(matches!(audio.play(id), Err(ResourceError::InvalidHandle(_))));
        assert!(!audio.is_playing(id));
    }
}
