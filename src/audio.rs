//! Sound cues
//!
//! Playback is best-effort: a backend may fail, and the manager logs and
//! drops the error so the frame loop never sees it.

use std::f32::consts::TAU;

use anyhow::Result;
#[cfg(feature = "sound")]
use anyhow::Context;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar flapped
    Jump,
    /// Pair cleared
    Score,
    /// Run ended
    Collision,
}

impl SoundEffect {
    /// The cue a simulation event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Crashed { .. } => Some(SoundEffect::Collision),
            GameEvent::Started | GameEvent::Restarted => None,
        }
    }
}

/// Something that can actually make a sound
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<()>;
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<()> {
        Ok(())
    }
}

/// Plays synthesized cues on the default output device
#[cfg(feature = "sound")]
pub struct RodioAudio {
    // Dropping the stream closes the device
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
}

#[cfg(feature = "sound")]
impl RodioAudio {
    /// Open the default output device
    pub fn open() -> Result<Self> {
        let (stream, handle) =
            rodio::OutputStream::try_default().context("no audio output device")?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

#[cfg(feature = "sound")]
impl AudioBackend for RodioAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<()> {
        let samples = render_cue(effect, volume);
        let source = rodio::buffer::SamplesBuffer::new(1, SAMPLE_RATE, samples);
        self.handle.play_raw(source)?;
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    failures: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentAudio))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            failures: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Playback errors swallowed so far
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Play a sound effect, fire-and-forget
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        if let Err(e) = self.backend.play(effect, vol) {
            self.failures += 1;
            // Warn once, then keep quiet; a broken device fails every cue
            if self.failures == 1 {
                log::warn!("Sound playback failed, continuing without it: {e:#}");
            } else {
                log::debug!("Sound playback failed ({:?}): {e:#}", effect);
            }
        }
    }
}

// === Sound generators ===

/// Output sample rate for synthesized cues
pub const SAMPLE_RATE: u32 = 44_100;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
}

impl Waveform {
    /// Sample at `phase` in 0..1
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// One oscillator with an exponential pitch sweep and decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds after the cue starts
    pub delay: f32,
    pub duration: f32,
    pub gain: f32,
}

const JUMP: &[Tone] = &[Tone {
    wave: Waveform::Sine,
    start_hz: 320.0,
    end_hz: 640.0,
    delay: 0.0,
    duration: 0.12,
    gain: 0.5,
}];

const SCORE: &[Tone] = &[
    Tone {
        wave: Waveform::Square,
        start_hz: 880.0,
        end_hz: 880.0,
        delay: 0.0,
        duration: 0.08,
        gain: 0.2,
    },
    Tone {
        wave: Waveform::Square,
        start_hz: 1320.0,
        end_hz: 1320.0,
        delay: 0.08,
        duration: 0.14,
        gain: 0.2,
    },
];

const COLLISION: &[Tone] = &[Tone {
    wave: Waveform::Saw,
    start_hz: 400.0,
    end_hz: 80.0,
    delay: 0.0,
    duration: 0.5,
    gain: 0.3,
}];

/// Oscillators that make up a cue
pub fn cue_tones(effect: SoundEffect) -> &'static [Tone] {
    match effect {
        SoundEffect::Jump => JUMP,
        SoundEffect::Score => SCORE,
        SoundEffect::Collision => COLLISION,
    }
}

/// Gain the envelope decays to by the end of a tone
const DECAY_FLOOR: f32 = 0.01;
/// Linear fade-in to avoid a click
const ATTACK_SECS: f32 = 0.003;

/// Mix a cue into mono samples at [`SAMPLE_RATE`], scaled by `volume`
pub fn render_cue(effect: SoundEffect, volume: f32) -> Vec<f32> {
    let rate = SAMPLE_RATE as f32;
    let tones = cue_tones(effect);
    let len = tones
        .iter()
        .map(|t| ((t.delay + t.duration) * rate) as usize)
        .max()
        .unwrap_or(0);
    let mut out = vec![0.0; len];

    for tone in tones {
        let start = (tone.delay * rate) as usize;
        let count = (tone.duration * rate) as usize;
        let mut phase = 0.0f32;
        for (i, slot) in out[start..].iter_mut().take(count).enumerate() {
            let t = i as f32 / rate;
            let progress = t / tone.duration;
            let freq = tone.start_hz * (tone.end_hz / tone.start_hz).powf(progress);
            let attack = (t / ATTACK_SECS).min(1.0);
            let env = tone.gain * DECAY_FLOOR.powf(progress) * attack;

            *slot += tone.wave.sample(phase) * env * volume;
            phase = (phase + freq / rate).fract();
        }
    }

    for sample in &mut out {
        *sample = sample.clamp(-1.0, 1.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashCause;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<()> {
            self.0.borrow_mut().push((effect, volume));
            Ok(())
        }
    }

    struct Broken;

    impl AudioBackend for Broken {
        fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<()> {
            Err(anyhow!("no audio device"))
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Flapped),
            Some(SoundEffect::Jump)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { score: 3 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Crashed {
                cause: CrashCause::Boundary
            }),
            Some(SoundEffect::Collision)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Started), None);
    }

    #[test]
    fn test_volume_and_mute() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder(log.clone())));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Jump);
        assert_eq!(log.borrow().as_slice(), &[(SoundEffect::Jump, 0.5)]);

        audio.set_muted(true);
        audio.play(SoundEffect::Score);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut audio = AudioManager::new(Box::new(Broken));
        audio.play(SoundEffect::Collision);
        audio.play(SoundEffect::Jump);
        assert_eq!(audio.failures(), 2);
    }

    #[test]
    fn test_cues_are_distinct() {
        let jump = render_cue(SoundEffect::Jump, 1.0);
        let score = render_cue(SoundEffect::Score, 1.0);
        let crash = render_cue(SoundEffect::Collision, 1.0);

        assert_eq!(jump.len(), (0.12 * SAMPLE_RATE as f32) as usize);
        assert!(score.len() > jump.len() && score.len() < crash.len());
        assert_eq!(crash.len(), (0.5 * SAMPLE_RATE as f32) as usize);
        for cue in [&jump, &score, &crash] {
            assert!(cue.iter().any(|s| s.abs() > 0.05));
            assert!(cue.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn test_cue_scales_with_volume() {
        let full = render_cue(SoundEffect::Jump, 1.0);
        let half = render_cue(SoundEffect::Jump, 0.5);
        assert_eq!(full.len(), half.len());
        for (a, b) in full.iter().zip(&half) {
            assert!((a * 0.5 - b).abs() < 1e-6);
        }
        assert!(render_cue(SoundEffect::Score, 0.0).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_collision_sweeps_down() {
        let tone = cue_tones(SoundEffect::Collision)[0];
        assert_eq!(tone.wave, Waveform::Saw);
        assert!(tone.end_hz < tone.start_hz);
        let jump = cue_tones(SoundEffect::Jump)[0];
        assert!(jump.end_hz > jump.start_hz);
    }
}
