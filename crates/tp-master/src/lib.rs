//! Headless controller for tuneplayer.
//!
//! Provides a unified API for loading tunes, real-time playback and offline
//! rendering that the CLI and tests share.

mod recorder;
mod wav;

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tp_audio::{micros_to_samples, CpalToneDriver, ToneCommand, ToneSynth};
use tp_engine::{Clock, ManualClock, MemorySource, StdClock, TunePlayer};
use tp_ir::equal_tempered_hz;

pub use recorder::{EventKind, RecordingDriver, TimedEvent};
pub use tp_audio::AudioError;
pub use tp_engine::{PlayerConfig, PlayerError};
pub use tp_formats::{Endian, FormatError, ListingLine, TuneSummary};
pub use tp_ir::Address;
pub use wav::{frames_to_wav, write_wav, Frame};

/// Clock step for offline rendering.
pub const RENDER_STEP_MICROS: u32 = 100;

/// Sleep between host loop iterations during real-time playback.
const HOST_LOOP_PERIOD: Duration = Duration::from_micros(250);

#[derive(Debug)]
pub enum ControllerError {
    Format(FormatError),
    Audio(AudioError),
    Player(PlayerError),
    Wav(String),
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::Format(e) => write!(f, "{}", e),
            ControllerError::Audio(e) => write!(f, "{}", e),
            ControllerError::Player(e) => write!(f, "{}", e),
            ControllerError::Wav(msg) => write!(f, "WAV encode error: {}", msg),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<FormatError> for ControllerError {
    fn from(err: FormatError) -> Self {
        ControllerError::Format(err)
    }
}

impl From<AudioError> for ControllerError {
    fn from(err: AudioError) -> Self {
        ControllerError::Audio(err)
    }
}

impl From<PlayerError> for ControllerError {
    fn from(err: PlayerError) -> Self {
        ControllerError::Player(err)
    }
}

/// Headless tune controller: owns a tune and manages playback.
pub struct Controller {
    words: Vec<u16>,
    config: PlayerConfig,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    cursor: Arc<AtomicU16>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::with_config(PlayerConfig::default())
    }

    pub fn with_config(config: PlayerConfig) -> Self {
        Self {
            words: Vec::new(),
            config,
            playback: None,
        }
    }

    // --- Tune management ---

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Takes effect at the next `play` or render.
    pub fn set_config(&mut self, config: PlayerConfig) {
        self.config = config;
    }

    pub fn set_words(&mut self, words: Vec<u16>) {
        self.stop();
        self.words = words;
    }

    pub fn load_binary(&mut self, data: &[u8], endian: Endian) -> Result<(), FormatError> {
        let words = tp_formats::load_binary(data, endian)?;
        self.set_words(words);
        Ok(())
    }

    pub fn load_text(&mut self, source: &str) -> Result<(), FormatError> {
        let words = tp_formats::load_text(source)?;
        self.set_words(words);
        Ok(())
    }

    pub fn summary(&self) -> TuneSummary {
        tp_formats::summarize(&self.words)
    }

    pub fn listing(&self) -> Vec<ListingLine> {
        tp_formats::disassemble(&self.words)
    }

    // --- Real-time playback ---

    /// Start playing on the default audio device from a background thread.
    pub fn play(&mut self) -> Result<(), ControllerError> {
        self.stop();
        self.config.validate()?;

        let words = self.words.clone();
        let config = self.config;
        let stop_signal = Arc::new(AtomicBool::new(false));
        let cursor = Arc::new(AtomicU16::new(0));
        let finished = Arc::new(AtomicBool::new(false));

        let stop = stop_signal.clone();
        let position = cursor.clone();
        let done = finished.clone();

        let thread = std::thread::spawn(move || {
            if let Err(err) = host_loop(words, config, &stop, &position) {
                log::error!("Playback failed: {}", err);
            }
            done.store(true, Ordering::Relaxed);
        });

        self.playback = Some(PlaybackHandle {
            stop_signal,
            cursor,
            finished,
            thread: Some(thread),
        });
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                let _ = handle.join();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.finished.load(Ordering::Relaxed))
    }

    pub fn is_finished(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.finished.load(Ordering::Relaxed))
    }

    /// Decoder read position of the running playback.
    pub fn position(&self) -> Option<Address> {
        let pb = self.playback.as_ref()?;
        if pb.finished.load(Ordering::Relaxed) {
            return None;
        }
        Some(pb.cursor.load(Ordering::Relaxed))
    }

    // --- Offline rendering ---

    /// Run the tune against a manual clock for up to `max_micros` and return
    /// every driver call.
    pub fn render_events(&self, max_micros: u32) -> Result<Vec<TimedEvent>, ControllerError> {
        let clock = ManualClock::new();
        let driver = RecordingDriver::new(clock.clone());
        let mut player: TunePlayer<_, _, _> = TunePlayer::new(
            MemorySource::new(self.words.as_slice()),
            driver,
            clock.clone(),
            self.config,
        )?;

        player.begin();
        player.play();
        while player.is_playing() && clock.now_micros() < max_micros {
            player.update()?;
            clock.advance(RENDER_STEP_MICROS);
        }
        player.stop();

        let (_, driver, _) = player.into_parts();
        Ok(driver.into_events())
    }

    /// Render the tune as a mono square wave on both channels.
    pub fn render_frames(&self, sample_rate: u32, max_seconds: u32) -> Result<Vec<Frame>, ControllerError> {
        let events = self.render_events(max_seconds.saturating_mul(1_000_000))?;
        let end_micros = events.last().map_or(0, |e| e.at_micros);
        let total = micros_to_samples(end_micros, sample_rate) as usize;

        let mut synth = ToneSynth::new(sample_rate);
        let mut pending = events.iter().peekable();
        let mut frames = Vec::with_capacity(total);
        for n in 0..total {
            let now = (n as u64 * 1_000_000 / sample_rate as u64) as u32;
            while let Some(event) = pending.next_if(|e| e.at_micros <= now) {
                synth.apply(tone_command(event.kind, sample_rate));
            }
            frames.push(Frame::mono((synth.next_sample() * i16::MAX as f32) as i16));
        }
        Ok(frames)
    }

    pub fn render_to_wav(&self, sample_rate: u32, max_seconds: u32) -> Result<Vec<u8>, ControllerError> {
        let frames = self.render_frames(sample_rate, max_seconds)?;
        frames_to_wav(&frames, sample_rate).map_err(|e| ControllerError::Wav(e.to_string()))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tone_command(kind: EventKind, sample_rate: u32) -> ToneCommand {
    match kind {
        EventKind::Play {
            pitch,
            octave,
            duration_hint,
        } => ToneCommand::Play {
            hz: equal_tempered_hz(pitch, octave),
            samples: micros_to_samples(duration_hint, sample_rate),
        },
        EventKind::Stop => ToneCommand::Silence,
    }
}

fn host_loop(
    words: Vec<u16>,
    config: PlayerConfig,
    stop_signal: &AtomicBool,
    cursor: &AtomicU16,
) -> Result<(), ControllerError> {
    let driver = CpalToneDriver::new()?;
    log::info!("Playing {} words at {} Hz", words.len(), driver.sample_rate());
    let mut player: TunePlayer<_, _, _> =
        TunePlayer::new(MemorySource::new(words), driver, StdClock::new(), config)?;

    player.begin();
    player.play();
    while player.is_playing() && !stop_signal.load(Ordering::Relaxed) {
        player.update()?;
        cursor.store(player.cursor(), Ordering::Relaxed);
        std::thread::sleep(HOST_LOOP_PERIOD);
    }
    player.stop();
    Ok(())
}
