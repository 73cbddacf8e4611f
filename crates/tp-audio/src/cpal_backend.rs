//! CPAL-based square-wave sound driver.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use tp_engine::SoundDriver;
use tp_ir::{equal_tempered_hz, PitchClass};

use crate::traits::AudioError;

/// Commands queued from the player thread to the audio callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToneCommand {
    /// Start a square wave. `samples == 0` sounds until the next command.
    Play { hz: f32, samples: u32 },
    Silence,
}

/// Square-wave oscillator fed by [`ToneCommand`]s. Runs on the audio thread.
#[derive(Clone, Debug)]
pub struct ToneSynth {
    sample_rate: u32,
    amplitude: f32,
    phase: f32,
    step: f32,
    /// Samples left in a bounded tone, `None` for unbounded
    remaining: Option<u32>,
    sounding: bool,
}

impl ToneSynth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            amplitude: 0.25,
            phase: 0.0,
            step: 0.0,
            remaining: None,
            sounding: false,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn apply(&mut self, command: ToneCommand) {
        match command {
            ToneCommand::Play { hz, samples } => {
                self.step = hz / self.sample_rate as f32;
                self.phase = 0.0;
                self.remaining = (samples > 0).then_some(samples);
                self.sounding = true;
            }
            ToneCommand::Silence => self.sounding = false,
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Produce one mono sample.
    pub fn next_sample(&mut self) -> f32 {
        if !self.sounding {
            return 0.0;
        }
        if let Some(left) = self.remaining.as_mut() {
            if *left == 0 {
                self.sounding = false;
                return 0.0;
            }
            *left -= 1;
        }
        let out = if self.phase < 0.5 {
            self.amplitude
        } else {
            -self.amplitude
        };
        self.phase += self.step;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }
}

/// Plays notes on the default output device as a square wave.
///
/// Tones carry their own length, so no manual cutoff is needed.
pub struct CpalToneDriver {
    /// Output closes when dropped
    _stream: Stream,
    producer: HeapProd<ToneCommand>,
    sample_rate: u32,
}

impl CpalToneDriver {
    /// Open the default output device and start a silent stream.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;
        let config: StreamConfig = config.into();
        let sample_rate = config.sample_rate.0;

        let rb = HeapRb::<ToneCommand>::new(64);
        let (producer, consumer) = rb.split();

        let stream = build_stream(&device, &config, consumer, ToneSynth::new(sample_rate))?;
        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        log::debug!("Opened cpal output at {} Hz, {} channels", sample_rate, config.channels);

        Ok(Self {
            _stream: stream,
            producer,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn send(&mut self, command: ToneCommand) {
        if self.producer.try_push(command).is_err() {
            log::warn!("Tone command queue full, dropping {:?}", command);
        }
    }
}

fn build_stream(
    device: &cpal::Device,
    config: &StreamConfig,
    mut commands: HeapCons<ToneCommand>,
    mut synth: ToneSynth,
) -> Result<Stream, AudioError> {
    let channels = config.channels as usize;
    device
        .build_output_stream(
            config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                while let Some(command) = commands.try_pop() {
                    synth.apply(command);
                }
                for chunk in data.chunks_mut(channels) {
                    let sample = synth.next_sample();
                    for out in chunk.iter_mut() {
                        *out = sample;
                    }
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| AudioError::StreamCreate(e.to_string()))
}

/// Samples in `micros` at `sample_rate`.
pub fn micros_to_samples(micros: u32, sample_rate: u32) -> u32 {
    (micros as u64 * sample_rate as u64 / 1_000_000) as u32
}

impl SoundDriver for CpalToneDriver {
    fn play_note(&mut self, pitch: PitchClass, octave: u8, duration_hint: u32) {
        let samples = match duration_hint {
            0 => 0,
            micros => micros_to_samples(micros, self.sample_rate).max(1),
        };
        self.send(ToneCommand::Play {
            hz: equal_tempered_hz(pitch, octave),
            samples,
        });
    }

    fn stop_sound(&mut self) {
        self.send(ToneCommand::Silence);
    }
}
