//! Output device traits and error types.

/// Error type for audio operations.
#[derive(Debug)]
pub enum AudioError {
    /// Failed to initialize audio device
    DeviceInit(String),
    /// Failed to create audio stream
    StreamCreate(String),
    /// Playback error
    Playback(String),
    /// No audio device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::DeviceInit(msg) => write!(f, "Device init error: {}", msg),
            AudioError::StreamCreate(msg) => write!(f, "Stream create error: {}", msg),
            AudioError::Playback(msg) => write!(f, "Playback error: {}", msg),
            AudioError::NoDevice => write!(f, "No audio device available"),
        }
    }
}

impl std::error::Error for AudioError {}

/// A square-wave tone generator that can stop itself after a duration,
/// like a buzzer pin driven by a timer interrupt.
pub trait ToneOutput {
    /// Start a tone at `hz`. A `duration_ms` of 0 sounds until [`ToneOutput::no_tone`].
    fn tone(&mut self, hz: u16, duration_ms: u32);

    /// Silence the output.
    fn no_tone(&mut self);
}

/// A hardware timer in PWM mode. It has no notion of duration.
pub trait PwmTimer {
    /// One-time pin and prescaler setup.
    fn configure(&mut self) {}

    /// Load the counter top and compare registers and start counting.
    fn start(&mut self, counter_top: u16, compare: u16);

    /// Stop counting and drive the output low.
    fn halt(&mut self);
}
