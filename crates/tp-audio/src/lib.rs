//! Sound driver backends for tuneplayer.

mod cpal_backend;
mod pwm;
mod tone;
mod traits;

pub use cpal_backend::{micros_to_samples, CpalToneDriver, ToneCommand, ToneSynth};
pub use pwm::TimerPwmDriver;
pub use tone::ToneDriver;
pub use traits::{AudioError, PwmTimer, ToneOutput};
