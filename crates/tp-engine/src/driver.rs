//! Sound driver trait.

use alloc::boxed::Box;
use tp_ir::PitchClass;

/// Turns dispatched notes into sound.
///
/// Implementations are picked at construction time: a tone-style driver, a
/// hardware timer PWM driver, a desktop synthesiser, or a recorder in tests.
pub trait SoundDriver {
    /// Prepare the output. Called from `TunePlayer::begin`.
    fn begin(&mut self) {}

    /// Start sounding `pitch` in `octave` (0..=7).
    ///
    /// `duration_hint` is the sounding time in microseconds. 0 means no
    /// cutoff was requested (legato); the note sustains until the next
    /// `play_note` or `stop_sound`.
    fn play_note(&mut self, pitch: PitchClass, octave: u8, duration_hint: u32);

    /// Silence the output.
    fn stop_sound(&mut self);

    /// Whether the driver honours `duration_hint` by itself. Drivers that
    /// return false need the player's manual cutoff.
    fn self_limiting(&self) -> bool {
        true
    }
}

impl<D: SoundDriver + ?Sized> SoundDriver for &mut D {
    fn begin(&mut self) {
        (**self).begin()
    }

    fn play_note(&mut self, pitch: PitchClass, octave: u8, duration_hint: u32) {
        (**self).play_note(pitch, octave, duration_hint)
    }

    fn stop_sound(&mut self) {
        (**self).stop_sound()
    }

    fn self_limiting(&self) -> bool {
        (**self).self_limiting()
    }
}

impl<D: SoundDriver + ?Sized> SoundDriver for Box<D> {
    fn begin(&mut self) {
        (**self).begin()
    }

    fn play_note(&mut self, pitch: PitchClass, octave: u8, duration_hint: u32) {
        (**self).play_note(pitch, octave, duration_hint)
    }

    fn stop_sound(&mut self) {
        (**self).stop_sound()
    }

    fn self_limiting(&self) -> bool {
        (**self).self_limiting()
    }
}

/// Driver that makes no sound.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentDriver;

impl SoundDriver for SilentDriver {
    fn play_note(&mut self, _pitch: PitchClass, _octave: u8, _duration_hint: u32) {}

    fn stop_sound(&mut self) {}
}
