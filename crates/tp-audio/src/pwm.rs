//! Timer-PWM sound driver.

use tp_engine::SoundDriver;
use tp_ir::{timer_compare_value, timer_counter_top, PitchClass};

use crate::traits::PwmTimer;

/// Drives a PWM timer at 50% duty. The timer runs until stopped, so pair
/// this driver with `PlayerConfig::with_manual_cutoff(true)`.
pub struct TimerPwmDriver<T> {
    timer: T,
}

impl<T: PwmTimer> TimerPwmDriver<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<T: PwmTimer> SoundDriver for TimerPwmDriver<T> {
    fn begin(&mut self) {
        self.timer.configure();
    }

    fn play_note(&mut self, pitch: PitchClass, octave: u8, _duration_hint: u32) {
        let top = timer_counter_top(pitch, octave);
        self.timer.start(top, timer_compare_value(top));
    }

    fn stop_sound(&mut self) {
        self.timer.halt();
    }

    fn self_limiting(&self) -> bool {
        false
    }
}
