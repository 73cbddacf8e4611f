//! Allocation-free host loop tests.
//!
//! These tests verify that `TunePlayer::update()` does not allocate once the
//! player is built. They run the fixture tune and a few control-flow heavy
//! streams for several simulated seconds so that repeats, tempo changes,
//! loop restarts and end-of-tune handling are all exercised.
//!
//! Just run `cargo test`. No feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use std::fs;
use std::path::PathBuf;

use tp_engine::{ManualClock, MemorySource, PlayerConfig, SoundDriver, TunePlayer};
use tp_formats::Endian;
use tp_ir::{Instruction, PitchClass, RepeatMode, END_LOOP};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tunes")
}

/// Counts calls without storing them.
#[derive(Default)]
struct CountingDriver {
    plays: usize,
    stops: usize,
}

impl SoundDriver for CountingDriver {
    fn play_note(&mut self, _pitch: PitchClass, _octave: u8, _duration_hint: u32) {
        self.plays += 1;
    }

    fn stop_sound(&mut self) {
        self.stops += 1;
    }

    fn self_limiting(&self) -> bool {
        false
    }
}

/// Run `words` for `seconds` of simulated time, aborting on any heap allocation.
fn assert_update_alloc_free(words: Vec<u16>, config: PlayerConfig, seconds: u32) -> CountingDriver {
    let clock = ManualClock::new();
    let mut player: TunePlayer<_, _, _> =
        TunePlayer::new(MemorySource::new(words), CountingDriver::default(), clock.clone(), config)
            .unwrap();
    player.begin();
    player.play();

    let mut failed = false;
    assert_no_alloc(|| {
        for _ in 0..seconds * 1_000 {
            clock.advance(1_000);
            failed |= player.update().is_err();
            if !player.is_playing() {
                player.play();
            }
        }
    });
    assert!(!failed);
    let (_, driver, _) = player.into_parts();
    driver
}

#[test]
fn fixture_tune_alloc_free() {
    let data = fs::read(fixtures_dir().join("scale.bin")).unwrap();
    let words = tp_formats::load_binary(&data, Endian::Little).unwrap();
    let driver = assert_update_alloc_free(words, PlayerConfig::default(), 20);
    assert!(driver.plays > 15);
}

#[test]
fn nested_repeats_with_cutoff_alloc_free() {
    let words = vec![
        Instruction::tempo(240).encode(),
        Instruction::note(PitchClass::C, 4, 1).encode(),
        Instruction::note(PitchClass::E, 4, 1).encode(),
        Instruction::repeat(RepeatMode::Thrice, 1).encode(),
        Instruction::rest(1).encode(),
        Instruction::repeat(RepeatMode::Twice, 4).encode(),
        Instruction::tempo(90).encode(),
        END_LOOP,
    ];
    let config = PlayerConfig::default().with_manual_cutoff(true);
    let driver = assert_update_alloc_free(words, config, 10);
    assert!(driver.plays > 0);
    assert!(driver.stops >= driver.plays);
}

#[test]
fn endless_repeat_alloc_free() {
    let words = vec![
        Instruction::note(PitchClass::G, 5, 2).encode(),
        Instruction::repeat(RepeatMode::Every, 1).encode(),
    ];
    let driver = assert_update_alloc_free(words, PlayerConfig::default(), 5);
    assert!(driver.plays > 30);
}
