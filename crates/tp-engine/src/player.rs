//! The tune player: spooling, dispatch and the playback state machine.

use alloc::boxed::Box;
use tp_ir::{Address, NoteDescriptor, NoteKind, Timebase};

use crate::clock::Clock;
use crate::config::PlayerConfig;
use crate::decoder::{decode_one, Cursor};
use crate::driver::SoundDriver;
use crate::error::PlayerError;
use crate::playback_queue::PlaybackQueue;
use crate::repeat_stack::RepeatStack;
use crate::source::NoteSource;

/// Called when playback stops, pauses or reaches the end of the tune.
pub type StopCallback = Box<dyn FnMut() + Send>;

/// Playback state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Paused,
    Playing,
}

/// Plays a tune from a [`NoteSource`] through a [`SoundDriver`].
///
/// The host calls [`update`](Self::update) (or [`spool`](Self::spool) and
/// [`update_high_priority`](Self::update_high_priority) separately) as often
/// as it can. Nothing blocks; notes fire late if the host is slow, never early.
///
/// `Q` is the number of notes decoded ahead, `R` the maximum repeat nesting.
/// A `Q` of zero is rejected at compile time by the queue's backing `Deque`.
pub struct TunePlayer<S, D, C, const Q: usize = 4, const R: usize = 4> {
    source: S,
    driver: D,
    clock: C,
    config: PlayerConfig,
    queue: PlaybackQueue<Q>,
    repeats: RepeatStack<R>,
    cursor: Cursor,
    state: PlaybackState,
    /// When the current note was dispatched
    note_start: u32,
    /// Time after `note_start` at which the next note is due
    deadline: u32,
    /// Dispatch time and sounding time of the current note, while a manual
    /// cutoff is pending. Kept apart from `note_start`, which an empty queue
    /// keeps moving.
    cutoff: Option<(u32, u32)>,
    on_stop: Option<StopCallback>,
}

impl<S, D, C, const Q: usize, const R: usize> TunePlayer<S, D, C, Q, R>
where
    S: NoteSource,
    D: SoundDriver,
    C: Clock,
{
    /// Create a stopped player. Fails on an invalid configuration.
    pub fn new(source: S, driver: D, clock: C, config: PlayerConfig) -> Result<Self, PlayerError> {
        config.validate()?;
        Ok(Self {
            source,
            driver,
            clock,
            queue: PlaybackQueue::new(),
            repeats: RepeatStack::new(),
            cursor: Cursor::start(config.default_timebase()),
            config,
            state: PlaybackState::Stopped,
            note_start: 0,
            deadline: 0,
            cutoff: None,
            on_stop: None,
        })
    }

    /// Initialise the driver and the source.
    pub fn begin(&mut self) {
        self.driver.begin();
        self.source.begin();
        if !self.driver.self_limiting() && !self.config.manual_cutoff {
            log::warn!("Sound driver cannot time notes and manual cutoff is disabled; notes will run into each other");
        }
    }

    /// Stop and swap in a new tune, returning the old source.
    pub fn load(&mut self, mut source: S) -> S {
        self.stop();
        source.begin();
        core::mem::replace(&mut self.source, source)
    }

    // --- Transport ---

    /// Start or resume playback. Sound starts at the next due dispatch.
    pub fn play(&mut self) {
        if self.state != PlaybackState::Playing {
            log::debug!("{:?} -> Playing", self.state);
            self.state = PlaybackState::Playing;
        }
    }

    /// Pause playback. Resuming continues with the next queued note.
    ///
    /// With `hold_note` the current sound keeps going. Has no effect unless
    /// playing.
    pub fn pause(&mut self, hold_note: bool) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if !hold_note {
            self.driver.stop_sound();
        }
        log::debug!("Playing -> Paused (hold_note: {})", hold_note);
        self.state = PlaybackState::Paused;
        self.notify_stop();
    }

    /// Stop playback and rewind: silence, clear the queue and repeat stack,
    /// return to address 0 at the default tempo.
    pub fn stop(&mut self) {
        self.driver.stop_sound();
        if self.state != PlaybackState::Stopped {
            log::debug!("{:?} -> Stopped", self.state);
        }
        self.state = PlaybackState::Stopped;
        self.notify_stop();
        self.queue.clear();
        self.repeats.clear();
        self.cursor = Cursor::start(self.config.default_timebase());
        self.deadline = 0;
        self.cutoff = None;
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Register the function called whenever playback stops or pauses.
    pub fn set_on_stop<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_stop = Some(Box::new(callback));
    }

    pub fn clear_on_stop(&mut self) {
        self.on_stop = None;
    }

    // --- Host loop ---

    /// Spool, then dispatch. A decoding error is returned after dispatch
    /// has run, so already-queued notes keep their timing.
    pub fn update(&mut self) -> Result<(), PlayerError> {
        let spooled = self.spool();
        self.update_high_priority();
        spooled
    }

    /// Decode instructions until the queue is full or the spool budget is spent.
    ///
    /// On error the cursor stays on the offending instruction, so every
    /// later call reports the same error until the player is stopped.
    pub fn spool(&mut self) -> Result<(), PlayerError> {
        let mut budget = self.config.spool_budget;
        while !self.queue.is_full() && budget > 0 {
            budget -= 1;
            self.load_next()?;
        }
        Ok(())
    }

    /// Time-critical work: dispatch a due note and apply manual cutoff.
    pub fn update_high_priority(&mut self) {
        let now = self.clock.now_micros();
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| {
            self.dispatch_due(now);
            self.apply_cutoff(now);
        });
        #[cfg(not(feature = "alloc_check"))]
        {
            self.dispatch_due(now);
            self.apply_cutoff(now);
        }
    }

    /// Dispatch the next note if the current one has run its course at `now`.
    ///
    /// With an empty queue the deadline drops to zero, so the check passes
    /// again on every call until spooling catches up.
    pub fn dispatch_due(&mut self, now: u32) {
        if self.state != PlaybackState::Playing
            || now.wrapping_sub(self.note_start) <= self.deadline
        {
            return;
        }

        match self.queue.pop() {
            Some(note) => {
                self.dispatch(&note, now);
                self.deadline = note.total_micros;
            }
            None => self.deadline = 0,
        }
        self.note_start = now;
    }

    fn dispatch(&mut self, note: &NoteDescriptor, now: u32) {
        log::trace!("Dispatch {:?}", note);
        match note.kind {
            NoteKind::End => {
                log::debug!("End of tune");
                self.stop();
            }
            NoteKind::Rest => {
                self.driver.stop_sound();
                self.cutoff = None;
            }
            NoteKind::Pitch(pitch) => {
                self.driver.play_note(pitch, note.octave, note.on_micros);
                self.cutoff = (self.config.manual_cutoff && note.on_micros > 0).then_some((now, note.on_micros));
            }
        }
    }

    fn apply_cutoff(&mut self, now: u32) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if let Some((started, on_micros)) = self.cutoff {
            if now.wrapping_sub(started) > on_micros {
                self.driver.stop_sound();
                self.cutoff = None;
            }
        }
    }

    fn load_next(&mut self) -> Result<(), PlayerError> {
        let word = self.source.load_word(self.cursor.address);
        let decoded = decode_one(word, self.cursor, &mut self.repeats).map_err(|e| {
            log::warn!("{}", e);
            e
        })?;

        if let Some(timebase) = decoded.tempo {
            log::debug!(
                "Tempo change at {}: {} us per unit",
                self.cursor.address,
                timebase.micros_per_unit()
            );
        }
        self.cursor.apply(&decoded);

        if let Some(note) = decoded.note {
            if let Err(note) = self.queue.push(note) {
                log::error!("Playback queue overflow, dropped {:?}", note);
            }
        }
        Ok(())
    }

    fn notify_stop(&mut self) {
        if !self.config.callbacks {
            return;
        }
        if let Some(callback) = self.on_stop.as_mut() {
            callback();
        }
    }

    // --- Inspection ---

    /// Address of the next instruction to decode.
    pub fn cursor(&self) -> Address {
        self.cursor.address
    }

    /// Timebase the next decoded note will use.
    pub fn timebase(&self) -> Timebase {
        self.cursor.timebase
    }

    /// Number of notes waiting in the queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn queue(&self) -> &PlaybackQueue<Q> {
        &self.queue
    }

    /// Number of active bounded repeats.
    pub fn repeat_depth(&self) -> usize {
        self.repeats.depth()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_parts(self) -> (S, D, C) {
        (self.source, self.driver, self.clock)
    }
}
