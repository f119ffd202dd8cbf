//! Per-formula sound loops
//!
//! A loop plays its clip right away and then once every beat, where the beat
//! length comes from the tempo slider at the moment each repetition fires.

use std::collections::HashMap;

use log::debug;

use crate::catalog::{FormulaKey, SoundId};
use crate::constants::TEMPO_OFFSET_BPM;
use crate::scheduler::{TimerId, TimerQueue};

/// Timer payload for the next repetition of a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopRepeat {
    pub formula: FormulaKey,
}

/// Milliseconds between repetitions for a tempo slider value (0..=100)
pub fn interval_ms(tempo: f64) -> u64 {
    (60_000.0 / (tempo + TEMPO_OFFSET_BPM)).round() as u64
}

#[derive(Debug)]
struct LoopState {
    sound: SoundId,
    pending: TimerId,
}

/// Running loops keyed by formula, plus the shared tempo
#[derive(Debug)]
pub struct SoundLoopScheduler {
    loops: HashMap<FormulaKey, LoopState>,
    tempo: f64,
}

impl SoundLoopScheduler {
    pub fn new(tempo: f64) -> Self {
        Self {
            loops: HashMap::new(),
            tempo: tempo.clamp(0.0, 100.0),
        }
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Takes effect from the next repetition of every running loop
    pub fn set_tempo(&mut self, tempo: f64) {
        self.tempo = tempo.clamp(0.0, 100.0);
    }

    /// Beats per minute shown next to the tempo slider
    pub fn bpm(&self) -> f64 {
        self.tempo + TEMPO_OFFSET_BPM
    }

    pub fn is_playing(&self, formula: FormulaKey) -> bool {
        self.loops.contains_key(&formula)
    }

    /// Start looping `sound` for `formula`. Returns the clip to play now.
    ///
    /// Starting a loop that is already running restarts it.
    pub fn start<T: From<LoopRepeat>>(
        &mut self,
        formula: FormulaKey,
        sound: SoundId,
        timers: &mut TimerQueue<T>,
    ) -> SoundId {
        self.stop(formula, timers);
        let pending = self.schedule(formula, timers);
        self.loops.insert(formula, LoopState { sound, pending });
        sound
    }

    /// Stop the loop for `formula`. Stopping an idle loop does nothing.
    pub fn stop<T>(&mut self, formula: FormulaKey, timers: &mut TimerQueue<T>) {
        if let Some(state) = self.loops.remove(&formula) {
            timers.cancel(state.pending);
        }
    }

    /// Flip the loop for `formula` and return whether it is now playing,
    /// together with the clip to play immediately when it just started.
    ///
    /// `sound` is `None` when the formula has no usable clip; the loop then
    /// stays off.
    pub fn toggle<T: From<LoopRepeat>>(
        &mut self,
        formula: FormulaKey,
        sound: Option<SoundId>,
        timers: &mut TimerQueue<T>,
    ) -> (bool, Option<SoundId>) {
        if self.is_playing(formula) {
            self.stop(formula, timers);
            return (false, None);
        }
        match sound {
            Some(sound) => (true, Some(self.start(formula, sound, timers))),
            None => (false, None),
        }
    }

    /// Handle a repetition timer. Returns the clip to play, or `None` when
    /// the timer no longer belongs to a running loop.
    pub fn on_fire<T: From<LoopRepeat>>(
        &mut self,
        id: TimerId,
        repeat: LoopRepeat,
        timers: &mut TimerQueue<T>,
    ) -> Option<SoundId> {
        let tempo = self.tempo;
        let state = self.loops.get_mut(&repeat.formula)?;
        if state.pending != id {
            return None;
        }
        let sound = state.sound;
        let delay = interval_ms(tempo);
        state.pending = timers.schedule_after(delay, T::from(repeat));
        debug!("Loop for {} repeats in {} ms", repeat.formula, delay);
        Some(sound)
    }

    fn schedule<T: From<LoopRepeat>>(&self, formula: FormulaKey, timers: &mut TimerQueue<T>) -> TimerId {
        timers.schedule_after(interval_ms(self.tempo), T::from(LoopRepeat { formula }))
    }
}
