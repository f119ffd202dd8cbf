//! One player's game state
//!
//! The session owns everything that is not a device: the matcher, the
//! discovered formulas, the live animation, the sound loops and the timer
//! queue driving both. It never touches audio output directly. Instead it
//! queues [`AudioCommand`]s for the front end to execute.

use std::collections::HashSet;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{AnimationEngine, AnimationTick, RenderCommand, Scene};
use crate::audio::slider_gain;
use crate::catalog::{self, FormulaDefinition, FormulaKey, SoundId, VisualKind};
use crate::config::AppConfig;
use crate::constants::MAX_TIMER_LAG_MS;
use crate::error::CatalogError;
use crate::matcher::FormulaMatcher;
use crate::progress::{Discovery, ProgressTracker};
use crate::scheduler::TimerQueue;
use crate::sound_loop::{LoopRepeat, SoundLoopScheduler};

pub use crate::audio::AudioCommand;

/// Everything that can sit on the session's timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    AnimationTick(AnimationTick),
    LoopRepeat(LoopRepeat),
}

impl From<AnimationTick> for TimerEvent {
    fn from(tick: AnimationTick) -> Self {
        TimerEvent::AnimationTick(tick)
    }
}

impl From<LoopRepeat> for TimerEvent {
    fn from(repeat: LoopRepeat) -> Self {
        TimerEvent::LoopRepeat(repeat)
    }
}

/// What happened to a submitted formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input
    Ignored,
    Discovered(FormulaKey),
    AlreadyDiscovered(FormulaKey),
    NotRecognized,
}

/// A modal message for the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub body: &'static str,
}

impl Notice {
    pub fn already_discovered() -> Self {
        Self {
            title: "Already Discovered",
            body: "You've already discovered this formula!",
        }
    }

    pub fn incorrect_formula() -> Self {
        Self {
            title: "Incorrect Formula",
            body: "That's not a recognized physics formula, or it's not in the correct format.",
        }
    }

    pub fn help() -> Self {
        Self {
            title: "Help",
            body: catalog::HELP_TEXT,
        }
    }
}

pub struct Session {
    matcher: FormulaMatcher,
    progress: ProgressTracker,
    timers: TimerQueue<TimerEvent>,
    animation: AnimationEngine,
    loops: SoundLoopScheduler,
    rng: StdRng,
    /// Clips that loaded; loops for other clips cannot be started
    available: HashSet<SoundId>,
    volume: f32,
    tone: Option<u32>,
    audio: Vec<AudioCommand>,
    notice: Option<Notice>,
}

impl Session {
    /// Session starting from the configured slider positions
    pub fn new(available: HashSet<SoundId>, config: &AppConfig) -> Result<Self, CatalogError> {
        Self::with_rng(available, config, StdRng::from_entropy())
    }

    /// Session with default settings and deterministic rerolls
    pub fn with_seed(available: HashSet<SoundId>, seed: u64) -> Result<Self, CatalogError> {
        Self::with_rng(available, &AppConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        available: HashSet<SoundId>,
        config: &AppConfig,
        rng: StdRng,
    ) -> Result<Self, CatalogError> {
        let matcher = FormulaMatcher::builtin()?;
        debug!("Matcher ready with {} spellings", matcher.spelling_count());
        Ok(Self {
            matcher,
            progress: ProgressTracker::new(),
            timers: TimerQueue::with_max_lag(MAX_TIMER_LAG_MS),
            animation: AnimationEngine::new(),
            loops: SoundLoopScheduler::new(f64::from(config.tempo)),
            rng,
            available,
            volume: config.volume.clamp(0.0, 100.0),
            tone: None,
            audio: Vec::new(),
            notice: None,
        })
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    /// Offer a typed formula
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        let Some(definition) = self.matcher.resolve(input) else {
            debug!("No formula matches {input:?}");
            self.notice = Some(Notice::incorrect_formula());
            return SubmitOutcome::NotRecognized;
        };

        let key = definition.key();
        match self.progress.record_if_new(key) {
            Discovery::Recorded => {
                info!("Discovered {} ({})", definition.name, key);
                self.audio.push(AudioCommand::PlayOnce(SoundId::Correct));
                self.start_visual(definition.visual);
                SubmitOutcome::Discovered(key)
            }
            Discovery::AlreadyPresent => {
                self.notice = Some(Notice::already_discovered());
                SubmitOutcome::AlreadyDiscovered(key)
            }
        }
    }

    /// Restart a formula's visualization with its default parameters
    pub fn visualize(&mut self, key: FormulaKey) {
        match catalog::definition(key) {
            Some(definition) => self.start_visual(definition.visual),
            None => warn!("Cannot visualize unknown formula {key}"),
        }
    }

    /// New random parameters for whatever is on the canvas
    pub fn reroll(&mut self) {
        let Some(kind) = self.animation.active_kind() else {
            return;
        };
        let scene = Scene::rerolled(kind, &mut self.rng);
        if let Scene::Wave(wave) = &scene {
            let frequency = wave.tone_frequency();
            self.audio.push(AudioCommand::StartTone { frequency });
            self.tone = Some(frequency);
        }
        self.animation.start(scene, &mut self.timers);
    }

    /// Flip the sound loop of a formula. Returns whether it is now playing.
    pub fn toggle_sound_loop(&mut self, key: FormulaKey) -> bool {
        let sound = catalog::definition(key)
            .and_then(|definition| definition.sound)
            .filter(|sound| self.available.contains(sound));
        let (playing, now) = self.loops.toggle(key, sound, &mut self.timers);
        if let Some(sound) = now {
            self.audio.push(AudioCommand::PlayOnce(sound));
        }
        info!(
            "Sound loop for {} {}",
            key,
            if playing { "started" } else { "stopped" }
        );
        playing
    }

    /// Volume slider, 0..=100
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 100.0);
        self.audio.push(AudioCommand::SetVolume(slider_gain(self.volume)));
    }

    /// Tempo slider, 0..=100
    pub fn set_tempo(&mut self, tempo: f32) {
        self.loops.set_tempo(f64::from(tempo));
    }

    pub fn show_help(&mut self) {
        self.notice = Some(Notice::help());
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Fire every timer due at or before `now_ms`, in deadline order.
    ///
    /// After a stall longer than one tick, each animation and loop fires
    /// once and then resumes from `now_ms`; missed time is not replayed.
    pub fn advance(&mut self, now_ms: u64) {
        while let Some((id, event)) = self.timers.pop_due(now_ms) {
            match event {
                TimerEvent::AnimationTick(tick) => {
                    if let Some(events) = self.animation.on_tick(tick, &mut self.timers) {
                        self.audio
                            .extend(events.iter().map(|event| AudioCommand::PlayOnce(event.sound())));
                    }
                }
                TimerEvent::LoopRepeat(repeat) => {
                    if let Some(sound) = self.loops.on_fire(id, repeat, &mut self.timers) {
                        self.audio.push(AudioCommand::PlayOnce(sound));
                    }
                }
            }
        }
    }

    // ========================================================================
    // Outputs
    // ========================================================================

    /// Audio requests queued since the last call
    pub fn take_audio_commands(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.audio)
    }

    /// The pending modal notice, if any
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// What the canvas should show right now
    pub fn frame(&self) -> &[RenderCommand] {
        self.animation.frame()
    }

    /// Discovered formulas, oldest first
    pub fn discovered(&self) -> impl Iterator<Item = &'static FormulaDefinition> + '_ {
        self.progress
            .discovered()
            .iter()
            .filter_map(|key| catalog::definition(*key))
    }

    pub fn is_discovered(&self, key: FormulaKey) -> bool {
        self.progress.contains(key)
    }

    pub fn is_sound_playing(&self, key: FormulaKey) -> bool {
        self.loops.is_playing(key)
    }

    pub fn active_visual(&self) -> Option<VisualKind> {
        self.animation.active_kind()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.animation.scene()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn tempo(&self) -> f32 {
        self.loops.tempo() as f32
    }

    pub fn tempo_bpm(&self) -> f64 {
        self.loops.bpm()
    }

    fn start_visual(&mut self, kind: VisualKind) {
        if self.tone.take().is_some() {
            self.audio.push(AudioCommand::StopTone);
        }
        self.animation.start(Scene::initial(kind), &mut self.timers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FREE_FALL_TIME, NEWTONS_SECOND_LAW, SIMPLE_HARMONIC_MOTION};

    fn all_sounds() -> HashSet<SoundId> {
        SoundId::ALL.into_iter().collect()
    }

    fn session() -> Session {
        Session::with_seed(all_sounds(), 42).unwrap()
    }

    /// Advance in 10 ms frames
    fn run(s: &mut Session, from_ms: u64, to_ms: u64) {
        let mut now = from_ms;
        while now < to_ms {
            now = (now + 10).min(to_ms);
            s.advance(now);
        }
    }

    fn count(commands: &[AudioCommand], sound: SoundId) -> usize {
        commands
            .iter()
            .filter(|c| **c == AudioCommand::PlayOnce(sound))
            .count()
    }

    #[test]
    fn blank_input_is_ignored_quietly() {
        let mut s = session();
        assert_eq!(s.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(s.submit(""), SubmitOutcome::Ignored);
        assert!(s.take_notice().is_none());
        assert!(s.take_audio_commands().is_empty());
    }

    #[test]
    fn discovery_plays_correct_once_and_starts_the_scene() {
        let mut s = session();
        assert_eq!(s.submit("f=MA"), SubmitOutcome::Discovered(NEWTONS_SECOND_LAW));
        assert_eq!(
            s.take_audio_commands(),
            vec![AudioCommand::PlayOnce(SoundId::Correct)]
        );
        assert_eq!(s.active_visual(), Some(VisualKind::Force));
        assert!(s.take_notice().is_none());
    }

    #[test]
    fn repeat_and_unknown_raise_notices() {
        let mut s = session();
        s.submit("F = ma");
        s.take_audio_commands();

        assert_eq!(s.submit("F=ma"), SubmitOutcome::AlreadyDiscovered(NEWTONS_SECOND_LAW));
        assert_eq!(s.take_notice(), Some(Notice::already_discovered()));
        assert_eq!(s.submit("E = mc²"), SubmitOutcome::NotRecognized);
        assert_eq!(s.take_notice(), Some(Notice::incorrect_formula()));
        assert!(s.take_audio_commands().is_empty());
        assert_eq!(s.discovered().count(), 1);
    }

    #[test]
    fn landing_plays_the_drum() {
        let mut s = session();
        s.submit("t = √(2h/g)");
        s.take_audio_commands();
        // 4 m drop lands after ~0.90 s, seen on the 950 ms tick
        run(&mut s, 0, 900);
        assert!(s.take_audio_commands().is_empty());
        run(&mut s, 900, 1000);
        assert_eq!(s.take_audio_commands(), vec![AudioCommand::PlayOnce(SoundId::Drum)]);
    }

    #[test]
    fn wave_reroll_starts_a_tone_and_visualize_stops_it() {
        let mut s = session();
        s.submit("y = A sin(ωt + φ)");
        s.take_audio_commands();
        s.reroll();
        let commands = s.take_audio_commands();
        let Some(Scene::Wave(wave)) = s.scene() else {
            panic!("wave should be running");
        };
        assert_eq!(
            commands,
            vec![AudioCommand::StartTone {
                frequency: wave.tone_frequency()
            }]
        );

        s.visualize(SIMPLE_HARMONIC_MOTION);
        assert_eq!(s.take_audio_commands(), vec![AudioCommand::StopTone]);
        // Nothing left to stop
        s.visualize(SIMPLE_HARMONIC_MOTION);
        assert!(s.take_audio_commands().is_empty());
    }

    #[test]
    fn reroll_without_a_scene_does_nothing() {
        let mut s = session();
        s.reroll();
        assert!(s.scene().is_none());
        assert!(s.take_audio_commands().is_empty());
    }

    #[test]
    fn sound_loop_needs_a_loaded_clip() {
        let mut s = Session::with_seed(HashSet::from([SoundId::Correct]), 1).unwrap();
        assert!(!s.toggle_sound_loop(FREE_FALL_TIME));
        assert!(!s.toggle_sound_loop(NEWTONS_SECOND_LAW));
        assert!(s.take_audio_commands().is_empty());
    }

    #[test]
    fn a_long_stall_fires_each_timer_once() {
        let mut s = session();
        s.submit("F = mv²/r");
        s.submit("T = 2π√(L/g)");
        assert!(s.toggle_sound_loop(FREE_FALL_TIME));
        run(&mut s, 0, 1000);
        s.take_audio_commands();

        // One frame after a minute without any
        s.advance(61_000);
        let commands = s.take_audio_commands();
        assert_eq!(count(&commands, SoundId::Drum), 1);
        assert!(commands.len() <= 2, "{commands:?}");
        // The pendulum took a single step across the gap
        assert!((s.scene().unwrap().elapsed() - 1.05).abs() < 1e-9);

        // Cadence resumes from the late frame
        run(&mut s, 61_000, 61_599);
        assert_eq!(count(&s.take_audio_commands(), SoundId::Drum), 0);
        s.advance(61_600);
        assert_eq!(count(&s.take_audio_commands(), SoundId::Drum), 1);
    }

    #[test]
    fn starts_from_configured_sliders() {
        let config = AppConfig {
            volume: 30.0,
            tempo: 100.0,
            ..AppConfig::default()
        };
        let s = Session::new(all_sounds(), &config).unwrap();
        assert_eq!(s.volume(), 30.0);
        assert_eq!(s.tempo(), 100.0);
        assert_eq!(s.tempo_bpm(), 150.0);
    }

    #[test]
    fn volume_becomes_gain() {
        let mut s = session();
        s.set_volume(80.0);
        assert_eq!(s.take_audio_commands(), vec![AudioCommand::SetVolume(0.8)]);
        assert_eq!(s.volume(), 80.0);
    }

    #[test]
    fn tempo_label() {
        let mut s = session();
        assert_eq!(s.tempo_bpm(), 100.0);
        s.set_tempo(0.0);
        assert_eq!(s.tempo_bpm(), 50.0);
    }

    #[test]
    fn help_lists_every_formula() {
        let mut s = session();
        s.show_help();
        let notice = s.take_notice().unwrap();
        assert_eq!(notice.title, "Help");
        for definition in catalog::CATALOG {
            assert!(notice.body.contains(definition.canonical), "{}", definition.name);
        }
    }
}
