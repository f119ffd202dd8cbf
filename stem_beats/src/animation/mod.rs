//! Tick-driven visualizations
//!
//! Each visualization is an immutable state value. A tick replaces it with
//! the state `dt` seconds later; positions are closed-form functions of the
//! absolute elapsed time, so nothing drifts. Discrete events (swing extremes,
//! ground contact, orbit sectors) come from comparing the previous and the
//! new state, which makes them fire once per crossing.

pub mod circuit;
pub mod force;
pub mod freefall;
pub mod orbit;
pub mod pendulum;
pub mod render;
pub mod wave;

use log::{debug, info};
use rand::Rng;

use crate::catalog::{SoundId, VisualKind};
use crate::constants::{TICK_MS, TICK_SECONDS};
use crate::scheduler::{TimerId, TimerQueue};

pub use circuit::Circuit;
pub use force::ConstantForce;
pub use freefall::FreeFall;
pub use orbit::Orbit;
pub use pendulum::Pendulum;
pub use render::RenderCommand;
pub use wave::Wave;

/// Something a visualization wants heard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The pendulum entered one of its turning points
    SwingExtreme { sample: SoundId },
    /// The falling object reached the ground
    GroundContact,
    /// The orbiting body entered a new eighth of its orbit
    SectorCrossed { sector: u8 },
}

impl AnimationEvent {
    pub fn sound(&self) -> SoundId {
        match self {
            AnimationEvent::SwingExtreme { sample } => *sample,
            AnimationEvent::GroundContact => SoundId::Drum,
            AnimationEvent::SectorCrossed { .. } => SoundId::Snare,
        }
    }
}

/// Common shape of the six visualizations
pub trait Visualization: Clone + Sized {
    const KIND: VisualKind;

    /// Default parameters at time zero
    fn initial() -> Self;

    /// Fresh random parameters at time zero
    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self;

    fn elapsed(&self) -> f64;

    /// The state `dt` seconds later
    fn advance(&self, dt: f64) -> Self;

    /// Events fired moving from `prev` to `next`
    fn events(_prev: &Self, _next: &Self) -> Vec<AnimationEvent> {
        Vec::new()
    }

    fn render(&self) -> Vec<RenderCommand>;
}

/// The live visualization
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Pendulum(Pendulum),
    FreeFall(FreeFall),
    Force(ConstantForce),
    Orbit(Orbit),
    Circuit(Circuit),
    Wave(Wave),
}

/// Result of stepping a scene by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub scene: Scene,
    pub events: Vec<AnimationEvent>,
}

fn step_with<V: Visualization>(state: &V, dt: f64, wrap: fn(V) -> Scene) -> Step {
    let next = state.advance(dt);
    let events = V::events(state, &next);
    Step {
        scene: wrap(next),
        events,
    }
}

impl Scene {
    /// Default scene for a visualization
    pub fn initial(kind: VisualKind) -> Self {
        match kind {
            VisualKind::Pendulum => Scene::Pendulum(Pendulum::initial()),
            VisualKind::FreeFall => Scene::FreeFall(FreeFall::initial()),
            VisualKind::Force => Scene::Force(ConstantForce::initial()),
            VisualKind::Orbit => Scene::Orbit(Orbit::initial()),
            VisualKind::Circuit => Scene::Circuit(Circuit::initial()),
            VisualKind::Wave => Scene::Wave(Wave::initial()),
        }
    }

    /// Random parameters for a visualization
    pub fn rerolled<R: Rng + ?Sized>(kind: VisualKind, rng: &mut R) -> Self {
        match kind {
            VisualKind::Pendulum => Scene::Pendulum(Pendulum::rerolled(rng)),
            VisualKind::FreeFall => Scene::FreeFall(FreeFall::rerolled(rng)),
            VisualKind::Force => Scene::Force(ConstantForce::rerolled(rng)),
            VisualKind::Orbit => Scene::Orbit(Orbit::rerolled(rng)),
            VisualKind::Circuit => Scene::Circuit(Circuit::rerolled(rng)),
            VisualKind::Wave => Scene::Wave(Wave::rerolled(rng)),
        }
    }

    pub fn kind(&self) -> VisualKind {
        match self {
            Scene::Pendulum(_) => Pendulum::KIND,
            Scene::FreeFall(_) => FreeFall::KIND,
            Scene::Force(_) => ConstantForce::KIND,
            Scene::Orbit(_) => Orbit::KIND,
            Scene::Circuit(_) => Circuit::KIND,
            Scene::Wave(_) => Wave::KIND,
        }
    }

    pub fn elapsed(&self) -> f64 {
        match self {
            Scene::Pendulum(s) => s.elapsed(),
            Scene::FreeFall(s) => s.elapsed(),
            Scene::Force(s) => s.elapsed(),
            Scene::Orbit(s) => s.elapsed(),
            Scene::Circuit(s) => s.elapsed(),
            Scene::Wave(s) => s.elapsed(),
        }
    }

    pub fn step(&self, dt: f64) -> Step {
        match self {
            Scene::Pendulum(s) => step_with(s, dt, Scene::Pendulum),
            Scene::FreeFall(s) => step_with(s, dt, Scene::FreeFall),
            Scene::Force(s) => step_with(s, dt, Scene::Force),
            Scene::Orbit(s) => step_with(s, dt, Scene::Orbit),
            Scene::Circuit(s) => step_with(s, dt, Scene::Circuit),
            Scene::Wave(s) => step_with(s, dt, Scene::Wave),
        }
    }

    pub fn render(&self) -> Vec<RenderCommand> {
        match self {
            Scene::Pendulum(s) => s.render(),
            Scene::FreeFall(s) => s.render(),
            Scene::Force(s) => s.render(),
            Scene::Orbit(s) => s.render(),
            Scene::Circuit(s) => s.render(),
            Scene::Wave(s) => s.render(),
        }
    }
}

/// Timer payload for the next animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTick {
    pub generation: u64,
}

/// Drives the live scene from the timer queue.
///
/// Every start, restart or stop bumps the generation and cancels the pending
/// tick. A tick that still fires with an older generation does nothing.
#[derive(Debug)]
pub struct AnimationEngine {
    generation: u64,
    scene: Option<Scene>,
    pending: Option<TimerId>,
    frame: Vec<RenderCommand>,
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self {
            generation: 0,
            scene: None,
            pending: None,
            frame: render::placeholder(),
        }
    }

    /// Replace whatever is running with `scene` and start ticking it
    pub fn start<T: From<AnimationTick>>(&mut self, scene: Scene, timers: &mut TimerQueue<T>) -> u64 {
        self.invalidate(timers);
        info!(
            "Starting {:?} visualization (generation {})",
            scene.kind(),
            self.generation
        );
        self.frame = scene.render();
        self.scene = Some(scene);
        self.schedule_next(timers);
        self.generation
    }

    /// Stop animating and show the placeholder
    pub fn stop<T>(&mut self, timers: &mut TimerQueue<T>) {
        self.invalidate(timers);
        self.scene = None;
        self.frame = render::placeholder();
    }

    /// Handle a tick. Returns `None` for a stale tick.
    pub fn on_tick<T: From<AnimationTick>>(
        &mut self,
        tick: AnimationTick,
        timers: &mut TimerQueue<T>,
    ) -> Option<Vec<AnimationEvent>> {
        if !self.is_current(tick.generation) {
            debug!(
                "Dropping stale tick from generation {} (current {})",
                tick.generation, self.generation
            );
            return None;
        }
        let scene = self.scene.as_ref()?;

        let Step { scene, events } = scene.step(TICK_SECONDS);
        self.frame = scene.render();
        self.scene = Some(scene);
        self.schedule_next(timers);
        Some(events)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.scene.is_some() && generation == self.generation
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn active_kind(&self) -> Option<VisualKind> {
        self.scene.as_ref().map(Scene::kind)
    }

    /// Render commands for the most recent tick
    pub fn frame(&self) -> &[RenderCommand] {
        &self.frame
    }

    fn invalidate<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
        self.generation += 1;
    }

    fn schedule_next<T: From<AnimationTick>>(&mut self, timers: &mut TimerQueue<T>) {
        let tick = AnimationTick {
            generation: self.generation,
        };
        self.pending = Some(timers.schedule_after(TICK_MS, T::from(tick)));
    }
}
