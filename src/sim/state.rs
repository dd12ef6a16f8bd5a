//! Simulation context and control surface
//!
//! One owned `Simulation` replaces any process-wide game state. The tick
//! driver (`tick`) is the only writer of bodies, clock and habitability while
//! running; the commands here are the only writers otherwise.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{BodyStore, Viewport};
use super::clock::SimulationClock;
use super::era::era_name;
use super::history::History;
use super::life::Habitability;
use super::temperature::compute_temperature;
use crate::render::BodySnapshot;

/// Commands produced by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Replace the star system with a freshly generated one (paused)
    Randomize,
    /// Start or pause the clock
    ToggleRun,
    /// Clear everything, including the extinction snapshot
    Reset,
    /// 1x -> 10x -> 100x -> 1x
    CycleTimeScale,
    /// Dismiss the win and reset
    RestartAfterWin,
}

/// Permission to run one frame
///
/// Issued by [`Simulation::schedule`]. Randomize and reset invalidate every
/// ticket issued before them, so a frame callback that was already queued
/// cannot touch the replaced system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct TickTicket {
    pub(crate) epoch: u64,
}

/// The whole simulation, owned by the host
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) viewport: Viewport,
    pub(crate) bodies: BodyStore,
    pub(crate) clock: SimulationClock,
    pub(crate) habitability: Habitability,
    pub(crate) temperature: f32,
    pub(crate) history: History,
    pub(crate) is_running: bool,
    pub(crate) won: bool,
    pub(crate) win_pending: bool,
    pub(crate) epoch: u64,
}

impl Simulation {
    /// Empty simulation; bodies appear on the first `Randomize`
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            bodies: BodyStore::default(),
            clock: SimulationClock::default(),
            habitability: Habitability::default(),
            temperature: 0.0,
            history: History::new(),
            is_running: false,
            won: false,
            win_pending: false,
            epoch: 0,
        }
    }

    /// Simulation over a caller-built system (paused)
    pub fn with_bodies(seed: u64, viewport: Viewport, bodies: BodyStore) -> Self {
        let mut sim = Self::new(seed, viewport);
        sim.bodies = bodies;
        sim.refresh_temperature();
        sim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.bodies
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn set_time_scale_index(&mut self, index: usize) {
        self.clock.set_time_scale_index(index);
    }

    pub fn habitability(&self) -> &Habitability {
        &self.habitability
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    /// One-shot win signal: true exactly once per win
    pub fn take_win_signal(&mut self) -> bool {
        std::mem::take(&mut self.win_pending)
    }

    /// Ticket for the next frame callback
    pub fn schedule(&self) -> TickTicket {
        TickTicket { epoch: self.epoch }
    }

    /// Read-only body view for the renderer; invalid bodies are left out
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies
            .bodies()
            .iter()
            .filter_map(|body| {
                let snapshot = BodySnapshot::from_body(body);
                if snapshot.is_none() {
                    log::warn!("Body {} has no valid position, not drawn", body.id);
                }
                snapshot
            })
            .collect()
    }

    /// Apply a UI command at host time `now_ms`
    ///
    /// Returns true when the command replaced the system, which invalidates
    /// every outstanding ticket; the host must schedule a fresh frame.
    pub fn apply(&mut self, command: Command, now_ms: f64) -> bool {
        let epoch = self.epoch;
        match command {
            Command::Randomize => self.randomize(now_ms),
            Command::ToggleRun => self.toggle_run(now_ms),
            Command::Reset => self.reset(now_ms),
            Command::CycleTimeScale => {
                let scale = self.clock.cycle_time_scale();
                self.record(now_ms, format!("Time flow set to {}x", scale));
            }
            Command::RestartAfterWin => self.reset(now_ms),
        }
        self.epoch != epoch
    }

    fn randomize(&mut self, now_ms: f64) {
        self.epoch += 1;

        // A living civilisation survives into the new system like an extinction
        if self.habitability.life_exists {
            let snapshot = self.habitability.collapse();
            self.record(
                now_ms,
                format!(
                    "Star system replaced! Civilisation lost in the {} at {:.1}%",
                    era_name(snapshot.era),
                    snapshot.progress
                ),
            );
        }
        self.habitability.clear_life();

        let time_scale_index = self.clock.time_scale_index();
        self.clock = SimulationClock::default();
        self.clock.set_time_scale_index(time_scale_index);
        self.is_running = false;
        self.won = false;
        self.win_pending = false;

        self.bodies = BodyStore::generate(&mut self.rng, &self.viewport);
        self.refresh_temperature();
        self.record(now_ms, "System initialised; press Start to run the simulation");
    }

    fn toggle_run(&mut self, now_ms: f64) {
        if self.won {
            log::info!("Ignoring run toggle: the civilisation has already won");
            return;
        }
        if self.bodies.is_empty() {
            self.randomize(now_ms);
            return;
        }

        self.is_running = !self.is_running;
        if self.is_running {
            self.clock.rearm();
            self.record(now_ms, "Simulation started");
        } else {
            self.record(now_ms, "Simulation paused");
        }
    }

    fn reset(&mut self, now_ms: f64) {
        self.epoch += 1;
        self.clock = SimulationClock::default();
        self.habitability = Habitability::default();
        self.temperature = 0.0;
        self.bodies.clear();
        self.is_running = false;
        self.won = false;
        self.win_pending = false;
        self.record(now_ms, "Game reset, waiting for a new system...");
    }

    pub(crate) fn refresh_temperature(&mut self) {
        if let Some(t) = compute_temperature(&self.bodies, &mut self.rng) {
            self.temperature = t;
        }
    }

    pub(crate) fn record(&mut self, now_ms: f64, message: impl Into<String>) {
        let years = self.clock.simulated_years;
        self.history.push(now_ms, years, message);
    }
}
