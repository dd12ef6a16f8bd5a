//! Frame-driven simulation tick
//!
//! Every frame: clock -> gravity. Every Nth frame additionally:
//! temperature -> life -> civilisation.

use super::civilization::{self, CivilizationEvent};
use super::gravity;
use super::state::{Simulation, TickTicket};
use super::temperature::compute_temperature;

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Ticket predates a randomize/reset; nothing changed and the caller
    /// should not reschedule from it
    Stale,
    /// Clock stopped; only rendering is due
    Paused,
    /// Physics advanced
    Advanced,
    /// Physics advanced and temperature, life and civilisation were evaluated
    Evaluated,
}

impl FrameOutcome {
    pub fn is_stale(self) -> bool {
        self == FrameOutcome::Stale
    }
}

/// Run one frame presented at host time `now_ms`
pub fn tick(sim: &mut Simulation, ticket: TickTicket, now_ms: f64) -> FrameOutcome {
    if ticket.epoch != sim.epoch {
        log::debug!("Dropping stale frame (epoch {} != {})", ticket.epoch, sim.epoch);
        return FrameOutcome::Stale;
    }
    if !sim.is_running {
        return FrameOutcome::Paused;
    }

    let step = sim.clock.advance(now_ms);
    gravity::step(&mut sim.bodies, &sim.viewport, step.physics_dt_ms);

    match step.evaluation_years {
        Some(years) => {
            evaluate(sim, years, now_ms);
            FrameOutcome::Evaluated
        }
        None => FrameOutcome::Advanced,
    }
}

fn evaluate(sim: &mut Simulation, years: f64, now_ms: f64) {
    let Some(temperature) = compute_temperature(&sim.bodies, &mut sim.rng) else {
        return;
    };
    sim.temperature = temperature;

    if let Some(transition) = sim.habitability.evaluate(temperature) {
        sim.record(now_ms, transition.describe());
    }

    if let Some(event) = civilization::advance(&mut sim.habitability, years) {
        sim.record(now_ms, event.describe());
        if event == CivilizationEvent::Won {
            sim.is_running = false;
            sim.won = true;
            sim.win_pending = true;
        }
    }

    log::debug!(
        "t={:.0}y temp={:.1} era={:?} progress={:.1}",
        sim.clock.simulated_years,
        sim.temperature,
        sim.habitability.current_era,
        sim.habitability.era_progress
    );
}
