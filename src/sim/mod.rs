//! Deterministic simulation module
//!
//! Everything that changes over time lives here:
//! - Seeded RNG only (same seed, same system and same temperature noise)
//! - Stable iteration order (bodies sorted by id)
//! - No rendering or platform dependencies

pub mod body;
pub mod civilization;
pub mod clock;
pub mod era;
pub mod gravity;
pub mod history;
pub mod life;
pub mod state;
pub mod temperature;
pub mod tick;

pub use body::{Body, BodyRole, BodyStore, Viewport};
pub use civilization::CivilizationEvent;
pub use clock::{FrameStep, SimulationClock};
pub use era::{ERAS, Era, TERMINAL_ERA};
pub use history::{History, HistoryEntry};
pub use life::{EraSnapshot, Habitability, LifeTransition, Resume};
pub use state::{Command, Simulation, TickTicket};
pub use temperature::{Climate, compute_temperature, is_habitable};
pub use tick::{FrameOutcome, tick};
