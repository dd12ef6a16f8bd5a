//! Trisolaris - a three-body civilisation simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, climate, life, civilisation)
//! - `render`: Renderer collaborator interface and display helpers
//! - `ui`: Read-only status model for the HUD
//! - `settings`: Host preferences

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{SettingsError, SimError};
pub use settings::Settings;

use glam::Vec2;

/// Simulation tuning constants
///
/// The gravitational constant and speed ceilings are tuned so the system stays
/// on screen, not to model real orbits.
pub mod consts {
    /// Tuned gravitational constant
    pub const CUSTOM_G: f32 = 0.5;
    /// Extra separation beyond touching radii below which a pair exerts no force
    pub const COLLISION_MARGIN: f32 = 10.0;

    /// Speed ceilings (world units per reference frame)
    pub const STAR_MAX_SPEED: f32 = 1.0;
    pub const PLANET_MAX_SPEED: f32 = 1.5;

    /// Viewport inset beyond which the restoring force kicks in
    pub const BOUNDARY_MARGIN: f32 = 50.0;
    /// Restoring force per unit mass toward the viewport centre
    pub const BOUNDARY_FORCE_COEFFICIENT: f32 = 0.01;

    /// Body generation
    pub const STAR_COUNT: usize = 3;
    pub const STAR_MASS_RANGE: (f32, f32) = (40.0, 60.0);
    pub const STAR_RADIUS_RANGE: (f32, f32) = (18.0, 23.0);
    pub const STAR_BASE_SPEED: f32 = 0.7;
    pub const STAR_SPEED_JITTER: f32 = 0.1;
    pub const STAR_ANGLE_JITTER: f32 = 0.2;
    pub const STAR_HEADING_JITTER: f32 = 0.1;
    pub const STAR_COLORS: [u32; STAR_COUNT] = [0xFF5733, 0xFFC300, 0x33FF57];
    pub const PLANET_MASS: f32 = 20.0;
    pub const PLANET_RADIUS: f32 = 12.0;
    pub const PLANET_SPEED: f32 = 0.9;
    pub const PLANET_HEADING_JITTER: f32 = 0.2;
    pub const PLANET_ORBIT_FACTOR: f32 = 1.5;
    pub const PLANET_ORBIT_SPREAD: f32 = 30.0;
    pub const PLANET_COLOR: u32 = 0x3498DB;
    pub const INITIAL_DISTANCE: f32 = 100.0;
    pub const INITIAL_DISTANCE_VARIATION: f32 = 30.0;

    /// Temperature model
    pub const HEATING_COEFFICIENT: f32 = 0.5;
    /// Half-width of the uniform perturbation added to each reading
    pub const TEMPERATURE_NOISE: f32 = 10.0;
    /// Floor for the star-planet distance used in heating
    pub const MIN_HEATING_DISTANCE: f32 = 1.0;
    pub const TEMPERATURE_MIN: f32 = -100.0;
    pub const TEMPERATURE_MAX: f32 = 100.0;
    pub const MIN_HABITABLE: f32 = -20.0;
    pub const MAX_HABITABLE: f32 = 50.0;
    pub const TOO_HOT: f32 = 80.0;
    pub const TOO_COLD: f32 = -100.0;

    /// Re-emergence thresholds (era progress percent at extinction)
    pub const RESUME_SAME_ERA_PROGRESS: f64 = 60.0;
    pub const RESUME_PREVIOUS_ERA_PROGRESS: f64 = 10.0;

    /// Clock
    /// Frame deltas are capped to avoid a spiral of death on slow frames
    pub const MAX_FRAME_MS: f64 = 16.0;
    /// Physics velocities are expressed per reference frame of this length
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// Simulated years that pass per real millisecond at 1x
    pub const YEARS_PER_MS: f64 = 1.0;
    /// Temperature, life and civilisation run every Nth frame
    pub const EVALUATION_INTERVAL_FRAMES: u64 = 10;
    pub const TIME_SCALES: [f32; 3] = [1.0, 10.0, 100.0];

    /// Most recent history entries kept
    pub const HISTORY_CAPACITY: usize = 50;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

