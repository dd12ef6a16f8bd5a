//! Body store: the physical state of the three stars and the planet
//!
//! Only the integrator writes positions and velocities; everything else reads.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::polar_to_cartesian;

/// What a body is in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyRole {
    Star,
    Planet,
}

impl BodyRole {
    /// Speed ceiling applied after each integration step
    pub fn max_speed(self) -> f32 {
        match self {
            BodyRole::Star => STAR_MAX_SPEED,
            BodyRole::Planet => PLANET_MAX_SPEED,
        }
    }
}

/// Drawable area the bodies are confined to (world units == pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(SimError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when `pos` lies inside the viewport inset by `margin` on every side
    pub fn contains_inset(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= margin
            && pos.x <= self.width - margin
            && pos.y >= margin
            && pos.y <= self.height - margin
    }
}

/// A star or the planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub role: BodyRole,
    pub pos: Vec2,
    pub vel: Vec2,
    mass: f32,
    radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Body {
    pub fn new(
        id: u32,
        role: BodyRole,
        pos: Vec2,
        vel: Vec2,
        mass: f32,
        radius: f32,
        color: u32,
    ) -> Result<Self, SimError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(SimError::InvalidMass(mass));
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self {
            id,
            role,
            pos,
            vel,
            mass,
            radius,
            color,
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_star(&self) -> bool {
        self.role == BodyRole::Star
    }

    /// Position and velocity are usable for physics
    pub fn is_valid(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

/// Owns every body, ordered by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyStore {
    bodies: Vec<Body>,
}

impl BodyStore {
    pub fn new(mut bodies: Vec<Body>) -> Self {
        bodies.sort_by_key(|b| b.id);
        Self { bodies }
    }

    /// Generate three stars on a rough triangle around the viewport centre
    /// plus one planet on a wider orbit, all moving tangentially
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Self {
        let center = viewport.center();
        let mut bodies = Vec::with_capacity(STAR_COUNT + 1);

        for (i, &color) in STAR_COLORS.iter().enumerate() {
            let angle = (i as f32 / STAR_COUNT as f32) * std::f32::consts::TAU
                + jitter(rng, STAR_ANGLE_JITTER);
            let distance = INITIAL_DISTANCE + jitter(rng, INITIAL_DISTANCE_VARIATION);
            let radius = rng.random_range(STAR_RADIUS_RANGE.0..STAR_RADIUS_RANGE.1);
            let mass = rng.random_range(STAR_MASS_RANGE.0..STAR_MASS_RANGE.1);
            let heading =
                angle + std::f32::consts::FRAC_PI_2 + jitter(rng, STAR_HEADING_JITTER);
            let speed = STAR_BASE_SPEED + jitter(rng, STAR_SPEED_JITTER);

            bodies.push(Body {
                id: i as u32,
                role: BodyRole::Star,
                pos: center + polar_to_cartesian(distance, angle),
                vel: polar_to_cartesian(speed, heading),
                mass,
                radius,
                color,
            });
        }

        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let distance = INITIAL_DISTANCE * PLANET_ORBIT_FACTOR
            + rng.random_range(0.0..PLANET_ORBIT_SPREAD);
        let heading = angle + std::f32::consts::FRAC_PI_2 + jitter(rng, PLANET_HEADING_JITTER);
        bodies.push(Body {
            id: STAR_COUNT as u32,
            role: BodyRole::Planet,
            pos: center + polar_to_cartesian(distance, angle),
            vel: polar_to_cartesian(PLANET_SPEED, heading),
            mass: PLANET_MASS,
            radius: PLANET_RADIUS,
            color: PLANET_COLOR,
        });

        Self { bodies }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access is reserved for the integrator
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn stars(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.is_star())
    }

    pub fn planet(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.role == BodyRole::Planet)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}

/// Uniform offset in [-spread/2, spread/2)
fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * spread
}
