//! Pairwise gravity integrator
//!
//! One step: accumulate pairwise attraction and the soft boundary pull,
//! integrate into velocities, clamp each speed to its role's ceiling, then move.
//! Pairs closer than their touching radii plus a margin exert nothing, which
//! keeps the inverse-square term away from its singularity.

use glam::Vec2;

use super::body::{Body, BodyStore, Viewport};
use crate::consts::*;

/// Minimum separation at which a pair starts to attract
#[inline]
pub fn min_pair_distance(a: &Body, b: &Body) -> f32 {
    a.radius() + b.radius() + COLLISION_MARGIN
}

/// Attraction exerted on `a` by `b`
///
/// `b` feels the exact negation. Returns `None` when the pair is inside the
/// guard distance or either body is invalid.
pub fn pair_force(a: &Body, b: &Body) -> Option<Vec2> {
    if !a.is_valid() || !b.is_valid() {
        return None;
    }
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance < min_pair_distance(a, b) {
        return None;
    }
    let magnitude = CUSTOM_G * a.mass() * b.mass() / (distance * distance);
    Some(delta / distance * magnitude)
}

/// Sum of pairwise forces on every body, indexed like `bodies`
pub fn accumulate_forces(bodies: &[Body], out: &mut [Vec2]) {
    for f in out.iter_mut() {
        *f = Vec2::ZERO;
    }

    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(force) = pair_force(&bodies[i], &bodies[j]) {
                out[i] += force;
                out[j] -= force;
            }
        }
    }
}

/// Pull toward the viewport centre once a body leaves the inset area
pub fn boundary_force(body: &Body, viewport: &Viewport) -> Vec2 {
    if viewport.contains_inset(body.pos, BOUNDARY_MARGIN) {
        return Vec2::ZERO;
    }
    let to_center = viewport.center() - body.pos;
    to_center.normalize_or_zero() * BOUNDARY_FORCE_COEFFICIENT * body.mass()
}

/// Rescale `vel` so its length does not exceed `max_speed`, keeping direction
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel * (max_speed / speed)
    } else {
        vel
    }
}

/// Advance every body once by `dt_ms` (already multiplied by the time scale)
pub fn step(store: &mut BodyStore, viewport: &Viewport, dt_ms: f32) {
    if store.is_empty() || dt_ms <= 0.0 {
        return;
    }
    let h = dt_ms / REFERENCE_FRAME_MS;

    let mut forces = vec![Vec2::ZERO; store.len()];
    accumulate_forces(store.bodies(), &mut forces);

    for (body, force) in store.bodies_mut().iter_mut().zip(forces.iter()) {
        if !body.is_valid() {
            log::warn!("Skipping body {} with invalid state: {:?}", body.id, body.pos);
            continue;
        }
        let total = *force + boundary_force(body, viewport);
        body.vel += total / body.mass() * h;
        body.vel = clamp_speed(body.vel, body.role.max_speed());
        body.pos += body.vel * h;
    }
}
