//! Surface temperature model
//!
//! Deliberately non-physical: each star heats the planet by
//! `mass / distance² * HEATING_COEFFICIENT`, a uniform perturbation is added,
//! and the result is clamped to [-100, 100]. It exists to drive habitability.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::BodyStore;
use crate::consts::*;

/// Coarse climate band used for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Climate {
    Frozen,
    Cold,
    Habitable,
    Hot,
    Scorching,
}

impl Climate {
    pub fn classify(temperature: f32) -> Self {
        if temperature <= TOO_COLD {
            Climate::Frozen
        } else if temperature < MIN_HABITABLE {
            Climate::Cold
        } else if temperature <= MAX_HABITABLE {
            Climate::Habitable
        } else if temperature < TOO_HOT {
            Climate::Hot
        } else {
            Climate::Scorching
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Climate::Frozen => "Frozen",
            Climate::Cold => "Cold",
            Climate::Habitable => "Habitable",
            Climate::Hot => "Hot",
            Climate::Scorching => "Scorching",
        }
    }
}

/// Closed habitable interval
#[inline]
pub fn is_habitable(temperature: f32) -> bool {
    (MIN_HABITABLE..=MAX_HABITABLE).contains(&temperature)
}

/// Deterministic heating from every star, before noise and clamping
///
/// `None` when there is no planet or no star to heat it.
pub fn stellar_heating(store: &BodyStore) -> Option<f32> {
    let planet = store.planet()?;
    if !planet.is_valid() {
        log::warn!("Planet {} has invalid position, no temperature reading", planet.id);
        return None;
    }

    let mut total = 0.0;
    let mut stars = 0;
    for star in store.stars() {
        if !star.is_valid() {
            log::warn!("Star {} has invalid position, skipped for heating", star.id);
            continue;
        }
        let distance = planet.pos.distance(star.pos).max(MIN_HEATING_DISTANCE);
        total += star.mass() / (distance * distance) * HEATING_COEFFICIENT;
        stars += 1;
    }

    (stars > 0).then_some(total)
}

/// One temperature reading: heating plus bounded noise, clamped
pub fn compute_temperature<R: Rng + ?Sized>(store: &BodyStore, rng: &mut R) -> Option<f32> {
    let heating = stellar_heating(store)?;
    let noise = rng.random_range(-TEMPERATURE_NOISE..TEMPERATURE_NOISE);
    Some(clamp_temperature(heating + noise))
}

/// Clamp to the model's range; NaN maps to the cold end
#[inline]
pub fn clamp_temperature(raw: f32) -> f32 {
    if raw.is_nan() {
        return TEMPERATURE_MIN;
    }
    raw.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Body, BodyRole};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn system(star_positions: &[Vec2], planet: Vec2) -> BodyStore {
        let mut bodies: Vec<Body> = star_positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Body::new(i as u32, BodyRole::Star, p, Vec2::ZERO, 50.0, 20.0, 0).unwrap())
            .collect();
        bodies.push(
            Body::new(99, BodyRole::Planet, planet, Vec2::ZERO, PLANET_MASS, PLANET_RADIUS, 0)
                .unwrap(),
        );
        BodyStore::new(bodies)
    }

    #[test]
    fn test_heating_inverse_square() {
        let near = system(&[Vec2::new(10.0, 0.0)], Vec2::ZERO);
        let far = system(&[Vec2::new(20.0, 0.0)], Vec2::ZERO);
        let hn = stellar_heating(&near).unwrap();
        let hf = stellar_heating(&far).unwrap();
        assert!((hn - 50.0 / 100.0 * HEATING_COEFFICIENT).abs() < 1e-6);
        assert!((hn / hf - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_heating_sums_stars() {
        let one = system(&[Vec2::new(10.0, 0.0)], Vec2::ZERO);
        let two = system(&[Vec2::new(10.0, 0.0), Vec2::new(0.0, -10.0)], Vec2::ZERO);
        let h1 = stellar_heating(&one).unwrap();
        let h2 = stellar_heating(&two).unwrap();
        assert!((h2 - 2.0 * h1).abs() < 1e-6);
    }

    #[test]
    fn test_no_planet_or_no_stars() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(compute_temperature(&BodyStore::default(), &mut rng).is_none());
        let lonely = system(&[], Vec2::ZERO);
        assert!(compute_temperature(&lonely, &mut rng).is_none());
    }

    #[test]
    fn test_coincident_star_is_bounded() {
        let store = system(&[Vec2::ZERO, Vec2::ZERO, Vec2::ZERO], Vec2::ZERO);
        let mut rng = Pcg32::seed_from_u64(5);
        let t = compute_temperature(&store, &mut rng).unwrap();
        assert!((TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&t));
    }

    #[test]
    fn test_noise_is_bounded() {
        // Stars far enough away that heating is negligible
        let store = system(&[Vec2::new(1.0e4, 0.0)], Vec2::ZERO);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1000 {
            let t = compute_temperature(&store, &mut rng).unwrap();
            assert!(t.abs() <= TEMPERATURE_NOISE + 1e-3);
        }
    }

    #[test]
    fn test_classify_and_habitable_bounds() {
        assert!(is_habitable(MIN_HABITABLE));
        assert!(is_habitable(MAX_HABITABLE));
        assert!(!is_habitable(MIN_HABITABLE - 0.01));
        assert!(!is_habitable(MAX_HABITABLE + 0.01));

        assert_eq!(Climate::classify(-100.0), Climate::Frozen);
        assert_eq!(Climate::classify(-30.0), Climate::Cold);
        assert_eq!(Climate::classify(20.0), Climate::Habitable);
        assert_eq!(Climate::classify(60.0), Climate::Hot);
        assert_eq!(Climate::classify(80.0), Climate::Scorching);
    }

    #[test]
    fn test_clamp_handles_non_finite() {
        assert_eq!(clamp_temperature(f32::INFINITY), TEMPERATURE_MAX);
        assert_eq!(clamp_temperature(f32::NEG_INFINITY), TEMPERATURE_MIN);
        assert_eq!(clamp_temperature(f32::NAN), TEMPERATURE_MIN);
    }

    proptest! {
        #[test]
        fn prop_temperature_always_in_range(
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            d in 0.0f32..1.0e3,
            seed in any::<u64>(),
        ) {
            let planet = Vec2::new(px, py);
            let store = system(
                &[planet + Vec2::new(d, 0.0), planet - Vec2::new(0.0, d * 0.5), planet],
                planet,
            );
            let mut rng = Pcg32::seed_from_u64(seed);
            let t = compute_temperature(&store, &mut rng).unwrap();
            prop_assert!(t.is_finite());
            prop_assert!((TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&t));
        }
    }
}
