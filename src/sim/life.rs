//! Habitability and life state machine
//!
//! Life emerges when the temperature enters the habitable range and collapses
//! when it leaves. Both transitions are edge-triggered against the previous
//! evaluation. On collapse the civilisation's position is snapshotted; on the
//! next emergence the snapshot decides how much technology survived.

use serde::{Deserialize, Serialize};

use super::era::era_name;
use super::temperature::is_habitable;
use crate::consts::{RESUME_PREVIOUS_ERA_PROGRESS, RESUME_SAME_ERA_PROGRESS};

/// Era and progress captured at the last extinction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EraSnapshot {
    pub era: usize,
    pub progress: f64,
}

/// Life and civilisation state on the planet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Habitability {
    pub life_exists: bool,
    /// `None` before life first appears; `Some(ERAS.len())` once the game is won
    pub current_era: Option<usize>,
    /// Percent in [0, 100) while life exists
    pub era_progress: f64,
    /// Survives re-randomization; cleared only by a full reset
    pub last_reset: Option<EraSnapshot>,
}

/// How a re-emerging civilisation picks up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// No prior civilisation
    FirstLife,
    /// Late-era extinction: same era, progress intact
    Retained,
    /// Mid-era extinction: one era back, progress lost
    SteppedBack,
    /// Early-era extinction: back to the first era
    Restarted,
}

/// Edge produced by one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeTransition {
    Emerged {
        era: usize,
        progress: f64,
        resume: Resume,
    },
    Collapsed {
        snapshot: EraSnapshot,
        temperature: f32,
    },
}

impl LifeTransition {
    /// History line for this transition
    pub fn describe(&self) -> String {
        match *self {
            LifeTransition::Emerged { resume: Resume::FirstLife, .. } => {
                "Primitive life has appeared! Civilisation begins...".to_string()
            }
            LifeTransition::Emerged { era, progress, resume: Resume::Retained } => format!(
                "Life re-emerged in the {}, keeping {:.1}% of its technology",
                era_name(era),
                progress
            ),
            LifeTransition::Emerged { era, resume: Resume::SteppedBack, .. } => {
                format!("Life re-emerged in the {}", era_name(era))
            }
            LifeTransition::Emerged { resume: Resume::Restarted, .. } => {
                "Life re-emerged, but almost all technology was lost; starting over".to_string()
            }
            LifeTransition::Collapsed { snapshot, temperature } => format!(
                "Civilisation destroyed! Surface temperature {:.1}°C, {} at {:.1}%",
                temperature,
                era_name(snapshot.era),
                snapshot.progress
            ),
        }
    }
}

impl Habitability {
    /// Run one evaluation against `temperature`
    pub fn evaluate(&mut self, temperature: f32) -> Option<LifeTransition> {
        let habitable = is_habitable(temperature);
        match (self.life_exists, habitable) {
            (false, true) => Some(self.emerge()),
            (true, false) => Some(LifeTransition::Collapsed {
                snapshot: self.collapse(),
                temperature,
            }),
            _ => None,
        }
    }

    /// Clear life, recording where the civilisation stood
    pub fn collapse(&mut self) -> EraSnapshot {
        let era = match self.current_era {
            Some(era) => era,
            None => {
                log::warn!("Life collapsed without an era; snapshotting the first era");
                0
            }
        };
        let snapshot = EraSnapshot {
            era,
            progress: self.era_progress,
        };
        self.last_reset = Some(snapshot);
        self.life_exists = false;
        snapshot
    }

    fn emerge(&mut self) -> LifeTransition {
        let (era, progress, resume) = resume_point(self.last_reset);
        self.life_exists = true;
        self.current_era = Some(era);
        self.era_progress = progress;
        LifeTransition::Emerged {
            era,
            progress,
            resume,
        }
    }

    /// Back to the pre-life defaults, keeping the extinction snapshot
    pub fn clear_life(&mut self) {
        self.life_exists = false;
        self.current_era = None;
        self.era_progress = 0.0;
    }
}

/// Where a civilisation restarts given the last extinction snapshot
pub fn resume_point(last_reset: Option<EraSnapshot>) -> (usize, f64, Resume) {
    match last_reset {
        None => (0, 0.0, Resume::FirstLife),
        Some(s) if s.progress >= RESUME_SAME_ERA_PROGRESS => (s.era, s.progress, Resume::Retained),
        Some(s) if s.progress >= RESUME_PREVIOUS_ERA_PROGRESS => {
            (s.era.saturating_sub(1), 0.0, Resume::SteppedBack)
        }
        Some(_) => (0, 0.0, Resume::Restarted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HABITABLE: f32 = 20.0;
    const HOSTILE: f32 = 90.0;

    fn extinct_at(era: usize, progress: f64) -> Habitability {
        let mut h = Habitability {
            life_exists: true,
            current_era: Some(era),
            era_progress: progress,
            last_reset: None,
        };
        assert!(matches!(h.evaluate(HOSTILE), Some(LifeTransition::Collapsed { .. })));
        h
    }

    #[test]
    fn test_first_emergence_starts_at_era_zero() {
        let mut h = Habitability::default();
        let t = h.evaluate(HABITABLE).unwrap();
        assert_eq!(
            t,
            LifeTransition::Emerged { era: 0, progress: 0.0, resume: Resume::FirstLife }
        );
        assert!(h.life_exists);
        assert_eq!(h.current_era, Some(0));
    }

    #[test]
    fn test_collapse_snapshots_progress() {
        let h = extinct_at(4, 42.5);
        assert!(!h.life_exists);
        assert_eq!(h.last_reset, Some(EraSnapshot { era: 4, progress: 42.5 }));
    }

    #[test]
    fn test_resume_late_extinction_keeps_progress() {
        let mut h = extinct_at(3, 75.0);
        h.evaluate(HABITABLE);
        assert_eq!(h.current_era, Some(3));
        assert_eq!(h.era_progress, 75.0);
    }

    #[test]
    fn test_resume_mid_extinction_steps_back() {
        let mut h = extinct_at(3, 30.0);
        let t = h.evaluate(HABITABLE).unwrap();
        assert!(matches!(t, LifeTransition::Emerged { resume: Resume::SteppedBack, .. }));
        assert_eq!(h.current_era, Some(2));
        assert_eq!(h.era_progress, 0.0);
    }

    #[test]
    fn test_resume_early_extinction_restarts() {
        let mut h = extinct_at(3, 5.0);
        h.evaluate(HABITABLE);
        assert_eq!(h.current_era, Some(0));
        assert_eq!(h.era_progress, 0.0);
    }

    #[test]
    fn test_step_back_floors_at_first_era() {
        let mut h = extinct_at(0, 30.0);
        h.evaluate(HABITABLE);
        assert_eq!(h.current_era, Some(0));
    }

    #[test]
    fn test_threshold_boundaries_inclusive() {
        assert_eq!(resume_point(Some(EraSnapshot { era: 5, progress: 60.0 })).2, Resume::Retained);
        assert_eq!(
            resume_point(Some(EraSnapshot { era: 5, progress: 10.0 })).2,
            Resume::SteppedBack
        );
        assert_eq!(resume_point(Some(EraSnapshot { era: 5, progress: 9.99 })).2, Resume::Restarted);
    }

    #[test]
    fn test_later_extinction_overwrites_snapshot() {
        let mut h = extinct_at(6, 80.0);
        h.evaluate(HABITABLE);
        h.era_progress = 15.0;
        h.evaluate(HOSTILE);
        assert_eq!(h.last_reset, Some(EraSnapshot { era: 6, progress: 15.0 }));
    }

    #[test]
    fn test_collapse_without_era_falls_back_to_first() {
        let mut h = Habitability {
            life_exists: true,
            current_era: None,
            era_progress: 40.0,
            last_reset: None,
        };
        assert_eq!(h.collapse(), EraSnapshot { era: 0, progress: 40.0 });
        assert!(!h.life_exists);
    }

    #[test]
    fn test_clear_life_keeps_snapshot() {
        let mut h = extinct_at(2, 70.0);
        h.evaluate(HABITABLE);
        h.clear_life();
        assert!(!h.life_exists);
        assert_eq!(h.current_era, None);
        assert!(h.last_reset.is_some());
    }

    #[test]
    fn test_describe_mentions_era() {
        let t = LifeTransition::Emerged { era: 3, progress: 75.0, resume: Resume::Retained };
        assert!(t.describe().contains("Iron Age"));
        assert!(t.describe().contains("75.0%"));
    }

    proptest! {
        #[test]
        fn prop_constant_temperature_fires_once(
            temperature in -100.0f32..100.0,
            ticks in 1usize..200,
        ) {
            let mut h = Habitability::default();
            let fired = (0..ticks).filter(|_| h.evaluate(temperature).is_some()).count();
            let expected = usize::from(is_habitable(temperature));
            prop_assert_eq!(fired, expected);
        }

        #[test]
        fn prop_progress_in_range_while_alive(
            temps in proptest::collection::vec(-100.0f32..100.0, 1..100),
        ) {
            let mut h = Habitability::default();
            for t in temps {
                h.evaluate(t);
                if h.life_exists {
                    prop_assert!((0.0..100.0).contains(&h.era_progress));
                }
            }
        }
    }
}
