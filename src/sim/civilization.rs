//! Civilisation progression
//!
//! While life exists, simulated years fill the current era's progress bar.
//! Filling it moves to the next era with progress reset to zero; any excess
//! from that evaluation is dropped rather than carried into the next era.
//! Passing the last era is the win condition.

use super::era::{TERMINAL_ERA, era, era_name};
use super::life::Habitability;

/// Result of an [`advance`] call that changed the era
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CivilizationEvent {
    /// Entered the era at this index
    EraAdvanced(usize),
    /// Completed the final era
    Won,
}

impl CivilizationEvent {
    pub fn describe(&self) -> String {
        match *self {
            CivilizationEvent::EraAdvanced(index) => {
                format!("Civilisation entered the {}! Technology accelerates!", era_name(index))
            }
            CivilizationEvent::Won => {
                "Civilisation reached the interstellar era and escaped the three-body system!"
                    .to_string()
            }
        }
    }
}

/// True while `advance` can still make progress
pub fn is_developing(h: &Habitability) -> bool {
    h.life_exists && h.current_era.is_some_and(|i| i < TERMINAL_ERA)
}

/// Develop for `years` simulated years
///
/// At most one era boundary is crossed per call.
pub fn advance(h: &mut Habitability, years: f64) -> Option<CivilizationEvent> {
    if !is_developing(h) || years <= 0.0 {
        return None;
    }
    let index = h.current_era?;
    let current = era(index)?;

    h.era_progress += years / current.development_years * 100.0;
    if h.era_progress < 100.0 {
        return None;
    }

    h.era_progress = 0.0;
    h.current_era = Some(index + 1);
    if index + 1 >= TERMINAL_ERA {
        Some(CivilizationEvent::Won)
    } else {
        Some(CivilizationEvent::EraAdvanced(index + 1))
    }
}
