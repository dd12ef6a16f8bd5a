//! HUD read model
//!
//! Everything the status panel shows, derived from a `Simulation` without
//! touching it.

use crate::consts::{TEMPERATURE_MAX, TEMPERATURE_MIN};
use crate::sim::era::{ERAS, TERMINAL_ERA, era};
use crate::sim::{Climate, Simulation};

/// Colour band for the overall progress readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Starting,
    Rising,
    Advanced,
    NearlyThere,
}

impl ProgressBand {
    pub fn for_percent(percent: f64) -> Self {
        if percent > 80.0 {
            ProgressBand::NearlyThere
        } else if percent > 50.0 {
            ProgressBand::Advanced
        } else if percent > 20.0 {
            ProgressBand::Rising
        } else {
            ProgressBand::Starting
        }
    }

    /// 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            ProgressBand::Starting => 0xFFFFFF,
            ProgressBand::Rising => 0xFFFF00,
            ProgressBand::Advanced => 0x00FF00,
            ProgressBand::NearlyThere => 0xFFD700,
        }
    }
}

/// One frame's worth of HUD values
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub simulated_years: f64,
    pub temperature: f32,
    pub climate: Climate,
    /// Pointer position on the temperature bar, 0..=100
    pub temperature_percent: f32,
    pub life_exists: bool,
    /// `None` before life appears and after the final era
    pub era_name: Option<&'static str>,
    pub era_color: Option<u32>,
    pub era_progress: f64,
    pub development_years: f64,
    pub overall_progress: f64,
    pub progress_band: ProgressBand,
    pub time_scale: f32,
    pub is_running: bool,
    pub won: bool,
}

impl StatusReport {
    pub fn from_simulation(sim: &Simulation) -> Self {
        let h = sim.habitability();
        let current = h.current_era.and_then(era);
        let overall = overall_progress(h.current_era, h.era_progress);
        Self {
            simulated_years: sim.clock().simulated_years,
            temperature: sim.temperature(),
            climate: Climate::classify(sim.temperature()),
            temperature_percent: temperature_indicator_percent(sim.temperature()),
            life_exists: h.life_exists,
            era_name: current.map(|e| e.name),
            era_color: current.map(|e| e.color),
            era_progress: if current.is_some() { h.era_progress } else { 0.0 },
            development_years: h
                .current_era
                .map_or(0.0, |i| development_years(i, h.era_progress)),
            overall_progress: overall,
            progress_band: ProgressBand::for_percent(overall),
            time_scale: sim.clock().time_scale(),
            is_running: sim.is_running(),
            won: sim.has_won(),
        }
    }

    /// Era shown in the HUD: "--" before life, a fixed label once won
    pub fn era_label(&self) -> &'static str {
        match self.era_name {
            Some(name) => name,
            None if self.won => "Interstellar civilisation",
            None => "--",
        }
    }
}

/// Linear map of [-100, 100] onto [0, 100]%, clamped at the ends
pub fn temperature_indicator_percent(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return 50.0;
    }
    let span = TEMPERATURE_MAX - TEMPERATURE_MIN;
    ((temperature - TEMPERATURE_MIN) / span * 100.0).clamp(0.0, 100.0)
}

/// Share of the whole era ladder completed, in percent
pub fn overall_progress(current_era: Option<usize>, era_progress: f64) -> f64 {
    match current_era {
        None => 0.0,
        Some(i) if i >= TERMINAL_ERA => 100.0,
        Some(i) => (i as f64 * 100.0 + era_progress) / (ERAS.len() as f64 * 100.0) * 100.0,
    }
}

/// Simulated years the civilisation has spent developing to reach this point
pub fn development_years(current_era: usize, era_progress: f64) -> f64 {
    let completed: f64 = ERAS
        .iter()
        .take(current_era)
        .map(|e| e.development_years)
        .sum();
    let partial = era(current_era).map_or(0.0, |e| e.development_years * era_progress / 100.0);
    completed + partial
}

/// Human-readable span of simulated years
pub fn format_years(years: f64) -> String {
    if years < 1_000.0 {
        format!("{:.0} years", years)
    } else if years < 1_000_000.0 {
        format!("{:.1} thousand years", years / 1_000.0)
    } else {
        format!("{:.1} million years", years / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, Viewport};

    #[test]
    fn test_indicator_mapping() {
        assert_eq!(temperature_indicator_percent(-100.0), 0.0);
        assert_eq!(temperature_indicator_percent(0.0), 50.0);
        assert_eq!(temperature_indicator_percent(100.0), 100.0);
        assert_eq!(temperature_indicator_percent(-250.0), 0.0);
        assert_eq!(temperature_indicator_percent(400.0), 100.0);
        assert_eq!(temperature_indicator_percent(50.0), 75.0);
    }

    #[test]
    fn test_overall_progress() {
        assert_eq!(overall_progress(None, 0.0), 0.0);
        assert_eq!(overall_progress(Some(0), 0.0), 0.0);
        assert!((overall_progress(Some(6), 0.0) - 50.0).abs() < 1e-9);
        assert!((overall_progress(Some(11), 100.0) - 100.0).abs() < 1e-9);
        assert_eq!(overall_progress(Some(TERMINAL_ERA), 0.0), 100.0);
    }

    #[test]
    fn test_development_years() {
        assert_eq!(development_years(0, 50.0), 1_250_000.0);
        assert_eq!(development_years(1, 0.0), 2_500_000.0);
        assert_eq!(development_years(2, 50.0), 2_500_000.0 + 7_000.0 + 1_000.0);
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(999.0), "999 years");
        assert_eq!(format_years(1_500.0), "1.5 thousand years");
        assert_eq!(format_years(2_500_000.0), "2.5 million years");
    }

    #[test]
    fn test_progress_band() {
        assert_eq!(ProgressBand::for_percent(10.0), ProgressBand::Starting);
        assert_eq!(ProgressBand::for_percent(20.5), ProgressBand::Rising);
        assert_eq!(ProgressBand::for_percent(51.0), ProgressBand::Advanced);
        assert_eq!(ProgressBand::for_percent(81.0), ProgressBand::NearlyThere);
        assert_eq!(ProgressBand::NearlyThere.color(), 0xFFD700);
    }

    #[test]
    fn test_era_label_follows_habitability() {
        let mut sim = Simulation::new(5, Viewport::default());
        sim.apply(Command::Randomize, 0.0);
        sim.habitability.life_exists = true;
        sim.habitability.current_era = Some(3);
        assert_eq!(StatusReport::from_simulation(&sim).era_label(), "Iron Age");

        sim.habitability.current_era = Some(TERMINAL_ERA);
        sim.won = true;
        let report = StatusReport::from_simulation(&sim);
        assert_eq!(report.era_name, None);
        assert_eq!(report.era_label(), "Interstellar civilisation");
    }

    #[test]
    fn test_report_before_life() {
        let mut sim = Simulation::new(4, Viewport::default());
        sim.apply(Command::Randomize, 0.0);
        let report = StatusReport::from_simulation(&sim);
        assert!(!report.life_exists);
        assert_eq!(report.era_name, None);
        assert_eq!(report.era_label(), "--");
        assert_eq!(report.overall_progress, 0.0);
        assert_eq!(report.development_years, 0.0);
        assert_eq!(report.time_scale, 1.0);
        assert!(!report.is_running);
        assert!((0.0..=100.0).contains(&report.temperature_percent));
    }
}
