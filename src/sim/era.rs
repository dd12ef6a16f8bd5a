//! Static catalog of civilisation eras, earliest first

/// One stage of technological development
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Era {
    pub name: &'static str,
    /// Simulated years needed to go from 0% to 100%
    pub development_years: f64,
    /// 0xRRGGBB
    pub color: u32,
}

/// Completing the last entry wins the game
pub const ERAS: [Era; 12] = [
    Era { name: "Stone Age", development_years: 2_500_000.0, color: 0x8B4513 },
    Era { name: "Agricultural Age", development_years: 7_000.0, color: 0x2E8B57 },
    Era { name: "Bronze Age", development_years: 2_000.0, color: 0xCD7F32 },
    Era { name: "Iron Age", development_years: 1_000.0, color: 0x808080 },
    Era { name: "Age of Sail", development_years: 500.0, color: 0x4169E1 },
    Era { name: "Steam Age", development_years: 150.0, color: 0xA0522D },
    Era { name: "Industrial Age", development_years: 100.0, color: 0x696969 },
    Era { name: "Electric Age", development_years: 50.0, color: 0xFFFF00 },
    Era { name: "Electronic Age", development_years: 30.0, color: 0x00CED1 },
    Era { name: "Space Age", development_years: 20.0, color: 0x8A2BE2 },
    Era { name: "Aviation Age", development_years: 10.0, color: 0xFF1493 },
    Era { name: "Interstellar Age", development_years: 5.0, color: 0xFFD700 },
];

/// Index one past the last era; reaching it is the win condition
pub const TERMINAL_ERA: usize = ERAS.len();

#[inline]
pub fn era(index: usize) -> Option<&'static Era> {
    ERAS.get(index)
}

/// Display name, with the terminus mapped to a fixed label
pub fn era_name(index: usize) -> &'static str {
    era(index).map_or("Interstellar civilisation", |e| e.name)
}
