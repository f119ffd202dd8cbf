//! The formulas a player can discover
//!
//! Every entry names the visualization it unlocks and, optionally, the clip
//! its "Play Sound" loop repeats.

use std::fmt;

/// The closed set of visualizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Pendulum,
    FreeFall,
    Force,
    Orbit,
    Circuit,
    Wave,
}

/// Named sound clips loaded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Correct,
    Drum,
    PianoLow,
    PianoMid,
    PianoHigh,
    Snare,
    Synth,
}

impl SoundId {
    pub const ALL: [SoundId; 7] = [
        SoundId::Correct,
        SoundId::Drum,
        SoundId::PianoLow,
        SoundId::PianoMid,
        SoundId::PianoHigh,
        SoundId::Snare,
        SoundId::Synth,
    ];

    /// File name inside the asset directory
    pub fn file_name(self) -> &'static str {
        match self {
            SoundId::Correct => "correct.mp3",
            SoundId::Drum => "drum.mp3",
            SoundId::PianoLow => "piano_low.mp3",
            SoundId::PianoMid => "piano_mid.mp3",
            SoundId::PianoHigh => "piano_high.mp3",
            SoundId::Snare => "snare.mp3",
            SoundId::Synth => "synth.mp3",
        }
    }
}

/// Canonical formula text, the unique key of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormulaKey(&'static str);

impl FormulaKey {
    pub const fn new(canonical: &'static str) -> Self {
        Self(canonical)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FormulaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A discoverable formula
#[derive(Debug)]
pub struct FormulaDefinition {
    pub canonical: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub visual: VisualKind,
    pub sound: Option<SoundId>,
    pub aliases: &'static [&'static str],
}

impl FormulaDefinition {
    pub fn key(&self) -> FormulaKey {
        FormulaKey::new(self.canonical)
    }

    /// Canonical text followed by every alias
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.canonical).chain(self.aliases.iter().copied())
    }
}

/// Look up a definition in the built-in catalog
pub fn definition(key: FormulaKey) -> Option<&'static FormulaDefinition> {
    CATALOG.iter().find(|def| def.canonical == key.as_str())
}

// ============================================================================
// Built-in catalog
// ============================================================================

pub const PENDULUM_PERIOD: FormulaKey = FormulaKey::new("T = 2π√(L/g)");
pub const FREE_FALL_TIME: FormulaKey = FormulaKey::new("t = √(2h/g)");
pub const NEWTONS_SECOND_LAW: FormulaKey = FormulaKey::new("F = ma");
pub const CENTRIPETAL_FORCE: FormulaKey = FormulaKey::new("F = mv²/r");
pub const OHMS_LAW: FormulaKey = FormulaKey::new("V = IR");
pub const SIMPLE_HARMONIC_MOTION: FormulaKey = FormulaKey::new("y = A sin(ωt + φ)");

pub const CATALOG: &[FormulaDefinition] = &[
    FormulaDefinition {
        canonical: "T = 2π√(L/g)",
        name: "Pendulum Period",
        description: "Period of a simple pendulum",
        visual: VisualKind::Pendulum,
        sound: Some(SoundId::PianoMid),
        aliases: &["T = 2pi√(L/g)", "T = 2*pi*√(L/g)", "T = 2*π*√(L/g)"],
    },
    FormulaDefinition {
        canonical: "t = √(2h/g)",
        name: "Free Fall Time",
        description: "Time for an object to fall from height h",
        visual: VisualKind::FreeFall,
        sound: Some(SoundId::Drum),
        aliases: &["t = sqrt(2h/g)", "t = √(2*h/g)"],
    },
    FormulaDefinition {
        canonical: "F = ma",
        name: "Newton's Second Law",
        description: "Force equals mass times acceleration",
        visual: VisualKind::Force,
        sound: None,
        aliases: &[],
    },
    FormulaDefinition {
        canonical: "F = mv²/r",
        name: "Centripetal Force",
        description: "Force needed for circular motion",
        visual: VisualKind::Orbit,
        sound: Some(SoundId::Snare),
        aliases: &["F = mv^2/r", "F = m*v²/r", "F = m*v^2/r"],
    },
    FormulaDefinition {
        canonical: "V = IR",
        name: "Ohm's Law",
        description: "Relationship between voltage, current and resistance",
        visual: VisualKind::Circuit,
        sound: None,
        aliases: &["V = I*R"],
    },
    FormulaDefinition {
        canonical: "y = A sin(ωt + φ)",
        name: "Simple Harmonic Motion",
        description: "Wave equation for simple harmonic motion",
        visual: VisualKind::Wave,
        sound: Some(SoundId::Synth),
        aliases: &["y = A*sin(ωt + φ)", "y = A sin(wt + φ)", "y = A*sin(wt + φ)"],
    },
];

pub const HELP_TEXT: &str = "\
Enter physics formulas to see them visualized with sound.

Try to discover these important physics formulas:
- Pendulum period (T = 2π√(L/g))
- Free fall time (t = √(2h/g))
- Newton's Second Law (F = ma)
- Centripetal Force (F = mv²/r)
- Ohm's Law (V = IR)
- Simple Harmonic Motion (y = A sin(ωt + φ))

Each formula has unique visualizations and sounds!
Click on visualizations to change parameters.

Sound Effects:
- Pendulum: Piano sounds at swing extremes
- Free Fall: Drum sound when object hits ground
- Centripetal Force: Snare beat on each 1/8th of an orbit
- Simple Harmonic Motion: Synth tones matching wave frequency";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_resolve_to_their_definitions() {
        for key in [
            PENDULUM_PERIOD,
            FREE_FALL_TIME,
            NEWTONS_SECOND_LAW,
            CENTRIPETAL_FORCE,
            OHMS_LAW,
            SIMPLE_HARMONIC_MOTION,
        ] {
            let def = definition(key).expect("key missing from catalog");
            assert_eq!(def.key(), key);
        }
    }

    #[test]
    fn every_visual_is_unlocked_by_exactly_one_formula() {
        for kind in [
            VisualKind::Pendulum,
            VisualKind::FreeFall,
            VisualKind::Force,
            VisualKind::Orbit,
            VisualKind::Circuit,
            VisualKind::Wave,
        ] {
            assert_eq!(CATALOG.iter().filter(|d| d.visual == kind).count(), 1);
        }
    }

    #[test]
    fn loop_sounds_are_loadable_clips() {
        for def in CATALOG {
            if let Some(sound) = def.sound {
                assert!(SoundId::ALL.contains(&sound));
                assert!(sound.file_name().ends_with(".mp3"));
            }
        }
    }
}
