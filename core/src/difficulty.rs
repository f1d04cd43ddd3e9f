use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Built-in board presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Huge,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Huge,
        Difficulty::Extreme,
    ];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(10, 7, 10),
            Self::Medium => BoardConfig::new_unchecked(22, 12, 40),
            Self::Hard => BoardConfig::new_unchecked(32, 18, 100),
            Self::Huge => BoardConfig::new_unchecked(48, 27, 220),
            Self::Extreme => BoardConfig::new_unchecked(32, 18, 150),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Huge => "huge",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected one of easy, medium, hard, huge, extreme")]
pub struct ParseDifficultyError;

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(ParseDifficultyError)
    }
}

/// Which way a board's long side should face.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    AsIs,
    /// Width at least height.
    Landscape,
    /// Height at least width.
    Portrait,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_configs() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(
                BoardConfig::new(config.width, config.height, config.mines),
                Ok(config),
                "{difficulty}"
            );
        }
    }

    #[test]
    fn presets_leave_room_for_no_guess_start() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert!(config.total_cells() - 25 >= config.mines, "{difficulty}");
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.name().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("impossible".parse::<Difficulty>(), Err(ParseDifficultyError));
    }
}
