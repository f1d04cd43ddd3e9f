#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use history::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod difficulty;
mod engine;
mod error;
mod flood;
mod generator;
mod grid;
mod history;
mod tile;
mod types;

/// Board dimensions and mine count of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardConfigData")]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

#[derive(Deserialize)]
struct BoardConfigData {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl TryFrom<BoardConfigData> for BoardConfig {
    type Error = GameError;

    fn try_from(data: BoardConfigData) -> Result<Self> {
        Self::new(data.width, data.height, data.mines)
    }
}

impl BoardConfig {
    pub(crate) const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Fails with `InsufficientSpace` on an empty board or when the mines would fill it.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let total = mult(width, height);
        if total == 0 || mines >= total {
            return Err(GameError::InsufficientSpace {
                requested: mines,
                available: total.saturating_sub(1),
            });
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Swaps the dimensions so the board has the requested orientation.
    pub const fn oriented(self, orientation: Orientation) -> Self {
        let swap = match orientation {
            Orientation::AsIs => false,
            Orientation::Landscape => self.height > self.width,
            Orientation::Portrait => self.width > self.height,
        };
        if swap {
            Self::new_unchecked(self.height, self.width, self.mines)
        } else {
            self
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges outcomes of a multi-cell reveal, the most significant wins.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Outcome of a chord on a numbered cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChordOutcome {
    NoChange,
    /// Neighbors were opened; carries what the reveal led to.
    Revealed(RevealOutcome),
    /// Every remaining neighbor had to be a mine and got flagged.
    Flagged,
}

impl ChordOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed(outcome) => outcome.has_update(),
            Self::Flagged => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_full_or_empty_boards() {
        assert_eq!(
            BoardConfig::new(3, 3, 9),
            Err(GameError::InsufficientSpace {
                requested: 9,
                available: 8
            })
        );
        assert!(BoardConfig::new(0, 5, 0).is_err());
        assert!(BoardConfig::new(3, 3, 8).is_ok());
    }

    #[test]
    fn deserialized_config_is_validated() {
        let config: BoardConfig =
            serde_json::from_str(r#"{"width":9,"height":9,"mines":10}"#).unwrap();
        assert_eq!(config, BoardConfig::new(9, 9, 10).unwrap());
        assert_eq!(config.safe_cells(), 71);

        let overfull = serde_json::from_str::<BoardConfig>(r#"{"width":3,"height":3,"mines":20}"#);
        assert!(overfull.is_err());
    }

    #[test]
    fn safe_cells_saturates_on_unchecked_config() {
        let config = BoardConfig {
            width: 3,
            height: 3,
            mines: 20,
        };

        assert_eq!(config.safe_cells(), 0);
    }

    #[test]
    fn orientation_swaps_only_when_needed() {
        let wide = BoardConfig::new(22, 12, 40).unwrap();

        assert_eq!(wide.oriented(Orientation::Landscape), wide);
        assert_eq!(wide.oriented(Orientation::AsIs), wide);

        let tall = wide.oriented(Orientation::Portrait);
        assert_eq!(tall.size(), (12, 22));
        assert_eq!(tall.mines, 40);
        assert_eq!(tall.oriented(Orientation::Landscape), wide);
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!MarkOutcome::NoChange.has_update());
        assert!(MarkOutcome::Changed.has_update());

        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed.has_update());
        assert!(RevealOutcome::HitMine.has_update());
        assert!(RevealOutcome::Won.has_update());

        assert!(!ChordOutcome::NoChange.has_update());
        assert!(!ChordOutcome::Revealed(RevealOutcome::NoChange).has_update());
        assert!(ChordOutcome::Revealed(RevealOutcome::Revealed).has_update());
        assert!(ChordOutcome::Revealed(RevealOutcome::HitMine).has_update());
        assert!(ChordOutcome::Flagged.has_update());
    }

    #[test]
    fn reveal_outcomes_merge_by_priority() {
        use RevealOutcome::*;

        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
