use serde::{Deserialize, Serialize};

/// Player mark on an unrevealed cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    None,
    Flagged,
    Questioned,
}

/// Authoritative state of one board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub revealed: bool,
    pub mark: Mark,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_flagged(self) -> bool {
        matches!(self.mark, Mark::Flagged)
    }

    pub const fn is_questioned(self) -> bool {
        matches!(self.mark, Mark::Questioned)
    }

    /// Unrevealed and not flagged; question marks do not protect a cell.
    pub const fn is_openable(self) -> bool {
        !self.revealed && !self.is_flagged()
    }
}

/// Order in which `toggle_flag` walks through the marks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagCycle {
    /// `None -> Flagged -> None`
    #[default]
    TwoState,
    /// `None -> Flagged -> Questioned -> None`
    ThreeState,
}

impl FlagCycle {
    pub const fn marks(self) -> &'static [Mark] {
        match self {
            Self::TwoState => &[Mark::None, Mark::Flagged],
            Self::ThreeState => &[Mark::None, Mark::Flagged, Mark::Questioned],
        }
    }

    /// Mark that follows `mark`; marks outside this cycle fall back to `Mark::None`.
    pub fn next(self, mark: Mark) -> Mark {
        let marks = self.marks();
        marks
            .iter()
            .position(|&m| m == mark)
            .map_or(Mark::None, |index| marks[(index + 1) % marks.len()])
    }
}

/// Render-facing snapshot of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    pub questioned: bool,
    /// A mine is showing here, only possible once the game is lost.
    pub mine_hit: bool,
    /// The mine that ended the game.
    pub triggered: bool,
    pub adjacent_count: u8,
}
