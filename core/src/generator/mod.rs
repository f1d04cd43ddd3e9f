use serde::{Deserialize, Serialize};

use crate::*;
pub use no_guess::*;
pub use random::*;

mod no_guess;
mod random;

/// Populates the mines of an empty board once the first click is known.
pub trait MinefieldGenerator {
    /// Places `mines` mines on `grid`, keeping `start` safe, and fills in adjacency counts.
    fn generate(&mut self, grid: &mut Grid, start: Coord2, mines: CellCount)
    -> Result<GenerationReport>;
}

/// How a layout came to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Number of layouts drawn, including the one kept.
    pub attempts: u32,
    /// Whether the kept layout passed the solvability check. Plain random layouts are never
    /// checked and always report `false`.
    pub verified: bool,
}
