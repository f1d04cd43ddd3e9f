use ndarray::Array2;
use smallvec::SmallVec;

use crate::flood::{FloodTarget, flood_fill};
use crate::*;

/// What a player could know about a layout, played out on private reveal/flag arrays.
///
/// The grid is only read. Flags placed here are deductions, not player flags, and never touch the
/// session's mine counter.
#[derive(Clone, Debug)]
pub struct Simulation<'a> {
    grid: &'a Grid,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    revealed_count: CellCount,
}

impl<'a> Simulation<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        let shape = grid.size().to_nd_index();
        Self {
            grid,
            revealed: Array2::default(shape),
            flagged: Array2::default(shape),
            revealed_count: 0,
        }
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flagged[coords.to_nd_index()]
    }

    /// Clicks `coords`, cascading through zeros. Returns `false` without changes on a mine.
    pub fn open(&mut self, coords: Coord2) -> bool {
        if self.grid[coords].mine {
            return false;
        }
        self.try_open(coords);
        flood_fill(self, coords);
        true
    }

    /// Runs whole-board passes of the two single-clue rules until a pass changes nothing or
    /// `max_passes` is reached. Returns the number of passes run.
    pub fn deduce(&mut self, max_passes: u32) -> u32 {
        let mut passes = 0;

        while passes < max_passes {
            passes += 1;

            let mut progress = false;
            for coords in self.grid.iter_coords() {
                if self.is_revealed(coords) && self.grid[coords].adjacent_mines > 0 {
                    progress |= self.apply_rules(coords);
                }
            }

            log::trace!(
                "deduction pass {}: {} cells revealed",
                passes,
                self.revealed_count
            );
            if !progress {
                break;
            }
        }

        passes
    }

    /// Applies both rules around one revealed clue:
    /// - every mine already flagged: the rest is safe;
    /// - flags plus unknowns equal the clue: the unknowns are mines.
    fn apply_rules(&mut self, coords: Coord2) -> bool {
        let clue = self.grid[coords].adjacent_mines;

        let mut flagged = 0u8;
        let mut unknown: SmallVec<[Coord2; 8]> = SmallVec::new();
        for neighbor in self.grid.neighbors(coords) {
            if self.is_flagged(neighbor) {
                flagged += 1;
            } else if !self.is_revealed(neighbor) {
                unknown.push(neighbor);
            }
        }

        if unknown.is_empty() {
            return false;
        }

        if flagged == clue {
            for neighbor in unknown {
                if self.try_open(neighbor) {
                    flood_fill(self, neighbor);
                }
            }
            true
        } else if usize::from(flagged) + unknown.len() == usize::from(clue) {
            for neighbor in unknown {
                self.flagged[neighbor.to_nd_index()] = true;
            }
            true
        } else {
            false
        }
    }
}

impl FloodTarget for Simulation<'_> {
    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.grid.neighbors(coords)
    }

    fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.grid[coords].adjacent_mines
    }

    fn try_open(&mut self, coords: Coord2) -> bool {
        let index = coords.to_nd_index();
        if self.revealed[index] || self.flagged[index] || self.grid[coords].mine {
            return false;
        }
        self.revealed[index] = true;
        self.revealed_count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_on_mine_changes_nothing() {
        let grid = Grid::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let mut sim = Simulation::new(&grid);

        assert!(!sim.open((1, 1)));
        assert_eq!(sim.revealed_count(), 0);
    }

    #[test]
    fn open_floods_and_leaves_grid_untouched() {
        let grid = Grid::from_mine_coords((4, 4), &[(3, 3)]).unwrap();
        let mut sim = Simulation::new(&grid);

        assert!(sim.open((0, 0)));

        assert_eq!(sim.revealed_count(), 15);
        assert!(!sim.is_revealed((3, 3)));
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn flag_rule_feeds_reveal_rule() {
        // mines stacked on the left edge; (1, 0) pins both, then (1, 1) frees (0, 2)
        let grid = Grid::from_mine_coords((4, 3), &[(0, 0), (0, 1)]).unwrap();
        let mut sim = Simulation::new(&grid);

        sim.open((3, 0));
        assert_eq!(sim.revealed_count(), 9);

        let passes = sim.deduce(10);

        assert!(sim.is_flagged((0, 0)));
        assert!(sim.is_flagged((0, 1)));
        assert!(sim.is_revealed((0, 2)));
        assert_eq!(sim.revealed_count(), 10);
        assert_eq!(passes, 2);
    }

    #[test]
    fn fifty_fifty_makes_no_progress() {
        // the two left cells share every clue
        let grid = Grid::from_mine_coords((5, 2), &[(0, 0)]).unwrap();
        let mut sim = Simulation::new(&grid);

        sim.open((4, 0));
        let before = sim.revealed_count();
        let passes = sim.deduce(20);

        assert_eq!(passes, 1);
        assert_eq!(sim.revealed_count(), before);
        assert!(!sim.is_revealed((0, 1)));
        assert!(!sim.is_flagged((0, 0)));
    }

    #[test]
    fn pass_cap_bounds_the_loop() {
        let grid = Grid::from_mine_coords((4, 3), &[(0, 0), (0, 1)]).unwrap();
        let mut sim = Simulation::new(&grid);
        sim.open((3, 0));

        assert_eq!(sim.deduce(1), 1);
        assert_eq!(sim.deduce(0), 0);
    }
}
