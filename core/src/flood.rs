use alloc::vec::Vec;

use crate::*;

/// Board state a flood fill can open cells on.
///
/// Implemented by the live reveal pass of a session and by the solver simulation, so both
/// cascade through zero cells with the same rules.
pub(crate) trait FloodTarget {
    fn neighbors(&self, coords: Coord2) -> NeighborIter;

    fn adjacent_mines(&self, coords: Coord2) -> u8;

    /// Opens `coords` if it is unrevealed, unflagged and safe. Returns whether it was opened.
    fn try_open(&mut self, coords: Coord2) -> bool;
}

/// Opens every cell reachable from `start` through zero-valued cells.
///
/// `start` itself must already be open. Uses an explicit stack; termination relies on `try_open`
/// refusing already revealed cells.
pub(crate) fn flood_fill<T: FloodTarget + ?Sized>(target: &mut T, start: Coord2) {
    let mut frontier = Vec::from([start]);

    while let Some(coords) = frontier.pop() {
        if target.adjacent_mines(coords) != 0 {
            continue;
        }

        for neighbor in target.neighbors(coords) {
            if target.try_open(neighbor) && target.adjacent_mines(neighbor) == 0 {
                frontier.push(neighbor);
            }
        }
    }
}
