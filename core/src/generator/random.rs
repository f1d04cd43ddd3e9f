use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Scatters `mine_count` mines over every cell farther than `exclude_radius` (Chebyshev) from
/// `exclude`, then refreshes adjacency counts. Existing mines are cleared first.
///
/// Candidates are drawn uniformly without replacement: a uniform index into the remaining
/// candidates, removed with `swap_remove`.
pub fn place_mines<R: Rng>(
    grid: &mut Grid,
    exclude: Coord2,
    mine_count: CellCount,
    exclude_radius: Coord,
    rng: &mut R,
) -> Result<()> {
    let exclude = grid.validate_coords(exclude)?;

    let mut candidates: Vec<Coord2> = grid
        .iter_coords()
        .filter(|&coords| chebyshev_distance(coords, exclude) > exclude_radius)
        .collect();

    let available = candidates.len() as CellCount;
    if mine_count > available {
        log::warn!(
            "Cannot place {} mines, only {} cells outside the start area",
            mine_count,
            available
        );
        return Err(GameError::InsufficientSpace {
            requested: mine_count,
            available,
        });
    }

    grid.clear_mines();
    for _ in 0..mine_count {
        let pick = rng.random_range(0..candidates.len());
        let coords = candidates.swap_remove(pick);
        grid[coords].mine = true;
    }
    grid.recompute_adjacency();

    Ok(())
}

/// Purely random layout that only keeps the first clicked cell safe.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(
        &mut self,
        grid: &mut Grid,
        start: Coord2,
        mines: CellCount,
    ) -> Result<GenerationReport> {
        place_mines(grid, start, mines, 0, &mut self.rng)?;
        Ok(GenerationReport {
            attempts: 1,
            verified: false,
        })
    }
}
