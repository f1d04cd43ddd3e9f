use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Simulation;
use crate::*;

/// Smallest number of cells a layout must let the simulation reveal, unless the board has fewer
/// safe cells than that.
pub const MIN_REQUIRED_REVEALED: CellCount = 10;

/// Deduction passes allowed per board cell.
pub const DEDUCTION_PASSES_PER_CELL: u32 = 2;

/// Result of checking one layout for guess-free play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accepted: bool,
    /// Probe whose opening seeded the deduction, `None` when the first click is a mine.
    pub opening: Option<Coord2>,
    pub revealed: CellCount,
    pub required: CellCount,
    pub passes: u32,
}

/// Safe cells the simulation has to reveal for a layout to count as guess-free.
///
/// Half the safe cells on small boards, 40% on medium, 30% on large, never less than
/// [`MIN_REQUIRED_REVEALED`] and never more than the board has. This is a relaxed stand-in for full
/// solvability, which is NP-hard to decide in general: mostly deducible layouts pass too.
pub fn required_revealed(safe_cells: CellCount) -> CellCount {
    let safe = u32::from(safe_cells);
    let scaled = if safe < 50 {
        safe / 2
    } else if safe < 200 {
        safe * 2 / 5
    } else {
        safe * 3 / 10
    };

    // scaled <= safe, so it fits back into CellCount
    (scaled as CellCount)
        .max(MIN_REQUIRED_REVEALED)
        .min(safe_cells)
}

/// Candidate openings, strongest information first: the real first click, the centre, the
/// four interior third-points and the four corners. Duplicates are dropped.
pub fn opening_probes(size: Coord2, first_click: Coord2) -> SmallVec<[Coord2; 10]> {
    let (width, height) = (u16::from(size.0), u16::from(size.1));
    let at = |x: u16, y: u16| -> Coord2 { (x as Coord, y as Coord) };

    let candidates = [
        first_click,
        at(width / 2, height / 2),
        at(width / 3, height / 3),
        at(2 * width / 3, height / 3),
        at(width / 3, 2 * height / 3),
        at(2 * width / 3, 2 * height / 3),
        at(0, 0),
        at(width.saturating_sub(1), 0),
        at(0, height.saturating_sub(1)),
        at(width.saturating_sub(1), height.saturating_sub(1)),
    ];

    let mut probes: SmallVec<[Coord2; 10]> = SmallVec::new();
    for probe in candidates {
        if !probes.contains(&probe) {
            probes.push(probe);
        }
    }
    probes
}

/// Decides whether `grid` can be played from `first_click` by single-clue deduction alone.
///
/// A mine under the first click is an immediate rejection. Otherwise every probe from
/// [`opening_probes`] that is not a mine is opened on its own simulation, the largest opening is
/// kept, and the deduction rules run on it for up to `2 * width * height` passes.
pub fn validate_layout(grid: &Grid, first_click: Coord2) -> Result<Verdict> {
    let first_click = grid.validate_coords(first_click)?;
    let required = required_revealed(grid.safe_cell_count());

    if grid[first_click].mine {
        log::trace!("layout rejected, first click {:?} is a mine", first_click);
        return Ok(Verdict {
            accepted: false,
            opening: None,
            revealed: 0,
            required,
            passes: 0,
        });
    }

    let mut best: Option<(Coord2, Simulation<'_>)> = None;
    for probe in opening_probes(grid.size(), first_click) {
        let mut sim = Simulation::new(grid);
        if !sim.open(probe) {
            continue;
        }
        let improves = best
            .as_ref()
            .is_none_or(|(_, best_sim)| sim.revealed_count() > best_sim.revealed_count());
        if improves {
            best = Some((probe, sim));
        }
    }

    // the first click is safe, so at least one probe opened
    let Some((opening, mut sim)) = best else {
        return Ok(Verdict {
            accepted: false,
            opening: None,
            revealed: 0,
            required,
            passes: 0,
        });
    };

    let max_passes = DEDUCTION_PASSES_PER_CELL * u32::from(grid.total_cells());
    let passes = sim.deduce(max_passes);
    let revealed = sim.revealed_count();
    let accepted = revealed >= required;

    log::trace!(
        "opening {:?}: revealed {} of {} safe cells, {} required, {} passes",
        opening,
        revealed,
        grid.safe_cell_count(),
        required,
        passes
    );

    Ok(Verdict {
        accepted,
        opening: Some(opening),
        revealed,
        required,
        passes,
    })
}
