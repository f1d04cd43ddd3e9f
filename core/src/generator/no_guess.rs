use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Layouts drawn before giving up on a guess-free board.
pub const MAX_ATTEMPTS: u32 = 100;

/// Chebyshev radius kept mine-free around the first click, a 5x5 block.
pub const NO_GUESS_EXCLUDE_RADIUS: Coord = 2;

/// Redraws random layouts until one passes [`validate_layout`].
///
/// When every attempt is rejected the last layout stays on the board and the report says
/// `verified: false`; running out of attempts is not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct NoGuessMinefieldGenerator {
    rng: SmallRng,
    max_attempts: u32,
}

impl NoGuessMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl MinefieldGenerator for NoGuessMinefieldGenerator {
    fn generate(
        &mut self,
        grid: &mut Grid,
        start: Coord2,
        mines: CellCount,
    ) -> Result<GenerationReport> {
        for attempt in 1..=self.max_attempts {
            place_mines(grid, start, mines, NO_GUESS_EXCLUDE_RADIUS, &mut self.rng)?;

            let verdict = validate_layout(grid, start)?;
            if verdict.accepted {
                log::debug!(
                    "No-guess layout found on attempt {} ({} of {} cells deducible)",
                    attempt,
                    verdict.revealed,
                    grid.safe_cell_count()
                );
                return Ok(GenerationReport {
                    attempts: attempt,
                    verified: true,
                });
            }

            if attempt % 10 == 0 {
                log::debug!("No-guess attempt {} of {} rejected", attempt, self.max_attempts);
            }
        }

        log::warn!(
            "Could not generate a no-guess layout after {} attempts, keeping the last random layout",
            self.max_attempts
        );
        Ok(GenerationReport {
            attempts: self.max_attempts,
            verified: false,
        })
    }
}
