use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::flood::{FloodTarget, flood_fill};
use crate::*;

/// Valid transitions: `Playing -> Won` and `Playing -> Lost`. Both ends are terminal, only a new
/// session starts over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Per-game switches chosen by the player before starting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub no_guess: bool,
    pub flag_cycle: FlagCycle,
}

/// Emitted once when a session finishes, for whoever keeps the score history.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnd {
    pub difficulty: Option<Difficulty>,
    pub elapsed_secs: u32,
    pub won: bool,
}

/// Result of one player action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move<O> {
    pub outcome: O,
    /// Cells whose state changed, in the order they changed.
    pub touched: Vec<Coord2>,
    /// Session state after the action.
    pub state: GameState,
}

/// One game from first click to win or loss.
///
/// Mines are placed lazily: the board stays empty until the first reveal, which becomes the
/// protected start cell. The session never reads the wall clock; the caller drives it with
/// [`GameSession::tick`] or [`GameSession::sync_clock`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    grid: Grid,
    config: BoardConfig,
    options: GameOptions,
    difficulty: Option<Difficulty>,
    seed: u64,
    state: GameState,
    first_move_done: bool,
    revealed_count: CellCount,
    mines_remaining: i32,
    elapsed_secs: u32,
    triggered_mine: Option<Coord2>,
    generation: Option<GenerationReport>,
    pending_end: Option<GameEnd>,
}

impl GameSession {
    /// `seed` drives mine placement; the same seed and first click give the same board.
    pub fn new(config: BoardConfig, options: GameOptions, seed: u64) -> Self {
        Self {
            grid: Grid::new(config.size()),
            config,
            options,
            difficulty: None,
            seed,
            state: GameState::Playing,
            first_move_done: false,
            revealed_count: 0,
            mines_remaining: i32::from(config.mines),
            elapsed_secs: 0,
            triggered_mine: None,
            generation: None,
            pending_end: None,
        }
    }

    pub fn with_difficulty(
        difficulty: Difficulty,
        orientation: Orientation,
        options: GameOptions,
        seed: u64,
    ) -> Self {
        let config = difficulty.config().oriented(orientation);
        Self {
            difficulty: Some(difficulty),
            ..Self::new(config, options, seed)
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn first_move_done(&self) -> bool {
        self.first_move_done
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    /// Read-only access to the board, mines included.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How the board was generated, present once mines are placed in no-guess mode.
    pub fn no_guess_report(&self) -> Option<GenerationReport> {
        self.generation.filter(|_| self.options.no_guess)
    }

    /// Switches between two- and three-state flagging; existing marks are kept.
    pub fn set_flag_cycle(&mut self, flag_cycle: FlagCycle) {
        self.options.flag_cycle = flag_cycle;
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Whether the clock should be running: after the first reveal and until the game ends.
    pub fn is_clock_running(&self) -> bool {
        self.first_move_done && !self.state.is_finished()
    }

    /// Advances the clock by one second while it is running.
    pub fn tick(&mut self) {
        if self.is_clock_running() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    /// Adopts an externally measured elapsed time while running; never moves backwards.
    pub fn sync_clock(&mut self, elapsed_secs: u32) {
        if self.is_clock_running() {
            self.elapsed_secs = self.elapsed_secs.max(elapsed_secs);
        }
    }

    /// Hands out the end-of-game notification, once.
    pub fn take_game_end(&mut self) -> Option<GameEnd> {
        self.pending_end.take()
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = *self.grid.get(coords)?;
        let lost = matches!(self.state, GameState::Lost);
        let mine_hit = lost && cell.mine && !cell.is_flagged();

        Ok(CellView {
            revealed: cell.revealed || mine_hit,
            flagged: cell.is_flagged(),
            questioned: cell.is_questioned(),
            mine_hit,
            triggered: self.triggered_mine == Some(coords),
            adjacent_count: if cell.revealed {
                cell.adjacent_mines
            } else {
                0
            },
        })
    }

    pub fn reveal_tile(&mut self, coords: Coord2) -> Result<Move<RevealOutcome>> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        if !self.grid[coords].is_openable() {
            return Ok(self.finish_move(RevealOutcome::NoChange, Vec::new()));
        }

        if !self.first_move_done {
            self.populate(coords)?;
        }

        let mut touched = Vec::new();
        let outcome = self.open_cell(coords, &mut touched);
        Ok(self.finish_move(outcome, touched))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Move<MarkOutcome>> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        let cell = self.grid[coords];
        if cell.revealed {
            return Ok(self.finish_move(MarkOutcome::NoChange, Vec::new()));
        }

        let next = self.options.flag_cycle.next(cell.mark);
        if next == cell.mark {
            return Ok(self.finish_move(MarkOutcome::NoChange, Vec::new()));
        }
        self.set_mark(coords, next);

        Ok(self.finish_move(MarkOutcome::Changed, Vec::from([coords])))
    }

    pub fn chord_click(&mut self, coords: Coord2) -> Result<Move<ChordOutcome>> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        let cell = self.grid[coords];
        if !cell.revealed || cell.adjacent_mines == 0 {
            return Ok(self.finish_move(ChordOutcome::NoChange, Vec::new()));
        }

        let mut flagged = 0u8;
        let mut unknown: SmallVec<[Coord2; 8]> = SmallVec::new();
        for neighbor in self.grid.neighbors(coords) {
            let neighbor_cell = self.grid[neighbor];
            if neighbor_cell.is_flagged() {
                flagged += 1;
            } else if !neighbor_cell.revealed {
                unknown.push(neighbor);
            }
        }

        if unknown.is_empty() {
            return Ok(self.finish_move(ChordOutcome::NoChange, Vec::new()));
        }

        let clue = cell.adjacent_mines;
        let mut touched = Vec::new();

        let outcome = if flagged == clue {
            let mut outcome = RevealOutcome::NoChange;
            for neighbor in unknown {
                outcome = outcome | self.open_cell(neighbor, &mut touched);
                if self.state.is_finished() {
                    break;
                }
            }
            ChordOutcome::Revealed(outcome)
        } else if usize::from(flagged) + unknown.len() == usize::from(clue) {
            for neighbor in unknown {
                self.set_mark(neighbor, Mark::Flagged);
                touched.push(neighbor);
            }
            ChordOutcome::Flagged
        } else {
            ChordOutcome::NoChange
        };

        Ok(self.finish_move(outcome, touched))
    }

    /// Ends the game as won once every safe cell is open. Flags play no part.
    pub fn check_win(&mut self) -> bool {
        if self.state == GameState::Playing
            && self.first_move_done
            && self.revealed_count == self.grid.safe_cell_count()
        {
            self.game_over(true);
        }
        self.state == GameState::Won
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::InvalidStateTransition)
        } else {
            Ok(())
        }
    }

    fn populate(&mut self, start: Coord2) -> Result<()> {
        let report = if self.options.no_guess {
            NoGuessMinefieldGenerator::new(self.seed).generate(
                &mut self.grid,
                start,
                self.config.mines,
            )?
        } else {
            RandomMinefieldGenerator::new(self.seed).generate(
                &mut self.grid,
                start,
                self.config.mines,
            )?
        };

        log::debug!(
            "Board {}x{} populated from {:?} after {} attempt(s), verified: {}",
            self.config.width,
            self.config.height,
            start,
            report.attempts,
            report.verified
        );

        self.generation = Some(report);
        self.first_move_done = true;
        Ok(())
    }

    /// Opens one cell the player targeted, cascading through zeros.
    fn open_cell(&mut self, coords: Coord2, touched: &mut Vec<Coord2>) -> RevealOutcome {
        let cell = self.grid[coords];
        if !cell.is_openable() {
            return RevealOutcome::NoChange;
        }

        if cell.mine {
            self.triggered_mine = Some(coords);
            touched.push(coords);
            self.game_over(false);
            return RevealOutcome::HitMine;
        }

        let mut pass = RevealPass {
            session: self,
            touched,
        };
        pass.try_open(coords);
        flood_fill(&mut pass, coords);

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn set_mark(&mut self, coords: Coord2, mark: Mark) {
        let cell = &mut self.grid[coords];
        let was_flagged = cell.is_flagged();
        cell.mark = mark;
        let is_flagged = cell.is_flagged();

        match (was_flagged, is_flagged) {
            (false, true) => self.mines_remaining -= 1,
            (true, false) => self.mines_remaining += 1,
            _ => {}
        }
    }

    fn game_over(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game over after {}s: {}",
            self.elapsed_secs,
            if won { "won" } else { "lost" }
        );

        self.pending_end = Some(GameEnd {
            difficulty: self.difficulty,
            elapsed_secs: self.elapsed_secs,
            won,
        });
    }

    fn finish_move<O>(&self, outcome: O, touched: Vec<Coord2>) -> Move<O> {
        Move {
            outcome,
            touched,
            state: self.state,
        }
    }
}

/// Flood-fill view of a session that records every cell it opens.
struct RevealPass<'a> {
    session: &'a mut GameSession,
    touched: &'a mut Vec<Coord2>,
}

impl FloodTarget for RevealPass<'_> {
    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.session.grid.neighbors(coords)
    }

    fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.session.grid[coords].adjacent_mines
    }

    fn try_open(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.session.grid[coords];
        if !cell.is_openable() || cell.mine {
            return false;
        }
        cell.revealed = true;
        // question marks do not survive a reveal
        cell.mark = Mark::None;
        self.session.revealed_count += 1;
        self.touched.push(coords);
        true
    }
}
