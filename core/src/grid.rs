use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Authoritative cell store of one game, indexed by `(x, y)`.
///
/// The dimensions never change after construction. The checked accessors (`get`, `get_mut`, `set`)
/// report `OutOfBounds`; indexing with `grid[coords]` is reserved for coordinates that were already
/// validated and panics otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    size: Coord2,
    cells: Array2<Cell>,
}

/// Serialized form of [`Grid`], checked before it becomes one.
#[derive(Deserialize)]
struct GridData {
    size: Coord2,
    cells: Array2<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = GameError;

    fn try_from(data: GridData) -> Result<Self> {
        let (width, height) = data.size;
        if data.cells.dim() != (usize::from(width), usize::from(height)) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            size: data.size,
            cells: data.cells,
        })
    }
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            size,
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a board with mines at `mine_coords` and adjacency counts already filled in.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size);
        for &coords in mine_coords {
            grid.get_mut(coords)?.mine = true;
        }
        grid.recompute_adjacency();
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn get_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self[coords])
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        *self.get_mut(coords)? = cell;
        Ok(())
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn count_mine_neighbors(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self[pos].mine).count() as u8
    }

    /// Refreshes `adjacent_mines` on every cell after the mine set changed.
    pub fn recompute_adjacency(&mut self) {
        for coords in self.iter_coords() {
            let adjacent_mines = if self[coords].mine {
                0
            } else {
                self.count_mine_neighbors(coords)
            };
            self[coords].adjacent_mines = adjacent_mines;
        }
    }

    pub fn clear_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.mine = false;
            cell.adjacent_mines = 0;
        }
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords().filter(|&coords| self[coords].mine)
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.mine).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.revealed).count() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
