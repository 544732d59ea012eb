//! Grid model: a fixed-size, row-major buffer of materials.

use crate::sim::error::{SimError, SimResult};
use crate::sim::types::{Material, Position};

/// Rectangular grid of materials. Dimensions never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Material>,
}

impl Grid {
    /// Create a grid with every cell `Empty`.
    pub fn new(rows: i32, cols: i32) -> SimResult<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(SimError::InvalidDimension { rows, cols });
        }
        let size = rows as usize * cols as usize;
        Ok(Grid {
            rows,
            cols,
            cells: vec![Material::Empty; size],
        })
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    #[inline]
    fn index_of(&self, row: i32, col: i32) -> SimResult<usize> {
        if !self.in_bounds(row, col) {
            return Err(SimError::OutOfBounds { row, col });
        }
        Ok(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, row: i32, col: i32) -> SimResult<Material> {
        let idx = self.index_of(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, row: i32, col: i32, material: Material) -> SimResult<()> {
        let idx = self.index_of(row, col)?;
        self.cells[idx] = material;
        Ok(())
    }

    /// Exchange the contents of two cells. Both endpoints are checked before
    /// anything is written.
    pub fn swap(&mut self, row_a: i32, col_a: i32, row_b: i32, col_b: i32) -> SimResult<()> {
        let a = self.index_of(row_a, col_a)?;
        let b = self.index_of(row_b, col_b)?;
        self.cells.swap(a, b);
        Ok(())
    }

    /// Material at `pos`, or `None` when the position lies outside the grid.
    pub fn peek(&self, pos: Position) -> Option<Material> {
        self.get(pos.row, pos.col).ok()
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Material]> {
        self.cells.chunks(self.cols as usize)
    }

    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    pub fn fill(&mut self, material: Material) {
        self.cells.fill(material);
    }
}
