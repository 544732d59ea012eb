//! Simulation engine: owns the grid and drives it one random cell at a time.

use log::{trace, warn};

use crate::sim::dice::{Dice, SeededDice, ThreadDice};
use crate::sim::error::SimResult;
use crate::sim::grid::Grid;
use crate::sim::rules::apply_rule;
use crate::sim::types::{Material, Position, TickOutcome};

/// Falling-sand automaton.
///
/// Each [`tick`](Engine::tick) picks one cell uniformly at random and applies the
/// rule of the material found there. [`paint`](Engine::paint) is the only way to
/// change the grid from outside.
#[derive(Debug)]
pub struct Engine<D = ThreadDice> {
    grid: Grid,
    dice: D,
    generation: u64,
}

impl Engine<ThreadDice> {
    /// Create an engine backed by the thread-local generator.
    pub fn new(rows: i32, cols: i32) -> SimResult<Self> {
        Engine::with_dice(rows, cols, ThreadDice::thread_local())
    }
}

impl Engine<SeededDice> {
    /// Create an engine whose random choices are fixed by `seed`.
    pub fn seeded(rows: i32, cols: i32, seed: u64) -> SimResult<Self> {
        Engine::with_dice(rows, cols, SeededDice::seeded(seed))
    }
}

impl<D: Dice> Engine<D> {
    pub fn with_dice(rows: i32, cols: i32, dice: D) -> SimResult<Self> {
        Ok(Engine {
            grid: Grid::new(rows, cols)?,
            dice,
            generation: 0,
        })
    }

    /// Advance the automaton by one step.
    pub fn tick(&mut self) -> TickOutcome {
        let (rows, cols) = self.grid.dimensions();
        let row = self.dice.roll(rows as usize) as i32;
        let col = self.dice.roll(cols as usize) as i32;
        let pos = Position::new(row, col);

        let outcome = apply_rule(&mut self.grid, &mut self.dice, pos).unwrap_or_else(|err| {
            // Selected positions are always in bounds; reaching this is a bug in a rule.
            warn!("[Engine] Rule at {} failed: {}", pos, err);
            TickOutcome::Idle
        });
        self.generation += 1;

        if !outcome.is_idle() {
            trace!("[Engine] generation={} {:?}", self.generation, outcome);
        }
        outcome
    }

    /// Run `ticks` steps and return how many of them changed the grid.
    pub fn advance(&mut self, ticks: u32) -> usize {
        (0..ticks).filter(|_| !self.tick().is_idle()).count()
    }

    /// Overwrite a cell, whatever it currently holds.
    pub fn paint(&mut self, row: i32, col: i32, material: Material) -> SimResult<()> {
        self.grid.set(row, col, material)
    }

    /// Paint using a UI tool name. Unknown tools are ignored and return `Ok(false)`.
    pub fn apply_tool(&mut self, row: i32, col: i32, tool: &str) -> SimResult<bool> {
        match Material::from_tool_name(tool) {
            Some(material) => {
                self.paint(row, col, material)?;
                Ok(true)
            }
            None => {
                // Still reject bad coordinates so callers see the same error either way.
                self.grid.get(row, col)?;
                Ok(false)
            }
        }
    }

    pub fn material_at(&self, row: i32, col: i32) -> SimResult<Material> {
        self.grid.get(row, col)
    }

    pub fn dimensions(&self) -> (i32, i32) {
        self.grid.dimensions()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of ticks run so far, idle ones included.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reset every cell to `Empty`. The generation counter keeps running.
    pub fn clear(&mut self) {
        self.grid.fill(Material::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::ScriptedDice;
    use crate::sim::error::SimError;

    #[test]
    fn test_new_engine() {
        let engine = Engine::new(4, 6).unwrap();
        assert_eq!(engine.dimensions(), (4, 6));
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.grid().count(Material::Empty), 24);
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert_eq!(
            Engine::new(0, 3).unwrap_err(),
            SimError::InvalidDimension { rows: 0, cols: 3 }
        );
        assert!(Engine::seeded(3, -1, 1).is_err());
    }

    #[test]
    fn test_tick_selects_row_then_col() {
        let mut engine = Engine::with_dice(3, 2, ScriptedDice::select(1, 1, &[])).unwrap();
        engine.paint(1, 1, Material::Sand).unwrap();

        let outcome = engine.tick();
        assert_eq!(
            outcome,
            TickOutcome::Moved {
                material: Material::Sand,
                from: Position::new(1, 1),
                to: Position::new(2, 1),
            }
        );
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_idle_tick_still_counts() {
        let mut engine = Engine::with_dice(2, 2, ScriptedDice::select(0, 0, &[])).unwrap();
        assert!(engine.tick().is_idle());
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_advance_counts_changes() {
        // Two ticks on the same falling grain, then one on an empty cell.
        let mut dice = ScriptedDice::select(0, 0, &[]);
        dice.push(&[1, 0]);
        dice.push(&[0, 0]);
        let mut engine = Engine::with_dice(3, 1, dice).unwrap();
        engine.paint(0, 0, Material::Sand).unwrap();

        assert_eq!(engine.advance(3), 2);
        assert_eq!(engine.material_at(2, 0), Ok(Material::Sand));
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn test_paint_overwrites_and_checks_bounds() {
        let mut engine = Engine::seeded(2, 2, 3).unwrap();
        engine.paint(0, 1, Material::Metal).unwrap();
        engine.paint(0, 1, Material::Acid).unwrap();
        assert_eq!(engine.material_at(0, 1), Ok(Material::Acid));

        assert_eq!(
            engine.paint(2, 0, Material::Sand),
            Err(SimError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(engine.grid().count(Material::Sand), 0);
    }

    #[test]
    fn test_apply_tool() {
        let mut engine = Engine::seeded(2, 2, 9).unwrap();
        assert_eq!(engine.apply_tool(1, 0, "Water"), Ok(true));
        assert_eq!(engine.material_at(1, 0), Ok(Material::Water));

        assert_eq!(engine.apply_tool(1, 0, "Plasma"), Ok(false));
        assert_eq!(engine.material_at(1, 0), Ok(Material::Water));

        assert_eq!(
            engine.apply_tool(-1, 0, "Plasma"),
            Err(SimError::OutOfBounds { row: -1, col: 0 })
        );
    }

    #[test]
    fn test_clear() {
        let mut engine = Engine::seeded(3, 3, 5).unwrap();
        engine.paint(0, 0, Material::Metal).unwrap();
        engine.paint(2, 2, Material::Water).unwrap();
        engine.advance(10);

        engine.clear();
        assert_eq!(engine.grid().count(Material::Empty), 9);
        assert_eq!(engine.generation(), 10);
    }
}
