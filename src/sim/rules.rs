//! Per-material transition rules.
//!
//! Each rule looks at the selected cell and its immediate neighbours and performs
//! at most one swap (or one destroy-and-swap for acid). Rows grow downward.

use log::trace;

use crate::sim::dice::Dice;
use crate::sim::error::SimResult;
use crate::sim::grid::Grid;
use crate::sim::types::{Direction, Material, Position, TickOutcome};

/// Order in which water and oil directions are rolled.
const FLOW_DIRECTIONS: [Direction; 3] = [Direction::Down, Direction::Left, Direction::Right];

/// Order in which acid on the bottom row picks a side.
const ACID_SIDES: [Direction; 2] = [Direction::Right, Direction::Left];

/// Apply the rule of whatever material sits at `pos`.
pub fn apply_rule(grid: &mut Grid, dice: &mut impl Dice, pos: Position) -> SimResult<TickOutcome> {
    let material = grid.get(pos.row, pos.col)?;
    match material {
        Material::Sand => update_sand(grid, pos),
        Material::Water => update_water(grid, dice, pos),
        Material::Acid => update_acid(grid, dice, pos),
        Material::Oil => update_oil(grid, dice, pos),
        // Static materials: barriers that never act on their own.
        Material::Empty | Material::Metal | Material::Magma => Ok(TickOutcome::Idle),
    }
}

/// Sand sinks through empty space and water.
fn sand_can_enter(target: Material) -> bool {
    matches!(target, Material::Empty | Material::Water)
}

/// Water (and the oil check) may trade places with empty space or sand.
fn liquid_can_enter(target: Material) -> bool {
    matches!(target, Material::Empty | Material::Sand)
}

fn update_sand(grid: &mut Grid, pos: Position) -> SimResult<TickOutcome> {
    let below = pos.step(Direction::Down);
    match grid.peek(below) {
        Some(target) if sand_can_enter(target) => displace(grid, Material::Sand, pos, below),
        Some(_) => {
            // Resting on something solid: slide right if there is room.
            let right = pos.step(Direction::Right);
            match grid.peek(right) {
                Some(target) if sand_can_enter(target) => {
                    displace(grid, Material::Sand, pos, right)
                }
                _ => Ok(TickOutcome::Idle),
            }
        }
        None => Ok(TickOutcome::Idle),
    }
}

fn update_water(grid: &mut Grid, dice: &mut impl Dice, pos: Position) -> SimResult<TickOutcome> {
    let direction = FLOW_DIRECTIONS[dice.roll(FLOW_DIRECTIONS.len())];
    let target = pos.step(direction);
    match grid.peek(target) {
        Some(material) if liquid_can_enter(material) => {
            displace(grid, Material::Water, pos, target)
        }
        _ => Ok(TickOutcome::Idle),
    }
}

fn update_acid(grid: &mut Grid, dice: &mut impl Dice, pos: Position) -> SimResult<TickOutcome> {
    let below = pos.step(Direction::Down);
    if grid.peek(below).is_some() {
        return dissolve(grid, pos, below);
    }

    let side = pos.step(ACID_SIDES[dice.roll(ACID_SIDES.len())]);
    if grid.peek(side).is_some() {
        return dissolve(grid, pos, side);
    }
    Ok(TickOutcome::Idle)
}

/// Oil rolls a direction and checks it like water, but never moves.
fn update_oil(grid: &Grid, dice: &mut impl Dice, pos: Position) -> SimResult<TickOutcome> {
    let direction = FLOW_DIRECTIONS[dice.roll(FLOW_DIRECTIONS.len())];
    let target = pos.step(direction);
    if grid.peek(target).is_some_and(liquid_can_enter) {
        trace!("[Rules] Oil at {} could flow {:?}, staying put", pos, direction);
    }
    Ok(TickOutcome::Idle)
}

fn displace(grid: &mut Grid, material: Material, from: Position, to: Position) -> SimResult<TickOutcome> {
    grid.swap(from.row, from.col, to.row, to.col)?;
    Ok(TickOutcome::Moved { material, from, to })
}

/// Destroy whatever is at `to`, then move the acid there.
fn dissolve(grid: &mut Grid, from: Position, to: Position) -> SimResult<TickOutcome> {
    let consumed = grid.get(to.row, to.col)?;
    grid.set(to.row, to.col, Material::Empty)?;
    grid.swap(from.row, from.col, to.row, to.col)?;
    Ok(TickOutcome::Dissolved { from, to, consumed })
}
