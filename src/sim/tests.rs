//! Behavioural laws of the automaton, checked through the public engine API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dice::ScriptedDice;
use super::*;

/// Fill every cell with a random pick from `choices`.
fn scatter<D: Dice>(engine: &mut Engine<D>, choices: &[Material], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (rows, cols) = engine.dimensions();
    for row in 0..rows {
        for col in 0..cols {
            let material = choices[rng.random_range(0..choices.len())];
            engine.paint(row, col, material).unwrap();
        }
    }
}

fn positions_of(grid: &Grid, material: Material) -> Vec<Position> {
    let (rows, cols) = grid.dimensions();
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| Position::new(row, col)))
        .filter(|pos| grid.peek(*pos) == Some(material))
        .collect()
}

#[test]
fn test_create_yields_empty_grid() {
    for (rows, cols) in [(1, 1), (1, 7), (7, 1), (120, 80)] {
        let engine = Engine::new(rows, cols).unwrap();
        assert_eq!(engine.dimensions(), (rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                assert_eq!(engine.material_at(row, col), Ok(Material::Empty));
            }
        }
    }
}

#[test]
fn test_paint_then_read_back_everywhere() {
    let mut engine = Engine::seeded(4, 5, 11).unwrap();
    for material in Material::ALL {
        for row in 0..4 {
            for col in 0..5 {
                engine.paint(row, col, material).unwrap();
                assert_eq!(engine.material_at(row, col), Ok(material));
            }
        }
    }
}

#[test]
fn test_out_of_bounds_paint_leaves_grid_unchanged() {
    let mut engine = Engine::seeded(3, 3, 1).unwrap();
    scatter(&mut engine, &Material::ALL, 99);
    let before = engine.grid().clone();

    for (row, col) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MAX, i32::MIN)] {
        assert_eq!(
            engine.paint(row, col, Material::Sand),
            Err(SimError::OutOfBounds { row, col })
        );
        assert_eq!(
            engine.material_at(row, col),
            Err(SimError::OutOfBounds { row, col })
        );
    }
    assert_eq!(engine.grid(), &before);
}

#[test]
fn test_metal_and_magma_never_move() {
    let mut engine = Engine::seeded(20, 15, 2024).unwrap();
    let choices = [
        Material::Empty,
        Material::Empty,
        Material::Metal,
        Material::Sand,
        Material::Water,
        Material::Oil,
        Material::Magma,
    ];
    scatter(&mut engine, &choices, 7);
    let metal = positions_of(engine.grid(), Material::Metal);
    let magma = positions_of(engine.grid(), Material::Magma);
    assert!(!metal.is_empty() && !magma.is_empty());

    engine.advance(50_000);

    assert_eq!(positions_of(engine.grid(), Material::Metal), metal);
    assert_eq!(positions_of(engine.grid(), Material::Magma), magma);
}

#[test]
fn test_oil_never_moves() {
    let mut engine = Engine::seeded(12, 12, 5).unwrap();
    let choices = [Material::Empty, Material::Sand, Material::Water, Material::Oil];
    scatter(&mut engine, &choices, 13);
    let oil = positions_of(engine.grid(), Material::Oil);
    assert!(!oil.is_empty());

    engine.advance(30_000);

    assert_eq!(positions_of(engine.grid(), Material::Oil), oil);
}

#[test]
fn test_material_counts_conserved_without_acid() {
    let mut engine = Engine::seeded(10, 10, 77).unwrap();
    let choices = [
        Material::Empty,
        Material::Metal,
        Material::Sand,
        Material::Water,
        Material::Oil,
        Material::Magma,
    ];
    scatter(&mut engine, &choices, 21);
    let counts: Vec<usize> = Material::ALL.iter().map(|&m| engine.grid().count(m)).collect();

    engine.advance(20_000);

    let after: Vec<usize> = Material::ALL.iter().map(|&m| engine.grid().count(m)).collect();
    assert_eq!(counts, after);
}

#[test]
fn test_sand_falls_into_empty_cell_below() {
    let mut engine = Engine::with_dice(2, 1, ScriptedDice::select(0, 0, &[])).unwrap();
    engine.paint(0, 0, Material::Sand).unwrap();

    engine.tick();

    assert_eq!(engine.material_at(0, 0), Ok(Material::Empty));
    assert_eq!(engine.material_at(1, 0), Ok(Material::Sand));
}

#[test]
fn test_sand_never_rises() {
    // A sand grain under open sky with water alongside: whatever is rolled, the
    // grain's row can only grow.
    let mut engine = Engine::seeded(8, 4, 31).unwrap();
    engine.paint(3, 1, Material::Sand).unwrap();
    engine.paint(7, 0, Material::Water).unwrap();
    engine.paint(7, 3, Material::Water).unwrap();

    let mut row = 3;
    for _ in 0..5_000 {
        engine.tick();
        let grain = positions_of(engine.grid(), Material::Sand);
        assert_eq!(grain.len(), 1);
        assert!(grain[0].row >= row);
        row = grain[0].row;
    }
    assert_eq!(row, 7);
}

#[test]
fn test_single_sand_cell_grid_is_stable() {
    let mut engine = Engine::with_dice(1, 1, ScriptedDice::select(0, 0, &[])).unwrap();
    engine.paint(0, 0, Material::Sand).unwrap();

    assert!(engine.tick().is_idle());
    assert_eq!(engine.material_at(0, 0), Ok(Material::Sand));
}

#[test]
fn test_acid_eats_sand_below() {
    let mut engine = Engine::with_dice(2, 1, ScriptedDice::select(0, 0, &[])).unwrap();
    engine.paint(0, 0, Material::Acid).unwrap();
    engine.paint(1, 0, Material::Sand).unwrap();

    engine.tick();

    assert_eq!(engine.material_at(0, 0), Ok(Material::Empty));
    assert_eq!(engine.material_at(1, 0), Ok(Material::Acid));
}

#[test]
fn test_falling_acid_leaves_no_trace() {
    let mut dice = ScriptedDice::default();
    for row in 0..4 {
        dice.push(&[row, 0]);
    }
    let mut engine = Engine::with_dice(5, 1, dice).unwrap();
    engine.paint(0, 0, Material::Acid).unwrap();
    engine.paint(1, 0, Material::Sand).unwrap();
    engine.paint(2, 0, Material::Water).unwrap();
    engine.paint(3, 0, Material::Oil).unwrap();
    engine.paint(4, 0, Material::Magma).unwrap();

    for _ in 0..4 {
        assert!(matches!(engine.tick(), TickOutcome::Dissolved { .. }));
    }

    assert_eq!(engine.material_at(4, 0), Ok(Material::Acid));
    assert_eq!(engine.grid().count(Material::Empty), 4);
    assert_eq!(engine.grid().count(Material::Acid), 1);
}
