//! Randomness used by the engine.
//!
//! The engine only ever needs "pick one of `n`", so it depends on [`Dice`] rather
//! than on a concrete generator. Production code wraps a `rand` generator in
//! [`RngDice`]; tests can script the exact rolls.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait Dice {
    /// Uniform value in `[0, sides)`. `sides` is always at least 1.
    fn roll(&mut self, sides: usize) -> usize;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self, sides: usize) -> usize {
        (**self).roll(sides)
    }
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R>(R);

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self, sides: usize) -> usize {
        self.0.random_range(0..sides)
    }
}

/// Thread-local generator, unseeded.
pub type ThreadDice = RngDice<ThreadRng>;

/// Reproducible generator.
pub type SeededDice = RngDice<StdRng>;

impl ThreadDice {
    pub fn thread_local() -> Self {
        Self(rand::rng())
    }
}

impl SeededDice {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Replays a fixed list of rolls, then panics. Lets tests pick the exact cell and
/// direction a tick will use.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedDice {
    rolls: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedDice {
    pub fn new(rolls: &[usize]) -> Self {
        Self { rolls: rolls.iter().copied().collect() }
    }

    /// Script the rolls of one tick: the cell to select, then any rule rolls.
    pub fn select(row: usize, col: usize, rule_rolls: &[usize]) -> Self {
        let mut dice = Self::new(&[row, col]);
        dice.rolls.extend(rule_rolls.iter().copied());
        dice
    }

    pub fn push(&mut self, rolls: &[usize]) {
        self.rolls.extend(rolls.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

#[cfg(test)]
impl Dice for ScriptedDice {
    fn roll(&mut self, sides: usize) -> usize {
        let value = self.rolls.pop_front().expect("scripted dice ran out of rolls");
        assert!(value < sides, "scripted roll {} out of range for {} sides", value, sides);
        value
    }
}
