//! Random source for checks and probabilistic outcomes.
//!
//! Every resolver that rolls takes a `&mut impl RandomSource`. Any
//! `rand::Rng` works; [`ScriptedDice`] replays fixed values so a test or
//! harness sweep can force a particular branch.

use std::collections::VecDeque;

use rand::Rng;

/// Source of die rolls and unit-interval draws.
pub trait RandomSource {
    /// Uniform integer in `1..=sides`. `sides` must be at least 1.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Uniform float in `[0.0, 1.0)`.
    fn draw_unit(&mut self) -> f64;

    fn roll_d20(&mut self) -> u32 {
        self.roll_die(20)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.gen_range(1..=sides.max(1))
    }

    fn draw_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays scripted rolls and draws in order.
///
/// When a queue runs dry the last value handed out is repeated, so a
/// single scripted value pins every subsequent roll. With nothing scripted
/// at all, dice roll their maximum and draws return `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    draws: VecDeque<f64>,
    last_roll: Option<u32>,
    last_draw: Option<f64>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every die shows `value` (clamped to the die's faces).
    pub fn always_roll(value: u32) -> Self {
        Self::default().with_rolls([value])
    }

    /// Every unit draw returns `value`.
    pub fn always_draw(value: f64) -> Self {
        Self::default().with_draws([value])
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_draws(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.draws.extend(draws);
        self
    }
}

impl RandomSource for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let sides = sides.max(1);
        let value = match self.rolls.pop_front() {
            Some(v) => {
                self.last_roll = Some(v);
                v
            }
            None => self.last_roll.unwrap_or(sides),
        };
        value.clamp(1, sides)
    }

    fn draw_unit(&mut self) -> f64 {
        let value = match self.draws.pop_front() {
            Some(v) => {
                self.last_draw = Some(v);
                v
            }
            None => self.last_draw.unwrap_or(0.0),
        };
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
