//! Game-balance constants: survival deltas, status bands, penalty rates.
//!
//! These are fixed numbers with no configuration surface. Both the rules
//! crate and the headless simtest read them from here.

/// Minutes in one in-game day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Upper bound for hunger, thirst and fatigue.
pub const SURVIVAL_MAX: u32 = 100;

pub mod rest {
    pub const FATIGUE_REDUCTION: u32 = 15;
    pub const SHELTER_FATIGUE_BONUS: u32 = 5;
    pub const FIRE_FATIGUE_BONUS: u32 = 5;
    pub const HUNGER_LOSS: u32 = 5;
    pub const THIRST_LOSS: u32 = 8;
}

pub mod night {
    pub const HUNGER_LOSS: u32 = 15;
    pub const THIRST_LOSS: u32 = 10;
    pub const FATIGUE_REDUCTION: u32 = 30;
    // Shelter
    pub const SHELTER_HUNGER_SAVING: u32 = 3;
    pub const SHELTER_THIRST_SAVING: u32 = 2;
    pub const SHELTER_FATIGUE_BONUS: u32 = 10;
    // Fire
    pub const FIRE_HUNGER_SAVING: u32 = 2;
    pub const FIRE_FATIGUE_BONUS: u32 = 5;
    // Water source
    pub const WATER_SOURCE_THIRST_SAVING: u32 = 5;
}

/// Lower bounds of the status bands, most-recovered first.
///
/// Hunger and thirst use strict `>` comparisons against these; fatigue
/// runs the other way and uses strict `<`.
pub mod bands {
    pub const WELL_ABOVE: u32 = 75;
    pub const FAIR_ABOVE: u32 = 50;
    pub const LOW_ABOVE: u32 = 25;
    pub const CRITICAL_ABOVE: u32 = 10;

    pub const RESTED_BELOW: u32 = 25;
    pub const SLIGHTLY_TIRED_BELOW: u32 = 50;
    pub const TIRED_BELOW: u32 = 75;
    pub const VERY_TIRED_BELOW: u32 = 90;
}

pub mod penalties {
    /// Hunger at or below this value starts costing HP.
    pub const HUNGER_THRESHOLD: u32 = 10;
    /// Thirst at or below this value starts costing HP.
    pub const THIRST_THRESHOLD: u32 = 10;
    /// Share of max HP lost to extreme hunger, in percent.
    pub const HUNGER_DAMAGE_PERCENT: u32 = 5;
    /// Share of max HP lost to extreme thirst, in percent.
    pub const THIRST_DAMAGE_PERCENT: u32 = 8;

    pub const HUNGER_REASON: &str = "fame estrema";
    pub const THIRST_REASON: &str = "sete estrema";
}

pub mod crafting {
    /// Share of each ingredient wasted on a failed skill check, in percent.
    /// Rounded up per ingredient line.
    pub const FAILURE_LOSS_PERCENT: u32 = 50;
}

pub mod healing {
    pub const MIN_SUCCESS_RATE: f64 = 0.10;
    pub const MAX_SUCCESS_RATE: f64 = 0.95;
    /// Base rate for items with no (or an unrecognised) rarity.
    pub const DEFAULT_BASE_RATE: f64 = 0.5;

    pub const STRONG_EFFECT: u32 = 25;
    pub const STRONG_EFFECT_BONUS: f64 = 0.1;
    pub const MODERATE_EFFECT: u32 = 15;
    pub const MODERATE_EFFECT_BONUS: f64 = 0.05;

    pub const WOUNDED_ADJUST: f64 = 0.1;
    pub const SICK_ADJUST: f64 = -0.1;
    pub const POISONED_ADJUST: f64 = -0.15;
}

/// Named sound identifiers understood by the audio layer.
pub mod sounds {
    pub const ERROR: &str = "error";
    pub const CRAFT_FAIL: &str = "craft_fail";
    pub const CRAFT_SUCCESS: &str = "craft_success";
}
