//! Abilities, skills and the d20 check.
//!
//! Every check in the game (crafting, river crossings, event
//! choices) goes through [`ability_check`]:
//!
//! * `modifier = floor((score - 10) / 2)`
//! * `total = d20 + modifier`
//! * success iff `total >= difficulty`
//!
//! ```
//! use safeplace_logic::dice::ScriptedDice;
//! use safeplace_logic::skills::ability_check;
//!
//! let mut dice = ScriptedDice::always_roll(12);
//! let check = ability_check(14, 15, &mut dice);
//! assert_eq!(check.modifier, 2);
//! assert_eq!(check.total, 14);
//! assert!(!check.success);
//! ```
//!
//! # Skills
//!
//! The eighteen named skills are each governed by one of the six
//! abilities; a skill check is an ability check on that ability's score.

use serde::{Deserialize, Serialize};

use crate::dice::RandomSource;

/// The six character abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Physical strength (STR).
    Potenza,
    /// Dexterity and speed (DEX).
    Agilita,
    /// Constitution and endurance (CON).
    Vigore,
    /// Wisdom and intuition (WIS).
    Percezione,
    /// Intelligence and problem solving (INT).
    Adattamento,
    /// Presence and leadership (CHA).
    Carisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Potenza,
        Ability::Agilita,
        Ability::Vigore,
        Ability::Percezione,
        Ability::Adattamento,
        Ability::Carisma,
    ];
}

/// Ability scores, nominally 3–18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub potenza: u8,
    pub agilita: u8,
    pub vigore: u8,
    pub percezione: u8,
    pub adattamento: u8,
    pub carisma: u8,
}

impl Default for AbilityScores {
    /// All tens: every modifier is zero.
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    pub fn uniform(score: u8) -> Self {
        Self {
            potenza: score,
            agilita: score,
            vigore: score,
            percezione: score,
            adattamento: score,
            carisma: score,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Potenza => self.potenza,
            Ability::Agilita => self.agilita,
            Ability::Vigore => self.vigore,
            Ability::Percezione => self.percezione,
            Ability::Adattamento => self.adattamento,
            Ability::Carisma => self.carisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: u8) {
        match ability {
            Ability::Potenza => self.potenza = score,
            Ability::Agilita => self.agilita = score,
            Ability::Vigore => self.vigore = score,
            Ability::Percezione => self.percezione = score,
            Ability::Adattamento => self.adattamento = score,
            Ability::Carisma => self.carisma = score,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }
}

/// Named skills used by recipes, events and enemy tactics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Atletica,
    Acrobazia,
    Furtivita,
    RapiditaDiMano,
    Arcanismo,
    Storia,
    Investigare,
    Natura,
    Religione,
    AddestrareAnimali,
    Intuizione,
    Medicina,
    Percezione,
    Sopravvivenza,
    Inganno,
    Intimidire,
    Persuasione,
    Spettacolo,
}

impl Skill {
    /// The ability whose score backs this skill.
    pub fn ability(self) -> Ability {
        match self {
            Skill::Atletica => Ability::Potenza,
            Skill::Acrobazia | Skill::Furtivita | Skill::RapiditaDiMano => Ability::Agilita,
            Skill::Arcanismo
            | Skill::Storia
            | Skill::Investigare
            | Skill::Natura
            | Skill::Religione => Ability::Adattamento,
            Skill::AddestrareAnimali
            | Skill::Intuizione
            | Skill::Medicina
            | Skill::Percezione
            | Skill::Sopravvivenza => Ability::Percezione,
            Skill::Inganno | Skill::Intimidire | Skill::Persuasione | Skill::Spettacolo => {
                Ability::Carisma
            }
        }
    }
}

/// Standard difficulty classes.
pub mod difficulty {
    pub const FACILE: i32 = 10;
    pub const MEDIO: i32 = 15;
    pub const DIFFICILE: i32 = 20;
}

/// `floor((score - 10) / 2)`, rounding toward negative infinity.
pub fn ability_modifier(score: u8) -> i32 {
    (i32::from(score) - 10).div_euclid(2)
}

/// Outcome of one d20 check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub success: bool,
    /// Natural d20 roll, 1–20.
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
    pub difficulty: i32,
}

/// Resolve a check against an already-rolled d20.
pub fn resolve_check(score: u8, difficulty: i32, roll: u32) -> CheckResult {
    let modifier = ability_modifier(score);
    let total = roll as i32 + modifier;
    CheckResult {
        success: total >= difficulty,
        roll,
        modifier,
        total,
        difficulty,
    }
}

/// Roll a d20 and resolve a check for an ability score.
pub fn ability_check<D: RandomSource + ?Sized>(
    score: u8,
    difficulty: i32,
    dice: &mut D,
) -> CheckResult {
    let roll = dice.roll_d20();
    let result = resolve_check(score, difficulty, roll);
    log::debug!(
        "check: d20={} {:+} = {} vs DC {} -> {}",
        roll,
        result.modifier,
        result.total,
        difficulty,
        if result.success { "success" } else { "failure" }
    );
    result
}

/// Skill check using the governing ability from `scores`.
pub fn skill_check<D: RandomSource + ?Sized>(
    scores: &AbilityScores,
    skill: Skill,
    difficulty: i32,
    dice: &mut D,
) -> CheckResult {
    ability_check(scores.get(skill.ability()), difficulty, dice)
}
