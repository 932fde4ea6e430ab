//! Survival triad: hunger, thirst, fatigue.
//!
//! Hunger and thirst count *down* (100 = sated / hydrated, 0 = starving /
//! parched). Fatigue counts up: 0 = fully rested, 100 = exhausted.
//!
//! Two ticks change the triad:
//!
//! * [`calculate_rest`]: a short rest while awake.
//! * [`calculate_night_consumption`]: the forced overnight decay.
//!
//! Shelter, fire and a nearby water source soften the overnight losses
//! and improve fatigue recovery. Every result is clamped to `0..=100`.
//!
//! [`evaluate_penalties`] turns a depleted triad into HP damage.

use serde::{Deserialize, Serialize};

use crate::character::CharacterSheet;
use crate::constants::{bands, night, penalties, rest, SURVIVAL_MAX};
use crate::journal::{JournalEntry, JournalKind};

/// Current survival values plus environment flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivalState {
    pub hunger: u32,
    pub thirst: u32,
    pub fatigue: u32,
    pub shelter: bool,
    pub fire: bool,
    pub water_source: bool,
}

impl Default for SurvivalState {
    /// Fed, watered and rested, in the open.
    fn default() -> Self {
        Self {
            hunger: SURVIVAL_MAX,
            thirst: SURVIVAL_MAX,
            fatigue: 0,
            shelter: false,
            fire: false,
            water_source: false,
        }
    }
}

impl SurvivalState {
    /// Apply a tick result.
    pub fn with_tick(self, tick: &SurvivalTick) -> Self {
        Self {
            hunger: tick.hunger,
            thirst: tick.thirst,
            fatigue: tick.fatigue,
            ..self
        }
    }

    /// Eat/drink: raise hunger and thirst, capped at 100.
    pub fn nourish(self, food: u32, water: u32) -> Self {
        Self {
            hunger: self.hunger.saturating_add(food).min(SURVIVAL_MAX),
            thirst: self.thirst.saturating_add(water).min(SURVIVAL_MAX),
            ..self
        }
    }

    /// Exertion: add fatigue, capped at 100.
    pub fn exert(self, fatigue: u32) -> Self {
        Self {
            fatigue: self.fatigue.saturating_add(fatigue).min(SURVIVAL_MAX),
            ..self
        }
    }
}

/// New triad values plus the deltas applied, for the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivalTick {
    pub hunger: u32,
    pub thirst: u32,
    pub fatigue: u32,
    pub hunger_loss: u32,
    pub thirst_loss: u32,
    pub fatigue_reduction: u32,
}

fn apply(
    state: &SurvivalState,
    hunger_loss: u32,
    thirst_loss: u32,
    fatigue_reduction: u32,
) -> SurvivalTick {
    SurvivalTick {
        hunger: state.hunger.min(SURVIVAL_MAX).saturating_sub(hunger_loss),
        thirst: state.thirst.min(SURVIVAL_MAX).saturating_sub(thirst_loss),
        fatigue: state.fatigue.min(SURVIVAL_MAX).saturating_sub(fatigue_reduction),
        hunger_loss,
        thirst_loss,
        fatigue_reduction,
    }
}

/// Short rest: recover fatigue at the cost of a little food and water.
pub fn calculate_rest(state: &SurvivalState) -> SurvivalTick {
    let mut fatigue_reduction = rest::FATIGUE_REDUCTION;
    if state.shelter {
        fatigue_reduction += rest::SHELTER_FATIGUE_BONUS;
    }
    if state.fire {
        fatigue_reduction += rest::FIRE_FATIGUE_BONUS;
    }
    apply(state, rest::HUNGER_LOSS, rest::THIRST_LOSS, fatigue_reduction)
}

/// Overnight consumption.
pub fn calculate_night_consumption(state: &SurvivalState) -> SurvivalTick {
    let mut hunger_loss = night::HUNGER_LOSS;
    let mut thirst_loss = night::THIRST_LOSS;
    let mut fatigue_reduction = night::FATIGUE_REDUCTION;

    if state.shelter {
        hunger_loss -= night::SHELTER_HUNGER_SAVING;
        thirst_loss -= night::SHELTER_THIRST_SAVING;
        fatigue_reduction += night::SHELTER_FATIGUE_BONUS;
    }
    if state.fire {
        hunger_loss -= night::FIRE_HUNGER_SAVING;
        fatigue_reduction += night::FIRE_FATIGUE_BONUS;
    }
    if state.water_source {
        thirst_loss = thirst_loss.saturating_sub(night::WATER_SOURCE_THIRST_SAVING);
    }

    apply(state, hunger_loss, thirst_loss, fatigue_reduction)
}

/// Hunger label, most-sated band first.
pub fn hunger_status(hunger: u32) -> &'static str {
    if hunger > bands::WELL_ABOVE {
        "Sazio"
    } else if hunger > bands::FAIR_ABOVE {
        "Leggermente affamato"
    } else if hunger > bands::LOW_ABOVE {
        "Affamato"
    } else if hunger > bands::CRITICAL_ABOVE {
        "Molto affamato"
    } else {
        "Morendo di fame"
    }
}

/// Thirst label, most-hydrated band first.
pub fn thirst_status(thirst: u32) -> &'static str {
    if thirst > bands::WELL_ABOVE {
        "Idratato"
    } else if thirst > bands::FAIR_ABOVE {
        "Leggermente assetato"
    } else if thirst > bands::LOW_ABOVE {
        "Assetato"
    } else if thirst > bands::CRITICAL_ABOVE {
        "Molto assetato"
    } else {
        "Morendo di sete"
    }
}

/// Fatigue label, most-rested band first.
pub fn fatigue_status(fatigue: u32) -> &'static str {
    if fatigue < bands::RESTED_BELOW {
        "Riposato"
    } else if fatigue < bands::SLIGHTLY_TIRED_BELOW {
        "Leggermente stanco"
    } else if fatigue < bands::TIRED_BELOW {
        "Stanco"
    } else if fatigue < bands::VERY_TIRED_BELOW {
        "Molto stanco"
    } else {
        "Esausto"
    }
}

/// All three labels at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurvivalStatus {
    pub hunger: &'static str,
    pub thirst: &'static str,
    pub fatigue: &'static str,
}

pub fn survival_status(state: &SurvivalState) -> SurvivalStatus {
    SurvivalStatus {
        hunger: hunger_status(state.hunger),
        thirst: thirst_status(state.thirst),
        fatigue: fatigue_status(state.fatigue),
    }
}

/// One reason for penalty damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyMessage {
    pub reason: String,
    pub damage: u32,
}

/// Total penalty damage for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalPenalty {
    pub damage: u32,
    pub messages: Vec<PenaltyMessage>,
}

impl SurvivalPenalty {
    /// One `HpDamage` journal entry per reason.
    pub fn journal_entries(&self) -> Vec<JournalEntry> {
        self.messages
            .iter()
            .map(|m| {
                JournalEntry::new(
                    JournalKind::HpDamage,
                    format!("Subisci {} danni per {}.", m.damage, m.reason),
                )
                .with("damage", m.damage)
                .with("reason", &m.reason)
            })
            .collect()
    }
}

/// `percent`% of `value`, floored. Widened so large HP pools don't wrap.
fn percent_of(value: u32, percent: u32) -> u32 {
    let part = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(part).unwrap_or(u32::MAX)
}

/// HP damage from extreme hunger and thirst. Does not touch the sheet;
/// the caller applies `damage`.
pub fn evaluate_penalties(state: &SurvivalState, sheet: &CharacterSheet) -> SurvivalPenalty {
    let mut penalty = SurvivalPenalty::default();

    if state.hunger <= penalties::HUNGER_THRESHOLD {
        let damage = percent_of(sheet.max_hp, penalties::HUNGER_DAMAGE_PERCENT);
        penalty.damage = penalty.damage.saturating_add(damage);
        penalty.messages.push(PenaltyMessage {
            reason: penalties::HUNGER_REASON.to_string(),
            damage,
        });
    }

    if state.thirst <= penalties::THIRST_THRESHOLD {
        let damage = percent_of(sheet.max_hp, penalties::THIRST_DAMAGE_PERCENT);
        penalty.damage = penalty.damage.saturating_add(damage);
        penalty.messages.push(PenaltyMessage {
            reason: penalties::THIRST_REASON.to_string(),
            damage,
        });
    }

    if penalty.damage > 0 {
        log::debug!(
            "survival penalty: {} HP (hunger={}, thirst={})",
            penalty.damage,
            state.hunger,
            state.thirst
        );
    }
    penalty
}
