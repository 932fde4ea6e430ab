//! Character sheet, status and hit-point mechanics.
//!
//! Derived values follow the d20 conventions used everywhere else in the
//! rules: max HP from Vigore, armour class from Agilita, carry capacity
//! from Potenza.

use serde::{Deserialize, Serialize};

use crate::progression::{xp_for_next_level, ProgressionConfig};
use crate::skills::{ability_modifier, AbilityScores};

/// The single active condition of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterStatus {
    #[default]
    Normal,
    Wounded,
    Sick,
    Poisoned,
    Starving,
    Dehydrated,
    Dead,
}

impl CharacterStatus {
    /// Label shown to the player.
    pub fn display_name(self) -> &'static str {
        match self {
            CharacterStatus::Normal => "Normale",
            CharacterStatus::Wounded => "Ferito",
            CharacterStatus::Sick => "Malato",
            CharacterStatus::Poisoned => "Avvelenato",
            CharacterStatus::Starving => "Affamato",
            CharacterStatus::Dehydrated => "Disidratato",
            CharacterStatus::Dead => "Morto",
        }
    }

    /// Conditions a medical item can treat.
    pub fn is_healable(self) -> bool {
        matches!(
            self,
            CharacterStatus::Wounded | CharacterStatus::Sick | CharacterStatus::Poisoned
        )
    }
}

/// Experience counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(rename = "currentXP")]
    pub current_xp: u32,
    #[serde(rename = "xpForNextLevel")]
    pub xp_for_next_level: u32,
    pub can_level_up: bool,
}

/// Snapshot of the player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub name: String,
    pub stats: AbilityScores,
    pub level: u32,
    #[serde(rename = "maxHP")]
    pub max_hp: u32,
    #[serde(rename = "currentHP")]
    pub current_hp: u32,
    #[serde(rename = "baseAC")]
    pub base_ac: i32,
    pub carry_capacity: u32,
    pub status: CharacterStatus,
    pub experience: Experience,
    /// Ids of recipes the character can use.
    #[serde(default)]
    pub known_recipes: Vec<String>,
}

impl CharacterSheet {
    /// Fresh level-1 character at full health.
    pub fn new(name: impl Into<String>, stats: AbilityScores) -> Self {
        let max_hp = max_hp_for(stats.vigore);
        Self {
            name: name.into(),
            stats,
            level: 1,
            max_hp,
            current_hp: max_hp,
            base_ac: base_ac_for(stats.agilita),
            carry_capacity: carry_capacity_for(stats.potenza),
            status: CharacterStatus::Normal,
            experience: Experience {
                current_xp: 0,
                xp_for_next_level: xp_for_next_level(1, &ProgressionConfig::default()),
                can_level_up: false,
            },
            known_recipes: Vec::new(),
        }
    }

    /// Lose HP, never below zero. Returns the HP actually lost.
    pub fn apply_damage(&mut self, damage: u32) -> u32 {
        let lost = damage.min(self.current_hp);
        self.current_hp -= lost;
        if self.current_hp == 0 {
            self.status = CharacterStatus::Dead;
        }
        lost
    }

    /// Regain HP, never above max. Returns the HP actually restored.
    pub fn apply_healing(&mut self, healing: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let restored = healing.min(self.max_hp.saturating_sub(self.current_hp));
        self.current_hp += restored;
        restored
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp == 0 || self.status == CharacterStatus::Dead
    }

    pub fn is_wounded(&self) -> bool {
        self.current_hp < self.max_hp
    }

    pub fn hp_percentage(&self) -> u32 {
        hp_percentage(self.current_hp, self.max_hp)
    }

    pub fn knows_recipe(&self, recipe_id: &str) -> bool {
        self.known_recipes.iter().any(|r| r == recipe_id)
    }

    /// Recompute HP/AC/capacity after a stat change, keeping the current
    /// HP deficit.
    pub fn refresh_derived(&mut self) {
        let deficit = self.max_hp.saturating_sub(self.current_hp);
        self.max_hp = max_hp_for(self.stats.vigore);
        self.current_hp = self.max_hp.saturating_sub(deficit).max(1);
        self.base_ac = base_ac_for(self.stats.agilita);
        self.carry_capacity = carry_capacity_for(self.stats.potenza);
    }
}

/// `max(1, 10 + mod(vigore))`.
pub fn max_hp_for(vigore: u8) -> u32 {
    (10 + ability_modifier(vigore)).max(1) as u32
}

/// `10 + mod(agilita)`.
pub fn base_ac_for(agilita: u8) -> i32 {
    10 + ability_modifier(agilita)
}

/// Kilograms the character can carry: `potenza * 10`.
pub fn carry_capacity_for(potenza: u8) -> u32 {
    u32::from(potenza) * 10
}

/// Rounded share of HP left, 0 when `max_hp` is 0.
pub fn hp_percentage(current_hp: u32, max_hp: u32) -> u32 {
    if max_hp == 0 {
        return 0;
    }
    ((f64::from(current_hp) / f64::from(max_hp)) * 100.0).round() as u32
}
