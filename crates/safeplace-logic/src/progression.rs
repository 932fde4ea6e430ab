//! Experience gain and level-up.
//!
//! The XP needed for the next level grows geometrically:
//! `floor(base * multiplier^(level - 1))`. Gaining XP only flags
//! `can_level_up`; the level itself changes when the player confirms
//! with [`level_up`].

use serde::{Deserialize, Serialize};

use crate::character::CharacterSheet;
use crate::journal::{JournalEntry, JournalKind};

/// Progression curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// XP to go from level 1 to level 2.
    pub base_xp_for_next_level: u32,
    /// Growth factor per level.
    pub xp_multiplier: f64,
    pub max_level: u32,
    /// Improvement points awarded per level gained.
    pub points_per_level: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_xp_for_next_level: 100,
            xp_multiplier: 1.5,
            max_level: 20,
            points_per_level: 2,
        }
    }
}

/// XP needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32, config: &ProgressionConfig) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    (f64::from(config.base_xp_for_next_level) * config.xp_multiplier.powi(exponent)).floor() as u32
}

/// Cumulative XP needed to reach `target_level` from level 1.
pub fn total_xp_for_level(target_level: u32, config: &ProgressionConfig) -> u32 {
    (1..target_level)
        .map(|level| xp_for_next_level(level, config))
        .sum()
}

pub fn can_level_up(sheet: &CharacterSheet, config: &ProgressionConfig) -> bool {
    sheet.experience.current_xp >= sheet.experience.xp_for_next_level
        && sheet.level < config.max_level
}

/// Add `amount` XP and refresh the level-up flag.
pub fn gain_experience(
    sheet: &CharacterSheet,
    amount: u32,
    config: &ProgressionConfig,
) -> (CharacterSheet, JournalEntry) {
    let mut next = sheet.clone();
    next.experience.current_xp = next.experience.current_xp.saturating_add(amount);
    next.experience.can_level_up = can_level_up(&next, config);

    let entry = JournalEntry::new(
        JournalKind::XpGain,
        format!("Hai guadagnato {} punti esperienza.", amount),
    )
    .with("xpGained", amount)
    .with("totalXP", next.experience.current_xp)
    .with("canLevelUp", next.experience.can_level_up);

    (next, entry)
}

/// Result of confirming a level-up.
#[derive(Debug, Clone)]
pub struct LevelUpOutcome {
    pub sheet: CharacterSheet,
    /// Improvement points the player can now spend.
    pub points_awarded: u32,
    pub journal: Vec<JournalEntry>,
}

/// Advance one level if eligible. Returns `None` when the character
/// cannot level up.
pub fn level_up(sheet: &CharacterSheet, config: &ProgressionConfig) -> Option<LevelUpOutcome> {
    if !can_level_up(sheet, config) {
        return None;
    }

    let mut next = sheet.clone();
    next.experience.current_xp -= next.experience.xp_for_next_level;
    next.level += 1;
    next.experience.xp_for_next_level = xp_for_next_level(next.level, config);
    next.experience.can_level_up = can_level_up(&next, config);

    log::info!("{} reached level {}", next.name, next.level);

    let entry = JournalEntry::new(
        JournalKind::LevelUp,
        format!("Sei salito al livello {}!", next.level),
    )
    .with("level", next.level)
    .with("points", config.points_per_level);

    Some(LevelUpOutcome {
        sheet: next,
        points_awarded: config.points_per_level,
        journal: vec![entry],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::AbilityScores;

    fn sheet() -> CharacterSheet {
        CharacterSheet::new("Ultimo", AbilityScores::default())
    }

    #[test]
    fn curve_values() {
        let c = ProgressionConfig::default();
        assert_eq!(xp_for_next_level(1, &c), 100);
        assert_eq!(xp_for_next_level(2, &c), 150);
        assert_eq!(xp_for_next_level(3, &c), 225);
        assert_eq!(xp_for_next_level(4, &c), 337);
        assert_eq!(total_xp_for_level(1, &c), 0);
        assert_eq!(total_xp_for_level(3, &c), 250);
    }

    #[test]
    fn gain_sets_flag_at_threshold() {
        let c = ProgressionConfig::default();
        let (s, entry) = gain_experience(&sheet(), 99, &c);
        assert!(!s.experience.can_level_up);
        assert_eq!(entry.kind, JournalKind::XpGain);
        assert_eq!(entry.get("totalXP"), Some("99"));

        let (s, entry) = gain_experience(&s, 1, &c);
        assert!(s.experience.can_level_up);
        assert_eq!(entry.get("canLevelUp"), Some("true"));
    }

    #[test]
    fn gain_does_not_mutate_input() {
        let c = ProgressionConfig::default();
        let original = sheet();
        let _ = gain_experience(&original, 40, &c);
        assert_eq!(original.experience.current_xp, 0);
    }

    #[test]
    fn level_up_carries_surplus() {
        let c = ProgressionConfig::default();
        let (s, _) = gain_experience(&sheet(), 130, &c);
        let out = level_up(&s, &c).unwrap();
        assert_eq!(out.sheet.level, 2);
        assert_eq!(out.sheet.experience.current_xp, 30);
        assert_eq!(out.sheet.experience.xp_for_next_level, 150);
        assert!(!out.sheet.experience.can_level_up);
        assert_eq!(out.points_awarded, 2);
        assert_eq!(out.journal[0].kind, JournalKind::LevelUp);
    }

    #[test]
    fn no_level_up_without_xp() {
        let c = ProgressionConfig::default();
        assert!(level_up(&sheet(), &c).is_none());
    }

    #[test]
    fn max_level_blocks() {
        let c = ProgressionConfig::default();
        let mut s = sheet();
        s.level = 20;
        let (s, _) = gain_experience(&s, 1_000_000, &c);
        assert!(!s.experience.can_level_up);
        assert!(level_up(&s, &c).is_none());
    }
}
