//! Status cures from medical items.
//!
//! Only Wounded, Sick and Poisoned can be treated. The chance of a cure
//! comes from the item's rarity, its effect value and the condition being
//! treated, clamped to `[0.10, 0.95]`. The item is used up whether the
//! cure takes or not.

use serde::{Deserialize, Serialize};

use crate::character::{CharacterSheet, CharacterStatus};
use crate::constants::healing::*;
use crate::dice::RandomSource;
use crate::inventory::{Inventory, InventoryError};
use crate::items::{Item, Rarity};
use crate::journal::{JournalEntry, JournalKind};

fn rarity_base_rate(rarity: Option<Rarity>) -> f64 {
    match rarity {
        Some(Rarity::Common) => 0.4,
        Some(Rarity::Uncommon) => 0.6,
        Some(Rarity::Rare) => 0.8,
        Some(Rarity::Epic) => 0.9,
        Some(Rarity::Legendary) => 0.95,
        Some(Rarity::Unknown) | None => DEFAULT_BASE_RATE,
    }
}

/// Probability that `item` cures `status`.
pub fn healing_success_rate(item: &Item, status: CharacterStatus) -> f64 {
    let mut rate = rarity_base_rate(item.rarity);

    let effect = item.effect();
    if effect >= STRONG_EFFECT {
        rate += STRONG_EFFECT_BONUS;
    } else if effect >= MODERATE_EFFECT {
        rate += MODERATE_EFFECT_BONUS;
    }

    rate += match status {
        CharacterStatus::Wounded => WOUNDED_ADJUST,
        CharacterStatus::Sick => SICK_ADJUST,
        CharacterStatus::Poisoned => POISONED_ADJUST,
        _ => 0.0,
    };

    rate.clamp(MIN_SUCCESS_RATE, MAX_SUCCESS_RATE)
}

/// How a treatment attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealingResult {
    /// Nothing to treat; no item used.
    NotHealable,
    /// The slot does not hold the item; no item used.
    ItemUnavailable,
    Cured,
    /// Treatment did not take; item used anyway.
    Failed,
}

#[derive(Debug, Clone)]
pub struct HealingOutcome {
    pub result: HealingResult,
    pub sheet: CharacterSheet,
    pub inventory: Inventory,
    pub journal: Vec<JournalEntry>,
    /// Rate the draw was made against, `None` when no draw happened.
    pub success_rate: Option<f64>,
    pub hp_restored: u32,
}

impl HealingOutcome {
    /// Whether the item was used up. True for a failed cure as well as a
    /// successful one.
    pub fn consumed(&self) -> bool {
        matches!(self.result, HealingResult::Cured | HealingResult::Failed)
    }

    pub fn cured(&self) -> bool {
        self.result == HealingResult::Cured
    }
}

/// Try to cure the current status with one unit of `item` from
/// `slot_index`.
pub fn attempt_status_healing<D: RandomSource + ?Sized>(
    item: &Item,
    slot_index: usize,
    sheet: &CharacterSheet,
    inventory: &Inventory,
    dice: &mut D,
) -> HealingOutcome {
    let mut out = HealingOutcome {
        result: HealingResult::NotHealable,
        sheet: sheet.clone(),
        inventory: inventory.clone(),
        journal: Vec::new(),
        success_rate: None,
        hp_restored: 0,
    };

    let status = sheet.status;
    if !status.is_healable() {
        out.journal.push(JournalEntry::new(
            JournalKind::ActionFail,
            format!("Non hai condizioni che possono essere curate con {}", item.name),
        ));
        return out;
    }

    let taken = match out.inventory.slot(slot_index) {
        Some(slot) if slot.item_id != item.id => Err(InventoryError::ItemMismatch {
            slot: slot_index,
            expected: item.id.clone(),
            found: slot.item_id.clone(),
        }),
        _ => out.inventory.remove_from_slot(slot_index, 1),
    };
    match taken {
        Ok(1) => {}
        Ok(_) => {
            log::error!("healing: slot {} held no '{}'", slot_index, item.id);
            out.inventory = inventory.clone();
            out.result = HealingResult::ItemUnavailable;
            return out;
        }
        Err(err) => {
            log::error!("healing: cannot use '{}': {}", item.id, err);
            out.inventory = inventory.clone();
            out.result = HealingResult::ItemUnavailable;
            return out;
        }
    }

    let rate = healing_success_rate(item, status);
    out.success_rate = Some(rate);

    let draw = dice.draw_unit();
    log::debug!(
        "healing: {} on {:?}, draw {:.3} vs {:.3}",
        item.id,
        status,
        draw,
        rate
    );

    if draw < rate {
        out.result = HealingResult::Cured;
        out.sheet.status = CharacterStatus::Normal;
        out.journal.push(
            JournalEntry::new(
                JournalKind::ActionSuccess,
                format!(
                    "{} ha curato con successo il tuo status \"{}\"",
                    item.name,
                    status.display_name()
                ),
            )
            .with("status", status.display_name()),
        );

        let effect = item.effect();
        if effect > 0 {
            out.hp_restored = out.sheet.apply_healing(effect);
            out.journal.push(
                JournalEntry::new(
                    JournalKind::HpRecovery,
                    format!("Recuperi {} HP.", out.hp_restored),
                )
                .with("healing", out.hp_restored)
                .with("reason", item.name.to_lowercase()),
            );
        }
    } else {
        out.result = HealingResult::Failed;
        out.journal.push(
            JournalEntry::new(
                JournalKind::ActionFail,
                format!(
                    "{} non è riuscito a curare il tuo status \"{}\"",
                    item.name,
                    status.display_name()
                ),
            )
            .with("status", status.display_name()),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::items::ItemKind;
    use crate::skills::AbilityScores;

    fn medkit(rarity: Option<Rarity>, effect: Option<u32>) -> Item {
        let mut item = Item::new("medkit", "Kit Medico", ItemKind::Consumable);
        item.rarity = rarity;
        item.effect_value = effect;
        item.stackable = true;
        item
    }

    fn patient(status: CharacterStatus) -> CharacterSheet {
        let mut s = CharacterSheet::new("Ultimo", AbilityScores::uniform(14));
        s.status = status;
        s
    }

    fn stocked(item: &Item, qty: u32) -> Inventory {
        let mut inv = Inventory::default();
        inv.add_item(item, qty).unwrap();
        inv
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rate_by_rarity_and_status() {
        let common = medkit(Some(Rarity::Common), None);
        assert!(approx(healing_success_rate(&common, CharacterStatus::Wounded), 0.5));
        assert!(approx(healing_success_rate(&common, CharacterStatus::Sick), 0.3));
        assert!(approx(healing_success_rate(&common, CharacterStatus::Poisoned), 0.25));

        let plain = medkit(None, None);
        assert!(approx(healing_success_rate(&plain, CharacterStatus::Sick), 0.4));
        let odd = medkit(Some(Rarity::Unknown), None);
        assert!(approx(healing_success_rate(&odd, CharacterStatus::Sick), 0.4));
    }

    #[test]
    fn effect_bonus_tiers() {
        let moderate = medkit(Some(Rarity::Uncommon), Some(15));
        assert!(approx(healing_success_rate(&moderate, CharacterStatus::Sick), 0.55));
        let strong = medkit(Some(Rarity::Uncommon), Some(25));
        assert!(approx(healing_success_rate(&strong, CharacterStatus::Sick), 0.6));
        let weak = medkit(Some(Rarity::Uncommon), Some(14));
        assert!(approx(healing_success_rate(&weak, CharacterStatus::Sick), 0.5));
    }

    #[test]
    fn rate_is_clamped() {
        let legendary = medkit(Some(Rarity::Legendary), Some(30));
        assert!(approx(
            healing_success_rate(&legendary, CharacterStatus::Wounded),
            MAX_SUCCESS_RATE
        ));

        for rarity in [None, Some(Rarity::Common), Some(Rarity::Epic)] {
            for status in [
                CharacterStatus::Wounded,
                CharacterStatus::Sick,
                CharacterStatus::Poisoned,
            ] {
                let r = healing_success_rate(&medkit(rarity, None), status);
                assert!((MIN_SUCCESS_RATE..=MAX_SUCCESS_RATE).contains(&r));
            }
        }
    }

    #[test]
    fn unhealable_status_is_a_no_op() {
        let item = medkit(Some(Rarity::Rare), Some(10));
        let inv = stocked(&item, 2);
        for status in [CharacterStatus::Normal, CharacterStatus::Starving, CharacterStatus::Dead] {
            let out = attempt_status_healing(
                &item,
                0,
                &patient(status),
                &inv,
                &mut ScriptedDice::always_draw(0.0),
            );
            assert_eq!(out.result, HealingResult::NotHealable);
            assert!(!out.consumed());
            assert_eq!(out.inventory, inv);
            assert_eq!(out.sheet.status, status);
            assert_eq!(out.journal.len(), 1);
            assert_eq!(out.journal[0].kind, JournalKind::ActionFail);
            assert_eq!(
                out.journal[0].text,
                "Non hai condizioni che possono essere curate con Kit Medico"
            );
        }
    }

    #[test]
    fn cure_clears_status_uses_item_and_heals() {
        let item = medkit(Some(Rarity::Rare), Some(3));
        let mut sheet = patient(CharacterStatus::Wounded);
        sheet.apply_damage(5);
        let inv = stocked(&item, 2);

        let out = attempt_status_healing(&item, 0, &sheet, &inv, &mut ScriptedDice::always_draw(0.0));
        assert!(out.cured());
        assert!(out.consumed());
        assert_eq!(out.sheet.status, CharacterStatus::Normal);
        assert_eq!(out.inventory.count("medkit"), 1);
        assert_eq!(out.hp_restored, 3);
        assert_eq!(out.sheet.current_hp, sheet.current_hp + 3);
        assert_eq!(out.journal.len(), 2);
        assert_eq!(out.journal[0].kind, JournalKind::ActionSuccess);
        assert_eq!(
            out.journal[0].text,
            "Kit Medico ha curato con successo il tuo status \"Ferito\""
        );
        assert_eq!(out.journal[1].kind, JournalKind::HpRecovery);
        assert_eq!(out.journal[1].get("healing"), Some("3"));
        assert_eq!(out.journal[1].get("reason"), Some("kit medico"));
    }

    #[test]
    fn cure_without_effect_skips_hp_entry() {
        let item = medkit(Some(Rarity::Epic), None);
        let out = attempt_status_healing(
            &item,
            0,
            &patient(CharacterStatus::Poisoned),
            &stocked(&item, 1),
            &mut ScriptedDice::always_draw(0.0),
        );
        assert!(out.cured());
        assert_eq!(out.journal.len(), 1);
        assert_eq!(out.inventory.count("medkit"), 0);
        assert!(out.inventory.slot(0).is_none());
    }

    #[test]
    fn failed_cure_still_consumes() {
        let item = medkit(Some(Rarity::Common), Some(20));
        let sheet = patient(CharacterStatus::Sick);
        let out = attempt_status_healing(
            &item,
            0,
            &sheet,
            &stocked(&item, 2),
            &mut ScriptedDice::always_draw(0.99),
        );
        assert_eq!(out.result, HealingResult::Failed);
        assert!(out.consumed());
        assert!(!out.cured());
        assert_eq!(out.sheet.status, CharacterStatus::Sick);
        assert_eq!(out.sheet.current_hp, sheet.current_hp);
        assert_eq!(out.inventory.count("medkit"), 1);
        assert_eq!(
            out.journal[0].text,
            "Kit Medico non è riuscito a curare il tuo status \"Malato\""
        );
        assert!(approx(out.success_rate.unwrap(), 0.35));
    }

    #[test]
    fn wrong_slot_uses_nothing() {
        let item = medkit(Some(Rarity::Rare), None);
        let inv = stocked(&item, 1);
        let out = attempt_status_healing(
            &item,
            3,
            &patient(CharacterStatus::Wounded),
            &inv,
            &mut ScriptedDice::always_draw(0.0),
        );
        assert_eq!(out.result, HealingResult::ItemUnavailable);
        assert!(!out.consumed());
        assert_eq!(out.inventory, inv);
        assert_eq!(out.sheet.status, CharacterStatus::Wounded);
    }

    #[test]
    fn slot_holding_another_item_uses_nothing() {
        let item = medkit(Some(Rarity::Rare), None);
        let mut bandage = Item::new("bandage", "Benda", ItemKind::Consumable);
        bandage.stackable = true;
        let inv = stocked(&bandage, 2);
        let out = attempt_status_healing(
            &item,
            0,
            &patient(CharacterStatus::Wounded),
            &inv,
            &mut ScriptedDice::always_draw(0.0),
        );
        assert_eq!(out.result, HealingResult::ItemUnavailable);
        assert!(out.success_rate.is_none());
        assert_eq!(out.inventory, inv);
    }

    #[test]
    fn empty_slot_in_range_uses_nothing() {
        let item = medkit(Some(Rarity::Rare), None);
        let inv = stocked(&item, 1);
        assert!(inv.slot(1).is_none());
        let out = attempt_status_healing(
            &item,
            1,
            &patient(CharacterStatus::Sick),
            &inv,
            &mut ScriptedDice::always_draw(0.0),
        );
        assert_eq!(out.result, HealingResult::ItemUnavailable);
        assert!(!out.consumed());
        assert_eq!(out.inventory, inv);
        assert_eq!(out.sheet.status, CharacterStatus::Sick);
    }

    #[test]
    fn hp_entry_reports_what_was_restored() {
        let item = medkit(Some(Rarity::Rare), Some(3));
        let mut sheet = patient(CharacterStatus::Wounded);
        sheet.apply_damage(1);
        let out = attempt_status_healing(
            &item,
            0,
            &sheet,
            &stocked(&item, 1),
            &mut ScriptedDice::always_draw(0.0),
        );
        assert!(out.cured());
        assert_eq!(out.hp_restored, 1);
        assert_eq!(out.sheet.current_hp, sheet.max_hp);
        assert_eq!(out.journal[1].text, "Recuperi 1 HP.");
        assert_eq!(out.journal[1].get("healing"), Some("1"));
    }
}
