//! The Safe Place Headless Rules Harness
//!
//! Validates content files and sweeps the pure rules crate.
//! Runs entirely in-process with no UI or save files.
//!
//! Usage:
//!   cargo run -p safeplace-simtest
//!   cargo run -p safeplace-simtest -- --verbose

mod content;

use rand::rngs::StdRng;
use rand::SeedableRng;
use safeplace_logic::character::{CharacterSheet, CharacterStatus};
use safeplace_logic::constants::SURVIVAL_MAX;
use safeplace_logic::crafting::{failure_loss, CraftFailure, Workbench};
use safeplace_logic::dice::ScriptedDice;
use safeplace_logic::healing::{attempt_status_healing, healing_success_rate, HealingResult};
use safeplace_logic::inventory::Inventory;
use safeplace_logic::items::{Item, ItemKind, Rarity};
use safeplace_logic::progression::{self, ProgressionConfig};
use safeplace_logic::skills::{ability_check, AbilityScores};
use safeplace_logic::survival::{self, SurvivalState};
use safeplace_logic::time::{advance_time, GameClock};

use content::Content;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    init_logging(verbose);
    println!("=== The Safe Place Rules Harness ===\n");

    let mut results = Vec::new();

    // 1. Content files
    let content = match content::load() {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ content_load: {}", e);
            std::process::exit(1);
        }
    };
    results.extend(validate_content(&content, verbose));

    // 2. Time advancement sweep
    results.extend(validate_time(verbose));

    // 3. Rest / night consumption bounds
    results.extend(validate_survival(verbose));

    // 4. Starvation & dehydration penalties
    results.extend(validate_penalties(verbose));

    // 5. d20 checks
    results.extend(validate_checks(verbose));

    // 6. Every recipe, forced pass and forced fail
    results.extend(validate_crafting(&content, verbose));

    // 7. Healing rates and consumption
    results.extend(validate_healing(&content, verbose));

    // 8. XP curve
    results.extend(validate_progression(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warn, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

// ── 1. Content ──────────────────────────────────────────────────────────

fn validate_content(content: &Content, verbose: bool) -> Vec<TestResult> {
    println!("--- Content ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "content_items_loaded".into(),
        passed: !content.items.is_empty(),
        detail: format!("{} items loaded", content.items.len()),
    });
    results.push(TestResult {
        name: "content_recipes_loaded".into(),
        passed: !content.recipes.is_empty(),
        detail: format!("{} recipes loaded", content.recipes.len()),
    });

    let item_errors = content::check_items(&content.items);
    results.push(TestResult {
        name: "content_items_valid".into(),
        passed: item_errors.is_empty(),
        detail: if item_errors.is_empty() {
            "stack and portion settings consistent".into()
        } else {
            item_errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let recipe_errors = content::check_recipes(&content.recipes, &content.items);
    results.push(TestResult {
        name: "content_recipes_valid".into(),
        passed: recipe_errors.is_empty(),
        detail: if recipe_errors.is_empty() {
            "all ingredients and results resolve".into()
        } else {
            recipe_errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    // Portioned items start with a full set of portions
    for item in content.items.iter().filter(|i| i.is_portioned()) {
        let mut inv = Inventory::default();
        let added = inv.add_item(item, 1).is_ok();
        let portions = inv.slot(0).and_then(|s| s.portions);
        results.push(TestResult {
            name: format!("content_portions_{}", item.id),
            passed: added && portions == item.portions_per_unit,
            detail: format!("{} starts with {:?} portions", item.name, portions),
        });
    }

    if verbose {
        for item in content.items.iter() {
            println!("    {} ({:?})", item.id, item.kind);
        }
    }

    results
}

// ── 2. Time ─────────────────────────────────────────────────────────────

fn validate_time(_verbose: bool) -> Vec<TestResult> {
    println!("--- Time ---");
    let mut results = Vec::new();

    let full_day = advance_time(1, 8, 0, 1440);
    results.push(TestResult {
        name: "time_full_day".into(),
        passed: (full_day.day, full_day.hour, full_day.minute) == (2, 8, 0),
        detail: format!(
            "day 1 08:00 + 1440 min = day {} {:02}:{:02}",
            full_day.day, full_day.hour, full_day.minute
        ),
    });

    // Bounds and day arithmetic over a grid of inputs
    let mut violations = 0;
    let mut checked = 0;
    for hour in 0..24 {
        for minute in (0..60).step_by(7) {
            for minutes in [0, 1, 59, 60, 719, 1439, 1440, 1441, 10_000, 100_000] {
                let t = advance_time(3, hour, minute, minutes);
                let expected_day = 3 + (hour * 60 + minute + minutes) / 1440;
                if t.hour >= 24 || t.minute >= 60 || t.day != expected_day {
                    violations += 1;
                }
                checked += 1;
            }
        }
    }
    results.push(TestResult {
        name: "time_bounds_sweep".into(),
        passed: violations == 0,
        detail: format!("{} inputs, {} violations", checked, violations),
    });

    // Night runs 22:00-06:00
    let mut clock = GameClock::new(1, 0, 0);
    let mut night_minutes = 0;
    for _ in 0..1440 {
        if clock.is_night() {
            night_minutes += 1;
        }
        clock = clock.advance(1);
    }
    results.push(TestResult {
        name: "time_night_length".into(),
        passed: night_minutes == 8 * 60 && clock.day == 2,
        detail: format!("{} night minutes per day", night_minutes),
    });

    results
}

// ── 3. Survival ─────────────────────────────────────────────────────────

fn validate_survival(_verbose: bool) -> Vec<TestResult> {
    println!("--- Survival ---");
    let mut results = Vec::new();

    let mut out_of_range = 0;
    let mut label_gaps = 0;
    for value in 0..=SURVIVAL_MAX {
        for flags in 0..8u8 {
            let state = SurvivalState {
                hunger: value,
                thirst: value,
                fatigue: value,
                shelter: flags & 1 != 0,
                fire: flags & 2 != 0,
                water_source: flags & 4 != 0,
            };
            for tick in [
                survival::calculate_rest(&state),
                survival::calculate_night_consumption(&state),
            ] {
                if tick.hunger > SURVIVAL_MAX
                    || tick.thirst > SURVIVAL_MAX
                    || tick.fatigue > SURVIVAL_MAX
                    || tick.hunger > state.hunger
                    || tick.thirst > state.thirst
                    || tick.fatigue > state.fatigue
                {
                    out_of_range += 1;
                }
            }
        }
        let status = survival::survival_status(&SurvivalState {
            hunger: value,
            thirst: value,
            fatigue: value,
            ..SurvivalState::default()
        });
        if status.hunger.is_empty() || status.thirst.is_empty() || status.fatigue.is_empty() {
            label_gaps += 1;
        }
    }
    results.push(TestResult {
        name: "survival_ticks_clamped".into(),
        passed: out_of_range == 0,
        detail: format!("{} ticks outside 0..=100 or moving the wrong way", out_of_range),
    });
    results.push(TestResult {
        name: "survival_labels_total".into(),
        passed: label_gaps == 0,
        detail: "every value maps to a label".into(),
    });

    // Best camp: shelter + fire + water
    let camp = survival::calculate_night_consumption(&SurvivalState {
        shelter: true,
        fire: true,
        water_source: true,
        ..SurvivalState::default()
    });
    results.push(TestResult {
        name: "survival_best_camp_night".into(),
        passed: camp.hunger_loss == 10 && camp.thirst_loss == 3 && camp.fatigue_reduction == 45,
        detail: format!(
            "hunger -{} thirst -{} fatigue -{}",
            camp.hunger_loss, camp.thirst_loss, camp.fatigue_reduction
        ),
    });

    results
}

// ── 4. Penalties ────────────────────────────────────────────────────────

fn validate_penalties(_verbose: bool) -> Vec<TestResult> {
    println!("--- Penalties ---");
    let mut results = Vec::new();

    let mut sheet = CharacterSheet::new("Harness", AbilityScores::default());
    sheet.max_hp = 100;
    sheet.current_hp = 100;

    let starving = survival::evaluate_penalties(
        &SurvivalState {
            hunger: 5,
            thirst: 50,
            fatigue: 0,
            ..SurvivalState::default()
        },
        &sheet,
    );
    results.push(TestResult {
        name: "penalty_hunger_only".into(),
        passed: starving.damage == 5
            && starving.messages.len() == 1
            && starving.messages[0].reason == "fame estrema",
        detail: format!("{} damage, {} reasons", starving.damage, starving.messages.len()),
    });

    let both = survival::evaluate_penalties(
        &SurvivalState {
            hunger: 10,
            thirst: 10,
            ..SurvivalState::default()
        },
        &sheet,
    );
    results.push(TestResult {
        name: "penalty_both_additive".into(),
        passed: both.damage == 13 && both.messages.len() == 2,
        detail: format!("hunger+thirst at threshold = {} damage", both.damage),
    });

    let fed = survival::evaluate_penalties(
        &SurvivalState {
            hunger: 11,
            thirst: 11,
            ..SurvivalState::default()
        },
        &sheet,
    );
    results.push(TestResult {
        name: "penalty_above_threshold".into(),
        passed: fed.damage == 0 && fed.messages.is_empty(),
        detail: "11/11 costs nothing".into(),
    });

    results
}

// ── 5. Checks ───────────────────────────────────────────────────────────

fn validate_checks(verbose: bool) -> Vec<TestResult> {
    println!("--- Ability Checks ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(7);

    // Score 10 vs DC 1 never fails
    let always = (0..1000).all(|_| ability_check(10, 1, &mut rng).success);
    results.push(TestResult {
        name: "check_dc1_always_passes".into(),
        passed: always,
        detail: "1000 rolls at score 10, DC 1".into(),
    });

    // Rolls stay in 1..=20 and cover the die
    let mut seen = [false; 20];
    let mut out_of_range = 0;
    for _ in 0..2000 {
        let r = ability_check(10, 10, &mut rng);
        match r.roll {
            1..=20 => seen[(r.roll - 1) as usize] = true,
            _ => out_of_range += 1,
        }
    }
    results.push(TestResult {
        name: "check_roll_range".into(),
        passed: out_of_range == 0 && seen.iter().all(|&s| s),
        detail: format!("{} out-of-range rolls", out_of_range),
    });

    // Medio DC at score 10 should pass roughly 30% of the time
    let trials = 10_000;
    let passes = (0..trials)
        .filter(|_| ability_check(10, 15, &mut rng).success)
        .count();
    let rate = passes as f64 / trials as f64;
    if verbose {
        println!("    DC 15 @ score 10: {:.3}", rate);
    }
    results.push(TestResult {
        name: "check_dc15_distribution".into(),
        passed: (0.27..=0.33).contains(&rate),
        detail: format!("pass rate {:.3} (expected 0.30)", rate),
    });

    results
}

// ── 6. Crafting ─────────────────────────────────────────────────────────

fn validate_crafting(content: &Content, verbose: bool) -> Vec<TestResult> {
    println!("--- Crafting ---");
    let mut results = Vec::new();
    let bench = Workbench::new(&content.recipes, &content.items);
    let sheet = CharacterSheet::new("Harness", AbilityScores::default());

    for recipe in content.recipes.iter() {
        let mut stocked = Inventory::default();
        let mut stocked_ok = true;
        for ing in &recipe.ingredients {
            match content.items.get(&ing.item_id) {
                Some(item) => stocked_ok &= stocked.add_item(item, ing.quantity).is_ok(),
                None => stocked_ok = false,
            }
        }
        if !stocked_ok {
            results.push(TestResult {
                name: format!("craft_{}_stock", recipe.id),
                passed: false,
                detail: "could not stock ingredients".into(),
            });
            continue;
        }

        // Forced pass: natural 20
        let pass = bench.craft(&recipe.id, &sheet, &stocked, &mut ScriptedDice::always_roll(20));
        let granted = recipe
            .results
            .iter()
            .all(|r| pass.inventory.count(&r.item_id) >= r.quantity);
        let consumed = recipe
            .ingredients
            .iter()
            .filter(|ing| !recipe.results.iter().any(|r| r.item_id == ing.item_id))
            .all(|ing| pass.inventory.count(&ing.item_id) == 0);
        results.push(TestResult {
            name: format!("craft_{}_success", recipe.id),
            passed: pass.succeeded() && granted && consumed && pass.xp_gained > 0,
            detail: format!(
                "+{} XP, {} min, {} journal entries",
                pass.xp_gained,
                pass.minutes_spent,
                pass.journal.len()
            ),
        });

        // Forced fail: natural 1 on recipes with a check
        if recipe.required_check().is_some() {
            let fail = bench.craft(&recipe.id, &sheet, &stocked, &mut ScriptedDice::always_roll(1));
            let loss_ok = recipe.ingredients.iter().all(|ing| {
                let before = stocked.count(&ing.item_id);
                let after = fail.inventory.count(&ing.item_id);
                before - after == failure_loss(ing.quantity).min(before)
            });
            results.push(TestResult {
                name: format!("craft_{}_failure_loss", recipe.id),
                passed: fail.failure == Some(CraftFailure::SkillCheckFailed) && loss_ok,
                detail: format!("wasted {:?}", fail.wasted),
            });
        }

        // Empty pack: nothing changes
        let empty = Inventory::default();
        let broke = bench.craft(&recipe.id, &sheet, &empty, &mut ScriptedDice::always_roll(20));
        results.push(TestResult {
            name: format!("craft_{}_no_materials", recipe.id),
            passed: !bench.can_craft(&recipe.id, &empty)
                && broke.failure == Some(CraftFailure::MissingMaterials)
                && broke.inventory == empty,
            detail: "empty inventory untouched".into(),
        });

        if verbose {
            println!("    {} → {:?}", recipe.id, recipe.required_check());
        }
    }

    let unknown = bench.craft(
        "no_such_recipe",
        &sheet,
        &Inventory::default(),
        &mut ScriptedDice::new(),
    );
    results.push(TestResult {
        name: "craft_unknown_recipe".into(),
        passed: unknown.failure == Some(CraftFailure::UnknownRecipe) && unknown.journal.is_empty(),
        detail: "unknown id rejected without journal noise".into(),
    });

    results
}

// ── 7. Healing ──────────────────────────────────────────────────────────

fn validate_healing(content: &Content, _verbose: bool) -> Vec<TestResult> {
    println!("--- Healing ---");
    let mut results = Vec::new();

    let statuses = [
        CharacterStatus::Wounded,
        CharacterStatus::Sick,
        CharacterStatus::Poisoned,
    ];
    let medical: Vec<_> = content
        .items
        .iter()
        .filter(|i| matches!(i.kind, ItemKind::Consumable | ItemKind::Potion))
        .collect();

    // Rates always within [0.10, 0.95]
    let mut out_of_range = 0;
    for item in &medical {
        for &status in &statuses {
            let rate = healing_success_rate(item, status);
            if !(0.10..=0.95).contains(&rate) {
                out_of_range += 1;
            }
        }
    }
    results.push(TestResult {
        name: "heal_rate_bounds".into(),
        passed: out_of_range == 0,
        detail: format!("{} items × 3 statuses", medical.len()),
    });

    // Rarity ordering: better tier, better odds
    let tiers = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];
    let mut probe = Item::new("probe", "Sonda", ItemKind::Potion);
    let mut last = 0.0;
    let mut ordered = true;
    for tier in tiers {
        probe.rarity = Some(tier);
        let rate = healing_success_rate(&probe, CharacterStatus::Sick);
        ordered &= rate >= last;
        last = rate;
    }
    results.push(TestResult {
        name: "heal_rarity_ordering".into(),
        passed: ordered,
        detail: "Common → Legendary non-decreasing".into(),
    });

    // Failed cure still uses the item
    let mut consumed_ok = true;
    for item in &medical {
        let mut inv = Inventory::default();
        if inv.add_item(item, 1).is_err() {
            consumed_ok = false;
            continue;
        }
        let mut sheet = CharacterSheet::new("Harness", AbilityScores::default());
        sheet.status = CharacterStatus::Poisoned;
        let out = attempt_status_healing(item, 0, &sheet, &inv, &mut ScriptedDice::always_draw(0.99));
        consumed_ok &= out.result == HealingResult::Failed
            && out.consumed()
            && out.inventory.count(&item.id) == 0
            && out.sheet.status == CharacterStatus::Poisoned;
    }
    results.push(TestResult {
        name: "heal_failure_consumes".into(),
        passed: consumed_ok,
        detail: "item used even when the cure fails".into(),
    });

    // Healthy characters keep their items
    let mut untouched = true;
    for item in &medical {
        let mut inv = Inventory::default();
        if inv.add_item(item, 1).is_err() {
            untouched = false;
            continue;
        }
        let sheet = CharacterSheet::new("Harness", AbilityScores::default());
        let out = attempt_status_healing(item, 0, &sheet, &inv, &mut ScriptedDice::always_draw(0.0));
        untouched &= !out.consumed() && out.inventory == inv;
    }
    results.push(TestResult {
        name: "heal_nothing_to_cure".into(),
        passed: untouched,
        detail: "Normal status never consumes".into(),
    });

    results
}

// ── 8. Progression ──────────────────────────────────────────────────────

fn validate_progression(verbose: bool) -> Vec<TestResult> {
    println!("--- Progression ---");
    let mut results = Vec::new();
    let config = ProgressionConfig::default();

    let curve: Vec<u32> = (1..config.max_level)
        .map(|l| progression::xp_for_next_level(l, &config))
        .collect();
    if verbose {
        println!("    xp curve: {:?}", curve);
    }
    results.push(TestResult {
        name: "xp_curve_increasing".into(),
        passed: curve.windows(2).all(|w| w[1] > w[0]) && curve[0] == 100,
        detail: format!("level 1→2 needs {}, 19→20 needs {}", curve[0], curve[curve.len() - 1]),
    });

    // Grind to the cap
    let mut sheet = CharacterSheet::new("Harness", AbilityScores::default());
    let mut guard = 0;
    while sheet.level < config.max_level && guard < 10_000 {
        sheet = progression::gain_experience(&sheet, 250, &config).0;
        while let Some(up) = progression::level_up(&sheet, &config) {
            sheet = up.sheet;
        }
        guard += 1;
    }
    let (capped, _) = progression::gain_experience(&sheet, 1_000_000, &config);
    results.push(TestResult {
        name: "xp_max_level_cap".into(),
        passed: sheet.level == config.max_level
            && progression::level_up(&capped, &config).is_none(),
        detail: format!("reached level {} in {} grants", sheet.level, guard),
    });

    results
}
