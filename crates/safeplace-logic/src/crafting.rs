//! Recipes and the crafting resolver.
//!
//! A craft attempt runs through fixed stages and stops at the first one
//! that fails:
//!
//! 1. **Lookup**: the recipe id must exist.
//! 2. **Materials**: the inventory must cover every ingredient. Lines
//!    naming the same item add up.
//! 3. **Space**: the results must fit once the ingredients are gone.
//! 4. **Skill check**: only when the recipe declares a skill and a
//!    positive DC. Failure wastes `ceil(50%)` of every ingredient line.
//! 5. **Consume** the full ingredient quantities.
//! 6. **Grant** every result line, one journal entry each.
//!
//! The resolver never mutates its inputs. It returns a [`CraftOutcome`]
//! holding the new inventory, the journal entries and the sound cue; the
//! caller commits them.

use serde::{Deserialize, Serialize};

use crate::character::CharacterSheet;
use crate::constants::crafting::FAILURE_LOSS_PERCENT;
use crate::dice::RandomSource;
use crate::inventory::{Inventory, ItemStack};
use crate::items::{CatalogError, Item, ItemCatalog, ItemKind};
use crate::journal::{JournalEntry, JournalKind, SoundCue};
use crate::skills::{skill_check, CheckResult, Skill};

/// One crafting recipe from the content files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<ItemStack>,
    pub results: Vec<ItemStack>,
    #[serde(default)]
    pub skill: Option<Skill>,
    #[serde(default)]
    pub dc: Option<i32>,
    /// Minutes the attempt takes.
    #[serde(default)]
    pub time_cost: u32,
}

impl Recipe {
    /// The check this recipe demands, if any. A zero or negative DC means
    /// no check.
    pub fn required_check(&self) -> Option<(Skill, i32)> {
        match (self.skill, self.dc) {
            (Some(skill), Some(dc)) if dc > 0 => Some((skill, dc)),
            _ => None,
        }
    }
}

/// Recipes keyed by id, in content order.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Result<Self, CatalogError> {
        let mut book: Vec<Recipe> = Vec::new();
        for recipe in recipes {
            if recipe.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if book.iter().any(|r| r.id == recipe.id) {
                return Err(CatalogError::DuplicateId(recipe.id));
            }
            book.push(recipe);
        }
        Ok(Self { recipes: book })
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Crafting XP rewards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftingConfig {
    pub base_xp_per_craft: u32,
    /// XP per ingredient line.
    pub complexity_xp_multiplier: f64,
    /// Flat bonus when the recipe needs a skill check.
    pub skill_xp_bonus: u32,
    /// XP per unit produced.
    pub quantity_xp_factor: f64,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            base_xp_per_craft: 15,
            complexity_xp_multiplier: 2.0,
            skill_xp_bonus: 5,
            quantity_xp_factor: 0.5,
        }
    }
}

/// XP awarded for a successful craft.
pub fn crafting_xp(recipe: &Recipe, config: &CraftingConfig) -> u32 {
    let complexity = (recipe.ingredients.len() as f64 * config.complexity_xp_multiplier).floor() as u32;
    let skill = if recipe.required_check().is_some() {
        config.skill_xp_bonus
    } else {
        0
    };
    let produced: u32 = recipe.results.iter().map(|r| r.quantity).sum();
    let quantity = (f64::from(produced) * config.quantity_xp_factor).floor() as u32;
    config.base_xp_per_craft + complexity + skill + quantity
}

/// Units of an ingredient line lost to a failed check.
pub fn failure_loss(quantity: u32) -> u32 {
    let lost = (u64::from(quantity) * u64::from(FAILURE_LOSS_PERCENT)).div_ceil(100);
    u32::try_from(lost).unwrap_or(quantity)
}

/// Why a craft attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraftFailure {
    UnknownRecipe,
    MissingMaterials,
    InventoryFull,
    SkillCheckFailed,
}

/// Everything a craft attempt produced.
#[derive(Debug, Clone)]
pub struct CraftOutcome {
    /// Inventory after the attempt (identical to the input on early
    /// failures).
    pub inventory: Inventory,
    pub journal: Vec<JournalEntry>,
    pub sound: Option<SoundCue>,
    pub failure: Option<CraftFailure>,
    pub check: Option<CheckResult>,
    /// Result stacks granted; feed these to quest-progress checks.
    pub crafted: Vec<ItemStack>,
    /// Ingredients lost to a failed check.
    pub wasted: Vec<ItemStack>,
    pub xp_gained: u32,
    /// Minutes spent. Zero when the attempt never started.
    pub minutes_spent: u32,
}

impl CraftOutcome {
    fn failed(inventory: &Inventory, failure: CraftFailure) -> Self {
        Self {
            inventory: inventory.clone(),
            journal: Vec::new(),
            sound: None,
            failure: Some(failure),
            check: None,
            crafted: Vec::new(),
            wasted: Vec::new(),
            xp_gained: 0,
            minutes_spent: 0,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Recipe + item content bundled with the XP rules.
#[derive(Debug, Clone)]
pub struct Workbench<'a> {
    pub recipes: &'a RecipeBook,
    pub items: &'a ItemCatalog,
    pub config: CraftingConfig,
}

impl<'a> Workbench<'a> {
    pub fn new(recipes: &'a RecipeBook, items: &'a ItemCatalog) -> Self {
        Self {
            recipes,
            items,
            config: CraftingConfig::default(),
        }
    }

    /// Whether the inventory covers every ingredient line of `recipe_id`.
    pub fn can_craft(&self, recipe_id: &str, inventory: &Inventory) -> bool {
        self.recipes
            .get(recipe_id)
            .is_some_and(|recipe| has_materials(recipe, inventory))
    }

    /// Recipes the character knows, in content order.
    pub fn known_recipes(&self, sheet: &CharacterSheet) -> Vec<&'a Recipe> {
        self.recipes
            .iter()
            .filter(|r| sheet.knows_recipe(&r.id))
            .collect()
    }

    /// Teach a recipe. `None` if the id is unknown or already learned.
    pub fn unlock_recipe(
        &self,
        sheet: &CharacterSheet,
        recipe_id: &str,
    ) -> Option<(CharacterSheet, JournalEntry)> {
        let recipe = self.recipes.get(recipe_id)?;
        if sheet.knows_recipe(recipe_id) {
            return None;
        }
        let mut next = sheet.clone();
        next.known_recipes.push(recipe.id.clone());
        let entry = JournalEntry::new(
            JournalKind::Discovery,
            format!("Nuova ricetta sbloccata: {}", recipe.name),
        )
        .with("recipe", &recipe.id);
        Some((next, entry))
    }

    fn item_or_placeholder(&self, item_id: &str) -> Item {
        match self.items.get(item_id) {
            Some(item) => item.clone(),
            None => {
                log::warn!("crafting: result item '{}' missing from catalog", item_id);
                Item::new(item_id, item_id, ItemKind::Other)
            }
        }
    }

    /// Attempt to craft `recipe_id`.
    pub fn craft<D: RandomSource + ?Sized>(
        &self,
        recipe_id: &str,
        sheet: &CharacterSheet,
        inventory: &Inventory,
        dice: &mut D,
    ) -> CraftOutcome {
        // 1. Lookup
        let Some(recipe) = self.recipes.get(recipe_id) else {
            log::error!("crafting: recipe '{}' not found", recipe_id);
            return CraftOutcome::failed(inventory, CraftFailure::UnknownRecipe);
        };

        // 2. Materials
        if !has_materials(recipe, inventory) {
            log::info!("crafting: not enough materials for '{}'", recipe.id);
            let mut out = CraftOutcome::failed(inventory, CraftFailure::MissingMaterials);
            out.journal.push(JournalEntry::new(
                JournalKind::SystemWarning,
                "Non hai abbastanza materiali per creare questo oggetto.",
            ));
            out.sound = Some(SoundCue::Error);
            return out;
        }

        // 3. Space: consume + grant on a scratch copy.
        let mut after = inventory.clone();
        for (item_id, quantity) in required_materials(recipe) {
            if after.remove_item(item_id, quantity) < quantity {
                log::error!("crafting: '{}' came up short on '{}'", recipe.id, item_id);
                return CraftOutcome::failed(inventory, CraftFailure::MissingMaterials);
            }
        }
        for res in &recipe.results {
            let item = self.item_or_placeholder(&res.item_id);
            if after.add_item(&item, res.quantity).is_err() {
                log::info!("crafting: no room for '{}' from '{}'", res.item_id, recipe.id);
                let mut out = CraftOutcome::failed(inventory, CraftFailure::InventoryFull);
                out.journal.push(
                    JournalEntry::new(
                        JournalKind::InventoryFull,
                        format!(
                            "Inventario pieno: non c'è spazio per {}.",
                            self.items.display_name(&res.item_id)
                        ),
                    )
                    .with("item", &res.item_id),
                );
                out.sound = Some(SoundCue::Error);
                return out;
            }
        }

        // 4. Skill check
        let mut check = None;
        if let Some((skill, dc)) = recipe.required_check() {
            let result = skill_check(&sheet.stats, skill, dc, dice);
            check = Some(result);
            if !result.success {
                let mut wasted_inv = inventory.clone();
                let wasted: Vec<ItemStack> = recipe
                    .ingredients
                    .iter()
                    .map(|ing| {
                        let lost = wasted_inv.remove_item(&ing.item_id, failure_loss(ing.quantity));
                        ItemStack::new(ing.item_id.clone(), lost)
                    })
                    .collect();
                log::info!(
                    "crafting: '{}' failed check ({} vs DC {})",
                    recipe.id,
                    result.total,
                    dc
                );

                let mut out = CraftOutcome::failed(&wasted_inv, CraftFailure::SkillCheckFailed);
                out.journal.push(
                    JournalEntry::new(
                        JournalKind::SkillCheckFailure,
                        "[FALLIMENTO] Creazione fallita. Hai sprecato alcuni materiali.",
                    )
                    .with("roll", result.roll)
                    .with("total", result.total)
                    .with("dc", dc),
                );
                out.sound = Some(SoundCue::CraftFail);
                out.check = check;
                out.wasted = wasted;
                out.minutes_spent = recipe.time_cost;
                return out;
            }
        }

        // 5 + 6. Consume and grant: `after` already holds both.
        let journal = recipe
            .results
            .iter()
            .map(|res| {
                JournalEntry::new(
                    JournalKind::ItemAcquired,
                    format!(
                        "Hai creato: {} x{}",
                        self.items.display_name(&res.item_id),
                        res.quantity
                    ),
                )
                .with("item", &res.item_id)
                .with("quantity", res.quantity)
            })
            .collect();

        let xp_gained = crafting_xp(recipe, &self.config);
        log::debug!("crafting: '{}' succeeded, +{} XP", recipe.id, xp_gained);

        CraftOutcome {
            inventory: after,
            journal,
            sound: Some(SoundCue::CraftSuccess),
            failure: None,
            check,
            crafted: recipe.results.clone(),
            wasted: Vec::new(),
            xp_gained,
            minutes_spent: recipe.time_cost,
        }
    }
}

/// Ingredient totals per item id, in first-seen order. Lines naming the
/// same item add up.
fn required_materials(recipe: &Recipe) -> Vec<(&str, u32)> {
    let mut totals: Vec<(&str, u32)> = Vec::new();
    for ing in &recipe.ingredients {
        match totals.iter_mut().find(|(id, _)| *id == ing.item_id) {
            Some((_, total)) => *total = total.saturating_add(ing.quantity),
            None => totals.push((ing.item_id.as_str(), ing.quantity)),
        }
    }
    totals
}

fn has_materials(recipe: &Recipe, inventory: &Inventory) -> bool {
    required_materials(recipe)
        .into_iter()
        .all(|(item_id, quantity)| inventory.has(item_id, quantity))
}
