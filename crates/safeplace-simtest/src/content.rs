//! Content loading and integrity checks for `data/items.json` and
//! `data/recipes.json`.

use std::collections::HashSet;
use std::fmt;

use safeplace_logic::crafting::{Recipe, RecipeBook};
use safeplace_logic::items::{CatalogError, Item, ItemCatalog, ItemKind};

pub const ITEMS_JSON: &str = include_str!("../../../data/items.json");
pub const RECIPES_JSON: &str = include_str!("../../../data/recipes.json");

/// Highest DC a recipe may declare.
pub const MAX_RECIPE_DC: i32 = 30;

#[derive(Debug)]
pub enum ContentError {
    Parse {
        file: &'static str,
        source: serde_json::Error,
    },
    Catalog {
        file: &'static str,
        source: CatalogError,
    },
    UnknownItem {
        recipe: String,
        item: String,
    },
    ZeroQuantity {
        recipe: String,
        item: String,
    },
    EmptyRecipe(String),
    DcOutOfRange {
        recipe: String,
        dc: i32,
    },
    /// Portion fields on something that cannot be portioned, or a
    /// portioned item with no per-portion effect.
    BadPortions(String),
    BadStack(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Parse { file, source } => write!(f, "{}: {}", file, source),
            ContentError::Catalog { file, source } => write!(f, "{}: {}", file, source),
            ContentError::UnknownItem { recipe, item } => {
                write!(f, "recipe '{}' references unknown item '{}'", recipe, item)
            }
            ContentError::ZeroQuantity { recipe, item } => {
                write!(f, "recipe '{}' has zero quantity for '{}'", recipe, item)
            }
            ContentError::EmptyRecipe(id) => {
                write!(f, "recipe '{}' has no ingredients or no results", id)
            }
            ContentError::DcOutOfRange { recipe, dc } => {
                write!(f, "recipe '{}' has DC {} outside 1..={}", recipe, dc, MAX_RECIPE_DC)
            }
            ContentError::BadPortions(id) => write!(f, "item '{}' has invalid portion data", id),
            ContentError::BadStack(id) => write!(f, "item '{}' has invalid stack settings", id),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Parse { source, .. } => Some(source),
            ContentError::Catalog { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parsed and indexed content.
pub struct Content {
    pub items: ItemCatalog,
    pub recipes: RecipeBook,
}

pub fn load() -> Result<Content, ContentError> {
    let items: Vec<Item> = serde_json::from_str(ITEMS_JSON).map_err(|source| ContentError::Parse {
        file: "items.json",
        source,
    })?;
    let recipes: Vec<Recipe> =
        serde_json::from_str(RECIPES_JSON).map_err(|source| ContentError::Parse {
            file: "recipes.json",
            source,
        })?;

    let items = ItemCatalog::from_items(items).map_err(|source| ContentError::Catalog {
        file: "items.json",
        source,
    })?;
    let recipes = RecipeBook::from_recipes(recipes).map_err(|source| ContentError::Catalog {
        file: "recipes.json",
        source,
    })?;

    log::debug!("loaded {} items, {} recipes", items.len(), recipes.len());
    Ok(Content { items, recipes })
}

/// Item records that break stacking or portion rules.
pub fn check_items(items: &ItemCatalog) -> Vec<ContentError> {
    let mut errors = Vec::new();
    for item in items.iter() {
        if item.max_stack == Some(0) || (!item.stackable && item.max_stack.is_some_and(|m| m > 1))
        {
            errors.push(ContentError::BadStack(item.id.clone()));
        }

        let has_portion_data = item.portions_per_unit.is_some() || item.portion_effect.is_some();
        if has_portion_data {
            let edible = matches!(item.kind, ItemKind::Consumable | ItemKind::Potion);
            if !edible || !item.is_portioned() {
                errors.push(ContentError::BadPortions(item.id.clone()));
            }
        }
    }
    errors
}

/// Recipe records that reference missing items or carry bad numbers.
pub fn check_recipes(recipes: &RecipeBook, items: &ItemCatalog) -> Vec<ContentError> {
    let mut errors = Vec::new();
    for recipe in recipes.iter() {
        if recipe.ingredients.is_empty() || recipe.results.is_empty() {
            errors.push(ContentError::EmptyRecipe(recipe.id.clone()));
        }

        let mut seen = HashSet::new();
        for stack in recipe.ingredients.iter().chain(&recipe.results) {
            if !items.contains(&stack.item_id) && seen.insert(stack.item_id.as_str()) {
                errors.push(ContentError::UnknownItem {
                    recipe: recipe.id.clone(),
                    item: stack.item_id.clone(),
                });
            }
            if stack.quantity == 0 {
                errors.push(ContentError::ZeroQuantity {
                    recipe: recipe.id.clone(),
                    item: stack.item_id.clone(),
                });
            }
        }

        if let Some(dc) = recipe.dc {
            if !(1..=MAX_RECIPE_DC).contains(&dc) {
                errors.push(ContentError::DcOutOfRange {
                    recipe: recipe.id.clone(),
                    dc,
                });
            }
        }
    }
    errors
}
