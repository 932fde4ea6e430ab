//! Item reference data and the id-keyed catalog.
//!
//! Items are immutable content records. Parsing them out of JSON is the
//! content layer's job; this module only defines the shape (with serde
//! derives matching the content files) and lookups.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Item rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    /// Any tier name the rules do not recognise.
    #[serde(other)]
    Unknown,
}

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
    Potion,
    Material,
    Tool,
    Quest,
    Ammo,
    Manual,
    #[serde(other)]
    Other,
}

/// One item definition from the content files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub rarity: Option<Rarity>,
    /// Healing / nourishment strength, item-dependent.
    #[serde(default)]
    pub effect_value: Option<u32>,
    #[serde(default)]
    pub stackable: bool,
    /// Per-slot cap for stackable items. `None` means the inventory default.
    #[serde(default)]
    pub max_stack: Option<u32>,
    #[serde(default)]
    pub portions_per_unit: Option<u32>,
    /// Effect of a single portion.
    #[serde(default)]
    pub portion_effect: Option<u32>,
    /// Human label for one portion ("sorso", "morso", …).
    #[serde(default)]
    pub portion_size: Option<String>,
    #[serde(default)]
    pub weight: f32,
}

impl Item {
    /// Minimal item with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            rarity: None,
            effect_value: None,
            stackable: false,
            max_stack: None,
            portions_per_unit: None,
            portion_effect: None,
            portion_size: None,
            weight: 0.0,
        }
    }

    /// Whether consumption goes portion by portion rather than unit by unit.
    pub fn is_portioned(&self) -> bool {
        matches!(self.portions_per_unit, Some(p) if p > 0)
            && self.portion_effect.is_some()
            && matches!(self.kind, ItemKind::Consumable | ItemKind::Potion)
    }

    pub fn effect(&self) -> u32 {
        self.effect_value.unwrap_or(0)
    }
}

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records share an id.
    DuplicateId(String),
    /// A record has an empty id.
    EmptyId,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "duplicate id '{}'", id),
            CatalogError::EmptyId => write!(f, "record with empty id"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Items keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
}

impl ItemCatalog {
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for item in items {
            if item.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if map.contains_key(&item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            map.insert(item.id.clone(), item);
        }
        Ok(Self { items: map })
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Display name for `id`, falling back to the raw id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.items.get(id).map_or(id, |item| item.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
