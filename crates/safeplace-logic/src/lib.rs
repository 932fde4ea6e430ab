//! Pure survival and progression rules for The Safe Place.
//!
//! This crate holds the game rules that are independent of rendering,
//! content loading and persistence. Resolvers take a snapshot of the state
//! they need, plus a [`dice::RandomSource`] where chance is involved, and
//! return a new snapshot with the journal entries and sound cue describing
//! what happened. The caller commits the result.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`character`] | Character sheet, status, HP/AC/carry derivation |
//! | [`constants`] | Fixed survival, penalty, crafting and healing balance numbers |
//! | [`crafting`] | Recipes, the crafting resolver, crafting XP and recipe unlocks |
//! | [`dice`] | Random source trait and scripted dice for deterministic runs |
//! | [`healing`] | Status-cure probability and the healing resolver |
//! | [`inventory`] | Fixed-slot inventory, stacking and portion consumption |
//! | [`items`] | Item definitions and the read-only item catalog |
//! | [`journal`] | Typed journal entries, sound cues and their sinks |
//! | [`progression`] | XP curve, experience gain and level-up |
//! | [`skills`] | Abilities, skills and the d20 check |
//! | [`survival`] | Rest and night consumption, status bands, starvation penalties |
//! | [`time`] | In-game clock and time advancement |

pub mod character;
pub mod constants;
pub mod crafting;
pub mod dice;
pub mod healing;
pub mod inventory;
pub mod items;
pub mod journal;
pub mod progression;
pub mod skills;
pub mod survival;
pub mod time;
