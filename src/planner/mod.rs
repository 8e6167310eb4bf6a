//! Team assignment planner
//!
//! Computes, for a mission made of several combat nodes with per-node
//! required affinities, the best partition of the player's configured team
//! modules across the nodes. Layered as data (this file + `assignment`),
//! scoring (`scoring`) and branch-and-bound search (`search`).

pub mod assignment;
pub mod scoring;
pub mod search;

pub use assignment::{MissionTeam, NodeTeam, NODE_CAPACITY};
pub use scoring::{MissionScore, NodeScore};
pub use search::{search_best_assignment, search_best_team, SearchConfig};

use serde::{Deserialize, Serialize};

use crate::domain::{Character, Roster, RosterError};

/// A named, user-configured group of 1-4 character ids.
///
/// This is the shape stored in the config file; resolve it against a
/// [`Roster`] to obtain a [`ModuleProfile`] the search can use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamModule {
    /// Display name of the module
    pub name: String,
    /// Member character ids, no duplicates
    pub character_ids: Vec<String>,
}

impl TeamModule {
    pub fn new(name: &str, character_ids: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            character_ids: character_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Module category for phase ordering during the search.
///
/// Nodes accept modules in non-decreasing category order: attackers and
/// Silverwolf decide the attack tier of a node's score, survivors the
/// survival tier, everything else only the support/affinity tiers.
fn category_of(characters: &[Character]) -> u8 {
    let has_attacker = characters.iter().any(Character::is_attacker);
    let has_silverwolf = characters.iter().any(Character::is_silverwolf);
    let has_survivor = characters.iter().any(Character::is_survivor);
    if has_attacker {
        0
    } else if has_silverwolf {
        1
    } else if has_survivor {
        2
    } else {
        3
    }
}

/// A team module resolved against a roster, ready for the search
#[derive(Debug, Clone)]
pub struct ModuleProfile {
    /// Display name of the module
    pub name: String,
    /// Resolved member characters, in configured order
    pub characters: Vec<Character>,
    /// Phase category stamped on any node this module joins
    pub category: u8,
}

impl ModuleProfile {
    /// Resolve a configured module against the roster, validating the
    /// well-formedness preconditions (known ids, no duplicates, at most one
    /// node's worth of characters).
    pub fn resolve(module: &TeamModule, roster: &Roster) -> Result<Self, RosterError> {
        if module.character_ids.is_empty() {
            return Err(RosterError::EmptyModule {
                module: module.name.clone(),
            });
        }
        if module.character_ids.len() > NODE_CAPACITY {
            return Err(RosterError::OversizedModule {
                module: module.name.clone(),
                count: module.character_ids.len(),
                max: NODE_CAPACITY,
            });
        }

        let mut characters = Vec::with_capacity(module.character_ids.len());
        for id in &module.character_ids {
            if module.character_ids.iter().filter(|other| *other == id).count() > 1 {
                return Err(RosterError::DuplicateCharacter {
                    module: module.name.clone(),
                    id: id.clone(),
                });
            }
            let character = roster.get(id).ok_or_else(|| RosterError::UnknownCharacter {
                module: module.name.clone(),
                id: id.clone(),
            })?;
            characters.push(character.clone());
        }

        let category = category_of(&characters);
        Ok(Self {
            name: module.name.clone(),
            characters,
            category,
        })
    }

    /// Resolve a whole configured module list in order
    pub fn resolve_all(
        modules: &[TeamModule],
        roster: &Roster,
    ) -> Result<Vec<Self>, RosterError> {
        modules.iter().map(|m| Self::resolve(m, roster)).collect()
    }

    /// Number of member characters
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
