//! Game domain types
//!
//! Characters, their combat affinities and role paths. The search engine
//! only ever reads these; mutation happens in the planner's assignment state.

pub mod roster;

pub use roster::{Roster, RosterError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character id of Silverwolf, the one character that widens a node's
/// required-affinity list with the affinities of her own team.
pub const SILVERWOLF_ID: &str = "silverwolf";

/// Elemental combat affinity of a character, and of a node's requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affinity {
    Physical,
    Fire,
    Ice,
    Lightning,
    Wind,
    Quantum,
    Imaginary,
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Affinity::Physical => "physical",
            Affinity::Fire => "fire",
            Affinity::Ice => "ice",
            Affinity::Lightning => "lightning",
            Affinity::Wind => "wind",
            Affinity::Quantum => "quantum",
            Affinity::Imaginary => "imaginary",
        };
        f.write_str(name)
    }
}

/// Error parsing an affinity name from the command line
#[derive(Debug, thiserror::Error)]
#[error("unknown affinity: {0}")]
pub struct ParseAffinityError(String);

impl FromStr for Affinity {
    type Err = ParseAffinityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Ok(Affinity::Physical),
            "fire" => Ok(Affinity::Fire),
            "ice" => Ok(Affinity::Ice),
            "lightning" => Ok(Affinity::Lightning),
            "wind" => Ok(Affinity::Wind),
            "quantum" => Ok(Affinity::Quantum),
            "imaginary" => Ok(Affinity::Imaginary),
            other => Err(ParseAffinityError(other.to_string())),
        }
    }
}

/// Role path of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Path {
    Destruction,
    Hunt,
    Erudition,
    Preservation,
    Abundance,
    Harmony,
    Nihility,
}

/// Scoring role a path maps to; every path belongs to exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Attacker,
    Survivor,
    Support,
}

impl Path {
    /// Scoring role of this path
    pub fn role(&self) -> Role {
        match self {
            Path::Destruction | Path::Hunt | Path::Erudition => Role::Attacker,
            Path::Preservation | Path::Abundance => Role::Survivor,
            Path::Harmony | Path::Nihility => Role::Support,
        }
    }
}

/// An immutable playable character from the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Combat affinity
    pub affinity: Affinity,
    /// Role path
    pub path: Path,
}

impl Character {
    pub fn new(id: &str, name: &str, affinity: Affinity, path: Path) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            affinity,
            path,
        }
    }

    /// Whether this character fills an attacker slot
    pub fn is_attacker(&self) -> bool {
        self.path.role() == Role::Attacker
    }

    /// Whether this character fills a survivor slot
    pub fn is_survivor(&self) -> bool {
        self.path.role() == Role::Survivor
    }

    /// Whether this character fills a support slot
    pub fn is_support(&self) -> bool {
        self.path.role() == Role::Support
    }

    /// Whether this character is Silverwolf
    pub fn is_silverwolf(&self) -> bool {
        self.id == SILVERWOLF_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinity_from_str() {
        assert_eq!("fire".parse::<Affinity>().unwrap(), Affinity::Fire);
        assert_eq!("Quantum".parse::<Affinity>().unwrap(), Affinity::Quantum);
        assert_eq!(" ice ".parse::<Affinity>().unwrap(), Affinity::Ice);
        assert!("earth".parse::<Affinity>().is_err());
    }

    #[test]
    fn test_affinity_display_roundtrip() {
        let all = [
            Affinity::Physical,
            Affinity::Fire,
            Affinity::Ice,
            Affinity::Lightning,
            Affinity::Wind,
            Affinity::Quantum,
            Affinity::Imaginary,
        ];
        for affinity in all {
            assert_eq!(affinity.to_string().parse::<Affinity>().unwrap(), affinity);
        }
    }

    #[test]
    fn test_path_roles_are_disjoint() {
        assert_eq!(Path::Destruction.role(), Role::Attacker);
        assert_eq!(Path::Hunt.role(), Role::Attacker);
        assert_eq!(Path::Erudition.role(), Role::Attacker);
        assert_eq!(Path::Preservation.role(), Role::Survivor);
        assert_eq!(Path::Abundance.role(), Role::Survivor);
        assert_eq!(Path::Harmony.role(), Role::Support);
        assert_eq!(Path::Nihility.role(), Role::Support);
    }

    #[test]
    fn test_character_role_predicates() {
        let seele = Character::new("seele", "Seele", Affinity::Quantum, Path::Hunt);
        assert!(seele.is_attacker());
        assert!(!seele.is_survivor());
        assert!(!seele.is_support());
        assert!(!seele.is_silverwolf());

        let silverwolf =
            Character::new(SILVERWOLF_ID, "Silver Wolf", Affinity::Quantum, Path::Nihility);
        assert!(silverwolf.is_support());
        assert!(silverwolf.is_silverwolf());
    }
}
