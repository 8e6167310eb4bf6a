//! Character registry
//!
//! Read-only lookup of characters by id. The roster is passed explicitly to
//! whatever needs it; nothing in the crate holds it as global state.

use std::collections::HashMap;

use super::{Affinity, Character, Path, SILVERWOLF_ID};

/// Error resolving a configured team module against the roster
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("module '{module}' references unknown character id '{id}'")]
    UnknownCharacter { module: String, id: String },
    #[error("module '{module}' lists character id '{id}' more than once")]
    DuplicateCharacter { module: String, id: String },
    #[error("module '{module}' has {count} characters, a node holds at most {max}")]
    OversizedModule {
        module: String,
        count: usize,
        max: usize,
    },
    #[error("module '{module}' has no characters")]
    EmptyModule { module: String },
}

/// Read-only character registry
#[derive(Debug, Clone)]
pub struct Roster {
    by_id: HashMap<String, Character>,
}

impl Roster {
    /// Build a roster from a list of characters; later entries with the same
    /// id replace earlier ones.
    pub fn new(characters: Vec<Character>) -> Self {
        let by_id = characters
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Self { by_id }
    }

    /// Look up a character by id
    pub fn get(&self, id: &str) -> Option<&Character> {
        self.by_id.get(id)
    }

    /// Number of characters in the registry
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// The built-in reference roster
    pub fn builtin() -> Self {
        use Affinity::*;
        use Path::*;

        let characters = vec![
            Character::new(SILVERWOLF_ID, "Silver Wolf", Quantum, Nihility),
            Character::new("seele", "Seele", Quantum, Hunt),
            Character::new("danheng", "Dan Heng", Wind, Hunt),
            Character::new("yanqing", "Yanqing", Ice, Hunt),
            Character::new("sushang", "Sushang", Physical, Hunt),
            Character::new("clara", "Clara", Physical, Destruction),
            Character::new("hook", "Hook", Fire, Destruction),
            Character::new("arlan", "Arlan", Lightning, Destruction),
            Character::new("blade", "Blade", Wind, Destruction),
            Character::new("imbibitorlunae", "Imbibitor Lunae", Imaginary, Destruction),
            Character::new("himeko", "Himeko", Fire, Erudition),
            Character::new("herta", "Herta", Ice, Erudition),
            Character::new("serval", "Serval", Lightning, Erudition),
            Character::new("qingque", "Qingque", Quantum, Erudition),
            Character::new("jingyuan", "Jing Yuan", Lightning, Erudition),
            Character::new("gepard", "Gepard", Ice, Preservation),
            Character::new("march7th", "March 7th", Ice, Preservation),
            Character::new("fuxuan", "Fu Xuan", Quantum, Preservation),
            Character::new("bailu", "Bailu", Lightning, Abundance),
            Character::new("natasha", "Natasha", Physical, Abundance),
            Character::new("luocha", "Luocha", Imaginary, Abundance),
            Character::new("lynx", "Lynx", Quantum, Abundance),
            Character::new("bronya", "Bronya", Wind, Harmony),
            Character::new("tingyun", "Tingyun", Lightning, Harmony),
            Character::new("asta", "Asta", Fire, Harmony),
            Character::new("yukong", "Yukong", Imaginary, Harmony),
            Character::new("pela", "Pela", Ice, Nihility),
            Character::new("welt", "Welt", Imaginary, Nihility),
            Character::new("kafka", "Kafka", Lightning, Nihility),
            Character::new("sampo", "Sampo", Wind, Nihility),
            Character::new("luka", "Luka", Physical, Nihility),
        ];
        Self::new(characters)
    }
}
