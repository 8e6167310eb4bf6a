//! Mutable assignment state for the search
//!
//! A [`MissionTeam`] is the single in-progress candidate the search mutates
//! in place with add/pop pairs; snapshots of the best candidate are taken by
//! cloning, so the retained best never aliases live search state.

use crate::domain::Character;

use super::ModuleProfile;

/// Maximum characters a single node can field
pub const NODE_CAPACITY: usize = 4;

/// One module's assignment to a node: its name plus the member ids it
/// brought, so popping matches the exact module even when names collide.
#[derive(Debug, Clone)]
struct AssignedModule {
    name: String,
    member_ids: Vec<String>,
}

/// Modules and characters currently assigned to one combat node
#[derive(Debug, Clone, Default)]
pub struct NodeTeam {
    /// Assigned modules, in assignment order
    modules: Vec<AssignedModule>,
    /// Occupying characters, in assignment order
    characters: Vec<Character>,
    /// Latest module category committed to this node (0-3); modules may only
    /// arrive in non-decreasing category order
    pub phase: u8,
}

impl NodeTeam {
    /// Characters currently occupying the node
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Names of the modules assigned to the node, in assignment order
    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name.clone()).collect()
    }

    /// Number of occupying characters
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Whether any of the given characters already occupies this node
    fn contains_any(&self, incoming: &[Character]) -> bool {
        incoming
            .iter()
            .any(|c| self.characters.iter().any(|held| held.id == c.id))
    }

    fn push_module(&mut self, module: &ModuleProfile) {
        self.modules.push(AssignedModule {
            name: module.name.clone(),
            member_ids: module.characters.iter().map(|c| c.id.clone()).collect(),
        });
        self.characters.extend(module.characters.iter().cloned());
    }

    fn pop_module(&mut self, module: &ModuleProfile) {
        let pos = self.modules.iter().rposition(|assigned| {
            assigned.name == module.name
                && assigned.member_ids.len() == module.len()
                && module
                    .characters
                    .iter()
                    .all(|c| assigned.member_ids.contains(&c.id))
        });
        if let Some(pos) = pos {
            self.modules.remove(pos);
        }
        self.characters
            .retain(|held| !module.characters.iter().any(|c| c.id == held.id));
    }
}

/// The full candidate solution: one [`NodeTeam`] per combat node
#[derive(Debug, Clone)]
pub struct MissionTeam {
    nodes: Vec<NodeTeam>,
}

impl MissionTeam {
    /// Create an empty assignment for `node_count` nodes (all phases 0)
    pub fn new(node_count: usize) -> Self {
        Self {
            nodes: vec![NodeTeam::default(); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, idx: usize) -> &NodeTeam {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut NodeTeam {
        &mut self.nodes[idx]
    }

    /// Whether any of the given characters is already placed in any node
    pub fn contains_any(&self, incoming: &[Character]) -> bool {
        self.nodes.iter().any(|node| node.contains_any(incoming))
    }

    /// Try to assign a module to a node.
    ///
    /// Rejected (returns `false`, state unchanged) when the node would exceed
    /// its capacity or when any member already occupies a node anywhere in
    /// the mission. Rejection is a normal search outcome, not an error.
    pub fn add_to_node(&mut self, node_idx: usize, module: &ModuleProfile) -> bool {
        if self.nodes[node_idx].character_count() + module.len() > NODE_CAPACITY {
            return false;
        }
        if self.contains_any(&module.characters) {
            return false;
        }
        self.nodes[node_idx].push_module(module);
        true
    }

    /// Remove a previously added module from a node
    pub fn pop_from_node(&mut self, node_idx: usize, module: &ModuleProfile) {
        self.nodes[node_idx].pop_module(module);
    }

    /// A mission team is valid once every node has at least one character
    pub fn is_valid(&self) -> bool {
        self.nodes.iter().all(|node| !node.is_empty())
    }

    /// Total characters placed across all nodes
    pub fn character_count(&self) -> usize {
        self.nodes.iter().map(NodeTeam::character_count).sum()
    }

    /// Per-node character ids, in assignment order
    pub fn character_ids(&self) -> Vec<Vec<String>> {
        self.nodes
            .iter()
            .map(|node| node.characters.iter().map(|c| c.id.clone()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Roster;
    use crate::planner::TeamModule;

    fn profile(roster: &Roster, name: &str, ids: &[&str]) -> ModuleProfile {
        ModuleProfile::resolve(&TeamModule::new(name, ids), roster).unwrap()
    }

    #[test]
    fn test_capacity_boundary() {
        let roster = Roster::builtin();
        let mut team = MissionTeam::new(1);

        // 2 + 2 == 4 accepted
        let first = profile(&roster, "a", &["seele", "bronya"]);
        let second = profile(&roster, "b", &["gepard", "pela"]);
        assert!(team.add_to_node(0, &first));
        assert!(team.add_to_node(0, &second));
        assert_eq!(team.node(0).character_count(), 4);

        // 4 + 1 == 5 rejected
        let third = profile(&roster, "c", &["asta"]);
        assert!(!team.add_to_node(0, &third));
        assert_eq!(team.node(0).character_count(), 4);

        // a full 4-character module cannot join a node holding anyone
        let mut team = MissionTeam::new(1);
        let solo = profile(&roster, "solo", &["asta"]);
        let quad = profile(&roster, "quad", &["seele", "bronya", "gepard", "pela"]);
        assert!(team.add_to_node(0, &solo));
        assert!(!team.add_to_node(0, &quad));
    }

    #[test]
    fn test_global_uniqueness() {
        let roster = Roster::builtin();
        let mut team = MissionTeam::new(2);

        let a = profile(&roster, "a", &["seele", "bronya"]);
        let overlapping = profile(&roster, "b", &["bronya", "gepard"]);
        assert!(team.add_to_node(0, &a));
        // bronya is already placed in node 0
        assert!(!team.add_to_node(1, &overlapping));

        team.pop_from_node(0, &a);
        assert!(team.add_to_node(1, &overlapping));
    }

    #[test]
    fn test_add_pop_restores_state() {
        let roster = Roster::builtin();
        let mut team = MissionTeam::new(2);
        let a = profile(&roster, "a", &["seele"]);
        let b = profile(&roster, "b", &["gepard", "bailu"]);

        assert!(team.add_to_node(0, &a));
        assert!(team.add_to_node(0, &b));
        assert_eq!(team.character_count(), 3);
        assert_eq!(team.node(0).module_names(), ["a", "b"]);

        team.pop_from_node(0, &b);
        assert_eq!(team.character_count(), 1);
        assert_eq!(team.node(0).characters()[0].id, "seele");
        team.pop_from_node(0, &a);
        assert_eq!(team.character_count(), 0);
    }

    #[test]
    fn test_pop_distinguishes_same_named_modules() {
        let roster = Roster::builtin();
        let mut team = MissionTeam::new(1);
        // two modules sharing a display name but with different members
        let first = profile(&roster, "dup", &["seele"]);
        let second = profile(&roster, "dup", &["bronya"]);
        assert!(team.add_to_node(0, &first));
        assert!(team.add_to_node(0, &second));

        team.pop_from_node(0, &first);
        assert_eq!(team.node(0).module_names(), ["dup"]);
        let remaining: Vec<&str> = team
            .node(0)
            .characters()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(remaining, ["bronya"]);

        team.pop_from_node(0, &second);
        assert!(team.node(0).is_empty());
        assert!(team.node(0).module_names().is_empty());
    }

    #[test]
    fn test_validity_requires_every_node_occupied() {
        let roster = Roster::builtin();
        let mut team = MissionTeam::new(2);
        assert!(!team.is_valid());

        let a = profile(&roster, "a", &["seele"]);
        assert!(team.add_to_node(0, &a));
        assert!(!team.is_valid());

        let b = profile(&roster, "b", &["gepard"]);
        assert!(team.add_to_node(1, &b));
        assert!(team.is_valid());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let roster = Roster::builtin();
        let mut team = MissionTeam::new(1);
        let a = profile(&roster, "a", &["seele"]);
        assert!(team.add_to_node(0, &a));

        let snapshot = team.clone();
        team.pop_from_node(0, &a);

        assert_eq!(team.character_count(), 0);
        assert_eq!(snapshot.character_count(), 1);
        assert_eq!(snapshot.character_ids(), vec![vec!["seele".to_string()]]);
    }
}
