//! Tiered scoring of node assignments
//!
//! The score is one weighted sum, but the tier weights are powers of ten
//! chosen so higher tiers always dominate: character count, then offense
//! matched to the node's affinities, then survivability, then support count,
//! then fine-grained affinity coverage. Silverwolf widens a node's required
//! affinities with the novel affinities of her own team, at a 0.9 discount
//! split across the number of affinities she adds.

use crate::domain::{Affinity, Character, Role};

use super::assignment::MissionTeam;

/// Weight per deployed character
pub const COUNT_BASE: f64 = 1e8;
/// Weight for an attacker matching a required affinity
pub const ATTACK_AFFINITY_BASE: f64 = 1e7;
/// Weight for fielding any attacker at all
pub const ATTACK_BASE: f64 = 1e6;
/// Weight for fielding any survivor
pub const SURVIVAL_BASE: f64 = 1e5;
/// Weight per support character
pub const SUPPORT_BASE: f64 = 1e4;
/// Weight per character matching a required affinity
pub const AFFINITY_BASE: f64 = 1e3;

/// Discount applied to Silverwolf-granted affinity matches
const SILVERWOLF_DISCOUNT: f64 = 0.9;

/// Tiered score of a single node's assignment
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeScore {
    /// Attackers assigned
    pub attacker_count: u32,
    /// Survivors assigned
    pub survivor_count: u32,
    /// Supports assigned
    pub support_count: u32,
    /// Affinities Silverwolf added beyond the node's own requirement
    pub extra_affinity_count: u32,
    /// Attackers whose affinity is in the original requirement
    pub matched_original_attacker: u32,
    /// Attackers whose affinity only matches a Silverwolf-granted extra
    pub matched_extra_attacker: u32,
    /// Non-attackers whose affinity is in the original requirement
    pub matched_original_other: u32,
    /// Non-attackers whose affinity only matches a Silverwolf-granted extra
    pub matched_extra_other: u32,

    pub count_score: f64,
    pub attack_score: f64,
    pub survival_score: f64,
    pub support_score: f64,
    pub affinity_score: f64,
    pub total_score: f64,
}

impl NodeScore {
    /// Score one node's characters against its required affinity list
    pub fn evaluate(characters: &[Character], required: &[Affinity]) -> Self {
        let mut score = Self::default();
        let extras = score.widen_required(characters, required);
        score.tally_roles(characters, required, &extras);
        score.compute();
        score
    }

    /// Silverwolf widening: with her on the node, every assigned affinity not
    /// already required becomes an extra requirement. Returns the extras.
    fn widen_required(&mut self, characters: &[Character], required: &[Affinity]) -> Vec<Affinity> {
        if !characters.iter().any(Character::is_silverwolf) {
            return Vec::new();
        }
        let mut extras: Vec<Affinity> = Vec::new();
        for c in characters {
            if !required.contains(&c.affinity) && !extras.contains(&c.affinity) {
                extras.push(c.affinity);
            }
        }
        self.extra_affinity_count = extras.len() as u32;
        extras
    }

    fn tally_roles(&mut self, characters: &[Character], required: &[Affinity], extras: &[Affinity]) {
        for c in characters {
            match c.path.role() {
                Role::Attacker => {
                    self.attacker_count += 1;
                    if required.contains(&c.affinity) {
                        self.matched_original_attacker += 1;
                    } else if extras.contains(&c.affinity) {
                        self.matched_extra_attacker += 1;
                    }
                }
                Role::Survivor => {
                    self.survivor_count += 1;
                    if required.contains(&c.affinity) {
                        self.matched_original_other += 1;
                    } else if extras.contains(&c.affinity) {
                        self.matched_extra_other += 1;
                    }
                }
                Role::Support => {
                    self.support_count += 1;
                    if required.contains(&c.affinity) {
                        self.matched_original_other += 1;
                    } else if extras.contains(&c.affinity) {
                        self.matched_extra_other += 1;
                    }
                }
            }
        }
    }

    fn compute(&mut self) {
        // Tier 1: deploy as many characters as possible
        self.count_score =
            f64::from(self.attacker_count + self.survivor_count + self.support_count) * COUNT_BASE;

        // Tier 2: at least one attacker, ideally matching a required
        // affinity. A match granted only through Silverwolf is worth 0.9 of
        // the base, split across however many affinities she added, so a
        // native match always outranks a converted one.
        self.attack_score = 0.0;
        if self.attacker_count > 0 {
            self.attack_score += ATTACK_BASE;
        }
        if self.matched_original_attacker > 0 {
            self.attack_score += ATTACK_AFFINITY_BASE;
        } else if self.matched_extra_attacker > 0 && self.extra_affinity_count > 0 {
            self.attack_score +=
                SILVERWOLF_DISCOUNT * ATTACK_AFFINITY_BASE / f64::from(self.extra_affinity_count);
        }

        // Tier 3: one survivor is enough
        if self.survivor_count > 0 {
            self.survival_score += SURVIVAL_BASE;
        }

        // Tier 4: more supports are better
        self.support_score = f64::from(self.support_count) * SUPPORT_BASE;

        // Tier 5: affinity coverage, extras again discounted
        self.affinity_score =
            f64::from(self.matched_original_attacker + self.matched_original_other) * AFFINITY_BASE;
        if self.extra_affinity_count > 0 {
            self.affinity_score += SILVERWOLF_DISCOUNT
                * f64::from(self.matched_extra_attacker + self.matched_extra_other)
                * AFFINITY_BASE
                / f64::from(self.extra_affinity_count);
        }

        self.total_score = self.count_score
            + self.attack_score
            + self.survival_score
            + self.support_score
            + self.affinity_score;
    }
}

/// Tier-by-tier score of a whole mission assignment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MissionScore {
    pub count_score: f64,
    pub attack_score: f64,
    pub survival_score: f64,
    pub support_score: f64,
    pub affinity_score: f64,
    pub total_score: f64,
}

impl MissionScore {
    /// Score a mission team against the per-node required affinities.
    ///
    /// An invalid team (any empty node) scores zero in every tier and never
    /// competes with a valid one.
    pub fn evaluate(team: &MissionTeam, node_affinities: &[Vec<Affinity>]) -> Self {
        let mut score = Self::default();
        if !team.is_valid() {
            return score;
        }
        for (idx, required) in node_affinities.iter().enumerate() {
            let node = NodeScore::evaluate(team.node(idx).characters(), required);
            score.count_score += node.count_score;
            score.attack_score += node.attack_score;
            score.survival_score += node.survival_score;
            score.support_score += node.support_score;
            score.affinity_score += node.affinity_score;
            score.total_score += node.total_score;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Roster, SILVERWOLF_ID};
    use crate::planner::{ModuleProfile, TeamModule};

    fn characters(roster: &Roster, ids: &[&str]) -> Vec<Character> {
        ids.iter().map(|id| roster.get(id).unwrap().clone()).collect()
    }

    #[test]
    fn test_role_tallies_and_tier_weights() {
        let roster = Roster::builtin();
        // seele: quantum attacker, gepard: ice survivor, bronya: wind support,
        // tingyun: lightning support; node requires quantum
        let chars = characters(&roster, &["seele", "gepard", "bronya", "tingyun"]);
        let score = NodeScore::evaluate(&chars, &[Affinity::Quantum]);

        assert_eq!(score.attacker_count, 1);
        assert_eq!(score.survivor_count, 1);
        assert_eq!(score.support_count, 2);
        assert_eq!(score.extra_affinity_count, 0);
        assert_eq!(score.matched_original_attacker, 1);
        assert_eq!(score.matched_original_other, 0);

        assert_eq!(score.count_score, 4.0 * COUNT_BASE);
        assert_eq!(score.attack_score, ATTACK_BASE + ATTACK_AFFINITY_BASE);
        assert_eq!(score.survival_score, SURVIVAL_BASE);
        assert_eq!(score.support_score, 2.0 * SUPPORT_BASE);
        assert_eq!(score.affinity_score, AFFINITY_BASE);
        assert_eq!(
            score.total_score,
            score.count_score
                + score.attack_score
                + score.survival_score
                + score.support_score
                + score.affinity_score
        );
    }

    #[test]
    fn test_attacker_without_affinity_match() {
        let roster = Roster::builtin();
        // hook is a fire attacker; node requires ice, no Silverwolf
        let chars = characters(&roster, &["hook"]);
        let score = NodeScore::evaluate(&chars, &[Affinity::Ice]);

        assert_eq!(score.attack_score, ATTACK_BASE);
        assert_eq!(score.affinity_score, 0.0);
        assert_eq!(score.extra_affinity_count, 0);
    }

    #[test]
    fn test_silverwolf_widens_required_affinities() {
        let roster = Roster::builtin();
        // Node requires fire; qingque is a quantum attacker and Silverwolf is
        // quantum herself, so exactly one novel affinity is added.
        let chars = characters(&roster, &[SILVERWOLF_ID, "qingque"]);
        let score = NodeScore::evaluate(&chars, &[Affinity::Fire]);

        assert_eq!(score.extra_affinity_count, 1);
        assert_eq!(score.matched_original_attacker, 0);
        assert_eq!(score.matched_extra_attacker, 1);
        assert_eq!(score.matched_extra_other, 1); // Silverwolf matches her own extra

        assert_eq!(
            score.attack_score,
            ATTACK_BASE + 0.9 * ATTACK_AFFINITY_BASE
        );
        assert_eq!(score.affinity_score, 0.9 * 2.0 * AFFINITY_BASE);
    }

    #[test]
    fn test_silverwolf_discount_splits_across_extras() {
        let roster = Roster::builtin();
        // yanqing (ice) and silverwolf (quantum) against a fire node: two
        // novel affinities, so each converted match is worth 0.9 / 2.
        let chars = characters(&roster, &[SILVERWOLF_ID, "yanqing"]);
        let score = NodeScore::evaluate(&chars, &[Affinity::Fire]);

        assert_eq!(score.extra_affinity_count, 2);
        assert_eq!(score.attack_score, ATTACK_BASE + 0.9 * ATTACK_AFFINITY_BASE / 2.0);
    }

    #[test]
    fn test_native_match_outranks_converted_match() {
        let roster = Roster::builtin();
        // himeko natively matches the fire node; no extra bonus path taken
        let chars = characters(&roster, &[SILVERWOLF_ID, "himeko"]);
        let score = NodeScore::evaluate(&chars, &[Affinity::Fire]);

        assert_eq!(score.matched_original_attacker, 1);
        assert_eq!(score.attack_score, ATTACK_BASE + ATTACK_AFFINITY_BASE);
    }

    #[test]
    fn test_without_silverwolf_no_widening() {
        let roster = Roster::builtin();
        let chars = characters(&roster, &["qingque"]);
        let score = NodeScore::evaluate(&chars, &[Affinity::Fire]);

        assert_eq!(score.extra_affinity_count, 0);
        assert_eq!(score.matched_extra_attacker, 0);
        assert_eq!(score.attack_score, ATTACK_BASE);
    }

    #[test]
    fn test_invalid_mission_scores_zero() {
        let roster = Roster::builtin();
        let affinities = vec![vec![Affinity::Quantum], vec![Affinity::Fire]];
        let mut team = MissionTeam::new(2);

        let m = ModuleProfile::resolve(&TeamModule::new("a", &["seele"]), &roster).unwrap();
        assert!(team.add_to_node(0, &m));

        // node 1 is still empty
        let score = MissionScore::evaluate(&team, &affinities);
        assert_eq!(score, MissionScore::default());
        assert_eq!(score.total_score, 0.0);
    }

    #[test]
    fn test_mission_score_sums_nodes() {
        let roster = Roster::builtin();
        let affinities = vec![vec![Affinity::Quantum], vec![Affinity::Fire]];
        let mut team = MissionTeam::new(2);

        let a = ModuleProfile::resolve(&TeamModule::new("a", &["seele"]), &roster).unwrap();
        let b = ModuleProfile::resolve(&TeamModule::new("b", &["himeko"]), &roster).unwrap();
        assert!(team.add_to_node(0, &a));
        assert!(team.add_to_node(1, &b));

        let score = MissionScore::evaluate(&team, &affinities);
        assert_eq!(score.count_score, 2.0 * COUNT_BASE);
        // both attackers natively match their node
        assert_eq!(score.attack_score, 2.0 * (ATTACK_BASE + ATTACK_AFFINITY_BASE));
        assert_eq!(score.affinity_score, 2.0 * AFFINITY_BASE);
    }
}
