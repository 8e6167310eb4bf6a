//! Branch-and-bound search over module assignments
//!
//! Depth-first over the module list: each module is either placed into one
//! of the nodes (in node order) or skipped entirely. The one in-progress
//! [`MissionTeam`] is mutated in place with add/pop pairs; the best valid
//! assignment found so far is kept as an independent clone and used to prune
//! subtrees that provably cannot beat it.

use std::time::Instant;

use tracing::info;

use crate::domain::Affinity;

use super::assignment::MissionTeam;
use super::scoring::{MissionScore, AFFINITY_BASE, SUPPORT_BASE};
use super::ModuleProfile;

/// Tunables for the search
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Character-count cap used when projecting the best possible remaining
    /// support/affinity contribution in the pruning bound.
    pub projection_cap: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { projection_cap: 8 }
    }
}

struct SearchContext<'a> {
    node_affinities: &'a [Vec<Affinity>],
    modules: &'a [ModuleProfile],
    projection_cap: f64,
}

struct BestTeam {
    team: MissionTeam,
    score: MissionScore,
}

/// Search for the best assignment and return, per node, the ordered
/// character ids of the winning team, or `None` when no valid assignment
/// exists (e.g. fewer configured modules than nodes).
pub fn search_best_assignment(
    node_affinities: &[Vec<Affinity>],
    modules: &[ModuleProfile],
    config: &SearchConfig,
) -> Option<Vec<Vec<String>>> {
    search_best_team(node_affinities, modules, config).map(|(team, _)| team.character_ids())
}

/// Like [`search_best_assignment`], but returns the winning team together
/// with its tiered score.
pub fn search_best_team(
    node_affinities: &[Vec<Affinity>],
    modules: &[ModuleProfile],
    config: &SearchConfig,
) -> Option<(MissionTeam, MissionScore)> {
    let ctx = SearchContext {
        node_affinities,
        modules,
        projection_cap: f64::from(config.projection_cap),
    };

    let start = Instant::now();
    let mut team = MissionTeam::new(node_affinities.len());
    let mut best: Option<BestTeam> = None;
    dfs(&ctx, &mut team, 0, &mut best);
    info!(
        "team assignment search over {} modules x {} nodes finished in {:.2}s (found: {})",
        modules.len(),
        node_affinities.len(),
        start.elapsed().as_secs_f64(),
        best.is_some()
    );

    best.map(|b| (b.team, b.score))
}

fn dfs(ctx: &SearchContext<'_>, team: &mut MissionTeam, module_idx: usize, best: &mut Option<BestTeam>) {
    if module_idx == ctx.modules.len() {
        if team.is_valid() {
            let score = MissionScore::evaluate(team, ctx.node_affinities);
            let improved = match best {
                None => true,
                // strict comparison: on exact ties the first-found team wins
                Some(current_best) => score.total_score > current_best.score.total_score,
            };
            if improved {
                *best = Some(BestTeam {
                    team: team.clone(),
                    score,
                });
            }
        }
        return;
    }

    if let Some(current_best) = best {
        if impossibly_greater(ctx, team, current_best) {
            return;
        }
    }

    let module = &ctx.modules[module_idx];

    // Place the module into each node that still accepts its category
    for node_idx in 0..team.node_count() {
        if module.category < team.node(node_idx).phase {
            continue;
        }
        if team.add_to_node(node_idx, module) {
            let saved_phase = team.node(node_idx).phase;
            team.node_mut(node_idx).phase = module.category;

            dfs(ctx, team, module_idx + 1, best);

            team.pop_from_node(node_idx, module);
            team.node_mut(node_idx).phase = saved_phase;
        }
    }

    // Skip the module entirely
    dfs(ctx, team, module_idx + 1, best);
}

/// Whether the current (already valid) partial search state provably cannot
/// beat the best assignment found so far.
///
/// The attack tier of a node is settled once its phase has passed attackers
/// and Silverwolf (phase >= 2), the survival tier once survivors have passed
/// too (phase >= 3). Once a tier is settled everywhere, falling behind in it
/// is unrecoverable. For the support and affinity tiers, remaining headroom
/// is bounded by assuming every still-unplaced character slot up to the
/// projection cap becomes a support / an affinity match.
fn impossibly_greater(ctx: &SearchContext<'_>, team: &MissionTeam, best: &BestTeam) -> bool {
    if !team.is_valid() {
        // an incomplete assignment can still become anything
        return false;
    }

    let current = MissionScore::evaluate(team, ctx.node_affinities);

    let mut all_nodes_past_attack_and_silverwolf = true;
    let mut all_nodes_past_survivor = true;
    for node_idx in 0..team.node_count() {
        let phase = team.node(node_idx).phase;
        if phase <= 1 {
            all_nodes_past_attack_and_silverwolf = false;
        }
        if phase <= 2 {
            all_nodes_past_survivor = false;
        }
    }

    let headroom = ctx.projection_cap - team.character_count() as f64;

    if all_nodes_past_attack_and_silverwolf && current.attack_score < best.score.attack_score {
        true
    } else if all_nodes_past_survivor {
        if current.survival_score < best.score.survival_score {
            true
        } else if current.support_score + headroom * SUPPORT_BASE < best.score.support_score {
            true
        } else if current.support_score + headroom * SUPPORT_BASE == best.score.support_score {
            current.affinity_score + headroom * AFFINITY_BASE < best.score.affinity_score
        } else {
            false
        }
    } else {
        false
    }
}
