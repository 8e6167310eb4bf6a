//! Run orchestration
//!
//! Drives a whole hall run: plan a team for each mission with the search
//! engine, hand the plan to the [`MissionDriver`] (the screen-driving layer,
//! out of scope here) and track stars in the run record. Missions are only
//! advanced past on a full-star clear, mirroring in-game progression.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::HallConfig;
use crate::domain::{Affinity, Roster};
use crate::planner::{search_best_assignment, ModuleProfile, SearchConfig};
use crate::storage::record::{RunRecord, RunStatus};

/// The UI-automation collaborator: recognizes a mission's node requirements
/// on screen and plays out a challenge with the teams it is given.
pub trait MissionDriver {
    /// Total star count shown for the hall, recognized on entry
    fn recognize_total_star(&mut self) -> Result<u32>;

    /// Per-node required affinities of a mission, as recognized on screen
    fn node_affinities(&mut self, mission: u32) -> Result<Vec<Vec<Affinity>>>;

    /// Run the challenge with the given per-node character ids; returns the
    /// stars earned.
    fn challenge(&mut self, mission: u32, teams: &[Vec<String>]) -> Result<u32>;

    /// Collect any rewards unlocked by the run
    fn claim_rewards(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Orchestrates one full hall run
pub struct HallApp {
    config: HallConfig,
    roster: Roster,
    pub record: RunRecord,
    record_path: Option<PathBuf>,
}

impl HallApp {
    pub fn new(config: HallConfig, roster: Roster, record: RunRecord) -> Self {
        Self {
            config,
            roster,
            record,
            record_path: None,
        }
    }

    /// Persist the run record to `path` after every star update
    pub fn with_record_path(mut self, path: PathBuf) -> Self {
        self.record_path = Some(path);
        self
    }

    /// Run every mission that is not yet at full stars, stopping at the
    /// first mission that cannot be fully cleared. Returns the final status
    /// (also stored in the record).
    pub fn run(&mut self, driver: &mut dyn MissionDriver, today: NaiveDate) -> Result<RunStatus> {
        if self.record.should_reset(today) {
            info!("run record belongs to a previous rotation, resetting");
            self.record.reset(today);
        }
        self.record.status = RunStatus::Running;

        let modules = ModuleProfile::resolve_all(&self.config.team_modules, &self.roster)
            .context("configured team modules do not resolve against the roster")?;
        let search_config = SearchConfig {
            projection_cap: self.config.runner.projection_cap,
        };
        let full = self.config.runner.stars_per_mission;
        let target = full * self.config.runner.mission_count;

        let total = driver.recognize_total_star()?;
        self.update_total_star(total);

        // already at full stars: go straight to the rewards
        if self.record.star < target {
            for mission in 1..=self.config.runner.mission_count {
                if self.record.mission_star(mission) == full {
                    info!("mission {mission} already at full stars, skipping");
                    continue;
                }

                let affinities = driver.node_affinities(mission)?;
                info!(
                    "planning teams for mission {mission}, required affinities: {}",
                    format_affinities(&affinities)
                );

                let Some(plan) = search_best_assignment(&affinities, &modules, &search_config)
                else {
                    warn!("no feasible team assignment for mission {mission}, stopping the run");
                    break;
                };

                let stars = driver.challenge(mission, &plan)?;
                self.update_mission_star(mission, stars);
                if stars < full {
                    info!("mission {mission} ended at {stars} stars, stopping the run");
                    break;
                }
            }
        }

        // rewards are attempted however the run went; partial clears can
        // still have unlocked some
        driver.claim_rewards()?;

        self.record.status = if self.record.star >= target {
            RunStatus::Success
        } else {
            RunStatus::Fail
        };
        self.persist_record();
        Ok(self.record.status)
    }

    /// Star-count callback: invoked with the on-screen total after it is
    /// recognized.
    pub fn update_total_star(&mut self, star: u32) {
        info!("current total stars: {star}");
        self.record.update_total_star(star);
        self.persist_record();
    }

    /// Per-mission star callback: invoked after each mission resolves.
    pub fn update_mission_star(&mut self, mission: u32, star: u32) {
        info!("mission {mission} current stars: {star}");
        self.record.update_mission_star(mission, star);
        self.persist_record();
    }

    fn persist_record(&self) {
        if let Some(path) = &self.record_path {
            if let Err(e) = self.record.save(path) {
                warn!("failed to persist run record to {path:?}: {e}");
            }
        }
    }
}

fn format_affinities(node_affinities: &[Vec<Affinity>]) -> String {
    node_affinities
        .iter()
        .map(|node| {
            node.iter()
                .map(Affinity::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
