//! Run record
//!
//! Star history for the current hall rotation. The hall resets every two
//! weeks; a stored record from a previous rotation is discarded before a run.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// First day of a reference rotation (a Sunday); rotations are counted in
/// two-week turns from here.
const BASE_SUNDAY: &str = "20231126";

const DATE_FORMAT: &str = "%Y%m%d";

/// Outcome status of the last run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Waiting,
    Running,
    Success,
    Fail,
}

/// Persisted star history of the current rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Date of the last run, `YYYYMMDD`
    pub dt: String,
    /// Status of the last run
    pub status: RunStatus,
    /// Best total star count seen this rotation
    pub star: u32,
    /// Stars per mission number
    pub mission_stars: BTreeMap<u32, u32>,
}

impl RunRecord {
    /// Fresh record dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            dt: today.format(DATE_FORMAT).to_string(),
            status: RunStatus::Waiting,
            star: 0,
            mission_stars: BTreeMap::new(),
        }
    }

    /// Stars recorded for one mission
    pub fn mission_star(&self, mission: u32) -> u32 {
        self.mission_stars.get(&mission).copied().unwrap_or(0)
    }

    /// Record a mission's star count; the stored total only ever goes up.
    pub fn update_mission_star(&mut self, mission: u32, star: u32) {
        self.mission_stars.insert(mission, star);
        let total: u32 = self.mission_stars.values().sum();
        if total > self.star {
            self.star = total;
        }
    }

    /// Record the on-screen total if it beats the stored one
    pub fn update_total_star(&mut self, star: u32) {
        if star > self.star {
            self.star = star;
        }
    }

    /// Whether the record belongs to an earlier rotation than `today`
    pub fn should_reset(&self, today: NaiveDate) -> bool {
        match NaiveDate::parse_from_str(&self.dt, DATE_FORMAT) {
            Ok(recorded) => rotation_turn(today) > rotation_turn(recorded),
            // unreadable date: safer to start the rotation over
            Err(_) => true,
        }
    }

    /// Discard the rotation's history and restamp the record
    pub fn reset(&mut self, today: NaiveDate) {
        self.dt = today.format(DATE_FORMAT).to_string();
        self.status = RunStatus::Waiting;
        self.star = 0;
        self.mission_stars.clear();
    }

    /// Load a record from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let record: RunRecord = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// Save the record as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Two-week turn index of the rotation containing `date`, anchored on the
/// reference Sunday.
fn rotation_turn(date: NaiveDate) -> i64 {
    let base = NaiveDate::parse_from_str(BASE_SUNDAY, DATE_FORMAT)
        .expect("base rotation date is well-formed");
    let sunday = preceding_sunday(date);
    let weeks = (sunday - base).num_days().div_euclid(7);
    weeks.div_euclid(2)
}

/// The Sunday on or before `date`
fn preceding_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
