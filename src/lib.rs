//! Automated Forgotten Hall runner
//!
//! The core is the team-assignment planner: a branch-and-bound search that
//! partitions the player's configured team modules across a mission's combat
//! nodes to maximize a tiered score (characters deployed, then offense
//! matched to each node's affinities, then survivability, support and
//! affinity coverage). Around it sit the character registry, the TOML team
//! configuration, the star-history run record, and the [`app::MissionDriver`]
//! seam to the screen-driving layer.

pub mod app;
pub mod config;
pub mod domain;
pub mod planner;
pub mod storage;
