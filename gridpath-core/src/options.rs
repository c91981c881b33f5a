use serde::{Deserialize, Serialize};

/// Expansion budget large enough for any grid the planner realistically
/// produces; searches that exceed it report `NoPathFound` instead of running
/// unbounded.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub max_expansions: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}
