use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::CellGraph;
use crate::models::{CellIndex, PlannedPath};
use crate::options::SearchOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueNode {
    id: u32,
    f: OrderedFloat<f64>,
    g: OrderedFloat<f64>,
    h: OrderedFloat<f64>,
    seq: u64,
}

impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert for min-heap behavior. Lower
        // sequence wins ties so the first-seen frontier entry is expanded,
        // keeping results deterministic.
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl CellGraph {
    /// Minimum-cost path between two graph nodes.
    ///
    /// Classic A* with the straight-line centroid distance as heuristic;
    /// edge weights are themselves centroid distances, so the heuristic is
    /// admissible and consistent and the first pop of the goal is optimal.
    /// The graph is only read, so concurrent searches are safe.
    ///
    /// Fails with `UnknownNode` when either endpoint is not a node and with
    /// `NoPathFound` when the frontier is exhausted or the expansion budget
    /// runs out.
    pub fn find_path(
        &self,
        start: CellIndex,
        goal: CellIndex,
        options: &SearchOptions,
    ) -> Result<PlannedPath> {
        let start_id = self.id_of(start).ok_or(Error::UnknownNode(start))?;
        let goal_id = self.id_of(goal).ok_or(Error::UnknownNode(goal))?;

        if start_id == goal_id {
            return Ok(PlannedPath {
                cells: vec![self.cell_by_id(start_id).clone()],
                cost: 0.0,
                expanded: 0,
            });
        }

        let goal_centroid = self.cell_by_id(goal_id).centroid;
        let heuristic = |id: u32| self.cell_by_id(id).centroid.distance(goal_centroid);

        let nodes = self.node_count();
        let mut g_score = vec![f64::INFINITY; nodes];
        let mut parent = vec![u32::MAX; nodes];
        let mut open = BinaryHeap::new();
        let mut expanded: u64 = 0;
        let mut seq: u64 = 0;

        let h0 = heuristic(start_id);
        g_score[start_id as usize] = 0.0;
        open.push(QueueNode {
            id: start_id,
            f: OrderedFloat(h0),
            g: OrderedFloat(0.0),
            h: OrderedFloat(h0),
            seq,
        });

        while let Some(qn) = open.pop() {
            // Discard stale entries superseded by a cheaper route.
            if qn.g.0 > g_score[qn.id as usize] {
                continue;
            }
            expanded += 1;
            if expanded > options.max_expansions {
                debug!(expanded, "expansion budget exhausted");
                return Err(Error::NoPathFound);
            }

            if qn.id == goal_id {
                let path = self.reconstruct(&parent, start_id, goal_id);
                let cost = g_score[goal_id as usize];
                debug!(expanded, cost, len = path.cells.len(), "path found");
                return Ok(PlannedPath { expanded, ..path });
            }

            for &(next, weight) in self.neighbors(qn.id) {
                let tentative = qn.g.0 + weight;
                if tentative < g_score[next as usize] {
                    g_score[next as usize] = tentative;
                    parent[next as usize] = qn.id;
                    let h = heuristic(next);
                    seq += 1;
                    open.push(QueueNode {
                        id: next,
                        f: OrderedFloat(tentative + h),
                        g: OrderedFloat(tentative),
                        h: OrderedFloat(h),
                        seq,
                    });
                }
            }
        }

        debug!(expanded, "frontier exhausted without reaching goal");
        Err(Error::NoPathFound)
    }

    fn reconstruct(&self, parent: &[u32], start_id: u32, goal_id: u32) -> PlannedPath {
        let mut ids = vec![goal_id];
        let mut current = goal_id;
        while current != start_id {
            current = parent[current as usize];
            ids.push(current);
        }
        ids.reverse();
        let mut cost = 0.0;
        for pair in ids.windows(2) {
            cost += self
                .cell_by_id(pair[0])
                .centroid
                .distance(self.cell_by_id(pair[1]).centroid);
        }
        PlannedPath {
            cells: ids.iter().map(|&id| self.cell_by_id(id).clone()).collect(),
            cost,
            expanded: 0,
        }
    }
}
