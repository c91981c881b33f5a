use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::Grid;
use crate::models::{Cell, CellIndex};

/// Neighborhood examined when connecting lattice cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    Four,
    Eight,
}

impl Connectivity {
    /// Half of the neighborhood, in lattice order. Visiting only forward
    /// offsets inserts each undirected edge exactly once.
    fn forward_offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &[(0, 1), (1, 0)],
            Connectivity::Eight => &[(0, 1), (1, -1), (1, 0), (1, 1)],
        }
    }
}

/// One undirected edge between adjacent surviving cells, reported with
/// `a < b` in lattice order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub a: CellIndex,
    pub b: CellIndex,
    pub weight: f64,
}

/// Adjacency graph over the surviving cells of a grid. Exactly one node per
/// cell (isolated cells keep their zero-degree node), undirected simple
/// edges weighted by centroid distance. Immutable once built; rebuilt
/// wholesale when the grid changes. Safe to share across concurrent
/// searches.
#[derive(Clone, Debug)]
pub struct CellGraph {
    connectivity: Connectivity,
    cells: Vec<Cell>,
    ids: HashMap<CellIndex, u32>,
    adjacency: Vec<Vec<(u32, f64)>>,
    edges: Vec<GraphEdge>,
}

impl CellGraph {
    pub fn build(grid: &Grid, connectivity: Connectivity) -> CellGraph {
        let cells: Vec<Cell> = grid.cells().cloned().collect();
        let ids: HashMap<CellIndex, u32> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| (c.index, i as u32))
            .collect();

        let mut adjacency: Vec<Vec<(u32, f64)>> = vec![Vec::new(); cells.len()];
        let mut edges = Vec::new();
        for (id, cell) in cells.iter().enumerate() {
            for &(dr, dc) in connectivity.forward_offsets() {
                let row = i64::from(cell.index.row) + dr;
                let col = i64::from(cell.index.col) + dc;
                if row < 0 || col < 0 {
                    continue;
                }
                let neighbor = CellIndex::new(row as u32, col as u32);
                let Some(&other) = ids.get(&neighbor) else {
                    continue;
                };
                let weight = cell.centroid.distance(cells[other as usize].centroid);
                adjacency[id].push((other, weight));
                adjacency[other as usize].push((id as u32, weight));
                let (a, b) = if cell.index < neighbor {
                    (cell.index, neighbor)
                } else {
                    (neighbor, cell.index)
                };
                edges.push(GraphEdge { a, b, weight });
            }
        }

        debug!(
            nodes = cells.len(),
            edges = edges.len(),
            ?connectivity,
            "graph built"
        );

        CellGraph {
            connectivity,
            cells,
            ids,
            adjacency,
            edges,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Deduplicated undirected edge list, for consumers that render or audit
    /// the graph.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.ids.contains_key(&index)
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.ids.get(&index).map(|&id| &self.cells[id as usize])
    }

    /// Node cells in lattice order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn id_of(&self, index: CellIndex) -> Option<u32> {
        self.ids.get(&index).copied()
    }

    pub(crate) fn cell_by_id(&self, id: u32) -> &Cell {
        &self.cells[id as usize]
    }

    pub(crate) fn neighbors(&self, id: u32) -> &[(u32, f64)] {
        &self.adjacency[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::geometry::{Polygon, PolygonSet};
    use crate::grid::GridParams;
    use crate::models::Point;

    fn grid(size: f64, obstacles: Vec<Polygon>) -> Grid {
        let boundary = Polygon::try_new(vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ])
        .unwrap();
        let area = PolygonSet::new(boundary, obstacles);
        Grid::generate(&area, GridParams::square(1.0)).unwrap()
    }

    #[test]
    fn four_connectivity_edge_count_on_full_lattice() {
        let graph = CellGraph::build(&grid(3.0, Vec::new()), Connectivity::Four);
        assert_eq!(graph.node_count(), 9);
        // A full 3x3 lattice has 12 orthogonal adjacencies.
        assert_eq!(graph.edge_count(), 12);
        for e in graph.edges() {
            assert!((e.weight - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn eight_connectivity_adds_diagonals() {
        let graph = CellGraph::build(&grid(3.0, Vec::new()), Connectivity::Eight);
        // 12 orthogonal + 8 diagonal.
        assert_eq!(graph.edge_count(), 20);
        let diagonals = graph
            .edges()
            .iter()
            .filter(|e| e.a.row != e.b.row && e.a.col != e.b.col)
            .count();
        assert_eq!(diagonals, 8);
        for e in graph.edges().iter().filter(|e| e.a.row != e.b.row && e.a.col != e.b.col) {
            assert!((e.weight - std::f64::consts::SQRT_2).abs() < 1e-12);
        }
    }

    #[test]
    fn graph_is_simple_and_undirected() {
        let graph = CellGraph::build(&grid(4.0, Vec::new()), Connectivity::Eight);
        let mut seen = HashSet::new();
        for e in graph.edges() {
            assert!(e.a < e.b, "edges reported in lattice order");
            assert!(seen.insert((e.a, e.b)), "duplicate edge {} - {}", e.a, e.b);
        }
    }

    #[test]
    fn isolated_cells_remain_zero_degree_nodes() {
        // Four wall obstacles box in cell (2, 2) of a 5x5 grid: all eight of
        // its lattice neighbors are discarded, but the cell itself must stay
        // in the graph as a zero-degree node.
        let walls = vec![
            rect_poly(1.2, 1.2, 3.8, 1.8), // south
            rect_poly(1.2, 3.2, 3.8, 3.8), // north
            rect_poly(1.2, 1.2, 1.8, 3.8), // west
            rect_poly(3.2, 1.2, 3.8, 3.8), // east
        ];
        let graph = CellGraph::build(&grid(5.0, walls), Connectivity::Eight);
        let centre = CellIndex::new(2, 2);
        assert!(graph.contains(centre));
        let id = graph.id_of(centre).unwrap();
        assert!(graph.neighbors(id).is_empty());
    }

    fn rect_poly(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon {
        Polygon::try_new(vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ])
        .unwrap()
    }

    #[test]
    fn build_on_empty_grid_yields_empty_graph() {
        let blanket = rect_poly(-1.0, -1.0, 6.0, 6.0);
        let graph = CellGraph::build(&grid(5.0, vec![blanket]), Connectivity::Four);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
