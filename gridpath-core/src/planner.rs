use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{GeometryAdapter, Polygon, PolygonSet};
use crate::graph::{CellGraph, Connectivity};
use crate::grid::{Grid, GridParams};
use crate::models::{Cell, CellIndex, PlannedPath, Point};
use crate::options::SearchOptions;

/// Build-then-query facade over the whole pipeline: validate geometry,
/// generate the grid, build the adjacency graph, then answer any number of
/// path queries against the immutable result. Changing parameters or
/// obstacles means constructing a new planner; nothing is mutated in place.
#[derive(Clone, Debug)]
pub struct GridPlanner {
    geometry: PolygonSet,
    grid: Grid,
    graph: CellGraph,
    options: SearchOptions,
}

impl GridPlanner {
    /// Validates the boundary and obstacle rings, generates the grid and
    /// builds the graph.
    ///
    /// Fails with `InvalidGeometry` for malformed rings, `InvalidParameter`
    /// for non-positive cell dimensions and `EmptyGrid` when no cell
    /// survives, so hosts can reconfigure before querying.
    pub fn new(
        boundary: Vec<Point>,
        obstacles: Vec<Vec<Point>>,
        params: GridParams,
        connectivity: Connectivity,
    ) -> Result<Self> {
        let boundary = Polygon::try_new(boundary)?;
        let obstacles = obstacles
            .into_iter()
            .map(Polygon::try_new)
            .collect::<Result<Vec<_>>>()?;
        let geometry = PolygonSet::new(boundary, obstacles);

        let grid = Grid::generate(&geometry, params)?;
        if grid.is_empty() {
            return Err(Error::EmptyGrid);
        }
        let graph = CellGraph::build(&grid, connectivity);
        debug!(
            cells = grid.len(),
            edges = graph.edge_count(),
            "planner ready"
        );

        Ok(Self {
            geometry,
            grid,
            graph,
            options: SearchOptions::default(),
        })
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Plans between two planar coordinates by snapping each to the nearest
    /// surviving cell centroid first.
    pub fn plan(&self, start: Point, goal: Point) -> Result<PlannedPath> {
        // A planner is never constructed over an empty grid, so both snaps
        // succeed.
        let start = self.closest_cell(start).ok_or(Error::EmptyGrid)?.index;
        let goal = self.closest_cell(goal).ok_or(Error::EmptyGrid)?.index;
        self.plan_cells(start, goal)
    }

    /// Plans between two cells addressed by lattice identity.
    pub fn plan_cells(&self, start: CellIndex, goal: CellIndex) -> Result<PlannedPath> {
        self.graph.find_path(start, goal, &self.options)
    }

    /// Surviving cell whose centroid is nearest to `point`.
    pub fn closest_cell(&self, point: Point) -> Option<&Cell> {
        self.grid.closest_cell(point)
    }

    pub fn geometry(&self) -> &PolygonSet {
        &self.geometry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &CellGraph {
        &self.graph
    }

    /// True when `point` lies inside the planning boundary.
    pub fn in_bounds(&self, point: Point) -> bool {
        self.geometry.contains_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring(size: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ]
    }

    #[test]
    fn rejects_malformed_boundary() {
        let err = GridPlanner::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            Vec::new(),
            GridParams::square(1.0),
            Connectivity::Four,
        );
        assert!(matches!(err, Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_malformed_obstacle() {
        let bowtie = vec![
            Point::new(2.0, 2.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 4.0),
        ];
        let err = GridPlanner::new(
            square_ring(10.0),
            vec![bowtie],
            GridParams::square(1.0),
            Connectivity::Four,
        );
        assert!(matches!(err, Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn reports_empty_grid_eagerly() {
        let blanket = vec![
            Point::new(-1.0, -1.0),
            Point::new(11.0, -1.0),
            Point::new(11.0, 11.0),
            Point::new(-1.0, 11.0),
        ];
        let err = GridPlanner::new(
            square_ring(10.0),
            vec![blanket],
            GridParams::square(1.0),
            Connectivity::Four,
        );
        assert!(matches!(err, Err(Error::EmptyGrid)));
    }

    #[test]
    fn plans_between_snapped_coordinates() {
        let planner = GridPlanner::new(
            square_ring(10.0),
            Vec::new(),
            GridParams::square(1.0),
            Connectivity::Eight,
        )
        .unwrap();
        let path = planner
            .plan(Point::new(0.2, 0.3), Point::new(9.9, 9.7))
            .unwrap();
        assert_eq!(path.cells.first().unwrap().index, CellIndex::new(0, 0));
        assert_eq!(path.cells.last().unwrap().index, CellIndex::new(9, 9));
        assert!((path.cost - 9.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn exposes_grid_and_graph_for_presentation() {
        let planner = GridPlanner::new(
            square_ring(5.0),
            Vec::new(),
            GridParams::square(1.0),
            Connectivity::Four,
        )
        .unwrap();
        assert_eq!(planner.grid().len(), 25);
        assert_eq!(planner.graph().edge_count(), 40);
        assert!(planner.in_bounds(Point::new(2.5, 2.5)));
        assert!(!planner.in_bounds(Point::new(7.0, 7.0)));
    }
}
