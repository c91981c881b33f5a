//! Core library for grid-based path planning over a polygon-bounded area:
//! discretizes the free area into cells, connects surviving cells into a
//! weighted adjacency graph and answers shortest-path queries with A*.

pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod models;
pub mod options;
pub mod planner;

mod astar;

pub use error::{Error, Result};
pub use geometry::{GeometryAdapter, Polygon, PolygonSet};
pub use graph::{CellGraph, Connectivity, GraphEdge};
pub use grid::{ContainmentMode, Grid, GridParams};
pub use models::{Cell, CellIndex, PlannedPath, Point, Rect};
pub use options::SearchOptions;
pub use planner::GridPlanner;
