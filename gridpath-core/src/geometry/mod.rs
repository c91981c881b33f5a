pub mod polygon;

pub use polygon::Polygon;

use crate::models::{Point, Rect};

/// Capability interface the grid generator plans against. Implementations
/// are pure predicates over static geometry; any polygon library can back
/// one as long as it answers these three questions.
pub trait GeometryAdapter {
    /// Bounding box of the planning area; the lattice tiles this.
    fn bounds(&self) -> Rect;

    /// True when the whole footprint lies inside (or on) the boundary.
    fn contains(&self, footprint: &Rect) -> bool;

    /// True when the point lies inside (or on) the boundary.
    fn contains_point(&self, point: Point) -> bool;

    /// True when any obstacle shares area with the footprint.
    fn blocked(&self, footprint: &Rect) -> bool;
}

/// Default adapter: one validated boundary ring plus zero or more validated
/// obstacle rings.
#[derive(Clone, Debug)]
pub struct PolygonSet {
    boundary: Polygon,
    obstacles: Vec<Polygon>,
}

impl PolygonSet {
    pub fn new(boundary: Polygon, obstacles: Vec<Polygon>) -> Self {
        Self { boundary, obstacles }
    }

    pub fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }
}

impl GeometryAdapter for PolygonSet {
    fn bounds(&self) -> Rect {
        self.boundary.bounds()
    }

    fn contains(&self, footprint: &Rect) -> bool {
        self.boundary.contains_rect(footprint)
    }

    fn contains_point(&self, point: Point) -> bool {
        self.boundary.contains(point)
    }

    fn blocked(&self, footprint: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.overlaps_rect(footprint))
    }
}
