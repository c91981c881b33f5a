use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::GeometryAdapter;
use crate::models::{Cell, CellIndex, Point, Rect};

/// How cell survival is tested against the boundary. Obstacle overlap is
/// always tested against the full footprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentMode {
    /// Conservative default: the whole footprint must sit inside the
    /// boundary.
    #[default]
    Footprint,
    /// Looser mode matching centroid-only clipping: only the centroid must
    /// sit inside the boundary, so edge cells may partially overhang it.
    Centroid,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    pub cell_width: f64,
    pub cell_height: f64,
    pub containment: ContainmentMode,
}

impl GridParams {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
            containment: ContainmentMode::default(),
        }
    }

    /// Square cells, the common case.
    pub fn square(cell_size: f64) -> Self {
        Self::new(cell_size, cell_size)
    }

    pub fn with_containment(mut self, containment: ContainmentMode) -> Self {
        self.containment = containment;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell_width must be positive, got {}",
                self.cell_width
            )));
        }
        if !(self.cell_height.is_finite() && self.cell_height > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell_height must be positive, got {}",
                self.cell_height
            )));
        }
        Ok(())
    }
}

/// Surviving cells of one generation run, in lattice (row-major) order,
/// together with the parameters that produced them. Read-only downstream;
/// a parameter or obstacle change means regenerating from scratch.
#[derive(Clone, Debug)]
pub struct Grid {
    params: GridParams,
    origin: Point,
    rows: u32,
    cols: u32,
    cells: IndexMap<CellIndex, Cell>,
}

impl Grid {
    /// Tiles the boundary's bounding box from its minimum corner and keeps
    /// every cell whose footprint passes the containment and obstacle tests.
    /// Zero surviving cells is a valid (empty) grid, not an error.
    pub fn generate<G: GeometryAdapter>(geometry: &G, params: GridParams) -> Result<Grid> {
        params.validate()?;

        let bounds = geometry.bounds();
        let origin = bounds.min;
        let cols = lattice_steps(bounds.width(), params.cell_width);
        let rows = lattice_steps(bounds.height(), params.cell_height);

        let mut cells = IndexMap::new();
        for row in 0..rows {
            for col in 0..cols {
                let min = Point::new(
                    origin.x + f64::from(col) * params.cell_width,
                    origin.y + f64::from(row) * params.cell_height,
                );
                let footprint = Rect::new(
                    min,
                    Point::new(min.x + params.cell_width, min.y + params.cell_height),
                );
                let centroid = footprint.center();
                let inside = match params.containment {
                    ContainmentMode::Footprint => geometry.contains(&footprint),
                    ContainmentMode::Centroid => geometry.contains_point(centroid),
                };
                if inside && !geometry.blocked(&footprint) {
                    let index = CellIndex::new(row, col);
                    cells.insert(index, Cell { index, centroid, footprint });
                }
            }
        }

        debug!(
            rows,
            cols,
            surviving = cells.len(),
            discarded = (rows as usize * cols as usize) - cells.len(),
            "grid generated"
        );

        Ok(Grid {
            params,
            origin,
            rows,
            cols,
            cells,
        })
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// Minimum corner of the tiled bounding box.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Lattice extent in rows; includes positions whose cells were discarded.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.cells.get(&index)
    }

    /// Surviving cells in lattice order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Surviving cell whose centroid is nearest to `point`; lattice order
    /// breaks exact ties. `None` only for an empty grid.
    pub fn closest_cell(&self, point: Point) -> Option<&Cell> {
        let mut best: Option<(&Cell, f64)> = None;
        for cell in self.cells.values() {
            let d = cell.centroid.distance(point);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((cell, d));
            }
        }
        best.map(|(cell, _)| cell)
    }
}

fn lattice_steps(extent: f64, step: f64) -> u32 {
    if extent <= 0.0 {
        return 0;
    }
    (extent / step).ceil() as u32
}
