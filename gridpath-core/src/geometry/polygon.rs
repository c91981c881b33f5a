use crate::error::{Error, Result};
use crate::models::{Point, Rect};

/// Tolerance for collinearity/degeneracy tests, scaled by segment length
/// where it matters.
pub(crate) const EPS: f64 = 1e-9;

/// Simple polygon over a closed ring of planar points.
///
/// Construction validates the ring: a trailing closing vertex equal to the
/// first is accepted and dropped, but fewer than three distinct vertices,
/// zero enclosed area, non-finite coordinates or a self-intersecting outline
/// are rejected as `InvalidGeometry`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn try_new(mut ring: Vec<Point>) -> Result<Self> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidGeometry(
                "ring contains a non-finite coordinate".into(),
            ));
        }
        ring.dedup();
        if ring.len() < 3 {
            return Err(Error::InvalidGeometry(
                "ring needs at least 3 distinct vertices".into(),
            ));
        }
        let polygon = Self { vertices: ring };
        if polygon.area() <= EPS {
            return Err(Error::InvalidGeometry("ring encloses no area".into()));
        }
        if polygon.is_self_intersecting() {
            return Err(Error::InvalidGeometry("ring is self-intersecting".into()));
        }
        Ok(polygon)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Axis-aligned bounding box of the ring.
    pub fn bounds(&self) -> Rect {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for p in &self.vertices[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Rect::new(min, max)
    }

    /// Unsigned enclosed area (shoelace).
    pub fn area(&self) -> f64 {
        let mut twice = 0.0;
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        twice.abs() / 2.0
    }

    /// True when `p` lies inside the ring or on its outline.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if on_segment(p, a, b) {
                return true;
            }
        }
        // Even-odd ray cast for the interior case.
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y) {
                let x = vi.x + (p.y - vi.y) / (vj.y - vi.y) * (vj.x - vi.x);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Full-footprint containment: every corner of `rect` is inside the ring,
    /// no ring vertex pokes strictly into the rect, and no ring edge properly
    /// crosses a rect edge. Collinear touching along the outline does not
    /// disqualify, so cells flush with the boundary survive.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if !rect.corners().iter().all(|&c| self.contains(c)) {
            return false;
        }
        if self.vertices.iter().any(|&v| rect.contains_strictly(v)) {
            return false;
        }
        !self.crosses_rect(rect)
    }

    /// Closed-set area-overlap test between the ring and `rect`. Touching
    /// counts as overlap, which errs on the side of excluding cells.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        if rect.corners().iter().any(|&c| self.contains(c)) {
            return true;
        }
        if self.vertices.iter().any(|&v| rect.contains(v)) {
            return true;
        }
        if self.contains(rect.center()) {
            return true;
        }
        self.crosses_rect(rect)
    }

    fn crosses_rect(&self, rect: &Rect) -> bool {
        let corners = rect.corners();
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            for j in 0..4 {
                let c = corners[j];
                let d = corners[(j + 1) % 4];
                if properly_cross(a, b, c, d) {
                    return true;
                }
            }
        }
        false
    }

    fn is_self_intersecting(&self) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            for j in (i + 1)..n {
                // Skip edges sharing a vertex with edge i.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let c = self.vertices[j];
                let d = self.vertices[(j + 1) % n];
                if properly_cross(a, b, c, d) {
                    return true;
                }
            }
        }
        false
    }
}

/// Cross product of (b - a) x (p - a); sign gives the turn direction.
fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// True when `p` lies on the closed segment `ab`.
fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let tol = EPS * a.distance(b).max(1.0);
    if cross(a, b, p).abs() > tol {
        return false;
    }
    p.x >= a.x.min(b.x) - tol
        && p.x <= a.x.max(b.x) + tol
        && p.y >= a.y.min(b.y) - tol
        && p.y <= a.y.max(b.y) + tol
}

/// Strict segment crossing: interiors intersect in exactly one point.
/// Touching endpoints and collinear overlap do not count.
fn properly_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let tol_ab = EPS * a.distance(b).max(1.0);
    let tol_cd = EPS * c.distance(d).max(1.0);
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    ((d1 > tol_cd && d2 < -tol_cd) || (d1 < -tol_cd && d2 > tol_cd))
        && ((d3 > tol_ab && d4 < -tol_ab) || (d3 < -tol_ab && d4 > tol_ab))
}
