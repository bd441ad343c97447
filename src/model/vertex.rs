use crate::error::GeometryError;
use crate::math::{Bbox, Point3};

/// Shared pool of vertex coordinates.
///
/// City models store every coordinate exactly once; geometries reference
/// entries by position instead of carrying copies. The pool is immutable
/// while any geometry references it, so it can be shared behind an
/// [`std::sync::Arc`] across threads without coordination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexPool {
    points: Vec<Point3>,
}

impl VertexPool {
    /// Creates a pool from a list of points.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Number of vertices in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the pool holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Looks up the vertex at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::VertexOutOfRange`] if `index` is not a valid
    /// position in the pool.
    pub fn get(&self, index: usize) -> std::result::Result<Point3, GeometryError> {
        self.points
            .get(index)
            .copied()
            .ok_or(GeometryError::VertexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    /// Iterates over the vertices in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &Point3> {
        self.points.iter()
    }

    /// Axis-aligned bounding box over the whole pool.
    ///
    /// Returns `None` for an empty pool, since a bounding box over nothing
    /// has no meaningful extents.
    #[must_use]
    pub fn bbox(&self) -> Option<Bbox> {
        let first = self.points.first()?;
        let mut bbox = Bbox::new(first.x, first.y, first.z, first.x, first.y, first.z);
        for p in &self.points[1..] {
            bbox.minx = bbox.minx.min(p.x);
            bbox.miny = bbox.miny.min(p.y);
            bbox.minz = bbox.minz.min(p.z);
            bbox.maxx = bbox.maxx.max(p.x);
            bbox.maxy = bbox.maxy.max(p.y);
            bbox.maxz = bbox.maxz.max(p.z);
        }
        Some(bbox)
    }
}

impl From<Vec<[f64; 3]>> for VertexPool {
    fn from(coords: Vec<[f64; 3]>) -> Self {
        Self::new(
            coords
                .into_iter()
                .map(|[x, y, z]| Point3::new(x, y, z))
                .collect(),
        )
    }
}
