//! Recursive spatial partitioning of a bounding box.
//!
//! Subdivides a model's axis-aligned bounding box into an equal-area
//! quadtree or equal-volume octree of a requested depth. The tiles are the
//! input of a (separate) per-tile extraction step; this module only
//! produces the boxes.

use tracing::debug;

use crate::error::{Result, TilingError};
use crate::math::Bbox;

/// Whether to partition on the xy-plane only or in all three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivisionMode {
    /// 2D: split x and y; every cell keeps the parent's full z-range.
    Quadtree,
    /// 3D: split x, y and z.
    Octree,
}

/// Result of a subdivision: a tree of bounding boxes.
#[derive(Debug, Clone, PartialEq)]
pub enum TileTree {
    /// An undivided box.
    Leaf(Bbox),
    /// One node per child box, 4 (quadtree) or 8 (octree) of them.
    Node(Vec<TileTree>),
}

impl TileTree {
    /// All leaf boxes, in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Bbox> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Bbox>) {
        match self {
            Self::Leaf(bbox) => out.push(bbox),
            Self::Node(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of leaf boxes.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node(children) => children.iter().map(TileTree::leaf_count).sum(),
        }
    }
}

/// The four xy-quadrants of `bbox`, spanning `minz..maxz` vertically.
///
/// Children are emitted north-west, north-east, south-west, south-east.
fn quad_children(bbox: &Bbox, minz: f64, maxz: f64) -> [Bbox; 4] {
    let cx = bbox.center_x();
    let cy = bbox.center_y();
    let nw = Bbox::new(bbox.minx, cy, minz, cx, bbox.maxy, maxz);
    let ne = Bbox::new(cx, cy, minz, bbox.maxx, bbox.maxy, maxz);
    let sw = Bbox::new(bbox.minx, bbox.miny, minz, cx, cy, maxz);
    let se = Bbox::new(cx, bbox.miny, minz, bbox.maxx, cy, maxz);
    [nw, ne, sw, se]
}

/// The eight octants of `bbox`: the lower-z tier first, then the upper,
/// each tier in quadrant order.
fn oct_children(bbox: &Bbox) -> [Bbox; 8] {
    let cz = bbox.center_z();
    let lower = quad_children(bbox, bbox.minz, cz);
    let upper = quad_children(bbox, cz, bbox.maxz);
    [
        lower[0], lower[1], lower[2], lower[3], upper[0], upper[1], upper[2], upper[3],
    ]
}

/// Recursively subdivides `bbox` to the requested depth.
///
/// `depth == 0` returns the box itself as a leaf. Splits happen at exact
/// floating-point midpoints, so for any node the children tile it with no
/// gap or overlap, and the output is fully determined by the inputs.
/// Degenerate boxes (zero extent on any axis) subdivide into degenerate
/// children without error; validating the box is the caller's concern, as
/// is bounding the cost (4^depth or 8^depth leaves).
#[must_use]
pub fn subdivide(bbox: Bbox, depth: u32, mode: SubdivisionMode) -> TileTree {
    if depth == 0 {
        return TileTree::Leaf(bbox);
    }
    let children = match mode {
        SubdivisionMode::Quadtree => quad_children(&bbox, bbox.minz, bbox.maxz).to_vec(),
        SubdivisionMode::Octree => oct_children(&bbox).to_vec(),
    };
    TileTree::Node(
        children
            .into_iter()
            .map(|child| subdivide(child, depth - 1, mode))
            .collect(),
    )
}

/// Creates an equal-area quadtree or equal-volume octree grid over `bbox`.
///
/// `cell_size` selects the mode: exactly 2 values (x, y) for a quadtree,
/// exactly 3 (x, y, z) for an octree; omitted means quadtree. The values
/// are in the units of the model's coordinate system and are validated
/// before any subdivision work begins.
///
/// # Errors
///
/// Returns [`TilingError::CellSizeArity`] for any other number of values,
/// and [`TilingError::CellSizeTooLarge`] when every compared axis extent of
/// `bbox` is smaller than the requested cell size.
pub fn create_grid(bbox: Bbox, depth: u32, cell_size: Option<&[f64]>) -> Result<TileTree> {
    let mode = match cell_size {
        Some([sx, sy]) => {
            debug!("2D partitioning");
            if bbox.dx() < *sx && bbox.dy() < *sy {
                return Err(TilingError::CellSizeTooLarge.into());
            }
            SubdivisionMode::Quadtree
        }
        Some([sx, sy, sz]) => {
            debug!("3D partitioning");
            if bbox.dx() < *sx && bbox.dy() < *sy && bbox.dz() < *sz {
                return Err(TilingError::CellSizeTooLarge.into());
            }
            SubdivisionMode::Octree
        }
        Some(values) => return Err(TilingError::CellSizeArity(values.len()).into()),
        None => SubdivisionMode::Quadtree,
    };
    Ok(subdivide(bbox, depth, mode))
}
