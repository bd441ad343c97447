pub mod boundary;
pub mod geometry;
pub mod vertex;

pub use boundary::{
    Boundaries, GeometryType, Ring, ShellBoundary, SolidBoundary, SurfaceBoundary,
};
pub use geometry::Geometry;
pub use vertex::VertexPool;
