use thiserror::Error;

/// Top-level error type for the Urbis geometry kernel.
#[derive(Debug, Error)]
pub enum UrbisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Semantics(#[from] SemanticsError),

    #[error(transparent)]
    Tiling(#[from] TilingError),
}

/// Errors related to geometry boundaries and vertex references.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("unknown geometry type: {0}")]
    UnknownType(String),

    #[error("boundary definition does not correspond to {expected}")]
    BoundaryShape {
        /// Name(s) of the geometry type(s) whose nesting depth was declared.
        expected: &'static str,
    },

    #[error("vertex index {index} is out of range for a pool of {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("surface path {path:?} does not resolve within the boundaries")]
    UnresolvedSurfacePath { path: Vec<usize> },
}

/// Errors related to semantic surfaces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticsError {
    #[error("semantic surfaces are undefined for {0} geometry")]
    UnsupportedGeometryType(String),
}

/// Errors related to spatial subdivision of a bounding box.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TilingError {
    #[error("cell size must have exactly 2 or 3 values, got {0}")]
    CellSizeArity(usize),

    #[error("cell size is larger than the bounding box")]
    CellSizeTooLarge,
}

/// Convenience type alias for results using [`UrbisError`].
pub type Result<T> = std::result::Result<T, UrbisError>;
