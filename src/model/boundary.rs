use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;
use crate::math::Point3;

use super::vertex::VertexPool;

/// Geometry type of a city object, fixing the nesting depth of its
/// boundary structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    /// Flat sequence of points (depth 1).
    MultiPoint,
    /// Sequence of surfaces, each a sequence of rings (depth 3).
    MultiSurface,
    /// Like `MultiSurface`, but the surfaces form a connected composite.
    CompositeSurface,
    /// Sequence of shells, each a sequence of surfaces (depth 4).
    Solid,
    /// Sequence of solids (depth 5).
    MultiSolid,
    /// Like `MultiSolid`, but the solids form a connected composite.
    CompositeSolid,
}

impl GeometryType {
    /// Canonical name of the type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MultiPoint => "MultiPoint",
            Self::MultiSurface => "MultiSurface",
            Self::CompositeSurface => "CompositeSurface",
            Self::Solid => "Solid",
            Self::MultiSolid => "MultiSolid",
            Self::CompositeSolid => "CompositeSolid",
        }
    }

    /// Required nesting depth of the boundary structure, counting the
    /// leaf sequence of vertices as one level.
    #[must_use]
    pub fn nesting_depth(self) -> usize {
        match self {
            Self::MultiPoint => 1,
            Self::MultiSurface | Self::CompositeSurface => 3,
            Self::Solid => 4,
            Self::MultiSolid | Self::CompositeSolid => 5,
        }
    }

    /// Whether semantic surfaces are defined for this geometry type.
    ///
    /// Semantics annotate surfaces, so they are undefined for `MultiPoint`.
    #[must_use]
    pub fn supports_semantics(self) -> bool {
        !matches!(self, Self::MultiPoint)
    }

    /// Name(s) of the type group sharing this type's nesting depth,
    /// used in shape-mismatch error messages.
    fn group_name(self) -> &'static str {
        match self {
            Self::MultiPoint => "MultiPoint",
            Self::MultiSurface | Self::CompositeSurface => "MultiSurface or CompositeSurface",
            Self::Solid => "Solid",
            Self::MultiSolid | Self::CompositeSolid => "MultiSolid or CompositeSolid",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryType {
    type Err = GeometryError;

    /// Parses a geometry type name, case-insensitively.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "multipoint" => Ok(Self::MultiPoint),
            "multisurface" => Ok(Self::MultiSurface),
            "compositesurface" => Ok(Self::CompositeSurface),
            "solid" => Ok(Self::Solid),
            "multisolid" => Ok(Self::MultiSolid),
            "compositesolid" => Ok(Self::CompositeSolid),
            _ => Err(GeometryError::UnknownType(s.to_owned())),
        }
    }
}

/// A closed ring of vertices.
pub type Ring<V> = Vec<V>;

/// A surface: an outer ring followed by any inner (hole) rings.
pub type SurfaceBoundary<V> = Vec<Ring<V>>;

/// A shell: the surfaces enclosing one volume.
pub type ShellBoundary<V> = Vec<SurfaceBoundary<V>>;

/// A solid: an outer shell followed by any inner (void) shells.
pub type SolidBoundary<V> = Vec<ShellBoundary<V>>;

/// Boundary structure of a geometry, with one variant per nesting depth.
///
/// The leaf type `V` is a vertex index (`usize`) in the raw form handed
/// over by a loader, or a coordinate ([`Point3`]) once dereferenced
/// against a [`VertexPool`]. Encoding the depth in the variant turns
/// depth-mismatch bugs into construction-time errors instead of silent
/// misreads.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundaries<V> {
    /// Depth 1: `MultiPoint`.
    Points(Vec<V>),
    /// Depth 3: `MultiSurface` / `CompositeSurface`.
    Surfaces(Vec<SurfaceBoundary<V>>),
    /// Depth 4: `Solid`.
    Shells(Vec<ShellBoundary<V>>),
    /// Depth 5: `MultiSolid` / `CompositeSolid`.
    Solids(Vec<SolidBoundary<V>>),
}

impl<V> Boundaries<V> {
    /// Nesting depth of this structure, counting the leaf sequence as one.
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        match self {
            Self::Points(_) => 1,
            Self::Surfaces(_) => 3,
            Self::Shells(_) => 4,
            Self::Solids(_) => 5,
        }
    }

    /// Checks that this structure has the nesting depth required by
    /// `geometry_type`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::BoundaryShape`] naming the declared type
    /// group when the depths disagree.
    pub fn check_shape(
        &self,
        geometry_type: GeometryType,
    ) -> std::result::Result<(), GeometryError> {
        if self.nesting_depth() == geometry_type.nesting_depth() {
            Ok(())
        } else {
            Err(GeometryError::BoundaryShape {
                expected: geometry_type.group_name(),
            })
        }
    }

    /// Resolves a semantic-surface path to the surface it locates.
    ///
    /// Paths address the surface level: one index for a surface sequence,
    /// `[shell, surface]` for a solid, `[solid, shell, surface]` for a
    /// multi/composite solid.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnresolvedSurfacePath`] if the path arity
    /// does not fit this structure's depth or an index is out of range.
    pub fn surface_at(
        &self,
        path: &[usize],
    ) -> std::result::Result<&SurfaceBoundary<V>, GeometryError> {
        let unresolved = || GeometryError::UnresolvedSurfacePath {
            path: path.to_vec(),
        };
        match (self, path) {
            (Self::Surfaces(surfaces), [s]) => surfaces.get(*s).ok_or_else(unresolved),
            (Self::Shells(shells), [sh, s]) => shells
                .get(*sh)
                .and_then(|shell| shell.get(*s))
                .ok_or_else(unresolved),
            (Self::Solids(solids), [so, sh, s]) => solids
                .get(*so)
                .and_then(|solid| solid.get(*sh))
                .and_then(|shell| shell.get(*s))
                .ok_or_else(unresolved),
            _ => Err(unresolved()),
        }
    }
}

impl Boundaries<usize> {
    /// Replaces every vertex index with its coordinates from `pool`,
    /// preserving nesting shape and ordering exactly.
    ///
    /// The transform is pure and idempotent: dereferencing the same raw
    /// structure against the same pool twice yields equal results. Empty
    /// sequences at any level pass through as empty sequences.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::BoundaryShape`] if the structure's depth
    /// does not match `geometry_type`, or
    /// [`GeometryError::VertexOutOfRange`] if an index exceeds the pool.
    pub fn dereference(
        &self,
        geometry_type: GeometryType,
        pool: &VertexPool,
    ) -> std::result::Result<Boundaries<Point3>, GeometryError> {
        self.check_shape(geometry_type)?;
        match self {
            Self::Points(points) => Ok(Boundaries::Points(deref_ring(points, pool)?)),
            Self::Surfaces(surfaces) => Ok(Boundaries::Surfaces(
                surfaces
                    .iter()
                    .map(|s| deref_surface(s, pool))
                    .collect::<std::result::Result<_, _>>()?,
            )),
            Self::Shells(shells) => Ok(Boundaries::Shells(
                shells
                    .iter()
                    .map(|s| deref_shell(s, pool))
                    .collect::<std::result::Result<_, _>>()?,
            )),
            Self::Solids(solids) => Ok(Boundaries::Solids(
                solids
                    .iter()
                    .map(|s| deref_solid(s, pool))
                    .collect::<std::result::Result<_, _>>()?,
            )),
        }
    }
}

fn deref_ring(
    ring: &Ring<usize>,
    pool: &VertexPool,
) -> std::result::Result<Ring<Point3>, GeometryError> {
    ring.iter().map(|&i| pool.get(i)).collect()
}

fn deref_surface(
    surface: &SurfaceBoundary<usize>,
    pool: &VertexPool,
) -> std::result::Result<SurfaceBoundary<Point3>, GeometryError> {
    surface.iter().map(|r| deref_ring(r, pool)).collect()
}

fn deref_shell(
    shell: &ShellBoundary<usize>,
    pool: &VertexPool,
) -> std::result::Result<ShellBoundary<Point3>, GeometryError> {
    shell.iter().map(|s| deref_surface(s, pool)).collect()
}

fn deref_solid(
    solid: &SolidBoundary<usize>,
    pool: &VertexPool,
) -> std::result::Result<SolidBoundary<Point3>, GeometryError> {
    solid.iter().map(|s| deref_shell(s, pool)).collect()
}
