use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Result, SemanticsError};
use crate::math::Point3;
use crate::semantics::{self, SemanticSurface, Semantics, SurfaceId, SurfacePath};

use super::boundary::{Boundaries, GeometryType, SurfaceBoundary};
use super::vertex::VertexPool;

/// One geometry of a city object.
///
/// Owns the dereferenced boundary structure and the semantic surface
/// table; shares the vertex pool with every other geometry of the model.
/// Construction either succeeds fully or fails; afterwards the geometry is
/// only mutated through explicit surface-table edits.
#[derive(Debug, Clone)]
pub struct Geometry {
    geometry_type: GeometryType,
    lod: Option<String>,
    boundaries: Boundaries<Point3>,
    surfaces: BTreeMap<SurfaceId, SemanticSurface>,
    vertices: Arc<VertexPool>,
    /// Next id handed out by [`Geometry::add_surface`]. Monotonic; ids are
    /// never reused, including ids of removed surfaces.
    next_surface_id: SurfaceId,
}

impl Geometry {
    /// Builds a geometry from raw, index-based boundaries.
    ///
    /// The boundaries are dereferenced against `vertices` and the semantic
    /// surface table is built eagerly, so reference and shape problems
    /// surface here rather than on first query.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the boundary nesting does not match
    /// `geometry_type`, a reference error if a vertex index exceeds the
    /// pool, and [`SemanticsError::UnsupportedGeometryType`] if semantics
    /// are supplied for a `MultiPoint`.
    pub fn new(
        geometry_type: GeometryType,
        lod: Option<String>,
        boundaries: &Boundaries<usize>,
        semantics: Option<&Semantics>,
        vertices: Arc<VertexPool>,
    ) -> Result<Self> {
        if semantics.is_some() && !geometry_type.supports_semantics() {
            return Err(
                SemanticsError::UnsupportedGeometryType(geometry_type.name().to_owned()).into(),
            );
        }
        let boundaries = boundaries.dereference(geometry_type, &vertices)?;
        let surfaces = semantics.map(semantics::build_surfaces).unwrap_or_default();
        let next_surface_id = surfaces.keys().next_back().map_or(0, |max| max + 1);
        Ok(Self {
            geometry_type,
            lod,
            boundaries,
            surfaces,
            vertices,
            next_surface_id,
        })
    }

    /// Geometry type of this geometry.
    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    /// Level-of-detail label, as defined by the source format.
    #[must_use]
    pub fn lod(&self) -> Option<&str> {
        self.lod.as_deref()
    }

    /// Dereferenced boundary structure.
    #[must_use]
    pub fn boundaries(&self) -> &Boundaries<Point3> {
        &self.boundaries
    }

    /// Shared vertex pool this geometry references.
    #[must_use]
    pub fn vertices(&self) -> &Arc<VertexPool> {
        &self.vertices
    }

    /// Full semantic surface table.
    #[must_use]
    pub fn surfaces(&self) -> &BTreeMap<SurfaceId, SemanticSurface> {
        &self.surfaces
    }

    /// Surfaces whose type matches `surface_type`, case-insensitively.
    ///
    /// Returns an empty map when nothing matches.
    #[must_use]
    pub fn get_surfaces(&self, surface_type: &str) -> BTreeMap<SurfaceId, &SemanticSurface> {
        self.surfaces
            .iter()
            .filter(|(_, s)| s.surface_type.eq_ignore_ascii_case(surface_type))
            .map(|(id, s)| (*id, s))
            .collect()
    }

    /// Boundary fragments for every path in `surface_idx`, in path order.
    ///
    /// # Errors
    ///
    /// Returns an unresolved-path error when a path does not fit the
    /// current boundary shape, e.g. after an external edit shrank it.
    pub fn get_surface_boundaries(
        &self,
        surface_idx: &[SurfacePath],
    ) -> Result<Vec<&SurfaceBoundary<Point3>>> {
        surface_idx
            .iter()
            .map(|path| self.boundaries.surface_at(path).map_err(Into::into))
            .collect()
    }

    /// Child surfaces of `surface`, resolved against the table.
    ///
    /// Ids that no longer resolve (left dangling by a split) are skipped;
    /// a surface without children yields an empty map.
    #[must_use]
    pub fn get_surface_children(
        &self,
        surface: &SemanticSurface,
    ) -> BTreeMap<SurfaceId, &SemanticSurface> {
        surface
            .children
            .iter()
            .filter_map(|id| self.surfaces.get(id).map(|s| (*id, s)))
            .collect()
    }

    /// Parent surface of `surface`, or `None` when no parent is set or the
    /// parent id no longer resolves.
    #[must_use]
    pub fn get_surface_parent(&self, surface: &SemanticSurface) -> Option<&SemanticSurface> {
        surface.parent.and_then(|id| self.surfaces.get(&id))
    }

    /// Mutable access to one surface, for attribute edits.
    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut SemanticSurface> {
        self.surfaces.get_mut(&id)
    }

    /// Inserts `surface` under a freshly minted id and returns the id.
    ///
    /// Minted ids are strictly greater than any id ever used in this
    /// geometry, so re-segmentation (remove one surface, add one per
    /// distinct outcome) never collides with existing or removed ids.
    pub fn add_surface(&mut self, surface: SemanticSurface) -> SurfaceId {
        let id = self.next_surface_id;
        self.next_surface_id += 1;
        self.surfaces.insert(id, surface);
        id
    }

    /// Removes a surface from the table, returning it if present.
    ///
    /// `parent`/`children` ids of other surfaces referencing `id` are left
    /// untouched; re-homing them is the caller's responsibility.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Option<SemanticSurface> {
        self.surfaces.remove(&id)
    }
}
