//! Semantic surface annotations.
//!
//! City-model geometries carry a parallel "semantics" structure: a list of
//! surface definitions (wall, roof, door, ...) and a nested `values` array,
//! one nesting level shallower than the boundaries, whose leaves say which
//! definition annotates which physical surface. This module indexes that
//! structure into a queryable table keyed by surface id.

use std::collections::BTreeMap;

/// Dense identifier of a semantic surface within one geometry.
///
/// Ids are assigned by position in the raw definitions list; ids minted
/// later (by surface splitting) are strictly greater than any id already
/// used.
pub type SurfaceId = u32;

/// Structural path locating one occurrence of a semantic surface inside
/// the `values` array and, equally, inside the boundary structure
/// (root-first index tuple down to the surface level).
pub type SurfacePath = Vec<usize>;

/// Scalar value of a semantic-surface attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Free-text value, e.g. a colour or material name.
    String(String),
    /// Numeric value, e.g. a slope in degrees.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// The nested `values` array of a semantics object.
///
/// Leaves are per-surface annotations (`None` = unannotated); `Nested`
/// levels mirror the shell/solid nesting of the owning geometry. A run of
/// `None` entries at a higher level stands for a wholly unannotated
/// shell or solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticsValues {
    /// Leaf run: one entry per surface.
    Indices(Vec<Option<SurfaceId>>),
    /// One entry per shell or solid.
    Nested(Vec<SemanticsValues>),
}

/// Raw semantic surface definition, as handed over by a loader.
///
/// `surface_type`, `parent` and `children` are the reserved keys of the
/// source format; everything else the definition carried lives in
/// `attributes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceDefinition {
    pub surface_type: String,
    pub parent: Option<SurfaceId>,
    pub children: Vec<SurfaceId>,
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Raw semantics object of a geometry: definitions plus the values array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Semantics {
    pub surfaces: Vec<SurfaceDefinition>,
    pub values: Option<SemanticsValues>,
}

/// A semantic surface, ready for querying.
///
/// `surface_idx` holds one path per physical occurrence of this surface in
/// the owning geometry's boundaries; a single id may legitimately annotate
/// several surfaces. It is empty for definitions never referenced in the
/// values array.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticSurface {
    pub surface_type: String,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub parent: Option<SurfaceId>,
    pub children: Vec<SurfaceId>,
    pub surface_idx: Vec<SurfacePath>,
}

/// Maps every surface id occurring in `values` to the paths where it
/// occurs, in depth-first, left-to-right traversal order.
///
/// Unannotated (`None`) leaves contribute nothing; an empty or fully
/// unannotated array yields an empty map.
#[must_use]
pub fn index_values(values: &SemanticsValues) -> BTreeMap<SurfaceId, Vec<SurfacePath>> {
    let mut index = BTreeMap::new();
    let mut path = Vec::new();
    collect_paths(values, &mut path, &mut index);
    index
}

fn collect_paths(
    node: &SemanticsValues,
    path: &mut Vec<usize>,
    index: &mut BTreeMap<SurfaceId, Vec<SurfacePath>>,
) {
    match node {
        SemanticsValues::Indices(ids) => {
            for (i, id) in ids.iter().enumerate() {
                if let Some(id) = id {
                    path.push(i);
                    index.entry(*id).or_default().push(path.clone());
                    path.pop();
                }
            }
        }
        SemanticsValues::Nested(children) => {
            for (i, child) in children.iter().enumerate() {
                path.push(i);
                collect_paths(child, path, index);
                path.pop();
            }
        }
    }
}

/// Builds the surface table from a raw semantics object.
///
/// Each definition becomes a [`SemanticSurface`] keyed by its position in
/// the definitions list, with `surface_idx` taken from [`index_values`].
/// Definitions never referenced in the values array are kept with an empty
/// `surface_idx`.
#[must_use]
pub fn build_surfaces(semantics: &Semantics) -> BTreeMap<SurfaceId, SemanticSurface> {
    let mut paths = semantics
        .values
        .as_ref()
        .map(index_values)
        .unwrap_or_default();

    let mut table = BTreeMap::new();
    for (id, def) in (0..).zip(&semantics.surfaces) {
        table.insert(
            id,
            SemanticSurface {
                surface_type: def.surface_type.clone(),
                attributes: def.attributes.clone(),
                parent: def.parent,
                children: def.children.clone(),
                surface_idx: paths.remove(&id).unwrap_or_default(),
            },
        );
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(entries: &[Option<SurfaceId>]) -> SemanticsValues {
        SemanticsValues::Indices(entries.to_vec())
    }

    /// Values array of a two-solid composite: the first solid has two
    /// annotated shells, the second is unannotated.
    fn composite_values() -> SemanticsValues {
        SemanticsValues::Nested(vec![
            SemanticsValues::Nested(vec![
                ids(&[Some(0), Some(1), Some(2), None]),
                ids(&[Some(0), Some(1), Some(2), None]),
            ]),
            ids(&[None]),
        ])
    }

    fn resolve(values: &SemanticsValues, path: &[usize]) -> Option<SurfaceId> {
        match (values, path) {
            (SemanticsValues::Indices(entries), [i]) => entries.get(*i).copied().flatten(),
            (SemanticsValues::Nested(children), [i, rest @ ..]) => {
                children.get(*i).and_then(|c| resolve(c, rest))
            }
            _ => None,
        }
    }

    #[test]
    fn index_of_unannotated_values_is_empty() {
        assert!(index_values(&ids(&[None])).is_empty());
        assert!(index_values(&SemanticsValues::Nested(vec![])).is_empty());
    }

    #[test]
    fn index_of_nested_values() {
        let index = index_values(&composite_values());
        let expected: BTreeMap<SurfaceId, Vec<SurfacePath>> = [
            (0, vec![vec![0, 0, 0], vec![0, 1, 0]]),
            (1, vec![vec![0, 0, 1], vec![0, 1, 1]]),
            (2, vec![vec![0, 0, 2], vec![0, 1, 2]]),
        ]
        .into_iter()
        .collect();
        assert_eq!(index, expected);
    }

    #[test]
    fn index_of_flat_values() {
        let index = index_values(&ids(&[Some(0), None, Some(0), Some(1)]));
        let expected: BTreeMap<SurfaceId, Vec<SurfacePath>> =
            [(0, vec![vec![0], vec![2]]), (1, vec![vec![3]])]
                .into_iter()
                .collect();
        assert_eq!(index, expected);
    }

    #[test]
    fn indexed_paths_resolve_back_to_their_id() {
        let values = composite_values();
        for (id, paths) in index_values(&values) {
            assert!(!paths.is_empty());
            for path in paths {
                assert_eq!(resolve(&values, &path), Some(id));
            }
        }
    }

    #[test]
    fn build_table_from_definitions() {
        let semantics = Semantics {
            surfaces: vec![
                SurfaceDefinition {
                    surface_type: "WallSurface".to_owned(),
                    parent: Some(1),
                    children: vec![2],
                    attributes: [("slope".to_owned(), AttributeValue::from(33.4))]
                        .into_iter()
                        .collect(),
                },
                SurfaceDefinition {
                    surface_type: "RoofSurface".to_owned(),
                    children: vec![0],
                    attributes: [("slope".to_owned(), AttributeValue::from(66.6))]
                        .into_iter()
                        .collect(),
                    ..SurfaceDefinition::default()
                },
                SurfaceDefinition {
                    surface_type: "Door".to_owned(),
                    parent: Some(0),
                    attributes: [("colour".to_owned(), AttributeValue::from("blue"))]
                        .into_iter()
                        .collect(),
                    ..SurfaceDefinition::default()
                },
            ],
            values: Some(composite_values()),
        };

        let table = build_surfaces(&semantics);
        assert_eq!(table.len(), 3);

        let wall = &table[&0];
        assert_eq!(wall.surface_type, "WallSurface");
        assert_eq!(wall.parent, Some(1));
        assert_eq!(wall.children, vec![2]);
        assert_eq!(
            wall.attributes.get("slope"),
            Some(&AttributeValue::Number(33.4))
        );
        assert_eq!(wall.surface_idx, vec![vec![0, 0, 0], vec![0, 1, 0]]);

        let roof = &table[&1];
        assert_eq!(roof.surface_type, "RoofSurface");
        assert_eq!(roof.parent, None);
        assert_eq!(roof.surface_idx, vec![vec![0, 0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn unreferenced_definition_keeps_empty_surface_idx() {
        let semantics = Semantics {
            surfaces: vec![
                SurfaceDefinition {
                    surface_type: "GroundSurface".to_owned(),
                    ..SurfaceDefinition::default()
                },
                SurfaceDefinition {
                    surface_type: "RoofSurface".to_owned(),
                    ..SurfaceDefinition::default()
                },
            ],
            values: Some(ids(&[Some(1), Some(1)])),
        };
        let table = build_surfaces(&semantics);
        assert!(table[&0].surface_idx.is_empty());
        assert_eq!(table[&1].surface_idx, vec![vec![0], vec![1]]);
    }

    #[test]
    fn missing_values_leave_all_definitions_unreferenced() {
        let semantics = Semantics {
            surfaces: vec![SurfaceDefinition {
                surface_type: "WallSurface".to_owned(),
                ..SurfaceDefinition::default()
            }],
            values: None,
        };
        let table = build_surfaces(&semantics);
        assert_eq!(table.len(), 1);
        assert!(table[&0].surface_idx.is_empty());
    }
}
