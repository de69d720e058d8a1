use serde::{Deserialize, Serialize};

/// Kind of a query index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// B-tree style sorted index
    Sorted,
    /// Full-text index
    Fulltext,
    /// Spatial index
    Geospatial,
}

/// One column of an index definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexField {
    /// Entity field the index column refers to
    pub name: String,

    /// Sort direction (ignored for non-sorted kinds)
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl IndexField {
    /// Create an ascending index column
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: true,
        }
    }

    /// Create a descending index column
    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: false,
        }
    }
}

/// Index definition of an entity
///
/// Index names are unique within an entity. Equality is structural: an
/// index with the same name but different columns or kind is a different
/// definition, which the diff engine reports as a conflict rather than an
/// addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryIndex {
    /// Index name, unique within the entity
    pub name: String,

    /// Index kind
    pub kind: IndexKind,

    /// Indexed columns in definition order
    pub fields: Vec<IndexField>,
}

impl QueryIndex {
    /// Create a sorted index over the given columns
    pub fn sorted(name: impl Into<String>, fields: Vec<IndexField>) -> Self {
        Self {
            name: name.into(),
            kind: IndexKind::Sorted,
            fields,
        }
    }
}
