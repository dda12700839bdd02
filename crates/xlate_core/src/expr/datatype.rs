use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the value type an expression produces, or the type that declares
/// a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTypeId {
    Null,
    Boolean,
    Int32,
    Int64,
    Float64,
    Text,
    Bytea,
    Geometry,
    #[serde(rename = "ltree")]
    LTree,
    #[serde(rename = "lquery")]
    LQuery,
    #[serde(rename = "ltxtquery")]
    LTxtQuery,
    /// Host-side collections (lists, arrays).
    Collection,
    /// Declaring type for static database functions that don't hang off a
    /// value, e.g. `DbFunctions.TrigramsSimilarity(a, b)`.
    DbFunctions,
}

impl fmt::Display for ValueTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float64 => "Float64",
            Self::Text => "Text",
            Self::Bytea => "Bytea",
            Self::Geometry => "Geometry",
            Self::LTree => "LTree",
            Self::LQuery => "LQuery",
            Self::LTxtQuery => "LTxtQuery",
            Self::Collection => "Collection",
            Self::DbFunctions => "DbFunctions",
        };
        write!(f, "{s}")
    }
}

/// A value type plus an optional length facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    pub id: ValueTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl DataType {
    pub const fn new(id: ValueTypeId) -> Self {
        DataType {
            id,
            max_length: None,
        }
    }

    pub const fn text(max_length: Option<u32>) -> Self {
        DataType {
            id: ValueTypeId::Text,
            max_length,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_length {
            Some(len) => write!(f, "{}({len})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}
