pub mod cache;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use cache::FacetedTypeMappingCache;

use crate::expr::datatype::{DataType, ValueTypeId};

/// Describes how a value type is stored in the database.
///
/// Immutable once created, shared freely between compilations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub value_type: ValueTypeId,
    /// Name of the database type, e.g. `character varying(20)`.
    pub store_type: String,
    pub size: Option<u32>,
}

impl TypeDescriptor {
    pub fn new(value_type: ValueTypeId, store_type: impl Into<String>, size: Option<u32>) -> Self {
        TypeDescriptor {
            value_type,
            store_type: store_type.into(),
            size,
        }
    }
}

/// Unbounded text, shared by every mapping source in the process.
static UNBOUNDED_TEXT: LazyLock<Arc<TypeDescriptor>> =
    LazyLock::new(|| Arc::new(TypeDescriptor::new(ValueTypeId::Text, "text", None)));

/// Mappings for types without facets.
static FIXED_MAPPINGS: LazyLock<HashMap<ValueTypeId, Arc<TypeDescriptor>>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();

        let mut insert = |id: ValueTypeId, store_type: &str| {
            map.insert(id, Arc::new(TypeDescriptor::new(id, store_type, None)));
        };

        insert(ValueTypeId::Boolean, "boolean");
        insert(ValueTypeId::Int32, "integer");
        insert(ValueTypeId::Int64, "bigint");
        insert(ValueTypeId::Float64, "double precision");
        insert(ValueTypeId::Bytea, "bytea");
        insert(ValueTypeId::Geometry, "geometry");
        insert(ValueTypeId::LTree, "ltree");
        insert(ValueTypeId::LQuery, "lquery");
        insert(ValueTypeId::LTxtQuery, "ltxtquery");

        map
    });

fn varchar(max_length: u32) -> TypeDescriptor {
    TypeDescriptor::new(
        ValueTypeId::Text,
        format!("character varying({max_length})"),
        Some(max_length),
    )
}

/// Resolves database store types for value types.
#[derive(Debug)]
pub struct TypeMappingSource {
    text: FacetedTypeMappingCache,
}

impl TypeMappingSource {
    pub fn new() -> Self {
        TypeMappingSource {
            text: FacetedTypeMappingCache::new(UNBOUNDED_TEXT.clone(), varchar),
        }
    }

    /// Find the store type for a data type.
    ///
    /// Returns None for types that only exist on the host side.
    pub fn find_mapping(&self, datatype: &DataType) -> Option<Arc<TypeDescriptor>> {
        match datatype.id {
            ValueTypeId::Text => Some(self.text.get_or_create(datatype.max_length)),
            id => FIXED_MAPPINGS.get(&id).cloned(),
        }
    }

    pub fn text_cache(&self) -> &FacetedTypeMappingCache {
        &self.text
    }
}

impl Default for TypeMappingSource {
    fn default() -> Self {
        Self::new()
    }
}
