use std::fmt;
use std::sync::Arc;

use super::TypeDescriptor;

/// Memoizes type descriptors keyed by a facet value (e.g. a max length).
///
/// Lookups for a facet always return the same `Arc` once an entry has been
/// inserted. Two threads racing on a new facet may both build a descriptor,
/// only the one that wins the insert is ever handed out afterwards.
///
/// Entries are never evicted. Only use this for low cardinality facets.
pub struct FacetedTypeMappingCache {
    entries: scc::HashMap<u32, Arc<TypeDescriptor>>,
    /// Returned for "no bound".
    default: Arc<TypeDescriptor>,
    create: fn(u32) -> TypeDescriptor,
}

impl FacetedTypeMappingCache {
    pub fn new(default: Arc<TypeDescriptor>, create: fn(u32) -> TypeDescriptor) -> Self {
        FacetedTypeMappingCache {
            entries: scc::HashMap::new(),
            default,
            create,
        }
    }

    /// Get the descriptor for a facet, creating it if this is the first time
    /// we've seen it.
    ///
    /// `None` skips the cache entirely and returns the shared default.
    pub fn get_or_create(&self, facet: Option<u32>) -> Arc<TypeDescriptor> {
        let facet = match facet {
            Some(facet) => facet,
            None => return self.default.clone(),
        };

        if let Some(existing) = self.entries.read(&facet, |_, desc| desc.clone()) {
            return existing;
        }

        // Built outside the entry lock, may be thrown away if another thread
        // beat us to it.
        let created = Arc::new((self.create)(facet));
        self.entries
            .entry(facet)
            .or_insert(created)
            .get()
            .clone()
    }

    /// Number of cached facets, not counting the default.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FacetedTypeMappingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetedTypeMappingCache")
            .field("entries", &self.entries.len())
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::expr::datatype::ValueTypeId;

    static DEFAULT: LazyLock<Arc<TypeDescriptor>> =
        LazyLock::new(|| Arc::new(TypeDescriptor::new(ValueTypeId::Text, "text", None)));

    fn varchar(len: u32) -> TypeDescriptor {
        TypeDescriptor::new(
            ValueTypeId::Text,
            format!("character varying({len})"),
            Some(len),
        )
    }

    fn new_cache() -> FacetedTypeMappingCache {
        FacetedTypeMappingCache::new(DEFAULT.clone(), varchar)
    }

    #[test]
    fn same_facet_same_instance() {
        let cache = new_cache();

        let a = cache.get_or_create(Some(20));
        let b = cache.get_or_create(Some(20));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!("character varying(20)", a.store_type);

        let c = cache.get_or_create(Some(30));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(2, cache.len());
    }

    #[test]
    fn unbounded_uses_shared_default() {
        let cache1 = new_cache();
        let cache2 = new_cache();

        let a = cache1.get_or_create(None);
        let b = cache2.get_or_create(None);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &DEFAULT));

        // Default never lands in the map.
        assert!(cache1.is_empty());
    }

    #[test]
    fn concurrent_first_access_single_canonical() {
        let cache = new_cache();

        let results: Vec<Arc<TypeDescriptor>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_create(Some(64))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let canonical = cache.get_or_create(Some(64));
        for desc in results {
            assert!(Arc::ptr_eq(&canonical, &desc));
        }
        assert_eq!(1, cache.len());
    }
}
