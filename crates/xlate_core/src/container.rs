use std::fmt;

use uuid::Uuid;

use crate::translate::TranslatorRegistry;
use crate::typemap::TypeMappingSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(Uuid);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Services a session resolves during compilation.
///
/// Assembled mutably (modules are registered while building it), then shared
/// immutably behind an `Arc` once a session uses it.
#[derive(Debug)]
pub struct ServiceContainer {
    id: ContainerId,
    translators: TranslatorRegistry,
    type_mappings: TypeMappingSource,
}

impl ServiceContainer {
    pub fn new() -> Self {
        ServiceContainer {
            id: ContainerId(Uuid::new_v4()),
            translators: TranslatorRegistry::new(),
            type_mappings: TypeMappingSource::new(),
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn translators(&self) -> &TranslatorRegistry {
        &self.translators
    }

    pub fn translators_mut(&mut self) -> &mut TranslatorRegistry {
        &mut self.translators
    }

    pub fn type_mappings(&self) -> &TypeMappingSource {
        &self.type_mappings
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}
