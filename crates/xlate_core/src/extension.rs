use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use tracing::debug;
use xlate_error::{Result, XlateError};

use crate::container::ServiceContainer;
use crate::translate::{ModuleKey, TranslationModule, TranslationRule};

/// A shippable bundle of translation rules for one database extension.
pub trait Extension: Debug + Sync + Send + 'static {
    /// The name of the extension, also used as the module key.
    const NAME: &'static str;

    /// Name of the session builder method that requests this extension.
    const USE_METHOD: &'static str;

    /// Name of the function that registers this extension's rules in a
    /// service container.
    const REGISTER_METHOD: &'static str;

    /// Fragment for configuration logging, e.g. "using Trigrams".
    const DEBUG_INFO: &'static str;

    const RULES: &'static [&'static dyn TranslationRule];
}

/// Marks an extension as requested for a session.
///
/// Owns activation (putting the rules into a container) and validation
/// (checking the container a session actually uses has them). Equality is by
/// module key, so requesting the same extension twice is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct ModuleExtension {
    module: TranslationModule,
    use_method: &'static str,
    register_method: &'static str,
}

impl ModuleExtension {
    pub const fn new<E: Extension>() -> Self {
        ModuleExtension {
            module: TranslationModule {
                key: ModuleKey(E::NAME),
                log_fragment: E::DEBUG_INFO,
                rules: E::RULES,
            },
            use_method: E::USE_METHOD,
            register_method: E::REGISTER_METHOD,
        }
    }

    pub fn key(&self) -> ModuleKey {
        self.module.key
    }

    pub fn name(&self) -> &'static str {
        self.module.key.0
    }

    pub fn log_fragment(&self) -> &'static str {
        self.module.log_fragment
    }

    /// Ensure this extension's rules are in the container's registry.
    ///
    /// Returns true if the rules were added, false if an equal module was
    /// already registered.
    pub fn activate(&self, container: &mut ServiceContainer) -> bool {
        let added = container.translators_mut().add_module(self.module);
        debug!(module = %self.key(), container = %container.id(), added, "activated extension");
        added
    }

    /// Check the container a session will use actually has this extension's
    /// rules.
    ///
    /// `None` means the session manages its own container, which is always
    /// assembled from the requested extensions, so there's nothing to check.
    ///
    /// Never mutates anything.
    pub fn validate(&self, container: Option<&ServiceContainer>) -> Result<()> {
        let container = match container {
            Some(container) => container,
            None => return Ok(()),
        };

        if container.translators().contains_module(self.key()) {
            return Ok(());
        }

        Err(XlateError::configuration(format!(
            "'{}' was called to use the {} extension, but '{}' was not called on the service container used by this session",
            self.use_method,
            self.name(),
            self.register_method,
        ))
        .with_field("module", self.name())
        .with_field("use_method", self.use_method)
        .with_field("register_method", self.register_method)
        .with_field("container", container.id()))
    }
}

impl PartialEq for ModuleExtension {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ModuleExtension {}

impl Hash for ModuleExtension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

/// Register an extension's rules in a container.
///
/// Extension crates wrap this in their own `register_*` function.
pub fn register_extension<E: Extension>(container: &mut ServiceContainer) -> &mut ServiceContainer {
    ModuleExtension::new::<E>().activate(container);
    container
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use xlate_error::ErrorKind;

    use super::testutil::*;
    use super::*;

    #[test]
    fn activate_twice_one_module() {
        let mut container = ServiceContainer::new();
        let ext = ModuleExtension::new::<ExtA>();

        assert!(ext.activate(&mut container));
        assert!(!ext.activate(&mut container));

        assert_eq!(1, container.translators().modules().len());
        assert_eq!(1, container.translators().rule_count());
    }

    #[test]
    fn validate_against_activated_container() {
        let mut container = ServiceContainer::new();
        let ext = ModuleExtension::new::<ExtA>();
        register_extension::<ExtA>(&mut container);

        ext.validate(Some(&container)).unwrap();
        // Pure, same result again.
        ext.validate(Some(&container)).unwrap();
    }

    #[test]
    fn validate_against_other_container_fails() {
        let mut c1 = ServiceContainer::new();
        let c2 = ServiceContainer::new();

        let ext = ModuleExtension::new::<ExtA>();
        ext.activate(&mut c1);

        let err = ext.validate(Some(&c2)).unwrap_err();
        assert_eq!(ErrorKind::Configuration, err.kind());
        assert_eq!(Some("A"), err.field("module"));
        assert_eq!(Some("use_a"), err.field("use_method"));
        assert_eq!(Some("register_a"), err.field("register_method"));
        assert_eq!(Some(c2.id().to_string().as_str()), err.field("container"));

        // Validation didn't register anything.
        assert!(c2.translators().modules().is_empty());
    }

    #[test]
    fn validate_without_container_is_noop() {
        ModuleExtension::new::<ExtA>().validate(None).unwrap();
    }

    #[test]
    fn other_module_does_not_satisfy_validation() {
        let mut container = ServiceContainer::new();
        register_extension::<ExtB>(&mut container);

        ModuleExtension::new::<ExtA>()
            .validate(Some(&container))
            .unwrap_err();
    }

    #[test]
    fn equality_by_key() {
        let a1 = ModuleExtension::new::<ExtA>();
        let a2 = ModuleExtension::new::<ExtA>();
        let b = ModuleExtension::new::<ExtB>();

        assert_eq!(a1, a2);
        assert_ne!(a1, b);

        let set: HashSet<_> = [a1, a2, b].into_iter().collect();
        assert_eq!(2, set.len());
    }
}
