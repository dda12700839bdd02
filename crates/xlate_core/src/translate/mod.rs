use std::fmt::{self, Debug};

use tracing::{debug, trace};

use crate::expr::Expression;
use crate::expr::method_call_expr::MethodCallExpr;

/// A rewrite rule turning a host method call into a native database
/// expression.
///
/// Rules hold no mutable state. Matching and producing the replacement happen
/// in one step: a rule that returns `Some` has fully consumed the call.
///
/// A rule must return `None` for any call on a declaring type it doesn't own,
/// even if the method name is one it knows on its own type.
pub trait TranslationRule: Debug + Sync + Send {
    fn translate(&self, call: &MethodCallExpr) -> Option<Expression>;
}

/// Uniqueness key of a module. Registering two modules with the same key keeps
/// only the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleKey(pub &'static str);

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named bundle of rules for one database extension.
#[derive(Debug, Clone, Copy)]
pub struct TranslationModule {
    pub key: ModuleKey,
    /// Short description for configuration logging, e.g. "using Trigrams".
    pub log_fragment: &'static str,
    /// Rules consulted in order.
    pub rules: &'static [&'static dyn TranslationRule],
}

impl PartialEq for TranslationModule {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TranslationModule {}

/// Ordered set of modules consulted for every method call during compilation.
///
/// Modules are only ever added. Resolution is first match wins in
/// registration order, so the result for a given call depends only on the
/// order modules were added.
#[derive(Debug, Default)]
pub struct TranslatorRegistry {
    modules: Vec<TranslationModule>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module if one with the same key isn't already present.
    ///
    /// Returns true if the module was added.
    pub fn add_module(&mut self, module: TranslationModule) -> bool {
        if self.contains_module(module.key) {
            debug!(module = %module.key, "module already registered, skipping");
            return false;
        }

        debug!(module = %module.key, rules = module.rules.len(), "registering translation module");
        self.modules.push(module);
        true
    }

    pub fn contains_module(&self, key: ModuleKey) -> bool {
        self.modules.iter().any(|m| m.key == key)
    }

    pub fn modules(&self) -> &[TranslationModule] {
        &self.modules
    }

    /// Total number of rules across all modules.
    pub fn rule_count(&self) -> usize {
        self.modules.iter().map(|m| m.rules.len()).sum()
    }

    /// Offer a call to every rule in registration order, returning the output
    /// of the first rule that matches.
    ///
    /// `None` means no module recognizes the call. That's not an error here,
    /// the caller decides what to do with untranslated calls.
    pub fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        for module in &self.modules {
            for rule in module.rules {
                if let Some(expr) = rule.translate(call) {
                    trace!(module = %module.key, call = %call.qualified_name(), "translated method call");
                    return Some(expr);
                }
            }
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::expr::datatype::ValueTypeId;
    use crate::expr::function;
    use crate::signature::SignatureKey;

    /// Translates `Geometry.Covers(Geometry)` into a call to a fixed function
    /// name.
    #[derive(Debug)]
    pub struct CoversRule(pub &'static str);

    const COVERS: SignatureKey =
        SignatureKey::instance(ValueTypeId::Geometry, "Covers", &[ValueTypeId::Geometry]);

    impl TranslationRule for CoversRule {
        fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
            if !COVERS.matches(call) {
                return None;
            }
            Some(function(self.0, call.receiver_and_args()))
        }
    }

    pub const MODULE_A: TranslationModule = TranslationModule {
        key: ModuleKey("A"),
        log_fragment: "using A",
        rules: &[&CoversRule("a_covers")],
    };

    pub const MODULE_B: TranslationModule = TranslationModule {
        key: ModuleKey("B"),
        log_fragment: "using B",
        rules: &[&CoversRule("b_covers")],
    };
}

#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;
    use crate::expr::datatype::ValueTypeId;
    use crate::expr::{column, function, method};

    fn covers_call() -> MethodCallExpr {
        method(
            ValueTypeId::Geometry,
            column("shape", ValueTypeId::Geometry),
            "Covers",
            [column("other", ValueTypeId::Geometry).into()],
        )
    }

    #[test]
    fn empty_registry_no_match() {
        let registry = TranslatorRegistry::new();
        assert_eq!(None, registry.translate(&covers_call()));
    }

    #[test]
    fn first_registered_wins() {
        let mut registry = TranslatorRegistry::new();
        registry.add_module(MODULE_A);
        registry.add_module(MODULE_B);

        let expected = function("a_covers", [
            column("shape", ValueTypeId::Geometry).into(),
            column("other", ValueTypeId::Geometry).into(),
        ]);

        // Repeated calls give the same answer.
        for _ in 0..3 {
            assert_eq!(Some(expected.clone()), registry.translate(&covers_call()));
        }

        let mut registry = TranslatorRegistry::new();
        registry.add_module(MODULE_B);
        registry.add_module(MODULE_A);

        let got = registry.translate(&covers_call()).unwrap();
        assert_eq!("b_covers(shape, other)", got.to_string());
    }

    #[test]
    fn add_module_is_idempotent() {
        let mut registry = TranslatorRegistry::new();
        assert!(registry.add_module(MODULE_A));
        assert!(!registry.add_module(MODULE_A));

        assert_eq!(1, registry.modules().len());
        assert_eq!(1, registry.rule_count());
        assert!(registry.contains_module(ModuleKey("A")));
        assert!(!registry.contains_module(ModuleKey("B")));
    }

    #[derive(Debug)]
    struct BrokenRule;

    impl TranslationRule for BrokenRule {
        fn translate(&self, _call: &MethodCallExpr) -> Option<Expression> {
            panic!("broken rule")
        }
    }

    const MODULE_BROKEN: TranslationModule = TranslationModule {
        key: ModuleKey("Broken"),
        log_fragment: "using Broken",
        rules: &[&BrokenRule],
    };

    #[test]
    #[should_panic(expected = "broken rule")]
    fn panicking_rule_not_skipped() {
        let mut registry = TranslatorRegistry::new();
        registry.add_module(MODULE_BROKEN);
        registry.add_module(MODULE_A);

        // Must not fall through to a_covers.
        registry.translate(&covers_call());
    }

    #[test]
    fn other_type_same_name_no_match() {
        let mut registry = TranslatorRegistry::new();
        registry.add_module(MODULE_A);

        let call = method(
            ValueTypeId::Collection,
            column("items", ValueTypeId::Collection),
            "Covers",
            [column("other", ValueTypeId::Geometry).into()],
        );
        assert_eq!(None, registry.translate(&call));
    }
}
