//! Accent stripping via the unaccent extension.
use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::SessionBuilder;
use xlate_core::expr::datatype::ValueTypeId;
use xlate_core::expr::method_call_expr::MethodCallExpr;
use xlate_core::expr::{Expression, function};
use xlate_core::extension::{Extension, register_extension};
use xlate_core::signature::SignatureKey;
use xlate_core::translate::TranslationRule;

// The two-argument form takes the dictionary first, as unaccent() does.
const SIGNATURES: &[SignatureKey] = &[
    SignatureKey::function(ValueTypeId::DbFunctions, "Unaccent", &[ValueTypeId::Text]),
    SignatureKey::function(ValueTypeId::DbFunctions, "Unaccent", &[
        ValueTypeId::Text,
        ValueTypeId::Text,
    ]),
];

#[derive(Debug, Clone, Copy)]
pub struct UnaccentTranslator;

impl TranslationRule for UnaccentTranslator {
    fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        if !SIGNATURES.iter().any(|sig| sig.matches(call)) {
            return None;
        }
        Some(function("unaccent", call.args.iter().cloned()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UnaccentExtension;

impl Extension for UnaccentExtension {
    const NAME: &str = "Unaccent";
    const USE_METHOD: &str = "use_unaccent";
    const REGISTER_METHOD: &str = "register_unaccent";
    const DEBUG_INFO: &str = "using Unaccent";
    const RULES: &'static [&'static dyn TranslationRule] = &[&UnaccentTranslator];
}

pub fn register_unaccent(container: &mut ServiceContainer) -> &mut ServiceContainer {
    register_extension::<UnaccentExtension>(container)
}

pub trait UnaccentSessionBuilderExt {
    fn use_unaccent(self) -> Self;
}

impl UnaccentSessionBuilderExt for SessionBuilder {
    fn use_unaccent(self) -> Self {
        self.use_extension::<UnaccentExtension>()
    }
}
