//! Fuzzy string matching functions (soundex, levenshtein, metaphone).
pub mod translator;

use translator::FuzzyStringMatchTranslator;
use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::SessionBuilder;
use xlate_core::extension::{Extension, register_extension};
use xlate_core::translate::TranslationRule;

#[derive(Debug, Clone, Copy)]
pub struct FuzzyStringMatchExtension;

impl Extension for FuzzyStringMatchExtension {
    const NAME: &str = "FuzzyStringMatch";
    const USE_METHOD: &str = "use_fuzzystrmatch";
    const REGISTER_METHOD: &str = "register_fuzzystrmatch";
    const DEBUG_INFO: &str = "using FuzzyStringMatch";
    const RULES: &'static [&'static dyn TranslationRule] = &[&FuzzyStringMatchTranslator];
}

pub fn register_fuzzystrmatch(container: &mut ServiceContainer) -> &mut ServiceContainer {
    register_extension::<FuzzyStringMatchExtension>(container)
}

pub trait FuzzyStringMatchSessionBuilderExt {
    fn use_fuzzystrmatch(self) -> Self;
}

impl FuzzyStringMatchSessionBuilderExt for SessionBuilder {
    fn use_fuzzystrmatch(self) -> Self {
        self.use_extension::<FuzzyStringMatchExtension>()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use xlate_core::engine::session::Session;
    use xlate_core::expr::datatype::ValueTypeId;
    use xlate_core::expr::{column, static_method};

    use super::*;

    #[test]
    fn external_container() {
        let mut container = ServiceContainer::new();
        register_fuzzystrmatch(&mut container);

        let session = Session::builder()
            .use_fuzzystrmatch()
            .with_service_container(Arc::new(container))
            .build()
            .unwrap();

        let call = static_method(ValueTypeId::DbFunctions, "DoubleMetaphone", [column(
            "name",
            ValueTypeId::Text,
        )
        .into()]);
        assert_eq!("dmetaphone(name)", session.compile(call.into()).unwrap().sql);
    }
}
