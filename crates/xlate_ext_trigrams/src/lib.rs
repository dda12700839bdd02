//! Trigram similarity (pg_trgm) functions and operators.
pub mod translator;

use translator::TrigramsTranslator;
use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::SessionBuilder;
use xlate_core::extension::{Extension, register_extension};
use xlate_core::translate::TranslationRule;

#[derive(Debug, Clone, Copy)]
pub struct TrigramsExtension;

impl Extension for TrigramsExtension {
    const NAME: &str = "Trigrams";
    const USE_METHOD: &str = "use_trigrams";
    const REGISTER_METHOD: &str = "register_trigrams";
    const DEBUG_INFO: &str = "using Trigrams";
    const RULES: &'static [&'static dyn TranslationRule] = &[&TrigramsTranslator];
}

pub fn register_trigrams(container: &mut ServiceContainer) -> &mut ServiceContainer {
    register_extension::<TrigramsExtension>(container)
}

pub trait TrigramsSessionBuilderExt {
    fn use_trigrams(self) -> Self;
}

impl TrigramsSessionBuilderExt for SessionBuilder {
    fn use_trigrams(self) -> Self {
        self.use_extension::<TrigramsExtension>()
    }
}
