//! Spatial methods on geometry values, translated to PostGIS functions.
pub mod translator;

use translator::GeometryMemberTranslator;
use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::SessionBuilder;
use xlate_core::extension::{Extension, register_extension};
use xlate_core::translate::TranslationRule;

#[derive(Debug, Clone, Copy)]
pub struct GeometryExtension;

impl Extension for GeometryExtension {
    const NAME: &str = "Geometry";
    const USE_METHOD: &str = "use_geometry";
    const REGISTER_METHOD: &str = "register_geometry";
    const DEBUG_INFO: &str = "using Geometry";
    const RULES: &'static [&'static dyn TranslationRule] = &[&GeometryMemberTranslator];
}

/// Register the geometry translations in a service container.
pub fn register_geometry(container: &mut ServiceContainer) -> &mut ServiceContainer {
    register_extension::<GeometryExtension>(container)
}

pub trait GeometrySessionBuilderExt {
    /// Request geometry translations for the session.
    fn use_geometry(self) -> Self;
}

impl GeometrySessionBuilderExt for SessionBuilder {
    fn use_geometry(self) -> Self {
        self.use_extension::<GeometryExtension>()
    }
}
