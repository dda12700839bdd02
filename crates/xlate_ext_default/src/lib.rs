use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::SessionBuilder;
use xlate_core::extension::ModuleExtension;
use xlate_ext_fuzzystrmatch::FuzzyStringMatchExtension;
use xlate_ext_geometry::GeometryExtension;
use xlate_ext_ltree::LTreeExtension;
use xlate_ext_trigrams::TrigramsExtension;
use xlate_ext_unaccent::UnaccentExtension;
pub use {
    xlate_ext_fuzzystrmatch,
    xlate_ext_geometry,
    xlate_ext_ltree,
    xlate_ext_trigrams,
    xlate_ext_unaccent,
};

/// Every bundled extension, in the order `register_all` activates them.
pub const DEFAULT_EXTENSIONS: &[ModuleExtension] = &[
    ModuleExtension::new::<GeometryExtension>(),
    ModuleExtension::new::<LTreeExtension>(),
    ModuleExtension::new::<FuzzyStringMatchExtension>(),
    ModuleExtension::new::<TrigramsExtension>(),
    ModuleExtension::new::<UnaccentExtension>(),
];

/// Registers all default extensions in the given container.
pub fn register_all(container: &mut ServiceContainer) -> &mut ServiceContainer {
    for ext in DEFAULT_EXTENSIONS {
        ext.activate(container);
    }
    container
}

/// Look up a bundled extension by name, case insensitive.
pub fn find_extension(name: &str) -> Option<ModuleExtension> {
    DEFAULT_EXTENSIONS
        .iter()
        .find(|ext| ext.name().eq_ignore_ascii_case(name))
        .copied()
}

pub trait DefaultSessionBuilderExt {
    /// Request every default extension.
    fn use_all(self) -> Self;
}

impl DefaultSessionBuilderExt for SessionBuilder {
    fn use_all(self) -> Self {
        DEFAULT_EXTENSIONS
            .iter()
            .fold(self, |builder, ext| builder.with_extension(*ext))
    }
}
