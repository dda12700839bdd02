//! Hierarchical label path methods, translated to the ltree extension.
pub mod translator;

use translator::LTreeTranslator;
use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::SessionBuilder;
use xlate_core::extension::{Extension, register_extension};
use xlate_core::translate::TranslationRule;

#[derive(Debug, Clone, Copy)]
pub struct LTreeExtension;

impl Extension for LTreeExtension {
    const NAME: &str = "LTree";
    const USE_METHOD: &str = "use_ltree";
    const REGISTER_METHOD: &str = "register_ltree";
    const DEBUG_INFO: &str = "using LTree";
    const RULES: &'static [&'static dyn TranslationRule] = &[&LTreeTranslator];
}

pub fn register_ltree(container: &mut ServiceContainer) -> &mut ServiceContainer {
    register_extension::<LTreeExtension>(container)
}

pub trait LTreeSessionBuilderExt {
    fn use_ltree(self) -> Self;
}

impl LTreeSessionBuilderExt for SessionBuilder {
    fn use_ltree(self) -> Self {
        self.use_extension::<LTreeExtension>()
    }
}

#[cfg(test)]
mod tests {
    use xlate_core::engine::session::Session;
    use xlate_core::expr::datatype::ValueTypeId;
    use xlate_core::expr::{column, method};

    use super::*;

    #[test]
    fn session_translates_nested() {
        let session = Session::builder().use_ltree().build().unwrap();

        // a.Subpath(0, b.NLevel())
        let nlevel = method(
            ValueTypeId::LTree,
            column("b", ValueTypeId::LTree),
            "NLevel",
            [],
        );
        let call = method(
            ValueTypeId::LTree,
            column("a", ValueTypeId::LTree),
            "Subpath",
            [xlate_core::expr::lit(0).into(), nlevel.into()],
        );

        let out = session.compile(call.into()).unwrap();
        assert_eq!("subpath(a, 0, nlevel(b))", out.sql);
    }
}
