use std::sync::Arc;

use tracing::info;
use xlate_error::Result;

use crate::compiler::{CompiledExpression, QueryCompiler};
use crate::config::session::{SessionConfig, SettingValue};
use crate::container::ServiceContainer;
use crate::expr::Expression;
use crate::expr::method_call_expr::MethodCallExpr;
use crate::extension::{Extension, ModuleExtension};

/// Configures and validates a session.
///
/// Extensions are requested with `use_extension` (or the `use_*` methods
/// extension crates add). When no container is supplied, `build` assembles a
/// private one with every requested extension activated. When a container is
/// supplied, the caller is responsible for having registered the extensions
/// in it, and `build` fails if they didn't.
#[derive(Debug, Default)]
pub struct SessionBuilder {
    extensions: Vec<ModuleExtension>,
    container: Option<Arc<ServiceContainer>>,
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an extension. Requesting an extension already present replaces
    /// it in place, keeping its original position.
    pub fn with_extension(mut self, ext: ModuleExtension) -> Self {
        match self.extensions.iter_mut().find(|existing| **existing == ext) {
            Some(existing) => *existing = ext,
            None => self.extensions.push(ext),
        }
        self
    }

    pub fn use_extension<E: Extension>(self) -> Self {
        self.with_extension(ModuleExtension::new::<E>())
    }

    /// Use an externally assembled service container instead of letting the
    /// session create its own.
    pub fn with_service_container(mut self, container: Arc<ServiceContainer>) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_setting(mut self, name: &str, value: impl Into<SettingValue>) -> Result<Self> {
        self.config.set(name, value)?;
        Ok(self)
    }

    pub fn extensions(&self) -> &[ModuleExtension] {
        &self.extensions
    }

    /// Build the session, validating every requested extension against the
    /// container the session will use.
    pub fn build(self) -> Result<Session> {
        let (container, external) = match self.container {
            Some(container) => (container, true),
            None => {
                let mut container = ServiceContainer::new();
                for ext in &self.extensions {
                    ext.activate(&mut container);
                }
                (Arc::new(container), false)
            }
        };

        let session = Session {
            config: self.config,
            container,
            extensions: self.extensions,
            external_container: external,
        };
        session.validate_extensions()?;

        info!(
            application_name = %session.config.application_name,
            container = %session.container.id(),
            external = session.external_container,
            extensions = %session.debug_info(),
            "session started"
        );

        Ok(session)
    }
}

/// A validated unit of query compilation state.
///
/// Every requested extension has been checked against the session's container
/// by the time a `Session` exists, so compilation never needs to re-check.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    container: Arc<ServiceContainer>,
    extensions: Vec<ModuleExtension>,
    external_container: bool,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn container(&self) -> &Arc<ServiceContainer> {
        &self.container
    }

    pub fn extensions(&self) -> &[ModuleExtension] {
        &self.extensions
    }

    pub fn has_external_container(&self) -> bool {
        self.external_container
    }

    /// Check every requested extension is registered in the session's
    /// container.
    ///
    /// Already done by `SessionBuilder::build`, running it again gives the
    /// same result.
    pub fn validate_extensions(&self) -> Result<()> {
        let container = if self.external_container {
            Some(self.container.as_ref())
        } else {
            None
        };

        for ext in &self.extensions {
            ext.validate(container)?;
        }
        Ok(())
    }

    /// Configuration fingerprint, e.g. "using Geometry using Trigrams".
    pub fn debug_info(&self) -> String {
        self.extensions
            .iter()
            .map(|ext| ext.log_fragment())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Translate a single method call using the session's registry.
    pub fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        self.container.translators().translate(call)
    }

    pub fn compile(&self, expr: Expression) -> Result<CompiledExpression> {
        QueryCompiler::new(&self.container, &self.config).compile(expr)
    }
}
