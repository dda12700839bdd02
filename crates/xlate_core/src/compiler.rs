use tracing::warn;
use xlate_error::{Result, XlateError};

use crate::arrays::index_space::{IndexSpaceConverter, one_based_expr};
use crate::config::session::SessionConfig;
use crate::container::ServiceContainer;
use crate::expr::cast_expr::CastExpr;
use crate::expr::datatype::ValueTypeId;
use crate::expr::{Expression, IndexExpr, IndexOrigin, lit};

/// Output of compiling an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    pub expr: Expression,
    pub sql: String,
    /// Qualified names of method calls no rule translated. Only ever non-empty
    /// when strict translation is disabled.
    pub untranslated: Vec<String>,
}

/// Lowers host expressions into native SQL expressions.
///
/// Method calls are handed to the container's translators, array indices are
/// shifted into database numbering, and casts get their store types resolved.
#[derive(Debug)]
pub struct QueryCompiler<'a> {
    container: &'a ServiceContainer,
    config: &'a SessionConfig,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(container: &'a ServiceContainer, config: &'a SessionConfig) -> Self {
        QueryCompiler { container, config }
    }

    pub fn compile(&self, mut expr: Expression) -> Result<CompiledExpression> {
        self.lower(&mut expr)?;

        let untranslated: Vec<String> = expr
            .method_calls()
            .iter()
            .map(|call| call.qualified_name())
            .collect();

        if let Some(first) = expr.method_calls().first() {
            if self.config.strict_translation {
                return Err(XlateError::untranslatable(format!(
                    "The method call '{first}' could not be translated"
                ))
                .with_field("method", first.qualified_name()));
            }
            warn!(untranslated = ?untranslated, "expression contains untranslated method calls");
        }

        let sql = expr.to_string();

        Ok(CompiledExpression {
            expr,
            sql,
            untranslated,
        })
    }

    /// Lower children first so rules see already translated arguments.
    fn lower(&self, expr: &mut Expression) -> Result<()> {
        expr.for_each_child_mut(&mut |child| self.lower(child))?;

        let replacement = match expr {
            Expression::MethodCall(call) => self.container.translators().translate(call),
            Expression::Index(index) => {
                lower_index(index);
                None
            }
            Expression::Cast(cast) => {
                self.resolve_cast(cast)?;
                None
            }
            _ => None,
        };

        if let Some(replacement) = replacement {
            *expr = replacement;
        }

        Ok(())
    }

    fn resolve_cast(&self, cast: &mut CastExpr) -> Result<()> {
        let mut target = cast.to;
        // A zero length bound means unbounded, same as the session setting.
        if target.id == ValueTypeId::Text {
            target.max_length = target
                .max_length
                .filter(|&n| n > 0)
                .or(self.config.default_string_length);
        }

        let mapping = self
            .container
            .type_mappings()
            .find_mapping(&target)
            .ok_or_else(|| {
                XlateError::new(format!("No store type mapping for {}", target))
                    .with_field("expression", &cast.expr)
            })?;

        cast.store_type = Some(mapping);
        Ok(())
    }
}

fn lower_index(index: &mut IndexExpr) {
    if index.origin == IndexOrigin::One {
        return;
    }

    let constants: Option<Vec<i64>> = index
        .indices
        .iter()
        .map(|idx| idx.as_literal().and_then(|v| v.try_as_i64()))
        .collect();

    index.indices = match constants {
        Some(zero_based) => IndexSpaceConverter::new(zero_based)
            .to_one_based()
            .into_iter()
            .map(|idx| lit(idx).into())
            .collect(),
        None => std::mem::take(&mut index.indices)
            .into_iter()
            .map(one_based_expr)
            .collect(),
    };
    index.origin = IndexOrigin::One;
}
