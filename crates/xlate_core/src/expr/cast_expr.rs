use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Expression;
use super::datatype::DataType;
use crate::typemap::TypeDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
    pub to: DataType,
    pub expr: Box<Expression>,
    /// Database store type, filled in by the compiler from the session's type
    /// mappings.
    #[serde(skip)]
    pub store_type: Option<Arc<TypeDescriptor>>,
}

impl fmt::Display for CastExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.store_type {
            Some(store_type) => write!(f, "CAST({} AS {})", self.expr, store_type.store_type),
            None => write!(f, "CAST({} AS {})", self.expr, self.to),
        }
    }
}
