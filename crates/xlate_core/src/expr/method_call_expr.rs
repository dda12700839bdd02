use std::fmt;

use serde::{Deserialize, Serialize};

use super::Expression;
use super::datatype::ValueTypeId;

/// A call to a method on a domain value type, as produced by the host
/// language.
///
/// Instance methods carry the value they're invoked on as `receiver`. Static
/// methods have no receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCallExpr {
    pub declaring_type: ValueTypeId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Box<Expression>>,
    #[serde(default)]
    pub args: Vec<Expression>,
}

impl MethodCallExpr {
    pub fn is_static(&self) -> bool {
        self.receiver.is_none()
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Receiver followed by the arguments, the order native functions take
    /// them in.
    pub fn receiver_and_args(&self) -> Vec<Expression> {
        let mut out = Vec::with_capacity(self.args.len() + 1);
        if let Some(receiver) = &self.receiver {
            out.push(receiver.as_ref().clone());
        }
        out.extend(self.args.iter().cloned());
        out
    }

    /// Name used in diagnostics, e.g. `Geometry.Covers`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.method)
    }
}

impl fmt::Display for MethodCallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.receiver {
            Some(receiver) => write!(f, "{receiver}.{}(", self.method)?,
            None => write!(f, "{}.{}(", self.declaring_type, self.method)?,
        }
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}
