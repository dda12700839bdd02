use std::fmt;

use crate::expr::datatype::ValueTypeId;
use crate::expr::method_call_expr::MethodCallExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// Invoked on a value, `shape.Covers(other)`.
    Instance,
    /// Invoked on the type, `DbFunctions.Soundex(text)`.
    Static,
}

/// Identifies a host-language operation a rule knows how to translate.
///
/// Matching is on declaring type, name, call kind and arity. The parameter
/// types are carried for diagnostics and documentation, argument types are
/// assumed to have been checked by the host before translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureKey {
    pub declaring_type: ValueTypeId,
    pub name: &'static str,
    pub params: &'static [ValueTypeId],
    pub kind: CallKind,
}

impl SignatureKey {
    pub const fn instance(
        declaring_type: ValueTypeId,
        name: &'static str,
        params: &'static [ValueTypeId],
    ) -> Self {
        SignatureKey {
            declaring_type,
            name,
            params,
            kind: CallKind::Instance,
        }
    }

    pub const fn function(
        declaring_type: ValueTypeId,
        name: &'static str,
        params: &'static [ValueTypeId],
    ) -> Self {
        SignatureKey {
            declaring_type,
            name,
            params,
            kind: CallKind::Static,
        }
    }

    pub const fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn matches(&self, call: &MethodCallExpr) -> bool {
        if call.declaring_type != self.declaring_type {
            return false;
        }

        let kind_matches = match self.kind {
            CallKind::Instance => !call.is_static(),
            CallKind::Static => call.is_static(),
        };

        kind_matches && call.arity() == self.arity() && call.method == self.name
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.declaring_type, self.name)?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}

/// Find the first entry in a signature table that matches the call.
pub fn find_signature<'a, T>(
    table: &'a [(SignatureKey, T)],
    call: &MethodCallExpr,
) -> Option<(&'a SignatureKey, &'a T)> {
    table
        .iter()
        .find(|(sig, _)| sig.matches(call))
        .map(|(sig, item)| (sig, item))
}
