pub mod cast_expr;
pub mod datatype;
pub mod method_call_expr;
pub mod scalar;

use std::fmt;

use cast_expr::CastExpr;
use datatype::{DataType, ValueTypeId};
use method_call_expr::MethodCallExpr;
use scalar::ScalarValue;
use serde::{Deserialize, Serialize};
use xlate_error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    Column(ColumnExpr),
    Literal(LiteralExpr),
    /// Host-language method call, pending translation.
    MethodCall(MethodCallExpr),
    /// Native database function call.
    Function(FunctionExpr),
    /// Native database infix operator.
    BinaryOperator(BinaryOperatorExpr),
    Cast(CastExpr),
    Index(IndexExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnExpr {
    pub name: String,
    pub datatype: ValueTypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub value: ScalarValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionExpr {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOperatorExpr {
    pub op: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// Which numbering the indices of an `IndexExpr` use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrigin {
    /// Host-language numbering, first element is 0.
    #[default]
    Zero,
    /// Database numbering, first element is 1.
    One,
}

/// Element access into an array, one index per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    pub array: Box<Expression>,
    pub indices: Vec<Expression>,
    #[serde(default)]
    pub origin: IndexOrigin,
}

impl Expression {
    pub fn as_literal(&self) -> Option<&ScalarValue> {
        match self {
            Self::Literal(lit) => Some(&lit.value),
            _ => None,
        }
    }

    pub fn for_each_child_mut<F>(&mut self, func: &mut F) -> Result<()>
    where
        F: FnMut(&mut Expression) -> Result<()>,
    {
        match self {
            Self::Column(_) | Self::Literal(_) => (),
            Self::MethodCall(call) => {
                if let Some(receiver) = &mut call.receiver {
                    func(receiver.as_mut())?;
                }
                for arg in &mut call.args {
                    func(arg)?;
                }
            }
            Self::Function(function) => {
                for arg in &mut function.args {
                    func(arg)?;
                }
            }
            Self::BinaryOperator(op) => {
                func(op.left.as_mut())?;
                func(op.right.as_mut())?;
            }
            Self::Cast(cast) => func(cast.expr.as_mut())?,
            Self::Index(index) => {
                func(index.array.as_mut())?;
                for idx in &mut index.indices {
                    func(idx)?;
                }
            }
        }
        Ok(())
    }

    pub fn for_each_child<'a, F>(&'a self, func: &mut F)
    where
        F: FnMut(&'a Expression),
    {
        match self {
            Self::Column(_) | Self::Literal(_) => (),
            Self::MethodCall(call) => {
                if let Some(receiver) = &call.receiver {
                    func(receiver.as_ref());
                }
                call.args.iter().for_each(|arg| func(arg));
            }
            Self::Function(function) => function.args.iter().for_each(|arg| func(arg)),
            Self::BinaryOperator(op) => {
                func(op.left.as_ref());
                func(op.right.as_ref());
            }
            Self::Cast(cast) => func(cast.expr.as_ref()),
            Self::Index(index) => {
                func(index.array.as_ref());
                index.indices.iter().for_each(|idx| func(idx));
            }
        }
    }

    /// Collect every method call in this tree, outermost first.
    pub fn method_calls(&self) -> Vec<&MethodCallExpr> {
        fn inner<'a>(expr: &'a Expression, out: &mut Vec<&'a MethodCallExpr>) {
            if let Expression::MethodCall(call) = expr {
                out.push(call);
            }
            expr.for_each_child(&mut |child| inner(child, out));
        }

        let mut out = Vec::new();
        inner(self, &mut out);
        out
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(col) => write!(f, "{}", col.name),
            Self::Literal(lit) => write!(f, "{}", lit.value),
            Self::MethodCall(call) => write!(f, "{call}"),
            Self::Function(function) => {
                write!(f, "{}(", function.name)?;
                for (idx, arg) in function.args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::BinaryOperator(op) => write!(f, "({} {} {})", op.left, op.op, op.right),
            Self::Cast(cast) => write!(f, "{cast}"),
            Self::Index(index) => {
                write!(f, "{}", index.array)?;
                for idx in &index.indices {
                    write!(f, "[{idx}]")?;
                }
                Ok(())
            }
        }
    }
}

impl From<MethodCallExpr> for Expression {
    fn from(value: MethodCallExpr) -> Self {
        Expression::MethodCall(value)
    }
}

impl From<FunctionExpr> for Expression {
    fn from(value: FunctionExpr) -> Self {
        Expression::Function(value)
    }
}

impl From<LiteralExpr> for Expression {
    fn from(value: LiteralExpr) -> Self {
        Expression::Literal(value)
    }
}

impl From<ColumnExpr> for Expression {
    fn from(value: ColumnExpr) -> Self {
        Expression::Column(value)
    }
}

pub fn column(name: impl Into<String>, datatype: ValueTypeId) -> ColumnExpr {
    ColumnExpr {
        name: name.into(),
        datatype,
    }
}

pub fn lit(value: impl Into<ScalarValue>) -> LiteralExpr {
    LiteralExpr {
        value: value.into(),
    }
}

/// Instance method call `receiver.method(args...)` on a value of
/// `declaring_type`.
pub fn method(
    declaring_type: ValueTypeId,
    receiver: impl Into<Expression>,
    method: impl Into<String>,
    args: impl IntoIterator<Item = Expression>,
) -> MethodCallExpr {
    MethodCallExpr {
        declaring_type,
        method: method.into(),
        receiver: Some(Box::new(receiver.into())),
        args: args.into_iter().collect(),
    }
}

/// Static method call `DeclaringType.method(args...)`.
pub fn static_method(
    declaring_type: ValueTypeId,
    method: impl Into<String>,
    args: impl IntoIterator<Item = Expression>,
) -> MethodCallExpr {
    MethodCallExpr {
        declaring_type,
        method: method.into(),
        receiver: None,
        args: args.into_iter().collect(),
    }
}

pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Function(FunctionExpr {
        name: name.into(),
        args: args.into_iter().collect(),
    })
}

pub fn binary_op(
    op: impl Into<String>,
    left: impl Into<Expression>,
    right: impl Into<Expression>,
) -> Expression {
    Expression::BinaryOperator(BinaryOperatorExpr {
        op: op.into(),
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    })
}

pub fn cast(expr: impl Into<Expression>, to: DataType) -> Expression {
    Expression::Cast(CastExpr {
        to,
        expr: Box::new(expr.into()),
        store_type: None,
    })
}

/// Zero-origin element access.
pub fn index(
    array: impl Into<Expression>,
    indices: impl IntoIterator<Item = Expression>,
) -> Expression {
    Expression::Index(IndexExpr {
        array: Box::new(array.into()),
        indices: indices.into_iter().collect(),
        origin: IndexOrigin::Zero,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_function() {
        let expr = function(
            "ST_Covers",
            [
                column("shape", ValueTypeId::Geometry).into(),
                column("other", ValueTypeId::Geometry).into(),
            ],
        );
        assert_eq!("ST_Covers(shape, other)", expr.to_string());
    }

    #[test]
    fn display_nested_operator() {
        let expr = binary_op(
            "@>",
            column("path", ValueTypeId::LTree),
            lit("top.science"),
        );
        assert_eq!("(path @> 'top.science')", expr.to_string());
    }

    #[test]
    fn display_method_call() {
        let call = method(
            ValueTypeId::Geometry,
            column("shape", ValueTypeId::Geometry),
            "Overlaps",
            [column("other", ValueTypeId::Geometry).into()],
        );
        assert_eq!("shape.Overlaps(other)", call.to_string());
        assert_eq!("Geometry.Overlaps", call.qualified_name());

        let call = static_method(ValueTypeId::DbFunctions, "Unaccent", [lit("é").into()]);
        assert_eq!("DbFunctions.Unaccent('é')", call.to_string());
    }

    #[test]
    fn method_calls_outermost_first() {
        let inner = method(
            ValueTypeId::Geometry,
            column("a", ValueTypeId::Geometry),
            "Centroid",
            [],
        );
        let outer = method(
            ValueTypeId::Geometry,
            inner.clone(),
            "Covers",
            [column("b", ValueTypeId::Geometry).into()],
        );

        let expr = Expression::from(outer);
        let calls = expr.method_calls();
        assert_eq!(2, calls.len());
        assert_eq!("Covers", calls[0].method);
        assert_eq!("Centroid", calls[1].method);
    }

    #[test]
    fn deserialize_method_call() {
        let json = r#"{
            "kind": "method_call",
            "declaring_type": "geometry",
            "method": "Covers",
            "receiver": {"kind": "column", "name": "shape", "datatype": "geometry"},
            "args": [{"kind": "column", "name": "other", "datatype": "geometry"}]
        }"#;

        let expr: Expression = serde_json::from_str(json).unwrap();
        let expected: Expression = method(
            ValueTypeId::Geometry,
            column("shape", ValueTypeId::Geometry),
            "Covers",
            [column("other", ValueTypeId::Geometry).into()],
        )
        .into();
        assert_eq!(expected, expr);
    }
}
