use std::fmt;

use crate::expr::scalar::ScalarValue;
use crate::expr::{Expression, binary_op, lit};

/// Converts a list of zero-origin indices (host numbering) into one-origin
/// indices (database array numbering).
///
/// This is a coordinate list, order and duplicates are significant.
/// Equality, hashing and display are over the original zero-origin indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexSpaceConverter {
    indices: Vec<i64>,
}

impl IndexSpaceConverter {
    pub fn new(indices: impl IntoIterator<Item = i64>) -> Self {
        IndexSpaceConverter {
            indices: indices.into_iter().collect(),
        }
    }

    /// Shift every index up by one, keeping order.
    ///
    /// `i64::MAX` saturates; no database accepts a subscript that large anyway.
    pub fn to_one_based(&self) -> Vec<i64> {
        self.indices.iter().map(|idx| idx.saturating_add(1)).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl From<Vec<i64>> for IndexSpaceConverter {
    fn from(indices: Vec<i64>) -> Self {
        IndexSpaceConverter { indices }
    }
}

impl fmt::Display for IndexSpaceConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, val) in self.indices.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{val}")?;
        }
        write!(f, "]")
    }
}

/// Shift a single zero-origin index expression to one-origin.
///
/// Integer literals are folded, anything else becomes `(expr + 1)`. An `Int32`
/// literal that no longer fits is widened to `Int64`, so the result agrees
/// with `IndexSpaceConverter`.
pub fn one_based_expr(expr: Expression) -> Expression {
    let folded: Option<Expression> = match expr.as_literal() {
        Some(ScalarValue::Int32(v)) => Some(match v.checked_add(1) {
            Some(shifted) => lit(shifted).into(),
            None => lit(i64::from(*v) + 1).into(),
        }),
        Some(ScalarValue::Int64(v)) => Some(lit(v.saturating_add(1)).into()),
        _ => None,
    };
    folded.unwrap_or_else(|| binary_op("+", expr, lit(1)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::expr::column;
    use crate::expr::datatype::ValueTypeId;

    #[test]
    fn one_based() {
        assert_eq!(vec![1, 2, 3], IndexSpaceConverter::new([0, 1, 2]).to_one_based());
        assert_eq!(Vec::<i64>::new(), IndexSpaceConverter::new([]).to_one_based());
        assert_eq!(vec![0, 1, 2], IndexSpaceConverter::new([-1, 0, 1]).to_one_based());
    }

    #[test]
    fn order_and_duplicates_preserved() {
        assert_eq!(vec![3, 2, 1], IndexSpaceConverter::new([2, 1, 0]).to_one_based());
        assert_eq!(vec![5, 5, 1], IndexSpaceConverter::new([4, 4, 0]).to_one_based());
    }

    #[test]
    fn saturates_at_max() {
        let conv = IndexSpaceConverter::new([i64::MAX]);
        assert_eq!(vec![i64::MAX], conv.to_one_based());
    }

    #[test]
    fn equality_is_ordered() {
        let a = IndexSpaceConverter::new([1, 2, 3]);
        let b = IndexSpaceConverter::from(vec![1, 2, 3]);
        let c = IndexSpaceConverter::new([3, 2, 1]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(2, set.len());
    }

    #[test]
    fn display_uses_original() {
        let conv = IndexSpaceConverter::new([0, 4]);
        assert_eq!("[0, 4]", conv.to_string());
        assert_eq!("[]", IndexSpaceConverter::new([]).to_string());
    }

    #[test]
    fn one_based_expr_folds_literals() {
        assert_eq!(Expression::from(lit(3)), one_based_expr(lit(2).into()));
        assert_eq!(Expression::from(lit(1_i64)), one_based_expr(lit(0_i64).into()));

        let shifted = one_based_expr(column("n", ValueTypeId::Int32).into());
        assert_eq!("(n + 1)", shifted.to_string());
    }

    #[test]
    fn one_based_expr_widens_i32_max() {
        let shifted = one_based_expr(lit(i32::MAX).into());
        assert_eq!(Expression::from(lit(2_147_483_648_i64)), shifted);

        // Same answer as the converter used for constant array subscripts.
        let conv = IndexSpaceConverter::new([i64::from(i32::MAX)]);
        assert_eq!(shifted.to_string(), conv.to_one_based()[0].to_string());
    }
}
