use xlate_core::expr::datatype::ValueTypeId;
use xlate_core::expr::method_call_expr::MethodCallExpr;
use xlate_core::expr::{Expression, binary_op, function};
use xlate_core::signature::{SignatureKey, find_signature};
use xlate_core::translate::TranslationRule;

use ValueTypeId::{Int32, LQuery, LTree, LTxtQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LTreeMethod {
    /// `receiver <op> arg`
    Operator(&'static str),
    /// `name(receiver, args...)`
    Function(&'static str),
}

use LTreeMethod::{Function, Operator};

const fn instance(name: &'static str, params: &'static [ValueTypeId]) -> SignatureKey {
    SignatureKey::instance(LTree, name, params)
}

const fn lca(params: &'static [ValueTypeId]) -> (SignatureKey, LTreeMethod) {
    (
        SignatureKey::function(LTree, "LongestCommonAncestor", params),
        Function("lca"),
    )
}

const SIGNATURES: &[(SignatureKey, LTreeMethod)] = &[
    (instance("IsAncestorOf", &[LTree]), Operator("@>")),
    (instance("IsDescendantOf", &[LTree]), Operator("<@")),
    (instance("MatchesLQuery", &[LQuery]), Operator("~")),
    (instance("MatchesLTxtQuery", &[LTxtQuery]), Operator("@")),
    (instance("Subtree", &[Int32, Int32]), Function("subltree")),
    (instance("Subpath", &[Int32]), Function("subpath")),
    (instance("Subpath", &[Int32, Int32]), Function("subpath")),
    (instance("NLevel", &[]), Function("nlevel")),
    (instance("Index", &[LTree]), Function("index")),
    (instance("Index", &[LTree, Int32]), Function("index")),
    // lca() accepts up to eight paths.
    lca(&[LTree]),
    lca(&[LTree, LTree]),
    lca(&[LTree, LTree, LTree]),
    lca(&[LTree, LTree, LTree, LTree]),
    lca(&[LTree, LTree, LTree, LTree, LTree]),
    lca(&[LTree, LTree, LTree, LTree, LTree, LTree]),
    lca(&[LTree, LTree, LTree, LTree, LTree, LTree, LTree]),
    lca(&[LTree, LTree, LTree, LTree, LTree, LTree, LTree, LTree]),
];

/// Translates label path methods to ltree operators and functions.
///
/// Label positions in ltree are already zero-origin, no index shifting here.
#[derive(Debug, Clone, Copy)]
pub struct LTreeTranslator;

impl TranslationRule for LTreeTranslator {
    fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        let (_, method) = find_signature(SIGNATURES, call)?;
        let args = call.receiver_and_args();

        match *method {
            Operator(op) => {
                let [left, right]: [Expression; 2] = args.try_into().ok()?;
                Some(binary_op(op, left, right))
            }
            Function(name) => Some(function(name, args)),
        }
    }
}
