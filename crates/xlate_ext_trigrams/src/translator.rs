use xlate_core::expr::datatype::ValueTypeId;
use xlate_core::expr::method_call_expr::MethodCallExpr;
use xlate_core::expr::{Expression, binary_op, function};
use xlate_core::signature::{SignatureKey, find_signature};
use xlate_core::translate::TranslationRule;

use ValueTypeId::{DbFunctions, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrigramsMethod {
    Function(&'static str),
    Operator(&'static str),
}

use TrigramsMethod::{Function, Operator};

const fn unary(name: &'static str) -> SignatureKey {
    SignatureKey::function(DbFunctions, name, &[Text])
}

const fn binary(name: &'static str) -> SignatureKey {
    SignatureKey::function(DbFunctions, name, &[Text, Text])
}

const SIGNATURES: &[(SignatureKey, TrigramsMethod)] = &[
    (unary("TrigramsShow"), Function("show_trgm")),
    (binary("TrigramsSimilarity"), Function("similarity")),
    (binary("TrigramsWordSimilarity"), Function("word_similarity")),
    (
        binary("TrigramsStrictWordSimilarity"),
        Function("strict_word_similarity"),
    ),
    (binary("TrigramsAreSimilar"), Operator("%")),
    (binary("TrigramsAreWordSimilar"), Operator("<%")),
    (binary("TrigramsAreNotWordSimilar"), Operator("%>")),
    (binary("TrigramsAreStrictWordSimilar"), Operator("<<%")),
    (binary("TrigramsAreNotStrictWordSimilar"), Operator("%>>")),
    (binary("TrigramsSimilarityDistance"), Operator("<->")),
    (binary("TrigramsWordSimilarityDistance"), Operator("<<->")),
    (
        binary("TrigramsWordSimilarityDistanceInverted"),
        Operator("<->>"),
    ),
    (
        binary("TrigramsStrictWordSimilarityDistance"),
        Operator("<<<->"),
    ),
    (
        binary("TrigramsStrictWordSimilarityDistanceInverted"),
        Operator("<->>>"),
    ),
];

/// Translates static trigram functions to pg_trgm functions and operators.
#[derive(Debug, Clone, Copy)]
pub struct TrigramsTranslator;

impl TranslationRule for TrigramsTranslator {
    fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        let (_, method) = find_signature(SIGNATURES, call)?;

        match *method {
            Function(name) => Some(function(name, call.args.iter().cloned())),
            Operator(op) => {
                let [left, right] = call.args.as_slice() else {
                    return None;
                };
                Some(binary_op(op, left.clone(), right.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use xlate_core::expr::{column, lit, static_method};

    use super::*;

    fn translate(name: &str, args: Vec<Expression>) -> Option<String> {
        TrigramsTranslator
            .translate(&static_method(DbFunctions, name, args))
            .map(|expr| expr.to_string())
    }

    fn ab() -> Vec<Expression> {
        vec![column("a", Text).into(), column("b", Text).into()]
    }

    #[test]
    fn functions() {
        assert_eq!(
            Some("show_trgm('word')".to_string()),
            translate("TrigramsShow", vec![lit("word").into()])
        );
        assert_eq!(
            Some("strict_word_similarity(a, b)".to_string()),
            translate("TrigramsStrictWordSimilarity", ab())
        );
    }

    #[test]
    fn every_operator() {
        let cases = [
            ("TrigramsAreSimilar", "(a % b)"),
            ("TrigramsAreWordSimilar", "(a <% b)"),
            ("TrigramsAreNotWordSimilar", "(a %> b)"),
            ("TrigramsAreStrictWordSimilar", "(a <<% b)"),
            ("TrigramsAreNotStrictWordSimilar", "(a %>> b)"),
            ("TrigramsSimilarityDistance", "(a <-> b)"),
            ("TrigramsWordSimilarityDistance", "(a <<-> b)"),
            ("TrigramsWordSimilarityDistanceInverted", "(a <->> b)"),
            ("TrigramsStrictWordSimilarityDistance", "(a <<<-> b)"),
            ("TrigramsStrictWordSimilarityDistanceInverted", "(a <->>> b)"),
        ];

        for (name, expected) in cases {
            assert_eq!(Some(expected.to_string()), translate(name, ab()), "{name}");
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(None, translate("TrigramsOverlap", ab()));
    }
}
