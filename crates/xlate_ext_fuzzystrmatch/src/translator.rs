use xlate_core::expr::datatype::ValueTypeId;
use xlate_core::expr::method_call_expr::MethodCallExpr;
use xlate_core::expr::{Expression, function};
use xlate_core::signature::{SignatureKey, find_signature};
use xlate_core::translate::TranslationRule;

use ValueTypeId::{DbFunctions, Int32, Text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FuzzyMethod {
    Soundex,
    Difference,
    Levenshtein,
    LevenshteinLessEqual,
    Metaphone,
    DoubleMetaphone,
    DoubleMetaphoneAlt,
}

impl FuzzyMethod {
    const fn function_name(self) -> &'static str {
        match self {
            Self::Soundex => "soundex",
            Self::Difference => "difference",
            Self::Levenshtein => "levenshtein",
            Self::LevenshteinLessEqual => "levenshtein_less_equal",
            Self::Metaphone => "metaphone",
            Self::DoubleMetaphone => "dmetaphone",
            Self::DoubleMetaphoneAlt => "dmetaphone_alt",
        }
    }
}

const fn func(name: &'static str, params: &'static [ValueTypeId]) -> SignatureKey {
    SignatureKey::function(DbFunctions, name, params)
}

const SIGNATURES: &[(SignatureKey, FuzzyMethod)] = &[
    (func("Soundex", &[Text]), FuzzyMethod::Soundex),
    (func("Difference", &[Text, Text]), FuzzyMethod::Difference),
    (func("Levenshtein", &[Text, Text]), FuzzyMethod::Levenshtein),
    // source, target, insert cost, delete cost, substitution cost
    (
        func("Levenshtein", &[Text, Text, Int32, Int32, Int32]),
        FuzzyMethod::Levenshtein,
    ),
    (
        func("LevenshteinLessEqual", &[Text, Text, Int32]),
        FuzzyMethod::LevenshteinLessEqual,
    ),
    (
        func("LevenshteinLessEqual", &[Text, Text, Int32, Int32, Int32, Int32]),
        FuzzyMethod::LevenshteinLessEqual,
    ),
    (func("Metaphone", &[Text, Int32]), FuzzyMethod::Metaphone),
    (func("DoubleMetaphone", &[Text]), FuzzyMethod::DoubleMetaphone),
    (
        func("DoubleMetaphoneAlt", &[Text]),
        FuzzyMethod::DoubleMetaphoneAlt,
    ),
];

/// Translates static fuzzy matching functions. Arguments pass through in
/// order.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyStringMatchTranslator;

impl TranslationRule for FuzzyStringMatchTranslator {
    fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        let (_, method) = find_signature(SIGNATURES, call)?;
        Some(function(method.function_name(), call.args.iter().cloned()))
    }
}
