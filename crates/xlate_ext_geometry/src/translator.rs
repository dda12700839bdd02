use xlate_core::arrays::index_space::one_based_expr;
use xlate_core::expr::datatype::ValueTypeId;
use xlate_core::expr::method_call_expr::MethodCallExpr;
use xlate_core::expr::{Expression, function};
use xlate_core::signature::{SignatureKey, find_signature};
use xlate_core::translate::TranslationRule;

use ValueTypeId::{Float64, Geometry, Int32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryMethod {
    /// `ST_*(receiver, args...)`
    Function(&'static str),
    /// Like `Function`, but the trailing argument is a zero-origin position
    /// that PostGIS numbers from one.
    PositionalAccessor(&'static str),
}

use GeometryMethod::{Function, PositionalAccessor};

const fn instance(name: &'static str, params: &'static [ValueTypeId]) -> SignatureKey {
    SignatureKey::instance(Geometry, name, params)
}

// `Overlaps` is left out on purpose. Calls to it stay untranslated.
const SIGNATURES: &[(SignatureKey, GeometryMethod)] = &[
    // Predicates
    (instance("Covers", &[Geometry]), Function("ST_Covers")),
    (instance("CoveredBy", &[Geometry]), Function("ST_CoveredBy")),
    (instance("Contains", &[Geometry]), Function("ST_Contains")),
    (instance("Within", &[Geometry]), Function("ST_Within")),
    (instance("Intersects", &[Geometry]), Function("ST_Intersects")),
    (instance("Disjoint", &[Geometry]), Function("ST_Disjoint")),
    (instance("Touches", &[Geometry]), Function("ST_Touches")),
    (instance("Crosses", &[Geometry]), Function("ST_Crosses")),
    (instance("EqualsTopologically", &[Geometry]), Function("ST_Equals")),
    // Measurements
    (instance("Distance", &[Geometry]), Function("ST_Distance")),
    (instance("IsWithinDistance", &[Geometry, Float64]), Function("ST_DWithin")),
    (instance("Area", &[]), Function("ST_Area")),
    (instance("Length", &[]), Function("ST_Length")),
    // Constructive
    (instance("Buffer", &[Float64]), Function("ST_Buffer")),
    (instance("Centroid", &[]), Function("ST_Centroid")),
    (instance("Union", &[Geometry]), Function("ST_Union")),
    (instance("Intersection", &[Geometry]), Function("ST_Intersection")),
    (instance("Difference", &[Geometry]), Function("ST_Difference")),
    (instance("SymmetricDifference", &[Geometry]), Function("ST_SymDifference")),
    (instance("ConvexHull", &[]), Function("ST_ConvexHull")),
    (instance("Envelope", &[]), Function("ST_Envelope")),
    (instance("Boundary", &[]), Function("ST_Boundary")),
    (instance("Reverse", &[]), Function("ST_Reverse")),
    (instance("Normalized", &[]), Function("ST_Normalize")),
    // Accessors
    (instance("AsText", &[]), Function("ST_AsText")),
    (instance("AsBinary", &[]), Function("ST_AsBinary")),
    (instance("IsValid", &[]), Function("ST_IsValid")),
    (instance("IsEmpty", &[]), Function("ST_IsEmpty")),
    (instance("IsSimple", &[]), Function("ST_IsSimple")),
    (instance("NumPoints", &[]), Function("ST_NPoints")),
    (instance("NumGeometries", &[]), Function("ST_NumGeometries")),
    (instance("Srid", &[]), Function("ST_SRID")),
    (instance("X", &[]), Function("ST_X")),
    (instance("Y", &[]), Function("ST_Y")),
    (instance("GetGeometryN", &[Int32]), PositionalAccessor("ST_GeometryN")),
    (instance("GetPointN", &[Int32]), PositionalAccessor("ST_PointN")),
];

/// Translates instance methods on geometry values to PostGIS functions.
#[derive(Debug, Clone, Copy)]
pub struct GeometryMemberTranslator;

impl TranslationRule for GeometryMemberTranslator {
    fn translate(&self, call: &MethodCallExpr) -> Option<Expression> {
        let (_, method) = find_signature(SIGNATURES, call)?;
        let mut args = call.receiver_and_args();

        let expr = match *method {
            Function(name) => function(name, args),
            PositionalAccessor(name) => {
                if let Some(position) = args.pop() {
                    args.push(one_based_expr(position));
                }
                function(name, args)
            }
        };

        Some(expr)
    }
}
