#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_diagnostic::ErrorCode;
use pfa_types::{Field, FullName, Idx, Pool};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{Lifespan, Pattern};

fn resolve(pool: &mut Pool, sigs: &[Signature], args: &[Idx]) -> Result<Resolution, ResolveError> {
    resolve_overload(pool, "f", sigs, args, Version::default())
}

#[test]
fn declaration_order_wins() {
    let sigs = [
        Signature::new([("x", Pattern::Int)], Pattern::Int),
        Signature::new([("x", Pattern::wildcard("A"))], Pattern::wildcard("A")),
    ];
    let mut pool = Pool::new();
    let specific = resolve(&mut pool, &sigs, &[Idx::INT]).unwrap();
    assert_eq!(specific.signature_index, 0);
    let generic = resolve(&mut pool, &sigs, &[Idx::STRING]).unwrap();
    assert_eq!(generic.signature_index, 1);
    assert_eq!(generic.return_type, Idx::STRING);
}

#[test]
fn arity_is_checked_before_patterns() {
    let sig = Signature::new([("x", Pattern::Double), ("y", Pattern::Double)], Pattern::Double);
    let pool = Pool::new();
    assert_eq!(
        match_signature(&pool, &sig, &[Idx::DOUBLE, Idx::DOUBLE, Idx::DOUBLE]),
        Err(Rejection::Arity {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn first_failing_parameter_is_reported() {
    let sig = Signature::new([("x", Pattern::Double), ("y", Pattern::Int)], Pattern::Double);
    let pool = Pool::new();
    let err = match_signature(&pool, &sig, &[Idx::DOUBLE, Idx::STRING]).unwrap_err();
    assert_eq!(
        err,
        Rejection::Param {
            index: 1,
            name: "y".into(),
            error: MatchError::Mismatch {
                expected: "int".into(),
                found: "string".into()
            }
        }
    );
}

#[test]
fn no_applicable_overload_lists_every_rejection() {
    let sigs = [
        Signature::new([("x", Pattern::Int)], Pattern::Int),
        Signature::new([("x", Pattern::Long)], Pattern::Long),
    ];
    let mut pool = Pool::new();
    let err = resolve(&mut pool, &sigs, &[Idx::STRING]).unwrap_err();
    let ResolveError::NoApplicableOverload {
        function,
        args,
        rejected,
    } = &err
    else {
        panic!("expected NoApplicableOverload, got {err:?}");
    };
    assert_eq!(function, "f");
    assert_eq!(args, &vec!["string".to_owned()]);
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0].0, "(x: int) -> int");

    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.notes.len(), 2);
    assert!(err.to_string().starts_with("no signature of \"f\" accepts (string)"));
}

#[test]
fn unbound_return_label_is_a_definition_error() {
    let sigs = [Signature::new([("x", Pattern::wildcard("A"))], Pattern::wildcard("B"))];
    let mut pool = Pool::new();
    let err = resolve(&mut pool, &sigs, &[Idx::INT]).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::SignatureDefinition {
            source: ConvertError::UnboundLabel { .. },
            ..
        }
    ));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E2003);
}

#[test]
fn lifespan_filters_by_version() {
    let future = Lifespan {
        birth: Some(Version::new(0, 9, 0)),
        ..Lifespan::default()
    };
    let sigs = [
        Signature::new([("x", Pattern::Double)], Pattern::Double).with_lifespan(future),
        Signature::new([("x", Pattern::Double)], Pattern::Long),
    ];
    let mut pool = Pool::new();
    let old = resolve_overload(&mut pool, "f", &sigs, &[Idx::DOUBLE], Version::new(0, 8, 1)).unwrap();
    assert_eq!(old.signature_index, 1);
    let new = resolve_overload(&mut pool, "f", &sigs, &[Idx::DOUBLE], Version::new(0, 9, 0)).unwrap();
    assert_eq!(new.signature_index, 0);
}

#[test]
fn deprecated_signature_still_resolves() {
    let dying = Lifespan {
        deprecation: Some(Version::new(0, 8, 0)),
        death: Some(Version::new(1, 0, 0)),
        contingency: Some("use g instead".into()),
        ..Lifespan::default()
    };
    let sigs = [Signature::new([("x", Pattern::Int)], Pattern::Int).with_lifespan(dying)];
    let mut pool = Pool::new();
    assert_eq!(resolve(&mut pool, &sigs, &[Idx::INT]).unwrap().signature_index, 0);
}

#[test]
fn return_type_built_from_bindings() {
    let sig = Signature::new(
        [
            ("a", Pattern::array(Pattern::wildcard("A"))),
            ("fcn", Pattern::fcn([Pattern::wildcard("A")], Pattern::wildcard("B"))),
        ],
        Pattern::array(Pattern::wildcard("B")),
    );
    let mut pool = Pool::new();
    let ints = pool.array(Idx::INT);
    let to_string = pool.function(vec![Idx::INT], Idx::STRING);
    let res = resolve(&mut pool, &[sig.clone()], &[ints, to_string]).unwrap();
    assert_eq!(pool.format_type(res.return_type), "array<string>");

    // The function's parameter must agree with the array's element type.
    let from_long = pool.function(vec![Idx::LONG], Idx::STRING);
    assert!(resolve(&mut pool, &[sig], &[ints, from_long]).is_err());
}

#[test]
fn wild_record_return_is_the_full_record() {
    let sig = Signature::new(
        [
            ("flag", Pattern::Boolean),
            ("history", Pattern::wild_record("A", [("count", Pattern::Int)])),
        ],
        Pattern::wildcard("A"),
    );
    let mut pool = Pool::new();
    let rec = pool
        .record(
            Some(FullName::parse("H")),
            vec![Field::new("count", Idx::INT), Field::new("note", Idx::STRING)],
        )
        .unwrap();
    let res = resolve(&mut pool, &[sig], &[Idx::BOOLEAN, rec]).unwrap();
    assert_eq!(res.return_type, rec);
}

fn primitive() -> impl Strategy<Value = Idx> {
    (0u32..8).prop_map(Idx::from_raw)
}

proptest! {
    /// Every use of a label resolves to one type.
    #[test]
    fn labels_resolve_consistently(x in primitive(), y in primitive(), z in primitive()) {
        let sig = Signature::new(
            [
                ("x", Pattern::wildcard("A")),
                ("y", Pattern::array(Pattern::wildcard("A"))),
                ("z", Pattern::wildcard("A")),
            ],
            Pattern::wildcard("A"),
        );
        let mut pool = Pool::new();
        let ys = pool.array(y);
        let result = resolve_overload(&mut pool, "f", &[sig], &[x, ys, z], Version::default());
        if x == y && y == z {
            let res = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(res.bindings.get("A"), Some(x));
            prop_assert_eq!(res.return_type, x);
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// A `WildRecord` accepts any record that has its fields, whatever else it has.
    #[test]
    fn wild_record_is_at_least(
        extra in prop::collection::btree_map("[a-e]{1,3}", primitive(), 0..5),
        required_ty in primitive(),
        present in any::<bool>(),
    ) {
        let mut fields: Vec<Field> = extra
            .iter()
            .filter(|(name, _)| name.as_str() != "target")
            .map(|(name, &ty)| Field::new(name.clone(), ty))
            .collect();
        if present {
            fields.push(Field::new("target", required_ty));
        }
        let mut pool = Pool::new();
        let rec = pool.record(None, fields).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let pattern = Pattern::wild_record("R", [("target", Pattern::Double)]);
        let sig = Signature::new([("r", pattern)], Pattern::wildcard("R"));
        let ok = match_signature(&pool, &sig, &[rec]).is_ok();
        prop_assert_eq!(ok, present && required_ty == Idx::DOUBLE);
    }

    /// When two signatures accept a call, the earlier one is chosen.
    #[test]
    fn earlier_signature_has_priority(arg in primitive()) {
        let sigs = [
            Signature::new([("x", Pattern::primitive(arg).unwrap_or(Pattern::Null))], Pattern::Boolean),
            Signature::new([("x", Pattern::wildcard("A"))], Pattern::String),
        ];
        let mut pool = Pool::new();
        let res = resolve_overload(&mut pool, "f", &sigs, &[arg], Version::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(res.signature_index, 0);
        prop_assert_eq!(res.return_type, Idx::BOOLEAN);
    }
}
