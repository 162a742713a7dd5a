#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_types::{Field, FullName, Idx, Pool};
use pretty_assertions::assert_eq;

use super::*;

fn check(pool: &Pool, pattern: &Pattern, actual: Idx) -> Result<Bindings, MatchError> {
    let mut bindings = Bindings::new();
    Matcher::new(pool).matches(pattern, actual, &mut bindings)?;
    Ok(bindings)
}

fn point(pool: &mut Pool, extra: bool) -> Idx {
    let mut fields = vec![Field::new("x", Idx::DOUBLE), Field::new("y", Idx::DOUBLE)];
    let name = if extra {
        fields.push(Field::new("label", Idx::STRING));
        "ex.LabeledPoint"
    } else {
        "ex.Point"
    };
    pool.record(Some(FullName::parse(name)), fields).unwrap()
}

#[test]
fn primitives_match_exactly() {
    let pool = Pool::new();
    assert!(check(&pool, &Pattern::Double, Idx::DOUBLE).is_ok());
    assert_eq!(
        check(&pool, &Pattern::Double, Idx::INT),
        Err(MatchError::Mismatch {
            expected: "double".into(),
            found: "int".into()
        })
    );
}

#[test]
fn containers_match_elementwise() {
    let mut pool = Pool::new();
    let arr = pool.array(Idx::DOUBLE);
    let map = pool.map(Idx::DOUBLE);
    assert!(check(&pool, &Pattern::array(Pattern::Double), arr).is_ok());
    assert!(check(&pool, &Pattern::array(Pattern::Double), map).is_err());
    assert!(check(&pool, &Pattern::map(Pattern::Float), map).is_err());
}

#[test]
fn wildcard_binds_then_requires_equality() {
    let mut pool = Pool::new();
    let arr = pool.array(Idx::STRING);
    let mut bindings = Bindings::new();
    let mut matcher = Matcher::new(&pool);
    matcher
        .matches(&Pattern::wildcard("A"), arr, &mut bindings)
        .unwrap();
    assert_eq!(bindings.get("A"), Some(arr));
    assert!(matcher
        .matches(&Pattern::array(Pattern::wildcard("B")), arr, &mut bindings)
        .is_ok());
    assert_eq!(bindings.get("B"), Some(Idx::STRING));
    let err = matcher
        .matches(&Pattern::wildcard("A"), Idx::STRING, &mut bindings)
        .unwrap_err();
    assert_eq!(
        err,
        MatchError::LabelConflict {
            label: "A".into(),
            bound: "array<string>".into(),
            found: "string".into()
        }
    );
}

#[test]
fn restricted_wildcard() {
    let pool = Pool::new();
    assert!(check(&pool, &Pattern::any_number("A"), Idx::LONG).is_ok());
    let err = check(&pool, &Pattern::any_number("A"), Idx::STRING).unwrap_err();
    assert!(matches!(err, MatchError::NotInOneOf { .. }));
}

#[test]
fn wild_record_accepts_supersets() {
    let mut pool = Pool::new();
    let plain = point(&mut pool, false);
    let labeled = point(&mut pool, true);
    let pattern = Pattern::wild_record("P", [("x", Pattern::Double), ("y", Pattern::Double)]);
    assert_eq!(check(&pool, &pattern, plain).unwrap().get("P"), Some(plain));
    assert_eq!(check(&pool, &pattern, labeled).unwrap().get("P"), Some(labeled));
}

#[test]
fn wild_record_rejects_missing_or_mistyped_fields() {
    let mut pool = Pool::new();
    let plain = point(&mut pool, false);
    let missing = Pattern::wild_record("P", [("z", Pattern::Double)]);
    assert_eq!(
        check(&pool, &missing, plain),
        Err(MatchError::MissingField {
            field: "z".into(),
            record: pool.format_type(plain)
        })
    );
    let mistyped = Pattern::wild_record("P", [("x", Pattern::String)]);
    assert!(matches!(
        check(&pool, &mistyped, plain),
        Err(MatchError::Mismatch { .. })
    ));
    assert!(check(&pool, &mistyped, Idx::DOUBLE).is_err());
}

#[test]
fn fixed_record_requires_same_name_and_fields() {
    let mut pool = Pool::new();
    let plain = point(&mut pool, false);
    let exact = Pattern::record(Some("ex.Point"), [("x", Pattern::Double), ("y", Pattern::Double)]);
    let renamed = Pattern::record(Some("ex.Other"), [("x", Pattern::Double), ("y", Pattern::Double)]);
    let reordered = Pattern::record(Some("ex.Point"), [("y", Pattern::Double), ("x", Pattern::Double)]);
    assert!(check(&pool, &exact, plain).is_ok());
    assert!(check(&pool, &renamed, plain).is_err());
    assert!(check(&pool, &reordered, plain).is_err());
}

#[test]
fn wild_enum_and_fixed() {
    let mut pool = Pool::new();
    let color = pool
        .enumeration(Some(FullName::parse("Color")), vec!["r".into(), "g".into()])
        .unwrap();
    let md5 = pool.fixed(Some(FullName::parse("Md5")), 16).unwrap();
    assert_eq!(check(&pool, &Pattern::wild_enum("E"), color).unwrap().get("E"), Some(color));
    assert_eq!(check(&pool, &Pattern::wild_fixed("F"), md5).unwrap().get("F"), Some(md5));
    assert!(check(&pool, &Pattern::wild_enum("E"), md5).is_err());
    assert!(check(&pool, &Pattern::wild_fixed("F"), Idx::BYTES).is_err());
}

#[test]
fn enum_fields_follow_bound_record() {
    let mut pool = Pool::new();
    let rec = point(&mut pool, false);
    let good = pool
        .enumeration(Some(FullName::parse("Axis")), vec!["y".into(), "x".into()])
        .unwrap();
    let bad = pool
        .enumeration(Some(FullName::parse("Other")), vec!["x".into(), "z".into()])
        .unwrap();

    let mut matcher = Matcher::new(&pool);
    let mut bindings = Bindings::new();
    let enum_pattern = Pattern::enum_fields("E", "R");
    assert_eq!(
        matcher.matches(&enum_pattern, good, &mut bindings),
        Err(MatchError::UnboundRecordLabel { label: "R".into() })
    );
    matcher
        .matches(&Pattern::wild_record("R", Vec::new()), rec, &mut bindings)
        .unwrap();
    assert!(matcher.matches(&enum_pattern, good, &mut bindings).is_ok());
    let mut only_record = Bindings::new();
    only_record.bind("R", rec).unwrap();
    assert!(matches!(
        matcher.matches(&enum_pattern, bad, &mut only_record),
        Err(MatchError::EnumSymbols { .. })
    ));
}

#[test]
fn union_pattern_covers_union_type() {
    let mut pool = Pool::new();
    let nullable = pool.union([Idx::NULL, Idx::DOUBLE]).unwrap();
    let wider = pool.union([Idx::NULL, Idx::DOUBLE, Idx::STRING]).unwrap();
    let pattern = Pattern::union([Pattern::Double, Pattern::Null]);
    assert!(check(&pool, &pattern, nullable).is_ok());
    assert!(check(&pool, &pattern, wider).is_err());
    // A single member is accepted by the union pattern.
    assert!(check(&pool, &pattern, Idx::DOUBLE).is_ok());
    assert!(check(&pool, &pattern, Idx::INT).is_err());
}

#[test]
fn plain_pattern_against_union_needs_every_member() {
    let mut pool = Pool::new();
    let doubles = pool.union([Idx::DOUBLE]).unwrap();
    let nullable = pool.union([Idx::NULL, Idx::DOUBLE]).unwrap();
    assert!(check(&pool, &Pattern::Double, doubles).is_ok());
    assert!(check(&pool, &Pattern::Double, nullable).is_err());
    // A wildcard binds the union as a whole.
    assert_eq!(
        check(&pool, &Pattern::wildcard("A"), nullable).unwrap().get("A"),
        Some(nullable)
    );
}

#[test]
fn function_types() {
    let mut pool = Pool::new();
    let arr = pool.array(Idx::DOUBLE);
    let kernel = pool.function(vec![arr, arr], Idx::DOUBLE);
    let unary = pool.function(vec![Idx::DOUBLE], Idx::DOUBLE);
    let pattern = Pattern::fcn(
        [Pattern::array(Pattern::Double), Pattern::array(Pattern::Double)],
        Pattern::Double,
    );
    assert!(check(&pool, &pattern, kernel).is_ok());
    assert_eq!(
        check(&pool, &pattern, unary),
        Err(MatchError::FunctionArity {
            expected: 2,
            found: 1
        })
    );
    assert!(check(&pool, &pattern, arr).is_err());

    let generic = Pattern::fcn([Pattern::wildcard("A")], Pattern::wildcard("B"));
    let to_string = pool.function(vec![Idx::INT], Idx::STRING);
    let b = check(&pool, &generic, to_string).unwrap();
    assert_eq!(b.get("A"), Some(Idx::INT));
    assert_eq!(b.get("B"), Some(Idx::STRING));
}

#[test]
fn self_referential_record_terminates() {
    let mut pool = Pool::new();
    let node = pool.declare_record(FullName::parse("Node")).unwrap();
    let next = pool.union([Idx::NULL, node]).unwrap();
    pool.define_record(node, vec![Field::new("value", Idx::INT), Field::new("next", next)])
        .unwrap();

    let by_name = Pattern::record(
        Some("Node"),
        [
            ("value", Pattern::Int),
            (
                "next",
                Pattern::union([Pattern::Null, Pattern::Named(FullName::parse("Node"))]),
            ),
        ],
    );
    assert!(check(&pool, &by_name, node).is_ok());

    let shape = crate::from_type(&pool, node);
    assert!(check(&pool, &shape, node).is_ok());

    let wild = Pattern::wild_record(
        "N",
        [("next", Pattern::union([Pattern::Null, Pattern::wildcard("N")]))],
    );
    assert_eq!(check(&pool, &wild, node).unwrap().get("N"), Some(node));
}

#[test]
fn nameless_patterns_accept_any_name() {
    let mut pool = Pool::new();
    let plain = point(&mut pool, false);
    let nameless = Pattern::record(None, [("x", Pattern::Double), ("y", Pattern::Double)]);
    assert!(check(&pool, &nameless, plain).is_ok());

    let suit = pool
        .enumeration(Some(FullName::parse("ex.Suit")), vec!["a".into(), "b".into()])
        .unwrap();
    let any_suit = Pattern::Enum {
        symbols: vec!["a".into(), "b".into()],
        name: None,
    };
    assert!(check(&pool, &any_suit, suit).is_ok());
    let reordered = Pattern::Enum {
        symbols: vec!["b".into(), "a".into()],
        name: None,
    };
    assert!(check(&pool, &reordered, suit).is_err());

    let md5 = pool.fixed(Some(FullName::parse("Md5")), 16).unwrap();
    assert!(check(&pool, &Pattern::Fixed { size: 16, name: None }, md5).is_ok());
    assert!(check(&pool, &Pattern::Fixed { size: 8, name: None }, md5).is_err());
}

#[test]
fn named_patterns_reject_nameless_types() {
    let mut pool = Pool::new();
    let anonymous = pool
        .record(None, vec![Field::new("x", Idx::DOUBLE), Field::new("y", Idx::DOUBLE)])
        .unwrap();
    let named = Pattern::record(Some("ex.Point"), [("x", Pattern::Double), ("y", Pattern::Double)]);
    assert!(check(&pool, &named, anonymous).is_err());
}
