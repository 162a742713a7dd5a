#![expect(clippy::unwrap_used, reason = "test code")]

use pfa_diagnostic::ErrorCode;
use pfa_patterns::{Pattern, ResolveError, Signature, Version};
use pfa_types::{Idx, Pool};
use pretty_assertions::assert_eq;

use super::*;
use crate::{Builtin, CallBoundary, CallContext, EvalResult, Value};

fn nothing(_: &CallContext<'_>, _: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    Ok(Value::Null)
}

fn unary(name: &'static str, base: i32) -> Builtin {
    Builtin::new(
        name,
        base,
        vec![Signature::new([("x", Pattern::Double)], Pattern::Double)],
        nothing,
    )
}

#[test]
fn rejects_duplicate_names() {
    let mut registry = FunctionRegistry::new();
    registry.register(unary("f", 100)).unwrap();
    let err = registry.register(unary("f", 200)).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateName { name: "f".to_owned() });
    assert_eq!(err.to_diagnostic().code, ErrorCode::E2004);
}

#[test]
fn rejects_reused_errcode_base() {
    let mut registry = FunctionRegistry::new();
    registry.register(unary("f", 100)).unwrap();
    assert_eq!(
        registry.register(unary("g", 100)),
        Err(RegistryError::DuplicateErrcodeBase {
            name: "g".to_owned(),
            base: 100,
            owner: "f".to_owned(),
        })
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn rejects_empty_signature_sets() {
    let mut registry = FunctionRegistry::new();
    let err = registry.register(Builtin::new("f", 100, vec![], nothing));
    assert_eq!(err, Err(RegistryError::EmptySignatureSet { name: "f".to_owned() }));
}

#[test]
fn rejects_unbound_return_label() {
    let mut registry = FunctionRegistry::new();
    let bad = Builtin::new(
        "f",
        100,
        vec![Signature::new([("x", Pattern::wildcard("A"))], Pattern::wildcard("B"))],
        nothing,
    );
    match registry.register(bad) {
        Err(err @ RegistryError::InvalidSignature { .. }) => {
            assert_eq!(err.to_diagnostic().code, ErrorCode::E2003);
            assert!(err.to_string().contains('B'));
        }
        other => panic!("expected an invalid signature, got {other:?}"),
    }
    assert!(registry.is_empty());
}

#[test]
fn failure_codes_map_back_to_their_function() {
    let registry = FunctionRegistry::standard().unwrap();
    assert_eq!(registry.owner_of_code(23000), Some("m.kernel.linear"));
    assert_eq!(registry.owner_of_code(27171), Some("m.log"));
    assert_eq!(registry.owner_of_code(19010), Some("enum.toInt"));
    assert_eq!(registry.owner_of_code(10), None);
}

#[test]
fn standard_registry_is_built_once() {
    let a = FunctionRegistry::standard().unwrap();
    let b = FunctionRegistry::standard().unwrap();
    assert!(a.same(&b));
    assert!(a.contains("model.svm.score"));
    assert!(a.names().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn resolve_reports_unknown_function() {
    let registry = FunctionRegistry::standard().unwrap();
    let err = registry
        .resolve(&mut Pool::new(), "m.nope", &[Idx::DOUBLE], Version::default())
        .unwrap_err();
    assert_eq!(err, ResolveError::UnknownFunction { name: "m.nope".to_owned() });
}

#[test]
fn resolve_records_the_chosen_signature() {
    let registry = FunctionRegistry::standard().unwrap();
    let mut pool = Pool::new();
    let map = pool.map(Idx::DOUBLE);
    let call = registry
        .resolve(&mut pool, "m.link.logit", &[map], Version::default())
        .unwrap();
    assert_eq!(call.signature_index, 1);
    assert_eq!(call.return_type, map);
    assert_eq!(call.errcode_base, 25010);
}

#[test]
fn function_references_need_one_concrete_signature() {
    let registry = FunctionRegistry::standard().unwrap();
    let mut pool = Pool::new();
    let ty = registry.fcnref_type(&mut pool, "m.sqrt").unwrap();
    assert_eq!(pool.function_parts(ty), Some((&[Idx::DOUBLE][..], Idx::DOUBLE)));

    assert!(matches!(
        registry.fcnref(&mut pool, "m.link.logit"),
        Err(RegistryError::NotReferenceable { .. })
    ));
    let generic = registry.fcnref(&mut pool, "+").unwrap_err();
    assert!(matches!(generic, RegistryError::NotReferenceable { .. }));
    assert_eq!(generic.to_diagnostic().code, ErrorCode::E2006);
    assert_eq!(
        registry.fcnref(&mut pool, "m.nope").unwrap_err().to_diagnostic().code,
        ErrorCode::E2002
    );
}
