use super::*;
use pretty_assertions::assert_eq;

#[test]
fn primitive_indices_are_stable() {
    assert_eq!(Idx::NULL.raw(), 0);
    assert_eq!(Idx::BOOLEAN.raw(), 1);
    assert_eq!(Idx::INT.raw(), 2);
    assert_eq!(Idx::LONG.raw(), 3);
    assert_eq!(Idx::FLOAT.raw(), 4);
    assert_eq!(Idx::DOUBLE.raw(), 5);
    assert_eq!(Idx::BYTES.raw(), 6);
    assert_eq!(Idx::STRING.raw(), 7);
}

#[test]
fn primitive_check() {
    assert!(Idx::STRING.is_primitive());
    assert!(!Idx::from_raw(Idx::FIRST_DYNAMIC).is_primitive());
}

#[test]
fn numeric_check() {
    assert!(Idx::INT.is_numeric());
    assert!(Idx::DOUBLE.is_numeric());
    assert!(!Idx::BOOLEAN.is_numeric());
    assert!(!Idx::BYTES.is_numeric());
}

#[test]
fn display_and_debug() {
    assert_eq!(Idx::DOUBLE.to_string(), "double");
    assert_eq!(format!("{:?}", Idx::LONG), "Idx::LONG");
    assert_eq!(Idx::from_raw(42).to_string(), "type#42");
    assert_eq!(format!("{:?}", Idx::from_raw(42)), "Idx(42)");
}
