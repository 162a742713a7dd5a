use super::*;
use pretty_assertions::assert_eq;

#[test]
fn version_parsing() {
    assert_eq!("0.8.1".parse::<Version>(), Ok(Version::new(0, 8, 1)));
    assert_eq!("0.9".parse::<Version>(), Ok(Version::new(0, 9, 0)));
    assert_eq!(
        "zero".parse::<Version>(),
        Err(VersionError("zero".to_owned()))
    );
    assert!("1.2.3.4".parse::<Version>().is_err());
    assert_eq!(Version::default().to_string(), "0.8.1");
}

#[test]
fn version_ordering() {
    assert!(Version::new(0, 8, 1) < Version::new(0, 9, 0));
    assert!(Version::new(1, 0, 0) > Version::new(0, 99, 99));
}

#[test]
fn lifespan_window() {
    let span = Lifespan {
        birth: Some(Version::new(0, 7, 0)),
        deprecation: Some(Version::new(0, 8, 0)),
        death: Some(Version::new(0, 9, 0)),
        contingency: None,
    };
    assert!(!span.accepts(Version::new(0, 6, 9)));
    assert!(span.accepts(Version::new(0, 7, 0)));
    assert!(!span.deprecated(Version::new(0, 7, 5)));
    assert!(span.deprecated(Version::new(0, 8, 1)));
    assert!(!span.accepts(Version::new(0, 9, 0)));
    assert!(!span.deprecated(Version::new(0, 9, 0)));
    assert!(Lifespan::always().accepts(Version::new(0, 0, 0)));
}

#[test]
fn signature_display() {
    let sig = Signature::new(
        [("x", Pattern::array(Pattern::Double)), ("y", Pattern::Double)],
        Pattern::Double,
    );
    assert_eq!(sig.to_string(), "(x: array<double>, y: double) -> double");
    assert_eq!(sig.arity(), 2);
    assert!(!sig.is_generic());
}

#[test]
fn unbound_return_labels_are_reported() {
    let ok = Signature::new([("x", Pattern::wildcard("A"))], Pattern::array(Pattern::wildcard("A")));
    assert!(ok.unbound_return_labels().is_empty());

    let bad = Signature::new([("x", Pattern::wildcard("A"))], Pattern::wildcard("B"));
    assert_eq!(bad.unbound_return_labels(), vec!["B".to_owned()]);
}
