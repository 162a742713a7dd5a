//! Qualified names for named types.

use std::fmt;

/// Namespace plus name identifying a `fixed`, `enum` or `record`.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct FullName {
    namespace: Option<String>,
    name: String,
}

impl FullName {
    /// Create a name; an empty namespace is the same as none.
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        FullName {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_owned),
            name: name.into(),
        }
    }

    /// Split a dotted name: everything before the last `.` is the namespace.
    pub fn parse(dotted: &str) -> Self {
        match dotted.rsplit_once('.') {
            Some((namespace, name)) => FullName::new(Some(namespace), name),
            None => FullName::new(None, dotted),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for FullName {
    fn from(dotted: &str) -> Self {
        FullName::parse(dotted)
    }
}
