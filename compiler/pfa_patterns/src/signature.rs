//! Function signatures, lifespans and language versions.

use std::fmt;
use std::str::FromStr;

use crate::Pattern;

/// A language version such as `0.8.1`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub release: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, release: u32) -> Self {
        Version {
            major,
            minor,
            release,
        }
    }
}

/// Documents that do not declare a version are read as `0.8.1`.
impl Default for Version {
    fn default() -> Self {
        Version::new(0, 8, 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("version must be MAJOR.MINOR or MAJOR.MINOR.RELEASE, found \"{0}\"")]
pub struct VersionError(pub String);

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || VersionError(s.to_owned());
        let parts = s
            .trim()
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;
        match parts[..] {
            [major, minor] => Ok(Version::new(major, minor, 0)),
            [major, minor, release] => Ok(Version::new(major, minor, release)),
            _ => Err(bad()),
        }
    }
}

/// The range of language versions in which a signature exists.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Lifespan {
    /// First version with this signature; `None` means always existed.
    pub birth: Option<Version>,
    /// First version that warns about it.
    pub deprecation: Option<Version>,
    /// First version without it.
    pub death: Option<Version>,
    /// What to use instead, shown in the deprecation warning.
    pub contingency: Option<String>,
}

impl Lifespan {
    /// A signature that has always existed and never goes away.
    pub fn always() -> Self {
        Self::default()
    }

    /// Check if a document of `version` may use the signature.
    pub fn accepts(&self, version: Version) -> bool {
        self.birth.map_or(true, |birth| birth <= version)
            && self.death.map_or(true, |death| version < death)
    }

    /// Check if the signature is usable but scheduled for removal.
    pub fn deprecated(&self, version: Version) -> bool {
        self.accepts(version) && self.deprecation.is_some_and(|dep| dep <= version)
    }
}

/// One named parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: String,
    pub pattern: Pattern,
}

/// Ordered parameters, a return pattern, and a lifespan.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    pub params: Vec<Param>,
    pub ret: Pattern,
    pub lifespan: Lifespan,
}

impl Signature {
    pub fn new<'a>(params: impl IntoIterator<Item = (&'a str, Pattern)>, ret: Pattern) -> Self {
        Signature {
            params: params
                .into_iter()
                .map(|(name, pattern)| Param {
                    name: name.to_owned(),
                    pattern,
                })
                .collect(),
            ret,
            lifespan: Lifespan::always(),
        }
    }

    #[must_use]
    pub fn with_lifespan(mut self, lifespan: Lifespan) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Labels used by the return pattern that no parameter binds.
    ///
    /// A well-formed signature has none.
    pub fn unbound_return_labels(&self) -> Vec<String> {
        let mut bound = Vec::new();
        for param in &self.params {
            param.pattern.collect_labels(&mut bound);
        }
        let mut used = Vec::new();
        self.ret.collect_labels(&mut used);
        used.into_iter()
            .filter(|label| !bound.contains(label))
            .map(str::to_owned)
            .collect()
    }

    /// Check whether any parameter or the return is generic.
    pub fn is_generic(&self) -> bool {
        self.ret.is_generic() || self.params.iter().any(|p| p.pattern.is_generic())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.pattern)?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

#[cfg(test)]
mod tests;
