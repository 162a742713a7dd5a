//! Engine options: the document's `options` section merged with host
//! overrides.

use std::collections::BTreeMap;

use pfa_patterns::{Version, VersionError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("option \"{key}\" must be an integral number, found \"{value}\"")]
    NotInteger { key: String, value: String },

    #[error("option \"version\": {0}")]
    Version(#[from] VersionError),
}

/// Runtime limits and overrides for one engine.
///
/// Timeouts are in milliseconds; `-1` means no limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    pub timeout: i64,
    pub timeout_begin: i64,
    pub timeout_action: i64,
    pub timeout_end: i64,
    /// Language version to use instead of the document's own.
    pub version: Option<Version>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            timeout: -1,
            timeout_begin: -1,
            timeout_action: -1,
            timeout_end: -1,
            version: None,
        }
    }
}

impl EngineOptions {
    /// Combine options requested by a document with host overrides.
    ///
    /// A key present in both takes the host's value. Unrecognised keys are
    /// ignored. Each phase timeout falls back to `timeout`.
    pub fn merge(
        requested: &BTreeMap<String, String>,
        host: &BTreeMap<String, String>,
    ) -> Result<Self, OptionsError> {
        let lookup = |key: &str| host.get(key).or_else(|| requested.get(key));
        let millis = |key: &str, default: i64| match lookup(key) {
            Some(value) => parse_integral(key, value),
            None => Ok(default),
        };

        let timeout = millis("timeout", -1)?;
        let options = EngineOptions {
            timeout,
            timeout_begin: millis("timeout.begin", timeout)?,
            timeout_action: millis("timeout.action", timeout)?,
            timeout_end: millis("timeout.end", timeout)?,
            version: lookup("version").map(|v| v.parse()).transpose()?,
        };
        tracing::debug!(?options, "merged engine options");
        Ok(options)
    }
}

/// An integer, also accepting a number written with a zero fraction such as
/// `"1000.0"`.
fn parse_integral(key: &str, value: &str) -> Result<i64, OptionsError> {
    let text = value.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Ok(n);
    }
    let bad = || OptionsError::NotInteger {
        key: key.to_owned(),
        value: value.to_owned(),
    };
    let x = text.parse::<f64>().map_err(|_| bad())?;
    if x.fract() != 0.0 {
        return Err(bad());
    }
    crate::library::to_long(x).ok_or_else(bad)
}
