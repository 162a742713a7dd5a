//! Signature matching and overload resolution for call sites.

use std::fmt;

use pfa_diagnostic::{Diagnostic, ErrorCode};
use pfa_types::{Idx, Pool};

use crate::{instantiate, Bindings, ConvertError, MatchError, Matcher, Signature, Version};

/// Why one signature did not apply to a call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// Wrong number of arguments.
    Arity { expected: usize, found: usize },
    /// One parameter did not match; later parameters were not tried.
    Param {
        index: usize,
        name: String,
        error: MatchError,
    },
    /// The signature does not exist in the requested language version.
    NotInVersion { version: Version },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Arity { expected, found } => {
                write!(f, "expected {expected} arguments, found {found}")
            }
            Rejection::Param { index, name, error } => {
                write!(f, "argument {index} ({name}): {error}")
            }
            Rejection::NotInVersion { version } => write!(f, "not available in PFA {version}"),
        }
    }
}

/// The outcome of resolving one call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Position of the chosen signature in the declared list.
    pub signature_index: usize,
    /// Label bindings from the successful match.
    pub bindings: Bindings,
    /// Concrete return type for the call.
    pub return_type: Idx,
}

/// A call site could not be resolved.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown function \"{name}\"")]
    UnknownFunction { name: String },

    /// Every signature was rejected.
    #[error("no signature of \"{function}\" accepts ({}); {}", .args.join(", "), format_rejected(.rejected))]
    NoApplicableOverload {
        function: String,
        args: Vec<String>,
        rejected: Vec<(String, Rejection)>,
    },

    /// The matching signature's return pattern could not be built.
    #[error("signature {signature} of \"{function}\" is malformed: {source}")]
    SignatureDefinition {
        function: String,
        signature: String,
        source: ConvertError,
    },
}

fn format_rejected(rejected: &[(String, Rejection)]) -> String {
    rejected
        .iter()
        .map(|(sig, why)| format!("{sig} rejected: {why}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ResolveError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnknownFunction { .. } => {
                Diagnostic::error(ErrorCode::E2002).with_message(self.to_string())
            }
            ResolveError::NoApplicableOverload {
                function,
                args,
                rejected,
            } => rejected.iter().fold(
                Diagnostic::error(ErrorCode::E2001).with_message(format!(
                    "no signature of \"{function}\" accepts ({})",
                    args.join(", ")
                )),
                |diag, (sig, why)| diag.with_note(format!("{sig} rejected: {why}")),
            ),
            ResolveError::SignatureDefinition { .. } => {
                Diagnostic::error(ErrorCode::E2003).with_message(self.to_string())
            }
        }
    }
}

/// Match a signature's parameters against argument types, left to right.
///
/// Arity is checked before any pattern, and the first failing parameter
/// rejects the whole signature.
pub fn match_signature(pool: &Pool, sig: &Signature, args: &[Idx]) -> Result<Bindings, Rejection> {
    if sig.arity() != args.len() {
        return Err(Rejection::Arity {
            expected: sig.arity(),
            found: args.len(),
        });
    }
    let mut matcher = Matcher::new(pool);
    let mut bindings = Bindings::new();
    for (index, (param, &arg)) in sig.params.iter().zip(args).enumerate() {
        tracing::trace!(index, param = %param.name, pattern = %param.pattern, "matching parameter");
        matcher
            .matches(&param.pattern, arg, &mut bindings)
            .map_err(|error| Rejection::Param {
                index,
                name: param.name.clone(),
                error,
            })?;
    }
    Ok(bindings)
}

/// Pick the first signature, in declaration order, that accepts `args`.
///
/// Signatures outside `version` are skipped. A deprecated winner is logged
/// as a warning.
pub fn resolve_overload(
    pool: &mut Pool,
    function: &str,
    signatures: &[Signature],
    args: &[Idx],
    version: Version,
) -> Result<Resolution, ResolveError> {
    tracing::debug!(function, args = %pool.format_types(args), %version, "resolving call");
    let mut rejected = Vec::new();

    for (signature_index, sig) in signatures.iter().enumerate() {
        if !sig.lifespan.accepts(version) {
            rejected.push((sig.to_string(), Rejection::NotInVersion { version }));
            continue;
        }
        let bindings = match match_signature(pool, sig, args) {
            Ok(bindings) => bindings,
            Err(why) => {
                tracing::trace!(function, signature = %sig, reason = %why, "signature rejected");
                rejected.push((sig.to_string(), why));
                continue;
            }
        };

        let return_type = instantiate(pool, &sig.ret, &bindings).map_err(|source| {
            ResolveError::SignatureDefinition {
                function: function.to_owned(),
                signature: sig.to_string(),
                source,
            }
        })?;

        if sig.lifespan.deprecated(version) {
            tracing::warn!(
                "{function}{sig} is deprecated in PFA {version}, will be removed in PFA {}{}",
                sig.lifespan
                    .death
                    .map_or_else(|| "a future version".to_owned(), |d| d.to_string()),
                sig.lifespan
                    .contingency
                    .as_ref()
                    .map(|c| format!(" ({c})"))
                    .unwrap_or_default(),
            );
        }
        tracing::debug!(
            function,
            signature_index,
            return_type = %pool.format_type(return_type),
            "resolved call"
        );
        return Ok(Resolution {
            signature_index,
            bindings,
            return_type,
        });
    }

    Err(ResolveError::NoApplicableOverload {
        function: function.to_owned(),
        args: args.iter().map(|&a| pool.format_type(a)).collect(),
        rejected,
    })
}

#[cfg(test)]
mod tests;
