//! Process-wide table of library functions.
//!
//! Each library module registers its functions once at startup. The
//! registry rejects duplicate names, reused error-code bases and
//! malformed signatures, so a built registry can be trusted by every
//! engine that shares it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use pfa_diagnostic::{Diagnostic, ErrorCode};
use pfa_patterns::{resolve_overload, to_type, Bindings, ConvertError, ResolveError, Version};
use pfa_types::{Idx, Pool};
use rustc_hash::FxHashMap;

use crate::{library, Callee, LibFcn, SharedRegistry};

/// Width of the failure-code range each function reserves.
const ERRCODE_SPAN: i32 = 10;

/// A call site bound to one signature of one library function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCall {
    pub function: String,
    pub signature_index: usize,
    pub param_types: Vec<Idx>,
    pub return_type: Idx,
    pub errcode_base: i32,
    pub bindings: Bindings,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("function \"{name}\" is registered twice")]
    DuplicateName { name: String },

    #[error("\"{name}\" reuses error code base {base}, already reserved by \"{owner}\"")]
    DuplicateErrcodeBase {
        name: String,
        base: i32,
        owner: String,
    },

    #[error("\"{name}\" declares no signatures")]
    EmptySignatureSet { name: String },

    #[error("signature {signature} of \"{name}\" returns label {label}, which no parameter binds")]
    InvalidSignature {
        name: String,
        signature: String,
        label: String,
    },

    #[error("unknown function \"{name}\"")]
    UnknownFunction { name: String },

    /// Only functions with a single label-free signature can be passed as values.
    #[error("\"{name}\" cannot be used as a function value: {reason}")]
    NotReferenceable { name: String, reason: &'static str },

    #[error("signature of \"{name}\" has no concrete type: {source}")]
    Convert { name: String, source: ConvertError },
}

impl RegistryError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            RegistryError::DuplicateName { .. }
            | RegistryError::DuplicateErrcodeBase { .. }
            | RegistryError::EmptySignatureSet { .. } => ErrorCode::E2004,
            RegistryError::InvalidSignature { .. } => ErrorCode::E2003,
            RegistryError::UnknownFunction { .. } => ErrorCode::E2002,
            RegistryError::NotReferenceable { .. } => ErrorCode::E2006,
            RegistryError::Convert { .. } => ErrorCode::E2005,
        };
        Diagnostic::error(code).with_message(self.to_string())
    }
}

/// Library functions by qualified name.
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn LibFcn>>,
    /// Error-code base to owning function.
    bases: BTreeMap<i32, String>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        FunctionRegistry {
            functions: FxHashMap::default(),
            bases: BTreeMap::new(),
        }
    }

    /// A registry holding the whole standard library.
    pub fn with_standard_library() -> Result<Self, RegistryError> {
        let mut registry = FunctionRegistry::new();
        library::register_all(&mut registry)?;
        tracing::debug!(functions = registry.len(), "built standard library registry");
        Ok(registry)
    }

    /// The process-wide standard library registry, built on first use.
    pub fn standard() -> Result<SharedRegistry<FunctionRegistry>, RegistryError> {
        static STANDARD: OnceLock<Result<SharedRegistry<FunctionRegistry>, RegistryError>> =
            OnceLock::new();
        STANDARD
            .get_or_init(|| FunctionRegistry::with_standard_library().map(SharedRegistry::new))
            .clone()
    }

    pub fn register(&mut self, function: impl LibFcn + 'static) -> Result<(), RegistryError> {
        self.register_shared(Arc::new(function))
    }

    /// Add a function, checking it against everything already registered.
    pub fn register_shared(&mut self, function: Arc<dyn LibFcn>) -> Result<(), RegistryError> {
        let name = function.name().to_owned();
        if self.functions.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }
        let base = function.errcode_base();
        if let Some(owner) = self.bases.get(&base) {
            return Err(RegistryError::DuplicateErrcodeBase {
                name,
                base,
                owner: owner.clone(),
            });
        }
        if function.signatures().is_empty() {
            return Err(RegistryError::EmptySignatureSet { name });
        }
        for sig in function.signatures() {
            if let Some(label) = sig.unbound_return_labels().into_iter().next() {
                return Err(RegistryError::InvalidSignature {
                    name,
                    signature: sig.to_string(),
                    label,
                });
            }
        }

        tracing::trace!(%name, base, signatures = function.signatures().len(), "registered");
        self.bases.insert(base, name.clone());
        self.functions.insert(name, function);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn LibFcn>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The function whose reserved range contains `code`.
    pub fn owner_of_code(&self, code: i32) -> Option<&str> {
        let (base, owner) = self.bases.range(..=code).next_back()?;
        (code - base < ERRCODE_SPAN).then_some(owner.as_str())
    }

    /// Resolve a call site against the named function's signatures.
    pub fn resolve(
        &self,
        pool: &mut Pool,
        name: &str,
        args: &[Idx],
        version: Version,
    ) -> Result<ResolvedCall, ResolveError> {
        let function = self.get(name).ok_or_else(|| ResolveError::UnknownFunction {
            name: name.to_owned(),
        })?;
        let resolution = resolve_overload(pool, name, function.signatures(), args, version)?;
        Ok(ResolvedCall {
            function: name.to_owned(),
            signature_index: resolution.signature_index,
            param_types: args.to_vec(),
            return_type: resolution.return_type,
            errcode_base: function.errcode_base(),
            bindings: resolution.bindings,
        })
    }

    /// The function type of a library function used as a value.
    pub fn fcnref_type(&self, pool: &mut Pool, name: &str) -> Result<Idx, RegistryError> {
        let call = self.fcnref_call(pool, name)?;
        Ok(pool.function(call.param_types, call.return_type))
    }

    /// A library function as a value that can be passed to a higher-order
    /// function.
    pub fn fcnref(&self, pool: &mut Pool, name: &str) -> Result<Callee, RegistryError> {
        Ok(Callee::library(self.fcnref_call(pool, name)?))
    }

    fn fcnref_call(&self, pool: &mut Pool, name: &str) -> Result<ResolvedCall, RegistryError> {
        let function = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownFunction {
                name: name.to_owned(),
            })?;
        let [sig] = function.signatures() else {
            return Err(RegistryError::NotReferenceable {
                name: name.to_owned(),
                reason: "it has more than one signature",
            });
        };
        if sig.is_generic() {
            return Err(RegistryError::NotReferenceable {
                name: name.to_owned(),
                reason: "its signature is generic",
            });
        }
        let convert = |pool: &mut Pool, pattern| {
            to_type(pool, pattern).map_err(|source| RegistryError::Convert {
                name: name.to_owned(),
                source,
            })
        };
        let mut param_types = Vec::with_capacity(sig.arity());
        for param in &sig.params {
            param_types.push(convert(pool, &param.pattern)?);
        }
        let return_type = convert(pool, &sig.ret)?;
        Ok(ResolvedCall {
            function: name.to_owned(),
            signature_index: 0,
            param_types,
            return_type,
            errcode_base: function.errcode_base(),
            bindings: Bindings::new(),
        })
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests;
