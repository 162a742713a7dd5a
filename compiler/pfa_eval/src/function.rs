//! Library function objects and the boundary for calling function values.

use std::fmt;
use std::sync::Arc;

use pfa_patterns::Signature;
use pfa_types::{Idx, Pool};

use crate::{EvalError, EvalResult, ResolvedCall, RuntimeError, Value};

/// A registrable library function.
///
/// Implementations are shared by every engine instance and must not keep
/// per-call state.
pub trait LibFcn: Send + Sync {
    /// Qualified dotted name, e.g. `"m.kernel.rbf"`.
    fn name(&self) -> &str;

    /// Declared signatures, in priority order.
    fn signatures(&self) -> &[Signature];

    /// First runtime failure code reserved for this function.
    fn errcode_base(&self) -> i32;

    /// Run the function on arguments of the resolved types in `ctx`.
    fn call(&self, ctx: &CallContext<'_>, args: &[Value], exec: &mut dyn CallBoundary)
        -> EvalResult;
}

/// Everything a function learns about the call it is running.
#[derive(Clone, Copy, Debug)]
pub struct CallContext<'a> {
    pub pool: &'a Pool,
    pub function: &'a str,
    pub errcode_base: i32,
    /// Which declared signature matched.
    pub signature_index: usize,
    /// Concrete argument types at the call site.
    pub param_types: &'a [Idx],
    pub return_type: Idx,
    /// Source location of the call, if the loader recorded one.
    pub position: Option<&'a str>,
}

impl CallContext<'_> {
    /// A runtime failure with code `errcode_base + offset`.
    pub fn fail(&self, offset: i32, message: impl Into<String>) -> EvalError {
        let err = RuntimeError::new(self.errcode_base + offset, self.function, message);
        match self.position {
            Some(position) => err.with_position(position).into(),
            None => err.into(),
        }
    }

    /// An argument did not have the shape its type promises.
    pub fn mismatch(&self, expected: &'static str) -> EvalError {
        EvalError::ValueMismatch {
            function: self.function.to_owned(),
            expected,
        }
    }

    pub fn arity(&self, expected: usize, found: usize) -> EvalError {
        EvalError::Arity {
            function: self.function.to_owned(),
            expected,
            found,
        }
    }
}

/// Calls a function value on behalf of a library function.
///
/// Higher-order functions such as `model.svm.score` receive their kernel
/// as a [`Callee`] and invoke it here. A failure inside the callee comes
/// back unchanged.
pub trait CallBoundary {
    fn call(&mut self, callee: &Callee, args: Vec<Value>) -> EvalResult;
}

/// Body of a [`Builtin`].
pub type BuiltinFn = fn(&CallContext<'_>, &[Value], &mut dyn CallBoundary) -> EvalResult;

/// A library function defined by a plain Rust function.
pub struct Builtin {
    name: &'static str,
    errcode_base: i32,
    signatures: Vec<Signature>,
    body: BuiltinFn,
}

impl Builtin {
    pub fn new(
        name: &'static str,
        errcode_base: i32,
        signatures: Vec<Signature>,
        body: BuiltinFn,
    ) -> Self {
        Builtin {
            name,
            errcode_base,
            signatures,
            body,
        }
    }
}

impl LibFcn for Builtin {
    fn name(&self) -> &str {
        self.name
    }

    fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    fn errcode_base(&self) -> i32 {
        self.errcode_base
    }

    fn call(
        &self,
        ctx: &CallContext<'_>,
        args: &[Value],
        exec: &mut dyn CallBoundary,
    ) -> EvalResult {
        (self.body)(ctx, args, exec)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("errcode_base", &self.errcode_base)
            .field("signatures", &self.signatures.len())
            .finish_non_exhaustive()
    }
}

/// A function value.
#[derive(Clone)]
pub enum Callee {
    /// A library function already resolved against concrete types.
    Library(Arc<ResolvedCall>),
    /// A function supplied by the host, such as a compiled user function.
    Native(NativeFcn),
}

impl Callee {
    pub fn library(call: ResolvedCall) -> Self {
        Callee::Library(Arc::new(call))
    }

    pub fn native(
        name: impl Into<String>,
        body: impl Fn(Vec<Value>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let name: String = name.into();
        Callee::Native(NativeFcn {
            name: Arc::from(name),
            body: Arc::new(body),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Callee::Library(call) => &call.function,
            Callee::Native(native) => native.name(),
        }
    }
}

impl PartialEq for Callee {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callee::Library(a), Callee::Library(b)) => {
                a.function == b.function && a.param_types == b.param_types
            }
            (Callee::Native(a), Callee::Native(b)) => Arc::ptr_eq(&a.body, &b.body),
            _ => false,
        }
    }
}

impl fmt::Debug for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callee::Library(call) => write!(f, "Callee::Library({})", call.function),
            Callee::Native(native) => write!(f, "Callee::Native({})", native.name),
        }
    }
}

type NativeBody = dyn Fn(Vec<Value>) -> EvalResult + Send + Sync;

/// A host-supplied function value.
#[derive(Clone)]
pub struct NativeFcn {
    name: Arc<str>,
    body: Arc<NativeBody>,
}

impl NativeFcn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: Vec<Value>) -> EvalResult {
        (self.body)(args)
    }
}
