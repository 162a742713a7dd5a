//! Runs resolved calls.

use pfa_types::Pool;

use crate::{
    CallBoundary, CallContext, Callee, EvalError, EvalResult, FunctionRegistry, ResolvedCall, Value,
};

/// Executes resolved library calls and serves as their call boundary.
///
/// An executor borrows the registry and the frozen type pool; each scoring
/// engine instance uses its own.
pub struct Executor<'a> {
    registry: &'a FunctionRegistry,
    pool: &'a Pool,
}

impl<'a> Executor<'a> {
    pub fn new(registry: &'a FunctionRegistry, pool: &'a Pool) -> Self {
        Executor { registry, pool }
    }

    /// Run `call` on `args`.
    ///
    /// `position` is the call's source location, copied into any runtime
    /// failure.
    pub fn invoke(
        &mut self,
        call: &ResolvedCall,
        args: &[Value],
        position: Option<&str>,
    ) -> EvalResult {
        let function = self
            .registry
            .get(&call.function)
            .ok_or_else(|| EvalError::UnknownFunction {
                name: call.function.clone(),
            })?;
        if args.len() != call.param_types.len() {
            return Err(EvalError::Arity {
                function: call.function.clone(),
                expected: call.param_types.len(),
                found: args.len(),
            });
        }
        let ctx = CallContext {
            pool: self.pool,
            function: &call.function,
            errcode_base: call.errcode_base,
            signature_index: call.signature_index,
            param_types: &call.param_types,
            return_type: call.return_type,
            position,
        };
        tracing::trace!(function = %call.function, signature = call.signature_index, "invoke");
        function.call(&ctx, args, self)
    }
}

impl CallBoundary for Executor<'_> {
    fn call(&mut self, callee: &Callee, args: Vec<Value>) -> EvalResult {
        match callee {
            Callee::Library(call) => self.invoke(call, &args, None),
            Callee::Native(native) => native.call(args),
        }
    }
}
