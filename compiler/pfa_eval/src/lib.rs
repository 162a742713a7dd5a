//! Runtime side of the PFA scoring engine.
//!
//! The [`FunctionRegistry`] maps qualified names (`"m.kernel.rbf"`,
//! `"model.naive.gaussian"`, ...) to [`LibFcn`] objects. Resolving a call
//! site yields a [`ResolvedCall`]; an [`Executor`] then runs it on concrete
//! [`Value`]s. Functions that take function-valued arguments call them back
//! through the [`CallBoundary`] trait, which the executor implements.
//!
//! ```text
//! let registry = FunctionRegistry::standard()?;
//! let call = registry.resolve(&mut pool, "m.kernel.linear", &[arr, arr], Version::default())?;
//! let out = Executor::new(&registry, &pool).invoke(&call, &[x, y], None)?;
//! ```

mod errors;
mod exec;
mod function;
mod library;
mod options;
mod registry;
mod shared;
mod value;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use errors::{EvalError, EvalResult, RuntimeError};
pub use exec::Executor;
pub use function::{Builtin, BuiltinFn, CallBoundary, CallContext, Callee, LibFcn, NativeFcn};
pub use options::{EngineOptions, OptionsError};
pub use registry::{FunctionRegistry, RegistryError, ResolvedCall};
pub use shared::SharedRegistry;
pub use value::{compare, Heap, RecordValue, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=pfa_patterns=debug`
/// to watch overload resolution, or `RUST_LOG=pfa_eval=trace` for calls.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
