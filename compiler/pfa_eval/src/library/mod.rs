//! The standard library.
//!
//! Every module exposes `provide()`, returning its functions in
//! registration order. Each function reserves a block of ten failure codes
//! starting at its error-code base; offsets within the block are fixed per
//! failure condition.

mod args;
mod array;
mod change;
mod dist;
mod enums;
mod fixed;
mod hypothesis;
mod kernel;
mod link;
mod math;
mod naive;
mod neural;
mod numeric;
mod operators;
mod parse;
mod special;
mod strings;
mod svm;

pub(crate) use numeric::to_long;

use crate::{Builtin, FunctionRegistry, RegistryError};

/// Register every standard library module.
pub(crate) fn register_all(registry: &mut FunctionRegistry) -> Result<(), RegistryError> {
    let modules: [fn() -> Vec<Builtin>; 16] = [
        operators::provide,
        math::provide,
        special::provide,
        kernel::provide,
        link::provide,
        naive::provide,
        svm::provide,
        neural::provide,
        enums::provide,
        fixed::provide,
        parse::provide,
        change::provide,
        hypothesis::provide,
        dist::provide,
        array::provide,
        strings::provide,
    ];
    for provide in modules {
        for function in provide() {
            registry.register(function)?;
        }
    }
    Ok(())
}
