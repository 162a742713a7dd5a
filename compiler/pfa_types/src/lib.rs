//! Type model for the PFA scoring engine.
//!
//! Every concrete value type (Avro primitives, containers, named types and
//! function types) lives in a [`Pool`] and is referenced by a 32-bit [`Idx`].
//!
//! # Design
//!
//! - Structural types are hash-consed, so type equality is index equality.
//! - Named types (`fixed`, `enum`, `record`) are unique per [`FullName`];
//!   redefining a name with a different shape is an error.
//! - Records may be declared before they are defined, which is how
//!   self-referential schemas are built. Everything that walks types
//!   (formatting, matching, conversion) must guard against such cycles.

mod data;
mod error;
mod idx;
mod name;
mod pool;
mod stack;
mod tag;

pub use data::{Field, TypeData};
pub use error::PoolError;
pub use idx::Idx;
pub use name::FullName;
pub use pool::Pool;
pub use stack::ensure_sufficient_stack;
pub use tag::Tag;
