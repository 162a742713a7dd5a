//! Errors raised while building types.

use crate::FullName;

/// A type could not be added to the pool.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PoolError {
    /// One full name was given two different definitions.
    #[error("type name {name} is already defined with a different shape")]
    NameConflict { name: FullName },

    /// A record lists the same field twice.
    #[error("record {record} has duplicate field \"{field}\"")]
    DuplicateField { record: String, field: String },

    /// An enum lists the same symbol twice.
    #[error("enum {name} has duplicate symbol \"{symbol}\"")]
    DuplicateSymbol { name: String, symbol: String },

    /// `define_record` was called on something that is not a pending declaration.
    #[error("{name} is not a declared, undefined record")]
    NotDeclared { name: String },

    /// A union with no members.
    #[error("union must have at least one member")]
    EmptyUnion,

    /// The pool ran out of 32-bit indices.
    #[error("type pool exceeded u32::MAX entries")]
    Overflow,
}
