//! Signature patterns and overload resolution.
//!
//! Library functions declare what they accept with [`Pattern`]s. A call site
//! provides concrete argument types from a [`Pool`](pfa_types::Pool); the
//! resolver tries each declared [`Signature`] in order and returns the first
//! that matches, together with the label [`Bindings`] and the concrete
//! return type.
//!
//! # Matching rules
//!
//! - Fixed patterns match structurally equal types only.
//! - Labels (`Wildcard`, `WildRecord`, `WildEnum`, `WildFixed`,
//!   `EnumFields`) bind on first use; later uses must see the same type.
//! - `WildRecord` is satisfied by any record that has at least its fields.
//! - Parameters are matched left to right with no backtracking.

mod bindings;
mod convert;
mod matcher;
mod pattern;
mod resolve;
mod signature;

pub use bindings::Bindings;
pub use convert::{from_type, instantiate, to_type, ConvertError};
pub use matcher::{MatchError, Matcher};
pub use pattern::Pattern;
pub use resolve::{match_signature, resolve_overload, Rejection, Resolution, ResolveError};
pub use signature::{Lifespan, Param, Signature, Version, VersionError};
