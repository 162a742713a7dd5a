//! Type index handle.
//!
//! `Idx` is the only handle callers hold for a type. Primitive types are
//! pre-interned at fixed indices so they can be named without a pool.

use std::fmt;

/// A 32-bit index into the type [`Pool`](crate::Pool).
///
/// Types are compared by index equality, never structurally.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-7) ===

    /// The `null` type.
    pub const NULL: Self = Self(0);
    /// The `boolean` type.
    pub const BOOLEAN: Self = Self(1);
    /// The `int` type (32-bit signed).
    pub const INT: Self = Self(2);
    /// The `long` type (64-bit signed).
    pub const LONG: Self = Self(3);
    /// The `float` type (32-bit IEEE).
    pub const FLOAT: Self = Self(4);
    /// The `double` type (64-bit IEEE).
    pub const DOUBLE: Self = Self(5);
    /// The `bytes` type.
    pub const BYTES: Self = Self(6);
    /// The `string` type.
    pub const STRING: Self = Self(7);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 8;

    /// First index handed out for composite and named types.
    pub const FIRST_DYNAMIC: u32 = Self::PRIMITIVE_COUNT;

    /// Create an index from a raw value.
    ///
    /// The index is only meaningful for the pool that produced it.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of this type in pool storage.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this is one of the four numeric primitives.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self.0, 2..=5)
    }

    /// Avro name of a primitive, or `None` for pool-allocated types.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("null"),
            1 => Some("boolean"),
            2 => Some("int"),
            3 => Some("long"),
            4 => Some("float"),
            5 => Some("double"),
            6 => Some("bytes"),
            7 => Some("string"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx::{}", name.to_uppercase()),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type#{}", self.0),
        }
    }
}

// Idx must stay exactly 4 bytes
const _: () = assert!(std::mem::size_of::<Idx>() == 4);

#[cfg(test)]
mod tests;
