//! Type kind tag.
//!
//! Each type in the pool has a `Tag` identifying its kind; matching rules
//! dispatch on it before looking at the payload.

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Tag {
    // === Primitives ===
    Null = 0,
    Boolean = 1,
    Int = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    Bytes = 6,
    String = 7,

    // === Containers ===
    /// `array<T>`.
    Array = 16,
    /// `map<T>` (keys are always strings).
    Map = 17,
    /// `union<T1..Tn>`.
    Union = 18,

    // === Named ===
    /// Fixed-size byte string.
    Fixed = 32,
    /// Enumeration over a symbol list.
    Enum = 33,
    /// Record with ordered, uniquely named fields.
    Record = 34,

    // === Special ===
    /// Function type; only appears as the type of function-valued arguments.
    Function = 48,
}

impl Tag {
    /// Avro-style name for this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Boolean => "boolean",
            Tag::Int => "int",
            Tag::Long => "long",
            Tag::Float => "float",
            Tag::Double => "double",
            Tag::Bytes => "bytes",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Map => "map",
            Tag::Union => "union",
            Tag::Fixed => "fixed",
            Tag::Enum => "enum",
            Tag::Record => "record",
            Tag::Function => "function",
        }
    }

    /// Check if this is a primitive kind.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        (self as u8) < 16
    }

    /// Check if types of this kind are identified by a full name.
    #[inline]
    pub const fn is_named(self) -> bool {
        matches!(self, Tag::Fixed | Tag::Enum | Tag::Record)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
