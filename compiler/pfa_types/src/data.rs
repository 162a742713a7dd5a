//! Payload stored for each interned type.

use crate::{FullName, Idx, Tag};

/// One field of a record type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub name: String,
    pub ty: Idx,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Idx) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// Structure of a concrete type.
///
/// Children are referenced by [`Idx`], so a `TypeData` is only meaningful
/// together with the pool that holds its children.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array(Idx),
    Map(Idx),
    /// Members in declaration order; never nested, never duplicated.
    Union(Vec<Idx>),
    Fixed {
        name: Option<FullName>,
        size: u32,
    },
    Enum {
        name: Option<FullName>,
        symbols: Vec<String>,
    },
    Record {
        name: Option<FullName>,
        fields: Vec<Field>,
    },
    Function {
        params: Vec<Idx>,
        ret: Idx,
    },
}

impl TypeData {
    pub fn tag(&self) -> Tag {
        match self {
            TypeData::Null => Tag::Null,
            TypeData::Boolean => Tag::Boolean,
            TypeData::Int => Tag::Int,
            TypeData::Long => Tag::Long,
            TypeData::Float => Tag::Float,
            TypeData::Double => Tag::Double,
            TypeData::Bytes => Tag::Bytes,
            TypeData::String => Tag::String,
            TypeData::Array(_) => Tag::Array,
            TypeData::Map(_) => Tag::Map,
            TypeData::Union(_) => Tag::Union,
            TypeData::Fixed { .. } => Tag::Fixed,
            TypeData::Enum { .. } => Tag::Enum,
            TypeData::Record { .. } => Tag::Record,
            TypeData::Function { .. } => Tag::Function,
        }
    }

    /// Full name of a named type, if it has one.
    pub fn full_name(&self) -> Option<&FullName> {
        match self {
            TypeData::Fixed { name, .. }
            | TypeData::Enum { name, .. }
            | TypeData::Record { name, .. } => name.as_ref(),
            _ => None,
        }
    }
}
