//! Runtime values passed to and returned from library functions.
//!
//! Composite payloads live behind [`Heap`], so cloning a value is cheap and
//! values can be shared across engine instances. All heap allocation goes
//! through the factory methods on [`Value`]:
//!
//! ```text
//! let v = Value::doubles([1.0, 2.0]);
//! let r = Value::record([("mean", Value::Double(0.0))]);
//! ```
//!
//! Values carry no union tag. A slot typed `union<null, boolean>` holds
//! either `Value::Null` or `Value::Boolean`; the resolved parameter types
//! tell a function which branch it is looking at.

mod compare;
mod heap;

use std::collections::BTreeMap;

pub use compare::compare;
pub use heap::Heap;

use crate::Callee;

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Heap<Vec<u8>>),
    String(Heap<String>),
    Array(Heap<Vec<Value>>),
    Map(Heap<BTreeMap<String, Value>>),
    Fixed(Heap<Vec<u8>>),
    /// An enum symbol. The symbol list lives in the value's type.
    Enum(Heap<String>),
    Record(RecordValue),
    Function(Callee),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Heap::new(b.into()))
    }

    #[inline]
    pub fn fixed(b: impl Into<Vec<u8>>) -> Self {
        Value::Fixed(Heap::new(b.into()))
    }

    #[inline]
    pub fn symbol(s: impl Into<String>) -> Self {
        Value::Enum(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// An `array<double>`.
    pub fn doubles(items: impl IntoIterator<Item = f64>) -> Self {
        Value::array(items.into_iter().map(Value::Double).collect())
    }

    #[inline]
    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    pub fn map_of<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Value::map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        )
    }

    /// A record with fields in the given order.
    pub fn record<'a>(fields: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Value::Record(RecordValue::new(
            fields.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        ))
    }

    #[inline]
    pub fn function(callee: Callee) -> Self {
        Value::Function(callee)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral value, widening `int` to `long`.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Any numeric value as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(x) => Some(f64::from(*x)),
            Value::Double(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Contents of a `bytes` or `fixed` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) | Value::Fixed(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_callee(&self) -> Option<&Callee> {
        match self {
            Value::Function(c) => Some(c),
            _ => None,
        }
    }

    /// Name of the value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Fixed(_) => "fixed",
            Value::Enum(_) => "enum",
            Value::Record(_) => "record",
            Value::Function(_) => "function",
        }
    }
}

/// A record value: ordered, uniquely named fields.
///
/// Records are never changed in place. [`RecordValue::with_fields`] builds a
/// new record whose untouched fields share their payloads with the original.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordValue {
    fields: Heap<Vec<(String, Value)>>,
}

impl RecordValue {
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        RecordValue {
            fields: Heap::new(fields),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy this record with some fields replaced.
    ///
    /// Returns `None` if a change names a field the record does not have.
    pub fn with_fields<'a>(
        &self,
        changes: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Option<RecordValue> {
        let mut fields = self.fields.to_vec();
        for (name, value) in changes {
            let slot = fields.iter_mut().find(|(field, _)| field == name)?;
            slot.1 = value;
        }
        Some(RecordValue::new(fields))
    }
}
