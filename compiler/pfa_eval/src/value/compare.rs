//! Type-directed ordering of values.

use std::cmp::Ordering;

use pfa_types::{ensure_sufficient_stack, Idx, Pool, TypeData};

use super::Value;

/// Order two values of type `ty`.
///
/// Numbers order numerically with NaN above everything else; strings,
/// bytes and fixed order lexicographically; enums by symbol position;
/// arrays, maps and records element by element. Values of a union order
/// first by which member they belong to.
///
/// Returns `None` if either value does not fit `ty`, or for function
/// values, which have no order.
pub fn compare(pool: &Pool, ty: Idx, x: &Value, y: &Value) -> Option<Ordering> {
    ensure_sufficient_stack(|| match (pool.data(ty), x, y) {
        (TypeData::Null, Value::Null, Value::Null) => Some(Ordering::Equal),
        (TypeData::Boolean, Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (TypeData::Int, Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (TypeData::Long, Value::Long(a), Value::Long(b)) => Some(a.cmp(b)),
        (TypeData::Float, Value::Float(a), Value::Float(b)) => {
            Some(float_order(f64::from(*a), f64::from(*b)))
        }
        (TypeData::Double, Value::Double(a), Value::Double(b)) => Some(float_order(*a, *b)),
        (TypeData::Bytes, Value::Bytes(a), Value::Bytes(b))
        | (TypeData::Fixed { .. }, Value::Fixed(a), Value::Fixed(b)) => {
            Some(a.as_slice().cmp(b.as_slice()))
        }
        (TypeData::String, Value::String(a), Value::String(b)) => {
            Some(a.as_str().cmp(b.as_str()))
        }
        (TypeData::Enum { symbols, .. }, Value::Enum(a), Value::Enum(b)) => {
            let a = symbols.iter().position(|s| s == a.as_str())?;
            let b = symbols.iter().position(|s| s == b.as_str())?;
            Some(a.cmp(&b))
        }
        (TypeData::Array(item), Value::Array(a), Value::Array(b)) => {
            for (a, b) in a.iter().zip(b.iter()) {
                match compare(pool, *item, a, b)? {
                    Ordering::Equal => {}
                    other => return Some(other),
                }
            }
            Some(a.len().cmp(&b.len()))
        }
        (TypeData::Map(values), Value::Map(a), Value::Map(b)) => {
            for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                match ka.cmp(kb) {
                    Ordering::Equal => {}
                    other => return Some(other),
                }
                match compare(pool, *values, va, vb)? {
                    Ordering::Equal => {}
                    other => return Some(other),
                }
            }
            Some(a.len().cmp(&b.len()))
        }
        (TypeData::Record { fields, .. }, Value::Record(a), Value::Record(b)) => {
            for field in fields {
                let ord = compare(pool, field.ty, a.get(&field.name)?, b.get(&field.name)?)?;
                if ord != Ordering::Equal {
                    return Some(ord);
                }
            }
            Some(Ordering::Equal)
        }
        (TypeData::Union(members), _, _) => {
            let (ia, ta) = member_of(pool, members, x)?;
            let (ib, _tb) = member_of(pool, members, y)?;
            if ia == ib {
                compare(pool, ta, x, y)
            } else {
                Some(ia.cmp(&ib))
            }
        }
        _ => None,
    })
}

fn float_order(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// The first union member whose shape fits `value`.
fn member_of(pool: &Pool, members: &[Idx], value: &Value) -> Option<(usize, Idx)> {
    members
        .iter()
        .enumerate()
        .find(|&(_, &ty)| fits(pool, ty, value))
        .map(|(i, &ty)| (i, ty))
}

fn fits(pool: &Pool, ty: Idx, value: &Value) -> bool {
    match (pool.data(ty), value) {
        (TypeData::Null, Value::Null)
        | (TypeData::Boolean, Value::Boolean(_))
        | (TypeData::Int, Value::Int(_))
        | (TypeData::Long, Value::Long(_))
        | (TypeData::Float, Value::Float(_))
        | (TypeData::Double, Value::Double(_))
        | (TypeData::Bytes, Value::Bytes(_))
        | (TypeData::String, Value::String(_))
        | (TypeData::Array(_), Value::Array(_))
        | (TypeData::Map(_), Value::Map(_))
        | (TypeData::Function { .. }, Value::Function(_)) => true,
        (TypeData::Fixed { size, .. }, Value::Fixed(bytes)) => {
            usize::try_from(*size).is_ok_and(|size| size == bytes.len())
        }
        (TypeData::Enum { symbols, .. }, Value::Enum(symbol)) => {
            symbols.iter().any(|s| s == symbol.as_str())
        }
        (TypeData::Record { fields, .. }, Value::Record(record)) => {
            fields.len() == record.len() && fields.iter().all(|f| record.get(&f.name).is_some())
        }
        _ => false,
    }
}
