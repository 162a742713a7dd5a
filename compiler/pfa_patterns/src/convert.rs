//! Conversions between patterns and concrete types.

use pfa_types::{ensure_sufficient_stack, Field, FullName, Idx, Pool, PoolError, TypeData};

use crate::{Bindings, Pattern};

/// A pattern could not be turned into a concrete type.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The pattern contains a label and no bindings were supplied.
    #[error("pattern {pattern} is generic and has no single concrete type")]
    Generic { pattern: String },

    /// A label used in a return pattern was never bound by a parameter.
    #[error("label {label} is not bound by any parameter")]
    UnboundLabel { label: String },

    /// A `Named` reference to a type the pool does not know.
    #[error("no type named {name}")]
    UnknownName { name: FullName },

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Convert a label-free pattern to the type it describes.
pub fn to_type(pool: &mut Pool, pattern: &Pattern) -> Result<Idx, ConvertError> {
    build(pool, pattern, None)
}

/// Convert a pattern to a type, replacing each label with its binding.
///
/// This is how a signature's return pattern becomes the call's return type.
pub fn instantiate(
    pool: &mut Pool,
    pattern: &Pattern,
    bindings: &Bindings,
) -> Result<Idx, ConvertError> {
    build(pool, pattern, Some(bindings))
}

fn build(pool: &mut Pool, pattern: &Pattern, bindings: Option<&Bindings>) -> Result<Idx, ConvertError> {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Null => Ok(Idx::NULL),
        Pattern::Boolean => Ok(Idx::BOOLEAN),
        Pattern::Int => Ok(Idx::INT),
        Pattern::Long => Ok(Idx::LONG),
        Pattern::Float => Ok(Idx::FLOAT),
        Pattern::Double => Ok(Idx::DOUBLE),
        Pattern::Bytes => Ok(Idx::BYTES),
        Pattern::String => Ok(Idx::STRING),
        Pattern::Array(items) => {
            let item = build(pool, items, bindings)?;
            Ok(pool.array(item))
        }
        Pattern::Map(values) => {
            let value = build(pool, values, bindings)?;
            Ok(pool.map(value))
        }
        Pattern::Union(members) => {
            let members = members
                .iter()
                .map(|m| build(pool, m, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(pool.union(members)?)
        }
        Pattern::Fixed { size, name } => Ok(pool.fixed(name.clone(), *size)?),
        Pattern::Enum { symbols, name } => Ok(pool.enumeration(name.clone(), symbols.clone())?),
        Pattern::Record { fields, name } => {
            // Declare first so fields can refer back to this record by name.
            let declared = match name {
                Some(name) if pool.lookup(name).is_none() => {
                    Some(pool.declare_record(name.clone())?)
                }
                _ => None,
            };
            let built = fields
                .iter()
                .map(|(field, p)| -> Result<Field, ConvertError> {
                    Ok(Field::new(field.clone(), build(pool, p, bindings)?))
                })
                .collect::<Result<Vec<_>, _>>()
                .and_then(|fields| pool.record(name.clone(), fields).map_err(ConvertError::from));
            if let (Err(_), Some(idx)) = (&built, declared) {
                pool.forget_pending(idx);
            }
            built
        }
        Pattern::Named(name) => pool
            .lookup(name)
            .ok_or_else(|| ConvertError::UnknownName { name: name.clone() }),
        Pattern::Fcn { params, ret } => {
            let params = params
                .iter()
                .map(|p| build(pool, p, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            let ret = build(pool, ret, bindings)?;
            Ok(pool.function(params, ret))
        }
        Pattern::Wildcard { label, .. }
        | Pattern::WildRecord { label, .. }
        | Pattern::WildEnum(label)
        | Pattern::WildFixed(label)
        | Pattern::EnumFields { label, .. } => match bindings {
            Some(bindings) => bindings
                .get(label)
                .ok_or_else(|| ConvertError::UnboundLabel {
                    label: label.clone(),
                }),
            None => Err(ConvertError::Generic {
                pattern: pattern.to_string(),
            }),
        },
    })
}

/// Describe a concrete type as a label-free pattern.
///
/// A record met again inside its own fields becomes [`Pattern::Named`].
pub fn from_type(pool: &Pool, idx: Idx) -> Pattern {
    let mut open = Vec::new();
    pattern_of(pool, idx, &mut open)
}

fn pattern_of(pool: &Pool, idx: Idx, open: &mut Vec<Idx>) -> Pattern {
    ensure_sufficient_stack(|| match pool.data(idx) {
        TypeData::Null => Pattern::Null,
        TypeData::Boolean => Pattern::Boolean,
        TypeData::Int => Pattern::Int,
        TypeData::Long => Pattern::Long,
        TypeData::Float => Pattern::Float,
        TypeData::Double => Pattern::Double,
        TypeData::Bytes => Pattern::Bytes,
        TypeData::String => Pattern::String,
        TypeData::Array(item) => Pattern::array(pattern_of(pool, *item, open)),
        TypeData::Map(values) => Pattern::map(pattern_of(pool, *values, open)),
        TypeData::Union(members) => {
            Pattern::Union(members.iter().map(|&m| pattern_of(pool, m, open)).collect())
        }
        TypeData::Fixed { name, size } => Pattern::Fixed {
            size: *size,
            name: name.clone(),
        },
        TypeData::Enum { name, symbols } => Pattern::Enum {
            symbols: symbols.clone(),
            name: name.clone(),
        },
        TypeData::Record { name, fields } => {
            if let Some(name) = name {
                if open.contains(&idx) {
                    return Pattern::Named(name.clone());
                }
            }
            open.push(idx);
            let fields = fields
                .iter()
                .map(|f| (f.name.clone(), pattern_of(pool, f.ty, open)))
                .collect();
            open.pop();
            Pattern::Record {
                fields,
                name: name.clone(),
            }
        }
        TypeData::Function { params, ret } => Pattern::Fcn {
            params: params.iter().map(|&p| pattern_of(pool, p, open)).collect(),
            ret: Box::new(pattern_of(pool, *ret, open)),
        },
    })
}
