//! The pattern vocabulary used in signature declarations.

use std::fmt;

use pfa_types::{FullName, Idx};

/// Shape of an acceptable argument or return value.
///
/// The first group mirrors concrete types one to one. The labelled group
/// (`Wildcard` through `EnumFields`) is generic: a label names a type that
/// is fixed by its first match and shared across the whole signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Pattern {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array(Box<Pattern>),
    Map(Box<Pattern>),
    Union(Vec<Pattern>),
    Fixed {
        size: u32,
        name: Option<FullName>,
    },
    Enum {
        symbols: Vec<String>,
        name: Option<FullName>,
    },
    Record {
        fields: Vec<(String, Pattern)>,
        name: Option<FullName>,
    },
    /// Reference to a named type by name, used where a record refers back
    /// to itself.
    Named(FullName),
    /// Function-valued argument or result.
    Fcn {
        params: Vec<Pattern>,
        ret: Box<Pattern>,
    },
    /// Any type, optionally restricted to a closed set of concrete shapes.
    Wildcard {
        label: String,
        one_of: Option<Vec<Pattern>>,
    },
    /// Any record with at least these fields.
    WildRecord {
        label: String,
        fields: Vec<(String, Pattern)>,
    },
    /// Any enum.
    WildEnum(String),
    /// Any fixed.
    WildFixed(String),
    /// An enum whose symbols are exactly the field names of the record
    /// bound to `record_label`.
    EnumFields {
        label: String,
        record_label: String,
    },
}

impl Pattern {
    pub fn array(items: Pattern) -> Self {
        Pattern::Array(Box::new(items))
    }

    pub fn map(values: Pattern) -> Self {
        Pattern::Map(Box::new(values))
    }

    pub fn union(members: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Union(members.into_iter().collect())
    }

    pub fn record<'a>(
        name: Option<&str>,
        fields: impl IntoIterator<Item = (&'a str, Pattern)>,
    ) -> Self {
        Pattern::Record {
            fields: own_fields(fields),
            name: name.map(FullName::parse),
        }
    }

    pub fn fcn(params: impl IntoIterator<Item = Pattern>, ret: Pattern) -> Self {
        Pattern::Fcn {
            params: params.into_iter().collect(),
            ret: Box::new(ret),
        }
    }

    pub fn wildcard(label: &str) -> Self {
        Pattern::Wildcard {
            label: label.to_owned(),
            one_of: None,
        }
    }

    pub fn wildcard_of(label: &str, one_of: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Wildcard {
            label: label.to_owned(),
            one_of: Some(one_of.into_iter().collect()),
        }
    }

    /// `Wildcard` restricted to `int`, `long`, `float` and `double`.
    pub fn any_number(label: &str) -> Self {
        Self::wildcard_of(
            label,
            [Pattern::Int, Pattern::Long, Pattern::Float, Pattern::Double],
        )
    }

    pub fn wild_record<'a>(
        label: &str,
        fields: impl IntoIterator<Item = (&'a str, Pattern)>,
    ) -> Self {
        Pattern::WildRecord {
            label: label.to_owned(),
            fields: own_fields(fields),
        }
    }

    pub fn wild_enum(label: &str) -> Self {
        Pattern::WildEnum(label.to_owned())
    }

    pub fn wild_fixed(label: &str) -> Self {
        Pattern::WildFixed(label.to_owned())
    }

    pub fn enum_fields(label: &str, record_label: &str) -> Self {
        Pattern::EnumFields {
            label: label.to_owned(),
            record_label: record_label.to_owned(),
        }
    }

    /// The pattern for a primitive type, if `idx` is one.
    pub fn primitive(idx: Idx) -> Option<Self> {
        Some(match idx {
            Idx::NULL => Pattern::Null,
            Idx::BOOLEAN => Pattern::Boolean,
            Idx::INT => Pattern::Int,
            Idx::LONG => Pattern::Long,
            Idx::FLOAT => Pattern::Float,
            Idx::DOUBLE => Pattern::Double,
            Idx::BYTES => Pattern::Bytes,
            Idx::STRING => Pattern::String,
            _ => return None,
        })
    }

    /// The label this pattern binds, if it is generic at the top level.
    pub fn label(&self) -> Option<&str> {
        match self {
            Pattern::Wildcard { label, .. }
            | Pattern::WildRecord { label, .. }
            | Pattern::WildEnum(label)
            | Pattern::WildFixed(label)
            | Pattern::EnumFields { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Check whether any label occurs anywhere inside this pattern.
    pub fn is_generic(&self) -> bool {
        let mut labels = Vec::new();
        self.collect_labels(&mut labels);
        !labels.is_empty()
    }

    /// Every label bound anywhere inside this pattern, in first-seen order.
    pub fn collect_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(label) = self.label() {
            if !out.contains(&label) {
                out.push(label);
            }
        }
        match self {
            Pattern::Array(inner) | Pattern::Map(inner) => inner.collect_labels(out),
            Pattern::Union(members) => members.iter().for_each(|m| m.collect_labels(out)),
            Pattern::Record { fields, .. } | Pattern::WildRecord { fields, .. } => {
                fields.iter().for_each(|(_, p)| p.collect_labels(out));
            }
            Pattern::Fcn { params, ret } => {
                params.iter().for_each(|p| p.collect_labels(out));
                ret.collect_labels(out);
            }
            _ => {}
        }
    }
}

fn own_fields<'a>(fields: impl IntoIterator<Item = (&'a str, Pattern)>) -> Vec<(String, Pattern)> {
    fields
        .into_iter()
        .map(|(name, p)| (name.to_owned(), p))
        .collect()
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(String, Pattern)]) -> fmt::Result {
    f.write_str("{")?;
    for (i, (name, pattern)) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}: {pattern}")?;
    }
    f.write_str("}")
}

fn write_list(f: &mut fmt::Formatter<'_>, patterns: &[Pattern]) -> fmt::Result {
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{pattern}")?;
    }
    Ok(())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Null => f.write_str("null"),
            Pattern::Boolean => f.write_str("boolean"),
            Pattern::Int => f.write_str("int"),
            Pattern::Long => f.write_str("long"),
            Pattern::Float => f.write_str("float"),
            Pattern::Double => f.write_str("double"),
            Pattern::Bytes => f.write_str("bytes"),
            Pattern::String => f.write_str("string"),
            Pattern::Array(items) => write!(f, "array<{items}>"),
            Pattern::Map(values) => write!(f, "map<{values}>"),
            Pattern::Union(members) => {
                f.write_str("union<")?;
                write_list(f, members)?;
                f.write_str(">")
            }
            Pattern::Fixed { size, name } => match name {
                Some(name) => write!(f, "fixed<name={name}, size={size}>"),
                None => write!(f, "fixed<size={size}>"),
            },
            Pattern::Enum { symbols, name } => {
                f.write_str("enum<")?;
                if let Some(name) = name {
                    write!(f, "name={name}, ")?;
                }
                write!(f, "symbols=[{}]>", symbols.join(", "))
            }
            Pattern::Record { fields, name } => {
                f.write_str("record<")?;
                if let Some(name) = name {
                    write!(f, "name={name}, ")?;
                }
                f.write_str("fields=")?;
                write_fields(f, fields)?;
                f.write_str(">")
            }
            Pattern::Named(name) => write!(f, "{name}"),
            Pattern::Fcn { params, ret } => {
                f.write_str("fcn(")?;
                write_list(f, params)?;
                write!(f, " -> {ret})")
            }
            Pattern::Wildcard { label, one_of } => match one_of {
                Some(one_of) => {
                    write!(f, "any {label} of {{")?;
                    write_list(f, one_of)?;
                    f.write_str("}")
                }
                None => write!(f, "any {label}"),
            },
            Pattern::WildRecord { label, fields } => {
                write!(f, "any record {label} with ")?;
                write_fields(f, fields)
            }
            Pattern::WildEnum(label) => write!(f, "any enum {label}"),
            Pattern::WildFixed(label) => write!(f, "any fixed {label}"),
            Pattern::EnumFields {
                label,
                record_label,
            } => write!(f, "enum {label} of fields of {record_label}"),
        }
    }
}
