//! Human-readable rendering of pool types for diagnostics.

use std::fmt::Write;

use super::Pool;
use crate::{ensure_sufficient_stack, Idx, TypeData};

impl Pool {
    /// Render a type, e.g. `array<map<double>>` or
    /// `record<name=Point, fields={x: double, y: double}>`.
    ///
    /// A record met again inside its own fields renders as its bare name.
    pub fn format_type(&self, idx: Idx) -> String {
        let mut out = String::new();
        let mut open = Vec::new();
        self.write_type(idx, &mut out, &mut open);
        out
    }

    /// Render a list of types separated by `", "`.
    pub fn format_types(&self, types: &[Idx]) -> String {
        types
            .iter()
            .map(|&ty| self.format_type(ty))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_type(&self, idx: Idx, out: &mut String, open: &mut Vec<Idx>) {
        ensure_sufficient_stack(|| match self.data(idx) {
            TypeData::Null
            | TypeData::Boolean
            | TypeData::Int
            | TypeData::Long
            | TypeData::Float
            | TypeData::Double
            | TypeData::Bytes
            | TypeData::String => out.push_str(idx.name().unwrap_or("?")),
            TypeData::Array(item) => {
                out.push_str("array<");
                self.write_type(*item, out, open);
                out.push('>');
            }
            TypeData::Map(values) => {
                out.push_str("map<");
                self.write_type(*values, out, open);
                out.push('>');
            }
            TypeData::Union(members) => {
                out.push_str("union<");
                self.write_list(members, out, open);
                out.push('>');
            }
            TypeData::Fixed { name, size } => match name {
                Some(name) => {
                    let _ = write!(out, "fixed<name={name}, size={size}>");
                }
                None => {
                    let _ = write!(out, "fixed<size={size}>");
                }
            },
            TypeData::Enum { name, symbols } => {
                out.push_str("enum<");
                if let Some(name) = name {
                    let _ = write!(out, "name={name}, ");
                }
                let _ = write!(out, "symbols=[{}]>", symbols.join(", "));
            }
            TypeData::Record { name, fields } => {
                if open.contains(&idx) {
                    if let Some(name) = name {
                        let _ = write!(out, "{name}");
                    }
                    return;
                }
                open.push(idx);
                out.push_str("record<");
                if let Some(name) = name {
                    let _ = write!(out, "name={name}, ");
                }
                out.push_str("fields={");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&field.name);
                    out.push_str(": ");
                    self.write_type(field.ty, out, open);
                }
                out.push_str("}>");
                open.pop();
            }
            TypeData::Function { params, ret } => {
                out.push_str("fcn(");
                self.write_list(params, out, open);
                out.push_str(" -> ");
                self.write_type(*ret, out, open);
                out.push(')');
            }
        });
    }

    fn write_list(&self, types: &[Idx], out: &mut String, open: &mut Vec<Idx>) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(ty, out, open);
        }
    }
}
