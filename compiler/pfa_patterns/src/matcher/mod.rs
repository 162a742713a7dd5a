//! Structural matching of one pattern against one concrete type.

mod error;

pub use error::MatchError;

use pfa_types::{ensure_sufficient_stack, FullName, Idx, Pool, TypeData};

use crate::{Bindings, Pattern};

/// Matches patterns against types from one pool.
///
/// Keeps the set of records currently being descended into, so a
/// self-referential record met again during the same descent is accepted
/// instead of recursing forever.
pub struct Matcher<'pool> {
    pool: &'pool Pool,
    open_records: Vec<Idx>,
}

impl<'pool> Matcher<'pool> {
    pub fn new(pool: &'pool Pool) -> Self {
        Matcher {
            pool,
            open_records: Vec::new(),
        }
    }

    pub fn pool(&self) -> &'pool Pool {
        self.pool
    }

    /// Match `pattern` against `actual`, extending `bindings`.
    ///
    /// On failure `bindings` may hold partial results; callers discard them.
    pub fn matches(
        &mut self,
        pattern: &Pattern,
        actual: Idx,
        bindings: &mut Bindings,
    ) -> Result<(), MatchError> {
        ensure_sufficient_stack(|| self.match_inner(pattern, actual, bindings))
    }

    fn match_inner(
        &mut self,
        pattern: &Pattern,
        actual: Idx,
        bindings: &mut Bindings,
    ) -> Result<(), MatchError> {
        let pool = self.pool;

        if let Pattern::Wildcard { label, one_of } = pattern {
            return self.match_wildcard(label, one_of.as_deref(), actual, bindings);
        }

        match (pattern, pool.data(actual)) {
            (Pattern::Union(options), TypeData::Union(members)) => {
                for &member in members {
                    self.match_any(options, member, bindings)
                        .map_err(|_| self.mismatch(pattern, actual))?;
                }
                Ok(())
            }
            (Pattern::Union(options), _) => self
                .match_any(options, actual, bindings)
                .map_err(|_| self.mismatch(pattern, actual)),
            // A non-union pattern accepts a union whose members all satisfy it.
            (_, TypeData::Union(members)) => {
                for &member in members {
                    self.matches(pattern, member, bindings)?;
                }
                Ok(())
            }

            (Pattern::Null, TypeData::Null)
            | (Pattern::Boolean, TypeData::Boolean)
            | (Pattern::Int, TypeData::Int)
            | (Pattern::Long, TypeData::Long)
            | (Pattern::Float, TypeData::Float)
            | (Pattern::Double, TypeData::Double)
            | (Pattern::Bytes, TypeData::Bytes)
            | (Pattern::String, TypeData::String) => Ok(()),

            (Pattern::Array(items), TypeData::Array(item)) => self.matches(items, *item, bindings),
            (Pattern::Map(values), TypeData::Map(value)) => self.matches(values, *value, bindings),

            (Pattern::Fixed { size, name }, TypeData::Fixed { size: s, name: n })
                if size == s && name_accepts(name.as_ref(), n.as_ref()) =>
            {
                Ok(())
            }
            (Pattern::Enum { symbols, name }, TypeData::Enum { symbols: s, name: n })
                if symbols == s && name_accepts(name.as_ref(), n.as_ref()) =>
            {
                Ok(())
            }
            (Pattern::Record { fields, name }, TypeData::Record { fields: f, name: n })
                if name_accepts(name.as_ref(), n.as_ref()) && fields.len() == f.len() =>
            {
                if self.open_records.contains(&actual) {
                    return Ok(());
                }
                self.open_records.push(actual);
                let result = fields.iter().zip(f).try_for_each(|((want, p), have)| {
                    if *want == have.name {
                        self.matches(p, have.ty, bindings)
                    } else {
                        Err(self.mismatch(pattern, actual))
                    }
                });
                self.open_records.pop();
                result
            }
            (Pattern::Named(want), data) if data.full_name() == Some(want) => Ok(()),

            (Pattern::WildRecord { label, fields }, TypeData::Record { fields: have, .. }) => {
                if !self.open_records.contains(&actual) {
                    self.open_records.push(actual);
                    let result = fields.iter().try_for_each(|(name, p)| {
                        match have.iter().find(|f| f.name == *name) {
                            Some(field) => self.matches(p, field.ty, bindings),
                            None => Err(MatchError::MissingField {
                                field: name.clone(),
                                record: pool.format_type(actual),
                            }),
                        }
                    });
                    self.open_records.pop();
                    result?;
                }
                self.bind(label, actual, bindings)
            }
            (Pattern::WildEnum(label), TypeData::Enum { .. })
            | (Pattern::WildFixed(label), TypeData::Fixed { .. }) => {
                self.bind(label, actual, bindings)
            }
            (
                Pattern::EnumFields {
                    label,
                    record_label,
                },
                TypeData::Enum { symbols, .. },
            ) => {
                let record = bindings
                    .get(record_label)
                    .and_then(|r| pool.record_fields(r).map(|fields| (r, fields)));
                let Some((record, fields)) = record else {
                    return Err(MatchError::UnboundRecordLabel {
                        label: record_label.clone(),
                    });
                };
                let same_names = symbols.len() == fields.len()
                    && fields.iter().all(|f| symbols.contains(&f.name));
                if !same_names {
                    return Err(MatchError::EnumSymbols {
                        record: pool.format_type(record),
                        found: pool.format_type(actual),
                    });
                }
                self.bind(label, actual, bindings)
            }

            (Pattern::Fcn { params, ret }, TypeData::Function { params: have, ret: r }) => {
                if params.len() != have.len() {
                    return Err(MatchError::FunctionArity {
                        expected: params.len(),
                        found: have.len(),
                    });
                }
                for (p, &t) in params.iter().zip(have) {
                    self.matches(p, t, bindings)?;
                }
                self.matches(ret, *r, bindings)
            }

            _ => Err(self.mismatch(pattern, actual)),
        }
    }

    fn match_wildcard(
        &mut self,
        label: &str,
        one_of: Option<&[Pattern]>,
        actual: Idx,
        bindings: &mut Bindings,
    ) -> Result<(), MatchError> {
        if bindings.get(label).is_none() {
            if let Some(allowed) = one_of {
                let accepted = allowed
                    .iter()
                    .any(|p| self.matches(p, actual, &mut Bindings::new()).is_ok());
                if !accepted {
                    return Err(MatchError::NotInOneOf {
                        label: label.to_owned(),
                        allowed: allowed
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", "),
                        found: self.pool.format_type(actual),
                    });
                }
            }
        }
        self.bind(label, actual, bindings)
    }

    /// Try each option in order; the first that matches keeps its bindings.
    fn match_any(
        &mut self,
        options: &[Pattern],
        actual: Idx,
        bindings: &mut Bindings,
    ) -> Result<(), MatchError> {
        let mut last = None;
        for option in options {
            let mut attempt = bindings.clone();
            match self.matches(option, actual, &mut attempt) {
                Ok(()) => {
                    *bindings = attempt;
                    return Ok(());
                }
                Err(e) => last = Some(e),
            }
        }
        Err(last.unwrap_or_else(|| MatchError::Mismatch {
            expected: "union<>".to_owned(),
            found: self.pool.format_type(actual),
        }))
    }

    fn bind(&self, label: &str, actual: Idx, bindings: &mut Bindings) -> Result<(), MatchError> {
        bindings
            .bind(label, actual)
            .map_err(|bound| MatchError::LabelConflict {
                label: label.to_owned(),
                bound: self.pool.format_type(bound),
                found: self.pool.format_type(actual),
            })
    }

    fn mismatch(&self, pattern: &Pattern, actual: Idx) -> MatchError {
        MatchError::Mismatch {
            expected: pattern.to_string(),
            found: self.pool.format_type(actual),
        }
    }
}

/// A nameless pattern accepts a type of any name; a named one only its own.
fn name_accepts(want: Option<&FullName>, have: Option<&FullName>) -> bool {
    want.is_none() || want == have
}

#[cfg(test)]
mod tests;
