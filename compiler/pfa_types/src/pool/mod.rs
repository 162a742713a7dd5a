//! The type pool.
//!
//! Structural types are deduplicated through `interned`; named types are
//! deduplicated through `named` and must agree with any earlier definition
//! of the same name.

mod format;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Field, FullName, Idx, PoolError, Tag, TypeData};

/// Storage for every type seen while loading a document.
///
/// Built mutably during loading, then shared read-only.
#[derive(Clone, Debug)]
pub struct Pool {
    types: Vec<TypeData>,
    interned: FxHashMap<TypeData, Idx>,
    named: FxHashMap<FullName, Idx>,
    /// Records that have been declared but not yet given fields.
    pending: FxHashSet<Idx>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// Create a pool holding only the primitive types.
    pub fn new() -> Self {
        let primitives = [
            TypeData::Null,    // 0 = Idx::NULL
            TypeData::Boolean, // 1 = Idx::BOOLEAN
            TypeData::Int,     // 2 = Idx::INT
            TypeData::Long,    // 3 = Idx::LONG
            TypeData::Float,   // 4 = Idx::FLOAT
            TypeData::Double,  // 5 = Idx::DOUBLE
            TypeData::Bytes,   // 6 = Idx::BYTES
            TypeData::String,  // 7 = Idx::STRING
        ];
        Pool {
            types: primitives.to_vec(),
            interned: FxHashMap::default(),
            named: FxHashMap::default(),
            pending: FxHashSet::default(),
        }
    }

    /// Number of types in the pool, primitives included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// A pool always holds the primitives.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Payload of a type.
    ///
    /// # Panics
    /// If `idx` did not come from this pool.
    #[inline]
    pub fn data(&self, idx: Idx) -> &TypeData {
        &self.types[idx.index()]
    }

    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.data(idx).tag()
    }

    /// Look up a named type by its full name.
    pub fn lookup(&self, name: &FullName) -> Option<Idx> {
        self.named.get(name).copied()
    }

    /// Check if a record was declared but never defined.
    pub fn is_pending(&self, idx: Idx) -> bool {
        self.pending.contains(&idx)
    }

    // === Construction ===

    /// Intern any payload, validating it first.
    pub fn intern(&mut self, data: TypeData) -> Result<Idx, PoolError> {
        match data {
            TypeData::Null => Ok(Idx::NULL),
            TypeData::Boolean => Ok(Idx::BOOLEAN),
            TypeData::Int => Ok(Idx::INT),
            TypeData::Long => Ok(Idx::LONG),
            TypeData::Float => Ok(Idx::FLOAT),
            TypeData::Double => Ok(Idx::DOUBLE),
            TypeData::Bytes => Ok(Idx::BYTES),
            TypeData::String => Ok(Idx::STRING),
            TypeData::Array(item) => Ok(self.array(item)),
            TypeData::Map(values) => Ok(self.map(values)),
            TypeData::Union(members) => self.union(members),
            TypeData::Fixed { name, size } => self.fixed(name, size),
            TypeData::Enum { name, symbols } => self.enumeration(name, symbols),
            TypeData::Record { name, fields } => self.record(name, fields),
            TypeData::Function { params, ret } => Ok(self.function(params, ret)),
        }
    }

    /// # Panics
    /// If the pool already holds `u32::MAX` types.
    pub fn array(&mut self, item: Idx) -> Idx {
        self.intern_unbounded(TypeData::Array(item))
    }

    /// # Panics
    /// If the pool already holds `u32::MAX` types.
    pub fn map(&mut self, values: Idx) -> Idx {
        self.intern_unbounded(TypeData::Map(values))
    }

    /// # Panics
    /// If the pool already holds `u32::MAX` types.
    pub fn function(&mut self, params: Vec<Idx>, ret: Idx) -> Idx {
        self.intern_unbounded(TypeData::Function { params, ret })
    }

    /// Intern a union. Nested unions are flattened and repeated members
    /// dropped, keeping first occurrences in order.
    pub fn union(&mut self, members: impl IntoIterator<Item = Idx>) -> Result<Idx, PoolError> {
        let mut flat: Vec<Idx> = Vec::new();
        for member in members {
            match self.data(member) {
                TypeData::Union(inner) => {
                    for &m in inner {
                        if !flat.contains(&m) {
                            flat.push(m);
                        }
                    }
                }
                _ => {
                    if !flat.contains(&member) {
                        flat.push(member);
                    }
                }
            }
        }
        if flat.is_empty() {
            return Err(PoolError::EmptyUnion);
        }
        self.intern_structural(TypeData::Union(flat))
    }

    pub fn fixed(&mut self, name: Option<FullName>, size: u32) -> Result<Idx, PoolError> {
        self.intern_named(TypeData::Fixed { name, size })
    }

    pub fn enumeration(
        &mut self,
        name: Option<FullName>,
        symbols: Vec<String>,
    ) -> Result<Idx, PoolError> {
        if let Some(symbol) = first_duplicate(symbols.iter().map(String::as_str)) {
            return Err(PoolError::DuplicateSymbol {
                name: display_name(name.as_ref()),
                symbol: symbol.to_owned(),
            });
        }
        self.intern_named(TypeData::Enum { name, symbols })
    }

    /// Intern a record. If `name` was declared with [`Pool::declare_record`]
    /// and is still pending, this defines it.
    pub fn record(&mut self, name: Option<FullName>, fields: Vec<Field>) -> Result<Idx, PoolError> {
        check_fields(name.as_ref(), &fields)?;
        if let Some(existing) = name.as_ref().and_then(|n| self.lookup(n)) {
            if self.pending.remove(&existing) {
                self.types[existing.index()] = TypeData::Record { name, fields };
                return Ok(existing);
            }
        }
        self.intern_named(TypeData::Record { name, fields })
    }

    /// Reserve an index for a named record whose fields refer back to it.
    ///
    /// Declaring an already known record returns its index.
    pub fn declare_record(&mut self, name: FullName) -> Result<Idx, PoolError> {
        if let Some(existing) = self.lookup(&name) {
            return match self.tag(existing) {
                Tag::Record => Ok(existing),
                _ => Err(PoolError::NameConflict { name }),
            };
        }
        let idx = self.push(TypeData::Record {
            name: Some(name.clone()),
            fields: Vec::new(),
        })?;
        self.named.insert(name, idx);
        self.pending.insert(idx);
        tracing::trace!(?idx, "declared record");
        Ok(idx)
    }

    /// Withdraw a declaration that was never defined, so its name is free
    /// again. The slot stays allocated but is no longer reachable by name.
    ///
    /// Returns `false` if `idx` is not pending.
    pub fn forget_pending(&mut self, idx: Idx) -> bool {
        if !self.pending.remove(&idx) {
            return false;
        }
        if let Some(name) = self.data(idx).full_name().cloned() {
            self.named.remove(&name);
        }
        tracing::trace!(?idx, "withdrew record declaration");
        true
    }

    /// Give a declared record its fields.
    pub fn define_record(&mut self, idx: Idx, fields: Vec<Field>) -> Result<(), PoolError> {
        let name = self.data(idx).full_name().cloned();
        if !self.pending.contains(&idx) {
            return Err(PoolError::NotDeclared {
                name: display_name(name.as_ref()),
            });
        }
        check_fields(name.as_ref(), &fields)?;
        self.pending.remove(&idx);
        self.types[idx.index()] = TypeData::Record { name, fields };
        Ok(())
    }

    fn intern_unbounded(&mut self, data: TypeData) -> Idx {
        self.intern_structural(data).unwrap_or_else(|e| panic!("{e}"))
    }

    fn intern_structural(&mut self, data: TypeData) -> Result<Idx, PoolError> {
        if let Some(&idx) = self.interned.get(&data) {
            return Ok(idx);
        }
        let idx = self.push(data.clone())?;
        self.interned.insert(data, idx);
        Ok(idx)
    }

    fn intern_named(&mut self, data: TypeData) -> Result<Idx, PoolError> {
        let Some(name) = data.full_name().cloned() else {
            return self.intern_structural(data);
        };
        if let Some(existing) = self.lookup(&name) {
            return if *self.data(existing) == data {
                Ok(existing)
            } else {
                Err(PoolError::NameConflict { name })
            };
        }
        let idx = self.push(data)?;
        self.named.insert(name, idx);
        Ok(idx)
    }

    fn push(&mut self, data: TypeData) -> Result<Idx, PoolError> {
        let idx = next_index(self.types.len())?;
        self.types.push(data);
        Ok(idx)
    }

    // === Accessors ===

    pub fn array_item(&self, idx: Idx) -> Option<Idx> {
        match self.data(idx) {
            TypeData::Array(item) => Some(*item),
            _ => None,
        }
    }

    pub fn map_values(&self, idx: Idx) -> Option<Idx> {
        match self.data(idx) {
            TypeData::Map(values) => Some(*values),
            _ => None,
        }
    }

    pub fn union_members(&self, idx: Idx) -> Option<&[Idx]> {
        match self.data(idx) {
            TypeData::Union(members) => Some(members),
            _ => None,
        }
    }

    pub fn record_fields(&self, idx: Idx) -> Option<&[Field]> {
        match self.data(idx) {
            TypeData::Record { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Type of one record field.
    pub fn record_field(&self, idx: Idx, field: &str) -> Option<Idx> {
        self.record_fields(idx)?
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.ty)
    }

    pub fn enum_symbols(&self, idx: Idx) -> Option<&[String]> {
        match self.data(idx) {
            TypeData::Enum { symbols, .. } => Some(symbols),
            _ => None,
        }
    }

    pub fn fixed_size(&self, idx: Idx) -> Option<u32> {
        match self.data(idx) {
            TypeData::Fixed { size, .. } => Some(*size),
            _ => None,
        }
    }

    /// Parameters and return type of a function type.
    pub fn function_parts(&self, idx: Idx) -> Option<(&[Idx], Idx)> {
        match self.data(idx) {
            TypeData::Function { params, ret } => Some((params, *ret)),
            _ => None,
        }
    }
}

/// Index for the entry stored at position `len`.
fn next_index(len: usize) -> Result<Idx, PoolError> {
    u32::try_from(len)
        .map(Idx::from_raw)
        .map_err(|_| PoolError::Overflow)
}

fn check_fields(name: Option<&FullName>, fields: &[Field]) -> Result<(), PoolError> {
    match first_duplicate(fields.iter().map(|f| f.name.as_str())) {
        Some(field) => Err(PoolError::DuplicateField {
            record: display_name(name),
            field: field.to_owned(),
        }),
        None => Ok(()),
    }
}

fn first_duplicate<'a>(mut names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = FxHashSet::default();
    names.find(|name| !seen.insert(*name))
}

fn display_name(name: Option<&FullName>) -> String {
    name.map_or_else(|| "<anonymous>".to_owned(), ToString::to_string)
}
