//! Label environment for one match attempt.

use pfa_types::Idx;
use rustc_hash::FxHashMap;

/// Map from label to the concrete type it resolved to.
///
/// Created empty for each signature attempt. Discarded when the attempt
/// fails, handed back read-only when it succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    map: FxHashMap<String, Idx>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<Idx> {
        self.map.get(label).copied()
    }

    /// Bind `label` to `ty`. If the label is already bound to a different
    /// type, the existing binding is returned as the error.
    pub fn bind(&mut self, label: &str, ty: Idx) -> Result<(), Idx> {
        match self.map.get(label) {
            Some(&bound) if bound == ty => Ok(()),
            Some(&bound) => Err(bound),
            None => {
                self.map.insert(label.to_owned(), ty);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Idx)> {
        self.map.iter().map(|(label, &ty)| (label.as_str(), ty))
    }
}
