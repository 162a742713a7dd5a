//! Reasons a single pattern failed to match a type.

/// Why a pattern did not accept a concrete type.
///
/// Types are stored rendered so the error outlives the pool.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// Shapes differ.
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    /// A label was already bound to a different type.
    #[error("label {label} is bound to {bound}, found {found}")]
    LabelConflict {
        label: String,
        bound: String,
        found: String,
    },

    /// A restricted wildcard saw a type outside its set.
    #[error("{found} is not one of {allowed} (label {label})")]
    NotInOneOf {
        label: String,
        allowed: String,
        found: String,
    },

    /// A required record field is absent.
    #[error("record {record} has no field \"{field}\"")]
    MissingField { field: String, record: String },

    /// `EnumFields` names a record label that has not been bound yet.
    #[error("label {label} must be bound to a record before it is used by an enum")]
    UnboundRecordLabel { label: String },

    /// Enum symbols differ from the field names of the bound record.
    #[error("symbols of {found} are not the field names of {record}")]
    EnumSymbols { record: String, found: String },

    /// Function-valued argument with the wrong number of parameters.
    #[error("expected a function of {expected} parameters, found {found}")]
    FunctionArity { expected: usize, found: usize },
}
