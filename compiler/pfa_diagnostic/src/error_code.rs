use std::fmt;

/// Error codes for engine diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E2xxx: Resolution errors (signatures, overloads, registry)
/// - E6xxx: Runtime errors raised by library functions
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E2xxx)
    /// No signature of the function accepts the argument types
    E2001,
    /// Call to a function that is not registered
    E2002,
    /// Signature is malformed (return pattern uses an unbound label)
    E2003,
    /// Registry conflict (duplicate name or error-code range)
    E2004,
    /// Pattern cannot be converted to a concrete type
    E2005,
    /// Library function cannot be passed as a function value
    E2006,

    // Runtime Errors (E6xxx)
    /// A library function failed with its own reserved code
    E6001,
    /// A host-provided function raised an error
    E6002,
}

impl ErrorCode {
    /// Check if this is a resolution-time error.
    pub fn is_resolution_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a runtime error.
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
        }
    }

    /// One-line description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "no applicable overload",
            ErrorCode::E2002 => "unknown function",
            ErrorCode::E2003 => "invalid signature definition",
            ErrorCode::E2004 => "function registry conflict",
            ErrorCode::E2005 => "pattern is not a concrete type",
            ErrorCode::E2006 => "function cannot be used as a value",
            ErrorCode::E6001 => "library function failed",
            ErrorCode::E6002 => "user function failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
