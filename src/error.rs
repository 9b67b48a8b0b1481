/// Errors that can occur while mapping a document.
///
/// Schema-shape violations are always fatal and surface immediately to the
/// caller. Data-shape anomalies during path expansion are recovered locally
/// (see [`crate::expand`]) and only [`MapError::NotAnArray`] participates in
/// that internal protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// An array schema node has no `$$repeat$$` key in its descriptor
    MissingArraySpecifier(String),

    /// The descriptor carries both or neither of `map`/`pick`, or both
    /// `find` and `filter`
    InvalidArraySpecCombination(String),

    /// A conditional expression uses a comparator outside the supported set
    UnknownComparator(String),

    /// A pointer's drop count exceeds the depth of the current path
    PointerOverflow { pointer: String, path: String },

    /// Value-enum mapping encountered an object where a scalar was required
    ObjectInScalarPosition(String),

    /// The head segment of a path expansion resolved to nothing. Internal
    /// to the expander: callers observe it as "zero elements"
    NotAnArray(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::MissingArraySpecifier(key) => {
                write!(f, "Array schema node '{}' is missing its repeat specifier", key)
            }
            MapError::InvalidArraySpecCombination(msg) => {
                write!(f, "Invalid array schema: {}", msg)
            }
            MapError::UnknownComparator(expr) => {
                write!(f, "Unsupported comparator in the expression: {}", expr)
            }
            MapError::PointerOverflow { pointer, path } => {
                write!(
                    f,
                    "Pointer '{}' drops more segments than the current path '{}' has",
                    pointer, path
                )
            }
            MapError::ObjectInScalarPosition(key) => {
                write!(f, "Cannot enum-map an object at '{}'; a scalar is required", key)
            }
            MapError::NotAnArray(path) => {
                write!(f, "Path '{}' does not resolve to a repeatable value", path)
            }
        }
    }
}

impl std::error::Error for MapError {}
