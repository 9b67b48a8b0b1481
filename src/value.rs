use std::collections::HashMap;

/// A JSON value used throughout the Remold mapping engine.
///
/// This type represents all valid JSON types, plus an explicit [`Value::Missing`]
/// marker for leaves that could not be resolved against the source document.
///
/// # Missing vs Null
///
/// `Null` is a value that was *present* in the source data (JSON `null`).
/// `Missing` means a lookup or expression did not resolve at all. The two are
/// kept apart because the engine lets callers strip missing leaves from the
/// output while preserving genuine nulls (see [`crate::output::strip_missing`]).
///
/// # Examples
///
/// ```
/// use remold::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let missing = Value::Missing;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null (present in the source, explicitly null)
    Null,

    /// An unresolved leaf: the path did not exist, a conditional had no
    /// winning case, a find matched nothing, and so on
    Missing,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object with string keys
    Object(HashMap<String, Value>),
}

impl Value {
    /// Check if the value is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Check if the value is missing or null.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Missing | Value::Null)
    }

    /// Check if the value is a scalar (not an array or object).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Check if the value is truthy (for filter/find reducers and
    /// conditional gating).
    ///
    /// Missing and null are falsy; numbers are falsy at zero; strings,
    /// arrays and objects are falsy when empty.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null | Missing => false,
            Boolean(b) => *b,
            Float(n) => *n != 0.0,
            Integer(n) => *n != 0,
            String(s) => !s.is_empty(),
            Array(arr) => !arr.is_empty(),
            Object(obj) => !obj.is_empty(),
        }
    }

    /// Coerce to a string for comparison and concatenation.
    ///
    /// Follows loose string-coercion rules: missing and null become the
    /// empty string, arrays join their elements with commas, objects have
    /// no useful coercion and become empty.
    pub fn as_string(&self) -> String {
        match self {
            Value::Null | Value::Missing => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(arr) => arr
                .iter()
                .map(|v| v.as_string())
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => String::new(),
        }
    }

    /// Borrow the object map, if this value is an object.
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the array elements, if this value is an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Borrow the string contents, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}
