use crate::value::Value;

/// A segment in a source-tree path.
///
/// Paths are dot-delimited field names with bracketed integer indices for
/// array elements, e.g. `cars[1].drivers[0].name`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Object field access by name
    Field(String),

    /// Array element access by index
    Index(usize),
}

/// A parsed navigation path through a document.
pub type Path = Vec<PathSegment>;

/// Parse a dot-delimited path string into segments.
///
/// # Examples
/// ```
/// use remold::path::{parse, PathSegment};
///
/// let path = parse("cars[1].name");
/// assert_eq!(path, vec![
///     PathSegment::Field("cars".to_string()),
///     PathSegment::Index(1),
///     PathSegment::Field("name".to_string()),
/// ]);
/// ```
pub fn parse(path: &str) -> Path {
    let mut segments = Vec::new();

    for chunk in path.split('.') {
        let mut rest = chunk;

        // field name up to the first bracket, then any [n] suffixes
        if let Some(open) = rest.find('[') {
            if open > 0 {
                segments.push(PathSegment::Field(rest[..open].to_string()));
            }
            rest = &rest[open..];
        } else {
            if !rest.is_empty() {
                segments.push(PathSegment::Field(rest.to_string()));
            }
            continue;
        }

        while let Some(close) = rest.find(']') {
            let inner = &rest[1..close];
            match inner.parse::<usize>() {
                Ok(index) => segments.push(PathSegment::Index(index)),
                Err(_) => segments.push(PathSegment::Field(inner.to_string())),
            }
            rest = &rest[close + 1..];
            if !rest.starts_with('[') {
                if !rest.is_empty() {
                    segments.push(PathSegment::Field(rest.to_string()));
                }
                break;
            }
        }
    }

    segments
}

/// Look up a value at a path, returning `None` when any segment fails to
/// resolve.
///
/// An empty path never resolves: there is no addressable value at `""`.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = parse(path);
    if segments.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in &segments {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Field(name)) => map.get(name)?,
            (Value::Array(arr), PathSegment::Index(i)) => arr.get(*i)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Mutable counterpart of [`get`], used when enforcing array shapes.
pub fn get_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let segments = parse(path);
    if segments.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in &segments {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Field(name)) => map.get_mut(name)?,
            (Value::Array(arr), PathSegment::Index(i)) => arr.get_mut(*i)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Join a parent path and a child segment with a dot, handling the empty
/// root path.
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

/// Split a written path into its parent path and final segment.
///
/// `"a.b.c"` becomes `("a.b", "c")`; a single-segment path has an empty
/// parent.
pub fn split_last(path: &str) -> (&str, &str) {
    match path.rsplit_once('.') {
        Some((parent, child)) => (parent, child),
        None => ("", path),
    }
}
