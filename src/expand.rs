//! Cartesian expansion of array repeat specifiers into concrete paths.
//!
//! A repeat specifier like `cars.drivers` addresses every driver of every
//! car: the head segment fans out over the `cars` array, and each produced
//! path fans out again over its `drivers` array, yielding
//! `cars[0].drivers[0]`, `cars[1].drivers[0]`, `cars[1].drivers[1]`, …
//!
//! Failure handling is deliberately asymmetric. A head segment that resolves
//! to nothing is reported as [`MapError::NotAnArray`] by
//! [`expand_alternative`] and converted to zero paths by [`expand`]; a nested
//! segment that fails to resolve silently drops that branch while the other
//! branches keep contributing.

use crate::error::MapError;
use crate::grammar::Grammar;
use crate::path;
use crate::pointer;
use crate::value::Value;

/// Expand a repeat specifier into the concrete list of paths it addresses.
///
/// The specifier may combine several path expressions with the union
/// operator (`$$and`); each alternative is expanded independently and the
/// results are concatenated in order. An alternative whose head resolves to
/// nothing contributes zero paths.
///
/// # Examples
///
/// ```
/// use remold::{expand, Grammar};
/// use remold::output::from_json;
/// use serde_json::json;
///
/// let grammar = Grammar::global();
/// let data = from_json(json!({"cars": [{"id": 1}, {"id": 2}], "bikes": [{"id": 3}]}));
///
/// let paths = expand::expand(grammar, &data, "cars $$and bikes", "").unwrap();
/// assert_eq!(paths, vec!["cars[0]", "cars[1]", "bikes[0]"]);
/// ```
pub fn expand(
    grammar: &Grammar,
    data: &Value,
    specifier: &str,
    current_path: &str,
) -> Result<Vec<String>, MapError> {
    let mut all_paths = Vec::new();

    for alternative in specifier.split(grammar.path_union) {
        match expand_alternative(grammar, data, alternative.trim(), current_path) {
            Ok(paths) => all_paths.extend(paths),
            // this array maps to an empty list
            Err(MapError::NotAnArray(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(all_paths)
}

/// Expand one path expression (no union operator) into concrete paths.
///
/// # Errors
///
/// [`MapError::NotAnArray`] when the head segment resolves to nothing;
/// [`MapError::PointerOverflow`] when a pointer's drop count is too large.
pub fn expand_alternative(
    grammar: &Grammar,
    data: &Value,
    written_path: &str,
    current_path: &str,
) -> Result<Vec<String>, MapError> {
    let segments = split_written(grammar, written_path);
    let Some(head) = segments.first() else {
        return Err(MapError::NotAnArray(written_path.to_string()));
    };

    let mut paths = extract_paths(grammar, data, head, current_path)?;

    for segment in &segments[1..] {
        let mut extended = Vec::new();

        for base in &paths {
            let candidate = format!("{}.{}", base, segment);
            match extract_paths(grammar, data, &candidate, current_path) {
                Ok(mut branch) => extended.append(&mut branch),
                // nested misses drop the branch, they never fail the expansion
                Err(MapError::NotAnArray(_)) => {}
                Err(e) => return Err(e),
            }
        }

        paths = extended;
    }

    Ok(paths)
}

/// Split a written path into segments, keeping a leading pointer token glued
/// to the field it prefixes: `@this` cannot be resolved on its own, only
/// `@this.drivers` can.
fn split_written(grammar: &Grammar, written_path: &str) -> Vec<String> {
    let mut parts: Vec<String> = written_path.split('.').map(str::to_string).collect();

    if parts.len() > 1 && grammar.pointer_head.is_match(&parts[0]) {
        let merged = format!("{}.{}", parts[0], parts[1]);
        parts.splice(0..2, [merged]);
    }

    parts
}

/// Resolve one segment against the document and fan out over its array
/// length.
///
/// A non-array value yields the single resolved path unchanged; an array of
/// length N yields N index-suffixed paths. A value that is missing or null
/// is a [`MapError::NotAnArray`] for the caller to interpret.
fn extract_paths(
    grammar: &Grammar,
    data: &Value,
    path_name: &str,
    current_path: &str,
) -> Result<Vec<String>, MapError> {
    let resolved = pointer::resolve(grammar, path_name, current_path)?;
    let lookup = resolved.replacen('@', "", 1);

    match path::get(data, &lookup) {
        None | Some(Value::Null) => Err(MapError::NotAnArray(lookup)),
        Some(Value::Array(items)) => Ok((0..items.len())
            .map(|index| format!("{}[{}]", lookup, index))
            .collect()),
        Some(_) => Ok(vec![lookup]),
    }
}
