//! Relative pointer resolution.
//!
//! A path expression may reference an ancestor of the current traversal
//! position with the `@this` token. `@thisN` drops the last `N` segments of
//! the current path (`N` defaults to 0), so at current path `cars[1].drivers[0]`
//! the expression `@this1.name` resolves to `cars[1].name`.

use regex::NoExpand;

use crate::error::MapError;
use crate::grammar::Grammar;

/// Rewrite pointer tokens in `path_expr` into absolute paths relative to
/// `current_path`.
///
/// Returns the expression unchanged when it contains no pointer token. The
/// drop count is taken from the first pointer token and applied to every
/// occurrence. Pure function of its inputs.
///
/// # Errors
///
/// [`MapError::PointerOverflow`] when the drop count exceeds the number of
/// segments in `current_path`.
pub fn resolve(grammar: &Grammar, path_expr: &str, current_path: &str) -> Result<String, MapError> {
    let Some(pointer) = grammar.pointer.find(path_expr) else {
        return Ok(path_expr.to_string());
    };

    let drop_count: usize = pointer.as_str()["@this".len()..].parse().unwrap_or(0);

    let segments: Vec<&str> = current_path.split('.').collect();
    if drop_count > segments.len() {
        return Err(MapError::PointerOverflow {
            pointer: pointer.as_str().to_string(),
            path: current_path.to_string(),
        });
    }

    let ancestor = segments[..segments.len() - drop_count].join(".");

    Ok(grammar
        .pointer
        .replace_all(path_expr, NoExpand(&ancestor))
        .into_owned())
}
