//! The recursive structural mapper.
//!
//! Walks a mapping schema depth-first and builds the output tree it
//! describes. Object nodes recurse at the same path, leaf nodes go through
//! the expression classifier, and array nodes expand their repeat specifier
//! into concrete source paths and map each one.

use std::collections::HashMap;

use crate::error::MapError;
use crate::expand;
use crate::expr;
use crate::grammar::Grammar;
use crate::output;
use crate::path;
use crate::value::Value;

/// Map a source document into the shape described by `schema`.
///
/// The schema is a tree mirroring the desired output: leaves are mapping
/// expressions, objects recurse, and single-element arrays carry an array
/// descriptor. Unresolved leaves surface as [`Value::Missing`]; pass
/// `strip_missing` to remove them from the result.
///
/// # Examples
///
/// ```
/// use remold::{structure_map, Value};
/// use remold::output::from_json;
/// use serde_json::json;
///
/// let data = from_json(json!({"person": {"first": "Ada", "last": "Lovelace"}}));
/// let schema = from_json(json!({
///     "name": "@person.first $concat @person.last",
///     "kind": "human"
/// }));
///
/// let mapped = structure_map(&data, &schema, false).unwrap();
/// assert_eq!(
///     mapped.as_object().unwrap()["name"],
///     Value::String("Ada Lovelace".to_string())
/// );
/// ```
pub fn structure_map(data: &Value, schema: &Value, strip_missing: bool) -> Result<Value, MapError> {
    let grammar = Grammar::global();
    let mapped = map_node(grammar, data, schema, "", None)?;

    if strip_missing {
        Ok(output::strip_missing(mapped))
    } else {
        Ok(mapped)
    }
}

/// Expand each written path into the concrete paths it addresses in `data`
/// and concatenate the results.
///
/// # Examples
///
/// ```
/// use remold::translate_paths;
/// use remold::output::from_json;
/// use serde_json::json;
///
/// let data = from_json(json!({
///     "cars": [
///         {"drivers": [{"name": "A"}]},
///         {"drivers": [{"name": "B"}, {"name": "C"}]}
///     ]
/// }));
///
/// let paths = translate_paths(&data, &["cars.drivers.name"]).unwrap();
/// assert_eq!(paths, vec![
///     "cars[0].drivers[0].name",
///     "cars[1].drivers[0].name",
///     "cars[1].drivers[1].name",
/// ]);
/// ```
pub fn translate_paths(data: &Value, written_paths: &[&str]) -> Result<Vec<String>, MapError> {
    let grammar = Grammar::global();
    let mut all_paths = Vec::new();

    for written in written_paths {
        all_paths.extend(expand::expand(grammar, data, written, "")?);
    }

    Ok(all_paths)
}

/// Return a copy of `data` where the child addressed by each written path is
/// wrapped in a single-element array unless it already is one.
///
/// Written paths fan out over arrays like repeat specifiers do, so
/// `"cars.color"` wraps the color of every car. Children that do not exist
/// are left alone, and re-applying the operation never double-wraps.
pub fn enforce_arrays(data: &Value, written_paths: &[&str]) -> Result<Value, MapError> {
    let grammar = Grammar::global();
    let mut result = data.clone();

    for written in written_paths {
        let (parent, child) = path::split_last(written);
        let parents = if parent.is_empty() {
            vec![String::new()]
        } else {
            expand::expand(grammar, data, parent, "")?
        };

        for parent_path in &parents {
            let target = path::join(parent_path, child);
            if let Some(slot) = path::get_mut(&mut result, &target) {
                if !matches!(slot, Value::Array(_)) {
                    let original = std::mem::replace(slot, Value::Null);
                    *slot = Value::Array(vec![original]);
                }
            }
        }
    }

    Ok(result)
}

/// Map one schema node at `current_path`.
///
/// `condition` carries an array descriptor's find/filter expression; when
/// present, keys are only admitted into the output while the condition holds
/// at the current path.
fn map_node(
    grammar: &Grammar,
    data: &Value,
    schema: &Value,
    current_path: &str,
    condition: Option<&str>,
) -> Result<Value, MapError> {
    let Value::Object(schema_map) = schema else {
        return map_leaf(grammar, data, schema, current_path);
    };

    let admit = match condition {
        None => true,
        Some(cond) => expr::eval_conditional(grammar, data, cond, current_path)?.is_truthy(),
    };

    let mut mapped = HashMap::new();
    for (key, node) in schema_map {
        if key == grammar.repeat_key {
            continue;
        }

        let item = match node {
            Value::Array(_) => map_array(grammar, data, key, node, current_path)?,
            Value::Object(_) => map_node(grammar, data, node, current_path, None)?,
            leaf => map_leaf(grammar, data, leaf, current_path)?,
        };

        if admit {
            mapped.insert(key.clone(), item);
        }
    }

    Ok(Value::Object(mapped))
}

/// String leaves go through the expression classifier; any other scalar in
/// leaf position passes through unchanged.
fn map_leaf(
    grammar: &Grammar,
    data: &Value,
    leaf: &Value,
    current_path: &str,
) -> Result<Value, MapError> {
    match leaf {
        Value::String(expression) => expr::eval(grammar, data, expression, current_path),
        other => Ok(other.clone()),
    }
}

fn map_array(
    grammar: &Grammar,
    data: &Value,
    key: &str,
    node: &Value,
    current_path: &str,
) -> Result<Value, MapError> {
    let descriptor = match node.as_array().and_then(|elements| elements.first()) {
        Some(Value::Object(descriptor)) => descriptor,
        Some(_) => {
            return Err(MapError::InvalidArraySpecCombination(format!(
                "array schema node '{}' must contain a descriptor object",
                key
            )));
        }
        None => return Err(MapError::MissingArraySpecifier(key.to_string())),
    };

    validate_descriptor(key, descriptor)?;

    let condition = match descriptor.get("filter").or_else(|| descriptor.get("find")) {
        Some(Value::String(cond)) => Some(cond.as_str()),
        Some(_) => {
            return Err(MapError::InvalidArraySpecCombination(format!(
                "find/filter of array schema node '{}' must be a condition expression",
                key
            )));
        }
        None => None,
    };

    let Some(repeat) = descriptor.get(grammar.repeat_key) else {
        return Err(MapError::MissingArraySpecifier(key.to_string()));
    };

    let map_schema = descriptor.get("map");
    let pick_schema = descriptor.get("pick");

    let items = match repeat {
        Value::String(specifier) => {
            let paths = expand::expand(grammar, data, specifier, current_path)?;
            let mut items = Vec::with_capacity(paths.len());

            for concrete_path in &paths {
                if let Some(sub_schema) = map_schema {
                    items.push(map_node(grammar, data, sub_schema, concrete_path, condition)?);
                } else if let Some(picks) = pick_schema {
                    collect_picks(grammar, data, picks, concrete_path, condition, &mut items)?;
                }
            }

            items
        }

        // literal form: one output element per inline entry, no source lookup
        Value::Array(literal) => {
            let mut items = Vec::with_capacity(literal.len());
            for element in literal {
                let item = match element {
                    Value::Object(_) => {
                        map_node(grammar, data, element, current_path, condition)?
                    }
                    leaf => map_leaf(grammar, data, leaf, current_path)?,
                };
                items.push(item);
            }
            items
        }

        _ => {
            return Err(MapError::InvalidArraySpecCombination(format!(
                "repeat specifier of '{}' must be a path expression or a literal array",
                key
            )));
        }
    };

    if descriptor.contains_key("find") {
        Ok(items
            .into_iter()
            .find(item_is_set)
            .unwrap_or(Value::Missing))
    } else if descriptor.contains_key("filter") {
        Ok(Value::Array(items.into_iter().filter(item_is_set).collect()))
    } else {
        Ok(Value::Array(items))
    }
}

/// Evaluate pick expressions at one concrete path. A falsy condition leaves
/// missing entries behind for the reducer to drop.
fn collect_picks(
    grammar: &Grammar,
    data: &Value,
    picks: &Value,
    concrete_path: &str,
    condition: Option<&str>,
    items: &mut Vec<Value>,
) -> Result<(), MapError> {
    let admit = match condition {
        None => true,
        Some(cond) => expr::eval_conditional(grammar, data, cond, concrete_path)?.is_truthy(),
    };

    let leaves: Vec<&Value> = match picks {
        Value::Array(list) => list.iter().collect(),
        single => vec![single],
    };

    for leaf in leaves {
        if admit {
            items.push(map_leaf(grammar, data, leaf, concrete_path)?);
        } else {
            items.push(Value::Missing);
        }
    }

    Ok(())
}

fn validate_descriptor(key: &str, descriptor: &HashMap<String, Value>) -> Result<(), MapError> {
    if descriptor.contains_key("map") == descriptor.contains_key("pick") {
        return Err(MapError::InvalidArraySpecCombination(format!(
            "array schema node '{}' must have exactly one of 'map' or 'pick'",
            key
        )));
    }

    if descriptor.contains_key("find") && descriptor.contains_key("filter") {
        return Err(MapError::InvalidArraySpecCombination(format!(
            "array schema node '{}' can not contain both 'find' and 'filter'",
            key
        )));
    }

    Ok(())
}

fn item_is_set(item: &Value) -> bool {
    match item {
        // an object counts as set when at least one key made it through
        Value::Object(map) => !map.is_empty(),
        other => other.is_truthy(),
    }
}
