//! Enum-style value remapping.
//!
//! Unlike the structural mapper, this walker follows the *input* object's
//! own keys and leaves its shape alone: it only translates scalar leaves
//! through enumerated lookup tables. A schema entry for a key maps
//! destination field names to enum tables of `original -> translated` pairs,
//! with a `$default` fallback and a `$same$` sentinel meaning "keep the
//! original value". The special sub-key `this` promotes a table into the
//! same field name as the source key.

use std::collections::HashMap;

use crate::error::MapError;
use crate::grammar::Grammar;
use crate::output;
use crate::value::Value;

/// Translate the scalar leaves of `data` through the enum tables of
/// `schema`.
///
/// Keys absent from the schema pass through unchanged. Objects recurse with
/// their sub-schema; arrays of objects recurse element-wise; arrays of
/// scalars are translated element-wise and regrouped into one array per
/// destination field, skipping entries that did not translate.
///
/// # Examples
///
/// ```
/// use remold::{value_map, Value};
/// use remold::output::from_json;
/// use serde_json::json;
///
/// let data = from_json(json!({"status": "ACTIVE"}));
/// let schema = from_json(json!({
///     "status": {"translated": {"ACTIVE": 1, "INACTIVE": 0, "$default": "$same$"}}
/// }));
///
/// let mapped = value_map(&data, &schema, false).unwrap();
/// assert_eq!(mapped.as_object().unwrap()["translated"], Value::Integer(1));
/// ```
pub fn value_map(data: &Value, schema: &Value, strip_missing: bool) -> Result<Value, MapError> {
    let grammar = Grammar::global();
    let mapped = map_values(grammar, data, schema)?;

    if strip_missing {
        Ok(output::strip_missing(mapped))
    } else {
        Ok(mapped)
    }
}

fn map_values(grammar: &Grammar, input: &Value, schema: &Value) -> Result<Value, MapError> {
    let Value::Object(input_map) = input else {
        return Ok(input.clone());
    };
    let schema_map = schema.as_object();

    let mut mapped = HashMap::new();

    for (key, value) in input_map {
        let Some(key_schema) = schema_map.and_then(|m| m.get(key)) else {
            mapped.insert(key.clone(), value.clone());
            continue;
        };

        match value {
            Value::Object(_) => {
                mapped.insert(key.clone(), map_values(grammar, value, key_schema)?);
            }

            Value::Array(items) => match key_schema {
                // a single-element schema array describes object elements;
                // recurse each one independently
                Value::Array(element_schemas) => {
                    let element_schema = element_schemas.first().unwrap_or(&Value::Null);

                    let mut result = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::Object(_) => {
                                result.push(map_values(grammar, item, element_schema)?)
                            }
                            other => result.push(other.clone()),
                        }
                    }
                    mapped.insert(key.clone(), Value::Array(result));
                }

                // otherwise the schema declares enum tables and every
                // element must be a scalar
                _ => map_scalar_array(grammar, key, items, key_schema, &mut mapped)?,
            },

            scalar => {
                for (field, translated) in map_scalar(grammar, scalar, key, key_schema)? {
                    mapped.insert(field, translated);
                }
            }
        }
    }

    Ok(Value::Object(mapped))
}

/// Translate a scalar array element-by-element and regroup the results into
/// per-destination-field arrays aligned by original index. Entries that did
/// not translate are skipped (sparse), not null-filled.
fn map_scalar_array(
    grammar: &Grammar,
    key: &str,
    items: &[Value],
    key_schema: &Value,
    mapped: &mut HashMap<String, Value>,
) -> Result<(), MapError> {
    let mut grouped: HashMap<String, Vec<Value>> = HashMap::new();

    for item in items {
        for (field, translated) in map_scalar(grammar, item, key, key_schema)? {
            let entries = grouped.entry(field).or_default();
            if !translated.is_missing() {
                entries.push(translated);
            }
        }
    }

    for (field, entries) in grouped {
        mapped.insert(field, Value::Array(entries));
    }

    Ok(())
}

/// Translate one scalar through every destination table declared for its
/// key, yielding `(destination field, translated value)` pairs.
fn map_scalar(
    grammar: &Grammar,
    value: &Value,
    key: &str,
    key_schema: &Value,
) -> Result<Vec<(String, Value)>, MapError> {
    if !value.is_scalar() {
        return Err(MapError::ObjectInScalarPosition(key.to_string()));
    }

    let Some(tables) = key_schema.as_object() else {
        // nothing enumerable declared for this key; keep the value as-is
        return Ok(vec![(key.to_string(), value.clone())]);
    };

    let lookup = value.as_string();
    let mut translated = Vec::with_capacity(tables.len());

    for (field, table) in tables {
        // self-pointer shorthand: the table lands under the source key name
        let destination = if field == grammar.self_pointer {
            key
        } else {
            field.as_str()
        };

        let Some(cases) = table.as_object() else {
            translated.push((destination.to_string(), Value::Missing));
            continue;
        };

        let result = match cases.get(&lookup) {
            Some(hit) => hit.clone(),
            None => match cases.get(grammar.default_key) {
                Some(Value::String(sentinel)) if sentinel == grammar.keep_sentinel => value.clone(),
                Some(fallback) => fallback.clone(),
                None => Value::Missing,
            },
        };

        translated.push((destination.to_string(), result));
    }

    Ok(translated)
}
