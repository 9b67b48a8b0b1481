//! Leaf expression classification and evaluation.
//!
//! Every leaf of a mapping schema is a string expression. It is classified by
//! ordered pattern matching over the grammar rules (first match wins, with a
//! constant catch-all last) and evaluated against the source document and the
//! current traversal path. Concatenation and conditionals re-enter the
//! classifier for their sub-expressions.

use crate::datetime;
use crate::error::MapError;
use crate::grammar::Grammar;
use crate::path;
use crate::pointer;
use crate::value::Value;

/// The kind of a leaf mapping expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    /// A literal string returned unchanged
    Constant,

    /// `@path` lookup against the source document
    Variable,

    /// `a $concat b` string concatenation with optional `$with` joiners
    Concat,

    /// `$date <expr> $format <pattern>` date rendering
    Date,

    /// `$if <cases> [$otherwise $return <expr>]` branching
    Conditional,
}

/// Comparators supported inside conditional cases.
///
/// Equality is string-coerced. The ordering comparators parse both operands
/// as integers; when either side fails to parse the comparison has no result
/// and the case can never win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl Comparator {
    fn from_token(token: &str) -> Option<Comparator> {
        match token {
            "$equal" => Some(Comparator::Equal),
            "$not equal" => Some(Comparator::NotEqual),
            "$greater than" => Some(Comparator::GreaterThan),
            "$less than" => Some(Comparator::LessThan),
            _ => None,
        }
    }

    /// Apply the comparator; `None` means "no result", which never wins.
    fn apply(&self, left: &Value, right: &Value) -> Option<bool> {
        match self {
            Comparator::Equal => Some(left.as_string() == right.as_string()),
            Comparator::NotEqual => Some(left.as_string() != right.as_string()),
            Comparator::GreaterThan => match (parse_int_loose(left), parse_int_loose(right)) {
                (Some(a), Some(b)) => Some(a > b),
                _ => None,
            },
            Comparator::LessThan => match (parse_int_loose(left), parse_int_loose(right)) {
                (Some(a), Some(b)) => Some(a < b),
                _ => None,
            },
        }
    }
}

/// Classify an expression by the first matching grammar rule.
///
/// The rule set is total: the catch-all constant rule matches anything the
/// earlier rules did not.
pub fn classify(grammar: &Grammar, expr: &str) -> ExprKind {
    for (pattern, kind) in &grammar.rules {
        if pattern.is_match(expr) {
            return *kind;
        }
    }
    ExprKind::Constant
}

/// Evaluate a leaf expression against `data` at `current_path`.
///
/// # Examples
///
/// ```
/// use remold::{expr, Grammar, Value};
/// use remold::output::from_json;
/// use serde_json::json;
///
/// let grammar = Grammar::global();
/// let data = from_json(json!({"driver": {"name": "Ada"}}));
///
/// let name = expr::eval(grammar, &data, "@driver.name", "").unwrap();
/// assert_eq!(name, Value::String("Ada".to_string()));
///
/// let label = expr::eval(grammar, &data, "pilot", "").unwrap();
/// assert_eq!(label, Value::String("pilot".to_string()));
/// ```
pub fn eval(
    grammar: &Grammar,
    data: &Value,
    expr: &str,
    current_path: &str,
) -> Result<Value, MapError> {
    match classify(grammar, expr) {
        ExprKind::Constant => Ok(Value::String(expr.to_string())),
        ExprKind::Variable => eval_variable(grammar, data, expr, current_path),
        ExprKind::Concat => eval_concat(grammar, data, expr, current_path),
        ExprKind::Date => eval_date(grammar, data, expr, current_path),
        ExprKind::Conditional => eval_conditional(grammar, data, expr, current_path),
    }
}

/// Resolve a `@path` reference: pointers first, then the variable marker is
/// stripped and the remaining absolute path is looked up in the document.
pub fn eval_variable(
    grammar: &Grammar,
    data: &Value,
    expr: &str,
    current_path: &str,
) -> Result<Value, MapError> {
    let resolved = pointer::resolve(grammar, expr, current_path)?;
    let lookup = resolved.replacen('@', "", 1);

    Ok(path::get(data, &lookup).cloned().unwrap_or(Value::Missing))
}

fn eval_concat(
    grammar: &Grammar,
    data: &Value,
    expr: &str,
    current_path: &str,
) -> Result<Value, MapError> {
    let mut result = String::new();

    for part in expr.split(grammar.concat_splitter) {
        let part = part.trim();
        let (joiner, sub_expr) = split_joiner(grammar, part);

        let value = eval(grammar, data, sub_expr, current_path)?;
        let text = value.as_string();
        if text.is_empty() {
            continue;
        }

        if !result.is_empty() {
            result.push_str(&joiner);
        }
        result.push_str(&text);
    }

    Ok(Value::String(result.trim().to_string()))
}

/// A concat part may open with `$with '<joiner>'`; the remainder after the
/// closing quote is the sub-expression. The default joiner is one space.
fn split_joiner<'a>(grammar: &Grammar, part: &'a str) -> (String, &'a str) {
    if part.starts_with(grammar.joiner_marker) {
        if let (Some(start), Some(end)) = (part.find('\''), part.rfind('\'')) {
            if start < end {
                return (part[start + 1..end].to_string(), part[end + 1..].trim());
            }
        }
    }

    (" ".to_string(), part)
}

fn eval_date(
    grammar: &Grammar,
    data: &Value,
    expr: &str,
    current_path: &str,
) -> Result<Value, MapError> {
    let body = expr.replacen(grammar.date_head, "", 1);
    let parts: Vec<&str> = body.split(grammar.date_formatter).map(str::trim).collect();

    let sub_expr = parts.first().copied().unwrap_or("");
    let pattern = parts.last().copied().unwrap_or("");

    let value = eval(grammar, data, sub_expr, current_path)?;
    // format is never applied to an absent value
    if value.is_nil() {
        return Ok(Value::Missing);
    }

    match datetime::format_value(&value, pattern) {
        Some(rendered) => Ok(Value::String(rendered)),
        None => Ok(Value::Missing),
    }
}

/// Evaluate a conditional expression.
///
/// Cases are scanned in textual order. Each case is `left <comparator> right
/// $return result`; the boundary between one case's result and the next
/// case's left operand is the last whitespace-separated token before the next
/// comparator. The first case whose comparison is true wins immediately; its
/// result is evaluated and returned. With no winner the otherwise clause
/// decides, and without one the conditional resolves to missing.
pub fn eval_conditional(
    grammar: &Grammar,
    data: &Value,
    expr: &str,
    current_path: &str,
) -> Result<Value, MapError> {
    let body = expr.trim_start();
    let body = body.strip_prefix("$if").unwrap_or(body);

    let (cases_text, otherwise_expr) = match grammar.otherwise.captures(body) {
        Some(caps) => {
            let clause = caps.get(0).map(|m| m.start()).unwrap_or(body.len());
            let result = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            (&body[..clause], Some(result))
        }
        None => (body, None),
    };

    let marks: Vec<regex::Match<'_>> = grammar.comparator.find_iter(cases_text).collect();

    // a $return with no matching comparator means the case used a token
    // outside the supported comparator set
    if grammar.return_token.find_iter(cases_text).count() > marks.len() {
        return Err(MapError::UnknownComparator(expr.trim().to_string()));
    }

    let mut cursor = 0;
    for (i, mark) in marks.iter().enumerate() {
        let left_text = cases_text[cursor..mark.start()].trim();

        let limit = marks.get(i + 1).map(|m| m.start()).unwrap_or(cases_text.len());
        let between = &cases_text[mark.end()..limit];
        let case_body = if marks.get(i + 1).is_some() {
            let trimmed = between.trim_end();
            let next_left = trimmed
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_whitespace())
                .map(|(p, c)| p + c.len_utf8())
                .unwrap_or(0);
            cursor = mark.end() + next_left;
            &trimmed[..next_left]
        } else {
            between
        };

        let Some(comparator) = Comparator::from_token(mark.as_str()) else {
            return Err(MapError::UnknownComparator(expr.trim().to_string()));
        };

        let Some((right_text, result_text)) = case_body.split_once(grammar.return_keyword) else {
            // malformed case without a $return clause; it can never win
            continue;
        };

        let left = eval(grammar, data, left_text, current_path)?;
        // an unresolved left operand skips the case, it is not an error
        if left.is_nil() {
            continue;
        }

        let right = eval(grammar, data, right_text.trim(), current_path)?;
        if comparator.apply(&left, &right) == Some(true) {
            return eval(grammar, data, result_text.trim(), current_path);
        }
    }

    match otherwise_expr {
        Some(result) if !result.is_empty() => eval(grammar, data, result, current_path),
        _ => Ok(Value::Missing),
    }
}

/// Parse a value as an integer leniently: leading whitespace and sign, then
/// as many digits as present; anything trailing is ignored.
fn parse_int_loose(value: &Value) -> Option<i64> {
    if let Value::Integer(n) = value {
        return Some(*n);
    }
    if let Value::Float(f) = value {
        return f.is_finite().then_some(f.trunc() as i64);
    }

    let text = value.as_string();
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| if negative { -n } else { n })
}
