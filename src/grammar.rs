use std::sync::OnceLock;

use regex::Regex;

use crate::expr::ExprKind;

/// The token vocabulary and classification rules of the mapping DSL.
///
/// The grammar is compiled once and shared read-only across all calls; the
/// literal tokens are part of the wire contract of mapping schemas.
///
/// Classification happens by ordered pattern matching: the first rule in
/// [`Grammar::rules`] whose regex matches wins. The final rule is a universal
/// catch-all classifying anything unmatched as a constant, which makes the
/// rule set total.
pub struct Grammar {
    /// Ordered classification rules; the constant catch-all must stay last
    pub rules: Vec<(Regex, ExprKind)>,

    /// Pointer token: `@this` with an optional trailing drop count
    pub pointer: Regex,

    /// Pointer token anchored at the start of a path segment
    pub pointer_head: Regex,

    /// Reserved descriptor key holding an array node's repeat specifier
    pub repeat_key: &'static str,

    /// Operator combining several array paths in one repeat specifier
    pub path_union: &'static str,

    /// Concatenation splitter token
    pub concat_splitter: &'static str,

    /// Marker introducing a custom joiner inside a concat part
    pub joiner_marker: &'static str,

    /// Date expression head and format keyword
    pub date_head: &'static str,
    pub date_formatter: &'static str,

    /// Conditional keywords
    pub return_keyword: &'static str,
    pub comparator: Regex,
    pub return_token: Regex,
    pub otherwise: Regex,

    /// Value-mapping vocabulary: self-pointer sub-key, default key, and the
    /// sentinel meaning "keep the original value"
    pub self_pointer: &'static str,
    pub default_key: &'static str,
    pub keep_sentinel: &'static str,
}

static GRAMMAR: OnceLock<Grammar> = OnceLock::new();

impl Grammar {
    /// The shared grammar table, compiled on first use.
    pub fn global() -> &'static Grammar {
        GRAMMAR.get_or_init(Grammar::new)
    }

    fn new() -> Grammar {
        // Patterns are compile-time constants; failing to compile one is a
        // programming error, not a runtime condition.
        let rule = |pattern: &str, kind: ExprKind| {
            (
                Regex::new(pattern).expect("grammar rule pattern must compile"),
                kind,
            )
        };

        Grammar {
            rules: vec![
                rule(
                    r"^[@A-Za-z\[\]0-9.:_-]* \$concat( \$with '.*')* [@A-Za-z\[\]0-9.:_-]+",
                    ExprKind::Concat,
                ),
                rule(r"^@", ExprKind::Variable),
                rule(r"^\s*\$date\b.*\$format", ExprKind::Date),
                rule(r"^\s*\$if", ExprKind::Conditional),
                // catch-all, keep last
                rule(r"(?s).*", ExprKind::Constant),
            ],
            pointer: Regex::new(r"@this[0-9]*").expect("pointer pattern must compile"),
            pointer_head: Regex::new(r"^@this[0-9]*").expect("pointer pattern must compile"),
            repeat_key: "$$repeat$$",
            path_union: "$$and",
            concat_splitter: "$concat",
            joiner_marker: "$with",
            date_head: "$date",
            date_formatter: "$format",
            return_keyword: "$return",
            comparator: Regex::new(r"\$equal|\$not equal|\$greater than|\$less than")
                .expect("comparator pattern must compile"),
            return_token: Regex::new(r"\$return").expect("return pattern must compile"),
            otherwise: Regex::new(r"\$otherwise\s+\$return\s+(?s)(.*)$")
                .expect("otherwise pattern must compile"),
            self_pointer: "this",
            default_key: "$default",
            keep_sentinel: "$same$",
        }
    }
}
