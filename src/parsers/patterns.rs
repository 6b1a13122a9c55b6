//! Recognizer rules for Power Query (M) expressions.
//!
//! Each rule is a case-insensitive regex plus the capture groups it exposes.
//! Rules are independent: one expression can match several of them.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Static definition of a recognizer rule.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub name: &'static str,
    pub pattern: &'static str,
    /// Capture groups exposed by the rule, in group order.
    pub captures: &'static [&'static str],
    /// Whether `.` may cross line breaks (multi-line query bodies).
    pub multiline: bool,
}

pub const CONNECTION_CALL: PatternRule = PatternRule {
    name: "ConnectionCall",
    pattern: r#"Sql\.Database\(\s*"([^"]+)"\s*,\s*"([^"]+)""#,
    captures: &["server", "database"],
    multiline: false,
};

pub const NATIVE_QUERY_CALL: PatternRule = PatternRule {
    name: "NativeQueryCall",
    pattern: r#"Value\.NativeQuery\([^,]+,\s*"(.+?)"\s*(?:,|\))"#,
    captures: &["raw_query_text"],
    multiline: true,
};

pub const QUERY_OPTION: PatternRule = PatternRule {
    name: "QueryOption",
    pattern: r#"Query\s*=\s*"((?:[^"]|"")+)""#,
    captures: &["query_text"],
    multiline: true,
};

pub const SCHEMA_ITEM_NAV: PatternRule = PatternRule {
    name: "SchemaItemNav",
    pattern: r#"Schema\s*=\s*"([^"]+)"\s*,\s*Item\s*=\s*"([^"]+)""#,
    captures: &["schema", "item"],
    multiline: false,
};

pub const ITEM_ONLY_NAV: PatternRule = PatternRule {
    name: "ItemOnlyNav",
    pattern: r#"Item\s*=\s*"([^"]+)""#,
    captures: &["item"],
    multiline: false,
};

pub const RULES: &[PatternRule] = &[
    CONNECTION_CALL,
    NATIVE_QUERY_CALL,
    QUERY_OPTION,
    SCHEMA_ITEM_NAV,
    ITEM_ONLY_NAV,
];

impl PatternRule {
    /// Compile the rule. The patterns are fixed at build time, so failure is a bug.
    pub fn compile(&self) -> Regex {
        RegexBuilder::new(self.pattern)
            .case_insensitive(true)
            .dot_matches_new_line(self.multiline)
            .build()
            .unwrap_or_else(|err| panic!("invalid {} pattern: {err}", self.name))
    }
}

static CONNECTION_CALL_RE: LazyLock<Regex> = LazyLock::new(|| CONNECTION_CALL.compile());
static NATIVE_QUERY_CALL_RE: LazyLock<Regex> = LazyLock::new(|| NATIVE_QUERY_CALL.compile());
static QUERY_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| QUERY_OPTION.compile());
static SCHEMA_ITEM_NAV_RE: LazyLock<Regex> = LazyLock::new(|| SCHEMA_ITEM_NAV.compile());
static ITEM_ONLY_NAV_RE: LazyLock<Regex> = LazyLock::new(|| ITEM_ONLY_NAV.compile());

/// Server and database named by an `Sql.Database("server", "database")` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub server: String,
    pub database: String,
}

/// First `Sql.Database` call in the expression.
pub fn connection_call(expression: &str) -> Option<Connection> {
    let caps = CONNECTION_CALL_RE.captures(expression)?;
    Some(Connection {
        server: caps[1].to_string(),
        database: caps[2].to_string(),
    })
}

/// Raw SQL passed to the first `Value.NativeQuery` call.
pub fn native_query_call(expression: &str) -> Option<&str> {
    NATIVE_QUERY_CALL_RE
        .captures(expression)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Text of the first `Query = "..."` option with `""` unescaped to `"`.
pub fn query_option(expression: &str) -> Option<String> {
    QUERY_OPTION_RE
        .captures(expression)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace("\"\"", "\""))
}

/// Every `[Schema = "...", Item = "..."]` navigation step, in order.
pub fn schema_item_navs(expression: &str) -> Vec<(String, String)> {
    SCHEMA_ITEM_NAV_RE
        .captures_iter(expression)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Every `Item = "..."` navigation field, in order.
pub fn item_only_navs(expression: &str) -> Vec<String> {
    ITEM_ONLY_NAV_RE
        .captures_iter(expression)
        .map(|caps| caps[1].to_string())
        .collect()
}
