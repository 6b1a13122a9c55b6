use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Shortest identifier kept; shorter captures are aliases or noise.
const MIN_OBJECT_LEN: usize = 3;

static SQL_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFROM\s+([A-Za-z0-9_\[\]\.]+)").unwrap());
static SQL_JOIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\s+([A-Za-z0-9_\[\]\.]+)").unwrap());
static SQL_EXEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bEXEC(?:UTE)?\s+([A-Za-z0-9_\[\]\.]+)").unwrap());

/// Object names referenced by `FROM`, `JOIN` and `EXEC[UTE]` clauses,
/// deduplicated and sorted.
pub fn extract_sql_objects(sql: &str) -> Vec<String> {
    let mut objects = BTreeSet::new();

    for pattern in [&*SQL_FROM_RE, &*SQL_JOIN_RE, &*SQL_EXEC_RE] {
        for caps in pattern.captures_iter(sql) {
            let object = caps[1].trim();
            if object.chars().count() >= MIN_OBJECT_LEN {
                objects.insert(object.to_string());
            }
        }
    }

    objects.into_iter().collect()
}
