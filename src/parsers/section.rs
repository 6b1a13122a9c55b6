//! Splitter for Power Query section documents (`Formulas/Section1.m`).
//!
//! A section document looks like:
//!
//! ```text
//! section Section1;
//!
//! shared Orders = let
//!     Source = Sql.Database("srv", "db")
//! in
//!     Source;
//!
//! shared #"Sales Lines" = ...;
//! ```
//!
//! Members are split on `;` outside string literals, quoted identifiers and
//! comments. Only the member header is interpreted; the expression body is
//! returned verbatim.

/// One named query pulled out of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    pub table_name: Option<String>,
    pub expression: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    Text,
    LineComment,
    BlockComment,
}

/// Split a section document into `(name, expression)` rows, in document order.
pub fn parse_section_document(document: &str) -> Vec<QueryRow> {
    split_members(document.trim_start_matches('\u{feff}'))
        .into_iter()
        .filter_map(parse_member)
        .collect()
}

fn split_members(document: &str) -> Vec<&str> {
    let mut members = Vec::new();
    let mut state = ScanState::Code;
    let mut start = 0;
    let mut chars = document.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match state {
            ScanState::Code => match ch {
                '"' => state = ScanState::Text,
                '/' => match chars.peek() {
                    Some((_, '/')) => {
                        chars.next();
                        state = ScanState::LineComment;
                    }
                    Some((_, '*')) => {
                        chars.next();
                        state = ScanState::BlockComment;
                    }
                    _ => {}
                },
                ';' => {
                    members.push(&document[start..idx]);
                    start = idx + ch.len_utf8();
                }
                _ => {}
            },
            ScanState::Text => {
                if ch == '"' {
                    // `""` is an escaped quote inside the literal.
                    if matches!(chars.peek(), Some((_, '"'))) {
                        chars.next();
                    } else {
                        state = ScanState::Code;
                    }
                }
            }
            ScanState::LineComment => {
                if ch == '\n' {
                    state = ScanState::Code;
                }
            }
            ScanState::BlockComment => {
                if ch == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    state = ScanState::Code;
                }
            }
        }
    }

    let tail = &document[start..];
    if !skip_trivia(tail).is_empty() {
        members.push(tail);
    }
    members
}

fn parse_member(member: &str) -> Option<QueryRow> {
    let header = skip_trivia(member);
    if header.is_empty() || starts_with_keyword(header, "section") {
        return None;
    }

    let rest = strip_keyword(header, "shared").unwrap_or(header);
    let rest = skip_trivia(rest);

    let (name, rest) = if let Some(quoted) = rest.strip_prefix("#\"") {
        let (name, consumed) = read_quoted(quoted)?;
        (name, &quoted[consumed..])
    } else {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        (rest[..end].to_string(), &rest[end..])
    };

    let expression = skip_trivia(rest).strip_prefix('=')?.trim();
    if name.is_empty() {
        return None;
    }

    Some(QueryRow {
        table_name: Some(name),
        expression: expression.to_string(),
    })
}

/// Read a quoted identifier body up to its closing quote. Returns the
/// unescaped name and the number of bytes consumed including the closing quote.
fn read_quoted(text: &str) -> Option<(String, usize)> {
    let mut name = String::new();
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch == '"' {
            if matches!(chars.peek(), Some((_, '"'))) {
                chars.next();
                name.push('"');
                continue;
            }
            return Some((name, idx + 1));
        }
        name.push(ch);
    }
    None
}

/// Skip leading whitespace and comments.
fn skip_trivia(mut text: &str) -> &str {
    loop {
        text = text.trim_start();
        if let Some(rest) = text.strip_prefix("//") {
            text = rest.find('\n').map_or("", |end| &rest[end + 1..]);
        } else if let Some(rest) = text.strip_prefix("/*") {
            text = rest.find("*/").map_or("", |end| &rest[end + 2..]);
        } else {
            return text;
        }
    }
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    strip_keyword(text, keyword).is_some()
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_whitespace() || c == '/' => Some(rest),
        _ => None,
    }
}
