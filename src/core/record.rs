use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Maximum number of characters of query text kept on a record.
pub const SNIPPET_LIMIT: usize = 500;

/// Which extraction path produced a lineage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceType {
    SqlNativeQuery,
    SqlQueryOption,
    NavigationSchemaItem,
    NavigationItemOnly,
    ConnectionOnly,
    Error,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::SqlNativeQuery => "SQL (NativeQuery)",
            SourceType::SqlQueryOption => "SQL (Query option)",
            SourceType::NavigationSchemaItem => "Navigation (Schema/Item)",
            SourceType::NavigationItemOnly => "Navigation (Item only)",
            SourceType::ConnectionOnly => "M query (connection only)",
            SourceType::Error => "ERROR",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic kind of a referenced database object.
///
/// Variant order matches the alphabetical order of the labels, so sorting by
/// the enum and sorting by the exported text agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    StoredProcedure,
    Unknown,
    View,
}

impl ObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::StoredProcedure => "Stored Procedure",
            ObjectType::View => "View",
            ObjectType::Unknown => "Table/View (unknown)",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fact about where a table's data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageRecord {
    pub container_path: PathBuf,
    pub table_name: Option<String>,
    pub source_type: SourceType,
    pub server: Option<String>,
    pub database: Option<String>,
    pub object_name: Option<String>,
    pub snippet: Option<String>,
}

impl LineageRecord {
    pub fn new(container_path: PathBuf, table_name: Option<String>, source_type: SourceType) -> Self {
        Self {
            container_path,
            table_name,
            source_type,
            server: None,
            database: None,
            object_name: None,
            snippet: None,
        }
    }

    /// A container that could not be read. Only the path and the failure text
    /// (capped like any other snippet) are set.
    pub fn error(container_path: PathBuf, description: &str) -> Self {
        Self::new(container_path, None, SourceType::Error).with_snippet(snippet_of(description))
    }

    pub fn with_connection(mut self, server: Option<String>, database: Option<String>) -> Self {
        self.server = server;
        self.database = database;
        self
    }

    pub fn with_object_name(mut self, object_name: Option<String>) -> Self {
        self.object_name = object_name;
        self
    }

    pub fn with_snippet(mut self, snippet: String) -> Self {
        self.snippet = Some(snippet);
        self
    }

    /// File name of the container, falling back to the full path.
    pub fn container_basename(&self) -> String {
        self.container_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.container_path.to_string_lossy().into_owned())
    }
}

/// Truncate query text to the snippet limit on a character boundary.
pub fn snippet_of(text: &str) -> String {
    text.chars().take(SNIPPET_LIMIT).collect()
}

/// One distinct (server, database, object_name, object_type) with every
/// container that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub server: Option<String>,
    pub database: Option<String>,
    pub object_name: String,
    pub object_type: ObjectType,
    pub pbix_files: String,
}

/// Ordering wrapper that places `None` after every `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullsLast<T>(pub Option<T>);

impl<T: Ord> PartialOrd for NullsLast<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for NullsLast<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
