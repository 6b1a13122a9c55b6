use std::path::Path;

use super::patterns::{
    connection_call, item_only_navs, native_query_call, query_option, schema_item_navs,
};
use super::sql::extract_sql_objects;
use crate::core::record::{snippet_of, LineageRecord, SourceType};

/// Turns one table's M expression into lineage records.
///
/// Every branch is evaluated independently; a table that both runs a native
/// query and navigates to a schema item yields records for both.
#[derive(Debug, Clone, Copy, Default)]
pub struct MExpressionAnalyzer;

impl MExpressionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        container_path: &Path,
        table_name: Option<&str>,
        expression: &str,
    ) -> Vec<LineageRecord> {
        let connection = connection_call(expression);
        let (server, database) = match connection {
            Some(ref conn) => (Some(conn.server.clone()), Some(conn.database.clone())),
            None => (None, None),
        };

        let record = |source_type: SourceType| {
            LineageRecord::new(
                container_path.to_path_buf(),
                table_name.map(str::to_string),
                source_type,
            )
            .with_connection(server.clone(), database.clone())
        };

        let mut records = Vec::new();

        if let Some(sql) = native_query_call(expression) {
            sql_records(&mut records, record(SourceType::SqlNativeQuery), sql);
        }

        if let Some(sql) = query_option(expression) {
            sql_records(&mut records, record(SourceType::SqlQueryOption), &sql);
        }

        let schema_items = schema_item_navs(expression);
        if !schema_items.is_empty() {
            for (schema, item) in schema_items {
                records.push(
                    record(SourceType::NavigationSchemaItem)
                        .with_object_name(Some(format!("{schema}.{item}"))),
                );
            }
        } else {
            // Item-only navigation is a fallback; the Item regex also hits Schema/Item records.
            for item in item_only_navs(expression) {
                records.push(record(SourceType::NavigationItemOnly).with_object_name(Some(item)));
            }
        }

        if records.is_empty() && connection.is_some() {
            records.push(record(SourceType::ConnectionOnly));
        }

        tracing::debug!(
            table = table_name.unwrap_or("<unnamed>"),
            records = records.len(),
            "analyzed expression"
        );

        records
    }
}

/// One record per referenced object, or a single object-less record when the
/// SQL names nothing recognizable.
fn sql_records(records: &mut Vec<LineageRecord>, template: LineageRecord, sql: &str) {
    let snippet = snippet_of(sql);
    let objects = extract_sql_objects(sql);

    if objects.is_empty() {
        records.push(template.with_snippet(snippet));
        return;
    }

    for object in objects {
        records.push(
            template
                .clone()
                .with_object_name(Some(object))
                .with_snippet(snippet.clone()),
        );
    }
}
