pub mod m_expression;
pub mod patterns;
pub mod section;
pub mod sql;

pub use m_expression::MExpressionAnalyzer;
pub use section::{parse_section_document, QueryRow};
pub use sql::extract_sql_objects;
