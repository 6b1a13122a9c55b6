//! # PBIX-LINEAGE
//!
//! Data-source lineage extraction for Power BI report files.
//!
//! PBIX-LINEAGE walks a directory of `.pbix` containers, pulls the Power Query (M)
//! expressions out of each one and recovers the servers, databases and SQL objects
//! those expressions read from.
//!
//! ## Pipeline
//!
//! - **Scanner**: recursive container discovery
//! - **Processor**: per-container expression extraction, failures become `ERROR` rows
//! - **Analyzer**: heuristic M/SQL pattern matching into lineage records
//! - **Report**: classification, null-last ordering and per-object summary
//!
//! ## Output Formats
//!
//! - **XLSX**: `Detailed` + `UniqueObjects` worksheets
//! - **JSON**: the same two sheets as row objects

use std::path::PathBuf;

pub mod core;
pub mod formatters;
pub mod parsers;

/// Run-level failures. Per-container problems never surface here; they are
/// recorded as `ERROR` lineage rows instead.
#[derive(Debug, thiserror::Error)]
pub enum LineageError {
    #[error("Folder does not exist: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("No .{extension} files found under {}", .root.display())]
    NoContainersFound { root: PathBuf, extension: String },

    #[error("{containers} container(s) found under {} but no data sources extracted", .root.display())]
    NoDataExtracted { root: PathBuf, containers: usize },
}
