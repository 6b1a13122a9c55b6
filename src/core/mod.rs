pub mod analyzer;
pub mod classify;
pub mod container;
pub mod processor;
pub mod record;
pub mod report;
pub mod scanner;

pub use analyzer::{run_extraction, CorpusAnalyzer, ExtractionConfig};
pub use classify::classify_object;
pub use container::{ContainerReader, PbixReader};
pub use processor::FileProcessor;
pub use record::{LineageRecord, ObjectType, SourceType, SummaryRow};
pub use report::{DetailRow, Report};
pub use scanner::ContainerScanner;
