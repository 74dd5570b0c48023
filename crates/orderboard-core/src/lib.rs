pub mod chart;
pub mod config;
pub mod dataset;
pub mod enrich;
pub mod error;
pub mod locale;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod table;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use locale::Locale;
pub use model::{OrderRecord, RawOrder};
pub use pipeline::{run, write_artifacts, PipelineOutput, WrittenArtifacts};
pub use stats::OrderSummary;
pub use table::OrderTable;
