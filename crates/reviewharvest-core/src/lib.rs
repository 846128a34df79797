pub mod export;
pub mod pipeline;

pub use export::{output_path, write_reviews, ExportError};
pub use pipeline::{HarvestPipeline, HarvestReport, HarvestRequest, PipelineError};
