pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod source;

pub use extract::{extract, extract_height_and_position, try_extract, ExtractionError};
pub use fetch::{Fetcher, RawDocument};
pub use pipeline::Pipeline;
pub use source::{FetchFailurePolicy, Source, SourceConfig};
