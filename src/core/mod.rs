pub mod builder;
pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod reporter;

pub use crate::domain::model::{
    Extraction, LineOutcome, LoadResult, Ranking, Record, Rejection, RunSummary,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
