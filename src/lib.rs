pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::{toml_config::TomlConfig, ReportSettings};
pub use core::{etl::ReportEngine, pipeline::ConsumptionPipeline};
pub use domain::model::{ExportFormat, Record, RunSummary};
pub use utils::error::{ReportError, Result};
