pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, RunConfig};
pub use core::{etl::EtlEngine, pipeline::StockPipeline};
pub use domain::model::{ExtractionSource, RunReport, StockExtraction};
pub use utils::error::{Result, SnapError};
