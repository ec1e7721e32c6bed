pub mod capture;
pub mod etl;
pub mod pipeline;
pub mod report;
pub mod symbols;

pub use crate::domain::model::{CapturedScreenshot, ExtractionSource, RunReport, StockExtraction};
pub use crate::domain::ports::{
    BrowserLauncher, ConfigProvider, InputDriver, OcrEngine, Pipeline, ScreenService, Storage,
};
pub use crate::utils::error::Result;
