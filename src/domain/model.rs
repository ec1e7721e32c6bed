use chrono::{DateTime, Local};
use std::path::PathBuf;

/// 一次截圖的結果
#[derive(Debug, Clone)]
pub struct CapturedScreenshot {
    pub path: PathBuf,
    pub dimensions: Option<(u32, u32)>,
    /// 使用既有圖片 (`--image`) 時為 None
    pub captured_at: Option<DateTime<Local>>,
}

/// 結果清單的來源。用來區分「OCR 真的沒找到」與「OCR 失敗改用範例資料」
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Ocr,
    SampleFallback,
    ImageUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockExtraction {
    pub symbols: Vec<String>,
    pub source: ExtractionSource,
    /// 通過過濾但不在目標清單中的代號，不會寫入結果
    pub additional: Vec<String>,
    pub missing: Vec<String>,
}

impl StockExtraction {
    pub fn empty(source: ExtractionSource) -> Self {
        Self {
            symbols: Vec::new(),
            source,
            additional: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ExtractionSource::SampleFallback
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub screenshot: PathBuf,
    /// 使用既有圖片時為 None
    pub captured_at: Option<DateTime<Local>>,
    pub extraction: StockExtraction,
    /// 寫檔失敗時為 None
    pub output_path: Option<String>,
}
