use crate::adapters::input::ScrollPlan;
use crate::core::symbols::SymbolRules;
use crate::domain::model::{CapturedScreenshot, StockExtraction};
use crate::utils::error::Result;
use async_trait::async_trait;
use image::DynamicImage;
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn screenshot_name(&self) -> &str;
    fn results_filename(&self) -> &str;
    fn existing_image(&self) -> Option<&Path>;
    fn tesseract_path(&self) -> Option<&Path>;
    fn load_delay(&self) -> Duration;
    fn settle_delay(&self) -> Duration;
    fn scroll_plan(&self) -> &ScrollPlan;
    fn symbol_rules(&self) -> &SymbolRules;
}

/// 滑鼠/滾輪的基本操作
pub trait InputDriver {
    fn screen_size(&mut self) -> Result<(i32, i32)>;
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()>;
    fn click(&mut self) -> Result<()>;
    /// 正數向上捲動，負數向下
    fn scroll(&mut self, amount: i32) -> Result<()>;
}

/// 作業系統層級的輸入模擬與全螢幕截圖。兩個方法都是阻塞呼叫
pub trait ScreenService: Send + Sync {
    fn run_input_script(&self, plan: &ScrollPlan) -> Result<()>;
    fn capture_screen(&self) -> Result<DynamicImage>;
}

pub trait BrowserLauncher: Send + Sync {
    fn open_url(&self, url: &str) -> Result<()>;
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn image_to_text(&self, image_path: &Path) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CapturedScreenshot>;
    async fn transform(&self, screenshot: CapturedScreenshot) -> Result<StockExtraction>;
    async fn load(&self, extraction: &StockExtraction) -> Result<String>;
}
