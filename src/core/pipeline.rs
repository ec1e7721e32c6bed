use crate::adapters::{DesktopScreen, SystemBrowser, TesseractOcr};
use crate::core::capture::{encode_image, timestamped_filename};
use crate::core::report::render_stock_list;
use crate::core::symbols::extract_stock_symbols;
use crate::core::{
    BrowserLauncher, CapturedScreenshot, ConfigProvider, ExtractionSource, OcrEngine, Pipeline,
    ScreenService, StockExtraction, Storage,
};
use crate::utils::error::{Result, SnapError};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const OCR_PREVIEW_CHARS: usize = 500;

pub struct StockPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    screen: Arc<dyn ScreenService>,
    browser: Arc<dyn BrowserLauncher>,
    ocr: Arc<dyn OcrEngine>,
}

impl<S: Storage, C: ConfigProvider> StockPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let ocr = TesseractOcr::discover(config.tesseract_path());
        Self {
            storage,
            config,
            screen: Arc::new(DesktopScreen::new()),
            browser: Arc::new(SystemBrowser),
            ocr: Arc::new(ocr),
        }
    }

    pub fn with_screen(mut self, screen: Arc<dyn ScreenService>) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_browser(mut self, browser: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn OcrEngine>) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 開啟網址、捲動、截圖並存到 `<output>/<stem>_<timestamp>.<ext>`
    pub async fn capture_screenshot(&self, url: &str, filename: &str) -> Result<CapturedScreenshot> {
        // 瀏覽器可能已經開著，開啟失敗仍照常截圖
        if let Err(e) = self.browser.open_url(url) {
            tracing::warn!("⚠️  Could not open browser: {}", e);
            tracing::warn!("Continuing with screenshot capture...");
        }

        tracing::info!("Waiting for page to load...");
        tokio::time::sleep(self.config.load_delay()).await;

        // 捲動失敗只記錄警告，仍繼續截圖
        let screen = Arc::clone(&self.screen);
        let plan = self.config.scroll_plan().clone();
        match tokio::task::spawn_blocking(move || screen.run_input_script(&plan)).await {
            Ok(Ok(())) => tracing::debug!("Scroll script finished"),
            Ok(Err(e)) => {
                tracing::warn!("⚠️  Could not perform scrolling actions: {}", e);
                tracing::warn!("Continuing with screenshot capture...");
            }
            Err(e) => tracing::warn!("⚠️  Scroll task aborted: {}", e),
        }

        let captured_at = Local::now();
        let stamped = timestamped_filename(filename, &captured_at);

        tracing::info!("Capturing screenshot...");
        let screen = Arc::clone(&self.screen);
        let image = tokio::task::spawn_blocking(move || screen.capture_screen())
            .await
            .map_err(|e| SnapError::capture(format!("capture task failed: {}", e)))??;
        let dimensions = (image.width(), image.height());

        let bytes = encode_image(&image, &stamped)?;
        self.storage.write_file(&stamped, &bytes).await?;

        let path = Path::new(self.config.output_path()).join(&stamped);
        tracing::info!("Screenshot saved to: {}", path.display());

        Ok(CapturedScreenshot {
            path,
            dimensions: Some(dimensions),
            captured_at: Some(captured_at),
        })
    }

    /// OCR 失敗時改用範例清單；圖片不存在或無法讀取時回傳空結果
    pub async fn extract_stocks_from_image(&self, image_path: &Path) -> StockExtraction {
        if !image_path.exists() {
            tracing::warn!("Image file not found: {}", image_path.display());
            return StockExtraction::empty(ExtractionSource::ImageUnavailable);
        }

        match image::image_dimensions(image_path) {
            Ok((width, height)) => {
                tracing::info!("Processing image: {}", image_path.display());
                tracing::info!("Image size: {}x{}", width, height);
            }
            Err(e) => {
                tracing::error!("Error processing image {}: {}", image_path.display(), e);
                return StockExtraction::empty(ExtractionSource::ImageUnavailable);
            }
        }

        let rules = self.config.symbol_rules();
        match self.ocr.image_to_text(image_path).await {
            Ok(text) => {
                let preview: String = text.chars().take(OCR_PREVIEW_CHARS).collect();
                tracing::debug!("Extracted text preview:\n{}", preview);

                let matched = extract_stock_symbols(&text, rules);
                StockExtraction {
                    symbols: matched.symbols,
                    source: ExtractionSource::Ocr,
                    additional: matched.additional,
                    missing: matched.missing,
                }
            }
            Err(e) => {
                tracing::warn!("OCR extraction failed: {}", e);
                tracing::warn!("Tesseract OCR might not be installed. {}", e.recovery_suggestion());
                tracing::info!(
                    "Please manually check the screenshot for stock symbols: {}",
                    image_path.display()
                );
                tracing::info!("Using sample stock data: {:?}", rules.sample_fallback);

                StockExtraction {
                    symbols: rules.sample_fallback.clone(),
                    source: ExtractionSource::SampleFallback,
                    additional: Vec::new(),
                    missing: Vec::new(),
                }
            }
        }
    }

    pub async fn save_stocks_to_file(&self, stocks: &[String], filename: &str) -> Result<String> {
        let body = render_stock_list(stocks);
        self.storage.write_file(filename, body.as_bytes()).await?;

        let output_path = format!("{}/{}", self.config.output_path(), filename);
        tracing::info!("Stocks saved to: {}", output_path);
        Ok(output_path)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StockPipeline<S, C> {
    async fn extract(&self) -> Result<CapturedScreenshot> {
        if let Some(existing) = self.config.existing_image() {
            tracing::info!("Using existing screenshot: {}", existing.display());
            return Ok(CapturedScreenshot {
                path: PathBuf::from(existing),
                dimensions: image::image_dimensions(existing).ok(),
                captured_at: None,
            });
        }

        tracing::info!("Target URL: {}", self.config.target_url());
        let screenshot = self
            .capture_screenshot(self.config.target_url(), self.config.screenshot_name())
            .await?;

        // 等待檔案寫入完成
        tokio::time::sleep(self.config.settle_delay()).await;
        Ok(screenshot)
    }

    async fn transform(&self, screenshot: CapturedScreenshot) -> Result<StockExtraction> {
        Ok(self.extract_stocks_from_image(&screenshot.path).await)
    }

    async fn load(&self, extraction: &StockExtraction) -> Result<String> {
        self.save_stocks_to_file(&extraction.symbols, self.config.results_filename())
            .await
    }
}
