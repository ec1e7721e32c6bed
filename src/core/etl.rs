use crate::core::{Pipeline, RunReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting stock extraction process...");
        self.monitor.log_stats("Start");

        // Capture
        let screenshot = self.pipeline.extract().await?;
        match screenshot.captured_at {
            Some(at) => tracing::info!(
                "Screenshot ready: {} (captured {})",
                screenshot.path.display(),
                at.format("%Y-%m-%d %H:%M:%S")
            ),
            None => tracing::info!("Screenshot ready: {}", screenshot.path.display()),
        }
        self.monitor.log_stats("Capture");

        // OCR + symbol heuristics
        tracing::info!("Extracting stock symbols from screenshot...");
        let screenshot_path = screenshot.path.clone();
        let captured_at = screenshot.captured_at;
        let extraction = self.pipeline.transform(screenshot).await?;
        tracing::info!(
            "Found {} stock symbols ({:?})",
            extraction.symbols.len(),
            extraction.source
        );
        self.monitor.log_stats("Extraction");

        if extraction.symbols.is_empty() {
            tracing::warn!("No stock symbols found. You may need to:");
            tracing::warn!("1. Check if the page loaded correctly");
            tracing::warn!("2. Verify Tesseract is properly installed");
            tracing::warn!("3. Try adjusting the wait time for page loading");
        }

        // 寫檔失敗不視為整體失敗
        let output_path = match self.pipeline.load(&extraction).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("⚠️  Error saving stocks to file: {}", e);
                None
            }
        };
        self.monitor.log_stats("Save");
        self.monitor.log_final_stats();

        Ok(RunReport {
            screenshot: screenshot_path,
            captured_at,
            extraction,
            output_path,
        })
    }
}
