use crate::domain::ports::BrowserLauncher;
use crate::utils::error::{Result, SnapError};

/// 使用系統預設瀏覽器開啟網址
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open_url(&self, url: &str) -> Result<()> {
        tracing::info!("Opening URL: {}", url);
        webbrowser::open(url).map_err(|e| SnapError::BrowserError {
            message: format!("{}: {}", url, e),
        })
    }
}
