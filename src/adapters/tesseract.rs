use crate::domain::ports::OcrEngine;
use crate::utils::error::{Result, SnapError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_COMMAND: &str = "tesseract";
pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);
pub const RECOGNIZE_TIMEOUT: Duration = Duration::from_secs(120);

/// 常見的 Tesseract 安裝路徑
pub fn known_install_paths(username: Option<&str>) -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe"),
    ];
    if let Some(user) = username.filter(|u| !u.is_empty()) {
        paths.push(PathBuf::from(format!(
            r"C:\Users\{}\AppData\Local\Tesseract-OCR\tesseract.exe",
            user
        )));
    }
    paths.extend(
        ["/usr/bin/tesseract", "/usr/local/bin/tesseract", "/opt/homebrew/bin/tesseract"]
            .iter()
            .map(PathBuf::from),
    );
    paths
}

/// Resolve the binary: an explicit path wins, then the first known install
/// location that exists, then the bare command name looked up on `PATH`.
pub fn locate_tesseract<F>(explicit: Option<&Path>, candidates: &[PathBuf], exists: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    match candidates.iter().find(|candidate| exists(candidate.as_path())) {
        Some(found) => {
            tracing::info!("Found Tesseract at: {}", found.display());
            found.clone()
        }
        None => PathBuf::from(DEFAULT_COMMAND),
    }
}

/// `tesseract 5.3.0` → `5.3.0`
pub fn parse_version(output: &str) -> Option<String> {
    output
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: PathBuf,
    timeout: Duration,
}

impl TesseractOcr {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            timeout: RECOGNIZE_TIMEOUT,
        }
    }

    pub fn discover(explicit: Option<&Path>) -> Self {
        let username = std::env::var("USERNAME").ok();
        let candidates = known_install_paths(username.as_deref());
        Self::new(locate_tesseract(explicit, &candidates, Path::exists))
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    /// 執行 `tesseract --version`，回傳版本字串
    pub async fn check_installation(&self) -> Result<String> {
        let output = tokio::time::timeout(
            VERSION_CHECK_TIMEOUT,
            Command::new(&self.command).arg("--version").output(),
        )
        .await
        .map_err(|_| SnapError::ocr("tesseract --version timed out"))?
        .map_err(|e| SnapError::ocr(format!("{}: {}", self.command.display(), e)))?;

        if !output.status.success() {
            return Err(SnapError::ocr(format!(
                "tesseract --version exited with {:?}",
                output.status.code()
            )));
        }

        // 舊版 tesseract 把版本資訊印到 stderr
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(parse_version(&stdout)
            .or_else(|| parse_version(&stderr))
            .unwrap_or_else(|| "Unknown".to_string()))
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn image_to_text(&self, image_path: &Path) -> Result<String> {
        tracing::debug!(
            "Running {} on {}",
            self.command.display(),
            image_path.display()
        );

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.command)
                .arg(image_path)
                .arg("stdout")
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| SnapError::ocr(format!("tesseract timed out after {:?}", self.timeout)))?
        .map_err(|e| SnapError::ocr(format!("{}: {}", self.command.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapError::ocr(format!(
                "tesseract failed (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
