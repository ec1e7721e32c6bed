use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Browser launch failed: {message}")]
    BrowserError { message: String },

    #[error("Input simulation failed: {message}")]
    InputError { message: String },

    #[error("Screen capture failed: {message}")]
    CaptureError { message: String },

    #[error("OCR failed: {message}")]
    OcrError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Desktop,
    Ocr,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SnapError {
    pub fn input(message: impl Into<String>) -> Self {
        SnapError::InputError {
            message: message.into(),
        }
    }

    pub fn capture(message: impl Into<String>) -> Self {
        SnapError::CaptureError {
            message: message.into(),
        }
    }

    pub fn ocr(message: impl Into<String>) -> Self {
        SnapError::OcrError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SnapError::IoError(_) => ErrorCategory::Io,
            SnapError::ImageError(_) | SnapError::CaptureError { .. } => ErrorCategory::Desktop,
            SnapError::BrowserError { .. } | SnapError::InputError { .. } => {
                ErrorCategory::Desktop
            }
            SnapError::OcrError { .. } => ErrorCategory::Ocr,
            SnapError::ConfigError { .. }
            | SnapError::ConfigValidationError { .. }
            | SnapError::InvalidConfigValueError { .. }
            | SnapError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 瀏覽器、輸入模擬與 OCR 錯誤可以復原，截圖失敗則終止整個流程
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SnapError::BrowserError { .. } | SnapError::InputError { .. } => ErrorSeverity::Low,
            SnapError::OcrError { .. } => ErrorSeverity::Medium,
            SnapError::IoError(_) => ErrorSeverity::High,
            SnapError::ImageError(_) | SnapError::CaptureError { .. } => ErrorSeverity::Critical,
            SnapError::ConfigError { .. }
            | SnapError::ConfigValidationError { .. }
            | SnapError::InvalidConfigValueError { .. }
            | SnapError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SnapError::IoError(_) => "Check that the output directory is writable",
            SnapError::ImageError(_) => "Make sure the screenshot is a valid PNG/JPEG file",
            SnapError::BrowserError { .. } => "Check that a default web browser is configured",
            SnapError::InputError { .. } => {
                "Keep the browser window in the foreground while the capture runs"
            }
            SnapError::CaptureError { .. } => {
                "Check screen recording permissions and that a display is attached"
            }
            SnapError::OcrError { .. } => {
                "Install Tesseract OCR or pass its location with --tesseract"
            }
            SnapError::ConfigError { .. }
            | SnapError::ConfigValidationError { .. }
            | SnapError::InvalidConfigValueError { .. }
            | SnapError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SnapError::CaptureError { .. } | SnapError::ImageError(_) => {
                format!("Failed to capture screenshot: {}", self)
            }
            SnapError::BrowserError { .. } => format!("Could not open the browser: {}", self),
            SnapError::OcrError { .. } => format!("Text recognition failed: {}", self),
            SnapError::IoError(e) => format!("File operation failed: {}", e),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_errors_are_fatal() {
        let err = SnapError::capture("no monitors detected");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Desktop);
        assert!(err.user_friendly_message().contains("no monitors detected"));
    }

    #[test]
    fn test_input_and_ocr_errors_are_recoverable() {
        let browser = SnapError::BrowserError {
            message: "no default browser".to_string(),
        };
        assert_eq!(browser.severity(), ErrorSeverity::Low);
        assert!(SnapError::input("focus lost").severity() < ErrorSeverity::High);
        assert!(SnapError::ocr("tesseract not found").severity() < ErrorSeverity::High);
        assert_eq!(SnapError::ocr("x").category(), ErrorCategory::Ocr);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: SnapError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().contains("read-only"));
    }
}
