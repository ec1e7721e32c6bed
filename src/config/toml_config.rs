use crate::adapters::input::ScrollPlan;
use crate::config::RunConfig;
use crate::core::symbols::SymbolRules;
use crate::utils::error::{Result, SnapError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 所有區段皆可省略，省略時使用內建預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub symbols: SymbolRules,
    pub load: LoadConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub screenshot_name: Option<String>,
    pub load_delay_secs: Option<u64>,
    pub settle_delay_secs: Option<u64>,
    pub scroll: ScrollPlan,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub tesseract_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub results_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

lazy_static::lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SnapError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SnapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STOCK_SNAP_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }

    /// 以內建預設值為底，套用檔案中有設定的欄位
    pub fn into_run_config(self) -> RunConfig {
        let mut config = RunConfig::default();

        if let Some(url) = self.source.url {
            config.target_url = url;
        }
        if let Some(name) = self.capture.screenshot_name {
            config.screenshot_name = name;
        }
        if let Some(secs) = self.capture.load_delay_secs {
            config.load_delay = Duration::from_secs(secs);
        }
        if let Some(secs) = self.capture.settle_delay_secs {
            config.settle_delay = Duration::from_secs(secs);
        }
        if let Some(path) = self.load.output_path {
            config.output_path = path;
        }
        if let Some(file) = self.load.results_file {
            config.results_filename = file;
        }
        config.scroll_plan = self.capture.scroll;
        config.tesseract_path = self.ocr.tesseract_path;
        config.symbol_rules = self.symbols;
        config.monitor = self.monitoring.enabled;
        config
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_run_config().validate()
    }
}
