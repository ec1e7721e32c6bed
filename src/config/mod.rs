pub mod cli;
pub mod toml_config;

use crate::adapters::input::ScrollPlan;
use crate::core::symbols::SymbolRules;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_list, validate_path, validate_range,
    validate_symbols, validate_url, Validate,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_URL: &str = "https://stocktwits.com/sentiment/most-active";
pub const DEFAULT_OUTPUT_PATH: &str = "output";
pub const DEFAULT_SCREENSHOT_NAME: &str = "most_active_stocks.png";
pub const DEFAULT_RESULTS_FILE: &str = "most_active_stocks.txt";
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];
const MAX_DELAY_SECS: u64 = 300;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "stock-snap")]
#[command(about = "Capture a stock listing page and extract ticker symbols with OCR")]
pub struct CliConfig {
    /// Page to capture
    #[arg(long)]
    pub url: Option<String>,

    /// Directory for screenshots and the results file
    #[arg(long)]
    pub output_path: Option<String>,

    /// Screenshot file name; a timestamp is appended to the stem
    #[arg(long)]
    pub screenshot_name: Option<String>,

    /// Results file name inside the output directory
    #[arg(long)]
    pub results_file: Option<String>,

    /// Skip the browser capture and read this screenshot instead
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Path to the tesseract executable
    #[arg(long)]
    pub tesseract: Option<PathBuf>,

    /// Seconds to wait for the page to load before scrolling
    #[arg(long)]
    pub load_delay_secs: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

/// 合併 TOML 檔與命令列參數後的最終設定
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub target_url: String,
    pub output_path: String,
    pub screenshot_name: String,
    pub results_filename: String,
    pub existing_image: Option<PathBuf>,
    pub tesseract_path: Option<PathBuf>,
    pub load_delay: Duration,
    pub settle_delay: Duration,
    pub scroll_plan: ScrollPlan,
    pub symbol_rules: SymbolRules,
    pub monitor: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            screenshot_name: DEFAULT_SCREENSHOT_NAME.to_string(),
            results_filename: DEFAULT_RESULTS_FILE.to_string(),
            existing_image: None,
            tesseract_path: None,
            load_delay: Duration::from_secs(5),
            settle_delay: Duration::from_secs(2),
            scroll_plan: ScrollPlan::default(),
            symbol_rules: SymbolRules::default(),
            monitor: false,
        }
    }
}

impl RunConfig {
    /// 命令列參數優先於 TOML 設定
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.into_run_config()
            }
            None => RunConfig::default(),
        };

        if let Some(url) = &cli.url {
            config.target_url = url.clone();
        }
        if let Some(path) = &cli.output_path {
            config.output_path = path.clone();
        }
        if let Some(name) = &cli.screenshot_name {
            config.screenshot_name = name.clone();
        }
        if let Some(file) = &cli.results_file {
            config.results_filename = file.clone();
        }
        if let Some(image) = &cli.image {
            config.existing_image = Some(image.clone());
        }
        if let Some(tesseract) = &cli.tesseract {
            config.tesseract_path = Some(tesseract.clone());
        }
        if let Some(secs) = cli.load_delay_secs {
            config.load_delay = Duration::from_secs(secs);
        }
        config.monitor |= cli.monitor;

        Ok(config)
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.target_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_path("results_file", &self.results_filename)?;
        validate_file_extension("screenshot_name", &self.screenshot_name, &IMAGE_EXTENSIONS)?;
        if let Some(image) = &self.existing_image {
            validate_path("image", &image.to_string_lossy())?;
        }
        validate_range("load_delay_secs", self.load_delay.as_secs(), 0, MAX_DELAY_SECS)?;
        validate_range("settle_delay_secs", self.settle_delay.as_secs(), 0, MAX_DELAY_SECS)?;

        validate_non_empty_list("symbols.targets", &self.symbol_rules.targets)?;
        validate_symbols("symbols.targets", &self.symbol_rules.targets)?;
        validate_symbols("symbols.sample_fallback", &self.symbol_rules.sample_fallback)?;
        Ok(())
    }
}

impl ConfigProvider for RunConfig {
    fn target_url(&self) -> &str {
        &self.target_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn screenshot_name(&self) -> &str {
        &self.screenshot_name
    }

    fn results_filename(&self) -> &str {
        &self.results_filename
    }

    fn existing_image(&self) -> Option<&Path> {
        self.existing_image.as_deref()
    }

    fn tesseract_path(&self) -> Option<&Path> {
        self.tesseract_path.as_deref()
    }

    fn load_delay(&self) -> Duration {
        self.load_delay
    }

    fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    fn scroll_plan(&self) -> &ScrollPlan {
        &self.scroll_plan
    }

    fn symbol_rules(&self) -> &SymbolRules {
        &self.symbol_rules
    }
}
