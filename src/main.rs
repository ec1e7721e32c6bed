use clap::Parser;
use stock_snap::utils::error::ErrorSeverity;
use stock_snap::utils::{logger, validation::Validate};
use stock_snap::{
    CliConfig, EtlEngine, ExtractionSource, LocalStorage, RunConfig, StockPipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("🚀 Starting stock-snap");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match RunConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StockPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            let extraction = &report.extraction;
            match report.captured_at {
                Some(at) => println!(
                    "📸 Screenshot: {} (captured {})",
                    report.screenshot.display(),
                    at.format("%Y-%m-%d %H:%M:%S")
                ),
                None => println!("📸 Screenshot: {}", report.screenshot.display()),
            }

            match extraction.source {
                ExtractionSource::SampleFallback => {
                    println!("⚠️  OCR was unavailable; showing the built-in sample list");
                }
                ExtractionSource::ImageUnavailable => {
                    println!("⚠️  The screenshot could not be read");
                }
                ExtractionSource::Ocr => {}
            }

            println!("Most Active Stocks:");
            for (i, symbol) in extraction.symbols.iter().enumerate() {
                println!("{}. ${}", i + 1, symbol);
            }
            if extraction.symbols.is_empty() {
                println!("No stocks found.");
            }

            match &report.output_path {
                Some(path) => {
                    tracing::info!("✅ Stock extraction completed successfully!");
                    println!("📁 Results saved to: {}", path);
                }
                None => println!("⚠️  Results were not saved"),
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Stock extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
