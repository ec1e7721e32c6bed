use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use stock_snap::adapters::TesseractOcr;
use stock_snap::utils::logger;

#[derive(Parser)]
#[command(name = "check_tesseract")]
#[command(about = "Check whether the tesseract OCR engine is installed and runnable")]
struct Args {
    /// Explicit path to the tesseract executable
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn print_install_hints() {
    println!("Please install Tesseract OCR:");
    println!("  Windows: https://github.com/UB-Mannheim/tesseract/wiki");
    println!("  macOS:   brew install tesseract");
    println!("  Linux:   sudo apt install tesseract-ocr");
    println!("Then make sure it is on PATH or pass --tesseract <path>.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let ocr = TesseractOcr::discover(args.tesseract.as_deref());
    println!("Tesseract command: {}", ocr.command().display());

    let version = ocr
        .check_installation()
        .await
        .with_context(|| format!("running {} --version", ocr.command().display()));

    match version {
        Ok(version) => {
            println!("✅ Tesseract is installed. Version: {}", version);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Tesseract check failed: {:#}", e);
            eprintln!("❌ Tesseract is not installed or not runnable: {:#}", e);
            print_install_hints();
            std::process::exit(1);
        }
    }
}
