// Adapters layer: concrete implementations of the ports for the desktop (browser, input, screen) and the OCR engine.

pub mod browser;
pub mod input;
pub mod screen;
pub mod tesseract;

pub use browser::SystemBrowser;
pub use input::{EnigoDriver, ScrollPlan};
pub use screen::DesktopScreen;
pub use tesseract::TesseractOcr;
