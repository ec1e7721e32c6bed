//! Full-screen capture via the xcap crate, input simulation via enigo.
//!
//! Every monitor is captured and composited side by side, so a "full screen"
//! shot on a multi-monitor desk contains the browser wherever it opened.

use crate::adapters::input::{run_input_script, EnigoDriver, ScrollPlan};
use crate::domain::ports::ScreenService;
use crate::utils::error::{Result, SnapError};
use image::{DynamicImage, ImageBuffer, Rgba};
use xcap::Monitor;

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopScreen;

impl DesktopScreen {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenService for DesktopScreen {
    fn run_input_script(&self, plan: &ScrollPlan) -> Result<()> {
        let mut driver = EnigoDriver::connect()?;
        run_input_script(&mut driver, plan, std::thread::sleep)
    }

    fn capture_screen(&self) -> Result<DynamicImage> {
        let capture_err = |e: xcap::XCapError| SnapError::capture(e.to_string());

        let monitors = Monitor::all().map_err(capture_err)?;
        if monitors.is_empty() {
            return Err(SnapError::capture("No monitors detected"));
        }

        let mut total_width: u32 = 0;
        let mut max_height: u32 = 0;
        for monitor in &monitors {
            total_width += monitor.width().map_err(capture_err)?;
            max_height = max_height.max(monitor.height().map_err(capture_err)?);
        }

        let mut composite = ImageBuffer::from_pixel(total_width, max_height, Rgba([0, 0, 0, 255]));

        let mut x_offset = 0u32;
        for monitor in monitors {
            let screenshot = monitor.capture_image().map_err(capture_err)?;
            image::imageops::overlay(&mut composite, &screenshot, x_offset as i64, 0);
            x_offset += screenshot.width();
        }

        tracing::debug!("Captured {}x{} composite image", total_width, max_height);
        Ok(DynamicImage::ImageRgba8(composite))
    }
}
