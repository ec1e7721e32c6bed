use crate::utils::error::Result;
use chrono::{DateTime, TimeZone};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_EXTENSION: &str = "png";

/// `most_active_stocks.png` → `most_active_stocks_20250101_093000.png`
pub fn timestamped_filename<Tz>(filename: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("screenshot");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(DEFAULT_EXTENSION);

    format!("{}_{}.{}", stem, now.format(TIMESTAMP_FORMAT), ext)
}

/// 依副檔名編碼圖片，未知副檔名一律存成 PNG
pub fn encode_image(image: &DynamicImage, filename: &str) -> Result<Vec<u8>> {
    let format = ImageFormat::from_path(filename).unwrap_or(ImageFormat::Png);
    let mut buffer = Cursor::new(Vec::new());

    match format {
        // JPEG 不支援 alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut buffer, format)?,
        _ => image.write_to(&mut buffer, format)?,
    }

    Ok(buffer.into_inner())
}
