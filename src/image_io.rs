//! # 图像读写模块
//!
//! 把任意格式的图像解码并统一为 8 位 RGBA 像素缓冲区，
//! 以及把结果写回无损格式的文件。有损格式会破坏最低有效位，因此一律拒绝。

use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::debug;
use std::path::Path;

/// 能够原样保存 8 位 RGBA 通道值的输出格式。
const LOSSLESS_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Qoi,
    ImageFormat::WebP,
];

/// 将已解码的图像转换为 RGBA 像素缓冲区。
pub fn to_rgba(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(buffer) => buffer,
        other => other.to_rgba8(),
    }
}

/// 读取图像文件并转换为 RGBA 像素缓冲区。
///
/// # Errors
///
/// 文件无法打开或格式无法识别、解码失败时返回错误。
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    debug!(
        "decoded {} as {:?}, {}x{}",
        path.display(),
        image.color(),
        image.width(),
        image.height()
    );

    Ok(to_rgba(image))
}

/// 以无损格式保存 RGBA 像素缓冲区，格式由扩展名决定。
///
/// # Errors
///
/// * 扩展名未知或对应有损格式。
/// * 写入目标文件失败。
pub fn save_lossless(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Unknown output image format: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_FORMATS.contains(&format),
        "Output format {:?} is lossy and would destroy the hidden bits: {}",
        format,
        path.to_string_lossy().red().bold()
    );

    image.save_with_format(path, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    debug!("wrote {} as {:?}", path.display(), format);

    Ok(())
}
