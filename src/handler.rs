//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::{max_encode_size, pixels_touched};
use crate::cli::{CapacityArgs, HideArgs, MessageSource, RecoverArgs};
use crate::constants::{
    DEFAULT_IMAGE_EXTENSION, DEFAULT_TEXT_EXTENSION, DOCTORED_PREFIX, RECOVERED_PREFIX,
};
use crate::error::StegoError;
use crate::image_io::{load_rgba, save_lossless};
use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 在 `source` 所在目录下生成 `<prefix><文件名主干>.<extension>` 形式的路径。
fn sibling_path(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 确认输出路径可写：文件已存在且未指定 `--force` 时报错。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn read_message(source: &MessageSource) -> Result<String> {
    match (&source.text, &source.message) {
        (Some(path), _) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        }),
        (None, Some(message)) => Ok(message.clone()),
        (None, None) => anyhow::bail!("Either --text or --message must be given."),
    }
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取图像和文本、把图像统一为 RGBA 缓冲区、按列优先顺序隐藏文本，
/// 最后以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和容量检查方式的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件。
/// * 图像没有足够的空间来隐藏文本。
/// * 输出格式不是无损格式，或无法写入目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args.dest.clone().unwrap_or_else(|| {
        sibling_path(&args.image, DOCTORED_PREFIX, DEFAULT_IMAGE_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let mut picture = load_rgba(&args.image)?;
    let message = read_message(&args.source)?;

    embed(&mut picture, &message, args.capacity_check).map_err(|err| match err {
        StegoError::CapacityExceeded {
            required,
            available,
            unit,
        } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {} {}, Available: {} bytes",
            required.to_string().red().bold(),
            unit,
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other),
    })?;

    info!(
        "{} bytes written across {} pixels",
        message.len(),
        pixels_touched(message.len())
    );

    save_lossless(&picture, &dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 读取经过隐写的图像，按给定的字节数提取隐藏内容并写入目标文本文件。
/// 提取出的字节按原样保存，不做 UTF-8 校验。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 请求的长度超过图像容量。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args.text.clone().unwrap_or_else(|| {
        sibling_path(&args.image, RECOVERED_PREFIX, DEFAULT_TEXT_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let picture = load_rgba(&args.image)?;

    let text = extract(&picture, args.length).with_context(|| {
        format!(
            "Failed to recover {} bytes from '{}'.",
            args.length.to_string().red().bold(),
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Capacity' 命令：输出图像能容纳的最大字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_rgba(&args.image)?;
    let (width, height) = picture.dimensions();

    println!(
        "{} ({}x{}) can hold {} bytes",
        args.image.to_string_lossy().bold(),
        width,
        height,
        max_encode_size(width, height).to_string().green().bold()
    );

    Ok(())
}
