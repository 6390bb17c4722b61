//! # 隐写核心模块
//!
//! 按列优先顺序 (外层 X，内层 Y) 遍历像素，把消息的每一位依次写入
//! R、G、B 通道的最低有效位。Alpha 通道不参与隐写。
//!
//! 图像中不写入长度头、终止符或校验和，提取时必须通过其他途径得知消息字节数。

use crate::capacity::max_encode_size;
use crate::constants::BITS_PER_BYTE;
use crate::error::{MeasureUnit, StegoError};
use crate::message::Message;
use clap::ValueEnum;
use image::{Rgba, RgbaImage};
use log::{debug, trace, warn};

/// 参与隐写的通道数 (R, G, B)。
const RGB: usize = 3;

/// 容量预检查所使用的消息长度度量。
///
/// `Runes` 以字符数与字节容量比较，对多字节字符偏宽松；
/// `Bytes` 以 UTF-8 字节数比较，与实际消耗的比特数一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CapacityCheck {
    #[default]
    Runes,
    Bytes,
}

impl CapacityCheck {
    fn measure(self, message: &Message<'_>) -> (usize, MeasureUnit) {
        match self {
            CapacityCheck::Runes => (message.rune_count(), MeasureUnit::Runes),
            CapacityCheck::Bytes => (message.byte_len(), MeasureUnit::Bytes),
        }
    }
}

/// 将通道的最低有效位设为 `bit`，高 7 位保持不变。
pub fn set_lsb(channel: &mut u8, bit: u8) {
    if bit == 1 {
        *channel |= 0x01;
    } else {
        *channel &= 0xFE;
    }
}

pub fn get_lsb(channel: u8) -> u8 {
    channel & 0x01
}

/// 把 `message` 隐藏到 `image` 中。
///
/// 预检查失败时返回 [`StegoError::CapacityExceeded`]，图像保持原样。
/// 否则逐位写入，比特流一旦耗尽立即结束整次遍历：当前像素中尚未轮到的通道
/// 以及之后的所有像素都不会被改动。
///
/// # Errors
///
/// * 按 `check` 度量的消息长度超过 [`max_encode_size`]。
pub fn embed(image: &mut RgbaImage, message: &str, check: CapacityCheck) -> Result<(), StegoError> {
    let message = Message::new(message);
    let (width, height) = image.dimensions();
    let available = max_encode_size(width, height);

    let (required, unit) = check.measure(&message);
    if required > available {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
            unit,
        });
    }

    if message.byte_len() > available {
        warn!(
            "message is {} bytes but the image holds {} bytes; it will be truncated",
            message.byte_len(),
            available
        );
    }

    debug!(
        "embedding {} bytes ({} characters) into {}x{} image",
        message.byte_len(),
        message.rune_count(),
        width,
        height
    );

    let mut bits = message.bits();

    for x in 0..width {
        for y in 0..height {
            let pixel = image.get_pixel_mut(x, y);
            for channel in pixel.0[..RGB].iter_mut() {
                let Some(bit) = bits.next_bit() else {
                    debug!(
                        "bit stream exhausted at pixel ({}, {}) after {} bits",
                        x,
                        y,
                        bits.bits_consumed()
                    );
                    return Ok(());
                };
                set_lsb(channel, bit);
            }
            trace!("pixel ({}, {}) -> {:?}", x, y, pixel.0);
        }
    }

    if !bits.is_exhausted() {
        debug!(
            "image ended with {} message bits left unwritten",
            bits.bits_remaining()
        );
    }

    Ok(())
}

/// 按隐写时的列优先顺序遍历像素。
pub fn column_major(image: &RgbaImage) -> impl Iterator<Item = &Rgba<u8>> + '_ {
    let (width, height) = image.dimensions();
    (0..width).flat_map(move |x| (0..height).map(move |y| image.get_pixel(x, y)))
}

/// 从 `image` 中读出 `byte_len` 个字节。
///
/// 读取顺序与 [`embed`] 相同，比特按高位在前拼装成字节。
///
/// # Errors
///
/// * `byte_len` 超过图像容量。
pub fn extract(image: &RgbaImage, byte_len: usize) -> Result<Vec<u8>, StegoError> {
    let (width, height) = image.dimensions();
    let available = max_encode_size(width, height);

    if byte_len > available {
        return Err(StegoError::LengthExceedsCapacity {
            requested: byte_len,
            available,
        });
    }

    let bits: Vec<u8> = column_major(image)
        .flat_map(|pixel| pixel.0.into_iter().take(RGB))
        .map(get_lsb)
        .take(byte_len * BITS_PER_BYTE as usize)
        .collect();

    let bytes: Vec<u8> = bits
        .chunks_exact(BITS_PER_BYTE as usize)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect();

    debug!("extracted {} bytes from {}x{} image", bytes.len(), width, height);

    Ok(bytes)
}
