//! # 容量估算模块
//!
//! 根据图像尺寸计算在 "每像素 3 个通道、每通道 1 位" 的方案下可以隐藏的数据量。

use crate::constants::{BITS_PER_BYTE, BITS_PER_CHANNEL, CHANNELS_PER_PIXEL};

/// 图像中可用于隐写的比特总数 (`width * height * 3`)。
pub fn capacity_bits(width: u32, height: u32) -> u128 {
    u128::from(width)
        * u128::from(height)
        * u128::from(CHANNELS_PER_PIXEL * BITS_PER_CHANNEL)
}

/// 计算图像最多能容纳多少个完整字节，即 `floor(width * height * 3 / 8)`。
///
/// 宽或高为 0 时返回 0。
pub fn max_encode_size(width: u32, height: u32) -> usize {
    let bytes = capacity_bits(width, height) / u128::from(BITS_PER_BYTE);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

/// 隐藏 `byte_len` 个字节时会被访问到的像素数量，即 `ceil(byte_len * 8 / 3)`。
pub fn pixels_touched(byte_len: usize) -> u64 {
    let bits = byte_len as u64 * BITS_PER_BYTE;
    bits.div_ceil(CHANNELS_PER_PIXEL * BITS_PER_CHANNEL)
}
