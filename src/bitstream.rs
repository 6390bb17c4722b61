//! # 比特流模块
//!
//! 将字节序列按 "字节优先、高位在前" 的顺序逐位读出。
//! 每次隐写操作持有自己的 [`BitStream`]，不存在进程级的共享游标。

use crate::constants::{BITS_PER_BYTE, MSB_MASK};

/// 比特流中下一位的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitCursor {
    /// 当前字节的下标。
    pub byte_index: usize,
    /// 当前字节内的位序号 (0..8)，0 表示最高位。
    pub bit_index: u8,
}

/// 返回 `byte` 中第 `index` 位的值，位序号 0 对应最高位。
pub fn bit_from_byte(byte: u8, index: u8) -> u8 {
    if (byte << index) & MSB_MASK == MSB_MASK { 1 } else { 0 }
}

/// 对一段字节进行逐位读取的有状态游标。
#[derive(Debug, Clone)]
pub struct BitStream<'a> {
    bytes: &'a [u8],
    cursor: BitCursor,
}

impl<'a> BitStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            cursor: BitCursor::default(),
        }
    }

    /// 读出下一位。
    ///
    /// 流耗尽时返回 `None`，游标保持不变；之后的每次调用也都返回 `None`。
    pub fn next_bit(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.cursor.byte_index)?;
        let bit = bit_from_byte(byte, self.cursor.bit_index);

        self.cursor.bit_index += 1;
        if u64::from(self.cursor.bit_index) >= BITS_PER_BYTE {
            self.cursor.bit_index = 0;
            self.cursor.byte_index += 1;
        }

        Some(bit)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.byte_index >= self.bytes.len()
    }

    pub fn position(&self) -> BitCursor {
        self.cursor
    }

    /// 已经读出的比特数。
    pub fn bits_consumed(&self) -> u64 {
        self.cursor.byte_index as u64 * BITS_PER_BYTE + u64::from(self.cursor.bit_index)
    }

    /// 剩余尚未读出的比特数。
    pub fn bits_remaining(&self) -> u64 {
        self.bytes.len() as u64 * BITS_PER_BYTE - self.bits_consumed()
    }
}

impl Iterator for BitStream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.next_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.bits_remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
