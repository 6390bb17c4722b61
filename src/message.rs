//! # 消息模块
//!
//! 待隐藏的文本。同时保留两种长度度量：UTF-8 字节数与字符 (rune) 数，
//! 多字节字符会让二者产生差异。

use crate::bitstream::BitStream;

#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    text: &'a str,
}

impl<'a> Message<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// UTF-8 编码后的字节数，即实际消耗的隐写空间。
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Unicode 字符数。
    pub fn rune_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 按高位在前的顺序读出消息的所有比特。
    pub fn bits(&self) -> BitStream<'a> {
        BitStream::new(self.text.as_bytes())
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}
