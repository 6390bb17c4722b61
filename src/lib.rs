//! # lsb_embed 库
//!
//! 本库包含列优先 LSB 隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod message;
pub mod steganography;
