use std::fmt;
use thiserror::Error;

/// 容量预检查时使用的度量单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureUnit {
    Runes,
    Bytes,
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureUnit::Runes => f.write_str("characters"),
            MeasureUnit::Bytes => f.write_str("bytes"),
        }
    }
}

/// 隐写核心可能返回的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegoError {
    /// 消息长度超过图像容量，图像未被修改。
    #[error("message of {required} {unit} exceeds image capacity of {available} bytes")]
    CapacityExceeded {
        required: usize,
        available: usize,
        unit: MeasureUnit,
    },

    /// 请求提取的字节数超过图像容量。
    #[error("cannot extract {requested} bytes from an image holding at most {available} bytes")]
    LengthExceedsCapacity { requested: usize, available: usize },
}
