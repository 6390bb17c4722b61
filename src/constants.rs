/// 每个像素中用于隐写的颜色通道数量 (R, G, B)。
/// Alpha 通道永远不会被修改。
pub const CHANNELS_PER_PIXEL: u64 = 3;

/// 每个通道隐藏的位数。只改写最低有效位。
pub const BITS_PER_CHANNEL: u64 = 1;

/// 每个字节包含的位数。
pub const BITS_PER_BYTE: u64 = 8;

/// 提取比特时使用的掩码：位序号 0 对应字节的最高位。
pub const MSB_MASK: u8 = 0x80;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本的文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 默认的隐写结果图像扩展名 (无损格式)。
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// 默认的恢复文本扩展名。
pub const DEFAULT_TEXT_EXTENSION: &str = "txt";
