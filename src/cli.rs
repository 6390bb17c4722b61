//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::steganography::CapacityCheck;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// 按列优先顺序把文本写入图像 R、G、B 通道最低有效位的命令行工具。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "按列优先顺序 (先 X 后 Y) 把文本逐位写入无损格式图像 (如 PNG, BMP) 中 R、G、B 通道的最低有效位。图像中不保存消息长度，恢复时需要另行提供。"
)]
pub struct Cli {
    /// 输出更详细的日志，可重复使用 (-v, -vv, -vvv)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏文本。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复指定长度的文本。
    Recover(RecoverArgs),

    /// 显示图像最多能隐藏多少字节。
    Capacity(CapacityArgs),
}

/// 要隐藏的文本来源：文件或命令行字符串，二选一。
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct MessageSource {
    /// 要隐藏的文本内容的文件路径 (须为 UTF-8)。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 直接在命令行中给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub source: MessageSource,

    /// 保存结果图像的输出路径，默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 容量预检查使用的长度度量：字符数 (runes) 或字节数 (bytes)。
    #[arg(long, value_enum, default_value_t = CapacityCheck::Runes)]
    pub capacity_check: CapacityCheck,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏消息的字节数。图像中不包含该信息，必须由调用方提供。
    #[arg(short, long)]
    pub length: usize,

    /// 保存恢复文本的输出路径，默认为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要查询的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
