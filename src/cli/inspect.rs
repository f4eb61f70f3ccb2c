//! # inspect 子命令 CLI 定义
//!
//! 详细查看单个轮廓的分析过程。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use super::analyze::{DecimalStyle, LengthUnit};
use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to a single profile file
    pub file: PathBuf,

    /// Output length unit (input is assumed to be in meters)
    #[arg(short, long, value_enum, default_value = "nm")]
    pub unit: LengthUnit,

    /// Decimal separator for printed values
    #[arg(short, long, value_enum, default_value = "dot")]
    pub decimal: DecimalStyle,

    /// Write an annotated plot to this path (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long, default_value_t = 1400)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 820)]
    pub height: u32,
}
