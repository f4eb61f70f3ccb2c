//! # analyze 子命令 CLI 定义
//!
//! 批量分析 Gwyddion 导出的轮廓文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze.rs`

use crate::utils::format::NumberFormat;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 共享选项
// ─────────────────────────────────────────────────────────────

/// 小数分隔符预设
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum DecimalStyle {
    /// USA/Canada: 3.14, CSV fields separated by ','
    #[default]
    Dot,
    /// European: 3,14, CSV fields separated by ';'
    Comma,
}

impl DecimalStyle {
    pub fn number_format(&self) -> NumberFormat {
        match self {
            DecimalStyle::Dot => NumberFormat::dot(),
            DecimalStyle::Comma => NumberFormat::comma(),
        }
    }
}

impl std::fmt::Display for DecimalStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecimalStyle::Dot => write!(f, "dot"),
            DecimalStyle::Comma => write!(f, "comma"),
        }
    }
}

/// 输出长度单位（输入数据按 SI 米处理）
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Nanometers (input scaled by 1e9)
    #[default]
    Nm,
    /// Meters (input unchanged)
    M,
}

impl LengthUnit {
    /// 米到输出单位的换算因子
    pub fn scale(&self) -> f64 {
        match self {
            LengthUnit::Nm => 1e9,
            LengthUnit::M => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Nm => "nm",
            LengthUnit::M => "m",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ─────────────────────────────────────────────────────────────
// analyze 参数
// ─────────────────────────────────────────────────────────────

/// analyze 子命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input: directory containing profile .txt files, or a single profile file
    pub input: PathBuf,

    /// Glob pattern(s) for profile files, comma separated
    #[arg(long, default_value = "*.txt")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Decimal separator for CSV and labels (also selects the CSV field delimiter)
    #[arg(short, long, value_enum, default_value = "dot")]
    pub decimal: DecimalStyle,

    /// Output length unit (input is assumed to be in meters)
    #[arg(short, long, value_enum, default_value = "nm")]
    pub unit: LengthUnit,

    /// Results CSV path (default: <input dir>/afm_analysis_results.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for per-profile plots (default: <input dir>/plots)
    #[arg(long)]
    pub plots_dir: Option<PathBuf>,

    /// Skip per-profile plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Write plots as SVG instead of PNG
    #[arg(long, default_value_t = false)]
    pub svg: bool,

    /// Also write a distribution histogram for every metric
    #[arg(long, default_value_t = false)]
    pub histograms: bool,

    /// Figure width in pixels
    #[arg(long, default_value_t = 1400)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 820)]
    pub height: u32,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
