//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 批量分析目录中的轮廓文件（或单个文件），输出 CSV、图表和统计
//! - `inspect`: 详细查看单个轮廓的极值、指标和宽度匹配点
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze, inspect

pub mod analyze;
pub mod inspect;

use clap::{Parser, Subcommand};

/// Profilyzer - AFM 线轮廓分析工具
#[derive(Parser)]
#[command(name = "profilyzer")]
#[command(version)]
#[command(
    about = "AFM line-profile analysis: amplitudes, spline width and batch statistics",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze Gwyddion profile exports and write a CSV summary with annotated plots
    Analyze(analyze::AnalyzeArgs),

    /// Show extrema, metrics and width construction for a single profile
    Inspect(inspect::InspectArgs),
}
