//! # 统一错误处理模块
//!
//! 定义 Profilyzer 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - 单文件错误（数据不足、数据非法）：在批处理循环边界转换为 `ProfileOutcome::Failed`
//! - 命令级错误（I/O、CSV、绘图）：由 `main.rs` 打印并以退出码 1 结束
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 一个轮廓至少需要的采样点数
pub const MIN_PROFILE_SAMPLES: usize = 3;

/// Profilyzer 统一错误类型
#[derive(Error, Debug)]
pub enum ProfilyzerError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据错误（单文件级别，可恢复）
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Not enough numeric data lines found ({found} valid (x, z) pairs, need at least {})",
        MIN_PROFILE_SAMPLES
    )]
    InsufficientData { found: usize },

    #[error("Invalid profile data: {0}")]
    InvalidData(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ProfilyzerError>;
