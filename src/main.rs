//! # Profilyzer - AFM 线轮廓分析工具
//!
//! 读取 Gwyddion 导出的 (x, z) 轮廓，计算振幅与样条宽度指标，
//! 输出 CSV、标注图和批量统计。
//!
//! ## 子命令
//! - `analyze` - 批量分析目录（或单个文件）
//! - `inspect` - 查看单个轮廓的详细分析过程
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (文件收集与并行执行)
//!   │     ├── parsers/   (轮廓文本解析)
//!   │     ├── analysis/  (极值、振幅、宽度、统计)
//!   │     ├── report/    (CSV 与图表)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;
use env_logger::Env;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
