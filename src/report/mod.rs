//! # 报告输出模块
//!
//! 分析结果的三种输出形式：结果表、CSV 文件、图表。
//!
//! ## 子模块
//! - `table`: 整理分节结果表
//! - `export`: 写出 CSV
//! - `plot`: 轮廓标注图与指标直方图
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `analysis/`、`models/`、`utils/format.rs`

pub mod export;
pub mod plot;
pub mod table;

pub use export::write_results_csv;
pub use plot::{plot_histogram, plot_profile, safe_stem, PlotSettings};
pub use table::{build_results_table, ResultsTable};
