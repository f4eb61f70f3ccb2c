//! # 数据模型模块
//!
//! 定义轮廓采样、极值索引、单文件指标与批量统计的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`analysis/`、`report/` 和 `commands/` 使用
//! - 子模块: profile, metrics

pub mod metrics;
pub mod profile;

pub use metrics::{ExtremaIndices, Metric, MetricSet, SummaryStatistic};
pub use profile::Profile;
