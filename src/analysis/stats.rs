//! # 批量统计
//!
//! 对一批文件的每个指标计算均值、样本标准差和有效样本数。
//! 非有限值（失败文件的 NaN 占位）不参与统计。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `models/` 的 Metric, MetricSet, SummaryStatistic

use crate::models::{Metric, MetricSet, SummaryStatistic};

/// 计算一组数值的汇总统计
///
/// - 没有有限值：(NaN, NaN, 0)
/// - 只有一个：(该值, 0, 1)
/// - 否则：(均值, N-1 样本标准差, N)
pub fn summarize(values: &[f64]) -> SummaryStatistic {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();

    match n {
        0 => SummaryStatistic {
            mean: f64::NAN,
            std_dev: f64::NAN,
            count: 0,
        },
        1 => SummaryStatistic {
            mean: finite[0],
            std_dev: 0.0,
            count: 1,
        },
        _ => {
            let mean = finite.iter().sum::<f64>() / n as f64;
            let variance =
                finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            SummaryStatistic {
                mean,
                std_dev: variance.sqrt(),
                count: n,
            }
        }
    }
}

/// 批量汇总：每个指标一项，顺序与 `Metric::ALL` 一致
#[derive(Debug, Clone)]
pub struct BatchSummary {
    entries: Vec<(Metric, SummaryStatistic)>,
}

impl BatchSummary {
    pub fn entries(&self) -> &[(Metric, SummaryStatistic)] {
        &self.entries
    }

    pub fn get(&self, metric: Metric) -> Option<&SummaryStatistic> {
        self.entries
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, s)| s)
    }
}

/// 对每个指标独立汇总
pub fn summarize_batch<'a, I>(metric_sets: I) -> BatchSummary
where
    I: IntoIterator<Item = &'a MetricSet>,
{
    let sets: Vec<&MetricSet> = metric_sets.into_iter().collect();

    let entries = Metric::ALL
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = sets.iter().map(|m| m.get(metric)).collect();
            (metric, summarize(&values))
        })
        .collect();

    BatchSummary { entries }
}
