//! # 结果表格整理
//!
//! 把单文件指标与批量统计整理成按行组织的表格，供 CSV 写出使用。
//!
//! ## 表格结构
//! ```text
//! === PER-FILE RESULTS (values in nm) ===
//! Filename, V_Amplitude, V_Left, V_Right, V_High, V_Low, H_Amplitude, Width
//! a.txt, ...
//! (空行)
//! === SUMMARY STATISTICS ===
//! Metric, Mean, SD, N
//! V_Amplitude, ...
//! ```
//!
//! ## 依赖关系
//! - 被 `report/export.rs`、`commands/analyze.rs` 使用
//! - 使用 `analysis/stats.rs` 的 BatchSummary
//! - 使用 `utils/format.rs` 格式化数字

use crate::analysis::BatchSummary;
use crate::models::{Metric, MetricSet};
use crate::utils::format::{NumberFormat, CSV_PRECISION};

/// 按行组织的结果表（空行表示分节）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    pub rows: Vec<Vec<String>>,
}

impl ResultsTable {
    fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }
}

/// 整理单文件结果与汇总统计
///
/// `per_file` 中的指标应已换算到 `unit` 对应的单位。
pub fn build_results_table(
    per_file: &[(String, MetricSet)],
    summary: &BatchSummary,
    unit: &str,
    fmt: &NumberFormat,
) -> ResultsTable {
    let mut table = ResultsTable::default();

    table.push([format!("=== PER-FILE RESULTS (values in {}) ===", unit)]);
    table.push(std::iter::once("Filename").chain(Metric::ALL.iter().map(|m| m.label())));

    for (name, metrics) in per_file {
        let mut row = vec![name.clone()];
        row.extend(
            Metric::ALL
                .iter()
                .map(|m| fmt.format(metrics.get(*m), CSV_PRECISION)),
        );
        table.rows.push(row);
    }

    table.rows.push(Vec::new());
    table.push(["=== SUMMARY STATISTICS ==="]);
    table.push(["Metric", "Mean", "SD", "N"]);

    for (metric, stat) in summary.entries() {
        table.push([
            metric.label().to_string(),
            fmt.format(stat.mean, CSV_PRECISION),
            fmt.format(stat.std_dev, CSV_PRECISION),
            stat.count.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize_batch;

    fn sample_metrics() -> MetricSet {
        MetricSet {
            vertical_amplitude: 6.0,
            vertical_amplitude_left: 5.0,
            vertical_amplitude_right: 6.0,
            vertical_amplitude_high: 6.0,
            vertical_amplitude_low: 5.0,
            horizontal_amplitude: 4.0,
            width: 3.25,
        }
    }

    #[test]
    fn test_table_layout() {
        let per_file = vec![
            ("a.txt".to_string(), sample_metrics()),
            ("b.txt".to_string(), MetricSet::nan()),
        ];
        let summary = summarize_batch(per_file.iter().map(|(_, m)| m));
        let table = build_results_table(&per_file, &summary, "nm", &NumberFormat::dot());

        // 2 标题 + 2 文件 + 空行 + 2 标题 + 7 指标
        assert_eq!(table.rows.len(), 2 + 2 + 1 + 2 + Metric::ALL.len());
        assert_eq!(table.rows[0], vec!["=== PER-FILE RESULTS (values in nm) ==="]);
        assert_eq!(table.rows[1][0], "Filename");
        assert_eq!(table.rows[1][7], "Width");
        assert_eq!(
            table.rows[2],
            vec!["a.txt", "6", "5", "6", "6", "5", "4", "3.25"]
        );
        assert_eq!(table.rows[3][0], "b.txt");
        assert!(table.rows[3][1..].iter().all(|v| v == "NaN"));
        assert!(table.rows[4].is_empty());
        assert_eq!(table.rows[5], vec!["=== SUMMARY STATISTICS ==="]);
        assert_eq!(table.rows[6], vec!["Metric", "Mean", "SD", "N"]);
        assert_eq!(table.rows[13], vec!["Width", "3.25", "0", "1"]);
    }

    #[test]
    fn test_table_comma_decimal_and_empty_batch() {
        let summary = summarize_batch(std::iter::empty());
        let table = build_results_table(&[], &summary, "m", &NumberFormat::comma());

        assert_eq!(table.rows[0], vec!["=== PER-FILE RESULTS (values in m) ==="]);
        let first_stat = &table.rows[5];
        assert_eq!(first_stat, &vec!["V_Amplitude", "NaN", "NaN", "0"]);

        let per_file = vec![("x.txt".to_string(), sample_metrics())];
        let summary = summarize_batch(per_file.iter().map(|(_, m)| m));
        let table = build_results_table(&per_file, &summary, "nm", &NumberFormat::comma());
        assert_eq!(table.rows[2][7], "3,25");
    }
}
