//! # 轮廓指标数据模型
//!
//! 极值索引、单文件指标集合与批量汇总统计。
//!
//! ## 依赖关系
//! - 被 `analysis/` 计算填充
//! - 被 `report/` 和 `commands/` 读取

use serde::{Deserialize, Serialize};

/// 全局最小值及其两侧局部最大值的索引
///
/// 满足 `left_max <= global_min <= right_max`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremaIndices {
    pub left_max: usize,
    pub global_min: usize,
    pub right_max: usize,
}

/// 单个轮廓的全部指标（失败的文件用 NaN 填充）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// 全局峰谷差
    pub vertical_amplitude: f64,
    /// 左侧局部最大值 - 全局最小值
    pub vertical_amplitude_left: f64,
    /// 右侧局部最大值 - 全局最小值
    pub vertical_amplitude_right: f64,
    /// max(左, 右)
    pub vertical_amplitude_high: f64,
    /// min(左, 右)
    pub vertical_amplitude_low: f64,
    /// 两个局部最大值之间的水平距离
    pub horizontal_amplitude: f64,
    /// 样条插值宽度
    pub width: f64,
}

impl MetricSet {
    /// 失败文件的占位指标
    pub fn nan() -> Self {
        MetricSet {
            vertical_amplitude: f64::NAN,
            vertical_amplitude_left: f64::NAN,
            vertical_amplitude_right: f64::NAN,
            vertical_amplitude_high: f64::NAN,
            vertical_amplitude_low: f64::NAN,
            horizontal_amplitude: f64::NAN,
            width: f64::NAN,
        }
    }

    /// 按单位换算因子缩放（所有指标均为长度量）
    pub fn scaled(&self, factor: f64) -> Self {
        MetricSet {
            vertical_amplitude: self.vertical_amplitude * factor,
            vertical_amplitude_left: self.vertical_amplitude_left * factor,
            vertical_amplitude_right: self.vertical_amplitude_right * factor,
            vertical_amplitude_high: self.vertical_amplitude_high * factor,
            vertical_amplitude_low: self.vertical_amplitude_low * factor,
            horizontal_amplitude: self.horizontal_amplitude * factor,
            width: self.width * factor,
        }
    }

    /// 按指标类型取值
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::VerticalAmplitude => self.vertical_amplitude,
            Metric::VerticalLeft => self.vertical_amplitude_left,
            Metric::VerticalRight => self.vertical_amplitude_right,
            Metric::VerticalHigh => self.vertical_amplitude_high,
            Metric::VerticalLow => self.vertical_amplitude_low,
            Metric::Horizontal => self.horizontal_amplitude,
            Metric::Width => self.width,
        }
    }
}

/// 指标类型，决定 CSV 列、汇总行和终端表格的顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    VerticalAmplitude,
    VerticalLeft,
    VerticalRight,
    VerticalHigh,
    VerticalLow,
    Horizontal,
    Width,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::VerticalAmplitude,
        Metric::VerticalLeft,
        Metric::VerticalRight,
        Metric::VerticalHigh,
        Metric::VerticalLow,
        Metric::Horizontal,
        Metric::Width,
    ];

    /// CSV 列名
    pub fn label(&self) -> &'static str {
        match self {
            Metric::VerticalAmplitude => "V_Amplitude",
            Metric::VerticalLeft => "V_Left",
            Metric::VerticalRight => "V_Right",
            Metric::VerticalHigh => "V_High",
            Metric::VerticalLow => "V_Low",
            Metric::Horizontal => "H_Amplitude",
            Metric::Width => "Width",
        }
    }

    /// 终端与图表中使用的描述
    pub fn description(&self) -> &'static str {
        match self {
            Metric::VerticalAmplitude => "Vertical amplitude (peak-to-peak)",
            Metric::VerticalLeft => "Vertical amplitude left",
            Metric::VerticalRight => "Vertical amplitude right",
            Metric::VerticalHigh => "Vertical amplitude HIGH",
            Metric::VerticalLow => "Vertical amplitude LOW",
            Metric::Horizontal => "Horizontal amplitude",
            Metric::Width => "Width (spline)",
        }
    }

    /// 直方图文件名前缀
    pub fn file_stem(&self) -> &'static str {
        match self {
            Metric::VerticalAmplitude => "vertical_amplitude",
            Metric::VerticalLeft => "vertical_amplitude_left",
            Metric::VerticalRight => "vertical_amplitude_right",
            Metric::VerticalHigh => "vertical_amplitude_high",
            Metric::VerticalLow => "vertical_amplitude_low",
            Metric::Horizontal => "horizontal_amplitude",
            Metric::Width => "width",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 单个指标在整批文件上的汇总
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistic {
    pub mean: f64,
    /// 样本标准差（N-1）
    pub std_dev: f64,
    /// 参与统计的有限值个数
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_metric_set() {
        let m = MetricSet::nan();
        assert!(Metric::ALL.iter().all(|k| m.get(*k).is_nan()));
    }

    #[test]
    fn test_scaled_metric_set() {
        let m = MetricSet {
            vertical_amplitude: 6e-9,
            vertical_amplitude_left: 5e-9,
            vertical_amplitude_right: 6e-9,
            vertical_amplitude_high: 6e-9,
            vertical_amplitude_low: 5e-9,
            horizontal_amplitude: 4e-9,
            width: 3.5e-9,
        }
        .scaled(1e9);

        assert!((m.vertical_amplitude - 6.0).abs() < 1e-9);
        assert!((m.horizontal_amplitude - 4.0).abs() < 1e-9);
        assert!((m.width - 3.5).abs() < 1e-9);
        assert!(Metric::ALL.iter().all(|k| m.get(*k).is_finite()));
    }

    #[test]
    fn test_metric_labels_are_unique() {
        let mut labels: Vec<_> = Metric::ALL.iter().map(|m| m.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Metric::ALL.len());
    }
}
