//! # 轮廓分析模块
//!
//! AFM 线轮廓几何特征提取流水线。
//!
//! ## 流程
//! ```text
//! Profile ─▶ extrema ─┬─▶ amplitude ─┐
//!                     └─▶ width ─────┴─▶ MetricSet ─▶ stats (整批)
//! ```
//!
//! ## 子模块
//! - `extrema`: 全局最小值与两侧局部最大值
//! - `amplitude`: 垂直/水平振幅
//! - `spline`: 自然三次样条
//! - `width`: 样条插值宽度指标
//! - `stats`: 批量均值与标准差
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `report/` 使用
//! - 使用 `models/`、`parsers/`

pub mod amplitude;
pub mod extrema;
pub mod spline;
pub mod stats;
pub mod width;

pub use stats::{summarize_batch, BatchSummary};
pub use width::{SearchSide, WidthResult};

use crate::error::Result;
use crate::models::{ExtremaIndices, MetricSet, Profile};
use crate::parsers;

use std::path::Path;

/// 单个轮廓的完整分析结果
#[derive(Debug, Clone)]
pub struct ProfileAnalysis {
    pub profile: Profile,
    pub extrema: ExtremaIndices,
    pub metrics: MetricSet,
    pub width: WidthResult,
}

/// 单文件处理结果
#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    /// 分析成功
    Analyzed(Box<ProfileAnalysis>),
    /// 分析失败（整批继续）
    Failed { name: String, reason: String },
}

impl ProfileOutcome {
    /// 文件名
    pub fn name(&self) -> &str {
        match self {
            ProfileOutcome::Analyzed(a) => &a.profile.name,
            ProfileOutcome::Failed { name, .. } => name,
        }
    }

    /// 指标；失败时为 NaN 占位
    pub fn metrics(&self) -> MetricSet {
        match self {
            ProfileOutcome::Analyzed(a) => a.metrics,
            ProfileOutcome::Failed { .. } => MetricSet::nan(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProfileOutcome::Analyzed(_))
    }
}

/// 分析一个已加载的轮廓
pub fn analyze_profile(profile: Profile) -> Result<ProfileAnalysis> {
    let extrema = extrema::locate_extrema(&profile);
    let amp = amplitude::compute_amplitudes(&profile, &extrema);
    let width = width::width_metric(&profile, &extrema)?;

    let metrics = MetricSet {
        vertical_amplitude: amp.vertical,
        vertical_amplitude_left: amp.vertical_left,
        vertical_amplitude_right: amp.vertical_right,
        vertical_amplitude_high: amp.vertical_high,
        vertical_amplitude_low: amp.vertical_low,
        horizontal_amplitude: amp.horizontal,
        width: width.width,
    };

    Ok(ProfileAnalysis {
        profile,
        extrema,
        metrics,
        width,
    })
}

/// 读取并分析一个轮廓文件，错误转换为 `ProfileOutcome::Failed`
///
/// `name` 用于结果行和图表文件名，批处理中为相对输入目录的路径。
pub fn analyze_file(path: &Path, name: &str) -> ProfileOutcome {
    let result = parsers::parse_profile_file(path)
        .map(|mut profile| {
            profile.name = name.to_string();
            profile
        })
        .and_then(analyze_profile);

    match result {
        Ok(analysis) => ProfileOutcome::Analyzed(Box::new(analysis)),
        Err(e) => ProfileOutcome::Failed {
            name: name.to_string(),
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_profile_content;

    #[test]
    fn test_end_to_end_reference_profile() {
        let content = "# x z\n0 0\n1 3\n2 1\n3 -2\n4 1\n5 4\n6 0\n";
        let profile = parse_profile_content(content, "ref.txt").unwrap();
        let analysis = analyze_profile(profile).unwrap();

        assert_eq!(
            analysis.extrema,
            ExtremaIndices {
                left_max: 1,
                global_min: 3,
                right_max: 5,
            }
        );

        let m = analysis.metrics;
        assert_eq!(m.vertical_amplitude, 6.0);
        assert_eq!(m.vertical_amplitude_left, 5.0);
        assert_eq!(m.vertical_amplitude_right, 6.0);
        assert_eq!(m.vertical_amplitude_high, 6.0);
        assert_eq!(m.vertical_amplitude_low, 5.0);
        assert_eq!(m.horizontal_amplitude, 4.0);
        assert!(m.width > 3.0 && m.width < 4.0);
    }

    #[test]
    fn test_analyze_file_records_failure() {
        let dir = std::env::temp_dir().join("profilyzer_analysis_failure");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("two_lines.txt");
        std::fs::write(&path, "0 1\n1 2\n").unwrap();

        let outcome = analyze_file(&path, "two_lines.txt");
        assert!(!outcome.is_success());
        assert_eq!(outcome.name(), "two_lines.txt");
        assert!(outcome.metrics().width.is_nan());
        match outcome {
            ProfileOutcome::Failed { reason, .. } => assert!(reason.contains("Not enough")),
            ProfileOutcome::Analyzed(_) => panic!("expected failure"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_input_order_does_not_change_metrics() {
        let dir = std::env::temp_dir().join("profilyzer_analysis_order");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let files = [
            ("a.txt", "0 0\n1 3\n2 1\n3 -2\n4 1\n5 4\n6 0\n"),
            ("b.txt", "0 1\n1 2\n"),
            ("c.txt", "0 5\n1 2\n2 -1\n3 0\n4 2\n5 1\n"),
            ("d.txt", "0 2\n1 9\n2 4\n3 0\n4 3\n5 8\n6 7\n7 1\n"),
        ];
        for (name, content) in &files {
            std::fs::write(dir.join(name), content).unwrap();
        }

        let run = |order: &[usize]| -> Vec<(String, Option<MetricSet>)> {
            let mut out: Vec<_> = order
                .iter()
                .map(|&i| {
                    let name = files[i].0;
                    let outcome = analyze_file(&dir.join(name), name);
                    let metrics = outcome.is_success().then(|| outcome.metrics());
                    (name.to_string(), metrics)
                })
                .collect();
            out.sort_by(|a, b| a.0.cmp(&b.0));
            out
        };

        let forward = run(&[0, 1, 2, 3]);
        let reversed = run(&[3, 2, 1, 0]);
        assert_eq!(forward, reversed);
        assert!(forward[1].1.is_none());
        assert!(forward[2].1.is_some());
        assert!(forward[3].1.is_some());

        std::fs::remove_dir_all(&dir).ok();
    }
}
