//! # AFM 轮廓数据模型
//!
//! 一条线扫描的 (x, z) 采样序列，按 x 升序排列，加载后不可变。
//!
//! ## 依赖关系
//! - 被 `parsers/profile_txt.rs` 创建
//! - 被 `analysis/` 和 `report/plot.rs` 使用

use crate::error::{ProfilyzerError, Result, MIN_PROFILE_SAMPLES};
use serde::{Deserialize, Serialize};

/// AFM 线轮廓
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// 来源名称（通常为文件名）
    pub name: String,
    /// 横向坐标（升序）
    x: Vec<f64>,
    /// 高度
    z: Vec<f64>,
}

impl Profile {
    /// 从 (x, z) 采样对创建轮廓
    ///
    /// 按 x 稳定排序（x 相同时保持原始顺序）；采样点少于 3 个时返回
    /// `InsufficientData`。
    pub fn from_samples(name: impl Into<String>, mut samples: Vec<(f64, f64)>) -> Result<Self> {
        if samples.len() < MIN_PROFILE_SAMPLES {
            return Err(ProfilyzerError::InsufficientData {
                found: samples.len(),
            });
        }

        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (x, z) = samples.into_iter().unzip();

        Ok(Profile {
            name: name.into(),
            x,
            z,
        })
    }

    /// 采样点数
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 最后一个采样点的索引
    pub fn last_index(&self) -> usize {
        self.x.len() - 1
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// 全局最小值索引（并列时取第一个）
    pub fn global_min_index(&self) -> usize {
        first_min_index(&self.z)
    }

    /// 全局最大值索引（并列时取第一个）
    pub fn global_max_index(&self) -> usize {
        first_extremum(&self.z, |candidate, best| candidate > best)
    }

    /// x 的取值范围 (min, max)
    pub fn x_range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.last_index()])
    }

    /// z 的取值范围 (min, max)
    pub fn z_range(&self) -> (f64, f64) {
        (
            self.z[self.global_min_index()],
            self.z[self.global_max_index()],
        )
    }
}

/// 第一个最小值的位置
pub fn first_min_index(values: &[f64]) -> usize {
    first_extremum(values, |candidate, best| candidate < best)
}

/// 返回满足 `better` 的第一个极值位置，与 argmin/argmax 的并列规则一致
fn first_extremum(values: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if better(v, values[best]) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples_sorts_by_x() {
        let profile =
            Profile::from_samples("p", vec![(2.0, 20.0), (0.0, 0.0), (1.0, 10.0)]).unwrap();
        assert_eq!(profile.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(profile.z(), &[0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_from_samples_sort_is_stable() {
        let profile = Profile::from_samples(
            "p",
            vec![(1.0, 5.0), (0.0, 1.0), (1.0, 3.0), (1.0, 4.0)],
        )
        .unwrap();
        assert_eq!(profile.z(), &[1.0, 5.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_samples_requires_three_points() {
        let err = Profile::from_samples("p", vec![(0.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ProfilyzerError::InsufficientData { found: 2 }));
    }

    #[test]
    fn test_extremum_ties_take_first_occurrence() {
        let profile = Profile::from_samples(
            "p",
            vec![(0.0, 2.0), (1.0, -1.0), (2.0, 2.0), (3.0, -1.0)],
        )
        .unwrap();
        assert_eq!(profile.global_min_index(), 1);
        assert_eq!(profile.global_max_index(), 0);
        assert_eq!(profile.z_range(), (-1.0, 2.0));
        assert_eq!(profile.x_range(), (0.0, 3.0));
    }
}
