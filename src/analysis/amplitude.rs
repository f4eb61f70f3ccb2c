//! # 振幅计算
//!
//! 由极值索引导出垂直与水平振幅。
//!
//! ## 依赖关系
//! - 被 `analysis/mod.rs` 调用
//! - 使用 `models/` 的 Profile, ExtremaIndices

use crate::models::{ExtremaIndices, Profile};

/// 振幅类指标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitudes {
    /// 全局最大值 - 全局最小值
    pub vertical: f64,
    pub vertical_left: f64,
    pub vertical_right: f64,
    pub vertical_high: f64,
    pub vertical_low: f64,
    /// |x[right_max] - x[left_max]|
    pub horizontal: f64,
}

/// 计算振幅
pub fn compute_amplitudes(profile: &Profile, idx: &ExtremaIndices) -> Amplitudes {
    let x = profile.x();
    let z = profile.z();

    let (z_min, z_max) = profile.z_range();
    let z_floor = z[idx.global_min];

    let vertical_left = z[idx.left_max] - z_floor;
    let vertical_right = z[idx.right_max] - z_floor;

    Amplitudes {
        vertical: z_max - z_min,
        vertical_left,
        vertical_right,
        vertical_high: vertical_left.max(vertical_right),
        vertical_low: vertical_left.min(vertical_right),
        horizontal: (x[idx.right_max] - x[idx.left_max]).abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extrema::locate_extrema;

    fn profile(z: &[f64]) -> Profile {
        let samples = z.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();
        Profile::from_samples("test", samples).unwrap()
    }

    #[test]
    fn test_reference_scenario_amplitudes() {
        let p = profile(&[0.0, 3.0, 1.0, -2.0, 1.0, 4.0, 0.0]);
        let idx = locate_extrema(&p);
        let amp = compute_amplitudes(&p, &idx);

        assert_eq!(amp.vertical, 6.0);
        assert_eq!(amp.vertical_left, 5.0);
        assert_eq!(amp.vertical_right, 6.0);
        assert_eq!(amp.vertical_high, 6.0);
        assert_eq!(amp.vertical_low, 5.0);
        assert_eq!(amp.horizontal, 4.0);
    }

    #[test]
    fn test_minimum_on_left_edge() {
        // 最小值位于左边界时左侧振幅为 0
        let p = profile(&[-3.0, 1.0, 2.0, 0.5]);
        let idx = locate_extrema(&p);
        let amp = compute_amplitudes(&p, &idx);

        assert_eq!(amp.vertical, 5.0);
        assert_eq!(amp.vertical_left, 0.0);
        assert_eq!(amp.vertical_right, 5.0);
        assert_eq!(amp.horizontal, 2.0);
    }

    #[test]
    fn test_amplitude_bounds() {
        let cases: [&[f64]; 4] = [
            &[1.0, 5.0, 5.0, 5.0, 0.0, 5.0, 5.0, 1.0],
            &[2.0, -1.0, 2.0, -1.0, 2.0, 7.0, -3.0, 7.0],
            &[9.0, 8.0, 7.0],
            &[0.0, 0.0, 0.0],
        ];
        for z in cases {
            let p = profile(z);
            let amp = compute_amplitudes(&p, &locate_extrema(&p));
            assert!(amp.vertical_left >= 0.0);
            assert!(amp.vertical_right >= 0.0);
            assert!(amp.vertical_high >= amp.vertical_low);
            assert!(amp.vertical_low >= 0.0);
            assert!(amp.vertical_high <= amp.vertical);
            assert!(amp.horizontal >= 0.0);
        }
    }
}
