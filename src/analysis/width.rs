//! # 宽度指标（样条插值）
//!
//! 以两个局部最大值中较低者为参考高度，在最小值另一侧寻找样条曲线
//! 穿过该高度的位置，返回两点之间的水平距离。
//!
//! ## 算法概述
//! 1. 参考侧：z 较小的局部最大值（相等时取左侧）；搜索侧为最小值的另一侧
//! 2. 对整条轮廓拟合三次样条 S(x)
//! 3. 在搜索区间上以 max(1000, 10·n) 个等距点计算 S(x) - z_ref
//! 4. 相邻点符号变化即为交叉区间，取离最小值最近的一个，线性插值细化
//! 5. 找不到交叉时，退回到搜索侧离 z_ref 最近的离散采样点
//!
//! ## 依赖关系
//! - 被 `analysis/mod.rs` 调用
//! - 使用 `analysis/spline.rs`
//! - 使用 `models/` 的 Profile, ExtremaIndices

use crate::analysis::spline::{linspace, CubicSpline};
use crate::error::Result;
use crate::models::{ExtremaIndices, Profile};

/// 稠密采样的最少点数
const MIN_DENSE_POINTS: usize = 1000;

/// 每个原始采样点对应的稠密点数
const DENSE_POINTS_PER_SAMPLE: usize = 10;

/// 搜索方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSide {
    Left,
    Right,
}

/// 宽度指标计算结果
#[derive(Debug, Clone)]
pub struct WidthResult {
    /// |match_x - x[reference_index]|
    pub width: f64,
    /// 参考点（较低的局部最大值）索引
    pub reference_index: usize,
    /// 匹配点 (match_x, z_ref)
    pub match_point: (f64, f64),
    /// 搜索方向
    pub search_side: SearchSide,
    /// 是否使用了离散采样点回退
    pub used_fallback: bool,
    /// 拟合的样条（供绘图使用）
    pub spline: CubicSpline,
}

/// 计算宽度指标
pub fn width_metric(profile: &Profile, idx: &ExtremaIndices) -> Result<WidthResult> {
    let x = profile.x();
    let z = profile.z();
    let i_min = idx.global_min;

    let (reference_index, search_side) = if z[idx.left_max] <= z[idx.right_max] {
        (idx.left_max, SearchSide::Right)
    } else {
        (idx.right_max, SearchSide::Left)
    };
    let z_ref = z[reference_index];

    let spline = CubicSpline::fit(x, z)?;

    let (x_lo, x_hi) = match search_side {
        SearchSide::Right => (x[i_min], x[profile.last_index()]),
        SearchSide::Left => (x[0], x[i_min]),
    };

    let crossing = if x_hi > x_lo {
        let n_eval = dense_point_count(profile.len());
        find_crossing(&spline, x_lo, x_hi, n_eval, z_ref, search_side)
    } else {
        None
    };

    let (match_x, used_fallback) = match crossing {
        Some(match_x) => (match_x, false),
        None => {
            let fallback = nearest_sample(z, i_min, z_ref, search_side);
            log::debug!(
                "{}: no spline crossing at z = {:e}, falling back to sample {}",
                profile.name,
                z_ref,
                fallback
            );
            (x[fallback], true)
        }
    };

    Ok(WidthResult {
        width: (match_x - x[reference_index]).abs(),
        reference_index,
        match_point: (match_x, z_ref),
        search_side,
        used_fallback,
        spline,
    })
}

/// 搜索区间上的稠密采样点数
fn dense_point_count(samples: usize) -> usize {
    MIN_DENSE_POINTS.max(DENSE_POINTS_PER_SAMPLE * samples)
}

/// 稠密扫描 S(x) - z_ref 的符号变化，返回离最小值最近的交叉点
fn find_crossing(
    spline: &CubicSpline,
    x_lo: f64,
    x_hi: f64,
    n_eval: usize,
    z_ref: f64,
    side: SearchSide,
) -> Option<f64> {
    let xs = linspace(x_lo, x_hi, n_eval);
    let residuals: Vec<f64> = xs.iter().map(|&t| spline.eval(t) - z_ref).collect();

    let mut brackets = (0..residuals.len().saturating_sub(1))
        .filter(|&i| sign(residuals[i]) != sign(residuals[i + 1]));

    let best = match side {
        SearchSide::Right => brackets.next()?,
        SearchSide::Left => brackets.last()?,
    };

    let (x_a, x_b) = (xs[best], xs[best + 1]);
    let (r_a, r_b) = (residuals[best], residuals[best + 1]);

    if (r_b - r_a).abs() > 0.0 {
        Some(x_a - r_a * (x_b - x_a) / (r_b - r_a))
    } else {
        Some((x_a + x_b) / 2.0)
    }
}

/// 搜索侧（含最小值点）中 z 最接近 z_ref 的采样点，并列时取第一个
fn nearest_sample(z: &[f64], i_min: usize, z_ref: f64, side: SearchSide) -> usize {
    let range = match side {
        SearchSide::Right => i_min..z.len(),
        SearchSide::Left => 0..i_min + 1,
    };

    let mut best = range.start;
    for i in range {
        if (z[i] - z_ref).abs() < (z[best] - z_ref).abs() {
            best = i;
        }
    }
    best
}

/// -1 / 0 / +1
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
