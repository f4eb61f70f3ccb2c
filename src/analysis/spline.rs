//! # 三次样条插值
//!
//! 自然边界条件的三次样条，经过每一个采样点，一阶和二阶导数连续。
//!
//! ## 算法概述
//! 1. 由相邻节点间距构造三对角方程组，求解各节点二阶导数
//! 2. 逐段计算三次多项式系数 `y + b·dx + c·dx² + d·dx³`
//! 3. 求值时二分查找所在区间；恰好落在节点上时直接返回节点值
//!
//! ## 依赖关系
//! - 被 `analysis/width.rs` 用于宽度指标
//! - 被 `report/plot.rs` 用于绘制平滑曲线

use crate::error::{ProfilyzerError, Result};

/// 自然三次样条
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// 节点横坐标（严格递增）
    knots: Vec<f64>,
    /// 节点值
    values: Vec<f64>,
    /// 一次项系数（每段）
    b: Vec<f64>,
    /// 二次项系数（每个节点，末端为 0）
    c: Vec<f64>,
    /// 三次项系数（每段）
    d: Vec<f64>,
}

impl CubicSpline {
    /// 拟合经过所有 (x, y) 的样条
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ProfilyzerError::InvalidData(format!(
                "spline needs matching x/y lengths ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(ProfilyzerError::InvalidData(
                "spline needs at least 2 points".to_string(),
            ));
        }
        if let Some(v) = x.iter().chain(y).find(|v| !v.is_finite()) {
            return Err(ProfilyzerError::InvalidData(format!(
                "spline needs finite samples (found {})",
                v
            )));
        }
        if let Some(w) = x.windows(2).find(|w| !(w[1] > w[0])) {
            return Err(ProfilyzerError::InvalidData(format!(
                "x values must be strictly increasing for the spline fit (found {} followed by {})",
                w[0], w[1]
            )));
        }

        let m = x.len();
        let k = m - 1;

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        // 三对角方程组右端项
        let mut alpha = vec![0.0; m];
        for i in 1..k {
            alpha[i] = 3.0 / h[i] * (y[i + 1] - y[i]) - 3.0 / h[i - 1] * (y[i] - y[i - 1]);
        }

        // 追赶法（自然边界：两端二阶导数为 0）
        let mut l = vec![1.0; m];
        let mut mu = vec![0.0; m];
        let mut z = vec![0.0; m];
        for i in 1..k {
            l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        let mut c = vec![0.0; m];
        let mut b = vec![0.0; k];
        let mut d = vec![0.0; k];
        for j in (0..k).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            b[j] = (y[j + 1] - y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
        }

        Ok(CubicSpline {
            knots: x.to_vec(),
            values: y.to_vec(),
            b,
            c,
            d,
        })
    }

    /// 在 x 处求值（区间外按端段多项式外推）
    pub fn eval(&self, x: f64) -> f64 {
        let m = self.knots.len();

        // 第一个大于 x 的节点位置
        let upper = self.knots.partition_point(|&k| k <= x);
        if upper > 0 && self.knots[upper - 1] == x {
            return self.values[upper - 1];
        }

        let seg = upper.saturating_sub(1).min(m - 2);
        let dx = x - self.knots[seg];
        self.values[seg] + dx * (self.b[seg] + dx * (self.c[seg] + dx * self.d[seg]))
    }

    /// 在多个点上求值
    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    /// 定义域 (x_min, x_max)
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }
}

/// 闭区间 [lo, hi] 上的 n 个等距点（末点精确等于 hi）
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { hi } else { lo + i as f64 * step })
                .collect()
        }
    }
}
