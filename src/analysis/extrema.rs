//! # 极值定位
//!
//! 找到全局最小值，以及其左右两侧子序列中的局部最大值。
//!
//! ## 平台处理
//! 多个采样点并列最大时，选择离最小值最近的那个点：
//! 左侧取最大索引，右侧取最小索引，避免高估振幅与宽度。
//!
//! ## 依赖关系
//! - 被 `analysis/mod.rs` 调用
//! - 使用 `models/` 的 Profile, ExtremaIndices

use crate::models::profile::first_min_index;
use crate::models::{ExtremaIndices, Profile};

/// 定位全局最小值和两侧局部最大值
pub fn locate_extrema(profile: &Profile) -> ExtremaIndices {
    locate_extrema_in(profile.z())
}

/// 对高度序列定位极值（序列非空）
pub fn locate_extrema_in(z: &[f64]) -> ExtremaIndices {
    let last = z.len() - 1;

    let global_min = first_min_index(z);

    // 左侧闭区间 [0, global_min]，并列时取最靠右
    let left_max = if global_min > 0 {
        let mut best = global_min;
        for i in (0..global_min).rev() {
            if z[i] > z[best] {
                best = i;
            }
        }
        best
    } else {
        0
    };

    // 右侧闭区间 [global_min, last]，并列时取最靠左
    let right_max = if global_min < last {
        let mut best = global_min;
        for i in global_min + 1..=last {
            if z[i] > z[best] {
                best = i;
            }
        }
        best
    } else {
        last
    };

    ExtremaIndices {
        left_max,
        global_min,
        right_max,
    }
}
