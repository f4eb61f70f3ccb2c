//! # 轮廓图表生成
//!
//! 使用 `plotters` 库生成带标注的轮廓图和指标分布直方图。
//!
//! ## 功能
//! - 轮廓折线 + 三次样条平滑曲线
//! - 全局最大/最小值、局部最大值、宽度匹配点标记
//! - V_L / V_R 垂直标注、H 水平标注、W 宽度线段
//! - 指标分布直方图（均值与 ±1 SD 线）
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`、`commands/inspect.rs` 调用
//! - 使用 `analysis/` 的 ProfileAnalysis, SummaryStatistic
//! - 使用 `plotters` 渲染图表

use crate::analysis::spline::linspace;
use crate::analysis::ProfileAnalysis;
use crate::error::{ProfilyzerError, Result};
use crate::models::{Metric, SummaryStatistic};
use crate::utils::format::{NumberFormat, LABEL_PRECISION};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// 样条曲线绘制点数
const SPLINE_PLOT_POINTS: usize = 500;

const ORANGE: RGBColor = RGBColor(255, 140, 0);
const DARK_CYAN: RGBColor = RGBColor(0, 139, 139);
const V_LEFT_COLOR: RGBColor = RGBColor(204, 51, 102);
const V_RIGHT_COLOR: RGBColor = RGBColor(51, 102, 204);
const H_COLOR: RGBColor = RGBColor(0, 128, 0);
const GUIDE_COLOR: RGBColor = RGBColor(150, 150, 150);

/// 图表设置
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// 图像宽度（像素）
    pub width: u32,
    /// 图像高度（像素）
    pub height: u32,
    /// 显示单位（`nm` / `m`）
    pub unit: String,
    /// 米到显示单位的换算因子
    pub scale: f64,
    /// 标注中数字的小数分隔符
    pub number_format: NumberFormat,
    /// 输出 SVG 而不是 PNG
    pub svg: bool,
}

impl PlotSettings {
    /// 输出文件扩展名
    pub fn extension(&self) -> &'static str {
        if self.svg {
            "svg"
        } else {
            "png"
        }
    }

    fn value_label(&self, name: &str, value: f64) -> String {
        format!(
            "{} = {} {}",
            name,
            self.number_format.format(value, LABEL_PRECISION),
            self.unit
        )
    }
}

/// 把轮廓名转换为安全的文件名主干（`s1/p.txt` → `s1_p`）
pub fn safe_stem(name: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

    let stem = Path::new(name).with_extension("");
    let stem = stem.to_string_lossy();
    let cleaned = re.replace_all(&stem, "_");
    if cleaned.is_empty() {
        "profile".to_string()
    } else {
        cleaned.into_owned()
    }
}

fn scaled_pair((a, b): (f64, f64), s: f64) -> (f64, f64) {
    (a * s, b * s)
}

fn plot_err<E: std::fmt::Debug>(e: E) -> ProfilyzerError {
    ProfilyzerError::PlotError(format!("{:?}", e))
}

// ─────────────────────────────────────────────────────────────
// 轮廓图
// ─────────────────────────────────────────────────────────────

/// 生成带标注的轮廓图
pub fn plot_profile(
    analysis: &ProfileAnalysis,
    output_path: &Path,
    settings: &PlotSettings,
) -> Result<()> {
    let size = (settings.width, settings.height);
    if settings.svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_profile_chart(&root, analysis, settings)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_profile_chart(&root, analysis, settings)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 绘制轮廓图的核心逻辑
fn draw_profile_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    analysis: &ProfileAnalysis,
    settings: &PlotSettings,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let s = settings.scale;
    let profile = &analysis.profile;
    let idx = &analysis.extrema;
    let width = &analysis.width;

    let xs: Vec<f64> = profile.x().iter().map(|v| v * s).collect();
    let zs: Vec<f64> = profile.z().iter().map(|v| v * s).collect();

    let i_max = profile.global_max_index();
    let i_min = idx.global_min;
    let (x_lo, x_hi) = scaled_pair(profile.x_range(), s);
    let (z_min, z_max) = scaled_pair(profile.z_range(), s);

    let x_span = if x_hi > x_lo { x_hi - x_lo } else { 1.0 };
    let z_span = if z_max > z_min { z_max - z_min } else { 1.0 };

    // 标注位置
    let x_vl = xs[idx.left_max] - 0.06 * x_span;
    let x_vr = xs[idx.right_max] + 0.06 * x_span;
    let y_arrow = z_min - 0.14 * z_span;
    let (match_x, match_z) = (width.match_point.0 * s, width.match_point.1 * s);
    let ref_x = xs[width.reference_index];

    let x_range = (x_lo.min(x_vl) - 0.10 * x_span)..(x_hi.max(x_vr) + 0.14 * x_span);
    let y_range = (y_arrow - 0.12 * z_span)..(z_max + 0.12 * z_span);

    let mut chart = ChartBuilder::on(root)
        .caption(&profile.name, ("sans-serif", 26).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(format!("x [{}]", settings.unit))
        .y_desc(format!("z [{}]", settings.unit))
        .x_label_style(("sans-serif", 15))
        .y_label_style(("sans-serif", 15))
        .axis_desc_style(("sans-serif", 17))
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(BLACK.mix(0.08))
        .draw()
        .map_err(plot_err)?;

    // 样条曲线
    let (dom_lo, dom_hi) = width.spline.domain();
    let fine = linspace(dom_lo, dom_hi, SPLINE_PLOT_POINTS);
    chart
        .draw_series(LineSeries::new(
            fine.iter()
                .zip(width.spline.eval_many(&fine))
                .map(|(&t, v)| (t * s, v * s)),
            RED.mix(0.5).stroke_width(1),
        ))
        .map_err(plot_err)?
        .label("Cubic spline")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5)));

    // 原始轮廓
    chart
        .draw_series(LineSeries::new(
            xs.iter().copied().zip(zs.iter().copied()),
            BLACK.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Profile")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    // 全局极值
    chart
        .draw_series(std::iter::once(Circle::new(
            (xs[i_max], z_max),
            7,
            RED.filled(),
        )))
        .map_err(plot_err)?
        .label("Global Max")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    chart
        .draw_series(std::iter::once(Circle::new(
            (xs[i_min], z_min),
            7,
            BLUE.filled(),
        )))
        .map_err(plot_err)?
        .label("Global Min")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, BLUE.filled()));

    // 局部最大值（与全局最大值重合时不重复标记）
    let local_maxima: Vec<(f64, f64)> = [idx.left_max, idx.right_max]
        .iter()
        .filter(|&&i| i != i_max)
        .map(|&i| (xs[i], zs[i]))
        .collect();

    if !local_maxima.is_empty() {
        chart
            .draw_series(local_maxima.iter().map(|&p| {
                EmptyElement::at(p) + Rectangle::new([(-5, -5), (5, 5)], ORANGE.filled())
            }))
            .map_err(plot_err)?
            .label("Local Max (H metric)")
            .legend(|(x, y)| Rectangle::new([(x + 5, y - 5), (x + 15, y + 5)], ORANGE.filled()));
    }

    let label_font = ("sans-serif", 14).into_font();

    // V_L：左侧局部最大值到全局最小值
    draw_vertical_annotation(
        &mut chart,
        x_vl,
        zs[idx.left_max],
        z_min,
        settings.value_label("V_L", analysis.metrics.vertical_amplitude_left * s),
        V_LEFT_COLOR,
        HPos::Right,
        -0.02 * x_span,
    )?;

    // V_R：右侧局部最大值到全局最小值
    draw_vertical_annotation(
        &mut chart,
        x_vr,
        zs[idx.right_max],
        z_min,
        settings.value_label("V_R", analysis.metrics.vertical_amplitude_right * s),
        V_RIGHT_COLOR,
        HPos::Left,
        0.02 * x_span,
    )?;

    // H：两个局部最大值之间的水平距离
    let (x_left, x_right) = (xs[idx.left_max], xs[idx.right_max]);
    for &(gx, gz) in &[(x_left, zs[idx.left_max]), (x_right, zs[idx.right_max])] {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(gx, gz), (gx, y_arrow)],
                GUIDE_COLOR.stroke_width(1),
            )))
            .map_err(plot_err)?;
    }
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x_left, y_arrow), (x_right, y_arrow)],
            H_COLOR.stroke_width(2),
        )))
        .map_err(plot_err)?;
    chart
        .draw_series(std::iter::once(Text::new(
            settings.value_label("H", analysis.metrics.horizontal_amplitude * s),
            ((x_left + x_right) / 2.0, y_arrow - 0.03 * z_span),
            label_font
                .clone()
                .color(&H_COLOR)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        )))
        .map_err(plot_err)?;

    // W：参考点到样条交点的水平线段
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(ref_x, match_z), (match_x, match_z)],
            DARK_CYAN.stroke_width(2),
        )))
        .map_err(plot_err)?;
    chart
        .draw_series(std::iter::once(Text::new(
            settings.value_label("W", analysis.metrics.width * s),
            ((ref_x + match_x) / 2.0, match_z + 0.06 * z_span),
            label_font
                .clone()
                .color(&DARK_CYAN)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )))
        .map_err(plot_err)?;

    chart
        .draw_series(std::iter::once(TriangleMarker::new(
            (match_x, match_z),
            7,
            DARK_CYAN.filled(),
        )))
        .map_err(plot_err)?
        .label(if width.used_fallback {
            "Width match pt (nearest sample)"
        } else {
            "Width match pt (spline)"
        })
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 5, DARK_CYAN.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 13))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

/// 竖直双向标注线及文字
#[allow(clippy::too_many_arguments)]
fn draw_vertical_annotation<DB: DrawingBackend>(
    chart: &mut ChartContext<
        '_,
        DB,
        Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>,
    >,
    x: f64,
    z_top: f64,
    z_bottom: f64,
    label: String,
    color: RGBColor,
    anchor: HPos,
    text_offset: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x, z_top), (x, z_bottom)],
            color.stroke_width(2),
        )))
        .map_err(plot_err)?;

    chart
        .draw_series(
            [z_top, z_bottom]
                .into_iter()
                .map(|z| Circle::new((x, z), 3, color.filled())),
        )
        .map_err(plot_err)?;

    chart
        .draw_series(std::iter::once(Text::new(
            label,
            (x + text_offset, (z_top + z_bottom) / 2.0),
            ("sans-serif", 14)
                .into_font()
                .color(&color)
                .pos(Pos::new(anchor, VPos::Center)),
        )))
        .map_err(plot_err)?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 指标分布直方图
// ─────────────────────────────────────────────────────────────

/// 直方图分箱数：样本多时用 Sturges 规则，少时至少 5 箱
fn histogram_bins(n: usize) -> usize {
    if n > 10 {
        ((n as f64).log2().ceil() as usize + 1).max(5)
    } else {
        (n / 2).max(5)
    }
}

/// 生成单个指标的分布直方图；没有有限值时返回 `Ok(false)`
pub fn plot_histogram(
    values: &[f64],
    stat: &SummaryStatistic,
    metric: Metric,
    output_path: &Path,
    settings: &PlotSettings,
) -> Result<bool> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Ok(false);
    }

    let size = (settings.width, settings.height);
    if settings.svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_histogram(&root, &finite, stat, metric, settings)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_histogram(&root, &finite, stat, metric, settings)?;
        root.present().map_err(plot_err)?;
    }
    Ok(true)
}

fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    values: &[f64],
    stat: &SummaryStatistic,
    metric: Metric,
    settings: &PlotSettings,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if hi > lo {
        (lo, hi)
    } else {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        (lo - pad, hi + pad)
    };

    let n_bins = histogram_bins(values.len());
    let bin_width = (hi - lo) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let bin = (((v - lo) / bin_width) as usize).min(n_bins - 1);
        counts[bin] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(1);

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("{} Distribution (N={})", metric.description(), stat.count),
            ("sans-serif", 24).into_font(),
        )
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (lo - bin_width * 0.5)..(hi + bin_width * 0.5),
            0.0..(max_count as f64 * 1.15),
        )
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(format!("{} [{}]", metric.label(), settings.unit))
        .y_desc("Frequency")
        .axis_desc_style(("sans-serif", 17))
        .draw()
        .map_err(plot_err)?;

    let bar_color = RGBColor(70, 130, 180);
    chart
        .draw_series(counts.iter().enumerate().map(|(i, &c)| {
            let x0 = lo + i as f64 * bin_width;
            Rectangle::new(
                [(x0, 0.0), (x0 + bin_width, c as f64)],
                bar_color.mix(0.7).filled(),
            )
        }))
        .map_err(plot_err)?;

    let top = max_count as f64 * 1.1;
    let fmt = &settings.number_format;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(stat.mean, 0.0), (stat.mean, top)],
            RED.stroke_width(3),
        )))
        .map_err(plot_err)?
        .label(format!("Mean = {}", fmt.format(stat.mean, LABEL_PRECISION)))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    if stat.std_dev > 0.0 {
        let sd_lines = [stat.mean - stat.std_dev, stat.mean + stat.std_dev];
        chart
            .draw_series(sd_lines.into_iter().map(|x| {
                PathElement::new(vec![(x, 0.0), (x, top)], ORANGE.stroke_width(2))
            }))
            .map_err(plot_err)?
            .label(format!("±1 SD = {}", fmt.format(stat.std_dev, LABEL_PRECISION)))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}
