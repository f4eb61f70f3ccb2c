//! # inspect 子命令实现
//!
//! 详细展示单个轮廓的分析过程：极值位置、全部指标、宽度参考点与匹配点。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的 InspectArgs
//! - 使用 `parsers/`、`analysis/`、`report/plot.rs`

use crate::analysis::{self, ProfileAnalysis, SearchSide};
use crate::cli::inspect::InspectArgs;
use crate::error::{ProfilyzerError, Result};
use crate::models::Metric;
use crate::parsers;
use crate::report::{self, PlotSettings};
use crate::utils::format::{NumberFormat, DISPLAY_PRECISION};
use crate::utils::output;

/// 执行单文件检查
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("Profile Inspection");

    if !args.file.is_file() {
        return Err(ProfilyzerError::FileNotFound {
            path: args.file.display().to_string(),
        });
    }

    let profile = parsers::parse_profile_file(&args.file)?;
    output::print_success(&format!(
        "Loaded '{}' ({} samples)",
        profile.name,
        profile.len()
    ));

    let scale = args.unit.scale();
    let unit = args.unit.label();
    let fmt = args.decimal.number_format();
    let show = |v: f64| format!("{} {}", fmt.format(v * scale, DISPLAY_PRECISION), unit);

    let (x_lo, x_hi) = profile.x_range();
    let (z_lo, z_hi) = profile.z_range();
    output::print_key_value("x range", &format!("{} .. {}", show(x_lo), show(x_hi)));
    output::print_key_value("z range", &format!("{} .. {}", show(z_lo), show(z_hi)));

    let analysis = analysis::analyze_profile(profile)?;

    print_extrema(&analysis, &show);
    print_metrics(&analysis, scale, unit, &fmt);
    print_width(&analysis, &show);

    if let Some(ref path) = args.plot {
        let svg = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        let settings = PlotSettings {
            width: args.width,
            height: args.height,
            unit: unit.to_string(),
            scale,
            number_format: fmt,
            svg,
        };
        report::plot_profile(&analysis, path, &settings)?;
        output::print_success(&format!("Plot saved to '{}'", path.display()));
    }

    output::print_done("Inspection complete");
    Ok(())
}

fn print_extrema(analysis: &ProfileAnalysis, show: &dyn Fn(f64) -> String) {
    let x = analysis.profile.x();
    let z = analysis.profile.z();
    let idx = &analysis.extrema;

    output::print_header("Extrema");
    for (label, i) in [
        ("Left local max", idx.left_max),
        ("Global min", idx.global_min),
        ("Right local max", idx.right_max),
    ] {
        output::print_key_value(
            label,
            &format!("#{:<5} x = {}, z = {}", i, show(x[i]), show(z[i])),
        );
    }
}

fn print_metrics(analysis: &ProfileAnalysis, scale: f64, unit: &str, fmt: &NumberFormat) {
    let metrics = analysis.metrics.scaled(scale);

    output::print_header(&format!("Metrics ({})", unit));
    for metric in Metric::ALL {
        output::print_key_value(
            metric.description(),
            &fmt.format(metrics.get(metric), DISPLAY_PRECISION),
        );
    }
}

fn print_width(analysis: &ProfileAnalysis, show: &dyn Fn(f64) -> String) {
    let width = &analysis.width;
    let x = analysis.profile.x();
    let reference = if width.reference_index == analysis.extrema.left_max {
        "left local max"
    } else {
        "right local max"
    };
    let side = match width.search_side {
        SearchSide::Left => "left of minimum",
        SearchSide::Right => "right of minimum",
    };
    let method = if width.used_fallback {
        "nearest sample (no spline crossing)"
    } else {
        "cubic spline crossing"
    };

    output::print_header("Width Construction");
    output::print_key_value(
        "Reference",
        &format!(
            "{} (#{}, x = {})",
            reference,
            width.reference_index,
            show(x[width.reference_index])
        ),
    );
    output::print_key_value("Reference height", &show(width.match_point.1));
    output::print_key_value("Search side", side);
    output::print_key_value("Match x", &show(width.match_point.0));
    output::print_key_value("Method", method);
    output::print_key_value("Width", &show(width.width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::analyze::{DecimalStyle, LengthUnit};
    use std::path::PathBuf;

    fn args(file: PathBuf) -> InspectArgs {
        InspectArgs {
            file,
            unit: LengthUnit::Nm,
            decimal: DecimalStyle::Dot,
            plot: None,
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_inspect_single_profile() {
        let dir = std::env::temp_dir().join("profilyzer_inspect");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ref.txt");
        std::fs::write(&path, "0 0\n1e-9 3e-9\n2e-9 1e-9\n3e-9 -2e-9\n4e-9 1e-9\n5e-9 4e-9\n6e-9 0\n")
            .unwrap();

        assert!(execute(args(path)).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_inspect_reports_missing_and_short_files() {
        let dir = std::env::temp_dir().join("profilyzer_inspect_errors");
        std::fs::create_dir_all(&dir).unwrap();

        let missing = execute(args(dir.join("missing.txt")));
        assert!(matches!(missing, Err(ProfilyzerError::FileNotFound { .. })));

        let short = dir.join("short.txt");
        std::fs::write(&short, "0 1\n1 2\n").unwrap();
        let result = execute(args(short));
        assert!(matches!(result, Err(ProfilyzerError::InsufficientData { found: 2 })));

        std::fs::remove_dir_all(&dir).ok();
    }
}
