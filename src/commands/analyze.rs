//! # analyze 子命令实现
//!
//! 批量分析轮廓文件，输出 CSV 结果、标注图和统计表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 并行分析与绘图（rayon），结果保持文件名顺序
//! - 单文件失败不中断整批，CSV 中记为 NaN
//! - 可选指标分布直方图
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的 AnalyzeArgs
//! - 使用 `batch/` 收集文件并行处理
//! - 使用 `analysis/` 计算指标与统计
//! - 使用 `report/` 写出 CSV 和图表

use crate::analysis::{self, BatchSummary, ProfileOutcome};
use crate::batch::{BatchRunner, FileCollector};
use crate::cli::analyze::{AnalyzeArgs, LengthUnit};
use crate::error::{ProfilyzerError, Result};
use crate::models::{Metric, MetricSet};
use crate::report::{self, PlotSettings};
use crate::utils::format::{NumberFormat, DISPLAY_PRECISION};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 默认结果文件名
const RESULTS_FILE_NAME: &str = "afm_analysis_results.csv";

/// 默认图表子目录
const PLOTS_DIR_NAME: &str = "plots";

/// 批量分析配置（由命令行参数构建）
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub pattern: String,
    pub recursive: bool,
    pub unit: LengthUnit,
    pub number_format: NumberFormat,
    pub csv_path: PathBuf,
    pub plots_dir: PathBuf,
    pub profile_plots: bool,
    pub histograms: bool,
    pub plot: PlotSettings,
    pub jobs: usize,
}

impl AnalyzeConfig {
    /// 解析参数并补全默认输出路径
    pub fn from_args(args: &AnalyzeArgs) -> Result<Self> {
        if !args.input.exists() {
            return Err(ProfilyzerError::FileNotFound {
                path: args.input.display().to_string(),
            });
        }
        if args.width == 0 || args.height == 0 {
            return Err(ProfilyzerError::InvalidArgument(format!(
                "figure size must be positive, got {}x{}",
                args.width, args.height
            )));
        }

        // 默认输出放在输入目录（单文件时为其所在目录）
        let base_dir = if args.input.is_dir() {
            args.input.clone()
        } else {
            args.input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let number_format = args.decimal.number_format();

        Ok(Self {
            input: args.input.clone(),
            pattern: args.pattern.clone(),
            recursive: args.recursive,
            unit: args.unit,
            number_format,
            csv_path: args
                .output
                .clone()
                .unwrap_or_else(|| base_dir.join(RESULTS_FILE_NAME)),
            plots_dir: args
                .plots_dir
                .clone()
                .unwrap_or_else(|| base_dir.join(PLOTS_DIR_NAME)),
            profile_plots: !args.no_plot,
            histograms: args.histograms,
            plot: PlotSettings {
                width: args.width,
                height: args.height,
                unit: args.unit.label().to_string(),
                scale: args.unit.scale(),
                number_format,
                svg: args.svg,
            },
            jobs: args.jobs,
        })
    }

    fn needs_plots_dir(&self) -> bool {
        self.profile_plots || self.histograms
    }
}

/// 单个文件的处理结果（分析 + 绘图）
struct FileReport {
    outcome: ProfileOutcome,
    plot_error: Option<String>,
}

/// 执行批量分析
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    output::print_header("AFM Profile Analysis");

    let config = AnalyzeConfig::from_args(&args)?;

    let collector = FileCollector::new(config.input.clone())
        .with_pattern(&config.pattern)
        .recursive(config.recursive);
    let files = collector.collect();

    if files.is_empty() {
        return Err(ProfilyzerError::NoFilesFound {
            pattern: config.pattern.clone(),
        });
    }

    let runner = BatchRunner::new(config.jobs);
    output::print_info(&format!(
        "Found {} profile files in '{}' ({} jobs)",
        files.len(),
        config.input.display(),
        runner.jobs()
    ));
    output::print_info(&format!(
        "Units: {}, decimal separator: '{}'",
        config.unit, config.number_format.decimal_separator
    ));

    if config.needs_plots_dir() {
        fs::create_dir_all(&config.plots_dir).map_err(|e| ProfilyzerError::FileWriteError {
            path: config.plots_dir.display().to_string(),
            source: e,
        })?;
    }

    let reports = runner.run(&files, |path| {
        process_file(path, &collector.display_name(path), &config)
    });

    // 按输入顺序打印状态
    let total = reports.len();
    for (i, report) in reports.iter().enumerate() {
        match &report.outcome {
            ProfileOutcome::Analyzed(_) => {
                output::print_file_status(i + 1, total, report.outcome.name(), None)
            }
            ProfileOutcome::Failed { name, reason } => {
                output::print_file_status(i + 1, total, name, Some(reason.as_str()))
            }
        }
        if let Some(err) = &report.plot_error {
            output::print_warning(&format!(
                "Plot for '{}' not written: {}",
                report.outcome.name(),
                err
            ));
        }
    }

    let scale = config.unit.scale();
    let per_file: Vec<(String, MetricSet)> = reports
        .iter()
        .map(|r| (r.outcome.name().to_string(), r.outcome.metrics().scaled(scale)))
        .collect();
    let summary = analysis::summarize_batch(per_file.iter().map(|(_, m)| m));

    let table = report::build_results_table(
        &per_file,
        &summary,
        config.unit.label(),
        &config.number_format,
    );
    report::write_results_csv(
        &table,
        &config.csv_path,
        config.number_format.field_delimiter,
    )?;

    print_metrics_table(&per_file, &config);
    print_summary_table(&summary, &config);

    output::print_separator();
    output::print_success(&format!(
        "Results saved to '{}'",
        config.csv_path.display()
    ));
    if config.profile_plots {
        output::print_success(&format!(
            "Profile plots saved to '{}'",
            config.plots_dir.display()
        ));
    }

    if config.histograms {
        write_histograms(&per_file, &summary, &config);
    }

    let succeeded = reports.iter().filter(|r| r.outcome.is_success()).count();
    let failed = total - succeeded;
    if failed > 0 {
        output::print_warning(&format!("{} of {} files could not be analyzed", failed, total));
    }
    output::print_done(&format!(
        "Batch complete: {} success, {} failed",
        succeeded, failed
    ));

    Ok(())
}

/// 分析单个文件并（可选）生成标注图
fn process_file(path: &Path, name: &str, config: &AnalyzeConfig) -> FileReport {
    let outcome = analysis::analyze_file(path, name);

    let plot_error = match &outcome {
        ProfileOutcome::Analyzed(result) if config.profile_plots => {
            let file_name = format!(
                "{}_profile.{}",
                report::safe_stem(&result.profile.name),
                config.plot.extension()
            );
            report::plot_profile(result, &config.plots_dir.join(file_name), &config.plot)
                .err()
                .map(|e| e.to_string())
        }
        _ => None,
    };

    FileReport {
        outcome,
        plot_error,
    }
}

/// 每个指标一张分布直方图；失败只给出警告
fn write_histograms(per_file: &[(String, MetricSet)], summary: &BatchSummary, config: &AnalyzeConfig) {
    let mut written = 0;

    for metric in Metric::ALL {
        let stat = match summary.get(metric) {
            Some(stat) => stat,
            None => continue,
        };
        let values: Vec<f64> = per_file.iter().map(|(_, m)| m.get(metric)).collect();
        let path = config.plots_dir.join(format!(
            "{}_histogram.{}",
            metric.file_stem(),
            config.plot.extension()
        ));

        match report::plot_histogram(&values, stat, metric, &path, &config.plot) {
            Ok(true) => written += 1,
            Ok(false) => {
                output::print_warning(&format!("No valid values for {}, histogram skipped", metric))
            }
            Err(e) => output::print_warning(&format!("Histogram for {} failed: {}", metric, e)),
        }
    }

    if written > 0 {
        output::print_success(&format!(
            "{} histograms saved to '{}'",
            written,
            config.plots_dir.display()
        ));
    }
}

// ─────────────────────────────────────────────────────────────
// 终端表格
// ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "V")]
    vertical: String,
    #[tabled(rename = "V_L")]
    left: String,
    #[tabled(rename = "V_R")]
    right: String,
    #[tabled(rename = "V_high")]
    high: String,
    #[tabled(rename = "V_low")]
    low: String,
    #[tabled(rename = "H")]
    horizontal: String,
    #[tabled(rename = "W")]
    width: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "SD")]
    std_dev: String,
    #[tabled(rename = "N")]
    count: usize,
}

/// 打印每个文件的指标
fn print_metrics_table(per_file: &[(String, MetricSet)], config: &AnalyzeConfig) {
    let f = |v: f64| config.number_format.format(v, DISPLAY_PRECISION);

    let rows: Vec<MetricRow> = per_file
        .iter()
        .map(|(name, m)| MetricRow {
            file: name.clone(),
            vertical: f(m.vertical_amplitude),
            left: f(m.vertical_amplitude_left),
            right: f(m.vertical_amplitude_right),
            high: f(m.vertical_amplitude_high),
            low: f(m.vertical_amplitude_low),
            horizontal: f(m.horizontal_amplitude),
            width: f(m.width),
        })
        .collect();

    output::print_header(&format!("Per-file Metrics ({})", config.unit));
    println!("{}", Table::new(&rows));
}

/// 打印汇总统计
fn print_summary_table(summary: &BatchSummary, config: &AnalyzeConfig) {
    let rows: Vec<SummaryRow> = summary
        .entries()
        .iter()
        .map(|(metric, stat)| SummaryRow {
            metric: metric.description(),
            mean: config.number_format.format(stat.mean, DISPLAY_PRECISION),
            std_dev: config.number_format.format(stat.std_dev, DISPLAY_PRECISION),
            count: stat.count,
        })
        .collect();

    output::print_header(&format!("Summary Statistics ({})", config.unit));
    println!("{}", Table::new(&rows));
}
