//! # Gwyddion 轮廓文本解析器
//!
//! 解析 Gwyddion 导出的两列文本轮廓（x, z）。
//!
//! ## 格式说明
//! ```text
//! Gwyddion ASCII profile export
//! # x [m]   z [m]
//! 0.000000e+00  1.234e-09
//! 1.953125e-09  1.301e-09
//! ...
//! ```
//! - 空行、以 `#` 或 `;` 开头的行、以 `gwyddion`（不区分大小写）开头的行被跳过
//! - 其余行取前两个十进制数作为 (x, z)，行内其他内容忽略
//! - 数字不足两个的行静默忽略
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`、`commands/` 使用
//! - 使用 `models/profile.rs`

use crate::error::{ProfilyzerError, Result};
use crate::models::Profile;

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 导出软件名称（行首出现时视为表头）
const EXPORTER_NAME: &str = "gwyddion";

/// 带可选符号、小数和指数的十进制数
fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").unwrap())
}

/// 解析轮廓文件
pub fn parse_profile_file(path: &Path) -> Result<Profile> {
    let bytes = fs::read(path).map_err(|e| ProfilyzerError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // 导出文件偶尔带有非 UTF-8 的单位符号
    let content = String::from_utf8_lossy(&bytes);

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    parse_profile_content(&content, name)
}

/// 从字符串内容解析轮廓
pub fn parse_profile_content(content: &str, name: &str) -> Result<Profile> {
    let mut samples: Vec<(f64, f64)> = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if is_skipped_line(line) {
            continue;
        }

        match extract_pair(line) {
            Some(pair) => samples.push(pair),
            None => log::debug!("{}: ignoring line {}: '{}'", name, line_no + 1, line),
        }
    }

    Profile::from_samples(name, samples)
}

/// 空行、注释行和导出软件表头
fn is_skipped_line(line: &str) -> bool {
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        return true;
    }

    line.get(..EXPORTER_NAME.len())
        .map(|head| head.eq_ignore_ascii_case(EXPORTER_NAME))
        .unwrap_or(false)
}

/// 取行内前两个数字作为 (x, z)；溢出为无穷大的数字按非法行处理
fn extract_pair(line: &str) -> Option<(f64, f64)> {
    let mut numbers = number_pattern()
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<f64>().ok());

    let x = numbers.next()?;
    let z = numbers.next()?;
    (x.is_finite() && z.is_finite()).then_some((x, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_basic() {
        let content = r#"
Gwyddion profile export
# x [m]  z [m]
; exported from channel 0
0.0   1.0
1e-9  -2.5e-10
2.0e-9, 3.0e-10
"#;
        let profile = parse_profile_content(content, "basic.txt").unwrap();
        assert_eq!(profile.name, "basic.txt");
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.x(), &[0.0, 1e-9, 2.0e-9]);
        assert_eq!(profile.z(), &[1.0, -2.5e-10, 3.0e-10]);
    }

    #[test]
    fn test_parse_profile_skips_exporter_header_case_insensitive() {
        let content = "GWYDDION 2.62 1 2\ngwyddion 3 4\n0 0\n1 1\n2 2\n";
        let profile = parse_profile_content(content, "p").unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.x(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_parse_profile_ignores_malformed_lines() {
        let content = "x z\n0 5\nonly 7 here\n1 4\nnan nan\n2 6 extra 99\n";
        let profile = parse_profile_content(content, "p").unwrap();
        assert_eq!(profile.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(profile.z(), &[5.0, 4.0, 6.0]);
    }

    #[test]
    fn test_parse_profile_rejects_overflowing_numbers() {
        let content = "0 1\n1e400 2\n1 -1e999\n2 0\n3 4\n";
        let profile = parse_profile_content(content, "p").unwrap();
        assert_eq!(profile.x(), &[0.0, 2.0, 3.0]);
        assert!(profile.z().iter().all(|v| v.is_finite()));

        let err = parse_profile_content("0 1\n1 1e400\n2 3\n", "short.txt").unwrap_err();
        assert!(matches!(err, ProfilyzerError::InsufficientData { found: 2 }));
    }

    #[test]
    fn test_parse_profile_number_forms() {
        let content = "+1.5 -.5\n.25 3E2\n-2 +4e-1\n";
        let profile = parse_profile_content(content, "p").unwrap();
        // 按 x 排序
        assert_eq!(profile.x(), &[-2.0, 0.25, 1.5]);
        assert_eq!(profile.z(), &[0.4, 300.0, -0.5]);
    }

    #[test]
    fn test_parse_profile_sorts_unordered_input() {
        let content = "3 30\n1 10\n2 20\n0 0\n";
        let profile = parse_profile_content(content, "p").unwrap();
        assert_eq!(profile.x(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(profile.z(), &[0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_parse_profile_two_lines_is_insufficient() {
        let content = "# header\n0 1\n1 2\n";
        let err = parse_profile_content(content, "short.txt").unwrap_err();
        assert!(matches!(err, ProfilyzerError::InsufficientData { found: 2 }));
    }

    #[test]
    fn test_parse_profile_file_missing() {
        let path = std::env::temp_dir().join("profilyzer_missing_profile_does_not_exist.txt");
        let err = parse_profile_file(&path).unwrap_err();
        assert!(matches!(err, ProfilyzerError::FileReadError { .. }));
    }
}
