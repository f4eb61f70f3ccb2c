//! # 数字格式化
//!
//! 有效数字格式（与 C 的 `%g` 一致）以及可配置的小数分隔符。
//!
//! ## 两种预设
//! - 点号小数、逗号分隔字段：`3.14,2.71`
//! - 逗号小数、分号分隔字段：`3,14;2,71`
//!
//! ## 依赖关系
//! - 被 `report/`、`commands/` 使用
//! - 无外部模块依赖

/// 非有限值的显示标记
pub const NAN_MARKER: &str = "NaN";

/// CSV 写出使用的有效数字位数
pub const CSV_PRECISION: usize = 10;

/// 终端显示使用的有效数字位数
pub const DISPLAY_PRECISION: usize = 6;

/// 图表标注使用的有效数字位数
pub const LABEL_PRECISION: usize = 4;

/// 小数分隔符与字段分隔符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub field_delimiter: u8,
}

impl NumberFormat {
    /// `3.14`，字段以 `,` 分隔
    pub const fn dot() -> Self {
        NumberFormat {
            decimal_separator: '.',
            field_delimiter: b',',
        }
    }

    /// `3,14`，字段以 `;` 分隔
    pub const fn comma() -> Self {
        NumberFormat {
            decimal_separator: ',',
            field_delimiter: b';',
        }
    }

    /// 按有效数字格式化；非有限值输出 `NaN`
    pub fn format(&self, value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return NAN_MARKER.to_string();
        }
        let s = format_general(value, precision);
        if self.decimal_separator == '.' {
            s
        } else {
            s.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::dot()
    }
}

/// `%.{precision}g` 风格格式化（有限值）
///
/// 指数小于 -4 或不小于精度时使用科学计数法，末尾多余的 0 被去掉。
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let p = precision.max(1);

    // 先按科学计数法舍入，舍入后的指数决定最终形式
    let sci = format!("{:.*e}", p - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    }
}

/// 去掉小数部分末尾的 0 和孤立的小数点
fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general_fixed() {
        assert_eq!(format_general(3.14159, 4), "3.142");
        assert_eq!(format_general(6.0, 10), "6");
        assert_eq!(format_general(-2.5, 6), "-2.5");
        assert_eq!(format_general(0.0001234, 4), "0.0001234");
        assert_eq!(format_general(123456.0, 6), "123456");
    }

    #[test]
    fn test_format_general_scientific() {
        assert_eq!(format_general(1.5e-9, 10), "1.5e-09");
        assert_eq!(format_general(0.00001234, 4), "1.234e-05");
        assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
        assert_eq!(format_general(-3.0e12, 4), "-3e+12");
    }

    #[test]
    fn test_format_general_rounding_bumps_exponent() {
        assert_eq!(format_general(9.99999, 3), "10");
        assert_eq!(format_general(999999.7, 6), "1e+06");
    }

    #[test]
    fn test_number_format_decimal_separator() {
        assert_eq!(NumberFormat::dot().format(3.25, 4), "3.25");
        assert_eq!(NumberFormat::comma().format(3.25, 4), "3,25");
        assert_eq!(NumberFormat::comma().format(1.5e-9, 4), "1,5e-09");
    }

    #[test]
    fn test_number_format_non_finite() {
        assert_eq!(NumberFormat::dot().format(f64::NAN, 4), "NaN");
        assert_eq!(NumberFormat::comma().format(f64::INFINITY, 4), "NaN");
    }
}
