//! # 结果 CSV 导出
//!
//! 将 `ResultsTable` 写出为分节 CSV，字段分隔符可配置。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `report/table.rs` 的 ResultsTable
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{ProfilyzerError, Result};
use crate::report::ResultsTable;

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 写出结果表
pub fn write_results_csv(table: &ResultsTable, output_path: &Path, delimiter: u8) -> Result<()> {
    let file = File::create(output_path).map_err(|e| ProfilyzerError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    write_results(table, file, delimiter).map_err(|e| match e {
        ProfilyzerError::FileWriteError { source, .. } => ProfilyzerError::FileWriteError {
            path: output_path.display().to_string(),
            source,
        },
        other => other,
    })
}

/// 写出到任意 writer（各行字段数不同）
pub fn write_results<W: Write>(table: &ResultsTable, mut writer: W, delimiter: u8) -> Result<()> {
    for row in &table.rows {
        if row.is_empty() {
            // csv 会把空记录写成 `""`，分节空行直接写到底层 writer
            writer.write_all(b"\n").map_err(write_error)?;
            continue;
        }

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(&mut writer);
        wtr.write_record(row)?;
        wtr.flush().map_err(write_error)?;
    }

    writer.flush().map_err(write_error)?;
    Ok(())
}

fn write_error(source: std::io::Error) -> ProfilyzerError {
    ProfilyzerError::FileWriteError {
        path: "<csv>".to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultsTable {
        ResultsTable {
            rows: vec![
                vec!["=== PER-FILE RESULTS (values in nm) ===".to_string()],
                vec!["Filename".to_string(), "Width".to_string()],
                vec!["a.txt".to_string(), "3,25".to_string()],
                vec![],
                vec!["=== SUMMARY STATISTICS ===".to_string()],
            ],
        }
    }

    #[test]
    fn test_write_semicolon_delimited() {
        let mut buf = Vec::new();
        write_results(&table(), &mut buf, b';').unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "=== PER-FILE RESULTS (values in nm) ===\nFilename;Width\na.txt;3,25\n\n=== SUMMARY STATISTICS ===\n"
        );
    }

    #[test]
    fn test_write_comma_delimited_quotes_conflicting_fields() {
        let mut buf = Vec::new();
        write_results(&table(), &mut buf, b',').unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("a.txt,\"3,25\"\n"));
        assert!(text.contains("\n\n=== SUMMARY STATISTICS ===\n"));
    }

    #[test]
    fn test_write_keeps_writer_usable_across_sections() {
        let table = ResultsTable {
            rows: vec![
                vec!["a".to_string(), "1".to_string()],
                vec![],
                vec!["b".to_string()],
                vec![],
                vec!["c".to_string(), "2".to_string(), "3".to_string()],
            ],
        };
        let mut buf = Vec::new();
        write_results(&table, &mut buf, b',').unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "a,1\n\nb\n\nc,2,3\n");
    }

    #[test]
    fn test_write_results_csv_to_file() {
        let dir = std::env::temp_dir().join("profilyzer_export_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");

        write_results_csv(&table(), &path, b',').unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== PER-FILE RESULTS"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
