//! # 解析器模块
//!
//! 提供仪器导出文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: profile_txt

pub mod profile_txt;

pub use profile_txt::{parse_profile_content, parse_profile_file};
