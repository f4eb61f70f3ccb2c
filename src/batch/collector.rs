//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的轮廓文件列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔的多模式）
//! - 递归目录搜索
//! - 结果按文件名排序，保证输出顺序确定
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use glob::Pattern;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式，非法模式被忽略）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| match Pattern::new(s) {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("Ignoring invalid pattern '{}': {}", s, e);
                    None
                }
            })
            .collect();
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件，按文件名排序
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
        files
    }

    /// 结果行与图表使用的名称
    ///
    /// 目录输入时为相对输入目录的路径（`/` 分隔），递归收集到的同名文件因此不会重名；
    /// 单文件输入时为文件名。
    pub fn display_name(&self, path: &Path) -> String {
        let relative = if self.input.is_dir() {
            path.strip_prefix(&self.input).unwrap_or(path)
        } else {
            Path::new(path.file_name().unwrap_or(path.as_os_str()))
        };

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            path.display().to_string()
        } else {
            parts.join("/")
        }
    }

    /// 检查文件是否匹配任一模式（没有模式时全部匹配）
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("profilyzer_collector_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_collect_sorted_and_filtered() {
        let dir = scratch_dir("sorted");
        for name in ["c.txt", "a.txt", "b.txt", "notes.md"] {
            fs::write(dir.join(name), "0 0\n").unwrap();
        }

        let files = FileCollector::new(dir.clone()).with_pattern("*.txt").collect();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_collect_multiple_patterns_and_recursion() {
        let dir = scratch_dir("recursive");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("top.txt"), "").unwrap();
        fs::write(dir.join("top.dat"), "").unwrap();
        fs::write(dir.join("sub").join("deep.txt"), "").unwrap();

        let flat = FileCollector::new(dir.clone())
            .with_pattern("*.txt, *.dat")
            .collect();
        assert_eq!(flat.len(), 2);

        let deep = FileCollector::new(dir.clone())
            .with_pattern("*.txt")
            .recursive(true)
            .collect();
        assert_eq!(deep.len(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_collect_single_file_and_missing_input() {
        let dir = scratch_dir("single");
        let file = dir.join("one.txt");
        fs::write(&file, "").unwrap();

        assert_eq!(FileCollector::new(file.clone()).collect(), vec![file]);
        assert!(FileCollector::new(dir.join("missing")).collect().is_empty());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_display_name_keeps_subdirectories_apart() {
        let dir = scratch_dir("display_name");
        for sub in ["s1", "s2"] {
            fs::create_dir_all(dir.join(sub)).unwrap();
            fs::write(dir.join(sub).join("p.txt"), "").unwrap();
        }
        fs::write(dir.join("top.txt"), "").unwrap();

        let collector = FileCollector::new(dir.clone())
            .with_pattern("*.txt")
            .recursive(true);
        let names: Vec<String> = collector
            .collect()
            .iter()
            .map(|p| collector.display_name(p))
            .collect();
        assert_eq!(names, vec!["s1/p.txt", "s2/p.txt", "top.txt"]);

        let single = FileCollector::new(dir.join("s1").join("p.txt"));
        assert_eq!(single.display_name(&dir.join("s1").join("p.txt")), "p.txt");

        fs::remove_dir_all(&dir).ok();
    }
}
