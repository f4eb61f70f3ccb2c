//! # 批量执行器
//!
//! 并行执行批量处理任务，结果保持输入顺序。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代（`collect` 保持索引顺序）
//! - 进度条显示
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示使用全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行作业数
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表，返回与 `files` 顺序一致的结果
    pub fn run<T, F>(&self, files: &[PathBuf], processor: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Path) -> T + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");

        let process_all = || -> Vec<T> {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        };

        // 配置 rayon 线程池
        let results = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
        {
            Ok(pool) => pool.install(process_all),
            Err(e) => {
                log::warn!("Falling back to the global thread pool: {}", e);
                process_all()
            }
        };

        pb.finish_and_clear();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_preserves_input_order() {
        let files: Vec<PathBuf> = (0..64).map(|i| PathBuf::from(format!("f{:02}.txt", i))).collect();
        let runner = BatchRunner::new(4);
        let names = runner.run(&files, |p| p.display().to_string());

        let expected: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_auto_jobs_uses_cpus() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }
}
