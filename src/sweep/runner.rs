//! # 并行求值执行器
//!
//! 在 rayon 线程池上并行求值 q 点网格。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果保持输入顺序
//! - 进度条显示
//! - 统计非有限（NaN/Inf）结果：内核无错误路径，数值退化
//!   原样传出，由本层汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/compute/` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 一次并行求值的统计
#[derive(Debug, Default)]
pub struct SweepStats {
    /// 求值点总数
    pub total: usize,
    /// 非有限结果数量
    pub non_finite: usize,
}

/// 并行求值执行器
pub struct SweepRunner {
    /// 并行作业数
    jobs: usize,
}

impl SweepRunner {
    /// 创建新的执行器，jobs 为 0 时取 CPU 核数
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行求值点列表，返回与输入同序的结果与统计
    ///
    /// 每次求值都是纯函数调用、彼此独立，并行不改变任何结果。
    pub fn run<T, F>(&self, points: &[T], message: &str, evaluate: F) -> (Vec<f64>, SweepStats)
    where
        T: Sync,
        F: Fn(&T) -> f64 + Sync + Send,
    {
        let total = points.len();
        let pb = progress::create_progress_bar(total as u64, message);

        let non_finite = AtomicUsize::new(0);

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .unwrap();

        let values: Vec<f64> = pool.install(|| {
            points
                .par_iter()
                .map(|point| {
                    let value = evaluate(point);
                    if !value.is_finite() {
                        non_finite.fetch_add(1, Ordering::Relaxed);
                    }
                    pb.inc(1);
                    value
                })
                .collect()
        });

        pb.finish_and_clear();

        let stats = SweepStats {
            total,
            non_finite: non_finite.into_inner(),
        };
        (values, stats)
    }
}
