//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `compute`: 散射强度计算（嵌套子命令）
//!   - `curve`: 一维粉末平均曲线
//!   - `map`: 二维探测器强度图
//! - `params`: 打印模型参数表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: compute

pub mod compute;

use clap::{Parser, Subcommand};

/// musans - 微磁小角中子散射工具箱
#[derive(Parser)]
#[command(name = "musans")]
#[command(version)]
#[command(about = "A micromagnetic small-angle neutron scattering toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute magnetic SANS cross sections
    Compute(compute::ComputeArgs),

    /// Print the model parameter table with defaults and units
    Params,
}
