//! # musans - 微磁小角中子散射工具箱
//!
//! 核壳磁性纳米颗粒在外场下的极化 SANS 截面计算，
//! 微磁横向响应按 Michels et al., PRB 94, 054424 (2016) 线性化求解。
//!
//! ## 子命令
//! - `compute` - 散射强度计算
//!   - `curve` - 一维粉末平均曲线 I(q)
//!   - `map`   - 二维探测器强度图 I(qx, qy)
//! - `params`  - 打印模型参数表
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── sans/   (散射内核、绘图与导出)
//!   │     ├── sweep/  (网格并行求值)
//!   │     └── models/ (模型参数)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod sans;
mod sweep;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
