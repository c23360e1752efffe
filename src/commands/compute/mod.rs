//! # compute 子命令实现
//!
//! 分派一维曲线与二维强度图计算，并提供共享的参数回显表。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `cli/compute.rs` 定义的参数
//! - 子模块: curve, map

pub mod curve;
pub mod map;

use crate::cli::compute::{ComputeArgs, ComputeCommands};
use crate::error::Result;
use crate::models::ModelParameters;

/// 执行 compute 命令
pub fn execute(args: ComputeArgs) -> Result<()> {
    match args.command {
        ComputeCommands::Curve(args) => curve::execute(args),
        ComputeCommands::Map(args) => map::execute(args),
    }
}

/// 打印参数回显表
pub(crate) fn print_parameter_table(params: &ModelParameters) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct ParameterRow {
        #[tabled(rename = "Parameter")]
        name: &'static str,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Unit")]
        unit: &'static str,
    }

    let rows: Vec<ParameterRow> = params
        .describe()
        .into_iter()
        .map(|(name, value, unit)| ParameterRow {
            name,
            value: format!("{}", value),
            unit,
        })
        .collect();

    println!("{}", Table::new(&rows));
}
