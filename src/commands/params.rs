//! # params 子命令实现
//!
//! 打印模型参数表（名称、缺省值、单位）。
//!
//! ## 依赖关系
//! - 使用 `models/parameters.rs` 的 ModelParameters
//! - 使用 `commands/compute/` 的参数表打印

use crate::commands::compute::print_parameter_table;
use crate::error::Result;
use crate::models::ModelParameters;
use crate::utils::output;

/// 执行 params 命令
pub fn execute() -> Result<()> {
    output::print_header("Model Parameters (defaults)");
    print_parameter_table(&ModelParameters::default());
    Ok(())
}
