//! # map 子命令实现
//!
//! 二维探测器平面强度图 I(qx, qy) 的计算与输出。
//!
//! ## 功能
//! - 以零为中心的正方形探测器网格并行求值
//! - 显示单位换算 scale·I/V + background
//! - 输出强度图 (PNG/SVG) 或数据文件 (CSV)
//!
//! ## 依赖关系
//! - 使用 `cli/compute.rs` 定义的 MapArgs
//! - 使用 `sans/` 模块进行计算、绘图与导出
//! - 使用 `sweep/` 模块进行网格并行求值

use crate::cli::compute::{guess_format_from_extension, MapArgs, OutputFormat};
use crate::error::{MusansError, Result};
use crate::sans::{self, form_volume};
use crate::sweep::grid::DetectorGrid;
use crate::sweep::SweepRunner;
use crate::utils::output;

use super::print_parameter_table;

/// 执行二维强度图计算
pub fn execute(args: MapArgs) -> Result<()> {
    output::print_header("2D Detector-Plane Cross Section I(qx, qy)");

    if args.q_max <= 0.0 {
        return Err(MusansError::InvalidArgument(format!(
            "--q-max must be positive, got {}",
            args.q_max
        )));
    }

    let params = args.params.to_model();
    print_parameter_table(&params);

    let grid = DetectorGrid {
        q_max: args.q_max,
        size: args.size,
    };
    let points = grid.points();
    output::print_info(&format!(
        "Detector grid: {} x {} points, axes spanning ±{:.4e} 1/Å (outer radius {:.1} Å)",
        grid.size,
        grid.size,
        grid.q_max,
        params.outer_radius()
    ));

    output::print_info(&format!(
        "Quadrature: {} Gauss-Legendre easy-axis nodes per pixel",
        sans::quadrature::GAUSS76.len()
    ));

    let volume = form_volume(params.radius, params.thickness);

    // 并行求值，内核返回值换算到显示单位
    let runner = SweepRunner::new(args.jobs);
    let (values, stats) = runner.run(&points, "Computing I(qx, qy)", |&(qx, qy)| {
        args.scale * sans::iqxy(qx, qy, &params) / volume + args.background
    });

    if stats.non_finite > 0 {
        output::print_warning(&format!(
            "{} of {} intensities are non-finite (near-resonance micromagnetic denominator)",
            stats.non_finite, stats.total
        ));
    }

    // 确定输出格式
    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    let title = args
        .title
        .clone()
        .unwrap_or_else(|| "Magnetic SANS detector map".to_string());

    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            sans::plot::generate_map_plot(
                &grid.axis(),
                &values,
                &args.output,
                &title,
                args.width,
                args.height,
                format == OutputFormat::Svg,
            )?;
        }
        OutputFormat::Csv => sans::export::map_to_csv(&points, &values, &args.output)?,
        OutputFormat::Xy => {
            return Err(MusansError::InvalidArgument(
                "XY output is two-column and only supports 1D curves; use csv for maps".to_string(),
            ));
        }
    }

    output::print_success(&format!(
        "I(qx, qy) saved to '{}'",
        args.output.display()
    ));
    Ok(())
}
