//! # curve 子命令实现
//!
//! 一维粉末平均散射曲线 I(q) 的计算与输出。
//!
//! ## 功能
//! - 对数 q 网格上的并行求值
//! - 显示单位换算 scale·I/V + background
//! - 输出图像 (PNG/SVG) 或数据文件 (CSV/XY)
//!
//! ## 依赖关系
//! - 使用 `cli/compute.rs` 定义的 CurveArgs
//! - 使用 `sans/` 模块进行计算、绘图与导出
//! - 使用 `sweep/` 模块进行网格并行求值

use crate::cli::compute::{guess_format_from_extension, parse_range, CurveArgs, OutputFormat};
use crate::error::Result;
use crate::sans::{self, effective_radius, form_volume};
use crate::sweep::{grid, SweepRunner};
use crate::utils::output;

use super::print_parameter_table;

/// 执行一维曲线计算
pub fn execute(args: CurveArgs) -> Result<()> {
    output::print_header("1D Powder-Averaged Cross Section I(q)");

    let params = args.params.to_model();
    print_parameter_table(&params);

    let (q_min, q_max) = parse_range(&args.range)?;
    output::print_info(&format!(
        "q range: {:.4e} - {:.4e} 1/Å, {} log-spaced points",
        q_min, q_max, args.points
    ));

    let volume = form_volume(params.radius, params.thickness);
    output::print_info(&format!(
        "Particle volume: {:.4e} Å³ (effective radius {:.1} Å)",
        volume,
        effective_radius(1, params.radius, params.thickness)
    ));

    output::print_info(&format!(
        "Quadrature: {n} x {n} Gauss-Legendre nodes (detector azimuth x easy axis)",
        n = sans::quadrature::GAUSS76.len()
    ));

    let q_grid = grid::log_spaced(q_min, q_max, args.points);

    // 并行求值，内核返回值换算到显示单位
    let runner = SweepRunner::new(args.jobs);
    let (values, stats) = runner.run(&q_grid, "Computing I(q)", |&q| {
        args.scale * sans::iq(q, &params) / volume + args.background
    });

    if stats.non_finite > 0 {
        output::print_warning(&format!(
            "{} of {} intensities are non-finite (near-resonance micromagnetic denominator)",
            stats.non_finite, stats.total
        ));
    }

    let data: Vec<(f64, f64)> = q_grid.iter().copied().zip(values).collect();

    // 确定输出格式
    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    let title = args
        .title
        .clone()
        .unwrap_or_else(|| "Magnetic SANS of core-shell particles".to_string());

    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            sans::plot::generate_curve_plot(
                &data,
                &args.output,
                &title,
                args.width,
                args.height,
                format == OutputFormat::Svg,
            )?;
        }
        OutputFormat::Csv => sans::export::curve_to_csv(&data, &args.output)?,
        OutputFormat::Xy => sans::export::curve_to_xy(&data, &title, &args.output)?,
    }

    output::print_success(&format!("I(q) saved to '{}'", args.output.display()));
    Ok(())
}
