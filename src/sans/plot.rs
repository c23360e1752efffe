//! # 散射图表生成
//!
//! 使用 `plotters` 库绘制一维散射曲线（双对数坐标）与二维探测器强度图。
//!
//! ## 功能
//! - 一维 I(q) 曲线，log-log 坐标
//! - 二维 I(qx, qy) 强度图，对数色标
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/compute/` 调用
//! - 使用 `plotters` 渲染图表

use crate::error::{MusansError, Result};

use plotters::prelude::*;
use std::path::Path;

/// 生成一维散射曲线图 (log-log)
pub fn generate_curve_plot(
    data: &[(f64, f64)],
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_curve_chart(&root, data, title)?;
        root.present()
            .map_err(|e| MusansError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_curve_chart(&root, data, title)?;
        root.present()
            .map_err(|e| MusansError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 生成二维强度图
///
/// `values` 按行主序排列：qy 为外层（行）、qx 为内层（列），
/// 与 `sweep::grid::DetectorGrid::points` 的顺序一致。
pub fn generate_map_plot(
    axis: &[f64],
    values: &[f64],
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_map_chart(&root, axis, values, title)?;
        root.present()
            .map_err(|e| MusansError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_map_chart(&root, axis, values, title)?;
        root.present()
            .map_err(|e| MusansError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 绘制一维曲线的核心逻辑
fn draw_curve_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    data: &[(f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    // 双对数坐标只取正值点
    let positive: Vec<(f64, f64)> = data
        .iter()
        .copied()
        .filter(|(q, i)| *q > 0.0 && *i > 0.0 && i.is_finite())
        .collect();
    if positive.is_empty() {
        return Err(MusansError::Other(
            "no positive intensity values to plot".to_string(),
        ));
    }

    let x_min = positive.iter().map(|(q, _)| *q).fold(f64::INFINITY, f64::min);
    let x_max = positive
        .iter()
        .map(|(q, _)| *q)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = positive.iter().map(|(_, i)| *i).fold(f64::INFINITY, f64::min);
    let y_max = positive
        .iter()
        .map(|(_, i)| *i)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("q (1/Å)")
        .y_desc("I(q) (1/cm)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            positive.iter().copied(),
            line_color.stroke_width(2),
        ))
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    Ok(())
}

/// 绘制二维强度图的核心逻辑，对数色标
fn draw_map_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    axis: &[f64],
    values: &[f64],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    let n = axis.len();
    if n < 2 || values.len() != n * n {
        return Err(MusansError::Other(format!(
            "detector grid mismatch: {} axis points, {} values",
            n,
            values.len()
        )));
    }

    let q_min = axis[0];
    let q_max = axis[n - 1];
    let half_step = (axis[1] - axis[0]) / 2.0;

    // 对数色标范围取自正的有限值
    let lo = values
        .iter()
        .copied()
        .filter(|v| *v > 0.0 && v.is_finite())
        .fold(f64::INFINITY, f64::min);
    let hi = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() || hi <= 0.0 {
        return Err(MusansError::Other(
            "no positive intensity values to plot".to_string(),
        ));
    }

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(q_min..q_max, q_min..q_max)
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("qx (1/Å)")
        .y_desc("qy (1/Å)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| MusansError::Other(format!("{:?}", e)))?;

    let ln_lo = lo.ln();
    let ln_hi = hi.ln();
    let span = (ln_hi - ln_lo).max(f64::MIN_POSITIVE);

    for (iy, &qy) in axis.iter().enumerate() {
        for (ix, &qx) in axis.iter().enumerate() {
            let value = values[iy * n + ix];
            if !value.is_finite() {
                continue;
            }
            let t = ((value.max(lo).ln() - ln_lo) / span).clamp(0.0, 1.0);
            let color = colormap(t);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [
                        (qx - half_step, qy - half_step),
                        (qx + half_step, qy + half_step),
                    ],
                    color.filled(),
                )))
                .map_err(|e| MusansError::Other(format!("{:?}", e)))?;
        }
    }

    Ok(())
}

/// 线性插值的蓝白色标，t ∈ [0, 1]
fn colormap(t: f64) -> RGBColor {
    let lerp = |a: f64, b: f64| (a + t * (b - a)).round() as u8;
    RGBColor(lerp(247.0, 8.0), lerp(251.0, 48.0), lerp(255.0, 107.0))
}
