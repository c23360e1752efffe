//! # 散射数据导出
//!
//! 导出一维曲线与二维强度图到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 一维为 (q, intensity)，二维为 (qx, qy, intensity)
//! - XY: 带 `#` 注释头的两列文本，常见 SANS 数据交换格式
//!
//! ## 依赖关系
//! - 被 `commands/compute/` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{MusansError, Result};

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 导出一维曲线为 CSV 格式
pub fn curve_to_csv(data: &[(f64, f64)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(MusansError::CsvError)?;

    wtr.write_record(["q", "intensity"])
        .map_err(MusansError::CsvError)?;

    for (q, intensity) in data {
        wtr.write_record(&[format!("{:.8e}", q), format!("{:.8e}", intensity)])
            .map_err(MusansError::CsvError)?;
    }

    wtr.flush().map_err(|e| MusansError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出一维曲线为 XY 格式
pub fn curve_to_xy(data: &[(f64, f64)], title: &str, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path).map_err(|e| MusansError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    let write_err = |e: std::io::Error| MusansError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    writeln!(file, "# {}", title).map_err(write_err)?;
    writeln!(file, "# Columns: q (1/Angstrom), Intensity (1/cm)").map_err(write_err)?;
    writeln!(file, "#").map_err(write_err)?;

    for (q, intensity) in data {
        writeln!(file, "{:.8e}\t{:.8e}", q, intensity).map_err(write_err)?;
    }

    Ok(())
}

/// 导出二维强度图为 CSV 格式
pub fn map_to_csv(points: &[(f64, f64)], values: &[f64], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(MusansError::CsvError)?;

    wtr.write_record(["qx", "qy", "intensity"])
        .map_err(MusansError::CsvError)?;

    for ((qx, qy), intensity) in points.iter().zip(values.iter()) {
        wtr.write_record(&[
            format!("{:.8e}", qx),
            format!("{:.8e}", qy),
            format!("{:.8e}", intensity),
        ])
        .map_err(MusansError::CsvError)?;
    }

    wtr.flush().map_err(|e| MusansError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
