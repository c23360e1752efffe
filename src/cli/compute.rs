//! # compute 子命令 CLI 定义
//!
//! 散射强度计算统一入口，包含两个子命令：
//! - `curve`: 一维粉末平均曲线 I(q)
//! - `map`: 二维探测器强度图 I(qx, qy)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compute/` 相应模块

use crate::error::{MusansError, Result};
use crate::models::ModelParameters;

use clap::{Args, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────
// Compute 主命令
// ─────────────────────────────────────────────────────────────

/// compute 主命令参数
#[derive(Args, Debug)]
pub struct ComputeArgs {
    #[command(subcommand)]
    pub command: ComputeCommands,
}

/// compute 子命令
#[derive(Subcommand, Debug)]
pub enum ComputeCommands {
    /// Compute the 1D powder-averaged cross section I(q)
    Curve(CurveArgs),

    /// Compute the 2D detector-plane cross section I(qx, qy)
    Map(MapArgs),
}

// ─────────────────────────────────────────────────────────────
// 输出格式
// ─────────────────────────────────────────────────────────────

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file
    Csv,
    /// XY data file (two-column text with # comments)
    Xy,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Svg => write!(f, "svg"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Xy => write!(f, "xy"),
        }
    }
}

/// 从文件扩展名推断输出格式
pub fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => OutputFormat::Svg,
        Some("csv") => OutputFormat::Csv,
        Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
        _ => OutputFormat::Png,
    }
}

/// 解析 q 范围，冒号分隔（q 下界常写作 1e-3，含 '-'，不能用连字符分隔）
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = range.split(':').collect();
    if parts.len() != 2 {
        return Err(MusansError::InvalidRange(range.to_string()));
    }

    let min: f64 = parts[0]
        .parse()
        .map_err(|_| MusansError::InvalidRange(range.to_string()))?;
    let max: f64 = parts[1]
        .parse()
        .map_err(|_| MusansError::InvalidRange(range.to_string()))?;

    if min <= 0.0 || max <= min {
        return Err(MusansError::InvalidRange(format!(
            "{} (must be 0 < min < max)",
            range
        )));
    }

    Ok((min, max))
}

// ─────────────────────────────────────────────────────────────
// 模型参数标志
// ─────────────────────────────────────────────────────────────

/// 模型物理参数，一项一个标志，缺省取常用示例值
#[derive(Args, Debug)]
pub struct ParameterArgs {
    /// Core radius (Angstrom)
    #[arg(long, default_value_t = 50.0)]
    pub radius: f64,

    /// Shell thickness (Angstrom)
    #[arg(long, default_value_t = 40.0)]
    pub thickness: f64,

    /// Nuclear scattering length density of the core (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 1.0)]
    pub nuc_sld_core: f64,

    /// Nuclear scattering length density of the shell (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 1.7)]
    pub nuc_sld_shell: f64,

    /// Nuclear scattering length density of the solvent (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 6.4)]
    pub nuc_sld_solvent: f64,

    /// Magnetic scattering length density of the core (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 1.0)]
    pub mag_sld_core: f64,

    /// Magnetic scattering length density of the shell (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 1.7)]
    pub mag_sld_shell: f64,

    /// Magnetic scattering length density of the solvent (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 3.0)]
    pub mag_sld_solvent: f64,

    /// Anisotropy-field scattering length density of the core (1e-6/Angstrom^2)
    #[arg(long, default_value_t = 1.0)]
    pub hk_sld_core: f64,

    /// Internal magnetic field Hi (T)
    #[arg(long, default_value_t = 2.0)]
    pub hi: f64,

    /// Saturation magnetisation Ms (T)
    #[arg(long, default_value_t = 1.0)]
    pub ms: f64,

    /// Exchange stiffness constant A (pJ/m)
    #[arg(long, default_value_t = 10.0)]
    pub exchange: f64,

    /// Dzyaloshinskii-Moriya constant D (mJ/m^2)
    #[arg(long, default_value_t = 0.0)]
    pub dmi: f64,

    /// Polarisation efficiency of the incoming beam (0-1)
    #[arg(long, default_value_t = 0.5)]
    pub up_i: f64,

    /// Polarisation efficiency of the outgoing beam analyser (0-1)
    #[arg(long, default_value_t = 0.5)]
    pub up_f: f64,

    /// Inclination of the field to the neutron beam (degrees)
    #[arg(long, default_value_t = 90.0)]
    pub alpha: f64,

    /// Rotation of the field in the detector plane (degrees)
    #[arg(long, default_value_t = 0.0)]
    pub beta: f64,
}

impl ParameterArgs {
    /// 转为模型参数集
    pub fn to_model(&self) -> ModelParameters {
        ModelParameters {
            radius: self.radius,
            thickness: self.thickness,
            nuc_sld_core: self.nuc_sld_core,
            nuc_sld_shell: self.nuc_sld_shell,
            nuc_sld_solvent: self.nuc_sld_solvent,
            mag_sld_core: self.mag_sld_core,
            mag_sld_shell: self.mag_sld_shell,
            mag_sld_solvent: self.mag_sld_solvent,
            hk_sld_core: self.hk_sld_core,
            internal_field: self.hi,
            saturation: self.ms,
            exchange: self.exchange,
            dmi: self.dmi,
            up_i: self.up_i,
            up_f: self.up_f,
            alpha: self.alpha,
            beta: self.beta,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// curve 子命令
// ─────────────────────────────────────────────────────────────

/// 一维曲线子命令参数
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// Output file path
    #[arg(short, long, default_value = "iq_curve.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// q range in 1/Angstrom, colon-separated (e.g. "1e-3:0.2")
    #[arg(short, long, default_value = "1e-3:0.2")]
    pub range: String,

    /// Number of q points (log-spaced)
    #[arg(short, long, default_value_t = 128)]
    pub points: usize,

    /// Overall intensity scale factor
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Flat background (1/cm)
    #[arg(long, default_value_t = 0.001)]
    pub background: f64,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Figure width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,
}

// ─────────────────────────────────────────────────────────────
// map 子命令
// ─────────────────────────────────────────────────────────────

/// 二维强度图子命令参数
#[derive(Args, Debug)]
pub struct MapArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// Output file path
    #[arg(short, long, default_value = "iqxy_map.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Detector half-range in 1/Angstrom, axes span [-q_max, q_max]
    #[arg(long, default_value_t = 0.1)]
    pub q_max: f64,

    /// Number of points per detector axis
    #[arg(short, long, default_value_t = 101)]
    pub size: usize,

    /// Overall intensity scale factor
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Flat background (1/cm)
    #[arg(long, default_value_t = 0.001)]
    pub background: f64,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Figure width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,
}
