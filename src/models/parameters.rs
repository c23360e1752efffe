//! # 模型参数集
//!
//! 核壳磁性颗粒微磁散射模型的一组物理参数，逐次求值时整体传入，
//! 不在调用间保留任何状态。
//!
//! ## 依赖关系
//! - 被 `sans/intensity.rs` 与 `commands/compute/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 一组模型参数
///
/// 长度单位 Å，散射长度密度单位 1e-6/Å²，场量单位 T，
/// 交换劲度单位 pJ/m，DMI 常数单位 mJ/m²，角度单位度。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    /// 核半径 (Å)
    pub radius: f64,
    /// 壳厚度 (Å)
    pub thickness: f64,
    /// 核的核散射长度密度
    pub nuc_sld_core: f64,
    /// 壳的核散射长度密度
    pub nuc_sld_shell: f64,
    /// 溶剂的核散射长度密度
    pub nuc_sld_solvent: f64,
    /// 核的磁散射长度密度
    pub mag_sld_core: f64,
    /// 壳的磁散射长度密度
    pub mag_sld_shell: f64,
    /// 溶剂的磁散射长度密度
    pub mag_sld_solvent: f64,
    /// 核的各向异性场散射长度密度（仅核带有效各向异性）
    pub hk_sld_core: f64,
    /// 内场 Hi (T)
    pub internal_field: f64,
    /// 饱和磁化 Ms (T)
    pub saturation: f64,
    /// 交换劲度 A (pJ/m)
    pub exchange: f64,
    /// DMI 常数 D (mJ/m²)
    pub dmi: f64,
    /// 入射束极化效率
    pub up_i: f64,
    /// 出射束分析效率
    pub up_f: f64,
    /// 外场相对中子束的倾角 (度)
    pub alpha: f64,
    /// 外场在探测器平面内的转角 (度)
    pub beta: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters {
            radius: 50.0,
            thickness: 40.0,
            nuc_sld_core: 1.0,
            nuc_sld_shell: 1.7,
            nuc_sld_solvent: 6.4,
            mag_sld_core: 1.0,
            mag_sld_shell: 1.7,
            mag_sld_solvent: 3.0,
            hk_sld_core: 1.0,
            internal_field: 2.0,
            saturation: 1.0,
            exchange: 10.0,
            dmi: 0.0,
            up_i: 0.5,
            up_f: 0.5,
            alpha: 90.0,
            beta: 0.0,
        }
    }
}

impl ModelParameters {
    /// 外半径 r + t (Å)
    pub fn outer_radius(&self) -> f64 {
        self.radius + self.thickness
    }

    /// 按 (名称, 数值, 单位) 列出全部参数，供终端回显
    pub fn describe(&self) -> Vec<(&'static str, f64, &'static str)> {
        vec![
            ("radius", self.radius, "Å"),
            ("thickness", self.thickness, "Å"),
            ("nuc_sld_core", self.nuc_sld_core, "1e-6/Å²"),
            ("nuc_sld_shell", self.nuc_sld_shell, "1e-6/Å²"),
            ("nuc_sld_solvent", self.nuc_sld_solvent, "1e-6/Å²"),
            ("mag_sld_core", self.mag_sld_core, "1e-6/Å²"),
            ("mag_sld_shell", self.mag_sld_shell, "1e-6/Å²"),
            ("mag_sld_solvent", self.mag_sld_solvent, "1e-6/Å²"),
            ("hk_sld_core", self.hk_sld_core, "1e-6/Å²"),
            ("Hi", self.internal_field, "T"),
            ("Ms", self.saturation, "T"),
            ("A", self.exchange, "pJ/m"),
            ("D", self.dmi, "mJ/m²"),
            ("up_i", self.up_i, ""),
            ("up_f", self.up_f, ""),
            ("alpha", self.alpha, "deg"),
            ("beta", self.beta, "deg"),
        ]
    }
}
