//! # 核壳球形因子
//!
//! 球形核壳颗粒的散射振幅基元。
//!
//! ## 公式
//! F(q) = V_core·(ρ_core−ρ_shell)·Φ(qr) + V_outer·(ρ_shell−ρ_solv)·Φ(qR)
//! 其中 Φ(x) = 3(sin x − x cos x)/x³ = 3 j₁(x)/x，R = r + t。
//!
//! ## 依赖关系
//! - 被 `sans/intensity.rs` 调用计算核磁振幅与各向异性场振幅
//! - 纯函数，无外部依赖

use std::f64::consts::PI;

/// |x| 小于该值时用 Taylor 级数求 Φ(x)，避免相消误差
const SPH_J1C_CUTOFF: f64 = 0.1;

/// 球形因子 Φ(x) = 3 j₁(x)/x，Φ(0) = 1
pub fn sphere_form(x: f64) -> f64 {
    if x.abs() < SPH_J1C_CUTOFF {
        let x2 = x * x;
        1.0 + x2 * (-1.0 / 10.0 + x2 * (1.0 / 280.0 + x2 * (-1.0 / 15120.0)))
    } else {
        let (sin_x, cos_x) = x.sin_cos();
        3.0 * (sin_x / x - cos_x) / (x * x)
    }
}

/// 核壳球散射振幅
///
/// q 单位 Å⁻¹，radius/thickness 单位 Å，散射长度密度单位 1e-6/Å²。
/// 三元组中允许任意分量为零（如仅核带各向异性场衬度）。
pub fn core_shell_amplitude(
    q: f64,
    radius: f64,
    thickness: f64,
    core_sld: f64,
    shell_sld: f64,
    solvent_sld: f64,
) -> f64 {
    let core_volume = 4.0 * PI / 3.0 * radius.powi(3);
    let outer_radius = radius + thickness;
    let outer_volume = 4.0 * PI / 3.0 * outer_radius.powi(3);

    core_volume * (core_sld - shell_sld) * sphere_form(q * radius)
        + outer_volume * (shell_sld - solvent_sld) * sphere_form(q * outer_radius)
}

/// 颗粒总体积 (4π/3)(r+t)³
pub fn form_volume(radius: f64, thickness: f64) -> f64 {
    4.0 * PI / 3.0 * (radius + thickness).powi(3)
}

/// 有效半径选择：mode 2 取核半径，其余一律取外半径
pub fn effective_radius(mode: i32, radius: f64, thickness: f64) -> f64 {
    if mode == 2 {
        radius
    } else {
        radius + thickness
    }
}
