//! # 散射强度求值
//!
//! 把形状因子、微磁响应与极化组合接成最终的散射截面：
//! 对局域易轴取向做 Gauss-Legendre 平均（各颗粒随机取向、互不关联的
//! 各向同性系综），一维情形再对探测器方位角做一层同样的平均。
//!
//! ## 结构
//! 内层 γ 积分始终存在；`iq` 在其外再套 θ 积分，且每个 θ 节点都要
//! 重新旋转散射矢量，双层嵌套不可代数合并。只依赖 q 的量
//! （mz、nuc、各向异性场振幅、极化权重）在循环外求好。
//!
//! ## 依赖关系
//! - 被 `commands/compute/` 调用
//! - 使用 `sans/form_factor.rs`、`sans/micromag.rs`、
//!   `sans/polarization.rs`、`sans/quadrature.rs`
//! - 使用 `models/parameters.rs` 的 ModelParameters

use crate::models::ModelParameters;
use crate::sans::form_factor::core_shell_amplitude;
use crate::sans::micromag::Micromagnetics;
use crate::sans::polarization::{
    polarization_weights, polarized_cross_sections, rotate_to_sample_frame, ChannelValues,
};
use crate::sans::quadrature::{GaussLegendre, GAUSS76};

use std::f64::consts::PI;

/// 一维（粉末平均）散射强度 I(q)
///
/// 探测器方位角 θ 与易轴角 γ 的双层 76 点 Gauss-Legendre 积分，
/// 尺度因子 0.25e-4 把内部振幅平方单位换算到 cm⁻¹
/// 并吸收双重积分的归一化。
pub fn iq(q: f64, params: &ModelParameters) -> f64 {
    iq_with_rule(q, params, &GAUSS76)
}

/// 二维（探测器矢量给定）散射强度 I(qx, qy)
///
/// |q| ≤ 1e-16 时返回 0.0；尺度因子 0.5e-4（单层 γ 积分）。
pub fn iqxy(qx: f64, qy: f64, params: &ModelParameters) -> f64 {
    iqxy_with_rule(qx, qy, params, &GAUSS76)
}

/// 指定求积规则的 I(q)，收敛性测试用
pub(crate) fn iq_with_rule(q: f64, params: &ModelParameters, rule: &GaussLegendre) -> f64 {
    let weights = polarization_weights(params.up_i, params.up_f);
    let (mz, nuc, hk_amplitude) = per_q_amplitudes(q, params);
    let response = material_response(params);

    let mut total = 0.0;
    for (node, weight) in rule.iter() {
        let theta = PI * (node + 1.0); // 0 .. 2π
        let (sin_theta, cos_theta) = theta.sin_cos();
        let qrot = rotate_to_sample_frame(q, cos_theta, sin_theta, params.alpha, params.beta);
        total += weight
            * easy_axis_average(qrot, mz, nuc, hk_amplitude, &weights, &response, rule);
    }
    0.25e-4 * total
}

/// 指定求积规则的 I(qx, qy)
pub(crate) fn iqxy_with_rule(
    qx: f64,
    qy: f64,
    params: &ModelParameters,
    rule: &GaussLegendre,
) -> f64 {
    let q = qx.hypot(qy);
    if q <= 1.0e-16 {
        return 0.0;
    }

    let cos_theta = qx / q;
    let sin_theta = qy / q;
    let qrot = rotate_to_sample_frame(q, cos_theta, sin_theta, params.alpha, params.beta);

    let weights = polarization_weights(params.up_i, params.up_f);
    let (mz, nuc, hk_amplitude) = per_q_amplitudes(q, params);
    let response = material_response(params);

    0.5e-4 * easy_axis_average(qrot, mz, nuc, hk_amplitude, &weights, &response, rule)
}

/// 对随机取向的局域易轴角 γ ∈ [0, 2π) 做 Gauss-Legendre 平均
///
/// 每个节点：Hkx = A_k·sin γ，Hky = A_k·cos γ，求四个横向磁化分量，
/// 交给极化组合得到八通道振幅，加权平方求和后按节点权重累加。
/// 织构材料的取向分布需另行加权，
/// 参见 Weissmueller et al., PRB 63, 214414 (2001)。
pub(crate) fn easy_axis_average(
    qrot: [f64; 3],
    mz: f64,
    nuc: f64,
    hk_amplitude: f64,
    weights: &ChannelValues,
    response: &Micromagnetics,
    rule: &GaussLegendre,
) -> f64 {
    let [x, y, z] = qrot;
    let mut total = 0.0;
    for (node, weight) in rule.iter() {
        let gamma = PI * (node + 1.0); // 0 .. 2π
        let (sin_gamma, cos_gamma) = gamma.sin_cos();
        let hkx = hk_amplitude * sin_gamma;
        let hky = hk_amplitude * cos_gamma;

        let mx_real = response.mx_real(qrot, mz, hkx, hky);
        let mx_imag = response.mx_imag(qrot, mz, hkx, hky);
        let my_real = response.my_real(qrot, mz, hkx, hky);
        let my_imag = response.my_imag(qrot, mz, hkx, hky);

        let sld = polarized_cross_sections(x, y, z, mx_real, mx_imag, my_real, my_imag, mz, nuc);
        total += weight * sld.weighted_square_sum(weights);
    }
    total
}

/// 只依赖 q 的三个核壳振幅：纵向磁化、核、各向异性场
///
/// 各向异性场只由颗粒核贡献（壳与溶剂衬度为零）；更复杂的空间分布
/// 参见 Michels, PRB 82, 024433 (2010)。
fn per_q_amplitudes(q: f64, params: &ModelParameters) -> (f64, f64, f64) {
    let mz = core_shell_amplitude(
        q,
        params.radius,
        params.thickness,
        params.mag_sld_core,
        params.mag_sld_shell,
        params.mag_sld_solvent,
    );
    let nuc = core_shell_amplitude(
        q,
        params.radius,
        params.thickness,
        params.nuc_sld_core,
        params.nuc_sld_shell,
        params.nuc_sld_solvent,
    );
    let hk_amplitude = core_shell_amplitude(
        q,
        params.radius,
        params.thickness,
        params.hk_sld_core,
        0.0,
        0.0,
    );
    (mz, nuc, hk_amplitude)
}

fn material_response(params: &ModelParameters) -> Micromagnetics {
    Micromagnetics {
        internal_field: params.internal_field,
        saturation: params.saturation,
        exchange: params.exchange,
        dmi: params.dmi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iqxy_zero_vector_guard() {
        let p = ModelParameters::default();
        assert_eq!(iqxy(0.0, 0.0, &p), 0.0);
        assert_eq!(iqxy(1e-17, 0.0, &p), 0.0);
    }

    #[test]
    fn test_iq_finite_and_positive_for_defaults() {
        let p = ModelParameters::default();
        for q in [0.001, 0.01, 0.1] {
            let i = iq(q, &p);
            assert!(i.is_finite() && i > 0.0, "Iq({}) = {}", q, i);
        }
    }

    #[test]
    fn test_contrast_matched_nuclear_drops_out() {
        // 核衬度匹配（三个核 SLD 相同）等价于核 SLD 全零
        let matched = ModelParameters {
            nuc_sld_core: 1e-6,
            nuc_sld_shell: 1e-6,
            nuc_sld_solvent: 1e-6,
            ..Default::default()
        };
        let zeroed = ModelParameters {
            nuc_sld_core: 0.0,
            nuc_sld_shell: 0.0,
            nuc_sld_solvent: 0.0,
            ..matched.clone()
        };

        for q in [0.005, 0.05] {
            let a = iq(q, &matched);
            let b = iq(q, &zeroed);
            assert!(
                ((a - b) / b).abs() < 1e-12,
                "contrast-matched Iq differs: {} vs {}",
                a,
                b
            );
            let a2 = iqxy(q, q / 2.0, &matched);
            let b2 = iqxy(q, q / 2.0, &zeroed);
            assert!(((a2 - b2) / b2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_easy_axis_average_nsf_weight_scaling() {
        // 非自旋翻转通道各取权重 0.25 时，平均值恰为满权重的四分之一
        let response = Micromagnetics {
            internal_field: 1.0,
            saturation: 1.0,
            exchange: 10.0,
            dmi: 0.5,
        };
        let qrot = [0.03, 0.04, 0.05];
        let rule = GaussLegendre::new(40);

        let quarter = ChannelValues {
            dd_real: 0.25,
            dd_imag: 0.25,
            uu_real: 0.25,
            uu_imag: 0.25,
            ..Default::default()
        };
        let full = ChannelValues {
            dd_real: 1.0,
            dd_imag: 1.0,
            uu_real: 1.0,
            uu_imag: 1.0,
            ..Default::default()
        };

        let a = easy_axis_average(qrot, 60.0, 90.0, 25.0, &quarter, &response, &rule);
        let b = easy_axis_average(qrot, 60.0, 90.0, 25.0, &full, &response, &rule);
        assert!(
            ((a - 0.25 * b) / b).abs() < 1e-12,
            "NSF-weighted average {} vs quarter of {}",
            a,
            b
        );
    }

    #[test]
    fn test_quadrature_convergence_in_node_count() {
        let p = ModelParameters {
            internal_field: 0.5,
            dmi: 1.0,
            ..Default::default()
        };

        let q = 0.05;
        let coarse = iq_with_rule(q, &p, &GaussLegendre::new(40));
        let fine = iq_with_rule(q, &p, &GaussLegendre::new(80));
        assert!(
            ((coarse - fine) / fine).abs() < 1e-4,
            "Iq not converged: N=40 gives {}, N=80 gives {}",
            coarse,
            fine
        );
    }

    #[test]
    fn test_uniform_magnetization_regression() {
        // 磁 SLD 全同（mz = 0）、无各向异性、D = 0、A = 0、大内场：
        // 只剩核散射，I = 1e-4·nuc²，与 γ、DMI 无关
        let p = ModelParameters {
            mag_sld_core: 1.0,
            mag_sld_shell: 1.0,
            mag_sld_solvent: 1.0,
            hk_sld_core: 0.0,
            dmi: 0.0,
            exchange: 0.0,
            internal_field: 1000.0,
            ..Default::default()
        };

        for q in [0.01, 0.07] {
            let nuc = core_shell_amplitude(
                q,
                p.radius,
                p.thickness,
                p.nuc_sld_core,
                p.nuc_sld_shell,
                p.nuc_sld_solvent,
            );
            let expected = 1.0e-4 * nuc * nuc;

            let i1 = iq(q, &p);
            assert!(
                ((i1 - expected) / expected).abs() < 1e-8,
                "Iq({}) = {}, expected {}",
                q,
                i1,
                expected
            );

            // 二维求值的归一化（0.5e-4 × Σw = 2）给出同一极限
            let i2 = iqxy(q, 0.0, &p);
            assert!(((i2 - expected) / expected).abs() < 1e-8);
        }
    }
}
