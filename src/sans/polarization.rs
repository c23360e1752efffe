//! # 极化中子截面组合
//!
//! 散射矢量的样品系旋转、极化效率权重，以及把磁化与核振幅组合成
//! 八个极化通道振幅的 Halpern-Johnson / Moon-Riste-Koehler 方案
//! (Moon, Riste, Koehler, Phys. Rev. 181, 920 (1969))。
//!
//! ## 通道约定
//! 八个通道按 (dd, uu, du, ud) × (实部, 虚部) 固定排列，
//! 极化轴沿样品系 z 轴（外场方向）：
//! dd = nuc + M⊥z，uu = nuc − M⊥z，du = M⊥x − i·M⊥y，ud = M⊥x + i·M⊥y。
//!
//! ## 依赖关系
//! - 被 `sans/intensity.rs` 在每个求积节点调用
//! - 纯函数，无外部依赖

/// 八个极化通道上的一组数值（振幅或权重）
///
/// 固定大小的命名元组而非一般集合，保持通道语义明确。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelValues {
    pub dd_real: f64,
    pub dd_imag: f64,
    pub uu_real: f64,
    pub uu_imag: f64,
    pub du_real: f64,
    pub du_imag: f64,
    pub ud_real: f64,
    pub ud_imag: f64,
}

impl ChannelValues {
    /// 按固定顺序展开：dd.re, dd.im, uu.re, uu.im, du.re, du.im, ud.re, ud.im
    pub fn to_array(self) -> [f64; 8] {
        [
            self.dd_real,
            self.dd_imag,
            self.uu_real,
            self.uu_imag,
            self.du_real,
            self.du_imag,
            self.ud_real,
            self.ud_imag,
        ]
    }

    /// 加权平方和 Σ wᵢ·vᵢ²，权重 ≤ 1e-8 的通道视为可忽略并跳过
    pub fn weighted_square_sum(&self, weights: &ChannelValues) -> f64 {
        let values = self.to_array();
        let weights = weights.to_array();
        let mut total = 0.0;
        for (value, weight) in values.iter().zip(weights.iter()) {
            if *weight > 1.0e-8 {
                total += weight * value * value;
            }
        }
        total
    }
}

/// 把探测器平面上的散射矢量旋转进样品坐标系
///
/// 外场沿样品系 (0,0,1)，探测器取向绕场进动，倾角由 (cosθ, sinθ) 给出；
/// alpha 为场相对中子束的倾角，beta 为场在探测器平面内的转角，单位度。
pub fn rotate_to_sample_frame(
    q: f64,
    cos_theta: f64,
    sin_theta: f64,
    alpha: f64,
    beta: f64,
) -> [f64; 3] {
    let (sin_alpha, cos_alpha) = alpha.to_radians().sin_cos();
    let (sin_beta, cos_beta) = beta.to_radians().sin_cos();

    [
        q * (cos_alpha * cos_theta),
        q * (cos_theta * sin_alpha * sin_beta + cos_beta * sin_theta),
        q * (-cos_beta * cos_theta * sin_alpha + sin_beta * sin_theta),
    ]
}

/// 由入射/出射极化效率导出八通道权重
///
/// 效率先取绝对值并夹到 [0,1]；归一化因子取 up_f（up_f < 0.5 时取
/// 1 − up_f），保证自旋分辨截面相加还原半极化/非极化测量。
/// 同一通道的实部与虚部槽位共享权重；权重之和不必为 1。
pub fn polarization_weights(up_i: f64, up_f: f64) -> ChannelValues {
    let in_spin = up_i.abs().clamp(0.0, 1.0);
    let out_spin = up_f.abs().clamp(0.0, 1.0);

    let norm = if out_spin < 0.5 {
        1.0 - out_spin
    } else {
        out_spin
    };

    let dd = (1.0 - in_spin) * (1.0 - out_spin) / norm;
    let uu = in_spin * out_spin / norm;
    let du = (1.0 - in_spin) * out_spin / norm;
    let ud = in_spin * (1.0 - out_spin) / norm;

    ChannelValues {
        dd_real: dd,
        dd_imag: dd,
        uu_real: uu,
        uu_imag: uu,
        du_real: du,
        du_imag: du,
        ud_real: ud,
        ud_imag: ud,
    }
}

/// 把磁化傅里叶分量与核振幅组合成八个极化通道振幅
///
/// 先取 Halpern-Johnson 矢量 M⊥ = M − (M·q̂)q̂（Mz 为实数），
/// 再按模块头部的通道约定展开实部与虚部。
#[allow(clippy::too_many_arguments)]
pub fn polarized_cross_sections(
    qx: f64,
    qy: f64,
    qz: f64,
    mx_real: f64,
    mx_imag: f64,
    my_real: f64,
    my_imag: f64,
    mz: f64,
    nuc: f64,
) -> ChannelValues {
    let q_sq = qx * qx + qy * qy + qz * qz;

    // (M·q)/q² 的实部与虚部
    let dot_real = (mx_real * qx + my_real * qy + mz * qz) / q_sq;
    let dot_imag = (mx_imag * qx + my_imag * qy) / q_sq;

    let perp_x_real = mx_real - dot_real * qx;
    let perp_x_imag = mx_imag - dot_imag * qx;
    let perp_y_real = my_real - dot_real * qy;
    let perp_y_imag = my_imag - dot_imag * qy;
    let perp_z_real = mz - dot_real * qz;
    let perp_z_imag = -dot_imag * qz;

    ChannelValues {
        dd_real: nuc + perp_z_real,
        dd_imag: perp_z_imag,
        uu_real: nuc - perp_z_real,
        uu_imag: -perp_z_imag,
        du_real: perp_x_real + perp_y_imag,
        du_imag: perp_x_imag - perp_y_real,
        ud_real: perp_x_real - perp_y_imag,
        ud_imag: perp_x_imag + perp_y_real,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_preserves_magnitude() {
        let q = 0.12;
        for (alpha, beta, theta) in [(90.0, 0.0, 0.3), (35.0, 120.0, 1.7), (0.0, 45.0, 4.4)] {
            let (sin_t, cos_t) = (theta as f64).sin_cos();
            let [x, y, z] = rotate_to_sample_frame(q, cos_t, sin_t, alpha, beta);
            let mag = (x * x + y * y + z * z).sqrt();
            assert!(
                (mag - q).abs() < 1e-12,
                "rotation changed |q|: {} vs {}",
                mag,
                q
            );
        }
    }

    #[test]
    fn test_rotation_field_in_plane_geometry() {
        // alpha = 90°, beta = 0°：探测器 x 方向映到样品系 -z（沿场）
        let q = 0.1;
        let [x, y, z] = rotate_to_sample_frame(q, 1.0, 0.0, 90.0, 0.0);
        assert!(x.abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!((z + q).abs() < 1e-12);
        // 探测器 y 方向垂直于场
        let [x, y, z] = rotate_to_sample_frame(q, 0.0, 1.0, 90.0, 0.0);
        assert!(x.abs() < 1e-12);
        assert!((y - q).abs() < 1e-12);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_weights_half_polarized() {
        // up_i = up_f = 0.5：八个槽位权重均为 0.5
        let w = polarization_weights(0.5, 0.5);
        for v in w.to_array() {
            assert!((v - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weights_fully_polarized() {
        // 完全极化、完全分析：只剩 uu 通道
        let w = polarization_weights(1.0, 1.0);
        assert!((w.uu_real - 1.0).abs() < 1e-12);
        assert!(w.dd_real.abs() < 1e-12);
        assert!(w.du_real.abs() < 1e-12);
        assert!(w.ud_real.abs() < 1e-12);
    }

    #[test]
    fn test_weights_unpolarized_beam() {
        // up_i = up_f = 0：非自旋翻转 dd 通道权重 1
        let w = polarization_weights(0.0, 0.0);
        assert!((w.dd_real - 1.0).abs() < 1e-12);
        assert!(w.uu_real.abs() < 1e-12);
    }

    #[test]
    fn test_weights_clamp_out_of_range() {
        let inside = polarization_weights(1.0, 1.0);
        let outside = polarization_weights(1.7, -1.0);
        assert_eq!(inside, outside);
    }

    #[test]
    fn test_combiner_kills_parallel_magnetization() {
        // M ∥ q 时 M⊥ = 0，只剩核振幅
        let (qx, qy, qz) = (0.0, 0.0, 0.1);
        let mz = 42.0;
        let sld = polarized_cross_sections(qx, qy, qz, 0.0, 0.0, 0.0, 0.0, mz, 7.0);
        assert!((sld.dd_real - 7.0).abs() < 1e-12);
        assert!((sld.uu_real - 7.0).abs() < 1e-12);
        assert!(sld.dd_imag.abs() < 1e-12);
        assert!(sld.du_real.abs() < 1e-12);
        assert!(sld.ud_imag.abs() < 1e-12);
    }

    #[test]
    fn test_combiner_transverse_magnetization() {
        // q ∥ x，M 沿 z：M⊥ = M，非自旋翻转通道带 ±Mz 干涉项
        let sld = polarized_cross_sections(0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 1.0);
        assert!((sld.dd_real - (1.0 + 3.0)).abs() < 1e-12);
        assert!((sld.uu_real - (1.0 - 3.0)).abs() < 1e-12);
        assert!(sld.du_real.abs() < 1e-12);
    }

    #[test]
    fn test_weighted_square_sum_skips_negligible() {
        let values = ChannelValues {
            dd_real: 2.0,
            uu_real: 3.0,
            ..Default::default()
        };
        let weights = ChannelValues {
            dd_real: 0.25,
            uu_real: 1.0e-9, // 低于阈值，跳过
            ..Default::default()
        };
        let total = values.weighted_square_sum(&weights);
        assert!((total - 0.25 * 4.0).abs() < 1e-12);
    }
}
