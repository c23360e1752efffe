//! # 微磁响应模型
//!
//! 线性化微磁学给出的横向磁化傅里叶分量，一阶近似，
//! 解析解取自 Michels et al., PRB 94, 054424 (2016)。
//!
//! ## 物理图像
//! Mz 为沿外场的纵向磁化分量，趋饱和时近似不随场变化，只反映样品内
//! 饱和磁化强度的纳米尺度涨落；局域各向异性场与偶极场引起的磁化偏转
//! 进入横向分量 Mx、My，它们随场响应。DMI 贡献手性交叉项，驱动虚部：
//! D = 0 时虚部恒为零。
//!
//! ## 单位约定
//! q 取 Å⁻¹（1e10 m⁻¹），交换劲度 A 取 pJ/m（1e-12 J/m），
//! DMI 常数 D 取 mJ/m²（1e-3 J/m²），Hi 与 Ms 取 T，
//! 磁导率按 μ0 = 4π×1e-7 归入数值前因子。
//!
//! ## 依赖关系
//! - 被 `sans/intensity.rs` 在每个易轴节点调用
//! - 纯函数，无外部依赖

/// 微磁材料常数集合
#[derive(Debug, Clone, Copy)]
pub struct Micromagnetics {
    /// 内场 Hi (T)
    pub internal_field: f64,
    /// 饱和磁化 Ms (T)
    pub saturation: f64,
    /// 交换劲度 A (pJ/m)
    pub exchange: f64,
    /// DMI 常数 D (mJ/m²)
    pub dmi: f64,
}

impl Micromagnetics {
    /// 约化场响应函数（磁化率）
    ///
    /// χ(q) = Ms / (Hi_eff + 2A·4π/Ms·q²·10)，Hi 下限 1e-6 防止除零。
    /// 对固定其余参数，χ 随 Hi 与 q² 单调不增。
    pub fn susceptibility(&self, q: f64) -> f64 {
        let hi = self.internal_field.max(1.0e-6);
        self.saturation
            / (hi + 2.0 * self.exchange * 4.0 * std::f64::consts::PI / self.saturation * q * q * 10.0)
    }

    /// DMI 手性长度，方向量：对散射矢量的一个带符号投影线性
    ///
    /// l_D(p) = 2D·4π/Ms²·p。调用方分别以 x、y、z 分量或模长代入，
    /// 构造方向可分辨的手性贡献。
    pub fn chiral_length(&self, projection: f64) -> f64 {
        2.0 * self.dmi * 4.0 * std::f64::consts::PI / (self.saturation * self.saturation)
            * projection
    }

    /// 横向分量共享的分母
    ///
    /// 1 + χ(x²+y²)/q² − (χ·l_D(z))²。某些参数组合下可趋近零
    /// （DMI 驱动的类共振条件），此处不加保护：是否正则化属于
    /// 模型层面的物理决策，产生的 NaN/Inf 原样传给调用方。
    fn denominator(&self, x: f64, y: f64, z: f64, q: f64) -> f64 {
        let chi = self.susceptibility(q);
        let chiral_z = chi * self.chiral_length(z);
        1.0 + chi * (x * x + y * y) / (q * q) - chiral_z * chiral_z
    }

    /// Mx 实部
    pub fn mx_real(&self, qrot: [f64; 3], mz: f64, hkx: f64, hky: f64) -> f64 {
        let [x, y, z] = qrot;
        let q = (x * x + y * y + z * z).sqrt();
        let chi = self.susceptibility(q);
        let l_q = self.chiral_length(q);
        chi * (hkx * (1.0 + chi * y * y / (q * q))
            - self.saturation * mz * x * z / (q * q) * (1.0 + chi * l_q * l_q)
            - hky * chi * x * y / (q * q))
            / self.denominator(x, y, z, q)
    }

    /// Mx 虚部，仅含手性长度项与纵横耦合，D = 0 时恒为零
    pub fn mx_imag(&self, qrot: [f64; 3], mz: f64, _hkx: f64, hky: f64) -> f64 {
        let [x, y, z] = qrot;
        let q = (x * x + y * y + z * z).sqrt();
        let chi = self.susceptibility(q);
        -chi * (self.saturation * mz * (1.0 + chi) * self.chiral_length(y)
            + hky * chi * self.chiral_length(z))
            / self.denominator(x, y, z, q)
    }

    /// My 实部，与 Mx 实部按 (x,z)/(y,z)、(Hkx,Hky) 角色互换对称
    pub fn my_real(&self, qrot: [f64; 3], mz: f64, hkx: f64, hky: f64) -> f64 {
        let [x, y, z] = qrot;
        let q = (x * x + y * y + z * z).sqrt();
        let chi = self.susceptibility(q);
        let l_q = self.chiral_length(q);
        chi * (hky * (1.0 + chi * x * x / (q * q))
            - self.saturation * mz * y * z / (q * q) * (1.0 + chi * l_q * l_q)
            - hkx * chi * x * y / (q * q))
            / self.denominator(x, y, z, q)
    }

    /// My 虚部，D = 0 时恒为零
    pub fn my_imag(&self, qrot: [f64; 3], mz: f64, hkx: f64, _hky: f64) -> f64 {
        let [x, y, z] = qrot;
        let q = (x * x + y * y + z * z).sqrt();
        let chi = self.susceptibility(q);
        chi * (self.saturation * mz * (1.0 + chi) * self.chiral_length(x)
            - hkx * chi * self.chiral_length(z))
            / self.denominator(x, y, z, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(hi: f64, d: f64) -> Micromagnetics {
        Micromagnetics {
            internal_field: hi,
            saturation: 1.0,
            exchange: 10.0,
            dmi: d,
        }
    }

    #[test]
    fn test_susceptibility_monotone_in_field() {
        let q = 0.05;
        let mut prev = f64::INFINITY;
        for hi in [0.0, 0.1, 0.5, 1.0, 2.0, 10.0, 100.0] {
            let chi = material(hi, 0.0).susceptibility(q);
            assert!(
                chi <= prev,
                "susceptibility not monotone: chi({}) = {} > {}",
                hi,
                chi,
                prev
            );
            prev = chi;
        }
    }

    #[test]
    fn test_susceptibility_floor_at_zero_field() {
        let q = 0.05;
        let m = material(0.0, 0.0);
        let expected = m.saturation
            / (1.0e-6
                + 2.0 * m.exchange * 4.0 * std::f64::consts::PI / m.saturation * q * q * 10.0);
        assert!((m.susceptibility(q) - expected).abs() < 1e-12);
        // 下限以下的 Hi 与 Hi = 0 等价
        assert!((material(1e-9, 0.0).susceptibility(q) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_susceptibility_decreases_with_q() {
        let m = material(1.0, 0.0);
        assert!(m.susceptibility(0.01) > m.susceptibility(0.1));
        assert!(m.susceptibility(0.1) > m.susceptibility(0.5));
    }

    #[test]
    fn test_chiral_length_linear_and_odd() {
        let m1 = material(1.0, 1.5);
        let m2 = material(1.0, 3.0);
        let p = 0.07;
        assert!((m2.chiral_length(p) - 2.0 * m1.chiral_length(p)).abs() < 1e-15);
        assert!((m1.chiral_length(-p) + m1.chiral_length(p)).abs() < 1e-15);
        assert!((m1.chiral_length(2.0 * p) - 2.0 * m1.chiral_length(p)).abs() < 1e-15);
        assert!(m1.chiral_length(0.0) == 0.0);
    }

    #[test]
    fn test_imaginary_parts_vanish_without_dmi() {
        let m = material(0.8, 0.0);
        let qrot = [0.03, 0.04, 0.05];
        for (hkx, hky) in [(0.0, 0.0), (120.0, -40.0), (-7.5, 3.0)] {
            for mz in [0.0, 55.0, -210.0] {
                assert!(m.mx_imag(qrot, mz, hkx, hky).abs() < 1e-14);
                assert!(m.my_imag(qrot, mz, hkx, hky).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_real_parts_reduce_to_longitudinal_coupling() {
        // D = 0、Hk = 0 时仅剩纵横耦合项
        let m = material(0.8, 0.0);
        let qrot = [0.03f64, -0.02, 0.06];
        let [x, y, z] = qrot;
        let q2 = x * x + y * y + z * z;
        let q = q2.sqrt();
        let mz = 150.0;
        let chi = m.susceptibility(q);
        let denom = 1.0 + chi * (x * x + y * y) / q2;

        let expected_x = -m.saturation * mz * x * z / q2 * chi / denom;
        let expected_y = -m.saturation * mz * y * z / q2 * chi / denom;
        assert!(
            (m.mx_real(qrot, mz, 0.0, 0.0) - expected_x).abs() < 1e-12 * expected_x.abs(),
            "mx_real = {}, expected {}",
            m.mx_real(qrot, mz, 0.0, 0.0),
            expected_x
        );
        assert!((m.my_real(qrot, mz, 0.0, 0.0) - expected_y).abs() < 1e-12 * expected_y.abs());
    }

    #[test]
    fn test_response_vanishes_at_infinite_field() {
        // Hi → ∞ 时 χ → 0，横向响应消失
        let m = material(1e9, 0.5);
        let qrot = [0.03, 0.04, 0.05];
        assert!(m.mx_real(qrot, 100.0, 50.0, 50.0).abs() < 1e-4);
        assert!(m.my_real(qrot, 100.0, 50.0, 50.0).abs() < 1e-4);
        assert!(m.mx_imag(qrot, 100.0, 50.0, 50.0).abs() < 1e-4);
    }
}
