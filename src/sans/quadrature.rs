//! # Gauss-Legendre 求积
//!
//! 提供 [-1, 1] 区间上的 Gauss-Legendre 节点/权重表。
//!
//! ## 算法
//! 节点为 Legendre 多项式 Pₙ 的根，用三项递推求值并以 Newton 迭代求根，
//! 初始猜测取 Chebyshev 近似 cos(π(i+3/4)/(n+1/2))。
//! 权重 wᵢ = 2 / ((1-xᵢ²) Pₙ'(xᵢ)²)。
//! n 点规则对次数 ≤ 2n-1 的多项式精确。
//!
//! ## 依赖关系
//! - 被 `sans/intensity.rs` 用于取向平均
//! - 纯数值计算，无外部依赖

use std::f64::consts::PI;
use std::sync::LazyLock;

/// 默认节点数（方位角与易轴角积分共用）
pub const GAUSS_N: usize = 76;

/// 共享的 76 点规则，首次使用时构建一次，之后只读
pub static GAUSS76: LazyLock<GaussLegendre> = LazyLock::new(|| GaussLegendre::new(GAUSS_N));

/// Gauss-Legendre 求积规则
#[derive(Debug, Clone)]
pub struct GaussLegendre {
    /// 节点，升序排列于 (-1, 1)
    nodes: Vec<f64>,
    /// 对应权重，总和为 2
    weights: Vec<f64>,
}

impl GaussLegendre {
    /// 构建 n 点规则（n ≥ 2）
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "Gauss-Legendre rule needs at least 2 nodes");

        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];

        // 根关于原点对称，只求一半
        let half = n.div_ceil(2);
        for i in 0..half {
            let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();

            // Newton 迭代
            let mut dp = 0.0;
            for _ in 0..100 {
                let (p, d) = legendre_with_derivative(n, x);
                dp = d;
                let dx = p / d;
                x -= dx;
                if dx.abs() < 1e-15 {
                    break;
                }
            }

            let w = 2.0 / ((1.0 - x * x) * dp * dp);
            nodes[i] = -x;
            weights[i] = w;
            nodes[n - 1 - i] = x;
            weights[n - 1 - i] = w;
        }

        GaussLegendre { nodes, weights }
    }

    /// 节点数
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 遍历 (节点, 权重) 对
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes
            .iter()
            .zip(self.weights.iter())
            .map(|(&z, &w)| (z, w))
    }
}

/// 返回 (Pₙ(x), Pₙ'(x))
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 2..=n {
        let k = k as f64;
        let p_next = ((2.0 * k - 1.0) * x * p - (k - 1.0) * p_prev) / k;
        p_prev = p;
        p = p_next;
    }
    // 根均在开区间 (-1, 1) 内，分母不为零
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}
