//! # 磁性 SANS 内核模块
//!
//! 核壳磁性纳米颗粒在外场下的小角中子散射截面计算。
//!
//! ## 子模块
//! - `quadrature`: Gauss-Legendre 节点/权重表
//! - `form_factor`: 核壳球散射振幅与体积/有效半径
//! - `micromag`: 微磁横向响应（磁化率、手性长度、四个傅里叶分量）
//! - `polarization`: 样品系旋转、极化权重、八通道组合
//! - `intensity`: 取向平均与一维/二维强度入口
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/compute/` 使用
//! - 使用 `models/parameters.rs`

pub mod export;
pub mod form_factor;
pub mod intensity;
pub mod micromag;
pub mod plot;
pub mod polarization;
pub mod quadrature;

pub use form_factor::{core_shell_amplitude, effective_radius, form_volume};
pub use intensity::{iq, iqxy};
