//! # 电声谱函数与各向异性能隙数据模型
//!
//! ## 依赖关系
//! - 被 `parsers/` 构造
//! - 被 `analysis/` 和 `plot/` 使用

use serde::{Deserialize, Serialize};

/// Eliashberg 谱函数 α²F(ω)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct A2fSpectrum {
    /// 频率 (meV)
    pub frequency: Vec<f64>,
    /// α²F 值
    pub a2f: Vec<f64>,
}

impl A2fSpectrum {
    pub fn new(frequency: Vec<f64>, a2f: Vec<f64>) -> Self {
        A2fSpectrum { frequency, a2f }
    }

    pub fn len(&self) -> usize {
        self.frequency.len().min(self.a2f.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (ω, α²F) 点对
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequency.iter().copied().zip(self.a2f.iter().copied())
    }
}

/// 单个温度文件中的能隙曲线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapCurve {
    /// 来源文件名
    pub name: String,
    /// 温度 (K)
    pub temperature: Vec<f64>,
    /// 能隙 Δ_nk (meV)
    pub delta: Vec<f64>,
}

impl GapCurve {
    pub fn min_temperature(&self) -> Option<f64> {
        self.temperature.iter().copied().reduce(f64::min)
    }
}

/// 所有能隙文件的汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapSummary {
    /// 原始曲线（列表顺序）
    pub curves: Vec<GapCurve>,
    /// 每个文件的最低温度
    pub temperatures: Vec<f64>,
    /// 每个文件以温度为权重的平均能隙
    pub average_deltas: Vec<f64>,
    /// 被跳过的文件及原因
    pub warnings: Vec<String>,
}

impl GapSummary {
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }
}

/// BCS 型能隙拟合结果: Δ(T) = Δ₀ (1 - (T/Tc)^p)^½
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapFit {
    pub exponent: f64,
    pub delta_zero: f64,
    pub critical_temperature: f64,
}
