//! # 能带数据模型
//!
//! 能带结构与高对称路径元数据。
//!
//! ## 依赖关系
//! - 被 `parsers/bands.rs` 构造
//! - 被 `plot/bands.rs`, `plot/comparison.rs`, `plot/ticks.rs` 使用

use serde::{Deserialize, Serialize};

/// 能带结构
///
/// `bands[i][k]` 为第 i 条能带在第 k 个 k 点上的能量 (eV)。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BandsData {
    /// 按能带组织的能量序列
    pub bands: Vec<Vec<f64>>,

    /// 高对称点标签
    #[serde(default)]
    pub labels: Vec<String>,

    /// 高对称点对应的 k 点索引（从 0 开始）
    #[serde(default)]
    pub label_numbers: Vec<usize>,
}

impl BandsData {
    pub fn new(bands: Vec<Vec<f64>>) -> Self {
        BandsData {
            bands,
            labels: Vec::new(),
            label_numbers: Vec::new(),
        }
    }

    /// 附加高对称点标签
    pub fn with_labels(mut self, labels: Vec<String>, label_numbers: Vec<usize>) -> Self {
        self.labels = labels;
        self.label_numbers = label_numbers;
        self
    }

    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// k 点数（取最长能带）
    pub fn num_kpoints(&self) -> usize {
        self.bands.iter().map(|b| b.len()).max().unwrap_or(0)
    }

    /// 能量范围 (min, max)，无数据时返回 None
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        let mut values = self.bands.iter().flatten().copied().filter(|e| e.is_finite());
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), e| (lo.min(e), hi.max(e))))
    }

    /// 平移所有能量（通常减去费米能）
    pub fn shifted(&self, reference_energy: f64) -> Vec<Vec<f64>> {
        self.bands
            .iter()
            .map(|band| band.iter().map(|e| e - reference_energy).collect())
            .collect()
    }
}

/// Seek-path 路径参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekpathParams {
    /// 每段路径的起止标签
    pub path: Vec<(String, String)>,

    /// 每段路径的起止 k 点索引
    pub explicit_segments: Vec<(usize, usize)>,
}
