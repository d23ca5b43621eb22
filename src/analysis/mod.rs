//! # 数值后处理模块
//!
//! ## 子模块
//! - `eliashberg`: λ, ω_log, Allen-Dynes Tc
//! - `aniso`: 各向异性能隙文件汇总与加权平均
//! - `gap_fit`: BCS 型能隙-温度拟合
//! - `clusters`: 温度聚类
//! - `export`: CSV 导出
//!
//! ## 依赖关系
//! - 被 `plot/` 和 `commands/` 使用
//! - 使用 `models/`, `parsers/`

pub mod aniso;
pub mod clusters;
pub mod eliashberg;
pub mod export;
pub mod gap_fit;

pub use aniso::{aggregate, weighted_average, ANISO_GAP_PREFIX};
pub use clusters::{find_clusters, Cluster};
pub use eliashberg::{allen_dynes, lambda_omega_log, CouplingSummary, DEFAULT_MU_STAR};
pub use gap_fit::fit_gap;
