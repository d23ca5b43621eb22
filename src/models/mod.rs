//! # 数据模型模块
//!
//! 定义能带、谱函数、能隙数据以及工作流重启标签。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `analysis/`, `plot/` 和 `commands/` 使用
//! - 子模块: bands, spectrum, store, restart

pub mod bands;
pub mod restart;
pub mod spectrum;
pub mod store;

pub use bands::{BandsData, SeekpathParams};
pub use restart::RestartType;
pub use spectrum::{A2fSpectrum, GapCurve, GapFit, GapSummary};
pub use store::{CalcNode, FolderStore, ObjectStore};
