//! # 解析器模块
//!
//! 提供 EPW、Wannier90 和 Quantum ESPRESSO 输出的解析器。
//!
//! ## 依赖关系
//! - 被 `analysis/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: columns, a2f, bands, params

pub mod a2f;
pub mod bands;
pub mod columns;
pub mod params;
