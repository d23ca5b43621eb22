//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `plot`: 单个图表（嵌套子命令）
//!   - `a2f`: α²F 谱函数
//!   - `aniso`: 各向异性能隙
//!   - `bands`: 能带结构
//! - `batch`: 目录批量绘图
//! - `check-wannier`: QE / Wannier90 能带对比
//! - `restarts`: 列出 EPW 重启模式
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: plot, batch, check

pub mod batch;
pub mod check;
pub mod plot;

use clap::{Parser, Subcommand};

/// supercon - EPW 超导计算结果可视化工具
#[derive(Parser)]
#[command(name = "supercon")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Plotting helpers for EPW superconductivity calculations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Plot a single result (a2f, anisotropic gap, band structure)
    Plot(plot::PlotArgs),

    /// Plot every matching result under a directory in parallel
    Batch(batch::BatchArgs),

    /// Compare Quantum ESPRESSO bands with Wannier90 interpolated bands
    CheckWannier(check::CheckWannierArgs),

    /// List the EPW restart modes
    Restarts,
}
