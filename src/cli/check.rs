//! # check-wannier 子命令 CLI 定义
//!
//! 对比 Quantum ESPRESSO 能带与 Wannier90 插值能带。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::Args;
use std::path::PathBuf;

/// check-wannier 子命令参数
#[derive(Args, Debug)]
pub struct CheckWannierArgs {
    /// Quantum ESPRESSO bands (JSON or gnuplot band file)
    #[arg(long)]
    pub reference: PathBuf,

    /// Wannier90 interpolated bands (JSON or gnuplot band file with labelinfo)
    #[arg(long)]
    pub wannier: PathBuf,

    /// Fermi energy of the QE bands: a number (eV), a calculation directory, a parameter JSON or a QE output file
    #[arg(long, allow_hyphen_values = true)]
    pub fermi_reference: String,

    /// Fermi energy of the Wannier90 bands: a number (eV), a calculation directory, a parameter JSON or a QE output file
    #[arg(long, allow_hyphen_values = true)]
    pub fermi_wannier: String,

    /// Output image (saved at 2400x1800)
    #[arg(short, long, default_value = "wannier_check.png")]
    pub output: PathBuf,
}
