//! # plot 子命令 CLI 定义
//!
//! 单个图表的统一入口，包含多个子命令：
//! - `a2f`: α²F 谱函数
//! - `aniso`: 各向异性能隙及拟合
//! - `bands`: 能带结构
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/batch.rs`, `cli/check.rs` 使用
//! - 参数传递给 `commands/plot/` 相应模块

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Plot 主命令
// ─────────────────────────────────────────────────────────────

/// plot 主命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(subcommand)]
    pub command: PlotCommands,
}

/// plot 子命令
#[derive(Subcommand, Debug)]
pub enum PlotCommands {
    /// Plot the Eliashberg spectral function a2F(w)
    A2f(A2fArgs),

    /// Plot the anisotropic gap against temperature, optionally with a fit
    Aniso(AnisoArgs),

    /// Plot a band structure with high-symmetry labels
    Bands(BandsArgs),
}

// ─────────────────────────────────────────────────────────────
// 公共图像参数
// ─────────────────────────────────────────────────────────────

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// 图像尺寸与格式
#[derive(Args, Debug, Clone)]
pub struct FigureArgs {
    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, env = "SUPERCON_WIDTH", default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, env = "SUPERCON_HEIGHT", default_value_t = 900)]
    pub height: u32,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormat>,
}

// ─────────────────────────────────────────────────────────────
// a2F 子命令
// ─────────────────────────────────────────────────────────────

/// a2f 子命令参数
#[derive(Args, Debug)]
pub struct A2fArgs {
    /// EPW a2F file (frequency in meV followed by one column per smearing)
    pub input: PathBuf,

    /// Which a2F column to plot (1 = first smearing)
    #[arg(long, default_value_t = 1)]
    pub column: usize,

    /// Show lambda, w_log and Allen-Dynes Tc in a text box
    #[arg(long, default_value_t = false)]
    pub show_data: bool,

    /// Tc from the isotropic Eliashberg equations, added to the text box (K)
    #[arg(long)]
    pub iso_tc: Option<f64>,

    /// Coulomb pseudopotential used for the Allen-Dynes estimate
    #[arg(long, default_value_t = 0.13)]
    pub mu_star: f64,

    /// Output image
    #[arg(short, long, default_value = "a2f.png")]
    pub output: PathBuf,

    #[command(flatten)]
    pub figure: FigureArgs,
}

// ─────────────────────────────────────────────────────────────
// 各向异性能隙子命令
// ─────────────────────────────────────────────────────────────

/// aniso 子命令参数
#[derive(Args, Debug)]
pub struct AnisoArgs {
    /// Retrieved directory containing aiida.imag_aniso_gap0_* files
    pub retrieved: PathBuf,

    /// Fit the averaged gap with a BCS-like model
    #[arg(long, default_value_t = false)]
    pub fit: bool,

    /// Number of highest-temperature points to ignore in the fit
    #[arg(long, default_value_t = 0)]
    pub ignore_temps: usize,

    /// Print temperature clusters above min(T) + THRESHOLD
    #[arg(long, value_name = "THRESHOLD")]
    pub clusters: Option<f64>,

    /// Export the gap summary to a CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Output image
    #[arg(short, long, default_value = "aniso_gap.png")]
    pub output: PathBuf,

    #[command(flatten)]
    pub figure: FigureArgs,
}

// ─────────────────────────────────────────────────────────────
// 能带子命令
// ─────────────────────────────────────────────────────────────

/// bands 子命令参数
#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Band structure: JSON file or gnuplot band file (e.g. aiida_band.dat)
    pub input: PathBuf,

    /// Wannier90 labelinfo.dat (default: <stem>.labelinfo.dat next to the input)
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// Seek-path parameters JSON (path + explicit_segments), takes precedence over labels
    #[arg(long)]
    pub seekpath: Option<PathBuf>,

    /// Reference energy subtracted from all bands (eV)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub reference_energy: f64,

    /// Band colour: name (blue, red, k, ...) or #RRGGBB
    #[arg(long, default_value = "blue")]
    pub color: String,

    /// Output image
    #[arg(short, long, default_value = "bands.png")]
    pub output: PathBuf,

    #[command(flatten)]
    pub figure: FigureArgs,
}
