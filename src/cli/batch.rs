//! # batch 子命令 CLI 定义
//!
//! 遍历目录批量生成 α²F 或各向异性能隙图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::plot::FigureArgs;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 批量任务类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BatchKind {
    /// One a2F figure per matching file
    A2f,
    /// One gap figure per directory holding aiida.imag_aniso_gap0_* files
    Aniso,
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchKind::A2f => write!(f, "a2f"),
            BatchKind::Aniso => write!(f, "aniso"),
        }
    }
}

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Root directory to scan
    pub input: PathBuf,

    /// What to plot
    #[arg(long, value_enum)]
    pub kind: BatchKind,

    /// Glob pattern(s) for input files, comma separated (default depends on --kind)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Output directory
    #[arg(short, long, default_value = "figures")]
    pub output: PathBuf,

    /// Show the a2F text box (a2f) or fit the gap (aniso)
    #[arg(long, default_value_t = false)]
    pub annotate: bool,

    #[command(flatten)]
    pub figure: FigureArgs,
}
