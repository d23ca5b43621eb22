//! # supercon - EPW 超导计算结果可视化工具
//!
//! 将 EPW 超导后处理绘图脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `plot` - 单个图表
//!   - `a2f` - Eliashberg 谱函数 α²F(ω)
//!   - `aniso` - 各向异性能隙 Δ_nk(T) 及 BCS 型拟合
//!   - `bands` - 能带结构及高对称点标注
//! - `batch` - 目录批量绘图
//! - `check-wannier` - QE / Wannier90 能带对比
//! - `restarts` - 列出 EPW 重启模式
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (文件解析器)
//!   │     ├── analysis/  (数值后处理)
//!   │     ├── plot/      (图表绘制)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
