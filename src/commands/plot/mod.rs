//! # plot 命令实现
//!
//! 单个图表的统一入口，包含多个子命令：
//! - `a2f`: α²F 谱函数
//! - `aniso`: 各向异性能隙及拟合
//! - `bands`: 能带结构
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 子模块: a2f, aniso, bands

pub mod a2f;
pub mod aniso;
pub mod bands;

use crate::cli::plot::{FigureArgs, ImageFormat, PlotArgs, PlotCommands};
use crate::error::Result;
use crate::plot::FigureFormat;

use std::path::Path;

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    match args.command {
        PlotCommands::A2f(a2f_args) => a2f::execute(a2f_args),
        PlotCommands::Aniso(aniso_args) => aniso::execute(aniso_args),
        PlotCommands::Bands(bands_args) => bands::execute(bands_args),
    }
}

/// 确定输出格式：显式指定优先，否则按扩展名推断
pub fn resolve_format(format: Option<ImageFormat>, output: &Path) -> FigureFormat {
    match format {
        Some(ImageFormat::Png) => FigureFormat::Png,
        Some(ImageFormat::Svg) => FigureFormat::Svg,
        None => FigureFormat::from_path(output),
    }
}

/// 图像尺寸
pub fn figure_size(figure: &FigureArgs) -> (u32, u32) {
    (figure.width, figure.height)
}
