//! # 能带绘图命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 BandsArgs
//! - 使用 `parsers/bands.rs`, `parsers/params.rs`, `plot/bands.rs`

use super::{figure_size, resolve_format};
use crate::cli::plot::BandsArgs;
use crate::error::{Result, SuperconError};
use crate::parsers::bands::load_bands;
use crate::parsers::params::load_seekpath;
use crate::plot::bands::{render_bands, resolve_ticks, BandsPlotOptions};
use crate::plot::parse_color;
use crate::utils::output;

/// 执行能带绘图
pub fn execute(args: BandsArgs) -> Result<()> {
    output::print_header("Band Structure");

    if !args.input.exists() {
        return Err(SuperconError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let bands = load_bands(&args.input, args.labels.as_deref())?;
    output::print_info(&format!(
        "Loaded {} bands on {} k-points",
        bands.num_bands(),
        bands.num_kpoints()
    ));

    let seekpath = match &args.seekpath {
        Some(path) => Some(load_seekpath(path)?),
        None => None,
    };

    let options = BandsPlotOptions {
        reference_energy: args.reference_energy,
        seekpath: seekpath.as_ref(),
        color: parse_color(&args.color)?,
    };

    let ticks = resolve_ticks(&bands, options.seekpath);
    if ticks.is_empty() {
        output::print_warning("No high-symmetry labels available, plotting without ticks");
    } else {
        output::print_info(&format!("High-symmetry points: {}", ticks.labels.join(" ")));
    }

    let format = resolve_format(args.figure.format, &args.output);
    render_bands(&bands, &options, &args.output, figure_size(&args.figure), format)?;

    output::print_success(&format!("Figure saved to '{}'", args.output.display()));
    Ok(())
}
