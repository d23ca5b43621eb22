//! # α²F 绘图命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 A2fArgs
//! - 使用 `parsers/a2f.rs`, `analysis/eliashberg.rs`, `plot/a2f.rs`

use super::{figure_size, resolve_format};
use crate::analysis::{allen_dynes, lambda_omega_log};
use crate::cli::plot::A2fArgs;
use crate::error::{Result, SuperconError};
use crate::parsers::a2f::parse_a2f_file;
use crate::plot::a2f::{render_a2f, A2fPlotOptions};
use crate::utils::output;

/// 执行 α²F 绘图
pub fn execute(args: A2fArgs) -> Result<()> {
    output::print_header("Eliashberg Spectral Function");

    if !args.input.exists() {
        return Err(SuperconError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let spectrum = parse_a2f_file(&args.input, args.column)?;
    output::print_info(&format!(
        "Read {} points from '{}' (column {})",
        spectrum.len(),
        args.input.display(),
        args.column
    ));

    let options = A2fPlotOptions {
        show_data: args.show_data,
        iso_tc: args.iso_tc,
        mu_star: args.mu_star,
    };

    match lambda_omega_log(&spectrum) {
        Some(coupling) => {
            output::print_quantity("lambda", coupling.lambda, "");
            output::print_quantity("omega_log", coupling.omega_log, "K");
            output::print_quantity(
                "Tc (AD)",
                allen_dynes(coupling.lambda, coupling.omega_log, options.mu_star),
                "K",
            );
            if let Some(iso_tc) = options.iso_tc {
                output::print_quantity("Tc (iso)", iso_tc, "K");
            }
        }
        None => output::print_warning("Coupling constant could not be computed from this spectrum"),
    }

    let format = resolve_format(args.figure.format, &args.output);
    render_a2f(&spectrum, &options, &args.output, figure_size(&args.figure), format)?;

    output::print_success(&format!("Figure saved to '{}'", args.output.display()));
    Ok(())
}
