//! # check-wannier 命令实现
//!
//! 将 Quantum ESPRESSO 能带与 Wannier90 插值能带叠加作图，
//! 用于检查 Wannier 化质量。
//!
//! ## 功能
//! - 能带来源：JSON 或 gnuplot 能带文件（附 labelinfo）
//! - 费米能来源：数值、参数 JSON 或 QE 输出
//! - 读取失败的能带只给出警告并省略对应叠加层
//! - 固定输出尺寸 2400x1800 (8x6 英寸 @ 300 dpi)
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `parsers/bands.rs`, `parsers/params.rs`, `plot/comparison.rs`

use crate::cli::check::CheckWannierArgs;
use crate::error::{Result, SuperconError};
use crate::models::BandsData;
use crate::parsers::bands::load_bands;
use crate::parsers::params::FermiSource;
use crate::plot::comparison::render_bands_comparison;
use crate::plot::{FigureFormat, SAVE_SIZE};
use crate::utils::output;

use std::path::Path;

/// 执行 check-wannier 命令
pub fn execute(args: CheckWannierArgs) -> Result<()> {
    output::print_header("Wannier90 Band Check");

    let reference = load_band_source(&args.reference, "Quantum ESPRESSO");
    let wannier = load_band_source(&args.wannier, "Wannier90");

    if reference.is_none() && wannier.is_none() {
        return Err(SuperconError::InvalidInput(
            "neither band source could be loaded".to_string(),
        ));
    }

    let fermi_reference = match reference {
        Some(_) => resolve_fermi(&args.fermi_reference)?,
        None => 0.0,
    };
    let fermi_wannier = match wannier {
        Some(_) => resolve_fermi(&args.fermi_wannier)?,
        None => 0.0,
    };
    output::print_info("Fermi energies:");
    if reference.is_some() {
        output::print_quantity("E_F (QE)", fermi_reference, "eV");
    }
    if wannier.is_some() {
        output::print_quantity("E_F (W90)", fermi_wannier, "eV");
    }

    check_wannier(
        reference.as_ref(),
        wannier.as_ref(),
        fermi_reference,
        fermi_wannier,
        &args.output,
    )?;

    output::print_success(&format!("Figure saved to '{}'", args.output.display()));
    Ok(())
}

/// 以固定尺寸保存能带对比图
pub fn check_wannier(
    reference: Option<&BandsData>,
    wannier: Option<&BandsData>,
    fermi_reference: f64,
    fermi_wannier: f64,
    output_path: &Path,
) -> Result<()> {
    render_bands_comparison(
        reference,
        wannier,
        fermi_reference,
        fermi_wannier,
        output_path,
        SAVE_SIZE,
        FigureFormat::from_path(output_path),
    )
}

/// 读取能带，失败时警告并返回 None
fn load_band_source(path: &Path, name: &str) -> Option<BandsData> {
    match load_bands(path, None) {
        Ok(bands) => {
            output::print_info(&format!(
                "{}: {} bands on {} k-points",
                name,
                bands.num_bands(),
                bands.num_kpoints()
            ));
            Some(bands)
        }
        Err(e) => {
            output::print_warning(&format!("{} bands unavailable, skipping overlay: {}", name, e));
            None
        }
    }
}

fn resolve_fermi(input: &str) -> Result<f64> {
    FermiSource::parse(input).resolve()
}
