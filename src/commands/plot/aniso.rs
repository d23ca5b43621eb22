//! # 各向异性能隙绘图命令实现
//!
//! ## 功能
//! - 汇总 retrieved 目录中的 `aiida.imag_aniso_gap0_*` 文件
//! - 打印汇总表、拟合参数和温度聚类
//! - 可选导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 AnisoArgs
//! - 使用 `analysis/`, `plot/aniso.rs`

use super::{figure_size, resolve_format};
use crate::analysis::export::{clusters_to_csv, summary_to_csv};
use crate::analysis::{aggregate, find_clusters, Cluster};
use crate::cli::plot::AnisoArgs;
use crate::error::{Result, SuperconError};
use crate::models::{CalcNode, GapFit, GapSummary};
use crate::plot::aniso::{render_aniso, AnisoPlotOptions};
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "T_min (K)")]
    temperature: String,
    #[tabled(rename = "<Δ> (meV)")]
    delta: String,
}

/// 拟合参数表行
#[derive(Debug, Clone, Tabled)]
struct FitRow {
    #[tabled(rename = "Parameter")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// 聚类表行
#[derive(Debug, Clone, Tabled)]
struct ClusterRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "T range (K)")]
    range: String,
}

/// 执行各向异性能隙绘图
pub fn execute(args: AnisoArgs) -> Result<()> {
    output::print_header("Anisotropic Superconducting Gap");

    let node = CalcNode::open(&args.retrieved)?;
    let store = node.retrieved();
    output::print_info(&format!("Reading gap files from '{}'", store.root().display()));

    let summary = aggregate(store)?;
    output::print_warnings(&summary.warnings);
    if summary.is_empty() {
        return Err(SuperconError::NoFilesFound {
            pattern: format!("{}/aiida.imag_aniso_gap0_*", store.root().display()),
        });
    }

    print_summary_table(&summary);

    let options = AnisoPlotOptions {
        add_fit: args.fit,
        ignore_temps: args.ignore_temps,
    };
    let format = resolve_format(args.figure.format, &args.output);
    let fit = render_aniso(&summary, &options, &args.output, figure_size(&args.figure), format)?;

    match fit {
        Some(fit) => print_fit_table(&fit),
        None if args.fit => output::print_warning("Gap fit did not converge, plotting without the fit curve"),
        None => {}
    }

    let clusters = args
        .clusters
        .map(|threshold| find_clusters(&summary.temperatures, &summary.average_deltas, threshold));
    if let Some(clusters) = &clusters {
        print_cluster_table(clusters);
    }

    if let Some(csv_path) = &args.export_csv {
        summary_to_csv(&summary, csv_path)?;
        output::print_success(&format!("Summary exported to '{}'", csv_path.display()));

        if let Some(clusters) = &clusters {
            let cluster_path = clusters_csv_path(csv_path);
            clusters_to_csv(clusters, &cluster_path)?;
            output::print_success(&format!("Clusters exported to '{}'", cluster_path.display()));
        }
    }

    output::print_success(&format!("Figure saved to '{}'", args.output.display()));
    Ok(())
}

/// `gap.csv` -> `gap_clusters.csv`
fn clusters_csv_path(csv_path: &Path) -> PathBuf {
    let stem = csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("gap");
    csv_path.with_file_name(format!("{}_clusters.csv", stem))
}

fn print_summary_table(summary: &GapSummary) {
    let rows: Vec<SummaryRow> = summary
        .curves
        .iter()
        .zip(&summary.temperatures)
        .zip(&summary.average_deltas)
        .map(|((curve, t), d)| SummaryRow {
            file: curve.name.clone(),
            temperature: format!("{:.2}", t),
            delta: format!("{:.4}", d),
        })
        .collect();

    output::print_header(&format!("{} Gap Files", rows.len()));
    println!("{}", Table::new(&rows));
}

fn print_fit_table(fit: &GapFit) {
    let rows = vec![
        FitRow {
            name: "p",
            value: format!("{:.3}", fit.exponent),
        },
        FitRow {
            name: "Δ0 (meV)",
            value: format!("{:.3}", fit.delta_zero),
        },
        FitRow {
            name: "Tc (K)",
            value: format!("{:.2}", fit.critical_temperature),
        },
    ];

    output::print_header("Gap Fit: Δ(T) = Δ0 (1 - (T/Tc)^p)^1/2");
    println!("{}", Table::new(&rows));
}

fn print_cluster_table(clusters: &[Cluster]) {
    if clusters.is_empty() {
        output::print_info("No temperature clusters above the threshold");
        return;
    }

    let rows: Vec<ClusterRow> = clusters
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let lo = c.temperatures.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = c.temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ClusterRow {
                index: i + 1,
                points: c.len(),
                range: format!("{:.2} - {:.2}", lo, hi),
            }
        })
        .collect();

    output::print_header("Temperature Clusters");
    println!("{}", Table::new(&rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clusters_csv_path() {
        assert_eq!(
            clusters_csv_path(Path::new("out/gap.csv")),
            PathBuf::from("out/gap_clusters.csv")
        );
    }
}
