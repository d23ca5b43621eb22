//! # 能隙数据导出
//!
//! 将能隙汇总与聚类结果写出为 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/plot/aniso.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::analysis::clusters::Cluster;
use crate::error::{Result, SuperconError};
use crate::models::GapSummary;

use std::io::Write;
use std::path::Path;

/// 导出汇总（每个文件一行）
pub fn summary_to_csv(summary: &GapSummary, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    write_summary(&mut wtr, summary)?;
    wtr.flush().map_err(|e| SuperconError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

fn write_summary<W: Write>(wtr: &mut csv::Writer<W>, summary: &GapSummary) -> Result<()> {
    wtr.write_record(["file", "min_temperature_K", "average_delta_meV"])?;

    for ((curve, t), d) in summary
        .curves
        .iter()
        .zip(&summary.temperatures)
        .zip(&summary.average_deltas)
    {
        wtr.write_record([curve.name.clone(), format!("{:.4}", t), format!("{:.6}", d)])?;
    }

    Ok(())
}

/// 导出聚类（带片段编号）
pub fn clusters_to_csv(clusters: &[Cluster], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["cluster", "temperature_K", "delta_meV"])?;
    for (i, cluster) in clusters.iter().enumerate() {
        for (t, d) in cluster.temperatures.iter().zip(&cluster.deltas) {
            wtr.write_record([(i + 1).to_string(), format!("{:.4}", t), format!("{:.6}", d)])?;
        }
    }

    wtr.flush().map_err(|e| SuperconError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
