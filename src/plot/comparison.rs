//! # 能带对比图
//!
//! 将 Quantum ESPRESSO 能带（红线）与 Wannier90 插值能带（蓝点）
//! 叠加在同一张图上，各自减去对应的费米能。
//!
//! ## 依赖关系
//! - 被 `commands/check.rs` 调用
//! - 使用 `plot/ticks.rs`, `plot/bands.rs` 的刻度辅助函数

use crate::error::Result;
use crate::models::BandsData;
use crate::plot::bands::kpoint_axis;
use crate::plot::ticks::create_xticks_bands;
use crate::plot::{draw_dashed_hline, draw_vlines, plot_err, FigureFormat, LabelledAxis};

use plotters::prelude::*;
use std::path::Path;

/// y 轴范围 (eV)
const ENERGY_WINDOW: (f64, f64) = (-10.0, 10.0);

/// y 轴刻度；0 标注为 E_F
const ENERGY_TICKS: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

const DOT_SIZE: i32 = 2;

/// y 轴标签文本
fn energy_label(y: f64) -> String {
    if y.abs() < 1e-9 {
        "E_F".to_string()
    } else {
        format!("{:.0}", y)
    }
}

/// 能量轴，0 处标注 E_F
fn energy_axis() -> LabelledAxis {
    let (y_min, y_max) = ENERGY_WINDOW;
    let labelled = ENERGY_TICKS.iter().map(|y| (*y, energy_label(*y))).collect();
    LabelledAxis::new(y_min..y_max, labelled)
}

/// 在给定区域绘制能带对比图；任一来源缺失时只省略其叠加层
pub fn draw_bands_comparison<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    reference: Option<&BandsData>,
    computed: Option<&BandsData>,
    fermi_reference: f64,
    fermi_computed: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let ticks = computed.and_then(create_xticks_bands).unwrap_or_default();

    let num_kpoints = reference
        .iter()
        .chain(computed.iter())
        .map(|b| b.num_kpoints())
        .max()
        .unwrap_or(0);
    let x_max = num_kpoints.saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = ENERGY_WINDOW;

    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(kpoint_axis(&ticks, x_max), energy_axis())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_desc("Energy (eV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    if let Some(bands) = reference {
        for band in bands.shifted(fermi_reference) {
            chart
                .draw_series(LineSeries::new(
                    band.into_iter().enumerate().map(|(k, e)| (k as f64, e)),
                    RED.stroke_width(1),
                ))
                .map_err(plot_err)?;
        }
        chart
            .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), RED))
            .map_err(plot_err)?
            .label("Quantum ESPRESSO")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    }

    if let Some(bands) = computed {
        for band in bands.shifted(fermi_computed) {
            chart
                .draw_series(
                    band.into_iter()
                        .enumerate()
                        .filter(|(_, e)| *e >= y_min && *e <= y_max)
                        .map(|(k, e)| Circle::new((k as f64, e), DOT_SIZE, BLUE.filled())),
                )
                .map_err(plot_err)?;
        }
        chart
            .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), BLUE))
            .map_err(plot_err)?
            .label("W90")
            .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));
    }

    draw_vlines(&mut chart, &ticks.positions, y_min, y_max, BLACK)?;
    draw_dashed_hline(&mut chart, 0.0, 0.0, x_max)?;

    if reference.is_some() || computed.is_some() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 16))
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}

/// 生成能带对比图文件
pub fn render_bands_comparison(
    reference: Option<&BandsData>,
    computed: Option<&BandsData>,
    fermi_reference: f64,
    fermi_computed: f64,
    output_path: &Path,
    size: (u32, u32),
    format: FigureFormat,
) -> Result<()> {
    match format {
        FigureFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_bands_comparison(&root, reference, computed, fermi_reference, fermi_computed)?;
            root.present().map_err(plot_err)?;
        }
        FigureFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_bands_comparison(&root, reference, computed, fermi_reference, fermi_computed)?;
            root.present().map_err(plot_err)?;
        }
    }
    Ok(())
}
