//! # α²F 谱函数图
//!
//! 绘制 Eliashberg 谱函数曲线，可选在左上角叠加派生量文本框
//! （λ、ω_log、Allen-Dynes Tc 以及可选的各向同性 Eliashberg Tc）。
//!
//! ## 依赖关系
//! - 被 `commands/plot/a2f.rs`, `commands/batch.rs` 调用
//! - 使用 `analysis/eliashberg.rs`

use crate::analysis::eliashberg::{allen_dynes, lambda_omega_log, DEFAULT_MU_STAR};
use crate::error::Result;
use crate::models::A2fSpectrum;
use crate::plot::{plot_err, FigureFormat, A2F_COLOR};

use plotters::prelude::*;
use std::path::Path;

const LINE_HEIGHT: i32 = 22;

/// α²F 图选项
#[derive(Debug, Clone, Copy)]
pub struct A2fPlotOptions {
    /// 是否显示派生量文本框
    pub show_data: bool,
    /// 各向同性 Eliashberg 方程得到的 Tc (K)
    pub iso_tc: Option<f64>,
    /// Allen-Dynes 公式中的 μ*
    pub mu_star: f64,
}

impl Default for A2fPlotOptions {
    fn default() -> Self {
        A2fPlotOptions {
            show_data: false,
            iso_tc: None,
            mu_star: DEFAULT_MU_STAR,
        }
    }
}

/// 文本框各行内容，λ 无法计算时返回 None
pub fn summary_lines(spectrum: &A2fSpectrum, options: &A2fPlotOptions) -> Option<Vec<String>> {
    let coupling = lambda_omega_log(spectrum)?;
    let tc = allen_dynes(coupling.lambda, coupling.omega_log, options.mu_star);

    let mut lines = vec![
        format!("λ = {:.2}", coupling.lambda),
        format!("ω_log = {:.2} K", coupling.omega_log),
        format!("Tc(AD) = {:.2} K", tc),
    ];
    if let Some(iso) = options.iso_tc {
        lines.push(format!("Tc(iso) = {:.2} K", iso));
    }

    Some(lines)
}

/// 在给定区域绘制 α²F
pub fn draw_a2f<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spectrum: &A2fSpectrum,
    options: &A2fPlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let x_min = spectrum.frequency.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = spectrum
        .frequency
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_min.is_finite() && x_max > x_min {
        (x_min, x_max)
    } else {
        (0.0, 1.0)
    };

    let y_peak = spectrum.a2f.iter().copied().fold(0.0_f64, f64::max);
    let y_max = if y_peak > 0.0 { y_peak * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("ω [meV]")
        .y_desc("α²F")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(spectrum.points(), A2F_COLOR.stroke_width(2)))
        .map_err(plot_err)?;

    if options.show_data {
        if let Some(lines) = summary_lines(spectrum, options) {
            let anchor = (x_min + 0.05 * (x_max - x_min), y_max * 0.95);
            let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
            let box_size = (widest * 10 + 20, lines.len() as i32 * LINE_HEIGHT + 12);

            chart
                .draw_series(std::iter::once(
                    EmptyElement::at(anchor)
                        + Rectangle::new([(0, 0), box_size], A2F_COLOR.mix(0.3).filled()),
                ))
                .map_err(plot_err)?;

            let font = ("sans-serif", 16).into_font();
            for (i, line) in lines.iter().enumerate() {
                chart
                    .draw_series(std::iter::once(
                        EmptyElement::at(anchor)
                            + Text::new(
                                line.clone(),
                                (10, 8 + i as i32 * LINE_HEIGHT),
                                font.clone(),
                            ),
                    ))
                    .map_err(plot_err)?;
            }
        }
    }

    Ok(())
}

/// 生成 α²F 图文件
pub fn render_a2f(
    spectrum: &A2fSpectrum,
    options: &A2fPlotOptions,
    output_path: &Path,
    size: (u32, u32),
    format: FigureFormat,
) -> Result<()> {
    match format {
        FigureFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_a2f(&root, spectrum, options)?;
            root.present().map_err(plot_err)?;
        }
        FigureFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_a2f(&root, spectrum, options)?;
            root.present().map_err(plot_err)?;
        }
    }
    Ok(())
}
