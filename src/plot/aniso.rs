//! # 各向异性能隙图
//!
//! 绘制每个温度文件的 Δ_nk(T) 原始曲线，在最低温度处画竖线；
//! 可选叠加汇总点与 BCS 型拟合曲线。
//!
//! ## 依赖关系
//! - 被 `commands/plot/aniso.rs`, `commands/batch.rs` 调用
//! - 使用 `analysis/gap_fit.rs`
//! - 使用 `models/spectrum.rs` 的 GapSummary

use crate::analysis::gap_fit::fit_gap;
use crate::error::Result;
use crate::models::{GapFit, GapSummary};
use crate::plot::{draw_vlines, padded_range, plot_err, FigureFormat};

use plotters::prelude::*;
use std::path::Path;

/// 拟合曲线取样步长 (K)
const FIT_STEP: f64 = 0.1;

/// 拟合曲线颜色
const FIT_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// 能隙图选项
#[derive(Debug, Clone, Copy, Default)]
pub struct AnisoPlotOptions {
    /// 是否尝试拟合
    pub add_fit: bool,
    /// 拟合时忽略的末尾点数
    pub ignore_temps: usize,
}

/// 拟合参数标题，无拟合时为空
pub fn fit_title(fit: Option<&GapFit>) -> String {
    match fit {
        Some(f) => format!(
            " - {:.1} - {:.1} - {:.1}",
            f.exponent, f.delta_zero, f.critical_temperature
        ),
        None => String::new(),
    }
}

/// y 轴上限：原始曲线与拟合曲线的最大能隙再留 10% 余量
fn y_upper(summary: &GapSummary, fit_curve: &[(f64, f64)]) -> f64 {
    let y_peak = summary
        .curves
        .iter()
        .flat_map(|c| c.delta.iter().copied())
        .chain(fit_curve.iter().map(|(_, d)| *d))
        .fold(0.0_f64, f64::max);
    if y_peak > 0.0 {
        y_peak * 1.1
    } else {
        1.0
    }
}

/// 在给定区域绘制能隙图，返回所用拟合结果
pub fn draw_aniso<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    summary: &GapSummary,
    options: &AnisoPlotOptions,
) -> Result<Option<GapFit>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let fit = if options.add_fit {
        fit_gap(
            &summary.temperatures,
            &summary.average_deltas,
            options.ignore_temps,
        )
    } else {
        None
    };

    let t_min = summary.temperatures.iter().copied().reduce(f64::min);
    let fit_curve = match (fit.as_ref(), t_min) {
        (Some(f), Some(start)) => f.curve(start, FIT_STEP),
        _ => Vec::new(),
    };

    // 确定范围
    let all_temps = summary
        .curves
        .iter()
        .flat_map(|c| c.temperature.iter().copied())
        .chain(fit_curve.iter().map(|(t, _)| *t));
    let (x_min, x_max) = all_temps.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });
    let (x_min, x_max) = padded_range(x_min, x_max, 0.05);

    let y_max = y_upper(summary, &fit_curve);

    let title = fit_title(fit.as_ref());
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60);
    if !title.is_empty() {
        builder.caption(&title, ("sans-serif", 24).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Temperature (K)")
        .y_desc("Delta_nk (meV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    for curve in &summary.curves {
        chart
            .draw_series(LineSeries::new(
                curve
                    .temperature
                    .iter()
                    .copied()
                    .zip(curve.delta.iter().copied()),
                BLUE.stroke_width(1),
            ))
            .map_err(plot_err)?;
    }

    draw_vlines(&mut chart, &summary.temperatures, 0.0, y_max, BLUE)?;

    if options.add_fit {
        chart
            .draw_series(
                summary
                    .temperatures
                    .iter()
                    .zip(&summary.average_deltas)
                    .map(|(t, d)| Circle::new((*t, *d), 5, RED.filled())),
            )
            .map_err(plot_err)?;
    }

    if !fit_curve.is_empty() {
        chart
            .draw_series(LineSeries::new(fit_curve, FIT_COLOR.stroke_width(2)))
            .map_err(plot_err)?;
    }

    Ok(fit)
}

/// 生成能隙图文件
pub fn render_aniso(
    summary: &GapSummary,
    options: &AnisoPlotOptions,
    output_path: &Path,
    size: (u32, u32),
    format: FigureFormat,
) -> Result<Option<GapFit>> {
    let fit = match format {
        FigureFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            let fit = draw_aniso(&root, summary, options)?;
            root.present().map_err(plot_err)?;
            fit
        }
        FigureFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            let fit = draw_aniso(&root, summary, options)?;
            root.present().map_err(plot_err)?;
            fit
        }
    };
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GapCurve;

    fn summary(points: &[(f64, f64)]) -> GapSummary {
        GapSummary {
            curves: points
                .iter()
                .enumerate()
                .map(|(i, (t, d))| GapCurve {
                    name: format!("aniso_gap0_{:03}.00", i),
                    temperature: vec![*t, *t],
                    delta: vec![*d, *d * 0.9],
                })
                .collect(),
            temperatures: points.iter().map(|(t, _)| *t).collect(),
            average_deltas: points.iter().map(|(_, d)| *d).collect(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_fit_title() {
        let fit = GapFit {
            exponent: 2.96,
            delta_zero: 1.54,
            critical_temperature: 30.04,
        };
        assert_eq!(fit_title(Some(&fit)), " - 3.0 - 1.5 - 30.0");
        assert_eq!(fit_title(None), "");
    }

    #[test]
    fn test_y_upper_covers_fit_curve() {
        let data = summary(&[(10.0, 1.0), (20.0, 0.5)]);
        assert!((y_upper(&data, &[]) - 1.1).abs() < 1e-12);
        assert!((y_upper(&data, &[(5.0, 3.0), (6.0, 2.0)]) - 3.3).abs() < 1e-12);
        assert_eq!(y_upper(&GapSummary::default(), &[]), 1.0);
    }

    #[test]
    fn test_draw_two_points_with_fit_requested() {
        let data = summary(&[(10.0, 2.0), (20.0, 1.0)]);
        let options = AnisoPlotOptions {
            add_fit: true,
            ignore_temps: 0,
        };
        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        assert_eq!(draw_aniso(&root, &data, &options).unwrap(), None);
    }

    #[test]
    fn test_draw_empty_summary() {
        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        let fit = draw_aniso(&root, &GapSummary::default(), &AnisoPlotOptions::default());
        assert_eq!(fit.unwrap(), None);
    }

    #[test]
    fn test_draw_with_fit() {
        let points: Vec<(f64, f64)> = [5.0, 10.0, 15.0, 20.0, 25.0]
            .iter()
            .map(|t| (*t, 2.5 * (1.0 - (*t / 30.0_f64).powi(3)).sqrt()))
            .collect();
        let options = AnisoPlotOptions {
            add_fit: true,
            ignore_temps: 0,
        };
        let mut buf = vec![0u8; 400 * 300 * 3];
        let fit = {
            let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
            let fit = draw_aniso(&root, &summary(&points), &options).unwrap();
            root.present().unwrap();
            fit
        };
        assert!(fit.is_some());
        assert!(!fit_title(fit.as_ref()).is_empty());
        assert!(buf.iter().any(|b| *b != 255));
    }
}
