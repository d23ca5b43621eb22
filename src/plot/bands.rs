//! # 能带结构图
//!
//! 每条能带减去参考能量后对 k 点索引作图，
//! 高对称点处画竖线并标注，0 处画水平虚线。
//!
//! 刻度来源优先级：Seek-path 参数 > 能带标签属性 > 无刻度。
//!
//! ## 依赖关系
//! - 被 `commands/plot/bands.rs` 调用
//! - 使用 `plot/ticks.rs`

use crate::error::Result;
use crate::models::{BandsData, SeekpathParams};
use crate::plot::ticks::{create_xticks, create_xticks_bands, XTicks};
use crate::plot::{
    draw_dashed_hline, draw_vlines, fallback_key_points, padded_range, plot_err, FigureFormat,
    LabelledAxis,
};

use plotters::prelude::*;
use std::path::Path;

/// 能带图选项
#[derive(Debug, Clone, Copy)]
pub struct BandsPlotOptions<'a> {
    /// 参考能量 (eV)，通常为费米能
    pub reference_energy: f64,
    /// Seek-path 参数，提供时优先用于刻度
    pub seekpath: Option<&'a SeekpathParams>,
    /// 能带颜色
    pub color: RGBColor,
}

impl Default for BandsPlotOptions<'_> {
    fn default() -> Self {
        BandsPlotOptions {
            reference_energy: 0.0,
            seekpath: None,
            color: BLUE,
        }
    }
}

/// 选择刻度来源，任一途径失败均退回无刻度
pub fn resolve_ticks(bands: &BandsData, seekpath: Option<&SeekpathParams>) -> XTicks {
    if let Some(params) = seekpath {
        return create_xticks(params).unwrap_or_default();
    }
    create_xticks_bands(bands).unwrap_or_default()
}

/// x 轴关键点：有刻度时用刻度，否则用等间距数值
pub(crate) fn key_points(ticks: &XTicks, x_max: f64) -> Vec<f64> {
    if ticks.is_empty() {
        fallback_key_points(x_max)
    } else {
        ticks.positions.clone()
    }
}

/// x 轴标签文本
pub(crate) fn tick_label(ticks: &XTicks, x: f64) -> String {
    if ticks.is_empty() {
        format!("{:.0}", x)
    } else {
        ticks.label_at(x).unwrap_or_default().to_string()
    }
}

/// k 点索引轴，刻度处标注高对称点名称
pub(crate) fn kpoint_axis(ticks: &XTicks, x_max: f64) -> LabelledAxis {
    let labelled = key_points(ticks, x_max)
        .into_iter()
        .map(|x| (x, tick_label(ticks, x)))
        .collect();
    LabelledAxis::new(0.0..x_max, labelled)
}

/// 在给定区域绘制能带结构
pub fn draw_bands<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    bands: &BandsData,
    options: &BandsPlotOptions<'_>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let ticks = resolve_ticks(bands, options.seekpath);
    let shifted = bands.shifted(options.reference_energy);

    let x_max = bands.num_kpoints().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = match bands.energy_range() {
        Some((lo, hi)) => padded_range(
            lo - options.reference_energy,
            hi - options.reference_energy,
            0.05,
        ),
        None => (-1.0, 1.0),
    };

    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(kpoint_axis(&ticks, x_max), y_min..y_max)
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

    for band in &shifted {
        chart
            .draw_series(LineSeries::new(
                band.iter().enumerate().map(|(k, e)| (k as f64, *e)),
                options.color.stroke_width(1),
            ))
            .map_err(plot_err)?;
    }

    draw_vlines(&mut chart, &ticks.positions, y_min, y_max, BLACK)?;
    draw_dashed_hline(&mut chart, 0.0, 0.0, x_max)?;

    Ok(())
}

/// 生成能带图文件
pub fn render_bands(
    bands: &BandsData,
    options: &BandsPlotOptions<'_>,
    output_path: &Path,
    size: (u32, u32),
    format: FigureFormat,
) -> Result<()> {
    match format {
        FigureFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_bands(&root, bands, options)?;
            root.present().map_err(plot_err)?;
        }
        FigureFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_bands(&root, bands, options)?;
            root.present().map_err(plot_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled() -> BandsData {
        BandsData::new(vec![vec![0.0; 6]]).with_labels(
            vec!["GAMMA".to_string(), "X".to_string()],
            vec![0, 5],
        )
    }

    #[test]
    fn test_seekpath_takes_precedence() {
        let params = SeekpathParams {
            path: vec![("L".to_string(), "W".to_string())],
            explicit_segments: vec![(0, 5)],
        };
        let ticks = resolve_ticks(&labelled(), Some(&params));
        assert_eq!(ticks.labels, vec!["L", "W"]);
    }

    #[test]
    fn test_attribute_ticks() {
        let ticks = resolve_ticks(&labelled(), None);
        assert_eq!(ticks.labels, vec!["Γ", "X"]);
        assert_eq!(tick_label(&ticks, 5.0), "X");
        assert_eq!(tick_label(&ticks, 3.0), "");
    }

    #[test]
    fn test_failed_routes_fall_back_to_no_ticks() {
        let empty = SeekpathParams {
            path: Vec::new(),
            explicit_segments: Vec::new(),
        };
        let bands = BandsData::new(vec![vec![0.0; 11]]);
        assert!(resolve_ticks(&bands, Some(&empty)).is_empty());

        let ticks = resolve_ticks(&bands, None);
        assert!(ticks.is_empty());
        assert_eq!(key_points(&ticks, 10.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(tick_label(&ticks, 4.0), "4");
        assert_eq!(kpoint_axis(&ticks, 10.0).label_at(4.0), "4");
    }

    #[test]
    fn test_draw_bands_with_labels() {
        let bands = BandsData::new(vec![vec![-1.0, -0.5, 0.0, 0.5, 1.0, 1.5]]).with_labels(
            vec!["GAMMA".to_string(), "X".to_string()],
            vec![0, 5],
        );
        let mut buf = vec![0u8; 400 * 300 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
            let options = BandsPlotOptions {
                reference_energy: 0.5,
                ..Default::default()
            };
            draw_bands(&root, &bands, &options).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|b| *b != 255));
    }

    #[test]
    fn test_draw_bands_with_seekpath() {
        let params = SeekpathParams {
            path: vec![("L".to_string(), "W".to_string())],
            explicit_segments: vec![(0, 5)],
        };
        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        let options = BandsPlotOptions {
            seekpath: Some(&params),
            ..Default::default()
        };
        draw_bands(&root, &labelled(), &options).unwrap();
    }

    #[test]
    fn test_draw_bands_without_ticks() {
        let bands = BandsData::new(vec![vec![0.0, 1.0, 2.0]]);
        let mut buf = vec![0u8; 400 * 300 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (400, 300)).into_drawing_area();
        draw_bands(&root, &bands, &BandsPlotOptions::default()).unwrap();
    }
}
