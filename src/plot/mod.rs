//! # 图表生成模块
//!
//! 使用 `plotters` 库绘制 α²F 谱函数、各向异性能隙与能带结构。
//!
//! 所有 `draw_*` 函数都在调用方提供的绘图区域上作图，
//! `render_*` 包装函数负责创建 PNG/SVG 后端并写出文件。
//!
//! ## 子模块
//! - `ticks`: 能带图刻度与标签
//! - `a2f`: α²F 谱函数
//! - `aniso`: 各向异性能隙及拟合
//! - `bands`: 能带结构
//! - `comparison`: QE / Wannier90 能带对比
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `analysis/` 计算派生量
//! - 使用 `plotters` 渲染图表

pub mod a2f;
pub mod aniso;
pub mod bands;
pub mod comparison;
pub mod ticks;

use crate::error::{Result, SuperconError};

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// α²F 曲线颜色 (#526AB1)
pub const A2F_COLOR: RGBColor = RGBColor(0x52, 0x6A, 0xB1);

/// 保存图片的固定尺寸：8 x 6 英寸 @ 300 dpi
pub const SAVE_DPI: u32 = 300;
pub const SAVE_SIZE: (u32, u32) = (8 * SAVE_DPI, 6 * SAVE_DPI);

/// 图像输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureFormat {
    Png,
    Svg,
}

impl FigureFormat {
    /// 从文件扩展名推断格式
    pub fn from_path(path: &Path) -> FigureFormat {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("svg") => FigureFormat::Svg,
            _ => FigureFormat::Png,
        }
    }
}

/// 将 plotters 错误转换为 SuperconError
pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> SuperconError {
    SuperconError::PlotError(format!("{:?}", e))
}

/// 解析颜色: 常用颜色名或 `#RRGGBB`
pub fn parse_color(input: &str) -> Result<RGBColor> {
    let named = match input.to_lowercase().as_str() {
        "blue" | "b" => Some(BLUE),
        "red" | "r" => Some(RED),
        "green" | "g" => Some(GREEN),
        "black" | "k" => Some(BLACK),
        "magenta" | "m" => Some(MAGENTA),
        "cyan" | "c" => Some(CYAN),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let hex = input
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| SuperconError::InvalidArgument(format!("Invalid color '{}'", input)))?;

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| SuperconError::InvalidArgument(format!("Invalid color '{}'", input)))
    };

    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// 带边距的数据范围，退化范围扩展为单位宽度
pub(crate) fn padded_range(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < 1e-12 {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * fraction;
    (min - pad, max + pad)
}

/// 画一条水平虚线
pub(crate) fn draw_dashed_hline<DB, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    y: f64,
    x_min: f64,
    x_max: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    const SEGMENTS: usize = 80;
    let width = (x_max - x_min) / SEGMENTS as f64;

    chart
        .draw_series((0..SEGMENTS).step_by(2).map(|i| {
            let start = x_min + i as f64 * width;
            PathElement::new(vec![(start, y), (start + width, y)], BLACK.stroke_width(1))
        }))
        .map_err(plot_err)?;

    Ok(())
}

/// 在每个刻度处画竖线
pub(crate) fn draw_vlines<DB, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    positions: &[f64],
    y_min: f64,
    y_max: f64,
    color: RGBColor,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    chart
        .draw_series(positions.iter().map(|x| {
            PathElement::new(vec![(*x, y_min), (*x, y_max)], color.stroke_width(1))
        }))
        .map_err(plot_err)?;
    Ok(())
}

/// 只在给定位置出刻度并以对应文字标注的 f64 坐标轴
pub(crate) struct LabelledAxis {
    inner: RangedCoordf64,
    ticks: Vec<(f64, String)>,
}

impl LabelledAxis {
    pub(crate) fn new(range: Range<f64>, ticks: Vec<(f64, String)>) -> Self {
        LabelledAxis {
            inner: range.into(),
            ticks,
        }
    }

    /// 某一位置的刻度文字，不是刻度时为空
    pub(crate) fn label_at(&self, value: f64) -> &str {
        self.ticks
            .iter()
            .find(|(x, _)| (x - value).abs() < 1e-6)
            .map(|(_, label)| label.as_str())
            .unwrap_or("")
    }
}

impl Ranged for LabelledAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.iter().map(|(x, _)| *x).collect()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

impl ValueFormatter<f64> for LabelledAxis {
    fn format_ext(&self, value: &f64) -> String {
        self.label_at(*value).to_string()
    }
}

/// 无标签时的 x 轴关键点（等间距整数）
pub(crate) fn fallback_key_points(x_max: f64) -> Vec<f64> {
    if x_max <= 0.0 {
        return vec![0.0];
    }
    let raw = x_max / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(raw);

    (0..)
        .map(|i| i as f64 * step)
        .take_while(|x| *x <= x_max + 1e-9)
        .collect()
}
