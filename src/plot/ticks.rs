//! # 能带图 x 轴刻度
//!
//! 由高对称路径元数据生成刻度位置与标签：
//! - 不连续路径段的端点合并为 `A|B`
//! - `GAMMA` 替换为希腊字母 Γ
//!
//! 两条生成路径：
//! - `create_xticks`: 基于 Seek-path 参数（path + explicit_segments）
//! - `create_xticks_bands`: 基于能带自带的 labels / label_numbers，
//!   相邻 k 点（索引差为 1）上的标签合并为一个刻度
//!
//! ## 依赖关系
//! - 被 `plot/bands.rs`, `plot/comparison.rs` 使用
//! - 使用 `models/bands.rs`

use crate::error::{Result, SuperconError};
use crate::models::{BandsData, SeekpathParams};

/// 刻度位置与标签
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

impl XTicks {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// 查找位置 `x` 处的标签
    pub fn label_at(&self, x: f64) -> Option<&str> {
        self.positions
            .iter()
            .zip(&self.labels)
            .find(|(p, _)| (*p - x).abs() < 1e-9)
            .map(|(_, l)| l.as_str())
    }
}

/// `GAMMA` -> `Γ`
pub fn transform_gamma(label: &str) -> String {
    if label == "GAMMA" {
        "Γ".to_string()
    } else {
        label.to_string()
    }
}

/// 基于 Seek-path 参数生成刻度
pub fn create_xticks(params: &SeekpathParams) -> Result<XTicks> {
    let path = &params.path;
    let segments = &params.explicit_segments;

    if path.is_empty() || segments.is_empty() {
        return Err(SuperconError::InvalidInput(
            "seekpath parameters have an empty path".to_string(),
        ));
    }

    let mut labels = vec![transform_gamma(&path[0].0)];

    for (i, (_, end)) in path.iter().enumerate() {
        match path.get(i + 1) {
            Some((next_start, _)) if next_start == end => labels.push(transform_gamma(end)),
            Some((next_start, _)) => labels.push(format!("{}|{}", transform_gamma(end), next_start)),
            None => labels.push(transform_gamma(end)),
        }
    }

    let mut positions = vec![segments[0].0 as f64];
    positions.extend(segments.iter().map(|(_, end)| *end as f64));

    Ok(XTicks { positions, labels })
}

/// 基于能带标签属性生成刻度
///
/// 标签数据为空或长度不一致时返回 None。
pub fn create_xticks_bands(bands: &BandsData) -> Option<XTicks> {
    let labels = &bands.labels;
    let numbers = &bands.label_numbers;

    if labels.is_empty() || labels.len() != numbers.len() {
        return None;
    }

    let mut ticks: Vec<usize> = vec![numbers[0]];
    let mut tick_labels = vec![transform_gamma(&labels[0])];

    for (label, &number) in labels.iter().zip(numbers).skip(1) {
        let last = *ticks.last()?;
        if number == last + 1 {
            let previous = tick_labels.pop()?;
            tick_labels.push(format!("{}|{}", previous, transform_gamma(label)));
        } else {
            tick_labels.push(transform_gamma(label));
            ticks.push(number);
        }
    }

    Some(XTicks {
        positions: ticks.into_iter().map(|t| t as f64).collect(),
        labels: tick_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(labels: &[&str], numbers: &[usize]) -> BandsData {
        BandsData::default().with_labels(
            labels.iter().map(|s| s.to_string()).collect(),
            numbers.to_vec(),
        )
    }

    fn seekpath(path: &[(&str, &str)], segments: &[(usize, usize)]) -> SeekpathParams {
        SeekpathParams {
            path: path
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            explicit_segments: segments.to_vec(),
        }
    }

    #[test]
    fn test_transform_gamma() {
        assert_eq!(transform_gamma("GAMMA"), "Γ");
        assert_eq!(transform_gamma("X"), "X");
        assert_eq!(transform_gamma("gamma"), "gamma");
        assert_eq!(transform_gamma("G"), "G");
    }

    #[test]
    fn test_bands_adjacent_labels_merge() {
        let bands = labelled(&["A", "B", "C", "D"], &[0, 1, 2, 5]);
        let ticks = create_xticks_bands(&bands).unwrap();
        assert_eq!(ticks.positions, vec![0.0, 2.0, 5.0]);
        assert_eq!(ticks.labels, vec!["A|B", "C", "D"]);
    }

    #[test]
    fn test_bands_gamma_and_discontinuity() {
        let bands = labelled(&["GAMMA", "X", "U", "K", "GAMMA"], &[0, 50, 67, 68, 120]);
        let ticks = create_xticks_bands(&bands).unwrap();
        assert_eq!(ticks.positions, vec![0.0, 50.0, 67.0, 120.0]);
        assert_eq!(ticks.labels, vec!["Γ", "X", "U|K", "Γ"]);
        assert_eq!(ticks.label_at(67.0), Some("U|K"));
        assert_eq!(ticks.label_at(68.0), None);
    }

    #[test]
    fn test_bands_missing_labels() {
        assert!(create_xticks_bands(&BandsData::default()).is_none());
        assert!(create_xticks_bands(&labelled(&["A", "B"], &[0])).is_none());
    }

    #[test]
    fn test_seekpath_continuous_path() {
        let params = seekpath(&[("GAMMA", "X"), ("X", "M"), ("M", "GAMMA")], &[(0, 30), (30, 60), (60, 100)]);
        let ticks = create_xticks(&params).unwrap();
        assert_eq!(ticks.labels, vec!["Γ", "X", "M", "Γ"]);
        assert_eq!(ticks.positions, vec![0.0, 30.0, 60.0, 100.0]);
    }

    #[test]
    fn test_seekpath_disjoint_segments() {
        let params = seekpath(
            &[("GAMMA", "X"), ("U", "K"), ("K", "GAMMA")],
            &[(0, 50), (51, 60), (60, 110)],
        );
        let ticks = create_xticks(&params).unwrap();
        assert_eq!(ticks.labels, vec!["Γ", "X|U", "K", "Γ"]);
        assert_eq!(ticks.positions, vec![0.0, 50.0, 60.0, 110.0]);
    }

    #[test]
    fn test_seekpath_next_start_not_transformed() {
        let params = seekpath(&[("X", "W"), ("GAMMA", "L")], &[(0, 10), (11, 20)]);
        let ticks = create_xticks(&params).unwrap();
        assert_eq!(ticks.labels, vec!["X", "W|GAMMA", "L"]);
    }

    #[test]
    fn test_seekpath_empty() {
        assert!(create_xticks(&seekpath(&[], &[])).is_err());
    }
}
