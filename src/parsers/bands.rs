//! # 能带文件解析器
//!
//! 支持三种来源：
//! - `BandsData` JSON（`bands`, `labels`, `label_numbers`）
//! - gnuplot 风格能带文件（Wannier90 `*_band.dat` / QE `bands.dat.gnu`）：
//!   每条能带为一个数据块，块间以空行分隔，列为 (k 路径坐标, 能量)
//! - Wannier90 `*_band.labelinfo.dat`：高对称点标签与 k 点索引
//!
//! ## 依赖关系
//! - 被 `commands/plot/bands.rs`, `commands/check.rs` 使用
//! - 使用 `models/bands.rs`

use crate::error::{Result, SuperconError};
use crate::models::BandsData;
use crate::parsers::columns::parse_row;

use std::fs;
use std::path::{Path, PathBuf};

/// 根据扩展名加载能带
///
/// `.json` 按 `BandsData` 反序列化；其余按 gnuplot 格式解析，
/// 并在给定或能找到 labelinfo 文件时附加标签。
pub fn load_bands(path: &Path, labelinfo: Option<&Path>) -> Result<BandsData> {
    let content = read(path)?;
    let source = path.display().to_string();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let bands: BandsData = serde_json::from_str(&content)?;
        return Ok(bands);
    }

    let bands = parse_band_dat_content(&content, &source)?;

    let labelinfo_path = labelinfo
        .map(Path::to_path_buf)
        .or_else(|| find_labelinfo(path));

    match labelinfo_path {
        Some(label_path) => {
            let (labels, numbers) =
                parse_labelinfo_content(&read(&label_path)?, &label_path.display().to_string())?;
            Ok(bands.with_labels(labels, numbers))
        }
        None => Ok(bands),
    }
}

/// 查找同名 labelinfo 文件: `aiida_band.dat` -> `aiida_band.labelinfo.dat`
fn find_labelinfo(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".dat").unwrap_or(name);
    let candidate = path.with_file_name(format!("{}.labelinfo.dat", stem));
    candidate.is_file().then_some(candidate)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| SuperconError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 解析 gnuplot 风格能带文件
pub fn parse_band_dat_content(content: &str, source: &str) -> Result<BandsData> {
    let mut bands: Vec<Vec<f64>> = Vec::new();
    let mut current: Vec<f64> = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if !current.is_empty() {
                bands.push(std::mem::take(&mut current));
            }
            continue;
        }

        let row = parse_row(line).filter(|r| r.len() >= 2).ok_or_else(|| {
            SuperconError::ParseError {
                format: "band".to_string(),
                path: source.to_string(),
                reason: format!("expected '<k> <energy>' on line {}", line_no + 1),
            }
        })?;
        current.push(row[1]);
    }

    if !current.is_empty() {
        bands.push(current);
    }

    if bands.is_empty() {
        return Err(SuperconError::ParseError {
            format: "band".to_string(),
            path: source.to_string(),
            reason: "no bands found".to_string(),
        });
    }

    Ok(BandsData::new(bands))
}

/// 解析 Wannier90 labelinfo 文件
///
/// 每行: `label  index(1-based)  x  kx  ky  kz`。
/// Wannier90 习惯将 Γ 写作 `G`，此处统一为 `GAMMA`。
pub fn parse_labelinfo_content(content: &str, source: &str) -> Result<(Vec<String>, Vec<usize>)> {
    let mut labels = Vec::new();
    let mut numbers = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let index = parts
            .get(1)
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|i| *i >= 1)
            .ok_or_else(|| SuperconError::ParseError {
                format: "labelinfo".to_string(),
                path: source.to_string(),
                reason: format!("invalid k-point index on line {}", line_no + 1),
            })?;

        let label = match parts[0] {
            "G" | "Γ" => "GAMMA".to_string(),
            other => other.to_string(),
        };

        labels.push(label);
        numbers.push(index - 1);
    }

    Ok((labels, numbers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_band_dat() {
        let content = "0.0 -1.0\n0.1 -0.9\n0.2 -0.8\n\n0.0 2.0\n0.1 2.1\n0.2 2.2\n\n";
        let bands = parse_band_dat_content(content, "band.dat").unwrap();
        assert_eq!(bands.num_bands(), 2);
        assert_eq!(bands.bands[0], vec![-1.0, -0.9, -0.8]);
        assert_eq!(bands.bands[1], vec![2.0, 2.1, 2.2]);
    }

    #[test]
    fn test_parse_band_dat_without_trailing_blank() {
        let content = "0.0 1.0\n0.1 1.5";
        let bands = parse_band_dat_content(content, "band.dat").unwrap();
        assert_eq!(bands.num_bands(), 1);
        assert_eq!(bands.num_kpoints(), 2);
    }

    #[test]
    fn test_parse_band_dat_rejects_single_column() {
        assert!(parse_band_dat_content("0.0\n0.1\n", "band.dat").is_err());
        assert!(parse_band_dat_content("\n\n", "band.dat").is_err());
    }

    #[test]
    fn test_parse_labelinfo() {
        let content = "\
G                   1       0.0000000000       0.0000000000       0.0000000000       0.0000000000
X                  51       0.8660254038       0.5000000000       0.0000000000       0.5000000000
U                  68       1.1720000000       0.6250000000       0.2500000000       0.6250000000
K                  69       1.1720000000       0.3750000000       0.3750000000       0.7500000000
";
        let (labels, numbers) = parse_labelinfo_content(content, "labelinfo").unwrap();
        assert_eq!(labels, vec!["GAMMA", "X", "U", "K"]);
        assert_eq!(numbers, vec![0, 50, 67, 68]);
    }

    #[test]
    fn test_bands_json() {
        let json = r#"{"bands": [[0.0, 1.0], [2.0, 3.0]], "labels": ["GAMMA", "X"], "label_numbers": [0, 1]}"#;
        let bands: BandsData = serde_json::from_str(json).unwrap();
        assert_eq!(bands.num_bands(), 2);
        assert_eq!(bands.labels, vec!["GAMMA", "X"]);
    }
}
