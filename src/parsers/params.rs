//! # 计算参数读取
//!
//! 提取费米能和 Seek-path 路径参数。
//!
//! 费米能来源可以是：
//! - 直接给出的数值
//! - 计算节点目录（读取其参数字典）
//! - JSON 参数字典（`output_parameters` / `band_parameters`，键 `fermi_energy`）
//! - Quantum ESPRESSO 标准输出（"the Fermi energy is X ev"）
//!
//! ## 依赖关系
//! - 被 `commands/check.rs`, `commands/plot/bands.rs` 使用
//! - 使用 `regex`, `serde_json`

use crate::error::{Result, SuperconError};
use crate::models::store::number_parameter;
use crate::models::{CalcNode, SeekpathParams};

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const FERMI_KEY: &str = "fermi_energy";

/// 费米能来源
#[derive(Debug, Clone, PartialEq)]
pub enum FermiSource {
    Value(f64),
    File(PathBuf),
}

impl FermiSource {
    /// 解析命令行输入：数值优先，否则视为文件路径
    pub fn parse(input: &str) -> FermiSource {
        match input.trim().parse::<f64>() {
            Ok(v) => FermiSource::Value(v),
            Err(_) => FermiSource::File(PathBuf::from(input)),
        }
    }

    /// 解析出费米能 (eV)
    pub fn resolve(&self) -> Result<f64> {
        match self {
            FermiSource::Value(v) => Ok(*v),
            FermiSource::File(path) if path.is_dir() => CalcNode::open(path)?.parameter_f64(FERMI_KEY),
            FermiSource::File(path) => read_fermi_energy(path),
        }
    }
}

/// 从文件读取费米能
pub fn read_fermi_energy(path: &Path) -> Result<f64> {
    let content = fs::read_to_string(path).map_err(|e| SuperconError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let source = path.display().to_string();

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        fermi_from_json(&content, &source)
    } else {
        fermi_from_qe_output(&content).ok_or_else(|| SuperconError::MissingParameter {
            key: FERMI_KEY.to_string(),
            source_name: source,
        })
    }
}

/// 从 JSON 参数字典提取费米能
pub fn fermi_from_json(content: &str, source: &str) -> Result<f64> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    number_parameter(&value, FERMI_KEY, source)
}

/// 从 QE 输出提取最后一次出现的费米能
pub fn fermi_from_qe_output(content: &str) -> Option<f64> {
    let pattern = Regex::new(r"(?i)the Fermi energy is\s+(-?\d+(?:\.\d*)?)\s*ev").ok()?;
    pattern
        .captures_iter(content)
        .last()
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 读取 Seek-path 参数 JSON
pub fn load_seekpath(path: &Path) -> Result<SeekpathParams> {
    let content = fs::read_to_string(path).map_err(|e| SuperconError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fermi_source_parse() {
        assert_eq!(FermiSource::parse("5.25"), FermiSource::Value(5.25));
        assert_eq!(FermiSource::parse("-1"), FermiSource::Value(-1.0));
        assert_eq!(
            FermiSource::parse("nscf/output_parameters.json"),
            FermiSource::File(PathBuf::from("nscf/output_parameters.json"))
        );
    }

    #[test]
    fn test_fermi_from_json() {
        let json = r#"{"fermi_energy": 7.1234, "fermi_energy_units": "eV"}"#;
        assert_eq!(fermi_from_json(json, "params").unwrap(), 7.1234);
    }

    #[test]
    fn test_fermi_missing_key() {
        let err = fermi_from_json(r#"{"energy": 1.0}"#, "params").unwrap_err();
        assert!(matches!(err, SuperconError::MissingParameter { .. }));
    }

    #[test]
    fn test_fermi_from_qe_output() {
        let output = "\
     End of band structure calculation

     the Fermi energy is    12.3456 ev

!    total energy              =     -93.45 Ry
     the Fermi energy is    12.4000 ev
";
        assert_eq!(fermi_from_qe_output(output), Some(12.4));
        assert_eq!(fermi_from_qe_output("no fermi level here"), None);
    }
}
