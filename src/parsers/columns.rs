//! # 数值列文本解析
//!
//! 读取以空白分隔的数值表格（类似 `numpy.loadtxt`）。
//! `#` 开头的注释行与空行被忽略。
//!
//! ## 依赖关系
//! - 被 `parsers/a2f.rs`, `analysis/aniso.rs` 使用

use crate::error::{Result, SuperconError};

/// 解析数值表格，返回按行组织的数据
///
/// 行内出现非数值或各行列数不一致时返回错误。
pub fn parse_columns(content: &str, source: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = parse_row(line).ok_or_else(|| SuperconError::ParseError {
            format: "table".to_string(),
            path: source.to_string(),
            reason: format!("non-numeric value on line {}", line_no + 1),
        })?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(SuperconError::ParseError {
                    format: "table".to_string(),
                    path: source.to_string(),
                    reason: format!(
                        "line {} has {} columns, expected {}",
                        line_no + 1,
                        row.len(),
                        first.len()
                    ),
                });
            }
        }

        rows.push(row);
    }

    Ok(rows)
}

/// 解析一行数值，失败返回 None
pub fn parse_row(line: &str) -> Option<Vec<f64>> {
    line.split_whitespace()
        .map(|tok| tok.parse::<f64>().ok())
        .collect()
}

/// 提取第 `index` 列
pub fn column(rows: &[Vec<f64>], index: usize) -> Option<Vec<f64>> {
    rows.iter().map(|row| row.get(index).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_columns() {
        let content = "# T  delta\n 10.0  1.5\n\n 12.0  1.2\n";
        let rows = parse_columns(content, "test").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(column(&rows, 0).unwrap(), vec![10.0, 12.0]);
        assert_eq!(column(&rows, 1).unwrap(), vec![1.5, 1.2]);
        assert!(column(&rows, 2).is_none());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let content = "1.0 2.0\n3.0\n";
        assert!(parse_columns(content, "test").is_err());
    }

    #[test]
    fn test_non_numeric_rejected() {
        let content = "1.0 2.0\nfoo bar\n";
        assert!(parse_columns(content, "test").is_err());
    }

    #[test]
    fn test_scientific_notation() {
        let row = parse_row("  1.0E-02  -3.5e+01 ").unwrap();
        assert_eq!(row, vec![0.01, -35.0]);
    }
}
