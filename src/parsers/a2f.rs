//! # EPW α²F 文件解析器
//!
//! 解析 EPW 输出的 `prefix.a2f` 文件：
//! 首列为频率 (meV)，其后每列对应一个声子展宽下的 α²F。
//! 文件头和文件尾的说明行（如 "Integrated el-ph coupling"）被忽略。
//!
//! ## 依赖关系
//! - 被 `commands/plot/a2f.rs` 使用
//! - 使用 `parsers/columns.rs`, `models/spectrum.rs`

use crate::error::{Result, SuperconError};
use crate::models::A2fSpectrum;
use crate::parsers::columns::parse_row;

use std::fs;
use std::path::Path;

/// 从文件解析 α²F
pub fn parse_a2f_file(path: &Path, column: usize) -> Result<A2fSpectrum> {
    let content = fs::read_to_string(path).map_err(|e| SuperconError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_a2f_content(&content, column, &path.display().to_string())
}

/// 从文本解析 α²F
///
/// `column` 为 α²F 所在列（1 表示第一个展宽）。
pub fn parse_a2f_content(content: &str, column: usize, source: &str) -> Result<A2fSpectrum> {
    if column == 0 {
        return Err(SuperconError::InvalidArgument(
            "α²F column must be >= 1 (column 0 is the frequency)".to_string(),
        ));
    }

    let mut frequency = Vec::new();
    let mut a2f = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_row(line) {
            Some(row) => {
                let value = row.get(column).ok_or_else(|| SuperconError::ParseError {
                    format: "a2f".to_string(),
                    path: source.to_string(),
                    reason: format!("row has {} columns, column {} requested", row.len(), column),
                })?;
                frequency.push(row[0]);
                a2f.push(*value);
            }
            // 数据段之后的说明行视为文件尾
            None if !frequency.is_empty() => break,
            None => continue,
        }
    }

    if frequency.is_empty() {
        return Err(SuperconError::ParseError {
            format: "a2f".to_string(),
            path: source.to_string(),
            reason: "no numeric data".to_string(),
        });
    }

    Ok(A2fSpectrum::new(frequency, a2f))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#" w[meV] a2f and integrated 2*a2f/w for   3 smearing values
  0.5000000   0.0010000   0.0012000   0.0014000
  1.0000000   0.0200000   0.0210000   0.0220000
  1.5000000   0.0500000   0.0480000   0.0470000
 Integrated el-ph coupling
  #            1.1         1.2         1.3
 Phonon smearing (meV)
  #            0.05        0.10        0.15
"#;

    #[test]
    fn test_parse_first_smearing() {
        let spectrum = parse_a2f_content(SAMPLE, 1, "aiida.a2f").unwrap();
        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum.frequency, vec![0.5, 1.0, 1.5]);
        assert_eq!(spectrum.a2f, vec![0.001, 0.02, 0.05]);
    }

    #[test]
    fn test_parse_other_smearing() {
        let spectrum = parse_a2f_content(SAMPLE, 3, "aiida.a2f").unwrap();
        assert_eq!(spectrum.a2f, vec![0.0014, 0.022, 0.047]);
    }

    #[test]
    fn test_column_out_of_range() {
        assert!(parse_a2f_content(SAMPLE, 4, "aiida.a2f").is_err());
        assert!(parse_a2f_content(SAMPLE, 0, "aiida.a2f").is_err());
    }

    #[test]
    fn test_no_data() {
        assert!(parse_a2f_content("# only a header\n", 1, "empty").is_err());
    }
}
