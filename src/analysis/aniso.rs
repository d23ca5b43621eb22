//! # 各向异性能隙汇总
//!
//! 读取 EPW 各向异性 Eliashberg 输出的 `aiida.imag_aniso_gap0_*` 文件，
//! 对每个文件记录最低温度与以温度为权重的平均能隙。
//!
//! 列数不足或数据异常的文件被跳过，原因记录在 `GapSummary::warnings` 中。
//!
//! ## 依赖关系
//! - 被 `commands/plot/aniso.rs` 使用
//! - 使用 `models/store.rs` 的 ObjectStore
//! - 使用 `parsers/columns.rs`

use crate::error::Result;
use crate::models::{GapCurve, GapSummary, ObjectStore};
use crate::parsers::columns::{column, parse_columns};

/// 能隙文件名前缀
pub const ANISO_GAP_PREFIX: &str = "aiida.imag_aniso_gap0_";

/// 加权平均 Σwᵢvᵢ / Σwᵢ
///
/// 长度不一致、输入为空或权重和为零时返回 None。
pub fn weighted_average(values: &[f64], weights: &[f64]) -> Option<f64> {
    if values.is_empty() || values.len() != weights.len() {
        return None;
    }

    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 || !weight_sum.is_finite() {
        return None;
    }

    let weighted: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    Some(weighted / weight_sum)
}

/// 解析单个能隙文件
pub fn parse_gap_curve(name: &str, content: &str) -> std::result::Result<GapCurve, String> {
    let rows = parse_columns(content, name).map_err(|e| e.to_string())?;

    if rows.is_empty() {
        return Err("no data rows".to_string());
    }

    match (column(&rows, 0), column(&rows, 1)) {
        (Some(temperature), Some(delta)) => Ok(GapCurve {
            name: name.to_string(),
            temperature,
            delta,
        }),
        _ => Err(format!("expected at least 2 columns, found {}", rows[0].len())),
    }
}

/// 汇总仓库中所有能隙文件
pub fn aggregate(store: &dyn ObjectStore) -> Result<GapSummary> {
    let mut summary = GapSummary::default();

    for name in store.list_object_names()? {
        if !name.starts_with(ANISO_GAP_PREFIX) {
            continue;
        }

        let content = match store.get_object_content(&name) {
            Ok(c) => c,
            Err(e) => {
                summary.warnings.push(format!("{}: {}", name, e));
                continue;
            }
        };
        let curve = match parse_gap_curve(&name, &content) {
            Ok(c) => c,
            Err(reason) => {
                summary.warnings.push(format!("{}: {}", name, reason));
                continue;
            }
        };

        let stats = curve
            .min_temperature()
            .zip(weighted_average(&curve.delta, &curve.temperature));

        match stats {
            Some((min_temp, average)) => {
                summary.temperatures.push(min_temp);
                summary.average_deltas.push(average);
                summary.curves.push(curve);
            }
            None => summary
                .warnings
                .push(format!("{}: temperature weights sum to zero", name)),
        }
    }

    Ok(summary)
}
