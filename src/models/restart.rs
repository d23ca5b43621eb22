//! # 工作流重启模式
//!
//! EPW 插值工作流支持的重启点标签。仅是一组封闭的标签集合，
//! 状态转移逻辑由工作流引擎负责。
//!
//! ## 依赖关系
//! - 被 `commands/restart.rs` 使用
//! - 无外部模块依赖

use crate::error::SuperconError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 重启模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestartType {
    FromScratch,
    RestartWannier,
    RestartPhonon,
    RestartEpw,
    RestartA2f,
    RestartIso,
    RestartAniso,
    RestartTransport,
}

impl RestartType {
    /// 全部重启模式（按声明顺序）
    pub const ALL: [RestartType; 8] = [
        RestartType::FromScratch,
        RestartType::RestartWannier,
        RestartType::RestartPhonon,
        RestartType::RestartEpw,
        RestartType::RestartA2f,
        RestartType::RestartIso,
        RestartType::RestartAniso,
        RestartType::RestartTransport,
    ];

    /// 标签字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            RestartType::FromScratch => "FROM_SCRATCH",
            RestartType::RestartWannier => "RESTART_WANNIER",
            RestartType::RestartPhonon => "RESTART_PHONON",
            RestartType::RestartEpw => "RESTART_EPW",
            RestartType::RestartA2f => "RESTART_A2F",
            RestartType::RestartIso => "RESTART_ISO",
            RestartType::RestartAniso => "RESTART_ANISO",
            RestartType::RestartTransport => "RESTART_TRANSPORT",
        }
    }

    /// 简短说明
    pub fn description(&self) -> &'static str {
        match self {
            RestartType::FromScratch => "Run the full chain from the SCF step",
            RestartType::RestartWannier => "Reuse the Wannier90 localisation",
            RestartType::RestartPhonon => "Reuse the phonon calculation",
            RestartType::RestartEpw => "Reuse the EPW interpolation (epb/ephmat files)",
            RestartType::RestartA2f => "Restart from the Eliashberg spectral function",
            RestartType::RestartIso => "Restart from the isotropic Eliashberg solution",
            RestartType::RestartAniso => "Restart from the anisotropic Eliashberg solution",
            RestartType::RestartTransport => "Restart the transport calculation",
        }
    }
}

impl std::fmt::Display for RestartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RestartType {
    type Err = SuperconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RestartType::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| SuperconError::UnknownRestartType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        for restart in RestartType::ALL {
            let parsed: RestartType = restart.as_str().parse().unwrap();
            assert_eq!(parsed, restart);
            assert_eq!(restart.to_string(), restart.as_str());
        }
    }

    #[test]
    fn test_closed_set() {
        assert_eq!(RestartType::ALL.len(), 8);
        assert!("RESTART_ELPH".parse::<RestartType>().is_err());
        assert!("restart_epw".parse::<RestartType>().is_err());
        assert!("".parse::<RestartType>().is_err());
    }

    #[test]
    fn test_serde_uses_tag_string() {
        for restart in RestartType::ALL {
            let json = serde_json::to_string(&restart).unwrap();
            assert_eq!(json, format!("\"{}\"", restart.as_str()));
            let back: RestartType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, restart);
        }
    }
}
