//! # Eliashberg 谱函数导出量
//!
//! 由 α²F(ω) 计算电声耦合常数 λ、对数平均频率 ω_log，
//! 以及 Allen-Dynes 临界温度估计。
//!
//! ## 公式
//! - λ = 2 ∫ α²F(ω)/ω dω
//! - ω_log = exp[(2/λ) ∫ α²F(ω) ln(ω)/ω dω]
//! - Tc = ω_log/1.2 · exp[-1.04(1+λ) / (λ - μ*(1+0.62λ))]
//!
//! 积分使用梯形公式，ω ≤ 0 的点不参与积分。
//!
//! ## 依赖关系
//! - 被 `plot/a2f.rs`, `commands/plot/a2f.rs` 使用
//! - 使用 `models/spectrum.rs`

use crate::models::A2fSpectrum;

/// meV -> K
pub const MEV_TO_KELVIN: f64 = 11.604518;

/// Allen-Dynes 公式默认库仑赝势
pub const DEFAULT_MU_STAR: f64 = 0.13;

/// λ 与 ω_log (K)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouplingSummary {
    pub lambda: f64,
    pub omega_log: f64,
}

/// 梯形积分
fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

/// 计算 λ 和 ω_log（ω_log 以 K 为单位）
///
/// 有效点少于两个或 λ 非正时返回 None。
pub fn lambda_omega_log(spectrum: &A2fSpectrum) -> Option<CouplingSummary> {
    let (omega, a2f): (Vec<f64>, Vec<f64>) = spectrum
        .points()
        .filter(|(w, a)| *w > 0.0 && w.is_finite() && a.is_finite())
        .unzip();

    if omega.len() < 2 {
        return None;
    }

    let integrand: Vec<f64> = omega.iter().zip(&a2f).map(|(w, a)| a / w).collect();
    let lambda = 2.0 * trapezoid(&omega, &integrand);

    if lambda <= 0.0 {
        return None;
    }

    let log_integrand: Vec<f64> = omega
        .iter()
        .zip(&integrand)
        .map(|(w, f)| f * w.ln())
        .collect();
    let omega_log_mev = (2.0 / lambda * trapezoid(&omega, &log_integrand)).exp();

    Some(CouplingSummary {
        lambda,
        omega_log: omega_log_mev * MEV_TO_KELVIN,
    })
}

/// Allen-Dynes 临界温度 (K)
///
/// `omega_log` 以 K 为单位。分母非正（耦合过弱）时返回 0。
pub fn allen_dynes(lambda: f64, omega_log: f64, mu_star: f64) -> f64 {
    let denominator = lambda - mu_star * (1.0 + 0.62 * lambda);
    if denominator <= 0.0 {
        return 0.0;
    }
    omega_log / 1.2 * (-1.04 * (1.0 + lambda) / denominator).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_linear() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        assert!((trapezoid(&x, &y) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_lambda_proportional_spectrum() {
        // α²F(ω) = c·ω 时 λ = 2c(ω_max - ω_min)
        let omega: Vec<f64> = (1..=101).map(|i| i as f64 * 0.5).collect();
        let a2f: Vec<f64> = omega.iter().map(|w| 0.01 * w).collect();
        let spectrum = A2fSpectrum::new(omega.clone(), a2f);

        let summary = lambda_omega_log(&spectrum).unwrap();
        let expected = 2.0 * 0.01 * (50.5 - 0.5);
        assert!((summary.lambda - expected).abs() < 1e-9);
    }

    #[test]
    fn test_omega_log_single_peak() {
        // 常数谱在 [a, b] 上: ω_log = sqrt(a·b)
        let omega: Vec<f64> = (0..=2000).map(|i| 19.0 + i as f64 * 0.001).collect();
        let a2f: Vec<f64> = omega.iter().map(|_| 0.5).collect();
        let spectrum = A2fSpectrum::new(omega, a2f);

        let summary = lambda_omega_log(&spectrum).unwrap();
        let omega_log_mev = summary.omega_log / MEV_TO_KELVIN;
        let expected = (19.0_f64 * 21.0).sqrt();
        assert!((omega_log_mev - expected).abs() < 1e-4, "got {}", omega_log_mev);
    }

    #[test]
    fn test_zero_frequency_excluded() {
        let spectrum = A2fSpectrum::new(vec![0.0, 1.0, 2.0], vec![0.3, 0.1, 0.2]);
        assert!(lambda_omega_log(&spectrum).unwrap().lambda.is_finite());
    }

    #[test]
    fn test_degenerate_spectrum() {
        assert!(lambda_omega_log(&A2fSpectrum::default()).is_none());
        let flat = A2fSpectrum::new(vec![1.0, 2.0], vec![0.0, 0.0]);
        assert!(lambda_omega_log(&flat).is_none());
    }

    #[test]
    fn test_allen_dynes() {
        // λ = 1, ω_log = 300 K, μ* = 0.13
        let tc = allen_dynes(1.0, 300.0, 0.13);
        let expected = 250.0 * (-2.08_f64 / (1.0 - 0.13 * 1.62)).exp();
        assert!((tc - expected).abs() < 1e-9);
        assert!(tc > 0.0 && tc < 300.0);
    }

    #[test]
    fn test_allen_dynes_weak_coupling() {
        assert_eq!(allen_dynes(0.1, 300.0, 0.13), 0.0);
    }
}
