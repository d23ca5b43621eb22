//! # BCS 型能隙拟合
//!
//! 拟合模型 Δ(T) = Δ₀ · (1 - (T/Tc)^p)^½，三个自由参数 (p, Δ₀, Tc)。
//!
//! ## 算法
//! 带下界投影的 Levenberg-Marquardt：
//! 1. 前向差分计算 Jacobian
//! 2. 求解 (JᵀJ + μ·diag(JᵀJ)) δ = -Jᵀr
//! 3. 将试探点投影到下界 [0, 1, 0]，代价下降则接受并减小 μ，否则增大 μ
//!
//! 点数不足、输入含非有限值或结果非有限时返回 None，不会 panic。
//!
//! ## 依赖关系
//! - 被 `plot/aniso.rs`, `commands/plot/aniso.rs` 使用
//! - 使用 `models/spectrum.rs` 的 GapFit

use crate::models::GapFit;

/// 参数下界 (p, Δ₀, Tc)
const LOWER_BOUNDS: [f64; 3] = [0.0, 1.0, 0.0];

const MAX_ITERATIONS: usize = 500;
const MAX_CURVE_POINTS: usize = 100_000;

/// 能隙模型，T ≥ Tc 时为 0
pub fn gap_model(t: f64, exponent: f64, delta_zero: f64, tc: f64) -> f64 {
    if tc <= 0.0 || t >= tc {
        return 0.0;
    }
    let ratio = (t / tc).max(0.0);
    delta_zero * (1.0 - ratio.powf(exponent)).max(0.0).sqrt()
}

impl GapFit {
    pub fn evaluate(&self, t: f64) -> f64 {
        gap_model(t, self.exponent, self.delta_zero, self.critical_temperature)
    }

    /// 从 `start` 到 Tc（不含）以 `step` 取样的拟合曲线
    pub fn curve(&self, start: f64, step: f64) -> Vec<(f64, f64)> {
        if step <= 0.0 || !start.is_finite() || self.critical_temperature <= start {
            return Vec::new();
        }
        (0..MAX_CURVE_POINTS)
            .map(|i| start + i as f64 * step)
            .take_while(|t| *t < self.critical_temperature)
            .map(|t| (t, self.evaluate(t)))
            .collect()
    }
}

/// 拟合能隙-温度数据
///
/// 末尾 `ignore_temps` 个点不参与拟合；初值 p = 1, Δ₀ = 首个平均能隙，
/// Tc = 全部温度的最大值。
pub fn fit_gap(temps: &[f64], deltas: &[f64], ignore_temps: usize) -> Option<GapFit> {
    if temps.len() != deltas.len() || temps.is_empty() {
        return None;
    }
    if temps.iter().chain(deltas).any(|v| !v.is_finite()) {
        return None;
    }

    let t_max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let initial = project([1.0, deltas[0], t_max]);

    let n = temps.len().checked_sub(ignore_temps)?;
    let (xs, ys) = (&temps[..n], &deltas[..n]);

    // 三个参数至少需要三个点
    if xs.len() < 3 {
        return None;
    }

    let params = levenberg_marquardt(xs, ys, initial);
    let fit = GapFit {
        exponent: params[0],
        delta_zero: params[1],
        critical_temperature: params[2],
    };

    let finite = fit.exponent.is_finite()
        && fit.delta_zero.is_finite()
        && fit.critical_temperature.is_finite();
    finite.then_some(fit)
}

fn project(mut params: [f64; 3]) -> [f64; 3] {
    for (p, lo) in params.iter_mut().zip(LOWER_BOUNDS) {
        if *p < lo {
            *p = lo;
        }
    }
    params
}

fn residuals(xs: &[f64], ys: &[f64], params: &[f64; 3]) -> Vec<f64> {
    xs.iter()
        .zip(ys)
        .map(|(x, y)| gap_model(*x, params[0], params[1], params[2]) - y)
        .collect()
}

fn cost(r: &[f64]) -> f64 {
    0.5 * r.iter().map(|v| v * v).sum::<f64>()
}

fn levenberg_marquardt(xs: &[f64], ys: &[f64], initial: [f64; 3]) -> [f64; 3] {
    let mut params = initial;
    let mut r = residuals(xs, ys, &params);
    let mut current_cost = cost(&r);
    let mut mu = 1e-3;

    for _ in 0..MAX_ITERATIONS {
        let jacobian = forward_jacobian(xs, ys, &params, &r);

        // JᵀJ 与 Jᵀr
        let mut jtj = [[0.0; 3]; 3];
        let mut jtr = [0.0; 3];
        for (row, ri) in jacobian.iter().zip(&r) {
            for a in 0..3 {
                jtr[a] += row[a] * ri;
                for b in 0..3 {
                    jtj[a][b] += row[a] * row[b];
                }
            }
        }

        if jtr.iter().all(|g| g.abs() < 1e-14) {
            break;
        }

        let mut improved = false;
        while mu < 1e12 {
            let mut system = jtj;
            for (a, row) in system.iter_mut().enumerate() {
                row[a] += mu * jtj[a][a].max(1e-12);
            }
            let rhs = [-jtr[0], -jtr[1], -jtr[2]];

            let step = match solve3(system, rhs) {
                Some(s) => s,
                None => {
                    mu *= 4.0;
                    continue;
                }
            };
            let trial = project([
                params[0] + step[0],
                params[1] + step[1],
                params[2] + step[2],
            ]);
            let trial_r = residuals(xs, ys, &trial);
            let trial_cost = cost(&trial_r);

            if trial_cost.is_finite() && trial_cost < current_cost {
                let decrease = current_cost - trial_cost;
                let moved: f64 = trial
                    .iter()
                    .zip(&params)
                    .map(|(a, b)| (a - b).abs())
                    .sum();

                params = trial;
                r = trial_r;
                current_cost = trial_cost;
                mu = (mu / 3.0).max(1e-12);
                improved = true;

                if decrease <= 1e-15 * (1.0 + current_cost) || moved <= 1e-12 {
                    return params;
                }
                break;
            }
            mu *= 4.0;
        }

        if !improved {
            break;
        }
    }

    params
}

fn forward_jacobian(xs: &[f64], ys: &[f64], params: &[f64; 3], r: &[f64]) -> Vec<[f64; 3]> {
    let mut jacobian = vec![[0.0; 3]; xs.len()];
    for j in 0..3 {
        let h = 1e-7 * params[j].abs().max(1.0);
        let mut shifted = *params;
        shifted[j] += h;
        let shifted_r = residuals(xs, ys, &shifted);
        for (i, row) in jacobian.iter_mut().enumerate() {
            row[j] = (shifted_r[i] - r[i]) / h;
        }
    }
    jacobian
}

/// 部分主元高斯消元求解 3x3 线性方程组
fn solve3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot = (col..3).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-300 || !a[pivot][col].is_finite() {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..3 {
            let factor = a[row][col] / a[col][col];
            for k in col..3 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let tail: f64 = ((row + 1)..3).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(exponent: f64, delta_zero: f64, tc: f64) -> (Vec<f64>, Vec<f64>) {
        let temps: Vec<f64> = (1..=14).map(|i| i as f64 * 2.0).collect();
        let deltas = temps
            .iter()
            .map(|t| gap_model(*t, exponent, delta_zero, tc))
            .collect();
        (temps, deltas)
    }

    #[test]
    fn test_gap_model() {
        assert!((gap_model(0.0, 3.0, 2.0, 30.0) - 2.0).abs() < 1e-12);
        assert_eq!(gap_model(30.0, 3.0, 2.0, 30.0), 0.0);
        assert_eq!(gap_model(45.0, 3.0, 2.0, 30.0), 0.0);
        assert_eq!(gap_model(5.0, 3.0, 2.0, 0.0), 0.0);
        let half = gap_model(15.0, 1.0, 2.0, 30.0);
        assert!((half - 2.0 * 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_fit_recovers_parameters() {
        let (temps, deltas) = synthetic(3.0, 2.5, 30.0);
        let fit = fit_gap(&temps, &deltas, 0).expect("fit should converge");

        let max_err = temps
            .iter()
            .zip(&deltas)
            .map(|(t, d)| (fit.evaluate(*t) - d).abs())
            .fold(0.0, f64::max);
        assert!(max_err < 1e-2, "max residual {}", max_err);
        assert!((fit.delta_zero - 2.5).abs() < 0.1, "{:?}", fit);
        assert!((fit.critical_temperature - 30.0).abs() < 1.0, "{:?}", fit);
    }

    #[test]
    fn test_fit_respects_lower_bounds() {
        let (temps, deltas) = synthetic(2.0, 5.0, 40.0);
        let fit = fit_gap(&temps, &deltas, 0).unwrap();
        assert!(fit.exponent >= 0.0);
        assert!(fit.delta_zero >= 1.0);
        assert!(fit.critical_temperature >= 0.0);
    }

    #[test]
    fn test_fewer_than_three_points() {
        assert!(fit_gap(&[10.0, 20.0], &[2.0, 1.0], 0).is_none());
        assert!(fit_gap(&[10.0], &[2.0], 0).is_none());
        assert!(fit_gap(&[], &[], 0).is_none());
    }

    #[test]
    fn test_ignore_temps() {
        let temps = [5.0, 10.0, 15.0, 20.0];
        let deltas = [2.0, 1.9, 1.6, 1.0];
        assert!(fit_gap(&temps, &deltas, 2).is_none());
        assert!(fit_gap(&temps, &deltas, 10).is_none());
        assert!(fit_gap(&temps, &deltas, 1).is_some());
    }

    #[test]
    fn test_invalid_input() {
        assert!(fit_gap(&[1.0, 2.0, 3.0], &[1.0, 2.0], 0).is_none());
        assert!(fit_gap(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn test_degenerate_temperatures_still_fit() {
        let fit = fit_gap(&[10.0, 10.0, 10.0], &[1.0, 1.0, 1.0], 0).unwrap();
        assert!(fit.exponent.is_finite());
        assert!(fit.delta_zero >= 1.0);
        assert!(fit.critical_temperature >= 0.0);
    }

    #[test]
    fn test_curve_sampling() {
        let fit = GapFit {
            exponent: 3.0,
            delta_zero: 2.0,
            critical_temperature: 1.0,
        };
        let curve = fit.curve(0.5, 0.1);
        assert_eq!(curve.len(), 5);
        assert!((curve[0].0 - 0.5).abs() < 1e-12);
        assert!(curve.iter().all(|(t, _)| *t < 1.0));
        assert!(fit.curve(2.0, 0.1).is_empty());
    }

    #[test]
    fn test_solve3() {
        let a = [[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]];
        let x = solve3(a, [3.0, 5.0, 5.0]).unwrap();
        for (xi, expected) in x.iter().zip([1.0, 1.0, 1.0]) {
            assert!((xi - expected).abs() < 1e-12);
        }
        assert!(solve3([[0.0; 3]; 3], [1.0, 1.0, 1.0]).is_none());
    }
}
