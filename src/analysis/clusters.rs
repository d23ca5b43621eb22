//! # 温度聚类
//!
//! 将 (温度, 能隙) 序列切分为温度严格大于 `min + threshold` 的连续片段。
//!
//! ## 依赖关系
//! - 被 `commands/plot/aniso.rs`, `analysis/export.rs` 使用

/// 一个连续片段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    pub temperatures: Vec<f64>,
    pub deltas: Vec<f64>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }
}

/// 查找温度高于 `min(temps) + threshold` 的连续片段
///
/// 不满足条件的点结束当前片段；末尾片段仅在非空时保留。
pub fn find_clusters(temps: &[f64], deltas: &[f64], threshold: f64) -> Vec<Cluster> {
    let min_temp = match temps.iter().copied().reduce(f64::min) {
        Some(t) => t,
        None => return Vec::new(),
    };
    let cutoff = min_temp + threshold;

    let mut clusters = Vec::new();
    let mut cluster = Cluster::default();

    for (&t, &d) in temps.iter().zip(deltas) {
        if t > cutoff {
            cluster.temperatures.push(t);
            cluster.deltas.push(d);
        } else if !cluster.is_empty() {
            clusters.push(std::mem::take(&mut cluster));
        }
    }

    if !cluster.is_empty() {
        clusters.push(cluster);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cluster() {
        let temps = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0];
        let deltas = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let clusters = find_clusters(&temps, &deltas, 1.0);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].temperatures, vec![3.0, 10.0, 11.0, 12.0]);
        assert_eq!(clusters[0].deltas, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_strict_comparison() {
        // t == min + threshold 不属于片段
        let temps = [1.0, 2.0, 2.0, 5.0];
        let deltas = [0.0; 4];
        let clusters = find_clusters(&temps, &deltas, 1.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].temperatures, vec![5.0]);
    }

    #[test]
    fn test_multiple_clusters() {
        let temps = [5.0, 1.0, 6.0, 7.0, 1.5, 8.0];
        let deltas = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let clusters = find_clusters(&temps, &deltas, 2.0);

        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].temperatures, vec![5.0]);
        assert_eq!(clusters[1].temperatures, vec![6.0, 7.0]);
        assert_eq!(clusters[2].deltas, vec![6.0]);
    }

    #[test]
    fn test_empty_and_no_match() {
        assert!(find_clusters(&[], &[], 1.0).is_empty());
        assert!(find_clusters(&[3.0, 3.0], &[1.0, 1.0], 0.0).is_empty());
    }
}
