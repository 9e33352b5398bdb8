//! Region recommendation under a risk constraint.
//!
//! A region is *viable* when its bootstrapped probability of loss does not
//! exceed the risk threshold (2.5% by convention). Among viable regions the
//! one with the highest mean profit wins. When nothing is viable the caller
//! gets an explicit [`NoViableRegionError`] rather than a fallback choice.

use std::{collections::BTreeMap, fmt};

use geoprofit_data::RegionId;
use serde::Serialize;

use crate::bootstrap::BootstrapResult;

/// Every region exceeded the risk threshold.
#[derive(Debug, Clone, PartialEq, derive_more::Error)]
pub struct NoViableRegionError {
    pub risk_threshold: f64,
    /// The least risky region and its loss probability, if any region was compared.
    pub least_risky: Option<(RegionId, f64)>,
}

impl fmt::Display for NoViableRegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no viable region: every region's loss probability exceeds {:.1}%",
            self.risk_threshold * 100.0
        )?;
        if let Some((region, loss_probability)) = self.least_risky {
            write!(
                f,
                " (least risky: {region} at {:.1}%)",
                loss_probability * 100.0
            )?;
        }
        Ok(())
    }
}

/// One row of the region ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedRegion {
    pub region: RegionId,
    pub mean_profit: f64,
    pub loss_probability: f64,
    pub viable: bool,
}

/// Recommends the most profitable region whose loss probability is at most
/// `risk_threshold`.
///
/// Equal mean profits are resolved in favour of the lowest region id.
///
/// # Errors
///
/// Returns [`NoViableRegionError`] when no region satisfies the threshold,
/// including when `results` is empty.
pub fn recommend(
    results: &BTreeMap<RegionId, BootstrapResult>,
    risk_threshold: f64,
) -> Result<RegionId, NoViableRegionError> {
    results
        .iter()
        .filter(|(_, result)| result.loss_probability <= risk_threshold)
        // `max_by` keeps the last maximum; iterate in reverse so ties go to the lowest id
        .rev()
        .max_by(|(_, a), (_, b)| a.mean_profit.total_cmp(&b.mean_profit))
        .map(|(region, _)| *region)
        .ok_or_else(|| NoViableRegionError {
            risk_threshold,
            least_risky: results
                .iter()
                .min_by(|(_, a), (_, b)| a.loss_probability.total_cmp(&b.loss_probability))
                .map(|(region, result)| (*region, result.loss_probability)),
        })
}

/// Orders all regions: viable first, then by mean profit (descending), then
/// by loss probability (ascending).
#[must_use]
pub fn rank_regions(
    results: &BTreeMap<RegionId, BootstrapResult>,
    risk_threshold: f64,
) -> Vec<RankedRegion> {
    let mut ranking = results
        .iter()
        .map(|(region, result)| RankedRegion {
            region: *region,
            mean_profit: result.mean_profit,
            loss_probability: result.loss_probability,
            viable: result.loss_probability <= risk_threshold,
        })
        .collect::<Vec<_>>();
    ranking.sort_by(|a, b| {
        b.viable
            .cmp(&a.viable)
            .then(b.mean_profit.total_cmp(&a.mean_profit))
            .then(a.loss_probability.total_cmp(&b.loss_probability))
            .then(a.region.cmp(&b.region))
    });
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(loss_probability: f64, mean_profit: f64) -> BootstrapResult {
        BootstrapResult {
            mean_profit,
            ci_lower: mean_profit - 1.0,
            ci_upper: mean_profit + 1.0,
            loss_probability,
            samples: vec![],
        }
    }

    fn results(entries: &[(f64, f64)]) -> BTreeMap<RegionId, BootstrapResult> {
        entries
            .iter()
            .enumerate()
            .map(|(i, &(loss, profit))| (RegionId(i), result(loss, profit)))
            .collect()
    }

    #[test]
    fn test_risky_region_is_excluded() {
        // A: 1% / 50, B: 5% / 80, C: 2% / 40
        let results = results(&[(0.01, 50.0), (0.05, 80.0), (0.02, 40.0)]);
        assert_eq!(recommend(&results, 0.025), Ok(RegionId(0)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let results = results(&[(0.01, 50.0), (0.025, 60.0)]);
        assert_eq!(recommend(&results, 0.025), Ok(RegionId(1)));
    }

    #[test]
    fn test_tie_prefers_lowest_region() {
        let results = results(&[(0.05, 99.0), (0.01, 70.0), (0.02, 70.0)]);
        assert_eq!(recommend(&results, 0.025), Ok(RegionId(1)));
    }

    #[test]
    fn test_no_viable_region() {
        let results = results(&[(0.03, 50.0), (0.10, 80.0), (0.026, 40.0)]);
        let err = recommend(&results, 0.025).unwrap_err();
        assert_eq!(err.least_risky, Some((RegionId(2), 0.026)));
        assert_eq!(
            err.to_string(),
            "no viable region: every region's loss probability exceeds 2.5% \
             (least risky: region 2 at 2.6%)"
        );
    }

    #[test]
    fn test_empty_results() {
        let err = recommend(&BTreeMap::new(), 0.025).unwrap_err();
        assert_eq!(err.least_risky, None);
    }

    #[test]
    fn test_ranking_order() {
        let results = results(&[(0.01, 50.0), (0.05, 80.0), (0.02, 40.0), (0.0, 50.0)]);
        let ranking = rank_regions(&results, 0.025);
        let order = ranking.iter().map(|r| r.region.0).collect::<Vec<_>>();
        assert_eq!(order, vec![3, 0, 2, 1]);
        assert!(ranking[..3].iter().all(|r| r.viable));
        assert!(!ranking[3].viable);
    }
}
