//! Candidate search within a single precision tier.

use crate::catalog::{PartsCatalog, ResistanceTarget, SearchFilter};
use crate::constraints::{DividerConstraints, Objective};
use crate::error::Result;
use crate::toleranced::Toleranced;

use super::resolve::resolve_candidate;
use super::DividerSolution;

/// A ranked candidate pair of nominal resistances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ratio {
    pub high: f64,
    pub low: f64,
    pub loss: f64,
}

/// Search one tier for a sourceable pair.
///
/// Returns `Ok(None)` when no candidate in this tier resolves.
pub(crate) fn solve_over_tier<C: PartsCatalog + ?Sized>(
    constraints: &DividerConstraints,
    catalog: &C,
    precision: f64,
) -> Result<Option<DividerSolution>> {
    let (goal_hi, goal_lo) = constraints.compute_initial_guess();
    let hi_values = query_resistance_values(constraints, catalog, goal_hi, precision)?;
    let lo_values = query_resistance_values(constraints, catalog, goal_lo, precision)?;

    let ratios = rank_pairs(constraints, precision, &hi_values, &lo_values);
    log::debug!(
        "Tier {}%: {} high x {} low values, {} candidate pairs",
        precision,
        hi_values.len(),
        lo_values.len(),
        ratios.len()
    );

    for ratio in &ratios {
        if let Some(solution) = resolve_candidate(constraints, catalog, ratio, precision)? {
            return Ok(Some(solution));
        }
    }
    Ok(None)
}

/// Distinct stocked resistances within the search range of `goal`.
fn query_resistance_values<C: PartsCatalog + ?Sized>(
    constraints: &DividerConstraints,
    catalog: &C,
    goal: f64,
    precision: f64,
) -> Result<Vec<f64>> {
    let window = Toleranced::percent(goal, constraints.search_range());
    let filter = SearchFilter::new(
        constraints.base_query(),
        ResistanceTarget::Within(window),
        precision,
    )
    .with_tcr()
    .distinct()
    .with_limit(constraints.query_limit());
    Ok(catalog
        .search(&filter)?
        .into_iter()
        .map(|part| part.resistance)
        .collect())
}

/// Every compliant (high, low) pair, lowest loss first.
///
/// The sort is stable, so equal losses keep enumeration order.
pub(crate) fn rank_pairs<O: Objective + ?Sized>(
    objective: &O,
    precision: f64,
    hi_values: &[f64],
    lo_values: &[f64],
) -> Vec<Ratio> {
    let mut ratios: Vec<Ratio> = hi_values
        .iter()
        .flat_map(|&high| {
            lo_values.iter().filter_map(move |&low| {
                objective
                    .compute_loss(high, low, precision)
                    .map(|loss| Ratio { high, low, loss })
            })
        })
        .collect();
    ratios.sort_by(|a, b| a.loss.total_cmp(&b.loss));
    ratios
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> DividerConstraints {
        DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_rank_pairs_orders_by_loss() {
        let c = constraints();
        let ratios = rank_pairs(&c, 1.0, &[143e3, 150e3, 165e3], &[47.5e3, 49.9e3, 54.9e3]);
        assert!(!ratios.is_empty());
        assert!(ratios.windows(2).all(|w| w[0].loss <= w[1].loss));
        assert_eq!((ratios[0].high, ratios[0].low), (165e3, 54.9e3));
        assert_eq!((ratios[1].high, ratios[1].low), (150e3, 49.9e3));
    }

    #[test]
    fn test_rank_pairs_drops_non_compliant() {
        let c = constraints();
        // 100k / 100k gives 5V, far outside 2.5V ± 5%
        let ratios = rank_pairs(&c, 1.0, &[100e3], &[100e3]);
        assert!(ratios.is_empty());
    }

    #[test]
    fn test_rank_pairs_stable_for_ties() {
        let c = constraints();
        // Scaled copies of the same ratio have identical loss
        let ratios = rank_pairs(&c, 1.0, &[150e3, 300e3], &[50e3, 100e3]);
        let pairs: Vec<_> = ratios.iter().map(|r| (r.high, r.low)).collect();
        assert_eq!(pairs, vec![(150e3, 50e3), (300e3, 100e3)]);
    }
}
