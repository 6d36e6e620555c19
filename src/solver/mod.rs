//! Divider solver.
//!
//! This module turns [`DividerConstraints`] into a concrete pair of sourced
//! resistors.
//!
//! ## Search strategy
//!
//! ```text
//! initial guess ──> ideal screen ──> precision screen ──> per-tier search ──> resolve
//!   r <= 0?           ideal parts       loosest tier        ranked pairs        sources,
//!   Incompatible      fail? TooLarge    none? NoPrecision   by loss             TCR drift
//! ```
//!
//! 1. Compute the ideal resistances from the current budget.
//! 2. Check that zero-tolerance resistors at the guess meet the target at all.
//! 3. Screen each precision tier at the guess and drop the tiers looser than
//!    the first compliant one.
//! 4. For each remaining tier, loosest first, rank the stocked value pairs
//!    near the guess by loss and resolve them in order until one has enough
//!    sources and survives the temperature range.
//!
//! The search is sequential and deterministic: the same constraints and the
//! same catalog answers always yield the same solution or the same error.

mod resolve;
mod screen;
mod search;

pub use resolve::study_solution;
pub use screen::{PrecisionScreen, ScreenEntry};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{format_ohms, PartsCatalog, Resistor};
use crate::constraints::{DividerConstraints, Objective};
use crate::error::{DividerError, Result};
use crate::toleranced::Toleranced;

/// A solved divider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerSolution {
    /// Resistor between the high node and the middle node
    pub r_hi: Resistor,
    /// Resistor between the middle node and the low node
    pub r_lo: Resistor,
    /// Objective voltage at the minimum operating temperature
    pub v_out: Toleranced,
}

impl DividerSolution {
    /// Precision class of the selected parts, in percent.
    pub fn precision(&self) -> f64 {
        self.r_hi.precision.max(self.r_lo.precision)
    }

    /// Nominal `r_hi / r_lo`.
    pub fn ratio(&self) -> f64 {
        self.r_hi.resistance / self.r_lo.resistance
    }
}

impl fmt::Display for DividerSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "R_hi: {}", self.r_hi)?;
        writeln!(f, "R_lo: {}", self.r_lo)?;
        write!(
            f,
            "V_out: {:.4} V (min {:.4} V, max {:.4} V), ratio {} : {}",
            self.v_out.typ(),
            self.v_out.min(),
            self.v_out.max(),
            format_ohms(self.r_hi.resistance),
            format_ohms(self.r_lo.resistance)
        )
    }
}

/// Solve a divider problem against a parts catalog.
///
/// # Errors
///
/// - [`DividerError::IncompatibleInputOutput`] when the guess has a
///   non-positive resistance
/// - [`DividerError::InputRangeTooLarge`] when ideal resistors cannot meet
///   the target
/// - [`DividerError::NoPrecisionSatisfiesConstraints`] when no tier passes
///   screening
/// - [`DividerError::NoSolutionFound`] when every viable tier is exhausted
/// - [`DividerError::DataIntegrity`] when a selected part lacks TCR data
/// - any error returned by the catalog
pub fn solve<C: PartsCatalog + ?Sized>(
    constraints: &DividerConstraints,
    catalog: &C,
) -> Result<DividerSolution> {
    let (r_hi, r_lo) = constraints.compute_initial_guess();
    log::debug!("Initial guess for {constraints}: r_hi={r_hi:.4e} r_lo={r_lo:.4e}");

    if r_hi <= 0.0 || r_lo <= 0.0 {
        return Err(DividerError::IncompatibleInputOutput {
            v_in: constraints.v_in(),
            v_out: constraints.v_out(),
            r_hi,
            r_lo,
        });
    }

    let ideal = constraints
        .compute_nominal_objective(Toleranced::exact(r_hi), Toleranced::exact(r_lo));
    if !constraints.is_compliant(ideal) {
        return Err(DividerError::InputRangeTooLarge {
            r_hi,
            r_lo,
            screen: ideal,
        });
    }

    let screen = PrecisionScreen::run(constraints, constraints.precision_series(), r_hi, r_lo);
    log::debug!("Precision screen:\n{screen}");
    let Some(first) = screen.first_compliant() else {
        return Err(DividerError::NoPrecisionSatisfiesConstraints { r_hi, r_lo, screen });
    };

    // Tighter tiers only narrow the interval, so everything after the first
    // compliant tier is viable.
    let tiers = &constraints.precision_series()[first..];
    for &precision in tiers {
        if let Some(solution) = search::solve_over_tier(constraints, catalog, precision)? {
            log::info!(
                "Solved at {}%: {} / {} -> {}",
                precision,
                solution.r_hi.mpn,
                solution.r_lo.mpn,
                solution.v_out
            );
            return Ok(solution);
        }
        log::debug!("No sourceable pair at {}%", precision);
    }

    Err(DividerError::NoSolutionFound {
        v_in: constraints.v_in(),
        v_out: constraints.v_out(),
        tiers: tiers.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::catalog::{InMemoryCatalog, Mounting, ResistorQuery, SearchFilter, StandardCatalog, Tcr};

    fn part(mpn: &str, resistance: f64, precision: f64, tcr: Option<Tcr>) -> Resistor {
        Resistor {
            mpn: mpn.to_string(),
            manufacturer: "Test".to_string(),
            resistance,
            precision,
            tcr,
            case: "0603".to_string(),
            mounting: Mounting::Smd,
            stock: 1000,
        }
    }

    fn sources(catalog: &mut InMemoryCatalog, resistance: f64, precision: f64, count: usize) {
        for i in 0..count {
            catalog.push(part(&format!("{resistance}-{i}"), resistance, precision, Some(Tcr::symmetric(100.0))));
        }
    }

    fn forward() -> DividerConstraints {
        DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .temp_range(Toleranced::min_max(-20.0, 50.0).unwrap())
        .build()
        .unwrap()
    }

    /// Catalog that fails every query.
    struct BrokenCatalog;

    impl PartsCatalog for BrokenCatalog {
        fn search(&self, _filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
            Err(DividerError::catalog("connection refused"))
        }
    }

    /// Catalog that ignores the TCR requirement.
    struct NoTcrCatalog(InMemoryCatalog);

    impl PartsCatalog for NoTcrCatalog {
        fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
            let mut relaxed = filter.clone();
            relaxed.require_tcr = false;
            self.0.search(&relaxed)
        }
    }

    /// Catalog wrapper that counts queries.
    struct CountingCatalog<C> {
        inner: C,
        queries: Cell<usize>,
    }

    impl<C: PartsCatalog> PartsCatalog for CountingCatalog<C> {
        fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
            self.queries.set(self.queries.get() + 1);
            self.inner.search(filter)
        }
    }

    #[test]
    fn test_solves_with_minimal_catalog() {
        let mut catalog = InMemoryCatalog::default();
        sources(&mut catalog, 150e3, 1.0, 3);
        sources(&mut catalog, 49.9e3, 1.0, 3);

        let solution = solve(&forward(), &catalog).unwrap();
        assert_eq!(solution.r_hi.mpn, "150000-0");
        assert_eq!(solution.r_lo.mpn, "49900-0");
        assert!(forward().v_out().in_range(solution.v_out));
        assert_eq!(solution.precision(), 1.0);
    }

    #[test]
    fn test_insufficient_sources_falls_through() {
        let mut catalog = InMemoryCatalog::default();
        // Best pair has only two sources on the low side
        sources(&mut catalog, 165e3, 1.0, 3);
        sources(&mut catalog, 54.9e3, 1.0, 2);
        sources(&mut catalog, 150e3, 1.0, 3);
        sources(&mut catalog, 49.9e3, 1.0, 3);

        let solution = solve(&forward(), &catalog).unwrap();
        assert_eq!(solution.r_hi.resistance, 150e3);
        assert_eq!(solution.r_lo.resistance, 49.9e3);
    }

    #[test]
    fn test_lower_min_sources_accepts_best_pair() {
        let mut catalog = InMemoryCatalog::default();
        sources(&mut catalog, 165e3, 1.0, 3);
        sources(&mut catalog, 54.9e3, 1.0, 2);
        sources(&mut catalog, 150e3, 1.0, 3);
        sources(&mut catalog, 49.9e3, 1.0, 3);

        let c = DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .min_sources(2)
        .build()
        .unwrap();
        let solution = solve(&c, &catalog).unwrap();
        assert_eq!(solution.r_hi.resistance, 165e3);
    }

    #[test]
    fn test_falls_back_to_tighter_tier() {
        let mut catalog = InMemoryCatalog::default();
        // Nothing at 1%, a usable pair at 0.5%
        sources(&mut catalog, 150e3, 0.5, 3);
        sources(&mut catalog, 49.9e3, 0.5, 3);

        let solution = solve(&forward(), &catalog).unwrap();
        assert_eq!(solution.precision(), 0.5);
    }

    #[test]
    fn test_no_solution_found() {
        let catalog = InMemoryCatalog::default();
        let err = solve(&forward(), &catalog).unwrap_err();
        match err {
            DividerError::NoSolutionFound { tiers, .. } => {
                assert_eq!(tiers, vec![1.0, 0.5, 0.25, 0.1]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tcr_drift_rejects_pair() {
        let mut catalog = InMemoryCatalog::default();
        // Huge TCR pushes the output out of range at -20 degC
        for (r, n) in [(150e3, 3), (49.9e3, 3)] {
            for i in 0..n {
                catalog.push(part(&format!("{r}-{i}"), r, 1.0, Some(Tcr { pos: 5000.0, neg: 5000.0 })));
            }
        }
        let err = solve(&forward(), &catalog).unwrap_err();
        assert!(matches!(err, DividerError::NoSolutionFound { .. }));
    }

    #[test]
    fn test_reports_cold_extremum_when_hot_is_wider() {
        let mut catalog = InMemoryCatalog::default();
        for r in [150e3, 49.9e3] {
            for i in 0..3 {
                catalog.push(part(&format!("{r}-{i}"), r, 1.0, Some(Tcr::symmetric(50.0))));
            }
        }
        // 150 degC is 125 degrees from reference, -20 degC only 45
        let c = DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .temp_range(Toleranced::min_max(-20.0, 150.0).unwrap())
        .build()
        .unwrap();

        let solution = solve(&c, &catalog).unwrap();
        let [cold, hot] = study_solution(&c, &solution.r_hi, &solution.r_lo).unwrap();
        assert!(hot.range() > cold.range());
        assert_eq!(solution.v_out, cold);
        assert_ne!(solution.v_out, hot);
    }

    #[test]
    fn test_missing_tcr_is_fatal() {
        let mut inner = InMemoryCatalog::default();
        for i in 0..3 {
            inner.push(part(&format!("hi-{i}"), 150e3, 1.0, None));
            inner.push(part(&format!("lo-{i}"), 49.9e3, 1.0, None));
        }
        let err = solve(&forward(), &NoTcrCatalog(inner)).unwrap_err();
        assert!(matches!(err, DividerError::DataIntegrity { .. }));
    }

    #[test]
    fn test_catalog_errors_propagate() {
        let err = solve(&forward(), &BrokenCatalog).unwrap_err();
        assert!(matches!(err, DividerError::Catalog { .. }));
        assert!(!err.is_solver_failure());
    }

    #[test]
    fn test_early_failures_skip_catalog() {
        let catalog = CountingCatalog {
            inner: InMemoryCatalog::default(),
            queries: Cell::new(0),
        };
        let c = DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(12.5, 1.0),
            50e-6,
        )
        .build()
        .unwrap();
        let err = solve(&c, &catalog).unwrap_err();
        assert!(matches!(err, DividerError::IncompatibleInputOutput { .. }));
        assert!(err.is_solver_failure());
        assert_eq!(catalog.queries.get(), 0);
    }

    #[test]
    fn test_first_match_short_circuits() {
        let catalog = CountingCatalog {
            inner: StandardCatalog::for_cases(["0603"]),
            queries: Cell::new(0),
        };
        let c = forward();
        solve(&c, &catalog).unwrap();
        // Two coarse value lookups plus one resolve (two queries) at the first tier
        assert_eq!(catalog.queries.get(), 4);
    }

    #[test]
    fn test_deterministic() {
        let catalog = StandardCatalog::for_cases(["0603"]);
        let c = forward();
        let a = solve(&c, &catalog).unwrap();
        let b = solve(&c, &catalog).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wider_search_range_still_solves() {
        let catalog = StandardCatalog::for_cases(["0603"]);
        for range in [10.0, 15.0, 25.0] {
            let c = DividerConstraints::forward(
                Toleranced::percent(10.0, 1.0),
                Toleranced::percent(2.5, 5.0),
                50e-6,
            )
            .search_range(range)
            .build()
            .unwrap();
            let solution = solve(&c, &catalog).unwrap();
            assert!(c.v_out().in_range(solution.v_out));
        }
    }

    #[test]
    fn test_base_query_passed_through() {
        let catalog = StandardCatalog::for_cases(["0603"]);
        let c = DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .base_query(ResistorQuery::default().with_cases(["1206"]))
        .build()
        .unwrap();
        assert!(matches!(solve(&c, &catalog), Err(DividerError::NoSolutionFound { .. })));
    }
}
