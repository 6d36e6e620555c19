//! Resolution of a candidate pair into concrete, sourced parts.

use crate::catalog::{PartsCatalog, ResistanceTarget, Resistor, SearchFilter};
use crate::constraints::{DividerConstraints, Objective};
use crate::error::{DividerError, Result};
use crate::toleranced::Toleranced;

use super::search::Ratio;
use super::DividerSolution;

/// Try to turn a ranked pair into a solution.
///
/// `Ok(None)` is a soft rejection: too few sources, or the pair drifts out of
/// the target over temperature.
pub(crate) fn resolve_candidate<C: PartsCatalog + ?Sized>(
    constraints: &DividerConstraints,
    catalog: &C,
    ratio: &Ratio,
    precision: f64,
) -> Result<Option<DividerSolution>> {
    let r_his = query_parts(constraints, catalog, ratio.high, precision)?;
    let r_los = query_parts(constraints, catalog, ratio.low, precision)?;

    let min_sources = constraints.min_sources();
    if r_his.len() < min_sources || r_los.len() < min_sources {
        log::trace!(
            "Rejected {} / {}: {} and {} sources, need {}",
            ratio.high,
            ratio.low,
            r_his.len(),
            r_los.len(),
            min_sources
        );
        return Ok(None);
    }

    let (Some(r_hi), Some(r_lo)) = (r_his.into_iter().next(), r_los.into_iter().next()) else {
        return Ok(None);
    };

    let [v_cold, v_hot] = study_solution(constraints, &r_hi, &r_lo)?;
    if !(constraints.is_compliant(v_cold) && constraints.is_compliant(v_hot)) {
        log::trace!(
            "Rejected {} / {}: out of range over temperature ({} / {})",
            r_hi.mpn,
            r_lo.mpn,
            v_cold,
            v_hot
        );
        return Ok(None);
    }

    // Reported output is the minimum-temperature extremum, not the worse one.
    Ok(Some(DividerSolution {
        r_hi,
        r_lo,
        v_out: v_cold,
    }))
}

/// Full records for one nominal resistance, in catalog preference order.
fn query_parts<C: PartsCatalog + ?Sized>(
    constraints: &DividerConstraints,
    catalog: &C,
    resistance: f64,
    precision: f64,
) -> Result<Vec<Resistor>> {
    let filter = SearchFilter::new(
        constraints.base_query(),
        ResistanceTarget::Exact(resistance),
        precision,
    )
    .with_tcr()
    .with_limit(constraints.query_limit());
    catalog.search(&filter)
}

/// Objective voltage of a part pair at the minimum and maximum of the
/// operating temperature range.
///
/// Each resistance is widened by its precision class and scaled by its TCR
/// drift at that temperature. A part without TCR data is a data integrity
/// error.
pub fn study_solution(
    constraints: &DividerConstraints,
    r_hi: &Resistor,
    r_lo: &Resistor,
) -> Result<[Toleranced; 2]> {
    let temps = constraints.temp_range();
    let hi = r_hi.resistance_toleranced();
    let lo = r_lo.resistance_toleranced();

    let at = |temperature: f64| -> Result<Toleranced> {
        let hi_delta = tcr_deviation(r_hi, temperature)?;
        let lo_delta = tcr_deviation(r_lo, temperature)?;
        Ok(constraints.compute_objective(hi, lo, hi_delta, lo_delta))
    };

    Ok([at(temps.min())?, at(temps.max())?])
}

fn tcr_deviation(part: &Resistor, temperature: f64) -> Result<Toleranced> {
    part.tcr_deviation(temperature).ok_or_else(|| {
        DividerError::data_integrity(
            &part.mpn,
            format!("no TCR data to evaluate drift at {temperature} degC"),
        )
    })
}
