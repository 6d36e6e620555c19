//! The objective model shared by forward and inverse dividers.

use crate::toleranced::Toleranced;

/// A divider objective: how resistor values map to the voltage being
/// constrained, and how close a candidate gets to the target.
///
/// Implementors supply the transfer function and the initial guess. The
/// compliance test and loss metric are shared.
pub trait Objective {
    /// The target interval the objective voltage must stay within.
    fn target(&self) -> Toleranced;

    /// Ideal `(r_hi, r_lo)` in ohms. Either value may be non-positive when
    /// the input and output are incompatible with the divider direction.
    fn compute_initial_guess(&self) -> (f64, f64);

    /// Objective voltage for the given resistances and drift factors.
    ///
    /// `hi_delta` and `lo_delta` scale each resistance, e.g. for TCR drift;
    /// pass `Toleranced::exact(1.0)` for no drift.
    fn compute_objective(
        &self,
        r_hi: Toleranced,
        r_lo: Toleranced,
        hi_delta: Toleranced,
        lo_delta: Toleranced,
    ) -> Toleranced;

    /// Objective voltage with no drift applied.
    fn compute_nominal_objective(&self, r_hi: Toleranced, r_lo: Toleranced) -> Toleranced {
        let unity = Toleranced::exact(1.0);
        self.compute_objective(r_hi, r_lo, unity, unity)
    }

    /// Whether an objective voltage lies entirely within the target.
    fn is_compliant(&self, objective: Toleranced) -> bool {
        self.target().in_range(objective)
    }

    /// Loss of a candidate pair at a precision class (percent).
    ///
    /// `None` means the pair is not compliant and is not a candidate.
    // NOTE: ignores the span of the output, so 2.5 ± 0.1 beats 2.499 ± 0.01
    // for a 2.5 target.
    fn compute_loss(&self, r_hi: f64, r_lo: f64, precision: f64) -> Option<f64> {
        let objective = self.compute_nominal_objective(
            Toleranced::percent(r_hi, precision),
            Toleranced::percent(r_lo, precision),
        );
        self.is_compliant(objective)
            .then(|| (self.target().typ() - objective.typ()).abs())
    }
}
