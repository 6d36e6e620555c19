//! Precision-tier screening at the initial guess.

use std::fmt;

use crate::constraints::Objective;
use crate::toleranced::Toleranced;

/// Outcome of screening one precision tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenEntry {
    /// Precision class in percent
    pub precision: f64,
    pub compliant: bool,
    /// Objective voltage with both guessed resistors at this precision
    pub objective: Toleranced,
}

/// Per-tier screening table, in the order of the precision series.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionScreen {
    entries: Vec<ScreenEntry>,
}

impl PrecisionScreen {
    /// Screen every tier with the guessed resistances toleranced by it.
    pub fn run<O: Objective + ?Sized>(objective: &O, series: &[f64], r_hi: f64, r_lo: f64) -> Self {
        let entries = series
            .iter()
            .map(|&precision| {
                let v = objective.compute_nominal_objective(
                    Toleranced::percent(r_hi, precision),
                    Toleranced::percent(r_lo, precision),
                );
                ScreenEntry {
                    precision,
                    compliant: objective.is_compliant(v),
                    objective: v,
                }
            })
            .collect();
        Self { entries }
    }

    /// Index of the loosest compliant tier.
    pub fn first_compliant(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.compliant)
    }

    pub fn entries(&self) -> &[ScreenEntry] {
        &self.entries
    }
}

impl fmt::Display for PrecisionScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "  {:>6}%  {}  {}",
                entry.precision,
                if entry.compliant { "ok  " } else { "FAIL" },
                entry.objective
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::DividerConstraints;
    use crate::settings::STD_PRECISIONS;

    #[test]
    fn test_forward_screen_finds_one_percent() {
        let c = DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .build()
        .unwrap();
        let screen = PrecisionScreen::run(&c, &STD_PRECISIONS, 150e3, 50e3);
        assert_eq!(screen.entries().len(), STD_PRECISIONS.len());
        let first = screen.first_compliant().unwrap();
        assert_eq!(screen.entries()[first].precision, 1.0);
        // Tighter tiers stay compliant
        assert!(screen.entries()[first..].iter().all(|e| e.compliant));
    }

    #[test]
    fn test_screen_none_compliant() {
        let c = DividerConstraints::forward(
            Toleranced::percent(10.0, 1.0),
            Toleranced::percent(2.5, 5.0),
            50e-6,
        )
        .build()
        .unwrap();
        let screen = PrecisionScreen::run(&c, &[20.0, 10.0, 5.0], 150e3, 50e3);
        assert!(screen.first_compliant().is_none());
        let table = screen.to_string();
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("FAIL"));
    }
}
