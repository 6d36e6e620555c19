//! Resistor part records as returned by a parts catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DividerError, Result};
use crate::settings::TCR_REFERENCE_TEMPERATURE;
use crate::toleranced::Toleranced;

/// Mounting style of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mounting {
    Smd,
    ThroughHole,
}

impl fmt::Display for Mounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mounting::Smd => write!(f, "smd"),
            Mounting::ThroughHole => write!(f, "through-hole"),
        }
    }
}

impl FromStr for Mounting {
    type Err = DividerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "smd" => Ok(Mounting::Smd),
            "through-hole" | "th" | "tht" => Ok(Mounting::ThroughHole),
            other => Err(DividerError::value_parse(other, "expected 'smd' or 'through-hole'")),
        }
    }
}

/// Temperature coefficient of resistance, in ppm/degC.
///
/// `pos` bounds the upward drift and `neg` the downward drift. Both are
/// stored as magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tcr {
    pub pos: f64,
    pub neg: f64,
}

impl Tcr {
    /// Create a TCR with equal upward and downward coefficients.
    pub fn symmetric(ppm: f64) -> Self {
        Self {
            pos: ppm.abs(),
            neg: ppm.abs(),
        }
    }
}

/// A single sourceable resistor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resistor {
    /// Manufacturer part number
    pub mpn: String,
    pub manufacturer: String,
    /// Nominal resistance in ohms
    pub resistance: f64,
    /// Precision class in percent
    pub precision: f64,
    #[serde(default)]
    pub tcr: Option<Tcr>,
    /// Package case code, e.g. "0603"
    pub case: String,
    pub mounting: Mounting,
    #[serde(default)]
    pub stock: u32,
}

impl Resistor {
    /// Resistance as an interval widened by the part's precision class.
    pub fn resistance_toleranced(&self) -> Toleranced {
        Toleranced::percent(self.resistance, self.precision)
    }

    /// Multiplicative drift window at `temperature` (degC), nominally 1.0.
    ///
    /// Returns `None` when the part carries no TCR data.
    pub fn tcr_deviation(&self, temperature: f64) -> Option<Toleranced> {
        let tcr = self.tcr?;
        let diff = temperature - TCR_REFERENCE_TEMPERATURE;
        Some(Toleranced::asymmetric(
            1.0,
            diff * tcr.pos * 1e-6,
            diff * tcr.neg * 1e-6,
        ))
    }
}

impl fmt::Display for Resistor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ±{}% {}",
            self.manufacturer,
            self.mpn,
            format_ohms(self.resistance),
            self.precision,
            self.case
        )?;
        if let Some(tcr) = self.tcr {
            write!(f, " +{}/-{}ppm", tcr.pos, tcr.neg)?;
        }
        Ok(())
    }
}

/// Format a resistance with an engineering suffix, e.g. `54.9k`.
pub fn format_ohms(ohms: f64) -> String {
    let (scaled, suffix) = if ohms >= 1e9 {
        (ohms / 1e9, "G")
    } else if ohms >= 1e6 {
        (ohms / 1e6, "M")
    } else if ohms >= 1e3 {
        (ohms / 1e3, "k")
    } else {
        (ohms, "")
    };
    let text = format!("{scaled:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn part(tcr: Option<Tcr>) -> Resistor {
        Resistor {
            mpn: "RC0603FR-0754K9L".to_string(),
            manufacturer: "Yageo".to_string(),
            resistance: 54_900.0,
            precision: 1.0,
            tcr,
            case: "0603".to_string(),
            mounting: Mounting::Smd,
            stock: 1000,
        }
    }

    #[test]
    fn test_tcr_deviation_cold() {
        let r = part(Some(Tcr::symmetric(100.0)));
        let d = r.tcr_deviation(-20.0).unwrap();
        assert_relative_eq!(d.typ(), 1.0);
        assert_relative_eq!(d.min(), 1.0 - 45.0 * 100e-6, max_relative = 1e-12);
        assert_relative_eq!(d.max(), 1.0 + 45.0 * 100e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_tcr_deviation_asymmetric() {
        let r = part(Some(Tcr { pos: 50.0, neg: 200.0 }));
        let d = r.tcr_deviation(75.0).unwrap();
        assert_relative_eq!(d.max(), 1.0 + 50.0 * 50e-6, max_relative = 1e-12);
        assert_relative_eq!(d.min(), 1.0 - 50.0 * 200e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_tcr_deviation_missing() {
        assert!(part(None).tcr_deviation(50.0).is_none());
    }

    #[test]
    fn test_resistance_toleranced() {
        let t = part(None).resistance_toleranced();
        assert_relative_eq!(t.min(), 54_351.0);
        assert_relative_eq!(t.max(), 55_449.0);
    }

    #[test]
    fn test_format_ohms() {
        assert_eq!(format_ohms(54_900.0), "54.9k");
        assert_eq!(format_ohms(165_000.0), "165k");
        assert_eq!(format_ohms(4.7), "4.7");
        assert_eq!(format_ohms(1_000_000.0), "1M");
    }

    #[test]
    fn test_mounting_from_str() {
        assert_eq!("SMD".parse::<Mounting>().unwrap(), Mounting::Smd);
        assert_eq!("through-hole".parse::<Mounting>().unwrap(), Mounting::ThroughHole);
        assert!("bga".parse::<Mounting>().is_err());
    }
}
