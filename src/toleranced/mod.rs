//! Interval arithmetic for toleranced quantities.
//!
//! A [`Toleranced`] value is a closed interval `[min, max]` with a typical
//! point inside it. Voltages, resistances and temperature drift factors are
//! all carried this way so that manufacturing and measurement variation flows
//! through every divider computation.
//!
//! Arithmetic follows the usual interval rules:
//!
//! ```text
//! a + b = [a.min + b.min, a.max + b.max]
//! a - b = [a.min - b.max, a.max - b.min]
//! a * b = [min(corners), max(corners)]
//! a / b = a * [1 / b.max, 1 / b.min]      (b must not contain zero)
//! ```
//!
//! For the positive physical quantities the solver deals with, the product
//! reduces to `[a.min * b.min, a.max * b.max]` and the quotient to
//! `[a.min / b.max, a.max / b.min]`.

mod parse;

pub use parse::parse_value;

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{DividerError, Result};

/// An interval with a distinguished typical value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawToleranced")]
pub struct Toleranced {
    min: f64,
    typ: f64,
    max: f64,
}

impl Toleranced {
    /// Build from bounds already known to be ordered.
    fn from_bounds(min: f64, typ: f64, max: f64) -> Self {
        debug_assert!(min <= typ && typ <= max, "unordered bounds {min} {typ} {max}");
        Self { min, typ, max }
    }

    /// A value with zero tolerance.
    pub fn exact(value: f64) -> Self {
        Self::from_bounds(value, value, value)
    }

    /// `typ ± pct%`, symmetric around the typical value.
    ///
    /// `pct` is a percentage, so `Toleranced::percent(10.0, 1.0)` is
    /// `[9.9, 10.1]`.
    pub fn percent(typ: f64, pct: f64) -> Self {
        let delta = (typ * pct / 100.0).abs();
        Self::from_bounds(typ - delta, typ, typ + delta)
    }

    /// `typ` with independent upper and lower percentages.
    pub fn percent_asymmetric(typ: f64, plus_pct: f64, minus_pct: f64) -> Result<Self> {
        for pct in [plus_pct, minus_pct] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(DividerError::invalid_tolerance(format!(
                    "percentage {pct} must be within 0..=100"
                )));
            }
        }
        let abs_typ = typ.abs();
        Ok(Self::from_bounds(
            typ - abs_typ * minus_pct / 100.0,
            typ,
            typ + abs_typ * plus_pct / 100.0,
        ))
    }

    /// `typ ± delta` in absolute units.
    pub fn symmetric(typ: f64, delta: f64) -> Self {
        let delta = delta.abs();
        Self::from_bounds(typ - delta, typ, typ + delta)
    }

    /// `typ` with independent absolute increments above and below.
    pub fn asymmetric(typ: f64, plus: f64, minus: f64) -> Self {
        Self::from_bounds(typ - minus.abs(), typ, typ + plus.abs())
    }

    /// Explicit `min <= typ <= max`.
    pub fn min_typ_max(min: f64, typ: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && typ.is_finite() && max.is_finite()) {
            return Err(DividerError::invalid_tolerance(format!(
                "bounds must be finite: min={min} typ={typ} max={max}"
            )));
        }
        if min > typ || typ > max {
            return Err(DividerError::invalid_tolerance(format!(
                "expected min <= typ <= max, got min={min} typ={typ} max={max}"
            )));
        }
        Ok(Self::from_bounds(min, typ, max))
    }

    /// Explicit `[min, max]` with the typical value at the midpoint.
    pub fn min_max(min: f64, max: f64) -> Result<Self> {
        if max < min {
            return Err(DividerError::invalid_tolerance(format!(
                "expected min <= max, got min={min} max={max}"
            )));
        }
        Self::min_typ_max(min, min + 0.5 * (max - min), max)
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Typical (nominal) value.
    pub fn typ(&self) -> f64 {
        self.typ
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Midpoint of the interval, which need not equal `typ`.
    pub fn center(&self) -> f64 {
        self.min + 0.5 * (self.max - self.min)
    }

    /// Width of the interval.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Absolute distance from `typ` up to `max`.
    pub fn tol_plus(&self) -> f64 {
        self.max - self.typ
    }

    /// Absolute distance from `typ` down to `min`.
    pub fn tol_minus(&self) -> f64 {
        self.typ - self.min
    }

    /// Upper tolerance as a percentage of `typ`, or `None` when `typ` is zero.
    pub fn tol_plus_percent(&self) -> Option<f64> {
        (self.typ != 0.0).then(|| 100.0 * self.tol_plus() / self.typ.abs())
    }

    /// Lower tolerance as a percentage of `typ`, or `None` when `typ` is zero.
    pub fn tol_minus_percent(&self) -> Option<f64> {
        (self.typ != 0.0).then(|| 100.0 * self.tol_minus() / self.typ.abs())
    }

    /// Containment test.
    ///
    /// A scalar is in range when `min <= value <= max`. An interval is in
    /// range when it is a subset of `self`.
    pub fn in_range(&self, value: impl Into<Toleranced>) -> bool {
        let value = value.into();
        value.min >= self.min && value.max <= self.max
    }

    /// Whether the interval contains zero.
    pub fn contains_zero(&self) -> bool {
        self.min <= 0.0 && self.max >= 0.0
    }

    /// Apply a monotonic function to each bound.
    ///
    /// The result is re-ordered so that decreasing functions still yield a
    /// valid interval.
    pub fn apply(&self, f: impl Fn(f64) -> f64) -> Self {
        let typ = f(self.typ);
        let a = f(self.min);
        let b = f(self.max);
        Self::from_bounds(a.min(b).min(typ), typ, a.max(b).max(typ))
    }

    /// `1 / self`, or `None` if the interval contains zero.
    pub fn recip(&self) -> Option<Self> {
        if self.contains_zero() {
            return None;
        }
        Some(Self::from_bounds(1.0 / self.max, 1.0 / self.typ, 1.0 / self.min))
    }

    /// Division that reports a zero-spanning divisor instead of producing
    /// infinities.
    pub fn checked_div(self, rhs: Toleranced) -> Option<Self> {
        rhs.recip().map(|inv| self * inv)
    }
}

/// Unchecked wire form; bounds are validated on conversion.
#[derive(Deserialize)]
struct RawToleranced {
    min: f64,
    typ: f64,
    max: f64,
}

impl TryFrom<RawToleranced> for Toleranced {
    type Error = DividerError;

    fn try_from(raw: RawToleranced) -> Result<Self> {
        Toleranced::min_typ_max(raw.min, raw.typ, raw.max)
    }
}

impl From<f64> for Toleranced {
    fn from(value: f64) -> Self {
        Self::exact(value)
    }
}

impl fmt::Display for Toleranced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Toleranced({} <= {} <= {})", self.min, self.typ, self.max)
    }
}

impl Add for Toleranced {
    type Output = Toleranced;

    fn add(self, rhs: Toleranced) -> Toleranced {
        Toleranced::from_bounds(self.min + rhs.min, self.typ + rhs.typ, self.max + rhs.max)
    }
}

impl Add<f64> for Toleranced {
    type Output = Toleranced;

    fn add(self, rhs: f64) -> Toleranced {
        self + Toleranced::exact(rhs)
    }
}

impl Add<Toleranced> for f64 {
    type Output = Toleranced;

    fn add(self, rhs: Toleranced) -> Toleranced {
        Toleranced::exact(self) + rhs
    }
}

impl Sub for Toleranced {
    type Output = Toleranced;

    fn sub(self, rhs: Toleranced) -> Toleranced {
        Toleranced::from_bounds(self.min - rhs.max, self.typ - rhs.typ, self.max - rhs.min)
    }
}

impl Sub<f64> for Toleranced {
    type Output = Toleranced;

    fn sub(self, rhs: f64) -> Toleranced {
        self - Toleranced::exact(rhs)
    }
}

impl Mul for Toleranced {
    type Output = Toleranced;

    fn mul(self, rhs: Toleranced) -> Toleranced {
        let corners = [
            self.min * rhs.min,
            self.min * rhs.max,
            self.max * rhs.min,
            self.max * rhs.max,
        ];
        let lo = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Toleranced::from_bounds(lo, self.typ * rhs.typ, hi)
    }
}

impl Mul<f64> for Toleranced {
    type Output = Toleranced;

    fn mul(self, rhs: f64) -> Toleranced {
        self * Toleranced::exact(rhs)
    }
}

impl Mul<Toleranced> for f64 {
    type Output = Toleranced;

    fn mul(self, rhs: Toleranced) -> Toleranced {
        Toleranced::exact(self) * rhs
    }
}

/// Interval division. The divisor must not contain zero; use
/// [`Toleranced::checked_div`] when that is not already guaranteed.
impl Div for Toleranced {
    type Output = Toleranced;

    fn div(self, rhs: Toleranced) -> Toleranced {
        debug_assert!(!rhs.contains_zero(), "division by interval containing zero: {rhs}");
        let inv = Toleranced {
            min: 1.0 / rhs.max,
            typ: 1.0 / rhs.typ,
            max: 1.0 / rhs.min,
        };
        self * inv
    }
}

impl Div<f64> for Toleranced {
    type Output = Toleranced;

    fn div(self, rhs: f64) -> Toleranced {
        self / Toleranced::exact(rhs)
    }
}
