//! Parts catalog interface and implementations.
//!
//! The solver never talks to a parts database directly. It issues
//! [`SearchFilter`] queries through the [`PartsCatalog`] trait and treats the
//! order of returned records as the catalog's preference order.
//!
//! Two implementations ship with the crate:
//! - [`InMemoryCatalog`] - an explicit list of records, loadable from JSON
//! - [`StandardCatalog`] - synthesized E-series parts for tests and the CLI

mod memory;
mod part;
mod series;

pub use memory::InMemoryCatalog;
pub use part::{format_ohms, Mounting, Resistor, Tcr};
pub use series::{e_series, series_for_precision, ESeries, StandardCatalog, StandardCatalogBuilder};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::toleranced::Toleranced;

/// Relative tolerance used when matching an exact resistance.
pub const RESISTANCE_MATCH_EPSILON: f64 = 1e-9;

/// Absolute tolerance used when matching a precision class.
pub const PRECISION_MATCH_EPSILON: f64 = 1e-9;

/// Sourcing filter shared by every query of a solve.
///
/// The solver passes this through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistorQuery {
    /// Required mounting style, if any
    pub mounting: Option<Mounting>,
    /// Accepted case codes; empty accepts every case
    pub cases: Vec<String>,
    /// Minimum stock level
    pub min_stock: u32,
}

impl Default for ResistorQuery {
    fn default() -> Self {
        Self {
            mounting: Some(Mounting::Smd),
            cases: vec!["0603".to_string()],
            min_stock: 10,
        }
    }
}

impl ResistorQuery {
    /// A query that accepts any part.
    pub fn any() -> Self {
        Self {
            mounting: None,
            cases: Vec::new(),
            min_stock: 0,
        }
    }

    /// Restrict to a mounting style.
    pub fn with_mounting(mut self, mounting: Mounting) -> Self {
        self.mounting = Some(mounting);
        self
    }

    /// Replace the accepted case codes.
    pub fn with_cases<I, S>(mut self, cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cases = cases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minimum stock level.
    pub fn with_min_stock(mut self, min_stock: u32) -> Self {
        self.min_stock = min_stock;
        self
    }

    /// Whether a part passes the sourcing filter.
    pub fn accepts(&self, part: &Resistor) -> bool {
        if let Some(mounting) = self.mounting {
            if part.mounting != mounting {
                return false;
            }
        }
        if !self.cases.is_empty() && !self.cases.iter().any(|c| c == &part.case) {
            return false;
        }
        part.stock >= self.min_stock
    }
}

/// Resistance constraint of a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResistanceTarget {
    /// A specific nominal value
    Exact(f64),
    /// Any nominal value within the interval
    Within(Toleranced),
}

impl ResistanceTarget {
    /// Whether a nominal resistance satisfies the target.
    pub fn matches(&self, resistance: f64) -> bool {
        match self {
            ResistanceTarget::Exact(target) => {
                (resistance - target).abs() <= target.abs() * RESISTANCE_MATCH_EPSILON
            }
            ResistanceTarget::Within(range) => range.in_range(resistance),
        }
    }
}

/// A single catalog query.
#[derive(Debug, Clone)]
pub struct SearchFilter<'a> {
    /// Sourcing filter from the constraints
    pub base: &'a ResistorQuery,
    pub resistance: ResistanceTarget,
    /// Precision class in percent
    pub precision: f64,
    /// Only return parts with both TCR coefficients populated
    pub require_tcr: bool,
    /// Collapse results to one record per distinct resistance value
    pub distinct_resistance: bool,
    /// Maximum number of records to return
    pub limit: Option<usize>,
}

impl<'a> SearchFilter<'a> {
    /// Query for parts at or around a resistance with a given precision.
    pub fn new(base: &'a ResistorQuery, resistance: ResistanceTarget, precision: f64) -> Self {
        Self {
            base,
            resistance,
            precision,
            require_tcr: false,
            distinct_resistance: false,
            limit: None,
        }
    }

    /// Require TCR data on every returned part.
    pub fn with_tcr(mut self) -> Self {
        self.require_tcr = true;
        self
    }

    /// Collapse to distinct resistance values.
    pub fn distinct(mut self) -> Self {
        self.distinct_resistance = true;
        self
    }

    /// Cap the number of returned records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single record passes every per-record condition.
    ///
    /// Distinct collapsing and limits apply to the result set and are left to
    /// the catalog.
    pub fn matches(&self, part: &Resistor) -> bool {
        self.base.accepts(part)
            && self.resistance.matches(part.resistance)
            && (part.precision - self.precision).abs() <= PRECISION_MATCH_EPSILON
            && (!self.require_tcr || part.tcr.is_some())
    }
}

/// Source of resistor records.
pub trait PartsCatalog {
    /// Return the records matching `filter`, in preference order.
    fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>>;
}

impl<C: PartsCatalog + ?Sized> PartsCatalog for &C {
    fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
        (**self).search(filter)
    }
}

impl<C: PartsCatalog + ?Sized> PartsCatalog for Box<C> {
    fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
        (**self).search(filter)
    }
}
