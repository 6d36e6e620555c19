//! Divider constraints and their objective model.
//!
//! A [`DividerConstraints`] value describes one divider problem: the input
//! voltage, the required output, the current budget, and the sourcing rules.
//! It is built once through [`ConstraintsBuilder`], validated, and never
//! mutated afterwards.
//!
//! Two divider directions exist:
//!
//! ```text
//! Forward:  v_in ─ R_hi ─┬─ R_lo ─ GND      v_out = v_in · R_lo / (R_hi + R_lo)
//!                       v_out
//!
//! Inverse:  v_out ─ R_hi ─┬─ R_lo ─ GND     v_out = v_in · (1 + R_hi / R_lo)
//!                        v_in (reference, e.g. a regulator feedback pin)
//! ```

mod objective;

pub use objective::Objective;

use std::fmt;

use crate::catalog::ResistorQuery;
use crate::error::{DividerError, Result};
use crate::settings::DesignSettings;
use crate::toleranced::Toleranced;

/// Direction of the divider problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DividerKind {
    /// Output taken at the middle node.
    Forward,
    /// Middle node is the known reference; the top node is solved for.
    Inverse,
}

impl fmt::Display for DividerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DividerKind::Forward => write!(f, "forward"),
            DividerKind::Inverse => write!(f, "inverse"),
        }
    }
}

/// Validated, immutable divider constraints.
#[derive(Debug, Clone)]
pub struct DividerConstraints {
    kind: DividerKind,
    v_in: Toleranced,
    v_out: Toleranced,
    current: f64,
    precision_series: Vec<f64>,
    search_range: f64,
    min_sources: usize,
    query_limit: usize,
    temp_range: Toleranced,
    base_query: ResistorQuery,
}

impl DividerConstraints {
    /// Start building forward divider constraints.
    ///
    /// `current` is the divider current budget in amps.
    pub fn forward(v_in: Toleranced, v_out: Toleranced, current: f64) -> ConstraintsBuilder {
        ConstraintsBuilder::new(DividerKind::Forward, v_in, v_out, current)
    }

    /// Start building inverse divider constraints.
    pub fn inverse(v_in: Toleranced, v_out: Toleranced, current: f64) -> ConstraintsBuilder {
        ConstraintsBuilder::new(DividerKind::Inverse, v_in, v_out, current)
    }

    pub fn kind(&self) -> DividerKind {
        self.kind
    }

    pub fn v_in(&self) -> Toleranced {
        self.v_in
    }

    pub fn v_out(&self) -> Toleranced {
        self.v_out
    }

    /// Current budget in amps.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Precision tiers in percent, loosest first.
    pub fn precision_series(&self) -> &[f64] {
        &self.precision_series
    }

    /// Coarse search window in percent.
    pub fn search_range(&self) -> f64 {
        self.search_range
    }

    pub fn min_sources(&self) -> usize {
        self.min_sources
    }

    pub fn query_limit(&self) -> usize {
        self.query_limit
    }

    /// Operating temperature range in degC.
    pub fn temp_range(&self) -> Toleranced {
        self.temp_range
    }

    pub fn base_query(&self) -> &ResistorQuery {
        &self.base_query
    }
}

impl Objective for DividerConstraints {
    fn target(&self) -> Toleranced {
        self.v_out
    }

    fn compute_initial_guess(&self) -> (f64, f64) {
        match self.kind {
            DividerKind::Forward => (
                (self.v_in.typ() - self.v_out.typ()) / self.current,
                self.v_out.typ() / self.current,
            ),
            DividerKind::Inverse => (
                (self.v_out.typ() - self.v_in.typ()) / self.current,
                self.v_in.typ() / self.current,
            ),
        }
    }

    fn compute_objective(
        &self,
        r_hi: Toleranced,
        r_lo: Toleranced,
        hi_delta: Toleranced,
        lo_delta: Toleranced,
    ) -> Toleranced {
        let r_hi = r_hi * hi_delta;
        let r_lo = r_lo * lo_delta;
        match self.kind {
            DividerKind::Forward => self.v_in * r_lo / (r_lo + r_hi),
            DividerKind::Inverse => self.v_in * (1.0 + r_hi / r_lo),
        }
    }
}

impl fmt::Display for DividerConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} divider: v-in={} v-out={} current={:e}A precisions={:?}",
            self.kind, self.v_in, self.v_out, self.current, self.precision_series
        )
    }
}

/// Builder for [`DividerConstraints`].
///
/// Unset fields fall back to a [`DesignSettings`] value, the default one
/// unless [`ConstraintsBuilder::settings`] is called.
#[derive(Debug, Clone)]
pub struct ConstraintsBuilder {
    kind: DividerKind,
    v_in: Toleranced,
    v_out: Toleranced,
    current: f64,
    settings: DesignSettings,
    precision_series: Option<Vec<f64>>,
    search_range: Option<f64>,
    min_sources: Option<usize>,
    query_limit: Option<usize>,
    temp_range: Option<Toleranced>,
    base_query: Option<ResistorQuery>,
}

impl ConstraintsBuilder {
    fn new(kind: DividerKind, v_in: Toleranced, v_out: Toleranced, current: f64) -> Self {
        Self {
            kind,
            v_in,
            v_out,
            current,
            settings: DesignSettings::default(),
            precision_series: None,
            search_range: None,
            min_sources: None,
            query_limit: None,
            temp_range: None,
            base_query: None,
        }
    }

    /// Use these settings for every field not set explicitly.
    pub fn settings(mut self, settings: &DesignSettings) -> Self {
        self.settings = settings.clone();
        self
    }

    /// Precision tiers in percent; sorted loosest first on build.
    pub fn precision_series(mut self, series: Vec<f64>) -> Self {
        self.precision_series = Some(series);
        self
    }

    /// Coarse search window in percent.
    pub fn search_range(mut self, pct: f64) -> Self {
        self.search_range = Some(pct);
        self
    }

    pub fn min_sources(mut self, min_sources: usize) -> Self {
        self.min_sources = Some(min_sources);
        self
    }

    pub fn query_limit(mut self, query_limit: usize) -> Self {
        self.query_limit = Some(query_limit);
        self
    }

    /// Operating temperature range in degC.
    pub fn temp_range(mut self, range: Toleranced) -> Self {
        self.temp_range = Some(range);
        self
    }

    pub fn base_query(mut self, query: ResistorQuery) -> Self {
        self.base_query = Some(query);
        self
    }

    /// Validate and freeze the constraints.
    pub fn build(self) -> Result<DividerConstraints> {
        let settings = self.settings;
        let mut precision_series = self
            .precision_series
            .unwrap_or(settings.precision_series);
        let search_range = self.search_range.unwrap_or(settings.search_range);
        let min_sources = self.min_sources.unwrap_or(settings.min_sources);
        let query_limit = self.query_limit.unwrap_or(settings.query_limit);

        if !(self.current.is_finite() && self.current > 0.0) {
            return Err(DividerError::invalid_constraints(format!(
                "current must be positive, got {}",
                self.current
            )));
        }
        if precision_series.is_empty() {
            return Err(DividerError::invalid_constraints("precision series is empty"));
        }
        if let Some(bad) = precision_series.iter().find(|p| !(**p > 0.0 && **p < 100.0)) {
            return Err(DividerError::invalid_constraints(format!(
                "precision {bad} must be within (0, 100)"
            )));
        }
        if !(search_range.is_finite() && search_range > 0.0) {
            return Err(DividerError::invalid_constraints(format!(
                "search range must be positive, got {search_range}"
            )));
        }
        if min_sources == 0 {
            return Err(DividerError::invalid_constraints("min-sources must be at least 1"));
        }
        if min_sources > query_limit {
            return Err(DividerError::invalid_constraints(format!(
                "Min Sources must be less than Query Limit: min-sources={min_sources} query-limit={query_limit}"
            )));
        }

        precision_series.sort_by(|a, b| b.total_cmp(a));

        Ok(DividerConstraints {
            kind: self.kind,
            v_in: self.v_in,
            v_out: self.v_out,
            current: self.current,
            precision_series,
            search_range,
            min_sources,
            query_limit,
            temp_range: self.temp_range.unwrap_or(settings.operating_temperature),
            base_query: self.base_query.unwrap_or(settings.base_query),
        })
    }
}
