//! Design-wide defaults for part selection.
//!
//! Nothing here is process-global: a [`DesignSettings`] value is created by
//! the caller (usually via `Default`) and handed to the constraints builder,
//! which copies what it needs.

use crate::catalog::ResistorQuery;
use crate::toleranced::Toleranced;

/// Standard precision ladder in percent, loosest first.
pub const STD_PRECISIONS: [f64; 8] = [20.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.25, 0.1];

/// Default minimum number of distinct sources per resistor.
pub const DEFAULT_MIN_SOURCES: usize = 3;

/// Default cap on records returned per catalog query.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Default coarse search window around each guessed resistance, in percent.
pub const DEFAULT_SEARCH_RANGE: f64 = 10.0;

/// Reference temperature for TCR specifications, in degrees Celsius.
pub const TCR_REFERENCE_TEMPERATURE: f64 = 25.0;

/// Defaults applied when constraints leave a field unset.
#[derive(Debug, Clone)]
pub struct DesignSettings {
    /// Operating temperature range (degC) used for TCR validation.
    pub operating_temperature: Toleranced,
    /// Precision ladder in percent.
    pub precision_series: Vec<f64>,
    /// Coarse search window in percent.
    pub search_range: f64,
    /// Minimum number of sources per resistor.
    pub min_sources: usize,
    /// Cap on records per catalog query.
    pub query_limit: usize,
    /// Sourcing filter applied to every catalog query.
    pub base_query: ResistorQuery,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            // 0 to 25 degC
            operating_temperature: Toleranced::symmetric(12.5, 12.5),
            precision_series: STD_PRECISIONS.to_vec(),
            search_range: DEFAULT_SEARCH_RANGE,
            min_sources: DEFAULT_MIN_SOURCES,
            query_limit: DEFAULT_QUERY_LIMIT,
            base_query: ResistorQuery::default(),
        }
    }
}

impl DesignSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operating temperature range.
    pub fn with_operating_temperature(mut self, range: Toleranced) -> Self {
        self.operating_temperature = range;
        self
    }

    /// Set the default precision ladder.
    pub fn with_precision_series(mut self, series: Vec<f64>) -> Self {
        self.precision_series = series;
        self
    }

    /// Set the default sourcing filter.
    pub fn with_base_query(mut self, query: ResistorQuery) -> Self {
        self.base_query = query;
        self
    }
}
