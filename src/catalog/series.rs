//! Standard E-series resistor values and a synthesized catalog.
//!
//! E6, E12 and E24 come from the IEC 60063 tables. E48, E96 and E192 follow
//! `10^(i/n)` rounded to three significant digits, with the single E192
//! exception of 9.20.

use std::fmt;

use super::{InMemoryCatalog, Mounting, PartsCatalog, Resistor, SearchFilter, Tcr};
use crate::error::Result;
use crate::settings::STD_PRECISIONS;

/// E24 mantissas in hundredths. E12 and E6 are every second and fourth entry.
const E24: [u32; 24] = [
    100, 110, 120, 130, 150, 160, 180, 200, 220, 240, 270, 300, 330, 360, 390, 430, 470, 510, 560,
    620, 680, 750, 820, 910,
];

/// A preferred-number series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ESeries {
    E6,
    E12,
    E24,
    E48,
    E96,
    E192,
}

impl ESeries {
    /// Values per decade.
    pub fn steps(&self) -> u32 {
        match self {
            ESeries::E6 => 6,
            ESeries::E12 => 12,
            ESeries::E24 => 24,
            ESeries::E48 => 48,
            ESeries::E96 => 96,
            ESeries::E192 => 192,
        }
    }

    /// Mantissas of one decade in hundredths, ascending (100 = 1.00).
    fn mantissas(&self) -> Vec<u32> {
        match self {
            ESeries::E6 => E24.iter().step_by(4).copied().collect(),
            ESeries::E12 => E24.iter().step_by(2).copied().collect(),
            ESeries::E24 => E24.to_vec(),
            _ => {
                let n = self.steps();
                (0..n)
                    .map(|i| {
                        let m = (10f64.powf(i as f64 / n as f64) * 100.0).round() as u32;
                        if *self == ESeries::E192 && m == 919 {
                            920
                        } else {
                            m
                        }
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for ESeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.steps())
    }
}

/// Mantissas of a series in `[1, 10)`.
pub fn e_series(series: ESeries) -> Vec<f64> {
    series.mantissas().into_iter().map(|m| m as f64 / 100.0).collect()
}

/// The series customarily stocked at a precision class (percent).
pub fn series_for_precision(precision: f64) -> ESeries {
    if precision >= 20.0 {
        ESeries::E6
    } else if precision >= 10.0 {
        ESeries::E12
    } else if precision >= 5.0 {
        ESeries::E24
    } else if precision >= 2.0 {
        ESeries::E48
    } else if precision >= 1.0 {
        ESeries::E96
    } else {
        ESeries::E192
    }
}

/// Typical TCR (ppm/degC) for a precision class.
fn tcr_for_precision(precision: f64) -> f64 {
    if precision >= 5.0 {
        200.0
    } else if precision >= 1.0 {
        100.0
    } else if precision >= 0.5 {
        50.0
    } else {
        25.0
    }
}

/// EIA tolerance letter used in part numbers.
fn tolerance_code(precision: f64) -> char {
    match precision {
        p if p >= 20.0 => 'M',
        p if p >= 10.0 => 'K',
        p if p >= 5.0 => 'J',
        p if p >= 2.0 => 'G',
        p if p >= 1.0 => 'F',
        p if p >= 0.5 => 'D',
        p if p >= 0.25 => 'C',
        _ => 'B',
    }
}

/// Builder for [`StandardCatalog`].
#[derive(Debug, Clone)]
pub struct StandardCatalogBuilder {
    cases: Vec<String>,
    precisions: Vec<f64>,
    decades: std::ops::RangeInclusive<i32>,
    manufacturers: Vec<String>,
    stock: u32,
    mounting: Mounting,
}

impl Default for StandardCatalogBuilder {
    fn default() -> Self {
        Self {
            cases: vec!["0402".to_string(), "0603".to_string(), "0805".to_string()],
            precisions: STD_PRECISIONS.to_vec(),
            // 1 ohm to 9.76 Mohm
            decades: 0..=6,
            manufacturers: vec![
                "Yageo".to_string(),
                "Vishay".to_string(),
                "Panasonic".to_string(),
            ],
            stock: 10_000,
            mounting: Mounting::Smd,
        }
    }
}

impl StandardCatalogBuilder {
    /// Case codes to generate.
    pub fn cases<I, S>(mut self, cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cases = cases.into_iter().map(Into::into).collect();
        self
    }

    /// Precision classes to generate.
    pub fn precisions(mut self, precisions: Vec<f64>) -> Self {
        self.precisions = precisions;
        self
    }

    /// Decades as powers of ten, e.g. `3..=5` for 1k to 976k.
    pub fn decades(mut self, decades: std::ops::RangeInclusive<i32>) -> Self {
        self.decades = decades;
        self
    }

    /// Manufacturers; each one contributes a record per value.
    pub fn manufacturers<I, S>(mut self, manufacturers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manufacturers = manufacturers.into_iter().map(Into::into).collect();
        self
    }

    /// Stock level of every record.
    pub fn stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Mounting of every record.
    pub fn mounting(mut self, mounting: Mounting) -> Self {
        self.mounting = mounting;
        self
    }

    /// Generate the records.
    ///
    /// Order is precision, then ascending resistance, then case, then
    /// manufacturer.
    pub fn build(self) -> StandardCatalog {
        let mut parts = Vec::new();
        for &precision in &self.precisions {
            let series = series_for_precision(precision);
            let mantissas = series.mantissas();
            let tcr = Tcr::symmetric(tcr_for_precision(precision));
            for decade in self.decades.clone() {
                let scale = 10f64.powi(decade);
                for &m in &mantissas {
                    let resistance = m as f64 * scale / 100.0;
                    for case in &self.cases {
                        for manufacturer in &self.manufacturers {
                            parts.push(Resistor {
                                mpn: part_number(manufacturer, case, resistance, precision),
                                manufacturer: manufacturer.clone(),
                                resistance,
                                precision,
                                tcr: Some(tcr),
                                case: case.clone(),
                                mounting: self.mounting,
                                stock: self.stock,
                            });
                        }
                    }
                }
            }
        }
        log::debug!("Generated standard catalog with {} parts", parts.len());
        StandardCatalog {
            inner: InMemoryCatalog::new(parts),
        }
    }
}

fn part_number(manufacturer: &str, case: &str, resistance: f64, precision: f64) -> String {
    let prefix: String = manufacturer
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    format!("{prefix}{case}-{}-{}", value_code(resistance), tolerance_code(precision))
}

/// RKM value code: the multiplier letter stands in for the decimal point,
/// e.g. `54K9`, `4R7`, `165K`.
fn value_code(resistance: f64) -> String {
    let text = super::format_ohms(resistance);
    let (digits, letter) = match text.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&text[..text.len() - 1], c.to_ascii_uppercase()),
        _ => (text.as_str(), 'R'),
    };
    match digits.split_once('.') {
        Some((whole, frac)) => format!("{whole}{letter}{frac}"),
        None if letter == 'R' => format!("{digits}R"),
        None => format!("{digits}{letter}"),
    }
}

/// Catalog of synthesized E-series parts.
#[derive(Debug, Clone)]
pub struct StandardCatalog {
    inner: InMemoryCatalog,
}

impl StandardCatalog {
    /// Start configuring a catalog.
    pub fn builder() -> StandardCatalogBuilder {
        StandardCatalogBuilder::default()
    }

    /// Catalog for the given case codes with every other option defaulted.
    pub fn for_cases<I, S>(cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().cases(cases).build()
    }

    /// Underlying records.
    pub fn parts(&self) -> &[Resistor] {
        self.inner.parts()
    }
}

impl Default for StandardCatalog {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PartsCatalog for StandardCatalog {
    fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
        self.inner.search(filter)
    }
}

impl From<StandardCatalog> for InMemoryCatalog {
    fn from(catalog: StandardCatalog) -> Self {
        catalog.inner
    }
}
