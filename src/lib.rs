//! # Voltage Divider
//!
//! Resistor selection for two-resistor voltage dividers under tolerance,
//! temperature and sourcing constraints.
//!
//! This library provides:
//! - Interval arithmetic over toleranced quantities
//! - Forward (`v_out = v_in · R_lo / (R_hi + R_lo)`) and inverse
//!   (`v_out = v_in · (1 + R_hi / R_lo)`) divider objectives
//! - A solver that screens precision tiers, ranks stocked value pairs and
//!   verifies sourcing depth and TCR drift
//! - In-memory and synthesized E-series parts catalogs
//!
//! ## Architecture
//!
//! - [`toleranced`] - Interval values and their arithmetic
//! - [`constraints`] - Problem description and objective model
//! - [`catalog`] - Parts catalog trait, query types and implementations
//! - [`solver`] - Precision screening, candidate search and resolution
//! - [`circuit`] - Divider circuit built from a solution
//! - [`settings`] - Design-wide defaults
//!
//! ## Usage
//!
//! ```no_run
//! use voltage_divider::{solve, DividerConstraints, StandardCatalog, Toleranced};
//!
//! let constraints = DividerConstraints::forward(
//!     Toleranced::percent(10.0, 1.0),
//!     Toleranced::percent(2.5, 5.0),
//!     50e-6,
//! )
//! .build()?;
//! let solution = solve(&constraints, &StandardCatalog::default())?;
//! println!("{solution}");
//! # Ok::<(), voltage_divider::DividerError>(())
//! ```

pub mod catalog;
pub mod circuit;
pub mod constraints;
pub mod error;
pub mod settings;
pub mod solver;
pub mod toleranced;

// Re-export main types for convenience
pub use catalog::{InMemoryCatalog, PartsCatalog, Resistor, ResistorQuery, StandardCatalog};
pub use circuit::{forward_divider, inverse_divider, DividerCircuit};
pub use constraints::{DividerConstraints, DividerKind, Objective};
pub use error::{DividerError, Result};
pub use settings::DesignSettings;
pub use solver::{solve, DividerSolution};
pub use toleranced::Toleranced;
