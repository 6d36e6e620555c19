//! Circuit representation of a solved divider.
//!
//! A [`DividerCircuit`] exposes the two selected parts through three ports
//! and can be exported as a SPICE-style subcircuit.

mod divider;
mod types;

pub use divider::{forward_divider, inverse_divider, DividerCircuit, DEFAULT_CIRCUIT_NAME};
pub use types::Port;
