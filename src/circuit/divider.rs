//! Two-resistor divider circuit built from a solution.

use serde::{Deserialize, Serialize};

use super::types::Port;
use crate::catalog::{format_ohms, PartsCatalog, Resistor};
use crate::constraints::{DividerConstraints, DividerKind};
use crate::error::{DividerError, Result};
use crate::settings::DesignSettings;
use crate::solver::{solve, DividerSolution};
use crate::toleranced::Toleranced;

/// Name used when the caller does not supply one.
pub const DEFAULT_CIRCUIT_NAME: &str = "voltage_divider";

/// A placed divider: `r_hi` between `hi` and `out`, `r_lo` between `out`
/// and `lo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerCircuit {
    pub name: String,
    pub r_hi: Resistor,
    pub r_lo: Resistor,
    /// Expected voltage of the solved node.
    pub output_voltage: Toleranced,
}

impl DividerCircuit {
    /// Wrap a solution. An empty name falls back to [`DEFAULT_CIRCUIT_NAME`].
    pub fn from_solution(solution: DividerSolution, name: Option<&str>) -> Self {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => DEFAULT_CIRCUIT_NAME.to_string(),
        };
        Self {
            name,
            r_hi: solution.r_hi,
            r_lo: solution.r_lo,
            output_voltage: solution.v_out,
        }
    }

    /// Solve the constraints and wrap the result.
    pub fn from_constraints<C: PartsCatalog + ?Sized>(
        constraints: &DividerConstraints,
        catalog: &C,
        name: Option<&str>,
    ) -> Result<Self> {
        let solution = solve(constraints, catalog)?;
        Ok(Self::from_solution(solution, name))
    }

    /// The resistor connected between two ports, if any.
    pub fn resistor_between(&self, a: Port, b: Port) -> Option<&Resistor> {
        match (a.min(b), a.max(b)) {
            (Port::Hi, Port::Out) => Some(&self.r_hi),
            (Port::Out, Port::Lo) => Some(&self.r_lo),
            _ => None,
        }
    }

    /// SPICE-style subcircuit with ports `hi out lo`.
    pub fn to_netlist(&self) -> String {
        let lines = [
            format!("* {}", self.name),
            format!("* R_HI {} ({})", self.r_hi.mpn, self.r_hi.manufacturer),
            format!("* R_LO {} ({})", self.r_lo.mpn, self.r_lo.manufacturer),
            format!(".SUBCKT {} {} {} {}", self.name, Port::Hi, Port::Out, Port::Lo),
            format!("R_HI {} {} {}", Port::Hi, Port::Out, spice_value(self.r_hi.resistance)),
            format!("R_LO {} {} {}", Port::Out, Port::Lo, spice_value(self.r_lo.resistance)),
            format!(".ENDS {}", self.name),
        ];
        let mut netlist = lines.join("\n");
        netlist.push('\n');
        netlist
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DividerError::output_format)
    }

    /// Human-readable description of the parts and expected output.
    pub fn summary(&self) -> String {
        format!(
            "{name}\n  R_HI ({hi}-{out}): {r_hi}\n  R_LO ({out}-{lo}): {r_lo}\n  Output: {typ:.4} V [{min:.4} V, {max:.4} V]",
            name = self.name,
            hi = Port::Hi,
            out = Port::Out,
            lo = Port::Lo,
            r_hi = self.r_hi,
            r_lo = self.r_lo,
            typ = self.output_voltage.typ(),
            min = self.output_voltage.min(),
            max = self.output_voltage.max(),
        )
    }
}

/// Forward divider with default settings.
pub fn forward_divider<C: PartsCatalog + ?Sized>(
    v_in: Toleranced,
    v_out: Toleranced,
    current: f64,
    catalog: &C,
    name: Option<&str>,
) -> Result<DividerCircuit> {
    divider(DividerKind::Forward, v_in, v_out, current, catalog, name)
}

/// Inverse divider (e.g. regulator feedback) with default settings.
pub fn inverse_divider<C: PartsCatalog + ?Sized>(
    v_in: Toleranced,
    v_out: Toleranced,
    current: f64,
    catalog: &C,
    name: Option<&str>,
) -> Result<DividerCircuit> {
    divider(DividerKind::Inverse, v_in, v_out, current, catalog, name)
}

fn divider<C: PartsCatalog + ?Sized>(
    kind: DividerKind,
    v_in: Toleranced,
    v_out: Toleranced,
    current: f64,
    catalog: &C,
    name: Option<&str>,
) -> Result<DividerCircuit> {
    let builder = match kind {
        DividerKind::Forward => DividerConstraints::forward(v_in, v_out, current),
        DividerKind::Inverse => DividerConstraints::inverse(v_in, v_out, current),
    };
    let constraints = builder.settings(&DesignSettings::default()).build()?;
    DividerCircuit::from_constraints(&constraints, catalog, name)
}

/// Resistance with SPICE suffixes; `M` means milli there.
fn spice_value(ohms: f64) -> String {
    let text = format_ohms(ohms);
    match text.strip_suffix('M') {
        Some(mantissa) => format!("{mantissa}Meg"),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Mounting, Tcr};

    fn part(mpn: &str, resistance: f64) -> Resistor {
        Resistor {
            mpn: mpn.to_string(),
            manufacturer: "Yageo".to_string(),
            resistance,
            precision: 1.0,
            tcr: Some(Tcr::symmetric(100.0)),
            case: "0603".to_string(),
            mounting: Mounting::Smd,
            stock: 100,
        }
    }

    fn solution() -> DividerSolution {
        DividerSolution {
            r_hi: part("YA0603-165K-F", 165e3),
            r_lo: part("YA0603-54K9-F", 54.9e3),
            v_out: Toleranced::min_typ_max(2.43, 2.49, 2.55).unwrap(),
        }
    }

    #[test]
    fn test_default_name() {
        let c = DividerCircuit::from_solution(solution(), None);
        assert_eq!(c.name, DEFAULT_CIRCUIT_NAME);
        let c = DividerCircuit::from_solution(solution(), Some("  "));
        assert_eq!(c.name, DEFAULT_CIRCUIT_NAME);
        let c = DividerCircuit::from_solution(solution(), Some("vref"));
        assert_eq!(c.name, "vref");
    }

    #[test]
    fn test_ports() {
        let c = DividerCircuit::from_solution(solution(), None);
        assert_eq!(c.resistor_between(Port::Out, Port::Hi).unwrap().resistance, 165e3);
        assert_eq!(c.resistor_between(Port::Out, Port::Lo).unwrap().resistance, 54.9e3);
        assert!(c.resistor_between(Port::Hi, Port::Lo).is_none());
        assert!(c.resistor_between(Port::Out, Port::Out).is_none());
    }

    #[test]
    fn test_netlist() {
        let netlist = DividerCircuit::from_solution(solution(), Some("fb")).to_netlist();
        let lines: Vec<_> = netlist.lines().collect();
        assert!(lines.contains(&".SUBCKT fb hi out lo"));
        assert!(lines.contains(&"R_HI hi out 165k"));
        assert!(lines.contains(&"R_LO out lo 54.9k"));
        assert_eq!(lines.first(), Some(&"* fb"));
        assert_eq!(lines.last(), Some(&".ENDS fb"));
        assert_eq!(lines.len(), 7);
        assert!(netlist.ends_with(".ENDS fb\n"));
    }

    #[test]
    fn test_summary_mentions_parts() {
        let summary = DividerCircuit::from_solution(solution(), None).summary();
        assert!(summary.starts_with("voltage_divider"));
        assert!(summary.contains("YA0603-165K-F"));
        assert!(summary.contains("2.4900 V"));
    }

    #[test]
    fn test_to_json_round_trip() {
        let circuit = DividerCircuit::from_solution(solution(), Some("fb"));
        let json = circuit.to_json().unwrap();
        assert!(json.contains("\"output_voltage\""));
        let back: DividerCircuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_spice_value_mega() {
        assert_eq!(spice_value(2.2e6), "2.2Meg");
        assert_eq!(spice_value(470.0), "470");
    }
}
