//! Port naming for divider circuits.

use std::fmt;
use std::str::FromStr;

use crate::error::DividerError;

/// One of the three external connections of a divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Port {
    /// Top of `r_hi`
    Hi,
    /// Junction of `r_hi` and `r_lo`
    Out,
    /// Bottom of `r_lo`
    Lo,
}

impl Port {
    /// All ports, top to bottom.
    pub const ALL: [Port; 3] = [Port::Hi, Port::Out, Port::Lo];

    pub fn name(&self) -> &'static str {
        match self {
            Port::Hi => "hi",
            Port::Out => "out",
            Port::Lo => "lo",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Port {
    type Err = DividerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hi" => Ok(Port::Hi),
            "out" => Ok(Port::Out),
            "lo" => Ok(Port::Lo),
            _ => Err(DividerError::value_parse(s, "expected one of hi, out, lo")),
        }
    }
}
