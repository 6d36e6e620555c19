//! Parsing of engineering values and toleranced literals.
//!
//! ```text
//! value      = number [suffix]
//! suffix     = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G'
//! toleranced = value ('±' | '+-') value ['%']     symmetric, percent or absolute
//!            | value '/' value '/' value          min / typ / max
//!            | value '..' value                   min .. max
//!            | value                              exact
//! ```

use std::str::FromStr;

use super::Toleranced;
use crate::error::{DividerError, Result};

/// Parse a number with an optional SI suffix, e.g. `10k` or `50u`.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

fn value_or_err(input: &str, part: &str) -> Result<f64> {
    parse_value(part).ok_or_else(|| DividerError::value_parse(input, format!("'{}' is not a number", part.trim())))
}

impl FromStr for Toleranced {
    type Err = DividerError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();

        let symmetric = input
            .split_once('±')
            .or_else(|| input.split_once("+-"))
            .or_else(|| input.split_once("+/-"));
        if let Some((typ, tol)) = symmetric {
            let typ = value_or_err(input, typ)?;
            let tol = tol.trim();
            return match tol.strip_suffix('%') {
                Some(pct) => {
                    let pct = value_or_err(input, pct)?;
                    if !(0.0..=100.0).contains(&pct) {
                        return Err(DividerError::value_parse(input, "percentage must be within 0..=100"));
                    }
                    Ok(Toleranced::percent(typ, pct))
                }
                None => Ok(Toleranced::symmetric(typ, value_or_err(input, tol)?)),
            };
        }

        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() == 3 {
            let min = value_or_err(input, parts[0])?;
            let typ = value_or_err(input, parts[1])?;
            let max = value_or_err(input, parts[2])?;
            return Toleranced::min_typ_max(min, typ, max);
        }
        if parts.len() != 1 {
            return Err(DividerError::value_parse(input, "expected min/typ/max"));
        }

        if let Some((min, max)) = input.split_once("..") {
            return Toleranced::min_max(value_or_err(input, min)?, value_or_err(input, max)?);
        }

        value_or_err(input, input).map(Toleranced::exact)
    }
}
