//! Catalog backed by an explicit list of records.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::{PartsCatalog, Resistor, SearchFilter};
use crate::error::{DividerError, Result};

/// A catalog holding its records in memory, in preference order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    parts: Vec<Resistor>,
}

impl InMemoryCatalog {
    /// Create a catalog from records already in preference order.
    pub fn new(parts: Vec<Resistor>) -> Self {
        Self { parts }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Parse a JSON array of records from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    /// Load a JSON catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DividerError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let catalog = Self::from_json_str(&content)?;
        log::debug!("Loaded {} parts from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Serialize the records as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.parts)?)
    }

    /// Append a record at the lowest preference.
    pub fn push(&mut self, part: Resistor) {
        self.parts.push(part);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// All records in preference order.
    pub fn parts(&self) -> &[Resistor] {
        &self.parts
    }
}

impl PartsCatalog for InMemoryCatalog {
    fn search(&self, filter: &SearchFilter<'_>) -> Result<Vec<Resistor>> {
        let limit = filter.limit.unwrap_or(usize::MAX);
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for part in self.parts.iter().filter(|p| filter.matches(p)) {
            if results.len() >= limit {
                break;
            }
            // First record per distinct value wins
            if filter.distinct_resistance && !seen.insert(part.resistance.to_bits()) {
                continue;
            }
            results.push(part.clone());
        }

        log::trace!(
            "Catalog query {:?} @ {}% returned {} records",
            filter.resistance,
            filter.precision,
            results.len()
        );
        Ok(results)
    }
}

impl From<Vec<Resistor>> for InMemoryCatalog {
    fn from(parts: Vec<Resistor>) -> Self {
        Self::new(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Mounting, ResistanceTarget, ResistorQuery, Tcr};

    fn part(mpn: &str, resistance: f64, tcr: bool) -> Resistor {
        Resistor {
            mpn: mpn.to_string(),
            manufacturer: "Test".to_string(),
            resistance,
            precision: 1.0,
            tcr: tcr.then(|| Tcr::symmetric(100.0)),
            case: "0603".to_string(),
            mounting: Mounting::Smd,
            stock: 100,
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            part("A1", 1000.0, true),
            part("A2", 1000.0, true),
            part("B1", 1100.0, true),
            part("C1", 1200.0, false),
            part("B2", 1100.0, true),
        ])
    }

    #[test]
    fn test_exact_search_preserves_order() {
        let base = ResistorQuery::default();
        let filter = SearchFilter::new(&base, ResistanceTarget::Exact(1100.0), 1.0).with_tcr();
        let found = catalog().search(&filter).unwrap();
        let mpns: Vec<_> = found.iter().map(|p| p.mpn.as_str()).collect();
        assert_eq!(mpns, vec!["B1", "B2"]);
    }

    #[test]
    fn test_distinct_collapses_values() {
        let base = ResistorQuery::default();
        let window = ResistanceTarget::Within(crate::Toleranced::percent(1100.0, 20.0));
        let filter = SearchFilter::new(&base, window, 1.0).distinct();
        let found = catalog().search(&filter).unwrap();
        let values: Vec<_> = found.iter().map(|p| p.resistance).collect();
        assert_eq!(values, vec![1000.0, 1100.0, 1200.0]);

        let with_tcr = SearchFilter::new(&base, window, 1.0).distinct().with_tcr();
        assert_eq!(catalog().search(&with_tcr).unwrap().len(), 2);
    }

    #[test]
    fn test_limit() {
        let base = ResistorQuery::default();
        let window = ResistanceTarget::Within(crate::Toleranced::percent(1100.0, 20.0));
        let filter = SearchFilter::new(&base, window, 1.0).with_limit(2);
        assert_eq!(catalog().search(&filter).unwrap().len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let original = catalog();
        let json = original.to_json().unwrap();
        let loaded = InMemoryCatalog::from_json_str(&json).unwrap();
        assert_eq!(loaded.parts(), original.parts());
    }

    #[test]
    fn test_invalid_json() {
        let err = InMemoryCatalog::from_json_str("{\"not\": \"a list\"}").unwrap_err();
        assert!(matches!(err, DividerError::CatalogFormat { .. }));
    }
}
