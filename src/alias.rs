//! DEPARA alias resolution
//! Maps raw spreadsheet location labels to their standardized names

use std::collections::HashMap;

/// Lookup table from raw location labels to standardized ones.
///
/// Lookups are exact-string matches on the raw label; normalization is a
/// separate stage applied by the caller after resolution.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    entries: HashMap<String, String>,
}

impl AliasMap {
    /// Build from an ordered sequence of (raw, standardized) pairs.
    /// On duplicate raw labels the later entry wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Resolve a raw label to its standardized form.
    /// Unmapped labels pass through unchanged; resolution never fails.
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        self.entries.get(label).map(String::as_str).unwrap_or(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn mapped_label_is_replaced() {
        let map = AliasMap::from_pairs([("SP Capital".to_string(), "São Paulo/SP".to_string())]);
        assert_eq!(map.resolve("SP Capital"), "São Paulo/SP");
        assert_eq!(normalize(map.resolve("SP Capital")), "SAO PAULO/SP");
    }

    #[test]
    fn unmapped_label_passes_through() {
        let map = AliasMap::default();
        assert_eq!(map.resolve("Unknown City"), "Unknown City");
    }

    #[test]
    fn lookup_is_exact_not_normalized() {
        let map = AliasMap::from_pairs([("guarujá".to_string(), "Guarujá/SP".to_string())]);
        // Different case is a different raw label
        assert_eq!(map.resolve("GUARUJÁ"), "GUARUJÁ");
        assert_eq!(map.resolve("guarujá"), "Guarujá/SP");
    }

    #[test]
    fn later_duplicate_wins() {
        let map = AliasMap::from_pairs([
            ("Porto".to_string(), "Santos/SP".to_string()),
            ("Porto".to_string(), "Guarujá/SP".to_string()),
        ]);
        assert_eq!(map.resolve("Porto"), "Guarujá/SP");
    }
}
