//! Location name normalization
//! Turns free-text labels into canonical, comparable keys

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a location label: trim, uppercase, strip diacritics.
///
/// Two labels refer to the same location iff their normalized keys are
/// equal. Total over all strings and idempotent; an empty or
/// whitespace-only label normalizes to the empty key, which matches
/// only other empties.
pub fn normalize(label: &str) -> String {
    label
        .trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_case_and_whitespace() {
        assert_eq!(normalize("Guarujá/SP "), "GUARUJA/SP");
        assert_eq!(normalize("GUARUJA/SP"), "GUARUJA/SP");
        assert_eq!(normalize(" são paulo"), "SAO PAULO");
        assert_eq!(normalize("Jundiaí"), "JUNDIAI");
        assert_eq!(normalize("Conceição"), "CONCEICAO");
    }

    #[test]
    fn idempotent() {
        for s in ["Guarujá/SP ", "SUMARÉ", "  ", "", "Águas Claras", "nan"] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }

    #[test]
    fn empty_after_trim_is_empty_key() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t"), "");
    }
}
