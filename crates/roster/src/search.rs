//! Free-text search across a set of fields.

use crate::collate::fold;
use crate::value::Value;

/// A normalized search term.
///
/// Matching is a case-insensitive substring test against each search field;
/// a record matches when any field contains the term. Accents are compared
/// as-is unless folding is enabled, in which case `"ecole"` matches `"École"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm {
    needle: String,
    fold_diacritics: bool,
}

impl SearchTerm {
    /// Normalizes `term` for matching.
    pub fn new(term: &str, fold_diacritics: bool) -> Self {
        SearchTerm {
            needle: normalize(term, fold_diacritics),
            fold_diacritics,
        }
    }

    /// Returns `true` if the term is empty and matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests a single field value.
    ///
    /// Numbers and booleans are tested against their display form so that
    /// numeric identifiers stay searchable. Missing fields never match.
    pub fn matches_value(&self, value: &Value<'_>) -> bool {
        if self.is_empty() {
            return true;
        }
        match value {
            Value::String(s) => normalize(s, self.fold_diacritics).contains(&self.needle),
            Value::Number(_) | Value::Bool(_) => value.to_string().contains(&self.needle),
            Value::None => false,
        }
    }

    /// Tests a record: at least one of `fields` must contain the term.
    pub fn matches<T, F>(&self, record: &T, fields: &[String], accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.is_empty()
            || fields
                .iter()
                .any(|field| self.matches_value(&accessor(record, field)))
    }
}

fn normalize(s: &str, fold_diacritics: bool) -> String {
    if fold_diacritics {
        fold(s)
    } else {
        s.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn empty_term_matches_everything() {
        let term = SearchTerm::new("", false);
        assert!(term.is_empty());
        assert!(term.matches_value(&Value::None));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let term = SearchTerm::new("MARIE", false);
        assert!(term.matches_value(&Value::String("Marie")));
        assert!(term.matches_value(&Value::String("marie.dupont@etudiant.fr")));
        assert!(!term.matches_value(&Value::String("Mari")));
    }

    #[test]
    fn accents_are_significant_without_folding() {
        let term = SearchTerm::new("ecole", false);
        assert!(!term.matches_value(&Value::String("École")));
        let accented = SearchTerm::new("école", false);
        assert!(accented.matches_value(&Value::String("ÉCOLE")));
    }

    #[test]
    fn folding_ignores_accents_on_both_sides() {
        let term = SearchTerm::new("ecole", true);
        assert!(term.matches_value(&Value::String("École Doctorale")));
        let accented = SearchTerm::new("chloé", true);
        assert!(accented.matches_value(&Value::String("Chloe")));
    }

    #[test]
    fn folding_leaves_emoji_alone() {
        let term = SearchTerm::new("grin", true);
        assert!(!term.matches_value(&Value::String("😀 Groupe")));
        let term = SearchTerm::new("😀", true);
        assert!(term.matches_value(&Value::String("😀 Groupe")));
    }

    #[test]
    fn numbers_match_on_display_form() {
        let term = SearchTerm::new("2023", false);
        assert!(term.matches_value(&Value::Number(Number::U64(20230001))));
        assert!(!term.matches_value(&Value::Number(Number::U64(20220015))));
        assert!(!term.matches_value(&Value::None));
    }
}
