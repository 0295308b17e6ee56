//! Locale-aware string collation and accent folding.
//!
//! Plain byte ordering puts every accented capital after `z`, so `"Économie"`
//! would sort after `"Sciences"`. Collation compares in three levels instead:
//!
//! 1. base letters, ignoring accents and case (`"Économie"` ~ `"economie"`)
//! 2. accents (`"cote"` < `"coté"`)
//! 3. case, lowercase first (`"sciences"` < `"Sciences"`)
//!
//! Base letters come from `deunicode` transliteration.

use std::cmp::Ordering;

use deunicode::deunicode_char;

/// Folds a string for accent- and case-insensitive matching.
///
/// Only letters are transliterated, and combining marks are dropped. Emoji,
/// symbols and punctuation are kept as they are, so `"grin"` does not match
/// `"😀"`.
///
/// ```
/// assert_eq!(roster::fold("École Normale"), "ecole normale");
/// assert_eq!(roster::fold("😀 Groupe"), "😀 groupe");
/// ```
pub fn fold(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() || !c.is_alphabetic() {
            if !is_combining_mark(c) {
                folded.push(c);
            }
            continue;
        }
        match deunicode_char(c) {
            Some(ascii) => folded.push_str(ascii),
            None => folded.push(c),
        }
    }
    folded.to_lowercase()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{1DC0}'..='\u{1DFF}' | '\u{20D0}'..='\u{20FF}' | '\u{FE20}'..='\u{FE2F}')
}

/// Compares two strings with the collation described in the module docs.
pub fn collate(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Precomputed sort key for one string.
///
/// Building the key once per record keeps the sort stage from transliterating
/// on every comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey<'a> {
    base: String,
    accented: String,
    raw: &'a str,
}

impl<'a> CollationKey<'a> {
    /// Builds the key for `raw`.
    pub fn new(raw: &'a str) -> Self {
        CollationKey {
            base: fold(raw),
            accented: raw.to_lowercase(),
            raw,
        }
    }
}

impl Ord for CollationKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base
            .cmp(&other.base)
            .then_with(|| self.accented.cmp(&other.accented))
            // Strings equal up to case: reversed byte order puts lowercase first.
            .then_with(|| other.raw.cmp(self.raw))
    }
}

impl PartialOrd for CollationKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
