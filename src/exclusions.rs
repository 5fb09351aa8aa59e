use std::collections::BTreeSet;

/// Tokens known to false-positive against the roster patterns: place names,
/// weekday and month abbreviations, subject-catalog fragments, and the MCUT
/// building codes (rooms listed here name buildings, not assignable rooms).
const DEFAULT_EXCLUSIONS: &[&str] = &[
    "State",
    "Hometown",
    "Ecol",
    "Speech",
    "Language",
    "Barnechea, Santiago",
    "Evol",
    "Environ Biol",
    "Republic",
    "Korea",
    "Mon",
    "Tues",
    "Wed",
    "Thurs",
    "Fri",
    "Sat",
    "Sun",
    "Feb",
    "Sep",
    "MCUT-N1",
    "MCUT-N2",
    "MCUT-N3",
    "MCUT-N4",
    "MCUT-N5",
    "MCUT-N6",
    "MCUT-N7",
    "MCUT-N8",
    "MCUT-S1",
    "MCUT-S2",
    "MCUT-S3",
    "MCUT-S4",
    "MCUT-S5",
    "MCUT-S6",
    "MCUT-S7",
    "MCUT-S8",
    "MCUT-C1",
    "MCUT-C2",
];

/// Exact-match suppression list applied to every extracted token.
///
/// Matching is whole-token string equality, never substring containment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    words: BTreeSet<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        DEFAULT_EXCLUSIONS.iter().copied().collect()
    }
}

impl ExclusionSet {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        self.words.insert(word.into());
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}
