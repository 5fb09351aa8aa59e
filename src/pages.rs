use std::collections::BTreeSet;
use std::str::FromStr;

use regex::Regex;

use crate::error::ExtractError;

/// Set of distinct 1-based page numbers, iterated in ascending order.
///
/// No upper bound is enforced here; whether a page actually exists is
/// checked against the document during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    /// Grammar check for a human-entered page list like `1-3` or `1, 3, 5`.
    /// Equivalent to `input.parse::<PageSelection>().is_ok()`.
    #[must_use]
    pub fn validate(input: &str) -> bool {
        Self::from_str(input).is_ok()
    }

    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromStr for PageSelection {
    type Err = ExtractError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        // Whitespace is insignificant anywhere in the input.
        let compact = spec.split_whitespace().collect::<String>();

        let grammar =
            Regex::new(r"^\d+(-\d+)?(,\d+(-\d+)?)*$").expect("hardcoded page grammar is valid");
        if !grammar.is_match(&compact) {
            return Err(ExtractError::InvalidPageSelection(format!(
                "'{spec}' is not a page list like '1-3' or '1, 3, 5'"
            )));
        }

        let mut pages = BTreeSet::new();
        for token in compact.split(',') {
            if let Some((start, end)) = token.split_once('-') {
                let start: u32 = start.parse().map_err(|_| {
                    ExtractError::InvalidPageSelection(format!("page number '{start}' is too large"))
                })?;
                let end: u32 = end.parse().map_err(|_| {
                    ExtractError::InvalidPageSelection(format!("page number '{end}' is too large"))
                })?;
                if start == 0 || end == 0 {
                    return Err(ExtractError::InvalidPageSelection(
                        "pages are 1-based".to_string(),
                    ));
                }
                if end < start {
                    return Err(ExtractError::InvalidPageSelection(format!(
                        "invalid range '{token}': end is smaller than start"
                    )));
                }
                pages.extend(start..=end);
            } else {
                let page: u32 = token.parse().map_err(|_| {
                    ExtractError::InvalidPageSelection(format!("page number '{token}' is too large"))
                })?;
                if page == 0 {
                    return Err(ExtractError::InvalidPageSelection(
                        "pages are 1-based".to_string(),
                    ));
                }
                pages.insert(page);
            }
        }

        Ok(Self { pages })
    }
}
