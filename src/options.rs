use crate::exclusions::ExclusionSet;
use crate::pages::PageSelection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Pages to read; `None` reads the whole document.
    pub pages: Option<PageSelection>,
    /// Tokens suppressed from every extraction pass.
    pub exclusions: ExclusionSet,
}

#[cfg(test)]
mod tests {
    use super::ExtractOptions;

    #[test]
    fn default_reads_all_pages_with_builtin_exclusions() {
        let options = ExtractOptions::default();
        assert!(options.pages.is_none());
        assert!(options.exclusions.contains("State"));
    }
}
