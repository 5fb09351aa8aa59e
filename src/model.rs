use crate::warning::ExtractWarning;

/// Four independently extracted columns. Each list preserves first-seen
/// order in the source text; the lists are NOT guaranteed to line up
/// person-for-person, because each field type is matched and filtered on
/// its own (see `roster::parse_roster`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub emails: Vec<String>,
    pub rooms: Vec<String>,
}

impl Roster {
    /// Number of spreadsheet rows: the length of the longest column.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.first_names
            .len()
            .max(self.last_names.len())
            .max(self.emails.len())
            .max(self.rooms.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// True when the four columns ended up with unequal lengths.
    #[must_use]
    pub fn is_misaligned(&self) -> bool {
        let lengths = [
            self.first_names.len(),
            self.last_names.len(),
            self.emails.len(),
            self.rooms.len(),
        ];
        lengths.iter().any(|&len| len != lengths[0])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterReport {
    pub row_count: usize,
    pub first_name_count: usize,
    pub last_name_count: usize,
    pub email_count: usize,
    pub room_count: usize,
    pub warnings: Vec<ExtractWarning>,
}
