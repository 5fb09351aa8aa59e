use regex::Regex;
use tracing::debug;

use crate::exclusions::ExclusionSet;
use crate::model::Roster;

/// Scans extracted page text for roster fields in three independent passes:
/// `"Last, First"` names (optionally trailed by a middle initial), email
/// addresses, and `MCUT-` room codes. Every extracted token is checked
/// against the exclusion set by exact equality. Because the passes are
/// independent, the four output lists may have different lengths.
#[must_use]
pub fn parse_roster(text: &str, exclusions: &ExclusionSet) -> Roster {
    let name_re = Regex::new(r"([A-Z][a-z]+), ([A-Z][a-z]+)(?: [A-Z])?")
        .expect("hardcoded name pattern is valid");
    let email_re = Regex::new(r"\S+?@\S+?\.\S+").expect("hardcoded email pattern is valid");
    let room_re = Regex::new(r"MCUT-\S+").expect("hardcoded room pattern is valid");

    let mut roster = Roster::default();

    for capture in name_re.captures_iter(text) {
        let full = &capture[0];
        if exclusions.contains(full) {
            continue;
        }
        let (Some(last), Some(first)) = (capture.get(1), capture.get(2)) else {
            continue;
        };
        // The two halves are filtered independently: dropping one side does
        // not drop the other. The middle initial is part of the matched
        // token but not of the first-name capture.
        let first = first.as_str().trim();
        let last = last.as_str().trim();
        if !exclusions.contains(first) {
            roster.first_names.push(first.to_string());
        }
        if !exclusions.contains(last) {
            roster.last_names.push(last.to_string());
        }
    }

    for found in email_re.find_iter(text) {
        let email = found.as_str();
        if !exclusions.contains(email) {
            roster.emails.push(email.to_string());
        }
    }

    for found in room_re.find_iter(text) {
        let room = found.as_str();
        if !exclusions.contains(room) {
            roster.rooms.push(room.to_string());
        }
    }

    debug!(
        first_names = roster.first_names.len(),
        last_names = roster.last_names.len(),
        emails = roster.emails.len(),
        rooms = roster.rooms.len(),
        "roster parse complete"
    );
    debug!(?roster, "parsed roster contents");

    roster
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_roster;
    use crate::exclusions::ExclusionSet;

    fn default_exclusions() -> ExclusionSet {
        ExclusionSet::default()
    }

    #[test]
    fn extracts_name_email_and_filters_building_code() {
        let text = "Doe, Jane A\njane.doe@example.com\nMCUT-N2\nState\n";
        let roster = parse_roster(text, &default_exclusions());

        assert_eq!(roster.first_names, vec!["Jane"]);
        assert_eq!(roster.last_names, vec!["Doe"]);
        assert_eq!(roster.emails, vec!["jane.doe@example.com"]);
        assert_eq!(roster.rooms, Vec::<String>::new());
    }

    #[test]
    fn middle_initial_is_not_part_of_the_first_name() {
        let roster = parse_roster("Smith, John Q", &default_exclusions());
        assert_eq!(roster.first_names, vec!["John"]);
        assert_eq!(roster.last_names, vec!["Smith"]);
    }

    #[test]
    fn keeps_unlisted_room_codes() {
        let roster = parse_roster("MCUT-123 MCUT-N2 MCUT-456", &default_exclusions());
        assert_eq!(roster.rooms, vec!["MCUT-123", "MCUT-456"]);
    }

    #[test]
    fn name_halves_are_filtered_independently() {
        // "Sep" is excluded as a month abbreviation, "Doe" is not.
        let roster = parse_roster("Doe, Sep", &default_exclusions());
        assert_eq!(roster.first_names, Vec::<String>::new());
        assert_eq!(roster.last_names, vec!["Doe"]);

        // Both halves excluded: nothing survives.
        let roster = parse_roster("Mon, Tues", &default_exclusions());
        assert_eq!(roster.first_names, Vec::<String>::new());
        assert_eq!(roster.last_names, Vec::<String>::new());
    }

    #[test]
    fn full_name_exclusion_suppresses_both_halves() {
        let roster = parse_roster("Barnechea, Santiago", &default_exclusions());
        assert!(roster.first_names.is_empty());
        assert!(roster.last_names.is_empty());
    }

    #[test]
    fn preserves_first_seen_order_without_dedup() {
        let text = "Zeta, Amy\nAbbot, Amy\nZeta, Amy\n";
        let roster = parse_roster(text, &ExclusionSet::empty());
        assert_eq!(roster.first_names, vec!["Amy", "Amy", "Amy"]);
        assert_eq!(roster.last_names, vec!["Zeta", "Abbot", "Zeta"]);
    }

    #[test]
    fn excluded_email_is_dropped_by_exact_match() {
        let exclusions = ["noreply@example.com"].into_iter().collect::<ExclusionSet>();
        let text = "noreply@example.com jane@school.edu";
        let roster = parse_roster(text, &exclusions);
        assert_eq!(roster.emails, vec!["jane@school.edu"]);
    }

    #[test]
    fn non_matching_text_yields_empty_roster() {
        let roster = parse_roster(
            "plain narrative text without roster fields",
            &default_exclusions(),
        );
        assert!(roster.is_empty());
    }
}
