//! Validation rules for review section payloads.
//!
//! Section entries arrive from clients and are normalized before they
//! touch the store: keys are trimmed, duplicates collapse to the last
//! entry per key, and ratings must sit on the half-step grid the rating
//! widget produces.

use std::collections::BTreeMap;

/// A section entry submitted with a review edit.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    /// Rating dimension key, e.g. `"teaching"`.
    pub section_key: String,
    /// Rating in half steps from 1.0 to 5.0.
    pub rating: Option<f64>,
    /// Free-text comment for the section.
    pub comment: Option<String>,
}

/// Whether `rating` sits on the accepted half-step grid `1.0..=5.0`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_valid_rating(rating: f64) -> bool {
    (1.0..=5.0).contains(&rating) && (rating * 2.0).round() / 2.0 == rating
}

/// Normalizes a section payload: trims keys, drops entries whose key is
/// empty, trims comments to `None` when blank, and collapses duplicate
/// keys to the last entry. Output is sorted by key.
#[must_use]
pub fn normalize_sections(entries: &[SectionEntry]) -> Vec<SectionEntry> {
    let mut by_key: BTreeMap<String, SectionEntry> = BTreeMap::new();
    for entry in entries {
        let key = entry.section_key.trim();
        if key.is_empty() {
            continue;
        }
        let comment = entry
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        by_key.insert(
            key.to_string(),
            SectionEntry {
                section_key: key.to_string(),
                rating: entry.rating,
                comment,
            },
        );
    }
    by_key.into_values().collect()
}

/// First rating that falls off the half-step grid, if any.
#[must_use]
pub fn invalid_rating(entries: &[SectionEntry]) -> Option<f64> {
    entries
        .iter()
        .filter_map(|entry| entry.rating)
        .find(|&rating| !is_valid_rating(rating))
}

/// Whether at least one entry carries a rating.
#[must_use]
pub fn has_rating(entries: &[SectionEntry]) -> bool {
    entries.iter().any(|entry| entry.rating.is_some())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn entry(key: &str, rating: Option<f64>, comment: Option<&str>) -> SectionEntry {
        SectionEntry {
            section_key: key.to_string(),
            rating,
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn half_step_grid() {
        for ok in [1.0, 1.5, 3.0, 4.5, 5.0] {
            assert!(is_valid_rating(ok), "{ok} should be accepted");
        }
        for bad in [0.5, 5.5, 3.3, 0.0, -1.0, f64::NAN] {
            assert!(!is_valid_rating(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn duplicate_keys_collapse_to_the_last_entry() {
        let entries = [
            entry("teaching", Some(2.0), None),
            entry("teaching", Some(4.5), Some("improved")),
        ];
        let normalized = normalize_sections(&entries);
        assert_eq!(normalized.len(), 1);
        let Some(only) = normalized.first() else {
            panic!("one entry expected");
        };
        assert_eq!(only.rating, Some(4.5));
        assert_eq!(only.comment.as_deref(), Some("improved"));
    }

    #[test]
    fn blank_keys_are_dropped_and_comments_trimmed() {
        let entries = [
            entry("  ", Some(3.0), None),
            entry(" safety ", Some(3.0), Some("   ")),
        ];
        let normalized = normalize_sections(&entries);
        assert_eq!(normalized.len(), 1);
        let Some(only) = normalized.first() else {
            panic!("one entry expected");
        };
        assert_eq!(only.section_key, "safety");
        assert_eq!(only.comment, None);
    }

    #[test]
    fn invalid_rating_finds_off_grid_values() {
        let clean = [entry("teaching", Some(4.5), None)];
        let mixed = [
            entry("teaching", Some(4.5), None),
            entry("safety", Some(3.7), None),
        ];
        assert_eq!(invalid_rating(&mixed), Some(3.7));
        assert_eq!(invalid_rating(&clean), None);
    }

    #[test]
    fn has_rating_ignores_comment_only_entries() {
        let rated = [entry("teaching", Some(4.0), None)];
        let unrated = [entry("teaching", None, Some("no stars"))];
        assert!(has_rating(&rated));
        assert!(!has_rating(&unrated));
    }
}
