//! Per-section rating averages.

use std::collections::BTreeMap;

use super::rolling::round2;

/// A section rating attached to a review, as fetched from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRating {
    /// Rating dimension key, e.g. `"teaching"`.
    pub section_key: String,
    /// Rating in half steps from 1.0 to 5.0, when the reviewer rated
    /// this section.
    pub rating: Option<f64>,
}

/// Average rating for one section across a set of reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAverage {
    /// Rating dimension key.
    pub section_key: String,
    /// Arithmetic mean of the non-null ratings, rounded to two decimals.
    pub avg_rating: f64,
    /// Number of ratings behind the mean.
    pub count: u64,
}

/// Averages ratings per section key.
///
/// Null ratings are excluded from both the sum and the count, and a
/// section whose every rating is null produces no entry at all — an
/// unrated section is absent, not reported as 0.0. Output is sorted by
/// section key.
#[must_use]
pub fn section_averages(ratings: &[SectionRating]) -> Vec<SectionAverage> {
    let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for entry in ratings {
        let Some(rating) = entry.rating else {
            continue;
        };
        let slot = sums.entry(entry.section_key.as_str()).or_insert((0.0, 0));
        slot.0 += rating;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| {
            #[allow(clippy::cast_precision_loss)]
            let avg_rating = round2(sum / count as f64);
            SectionAverage {
                section_key: key.to_string(),
                avg_rating,
                count,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn rating(key: &str, value: Option<f64>) -> SectionRating {
        SectionRating {
            section_key: key.to_string(),
            rating: value,
        }
    }

    #[test]
    fn null_ratings_are_excluded_from_sum_and_count() {
        let ratings = [
            rating("teaching", Some(4.0)),
            rating("teaching", None),
            rating("teaching", Some(2.0)),
        ];
        let averages = section_averages(&ratings);
        assert_eq!(
            averages,
            vec![SectionAverage {
                section_key: "teaching".to_string(),
                avg_rating: 3.0,
                count: 2,
            }]
        );
    }

    #[test]
    fn all_null_sections_produce_no_entry() {
        let ratings = [rating("safety", None), rating("safety", None)];
        assert!(section_averages(&ratings).is_empty());
    }

    #[test]
    fn output_is_sorted_by_key() {
        let ratings = [
            rating("safety", Some(5.0)),
            rating("facilities", Some(3.5)),
            rating("teaching", Some(4.5)),
        ];
        let keys: Vec<String> = section_averages(&ratings)
            .into_iter()
            .map(|avg| avg.section_key)
            .collect();
        assert_eq!(keys, vec!["facilities", "safety", "teaching"]);
    }

    #[test]
    fn means_are_rounded_to_two_decimals() {
        let ratings = [
            rating("leadership", Some(4.0)),
            rating("leadership", Some(4.5)),
            rating("leadership", Some(4.5)),
        ];
        let averages = section_averages(&ratings);
        let Some(first) = averages.first() else {
            panic!("one section expected");
        };
        assert_eq!(first.avg_rating, 4.33);
        assert_eq!(first.count, 3);
    }
}
