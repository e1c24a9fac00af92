//! Per-movie rating statistics.
//!
//! Always derived from the current review set; nothing here is persisted.

use serde::{Deserialize, Serialize};

use super::models::review::Review;

/// Rating histogram with one-star-wide buckets. The top bucket is closed so a
/// perfect 5 is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    #[serde(rename = "1-2")]
    pub one_to_two: usize,
    #[serde(rename = "2-3")]
    pub two_to_three: usize,
    #[serde(rename = "3-4")]
    pub three_to_four: usize,
    #[serde(rename = "4-5")]
    pub four_to_five: usize,
}

impl RatingDistribution {
    /// Ratings outside `[1, 5]` are clamped first, so sub-1 ratings land in
    /// `1-2` and every review is counted exactly once.
    fn record(&mut self, rating: f64) {
        let rating = rating.clamp(1.0, 5.0);
        if rating < 2.0 {
            self.one_to_two += 1;
        } else if rating < 3.0 {
            self.two_to_three += 1;
        } else if rating < 4.0 {
            self.three_to_four += 1;
        } else {
            self.four_to_five += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.one_to_two + self.two_to_three + self.three_to_four + self.four_to_five
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: usize,
    /// Mean rating rounded to one decimal place; 0 when there are no reviews
    pub average_rating: f64,
    pub distribution: RatingDistribution,
}

pub fn compute_stats<'a, I>(reviews: I) -> ReviewStats
where
    I: IntoIterator<Item = &'a Review>,
{
    stats_from_ratings(reviews.into_iter().map(|review| review.rating))
}

pub fn stats_from_ratings<I>(ratings: I) -> ReviewStats
where
    I: IntoIterator<Item = f64>,
{
    let mut stats = ReviewStats::default();
    let mut sum = 0.0;

    for rating in ratings.into_iter().filter(|r| r.is_finite()) {
        stats.total_reviews += 1;
        sum += rating;
        stats.distribution.record(rating);
    }

    if stats.total_reviews > 0 {
        stats.average_rating = round_to_tenth(sum / stats.total_reviews as f64);
    }

    stats
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let stats = stats_from_ratings(Vec::<f64>::new());
        assert_eq!(stats, ReviewStats::default());
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.distribution.total(), 0);
    }

    #[test]
    fn mixed_ratings() {
        let stats = stats_from_ratings([1.5, 2.5, 3.5, 4.5, 4.9]);

        assert_eq!(stats.total_reviews, 5);
        assert_eq!(stats.average_rating, 3.4);
        assert_eq!(
            stats.distribution,
            RatingDistribution {
                one_to_two: 1,
                two_to_three: 1,
                three_to_four: 1,
                four_to_five: 2,
            }
        );
    }

    #[test]
    fn bucket_edges_are_half_open_except_the_top() {
        let stats = stats_from_ratings([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            stats.distribution,
            RatingDistribution {
                one_to_two: 1,
                two_to_three: 1,
                three_to_four: 1,
                four_to_five: 2,
            }
        );
    }

    #[test]
    fn low_ratings_are_clamped_into_first_bucket() {
        let stats = stats_from_ratings([0.0, 0.4, 0.99]);
        assert_eq!(stats.distribution.one_to_two, 3);
        assert_eq!(stats.distribution.total(), stats.total_reviews);
        // The average still reflects the stored ratings.
        assert_eq!(stats.average_rating, 0.5);
    }

    #[test]
    fn non_finite_ratings_are_ignored() {
        let stats = stats_from_ratings([f64::NAN, 3.0, f64::INFINITY]);
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.average_rating, 3.0);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        assert_eq!(stats_from_ratings([2.0, 2.0, 2.5]).average_rating, 2.2);
        assert_eq!(stats_from_ratings([4.26]).average_rating, 4.3);
    }

    #[test]
    fn serializes_with_range_keys() {
        let json = serde_json::to_value(stats_from_ratings([1.5, 4.5])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalReviews": 2,
                "averageRating": 3.0,
                "distribution": {"1-2": 1, "2-3": 0, "3-4": 0, "4-5": 1}
            })
        );
    }
}
