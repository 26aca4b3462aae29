use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Columns;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub listing_id: Uuid,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub content: Option<String>,
    pub rating: f64,
    #[serde(flatten)]
    pub extra: Columns,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub tenant_id: Uuid,
    pub content: String,
    pub rating: f64,
}

/// All reviews of a listing plus their aggregate. Computed per request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub reviews: Vec<Review>,
    pub rating: f64,
    #[serde(rename = "reviewLength")]
    pub review_length: usize,
}

impl ReviewSummary {
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        let review_length = reviews.len();
        let rating = if review_length == 0 {
            0.0
        } else {
            let total: f64 = reviews.iter().map(|r| r.rating).sum();
            round_to_cents(total / review_length as f64)
        };

        Self {
            reviews,
            rating,
            review_length,
        }
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: f64) -> Review {
        Review {
            id: Uuid::new_v4(),
            listing_id: Uuid::nil(),
            tenant_id: None,
            content: None,
            rating,
            extra: Columns::new(),
        }
    }

    #[test]
    fn test_mean_of_ratings() {
        let summary = ReviewSummary::from_reviews(vec![review(4.0), review(5.0), review(3.0)]);
        assert_eq!(summary.rating, 4.0);
        assert_eq!(summary.review_length, 3);
    }

    #[test]
    fn test_no_reviews_rates_zero() {
        let summary = ReviewSummary::from_reviews(Vec::new());
        assert_eq!(summary.rating, 0.0);
        assert_eq!(summary.review_length, 0);
    }

    #[test]
    fn test_rating_rounds_to_two_decimals() {
        let summary = ReviewSummary::from_reviews(vec![review(4.0), review(4.0), review(5.0)]);
        assert_eq!(summary.rating, 4.33);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["reviewLength"], 3);
    }
}
