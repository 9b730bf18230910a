use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_REVIEWS: &str = include_str!("../../data/reviews.json");

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("review comment is empty")]
    EmptyComment,
    #[error("failed to parse reviews: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub court_id: u32,
    pub user: String,
    pub rating: u8,
    pub date: NaiveDate,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn is_ready(&self) -> bool {
        (1..=5).contains(&self.rating) && !self.comment.trim().is_empty()
    }
}

/// In-memory review store. Submitted reviews live only as long as the board.
#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    reviews: Vec<Review>,
}

impl ReviewBoard {
    pub fn from_json(json: &str) -> Result<Self, ReviewError> {
        let reviews = serde_json::from_str(json)?;
        Ok(Self { reviews })
    }

    pub fn bundled() -> Result<Self, ReviewError> {
        Self::from_json(BUNDLED_REVIEWS)
    }

    pub fn for_court(&self, court_id: u32) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| review.court_id == court_id)
            .collect()
    }

    pub fn by_user(&self, user: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| review.user == user)
            .collect()
    }

    pub fn average_rating(&self, court_id: u32) -> Option<f64> {
        let ratings: Vec<_> = self
            .for_court(court_id)
            .iter()
            .map(|review| f64::from(review.rating))
            .collect();
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }

    pub fn submit(
        &mut self,
        court_id: u32,
        user: &str,
        date: NaiveDate,
        draft: ReviewDraft,
    ) -> Result<Review, ReviewError> {
        if !(1..=5).contains(&draft.rating) {
            return Err(ReviewError::RatingOutOfRange(draft.rating));
        }
        let comment = draft.comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        let id = self.reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        log::debug!("review {id} submitted for court {court_id}");
        let review = Review {
            id,
            court_id,
            user: user.to_string(),
            rating: draft.rating,
            date,
            comment: comment.to_string(),
        };
        self.reviews.push(review.clone());
        Ok(review)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    court_ids: BTreeSet<u32>,
}

impl Favorites {
    /// Returns whether the court is a favourite after the toggle.
    pub fn toggle(&mut self, court_id: u32) -> bool {
        if !self.court_ids.remove(&court_id) {
            self.court_ids.insert(court_id);
            return true;
        }
        false
    }

    pub fn contains(&self, court_id: u32) -> bool {
        self.court_ids.contains(&court_id)
    }
}
