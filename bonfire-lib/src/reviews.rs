//! Review listing: joining reviews with user and game names, ordering and
//! summary statistics.

use std::cmp::Reverse;
use std::collections::HashMap;

use bonfire_core::{Game, Review, User, parse_timestamp};
use chrono::NaiveDateTime;

/// Review list orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

impl ReviewSort {
    pub fn all() -> &'static [ReviewSort] {
        &[Self::Newest, Self::Oldest, Self::Highest, Self::Lowest]
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
        }
    }
}

impl std::fmt::Display for ReviewSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSortParseError(String);

impl std::fmt::Display for ReviewSortParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown review order '{}' (expected newest, oldest, highest or lowest)",
            self.0
        )
    }
}

impl std::error::Error for ReviewSortParseError {}

impl std::str::FromStr for ReviewSort {
    type Err = ReviewSortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "highest" | "highest_rated" => Ok(Self::Highest),
            "lowest" | "lowest_rated" => Ok(Self::Lowest),
            _ => Err(ReviewSortParseError(s.to_string())),
        }
    }
}

/// A user or game reference in a review row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRef {
    /// The id was found; this is the display name or title.
    Resolved(String),
    /// The id is unknown; this is the raw id.
    Unresolved(String),
}

impl DisplayRef {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Resolved(s) | Self::Unresolved(s) => s,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl std::fmt::Display for DisplayRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub review: Review,
    pub user: DisplayRef,
    pub game: DisplayRef,
}

/// Attach user and game names to each review.
///
/// Users are shown by display name, falling back to username.
pub fn join_reviews(reviews: Vec<Review>, users: &[User], games: &[Game]) -> Vec<ReviewRow> {
    let user_names: HashMap<&str, &str> = users
        .iter()
        .map(|u| {
            let name = u
                .display_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(u.username.as_str());
            (u.id.as_str(), name)
        })
        .collect();
    let titles: HashMap<&str, &str> = games
        .iter()
        .map(|g| (g.id.as_str(), g.title.as_str()))
        .collect();

    reviews
        .into_iter()
        .map(|review| {
            let user = resolve(&user_names, &review.user_id);
            let game = resolve(&titles, &review.game_id);
            ReviewRow { review, user, game }
        })
        .collect()
}

fn resolve(names: &HashMap<&str, &str>, id: &str) -> DisplayRef {
    match names.get(id) {
        Some(name) if !name.is_empty() => DisplayRef::Resolved(name.to_string()),
        _ => DisplayRef::Unresolved(id.to_string()),
    }
}

/// Missing or unparseable timestamps sort as the earliest instant.
fn created(review: &Review) -> NaiveDateTime {
    review
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(NaiveDateTime::MIN)
}

/// Sort rows in place. The sort is stable.
pub fn sort_reviews(rows: &mut [ReviewRow], order: ReviewSort) {
    match order {
        ReviewSort::Newest => rows.sort_by_key(|r| Reverse(created(&r.review))),
        ReviewSort::Oldest => rows.sort_by_key(|r| created(&r.review)),
        ReviewSort::Highest => rows.sort_by_key(|r| Reverse(r.review.rating)),
        ReviewSort::Lowest => rows.sort_by_key(|r| r.review.rating),
    }
}

/// Mean rating rounded to one decimal, `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Counts shown above the review list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStats {
    pub total: usize,
    pub recommended: usize,
    pub not_recommended: usize,
    pub average: Option<f64>,
}

impl ReviewStats {
    pub fn of(reviews: &[Review]) -> Self {
        let recommended = reviews.iter().filter(|r| r.recommended).count();
        Self {
            total: reviews.len(),
            recommended,
            not_recommended: reviews.len() - recommended,
            average: average_rating(reviews),
        }
    }

    /// The average as shown to users, `"—"` when there are no reviews.
    pub fn average_label(&self) -> String {
        match self.average {
            Some(avg) => format!("{avg:.1}"),
            None => "—".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/reviews_tests.rs"]
mod tests;
