use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_api::LIST_LIMIT;
use bonfire_core::{ReviewChanges, ReviewForm, ValidationError};
use bonfire_lib::{ReviewRow, ReviewSort, ReviewStats, join_reviews, sort_reviews};

use crate::app::App;
use crate::error::CliError;

use super::display::{log_done, log_empty, log_heading};

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
}

pub(crate) fn log_review_row(row: &ReviewRow) {
    let verdict = if row.review.recommended {
        "Recommended"
            .if_supports_color(Stdout, |t| t.green())
            .to_string()
    } else {
        "Not recommended"
            .if_supports_color(Stdout, |t| t.red())
            .to_string()
    };
    let game = if row.game.is_resolved() {
        row.game.as_str().if_supports_color(Stdout, |t| t.bold()).to_string()
    } else {
        row.game.as_str().if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!(
        "  {} {}  {}  by {}  {}",
        row.review.id.if_supports_color(Stdout, |t| t.dimmed()),
        game,
        stars(row.review.rating).if_supports_color(Stdout, |t| t.yellow()),
        row.user,
        verdict,
    );
    let mut extra = Vec::new();
    if let Some(hours) = row.review.playtime_hours {
        extra.push(format!("{:.1} h played", hours));
    }
    if let Some(created) = &row.review.created_at {
        extra.push(created.clone());
    }
    if !extra.is_empty() {
        log::info!("      {}", extra.join(" | ").if_supports_color(Stdout, |t| t.dimmed()));
    }
    if let Some(text) = row.review.text.as_deref().filter(|t| !t.is_empty()) {
        log::info!("      \"{}\"", text);
    }
}

pub(crate) fn run_reviews_list(
    app: &App,
    sort: ReviewSort,
    game: Option<&str>,
    limit: u32,
) -> Result<(), CliError> {
    let (reviews, users, games) = app.run("Loading reviews...", async {
        futures::try_join!(
            app.client.list_reviews(limit),
            app.client.list_users(LIST_LIMIT),
            app.client.list_games(LIST_LIMIT),
        )
    })?;
    let reviews: Vec<_> = reviews
        .into_iter()
        .filter(|r| game.is_none_or(|id| r.game_id == id))
        .collect();

    let stats = ReviewStats::of(&reviews);
    let mut rows = join_reviews(reviews, &users, &games);
    sort_reviews(&mut rows, sort);

    log_heading(&format!("Reviews ({})", sort));
    log::info!(
        "  {} total, {} recommended, {} not recommended, average {}",
        stats.total,
        stats.recommended,
        stats.not_recommended,
        stats.average_label(),
    );
    log::info!("");
    if rows.is_empty() {
        log_empty("No reviews.");
    }
    for row in &rows {
        log_review_row(row);
    }
    Ok(())
}

pub(crate) fn run_reviews_create(app: &App, form: ReviewForm) -> Result<(), CliError> {
    let new = form.validate()?;
    let created = app.run("Posting review...", app.client.create_review(&new))?;
    log_done(&format!("Posted review {} ({})", created.id, stars(created.rating)));
    Ok(())
}

/// Edits are checked against the same rating range as new reviews.
pub(crate) fn review_changes(
    rating: Option<u8>,
    text: Option<String>,
    recommended: Option<bool>,
    playtime: Option<f64>,
) -> Result<ReviewChanges, ValidationError> {
    if let Some(r) = rating {
        if !(1..=5).contains(&r) {
            return Err(ValidationError::RatingOutOfRange(i64::from(r)));
        }
    }
    if let Some(hours) = playtime {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::invalid("playtime", "must be zero or more"));
        }
    }
    Ok(ReviewChanges {
        rating,
        text,
        recommended,
        playtime_hours: playtime,
    })
}

pub(crate) fn run_reviews_update(
    app: &App,
    id: &str,
    changes: ReviewChanges,
) -> Result<(), CliError> {
    if changes == ReviewChanges::default() {
        return Err(CliError::usage("Nothing to update"));
    }
    let updated = app.run("Updating review...", app.client.update_review(id, &changes))?;
    log_done(&format!("Updated review {}", updated.id));
    Ok(())
}

pub(crate) fn run_reviews_delete(app: &App, id: &str) -> Result<(), CliError> {
    let ack = app.run("Deleting review...", app.client.delete_review(id))?;
    log_done(&ack.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_bar() {
        assert_eq!(stars(3), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
        assert_eq!(stars(9).chars().count(), 5);
    }

    #[test]
    fn edits_are_range_checked() {
        assert_eq!(
            review_changes(Some(0), None, None, None),
            Err(ValidationError::RatingOutOfRange(0))
        );
        let changes = review_changes(Some(4), None, Some(false), None).unwrap();
        assert_eq!(changes.rating, Some(4));
        assert_eq!(changes.recommended, Some(false));
        assert!(review_changes(None, None, None, Some(-1.0)).is_err());
    }
}
