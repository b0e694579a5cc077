//! Catalog filtering.
//!
//! Filtering is pure: the caller passes the fetched catalog, the session's
//! [`FilterState`] and today's date, and gets back the visible subset in
//! catalog order.

use std::collections::HashMap;

use bonfire_core::{Game, GenreFilter, Publisher, is_free_to_play, is_pre_order};
use chrono::NaiveDate;

/// Active genre, publisher and search query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub active_genre: Option<GenreFilter>,
    pub active_publisher: Option<String>,
    /// Empty means no search.
    pub search_query: String,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.active_genre.is_none()
            && self.active_publisher.is_none()
            && self.search_query.is_empty()
    }

    /// True when a genre or publisher is selected. The search query alone
    /// does not count; the storefront still shows its featured sections.
    pub fn has_selection(&self) -> bool {
        self.active_genre.is_some() || self.active_publisher.is_some()
    }

    /// Headline for the current selection, e.g. `"RPG"` or `"Ubisoft"`.
    pub fn label(&self) -> Option<String> {
        self.active_genre
            .as_ref()
            .map(|g| g.label().to_string())
            .or_else(|| self.active_publisher.clone())
    }
}

/// A catalog entry with its publisher name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedGame {
    pub game: Game,
    pub publisher_name: Option<String>,
}

/// Join each game's `publisher_id` against the publisher list.
///
/// Unknown or missing publisher ids leave `publisher_name` empty.
pub fn enrich_with_publishers(games: Vec<Game>, publishers: &[Publisher]) -> Vec<ListedGame> {
    let names: HashMap<&str, &str> = publishers
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    games
        .into_iter()
        .map(|game| {
            let publisher_name = game
                .publisher_id
                .as_deref()
                .and_then(|id| names.get(id))
                .map(|n| n.to_string());
            ListedGame {
                game,
                publisher_name,
            }
        })
        .collect()
}

/// Whether `game` belongs to `genre`.
///
/// The pseudo-genres are resolved by price and release date; every other
/// label must be one of the game's tags.
pub fn matches_genre(game: &Game, genre: &GenreFilter, today: NaiveDate) -> bool {
    match genre {
        GenreFilter::FreeToPlay => is_free_to_play(game),
        GenreFilter::PreOrder => is_pre_order(game, today),
        GenreFilter::Tag(tag) => game.has_tag(tag),
    }
}

/// Case-insensitive substring match on title or description.
pub fn matches_search(game: &Game, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    game.title.to_lowercase().contains(&needle)
        || game
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

fn is_visible(entry: &ListedGame, filters: &FilterState, today: NaiveDate) -> bool {
    let genre_ok = filters
        .active_genre
        .as_ref()
        .is_none_or(|g| matches_genre(&entry.game, g, today));
    let publisher_ok = filters
        .active_publisher
        .as_deref()
        .is_none_or(|p| entry.publisher_name.as_deref() == Some(p));
    genre_ok && publisher_ok && matches_search(&entry.game, &filters.search_query)
}

/// Filter an already enriched catalog. Order is preserved.
pub fn filter_listed<'a>(
    catalog: &'a [ListedGame],
    filters: &FilterState,
    today: NaiveDate,
) -> Vec<&'a ListedGame> {
    catalog
        .iter()
        .filter(|entry| is_visible(entry, filters, today))
        .collect()
}

/// Resolve publisher names, then keep the games every active filter accepts.
pub fn visible_games(
    catalog: &[Game],
    filters: &FilterState,
    publishers: &[Publisher],
    today: NaiveDate,
) -> Vec<ListedGame> {
    enrich_with_publishers(catalog.to_vec(), publishers)
        .into_iter()
        .filter(|entry| is_visible(entry, filters, today))
        .collect()
}

/// The storefront's extra sections, shown only without a genre or publisher
/// selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedSections<'a> {
    /// Free games among the visible ones.
    pub free_to_play: Vec<&'a ListedGame>,
    /// Unreleased games from the whole catalog, ignoring the search.
    pub pre_orders: Vec<&'a ListedGame>,
}

pub fn featured_sections<'a>(
    catalog: &'a [ListedGame],
    filters: &FilterState,
    today: NaiveDate,
) -> Option<FeaturedSections<'a>> {
    if filters.has_selection() {
        return None;
    }
    let free_to_play = filter_listed(catalog, filters, today)
        .into_iter()
        .filter(|e| is_free_to_play(&e.game))
        .collect();
    let pre_orders = catalog
        .iter()
        .filter(|e| is_pre_order(&e.game, today))
        .collect();
    Some(FeaturedSections {
        free_to_play,
        pre_orders,
    })
}

/// Distinct publisher names that appear in the catalog, sorted.
pub fn catalog_publishers(catalog: &[ListedGame]) -> Vec<&str> {
    let mut names: Vec<&str> = catalog
        .iter()
        .filter_map(|e| e.publisher_name.as_deref())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
