//! The "similar games" view and its session cache.
//!
//! After every search the view state is saved under [`CACHE_KEY`] so that
//! returning to the view shows the last result. On restore the snapshot is
//! checked against the live catalog: a snapshot whose selected game is gone
//! is dropped, and recommendations for deleted games are filtered out.

use std::collections::HashSet;

use bonfire_api::{ApiError, normalize_ids};
use bonfire_core::{AlsoBought, Game, TagMatch};
use serde::{Deserialize, Serialize};

use crate::backend::SimilaritySource;
use crate::sequencer::{RequestSequencer, RequestTicket};
use crate::storage::{SessionStorage, StorageError};

pub const CACHE_KEY: &str = "bonfire_recs_state";

/// Stored form of [`RecommendationView`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snapshot {
    games: Vec<Game>,
    selected_game: Option<String>,
    recommendations: Vec<AlsoBought>,
    tag_recommendations: Vec<TagMatch>,
    searched: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecommendationView {
    /// The catalog the selection is made from.
    pub games: Vec<Game>,
    pub selected_game: Option<String>,
    /// Games with the most owners in common.
    pub recommendations: Vec<AlsoBought>,
    /// Games with the most tags in common.
    pub tag_recommendations: Vec<TagMatch>,
    /// Whether a search has run for the current selection.
    pub searched: bool,
    sequencer: RequestSequencer,
}

/// An in-flight search started by [`RecommendationView::begin_search`].
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub game_id: String,
    ticket: RequestTicket,
}

/// What a search brought back. A failed lookup yields empty lists.
#[derive(Debug, Clone)]
pub struct SearchResult {
    request: SearchRequest,
    recommendations: Vec<AlsoBought>,
    tag_recommendations: Vec<TagMatch>,
}

impl SearchRequest {
    /// Run both similarity lookups.
    pub async fn fetch<S: SimilaritySource>(self, source: &S) -> SearchResult {
        let lists = async {
            let recs = source.similar(&self.game_id).await?;
            let tags = source.similar_by_tags(&self.game_id).await?;
            Ok::<_, ApiError>((recs, tags))
        }
        .await;

        let (recommendations, tag_recommendations) = lists.unwrap_or_else(|e| {
            log::warn!("Recommendation lookup for {} failed: {}", self.game_id, e);
            (Vec::new(), Vec::new())
        });
        SearchResult {
            request: self,
            recommendations,
            tag_recommendations,
        }
    }
}

impl RecommendationView {
    /// Load the catalog and restore the cached view if it is still valid.
    ///
    /// If the catalog cannot be loaded the view starts empty and the cache
    /// is left alone.
    pub async fn mount<S, St>(source: &S, storage: &mut St) -> Self
    where
        S: SimilaritySource,
        St: SessionStorage + ?Sized,
    {
        match source.catalog().await {
            Ok(catalog) => Self::restore(catalog, storage),
            Err(e) => {
                log::warn!("Could not load the catalog: {}", e);
                Self::default()
            }
        }
    }

    /// Build the view for `catalog`, restoring the cached search if its
    /// selected game still exists.
    pub fn restore<St: SessionStorage + ?Sized>(catalog: Vec<Game>, storage: &mut St) -> Self {
        let mut view = Self {
            games: catalog,
            ..Default::default()
        };

        let Some(snapshot) = read_snapshot(storage) else {
            return view;
        };

        let valid: HashSet<&str> = view.games.iter().map(|g| g.id.as_str()).collect();
        let selected = snapshot
            .selected_game
            .filter(|id| snapshot.searched && valid.contains(id.as_str()));

        let Some(selected) = selected else {
            log::debug!("Cached recommendations are stale, dropping them");
            discard(storage);
            return view;
        };

        let recommendations = snapshot
            .recommendations
            .into_iter()
            .filter(|r| valid.contains(r.game.id.as_str()))
            .collect();
        let tag_recommendations = snapshot
            .tag_recommendations
            .into_iter()
            .filter(|r| valid.contains(r.game.id.as_str()))
            .collect();

        view.selected_game = Some(selected);
        view.recommendations = recommendations;
        view.tag_recommendations = tag_recommendations;
        view.searched = true;
        view
    }

    /// Change the selection. The previous result stays until the next search.
    pub fn select(&mut self, game_id: impl Into<String>) {
        self.selected_game = Some(game_id.into());
    }

    pub fn selected(&self) -> Option<&Game> {
        let id = self.selected_game.as_deref()?;
        self.games.iter().find(|g| g.id == id)
    }

    /// Start a search for the selected game. Any search still in flight
    /// becomes stale. `None` without a selection.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        let game_id = self.selected_game.clone()?;
        self.searched = true;
        Some(SearchRequest {
            game_id,
            ticket: self.sequencer.issue(),
        })
    }

    /// Apply a finished search and save the view. Returns `false` and
    /// changes nothing if a newer search was started in the meantime.
    pub fn apply<St: SessionStorage + ?Sized>(
        &mut self,
        result: SearchResult,
        storage: &mut St,
    ) -> bool {
        if !self.sequencer.is_current(result.request.ticket) {
            log::debug!("Discarding stale results for {}", result.request.game_id);
            return false;
        }
        self.recommendations = result.recommendations;
        self.tag_recommendations = result.tag_recommendations;
        if let Err(e) = self.persist(storage) {
            log::warn!("Could not cache recommendations: {}", e);
        }
        true
    }

    /// Search for the selected game and save the result.
    pub async fn search<S, St>(&mut self, source: &S, storage: &mut St) -> bool
    where
        S: SimilaritySource,
        St: SessionStorage + ?Sized,
    {
        let Some(request) = self.begin_search() else {
            return false;
        };
        let result = request.fetch(source).await;
        self.apply(result, storage)
    }

    /// Save the view if a search has run.
    pub fn persist<St: SessionStorage + ?Sized>(&self, storage: &mut St) -> Result<(), StorageError> {
        if !self.searched {
            return Ok(());
        }
        let snapshot = Snapshot {
            games: self.games.clone(),
            selected_game: self.selected_game.clone(),
            recommendations: self.recommendations.clone(),
            tag_recommendations: self.tag_recommendations.clone(),
            searched: self.searched,
        };
        storage.set(CACHE_KEY, serde_json::to_string(&snapshot)?)
    }
}

/// Read and decode the cached snapshot. Anything unreadable is removed and
/// treated as absent.
fn read_snapshot<St: SessionStorage + ?Sized>(storage: &mut St) -> Option<Snapshot> {
    let raw = match storage.get(CACHE_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            log::debug!("Could not read cached recommendations: {}", e);
            discard(storage);
            return None;
        }
    };

    let parsed = serde_json::from_str::<serde_json::Value>(&raw).and_then(|mut value| {
        normalize_ids(&mut value);
        serde_json::from_value::<Snapshot>(value)
    });
    match parsed {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::debug!("Cached recommendations are malformed: {}", e);
            discard(storage);
            None
        }
    }
}

fn discard<St: SessionStorage + ?Sized>(storage: &mut St) {
    if let Err(e) = storage.remove(CACHE_KEY) {
        log::debug!("Could not remove cached recommendations: {}", e);
    }
}

#[cfg(test)]
#[path = "tests/recommend_tests.rs"]
mod tests;
