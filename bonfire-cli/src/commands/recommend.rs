//! `bonfire recommend ...`: the similar-games view and friend picks.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_lib::{CACHE_KEY, FileStorage, RecommendationView, SessionStorage};

use crate::app::App;
use crate::error::CliError;

use super::display::{log_empty, log_game_line, log_heading};

/// Print both result lists of a searched view.
pub(crate) fn log_view(view: &RecommendationView) {
    let Some(game_id) = view.selected_game.as_deref() else {
        log_empty("No game selected.");
        return;
    };
    let title = view.selected().map_or(game_id, |g| g.title.as_str());
    log_heading(&format!("Because you looked at {}", title));

    log::info!("");
    log::info!("  {}", "Players also bought".if_supports_color(Stdout, |t| t.cyan()));
    if view.recommendations.is_empty() {
        log_empty("    No matches.");
    }
    for rec in &view.recommendations {
        log_game_line(&rec.game, None);
        log::info!(
            "      {} common owner(s){}",
            rec.common_owners,
            if rec.owner_names.is_empty() {
                String::new()
            } else {
                format!(": {}", rec.owner_names.join(", "))
            },
        );
    }

    log::info!("");
    log::info!("  {}", "Similar tags".if_supports_color(Stdout, |t| t.cyan()));
    if view.tag_recommendations.is_empty() {
        log_empty("    No matches.");
    }
    for rec in &view.tag_recommendations {
        log_game_line(&rec.game, None);
        log::info!(
            "      {} shared tag(s): {}",
            rec.common_tags,
            rec.shared_tags.join(", ").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Show games similar to `game_id`, reusing the cached result when it is
/// for the same game and still valid.
pub(crate) fn run_recommend_similar(app: &App, game_id: &str, fresh: bool) -> Result<(), CliError> {
    let mut storage = FileStorage::default_location()?;
    if fresh {
        storage.remove(CACHE_KEY)?;
    }

    let view = app.run("Loading recommendations...", async {
        let mut view = RecommendationView::mount(&app.client, &mut storage).await;
        if view.searched && view.selected_game.as_deref() == Some(game_id) {
            log::debug!("Using cached recommendations for {}", game_id);
            return Ok(view);
        }
        if !view.games.iter().any(|g| g.id == game_id) {
            return Err(CliError::not_found(format!("game {}", game_id)));
        }
        view.select(game_id);
        view.search(&app.client, &mut storage).await;
        Ok(view)
    })?;

    log_view(&view);
    Ok(())
}

/// Show the cached search without contacting the similarity endpoints.
pub(crate) fn run_recommend_last(app: &App) -> Result<(), CliError> {
    let mut storage = FileStorage::default_location()?;
    let view = app.run(
        "Loading catalog...",
        RecommendationView::mount(&app.client, &mut storage),
    );
    if view.searched {
        log_view(&view);
    } else {
        log_empty("No cached recommendations. Run 'bonfire recommend similar <game-id>'.");
    }
    Ok(())
}

pub(crate) fn run_recommend_friends(app: &App, user_id: &str, limit: u32) -> Result<(), CliError> {
    let picks = app.run(
        "Asking your friends...",
        app.client.friend_recommendations(user_id, limit),
    )?;
    log_heading("Your friends play");
    if picks.is_empty() {
        log_empty("No recommendations from friends yet.");
    }
    for pick in &picks {
        log_game_line(&pick.game, None);
        let reason = &pick.recommendation;
        log::info!(
            "      {}{}",
            reason.reason,
            if reason.friends_who_own.is_empty() {
                String::new()
            } else {
                format!(" ({})", reason.friends_who_own.join(", "))
            }
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
