//! `bonfire games ...` and `bonfire genres`.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_api::LIST_LIMIT;
use bonfire_core::{
    GameChanges, GameForm, GenreFilter, Publisher, PublisherChoice, Variant,
    mask_release_date_input, parse_money, parse_release_date, today,
};
use bonfire_lib::filter::matches_genre;
use bonfire_lib::{
    FilterState, ListedGame, ReviewStats, enrich_with_publishers, featured_sections,
    filter_listed,
};

use crate::app::App;
use crate::cli_types::{GameFields, GameFilterArgs, GameUpdateFields};
use crate::error::CliError;

use super::display::{
    format_price, log_done, log_empty, log_game_detail, log_game_line, log_heading, log_listed,
};

/// Parse a genre label, rejecting pseudo-genres the variant does not offer.
pub(crate) fn parse_genre(raw: &str, variant: Variant) -> Result<GenreFilter, CliError> {
    let Ok(genre) = raw.parse::<GenreFilter>();
    if genre.is_pseudo() && !variant.has_pseudo_genres() {
        return Err(CliError::usage(format!(
            "The {} storefront has no '{}' filter",
            variant.display_name(),
            genre
        )));
    }
    Ok(genre)
}

/// Turn command-line filter flags into a filter state for `variant`.
pub(crate) fn filter_state(args: &GameFilterArgs, variant: Variant) -> Result<FilterState, CliError> {
    let active_genre = match args.genre.as_deref() {
        Some(raw) => Some(parse_genre(raw, variant)?),
        None => None,
    };
    Ok(FilterState {
        active_genre,
        active_publisher: args.publisher.clone(),
        search_query: args.search.clone().unwrap_or_default(),
    })
}

pub(crate) fn publisher_name<'a>(publishers: &'a [Publisher], id: Option<&str>) -> Option<&'a str> {
    let id = id?;
    publishers
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
}

/// List the catalog with the storefront's filters applied.
pub(crate) fn run_games_list(app: &App, args: GameFilterArgs, limit: u32) -> Result<(), CliError> {
    let filters = filter_state(&args, app.variant)?;
    let (games, publishers) = app.run(
        "Loading catalog...",
        async { futures::try_join!(app.client.list_games(limit), app.client.list_publishers()) },
    )?;

    let catalog = enrich_with_publishers(games, &publishers);
    log_catalog(app.variant, &catalog, &filters);
    Ok(())
}

/// Print the storefront page for `filters`: the featured sections when the
/// variant has them and nothing is selected, then the filtered catalog.
pub(crate) fn log_catalog(variant: Variant, catalog: &[ListedGame], filters: &FilterState) {
    let today = today();
    let visible = filter_listed(catalog, filters, today);

    log::info!(
        "{} {}",
        variant.display_name().if_supports_color(Stdout, |t| t.bold()),
        filters
            .label()
            .unwrap_or_else(|| "All games".to_string())
            .if_supports_color(Stdout, |t| t.cyan()),
    );

    if variant.has_pseudo_genres() {
        if let Some(featured) = featured_sections(catalog, filters, today) {
            if !featured.free_to_play.is_empty() {
                log::info!("");
                log_heading("Free to Play");
                log_listed(&featured.free_to_play);
            }
            if !featured.pre_orders.is_empty() {
                log::info!("");
                log_heading("Pre-Orders");
                log_listed(&featured.pre_orders);
            }
            log::info!("");
            log_heading("Catalog");
        }
    }

    if visible.is_empty() {
        log_empty("No games match the current filters.");
    } else {
        log_listed(&visible);
    }
    log::info!("");
    log::info!("{} of {} games", visible.len(), catalog.len());
}

pub(crate) fn run_games_show(app: &App, id: &str) -> Result<(), CliError> {
    let (game, publishers, reviews) = app.run("Loading game...", async {
        futures::try_join!(
            app.client.get_game(id),
            app.client.list_publishers(),
            app.client.list_reviews(LIST_LIMIT),
        )
    })?;

    log_game_detail(&game, publisher_name(&publishers, game.publisher_id.as_deref()));

    let reviews: Vec<_> = reviews.into_iter().filter(|r| r.game_id == game.id).collect();
    let stats = ReviewStats::of(&reviews);
    log::info!("");
    log::info!(
        "  Reviews: {} ({} recommended, {} not), average {}",
        stats.total,
        stats.recommended,
        stats.not_recommended,
        stats.average_label(),
    );
    Ok(())
}

pub(crate) fn run_games_top(app: &App, limit: u32) -> Result<(), CliError> {
    let games = app.run("Loading top rated games...", app.client.top_rated_games(limit))?;
    log_heading("Top rated");
    if games.is_empty() {
        log_empty("No rated games yet.");
    }
    for game in &games {
        log_game_line(game, None);
    }
    Ok(())
}

pub(crate) fn run_games_also_bought(app: &App, id: &str, limit: u32) -> Result<(), CliError> {
    let picks = app.run("Loading purchases...", app.client.also_bought(id, limit))?;
    log_heading("Players who bought this also bought");
    if picks.is_empty() {
        log_empty("Nothing yet.");
    }
    for pick in &picks {
        log_game_line(&pick.game, None);
        log::info!(
            "      {} common owner(s): {}",
            pick.common_owners,
            pick.owner_names.join(", ").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Build the create form from flags. The release date goes through the
/// same input mask the editor applies while typing.
pub(crate) fn game_form(fields: GameFields) -> GameForm {
    let publisher = match (fields.publisher_id, fields.new_publisher) {
        (Some(id), _) => PublisherChoice::Existing(id),
        (None, Some(name)) => PublisherChoice::New(name),
        (None, None) => PublisherChoice::None,
    };
    GameForm {
        title: fields.title,
        description: fields.description,
        price: fields.price,
        release_date: mask_release_date_input(&fields.release_date),
        publisher,
        cover_url: fields.cover_url,
        platforms: fields.platforms,
        tag_names: fields
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

pub(crate) fn run_games_create(app: &App, fields: GameFields) -> Result<(), CliError> {
    let valid = game_form(fields).validate()?;
    let mut new_game = valid.game;

    let game = app.run("Creating game...", async {
        if let Some(publisher) = &valid.new_publisher {
            let created = app.client.create_publisher(publisher).await?;
            log::debug!("Created publisher {} ({})", created.name, created.id);
            new_game.publisher_id = Some(created.id);
        }
        app.client.create_game(&new_game).await
    })?;

    log_done(&format!(
        "Created {} ({}) at {}",
        game.title.if_supports_color(Stdout, |t| t.bold()),
        game.id,
        format_price(game.price),
    ));
    Ok(())
}

/// Price as typed in an edit. Zero makes the game free.
fn parse_price(raw: &str) -> Option<f64> {
    parse_money(raw).filter(|price| *price >= 0.0)
}

pub(crate) fn game_changes(fields: GameUpdateFields) -> Result<GameChanges, CliError> {
    let price = match fields.price.as_deref() {
        Some(raw) => Some(
            parse_price(raw).ok_or_else(|| CliError::usage(format!("Invalid price '{}'", raw)))?,
        ),
        None => None,
    };
    let release_date = match fields.release_date {
        Some(raw) => {
            let masked = mask_release_date_input(&raw);
            if !masked.trim().is_empty() && parse_release_date(&masked).is_none() {
                log::warn!("'{}' is not a date the storefront can read", raw);
            }
            Some(masked)
        }
        None => None,
    };
    Ok(GameChanges {
        title: fields.title,
        description: fields.description,
        price,
        release_date,
        publisher_id: fields.publisher_id,
        cover_url: fields.cover_url,
        platforms: fields.platforms.map(|p| {
            p.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }),
        tag_names: fields.tags,
    })
}

pub(crate) fn run_games_update(
    app: &App,
    id: &str,
    fields: GameUpdateFields,
) -> Result<(), CliError> {
    let changes = game_changes(fields)?;
    if changes == GameChanges::default() {
        return Err(CliError::usage("Nothing to update"));
    }
    let game = app.run("Updating game...", app.client.update_game(id, &changes))?;
    log_done(&format!("Updated {}", game.title));
    Ok(())
}

pub(crate) fn run_games_delete(app: &App, id: &str) -> Result<(), CliError> {
    let ack = app.run("Deleting game...", app.client.delete_game(id))?;
    log_done(&ack.message);
    Ok(())
}

/// Genre filters the active storefront offers.
pub(crate) fn run_genres(app: &App) -> Result<(), CliError> {
    let games = app.run("Loading catalog...", app.client.list_games(LIST_LIMIT))?;
    let genres = app.variant.genres(&games);
    log_heading(&format!("{} genres", app.variant.display_name()));
    let today = today();
    for genre in &genres {
        let count = games
            .iter()
            .filter(|g| matches_genre(g, genre, today))
            .count();
        let label = genre.label();
        log::info!(
            "  {} {}",
            if genre.is_pseudo() {
                label.if_supports_color(Stdout, |t| t.cyan()).to_string()
            } else {
                label.to_string()
            },
            format!("({})", count).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> GameFields {
        GameFields {
            title: "Celeste".to_string(),
            description: "Climb".to_string(),
            price: "".to_string(),
            release_date: "20250301".to_string(),
            publisher_id: None,
            new_publisher: Some("Maddy Makes Games".to_string()),
            cover_url: String::new(),
            platforms: "PC, Switch".to_string(),
            tags: vec!["Indie".to_string(), " ".to_string()],
        }
    }

    #[test]
    fn create_form_masks_date_and_keeps_new_publisher() {
        let valid = game_form(fields()).validate().unwrap();
        assert_eq!(valid.game.release_date.as_deref(), Some("01.03.2025"));
        assert_eq!(valid.game.price, 0.0);
        assert_eq!(valid.game.platforms, vec!["PC", "Switch"]);
        assert_eq!(valid.game.tag_names, vec!["Indie"]);
        assert_eq!(valid.new_publisher.unwrap().name, "Maddy Makes Games");
    }

    #[test]
    fn nexus_rejects_pseudo_genres() {
        let args = GameFilterArgs {
            genre: Some("free-to-play".to_string()),
            ..Default::default()
        };
        assert!(filter_state(&args, Variant::Nexus).is_err());
        let state = filter_state(&args, Variant::Bonfire).unwrap();
        assert_eq!(state.active_genre, Some(GenreFilter::FreeToPlay));
    }

    #[test]
    fn update_parses_price_with_comma() {
        let changes = game_changes(GameUpdateFields {
            title: None,
            description: None,
            price: Some("4,99".to_string()),
            release_date: None,
            publisher_id: None,
            cover_url: None,
            platforms: Some("PC,".to_string()),
            tags: None,
        })
        .unwrap();
        assert_eq!(changes.price, Some(4.99));
        assert_eq!(changes.platforms, Some(vec!["PC".to_string()]));
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-1"), None);
    }
}
