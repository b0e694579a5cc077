//! bonfire CLI
//!
//! Command-line storefront and admin tool for the Bonfire game store backend.

mod app;
mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;

use bonfire_core::{ReviewForm, UserForm};

use app::App;
use cli_types::*;
use commands::admin::run_seed;
use commands::config::{
    run_cache_clear, run_config_path, run_config_set_url, run_config_set_variant, run_config_show,
};
use commands::games::{
    run_games_also_bought, run_games_create, run_games_delete, run_games_list, run_games_show,
    run_games_top, run_games_update, run_genres,
};
use commands::publishers::{
    run_publishers_create, run_publishers_delete, run_publishers_list, run_publishers_update,
};
use commands::recommend::{run_recommend_friends, run_recommend_last, run_recommend_similar};
use commands::reviews::{
    review_changes, run_reviews_create, run_reviews_delete, run_reviews_list, run_reviews_update,
};
use commands::shell::run_shell;
use commands::users::{
    run_purchases_list, run_users_create, run_users_delete, run_users_friends, run_users_history,
    run_users_library, run_users_list, run_users_show,
};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Could not set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Local commands work without a reachable backend or valid URL.
    match &cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => run_config_show(cli.api_url.as_deref(), cli.variant),
                ConfigAction::Path => run_config_path(),
                ConfigAction::SetUrl { url } => run_config_set_url(url),
                ConfigAction::SetVariant { variant } => run_config_set_variant(*variant),
            };
        }
        Commands::Cache {
            action: CacheAction::Clear,
        } => return run_cache_clear(),
        _ => {}
    }

    let app = App::new(cli.api_url.as_deref(), cli.variant, cli.quiet)?;

    match cli.command {
        Commands::Games { action } => match action {
            GameAction::List { filter, limit } => run_games_list(&app, filter, limit),
            GameAction::Show { id } => run_games_show(&app, &id),
            GameAction::Top { limit } => run_games_top(&app, limit),
            GameAction::AlsoBought { id, limit } => run_games_also_bought(&app, &id, limit),
            GameAction::Create(fields) => run_games_create(&app, fields),
            GameAction::Update { id, fields } => run_games_update(&app, &id, fields),
            GameAction::Delete { id } => run_games_delete(&app, &id),
        },
        Commands::Publishers { action } => match action {
            PublisherAction::List => run_publishers_list(&app),
            PublisherAction::Create { name, fields } => run_publishers_create(&app, name, fields),
            PublisherAction::Update { id, name, fields } => {
                run_publishers_update(&app, &id, name, fields)
            }
            PublisherAction::Delete { id } => run_publishers_delete(&app, &id),
        },
        Commands::Reviews { action } => match action {
            ReviewAction::List { sort, game, limit } => {
                run_reviews_list(&app, sort, game.as_deref(), limit)
            }
            ReviewAction::Create {
                user,
                game,
                rating,
                text,
                not_recommended,
                playtime,
            } => run_reviews_create(
                &app,
                ReviewForm {
                    user_id: user,
                    game_id: game,
                    rating,
                    text,
                    recommended: !not_recommended,
                    playtime_hours: playtime,
                },
            ),
            ReviewAction::Update {
                id,
                rating,
                text,
                recommended,
                playtime,
            } => {
                let changes = review_changes(rating, text, recommended, playtime)?;
                run_reviews_update(&app, &id, changes)
            }
            ReviewAction::Delete { id } => run_reviews_delete(&app, &id),
        },
        Commands::Users { action } => match action {
            UserAction::List { limit } => run_users_list(&app, limit),
            UserAction::Show { id } => run_users_show(&app, &id),
            UserAction::Create {
                username,
                email,
                display_name,
                wallet,
            } => run_users_create(
                &app,
                UserForm {
                    username,
                    email,
                    display_name,
                    wallet_balance: wallet,
                },
            ),
            UserAction::Delete { id } => run_users_delete(&app, &id),
            UserAction::Library { id } => run_users_library(&app, &id),
            UserAction::Friends { id } => run_users_friends(&app, &id),
            UserAction::History { id } => run_users_history(&app, &id),
        },
        Commands::Purchases { user, limit } => run_purchases_list(&app, user.as_deref(), limit),
        Commands::Recommend { action } => match action {
            RecommendAction::Similar { game_id, fresh } => {
                run_recommend_similar(&app, &game_id, fresh)
            }
            RecommendAction::Last => run_recommend_last(&app),
            RecommendAction::Friends { user_id, limit } => {
                run_recommend_friends(&app, &user_id, limit)
            }
        },
        Commands::Genres => run_genres(&app),
        Commands::Seed { yes } => run_seed(&app, yes),
        Commands::Shell => run_shell(&app),
        Commands::Config { .. } | Commands::Cache { .. } => Ok(()),
    }
}
