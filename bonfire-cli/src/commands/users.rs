//! `bonfire users ...` and `bonfire purchases`.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_api::LIST_LIMIT;
use bonfire_core::{Game, UserForm};
use bonfire_lib::history::{HistoryEntry, UNKNOWN_GAME, total_spent};
use bonfire_lib::purchase_history;

use crate::app::App;
use crate::error::CliError;

use super::display::{
    format_money, log_done, log_empty, log_game_line, log_heading, log_user_detail, log_user_line,
};

pub(crate) fn run_users_list(app: &App, limit: u32) -> Result<(), CliError> {
    let users = app.run("Loading users...", app.client.list_users(limit))?;
    log_heading("Users");
    if users.is_empty() {
        log_empty("No users.");
    }
    for user in &users {
        log_user_line(user);
    }
    Ok(())
}

pub(crate) fn run_users_show(app: &App, id: &str) -> Result<(), CliError> {
    let user = app.run("Loading user...", app.client.get_user(id))?;
    log_user_detail(&user);
    Ok(())
}

pub(crate) fn run_users_create(app: &App, form: UserForm) -> Result<(), CliError> {
    let new = form.validate()?;
    let user = app.run("Creating user...", app.client.create_user(&new))?;
    log_done(&format!(
        "Created user {} ({}) with {}",
        user.username,
        user.id,
        format_money(user.wallet_balance)
    ));
    Ok(())
}

pub(crate) fn run_users_delete(app: &App, id: &str) -> Result<(), CliError> {
    let ack = app.run("Deleting user...", app.client.delete_user(id))?;
    log_done(&ack.message);
    Ok(())
}

pub(crate) fn run_users_library(app: &App, id: &str) -> Result<(), CliError> {
    let games = app.run("Loading library...", app.client.user_library(id))?;
    log_heading(&format!("Library ({} games)", games.len()));
    if games.is_empty() {
        log_empty("No games owned.");
    }
    for game in &games {
        log_game_line(game, None);
    }
    Ok(())
}

pub(crate) fn run_users_friends(app: &App, id: &str) -> Result<(), CliError> {
    let friends = app.run("Loading friends...", app.client.user_friends(id))?;
    log_heading(&format!("Friends ({})", friends.len()));
    if friends.is_empty() {
        log_empty("No friends yet.");
    }
    for friend in &friends {
        log_user_line(friend);
    }
    Ok(())
}

pub(crate) fn log_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        log_empty("No purchases yet.");
        return;
    }
    for entry in entries {
        log::info!(
            "  {}  {}  {}",
            entry
                .date
                .as_deref()
                .unwrap_or("--.--.----")
                .if_supports_color(Stdout, |t| t.dimmed()),
            entry.title.if_supports_color(Stdout, |t| t.bold()),
            format_money(entry.total),
        );
    }
    log::info!("");
    log::info!(
        "  {} purchase(s), {} spent",
        entries.len(),
        format_money(total_spent(entries))
    );
}

pub(crate) fn run_users_history(app: &App, id: &str) -> Result<(), CliError> {
    let (user, purchases, games) = app.run("Loading purchase history...", async {
        futures::try_join!(
            app.client.get_user(id),
            app.client.list_purchases(LIST_LIMIT),
            app.client.list_games(LIST_LIMIT),
        )
    })?;
    log_heading(&format!("Purchase history of {}", user.name()));
    log_history(&purchase_history(&purchases, &games, &user.id));
    Ok(())
}

fn title_of<'a>(games: &'a [Game], id: &str) -> &'a str {
    games
        .iter()
        .find(|g| g.id == id)
        .map_or(UNKNOWN_GAME, |g| g.title.as_str())
}

/// The raw purchase log, newest last as the backend returns it.
pub(crate) fn run_purchases_list(app: &App, user: Option<&str>, limit: u32) -> Result<(), CliError> {
    let (purchases, games) = app.run("Loading purchases...", async {
        futures::try_join!(
            app.client.list_purchases(limit),
            app.client.list_games(LIST_LIMIT)
        )
    })?;
    let purchases: Vec<_> = purchases
        .into_iter()
        .filter(|p| user.is_none_or(|u| p.user_id == u))
        .collect();

    log_heading(&format!("Purchases ({})", purchases.len()));
    if purchases.is_empty() {
        log_empty("No purchases.");
    }
    for p in &purchases {
        log::info!(
            "  {} {}  {}  user {}  {}",
            p.id.if_supports_color(Stdout, |t| t.dimmed()),
            title_of(&games, &p.game_id).if_supports_color(Stdout, |t| t.bold()),
            format_money(p.price_paid),
            p.user_id,
            p.purchased_at
                .as_deref()
                .unwrap_or("")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
