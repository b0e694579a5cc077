//! Shared formatting for game, user and price output.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_core::{Game, User, format_release_date, is_free_to_play, parse_release_date};
use bonfire_lib::ListedGame;

/// Price label used across the storefront.
pub(crate) fn format_price(price: f64) -> String {
    if price == 0.0 {
        "Free to Play".to_string()
    } else {
        format!("{:.2} \u{20ac}", price)
    }
}

pub(crate) fn format_money(amount: f64) -> String {
    format!("{:.2} \u{20ac}", amount)
}

/// Release date in display form, or the raw text if it does not parse.
pub(crate) fn format_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => parse_release_date(raw)
            .map(format_release_date)
            .unwrap_or_else(|| raw.to_string()),
        None => "-".to_string(),
    }
}

/// One catalog line: title, price, publisher and tags.
pub(crate) fn log_game_line(game: &Game, publisher: Option<&str>) {
    let price = format_price(game.price);
    let price = if is_free_to_play(game) {
        price.if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        price
    };
    let mut extra = Vec::new();
    if let Some(name) = publisher {
        extra.push(name.to_string());
    }
    if !game.tag_names.is_empty() {
        extra.push(game.tag_names.join(", "));
    }
    log::info!(
        "  {} {}  {}  {}",
        game.id.if_supports_color(Stdout, |t| t.dimmed()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
        price,
        extra.join(" | ").if_supports_color(Stdout, |t| t.dimmed()),
    );
}

pub(crate) fn log_listed(entries: &[&ListedGame]) {
    for entry in entries {
        log_game_line(&entry.game, entry.publisher_name.as_deref());
    }
}

/// Full detail block for one game.
pub(crate) fn log_game_detail(game: &Game, publisher: Option<&str>) {
    log::info!("{}", game.title.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Id:        {}", game.id);
    log::info!("  Price:     {}", format_price(game.price));
    log::info!("  Released:  {}", format_date(game.release_date.as_deref()));
    if let Some(name) = publisher {
        log::info!("  Publisher: {}", name);
    }
    if !game.platforms.is_empty() {
        log::info!("  Platforms: {}", game.platforms.join(", "));
    }
    if !game.tag_names.is_empty() {
        log::info!(
            "  Tags:      {}",
            game.tag_names.join(", ").if_supports_color(Stdout, |t| t.cyan())
        );
    }
    if let Some(req) = &game.min_requirements {
        log::info!("  Requires:  {}", req);
    }
    if let Some(desc) = &game.description {
        log::info!("");
        log::info!("  {}", desc);
    }
}

pub(crate) fn log_user_line(user: &User) {
    log::info!(
        "  {} {} ({})  {}",
        user.id.if_supports_color(Stdout, |t| t.dimmed()),
        user.name().if_supports_color(Stdout, |t| t.bold()),
        user.username,
        format_money(user.wallet_balance),
    );
}

pub(crate) fn log_user_detail(user: &User) {
    log::info!("{}", user.name().if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Id:       {}", user.id);
    log::info!("  Username: {}", user.username);
    log::info!("  Email:    {}", user.email);
    log::info!("  Wallet:   {}", format_money(user.wallet_balance));
    if let Some(address) = &user.address {
        log::info!(
            "  Address:  {}, {} {}, {}",
            address.street,
            address.zip,
            address.city,
            address.country
        );
    }
    for pm in &user.payment_methods {
        log::info!("  Payment:  #{} {}", pm.id, pm.name);
    }
}

pub(crate) fn log_heading(text: &str) {
    log::info!("{}", text.if_supports_color(Stdout, |t| t.bold()));
}

pub(crate) fn log_empty(text: &str) {
    log::info!("{}", text.if_supports_color(Stdout, |t| t.dimmed()));
}

pub(crate) fn log_done(text: &str) {
    log::info!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        text
    );
}
