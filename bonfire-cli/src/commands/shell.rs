//! Interactive storefront session.
//!
//! The shell owns one [`Session`] for its whole lifetime and re-renders in
//! response to the session's change events, the way the storefront screens
//! do. Similarity searches are cached in memory and restored on every
//! `recommend` against a freshly fetched catalog, so they behave like
//! returning to the recommendations page.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc::Receiver;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_api::{FRIEND_RECOMMENDATION_LIMIT, LIST_LIMIT};
use bonfire_core::{
    Game, GenreFilter, PasswordChange, User, UserPatch, Variant, is_pre_order, profile_changes,
    today,
};
use bonfire_lib::wallet::{self, QUICK_AMOUNTS, parse_amount};
use bonfire_lib::{
    CheckoutError, ListedGame, MemoryStorage, RecommendationView, Session, SessionEvent,
    catalog_publishers, checkout, enrich_with_publishers, purchase_history,
};

use crate::app::App;
use crate::error::CliError;

use super::display::{
    format_money, log_done, log_empty, log_game_detail, log_game_line, log_heading,
    log_user_detail,
};
use super::games::{log_catalog, parse_genre};
use super::recommend::{log_view, run_recommend_friends};
use super::users::log_history;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShellCommand {
    Help,
    Quit,
    List,
    Genres,
    /// `None` clears the genre.
    Genre(Option<String>),
    Publisher(Option<String>),
    Search(String),
    Reset,
    Show(String),
    Cart(CartOp),
    Wishlist(WishlistOp),
    Checkout,
    Funds(FundsOp),
    Login(String),
    Logout,
    Whoami,
    Profile(ProfileOp),
    Password {
        current: String,
        new: String,
        confirm: String,
    },
    Payment(PaymentOp),
    History,
    /// `None` shows the last search.
    Recommend(Option<String>),
    Friends,
    Reload,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CartOp {
    Show,
    Add(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WishlistOp {
    Show,
    Add(String),
    Remove(String),
    Toggle(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FundsOp {
    Show,
    Add(f64),
    Redeem(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProfileOp {
    Set(ProfileField, String),
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProfileField {
    DisplayName,
    Email,
    Street,
    Zip,
    City,
    Country,
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "display_name" | "display-name" => Ok(Self::DisplayName),
            "email" => Ok(Self::Email),
            "street" => Ok(Self::Street),
            "zip" => Ok(Self::Zip),
            "city" => Ok(Self::City),
            "country" => Ok(Self::Country),
            other => Err(format!(
                "unknown profile field '{other}' (name, email, street, zip, city, country)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PaymentOp {
    List,
    Add(String),
    Remove(u64),
}

const HELP: &[(&str, &str)] = &[
    ("list", "show the storefront with the current filters"),
    ("genres", "genre filters offered by this storefront"),
    ("genre <label>|off", "toggle a genre filter"),
    ("publisher <name>|off", "filter by publisher"),
    ("search [text]", "search titles and descriptions"),
    ("reset", "clear all filters"),
    ("show <id>", "game details"),
    ("cart [add|remove <id>|clear]", "shopping cart"),
    ("wishlist [add|remove|toggle <id>]", "wishlist"),
    ("checkout", "buy everything in the cart"),
    ("funds [add <amount>|redeem <code>]", "wallet"),
    ("login <id|username>", "switch user"),
    ("logout / whoami", "session user"),
    ("profile set <field> <value> | save", "edit the profile"),
    ("password <current> <new> <confirm>", "change password"),
    ("payment [add <name>|remove <id>]", "payment methods"),
    ("history", "purchase history"),
    ("recommend [<id>]", "similar games (cached)"),
    ("friends", "what your friends play"),
    ("reload", "reload catalog and purchases"),
    ("quit", "leave the shell"),
];

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest)
    }
}

fn off_or(rest: &str) -> Option<String> {
    (!rest.eq_ignore_ascii_case("off")).then(|| rest.to_string())
}

fn parse_cart(rest: &str) -> Result<CartOp, String> {
    let (op, arg) = split_word(rest);
    Ok(match op {
        "" => CartOp::Show,
        "add" => CartOp::Add(required(arg, "cart add <game-id>")?.to_string()),
        "remove" | "rm" => CartOp::Remove(required(arg, "cart remove <game-id>")?.to_string()),
        "clear" => CartOp::Clear,
        other => return Err(format!("unknown cart action '{other}'")),
    })
}

fn parse_wishlist(rest: &str) -> Result<WishlistOp, String> {
    let (op, arg) = split_word(rest);
    Ok(match op {
        "" => WishlistOp::Show,
        "add" => WishlistOp::Add(required(arg, "wishlist add <game-id>")?.to_string()),
        "remove" | "rm" => {
            WishlistOp::Remove(required(arg, "wishlist remove <game-id>")?.to_string())
        }
        "toggle" => WishlistOp::Toggle(required(arg, "wishlist toggle <game-id>")?.to_string()),
        other => return Err(format!("unknown wishlist action '{other}'")),
    })
}

fn parse_funds(rest: &str) -> Result<FundsOp, String> {
    let (op, arg) = split_word(rest);
    Ok(match op {
        "" => FundsOp::Show,
        "add" => {
            let raw = required(arg, "funds add <amount>")?;
            FundsOp::Add(parse_amount(raw).ok_or_else(|| format!("invalid amount '{raw}'"))?)
        }
        "redeem" => FundsOp::Redeem(required(arg, "funds redeem <code>")?.to_string()),
        other => return Err(format!("unknown funds action '{other}'")),
    })
}

fn parse_profile(rest: &str) -> Result<ProfileOp, String> {
    let (op, arg) = split_word(rest);
    match op {
        "save" => Ok(ProfileOp::Save),
        "set" => {
            let (field, value) = split_word(required(arg, "profile set <field> <value>")?);
            Ok(ProfileOp::Set(field.parse()?, value.to_string()))
        }
        _ => Err("usage: profile set <field> <value> | profile save".to_string()),
    }
}

fn parse_payment(rest: &str) -> Result<PaymentOp, String> {
    let (op, arg) = split_word(rest);
    Ok(match op {
        "" | "list" => PaymentOp::List,
        "add" => PaymentOp::Add(required(arg, "payment add <name>")?.to_string()),
        "remove" | "rm" => {
            let raw = required(arg, "payment remove <id>")?;
            PaymentOp::Remove(
                raw.parse()
                    .map_err(|_| format!("payment id must be a number, got '{raw}'"))?,
            )
        }
        other => return Err(format!("unknown payment action '{other}'")),
    })
}

/// Parse one non-blank input line.
pub(crate) fn parse(line: &str) -> Result<ShellCommand, String> {
    let (word, rest) = split_word(line);
    let cmd = match word.to_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "list" | "ls" => ShellCommand::List,
        "genres" => ShellCommand::Genres,
        "genre" => ShellCommand::Genre(off_or(required(rest, "genre <label>|off")?)),
        "publisher" => ShellCommand::Publisher(off_or(required(rest, "publisher <name>|off")?)),
        "search" => ShellCommand::Search(rest.to_string()),
        "reset" => ShellCommand::Reset,
        "show" => ShellCommand::Show(required(rest, "show <game-id>")?.to_string()),
        "cart" => ShellCommand::Cart(parse_cart(rest)?),
        "wishlist" | "wish" => ShellCommand::Wishlist(parse_wishlist(rest)?),
        "checkout" | "buy" => ShellCommand::Checkout,
        "funds" | "wallet" => ShellCommand::Funds(parse_funds(rest)?),
        "login" => ShellCommand::Login(required(rest, "login <user-id|username>")?.to_string()),
        "logout" => ShellCommand::Logout,
        "whoami" => ShellCommand::Whoami,
        "profile" => ShellCommand::Profile(parse_profile(rest)?),
        "password" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [current, new, confirm] => ShellCommand::Password {
                current: current.to_string(),
                new: new.to_string(),
                confirm: confirm.to_string(),
            },
            _ => return Err("usage: password <current> <new> <confirm>".to_string()),
        },
        "payment" => ShellCommand::Payment(parse_payment(rest)?),
        "history" => ShellCommand::History,
        "recommend" | "similar" => {
            ShellCommand::Recommend((!rest.is_empty()).then(|| rest.to_string()))
        }
        "friends" => ShellCommand::Friends,
        "reload" => ShellCommand::Reload,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(cmd)
}

/// Patch for one profile field. Address fields keep the rest of the
/// current address.
pub(crate) fn profile_patch(user: &User, field: ProfileField, value: &str) -> UserPatch {
    let value = value.trim().to_string();
    let mut address = user.address.clone().unwrap_or_default();
    match field {
        ProfileField::DisplayName => {
            return UserPatch {
                display_name: Some(value),
                ..Default::default()
            };
        }
        ProfileField::Email => {
            return UserPatch {
                email: Some(value),
                ..Default::default()
            };
        }
        ProfileField::Street => address.street = value,
        ProfileField::Zip => address.zip = value,
        ProfileField::City => address.city = value,
        ProfileField::Country => address.country = value,
    }
    UserPatch {
        address: Some(address),
        ..Default::default()
    }
}

/// Apply a genre pick the way the variant's genre menu does. Bonfire's
/// dropdown drops the publisher filter; Nexus only toggles the genre.
pub(crate) fn pick_genre(session: &mut Session, variant: Variant, genre: GenreFilter) {
    match variant {
        Variant::Bonfire => session.select_genre_exclusive(genre),
        Variant::Nexus => session.set_active_genre(Some(genre)),
    }
}

/// Events in arrival order with repeats removed.
pub(crate) fn distinct_events(events: impl IntoIterator<Item = SessionEvent>) -> Vec<SessionEvent> {
    let mut seen = Vec::new();
    for event in events {
        if !seen.contains(&event) {
            seen.push(event);
        }
    }
    seen
}

struct Shell<'a> {
    app: &'a App,
    session: Session,
    events: Receiver<SessionEvent>,
    storage: MemoryStorage,
    catalog: Vec<ListedGame>,
}

impl<'a> Shell<'a> {
    fn start(app: &'a App) -> Self {
        let mut session = app.run("Starting session...", Session::initialize(&app.client));
        let events = session.subscribe();
        let mut shell = Self {
            app,
            session,
            events,
            storage: MemoryStorage::new(),
            catalog: Vec::new(),
        };
        shell.reload();
        shell.events.try_iter().for_each(drop);
        shell
    }

    fn reload(&mut self) {
        let app = self.app;
        match app.run("Loading catalog...", async {
            futures::try_join!(app.client.list_games(LIST_LIMIT), app.client.list_publishers())
        }) {
            Ok((games, publishers)) => self.catalog = enrich_with_publishers(games, &publishers),
            Err(e) => log::warn!("Could not load the catalog: {}", e),
        }
        if self.session.is_logged_in() {
            let refreshed = app.run(
                "Loading purchases...",
                self.session.refresh_purchases(&app.client),
            );
            if let Err(e) = refreshed {
                log::warn!("Could not load purchases: {}", e);
            }
        }
    }

    fn games(&self) -> Vec<Game> {
        self.catalog.iter().map(|e| e.game.clone()).collect()
    }

    fn find(&self, id: &str) -> Result<&ListedGame, CliError> {
        self.catalog
            .iter()
            .find(|e| e.game.id == id)
            .ok_or_else(|| CliError::not_found(format!("game {}", id)))
    }

    fn user(&self) -> Result<&User, CliError> {
        self.session
            .current_user()
            .ok_or_else(|| CliError::usage("Not logged in. Use 'login <user>'."))
    }

    fn prompt(&self) -> String {
        let who = self.session.current_user().map_or("-", |u| u.name());
        format!("{}:{}> ", self.app.variant.short_name(), who)
    }

    fn execute(&mut self, cmd: ShellCommand) -> Result<(), CliError> {
        let app = self.app;
        match cmd {
            ShellCommand::Help => {
                log_heading("Commands");
                for (usage, what) in HELP {
                    log::info!(
                        "  {:<38} {}",
                        usage.if_supports_color(Stdout, |t| t.cyan()),
                        what
                    );
                }
            }
            ShellCommand::Quit => {}
            ShellCommand::List => log_catalog(app.variant, &self.catalog, self.session.filters()),
            ShellCommand::Genres => {
                let active = self.session.filters().active_genre.clone();
                log_heading(&format!("{} genres", app.variant.display_name()));
                for genre in app.variant.genres(&self.games()) {
                    let marker = if active.as_ref() == Some(&genre) { "*" } else { " " };
                    log::info!("  {} {}", marker, genre);
                }
            }
            ShellCommand::Genre(None) => self.session.set_active_genre(None),
            ShellCommand::Genre(Some(label)) => {
                let genre = match parse_genre(&label, app.variant)? {
                    GenreFilter::Tag(tag) => app
                        .variant
                        .genres(&self.games())
                        .into_iter()
                        .find(|g| g.label().eq_ignore_ascii_case(&tag))
                        .unwrap_or(GenreFilter::Tag(tag)),
                    pseudo => pseudo,
                };
                pick_genre(&mut self.session, app.variant, genre);
            }
            ShellCommand::Publisher(None) => self.session.set_active_publisher(None),
            ShellCommand::Publisher(Some(name)) => {
                let publishers = catalog_publishers(&self.catalog);
                let found = publishers
                    .iter()
                    .find(|p| p.eq_ignore_ascii_case(&name))
                    .map(|p| p.to_string())
                    .ok_or_else(|| {
                        CliError::not_found(format!(
                            "publisher '{}' (known: {})",
                            name,
                            publishers.join(", ")
                        ))
                    })?;
                self.session.set_active_publisher(Some(found));
            }
            ShellCommand::Search(text) => self.session.set_search_query(text),
            ShellCommand::Reset => self.session.reset_filters(),
            ShellCommand::Show(id) => {
                let entry = self.find(&id)?;
                log_game_detail(&entry.game, entry.publisher_name.as_deref());
                let mut flags = Vec::new();
                if self.session.is_purchased(&id) {
                    flags.push("owned");
                }
                if self.session.is_in_cart(&id) {
                    flags.push("in cart");
                }
                if self.session.is_in_wishlist(&id) {
                    flags.push("on wishlist");
                }
                if is_pre_order(&entry.game, today()) {
                    flags.push("pre-order");
                }
                if !flags.is_empty() {
                    log::info!("  [{}]", flags.join(", ").if_supports_color(Stdout, |t| t.cyan()));
                }
            }
            ShellCommand::Cart(op) => self.cart(op)?,
            ShellCommand::Wishlist(op) => self.wishlist(op)?,
            ShellCommand::Checkout => {
                let summary = app
                    .run("Checking out...", checkout(&mut self.session, &app.client))
                    .inspect_err(|e| {
                        if let CheckoutError::Api { completed, .. } = e {
                            if !completed.is_empty() {
                                log::warn!("Already bought: {}", completed.join(", "));
                            }
                        }
                    })?;
                log_done(&format!("Bought {}", summary.games.join(", ")));
                log::info!(
                    "  Paid {}, wallet now {}",
                    format_money(summary.total),
                    format_money(summary.new_balance)
                );
            }
            ShellCommand::Funds(op) => self.funds(op)?,
            ShellCommand::Login(who) => {
                let users = app.run("Loading users...", app.client.list_users(LIST_LIMIT))?;
                let user = users
                    .into_iter()
                    .find(|u| u.id == who || u.username.eq_ignore_ascii_case(&who))
                    .ok_or_else(|| CliError::not_found(format!("user {}", who)))?;
                self.session.login_as(user);
                let refreshed = app.run(
                    "Loading purchases...",
                    self.session.refresh_purchases(&app.client),
                );
                if let Err(e) = refreshed {
                    log::warn!("Could not load purchases: {}", e);
                }
            }
            ShellCommand::Logout => self.session.logout(),
            ShellCommand::Whoami => match self.session.current_user() {
                Some(user) => log_user_detail(user),
                None => log_empty("Not logged in."),
            },
            ShellCommand::Profile(ProfileOp::Set(field, value)) => {
                let patch = profile_patch(self.user()?, field, &value);
                self.session.update_user(patch);
            }
            ShellCommand::Profile(ProfileOp::Save) => {
                let user = self.user()?.clone();
                if user.is_guest() {
                    return Err(CliError::usage("The guest profile only exists locally"));
                }
                let changes = profile_changes(
                    user.display_name.as_deref().unwrap_or(""),
                    &user.email,
                    user.address.clone().unwrap_or_default(),
                );
                let saved = app.run(
                    "Saving profile...",
                    app.client.update_user(&user.id, &changes),
                )?;
                log_done(&format!("Profile of {} saved", saved.name()));
            }
            ShellCommand::Password {
                current,
                new,
                confirm,
            } => {
                self.user()?;
                PasswordChange {
                    current,
                    new,
                    confirm,
                }
                .validate()?;
                log_done("Password changed");
            }
            ShellCommand::Payment(op) => self.payment(op)?,
            ShellCommand::History => {
                let user_id = self.user()?.id.clone();
                let purchases =
                    app.run("Loading purchases...", app.client.list_purchases(LIST_LIMIT))?;
                log_heading("Purchase history");
                log_history(&purchase_history(&purchases, &self.games(), &user_id));
            }
            ShellCommand::Recommend(id) => self.recommend(id.as_deref())?,
            ShellCommand::Friends => {
                let user_id = self.user()?.id.clone();
                run_recommend_friends(app, &user_id, FRIEND_RECOMMENDATION_LIMIT)?;
            }
            ShellCommand::Reload => {
                self.reload();
                log_done(&format!("{} games loaded", self.catalog.len()));
            }
        }
        Ok(())
    }

    fn cart(&mut self, op: CartOp) -> Result<(), CliError> {
        match op {
            CartOp::Show => {
                log_heading("Cart");
                if self.session.cart().is_empty() {
                    log_empty("The cart is empty.");
                }
                for game in self.session.cart() {
                    log_game_line(game, None);
                }
                log::info!("  Total: {}", format_money(self.session.cart_total()));
            }
            CartOp::Add(id) => {
                let game = self.find(&id)?.game.clone();
                if self.session.is_purchased(&id) {
                    return Err(CliError::usage(format!("You already own {}", game.title)));
                }
                if !self.session.add_to_cart(game) {
                    log_empty("Already in the cart.");
                }
            }
            CartOp::Remove(id) => {
                if !self.session.remove_from_cart(&id) {
                    log_empty("Not in the cart.");
                }
            }
            CartOp::Clear => self.session.clear_cart(),
        }
        Ok(())
    }

    fn wishlist(&mut self, op: WishlistOp) -> Result<(), CliError> {
        match op {
            WishlistOp::Show => {
                log_heading("Wishlist");
                if self.session.wishlist().is_empty() {
                    log_empty("The wishlist is empty.");
                }
                for game in self.session.wishlist() {
                    log_game_line(game, None);
                }
                self.session.clear_unseen_wishlist();
            }
            WishlistOp::Add(id) => {
                let game = self.find(&id)?.game.clone();
                if !self.session.add_to_wishlist(game) {
                    log_empty("Already on the wishlist.");
                }
            }
            WishlistOp::Remove(id) => {
                if !self.session.remove_from_wishlist(&id) {
                    log_empty("Not on the wishlist.");
                }
            }
            WishlistOp::Toggle(id) => {
                let game = self.find(&id)?.game.clone();
                self.session.toggle_wishlist(game);
            }
        }
        Ok(())
    }

    fn funds(&mut self, op: FundsOp) -> Result<(), CliError> {
        match op {
            FundsOp::Show => {
                let balance = self.user()?.wallet_balance;
                log::info!("Wallet: {}", format_money(balance).if_supports_color(Stdout, |t| t.bold()));
                let quick: Vec<String> = QUICK_AMOUNTS.iter().map(|a| format!("{a:.0}")).collect();
                log_empty(&format!("Quick top-ups: {} \u{20ac}", quick.join(" / ")));
            }
            FundsOp::Add(amount) => {
                self.user()?;
                self.session.add_funds(amount);
            }
            FundsOp::Redeem(code) => {
                self.user()?;
                match wallet::redeem(&mut self.session, &code) {
                    Some(credit) => log_done(&format!("Redeemed {}", format_money(credit))),
                    None => return Err(CliError::usage("Enter a code to redeem")),
                }
            }
        }
        Ok(())
    }

    fn payment(&mut self, op: PaymentOp) -> Result<(), CliError> {
        match op {
            PaymentOp::List => {
                let user = self.user()?;
                log_heading("Payment methods");
                if user.payment_methods.is_empty() {
                    log_empty("None saved.");
                }
                for pm in &user.payment_methods {
                    log::info!("  #{} {}", pm.id, pm.name);
                }
            }
            PaymentOp::Add(name) => {
                self.user()?;
                if let Some(id) = self.session.add_payment_method(&name) {
                    log_done(&format!("Added payment method #{}", id));
                }
            }
            PaymentOp::Remove(id) => {
                if !self.session.remove_payment_method(id) {
                    return Err(CliError::not_found(format!("payment method #{}", id)));
                }
            }
        }
        Ok(())
    }

    /// Reopen the recommendations page: refetch the catalog, restore the
    /// cached search against it, then search again only if a different game
    /// was asked for.
    fn recommend(&mut self, game_id: Option<&str>) -> Result<(), CliError> {
        let app = self.app;
        let mut view = app.run(
            "Loading catalog...",
            RecommendationView::mount(&app.client, &mut self.storage),
        );
        let Some(game_id) = game_id else {
            if view.searched {
                log_view(&view);
            } else {
                log_empty("No search yet. Use 'recommend <game-id>'.");
            }
            return Ok(());
        };

        if !(view.searched && view.selected_game.as_deref() == Some(game_id)) {
            if !view.games.iter().any(|g| g.id == game_id) {
                return Err(CliError::not_found(format!("game {}", game_id)));
            }
            view.select(game_id);
            app.run(
                "Finding similar games...",
                view.search(&app.client, &mut self.storage),
            );
        }
        log_view(&view);
        Ok(())
    }

    /// Print one status line per kind of change since the last command.
    fn report_events(&self) {
        let events = distinct_events(self.events.try_iter());
        for event in events {
            match event {
                SessionEvent::FiltersChanged => {
                    log_catalog(self.app.variant, &self.catalog, self.session.filters());
                }
                SessionEvent::CartChanged => status(&format!(
                    "Cart: {} item(s), {}",
                    self.session.cart().len(),
                    format_money(self.session.cart_total())
                )),
                SessionEvent::WishlistChanged => {
                    let unseen = self.session.unseen_wishlist();
                    status(&format!(
                        "Wishlist: {} game(s){}",
                        self.session.wishlist().len(),
                        if unseen > 0 {
                            format!(", {} new", unseen)
                        } else {
                            String::new()
                        }
                    ));
                }
                SessionEvent::UserChanged => match self.session.current_user() {
                    Some(user) => status(&format!(
                        "{}: {} in wallet",
                        user.name(),
                        format_money(user.wallet_balance)
                    )),
                    None => status("Logged out"),
                },
                SessionEvent::PurchasesChanged => status("Library updated"),
                SessionEvent::Closed => {}
            }
        }
    }

    fn close(self) {
        let events = self.events;
        self.session.teardown();
        if events.try_iter().any(|e| e == SessionEvent::Closed) {
            log::debug!("Session closed");
        }
    }
}

fn status(text: &str) {
    log::info!("{}", format!("  \u{00b7} {}", text).if_supports_color(Stdout, |t| t.dimmed()));
}

/// Run the interactive shell until `quit` or end of input.
pub(crate) fn run_shell(app: &App) -> Result<(), CliError> {
    let mut shell = Shell::start(app);
    log::info!(
        "{} {}",
        app.variant.display_name().if_supports_color(Stdout, |t| t.bold()),
        format!(
            "storefront, {} games. Type 'help' for commands.",
            shell.catalog.len()
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    if let Some(user) = shell.session.current_user() {
        log::info!(
            "Signed in as {} ({})",
            user.name(),
            format_money(user.wallet_balance)
        );
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", shell.prompt());
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(cmd) => {
                if let Err(e) = shell.execute(cmd) {
                    log::error!("{}", e);
                }
            }
            Err(msg) => log::warn!("{}", msg),
        }
        shell.report_events();
    }
    shell.close();
    Ok(())
}

#[cfg(test)]
#[path = "../tests/shell_tests.rs"]
mod tests;
