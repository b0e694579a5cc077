//! The application state store.
//!
//! A [`Session`] owns everything the storefront keeps between screens: the
//! current user, cart, wishlist, purchased games and the catalog filters.
//! It is created once with [`Session::initialize`], passed by reference to
//! whatever renders it, and closed with [`Session::teardown`].
//!
//! Mutations are synchronous. Each one that changes state sends exactly one
//! [`SessionEvent`] to every subscriber after the change is applied.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};

use bonfire_api::ApiError;
use bonfire_core::{Game, GenreFilter, PaymentMethod, Purchase, User, UserPatch};

use crate::backend::{PurchaseSink, UserSource};
use crate::filter::FilterState;

/// What changed in a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    FiltersChanged,
    CartChanged,
    WishlistChanged,
    /// Login, logout, profile or wallet change.
    UserChanged,
    PurchasesChanged,
    /// Final notification from [`Session::teardown`].
    Closed,
}

#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
    cart: Vec<Game>,
    wishlist: Vec<Game>,
    unseen_wishlist: usize,
    purchased: HashSet<String>,
    filters: FilterState,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl Session {
    /// A session for `user` with empty cart, wishlist and filters.
    pub fn new(user: Option<User>) -> Self {
        Self {
            user,
            ..Default::default()
        }
    }

    /// Start a session as the first user the backend knows.
    ///
    /// Falls back to the guest identity when the backend is unreachable or
    /// has no users.
    pub async fn initialize<S: UserSource>(source: &S) -> Self {
        let user = match source.users().await {
            Ok(users) => match users.into_iter().next() {
                Some(user) => user,
                None => {
                    log::warn!("Backend has no users, continuing as guest");
                    User::guest()
                }
            },
            Err(e) => {
                log::warn!("Could not load users ({}), continuing as guest", e);
                User::guest()
            }
        };
        log::debug!("Session started as {}", user.name());
        Self::new(Some(user))
    }

    /// Close the session. Subscribers get [`SessionEvent::Closed`] and then
    /// see their channel disconnect.
    pub fn teardown(mut self) {
        self.notify(SessionEvent::Closed);
        self.subscribers.clear();
    }

    /// Receive a [`SessionEvent`] for every state change from now on.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: SessionEvent) {
        // Subscribers that went away are dropped.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    // -- filters --

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Select `genre`, or clear it if it is already the active one.
    /// `None` clears the genre.
    pub fn set_active_genre(&mut self, genre: Option<GenreFilter>) {
        let next = toggled(&self.filters.active_genre, genre);
        if next != self.filters.active_genre {
            self.filters.active_genre = next;
            self.notify(SessionEvent::FiltersChanged);
        }
    }

    /// Toggle `genre` and drop the publisher selection in one step.
    pub fn select_genre_exclusive(&mut self, genre: GenreFilter) {
        self.filters.active_genre = toggled(&self.filters.active_genre, Some(genre));
        self.filters.active_publisher = None;
        self.notify(SessionEvent::FiltersChanged);
    }

    pub fn set_active_publisher(&mut self, publisher: Option<String>) {
        if publisher != self.filters.active_publisher {
            self.filters.active_publisher = publisher;
            self.notify(SessionEvent::FiltersChanged);
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.filters.search_query {
            self.filters.search_query = query;
            self.notify(SessionEvent::FiltersChanged);
        }
    }

    /// Clear genre, publisher and search.
    pub fn reset_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters = FilterState::default();
            self.notify(SessionEvent::FiltersChanged);
        }
    }

    // -- cart --

    pub fn cart(&self) -> &[Game] {
        &self.cart
    }

    /// Add `game` unless a game with the same id is already in the cart.
    /// Returns whether it was added.
    pub fn add_to_cart(&mut self, game: Game) -> bool {
        if self.is_in_cart(&game.id) {
            return false;
        }
        self.cart.push(game);
        self.notify(SessionEvent::CartChanged);
        true
    }

    pub fn remove_from_cart(&mut self, game_id: &str) -> bool {
        let before = self.cart.len();
        self.cart.retain(|g| g.id != game_id);
        let removed = self.cart.len() != before;
        if removed {
            self.notify(SessionEvent::CartChanged);
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        if !self.cart.is_empty() {
            self.cart.clear();
            self.notify(SessionEvent::CartChanged);
        }
    }

    pub fn is_in_cart(&self, game_id: &str) -> bool {
        self.cart.iter().any(|g| g.id == game_id)
    }

    /// Sum of the prices currently in the cart.
    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(|g| g.price).sum()
    }

    // -- wishlist --

    pub fn wishlist(&self) -> &[Game] {
        &self.wishlist
    }

    /// Number of wishlist additions since the wishlist was last viewed.
    pub fn unseen_wishlist(&self) -> usize {
        self.unseen_wishlist
    }

    pub fn add_to_wishlist(&mut self, game: Game) -> bool {
        if self.is_in_wishlist(&game.id) {
            return false;
        }
        self.wishlist.push(game);
        self.unseen_wishlist += 1;
        self.notify(SessionEvent::WishlistChanged);
        true
    }

    pub fn remove_from_wishlist(&mut self, game_id: &str) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|g| g.id != game_id);
        let removed = self.wishlist.len() != before;
        if removed {
            self.notify(SessionEvent::WishlistChanged);
        }
        removed
    }

    /// Add `game` if absent, remove it otherwise. Returns whether it is on
    /// the wishlist afterwards.
    pub fn toggle_wishlist(&mut self, game: Game) -> bool {
        if self.is_in_wishlist(&game.id) {
            self.remove_from_wishlist(&game.id);
            false
        } else {
            self.add_to_wishlist(game)
        }
    }

    pub fn clear_unseen_wishlist(&mut self) {
        if self.unseen_wishlist != 0 {
            self.unseen_wishlist = 0;
            self.notify(SessionEvent::WishlistChanged);
        }
    }

    pub fn is_in_wishlist(&self, game_id: &str) -> bool {
        self.wishlist.iter().any(|g| g.id == game_id)
    }

    // -- user --

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Merge the present fields of `patch` into the current user.
    ///
    /// Local only; persisting a profile is a separate backend call.
    pub fn update_user(&mut self, patch: UserPatch) {
        if patch.is_empty() {
            return;
        }
        let Some(user) = self.user.as_mut() else {
            return;
        };
        patch.apply(user);
        self.notify(SessionEvent::UserChanged);
    }

    /// Credit the wallet. Ignored unless `amount` is positive and finite or
    /// when nobody is logged in. Returns whether the balance changed.
    pub fn add_funds(&mut self, amount: f64) -> bool {
        if !(amount.is_finite() && amount > 0.0) {
            return false;
        }
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        user.wallet_balance += amount;
        self.notify(SessionEvent::UserChanged);
        true
    }

    /// Forget the current user. Cart and wishlist are kept.
    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            self.purchased.clear();
            self.notify(SessionEvent::UserChanged);
        }
    }

    /// Switch to `user`. Purchase history belongs to the previous user and
    /// is cleared until reloaded.
    pub fn login_as(&mut self, user: User) {
        self.user = Some(user);
        self.purchased.clear();
        self.notify(SessionEvent::UserChanged);
    }

    /// Add a payment method to the current user's local list. Returns its id.
    pub fn add_payment_method(&mut self, name: &str) -> Option<u64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let user = self.user.as_mut()?;
        let id = user
            .payment_methods
            .iter()
            .map(|pm| pm.id)
            .max()
            .map_or(1, |max| max + 1);
        user.payment_methods.push(PaymentMethod {
            id,
            name: name.to_string(),
        });
        self.notify(SessionEvent::UserChanged);
        Some(id)
    }

    pub fn remove_payment_method(&mut self, id: u64) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        let before = user.payment_methods.len();
        user.payment_methods.retain(|pm| pm.id != id);
        let removed = user.payment_methods.len() != before;
        if removed {
            self.notify(SessionEvent::UserChanged);
        }
        removed
    }

    // -- purchases --

    pub fn is_purchased(&self, game_id: &str) -> bool {
        self.purchased.contains(game_id)
    }

    /// Replace the purchased set with the current user's entries from a
    /// backend purchase listing.
    pub fn load_purchases(&mut self, purchases: &[Purchase]) {
        let Some(user_id) = self.user.as_ref().map(|u| u.id.clone()) else {
            return;
        };
        self.purchased = purchases
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.game_id.clone())
            .collect();
        self.notify(SessionEvent::PurchasesChanged);
    }

    /// Fetch the purchase history and load it.
    pub async fn refresh_purchases<S: PurchaseSink>(&mut self, sink: &S) -> Result<(), ApiError> {
        let purchases = sink.purchases().await?;
        self.load_purchases(&purchases);
        Ok(())
    }

    /// Apply a completed purchase of `games`: mark them owned, take them out
    /// of the cart and debit the wallet by their total.
    pub(crate) fn settle_purchase(&mut self, games: &[Game]) {
        if games.is_empty() {
            return;
        }
        let total: f64 = games.iter().map(|g| g.price).sum();
        for game in games {
            self.purchased.insert(game.id.clone());
        }
        self.cart.retain(|g| !games.iter().any(|bought| bought.id == g.id));
        if let Some(user) = self.user.as_mut() {
            user.wallet_balance -= total;
        }
        self.notify(SessionEvent::PurchasesChanged);
    }
}

fn toggled(current: &Option<GenreFilter>, requested: Option<GenreFilter>) -> Option<GenreFilter> {
    match requested {
        Some(genre) if current.as_ref() == Some(&genre) => None,
        other => other,
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
