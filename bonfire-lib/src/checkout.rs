//! Cart checkout.

use bonfire_api::ApiError;
use bonfire_core::{Game, NewPurchase};

use crate::backend::PurchaseSink;
use crate::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Log in to buy games")]
    NotLoggedIn,

    #[error("The cart is empty")]
    EmptyCart,

    #[error("Not enough funds: balance {balance:.2} €, cart total {total:.2} €")]
    InsufficientFunds { balance: f64, total: f64 },

    /// The backend rejected a purchase. Games bought before the failure
    /// stay bought and are listed in `completed`.
    #[error("Purchase of '{title}' failed: {source}")]
    Api {
        title: String,
        completed: Vec<String>,
        #[source]
        source: ApiError,
    },
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub games: Vec<String>,
    pub total: f64,
    pub new_balance: f64,
}

/// Client-side checks done before any purchase request is sent.
///
/// Returns the cart total.
pub fn validate(session: &Session) -> Result<f64, CheckoutError> {
    let user = session.current_user().ok_or(CheckoutError::NotLoggedIn)?;
    if session.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let total = session.cart_total();
    if user.wallet_balance < total {
        return Err(CheckoutError::InsufficientFunds {
            balance: user.wallet_balance,
            total,
        });
    }
    Ok(total)
}

/// Buy everything in the cart, one purchase request per game.
///
/// On success the games are marked purchased, the cart is cleared and the
/// wallet is debited by the cart total. If a request fails, the games
/// already recorded are settled the same way and the rest stay in the cart.
pub async fn checkout<S: PurchaseSink>(
    session: &mut Session,
    sink: &S,
) -> Result<CheckoutSummary, CheckoutError> {
    let total = validate(session)?;
    let user_id = match session.current_user() {
        Some(user) => user.id.clone(),
        None => return Err(CheckoutError::NotLoggedIn),
    };
    let cart: Vec<Game> = session.cart().to_vec();

    let mut bought: Vec<Game> = Vec::with_capacity(cart.len());
    for game in cart {
        let request = NewPurchase {
            user_id: user_id.clone(),
            game_id: game.id.clone(),
            price_paid: game.price,
        };
        match sink.record_purchase(&request).await {
            Ok(receipt) => {
                log::debug!(
                    "Bought {} for {:.2} (backend balance {:.2})",
                    game.title,
                    game.price,
                    receipt.new_balance
                );
                bought.push(game);
            }
            Err(source) => {
                session.settle_purchase(&bought);
                return Err(CheckoutError::Api {
                    title: game.title,
                    completed: bought.into_iter().map(|g| g.id).collect(),
                    source,
                });
            }
        }
    }

    session.settle_purchase(&bought);
    let new_balance = session
        .current_user()
        .map(|u| u.wallet_balance)
        .unwrap_or_default();
    Ok(CheckoutSummary {
        games: bought.into_iter().map(|g| g.title).collect(),
        total,
        new_balance,
    })
}

#[cfg(test)]
#[path = "tests/checkout_tests.rs"]
mod tests;
