use std::cell::RefCell;

use super::*;
use bonfire_core::{Purchase, PurchaseReceipt, User};

/// Records every request; fails the one for `fail_on`.
#[derive(Default)]
struct Backend {
    fail_on: Option<&'static str>,
    seen: RefCell<Vec<NewPurchase>>,
}

impl PurchaseSink for Backend {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseReceipt, ApiError> {
        self.seen.borrow_mut().push(purchase.clone());
        if self.fail_on == Some(purchase.game_id.as_str()) {
            return Err(ApiError::from_response(400, r#"{"detail": "Already owned"}"#));
        }
        Ok(PurchaseReceipt {
            purchase: Purchase {
                id: format!("p-{}", purchase.game_id),
                user_id: purchase.user_id.clone(),
                game_id: purchase.game_id.clone(),
                price_paid: purchase.price_paid,
                purchased_at: None,
            },
            new_balance: 0.0,
            message: "ok".to_string(),
        })
    }

    async fn purchases(&self) -> Result<Vec<Purchase>, ApiError> {
        Ok(Vec::new())
    }
}

fn session_with(balance: f64, games: &[(&str, f64)]) -> Session {
    let mut user = User::guest();
    user.wallet_balance = balance;
    let mut session = Session::new(Some(user));
    for (id, price) in games {
        session.add_to_cart(Game::new(*id, id.to_uppercase(), *price));
    }
    session
}

fn balance(session: &Session) -> f64 {
    session.current_user().unwrap().wallet_balance
}

#[tokio::test]
async fn test_insufficient_funds_changes_nothing() {
    let mut session = session_with(10.0, &[("a", 5.0), ("b", 19.99)]);
    let backend = Backend::default();

    let err = checkout(&mut session, &backend).await.unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::InsufficientFunds { balance, total } if balance == 10.0 && (total - 24.99).abs() < 1e-9
    ));
    assert!(backend.seen.borrow().is_empty());
    assert_eq!(session.cart().len(), 2);
    assert_eq!(balance(&session), 10.0);
    assert!(!session.is_purchased("a"));
}

#[tokio::test]
async fn test_successful_checkout() {
    let mut session = session_with(150.0, &[("a", 0.0), ("b", 19.99)]);
    let backend = Backend::default();

    let summary = checkout(&mut session, &backend).await.unwrap();
    assert_eq!(summary.games, vec!["A", "B"]);
    assert!((summary.total - 19.99).abs() < 1e-9);
    assert!((balance(&session) - 130.01).abs() < 1e-9);
    assert_eq!(summary.new_balance, balance(&session));
    assert!(session.cart().is_empty());
    assert!(session.is_purchased("a") && session.is_purchased("b"));

    let seen = backend.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].user_id, "fallback_id");
    assert_eq!(seen[1].price_paid, 19.99);
}

#[tokio::test]
async fn test_exact_balance_is_enough() {
    let mut session = session_with(20.0, &[("a", 20.0)]);
    checkout(&mut session, &Backend::default()).await.unwrap();
    assert_eq!(balance(&session), 0.0);
}

#[tokio::test]
async fn test_not_logged_in() {
    let mut session = session_with(100.0, &[("a", 1.0)]);
    session.logout();
    assert!(matches!(
        checkout(&mut session, &Backend::default()).await,
        Err(CheckoutError::NotLoggedIn)
    ));
}

#[tokio::test]
async fn test_empty_cart() {
    let mut session = session_with(100.0, &[]);
    assert!(matches!(validate(&session), Err(CheckoutError::EmptyCart)));
    assert!(matches!(
        checkout(&mut session, &Backend::default()).await,
        Err(CheckoutError::EmptyCart)
    ));
}

#[tokio::test]
async fn test_partial_failure_settles_completed_games() {
    let mut session = session_with(100.0, &[("a", 10.0), ("b", 20.0), ("c", 30.0)]);
    let backend = Backend {
        fail_on: Some("b"),
        ..Default::default()
    };

    let err = checkout(&mut session, &backend).await.unwrap_err();
    match err {
        CheckoutError::Api {
            title,
            completed,
            source,
        } => {
            assert_eq!(title, "B");
            assert_eq!(completed, vec!["a"]);
            assert_eq!(source.to_string(), "Already owned");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(backend.seen.borrow().len(), 2);
    assert!(session.is_purchased("a"));
    assert!(!session.is_purchased("b"));
    let left: Vec<&str> = session.cart().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(left, vec!["b", "c"]);
    assert_eq!(balance(&session), 90.0);
}
