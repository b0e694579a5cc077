//! Whole-session scenarios against an in-process backend.

use std::cell::RefCell;

use bonfire_api::ApiError;
use bonfire_core::{
    Game, GenreFilter, NewPurchase, Publisher, Purchase, PurchaseReceipt, User, today,
};
use bonfire_lib::{
    CheckoutError, FilterState, PurchaseSink, Session, SessionEvent, UserSource, checkout,
    visible_games, wallet,
};

#[derive(Default)]
struct Backend {
    users: Vec<User>,
    purchases: RefCell<Vec<Purchase>>,
}

impl UserSource for Backend {
    async fn users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.users.clone())
    }
}

impl PurchaseSink for Backend {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseReceipt, ApiError> {
        let record = Purchase {
            id: format!("p{}", self.purchases.borrow().len() + 1),
            user_id: purchase.user_id.clone(),
            game_id: purchase.game_id.clone(),
            price_paid: purchase.price_paid,
            purchased_at: None,
        };
        self.purchases.borrow_mut().push(record.clone());
        Ok(PurchaseReceipt {
            purchase: record,
            new_balance: 0.0,
            message: "ok".to_string(),
        })
    }

    async fn purchases(&self) -> Result<Vec<Purchase>, ApiError> {
        Ok(self.purchases.borrow().clone())
    }
}

fn catalog() -> Vec<Game> {
    vec![
        Game::new("a", "The Witcher 3", 0.0),
        Game::new("b", "Hollow Knight", 19.99),
    ]
}

fn titles(catalog: &[Game], filters: &FilterState) -> Vec<String> {
    visible_games(catalog, filters, &[] as &[Publisher], today())
        .into_iter()
        .map(|g| g.game.title)
        .collect()
}

#[tokio::test]
async fn browse_filter_and_buy() {
    let backend = Backend::default();
    let mut session = Session::initialize(&backend).await;
    assert!(session.current_user().unwrap().is_guest());
    let events = session.subscribe();

    let catalog = catalog();

    session.set_active_genre(Some(GenreFilter::FreeToPlay));
    assert_eq!(titles(&catalog, session.filters()), vec!["The Witcher 3"]);

    session.add_to_cart(catalog[1].clone());
    assert!((session.cart_total() - 19.99).abs() < 1e-9);

    session.reset_filters();
    session.set_search_query("witch");
    assert_eq!(titles(&catalog, session.filters()), vec!["The Witcher 3"]);

    let summary = checkout(&mut session, &backend).await.unwrap();
    assert_eq!(summary.games, vec!["Hollow Knight"]);
    assert!((session.current_user().unwrap().wallet_balance - 130.01).abs() < 1e-9);
    assert!(session.cart().is_empty());
    assert!(session.is_purchased("b"));

    session.teardown();
    let seen: Vec<SessionEvent> = events.try_iter().collect();
    assert_eq!(seen.first(), Some(&SessionEvent::FiltersChanged));
    assert_eq!(seen.last(), Some(&SessionEvent::Closed));
    assert!(seen.contains(&SessionEvent::PurchasesChanged));
}

#[tokio::test]
async fn insufficient_funds_then_top_up() {
    let mut poor = User::guest();
    poor.id = "u1".to_string();
    poor.wallet_balance = 10.0;
    let backend = Backend {
        users: vec![poor],
        ..Default::default()
    };
    let mut session = Session::initialize(&backend).await;
    session.add_to_cart(Game::new("b", "Hollow Knight", 19.99));

    let err = checkout(&mut session, &backend).await.unwrap_err();
    assert!(matches!(err, CheckoutError::InsufficientFunds { .. }));
    assert!(backend.purchases.borrow().is_empty());
    assert_eq!(session.current_user().unwrap().wallet_balance, 10.0);
    assert_eq!(session.cart().len(), 1);

    assert_eq!(wallet::redeem(&mut session, "BONFIRE2024"), Some(20.0));
    checkout(&mut session, &backend).await.unwrap();
    assert!((session.current_user().unwrap().wallet_balance - 10.01).abs() < 1e-9);
}

#[tokio::test]
async fn purchase_history_survives_relogin() {
    let mut user = User::guest();
    user.id = "u1".to_string();
    let backend = Backend {
        users: vec![user.clone()],
        ..Default::default()
    };
    let mut session = Session::initialize(&backend).await;
    session.add_to_cart(Game::new("a", "Celeste", 0.0));
    checkout(&mut session, &backend).await.unwrap();

    session.logout();
    assert!(!session.is_purchased("a"));

    session.login_as(user);
    session.refresh_purchases(&backend).await.unwrap();
    assert!(session.is_purchased("a"));
}
