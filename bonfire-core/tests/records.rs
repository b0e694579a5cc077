use bonfire_core::{AlsoBought, Game, PurchaseReceipt, Review, User, UserPatch};

#[test]
fn game_from_backend_json() {
    let game: Game = serde_json::from_str(
        r#"{
            "id": "g1",
            "title": "The Witcher 3",
            "description": "Monster hunting",
            "price": 29.99,
            "release_date": "19.05.2015",
            "publisher_id": null,
            "platforms": ["PC", "PS5"],
            "tag_names": ["RPG", "Open World"],
            "created_at": "2024-01-01T10:00:00"
        }"#,
    )
    .unwrap();
    assert_eq!(game.title, "The Witcher 3");
    assert_eq!(game.publisher_id, None);
    assert!(game.has_tag("RPG"));
    assert!(game.screenshots.is_empty());
}

#[test]
fn user_payment_methods_stay_local() {
    let mut user = User::guest();
    user.payment_methods.push(bonfire_core::PaymentMethod {
        id: 1,
        name: "Visa".to_string(),
    });
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("payment_methods").is_none());
    assert_eq!(json["wallet_balance"], 150.0);
}

#[test]
fn user_name_fallbacks() {
    let mut user = User::guest();
    assert_eq!(user.name(), "Willi");
    user.display_name = None;
    assert_eq!(user.name(), "willi");
    user.username.clear();
    assert_eq!(user.name(), "fallback_id");
    assert!(user.is_guest());
}

#[test]
fn user_patch_is_shallow() {
    let mut user = User::guest();
    UserPatch {
        display_name: Some("Geralt".to_string()),
        ..Default::default()
    }
    .apply(&mut user);
    assert_eq!(user.display_name.as_deref(), Some("Geralt"));
    assert_eq!(user.email, "willi@example.com");
    assert_eq!(user.wallet_balance, 150.0);
}

#[test]
fn review_defaults() {
    let review: Review = serde_json::from_str(
        r#"{"id": "r1", "user_id": "u1", "game_id": "g1", "rating": 4}"#,
    )
    .unwrap();
    assert!(review.recommended);
    assert_eq!(review.created_at, None);
}

#[test]
fn nested_recommendation_record() {
    let rec: AlsoBought = serde_json::from_str(
        r#"{
            "game": {"id": "g2", "title": "Hades", "price": 24.5},
            "common_owners": 3,
            "owner_names": ["Ana", "Ben"]
        }"#,
    )
    .unwrap();
    assert_eq!(rec.game.id, "g2");
    assert_eq!(rec.common_owners, 3);
}

#[test]
fn purchase_receipt() {
    let receipt: PurchaseReceipt = serde_json::from_str(
        r#"{
            "purchase": {"id": "p1", "user_id": "u1", "game_id": "g1", "price_paid": 19.99},
            "new_balance": 80.01,
            "message": "ok"
        }"#,
    )
    .unwrap();
    assert_eq!(receipt.purchase.game_id, "g1");
    assert_eq!(receipt.new_balance, 80.01);
}
