use super::*;
use bonfire_core::Address;

#[test]
fn test_parse_simple_commands() {
    assert_eq!(parse("help"), Ok(ShellCommand::Help));
    assert_eq!(parse("  QUIT "), Ok(ShellCommand::Quit));
    assert_eq!(parse("ls"), Ok(ShellCommand::List));
    assert_eq!(parse("checkout"), Ok(ShellCommand::Checkout));
    assert_eq!(parse("recommend"), Ok(ShellCommand::Recommend(None)));
    assert_eq!(
        parse("recommend g1"),
        Ok(ShellCommand::Recommend(Some("g1".to_string())))
    );
}

#[test]
fn test_parse_keeps_multi_word_arguments() {
    assert_eq!(
        parse("genre Free to Play"),
        Ok(ShellCommand::Genre(Some("Free to Play".to_string())))
    );
    assert_eq!(parse("genre off"), Ok(ShellCommand::Genre(None)));
    assert_eq!(
        parse("publisher  CD Projekt Red"),
        Ok(ShellCommand::Publisher(Some("CD Projekt Red".to_string())))
    );
    assert_eq!(
        parse("search the witcher"),
        Ok(ShellCommand::Search("the witcher".to_string()))
    );
    assert_eq!(parse("search"), Ok(ShellCommand::Search(String::new())));
}

#[test]
fn test_parse_sub_actions() {
    assert_eq!(parse("cart"), Ok(ShellCommand::Cart(CartOp::Show)));
    assert_eq!(
        parse("cart add g1"),
        Ok(ShellCommand::Cart(CartOp::Add("g1".to_string())))
    );
    assert_eq!(
        parse("wish toggle g2"),
        Ok(ShellCommand::Wishlist(WishlistOp::Toggle("g2".to_string())))
    );
    assert_eq!(
        parse("funds add 12,50"),
        Ok(ShellCommand::Funds(FundsOp::Add(12.5)))
    );
    assert_eq!(
        parse("wallet redeem BONFIRE2024"),
        Ok(ShellCommand::Funds(FundsOp::Redeem("BONFIRE2024".to_string())))
    );
    assert_eq!(
        parse("payment remove 2"),
        Ok(ShellCommand::Payment(PaymentOp::Remove(2)))
    );
    assert_eq!(
        parse("profile set city New York"),
        Ok(ShellCommand::Profile(ProfileOp::Set(
            ProfileField::City,
            "New York".to_string()
        )))
    );
}

#[test]
fn test_parse_errors() {
    assert!(parse("frobnicate").unwrap_err().contains("unknown command"));
    assert!(parse("cart add").unwrap_err().starts_with("usage:"));
    assert!(parse("funds add nothing").is_err());
    assert!(parse("funds add -5").is_err());
    assert!(parse("payment remove first").is_err());
    assert!(parse("password a b").is_err());
    assert!(parse("profile set shoe 42").is_err());
    assert!(parse("genre").is_err());
}

#[test]
fn test_password_parts() {
    assert_eq!(
        parse("password old new new"),
        Ok(ShellCommand::Password {
            current: "old".to_string(),
            new: "new".to_string(),
            confirm: "new".to_string(),
        })
    );
}

#[test]
fn test_profile_patch_keeps_rest_of_address() {
    let mut user = User::guest();
    user.address = Some(Address {
        street: "Main St 1".to_string(),
        zip: "12345".to_string(),
        city: "Berlin".to_string(),
        country: "DE".to_string(),
    });

    let patch = profile_patch(&user, ProfileField::City, " Hamburg ");
    let address = patch.address.unwrap();
    assert_eq!(address.city, "Hamburg");
    assert_eq!(address.street, "Main St 1");
    assert_eq!(patch.display_name, None);

    let patch = profile_patch(&user, ProfileField::DisplayName, "Wilhelmina");
    assert_eq!(patch.display_name.as_deref(), Some("Wilhelmina"));
    assert_eq!(patch.address, None);
}

#[test]
fn test_profile_patch_without_address() {
    let user = User::guest();
    let patch = profile_patch(&user, ProfileField::Zip, "99999");
    assert_eq!(
        patch.address,
        Some(Address {
            zip: "99999".to_string(),
            ..Default::default()
        })
    );
}

#[test]
fn test_distinct_events_keep_order() {
    let events = distinct_events([
        SessionEvent::CartChanged,
        SessionEvent::UserChanged,
        SessionEvent::CartChanged,
        SessionEvent::PurchasesChanged,
    ]);
    assert_eq!(
        events,
        vec![
            SessionEvent::CartChanged,
            SessionEvent::UserChanged,
            SessionEvent::PurchasesChanged
        ]
    );
}

#[test]
fn test_session_events_drive_status() {
    let mut session = Session::new(Some(User::guest()));
    let rx = session.subscribe();
    session.add_to_cart(Game::new("a", "Celeste", 19.99));
    session.add_to_cart(Game::new("b", "Hades", 24.99));
    session.add_funds(10.0);
    assert_eq!(
        distinct_events(rx.try_iter()),
        vec![SessionEvent::CartChanged, SessionEvent::UserChanged]
    );
}

#[test]
fn test_bonfire_genre_pick_drops_publisher() {
    let mut session = Session::new(None);
    session.set_active_publisher(Some("Valve".to_string()));
    pick_genre(&mut session, Variant::Bonfire, GenreFilter::FreeToPlay);
    assert_eq!(session.filters().active_genre, Some(GenreFilter::FreeToPlay));
    assert_eq!(session.filters().active_publisher, None);

    pick_genre(&mut session, Variant::Bonfire, GenreFilter::FreeToPlay);
    assert_eq!(session.filters().active_genre, None);
}

#[test]
fn test_nexus_genre_pick_only_toggles() {
    let rpg = GenreFilter::Tag("RPG".to_string());
    let mut session = Session::new(None);
    session.set_active_publisher(Some("Valve".to_string()));
    pick_genre(&mut session, Variant::Nexus, rpg.clone());
    assert_eq!(session.filters().active_genre, Some(rpg.clone()));
    assert_eq!(session.filters().active_publisher.as_deref(), Some("Valve"));

    pick_genre(&mut session, Variant::Nexus, rpg);
    assert_eq!(session.filters().active_genre, None);
}
