//! Domain records and pure rules shared by every Bonfire front-end.
//!
//! Nothing in this crate touches the network. Records mirror the JSON the
//! storefront backend returns (after `_id` has been normalized to `id`),
//! and the helpers here answer questions about them: is a game free, is it
//! a pre-order, is a form complete enough to submit.

pub mod dates;
pub mod error;
pub mod forms;
pub mod genre;
pub mod types;

pub use dates::{
    format_release_date, is_free_to_play, is_pre_order, mask_release_date_input,
    parse_release_date, parse_timestamp, today,
};
pub use error::ValidationError;
pub use forms::{
    GameForm, PasswordChange, PublisherChoice, PublisherForm, ReviewForm, UserForm, ValidGame,
    parse_money, profile_changes,
};
pub use genre::{FREE_TO_PLAY, GenreFilter, PRE_ORDER, Variant, VariantParseError};
pub use types::{
    Address, AlsoBought, DeleteAck, FriendPick, FriendReason, Game, GameChanges, NewGame,
    NewPublisher, NewPurchase, NewReview, NewUser, PaymentMethod, Publisher, PublisherChanges,
    Purchase, PurchaseReceipt, Review, ReviewChanges, SeedReport, TagMatch, User, UserChanges,
    UserPatch,
};
