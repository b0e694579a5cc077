//! Data model types for the storefront backend.
//!
//! These mirror the JSON documents served under `/api`: games, publishers,
//! users, reviews, purchases, and the enriched recommendation records.
//! Every record carries an `id` (the backend's `_id`, renamed by the API
//! client before deserialization).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Game ────────────────────────────────────────────────────────────────────

/// A game in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in euros. `0.0` means free to play.
    #[serde(default)]
    pub price: f64,
    /// Release date as entered by an editor (`DD.MM.YYYY`, `YYYY-MM-DD`, or
    /// `YYYYMMDD`). Kept verbatim; see [`crate::parse_release_date`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_requirements: Option<String>,
    #[serde(default)]
    pub tag_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Game {
    /// Minimal game with only the fields the storefront logic looks at.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            price,
            release_date: None,
            publisher_id: None,
            cover_url: None,
            screenshots: Vec::new(),
            platforms: Vec::new(),
            min_requirements: None,
            tag_names: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    pub fn with_publisher(mut self, publisher_id: impl Into<String>) -> Self {
        self.publisher_id = Some(publisher_id.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_names.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_names.iter().any(|t| t == tag)
    }
}

/// Body for `POST /games/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub release_date: Option<String>,
    pub publisher_id: Option<String>,
    pub cover_url: Option<String>,
    pub platforms: Vec<String>,
    pub tag_names: Vec<String>,
}

/// Body for `PUT /games/{id}`. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<Vec<String>>,
}

// ── Publisher ───────────────────────────────────────────────────────────────

/// A publisher or studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Publisher {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: None,
            founded_year: None,
            website: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPublisher {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublisherChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// ── User ────────────────────────────────────────────────────────────────────

/// A postal address on a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

/// A payment method added on the profile screen. Only held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: u64,
    pub name: String,
}

/// A storefront user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Wallet balance in euros.
    #[serde(default)]
    pub wallet_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Never sent to the backend.
    #[serde(default, skip_serializing)]
    pub payment_methods: Vec<PaymentMethod>,
}

impl User {
    /// Identity used when no account can be loaded from the backend.
    pub fn guest() -> Self {
        Self {
            id: "fallback_id".to_string(),
            username: "willi".to_string(),
            display_name: Some("Willi".to_string()),
            real_name: Some("Wilhelm".to_string()),
            email: "willi@example.com".to_string(),
            avatar_url: None,
            wallet_balance: 150.0,
            address: Some(Address::default()),
            payment_methods: Vec::new(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id == "fallback_id"
    }

    /// Name shown in the UI: display name, then username, then id.
    pub fn name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.username.is_empty() => &self.username,
            _ => &self.id,
        }
    }
}

/// Local shallow update of the current user's profile. `None` fields are
/// left as-is. The wallet is not part of a profile: it only moves through
/// top-ups and purchases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub real_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub address: Option<Address>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.username {
            user.username = v;
        }
        if let Some(v) = self.display_name {
            user.display_name = Some(v);
        }
        if let Some(v) = self.real_name {
            user.real_name = Some(v);
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.avatar_url {
            user.avatar_url = Some(v);
        }
        if let Some(v) = self.address {
            user.address = Some(v);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub wallet_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

// ── Review ──────────────────────────────────────────────────────────────────

/// A user's review of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub game_id: String,
    /// 1 to 5 stars.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default = "default_recommended")]
    pub recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_recommended() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: String,
    pub game_id: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_hours: Option<f64>,
}

// ── Purchase ────────────────────────────────────────────────────────────────

/// One entry of the purchase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub user_id: String,
    pub game_id: String,
    pub price_paid: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub user_id: String,
    pub game_id: String,
    pub price_paid: f64,
}

/// Response of `POST /purchases/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub purchase: Purchase,
    pub new_balance: f64,
    #[serde(default)]
    pub message: String,
}

// ── Recommendations ─────────────────────────────────────────────────────────

/// "Players who bought X also bought" entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlsoBought {
    pub game: Game,
    #[serde(default)]
    pub common_owners: u32,
    #[serde(default)]
    pub owner_names: Vec<String>,
}

/// Similar game by shared tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagMatch {
    pub game: Game,
    #[serde(default)]
    pub common_tags: u32,
    #[serde(default)]
    pub shared_tags: Vec<String>,
}

/// Game owned by friends of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendPick {
    pub game: Game,
    pub recommendation: FriendReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendReason {
    #[serde(default)]
    pub friend_count: u32,
    #[serde(default)]
    pub friends_who_own: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

// ── Admin responses ─────────────────────────────────────────────────────────

/// Response of a `DELETE` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Response of `POST /seed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    #[serde(default)]
    pub message: String,
    /// Number of records created per collection.
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
}
