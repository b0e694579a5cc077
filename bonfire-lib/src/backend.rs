//! The backend operations the session layer depends on.
//!
//! Each trait covers one concern so callers (and tests) only need to provide
//! what they use. [`StoreClient`] implements all of them.

use bonfire_api::{ApiError, LIST_LIMIT, SIMILAR_LIMIT, StoreClient};
use bonfire_core::{AlsoBought, Game, NewPurchase, Purchase, PurchaseReceipt, TagMatch, User};

/// Source of user accounts for session start-up.
#[allow(async_fn_in_trait)]
pub trait UserSource {
    async fn users(&self) -> Result<Vec<User>, ApiError>;
}

/// Records purchases and reports purchase history.
#[allow(async_fn_in_trait)]
pub trait PurchaseSink {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseReceipt, ApiError>;

    async fn purchases(&self) -> Result<Vec<Purchase>, ApiError>;
}

/// Catalog and similarity lookups for the recommendation view.
#[allow(async_fn_in_trait)]
pub trait SimilaritySource {
    async fn catalog(&self) -> Result<Vec<Game>, ApiError>;

    async fn similar(&self, game_id: &str) -> Result<Vec<AlsoBought>, ApiError>;

    async fn similar_by_tags(&self, game_id: &str) -> Result<Vec<TagMatch>, ApiError>;
}

impl UserSource for StoreClient {
    async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.list_users(LIST_LIMIT).await
    }
}

impl PurchaseSink for StoreClient {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseReceipt, ApiError> {
        self.create_purchase(purchase).await
    }

    async fn purchases(&self) -> Result<Vec<Purchase>, ApiError> {
        self.list_purchases(LIST_LIMIT).await
    }
}

impl SimilaritySource for StoreClient {
    async fn catalog(&self) -> Result<Vec<Game>, ApiError> {
        self.list_games(LIST_LIMIT).await
    }

    async fn similar(&self, game_id: &str) -> Result<Vec<AlsoBought>, ApiError> {
        self.similar_games(game_id, SIMILAR_LIMIT).await
    }

    async fn similar_by_tags(&self, game_id: &str) -> Result<Vec<TagMatch>, ApiError> {
        self.similar_games_by_tags(game_id, SIMILAR_LIMIT).await
    }
}
