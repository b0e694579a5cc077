//! One method per backend endpoint.

use bonfire_core::{
    AlsoBought, DeleteAck, FriendPick, Game, GameChanges, NewGame, NewPublisher, NewPurchase,
    NewReview, NewUser, Publisher, PublisherChanges, Purchase, PurchaseReceipt, Review,
    ReviewChanges, SeedReport, TagMatch, User, UserChanges,
};

use crate::client::StoreClient;
use crate::error::ApiError;

/// Default `limit` for games, users, reviews and purchases listings.
pub const LIST_LIMIT: u32 = 100;
pub const TOP_RATED_LIMIT: u32 = 10;
pub const ALSO_BOUGHT_LIMIT: u32 = 5;
pub const FRIEND_RECOMMENDATION_LIMIT: u32 = 10;
/// Default `limit` for both similarity lookups.
pub const SIMILAR_LIMIT: u32 = 3;

// -- games --

impl StoreClient {
    pub async fn list_games(&self, limit: u32) -> Result<Vec<Game>, ApiError> {
        self.get_limited(&["games"], limit).await
    }

    pub async fn get_game(&self, id: &str) -> Result<Game, ApiError> {
        self.get(&["games", id]).await
    }

    pub async fn top_rated_games(&self, limit: u32) -> Result<Vec<Game>, ApiError> {
        self.get_limited(&["games", "top-rated"], limit).await
    }

    /// Games most often bought by owners of `id`.
    pub async fn also_bought(&self, id: &str, limit: u32) -> Result<Vec<AlsoBought>, ApiError> {
        self.get_limited(&["games", id, "also-bought"], limit)
            .await
    }

    pub async fn create_game(&self, game: &NewGame) -> Result<Game, ApiError> {
        self.post(&["games", ""], game).await
    }

    pub async fn update_game(&self, id: &str, changes: &GameChanges) -> Result<Game, ApiError> {
        self.put(&["games", id], changes).await
    }

    pub async fn delete_game(&self, id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&["games", id]).await
    }
}

// -- users --

impl StoreClient {
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, ApiError> {
        self.get_limited(&["users"], limit).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.get(&["users", id]).await
    }

    pub async fn user_library(&self, id: &str) -> Result<Vec<Game>, ApiError> {
        self.get(&["users", id, "library"]).await
    }

    pub async fn user_friends(&self, id: &str) -> Result<Vec<User>, ApiError> {
        self.get(&["users", id, "friends"]).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post(&["users", ""], user).await
    }

    pub async fn update_user(&self, id: &str, changes: &UserChanges) -> Result<User, ApiError> {
        self.put(&["users", id], changes).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&["users", id]).await
    }
}

// -- publishers --

impl StoreClient {
    pub async fn list_publishers(&self) -> Result<Vec<Publisher>, ApiError> {
        self.get(&["publishers"]).await
    }

    pub async fn create_publisher(&self, publisher: &NewPublisher) -> Result<Publisher, ApiError> {
        self.post(&["publishers", ""], publisher).await
    }

    pub async fn update_publisher(
        &self,
        id: &str,
        changes: &PublisherChanges,
    ) -> Result<Publisher, ApiError> {
        self.put(&["publishers", id], changes).await
    }

    pub async fn delete_publisher(&self, id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&["publishers", id]).await
    }
}

// -- reviews --

impl StoreClient {
    pub async fn list_reviews(&self, limit: u32) -> Result<Vec<Review>, ApiError> {
        self.get_limited(&["reviews"], limit).await
    }

    pub async fn create_review(&self, review: &NewReview) -> Result<Review, ApiError> {
        self.post(&["reviews", ""], review).await
    }

    pub async fn update_review(
        &self,
        id: &str,
        changes: &ReviewChanges,
    ) -> Result<Review, ApiError> {
        self.put(&["reviews", id], changes).await
    }

    pub async fn delete_review(&self, id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&["reviews", id]).await
    }
}

// -- purchases --

impl StoreClient {
    pub async fn list_purchases(&self, limit: u32) -> Result<Vec<Purchase>, ApiError> {
        self.get_limited(&["purchases"], limit).await
    }

    /// Record a purchase. The backend debits the user's wallet and answers
    /// with the new balance.
    pub async fn create_purchase(
        &self,
        purchase: &NewPurchase,
    ) -> Result<PurchaseReceipt, ApiError> {
        self.post(&["purchases", ""], purchase).await
    }
}

// -- recommendations --

impl StoreClient {
    pub async fn friend_recommendations(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<FriendPick>, ApiError> {
        self.get_limited(&["recommendations", user_id, "friends"], limit)
            .await
    }

    /// Games sharing the most owners with `id`.
    pub async fn similar_games(&self, id: &str, limit: u32) -> Result<Vec<AlsoBought>, ApiError> {
        self.get_limited(&["recommendations", "games", id, "similar"], limit)
            .await
    }

    /// Games sharing the most tags with `id`.
    pub async fn similar_games_by_tags(
        &self,
        id: &str,
        limit: u32,
    ) -> Result<Vec<TagMatch>, ApiError> {
        self.get_limited(&["recommendations", "games", id, "similar-by-tags"], limit)
            .await
    }

    /// Wipe and reseed the backend database. Development backends only.
    pub async fn seed_database(&self) -> Result<SeedReport, ApiError> {
        self.post_empty(&["seed"]).await
    }
}
