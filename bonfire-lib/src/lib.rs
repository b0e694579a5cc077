//! Storefront session layer shared by every front-end.
//!
//! Holds the state store ([`Session`]) and the view logic built on top of
//! it: catalog filtering, review listing, checkout, wallet top-ups and the
//! cached recommendation view.

pub mod backend;
pub mod checkout;
pub mod filter;
pub mod history;
pub mod recommend;
pub mod reviews;
pub mod sequencer;
pub mod session;
pub mod settings;
pub mod storage;
pub mod wallet;

pub use backend::{PurchaseSink, SimilaritySource, UserSource};
pub use checkout::{CheckoutError, CheckoutSummary, checkout};
pub use filter::{
    FeaturedSections, FilterState, ListedGame, catalog_publishers, enrich_with_publishers,
    featured_sections, filter_listed, visible_games,
};
pub use history::{HistoryEntry, purchase_history};
pub use recommend::{CACHE_KEY, RecommendationView, SearchRequest, SearchResult};
pub use reviews::{
    DisplayRef, ReviewRow, ReviewSort, ReviewStats, average_rating, join_reviews, sort_reviews,
};
pub use sequencer::{RequestSequencer, RequestTicket};
pub use session::{Session, SessionEvent};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
