//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bonfire_api::{ALSO_BOUGHT_LIMIT, FRIEND_RECOMMENDATION_LIMIT, LIST_LIMIT, TOP_RATED_LIMIT};
use bonfire_core::Variant;
use bonfire_lib::ReviewSort;

#[derive(Parser)]
#[command(name = "bonfire")]
#[command(about = "Browse and administer the Bonfire game store", long_about = None)]
pub(crate) struct Cli {
    /// Backend base URL (overrides env and config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Storefront flavour: bonfire or nexus (overrides settings.toml)
    #[arg(long, global = true)]
    pub variant: Option<Variant>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Browse and manage the game catalog
    Games {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Manage publishers
    Publishers {
        #[command(subcommand)]
        action: PublisherAction,
    },

    /// List and manage reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show the purchase log
    Purchases {
        /// Only purchases by this user
        #[arg(short, long)]
        user: Option<String>,

        #[arg(short, long, default_value_t = LIST_LIMIT)]
        limit: u32,
    },

    /// Game recommendations
    Recommend {
        #[command(subcommand)]
        action: RecommendAction,
    },

    /// List the genre filters of the active storefront
    Genres,

    /// Wipe and reseed the backend database (development backends only)
    Seed {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },

    /// Manage API configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage the session cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Start an interactive storefront session
    Shell,
}

/// Filters shared by commands that list games.
#[derive(Args, Clone, Default)]
pub(crate) struct GameFilterArgs {
    /// Genre label, e.g. "RPG", "Free to Play" or "pre-order"
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Publisher name
    #[arg(short, long)]
    pub publisher: Option<String>,

    /// Case-insensitive text in title or description
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum GameAction {
    /// List the catalog, optionally filtered
    List {
        #[command(flatten)]
        filter: GameFilterArgs,

        #[arg(short, long, default_value_t = LIST_LIMIT)]
        limit: u32,
    },

    /// Show one game
    Show { id: String },

    /// Show the best rated games
    Top {
        #[arg(short, long, default_value_t = TOP_RATED_LIMIT)]
        limit: u32,
    },

    /// Games often bought together with this one
    AlsoBought {
        id: String,

        #[arg(short, long, default_value_t = ALSO_BOUGHT_LIMIT)]
        limit: u32,
    },

    /// Add a game to the catalog
    Create(GameFields),

    /// Change fields of a game
    Update {
        id: String,

        #[command(flatten)]
        fields: GameUpdateFields,
    },

    /// Remove a game from the catalog
    Delete { id: String },
}

#[derive(Args)]
pub(crate) struct GameFields {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    /// Price in euros; empty or omitted means free
    #[arg(long, default_value = "")]
    pub price: String,

    /// DD.MM.YYYY, YYYY-MM-DD or YYYYMMDD
    #[arg(long, default_value = "")]
    pub release_date: String,

    /// Existing publisher id
    #[arg(long, conflicts_with = "new_publisher")]
    pub publisher_id: Option<String>,

    /// Create a publisher with this name first
    #[arg(long)]
    pub new_publisher: Option<String>,

    #[arg(long, default_value = "")]
    pub cover_url: String,

    /// Comma separated, e.g. "PC, PS5"
    #[arg(long, default_value = "")]
    pub platforms: String,

    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub(crate) struct GameUpdateFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub release_date: Option<String>,

    #[arg(long)]
    pub publisher_id: Option<String>,

    #[arg(long)]
    pub cover_url: Option<String>,

    #[arg(long)]
    pub platforms: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

#[derive(Args, Default)]
pub(crate) struct PublisherFields {
    #[arg(long, default_value = "")]
    pub country: String,

    #[arg(long, default_value = "")]
    pub founded_year: String,

    #[arg(long, default_value = "")]
    pub website: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Subcommand)]
pub(crate) enum PublisherAction {
    List,

    Create {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: PublisherFields,
    },

    /// Replace a publisher's fields
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: PublisherFields,
    },

    Delete { id: String },
}

#[derive(Subcommand)]
pub(crate) enum ReviewAction {
    List {
        /// newest, oldest, highest or lowest
        #[arg(long, default_value_t = ReviewSort::Newest)]
        sort: ReviewSort,

        /// Only reviews of this game
        #[arg(short, long)]
        game: Option<String>,

        #[arg(short, long, default_value_t = LIST_LIMIT)]
        limit: u32,
    },

    Create {
        #[arg(long)]
        user: String,

        #[arg(long)]
        game: String,

        /// 1 to 5
        #[arg(long, default_value = "5")]
        rating: String,

        #[arg(long, default_value = "")]
        text: String,

        /// Mark the review as not recommending the game
        #[arg(long)]
        not_recommended: bool,

        #[arg(long, default_value = "")]
        playtime: String,
    },

    Update {
        id: String,

        #[arg(long)]
        rating: Option<u8>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        recommended: Option<bool>,

        #[arg(long)]
        playtime: Option<f64>,
    },

    Delete { id: String },
}

#[derive(Subcommand)]
pub(crate) enum UserAction {
    List {
        #[arg(short, long, default_value_t = LIST_LIMIT)]
        limit: u32,
    },

    Show { id: String },

    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        display_name: String,

        /// Starting wallet balance in euros
        #[arg(long, default_value = "")]
        wallet: String,
    },

    Delete { id: String },

    /// Games owned by a user
    Library { id: String },

    /// Friends of a user
    Friends { id: String },

    /// A user's purchases with game titles
    History { id: String },
}

#[derive(Subcommand)]
pub(crate) enum RecommendAction {
    /// Games similar to one game (cached for the session)
    Similar {
        game_id: String,

        /// Ignore and replace the cached result
        #[arg(long)]
        fresh: bool,
    },

    /// Show the last cached similarity search
    Last,

    /// Games a user's friends own
    Friends {
        user_id: String,

        #[arg(short, long, default_value_t = FRIEND_RECOMMENDATION_LIMIT)]
        limit: u32,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration and where each value comes from
    Show,

    /// Print the config file path
    Path,

    /// Save the backend URL to the config file
    SetUrl { url: String },

    /// Save the default storefront variant
    SetVariant { variant: Variant },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Delete the cached session state
    Clear,
}
