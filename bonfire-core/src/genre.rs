//! Genre filters and storefront variants.
//!
//! A genre filter is either a literal tag ("RPG", "Indie") or one of two
//! pseudo-genres that are computed from other fields: "Free to Play" (price
//! is zero) and "Pre-Order" (release date in the future).

use std::collections::BTreeSet;

use crate::types::Game;

/// Label of the price-based pseudo-genre.
pub const FREE_TO_PLAY: &str = "Free to Play";
/// Label of the release-date-based pseudo-genre.
pub const PRE_ORDER: &str = "Pre-Order";

/// The active genre filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    /// Games with a price of zero.
    FreeToPlay,
    /// Games with a release date after today.
    PreOrder,
    /// Games carrying this tag.
    Tag(String),
}

impl GenreFilter {
    /// Build a filter from a UI label. Pseudo-genre labels are matched exactly.
    pub fn from_label(label: &str) -> Self {
        match label {
            FREE_TO_PLAY => Self::FreeToPlay,
            PRE_ORDER => Self::PreOrder,
            other => Self::Tag(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::FreeToPlay => FREE_TO_PLAY,
            Self::PreOrder => PRE_ORDER,
            Self::Tag(tag) => tag,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        !matches!(self, Self::Tag(_))
    }
}

impl std::fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for GenreFilter {
    type Err = std::convert::Infallible;

    /// Also accepts the slug forms `free-to-play` and `pre-order`
    /// (case-insensitive) so the filter can be typed on a command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ok(match lower.as_str() {
            "free to play" | "free-to-play" | "f2p" => Self::FreeToPlay,
            "pre-order" | "preorder" | "pre order" => Self::PreOrder,
            _ => Self::Tag(s.trim().to_string()),
        })
    }
}

/// The two storefront front-ends. They share one filtering core and differ
/// only in which genre labels they offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Bonfire,
    Nexus,
}

/// Fixed genre dropdown of the Bonfire front-end.
const BONFIRE_TAGS: &[&str] = &[
    "Action",
    "Adventure",
    "Co-op",
    "Competitive",
    "Fantasy",
    "Horror",
    "Indie",
    "Open World",
    "Platformer",
    "RPG",
    "Shooter",
    "Simulation",
    "Sports",
    "Strategy",
];

/// Tags the Nexus sidebar is allowed to show.
const NEXUS_TAGS: &[&str] = &[
    "Action Adventure",
    "Co-op",
    "Competitive",
    "Fantasy",
    "Indie",
    "Open World",
    "RPG",
    "Shooter",
];

impl Variant {
    pub fn all() -> &'static [Variant] {
        &[Variant::Bonfire, Variant::Nexus]
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Bonfire => "bonfire",
            Self::Nexus => "nexus",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bonfire => "Bonfire",
            Self::Nexus => "NEXUS",
        }
    }

    /// Whether the variant offers the Free to Play / Pre-Order entries.
    pub fn has_pseudo_genres(&self) -> bool {
        matches!(self, Self::Bonfire)
    }

    /// Genre filters this variant offers for the given catalog.
    ///
    /// Bonfire shows a fixed list followed by the two pseudo-genres. Nexus
    /// shows the allowed tags that actually occur in the catalog, sorted.
    pub fn genres(&self, catalog: &[Game]) -> Vec<GenreFilter> {
        match self {
            Self::Bonfire => BONFIRE_TAGS
                .iter()
                .map(|t| GenreFilter::Tag(t.to_string()))
                .chain([GenreFilter::FreeToPlay, GenreFilter::PreOrder])
                .collect(),
            Self::Nexus => {
                let present: BTreeSet<&str> = catalog
                    .iter()
                    .flat_map(|g| g.tag_names.iter().map(String::as_str))
                    .filter(|t| NEXUS_TAGS.contains(t))
                    .collect();
                present
                    .into_iter()
                    .map(|t| GenreFilter::Tag(t.to_string()))
                    .collect()
            }
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Error returned when parsing an unrecognized variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantParseError(pub String);

impl std::fmt::Display for VariantParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown storefront variant: '{}'", self.0)
    }
}

impl std::error::Error for VariantParseError {}

impl std::str::FromStr for Variant {
    type Err = VariantParseError;

    /// Parse a variant name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Variant::all()
            .iter()
            .copied()
            .find(|v| v.short_name() == lower)
            .ok_or_else(|| VariantParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_labels_round_trip() {
        assert_eq!(GenreFilter::from_label("Free to Play"), GenreFilter::FreeToPlay);
        assert_eq!(GenreFilter::from_label("Pre-Order"), GenreFilter::PreOrder);
        assert_eq!(GenreFilter::FreeToPlay.label(), "Free to Play");
        assert_eq!(GenreFilter::PreOrder.to_string(), "Pre-Order");
    }

    #[test]
    fn tag_labels_are_literal() {
        let g = GenreFilter::from_label("RPG");
        assert_eq!(g, GenreFilter::Tag("RPG".to_string()));
        assert!(!g.is_pseudo());
        // Only the exact label maps to the pseudo-genre
        assert_eq!(
            GenreFilter::from_label("free to play"),
            GenreFilter::Tag("free to play".to_string())
        );
    }

    #[test]
    fn command_line_slugs() {
        assert_eq!("free-to-play".parse::<GenreFilter>().unwrap(), GenreFilter::FreeToPlay);
        assert_eq!("PRE-ORDER".parse::<GenreFilter>().unwrap(), GenreFilter::PreOrder);
        assert_eq!(
            "Open World".parse::<GenreFilter>().unwrap(),
            GenreFilter::Tag("Open World".to_string())
        );
    }

    #[test]
    fn bonfire_offers_pseudo_genres_last() {
        let genres = Variant::Bonfire.genres(&[]);
        assert_eq!(genres.len(), 16);
        assert_eq!(genres[14], GenreFilter::FreeToPlay);
        assert_eq!(genres[15], GenreFilter::PreOrder);
    }

    #[test]
    fn nexus_offers_present_allowed_tags() {
        let catalog = vec![
            Game::new("1", "A", 10.0).with_tag("RPG").with_tag("Horror"),
            Game::new("2", "B", 10.0).with_tag("Indie").with_tag("RPG"),
        ];
        let genres = Variant::Nexus.genres(&catalog);
        assert_eq!(
            genres,
            vec![
                GenreFilter::Tag("Indie".to_string()),
                GenreFilter::Tag("RPG".to_string())
            ]
        );
        assert!(!Variant::Nexus.has_pseudo_genres());
    }

    #[test]
    fn variant_parsing() {
        assert_eq!("Nexus".parse::<Variant>().unwrap(), Variant::Nexus);
        assert_eq!("bonfire".parse::<Variant>().unwrap(), Variant::Bonfire);
        assert!("steam".parse::<Variant>().is_err());
    }
}
