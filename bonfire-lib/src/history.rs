//! Purchase history for the profile screen.

use std::collections::HashMap;

use bonfire_core::{Game, Purchase, parse_timestamp};

/// Title shown for purchases whose game no longer exists.
pub const UNKNOWN_GAME: &str = "Unknown game";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub purchase_id: String,
    /// `DD.MM.YYYY`, or `None` when the backend sent no timestamp.
    pub date: Option<String>,
    pub title: String,
    pub total: f64,
}

/// The purchases of `user_id`, newest listing position first, each with its
/// game title.
pub fn purchase_history(purchases: &[Purchase], games: &[Game], user_id: &str) -> Vec<HistoryEntry> {
    let titles: HashMap<&str, &str> = games
        .iter()
        .map(|g| (g.id.as_str(), g.title.as_str()))
        .collect();

    purchases
        .iter()
        .filter(|p| p.user_id == user_id)
        .rev()
        .map(|p| HistoryEntry {
            purchase_id: p.id.clone(),
            date: p
                .purchased_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|ts| ts.format("%d.%m.%Y").to_string()),
            title: titles
                .get(p.game_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_GAME)
                .to_string(),
            total: p.price_paid,
        })
        .collect()
}

/// Sum spent across `entries`.
pub fn total_spent(entries: &[HistoryEntry]) -> f64 {
    entries.iter().map(|e| e.total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(id: &str, user: &str, game: &str, at: Option<&str>) -> Purchase {
        Purchase {
            id: id.to_string(),
            user_id: user.to_string(),
            game_id: game.to_string(),
            price_paid: 9.99,
            purchased_at: at.map(str::to_string),
        }
    }

    #[test]
    fn history_is_users_own_newest_first() {
        let purchases = vec![
            purchase("p1", "u1", "g1", Some("2024-05-01T10:00:00")),
            purchase("p2", "u2", "g1", None),
            purchase("p3", "u1", "gone", None),
        ];
        let games = vec![Game::new("g1", "Stardew Valley", 9.99)];

        let history = purchase_history(&purchases, &games, "u1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].purchase_id, "p3");
        assert_eq!(history[0].title, UNKNOWN_GAME);
        assert_eq!(history[0].date, None);
        assert_eq!(history[1].title, "Stardew Valley");
        assert_eq!(history[1].date.as_deref(), Some("01.05.2024"));
        assert!((total_spent(&history) - 19.98).abs() < 1e-9);
    }
}
