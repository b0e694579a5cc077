//! Admin and profile form validation.
//!
//! Forms hold raw text exactly as typed. `validate` either produces the
//! request body the backend expects or a [`ValidationError`]; no form is
//! ever submitted half-checked.

use crate::error::ValidationError;
use crate::types::{Address, NewGame, NewPublisher, NewReview, NewUser, UserChanges};

/// Publisher selection on the game form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PublisherChoice {
    #[default]
    None,
    /// An existing publisher by id.
    Existing(String),
    /// Create a publisher with this name before creating the game.
    New(String),
}

/// The "create game" form.
#[derive(Debug, Clone, Default)]
pub struct GameForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub release_date: String,
    pub publisher: PublisherChoice,
    pub cover_url: String,
    /// Comma-separated platform names.
    pub platforms: String,
    pub tag_names: Vec<String>,
}

/// A validated game form. When `new_publisher` is set the caller creates it
/// first and fills `game.publisher_id` with the returned id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidGame {
    pub game: NewGame,
    pub new_publisher: Option<NewPublisher>,
}

impl GameForm {
    /// Toggle a tag on or off (tag picker behavior).
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tag_names.iter().position(|t| t == tag) {
            self.tag_names.remove(pos);
        } else {
            self.tag_names.push(tag.to_string());
        }
    }

    pub fn validate(&self) -> Result<ValidGame, ValidationError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let price = parse_price("price", &self.price)?;

        let (publisher_id, new_publisher) = match &self.publisher {
            PublisherChoice::None => (None, None),
            PublisherChoice::Existing(id) => (optional(id), None),
            PublisherChoice::New(name) => {
                let name = required("publisher name", name)?;
                (
                    None,
                    Some(NewPublisher {
                        name,
                        ..Default::default()
                    }),
                )
            }
        };

        Ok(ValidGame {
            game: NewGame {
                title,
                description,
                price,
                release_date: optional(&self.release_date),
                publisher_id,
                cover_url: optional(&self.cover_url),
                platforms: split_list(&self.platforms),
                tag_names: self.tag_names.clone(),
            },
            new_publisher,
        })
    }
}

/// The "create/edit publisher" form.
#[derive(Debug, Clone, Default)]
pub struct PublisherForm {
    pub name: String,
    pub country: String,
    pub founded_year: String,
    pub website: String,
    pub description: String,
}

impl PublisherForm {
    pub fn validate(&self) -> Result<NewPublisher, ValidationError> {
        let founded_year = match self.founded_year.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i32>()
                    .map_err(|e| ValidationError::invalid("founded year", e.to_string()))?,
            ),
        };
        Ok(NewPublisher {
            name: required("name", &self.name)?,
            description: optional(&self.description),
            website: optional(&self.website),
            founded_year,
            country: optional(&self.country),
        })
    }
}

/// The "write review" form.
#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub user_id: String,
    pub game_id: String,
    pub rating: String,
    pub text: String,
    pub recommended: bool,
    pub playtime_hours: String,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            game_id: String::new(),
            rating: "5".to_string(),
            text: String::new(),
            recommended: true,
            playtime_hours: String::new(),
        }
    }
}

impl ReviewForm {
    pub fn validate(&self) -> Result<NewReview, ValidationError> {
        let user_id = required("user", &self.user_id)?;
        let game_id = required("game", &self.game_id)?;
        let rating: i64 = self
            .rating
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid("rating", format!("'{}'", self.rating)))?;
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange(rating));
        }
        let playtime_hours = match self.playtime_hours.trim() {
            "" => None,
            _ => Some(parse_price("playtime", &self.playtime_hours)?),
        };
        Ok(NewReview {
            user_id,
            game_id,
            rating: rating as u8,
            text: optional(&self.text),
            recommended: self.recommended,
            playtime_hours,
        })
    }
}

/// The "create user" form.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub wallet_balance: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        Ok(NewUser {
            username: required("username", &self.username)?,
            email: required("email", &self.email)?,
            display_name: optional(&self.display_name),
            wallet_balance: parse_price("wallet balance", &self.wallet_balance)?,
            avatar_url: None,
            address: None,
        })
    }
}

/// The profile screen's password section.
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current.is_empty() {
            return Err(ValidationError::MissingField("current password"));
        }
        if self.new.is_empty() {
            return Err(ValidationError::MissingField("new password"));
        }
        if self.new != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Profile edits persisted with `PUT /users/{id}`.
pub fn profile_changes(display_name: &str, email: &str, address: Address) -> UserChanges {
    UserChanges {
        display_name: optional(display_name),
        email: optional(email),
        address: Some(address),
        ..Default::default()
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Read a euro amount as typed: surrounding blanks, a trailing euro sign and
/// a comma decimal separator are accepted. `None` unless the result is finite.
pub fn parse_money(input: &str) -> Option<f64> {
    let cleaned = input.trim().trim_end_matches('\u{20ac}').trim().replace(',', ".");
    let amount: f64 = cleaned.parse().ok()?;
    amount.is_finite().then_some(amount)
}

/// Empty means zero; otherwise a non-negative amount.
fn parse_price(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let amount = parse_money(trimmed)
        .ok_or_else(|| ValidationError::invalid(field, format!("'{trimmed}' is not a number")))?;
    if amount < 0.0 {
        return Err(ValidationError::invalid(field, "must be zero or more"));
    }
    Ok(amount)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
